use ndarray::{Array2, ArrayD};
use num::complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{
    array_ext::{broadcast_shape, broadcast_view},
    error::Result,
    field::{dynamic_field, dynamic_spectrum},
    units::{Angle, AngularRate, Frequency, Length, Time},
};

// A set of scattering points on a thin screen. The three arrays broadcast against each other;
// their broadcast shape is the shape of the point set.
#[derive(Clone, Debug)]
pub struct ScatteringScreen {
    pub theta_par: Angle,
    pub theta_perp: Angle,
    pub realization: ArrayD<Complex64>,
}

impl ScatteringScreen {
    pub fn new(
        theta_par: Angle,
        theta_perp: Angle,
        realization: ArrayD<Complex64>,
    ) -> Result<ScatteringScreen> {
        broadcast_shape(&[theta_par.shape(), theta_perp.shape(), realization.shape()])?;
        Ok(ScatteringScreen {
            theta_par,
            theta_perp,
            realization,
        })
    }

    /// Draws complex normal amplitudes for the given points, tapered by a Gaussian
    /// envelope `exp(-theta² / (2 width²))` in angle from the line of sight.
    pub fn gaussian<R: Rng>(
        theta_par: Angle,
        theta_perp: Angle,
        width: &Angle,
        rng: &mut R,
    ) -> Result<ScatteringScreen> {
        let shape = broadcast_shape(&[theta_par.shape(), theta_perp.shape(), width.shape()])?;
        let par = broadcast_view(theta_par.si(), &shape)?;
        let perp = broadcast_view(theta_perp.si(), &shape)?;
        let width_b = broadcast_view(width.si(), &shape)?;

        let realization = ndarray::Zip::from(&par)
            .and(&perp)
            .and(&width_b)
            .map_collect(|par, perp, w| {
                let envelope = (-(par * par + perp * perp) / (2. * w * w)).exp();
                let re: f64 = rng.sample(StandardNormal);
                let im: f64 = rng.sample(StandardNormal);
                Complex64::new(re, im) * envelope
            });

        Ok(ScatteringScreen {
            theta_par,
            theta_perp,
            realization,
        })
    }

    pub fn shape(&self) -> Vec<usize> {
        // validated in the constructors
        broadcast_shape(&[
            self.theta_par.shape(),
            self.theta_perp.shape(),
            self.realization.shape(),
        ])
        .unwrap_or_default()
    }

    pub fn dynamic_field(
        &self,
        d_eff: &Length,
        mu_eff: &AngularRate,
        f: &Frequency,
        t: &Time,
    ) -> Result<ArrayD<Complex64>> {
        dynamic_field(
            &self.theta_par,
            &self.theta_perp,
            &self.realization,
            d_eff,
            mu_eff,
            f,
            t,
        )
    }

    pub fn dynamic_spectrum(
        &self,
        d_eff: &Length,
        mu_eff: &AngularRate,
        f: &Frequency,
        t: &Time,
    ) -> Result<Array2<f64>> {
        dynamic_spectrum(&self.dynamic_field(d_eff, mu_eff, f, t)?)
    }
}
