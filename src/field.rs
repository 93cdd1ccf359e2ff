use log::debug;
use ndarray::{Array2, ArrayD, Axis, Ix2};
use num::complex::Complex64;

use crate::{
    array_ext::{zip_broadcast3, Expand2},
    error::{Result, ScreenError},
    units::{
        cycles_to_radians, Angle, AngularRate, Frequency, Length, PhysicalDimension, Quantity,
        Time, SPEED_OF_LIGHT,
    },
};

const c: f64 = SPEED_OF_LIGHT;

const i: Complex64 = Complex64::new(0., 1.);

pub(crate) fn check_1d<D: PhysicalDimension>(name: &'static str, q: &Quantity<D>) -> Result<()> {
    if q.ndim() == 1 {
        Ok(())
    } else {
        Err(ScreenError::NotOneDimensional {
            name,
            ndim: q.ndim(),
        })
    }
}

/// Thin-screen geometric delay `d_eff / (2c) * (theta_par² + theta_perp²)` of a set of
/// scattering points. All three inputs are broadcast against each other.
pub fn geometric_delay(theta_par: &Angle, theta_perp: &Angle, d_eff: &Length) -> Result<Time> {
    let tau = zip_broadcast3(
        theta_par.si().view(),
        theta_perp.si().view(),
        d_eff.si().view(),
        |par, perp, d| d / (2. * c) * (par * par + perp * perp),
    )?;
    Ok(Time::from_si(tau))
}

/**
Given a set of scattering points, construct the dynamic wave field.

`theta_par` are the angles of the points along the effective proper motion `mu_eff`
(`v_eff / d_eff`), `theta_perp` the angles perpendicular to it, and `realization` their
complex amplitudes. `d_eff` should be the same for all points; if it differs between
them, no screen-to-screen scattering is taken into account. `f` and `t` must be
one-dimensional.

The returned field has time along the last axis, frequency along the second to last,
and in front of those the broadcast shape of the point parameters.
*/
pub fn dynamic_field(
    theta_par: &Angle,
    theta_perp: &Angle,
    realization: &ArrayD<Complex64>,
    d_eff: &Length,
    mu_eff: &AngularRate,
    f: &Frequency,
    t: &Time,
) -> Result<ArrayD<Complex64>> {
    check_1d("f", f)?;
    check_1d("t", t)?;

    debug!(
        "dynamic field for points {:?} over {} frequencies and {} times",
        theta_par.shape(),
        f.len(),
        t.len()
    );

    // The last two axes are reserved for frequency and time.
    let theta_par = theta_par.expand2();
    let theta_perp = theta_perp.expand2();
    let realization = realization.expand2();
    let d_eff = d_eff.expand2();
    let mu_eff = mu_eff.expand2();

    let th_par = zip_broadcast3(
        theta_par.si().view(),
        mu_eff.si().view(),
        t.si().view(),
        |th, mu, t| th + mu * t,
    )?;
    let tau_t = geometric_delay(&Angle::from_si(th_par), &theta_perp, &d_eff)?;

    let f = f.si().view().insert_axis(Axis(1));
    zip_broadcast3(realization.view(), tau_t.si().view(), f, |r, tau, f| {
        *r * (-i * cycles_to_radians(f * tau)).exp()
    })
}

/// Intensity of a dynamic field: the waves of all scattering points are summed
/// coherently, leaving a (frequency, time) power spectrum.
pub fn dynamic_spectrum(field: &ArrayD<Complex64>) -> Result<Array2<f64>> {
    if field.ndim() < 2 {
        return Err(ScreenError::MissingGridAxes(field.ndim()));
    }

    let mut summed = field.clone();
    while summed.ndim() > 2 {
        summed = summed.sum_axis(Axis(0));
    }

    Ok(summed.into_dimensionality::<Ix2>()?.mapv(|x| x.norm_sqr()))
}
