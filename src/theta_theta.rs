use log::{debug, trace};
use ndarray::{arr0, Array2, ArrayBase, Data, Dimension, Ix3, Zip};
use num::{complex::Complex64, Zero};

use crate::{
    error::{Result, ScreenError},
    field::{check_1d, dynamic_field},
    signal::scalar::Scalar,
    units::{Angle, AngularRate, Frequency, Length, Time, RADIAN},
};

/**
Maps a dynamic spectrum onto pairs of scattering angles.

For every angle in `theta` (taken along the proper motion, with no perpendicular offset)
a unit-amplitude template field is synthesized over the (`f`, `t`) grid. Each pair of
templates is correlated by brute force, `pairs[i, j] = field[j] * conj(field[i])`, its
constant part removed, and the result averaged against `dynspec`, which must broadcast
to (frequency, time).

A dynamic spectrum `|sum_p mu_p field[p]|²` thus puts `mu_i * conj(mu_j)` at `[i, j]`.

For a real, noiseless dynamic spectrum the result is Hermitian.
*/
pub fn theta_theta<T, S, D>(
    theta: &Angle,
    d_eff: &Length,
    mu_eff: &AngularRate,
    dynspec: &ArrayBase<S, D>,
    f: &Frequency,
    t: &Time,
) -> Result<Array2<Complex64>>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    check_1d("theta", theta)?;

    let dynwave = dynamic_field(
        theta,
        &Angle::scalar(0., RADIAN),
        &arr0(Complex64::new(1., 0.)).into_dyn(),
        d_eff,
        mu_eff,
        f,
        t,
    )?;
    if dynwave.ndim() != 3 {
        let point_shape = dynwave.shape()[..dynwave.ndim() - 2].to_vec();
        return Err(ScreenError::PointShape(point_shape));
    }
    let dynwave = dynwave.into_dimensionality::<Ix3>()?;
    let (n, nf, nt) = dynwave.dim();
    if nf * nt == 0 {
        return Err(ScreenError::EmptyGrid);
    }

    let dynspec = dynspec
        .broadcast((nf, nt))
        .ok_or_else(|| ScreenError::Broadcast {
            lhs: dynspec.shape().to_vec(),
            rhs: vec![nf, nt],
        })?
        .mapv(|x| x.to_complex());

    debug!(
        "theta-theta over {} angles, {} frequencies and {} times",
        n, nf, nt
    );

    let count = (nf * nt) as f64;
    let mut out = Array2::zeros((n, n));
    for (row, field_i) in dynwave.outer_iter().enumerate() {
        trace!("theta-theta row {}", row);
        for (col, field_j) in dynwave.outer_iter().enumerate() {
            // Get intensities by brute-force mapping.
            let pairs = Zip::from(&field_i)
                .and(&field_j)
                .map_collect(|w_i, w_j| w_j * w_i.conj());
            // Remove constant parts
            let mean = pairs.sum() / count;

            let power = Zip::from(&dynspec)
                .and(&pairs)
                .fold(Complex64::new(0., 0.), |acc, d, p| acc + d * (p - mean));
            out[[row, col]] = power / count;
        }
    }

    Ok(out)
}

/// Settings for [`clean_theta_theta`]. The default leaves the near-diagonal band alone
/// (`k = 1`) and clears the cross band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanOptions {
    pub k: usize,
    pub clean_cross: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            k: 1,
            clean_cross: true,
        }
    }
}

impl CleanOptions {
    pub fn clean<A: Clone + Zero>(&self, theta_theta: &Array2<A>) -> Result<Array2<A>> {
        clean_theta_theta(theta_theta, self.k, self.clean_cross)
    }

    pub fn clean_inplace<A: Clone + Zero>(&self, theta_theta: &mut Array2<A>) -> Result<()> {
        clean_theta_theta_inplace(theta_theta, self.k, self.clean_cross)
    }
}

/**
Returns a copy of a theta-theta matrix with two sets of entries set to zero.

If `k > 1`, everything closer than `k` to the main diagonal (`|col - row| < k`) is
cleared, so only the entries at least `k` steps away survive.

If `clean_cross` is set, the band just off the anti-diagonal is cleared as well: entries
`(N - 1 - i, i + 1)` for `i` in `0..N - 1`, where `N` is the number of rows. This needs at
least `N` columns.
*/
pub fn clean_theta_theta<A: Clone + Zero>(
    theta_theta: &Array2<A>,
    k: usize,
    clean_cross: bool,
) -> Result<Array2<A>> {
    let mut out = theta_theta.clone();
    clean_theta_theta_inplace(&mut out, k, clean_cross)?;
    Ok(out)
}

// As `clean_theta_theta`, but in place. On error the matrix is left untouched.
pub fn clean_theta_theta_inplace<A: Clone + Zero>(
    theta_theta: &mut Array2<A>,
    k: usize,
    clean_cross: bool,
) -> Result<()> {
    let (rows, cols) = theta_theta.dim();

    // first cross-band entry past the last column
    if clean_cross && rows > 1 && cols < rows {
        return Err(ScreenError::Index {
            row: rows - cols,
            col: cols,
            rows,
            cols,
        });
    }

    if k > 1 {
        for ((row, col), x) in theta_theta.indexed_iter_mut() {
            let offset = col as isize - row as isize;
            if offset.unsigned_abs() < k {
                *x = A::zero();
            }
        }
    }

    if clean_cross {
        for i in 0..rows.saturating_sub(1) {
            theta_theta[[rows - 1 - i, i + 1]] = A::zero();
        }
    }

    Ok(())
}
