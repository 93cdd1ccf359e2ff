use std::sync::Arc;

use log::debug;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};
use num::complex::Complex64;
use rustfft::{Fft, FftPlanner};

use super::scalar::Scalar;

pub trait FFT2 {
    fn fft2(self) -> Array2<Complex64>;
    fn fft2_plottable(self) -> Array2<Complex64>;
}

// Transforms every lane along `axis` in place with a single plan.
fn fft_axis_planned(arr: &mut Array2<Complex64>, axis: Axis, plan: &Arc<dyn Fft<f64>>) {
    let mut buffer = Vec::with_capacity(arr.len_of(axis));
    for mut lane in arr.lanes_mut(axis) {
        buffer.clear();
        buffer.extend(lane.iter().copied());
        plan.process(&mut buffer);
        for (out, x) in lane.iter_mut().zip(buffer.iter()) {
            *out = *x;
        }
    }
}

impl FFT2 for Array2<Complex64> {
    fn fft2(mut self) -> Array2<Complex64> {
        let mut planner = FftPlanner::new();
        for k in 0..2 {
            let axis = Axis(k);
            let len = self.len_of(axis);
            if len == 0 {
                return self;
            }
            let plan = planner.plan_fft_forward(len);
            fft_axis_planned(&mut self, axis, &plan);
        }
        self
    }

    // The FFT is in reverse order from what you might expect when looking at the plain old fourier transform.
    // To get the correct order, we do a rotate, as described here: https://mathematica.stackexchange.com/a/33625
    fn fft2_plottable(self) -> Array2<Complex64> {
        fft_shift(self.fft2())
    }
}

/// Moves the zero-frequency bin of both axes to index `len / 2`, matching
/// `SampledDomain::fft_frequencies_plottable`.
pub fn fft_shift<A: Clone>(arr: Array2<A>) -> Array2<A> {
    let (rows, cols) = arr.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        arr[[(i + rows - rows / 2) % rows, (j + cols - cols / 2) % cols]].clone()
    })
}

/// The conjugate spectrum: the 2-D Fourier transform of a dynamic spectrum over
/// (frequency, time), shifted so that zero delay and zero Doppler sit in the middle.
pub fn conjugate_spectrum<T, S>(dynspec: &ArrayBase<S, Ix2>) -> Array2<Complex64>
where
    T: Scalar,
    S: Data<Elem = T>,
{
    debug!("conjugate spectrum of a {:?} dynamic spectrum", dynspec.dim());
    dynspec.mapv(|x| x.to_complex()).fft2_plottable()
}

/// Power in the conjugate spectrum, with delay along the first axis and Doppler along the second.
pub fn secondary_spectrum<T, S>(dynspec: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    T: Scalar,
    S: Data<Elem = T>,
{
    conjugate_spectrum(dynspec).mapv(|x| x.norm_sqr())
}
