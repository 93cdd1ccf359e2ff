// Sampled grids, spectrum element types and Fourier transforms of dynamic spectra.
pub mod domain;
pub mod fft;
pub mod scalar;
