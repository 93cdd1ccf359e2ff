use ndarray::Array1;

use crate::{
    error::{Result, ScreenError},
    units::{PhysicalDimension, Quantity, Unit},
};

// An evenly sampled frequency or time axis. The end point is exclusive so that
// `start + interval * samples == end`, which keeps the FFT conjugate axis exact.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledDomain {
    start: f64,
    interval: f64,
    samples: usize,
}

impl SampledDomain {
    pub fn from_sample_interval(start: f64, interval: f64, num: usize) -> SampledDomain {
        SampledDomain {
            start,
            interval,
            samples: num,
        }
    }

    pub fn from_sample_count(start: f64, end: f64, num: usize) -> Result<SampledDomain> {
        if !(start <= end) {
            return Err(ScreenError::ReversedDomain { start, end });
        }
        let interval = if num == 0 {
            0.
        } else {
            (end - start) / num as f64
        };
        Ok(SampledDomain {
            start,
            interval,
            samples: num,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.start + self.range()
    }

    pub fn freq(&self) -> f64 {
        1. / self.interval
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn sample_interval(&self) -> f64 {
        self.interval
    }

    pub fn range(&self) -> f64 {
        self.interval * self.samples as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let (start, interval) = (self.start, self.interval);
        (0..self.samples).map(move |k| start + k as f64 * interval)
    }

    /// The sample values expressed in `unit`, e.g. a grid in MHz turned into frequencies.
    pub fn to_quantity<D: PhysicalDimension>(&self, unit: Unit<D>) -> Quantity<D> {
        Quantity::new(Array1::from(self), unit)
    }

    // Conjugate axis of an FFT over this domain, in the order the FFT returns it.
    pub fn fft_frequencies(&self) -> SampledDomain {
        Self::from_sample_interval(0., 1. / self.range(), self.samples)
    }

    // The FFT puts negative frequencies in the upper half. This is the conjugate axis after
    // rotating them to the front, centred on zero, matching `fft::fft_shift`.
    pub fn fft_frequencies_plottable(&self) -> SampledDomain {
        let df = 1. / self.range();
        Self::from_sample_interval(-((self.samples / 2) as f64) * df, df, self.samples)
    }
}

impl From<&SampledDomain> for Array1<f64> {
    fn from(domain: &SampledDomain) -> Self {
        domain.iter().collect()
    }
}

impl From<SampledDomain> for Array1<f64> {
    fn from(domain: SampledDomain) -> Self {
        Array1::from(&domain)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    use crate::{
        error::ScreenError,
        units::{HERTZ, MEGAHERTZ},
    };

    use super::SampledDomain;

    #[test]
    fn fft_frequencies_involution() {
        let domain = SampledDomain::from_sample_count(0., 20., 20).unwrap();
        let domain2 = domain.fft_frequencies().fft_frequencies();

        assert_relative_eq!(domain.start(), domain2.start());
        assert_relative_eq!(domain.end(), domain2.end());
        assert_relative_eq!(domain.freq(), domain2.freq());
    }

    #[test]
    fn sample_count_needs_ordered_bounds() {
        assert!(matches!(
            SampledDomain::from_sample_count(20., 0., 20),
            Err(ScreenError::ReversedDomain { .. })
        ));
        assert!(SampledDomain::from_sample_count(f64::NAN, 1., 4).is_err());

        let point = SampledDomain::from_sample_count(5., 5., 3).unwrap();
        assert_eq!(point.sample_count(), 3);
        assert_relative_eq!(point.sample_interval(), 0.);
    }

    #[test]
    fn plottable_axis_matches_fftshift() {
        // numpy.fft.fftshift(numpy.fft.fftfreq(5, 0.5))
        let odd = Array1::from(SampledDomain::from_sample_interval(0., 0.5, 5).fft_frequencies_plottable());
        assert_relative_eq!(odd, array![-0.8, -0.4, 0., 0.4, 0.8], epsilon = 1e-12);

        // numpy.fft.fftshift(numpy.fft.fftfreq(4, 0.25))
        let even = Array1::from(SampledDomain::from_sample_interval(0., 0.25, 4).fft_frequencies_plottable());
        assert_relative_eq!(even, array![-2., -1., 0., 1.], epsilon = 1e-12);
    }

    #[test]
    fn quantity_in_si() {
        let f = SampledDomain::from_sample_interval(300., 0.5, 3).to_quantity(MEGAHERTZ);

        assert_eq!(f.shape(), &[3]);
        assert_relative_eq!(
            f.to(HERTZ).into_dimensionality::<ndarray::Ix1>().unwrap(),
            array![300e6, 300.5e6, 301e6]
        );
    }
}
