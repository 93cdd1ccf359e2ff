use std::{f64::consts::PI, fmt::Debug, marker::PhantomData};

use ndarray::{arr0, Array, ArrayD, Dimension};

use crate::array_ext::{broadcast_shape, broadcast_view, Expand2};
use crate::error::Result;

const c: f64 = 299_792_458.0;

pub const SPEED_OF_LIGHT: f64 = c;

const ARCSEC_IN_RAD: f64 = PI / (180. * 3600.);
const PARSEC_IN_M: f64 = 3.085_677_581_491_367_3e16;
const YEAR_IN_S: f64 = 365.25 * 86400.;

// Physical dimensions. These are never constructed, only used to tag quantities.
pub trait PhysicalDimension: Debug {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleDim {}
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthDim {}
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeDim {}
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyDim {}
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngularRateDim {}
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VelocityDim {}

impl PhysicalDimension for AngleDim {}
impl PhysicalDimension for LengthDim {}
impl PhysicalDimension for TimeDim {}
impl PhysicalDimension for FrequencyDim {}
impl PhysicalDimension for AngularRateDim {}
impl PhysicalDimension for VelocityDim {}

// A unit is a scale factor to the SI unit of its dimension.
#[derive(Debug)]
pub struct Unit<D> {
    pub scale: f64,
    pub symbol: &'static str,
    dim: PhantomData<D>,
}

// Manual impls, derive would require D: Clone.
impl<D> Clone for Unit<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Unit<D> {}

impl<D> Unit<D> {
    pub const fn new(scale: f64, symbol: &'static str) -> Unit<D> {
        Unit {
            scale,
            symbol,
            dim: PhantomData,
        }
    }
}

pub const RADIAN: Unit<AngleDim> = Unit::new(1., "rad");
pub const DEGREE: Unit<AngleDim> = Unit::new(PI / 180., "deg");
pub const ARCSECOND: Unit<AngleDim> = Unit::new(ARCSEC_IN_RAD, "arcsec");
pub const MILLIARCSECOND: Unit<AngleDim> = Unit::new(ARCSEC_IN_RAD * 1e-3, "mas");

pub const METER: Unit<LengthDim> = Unit::new(1., "m");
pub const KILOMETER: Unit<LengthDim> = Unit::new(1e3, "km");
pub const AU: Unit<LengthDim> = Unit::new(1.495_978_707e11, "AU");
pub const PARSEC: Unit<LengthDim> = Unit::new(PARSEC_IN_M, "pc");
pub const KILOPARSEC: Unit<LengthDim> = Unit::new(PARSEC_IN_M * 1e3, "kpc");

pub const SECOND: Unit<TimeDim> = Unit::new(1., "s");
pub const MINUTE: Unit<TimeDim> = Unit::new(60., "min");
pub const HOUR: Unit<TimeDim> = Unit::new(3600., "h");
pub const DAY: Unit<TimeDim> = Unit::new(86400., "d");
// Julian year
pub const YEAR: Unit<TimeDim> = Unit::new(YEAR_IN_S, "yr");

pub const HERTZ: Unit<FrequencyDim> = Unit::new(1., "Hz");
pub const KILOHERTZ: Unit<FrequencyDim> = Unit::new(1e3, "kHz");
pub const MEGAHERTZ: Unit<FrequencyDim> = Unit::new(1e6, "MHz");
pub const GIGAHERTZ: Unit<FrequencyDim> = Unit::new(1e9, "GHz");

pub const RADIAN_PER_SECOND: Unit<AngularRateDim> = Unit::new(1., "rad / s");
pub const MILLIARCSECOND_PER_YEAR: Unit<AngularRateDim> =
    Unit::new(ARCSEC_IN_RAD * 1e-3 / YEAR_IN_S, "mas / yr");

pub const METER_PER_SECOND: Unit<VelocityDim> = Unit::new(1., "m / s");
pub const KILOMETER_PER_SECOND: Unit<VelocityDim> = Unit::new(1e3, "km / s");

/// An array of values carrying a physical dimension. Values are stored in SI units
/// (radian, metre, second, hertz, radian per second, metre per second).
///
/// Mixing dimensions is a type error: a `Quantity<LengthDim>` can never be used
/// where an angle is expected.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity<D> {
    si: ArrayD<f64>,
    dim: PhantomData<D>,
}

pub type Angle = Quantity<AngleDim>;
pub type Length = Quantity<LengthDim>;
pub type Time = Quantity<TimeDim>;
pub type Frequency = Quantity<FrequencyDim>;
pub type AngularRate = Quantity<AngularRateDim>;
pub type Velocity = Quantity<VelocityDim>;

impl<D: PhysicalDimension> Quantity<D> {
    pub fn new<Dm: Dimension>(values: Array<f64, Dm>, unit: Unit<D>) -> Quantity<D> {
        Quantity::from_si(values.into_dyn() * unit.scale)
    }

    pub fn scalar(value: f64, unit: Unit<D>) -> Quantity<D> {
        Quantity::new(arr0(value), unit)
    }

    pub fn from_si(si: ArrayD<f64>) -> Quantity<D> {
        Quantity {
            si,
            dim: PhantomData,
        }
    }

    // Values in SI units.
    pub fn si(&self) -> &ArrayD<f64> {
        &self.si
    }

    pub fn into_si(self) -> ArrayD<f64> {
        self.si
    }

    pub fn to(&self, unit: Unit<D>) -> ArrayD<f64> {
        self.si.mapv(|x| x / unit.scale)
    }

    pub fn shape(&self) -> &[usize] {
        self.si.shape()
    }

    pub fn ndim(&self) -> usize {
        self.si.ndim()
    }

    pub fn len(&self) -> usize {
        self.si.len()
    }

    pub fn is_empty(&self) -> bool {
        self.si.is_empty()
    }

    pub fn expand2(&self) -> Quantity<D> {
        Quantity::from_si(self.si.expand2())
    }
}

impl AngularRate {
    /// Effective proper motion `v_eff / d_eff`, taking the ratio of a velocity and a
    /// distance to be an angle per unit time.
    pub fn from_velocity(v_eff: &Velocity, d_eff: &Length) -> Result<AngularRate> {
        let shape = broadcast_shape(&[v_eff.shape(), d_eff.shape()])?;
        let v = broadcast_view(v_eff.si(), &shape)?;
        let d = broadcast_view(d_eff.si(), &shape)?;
        Ok(Quantity::from_si(&v / &d))
    }
}

// A phase in cycles as a dimensionless number, using that one cycle is 2π radians.
pub fn cycles_to_radians(cycles: f64) -> f64 {
    2. * PI * cycles
}
