// Do this because numerics calls for a lot of non-standard names
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
pub mod array_ext;
pub mod error;
pub mod field;
pub mod screen;
pub mod signal;
pub mod theta_theta;
pub mod units;

pub use error::{Result, ScreenError};
