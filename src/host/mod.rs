//! Host native engines that refused patterns are handed over to.
mod fancy;

pub use self::fancy::{FancyHost, FancyRegexp};
