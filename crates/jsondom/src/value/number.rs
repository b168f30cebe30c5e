use core::fmt;
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use crate::error::{Error, Result};

/// A finite IEEE-754 double.
///
/// NaN and the infinities are rejected on construction, which makes `Eq`, `Ord` and `Hash`
/// well-defined. `-0.0` and `0.0` are equal and hash identically.
#[derive(Debug, Copy, Clone)]
pub struct Double(f64);

impl Double {
    /// Wrap a finite double.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteNumber`] for NaN and the infinities.
    pub fn new(value: f64) -> Result<Double> {
        if value.is_finite() {
            Ok(Double(value))
        } else {
            Err(Error::NonFiniteNumber(value))
        }
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Double {}

impl PartialOrd for Double {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Double {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both sides are finite.
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl Hash for Double {
    fn hash<H: Hasher>(&self, h: &mut H) {
        if self.0 == 0.0f64 {
            0.0f64.to_bits().hash(h);
        } else {
            self.0.to_bits().hash(h);
        }
    }
}

impl TryFrom<f64> for Double {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Double::new(value)
    }
}

impl From<Double> for f64 {
    fn from(value: Double) -> Self {
        value.0
    }
}
