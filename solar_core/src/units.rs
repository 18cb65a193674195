//! # Unit Types
//!
//! Type-safe wrappers for the electrical quantities the sizer juggles.
//! They are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Example
//!
//! ```rust
//! use solar_core::units::{Amperes, Kilowatts, Volts, Watts};
//!
//! let inverter = Kilowatts(5.0);
//! let watts: Watts = inverter.into();
//! assert_eq!(watts.0, 5000.0);
//!
//! let current: Amperes = watts / Volts(220.0);
//! assert!((current.0 - 22.727).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts (1 kW = 1000 W)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

// ============================================================================
// Electrical Units
// ============================================================================

/// Voltage in volts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volts(pub f64);

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amperes(pub f64);

/// I = P / V
impl Div<Volts> for Watts {
    type Output = Amperes;
    fn div(self, rhs: Volts) -> Amperes {
        Amperes(self.0 / rhs.0)
    }
}

// ============================================================================
// Energy Units
// ============================================================================

/// Energy in kilowatt-hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilowattHours(pub f64);

impl Kilowatts {
    /// Energy delivered running at this power for `hours`
    pub fn over_hours(self, hours: f64) -> KilowattHours {
        KilowattHours(self.0 * hours)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(Volts);
impl_arithmetic!(Amperes);
impl_arithmetic!(KilowattHours);
