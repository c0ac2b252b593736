//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in material take-off.
//! They are plain f64 newtypes, so JSON stays clean (just numbers) and the
//! engine keeps full precision.
//!
//! ## Units
//!
//! - Length: meters (m), centimeters (cm) - tile dimensions are entered in cm
//! - Area: square meters (m²)
//! - Mass: kilograms (kg), metric tons (t = 1000 kg)
//! - Steel ratio: kilograms per square meter of floor (kg/m²)
//!
//! ## Example
//!
//! ```rust
//! use boq_core::units::{Centimeters, Meters, SqM, KgPerSqM, Kg, Tonnes};
//!
//! let side: Meters = Centimeters(60.0).into();
//! let tile: SqM = side * side;
//! assert!((tile.0 - 0.36).abs() < 1e-12);
//!
//! let steel: Kg = SqM(100.0) * KgPerSqM(120.0);
//! let tons: Tonnes = steel.into();
//! assert_eq!(tons.0, 12.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl Mul<Meters> for Meters {
    type Output = SqM;
    fn mul(self, rhs: Meters) -> SqM {
        SqM(self.0 * rhs.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kg(pub f64);

/// Mass in metric tons (1 t = 1000 kg)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl From<Kg> for Tonnes {
    fn from(kg: Kg) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

// ============================================================================
// Ratios
// ============================================================================

/// Steel reinforcement ratio in kilograms per square meter of floor
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerSqM(pub f64);

impl Mul<KgPerSqM> for SqM {
    type Output = Kg;
    fn mul(self, rhs: KgPerSqM) -> Kg {
        Kg(self.0 * rhs.0)
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

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self(0.0), |acc, v| acc + v)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(SqM);
impl_arithmetic!(Kg);
impl_arithmetic!(Tonnes);
impl_arithmetic!(KgPerSqM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_m() {
        let m: Meters = Centimeters(60.0).into();
        assert_eq!(m.0, 0.6);
    }

    #[test]
    fn test_kg_to_tonnes() {
        let t: Tonnes = Kg(20_000.0).into();
        assert_eq!(t.0, 20.0);
    }

    #[test]
    fn test_area_times_ratio() {
        let kg = SqM(80.0) * KgPerSqM(100.0);
        assert_eq!(kg, Kg(8000.0));
    }

    #[test]
    fn test_sum() {
        let total: SqM = [SqM(100.0), SqM(80.0)].into_iter().sum();
        assert_eq!(total.value(), 180.0);

        // Empty sums stay at +0.0
        let empty: SqM = std::iter::empty().sum();
        assert!(empty.value().is_sign_positive());
    }

    #[test]
    fn test_serialization() {
        let area = SqM(36.5);
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, "36.5");

        let roundtrip: SqM = serde_json::from_str(&json).unwrap();
        assert_eq!(area, roundtrip);
    }
}
