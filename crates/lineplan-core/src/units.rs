//! Scalar semantic types for the line planning domain.
//!
//! Raw `u32`/`f64`/`String` values are easy to mix up: a line number is not a
//! trip number, a frequency is not a capacity, and a station name is not a
//! district name. Every scalar that crosses an API boundary is therefore a
//! newtype. All wrappers are `#[serde(transparent)]`, so serialized scenarios
//! read like plain numbers and strings.

use serde::{Deserialize, Serialize};
use std::ops::Div;

/// Integer-backed identifiers and counts.
macro_rules! impl_int_newtype {
    ($type:ident, $inner:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $type($inner);

        impl $type {
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_int_newtype!(LineNr, u32);
impl_int_newtype!(TripNr, u32);
impl_int_newtype!(CirculationId, u64);
// Capacity is passengers per vehicle; LineFrequency is dispatches per
// period; Chf is a monetary amount in Swiss francs.
impl_int_newtype!(Capacity, u32);
impl_int_newtype!(LineFrequency, u32);
impl_int_newtype!(Chf, i64);

/// Float-backed physical quantities.
macro_rules! impl_float_newtype {
    ($type:ident, $unit_name:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $type(f64);

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $unit_name)
            }
        }
    };
}

impl_float_newtype!(Meter, "m");
impl_float_newtype!(MeterPerSecond, "m/s");

impl Div<MeterPerSecond> for Meter {
    type Output = f64;

    /// Distance over speed, in seconds.
    fn div(self, rhs: MeterPerSecond) -> f64 {
        self.0 / rhs.0
    }
}

/// String-backed names.
macro_rules! impl_name_newtype {
    ($type:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $type(String);

        impl $type {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $type {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $type {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

impl_name_newtype!(StationName);
impl_name_newtype!(LineName);
impl_name_newtype!(DirectionName);
impl_name_newtype!(DistrictName);
