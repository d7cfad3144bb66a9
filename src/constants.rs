//! # Constants and type definitions for Autopoint
//!
//! This module centralizes the **numeric precision**, **conversion factors**, and **common type
//! aliases** shared by the propagator, the TLE parser, and the calendar utilities.
//!
//! ## Overview
//!
//! - The [`Float`] alias selecting the precision of the propagation core
//! - Angle and time conversions (degrees ↔ radians, revolutions/day ↔ radians/minute)
//! - Unit type aliases used in public signatures
//!
//! The SGP4 core computes everything in [`Float`]. It is `f64` by default and becomes `f32`
//! with the `single-precision` cargo feature. Julian dates always stay in `f64`.

// -------------------------------------------------------------------------------------------------
// Precision
// -------------------------------------------------------------------------------------------------

/// Floating point type of the propagation core.
#[cfg(not(feature = "single-precision"))]
pub type Float = f64;

/// Floating point type of the propagation core.
#[cfg(feature = "single-precision")]
pub type Float = f32;

/// π in the core precision
pub const PI: Float = std::f64::consts::PI as Float;

/// 2π, useful for trigonometric conversions
pub const DPI: Float = 2. * PI;

/// 2π in double precision, for calendar and sidereal time arithmetic
pub const DPI_F64: f64 = 2. * std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: Float = PI / 180.0;

/// Minutes in a day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Revolutions per day → radians per minute divisor (1440 / 2π)
pub const XPDOTP: Float = 1440.0 / DPI;

/// Julian date of the SGP4 epoch origin, 1949 December 31 00:00 UT
pub const JD_1950: f64 = 2_433_281.5;

/// Julian date of J2000.0
pub const JD_2000: f64 = 2_451_545.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = Float;
/// Distance in kilometers
pub type Kilometer = Float;
/// Elapsed time in minutes
pub type Minutes = Float;
/// Julian date (days)
pub type JulianDate = f64;
