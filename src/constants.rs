//! # Constants and type definitions for Equinox
//!
//! This module centralizes the **conversion factors**, **angular range limits** and
//! **common type aliases** used throughout the `equinox` library.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians, hours ↔ radians)
//! - Validation bounds for parsed angles (expressed in arcseconds)
//! - Epoch bounds accepted by the precession model
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Arcseconds in one degree
pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Arcseconds in one hour of right ascension (15°)
pub const ARCSEC_PER_HOUR: f64 = 15.0 * ARCSEC_PER_DEGREE;

// -------------------------------------------------------------------------------------------------
// Validation bounds
// -------------------------------------------------------------------------------------------------

/// Full circle in arcseconds (360°). Longitude-like inputs must be strictly below it.
pub const ARCSEC_FULL_CIRCLE: ArcSec = 1_296_000.0;

/// Quarter circle in arcseconds (90°). Latitude-like inputs must lie in `[-90°, +90°]`.
pub const ARCSEC_QUARTER_CIRCLE: ArcSec = 324_000.0;

/// Earliest epoch year accepted by the precession model
pub const MIN_EPOCH_YEAR: Year = 1.0;

/// Default ceiling for epoch years, a practical "not yet reached" bound
pub const DEFAULT_MAX_EPOCH_YEAR: Year = 2100.0;

/// Equinox year of the J2000 frame, the canonical frame of every conversion
pub const J2000_YEAR: Year = 2000.0;

/// Mean length of a year in days, used for decimal-year arithmetic
pub const DAYS_PER_YEAR: f64 = 365.25;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Decimal year (e.g. `1950.0`, `2024.37`)
pub type Year = f64;

/// A row-major, flattened 3×3 direction-cosine table.
pub type FlatMatrix = [f64; 9];
