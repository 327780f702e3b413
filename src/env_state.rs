//! # Equinox environment
//!
//! [`EquinoxEnv`] gathers the few knobs a conversion depends on besides its input:
//!
//! - the **accepted epoch range** for user and current equinox years,
//! - an optional **fixed "current" year**, used when a request asks for a current-equinox
//!   output without supplying the year itself.
//!
//! The environment is plain data: cheap to clone, (de)serializable with `serde` so a
//! front-end can load it from a JSON file, and never touched by the conversion pipeline
//! except for reads.
//!
//! ## Usage
//!
//! ```rust
//! use equinox::env_state::EquinoxEnv;
//!
//! let env = EquinoxEnv::default().with_max_epoch_year(2200.0);
//! assert!(env.epoch_range().contains(&2150.0));
//! ```
//!
//! ## Notes
//!
//! - When no fixed current year is configured, [`EquinoxEnv::current_year`] reads the
//!   system clock through `hifitime`. Only front-ends call it; the converter itself
//!   never does.
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::constants::{Year, DEFAULT_MAX_EPOCH_YEAR, MIN_EPOCH_YEAR};
use crate::equinox_errors::EquinoxError;
use crate::time::current_decimal_year;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquinoxEnv {
    /// Latest epoch year accepted for user and current equinoxes
    pub max_epoch_year: Year,

    /// Year used as "current" when a request leaves it blank; `None` reads the clock
    pub current_year: Option<Year>,
}

impl Default for EquinoxEnv {
    fn default() -> Self {
        EquinoxEnv {
            max_epoch_year: DEFAULT_MAX_EPOCH_YEAR,
            current_year: None,
        }
    }
}

impl EquinoxEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_epoch_year(mut self, max_epoch_year: Year) -> Self {
        self.max_epoch_year = max_epoch_year;
        self
    }

    pub fn with_current_year(mut self, year: Year) -> Self {
        self.current_year = Some(year);
        self
    }

    /// Inclusive range of epoch years accepted by the converter.
    pub fn epoch_range(&self) -> RangeInclusive<Year> {
        MIN_EPOCH_YEAR..=self.max_epoch_year
    }

    /// The configured current year, or the decimal year of the system clock.
    ///
    /// Return
    /// ------
    /// * the year, or [`EquinoxError::ClockUnavailable`] if the clock cannot be read.
    pub fn current_year(&self) -> Result<Year, EquinoxError> {
        match self.current_year {
            Some(year) => Ok(year),
            None => current_decimal_year(),
        }
    }
}
