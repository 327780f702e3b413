use hifitime::{Epoch, Unit};

use crate::constants::{Year, DAYS_PER_YEAR};
use crate::equinox_errors::EquinoxError;

/// Read an epoch year typed by the user.
///
/// Blank text (spaces only) means "not supplied" and yields `Ok(None)`. Otherwise the
/// longest leading number is read and anything after it is ignored, so `"1950.0 AD"`
/// reads as `1950`.
///
/// Arguments
/// ---------
/// * `text`: the raw year field, e.g. `"1875"` or `" 2024.37 "`
///
/// Return
/// ------
/// * `Ok(Some(year))` when the text starts with a number, `Ok(None)` for blank text,
///   `Err(raw)` with the trimmed text when it does not start with a number.
pub fn parse_epoch_year(text: &str) -> Result<Option<Year>, String> {
    let trimmed = text.trim_matches(' ');
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .char_indices()
        .map(|(idx, c)| idx + c.len_utf8())
        .rev()
        .find_map(|end| trimmed[..end].parse::<Year>().ok())
        .map(Some)
        .ok_or_else(|| trimmed.to_string())
}

/// Decimal Gregorian year of an epoch.
///
/// The fraction is the time elapsed since January 1st (UTC, midnight) divided by
/// [`DAYS_PER_YEAR`] days, so `2024-07-02T00:00:00 UTC` gives `2024.4983`.
pub fn decimal_year(epoch: Epoch) -> Year {
    let (year, ..) = epoch.to_gregorian_utc();
    let start_of_year = Epoch::from_gregorian_utc_at_midnight(year, 1, 1);
    let elapsed_days = (epoch - start_of_year).to_unit(Unit::Day);
    year as f64 + elapsed_days / DAYS_PER_YEAR
}

/// Decimal year of the system clock, truncated to two decimals.
pub fn current_decimal_year() -> Result<Year, EquinoxError> {
    let now = Epoch::now()?;
    Ok((decimal_year(now) * 100.0).floor() / 100.0)
}
