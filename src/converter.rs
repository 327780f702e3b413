//! # Converter: one position in, every frame out
//!
//! [`Converter`] is the façade of the crate. It takes a [`ConversionRequest`] holding the
//! raw text typed by a user (one position in one of six input frames, plus optional epoch
//! years), validates it, and returns the same direction expressed in every supported frame,
//! both as numbers ([`Positions`]) and as display rows ([`FormattedRows`]).
//!
//! ## Pipeline
//!
//! ```text
//! request ──▶ exactly one input?      ──▶ epoch years valid?      ──▶ parse + range check
//!                                                                           │
//!   rows ◀── format ◀── J2000 → {B1950, user, current, Galactic, old Gal.} ◀── to J2000
//! ```
//!
//! 1. Exactly one of the six inputs must be non-blank.
//! 2. Supplied user / current years must lie in [`EquinoxEnv::epoch_range`]; an input in
//!    the user or current equinox requires the matching year.
//! 3. The longitude-like field is parsed as right ascension (equatorial inputs) or as a
//!    signed degree angle (Galactic inputs); the latitude-like field as a declination.
//!    Longitude must lie in `[0, 360°)` and latitude in `[-90°, +90°]`.
//! 4. The position is carried to J2000, then from J2000 to every output frame. User and
//!    current equinox outputs are produced only when their year is supplied.
//!
//! The converter never reads the clock. Front-ends that want a default current year ask
//! [`EquinoxEnv::current_year`] and put it in the request.
//!
//! ## Example
//!
//! ```rust
//! use equinox::{ConversionRequest, Converter, InputKind};
//! use equinox::env_state::EquinoxEnv;
//!
//! let converter = Converter::new(EquinoxEnv::default());
//! let request = ConversionRequest::new().with_input(InputKind::J2000, "0h 0m 0s", "0 0 0");
//! let result = converter.convert(&request).unwrap();
//!
//! assert_eq!(result.rows.b1950.ra_hms, "0h 2m 33.8s");
//! ```
use tracing::{debug, trace};

use crate::constants::{ArcSec, Year, ARCSEC_FULL_CIRCLE, ARCSEC_QUARTER_CIRCLE};
use crate::conversion::{parse_declination, parse_right_ascension};
use crate::display::{FormattedRows, ResultDisplay};
use crate::env_state::EquinoxEnv;
use crate::equinox_errors::EquinoxError;
use crate::ref_system::{approx_new_to_old_galactic, from_j2000, to_j2000, RefSystem, SphericalPair};
use crate::time::parse_epoch_year;

/// The six frames a position can be typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    J2000,
    B1950,
    Galactic,
    OldGalactic,
    UserEquinox,
    CurrentEquinox,
}

impl InputKind {
    pub const ALL: [InputKind; 6] = [
        InputKind::J2000,
        InputKind::B1950,
        InputKind::Galactic,
        InputKind::OldGalactic,
        InputKind::UserEquinox,
        InputKind::CurrentEquinox,
    ];

    fn index(self) -> usize {
        match self {
            InputKind::J2000 => 0,
            InputKind::B1950 => 1,
            InputKind::Galactic => 2,
            InputKind::OldGalactic => 3,
            InputKind::UserEquinox => 4,
            InputKind::CurrentEquinox => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputKind::J2000 => "J2000",
            InputKind::B1950 => "B1950",
            InputKind::Galactic => "New Galactic",
            InputKind::OldGalactic => "Old Galactic",
            InputKind::UserEquinox => "User Year",
            InputKind::CurrentEquinox => "Current Year",
        }
    }

    pub fn is_galactic(self) -> bool {
        matches!(self, InputKind::Galactic | InputKind::OldGalactic)
    }

    /// Name of the longitude-like field, as used in error messages: `"B1950 RA"`.
    pub fn longitude_label(self) -> String {
        if self.is_galactic() {
            format!("{} Longitude", self.label())
        } else {
            format!("{} RA", self.label())
        }
    }

    /// Name of the latitude-like field, as used in error messages: `"B1950 Dec"`.
    pub fn latitude_label(self) -> String {
        if self.is_galactic() {
            format!("{} Latitude", self.label())
        } else {
            format!("{} Dec", self.label())
        }
    }
}

/// Which of the two request-time equinoxes a year belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpochSlot {
    User,
    Current,
}

impl EpochSlot {
    pub fn out_of_range_message(self) -> &'static str {
        match self {
            EpochSlot::User => "User-supplied year out of range",
            EpochSlot::Current => "'Current' year out of range",
        }
    }

    pub fn missing_message(self) -> &'static str {
        match self {
            EpochSlot::User => "For user-supplied equinox, must supply the year",
            EpochSlot::Current => "Need 'current year' value",
        }
    }
}

/// Raw text of one position, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPair {
    pub lon: String,
    pub lat: String,
}

impl RawPair {
    /// A position is blank when its longitude-like field holds nothing but spaces;
    /// the latitude-like field alone does not make a row count.
    fn is_blank(&self) -> bool {
        is_blank(&self.lon)
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ')
}

/// User input for one conversion: up to six raw positions and two raw years.
///
/// Only one position may be non-blank when the request is converted. Setting the same
/// input kind twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionRequest {
    inputs: [Option<RawPair>; 6],
    user_year: Option<String>,
    current_year: Option<String>,
}

impl ConversionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(
        mut self,
        kind: InputKind,
        lon: impl Into<String>,
        lat: impl Into<String>,
    ) -> Self {
        self.inputs[kind.index()] = Some(RawPair {
            lon: lon.into(),
            lat: lat.into(),
        });
        self
    }

    pub fn with_user_year(mut self, year: impl Into<String>) -> Self {
        self.user_year = Some(year.into());
        self
    }

    pub fn with_current_year(mut self, year: impl Into<String>) -> Self {
        self.current_year = Some(year.into());
        self
    }

    pub fn input(&self, kind: InputKind) -> Option<&RawPair> {
        self.inputs[kind.index()].as_ref()
    }

    /// Every non-blank input, in [`InputKind::ALL`] order.
    fn populated(&self) -> Vec<(InputKind, &RawPair)> {
        InputKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.input(kind)
                    .filter(|raw| !raw.is_blank())
                    .map(|raw| (kind, raw))
            })
            .collect()
    }
}

/// A position at an equinox chosen at request time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochPosition {
    pub year: Year,
    pub pair: SphericalPair,
}

/// One direction in every output frame, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Positions {
    pub j2000: SphericalPair,
    pub b1950: SphericalPair,
    pub user_equinox: Option<EpochPosition>,
    pub current_equinox: Option<EpochPosition>,
    pub galactic: SphericalPair,
    pub old_galactic_approx: SphericalPair,
    pub old_galactic_exact: SphericalPair,
}

impl Positions {
    /// Fan a J2000 direction out to every output frame.
    ///
    /// Arguments
    /// ---------
    /// * `j2000`: the direction in J2000
    /// * `user_year`, `current_year`: epochs of the optional equinox outputs
    pub fn from_j2000(
        j2000: SphericalPair,
        user_year: Option<Year>,
        current_year: Option<Year>,
    ) -> Self {
        let at_epoch = |year: Year| EpochPosition {
            year,
            pair: from_j2000(&j2000, RefSystem::Equinox(year)),
        };
        let galactic = from_j2000(&j2000, RefSystem::Galactic);

        Positions {
            j2000,
            b1950: from_j2000(&j2000, RefSystem::B1950),
            user_equinox: user_year.map(at_epoch),
            current_equinox: current_year.map(at_epoch),
            galactic,
            old_galactic_approx: approx_new_to_old_galactic(&galactic),
            old_galactic_exact: from_j2000(&j2000, RefSystem::OldGalactic),
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// Frame the position was typed in
    pub input: InputKind,
    pub positions: Positions,
    pub rows: FormattedRows,
}

impl ConversionResult {
    /// Fixed-width, one-line-per-frame display adaptor.
    pub fn show(&self) -> ResultDisplay<'_> {
        ResultDisplay::new(self)
    }

    /// Grid display adaptor.
    pub fn table(&self) -> ResultDisplay<'_> {
        ResultDisplay::new(self).table()
    }
}

/// Stateless conversion engine configured by an [`EquinoxEnv`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    env: EquinoxEnv,
}

impl Converter {
    pub fn new(env: EquinoxEnv) -> Self {
        Converter { env }
    }

    pub fn env(&self) -> &EquinoxEnv {
        &self.env
    }

    /// Validate a request and convert its position to every frame.
    ///
    /// Arguments
    /// ---------
    /// * `request`: raw user input
    ///
    /// Return
    /// ------
    /// * every output position and its display rows, or the first validation failure.
    ///   Checks run in this order: input count, user year, missing user year, current
    ///   year, missing current year, longitude range, latitude range.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, EquinoxError> {
        self.try_convert(request)
            .inspect_err(|err| debug!(%err, "request rejected"))
    }

    fn try_convert(&self, request: &ConversionRequest) -> Result<ConversionResult, EquinoxError> {
        let populated = request.populated();
        let (kind, raw) = match populated.as_slice() {
            [single] => *single,
            _ => {
                return Err(EquinoxError::InputCardinality {
                    found: populated.len(),
                })
            }
        };
        debug!(input = kind.label(), lon = %raw.lon, lat = %raw.lat, "converting position");

        let user_year = self.epoch_year(request.user_year.as_deref(), EpochSlot::User)?;
        if kind == InputKind::UserEquinox && user_year.is_none() {
            return Err(EquinoxError::MissingEpoch {
                slot: EpochSlot::User,
            });
        }
        let current_year = self.epoch_year(request.current_year.as_deref(), EpochSlot::Current)?;
        if kind == InputKind::CurrentEquinox && current_year.is_none() {
            return Err(EquinoxError::MissingEpoch {
                slot: EpochSlot::Current,
            });
        }

        let source = match kind {
            InputKind::J2000 => RefSystem::J2000,
            InputKind::B1950 => RefSystem::B1950,
            InputKind::Galactic => RefSystem::Galactic,
            InputKind::OldGalactic => RefSystem::OldGalactic,
            InputKind::UserEquinox => RefSystem::Equinox(user_year.ok_or(
                EquinoxError::MissingEpoch {
                    slot: EpochSlot::User,
                },
            )?),
            InputKind::CurrentEquinox => RefSystem::Equinox(current_year.ok_or(
                EquinoxError::MissingEpoch {
                    slot: EpochSlot::Current,
                },
            )?),
        };

        let input = parse_position(kind, raw)?;
        let j2000 = to_j2000(&input, source);
        trace!(?source, ?input, ?j2000, "carried to J2000");

        let positions = Positions::from_j2000(j2000, user_year, current_year);
        let rows = FormattedRows::from(&positions);
        debug!(b1950 = %rows.b1950, galactic = %rows.galactic, "conversion done");

        Ok(ConversionResult {
            input: kind,
            positions,
            rows,
        })
    }

    /// Parse and range-check an optional epoch year. Blank text means "not supplied".
    fn epoch_year(&self, text: Option<&str>, slot: EpochSlot) -> Result<Option<Year>, EquinoxError> {
        let out_of_range = |value: String| EquinoxError::EpochOutOfRange { slot, value };

        let year = match text.map(parse_epoch_year).transpose() {
            Ok(year) => year.flatten(),
            Err(raw) => return Err(out_of_range(raw)),
        };

        match year {
            Some(year) if !self.env.epoch_range().contains(&year) => {
                Err(out_of_range(year.to_string()))
            }
            _ => Ok(year),
        }
    }
}

/// Parse a raw position and check both angles against their ranges.
fn parse_position(kind: InputKind, raw: &RawPair) -> Result<SphericalPair, EquinoxError> {
    let lon: ArcSec = if kind.is_galactic() {
        parse_declination(&raw.lon)
    } else {
        parse_right_ascension(&raw.lon)
    };
    let lat: ArcSec = parse_declination(&raw.lat);

    if !(0.0..ARCSEC_FULL_CIRCLE).contains(&lon) {
        return Err(EquinoxError::LongitudeOutOfRange { kind, value: lon });
    }
    if !(-ARCSEC_QUARTER_CIRCLE..=ARCSEC_QUARTER_CIRCLE).contains(&lat) {
        return Err(EquinoxError::LatitudeOutOfRange { kind, value: lat });
    }
    Ok(SphericalPair::from_arcsec(lon, lat))
}

#[cfg(test)]
mod converter_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    use crate::constants::RADEG;

    fn converter() -> Converter {
        Converter::new(EquinoxEnv::default())
    }

    #[test]
    fn test_input_labels() {
        assert_eq!(InputKind::J2000.longitude_label(), "J2000 RA");
        assert_eq!(InputKind::UserEquinox.latitude_label(), "User Year Dec");
        assert_eq!(InputKind::Galactic.longitude_label(), "New Galactic Longitude");
        assert_eq!(InputKind::OldGalactic.latitude_label(), "Old Galactic Latitude");
    }

    #[test]
    fn test_blank_inputs_are_ignored() {
        let request = ConversionRequest::new()
            .with_input(InputKind::B1950, "   ", "")
            .with_input(InputKind::J2000, "12 30 0", "-10 20 30");
        assert_eq!(request.populated().len(), 1);

        let result = converter().convert(&request).unwrap();
        assert_eq!(result.input, InputKind::J2000);
    }

    #[test]
    fn test_only_longitude_field_counts() {
        let lat_only = ConversionRequest::new().with_input(InputKind::J2000, "", "10");
        assert_eq!(
            converter().convert(&lat_only),
            Err(EquinoxError::InputCardinality { found: 0 })
        );

        // a stray latitude in another row is ignored
        let request = ConversionRequest::new()
            .with_input(InputKind::J2000, "1", "")
            .with_input(InputKind::B1950, "", "5");
        let result = converter().convert(&request).unwrap();
        assert_eq!(result.input, InputKind::J2000);
        assert_eq!(result.rows.j2000.ra_hms, "1h 0m 0.0s");
    }

    #[test]
    fn test_missing_user_year_reported_before_current_year() {
        let request = ConversionRequest::new()
            .with_input(InputKind::UserEquinox, "1", "1")
            .with_current_year("3000");
        assert_eq!(
            converter().convert(&request).unwrap_err().to_string(),
            "For user-supplied equinox, must supply the year"
        );

        // a bad user year still wins over a missing current year
        let request = ConversionRequest::new()
            .with_input(InputKind::CurrentEquinox, "1", "1")
            .with_user_year("0");
        assert_eq!(
            converter().convert(&request).unwrap_err().to_string(),
            "User-supplied year out of range"
        );
    }

    #[test]
    fn test_cardinality() {
        let none = ConversionRequest::new();
        assert_eq!(
            converter().convert(&none),
            Err(EquinoxError::InputCardinality { found: 0 })
        );

        let two = ConversionRequest::new()
            .with_input(InputKind::J2000, "0", "0")
            .with_input(InputKind::Galactic, "0", "0");
        assert_eq!(
            converter().convert(&two),
            Err(EquinoxError::InputCardinality { found: 2 })
        );
    }

    #[test]
    fn test_same_kind_twice_keeps_last() {
        let request = ConversionRequest::new()
            .with_input(InputKind::J2000, "1", "1")
            .with_input(InputKind::J2000, "12 30 0", "-10 20 30");
        let result = converter().convert(&request).unwrap();
        assert_eq!(
            result.rows.j2000.to_string(),
            "12h 30m 0.0s   -10° 20' 30\"   //   +187.5000°  /  -10° 20.50'  -10.3417°"
        );
    }

    #[test]
    fn test_epoch_year_validation() {
        let base = ConversionRequest::new().with_input(InputKind::J2000, "0", "0");

        let too_early = base.clone().with_user_year("0.5");
        assert_eq!(
            converter().convert(&too_early),
            Err(EquinoxError::EpochOutOfRange {
                slot: EpochSlot::User,
                value: "0.5".into()
            })
        );

        let too_late = base.clone().with_current_year("2100.5");
        assert!(matches!(
            converter().convert(&too_late),
            Err(EquinoxError::EpochOutOfRange {
                slot: EpochSlot::Current,
                ..
            })
        ));

        let not_a_number = base.clone().with_user_year("soon");
        assert_eq!(
            converter().convert(&not_a_number).unwrap_err().to_string(),
            "User-supplied year out of range"
        );

        let blank = base.with_user_year("  ");
        assert!(converter().convert(&blank).unwrap().positions.user_equinox.is_none());
    }

    #[test]
    fn test_configured_year_bound() {
        let strict = Converter::new(EquinoxEnv::default().with_max_epoch_year(2020.0));
        let request = ConversionRequest::new()
            .with_input(InputKind::J2000, "0", "0")
            .with_current_year("2024.37");
        assert!(strict.convert(&request).is_err());
        assert!(converter().convert(&request).is_ok());
    }

    #[test]
    fn test_missing_epoch() {
        let user = ConversionRequest::new().with_input(InputKind::UserEquinox, "1", "1");
        assert_eq!(
            converter().convert(&user),
            Err(EquinoxError::MissingEpoch {
                slot: EpochSlot::User
            })
        );

        let current = ConversionRequest::new()
            .with_input(InputKind::CurrentEquinox, "1", "1")
            .with_user_year("1950");
        assert_eq!(
            converter().convert(&current),
            Err(EquinoxError::MissingEpoch {
                slot: EpochSlot::Current
            })
        );
    }

    #[test]
    fn test_range_checks() {
        let request = |kind, lon: &str, lat: &str| {
            ConversionRequest::new()
                .with_input(kind, lon, lat)
                .with_user_year("1950")
                .with_current_year("2024")
        };

        // 24h is one full circle
        let err = converter()
            .convert(&request(InputKind::J2000, "24 0 0", "0"))
            .unwrap_err();
        assert_eq!(err.to_string(), "J2000 RA out of range");

        let err = converter()
            .convert(&request(InputKind::B1950, "0", "90 0 1"))
            .unwrap_err();
        assert_eq!(err.to_string(), "B1950 Dec out of range");

        // Galactic longitudes are read as signed degrees
        let err = converter()
            .convert(&request(InputKind::Galactic, "-10", "0"))
            .unwrap_err();
        assert_eq!(err.to_string(), "New Galactic Longitude out of range");

        let err = converter()
            .convert(&request(InputKind::OldGalactic, "360", "0"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Old Galactic Longitude out of range");

        let err = converter()
            .convert(&request(InputKind::CurrentEquinox, "1", "-90 0 1"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Current Year Dec out of range");

        // bounds themselves are accepted
        assert!(converter()
            .convert(&request(InputKind::UserEquinox, "23 59 59.9", "-90"))
            .is_ok());
        assert!(converter()
            .convert(&request(InputKind::Galactic, "359 59 59", "90"))
            .is_ok());
    }

    #[test]
    fn test_optional_outputs() {
        let request = ConversionRequest::new()
            .with_input(InputKind::J2000, "0", "0")
            .with_user_year("1875");
        let result = converter().convert(&request).unwrap();

        let user = result.positions.user_equinox.unwrap();
        assert_eq!(user.year, 1875.0);
        assert!(result.positions.current_equinox.is_none());
        assert!(result.rows.current_equinox.is_none());
        assert_eq!(result.rows.user_equinox.unwrap().year, "1875");
    }

    #[test]
    fn test_j2000_origin_to_b1950() {
        let request = ConversionRequest::new().with_input(InputKind::J2000, "0h 0m 0s", "0 0 0");
        let result = converter().convert(&request).unwrap();
        assert_eq!(
            result.rows.b1950.to_string(),
            "0h 2m 33.8s   0° 16' 42\"    //    +0.6407°  /  0° 16.70'  0.2784°"
        );
    }

    #[test]
    fn test_galactic_centre() {
        let request = ConversionRequest::new().with_input(InputKind::Galactic, "0", "0");
        let result = converter().convert(&request).unwrap();
        assert_eq!(
            result.rows.j2000.to_string(),
            "17h 45m 37.2s   -28° 56' 10\"   //   +266.4050°  /  -28° 56.17'  -28.9362°"
        );
        assert_abs_diff_eq!(result.positions.galactic.lon.sin(), 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(result.positions.galactic.lat, 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_old_galactic_rows() {
        let request = ConversionRequest::new().with_input(InputKind::Galactic, "0", "0");
        let result = converter().convert(&request).unwrap();
        assert_eq!(
            result.rows.old_galactic.to_string(),
            "327.7000°  -1.4095°    //    327.6938°  -1.4001°"
        );
    }

    #[test]
    fn test_user_equinox_input_round_trip() {
        let request = ConversionRequest::new()
            .with_input(InputKind::UserEquinox, "5 35 17.3", "-5 23 28")
            .with_user_year("1875");
        let result = converter().convert(&request).unwrap();
        let echoed = result.positions.user_equinox.unwrap().pair;

        assert_abs_diff_eq!(echoed.lon, (5.0 + 35.0 / 60.0 + 17.3 / 3600.0) * 15.0 * RADEG, epsilon = 1e-7);
        assert_abs_diff_eq!(echoed.lat, -(5.0 + 23.0 / 60.0 + 28.0 / 3600.0) * RADEG, epsilon = 1e-7);
    }

    #[test]
    fn test_display_adaptors() {
        let request = ConversionRequest::new()
            .with_input(InputKind::J2000, "0", "0")
            .with_current_year("2024.37");
        let result = converter().convert(&request).unwrap();

        let lines = result.show().to_string();
        assert_eq!(lines.lines().count(), 5);
        assert!(lines.starts_with("J2000 "));
        assert!(lines.contains(" : 0h 0m 0.0s   0° 0' 0\""));
        assert!(lines.contains("Current 2024.37 : "));

        let grid = result.table().to_string();
        assert!(grid.contains("Frame"));
        assert!(grid.contains("Old Galactic"));
    }
}
