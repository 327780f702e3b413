//! # Angle formatting and result display
//!
//! Renders converted positions as the text rows shown to the user, and whole
//! [`ConversionResult`]s as small tables.
//!
//! ## Angle renderers
//!
//! | Renderer             | Example           | Resolution   |
//! |----------------------|-------------------|--------------|
//! | [`format_hms`]       | `12h 30m 0.0s`    | 0.1 s of RA  |
//! | [`format_dms`]       | `-10° 20' 30"`    | 1″           |
//! | [`format_dm`]        | `-10° 20.50'`     | 0.01′        |
//! | [`format_degrees`]   | `187.5000°`       | 0.0001°      |
//!
//! Each renderer adds half of its last unit and then truncates, so values are rounded
//! to the nearest displayed unit and carry into the next field (`59.96″` becomes `1′ 0″`).
//! Signed renderers print `-` for negative input and nothing for positive input.
//!
//! ## Rows
//!
//! - Equatorial: `HMS(RA)   DMS(Dec)   //   +D(RA)  /  DM(Dec)  D(Dec)`, with four
//!   spaces around `//` on the B1950 and equinox rows
//! - Galactic: `D(l)  D(b)`
//! - Old Galactic: `D(l≈)  D(b≈)    //    D(l)  D(b)` (approximate first, then exact)
//!
//! ## Layouts
//!
//! [`ResultDisplay`] borrows a result and writes either fixed-width labelled lines
//! (default) or a `comfy-table` grid ([`ResultDisplay::table`]).
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Row, Table};

use crate::constants::{Radian, Year, DEGRAD, DPI, RADH};
use crate::converter::{ConversionResult, EpochPosition, Positions};
use crate::ref_system::SphericalPair;

/// Round-to-unit helper: `floor((value + half_unit) * units_per_value)`.
fn rounded_units(value: f64, half_unit: f64, units_per_value: f64) -> u64 {
    ((value + half_unit) * units_per_value).floor() as u64
}

fn sign_and_degrees(angle: Radian) -> (&'static str, f64) {
    let sign = if angle < 0.0 { "-" } else { "" };
    (sign, angle.abs() * DEGRAD)
}

/// Render an angle as hours, minutes and tenths of seconds of time.
///
/// Negative angles are first brought back into `[0, 2π)`. Values rounding up to a full
/// turn are shown as `24h 0m 0.0s`.
///
/// Arguments
/// ---------
/// * `angle`: right ascension in radians
///
/// Return
/// ------
/// * a string such as `"12h 30m 0.0s"`
pub fn format_hms(angle: Radian) -> String {
    let hours = angle.rem_euclid(DPI) / RADH;
    let tenths = rounded_units(hours, 0.5 / 36000.0, 36000.0);

    let h = tenths / 36000;
    let m = (tenths / 600) % 60;
    let s = (tenths / 10) % 60;
    let t = tenths % 10;
    format!("{h}h {m}m {s}.{t}s")
}

/// Render a signed angle as degrees, arcminutes and whole arcseconds: `-10° 20' 30"`.
pub fn format_dms(angle: Radian) -> String {
    let (sign, degrees) = sign_and_degrees(angle);
    let seconds = rounded_units(degrees, 0.5 / 3600.0, 3600.0);

    let d = seconds / 3600;
    let m = (seconds / 60) % 60;
    let s = seconds % 60;
    format!("{sign}{d}° {m}' {s}\"")
}

/// Render a signed angle as degrees and decimal arcminutes with two decimals: `-10° 20.50'`.
pub fn format_dm(angle: Radian) -> String {
    let (sign, degrees) = sign_and_degrees(angle);
    let hundredths = rounded_units(degrees, 0.005 / 60.0, 6000.0);

    let d = hundredths / 6000;
    let m = (hundredths / 100) % 60;
    let f = hundredths % 100;
    format!("{sign}{d}° {m}.{f:02}'")
}

/// Render a signed angle as decimal degrees with four decimals: `-10.3417°`.
pub fn format_degrees(angle: Radian) -> String {
    let (sign, degrees) = sign_and_degrees(angle);
    let units = rounded_units(degrees, 0.00005, 10000.0);

    let d = units / 10000;
    let f = units % 10000;
    format!("{sign}{d}.{f:04}°")
}

/// Separator between the sexagesimal and decimal halves of the J2000 row.
const J2000_SEPARATOR: &str = "   //   ";
/// Separator used on the B1950 and equinox rows.
const DERIVED_SEPARATOR: &str = "    //    ";

/// Text rendering of an equatorial position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquatorialRow {
    pub ra_hms: String,
    pub dec_dms: String,
    pub ra_degrees: String,
    pub dec_dm: String,
    pub dec_degrees: String,
    separator: &'static str,
}

impl EquatorialRow {
    fn with_separator(pair: &SphericalPair, separator: &'static str) -> Self {
        EquatorialRow {
            ra_hms: format_hms(pair.lon),
            dec_dms: format_dms(pair.lat),
            ra_degrees: format_degrees(pair.lon),
            dec_dm: format_dm(pair.lat),
            dec_degrees: format_degrees(pair.lat),
            separator,
        }
    }

    /// Row for a frame derived from J2000 (B1950, user or current equinox), which
    /// uses the wider `//` separator.
    pub fn derived(pair: &SphericalPair) -> Self {
        Self::with_separator(pair, DERIVED_SEPARATOR)
    }

    /// True when both rows show the same angles, whatever their separator.
    pub fn same_angles(&self, other: &EquatorialRow) -> bool {
        self.ra_hms == other.ra_hms
            && self.dec_dms == other.dec_dms
            && self.ra_degrees == other.ra_degrees
            && self.dec_dm == other.dec_dm
            && self.dec_degrees == other.dec_degrees
    }
}

/// J2000 row layout.
impl From<&SphericalPair> for EquatorialRow {
    fn from(pair: &SphericalPair) -> Self {
        Self::with_separator(pair, J2000_SEPARATOR)
    }
}

impl fmt::Display for EquatorialRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}   {}{}+{}  /  {}  {}",
            self.ra_hms,
            self.dec_dms,
            self.separator,
            self.ra_degrees,
            self.dec_dm,
            self.dec_degrees
        )
    }
}

/// Text rendering of a Galactic position, in decimal degrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalacticRow {
    pub lon: String,
    pub lat: String,
}

impl From<&SphericalPair> for GalacticRow {
    fn from(pair: &SphericalPair) -> Self {
        GalacticRow {
            lon: format_degrees(pair.lon),
            lat: format_degrees(pair.lat),
        }
    }
}

impl fmt::Display for GalacticRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.lon, self.lat)
    }
}

/// Old Galactic coordinates, approximate formula first and exact rotation second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldGalacticRow {
    pub approximate: GalacticRow,
    pub exact: GalacticRow,
}

impl fmt::Display for OldGalacticRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}    //    {}", self.approximate, self.exact)
    }
}

/// Equatorial row for an equinox chosen at request time, with its year echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochRow {
    pub year: String,
    pub row: EquatorialRow,
}

impl From<&EpochPosition> for EpochRow {
    fn from(position: &EpochPosition) -> Self {
        EpochRow {
            year: format_year(position.year),
            row: EquatorialRow::derived(&position.pair),
        }
    }
}

/// Shortest decimal form of a year: `1875`, `2024.37`.
fn format_year(year: Year) -> String {
    format!("{year}")
}

/// Every output row of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRows {
    pub j2000: EquatorialRow,
    pub b1950: EquatorialRow,
    pub user_equinox: Option<EpochRow>,
    pub current_equinox: Option<EpochRow>,
    pub galactic: GalacticRow,
    pub old_galactic: OldGalacticRow,
}

impl From<&Positions> for FormattedRows {
    fn from(positions: &Positions) -> Self {
        FormattedRows {
            j2000: EquatorialRow::from(&positions.j2000),
            b1950: EquatorialRow::derived(&positions.b1950),
            user_equinox: positions.user_equinox.as_ref().map(EpochRow::from),
            current_equinox: positions.current_equinox.as_ref().map(EpochRow::from),
            galactic: GalacticRow::from(&positions.galactic),
            old_galactic: OldGalacticRow {
                approximate: GalacticRow::from(&positions.old_galactic_approx),
                exact: GalacticRow::from(&positions.old_galactic_exact),
            },
        }
    }
}

impl FormattedRows {
    /// `(label, row)` pairs in display order. Absent epoch rows are skipped.
    pub fn labelled(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("J2000".to_string(), self.j2000.to_string()),
            ("B1950".to_string(), self.b1950.to_string()),
        ];
        if let Some(user) = &self.user_equinox {
            rows.push((format!("Equinox {}", user.year), user.row.to_string()));
        }
        if let Some(current) = &self.current_equinox {
            rows.push((format!("Current {}", current.year), current.row.to_string()));
        }
        rows.push(("Galactic".to_string(), self.galactic.to_string()));
        rows.push(("Old Galactic".to_string(), self.old_galactic.to_string()));
        rows
    }
}

enum TableMode {
    Lines,
    Grid,
}

/// Display adaptor for a [`ConversionResult`].
///
/// The default layout writes one `label: row` line per output frame. [`Self::table`]
/// switches to a `comfy-table` grid.
pub struct ResultDisplay<'a> {
    result: &'a ConversionResult,
    mode: TableMode,
}

impl<'a> ResultDisplay<'a> {
    pub fn new(result: &'a ConversionResult) -> Self {
        ResultDisplay {
            result,
            mode: TableMode::Lines,
        }
    }

    pub fn table(mut self) -> Self {
        self.mode = TableMode::Grid;
        self
    }

    fn render_grid(&self, rows: &[(String, String)]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![Cell::new("Frame"), Cell::new("Position")]);

        for (label, row) in rows {
            table.add_row(Row::from(vec![Cell::new(label), Cell::new(row)]));
        }
        table.to_string()
    }
}

impl fmt::Display for ResultDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.result.rows.labelled();
        match self.mode {
            TableMode::Grid => f.write_str(&self.render_grid(&rows)),
            TableMode::Lines => {
                let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
                for (label, row) in &rows {
                    writeln!(f, "{label:<width$} : {row}")?;
                }
                Ok(())
            }
        }
    }
}
