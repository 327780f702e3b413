use thiserror::Error;

use crate::constants::ArcSec;
use crate::converter::{EpochSlot, InputKind};

/// Every way a conversion request can be turned down.
///
/// All variants are ordinary outcomes meant to be shown back to the user; their
/// `Display` text is the message to print.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquinoxError {
    #[error("Need exactly one input row")]
    InputCardinality { found: usize },

    #[error("{}", .slot.out_of_range_message())]
    EpochOutOfRange { slot: EpochSlot, value: String },

    #[error("{}", .slot.missing_message())]
    MissingEpoch { slot: EpochSlot },

    #[error("{} out of range", .kind.longitude_label())]
    LongitudeOutOfRange { kind: InputKind, value: ArcSec },

    #[error("{} out of range", .kind.latitude_label())]
    LatitudeOutOfRange { kind: InputKind, value: ArcSec },

    #[error("Unable to read the system clock: {0}")]
    ClockUnavailable(String),
}

impl From<hifitime::HifitimeError> for EquinoxError {
    fn from(err: hifitime::HifitimeError) -> Self {
        EquinoxError::ClockUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod equinox_errors_test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EquinoxError::InputCardinality { found: 2 }.to_string(),
            "Need exactly one input row"
        );
        assert_eq!(
            EquinoxError::EpochOutOfRange {
                slot: EpochSlot::User,
                value: "0".into()
            }
            .to_string(),
            "User-supplied year out of range"
        );
        assert_eq!(
            EquinoxError::EpochOutOfRange {
                slot: EpochSlot::Current,
                value: "3000".into()
            }
            .to_string(),
            "'Current' year out of range"
        );
        assert_eq!(
            EquinoxError::MissingEpoch {
                slot: EpochSlot::User
            }
            .to_string(),
            "For user-supplied equinox, must supply the year"
        );
        assert_eq!(
            EquinoxError::MissingEpoch {
                slot: EpochSlot::Current
            }
            .to_string(),
            "Need 'current year' value"
        );
        assert_eq!(
            EquinoxError::LongitudeOutOfRange {
                kind: InputKind::B1950,
                value: 1_296_000.0
            }
            .to_string(),
            "B1950 RA out of range"
        );
        assert_eq!(
            EquinoxError::LatitudeOutOfRange {
                kind: InputKind::OldGalactic,
                value: -400_000.0
            }
            .to_string(),
            "Old Galactic Latitude out of range"
        );
    }
}
