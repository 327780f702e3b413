pub mod constants;
pub mod conversion;
pub mod converter;
pub mod display;
pub mod env_state;
pub mod equinox_errors;
pub mod frame_matrices;
pub mod ref_system;
pub mod time;

pub use converter::{ConversionRequest, ConversionResult, Converter, InputKind};
pub use equinox_errors::EquinoxError;
pub use ref_system::{RefSystem, SphericalPair};
