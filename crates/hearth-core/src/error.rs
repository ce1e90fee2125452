//! Parameter validation errors.
//!
//! Raised by [`HeatParams::validate()`](crate::HeatParams::validate)
//! before any grid is constructed. Invalid geometry is surfaced to the
//! caller and never silently clamped.

use std::error::Error;
use std::fmt;

/// A [`HeatParams`](crate::HeatParams) value violates a structural invariant.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamsError {
    /// The room has no interior: `room_size` must be at least 3.
    RoomTooSmall {
        /// The configured room size.
        room_size: usize,
    },
    /// The heat source is on the border or outside the room.
    SourceNotInterior {
        /// Source row.
        x: usize,
        /// Source column.
        y: usize,
        /// The configured room size.
        room_size: usize,
    },
    /// Tolerance is NaN, infinite, zero, or negative.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
    /// A border or source temperature is NaN or infinite.
    NonFiniteTemperature {
        /// Which temperature (`"border_temp"` or `"source_temp"`).
        which: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// The SOR relaxation constant is NaN or infinite.
    NonFiniteSorConstant {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomTooSmall { room_size } => {
                write!(f, "room_size {room_size} leaves no interior (minimum 3)")
            }
            Self::SourceNotInterior { x, y, room_size } => {
                write!(
                    f,
                    "source ({x}, {y}) is not strictly inside a {room_size}x{room_size} room"
                )
            }
            Self::InvalidTolerance { value } => {
                write!(f, "tolerance must be finite and positive, got {value}")
            }
            Self::NonFiniteTemperature { which, value } => {
                write!(f, "{which} must be finite, got {value}")
            }
            Self::NonFiniteSorConstant { value } => {
                write!(f, "sor_constant must be finite, got {value}")
            }
        }
    }
}

impl Error for ParamsError {}
