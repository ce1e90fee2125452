//! Immutable run parameters.
//!
//! A [`HeatParams`] value is passed by value into every round. Changing a
//! parameter means constructing a new value; the solver compares it with
//! the previous one to decide whether the grid must be rebuilt.

use crate::error::ParamsError;
use crate::phase::Algorithm;

/// Physical and numeric parameters of one solver run.
///
/// The grid is `room_size × room_size`. Row 0, row `room_size - 1`,
/// column 0 and column `room_size - 1` are the border and stay at
/// `border_temp`. The cell `(source_x, source_y)` stays at `source_temp`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatParams {
    /// Side length of the square grid, border included.
    pub room_size: usize,
    /// Temperature pinned on every border cell.
    pub border_temp: f64,
    /// Temperature pinned on the heat source cell.
    pub source_temp: f64,
    /// Row of the heat source. Must be strictly interior.
    pub source_x: usize,
    /// Column of the heat source. Must be strictly interior.
    pub source_y: usize,
    /// Per-cell convergence threshold: a cell is stable when its update
    /// moved it by less than this amount.
    pub tolerance: f64,
    /// Update rule.
    pub algorithm: Algorithm,
    /// SOR relaxation factor ω. Ignored by Jacobi.
    ///
    /// Values outside `(0, 2)` may never converge; this is not rejected.
    pub sor_constant: f64,
}

impl HeatParams {
    /// Default room side length.
    pub const DEFAULT_ROOM_SIZE: usize = 300;

    /// Default per-cell tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 0.02;

    /// Parameters for a `room_size` room with the source in the middle and
    /// every other value at its default.
    pub fn with_room_size(room_size: usize) -> Self {
        Self {
            room_size,
            source_x: room_size / 2,
            source_y: room_size / 2,
            ..Self::default()
        }
    }

    /// Check every structural invariant.
    ///
    /// Must pass before a grid is built from these parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.room_size < 3 {
            return Err(ParamsError::RoomTooSmall {
                room_size: self.room_size,
            });
        }
        if !self.is_interior(self.source_x, self.source_y) {
            return Err(ParamsError::SourceNotInterior {
                x: self.source_x,
                y: self.source_y,
                room_size: self.room_size,
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ParamsError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if !self.border_temp.is_finite() {
            return Err(ParamsError::NonFiniteTemperature {
                which: "border_temp",
                value: self.border_temp,
            });
        }
        if !self.source_temp.is_finite() {
            return Err(ParamsError::NonFiniteTemperature {
                which: "source_temp",
                value: self.source_temp,
            });
        }
        if !self.sor_constant.is_finite() {
            return Err(ParamsError::NonFiniteSorConstant {
                value: self.sor_constant,
            });
        }
        Ok(())
    }

    /// Whether `(i, j)` lies strictly inside the border.
    pub fn is_interior(&self, i: usize, j: usize) -> bool {
        i > 0 && j > 0 && i + 1 < self.room_size && j + 1 < self.room_size
    }

    /// Whether `(i, j)` is the heat source.
    pub fn is_source(&self, i: usize, j: usize) -> bool {
        i == self.source_x && j == self.source_y
    }

    /// Whether `(i, j)` holds a fixed value (border or source).
    pub fn is_pinned(&self, i: usize, j: usize) -> bool {
        !self.is_interior(i, j) || self.is_source(i, j)
    }

    /// Number of rows the stencil updates (`room_size - 2`).
    pub fn interior_rows(&self) -> usize {
        self.room_size.saturating_sub(2)
    }

    /// Whether `other` describes the same pinned cells with the same values.
    ///
    /// When this holds, a grid built for `self` can be reused unchanged.
    pub fn same_pins(&self, other: &HeatParams) -> bool {
        self.room_size == other.room_size
            && self.source_x == other.source_x
            && self.source_y == other.source_y
            && self.border_temp == other.border_temp
            && self.source_temp == other.source_temp
    }
}

impl Default for HeatParams {
    fn default() -> Self {
        Self {
            room_size: Self::DEFAULT_ROOM_SIZE,
            border_temp: 36.0,
            source_temp: 100.0,
            source_x: Self::DEFAULT_ROOM_SIZE / 2,
            source_y: Self::DEFAULT_ROOM_SIZE / 2,
            tolerance: Self::DEFAULT_TOLERANCE,
            algorithm: Algorithm::Jacobi,
            sor_constant: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(HeatParams::default().validate().is_ok());
    }

    #[test]
    fn with_room_size_centers_source() {
        let p = HeatParams::with_room_size(10);
        assert_eq!(p.room_size, 10);
        assert_eq!((p.source_x, p.source_y), (5, 5));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn room_of_two_has_no_interior() {
        let p = HeatParams {
            room_size: 2,
            source_x: 1,
            source_y: 1,
            ..HeatParams::default()
        };
        assert_eq!(
            p.validate(),
            Err(ParamsError::RoomTooSmall { room_size: 2 })
        );
    }

    #[test]
    fn source_on_border_rejected() {
        for (x, y) in [(0, 5), (5, 0), (9, 5), (5, 9), (12, 3)] {
            let p = HeatParams {
                source_x: x,
                source_y: y,
                ..HeatParams::with_room_size(10)
            };
            match p.validate() {
                Err(ParamsError::SourceNotInterior { .. }) => {}
                other => panic!("expected SourceNotInterior for ({x},{y}), got {other:?}"),
            }
        }
    }

    #[test]
    fn non_positive_tolerance_rejected() {
        for tol in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let p = HeatParams {
                tolerance: tol,
                ..HeatParams::with_room_size(10)
            };
            match p.validate() {
                Err(ParamsError::InvalidTolerance { .. }) => {}
                other => panic!("expected InvalidTolerance for {tol}, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_finite_temperatures_rejected() {
        let p = HeatParams {
            border_temp: f64::NAN,
            ..HeatParams::with_room_size(10)
        };
        match p.validate() {
            Err(ParamsError::NonFiniteTemperature { which, .. }) => {
                assert_eq!(which, "border_temp")
            }
            other => panic!("expected NonFiniteTemperature, got {other:?}"),
        }

        let p = HeatParams {
            source_temp: f64::NEG_INFINITY,
            ..HeatParams::with_room_size(10)
        };
        match p.validate() {
            Err(ParamsError::NonFiniteTemperature { which, .. }) => {
                assert_eq!(which, "source_temp")
            }
            other => panic!("expected NonFiniteTemperature, got {other:?}"),
        }
    }

    #[test]
    fn divergent_sor_constant_is_not_rejected() {
        let p = HeatParams {
            algorithm: Algorithm::Sor,
            sor_constant: 4.0,
            ..HeatParams::with_room_size(10)
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn pinned_cells_are_border_and_source() {
        let p = HeatParams::with_room_size(5);
        let pinned: Vec<(usize, usize)> = (0..5)
            .flat_map(|i| (0..5).map(move |j| (i, j)))
            .filter(|&(i, j)| p.is_pinned(i, j))
            .collect();
        // 16 border cells + the source.
        assert_eq!(pinned.len(), 17);
        assert!(p.is_pinned(2, 2));
        assert!(!p.is_pinned(1, 2));
    }

    #[test]
    fn same_pins_ignores_numeric_knobs() {
        let a = HeatParams::with_room_size(10);
        let b = HeatParams {
            tolerance: 0.5,
            algorithm: Algorithm::Sor,
            sor_constant: 1.7,
            ..a
        };
        assert!(a.same_pins(&b));
        let c = HeatParams {
            border_temp: 1.0,
            ..a
        };
        assert!(!a.same_pins(&c));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn interior_source_always_validates(
                room in 3usize..64,
                x_frac in 0.0f64..1.0,
                y_frac in 0.0f64..1.0,
                tol in 1e-6f64..10.0,
            ) {
                // Map fractions onto the interior range 1..room-1.
                let span = room - 2;
                let x = 1 + ((x_frac * span as f64) as usize).min(span - 1);
                let y = 1 + ((y_frac * span as f64) as usize).min(span - 1);
                let p = HeatParams {
                    room_size: room,
                    source_x: x,
                    source_y: y,
                    tolerance: tol,
                    ..HeatParams::default()
                };
                prop_assert!(p.validate().is_ok());
                prop_assert!(p.is_pinned(x, y));
                prop_assert_eq!(p.interior_rows(), room - 2);
            }

            #[test]
            fn border_source_never_validates(room in 3usize..64, along in 0usize..64) {
                let along = along % room;
                let p = HeatParams {
                    room_size: room,
                    source_x: 0,
                    source_y: along,
                    ..HeatParams::default()
                };
                let rejected = matches!(
                    p.validate(),
                    Err(ParamsError::SourceNotInterior { .. })
                );
                prop_assert!(rejected);
            }
        }
    }
}
