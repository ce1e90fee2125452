//! Update rules, round phases, and per-cell results.

use std::fmt;

/// Which stencil update rule the solver applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Every cell reads only the previous round's values.
    #[default]
    Jacobi,
    /// Red-black successive over-relaxation in two colored half-phases.
    Sor,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jacobi => write!(f, "jacobi"),
            Self::Sor => write!(f, "sor"),
        }
    }
}

/// One synchronized step inside a round.
///
/// A Jacobi round is a single [`Phase::Jacobi`]. An SOR round is
/// `Color(0)` followed by `Color(1)`; each is followed by its own
/// exchange and buffer swap so that color 1 reads color 0's new values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Update every interior cell from the current buffer.
    Jacobi,
    /// Update only cells with `(i + j) % 2 == color`; copy the rest.
    Color(u8),
}

const JACOBI_SCHEDULE: [Phase; 1] = [Phase::Jacobi];
const SOR_SCHEDULE: [Phase; 2] = [Phase::Color(0), Phase::Color(1)];

impl Phase {
    /// The ordered phases making up one round of `algorithm`.
    pub fn schedule(algorithm: Algorithm) -> &'static [Phase] {
        match algorithm {
            Algorithm::Jacobi => &JACOBI_SCHEDULE,
            Algorithm::Sor => &SOR_SCHEDULE,
        }
    }

    /// Whether this phase recomputes cell `(i, j)`.
    ///
    /// Cells it does not recompute are carried over unchanged.
    pub fn updates(self, i: usize, j: usize) -> bool {
        match self {
            Self::Jacobi => true,
            Self::Color(c) => (i + j) % 2 == c as usize,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jacobi => write!(f, "jacobi"),
            Self::Color(c) => write!(f, "color-{c}"),
        }
    }
}

/// Result of recomputing one cell.
///
/// Produced and consumed within a single phase; never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateResult {
    /// The new temperature.
    pub temp: f64,
    /// `|temp - old| < tolerance`.
    pub stable: bool,
}
