//! Errors raised by the grid, codec and engine.

/// Errors that can occur while building, decoding or searching a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// Persisted state cannot be decoded with the given dimensions
    MalformedState { width: i64, height: i64 },
    /// Rows of unequal length, or an otherwise unusable grid
    InvalidGrid(String),
    /// The search exhausted its iteration cap without a fixed point or cycle
    NoFinalState { max_iterations: u32 },
    /// The search would run past the largest representable generation
    GenerationOverflow { start_generation: u32 },
}

impl std::fmt::Display for LifeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedState { width, height } => {
                write!(f, "Malformed state: invalid dimensions {}x{}", width, height)
            }
            Self::InvalidGrid(msg) => write!(f, "Invalid grid: {}", msg),
            Self::NoFinalState { max_iterations } => write!(
                f,
                "Could not determine final state within {} iterations",
                max_iterations
            ),
            Self::GenerationOverflow { start_generation } => write!(
                f,
                "Generation limit reached while searching from generation {}",
                start_generation
            ),
        }
    }
}

impl std::error::Error for LifeError {}
