use std::fmt;

/// A precondition violation in the contour pipeline.
///
/// Raised when an input array does not match the size implied by the grid
/// dimensions. Continuing would address edge slots out of bounds, so this is
/// never silently recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourError {
    pub message: String,
    /// Expected element count derived from the grid dimensions.
    pub expected: usize,
    /// Actual element count supplied by the caller.
    pub actual: usize,
}

impl ContourError {
    pub(crate) fn size_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self {
            message: format!("{what} length does not match grid dimensions"),
            expected,
            actual,
        }
    }
}

impl fmt::Display for ContourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.message, self.expected, self.actual
        )
    }
}

impl std::error::Error for ContourError {}
