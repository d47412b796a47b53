use std::fmt;

/// Errors raised when a grid cannot be built or replaced.
///
/// Querying an empty or out-of-bounds cell is not an error; it yields an
/// empty group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Requested size is zero.
    InvalidSize(usize),
    /// Textual size that could not be parsed at all.
    UnparsableSize(String),
    /// A row whose length differs from the number of rows.
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// A flat grid whose width and height differ.
    NotSquare { w: usize, h: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidSize(size) => {
                write!(f, "invalid grid size {}: size must be at least 1", size)
            }
            GridError::UnparsableSize(input) => {
                write!(f, "invalid grid size {:?}: expected a positive integer", input)
            }
            GridError::RaggedRows { row, len, expected } => write!(
                f,
                "row {} has {} cells, expected {} (grid must be square)",
                row, len, expected
            ),
            GridError::NotSquare { w, h } => {
                write!(f, "grid is {}x{}, expected a square grid", w, h)
            }
        }
    }
}

impl std::error::Error for GridError {}
