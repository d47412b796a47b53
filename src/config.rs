use crate::error::GridError;

/// Default grid dimension when none is requested.
pub const DEFAULT_SIZE: usize = 5;

/// Tunable parameters, shared by the CLI and the server.
#[derive(Clone, Debug)]
pub struct Params {
    pub size: usize,
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: 42,
        }
    }
}

/// Parse a size typed by a user (slider value, CLI arg).
/// Zero, negative and non-integer input is rejected, never clamped.
pub fn parse_size(input: &str) -> Result<usize, GridError> {
    let trimmed = input.trim();
    let size: usize = trimmed
        .parse()
        .map_err(|_| GridError::UnparsableSize(trimmed.to_string()))?;
    validate_size(size)
}

pub fn validate_size(size: usize) -> Result<usize, GridError> {
    if size == 0 {
        return Err(GridError::InvalidSize(size));
    }
    Ok(size)
}
