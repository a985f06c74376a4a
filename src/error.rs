//! Error types for mazewalk

use thiserror::Error;

/// Errors raised by maze construction, cell access and the terminal front-end.
///
/// Blocked or out-of-range navigator moves are not errors: they are reported
/// through [`crate::MoveOutcome`].
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid maze dimensions {num_cols}x{num_rows}: both must be at least 1")]
    InvalidDimension { num_cols: u16, num_rows: u16 },

    #[error("cell ({col}, {row}) is outside the {num_cols}x{num_rows} grid")]
    OutOfBounds {
        col: i32,
        row: i32,
        num_cols: u16,
        num_rows: u16,
    },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
