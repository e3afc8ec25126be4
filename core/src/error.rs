#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle needs at least one row and one column, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("expected {expected} pieces, got {actual}")]
    PieceCount { expected: usize, actual: usize },
    #[error("piece {index} has id {id} at cell ({grid_x}, {grid_y}), outside its own slot")]
    MisplacedPiece {
        index: usize,
        id: usize,
        grid_x: usize,
        grid_y: usize,
    },
    #[error("no image loaded")]
    NoImageLoaded,
    #[error("image has invalid dimensions {width}x{height}")]
    InvalidImage { width: u32, height: u32 },
    #[error("invalid rules: {0}")]
    Config(String),
}

pub type PuzzleResult<T> = Result<T, PuzzleError>;

pub fn validate_dimensions(rows: usize, cols: usize) -> PuzzleResult<()> {
    if rows < 1 || cols < 1 {
        return Err(PuzzleError::InvalidDimensions { rows, cols });
    }
    Ok(())
}
