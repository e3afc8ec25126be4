//! Interactive layer of the jigsnap puzzle engine: a [`Session`] owns one
//! puzzle, turns pointer input into drags, and reports completion.
//!
//! The pure engine (edge grids, piece store, grouping, snapping) lives in
//! `jigsnap_core` and is re-exported here.

pub mod drag;
pub mod image;
pub mod mask;
pub mod session;

pub use drag::{DragController, DragOutcome, DragPhase, DragState};
pub use image::{ImageInfo, ImageSource};
pub use jigsnap_core::{
    EdgeGrid, EdgeShape, Piece, PieceId, PieceStore, PuzzleError, PuzzleResult, PuzzleRules,
    SnapEvent,
};
pub use mask::{pick_piece_at, MaskAtlas, PieceMask, ALPHA_HIT_THRESHOLD};
pub use session::{Session, SolvedEvent, SolvedSubscriber, Subscription};
