pub mod edges;
pub mod error;
pub mod game;
pub mod group;
pub mod outline;
pub mod rules;
pub mod snap;
pub mod state;

pub use edges::{format_edge_grid, generate_edge_grid, EdgeGrid, EdgeShape};
pub use error::{PuzzleError, PuzzleResult};
pub use game::PieceId;
pub use group::Links;
pub use rules::PuzzleRules;
pub use snap::{center_assembly, is_complete, try_resolve_snaps, SnapEvent};
pub use state::{Piece, PieceStore, SourceRect};
