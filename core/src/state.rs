use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::edges::{EdgeGrid, EdgeShape};
use crate::error::{validate_dimensions, PuzzleError, PuzzleResult};
use crate::game::{bounds_of, fit_piece_size, grid_coords, scatter_layout, PieceId};
use crate::group::Links;

/// Region of the source image a piece shows, in source pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub grid_x: usize,
    pub grid_y: usize,
    pub position: (f32, f32),
    pub home: (f32, f32),
    pub edges: EdgeShape,
    pub source: SourceRect,
}

/// Owns every piece of the current puzzle together with its connection graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceStore {
    rows: usize,
    cols: usize,
    piece_width: f32,
    piece_height: f32,
    pieces: Vec<Piece>,
    links: Links,
}

impl PieceStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn create_pieces<R: Rng + ?Sized>(
        grid: &EdgeGrid,
        image: (u32, u32),
        canvas: (f32, f32),
        rng: &mut R,
    ) -> PuzzleResult<Self> {
        let (rows, cols) = (grid.rows(), grid.cols());
        validate_dimensions(rows, cols)?;
        let (image_width, image_height) = image;
        if image_width == 0 || image_height == 0 {
            return Err(PuzzleError::InvalidImage {
                width: image_width,
                height: image_height,
            });
        }
        let (_scale, piece_width, piece_height) =
            fit_piece_size(image_width, image_height, canvas.0, canvas.1, cols, rows);
        let source_width = image_width as f32 / cols as f32;
        let source_height = image_height as f32 / rows as f32;
        let total = rows * cols;
        let positions = scatter_layout(rng, total, piece_width, piece_height, canvas.0, canvas.1);
        let mut pieces = Vec::with_capacity(total);
        for (id, position) in positions.into_iter().enumerate() {
            let (grid_x, grid_y) = grid_coords(id, cols);
            let edges = grid.get(grid_x, grid_y).copied().unwrap_or_default();
            pieces.push(Piece {
                id,
                grid_x,
                grid_y,
                position,
                home: (grid_x as f32 * piece_width, grid_y as f32 * piece_height),
                edges,
                source: SourceRect {
                    x: grid_x as f32 * source_width,
                    y: grid_y as f32 * source_height,
                    width: source_width,
                    height: source_height,
                },
            });
        }
        Ok(Self {
            rows,
            cols,
            piece_width,
            piece_height,
            pieces,
            links: Links::new(total),
        })
    }

    /// Builds a store from explicit pieces; every piece starts in its own group.
    /// Piece `i` must carry id `i` and sit at cell `(i % cols, i / cols)`.
    pub fn from_pieces(
        rows: usize,
        cols: usize,
        piece_width: f32,
        piece_height: f32,
        pieces: Vec<Piece>,
    ) -> PuzzleResult<Self> {
        validate_dimensions(rows, cols)?;
        let total = rows * cols;
        if pieces.len() != total {
            return Err(PuzzleError::PieceCount {
                expected: total,
                actual: pieces.len(),
            });
        }
        for (index, piece) in pieces.iter().enumerate() {
            if piece.id != index || (piece.grid_x, piece.grid_y) != grid_coords(index, cols) {
                return Err(PuzzleError::MisplacedPiece {
                    index,
                    id: piece.id,
                    grid_x: piece.grid_x,
                    grid_y: piece.grid_y,
                });
            }
        }
        Ok(Self {
            rows,
            cols,
            piece_width,
            piece_height,
            pieces,
            links: Links::new(total),
        })
    }

    pub fn replace_all(&mut self, next: PieceStore) {
        *self = next;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn piece_width(&self) -> f32 {
        self.piece_width
    }

    pub fn piece_height(&self) -> f32 {
        self.piece_height
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn position(&self, id: PieceId) -> Option<(f32, f32)> {
        self.pieces.get(id).map(|piece| piece.position)
    }

    pub fn positions(&self) -> Vec<(f32, f32)> {
        self.pieces.iter().map(|piece| piece.position).collect()
    }

    pub fn set_position(&mut self, id: PieceId, position: (f32, f32)) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.position = position;
        }
    }

    /// Moves every listed piece by the same offset.
    pub fn translate(&mut self, members: &[PieceId], delta: (f32, f32)) {
        for id in members {
            if let Some(piece) = self.pieces.get_mut(*id) {
                piece.position = (piece.position.0 + delta.0, piece.position.1 + delta.1);
            }
        }
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn merge(&mut self, a: PieceId, b: PieceId) -> bool {
        self.links.merge(a, b)
    }

    pub fn group_of(&self, id: PieceId) -> Vec<PieceId> {
        self.links.collect_group(id)
    }

    pub fn same_group(&self, a: PieceId, b: PieceId) -> bool {
        self.links.same_group(a, b)
    }

    pub fn bounds(&self, members: &[PieceId]) -> Option<(f32, f32, f32, f32)> {
        let positions = self.positions();
        bounds_of(&positions, members, self.piece_width, self.piece_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::generate_edge_grid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pieces_land_inside_the_canvas() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = generate_edge_grid(4, 5, &mut rng).expect("grid");
        let store =
            PieceStore::create_pieces(&grid, (1000, 800), (900.0, 700.0), &mut rng).expect("store");
        assert_eq!(store.len(), 20);
        for piece in store.pieces() {
            assert!(piece.position.0 >= 0.0);
            assert!(piece.position.1 >= 0.0);
            assert!(piece.position.0 <= 900.0 - store.piece_width() + 1e-3);
            assert!(piece.position.1 <= 700.0 - store.piece_height() + 1e-3);
            assert_eq!(piece.id, piece.grid_y * 5 + piece.grid_x);
            assert_eq!(Some(&piece.edges), grid.get(piece.grid_x, piece.grid_y));
        }
    }

    #[test]
    fn source_rects_tile_the_image() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = generate_edge_grid(2, 4, &mut rng).expect("grid");
        let store =
            PieceStore::create_pieces(&grid, (400, 300), (900.0, 700.0), &mut rng).expect("store");
        let last = store.piece(7).expect("piece");
        assert_eq!(last.source, SourceRect { x: 300.0, y: 150.0, width: 100.0, height: 150.0 });
    }

    #[test]
    fn zero_sized_images_are_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = generate_edge_grid(2, 2, &mut rng).expect("grid");
        let err = PieceStore::create_pieces(&grid, (0, 300), (900.0, 700.0), &mut rng).unwrap_err();
        assert_eq!(err, PuzzleError::InvalidImage { width: 0, height: 300 });
    }
    fn cell(id: PieceId, grid_x: usize, grid_y: usize) -> Piece {
        Piece {
            id,
            grid_x,
            grid_y,
            position: (0.0, 0.0),
            home: (0.0, 0.0),
            edges: EdgeShape::default(),
            source: SourceRect::default(),
        }
    }

    #[test]
    fn explicit_pieces_must_fill_their_own_cells() {
        let store = PieceStore::from_pieces(1, 2, 10.0, 10.0, vec![cell(0, 0, 0), cell(1, 1, 0)]);
        assert_eq!(store.map(|store| store.len()), Ok(2));

        let duplicate =
            PieceStore::from_pieces(1, 2, 10.0, 10.0, vec![cell(0, 0, 0), cell(1, 0, 0)]);
        assert_eq!(
            duplicate.unwrap_err(),
            PuzzleError::MisplacedPiece { index: 1, id: 1, grid_x: 0, grid_y: 0 }
        );

        let outside = PieceStore::from_pieces(1, 2, 10.0, 10.0, vec![cell(0, 0, 0), cell(1, 7, 3)]);
        assert!(matches!(outside, Err(PuzzleError::MisplacedPiece { index: 1, .. })));

        let swapped_ids =
            PieceStore::from_pieces(1, 2, 10.0, 10.0, vec![cell(1, 0, 0), cell(0, 1, 0)]);
        assert!(matches!(swapped_ids, Err(PuzzleError::MisplacedPiece { index: 0, id: 1, .. })));
    }

    #[test]
    fn explicit_piece_count_must_match_the_grid() {
        let err = PieceStore::from_pieces(2, 2, 10.0, 10.0, vec![cell(0, 0, 0)]).unwrap_err();
        assert_eq!(err, PuzzleError::PieceCount { expected: 4, actual: 1 });
        let err = PieceStore::from_pieces(0, 2, 10.0, 10.0, Vec::new()).unwrap_err();
        assert_eq!(err, PuzzleError::InvalidDimensions { rows: 0, cols: 2 });
    }
}
