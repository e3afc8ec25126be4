use jigsnap_core::game::{grid_coords, neighbor_id, opposite_dir, DIRECTIONS};
use jigsnap_core::{generate_edge_grid, EdgeShape, PuzzleError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_shared_edges_match(rows: usize, cols: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = generate_edge_grid(rows, cols, &mut rng).expect("grid");
    for y in 0..rows {
        for x in 0..cols {
            let cell = grid.get(x, y).expect("cell");
            if x + 1 < cols {
                let right = grid.get(x + 1, y).expect("right cell");
                assert_eq!(cell.right, -right.left, "cell ({x},{y}) right edge");
                assert_ne!(cell.right, 0);
            } else {
                assert_eq!(cell.right, 0);
            }
            if y + 1 < rows {
                let below = grid.get(x, y + 1).expect("cell below");
                assert_eq!(cell.bottom, -below.top, "cell ({x},{y}) bottom edge");
                assert_ne!(cell.bottom, 0);
            } else {
                assert_eq!(cell.bottom, 0);
            }
            if x == 0 {
                assert_eq!(cell.left, 0);
            }
            if y == 0 {
                assert_eq!(cell.top, 0);
            }
        }
    }
}

#[test]
fn shared_edges_are_exact_opposites() {
    for seed in 0..20 {
        assert_shared_edges_match(4, 6, seed);
        assert_shared_edges_match(1, 5, seed);
        assert_shared_edges_match(7, 1, seed);
    }
}

#[test]
fn every_side_mirrors_its_neighbor() {
    let (rows, cols) = (5, 4);
    let grid = generate_edge_grid(rows, cols, &mut StdRng::seed_from_u64(41)).expect("grid");
    for id in 0..rows * cols {
        let (x, y) = grid_coords(id, cols);
        let cell = grid.get(x, y).expect("cell");
        for dir in DIRECTIONS {
            match neighbor_id(id, cols, rows, dir) {
                Some(other) => {
                    let (ox, oy) = grid_coords(other, cols);
                    let neighbor = grid.get(ox, oy).expect("neighbor");
                    assert_eq!(cell.side(dir), -neighbor.side(opposite_dir(dir)));
                }
                None => assert_eq!(cell.side(dir), 0),
            }
        }
    }
}

#[test]
fn single_cell_is_flat() {
    let mut rng = StdRng::seed_from_u64(9);
    let grid = generate_edge_grid(1, 1, &mut rng).expect("grid");
    assert_eq!(grid.cells(), &[EdgeShape::default()]);
}

#[test]
fn same_seed_same_grid() {
    let a = generate_edge_grid(5, 5, &mut StdRng::seed_from_u64(77)).expect("grid");
    let b = generate_edge_grid(5, 5, &mut StdRng::seed_from_u64(77)).expect("grid");
    assert_eq!(a, b);
}

#[test]
fn empty_dimensions_are_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        generate_edge_grid(0, 3, &mut rng).unwrap_err(),
        PuzzleError::InvalidDimensions { rows: 0, cols: 3 }
    );
    assert_eq!(
        generate_edge_grid(2, 0, &mut rng).unwrap_err(),
        PuzzleError::InvalidDimensions { rows: 2, cols: 0 }
    );
}
