use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{validate_dimensions, PuzzleResult};
use crate::game::{DIR_DOWN, DIR_LEFT, DIR_RIGHT, DIR_UP};

pub const FLAT: i8 = 0;
pub const TAB: i8 = 1;
pub const BLANK: i8 = -1;

/// Tab classification of the four sides of one cell: `1` protrudes, `-1` is
/// indented, `0` lies on the puzzle border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeShape {
    pub top: i8,
    pub right: i8,
    pub bottom: i8,
    pub left: i8,
}

impl EdgeShape {
    pub fn side(&self, dir: usize) -> i8 {
        match dir {
            DIR_UP => self.top,
            DIR_RIGHT => self.right,
            DIR_DOWN => self.bottom,
            DIR_LEFT => self.left,
            _ => FLAT,
        }
    }

    pub fn sides(&self) -> [i8; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<EdgeShape>,
}

impl EdgeGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&EdgeShape> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.cells.get(y * self.cols + x)
    }

    pub fn cells(&self) -> &[EdgeShape] {
        &self.cells
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> i8 {
    if rng.random_bool(0.5) {
        TAB
    } else {
        BLANK
    }
}

/// Cuts a `rows x cols` grid in row-major order. Only bottom and right sides are
/// drawn at random; top and left mirror the neighbor generated before them.
pub fn generate_edge_grid<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> PuzzleResult<EdgeGrid> {
    validate_dimensions(rows, cols)?;
    let mut cells: Vec<EdgeShape> = Vec::with_capacity(rows * cols);
    for y in 0..rows {
        for x in 0..cols {
            let top = if y == 0 {
                FLAT
            } else {
                -cells[(y - 1) * cols + x].bottom
            };
            let left = if x == 0 {
                FLAT
            } else {
                -cells[y * cols + x - 1].right
            };
            let bottom = if y + 1 == rows { FLAT } else { random_sign(rng) };
            let right = if x + 1 == cols { FLAT } else { random_sign(rng) };
            cells.push(EdgeShape {
                top,
                right,
                bottom,
                left,
            });
        }
    }
    Ok(EdgeGrid { rows, cols, cells })
}

pub fn format_edge_grid(grid: &EdgeGrid) -> String {
    let sign = |value: i8| match value {
        TAB => '+',
        BLANK => '-',
        _ => '0',
    };
    let mut out = String::new();
    for y in 0..grid.rows {
        let row: Vec<String> = (0..grid.cols)
            .filter_map(|x| grid.get(x, y))
            .map(|shape| shape.sides().iter().map(|side| sign(*side)).collect())
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn format_lists_sides_clockwise() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_edge_grid(1, 2, &mut rng).expect("grid");
        let text = format_edge_grid(&grid);
        let cells: Vec<&str> = text.trim().split(' ').collect();
        assert_eq!(cells.len(), 2);
        assert!(cells[0].starts_with('0'));
        assert!(cells[0].ends_with('0'));
        assert_eq!(&cells[1][1..2], "0");
    }
}
