use rand::Rng;

pub type PieceId = usize;

pub const DIR_UP: usize = 0;
pub const DIR_RIGHT: usize = 1;
pub const DIR_DOWN: usize = 2;
pub const DIR_LEFT: usize = 3;
pub const DIRECTIONS: [usize; 4] = [DIR_UP, DIR_RIGHT, DIR_DOWN, DIR_LEFT];

pub fn grid_coords(id: PieceId, cols: usize) -> (usize, usize) {
    (id % cols, id / cols)
}

pub fn neighbor_id(id: PieceId, cols: usize, rows: usize, dir: usize) -> Option<PieceId> {
    let col = id % cols;
    let row = id / cols;
    match dir {
        DIR_UP if row > 0 => Some(id - cols),
        DIR_RIGHT if col + 1 < cols => Some(id + 1),
        DIR_DOWN if row + 1 < rows => Some(id + cols),
        DIR_LEFT if col > 0 => Some(id - 1),
        _ => None,
    }
}

pub fn opposite_dir(dir: usize) -> usize {
    match dir {
        DIR_UP => DIR_DOWN,
        DIR_RIGHT => DIR_LEFT,
        DIR_DOWN => DIR_UP,
        DIR_LEFT => DIR_RIGHT,
        _ => DIR_UP,
    }
}

/// Signed grid step from `to` towards `from`, when the two cells share an edge.
pub fn grid_step(from: (usize, usize), to: (usize, usize)) -> Option<(i32, i32)> {
    let dx = from.0 as i64 - to.0 as i64;
    let dy = from.1 as i64 - to.1 as i64;
    match (dx, dy) {
        (-1, 0) | (1, 0) | (0, -1) | (0, 1) => Some((dx as i32, dy as i32)),
        _ => None,
    }
}

/// Uniform scale that fits the image inside the canvas, and the resulting piece pitch.
pub fn fit_piece_size(
    image_width: u32,
    image_height: u32,
    canvas_width: f32,
    canvas_height: f32,
    cols: usize,
    rows: usize,
) -> (f32, f32, f32) {
    let image_width = image_width.max(1) as f32;
    let image_height = image_height.max(1) as f32;
    let scale = (canvas_width / image_width).min(canvas_height / image_height);
    let piece_width = image_width * scale / cols.max(1) as f32;
    let piece_height = image_height * scale / rows.max(1) as f32;
    (scale, piece_width, piece_height)
}

pub fn scatter_layout<R: Rng + ?Sized>(
    rng: &mut R,
    total: usize,
    piece_width: f32,
    piece_height: f32,
    canvas_width: f32,
    canvas_height: f32,
) -> Vec<(f32, f32)> {
    let max_x = (canvas_width - piece_width).max(0.0);
    let max_y = (canvas_height - piece_height).max(0.0);
    let mut positions = Vec::with_capacity(total);
    for _ in 0..total {
        let x = rng.random_range(0.0..=max_x);
        let y = rng.random_range(0.0..=max_y);
        positions.push((x, y));
    }
    positions
}

pub fn bounds_of(
    positions: &[(f32, f32)],
    ids: &[PieceId],
    piece_width: f32,
    piece_height: f32,
) -> Option<(f32, f32, f32, f32)> {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for id in ids {
        if let Some(pos) = positions.get(*id) {
            min_x = min_x.min(pos.0);
            min_y = min_y.min(pos.1);
            max_x = max_x.max(pos.0 + piece_width);
            max_y = max_y.max(pos.1 + piece_height);
        }
    }
    if min_x.is_finite() && min_y.is_finite() {
        Some((min_x, min_y, max_x, max_y))
    } else {
        None
    }
}
