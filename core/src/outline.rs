use crate::edges::EdgeShape;

pub const TAB_SIZE_RATIO: f32 = 0.2;
pub const CURVE_STEPS: usize = 12;

pub fn tab_size(piece_width: f32, piece_height: f32) -> f32 {
    piece_width.min(piece_height) * TAB_SIZE_RATIO
}

pub fn cubic_point(
    p0: (f32, f32),
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    t: f32,
) -> (f32, f32) {
    let u = 1.0 - t;
    let tt = t * t;
    let uu = u * u;
    (
        uu * u * p0.0 + 3.0 * uu * t * p1.0 + 3.0 * u * tt * p2.0 + tt * t * p3.0,
        uu * u * p0.1 + 3.0 * uu * t * p1.1 + 3.0 * u * tt * p2.1 + tt * t * p3.1,
    )
}

fn push_cubic(
    points: &mut Vec<(f32, f32)>,
    p0: (f32, f32),
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
) {
    for step in 1..=CURVE_STEPS {
        let t = step as f32 / CURVE_STEPS as f32;
        points.push(cubic_point(p0, p1, p2, p3, t));
    }
}

/// Closed silhouette of a piece in local coordinates (top-left corner of the
/// cell at the origin), traced clockwise from the top-left corner. Tabs bulge
/// outwards and blanks inwards by up to three quarters of the tab size.
pub fn piece_outline(shape: &EdgeShape, piece_width: f32, piece_height: f32) -> Vec<(f32, f32)> {
    let (w, h) = (piece_width, piece_height);
    let t = tab_size(w, h);
    let mid_x = w * 0.5;
    let mid_y = h * 0.5;
    let mut points = vec![(0.0, 0.0)];

    if shape.top != 0 {
        let bump = -t * shape.top as f32;
        points.push((mid_x - t, 0.0));
        push_cubic(
            &mut points,
            (mid_x - t, 0.0),
            (mid_x - t, bump),
            (mid_x + t, bump),
            (mid_x + t, 0.0),
        );
    }
    points.push((w, 0.0));

    if shape.right != 0 {
        let bump = w + t * shape.right as f32;
        points.push((w, mid_y - t));
        push_cubic(
            &mut points,
            (w, mid_y - t),
            (bump, mid_y - t),
            (bump, mid_y + t),
            (w, mid_y + t),
        );
    }
    points.push((w, h));

    if shape.bottom != 0 {
        let bump = h + t * shape.bottom as f32;
        points.push((mid_x + t, h));
        push_cubic(
            &mut points,
            (mid_x + t, h),
            (mid_x + t, bump),
            (mid_x - t, bump),
            (mid_x - t, h),
        );
    }
    points.push((0.0, h));

    if shape.left != 0 {
        let bump = -t * shape.left as f32;
        points.push((0.0, mid_y + t));
        push_cubic(
            &mut points,
            (0.0, mid_y + t),
            (bump, mid_y + t),
            (bump, mid_y - t),
            (0.0, mid_y - t),
        );
    }
    points
}

/// Even-odd point in polygon test.
pub fn point_in_polygon(x: f32, y: f32, polygon: &[(f32, f32)]) -> bool {
    let count = polygon.len();
    if count < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = count - 1;
    for i in 0..count {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) {
            let cross_x = xj + (y - yj) * (xi - xj) / (yi - yj);
            if x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
