use tracing::debug;

use crate::game::{grid_step, neighbor_id, PieceId, DIR_DOWN, DIR_LEFT, DIR_RIGHT, DIR_UP};
use crate::state::PieceStore;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    /// Translation that puts the moving piece exactly beside its neighbor.
    pub correction: (f32, f32),
    /// Absolute per-axis distance from the aligned position.
    pub deviation: (f32, f32),
}

impl Alignment {
    pub fn within(&self, tolerance: f32) -> bool {
        self.deviation.0 < tolerance && self.deviation.1 < tolerance
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapEvent {
    pub member: PieceId,
    pub neighbor: PieceId,
    pub delta: (f32, f32),
    pub extra_links: usize,
}

/// Alignment of `piece` against `other`, or `None` when the cells do not share
/// an edge in the grid.
pub fn alignment(store: &PieceStore, piece: PieceId, other: PieceId) -> Option<Alignment> {
    let p = store.piece(piece)?;
    let o = store.piece(other)?;
    let (dx, dy) = grid_step((p.grid_x, p.grid_y), (o.grid_x, o.grid_y))?;
    let expected = (
        o.position.0 + dx as f32 * store.piece_width(),
        o.position.1 + dy as f32 * store.piece_height(),
    );
    let correction = (expected.0 - p.position.0, expected.1 - p.position.1);
    Some(Alignment {
        correction,
        deviation: (correction.0.abs(), correction.1.abs()),
    })
}

/// Grid neighbors of `id`, lowest id first.
fn neighbors_in_order(id: PieceId, cols: usize, rows: usize) -> [Option<PieceId>; 4] {
    [DIR_UP, DIR_LEFT, DIR_RIGHT, DIR_DOWN].map(|dir| neighbor_id(id, cols, rows, dir))
}

/// Looks for the first grid neighbor outside the moving group that lies within
/// `tolerance`, moves the whole group onto it and merges the two groups.
/// Members and candidates are scanned in piece creation order; at most one
/// snap is committed.
pub fn try_resolve_snaps(
    store: &mut PieceStore,
    members: &[PieceId],
    tolerance: f32,
    link_aligned: bool,
) -> Option<SnapEvent> {
    let total = store.len();
    if members.is_empty() || total == 0 {
        return None;
    }
    let mut ordered: Vec<PieceId> = members.iter().copied().filter(|id| *id < total).collect();
    ordered.sort_unstable();
    ordered.dedup();
    let mut in_group = vec![false; total];
    for id in &ordered {
        in_group[*id] = true;
    }

    let (cols, rows) = (store.cols(), store.rows());
    let mut found = None;
    'scan: for &member in &ordered {
        for other in neighbors_in_order(member, cols, rows).into_iter().flatten() {
            if in_group[other] {
                continue;
            }
            let Some(aligned) = alignment(store, member, other) else {
                continue;
            };
            if aligned.within(tolerance) && !store.same_group(member, other) {
                found = Some((member, other, aligned.correction));
                break 'scan;
            }
        }
    }

    let (member, neighbor, delta) = found?;
    store.translate(&ordered, delta);
    store.merge(member, neighbor);
    debug!(member, neighbor, dx = delta.0, dy = delta.1, "snapped");
    let extra_links = if link_aligned {
        link_aligned_neighbors(store, &ordered, tolerance)
    } else {
        0
    };
    Some(SnapEvent {
        member,
        neighbor,
        delta,
        extra_links,
    })
}

/// Merges every remaining grid neighbor that already sits within tolerance of
/// the moved pieces, without moving anything. Returns the number of merges.
pub fn link_aligned_neighbors(
    store: &mut PieceStore,
    members: &[PieceId],
    tolerance: f32,
) -> usize {
    let total = store.len();
    let (cols, rows) = (store.cols(), store.rows());
    let mut in_group = vec![false; total];
    for &member in members {
        if member < total && !in_group[member] {
            for id in store.group_of(member) {
                in_group[id] = true;
            }
        }
    }
    let mut merged = 0;
    for &member in members.iter().filter(|id| **id < total) {
        for other in neighbors_in_order(member, cols, rows).into_iter().flatten() {
            if in_group[other] {
                continue;
            }
            let within = alignment(store, member, other)
                .map(|aligned| aligned.within(tolerance))
                .unwrap_or(false);
            if within && store.merge(member, other) {
                debug!(member, other, "linked aligned neighbor");
                for id in store.group_of(other) {
                    in_group[id] = true;
                }
                merged += 1;
            }
        }
    }
    merged
}

/// True when every piece belongs to the group of the first piece.
pub fn is_complete(store: &PieceStore) -> bool {
    store.links().is_fully_connected()
}

/// Translates the whole assembly so its bounding box sits in the middle of the
/// canvas. Returns the applied offset.
pub fn center_assembly(
    store: &mut PieceStore,
    canvas_width: f32,
    canvas_height: f32,
) -> (f32, f32) {
    let all: Vec<PieceId> = (0..store.len()).collect();
    let Some((min_x, min_y, max_x, max_y)) = store.bounds(&all) else {
        return (0.0, 0.0);
    };
    let target_x = (canvas_width - (max_x - min_x)) * 0.5;
    let target_y = (canvas_height - (max_y - min_y)) * 0.5;
    let offset = (target_x - min_x, target_y - min_y);
    store.translate(&all, offset);
    offset
}
