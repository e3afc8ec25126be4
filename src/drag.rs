use tracing::debug;

use jigsnap_core::{try_resolve_snaps, PieceId, PieceStore, SnapEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// What a pointer release did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// No drag was active, or input is gated.
    Ignored,
    /// The group was dropped where it is.
    Released,
    Snapped(SnapEvent),
}

impl DragOutcome {
    pub fn snap(&self) -> Option<&SnapEvent> {
        match self {
            DragOutcome::Snapped(event) => Some(event),
            _ => None,
        }
    }
}

/// The gesture in progress. Offsets are `pointer - position` per member,
/// recorded at pointer-down.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub primary_id: PieceId,
    pub members: Vec<PieceId>,
    pub offsets: Vec<(f32, f32)>,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    active: Option<DragState>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        if self.active.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&DragState> {
        self.active.as_ref()
    }

    /// Picks up the whole group of `piece_id`. Returns the sorted members, or
    /// `None` when a gesture is already running or the piece does not exist.
    pub fn begin(
        &mut self,
        store: &PieceStore,
        piece_id: PieceId,
        x: f32,
        y: f32,
    ) -> Option<&[PieceId]> {
        if self.active.is_some() {
            debug!(piece_id, "pointer down ignored, drag already active");
            return None;
        }
        store.piece(piece_id)?;
        let mut members = store.group_of(piece_id);
        if members.is_empty() {
            members.push(piece_id);
        }
        let offsets = members
            .iter()
            .map(|id| {
                let pos = store.position(*id).unwrap_or((x, y));
                (x - pos.0, y - pos.1)
            })
            .collect();
        debug!(piece_id, members = members.len(), "drag started");
        let drag = self.active.insert(DragState {
            primary_id: piece_id,
            members,
            offsets,
        });
        Some(drag.members.as_slice())
    }

    /// Moves every member to `pointer - offset`. Returns false when idle.
    pub fn drag_move(&mut self, store: &mut PieceStore, x: f32, y: f32) -> bool {
        let Some(drag) = self.active.as_ref() else {
            return false;
        };
        for (id, offset) in drag.members.iter().zip(&drag.offsets) {
            store.set_position(*id, (x - offset.0, y - offset.1));
        }
        true
    }

    /// Ends the gesture where it is and runs the snap resolver on the moved
    /// group.
    pub fn release(
        &mut self,
        store: &mut PieceStore,
        tolerance: f32,
        link_aligned: bool,
    ) -> DragOutcome {
        let Some(drag) = self.active.take() else {
            return DragOutcome::Ignored;
        };
        match try_resolve_snaps(store, &drag.members, tolerance, link_aligned) {
            Some(event) => DragOutcome::Snapped(event),
            None => {
                debug!(piece_id = drag.primary_id, "released without snap");
                DragOutcome::Released
            }
        }
    }

    /// Drops the gesture without touching positions.
    pub fn cancel(&mut self) -> Option<DragState> {
        self.active.take()
    }
}
