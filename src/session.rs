use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use jigsnap_core::error::validate_dimensions;
use jigsnap_core::{
    center_assembly, generate_edge_grid, is_complete, EdgeGrid, Piece, PieceId, PieceStore,
    PuzzleError, PuzzleResult, PuzzleRules,
};

use crate::drag::{DragController, DragOutcome, DragPhase};
use crate::image::{ImageInfo, ImageSource};
use crate::mask::{pick_piece_at, MaskAtlas, PieceMask};

/// Emitted once when the last group merges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolvedEvent {
    pub pieces: usize,
    pub moves: usize,
    /// Translation applied to center the finished picture, zero when
    /// centering is off.
    pub offset: (f32, f32),
}

pub type SolvedSubscriber = Rc<dyn Fn(&SolvedEvent)>;

/// One puzzle from image load to completion. Single-threaded: every call
/// runs to completion before the next pointer event is handled.
pub struct Session {
    rules: PuzzleRules,
    image: Option<ImageInfo>,
    rng: StdRng,
    edges: Option<EdgeGrid>,
    store: PieceStore,
    masks: MaskAtlas,
    z_order: Vec<PieceId>,
    drag: DragController,
    moves: usize,
    solved: bool,
    subscribers: Rc<RefCell<Vec<SolvedSubscriber>>>,
}

impl Session {
    pub fn new(rules: PuzzleRules) -> Self {
        let rules = rules.sanitized();
        let rng = rng_for(&rules);
        Self {
            rules,
            image: None,
            rng,
            edges: None,
            store: PieceStore::empty(),
            masks: MaskAtlas::default(),
            z_order: Vec::new(),
            drag: DragController::new(),
            moves: 0,
            solved: false,
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn rules(&self) -> &PuzzleRules {
        &self.rules
    }

    /// Replaces the rules used by the next generation. A seed restarts the
    /// random stream.
    pub fn set_rules(&mut self, rules: PuzzleRules) {
        let rules = rules.sanitized();
        if rules.seed.is_some() {
            self.rng = rng_for(&rules);
        }
        self.rules = rules;
    }

    pub fn set_grid(&mut self, rows: usize, cols: usize) {
        self.rules.rows = rows;
        self.rules.cols = cols;
    }

    pub fn image(&self) -> Option<ImageInfo> {
        self.image
    }

    /// Records the dimensions of a decoded image. The current puzzle is kept
    /// until the next `generate`.
    pub fn load_image<S: ImageSource + ?Sized>(&mut self, source: &S) -> PuzzleResult<ImageInfo> {
        let info = source.info().inspect_err(|err| {
            warn!(%err, "image rejected");
        })?;
        debug!(width = info.width, height = info.height, "image loaded");
        self.image = Some(info);
        Ok(info)
    }

    /// Cuts a fresh puzzle from the loaded image. Either everything is
    /// replaced or nothing is.
    pub fn generate(&mut self) -> PuzzleResult<()> {
        let Some(image) = self.image else {
            warn!("generate requested without an image");
            return Err(PuzzleError::NoImageLoaded);
        };
        let (rows, cols) = (self.rules.rows, self.rules.cols);
        validate_dimensions(rows, cols).inspect_err(|err| {
            warn!(%err, "generate rejected");
        })?;
        let edges = generate_edge_grid(rows, cols, &mut self.rng)?;
        let store = PieceStore::create_pieces(
            &edges,
            (image.width, image.height),
            (self.rules.canvas_width, self.rules.canvas_height),
            &mut self.rng,
        )?;
        let masks = MaskAtlas::build(&store);

        self.drag.cancel();
        self.z_order = (0..store.len()).collect();
        self.store.replace_all(store);
        self.masks = masks;
        self.edges = Some(edges);
        self.moves = 0;
        self.solved = false;
        info!(
            rows,
            cols,
            piece_width = self.store.piece_width(),
            piece_height = self.store.piece_height(),
            "puzzle generated"
        );
        Ok(())
    }

    pub fn has_puzzle(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn store(&self) -> &PieceStore {
        &self.store
    }

    pub fn pieces(&self) -> &[Piece] {
        self.store.pieces()
    }

    pub fn edge_grid(&self) -> Option<&EdgeGrid> {
        self.edges.as_ref()
    }

    /// Paint order, back to front.
    pub fn z_order(&self) -> &[PieceId] {
        &self.z_order
    }

    pub fn group_of(&self, piece: PieceId) -> Vec<PieceId> {
        self.store.group_of(piece)
    }

    pub fn group_count(&self) -> usize {
        self.store.links().group_count()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn masks(&self) -> &MaskAtlas {
        &self.masks
    }

    /// Swaps in renderer-provided opacity for hit testing.
    pub fn set_piece_mask(&mut self, piece: PieceId, mask: PieceMask) -> bool {
        self.masks.replace(piece, mask)
    }

    pub fn piece_at(&self, x: f32, y: f32) -> Option<PieceId> {
        pick_piece_at(x, y, &self.store, &self.z_order, &self.masks)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.solved || self.store.is_empty() {
            return false;
        }
        if self.drag.is_dragging() {
            debug!("pointer down ignored, drag already active");
            return false;
        }
        let Some(piece_id) = self.piece_at(x, y) else {
            return false;
        };
        let Some(members) = self.drag.begin(&self.store, piece_id, x, y) else {
            return false;
        };
        bring_members_to_front(&mut self.z_order, members);
        true
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.solved {
            return;
        }
        self.drag.drag_move(&mut self.store, x, y);
    }

    pub fn pointer_up(&mut self) -> DragOutcome {
        if self.solved || !self.drag.is_dragging() {
            return DragOutcome::Ignored;
        }
        let outcome = self.drag.release(
            &mut self.store,
            self.rules.snap_tolerance,
            self.rules.link_aligned_neighbors,
        );
        self.moves += 1;
        let merged = matches!(outcome, DragOutcome::Snapped(_));
        if (merged || self.store.len() == 1) && is_complete(&self.store) {
            self.finish();
        }
        outcome
    }

    pub fn subscribe(&self, subscriber: SolvedSubscriber) -> Subscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        Subscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn finish(&mut self) {
        self.solved = true;
        let offset = if self.rules.center_on_solve {
            center_assembly(&mut self.store, self.rules.canvas_width, self.rules.canvas_height)
        } else {
            (0.0, 0.0)
        };
        let event = SolvedEvent {
            pieces: self.store.len(),
            moves: self.moves,
            offset,
        };
        info!(pieces = event.pieces, moves = event.moves, "puzzle solved");
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)(&event);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PuzzleRules::default())
    }
}

/// Keeps a solved listener registered until dropped.
pub struct Subscription {
    subscriber: SolvedSubscriber,
    subscribers: Rc<RefCell<Vec<SolvedSubscriber>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

fn rng_for(rules: &PuzzleRules) -> StdRng {
    match rules.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn bring_members_to_front(order: &mut Vec<PieceId>, members: &[PieceId]) {
    if order.is_empty() || members.is_empty() {
        return;
    }
    let mut keep = Vec::with_capacity(order.len());
    for id in order.iter().copied() {
        if !members.contains(&id) {
            keep.push(id);
        }
    }
    keep.extend_from_slice(members);
    *order = keep;
}
