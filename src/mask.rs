use jigsnap_core::outline::{piece_outline, point_in_polygon, tab_size};
use jigsnap_core::{PieceId, PieceStore};

/// Alpha above which a mask pixel counts as part of the piece.
pub const ALPHA_HIT_THRESHOLD: u8 = 16;

/// Single channel opacity mask of one piece. `origin` is where the piece's
/// top-left cell corner lands inside the mask, so tabs fit in the padding.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceMask {
    width: u32,
    height: u32,
    origin: (f32, f32),
    alpha: Vec<u8>,
}

impl PieceMask {
    /// Wraps alpha supplied by a renderer. Returns `None` when the buffer does
    /// not hold exactly `width * height` samples.
    pub fn from_alpha(width: u32, height: u32, origin: (f32, f32), alpha: Vec<u8>) -> Option<Self> {
        if alpha.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            origin,
            alpha,
        })
    }

    /// Fills the outline polygon, sampling at pixel centers.
    pub fn rasterize(
        outline: &[(f32, f32)],
        piece_width: f32,
        piece_height: f32,
        padding: f32,
    ) -> Self {
        let pad = padding.max(0.0).ceil();
        let width = (piece_width.max(0.0) + pad * 2.0).ceil() as u32;
        let height = (piece_height.max(0.0) + pad * 2.0).ceil() as u32;
        let mut alpha = vec![0u8; width as usize * height as usize];
        for py in 0..height {
            let local_y = py as f32 + 0.5 - pad;
            let row = py as usize * width as usize;
            for px in 0..width {
                let local_x = px as f32 + 0.5 - pad;
                if point_in_polygon(local_x, local_y, outline) {
                    alpha[row + px as usize] = u8::MAX;
                }
            }
        }
        Self {
            width,
            height,
            origin: (pad, pad),
            alpha,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Alpha under a point given relative to the piece's top-left corner.
    /// Anything outside the mask is transparent.
    pub fn alpha_at(&self, local_x: f32, local_y: f32) -> u8 {
        let mask_x = (self.origin.0 + local_x).floor();
        let mask_y = (self.origin.1 + local_y).floor();
        if !mask_x.is_finite() || !mask_y.is_finite() || mask_x < 0.0 || mask_y < 0.0 {
            return 0;
        }
        let (mask_x, mask_y) = (mask_x as u32, mask_y as u32);
        if mask_x >= self.width || mask_y >= self.height {
            return 0;
        }
        let idx = mask_y as usize * self.width as usize + mask_x as usize;
        self.alpha.get(idx).copied().unwrap_or(0)
    }

    pub fn is_opaque(&self, local_x: f32, local_y: f32) -> bool {
        self.alpha_at(local_x, local_y) > ALPHA_HIT_THRESHOLD
    }
}

/// One mask per piece, indexed by piece id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaskAtlas {
    masks: Vec<PieceMask>,
}

impl MaskAtlas {
    pub fn build(store: &PieceStore) -> Self {
        let (piece_width, piece_height) = (store.piece_width(), store.piece_height());
        let padding = tab_size(piece_width, piece_height);
        let masks = store
            .pieces()
            .iter()
            .map(|piece| {
                let outline = piece_outline(&piece.edges, piece_width, piece_height);
                PieceMask::rasterize(&outline, piece_width, piece_height, padding)
            })
            .collect();
        Self { masks }
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn get(&self, id: PieceId) -> Option<&PieceMask> {
        self.masks.get(id)
    }

    pub fn replace(&mut self, id: PieceId, mask: PieceMask) -> bool {
        match self.masks.get_mut(id) {
            Some(slot) => {
                *slot = mask;
                true
            }
            None => false,
        }
    }
}

/// Topmost piece whose silhouette covers the point. `z_order` runs back to
/// front.
pub fn pick_piece_at(
    x: f32,
    y: f32,
    store: &PieceStore,
    z_order: &[PieceId],
    atlas: &MaskAtlas,
) -> Option<PieceId> {
    for &piece_id in z_order.iter().rev() {
        let Some(pos) = store.position(piece_id) else {
            continue;
        };
        let Some(mask) = atlas.get(piece_id) else {
            continue;
        };
        if mask.is_opaque(x - pos.0, y - pos.1) {
            return Some(piece_id);
        }
    }
    None
}
