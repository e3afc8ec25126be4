use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, PuzzleResult};

pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLS: usize = 3;

pub const SNAP_TOLERANCE_DEFAULT: f32 = 30.0;
pub const SNAP_TOLERANCE_MIN: f32 = 5.0;
pub const SNAP_TOLERANCE_MAX: f32 = 120.0;

pub const CANVAS_WIDTH_DEFAULT: f32 = 900.0;
pub const CANVAS_HEIGHT_DEFAULT: f32 = 700.0;
pub const CANVAS_SIZE_MAX: f32 = 8192.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleRules {
    pub rows: usize,
    pub cols: usize,
    pub snap_tolerance: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub link_aligned_neighbors: bool,
    pub center_on_solve: bool,
    pub seed: Option<u64>,
}

impl Default for PuzzleRules {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            snap_tolerance: SNAP_TOLERANCE_DEFAULT,
            canvas_width: CANVAS_WIDTH_DEFAULT,
            canvas_height: CANVAS_HEIGHT_DEFAULT,
            link_aligned_neighbors: false,
            center_on_solve: true,
            seed: None,
        }
    }
}

impl PuzzleRules {
    pub fn from_toml_str(contents: &str) -> PuzzleResult<Self> {
        let rules: PuzzleRules =
            toml::from_str(contents).map_err(|err| PuzzleError::Config(err.to_string()))?;
        Ok(rules.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        self.snap_tolerance = if self.snap_tolerance.is_finite() {
            self.snap_tolerance
                .clamp(SNAP_TOLERANCE_MIN, SNAP_TOLERANCE_MAX)
        } else {
            SNAP_TOLERANCE_DEFAULT
        };
        self.canvas_width =
            finite_or(self.canvas_width, CANVAS_WIDTH_DEFAULT).clamp(1.0, CANVAS_SIZE_MAX);
        self.canvas_height =
            finite_or(self.canvas_height, CANVAS_HEIGHT_DEFAULT).clamp(1.0, CANVAS_SIZE_MAX);
        self
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules =
            PuzzleRules::from_toml_str("rows = 4\nsnap_tolerance = 500.0\n").expect("rules");
        assert_eq!(rules.rows, 4);
        assert_eq!(rules.cols, DEFAULT_COLS);
        assert_eq!(rules.snap_tolerance, SNAP_TOLERANCE_MAX);
        assert!(rules.center_on_solve);
        assert_eq!(rules.seed, None);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = PuzzleRules::from_toml_str("rows = \"many\"").unwrap_err();
        assert!(matches!(err, PuzzleError::Config(_)));
    }

    #[test]
    fn sanitize_clamps_canvas() {
        let rules = PuzzleRules {
            canvas_width: -4.0,
            canvas_height: f32::NAN,
            snap_tolerance: 1.0,
            ..PuzzleRules::default()
        }
        .sanitized();
        assert_eq!(rules.canvas_width, 1.0);
        assert_eq!(rules.canvas_height, CANVAS_HEIGHT_DEFAULT);
        assert_eq!(rules.snap_tolerance, SNAP_TOLERANCE_MIN);
    }
    #[test]
    fn oversized_canvas_is_capped() {
        let toml = "canvas_width = 1e6\ncanvas_height = 9000.0\n";
        let rules = PuzzleRules::from_toml_str(toml).expect("rules");
        assert_eq!(rules.canvas_width, CANVAS_SIZE_MAX);
        assert_eq!(rules.canvas_height, CANVAS_SIZE_MAX);

        let rules = PuzzleRules {
            canvas_width: f32::INFINITY,
            ..PuzzleRules::default()
        }
        .sanitized();
        assert_eq!(rules.canvas_width, CANVAS_WIDTH_DEFAULT);
    }
}
