use std::path::PathBuf;

use jigsnap::{DragOutcome, ImageInfo, PieceId, Session};
use jigsnap_core::game::{neighbor_id, DIRECTIONS};
use jigsnap_core::PuzzleRules;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{err_msg, image_dimensions, load_rules, rng_from_seed};

const DRAG_STEPS: usize = 8;
const BOT_SEED_OFFSET: u64 = 0x9e37_79b9;
const GRAB_FRACTIONS: [f32; 3] = [0.5, 0.3, 0.7];

#[derive(clap::Args)]
pub(super) struct SolveArgs {
    /// Image to cut; only its header is read.
    #[arg(long)]
    image: PathBuf,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// TOML rules file; flags override its values.
    #[arg(long, env = "JIGSNAP_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 2000)]
    max_moves: usize,
    /// Per-axis drop error in pixels, must stay below the snap tolerance.
    #[arg(long, default_value_t = 4.0)]
    jitter: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct SolveReport {
    pub(super) pieces: usize,
    pub(super) moves: usize,
    pub(super) groups: usize,
    pub(super) solved: bool,
}

#[derive(Clone, Copy)]
struct BotRunConfig {
    max_moves: usize,
    jitter_px: f32,
}

/// Where the bot assembles the picture: to the right of the canvas, so
/// placed pieces never cover the ones still lying around.
#[derive(Clone, Copy, Debug)]
struct BotGeometry {
    cols: usize,
    rows: usize,
    piece_width: f32,
    piece_height: f32,
    origin: (f32, f32),
    tolerance: f32,
}

#[derive(Clone, Copy, Debug)]
struct DragPlan {
    piece_id: PieceId,
    grab: (f32, f32),
    target_pos: (f32, f32),
    jittered: bool,
}

pub(super) fn run(args: SolveArgs) -> Result<SolveReport, Box<dyn std::error::Error>> {
    let mut rules = load_rules(args.config.as_deref())?;
    if let Some(rows) = args.rows {
        rules.rows = rows;
    }
    if let Some(cols) = args.cols {
        rules.cols = cols;
    }
    if args.seed.is_some() {
        rules.seed = args.seed;
    }
    let rules = rules.sanitized();
    let config = BotRunConfig {
        max_moves: args.max_moves,
        jitter_px: args.jitter,
    };
    validate_bot_config(config, &rules)?;

    let (width, height) = image_dimensions(&args.image)?;
    info!(path = %args.image.display(), width, height, "image header read");
    let bot_seed = rules.seed.map(|seed| seed.wrapping_add(BOT_SEED_OFFSET));
    let mut session = Session::new(rules);
    session.load_image(&ImageInfo::new(width, height))?;
    session.generate()?;

    let mut rng = rng_from_seed(bot_seed);
    Ok(play(&mut session, config, &mut rng))
}

fn validate_bot_config(
    config: BotRunConfig,
    rules: &PuzzleRules,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.max_moves == 0 {
        return Err(err_msg("max-moves must be at least 1"));
    }
    if !config.jitter_px.is_finite() || config.jitter_px < 0.0 {
        return Err(err_msg("jitter must be a non-negative number"));
    }
    if config.jitter_px >= rules.snap_tolerance {
        return Err(err_msg(format!(
            "jitter {} must stay below the snap tolerance {}",
            config.jitter_px, rules.snap_tolerance
        )));
    }
    Ok(())
}

fn play(session: &mut Session, config: BotRunConfig, rng: &mut StdRng) -> SolveReport {
    let mut moves = 0;
    if let Some(geometry) = bot_geometry(session) {
        let anchor = session.z_order().last().copied();
        if let Some(anchor) = anchor {
            if let Some(grab) = grab_point(session, anchor) {
                let plan = DragPlan {
                    piece_id: anchor,
                    grab,
                    target_pos: slot_of(session, geometry, anchor),
                    jittered: false,
                };
                perform_drag(session, plan, config, rng);
                moves += 1;
            }
            while !session.is_solved() && moves < config.max_moves {
                let Some(plan) = choose_drag(session, geometry, anchor, rng) else {
                    warn!("no piece left to grab");
                    break;
                };
                perform_drag(session, plan, config, rng);
                moves += 1;
            }
        }
    }
    let report = SolveReport {
        pieces: session.pieces().len(),
        moves,
        groups: session.group_count(),
        solved: session.is_solved(),
    };
    info!(moves = report.moves, groups = report.groups, solved = report.solved, "bot finished");
    report
}

fn bot_geometry(session: &Session) -> Option<BotGeometry> {
    let store = session.store();
    if store.is_empty() {
        return None;
    }
    let rules = session.rules();
    Some(BotGeometry {
        cols: store.cols(),
        rows: store.rows(),
        piece_width: store.piece_width(),
        piece_height: store.piece_height(),
        origin: (rules.canvas_width + store.piece_width(), 0.0),
        tolerance: rules.snap_tolerance,
    })
}

fn slot_of(session: &Session, geometry: BotGeometry, piece_id: PieceId) -> (f32, f32) {
    let home = session
        .pieces()
        .get(piece_id)
        .map(|piece| piece.home)
        .unwrap_or((0.0, 0.0));
    (geometry.origin.0 + home.0, geometry.origin.1 + home.1)
}

/// First inner point of the piece where it is the topmost hit.
fn grab_point(session: &Session, piece_id: PieceId) -> Option<(f32, f32)> {
    let store = session.store();
    let pos = store.position(piece_id)?;
    for fy in GRAB_FRACTIONS {
        for fx in GRAB_FRACTIONS {
            let x = pos.0 + store.piece_width() * fx;
            let y = pos.1 + store.piece_height() * fy;
            if session.piece_at(x, y) == Some(piece_id) {
                return Some((x, y));
            }
        }
    }
    None
}

/// Prefers pieces that border the anchor's group, since dropping those at
/// their slot always snaps. Otherwise ferries a loose piece over to its slot.
fn choose_drag(
    session: &Session,
    geometry: BotGeometry,
    anchor: PieceId,
    rng: &mut StdRng,
) -> Option<DragPlan> {
    let total = session.pieces().len();
    let mut in_main = vec![false; total];
    for id in session.group_of(anchor) {
        in_main[id] = true;
    }
    let mut bordering = Vec::new();
    let mut loose = Vec::new();
    for piece_id in 0..total {
        if in_main[piece_id] {
            continue;
        }
        let Some(grab) = grab_point(session, piece_id) else {
            continue;
        };
        let target_pos = slot_of(session, geometry, piece_id);
        let plan = DragPlan {
            piece_id,
            grab,
            target_pos,
            jittered: true,
        };
        let touches_main = DIRECTIONS.iter().any(|dir| {
            neighbor_id(piece_id, geometry.cols, geometry.rows, *dir)
                .map(|neighbor| in_main[neighbor])
                .unwrap_or(false)
        });
        if touches_main {
            bordering.push(plan);
        } else if !near_slot(session, geometry, piece_id, target_pos) {
            loose.push(plan);
        }
    }
    let pool = if bordering.is_empty() { loose } else { bordering };
    if pool.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..pool.len());
    Some(pool[idx])
}

fn near_slot(
    session: &Session,
    geometry: BotGeometry,
    piece_id: PieceId,
    slot: (f32, f32),
) -> bool {
    session
        .store()
        .position(piece_id)
        .map(|pos| distance_2d(pos, slot) < geometry.tolerance)
        .unwrap_or(false)
}

fn perform_drag(
    session: &mut Session,
    plan: DragPlan,
    config: BotRunConfig,
    rng: &mut StdRng,
) -> DragOutcome {
    let Some(pos) = session.store().position(plan.piece_id) else {
        return DragOutcome::Ignored;
    };
    let offset = (plan.grab.0 - pos.0, plan.grab.1 - pos.1);
    if !session.pointer_down(plan.grab.0, plan.grab.1) {
        warn!(piece_id = plan.piece_id, "grab missed");
        return DragOutcome::Ignored;
    }
    let (jitter_x, jitter_y) = if plan.jittered && config.jitter_px > 0.0 {
        (
            rng.random_range(-config.jitter_px..=config.jitter_px),
            rng.random_range(-config.jitter_px..=config.jitter_px),
        )
    } else {
        (0.0, 0.0)
    };
    let release = (
        plan.target_pos.0 + offset.0 + jitter_x,
        plan.target_pos.1 + offset.1 + jitter_y,
    );
    for step in 1..=DRAG_STEPS {
        let t = step as f32 / DRAG_STEPS as f32;
        session.pointer_move(
            lerp_f32(plan.grab.0, release.0, t),
            lerp_f32(plan.grab.1, release.1, t),
        );
    }
    let outcome = session.pointer_up();
    debug!(piece_id = plan.piece_id, snapped = outcome.snap().is_some(), "bot drag");
    outcome
}

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn distance_2d(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn seeded_session(rows: usize, cols: usize, seed: u64) -> Session {
        let mut session = Session::new(PuzzleRules {
            rows,
            cols,
            seed: Some(seed),
            ..PuzzleRules::default()
        });
        session.load_image(&ImageInfo::new(800, 600)).expect("image");
        session.generate().expect("generate");
        session
    }

    #[test]
    fn bot_solves_seeded_puzzles() {
        for (rows, cols, seed) in [(3, 3, 1), (4, 5, 2), (1, 6, 3)] {
            let mut session = seeded_session(rows, cols, seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let config = BotRunConfig {
                max_moves: 10 * rows * cols,
                jitter_px: 6.0,
            };
            let report = play(&mut session, config, &mut rng);
            assert!(report.solved, "{rows}x{cols} not solved: {report:?}");
            assert_eq!(report.groups, 1);
            assert_eq!(report.pieces, rows * cols);
        }
    }

    #[test]
    fn move_budget_is_respected() {
        let mut session = seeded_session(4, 4, 9);
        let mut rng = StdRng::seed_from_u64(9);
        let config = BotRunConfig {
            max_moves: 3,
            jitter_px: 0.0,
        };
        let report = play(&mut session, config, &mut rng);
        assert_eq!(report.moves, 3);
        assert!(!report.solved);
    }

    #[test]
    fn jitter_must_stay_below_tolerance() {
        let rules = PuzzleRules::default();
        let config = BotRunConfig {
            max_moves: 10,
            jitter_px: rules.snap_tolerance,
        };
        assert!(validate_bot_config(config, &rules).is_err());
        let config = BotRunConfig {
            max_moves: 10,
            jitter_px: 2.0,
        };
        assert!(validate_bot_config(config, &rules).is_ok());
    }
}
