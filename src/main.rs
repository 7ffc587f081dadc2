//! Star Pieces entry point
//!
//! Headless demo driver: builds the campaign (or a custom level list from
//! JSON), then runs each level at a simulated 60 Hz with a scripted
//! auto-player that solves every minigame. Rendering goes into a recording
//! frame and sounds drain into the log, so the whole game can be watched
//! through `RUST_LOG=info`.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use star_pieces::consts::{FRAME_DT, PIECE_COUNT, TARGET_FPS};
use star_pieces::gfx::Frame;
use star_pieces::sim::{
    campaign, load_levels, standard_boundaries, standard_pieces, Cell, GameEvent, LevelConfig,
    PuzzleManager, SequencePhase, Variant,
};
use star_pieces::{AssetBundle, SoundQueue};

/// Frames between auto-player actions
const ACT_INTERVAL: u64 = 12;
/// Give up on a level after this much simulated time
const LEVEL_TIMEOUT_SECS: u64 = 300;

/// Scripted player that solves each minigame
struct AutoPlayer {
    /// Pending solution clicks per slot, last click at the end.
    /// Only sliding puzzles need a precomputed plan: replaying the
    /// scramble walk backwards unscrambles the board.
    sliding_plans: Vec<Vec<Cell>>,
}

impl AutoPlayer {
    fn new(manager: &PuzzleManager) -> Self {
        let sliding_plans = (0..PIECE_COUNT)
            .map(|i| match manager.slot(i).1.map(|mg| mg.variant()) {
                Some(Variant::Sliding(s)) => {
                    let trace = s.scramble_trace();
                    // Clicking the walk's empty-cell positions newest to
                    // oldest undoes it; the final position is where the
                    // empty already sits
                    trace[..trace.len() - 1].to_vec()
                }
                _ => Vec::new(),
            })
            .collect();
        Self { sliding_plans }
    }

    /// Produce at most one event per act interval, aimed at the first
    /// slot that still needs solving
    fn step(&mut self, manager: &PuzzleManager, ticks: u64) -> Option<GameEvent> {
        if ticks % ACT_INTERVAL != 0 {
            return None;
        }
        for i in 0..PIECE_COUNT {
            let (piece, minigame) = manager.slot(i);
            if !piece.is_interactable() {
                continue;
            }
            let Some(mg) = minigame else {
                continue;
            };
            if mg.is_won() {
                continue;
            }
            if let Some(pos) = self.next_move(i, mg.variant()) {
                return Some(GameEvent::PrimaryAction { pos });
            }
        }
        None
    }

    fn next_move(&mut self, slot: usize, variant: &Variant) -> Option<glam::Vec2> {
        match variant {
            Variant::Quiz(q) => {
                let correct = q.correct_answer().to_string();
                q.buttons()
                    .iter()
                    .find(|b| b.label == correct && !b.is_down())
                    .map(|b| b.rect.center())
            }
            Variant::Memory(m) => {
                if m.is_locked() || m.cards().is_empty() {
                    return None;
                }
                let flipped = m
                    .cards()
                    .iter()
                    .position(|c| c.flipped && !c.matched);
                match flipped {
                    // Second click: the flipped card's partner
                    Some(a) => m
                        .cards()
                        .iter()
                        .enumerate()
                        .find(|(i, c)| *i != a && c.pair == m.cards()[a].pair)
                        .map(|(_, c)| c.rect.center()),
                    // First click: any face-down card
                    None => m
                        .cards()
                        .iter()
                        .find(|c| !c.flipped && !c.matched)
                        .map(|c| c.rect.center()),
                }
            }
            Variant::Sliding(s) => {
                if s.is_sliding() {
                    return None;
                }
                let cell = self.sliding_plans[slot].pop()?;
                Some(s.cell_rect(cell).center())
            }
            Variant::Sequence(s) => match s.phase() {
                SequencePhase::Waiting => Some(s.start_button().rect.center()),
                SequencePhase::Input => {
                    let next = s.sequence()[s.entered().len()];
                    Some(s.pad_center(next))
                }
                SequencePhase::Showing | SequencePhase::Finished => None,
            },
        }
    }
}

/// Run one level to completion; returns simulated seconds taken
fn run_level(level: &LevelConfig, level_seed: u64, assets: &Rc<AssetBundle>) -> f64 {
    let minigames = level.instantiate(level_seed, assets);
    let mut manager =
        PuzzleManager::new(standard_pieces(assets), minigames, standard_boundaries());
    let mut player = AutoPlayer::new(&manager);
    let mut sounds = SoundQueue::new();
    let mut frame = Frame::new();

    let max_ticks = TARGET_FPS as u64 * LEVEL_TIMEOUT_SECS;
    let mut now = 0.0;
    let mut ticks = 0u64;

    while !manager.is_all_pieces_collected() {
        ticks += 1;
        now += FRAME_DT;

        if let Some(event) = player.step(&manager, ticks) {
            manager.handle_event(&event, now, &mut sounds);
        }
        manager.update(now, &mut sounds);

        frame.clear();
        manager.draw(&mut frame);

        for (effect, vol) in sounds.drain() {
            log::debug!("sfx {effect:?} at {vol:.2}");
        }

        if ticks >= max_ticks {
            log::error!("level stuck after {LEVEL_TIMEOUT_SECS}s simulated, giving up");
            std::process::exit(1);
        }
    }

    ticks as f64 * FRAME_DT
}

fn load_custom_levels(path: &str, assets: &AssetBundle) -> Vec<LevelConfig> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            log::error!("cannot read {path}: {err}");
            std::process::exit(1);
        }
    };
    let levels = match load_levels(&json) {
        Ok(levels) => levels,
        Err(err) => {
            log::error!("cannot parse {path}: {err}");
            std::process::exit(1);
        }
    };
    for (i, level) in levels.iter().enumerate() {
        let missing = level.missing_images(assets);
        if !missing.is_empty() {
            log::error!("level {} references unknown images: {missing:?}", i + 1);
            std::process::exit(1);
        }
        if level.minigames.len() != PIECE_COUNT {
            log::warn!(
                "level {} has {} minigames; pieces without one can never be collected",
                i + 1,
                level.minigames.len()
            );
        }
    }
    levels
}

fn main() {
    env_logger::init();

    let mut seed: Option<u64> = None;
    let mut level_path: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().and_then(|v| v.parse().ok());
                match value {
                    Some(v) => seed = Some(v),
                    None => {
                        log::error!("--seed needs a number");
                        std::process::exit(1);
                    }
                }
            }
            path => level_path = Some(path.to_string()),
        }
    }

    let assets = Rc::new(AssetBundle::standard());
    let levels = match &level_path {
        Some(path) => load_custom_levels(path, &assets),
        None => campaign(),
    };

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Star Pieces starting: {} levels, seed {seed}", levels.len());

    for (i, level) in levels.iter().enumerate() {
        let level_seed = (i as u64).wrapping_mul(2654435761).wrapping_add(seed);
        log::info!(
            "level {} starting (background {:?})",
            i + 1,
            level.background
        );
        let elapsed = run_level(level, level_seed, &assets);
        log::info!("level {} complete in {elapsed:.1}s simulated", i + 1);
    }

    log::info!("campaign complete");
}
