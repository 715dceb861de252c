//! AR Breaker headless driver
//!
//! Stands in for the AR host: builds the play area, then runs a seeded
//! session where each frame advances the scene clock, reports a few contact
//! begins (the engine repeats a contact on consecutive steps until the bodies
//! separate) and fires the render tick.
//!
//! Usage: `ar-breaker [settings.json] [seed]`

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ar_breaker::game::Layout;
use ar_breaker::sim::{Contact, ContactOutcome, NodeId, Scene};
use ar_breaker::{Game, Settings};

/// Frame time (60 Hz render loop)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Simulated session length
const SESSION_FRAMES: u32 = 60 * 60 * 10;
/// Chance a frame starts a new contact
const CONTACT_CHANCE: f64 = 0.05;

const BRICK_ROWS: u32 = 4;
const BRICK_COLS: u32 = 6;

#[derive(Debug, Default)]
struct Tally {
    reported: u32,
    duplicates: u32,
    ignored: u32,
    bricks: u32,
    lives_lost: u32,
    game_overs: u32,
    deflections: u32,
}

impl Tally {
    fn record(&mut self, outcome: ContactOutcome) {
        self.reported += 1;
        match outcome {
            ContactOutcome::Ignored(_) => self.ignored += 1,
            ContactOutcome::Duplicate => self.duplicates += 1,
            ContactOutcome::BarrierHit => {}
            ContactOutcome::LifeLost { .. } => self.lives_lost += 1,
            ContactOutcome::GameOver { .. } => {
                self.lives_lost += 1;
                self.game_overs += 1;
            }
            ContactOutcome::BrickDestroyed { .. } => self.bricks += 1,
            ContactOutcome::PaddleDeflected { .. } => self.deflections += 1,
        }
    }
}

/// Pick the next body the ball touches
fn pick_target(rng: &mut Pcg32, game: &Game, layout: &Layout) -> Option<NodeId> {
    let roll = rng.random_range(0..10);
    let pool = match roll {
        0..=3 => &layout.paddle,
        4..=6 => &layout.bricks,
        _ => &layout.barriers,
    };
    let candidates: Vec<NodeId> = pool
        .iter()
        .copied()
        .filter(|id| game.scene().node(*id).is_some_and(|n| !n.hidden))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xB4EA_4E4u64);

    log::info!("AR Breaker starting (seed {})", seed);

    let (scene, layout) = Layout::build(&settings, BRICK_ROWS, BRICK_COLS);
    let mut game = match Game::with_scene(settings, scene) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut tally = Tally::default();
    // Contact still being reported by the engine: (target, frames left)
    let mut touching: Option<(NodeId, u32)> = None;

    for _ in 0..SESSION_FRAMES {
        game.advance(FRAME_DT);

        touching = match touching {
            Some((target, frames)) if frames > 0 => Some((target, frames - 1)),
            _ if rng.random_bool(CONTACT_CHANCE) => {
                pick_target(&mut rng, &game, &layout).map(|t| (t, rng.random_range(0..3)))
            }
            _ => None,
        };

        if let Some((target, _)) = touching {
            let contact = if rng.random_bool(0.5) {
                Contact::new(layout.ball, target)
            } else {
                Contact::new(target, layout.ball)
            };
            tally.record(game.on_contact_begin(contact));
        }

        game.on_render_tick();
    }

    let state = game.state();
    log::info!(
        "Session finished: {} contacts ({} duplicate, {} ignored), {} bricks, {} deflections, {} lives lost, {} game overs",
        tally.reported,
        tally.duplicates,
        tally.ignored,
        tally.bricks,
        tally.deflections,
        tally.lives_lost,
        tally.game_overs
    );
    log::info!(
        "Score {} lives {} best {}",
        state.score(),
        state.lives(),
        state.best_score()
    );
}
