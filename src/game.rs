//! Host-facing facade
//!
//! Owns the single `GameState` of the session together with the responder,
//! the scene and the HUD, and exposes the entry points the AR host calls:
//! contact-begin, render tick, clock advance, reset and save.

use glam::Vec3;

use crate::error::BreakerResult;
use crate::hud::{HudDisplay, TextHud};
use crate::persistence::{JsonFileStore, MemoryStore, StateStore};
use crate::settings::Settings;
use crate::sim::{
    ColliderCategory, Contact, ContactOutcome, ContactResponder, GameState, NodeId, PlaneVector,
    Scene, SceneGraph, render_tick,
};
use crate::to_radians;

/// Handles to the nodes of the standard play area
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub ball: NodeId,
    /// Top, Bottom, Left, Right
    pub barriers: Vec<NodeId>,
    pub bottom: NodeId,
    /// Left, Center, Right
    pub paddle: Vec<NodeId>,
    pub bricks: Vec<NodeId>,
}

impl Layout {
    /// Build the standard play area: ball, four barriers, a three-segment
    /// paddle and a `rows` x `cols` brick grid
    pub fn build(settings: &Settings, rows: u32, cols: u32) -> (SceneGraph, Layout) {
        let mut scene = SceneGraph::new();
        scene.add_node("Board");

        let ball = scene.add_body(settings.ball_name.as_str(), ColliderCategory::Ball);
        let mut velocity = Vec3::X * settings.ball_speed;
        velocity.set_angle(to_radians(-60.0));
        if let Some(node) = scene.node_mut(ball) {
            node.velocity = velocity;
        }

        let mut barriers = Vec::with_capacity(4);
        let mut bottom = NodeId::default();
        for name in ["Top", settings.bottom_barrier_name.as_str(), "Left", "Right"] {
            let id = scene.add_body(name, ColliderCategory::Barrier);
            if name == settings.bottom_barrier_name {
                bottom = id;
            }
            barriers.push(id);
        }

        let paddle = [
            settings.left_paddle_name.as_str(),
            "Center",
            settings.right_paddle_name.as_str(),
        ]
        .into_iter()
        .map(|name| scene.add_body(name, ColliderCategory::Paddle))
        .collect();

        let bricks = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| scene.add_body(format!("Brick{}{}", row, col), ColliderCategory::Brick))
            .collect();

        let layout = Layout {
            ball,
            barriers,
            bottom,
            paddle,
            bricks,
        };
        (scene, layout)
    }
}

/// One AR breakout session
pub struct Game {
    settings: Settings,
    state: GameState,
    responder: ContactResponder,
    scene: SceneGraph,
    hud: Box<dyn HudDisplay>,
}

impl Game {
    /// Wire a session from explicit collaborators
    pub fn new(
        settings: Settings,
        scene: SceneGraph,
        store: Box<dyn StateStore>,
        hud: Box<dyn HudDisplay>,
    ) -> BreakerResult<Self> {
        settings.validate()?;
        let state = GameState::new(settings.initial_lives, store);
        let responder = ContactResponder::new(&settings);
        log::info!(
            "Game ready: {} lives, ball speed {}, {} nodes",
            settings.initial_lives,
            settings.ball_speed,
            scene.nodes().len()
        );
        Ok(Self {
            settings,
            state,
            responder,
            scene,
            hud,
        })
    }

    /// Wire a session with the default collaborators: a JSON store when
    /// `save_path` is set (memory otherwise) and a text HUD
    pub fn with_scene(settings: Settings, scene: SceneGraph) -> BreakerResult<Self> {
        let store: Box<dyn StateStore> = match &settings.save_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        Self::new(settings, scene, store, Box::new(TextHud::new()))
    }

    /// Contact-begin entry point
    pub fn on_contact_begin(&mut self, contact: Contact) -> ContactOutcome {
        self.responder
            .on_contact_begin(contact, &mut self.state, &mut self.scene)
    }

    /// Render-tick entry point
    pub fn on_render_tick(&mut self) {
        render_tick(&self.state, self.hud.as_mut());
    }

    /// Advance the scene clock, running due deferred effects
    pub fn advance(&mut self, dt: f32) -> usize {
        self.scene.advance(dt)
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn save_state(&mut self) {
        self.state.save_state();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn responder(&self) -> &ContactResponder {
        &self.responder
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudSnapshot;
    use crate::sim::IgnoreReason;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedHud(Rc<RefCell<Vec<HudSnapshot>>>);

    impl HudDisplay for SharedHud {
        fn show(&mut self, snapshot: HudSnapshot) {
            self.0.borrow_mut().push(snapshot);
        }
    }

    fn game(lives: u8) -> (Game, Layout, MemoryStore, SharedHud) {
        let settings = Settings {
            initial_lives: lives,
            ..Settings::default()
        };
        let (scene, layout) = Layout::build(&settings, 2, 3);
        let store = MemoryStore::new();
        let hud = SharedHud::default();
        let game = Game::new(settings, scene, Box::new(store.clone()), Box::new(hud.clone()))
            .unwrap();
        (game, layout, store, hud)
    }

    #[test]
    fn test_layout() {
        let (_game, layout, _, _) = game(3);
        assert_eq!(layout.barriers.len(), 4);
        assert_eq!(layout.paddle.len(), 3);
        assert_eq!(layout.bricks.len(), 6);
        assert!(layout.barriers.contains(&layout.bottom));
    }

    #[test]
    fn test_layout_ball_moves_at_speed() {
        let (game, layout, _, _) = game(3);
        let ball = game.scene().node(layout.ball).unwrap();
        assert!((ball.velocity.length() - 0.5).abs() < 1e-6);
        assert_eq!(ball.velocity.y, 0.0);
    }

    #[test]
    fn test_barrier_and_paddle_share_names() {
        // "Left" is both a wall and a paddle segment; dispatch goes by category
        let (mut game, layout, _, _) = game(3);
        let wall = layout.barriers[2];
        let paddle = layout.paddle[0];
        assert_eq!(game.scene().node(wall).unwrap().name, "Left");
        assert_eq!(game.scene().node(paddle).unwrap().name, "Left");

        assert_eq!(
            game.on_contact_begin(Contact::new(layout.ball, wall)),
            ContactOutcome::BarrierHit
        );
        assert!(matches!(
            game.on_contact_begin(Contact::new(layout.ball, paddle)),
            ContactOutcome::PaddleDeflected { .. }
        ));
    }

    #[test]
    fn test_game_over_scenario() {
        let (mut game, layout, store, hud) = game(1);
        game.on_contact_begin(Contact::new(layout.ball, layout.bricks[0]));
        game.on_render_tick();

        let outcome = game.on_contact_begin(Contact::new(layout.bottom, layout.ball));
        assert_eq!(outcome, ContactOutcome::GameOver { final_score: 1 });
        assert_eq!(store.len(), 1);
        assert_eq!(game.state().lives(), 1);
        assert_eq!(game.state().score(), 0);

        game.on_render_tick();
        assert_eq!(
            *hud.0.borrow(),
            vec![
                HudSnapshot { score: 1, lives: 1 },
                HudSnapshot { score: 0, lives: 1 },
            ]
        );
    }

    #[test]
    fn test_brick_respawns_after_cooldown() {
        let (mut game, layout, _, _) = game(3);
        let brick = layout.bricks[4];
        game.on_contact_begin(Contact::new(layout.ball, brick));
        assert!(game.scene().node(brick).unwrap().hidden);

        assert_eq!(game.advance(60.0), 0);
        // Reset does not cancel the pending respawn
        game.reset();
        assert_eq!(game.advance(60.0), 1);
        assert!(!game.scene().node(brick).unwrap().hidden);
    }

    #[test]
    fn test_external_reset_and_save() {
        let (mut game, layout, store, _) = game(3);
        game.on_contact_begin(Contact::new(layout.ball, layout.bricks[0]));
        game.on_contact_begin(Contact::new(layout.ball, layout.bottom));
        game.save_state();
        game.reset();

        assert_eq!(store.saves()[0].lives, 2);
        assert_eq!(store.saves()[0].scores.last_score, 1);
        assert_eq!(game.state().lives(), 3);
        assert_eq!(game.state().score(), 0);
        // Guard is not part of the state reset
        assert_eq!(
            game.on_contact_begin(Contact::new(layout.ball, layout.bottom)),
            ContactOutcome::Duplicate
        );
        assert_eq!(game.responder().guard().last(), Some(layout.bottom));
    }

    #[test]
    fn test_render_tick_does_not_mutate() {
        let (mut game, layout, _, _) = game(3);
        game.on_contact_begin(Contact::new(layout.ball, layout.bricks[1]));
        for _ in 0..10 {
            game.on_render_tick();
        }
        assert_eq!(game.state().score(), 1);
        assert_eq!(game.state().lives(), 3);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            initial_lives: 0,
            ..Settings::default()
        };
        let (scene, _) = Layout::build(&Settings::default(), 1, 1);
        assert!(Game::with_scene(settings, scene).is_err());
    }

    #[test]
    fn test_contact_without_ball_ignored() {
        let (mut game, layout, _, _) = game(3);
        assert_eq!(
            game.on_contact_begin(Contact::new(layout.bricks[0], layout.paddle[1])),
            ContactOutcome::Ignored(IgnoreReason::NoBall)
        );
    }
}
