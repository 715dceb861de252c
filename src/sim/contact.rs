//! Contact classification and response
//!
//! Every contact-begin notification from the physics engine goes through
//! `ContactResponder::on_contact_begin`:
//! 1. find the non-ball participant (the "contact node")
//! 2. drop repeats of the last accepted contact node
//! 3. dispatch on its category (bottom barrier, brick, paddle segment)
//! 4. pin the ball speed
//!
//! Malformed contacts are ignored rather than reported: nothing here can fail
//! mid-frame.

use serde::{Deserialize, Serialize};

use super::guard::ContactGuard;
use super::plane::PlaneVector;
use super::scene::{ColliderCategory, DeferredEffect, NodeId, Scene};
use super::state::GameState;
use crate::settings::Settings;

/// Contact-begin notification: the two bodies that started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: NodeId,
    pub b: NodeId,
}

impl Contact {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }
}

/// Why a contact was dropped without effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// A participant handle does not resolve to a node
    UnknownNode,
    /// Neither participant is the ball
    NoBall,
    /// Both participants are named as the ball
    BallOnBall,
    /// Contact node has no physics category
    NoCategory,
    /// Contact node's category is outside the ball's contact-test mask
    NotTested,
}

/// Horizontal steering applied by a paddle segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    Left,
    Right,
    Straight,
}

/// What handling a contact did (for sound/effects hooks and tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    Ignored(IgnoreReason),
    /// Same contact node as the last accepted contact
    Duplicate,
    /// A barrier other than the bottom one
    BarrierHit,
    /// Bottom barrier with lives remaining
    LifeLost { lives: u8 },
    /// Bottom barrier took the last life; state was saved then reset
    GameOver { final_score: u64 },
    BrickDestroyed { brick: NodeId, score: u64 },
    PaddleDeflected { steer: Steer },
}

impl ContactOutcome {
    /// Whether the contact passed the guard and was applied
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ContactOutcome::Ignored(_) | ContactOutcome::Duplicate)
    }
}

/// Body categories the responder acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Barrier,
    Brick,
    Paddle,
}

impl Target {
    /// Ball-on-ball is never a gameplay contact
    fn from_category(category: ColliderCategory) -> Option<Self> {
        match category {
            ColliderCategory::Barrier => Some(Target::Barrier),
            ColliderCategory::Brick => Some(Target::Brick),
            ColliderCategory::Paddle => Some(Target::Paddle),
            ColliderCategory::Ball => None,
        }
    }
}

/// A contact that resolved to the ball and one tested body
struct Classified {
    ball: NodeId,
    other: NodeId,
    category: ColliderCategory,
    target: Target,
    name: String,
}

/// Collision classifier and responder
///
/// The dedup guard is its only state.
#[derive(Debug, Clone)]
pub struct ContactResponder {
    guard: ContactGuard,
    ball_name: String,
    bottom_barrier_name: String,
    left_paddle_name: String,
    right_paddle_name: String,
    /// Paddle steering step (radians)
    steer: f32,
    ball_speed: f32,
    brick_respawn_secs: f32,
}

impl ContactResponder {
    pub fn new(settings: &Settings) -> Self {
        Self {
            guard: ContactGuard::new(),
            ball_name: settings.ball_name.clone(),
            bottom_barrier_name: settings.bottom_barrier_name.clone(),
            left_paddle_name: settings.left_paddle_name.clone(),
            right_paddle_name: settings.right_paddle_name.clone(),
            steer: settings.steer_radians(),
            ball_speed: settings.ball_speed,
            brick_respawn_secs: settings.brick_respawn_secs,
        }
    }

    pub fn guard(&self) -> &ContactGuard {
        &self.guard
    }

    /// Handle one contact-begin notification
    pub fn on_contact_begin(
        &mut self,
        contact: Contact,
        state: &mut GameState,
        scene: &mut dyn Scene,
    ) -> ContactOutcome {
        let Classified {
            ball,
            other,
            category,
            target,
            name,
        } = match self.classify(contact, &*scene) {
            Ok(classified) => classified,
            Err(reason) => {
                log::trace!("Ignoring contact {:?}: {:?}", contact, reason);
                return ContactOutcome::Ignored(reason);
            }
        };

        if !self.guard.admit(other) {
            log::trace!("Duplicate contact with {:?}", other);
            return ContactOutcome::Duplicate;
        }

        let outcome = match target {
            Target::Barrier => self.hit_barrier(&name, state),
            Target::Brick => self.hit_brick(other, state, scene),
            Target::Paddle => self.hit_paddle(&name, ball, scene),
        };

        if let Some(ball) = scene.node_mut(ball) {
            ball.velocity.set_length(self.ball_speed);
        }

        log::debug!("Contact with {} ({}): {:?}", name, category.as_str(), outcome);
        outcome
    }

    /// Resolve the ball and the contact node, rejecting anything the ball
    /// does not test against
    fn classify(&self, contact: Contact, scene: &dyn Scene) -> Result<Classified, IgnoreReason> {
        let a = scene.node(contact.a).ok_or(IgnoreReason::UnknownNode)?;
        let b = scene.node(contact.b).ok_or(IgnoreReason::UnknownNode)?;

        let (ball, other) = match (a.name == self.ball_name, b.name == self.ball_name) {
            (true, false) => (a, b),
            (false, true) => (b, a),
            (true, true) => return Err(IgnoreReason::BallOnBall),
            (false, false) => return Err(IgnoreReason::NoBall),
        };

        let category = other.category.ok_or(IgnoreReason::NoCategory)?;
        if !ball.contact_test.contains(category) {
            return Err(IgnoreReason::NotTested);
        }
        let target = Target::from_category(category).ok_or(IgnoreReason::NotTested)?;

        Ok(Classified {
            ball: ball.id,
            other: other.id,
            category,
            target,
            name: other.name.clone(),
        })
    }

    fn hit_barrier(&self, name: &str, state: &mut GameState) -> ContactOutcome {
        if name != self.bottom_barrier_name {
            return ContactOutcome::BarrierHit;
        }

        state.decrement_lives();
        if state.lives() == 0 {
            let final_score = state.score();
            log::info!("Out of lives, final score {}", final_score);
            state.save_state();
            state.reset();
            ContactOutcome::GameOver { final_score }
        } else {
            log::info!("Life lost, {} remaining", state.lives());
            ContactOutcome::LifeLost {
                lives: state.lives(),
            }
        }
    }

    fn hit_brick(&self, brick: NodeId, state: &mut GameState, scene: &mut dyn Scene) -> ContactOutcome {
        state.increment_score();
        if let Some(node) = scene.node_mut(brick) {
            node.hidden = true;
        }
        scene.schedule(self.brick_respawn_secs, DeferredEffect::Unhide(brick));
        ContactOutcome::BrickDestroyed {
            brick,
            score: state.score(),
        }
    }

    fn hit_paddle(&self, name: &str, ball: NodeId, scene: &mut dyn Scene) -> ContactOutcome {
        let steer = if name == self.left_paddle_name {
            Steer::Left
        } else if name == self.right_paddle_name {
            Steer::Right
        } else {
            Steer::Straight
        };

        let delta = match steer {
            Steer::Left => -self.steer,
            Steer::Right => self.steer,
            Steer::Straight => 0.0,
        };
        if delta != 0.0 {
            if let Some(ball) = scene.node_mut(ball) {
                ball.velocity.rotate_angle(delta);
            }
        }

        ContactOutcome::PaddleDeflected { steer }
    }
}
