//! Collision-response core
//!
//! All gameplay decisions live here. This module must stay free of engine
//! dependencies:
//! - Contacts arrive as handle pairs, never as engine objects
//! - Deferred work is a `DeferredEffect` value, not a closure
//! - Single-threaded: every entry point runs on the driver loop

pub mod contact;
pub mod guard;
pub mod plane;
pub mod scene;
pub mod state;
pub mod tick;

pub use contact::{Contact, ContactOutcome, ContactResponder, IgnoreReason, Steer};
pub use guard::ContactGuard;
pub use plane::PlaneVector;
pub use scene::{
    CategoryMask, ColliderCategory, DeferredEffect, NodeId, PendingEffect, Scene, SceneGraph,
    SceneNode,
};
pub use state::GameState;
pub use tick::render_tick;
