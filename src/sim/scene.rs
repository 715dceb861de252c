//! Scene nodes, collider categories and deferred effects
//!
//! The host engine owns the real scene graph; this module describes the
//! slice of it the responder needs (identity, category, visibility, velocity)
//! and provides an in-memory `SceneGraph` used by the headless driver and
//! tests. Deferred work is expressed as `DeferredEffect` values on a timer
//! queue advanced by the single-threaded driver clock.

use std::ops::BitOr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Physics category carried by every body in the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderCategory {
    Ball,
    Barrier,
    Brick,
    Paddle,
}

impl ColliderCategory {
    /// Bit used for this category in contact-test masks
    pub const fn bits(self) -> u32 {
        match self {
            ColliderCategory::Ball => 1 << 0,
            ColliderCategory::Barrier => 1 << 1,
            ColliderCategory::Brick => 1 << 2,
            ColliderCategory::Paddle => 1 << 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColliderCategory::Ball => "ball",
            ColliderCategory::Barrier => "barrier",
            ColliderCategory::Brick => "brick",
            ColliderCategory::Paddle => "paddle",
        }
    }
}

/// Set of categories a body reports contacts against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);
    /// What the ball is configured to report: barriers, bricks and paddle
    pub const BALL_CONTACTS: CategoryMask = CategoryMask(
        ColliderCategory::Barrier.bits()
            | ColliderCategory::Brick.bits()
            | ColliderCategory::Paddle.bits(),
    );

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, category: ColliderCategory) -> bool {
        self.0 & category.bits() != 0
    }
}

impl From<ColliderCategory> for CategoryMask {
    fn from(category: ColliderCategory) -> Self {
        CategoryMask(category.bits())
    }
}

impl BitOr for ColliderCategory {
    type Output = CategoryMask;

    fn bitor(self, rhs: Self) -> CategoryMask {
        CategoryMask(self.bits() | rhs.bits())
    }
}

impl BitOr<ColliderCategory> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: ColliderCategory) -> CategoryMask {
        CategoryMask(self.0 | rhs.bits())
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Self) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

/// Handle to a scene node; identity is the handle, not the name
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

/// A node in the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    /// Physics category (None for nodes without a physics body)
    pub category: Option<ColliderCategory>,
    /// Categories this body reports contact-begin events against
    pub contact_test: CategoryMask,
    pub hidden: bool,
    /// Physics body velocity (engine units)
    pub velocity: Vec3,
}

/// Work the responder asks the engine to run later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredEffect {
    /// Make a hidden node visible again
    Unhide(NodeId),
}

/// A scheduled effect waiting on the driver clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingEffect {
    /// Clock time (seconds) at which the effect fires
    pub due: f64,
    pub effect: DeferredEffect,
    /// Insertion order, breaks ties between equal `due` times
    seq: u64,
}

/// What the responder needs from the host scene
pub trait Scene {
    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode>;

    /// Run `effect` once after `delay_secs` on the driver's timeline
    fn schedule(&mut self, delay_secs: f32, effect: DeferredEffect);
}

/// In-memory scene graph with a deferred-effect timer queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    /// Nodes indexed by `NodeId`
    nodes: Vec<SceneNode>,
    /// Pending effects (unordered; drained by `advance`)
    pending: Vec<PendingEffect>,
    /// Driver clock (seconds); f64 so long sessions keep sub-frame precision
    clock: f64,
    next_seq: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a physics body
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode {
            id,
            name: name.into(),
            category: None,
            contact_test: CategoryMask::NONE,
            hidden: false,
            velocity: Vec3::ZERO,
        });
        id
    }

    /// Add a node with a physics body of the given category
    pub fn add_body(&mut self, name: impl Into<String>, category: ColliderCategory) -> NodeId {
        let id = self.add_node(name);
        let node = &mut self.nodes[id.0 as usize];
        node.category = Some(category);
        if category == ColliderCategory::Ball {
            node.contact_test = CategoryMask::BALL_CONTACTS;
        }
        id
    }

    /// First node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Nodes of one category, in id order
    pub fn nodes_in(&self, category: ColliderCategory) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(move |n| n.category == Some(category))
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn pending(&self) -> &[PendingEffect] {
        &self.pending
    }

    /// Advance the driver clock and apply every effect that became due
    ///
    /// Effects run in due order, ties in scheduling order. Returns how many ran.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.clock += f64::from(dt.max(0.0));
        let clock = self.clock;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= clock);
        self.pending = waiting;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));

        for pending in &due {
            self.apply(pending.effect);
        }
        due.len()
    }

    fn apply(&mut self, effect: DeferredEffect) {
        match effect {
            DeferredEffect::Unhide(id) => {
                // Node may have been removed by the host; visibility set is idempotent
                if let Some(node) = self.node_mut(id) {
                    node.hidden = false;
                }
            }
        }
    }
}

impl Scene for SceneGraph {
    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn schedule(&mut self, delay_secs: f32, effect: DeferredEffect) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingEffect {
            due: self.clock + f64::from(delay_secs.max(0.0)),
            effect,
            seq,
        });
    }
}
