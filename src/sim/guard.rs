//! Single-slot contact dedup
//!
//! The engine keeps reporting contact-begin for the same pair on consecutive
//! steps until the bodies separate. Remembering the last accepted node is
//! enough to drop those repeats. Only one slot is kept: alternating contacts
//! (A, B, A, B) are each treated as new.

use super::scene::NodeId;

/// Remembers the non-ball node of the last accepted contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactGuard {
    last: Option<NodeId>,
}

impl ContactGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    /// Returns true if this node repeats the last accepted contact
    pub fn is_repeat(&self, node: NodeId) -> bool {
        self.last == Some(node)
    }

    /// Accept `node` unless it repeats the last contact; accepted nodes
    /// replace the slot
    pub fn admit(&mut self, node: NodeId) -> bool {
        if self.is_repeat(node) {
            return false;
        }
        self.last = Some(node);
        true
    }
}
