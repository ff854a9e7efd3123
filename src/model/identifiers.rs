//! Node identifier newtype and the id generation capability.
//!
//! `NodeId` validates non-empty strings at construction time. Fresh ids are
//! never minted ad hoc: every constructor that creates a node takes an
//! [`IdGenerator`], so the editor stays deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one node in a layout tree.
///
/// Unique within a tree at all times.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidNodeId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidNodeId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = InvalidNodeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Rejected node id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNodeId {
    /// Id was empty or whitespace.
    #[error("Node ID cannot be empty")]
    Empty,
}

// ===== Id generation =====

/// Source of fresh node ids.
///
/// Injected into everything that creates nodes.
pub trait IdGenerator {
    /// Produce an id never returned before by this generator.
    fn next_id(&mut self) -> NodeId;
}

/// Random v4 UUIDs. Used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> NodeId {
        NodeId(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic `prefix + counter` ids (`n1`, `n2`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Counter starting at 1 with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("n")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let current = self.next;
        self.next = self.next.saturating_add(1);
        NodeId(format!("{}{}", self.prefix, current))
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> NodeId {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> NodeId {
        (**self).next_id()
    }
}

// ===== Tests =====
