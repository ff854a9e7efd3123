//! Persisted record form of layouts and screen documents.
//!
//! Trees are stored as nested JSON records whose shape matches
//! [`LayoutNode`] exactly. Reading is tolerant: anything that does not parse
//! as a tree becomes a fresh leaf, and parsed trees are sanitized before the
//! editor ever sees them.

use super::error::DocumentError;
use super::identifiers::{IdGenerator, NodeId};
use super::layout_node::{Axis, LayoutNode, Ratio};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Current screen document schema version.
pub const DOCUMENT_VERSION: u32 = 1;

/// A screen as persisted by the editor binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenDocument {
    /// Schema version.
    pub version: u32,
    /// Human readable screen name.
    pub name: String,
    /// Time of the last committed change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Layout tree.
    pub layout: LayoutNode,
}

impl ScreenDocument {
    /// New document holding a single fresh leaf.
    pub fn new(name: impl Into<String>, ids: &mut dyn IdGenerator) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            name: name.into(),
            updated_at: None,
            layout: LayoutNode::new_leaf(ids),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentWire {
    Envelope(EnvelopeWire),
    Bare(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct EnvelopeWire {
    #[serde(default = "default_version", rename = "version")]
    _version: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    layout: serde_json::Value,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// Decode a layout record, falling back to a fresh leaf.
///
/// The result is always sanitized (see [`sanitize`]).
pub fn layout_from_value(value: serde_json::Value, ids: &mut dyn IdGenerator) -> LayoutNode {
    match decode_layout(value, ids) {
        Some(node) => node,
        None => LayoutNode::new_leaf(ids),
    }
}

fn decode_layout(value: serde_json::Value, ids: &mut dyn IdGenerator) -> Option<LayoutNode> {
    match serde_json::from_value::<LayoutNode>(value) {
        Ok(node) => Some(sanitize(node, ids)),
        Err(err) => {
            warn!(error = %err, "Malformed layout record, starting from an empty leaf");
            None
        }
    }
}

/// Decode a layout from JSON text, falling back to a fresh leaf.
pub fn layout_from_json(json: &str, ids: &mut dyn IdGenerator) -> LayoutNode {
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(value) => layout_from_value(value, ids),
        Err(err) => {
            warn!(error = %err, "Layout is not valid JSON, starting from an empty leaf");
            LayoutNode::new_leaf(ids)
        }
    }
}

/// Encode a layout as compact JSON.
pub fn layout_to_json(layout: &LayoutNode) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(layout)?)
}

/// Decode a screen document from JSON text.
///
/// Accepts the document envelope or a bare layout record. Never fails;
/// unusable input yields a document named `fallback_name` with a fresh leaf.
pub fn document_from_json(
    json: &str,
    fallback_name: &str,
    ids: &mut dyn IdGenerator,
) -> ScreenDocument {
    decode_document(json, fallback_name, ids).0
}

/// Decoded document plus whether its stored layout was unusable.
fn decode_document(
    json: &str,
    fallback_name: &str,
    ids: &mut dyn IdGenerator,
) -> (ScreenDocument, bool) {
    let (name, updated_at, value) = match serde_json::from_str::<DocumentWire>(json) {
        Ok(DocumentWire::Envelope(envelope)) => {
            let name = if envelope.name.is_empty() {
                fallback_name.to_string()
            } else {
                envelope.name
            };
            (name, envelope.updated_at, envelope.layout)
        }
        Ok(DocumentWire::Bare(value)) => (fallback_name.to_string(), None, value),
        Err(err) => {
            warn!(error = %err, "Screen document is not valid JSON, starting fresh");
            return (ScreenDocument::new(fallback_name, ids), true);
        }
    };
    let (layout, discarded) = match decode_layout(value, ids) {
        Some(layout) => (layout, false),
        None => (LayoutNode::new_leaf(ids), true),
    };
    let document = ScreenDocument {
        version: DOCUMENT_VERSION,
        name,
        updated_at,
        layout,
    };
    (document, discarded)
}

/// Path an unusable document is copied to before it can be overwritten.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    PathBuf::from(backup)
}

/// Load a screen document.
///
/// Returns `Ok(None)` when the file does not exist. A file whose layout
/// cannot be used is copied to [`backup_path`] first, since the next save
/// replaces it.
pub fn load_document(
    path: &Path,
    fallback_name: &str,
    ids: &mut dyn IdGenerator,
) -> Result<Option<ScreenDocument>, DocumentError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (document, discarded) = decode_document(&contents, fallback_name, ids);
    if discarded {
        let backup = backup_path(path);
        std::fs::write(&backup, contents.as_bytes()).map_err(|source| DocumentError::Write {
            path: backup.clone(),
            source,
        })?;
        warn!(
            path = ?path,
            backup = ?backup,
            "Unusable screen document copied aside; the first save replaces it"
        );
    }
    Ok(Some(document))
}

/// Write a screen document atomically (temp file, then rename).
pub fn save_document(path: &Path, document: &ScreenDocument) -> Result<(), DocumentError> {
    let json = serde_json::to_string_pretty(document)?;
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json.as_bytes()).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;
    debug!(path = ?path, "Screen document saved");
    Ok(())
}

// ===== Sanitizing =====

/// Restore tree invariants on a decoded tree.
///
/// - duplicate ids are replaced with fresh ones (first occurrence wins)
/// - splits stored with a degenerate ratio (exactly 0 or 100) collapse to
///   the child that still has area
pub fn sanitize(node: LayoutNode, ids: &mut dyn IdGenerator) -> LayoutNode {
    let mut seen = HashSet::new();
    sanitize_node(node, ids, &mut seen)
}

fn unique_id(id: NodeId, ids: &mut dyn IdGenerator, seen: &mut HashSet<NodeId>) -> NodeId {
    if seen.insert(id.clone()) {
        return id;
    }
    loop {
        let fresh = ids.next_id();
        if seen.insert(fresh.clone()) {
            debug!(duplicate = %id, replacement = %fresh, "Regenerated duplicate node id");
            return fresh;
        }
    }
}

fn sanitize_node(
    node: LayoutNode,
    ids: &mut dyn IdGenerator,
    seen: &mut HashSet<NodeId>,
) -> LayoutNode {
    let (axis, id, ratio, first, second) = match node {
        LayoutNode::Leaf { id, content } => {
            return LayoutNode::Leaf {
                id: unique_id(id, ids, seen),
                content,
            };
        }
        LayoutNode::VSplit {
            id,
            ratio,
            left,
            right,
        } => (Axis::Vertical, id, ratio, *left, *right),
        LayoutNode::HSplit {
            id,
            ratio,
            top,
            bottom,
        } => (Axis::Horizontal, id, ratio, *top, *bottom),
    };

    if ratio == Ratio::MIN {
        return sanitize_node(second, ids, seen);
    }
    if ratio == Ratio::MAX {
        return sanitize_node(first, ids, seen);
    }

    let id = unique_id(id, ids, seen);
    let first = sanitize_node(first, ids, seen);
    let second = sanitize_node(second, ids, seen);
    LayoutNode::split(axis, id, ratio, first, second)
}

// ===== Tests =====
