// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The abstract scene-graph host capability set.
//!
//! The engine never owns scene state; it reads and mutates a live host
//! through [`SceneGraph`]. [`memory::MemoryScene`] is the shipped reference
//! implementation and the one the test suite runs against.

use std::fmt;

use crate::model::{AttrDefinition, AttrKind, AttrName, AttrValue, NodeId, Plug};

pub mod memory;

pub use memory::MemoryScene;

/// The plugs of a freshly synthesized two-input blend node.
///
/// `output` carries the weighted mix of `input_a` and `input_b`; the blend's
/// weight is host business and defaults to an even mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendPlugs {
    pub input_a: Plug,
    pub input_b: Plug,
    pub output: Plug,
}

/// Capabilities a scene-graph host must supply.
///
/// Mirrors the surface of a DCC node graph: typed attribute creation and
/// deletion, per-plug value/lock access, ordered connection introspection,
/// and point-to-point connection mutation. Attribute deletion severs that
/// attribute's connections at the host level. Newly created attributes append
/// at the end of the node's user-attribute order.
pub trait SceneGraph {
    fn node_exists(&self, node: &NodeId) -> bool;

    fn has_attribute(&self, node: &NodeId, attr: &AttrName) -> bool;

    /// Ordered top-level user-defined attribute names (compound children are
    /// not listed; the parent occupies one slot).
    fn user_attributes(&self, node: &NodeId) -> Result<Vec<AttrName>, HostError>;

    /// Single-level metadata for one attribute.
    fn attribute_definition(&self, plug: &Plug) -> Result<AttrDefinition, HostError>;

    /// Compound child names in axis order; empty for non-compound kinds.
    fn attribute_children(&self, plug: &Plug) -> Result<Vec<AttrName>, HostError>;

    /// Current value, `None` for valueless kinds (dividers).
    fn value(&self, plug: &Plug) -> Result<Option<AttrValue>, HostError>;

    fn set_value(&mut self, plug: &Plug, value: AttrValue) -> Result<(), HostError>;

    fn is_locked(&self, plug: &Plug) -> Result<bool, HostError>;

    fn set_locked(&mut self, plug: &Plug, locked: bool) -> Result<(), HostError>;

    /// Ordered upstream endpoints currently driving `plug`.
    fn inputs(&self, plug: &Plug) -> Result<Vec<Plug>, HostError>;

    /// Ordered downstream endpoints currently driven by `plug`.
    fn outputs(&self, plug: &Plug) -> Result<Vec<Plug>, HostError>;

    /// Connect `from` to `to`. With `force`, an existing input on `to` is
    /// replaced; without it, an occupied destination is an error.
    fn connect(&mut self, from: &Plug, to: &Plug, force: bool) -> Result<(), HostError>;

    /// Sever every connection touching `plug`, in both directions.
    fn disconnect_all(&mut self, plug: &Plug) -> Result<(), HostError>;

    /// Create a user-defined attribute. Compound children are created one
    /// call each, parent first, with `definition.parent()` set.
    fn add_attribute(&mut self, node: &NodeId, definition: AttrDefinition)
        -> Result<(), HostError>;

    /// Delete an attribute (and, for compounds, its children), severing their
    /// connections. Deleting a locked attribute is refused.
    fn delete_attribute(&mut self, node: &NodeId, attr: &AttrName) -> Result<(), HostError>;

    /// Synthesize a two-input blend node, scalar or triple-channel.
    fn create_blend_node(&mut self, triple: bool) -> Result<BlendPlugs, HostError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    UnknownNode { node: NodeId },
    UnknownAttribute { plug: Plug },
    DuplicateAttribute { node: NodeId, attr: AttrName },
    MissingParent { node: NodeId, parent: AttrName },
    LockedPlug { plug: Plug },
    KindMismatch { plug: Plug, expected: AttrKind, found: AttrKind },
    CompoundValue { plug: Plug },
    InputOccupied { to: Plug },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { node } => write!(f, "node '{node}' does not exist"),
            Self::UnknownAttribute { plug } => write!(f, "attribute '{plug}' does not exist"),
            Self::DuplicateAttribute { node, attr } => {
                write!(f, "node '{node}' already has an attribute '{attr}'")
            }
            Self::MissingParent { node, parent } => {
                write!(f, "compound parent '{parent}' does not exist on node '{node}'")
            }
            Self::LockedPlug { plug } => write!(f, "plug '{plug}' is locked"),
            Self::KindMismatch {
                plug,
                expected,
                found,
            } => write!(f, "plug '{plug}' is {expected}, got {found}"),
            Self::CompoundValue { plug } => {
                write!(f, "compound plug '{plug}' does not accept a combined value set")
            }
            Self::InputOccupied { to } => {
                write!(f, "plug '{to}' already has an incoming connection")
            }
        }
    }
}

impl std::error::Error for HostError {}
