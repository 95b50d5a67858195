// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory reference host.
//!
//! `MemoryScene` implements the full [`SceneGraph`] capability set with the
//! ordering semantics the engine relies on: per-node attribute storage in
//! insertion order (so delete + recreate appends at the end, which is what
//! makes transplant-in-place reordering work) and an ordered connection list.

use std::collections::BTreeMap;

use crate::model::{AttrDefinition, AttrKind, AttrName, AttrValue, NodeId, Plug};

use super::{BlendPlugs, HostError, SceneGraph};

#[derive(Debug, Clone, PartialEq)]
struct AttrEntry {
    definition: AttrDefinition,
    value: Option<AttrValue>,
    locked: bool,
    user_defined: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct SceneNode {
    attrs: Vec<AttrEntry>,
}

impl SceneNode {
    fn entry(&self, attr: &AttrName) -> Option<&AttrEntry> {
        self.attrs.iter().find(|entry| entry.definition.name() == attr)
    }

    fn entry_mut(&mut self, attr: &AttrName) -> Option<&mut AttrEntry> {
        self.attrs
            .iter_mut()
            .find(|entry| entry.definition.name() == attr)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Connection {
    from: Plug,
    to: Plug,
}

/// An in-memory scene graph, used as the reference host and test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeId, SceneNode>,
    connections: Vec<Connection>,
    blend_counter: u32,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty node. Pre-existing nodes are left untouched.
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.entry(node).or_default();
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    fn node(&self, node: &NodeId) -> Result<&SceneNode, HostError> {
        self.nodes.get(node).ok_or_else(|| HostError::UnknownNode {
            node: node.clone(),
        })
    }

    fn node_mut(&mut self, node: &NodeId) -> Result<&mut SceneNode, HostError> {
        self.nodes
            .get_mut(node)
            .ok_or_else(|| HostError::UnknownNode { node: node.clone() })
    }

    fn entry(&self, plug: &Plug) -> Result<&AttrEntry, HostError> {
        self.node(plug.node())?
            .entry(plug.attr())
            .ok_or_else(|| HostError::UnknownAttribute { plug: plug.clone() })
    }

    fn entry_mut(&mut self, plug: &Plug) -> Result<&mut AttrEntry, HostError> {
        self.node_mut(plug.node())?
            .entry_mut(plug.attr())
            .ok_or_else(|| HostError::UnknownAttribute { plug: plug.clone() })
    }

    fn push_entry(
        &mut self,
        node: &NodeId,
        definition: AttrDefinition,
        user_defined: bool,
    ) -> Result<(), HostError> {
        let scene_node = self.node(node)?;
        if scene_node.entry(definition.name()).is_some() {
            return Err(HostError::DuplicateAttribute {
                node: node.clone(),
                attr: definition.name().clone(),
            });
        }
        if let Some(parent) = definition.parent() {
            let parent_entry =
                scene_node
                    .entry(parent)
                    .ok_or_else(|| HostError::MissingParent {
                        node: node.clone(),
                        parent: parent.clone(),
                    })?;
            if !parent_entry.definition.kind().is_compound() {
                return Err(HostError::KindMismatch {
                    plug: Plug::new(node.clone(), parent.clone()),
                    expected: AttrKind::Vector3,
                    found: parent_entry.definition.kind(),
                });
            }
        }

        let value = initial_value(&definition);
        self.node_mut(node)?.attrs.push(AttrEntry {
            definition,
            value,
            locked: false,
            user_defined,
        });
        Ok(())
    }

    fn children_of(&self, node: &SceneNode, attr: &AttrName) -> Vec<AttrName> {
        node.attrs
            .iter()
            .filter(|entry| entry.definition.parent() == Some(attr))
            .map(|entry| entry.definition.name().clone())
            .collect()
    }

    fn remove_connections_touching(&mut self, plugs: &[Plug]) {
        self.connections
            .retain(|conn| !plugs.contains(&conn.from) && !plugs.contains(&conn.to));
    }

    fn next_blend_id(&mut self) -> NodeId {
        loop {
            self.blend_counter += 1;
            let candidate = format!("blend{:02}", self.blend_counter);
            let id = NodeId::new(candidate).expect("generated blend id is a valid segment");
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }
}

fn initial_value(definition: &AttrDefinition) -> Option<AttrValue> {
    if let Some(default) = definition.default_value() {
        return Some(default.clone());
    }
    match definition.kind() {
        AttrKind::Integer => Some(AttrValue::Integer(0)),
        AttrKind::Float => Some(AttrValue::Float(0.0)),
        AttrKind::Boolean => Some(AttrValue::Boolean(false)),
        AttrKind::Enum => Some(AttrValue::EnumIndex(0)),
        AttrKind::String => Some(AttrValue::String(String::new())),
        // The parent's value is derived from its children.
        AttrKind::Vector3 => None,
        AttrKind::Divider => None,
    }
}

fn clamp_numeric(definition: &AttrDefinition, value: AttrValue) -> AttrValue {
    if !definition.kind().is_numeric() || definition.range().is_unbounded() {
        return value;
    }
    let range = definition.range();
    match value {
        AttrValue::Integer(raw) => {
            let mut clamped = raw;
            if let Some(min) = range.min() {
                clamped = clamped.max(min as i64);
            }
            if let Some(max) = range.max() {
                clamped = clamped.min(max as i64);
            }
            AttrValue::Integer(clamped)
        }
        AttrValue::Float(raw) => {
            let mut clamped = raw;
            if let Some(min) = range.min() {
                clamped = clamped.max(min);
            }
            if let Some(max) = range.max() {
                clamped = clamped.min(max);
            }
            AttrValue::Float(clamped)
        }
        other => other,
    }
}

impl SceneGraph for MemoryScene {
    fn node_exists(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn has_attribute(&self, node: &NodeId, attr: &AttrName) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|scene_node| scene_node.entry(attr).is_some())
    }

    fn user_attributes(&self, node: &NodeId) -> Result<Vec<AttrName>, HostError> {
        let scene_node = self.node(node)?;
        Ok(scene_node
            .attrs
            .iter()
            .filter(|entry| entry.user_defined && entry.definition.parent().is_none())
            .map(|entry| entry.definition.name().clone())
            .collect())
    }

    fn attribute_definition(&self, plug: &Plug) -> Result<AttrDefinition, HostError> {
        Ok(self.entry(plug)?.definition.clone())
    }

    fn attribute_children(&self, plug: &Plug) -> Result<Vec<AttrName>, HostError> {
        let scene_node = self.node(plug.node())?;
        if scene_node.entry(plug.attr()).is_none() {
            return Err(HostError::UnknownAttribute { plug: plug.clone() });
        }
        Ok(self.children_of(scene_node, plug.attr()))
    }

    fn value(&self, plug: &Plug) -> Result<Option<AttrValue>, HostError> {
        let entry = self.entry(plug)?;
        if entry.definition.kind().is_compound() {
            let scene_node = self.node(plug.node())?;
            let mut axes = [0.0; 3];
            for (slot, child) in self
                .children_of(scene_node, plug.attr())
                .iter()
                .enumerate()
                .take(3)
            {
                let child_plug = Plug::new(plug.node().clone(), child.clone());
                let child_value = self.entry(&child_plug)?.value.clone();
                axes[slot] = child_value.as_ref().and_then(AttrValue::as_float).unwrap_or(0.0);
            }
            return Ok(Some(AttrValue::Vector3(axes)));
        }
        Ok(entry.value.clone())
    }

    fn set_value(&mut self, plug: &Plug, value: AttrValue) -> Result<(), HostError> {
        let entry = self.entry(plug)?;
        let kind = entry.definition.kind();
        if entry.locked {
            return Err(HostError::LockedPlug { plug: plug.clone() });
        }
        if kind.is_compound() {
            return Err(HostError::CompoundValue { plug: plug.clone() });
        }
        if value.kind() != kind {
            return Err(HostError::KindMismatch {
                plug: plug.clone(),
                expected: kind,
                found: value.kind(),
            });
        }
        let definition = entry.definition.clone();
        let entry = self.entry_mut(plug)?;
        entry.value = Some(clamp_numeric(&definition, value));
        Ok(())
    }

    fn is_locked(&self, plug: &Plug) -> Result<bool, HostError> {
        Ok(self.entry(plug)?.locked)
    }

    fn set_locked(&mut self, plug: &Plug, locked: bool) -> Result<(), HostError> {
        self.entry_mut(plug)?.locked = locked;
        Ok(())
    }

    fn inputs(&self, plug: &Plug) -> Result<Vec<Plug>, HostError> {
        self.entry(plug)?;
        Ok(self
            .connections
            .iter()
            .filter(|conn| &conn.to == plug)
            .map(|conn| conn.from.clone())
            .collect())
    }

    fn outputs(&self, plug: &Plug) -> Result<Vec<Plug>, HostError> {
        self.entry(plug)?;
        Ok(self
            .connections
            .iter()
            .filter(|conn| &conn.from == plug)
            .map(|conn| conn.to.clone())
            .collect())
    }

    fn connect(&mut self, from: &Plug, to: &Plug, force: bool) -> Result<(), HostError> {
        self.entry(from)?;
        let destination = self.entry(to)?;
        if destination.locked {
            return Err(HostError::LockedPlug { plug: to.clone() });
        }
        let occupied = self.connections.iter().any(|conn| &conn.to == to);
        if occupied {
            if !force {
                return Err(HostError::InputOccupied { to: to.clone() });
            }
            self.connections.retain(|conn| &conn.to != to);
        }
        self.connections.push(Connection {
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }

    fn disconnect_all(&mut self, plug: &Plug) -> Result<(), HostError> {
        self.entry(plug)?;
        self.remove_connections_touching(std::slice::from_ref(plug));
        Ok(())
    }

    fn add_attribute(
        &mut self,
        node: &NodeId,
        definition: AttrDefinition,
    ) -> Result<(), HostError> {
        self.push_entry(node, definition, true)
    }

    fn delete_attribute(&mut self, node: &NodeId, attr: &AttrName) -> Result<(), HostError> {
        let plug = Plug::new(node.clone(), attr.clone());
        let entry = self.entry(&plug)?;
        if entry.locked {
            return Err(HostError::LockedPlug { plug });
        }

        let scene_node = self.node(node)?;
        let mut removed = vec![attr.clone()];
        removed.extend(self.children_of(scene_node, attr));

        let removed_plugs: Vec<Plug> = removed
            .iter()
            .map(|name| Plug::new(node.clone(), name.clone()))
            .collect();
        self.remove_connections_touching(&removed_plugs);

        self.node_mut(node)?
            .attrs
            .retain(|candidate| !removed.contains(candidate.definition.name()));
        Ok(())
    }

    fn create_blend_node(&mut self, triple: bool) -> Result<BlendPlugs, HostError> {
        let node = self.next_blend_id();
        self.nodes.insert(node.clone(), SceneNode::default());

        let attr = |name: &str| AttrName::new(name).expect("static blend attr name");
        let value_kind = if triple {
            AttrKind::Vector3
        } else {
            AttrKind::Float
        };

        for channel in ["input1", "input2", "output"] {
            self.push_entry(&node, AttrDefinition::new(attr(channel), value_kind), false)?;
            if triple {
                for axis in ["X", "Y", "Z"] {
                    let mut child =
                        AttrDefinition::new(attr(&format!("{channel}{axis}")), AttrKind::Float);
                    child.set_parent(Some(attr(channel)));
                    self.push_entry(&node, child, false)?;
                }
            }
        }

        let mut weight = AttrDefinition::new(attr("weight"), AttrKind::Float);
        weight.set_default_value(Some(AttrValue::Float(0.5)));
        self.push_entry(&node, weight, false)?;

        Ok(BlendPlugs {
            input_a: Plug::new(node.clone(), attr("input1")),
            input_b: Plug::new(node.clone(), attr("input2")),
            output: Plug::new(node, attr("output")),
        })
    }
}
