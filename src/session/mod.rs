// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session-scoped editing context: selection, clipboard, batch operations.
//!
//! [`EditorSession`] holds the state an interactive front end accumulates
//! between operations. Nothing here escalates: host failures inside a batch
//! are downgraded to [`OpWarning::HostFailure`] and surfaced on the outcome.

use crate::host::{HostError, SceneGraph};
use crate::model::{AttrDefinition, AttrKind, AttrName, NodeId, Plug};
use crate::ops::{
    record, reorder, transplant, BatchPolicy, Direction, OpWarning, TransplantMode,
};

/// The enum label a divider renders as in a channel box.
const DIVIDER_LABEL: &str = "———————————————";

#[derive(Debug, Clone, PartialEq)]
struct Clipboard {
    source: NodeId,
    attributes: Vec<AttrName>,
    mode: TransplantMode,
}

/// Result of one paste batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteOutcome {
    pasted: Vec<Plug>,
    warnings: Vec<OpWarning>,
}

impl PasteOutcome {
    pub fn pasted(&self) -> &[Plug] {
        &self.pasted
    }

    pub fn warnings(&self) -> &[OpWarning] {
        &self.warnings
    }
}

/// Result of one reorder batch. `completed` counts attributes that actually
/// changed position; `aborted` marks a batch stopped on its first failure.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    completed: usize,
    aborted: bool,
    warnings: Vec<OpWarning>,
}

impl MoveOutcome {
    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn warnings(&self) -> &[OpWarning] {
        &self.warnings
    }
}

/// The per-session editing context an interactive host runs against.
///
/// Selection mirrors a DCC selection model: an ordered node list (the last
/// node is the acting target) and the channel-box attribute names applied to
/// each selected node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    selected_nodes: Vec<NodeId>,
    selected_attributes: Vec<AttrName>,
    clipboard: Option<Clipboard>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_nodes(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        self.selected_nodes = nodes.into_iter().collect();
    }

    pub fn select_attributes(&mut self, attributes: impl IntoIterator<Item = AttrName>) {
        self.selected_attributes = attributes.into_iter().collect();
    }

    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected_nodes
    }

    pub fn selected_attributes(&self) -> &[AttrName] {
        &self.selected_attributes
    }

    pub fn clear_selection(&mut self) {
        self.selected_nodes.clear();
        self.selected_attributes.clear();
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Stash the selected user-defined attributes of the last-selected node
    /// for a later copying paste.
    pub fn copy_selected<H: SceneGraph>(&mut self, host: &H) -> Vec<OpWarning> {
        self.stash(host, TransplantMode::Copy)
    }

    /// Like [`copy_selected`](Self::copy_selected), but the paste relocates
    /// the attributes instead of duplicating them.
    pub fn cut_selected<H: SceneGraph>(&mut self, host: &H) -> Vec<OpWarning> {
        self.stash(host, TransplantMode::Move)
    }

    fn stash<H: SceneGraph>(&mut self, host: &H, mode: TransplantMode) -> Vec<OpWarning> {
        let mut warnings = Vec::new();
        let Some(source) = self.selected_nodes.last().cloned() else {
            record(&mut warnings, OpWarning::NothingSelected);
            return warnings;
        };
        let user = match host.user_attributes(&source) {
            Ok(user) => user,
            Err(error) => {
                record(&mut warnings, OpWarning::HostFailure { error });
                return warnings;
            }
        };
        // Only top-level user-defined attributes travel; static transform
        // channels and axis children stay put.
        let eligible: Vec<AttrName> = self
            .selected_attributes
            .iter()
            .filter(|attr| user.contains(attr))
            .cloned()
            .collect();
        if eligible.is_empty() {
            record(&mut warnings, OpWarning::NoUserAttributeSelected);
            return warnings;
        }
        self.clipboard = Some(Clipboard {
            source,
            attributes: eligible,
            mode,
        });
        warnings
    }

    /// Transplant every clipboard attribute onto the last-selected node.
    ///
    /// The clipboard survives the paste; a cut clipboard pasted twice warns
    /// about the by-then-missing source attributes instead of failing.
    pub fn paste<H: SceneGraph>(&self, host: &mut H, policy: BatchPolicy) -> PasteOutcome {
        let mut warnings = Vec::new();
        let mut pasted = Vec::new();

        let Some(clipboard) = &self.clipboard else {
            record(&mut warnings, OpWarning::NoUserAttributeSelected);
            return PasteOutcome { pasted, warnings };
        };
        let Some(target) = self.selected_nodes.last() else {
            record(&mut warnings, OpWarning::NothingSelected);
            return PasteOutcome { pasted, warnings };
        };

        for attr in &clipboard.attributes {
            let failed = match transplant(host, &clipboard.source, target, attr, clipboard.mode) {
                Ok(outcome) => {
                    warnings.extend(outcome.warnings().iter().cloned());
                    match outcome.new_attribute() {
                        Some(plug) => {
                            pasted.push(plug.clone());
                            false
                        }
                        None => true,
                    }
                }
                Err(error) => {
                    record(&mut warnings, OpWarning::HostFailure { error });
                    true
                }
            };
            if failed && policy == BatchPolicy::AbortOnFailure {
                break;
            }
        }

        PasteOutcome { pasted, warnings }
    }

    /// Reorder the selected attributes one position on every selected node,
    /// aborting the whole batch on the first failed step.
    ///
    /// Axis children resolve to their compound parent, and a consecutive run
    /// of siblings moves that parent only once. Moving down walks the
    /// selection in reverse so earlier moves do not displace later ones. The
    /// selection is rewritten to the slots that moved, which keeps the same
    /// attributes active after their delete-and-recreate round trip.
    pub fn move_selected<H: SceneGraph>(
        &mut self,
        host: &mut H,
        direction: Direction,
    ) -> MoveOutcome {
        let mut warnings = Vec::new();
        if self.selected_nodes.is_empty() || self.selected_attributes.is_empty() {
            record(&mut warnings, OpWarning::NothingSelected);
            return MoveOutcome {
                completed: 0,
                aborted: false,
                warnings,
            };
        }

        let mut ordered = self.selected_attributes.clone();
        if direction == Direction::Down {
            ordered.reverse();
        }

        let mut completed = 0;
        let mut aborted = false;
        let mut moved_slots: Vec<AttrName> = Vec::new();

        'nodes: for node in &self.selected_nodes {
            let mut last_parent: Option<AttrName> = None;
            for attr in &ordered {
                let plug = Plug::new(node.clone(), attr.clone());
                let slot = match host.attribute_definition(&plug) {
                    Ok(definition) => match definition.parent() {
                        Some(parent) => {
                            if last_parent.as_ref() == Some(parent) {
                                continue;
                            }
                            last_parent = Some(parent.clone());
                            parent.clone()
                        }
                        None => attr.clone(),
                    },
                    // reorder records the not-found warning itself
                    Err(HostError::UnknownAttribute { .. }) => attr.clone(),
                    Err(error) => {
                        record(&mut warnings, OpWarning::HostFailure { error });
                        continue;
                    }
                };
                match reorder(host, node, &slot, direction) {
                    Ok(outcome) => {
                        warnings.extend(outcome.warnings().iter().cloned());
                        if outcome.aborted() {
                            aborted = true;
                            break 'nodes;
                        }
                        if outcome.moved() {
                            completed += 1;
                            if !moved_slots.contains(&slot) {
                                moved_slots.push(slot);
                            }
                        }
                    }
                    Err(error) => {
                        record(&mut warnings, OpWarning::HostFailure { error });
                        aborted = true;
                        break 'nodes;
                    }
                }
            }
        }

        if !moved_slots.is_empty() {
            if direction == Direction::Down {
                moved_slots.reverse();
            }
            self.selected_attributes = moved_slots;
        }

        MoveOutcome {
            completed,
            aborted,
            warnings,
        }
    }

    /// Unlock the selected attributes (and their axis children) on every
    /// selected node.
    pub fn unlock_selected<H: SceneGraph>(&self, host: &mut H) -> Vec<OpWarning> {
        let mut warnings = Vec::new();
        if self.selected_nodes.is_empty() || self.selected_attributes.is_empty() {
            record(&mut warnings, OpWarning::NothingSelected);
            return warnings;
        }
        for node in &self.selected_nodes {
            if let Err(error) = unlock_attributes(host, node, &self.selected_attributes) {
                record(&mut warnings, OpWarning::HostFailure { error });
            }
        }
        warnings
    }
}

/// Unlock an explicit list of attributes on one node, including the axis
/// children of any compound in the list. Names the node does not carry are
/// skipped.
pub fn unlock_attributes<H: SceneGraph>(
    host: &mut H,
    node: &NodeId,
    attributes: &[AttrName],
) -> Result<(), HostError> {
    for attr in attributes {
        if !host.has_attribute(node, attr) {
            continue;
        }
        let plug = Plug::new(node.clone(), attr.clone());
        host.set_locked(&plug, false)?;
        for child in host.attribute_children(&plug)? {
            host.set_locked(&Plug::new(node.clone(), child), false)?;
        }
    }
    Ok(())
}

/// Append a channel-box divider to `node`: a keyable enum attribute with a
/// blank nice name and a single dash-run item, auto-named `divider00`,
/// `divider01`, ... at the first free index.
pub fn add_divider<H: SceneGraph>(host: &mut H, node: &NodeId) -> Result<Plug, HostError> {
    let name = next_divider_name(host, node);
    let mut definition = AttrDefinition::new(name.clone(), AttrKind::Divider);
    definition.set_nice_name(" ");
    definition.set_enum_items(vec![DIVIDER_LABEL.to_owned()]);
    host.add_attribute(node, definition)?;
    Ok(Plug::new(node.clone(), name))
}

fn next_divider_name<H: SceneGraph>(host: &H, node: &NodeId) -> AttrName {
    let mut counter = 0u32;
    loop {
        let candidate = AttrName::new(format!("divider{counter:02}"))
            .expect("generated divider name is a valid segment");
        if !host.has_attribute(node, &candidate) {
            return candidate;
        }
        counter += 1;
    }
}
