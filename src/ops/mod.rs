// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Attribute transplant and reorder operations.
//!
//! Every expected failure (missing attribute, name collision, restricted
//! move) is non-fatal: it is logged at warn level, recorded on the outcome,
//! and yields a null result instead of an error. `Err` is reserved for host
//! failures the engine could not anticipate; the session layer downgrades
//! those too, so nothing reaches the host's command dispatch as a panic.

use std::fmt;

use crate::host::{HostError, SceneGraph};
use crate::model::{AttrKind, AttrName, AttributeDescriptor, ConnectionSet, NodeId, Plug};
use crate::query::{capture_connections, describe_attribute, DescribeError};

/// Whether a transplant leaves the source attribute in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransplantMode {
    Copy,
    Move,
}

/// Single-position reorder direction within the user-attribute order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// How a batch reacts to one member yielding a null result.
///
/// Reorder aborts (a half-shuffled order must not keep shuffling); paste
/// continues (one unpastable attribute does not void the clipboard). The two
/// policies are deliberately distinct and named, not unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    AbortOnFailure,
    ContinuePastFailures,
}

/// A non-fatal condition, logged and recorded on the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum OpWarning {
    AttributeNotFound { node: NodeId, attr: AttrName },
    NameCollision { node: NodeId, requested: AttrName, created: AttrName },
    NothingSelected,
    NoUserAttributeSelected,
    UnsupportedMove { plug: Plug },
    MalformedAttribute { plug: Plug, detail: String },
    HostFailure { error: HostError },
}

impl fmt::Display for OpWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeNotFound { node, attr } => {
                write!(f, "attribute '{attr}' does not exist on '{node}'")
            }
            Self::NameCollision {
                node,
                requested,
                created,
            } => write!(
                f,
                "node '{node}' already has an attribute '{requested}'; created '{created}' alongside"
            ),
            Self::NothingSelected => f.write_str("nothing selected"),
            Self::NoUserAttributeSelected => f.write_str("no user-defined attribute selected"),
            Self::UnsupportedMove { plug } => write!(
                f,
                "vector3 attribute '{plug}' cannot be relocated; it was disconnected and copied"
            ),
            Self::MalformedAttribute { plug, detail } => {
                write!(f, "attribute '{plug}' could not be described: {detail}")
            }
            Self::HostFailure { error } => write!(f, "host operation failed: {error}"),
        }
    }
}

/// Result of one transplant. `new_attribute` is `None` on any recoverable
/// failure; the warnings say why.
#[derive(Debug, Clone, PartialEq)]
pub struct TransplantOutcome {
    new_attribute: Option<Plug>,
    warnings: Vec<OpWarning>,
}

impl TransplantOutcome {
    pub fn new_attribute(&self) -> Option<&Plug> {
        self.new_attribute.as_ref()
    }

    pub fn warnings(&self) -> &[OpWarning] {
        &self.warnings
    }
}

/// Result of one reorder. `moved` is false for boundary no-ops and failures;
/// `aborted` marks a batch stopped mid-sequence (already-applied steps are
/// not rolled back).
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    moved: bool,
    aborted: bool,
    warnings: Vec<OpWarning>,
}

impl ReorderOutcome {
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn warnings(&self) -> &[OpWarning] {
        &self.warnings
    }
}

/// Copy or move one user-defined attribute from `source` onto `target`,
/// re-establishing its captured connections on the new attribute.
///
/// Implements the full pipeline: recursive capture, pre-removal side effects
/// (move only), materialization with auto-suffixed collision handling,
/// merge-on-conflict reconnection, and connected-neighbor lock preservation.
pub fn transplant<H: SceneGraph>(
    host: &mut H,
    source: &NodeId,
    target: &NodeId,
    attr: &AttrName,
    mode: TransplantMode,
) -> Result<TransplantOutcome, HostError> {
    let mut warnings = Vec::new();

    if !host.has_attribute(source, attr) {
        record(
            &mut warnings,
            OpWarning::AttributeNotFound {
                node: source.clone(),
                attr: attr.clone(),
            },
        );
        return Ok(TransplantOutcome {
            new_attribute: None,
            warnings,
        });
    }

    let source_plug = Plug::new(source.clone(), attr.clone());
    let captured = match capture_attribute(host, &source_plug) {
        Ok(captured) => captured,
        Err(DescribeError::Host(error)) => return Err(error),
        Err(DescribeError::Invalid(error)) => {
            record(
                &mut warnings,
                OpWarning::MalformedAttribute {
                    plug: source_plug,
                    detail: error.to_string(),
                },
            );
            return Ok(TransplantOutcome {
                new_attribute: None,
                warnings,
            });
        }
    };

    // Neighbors keep their observable lock state across the operation, but
    // must be connectable while we re-wire.
    let neighbor_locks = capture_neighbor_locks(host, &captured)?;
    for (plug, _) in &neighbor_locks {
        host.set_locked(plug, false)?;
    }

    if mode == TransplantMode::Move {
        if captured.descriptor.is_compound() && source != target {
            record(
                &mut warnings,
                OpWarning::UnsupportedMove {
                    plug: source_plug.clone(),
                },
            );
            host.disconnect_all(&source_plug)?;
            for child in captured.descriptor.children() {
                let child_plug = Plug::new(source.clone(), child.name().clone());
                host.disconnect_all(&child_plug)?;
            }
        } else {
            // An in-place move recreates the attribute on the same node, so
            // compounds get a true delete here too; the relocation
            // restriction only applies across nodes.
            if captured.descriptor.locked() {
                host.set_locked(&source_plug, false)?;
            }
            for child in captured.descriptor.children() {
                if child.locked() {
                    let child_plug = Plug::new(source.clone(), child.name().clone());
                    host.set_locked(&child_plug, false)?;
                }
            }
            host.delete_attribute(source, attr)?;
        }
    }

    let names = resolve_target_names(host, target, &captured.descriptor);
    if let Some(warning) = names.collision_warning() {
        record(&mut warnings, warning);
    }
    let new_plug = materialize(host, target, &captured.descriptor, &names)?;

    reconnect(
        host,
        &new_plug,
        captured.descriptor.kind(),
        &captured.parent_set,
    )?;
    for (child, set) in captured.descriptor.children().iter().zip(&captured.child_sets) {
        let child_plug = names.child_plug(target, child.name());
        reconnect(host, &child_plug, child.kind(), set)?;
    }

    // Locks go on last; a locked plug refuses value and connection changes.
    for child in captured.descriptor.children() {
        if child.locked() {
            let child_plug = names.child_plug(target, child.name());
            host.set_locked(&child_plug, true)?;
        }
    }
    if captured.descriptor.locked() {
        host.set_locked(&new_plug, true)?;
    }

    for (plug, was_locked) in &neighbor_locks {
        if *was_locked && host.has_attribute(plug.node(), plug.attr()) {
            host.set_locked(plug, true)?;
        }
    }

    Ok(TransplantOutcome {
        new_attribute: Some(new_plug),
        warnings,
    })
}

/// Move one attribute a single position up or down within `node`'s ordered
/// user-defined attributes.
///
/// Implemented as transplant-in-place: because delete + recreate appends at
/// the end of the order, re-appending the target and then every displaced
/// attribute reconstructs the desired order. Compound children redirect to
/// their parent. Aborts on the first failed step without rolling back.
pub fn reorder<H: SceneGraph>(
    host: &mut H,
    node: &NodeId,
    attr: &AttrName,
    direction: Direction,
) -> Result<ReorderOutcome, HostError> {
    let mut warnings = Vec::new();

    if !host.has_attribute(node, attr) {
        record(
            &mut warnings,
            OpWarning::AttributeNotFound {
                node: node.clone(),
                attr: attr.clone(),
            },
        );
        return Ok(ReorderOutcome {
            moved: false,
            aborted: false,
            warnings,
        });
    }

    // Compound children occupy no slot of their own; reorder the parent.
    let plug = Plug::new(node.clone(), attr.clone());
    let definition = host.attribute_definition(&plug)?;
    let attr = definition.parent().unwrap_or(attr).clone();

    let order = host.user_attributes(node)?;
    let Some(position) = order.iter().position(|candidate| candidate == &attr) else {
        record(
            &mut warnings,
            OpWarning::AttributeNotFound {
                node: node.clone(),
                attr: attr.clone(),
            },
        );
        return Ok(ReorderOutcome {
            moved: false,
            aborted: false,
            warnings,
        });
    };

    let displaced: Vec<AttrName> = match direction {
        Direction::Up => {
            if position == 0 {
                return Ok(ReorderOutcome {
                    moved: false,
                    aborted: false,
                    warnings,
                });
            }
            order[position - 1..]
                .iter()
                .filter(|candidate| *candidate != &attr)
                .cloned()
                .collect()
        }
        Direction::Down => {
            if position == order.len() - 1 {
                return Ok(ReorderOutcome {
                    moved: false,
                    aborted: false,
                    warnings,
                });
            }
            order[(position + 2).min(order.len())..].to_vec()
        }
    };

    for step in std::iter::once(&attr).chain(displaced.iter()) {
        let outcome = transplant(host, node, node, step, TransplantMode::Move)?;
        // A step that degraded or got renamed did not land back in its own
        // slot; continuing would shuffle past a corrupted order.
        let step_failed = outcome.new_attribute.is_none()
            || outcome.warnings.iter().any(|warning| {
                matches!(
                    warning,
                    OpWarning::UnsupportedMove { .. } | OpWarning::NameCollision { .. }
                )
            });
        warnings.extend(outcome.warnings.iter().cloned());
        if step_failed {
            return Ok(ReorderOutcome {
                moved: false,
                aborted: true,
                warnings,
            });
        }
    }

    Ok(ReorderOutcome {
        moved: true,
        aborted: false,
        warnings,
    })
}

pub(crate) fn record(warnings: &mut Vec<OpWarning>, warning: OpWarning) {
    log::warn!("{warning}");
    warnings.push(warning);
}

// Capture/materialize/reconnect implementation for `transplant`.
include!("ops_impl.rs");
