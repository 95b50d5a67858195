// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Capture/materialize/reconnect helpers used by `transplant`.
/// Keeps `ops::mod` focused on the public op types and orchestration.
struct CapturedAttribute {
    descriptor: AttributeDescriptor,
    parent_set: ConnectionSet,
    /// Parallel to `descriptor.children()`, each child captured
    /// independently.
    child_sets: Vec<ConnectionSet>,
}

fn capture_attribute<H: SceneGraph>(
    host: &H,
    plug: &Plug,
) -> Result<CapturedAttribute, DescribeError> {
    let descriptor = describe_attribute(host, plug)?;
    let parent_set = capture_connections(host, plug)?;
    let mut child_sets = Vec::with_capacity(descriptor.children().len());
    for child in descriptor.children() {
        let child_plug = Plug::new(plug.node().clone(), child.name().clone());
        child_sets.push(capture_connections(host, &child_plug)?);
    }
    Ok(CapturedAttribute {
        descriptor,
        parent_set,
        child_sets,
    })
}

/// Lock state of every endpoint wired to the captured attribute or one of
/// its children, first occurrence order, deduplicated.
fn capture_neighbor_locks<H: SceneGraph>(
    host: &H,
    captured: &CapturedAttribute,
) -> Result<Vec<(Plug, bool)>, HostError> {
    let mut locks: Vec<(Plug, bool)> = Vec::new();
    let sets = std::iter::once(&captured.parent_set).chain(captured.child_sets.iter());
    for set in sets {
        for endpoint in set.endpoints() {
            if locks.iter().any(|(seen, _)| seen == endpoint) {
                continue;
            }
            let locked = host.is_locked(endpoint)?;
            locks.push((endpoint.clone(), locked));
        }
    }
    Ok(locks)
}

/// The names an attribute (and its children) will take on the target node.
///
/// When any requested name is taken, a zero-padded counter goes onto the
/// parent and every child alike, so old and new attributes coexist.
struct TargetNames {
    node: NodeId,
    requested: AttrName,
    parent: AttrName,
    children: Vec<(AttrName, AttrName)>,
    suffix: Option<String>,
}

impl TargetNames {
    fn collision_warning(&self) -> Option<OpWarning> {
        self.suffix.as_ref().map(|_| OpWarning::NameCollision {
            node: self.node.clone(),
            requested: self.requested.clone(),
            created: self.parent.clone(),
        })
    }

    fn created_child(&self, original: &AttrName) -> AttrName {
        self.children
            .iter()
            .find(|(requested, _)| requested == original)
            .map(|(_, created)| created.clone())
            .unwrap_or_else(|| original.clone())
    }

    fn child_plug(&self, target: &NodeId, original: &AttrName) -> Plug {
        Plug::new(target.clone(), self.created_child(original))
    }
}

fn suffixed(name: &AttrName, suffix: &str) -> AttrName {
    AttrName::new(format!("{name}{suffix}")).expect("suffixed name is a valid segment")
}

/// Children keep their axis letter after the counter, so `offsetX` follows
/// its parent to `offset01X` and the family stays grouped under `offset01`.
fn suffixed_child(child: &AttrName, parent: &AttrName, suffix: &str) -> AttrName {
    let name = match child.as_str().strip_prefix(parent.as_str()) {
        Some(axis) => format!("{parent}{suffix}{axis}"),
        None => format!("{child}{suffix}"),
    };
    AttrName::new(name).expect("suffixed name is a valid segment")
}

fn resolve_target_names<H: SceneGraph>(
    host: &H,
    target: &NodeId,
    descriptor: &AttributeDescriptor,
) -> TargetNames {
    let requested = descriptor.name().clone();
    let requested_children: Vec<AttrName> = descriptor
        .children()
        .iter()
        .map(|child| child.name().clone())
        .collect();

    let all_free = |parent: &AttrName, children: &[(AttrName, AttrName)]| {
        !host.has_attribute(target, parent)
            && children
                .iter()
                .all(|(_, created)| !host.has_attribute(target, created))
    };

    let identity: Vec<(AttrName, AttrName)> = requested_children
        .iter()
        .map(|child| (child.clone(), child.clone()))
        .collect();
    if all_free(&requested, &identity) {
        return TargetNames {
            node: target.clone(),
            requested: requested.clone(),
            parent: requested,
            children: identity,
            suffix: None,
        };
    }

    let mut counter = 0u32;
    loop {
        counter += 1;
        let suffix = format!("{counter:02}");
        let parent = suffixed(&requested, &suffix);
        let children: Vec<(AttrName, AttrName)> = requested_children
            .iter()
            .map(|child| (child.clone(), suffixed_child(child, &requested, &suffix)))
            .collect();
        if all_free(&parent, &children) {
            return TargetNames {
                node: target.clone(),
                requested,
                parent,
                children,
                suffix: Some(suffix),
            };
        }
    }
}

/// Create the attribute (parent first, then children) on the target and
/// assign captured values. Locks are deliberately NOT applied here; the
/// caller locks after reconnection.
fn materialize<H: SceneGraph>(
    host: &mut H,
    target: &NodeId,
    descriptor: &AttributeDescriptor,
    names: &TargetNames,
) -> Result<Plug, HostError> {
    let mut definition = descriptor.definition().clone();
    definition.set_name(names.parent.clone());
    definition.set_parent(None);
    if let Some(suffix) = &names.suffix {
        definition.set_nice_name(format!("{}{suffix}", descriptor.definition().nice_name()));
        definition.set_short_name(format!("{}{suffix}", descriptor.definition().short_name()));
    }
    host.add_attribute(target, definition)?;

    for child in descriptor.children() {
        let mut child_definition = child.definition().clone();
        child_definition.set_name(names.created_child(child.name()));
        child_definition.set_parent(Some(names.parent.clone()));
        if let Some(suffix) = &names.suffix {
            child_definition.set_nice_name(format!("{}{suffix}", child.definition().nice_name()));
            child_definition.set_short_name(format!("{}{suffix}", child.definition().short_name()));
        }
        host.add_attribute(target, child_definition)?;
    }

    let new_plug = Plug::new(target.clone(), names.parent.clone());

    if descriptor.is_compound() {
        // The compound itself may not accept one combined set; assign each
        // axis independently.
        for child in descriptor.children() {
            if let Some(value) = child.current_value() {
                host.set_value(&names.child_plug(target, child.name()), value.clone())?;
            }
        }
    } else if let Some(value) = descriptor.current_value() {
        host.set_value(&new_plug, value.clone())?;
    }

    Ok(new_plug)
}

/// Re-wire one plug from its captured connection set.
///
/// Inputs always reconnect; outputs only for kinds on the reconnection
/// allowlist. String plugs keep their downstream wiring severed.
/// TODO: revisit once a string-capable blend mode exists for outputs.
fn reconnect<H: SceneGraph>(
    host: &mut H,
    plug: &Plug,
    kind: AttrKind,
    set: &ConnectionSet,
) -> Result<(), HostError> {
    for incoming in set.inputs() {
        merge_or_connect(host, incoming, plug)?;
    }
    if kind.reconnects_outputs() {
        for outgoing in set.outputs() {
            merge_or_connect(host, plug, outgoing)?;
        }
    }
    Ok(())
}

/// Connect `from` to `to`; when `to` is already driven, splice a blend node
/// so both signal paths survive instead of one silently clobbering the
/// other.
fn merge_or_connect<H: SceneGraph>(
    host: &mut H,
    from: &Plug,
    to: &Plug,
) -> Result<(), HostError> {
    let existing = host.inputs(to)?;
    match existing.first() {
        None => host.connect(from, to, false),
        Some(previous) => {
            let triple = host.attribute_definition(to)?.kind().is_compound();
            let blend = host.create_blend_node(triple)?;
            host.connect(previous, &blend.input_a, false)?;
            host.connect(from, &blend.input_b, false)?;
            host.connect(&blend.output, to, true)
        }
    }
}
