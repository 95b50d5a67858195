// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only introspection over a live host.
//!
//! Queries never mutate host state; they build the ephemeral value objects
//! (descriptors, connection sets) the ops layer consumes.

use std::fmt;

use crate::host::{HostError, SceneGraph};
use crate::model::{AttributeDescriptor, ConnectionSet, DescriptorError, Plug};

/// Build the full, transport-safe descriptor for one attribute.
///
/// Vector3 compounds recurse into their axis children, each described as an
/// independent scalar descriptor carrying its parent back-reference (the host
/// reports that on the child definition).
pub fn describe_attribute<H: SceneGraph>(
    host: &H,
    plug: &Plug,
) -> Result<AttributeDescriptor, DescribeError> {
    let definition = host.attribute_definition(plug)?;
    let locked = host.is_locked(plug)?;
    let current_value = host.value(plug)?;

    let mut children = Vec::new();
    if definition.kind().is_compound() {
        for child in host.attribute_children(plug)? {
            let child_plug = Plug::new(plug.node().clone(), child);
            children.push(describe_attribute(host, &child_plug)?);
        }
    }

    AttributeDescriptor::new(definition, locked, current_value, children)
        .map_err(DescribeError::Invalid)
}

/// Capture the live wiring of one plug: ordered inputs and outputs.
pub fn capture_connections<H: SceneGraph>(
    host: &H,
    plug: &Plug,
) -> Result<ConnectionSet, HostError> {
    Ok(ConnectionSet::new(host.inputs(plug)?, host.outputs(plug)?))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DescribeError {
    Host(HostError),
    Invalid(DescriptorError),
}

impl fmt::Display for DescribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(err) => write!(f, "host introspection failed: {err}"),
            Self::Invalid(err) => write!(f, "host reported an invalid attribute shape: {err}"),
        }
    }
}

impl std::error::Error for DescribeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<HostError> for DescribeError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{capture_connections, describe_attribute};
    use crate::host::SceneGraph;
    use crate::model::fixtures;
    use crate::model::{AttrKind, AttrValue, Plug};

    fn plug(path: &str) -> Plug {
        path.parse().expect("plug path")
    }

    #[test]
    fn describe_scalar_attribute_captures_value_and_lock() {
        let scene = fixtures::rig_with_driven_float();
        let descriptor = describe_attribute(&scene, &plug("ctl.amount")).expect("describe");
        assert_eq!(descriptor.kind(), AttrKind::Float);
        assert_eq!(descriptor.current_value(), Some(&AttrValue::Float(2.5)));
        assert!(!descriptor.locked());
        assert!(descriptor.children().is_empty());
    }

    #[test]
    fn describe_vector3_recurses_into_axis_children() {
        let scene = fixtures::rig_with_vector3();
        let descriptor = describe_attribute(&scene, &plug("ctl.offset")).expect("describe");
        assert!(descriptor.is_compound());
        assert_eq!(descriptor.children().len(), 3);
        let child_names: Vec<&str> = descriptor
            .children()
            .iter()
            .map(|child| child.name().as_str())
            .collect();
        assert_eq!(child_names, ["offsetX", "offsetY", "offsetZ"]);
        for child in descriptor.children() {
            assert_eq!(
                child.definition().parent().map(|parent| parent.as_str()),
                Some("offset")
            );
        }
    }

    #[test]
    fn capture_connections_keeps_host_order() {
        let scene = fixtures::rig_with_driven_float();
        let set = capture_connections(&scene, &plug("ctl.amount")).expect("capture");
        assert_eq!(set.inputs(), [plug("driver.out")]);
        assert_eq!(set.outputs(), [plug("consumer.in")]);
    }

    #[test]
    fn describe_missing_attribute_is_a_host_error() {
        let scene = fixtures::rig_with_driven_float();
        assert!(scene.node_exists(&"ctl".parse().expect("node id")));
        let result = describe_attribute(&scene, &plug("ctl.nope"));
        assert!(result.is_err());
    }
}
