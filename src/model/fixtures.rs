// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::host::{MemoryScene, SceneGraph};
use crate::model::{AttrDefinition, AttrKind, AttrName, AttrValue, NodeId, Plug};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn aname(value: &str) -> AttrName {
    AttrName::new(value).expect("attr name")
}

pub(crate) fn plug(path: &str) -> Plug {
    path.parse().expect("plug path")
}

pub(crate) fn add_float(scene: &mut MemoryScene, node: &str, attr: &str, value: f64) {
    scene
        .add_attribute(&nid(node), AttrDefinition::new(aname(attr), AttrKind::Float))
        .expect("add float attr");
    scene
        .set_value(&plug(&format!("{node}.{attr}")), AttrValue::Float(value))
        .expect("set float attr");
}

pub(crate) fn add_vector3(scene: &mut MemoryScene, node: &str, attr: &str, axes: [f64; 3]) {
    scene
        .add_attribute(&nid(node), AttrDefinition::new(aname(attr), AttrKind::Vector3))
        .expect("add vector3 parent");
    for (axis, value) in ["X", "Y", "Z"].into_iter().zip(axes) {
        let child_name = format!("{attr}{axis}");
        let mut child = AttrDefinition::new(aname(&child_name), AttrKind::Float);
        child.set_parent(Some(aname(attr)));
        scene
            .add_attribute(&nid(node), child)
            .expect("add vector3 child");
        scene
            .set_value(&plug(&format!("{node}.{child_name}")), AttrValue::Float(value))
            .expect("set vector3 child");
    }
}

/// `driver.out -> ctl.amount -> consumer.in`, with `ctl.amount = 2.5`.
pub(crate) fn rig_with_driven_float() -> MemoryScene {
    let mut scene = MemoryScene::new();
    for node in ["driver", "ctl", "consumer", "grp"] {
        scene.add_node(nid(node));
    }
    add_float(&mut scene, "driver", "out", 1.0);
    add_float(&mut scene, "consumer", "in", 0.0);
    add_float(&mut scene, "ctl", "amount", 2.5);
    scene
        .connect(&plug("driver.out"), &plug("ctl.amount"), false)
        .expect("connect driver");
    scene
        .connect(&plug("ctl.amount"), &plug("consumer.in"), false)
        .expect("connect consumer");
    scene
}

/// `driver.out -> ctl.offset` (parent level), `ctl.offsetX -> consumer.in`,
/// with `ctl.offset = (1, 2, 3)`.
pub(crate) fn rig_with_vector3() -> MemoryScene {
    let mut scene = MemoryScene::new();
    for node in ["driver", "ctl", "consumer", "grp"] {
        scene.add_node(nid(node));
    }
    add_vector3(&mut scene, "driver", "out", [0.0, 0.0, 0.0]);
    add_vector3(&mut scene, "ctl", "offset", [1.0, 2.0, 3.0]);
    add_float(&mut scene, "consumer", "in", 0.0);
    scene
        .connect(&plug("driver.out"), &plug("ctl.offset"), false)
        .expect("connect parent");
    scene
        .connect(&plug("ctl.offsetX"), &plug("consumer.in"), false)
        .expect("connect child");
    scene
}

/// A node with four ordered user attributes `[alpha, beta, gamma, delta]`
/// and an empty `grp` node to transplant onto.
pub(crate) fn channel_box_rig() -> MemoryScene {
    let mut scene = MemoryScene::new();
    scene.add_node(nid("ctl"));
    scene.add_node(nid("grp"));
    add_float(&mut scene, "ctl", "alpha", 1.0);
    add_float(&mut scene, "ctl", "beta", 2.0);
    add_float(&mut scene, "ctl", "gamma", 3.0);
    add_float(&mut scene, "ctl", "delta", 4.0);
    scene
}
