// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::AttrName;

/// The closed set of user-attribute kinds the engine understands.
///
/// Kind-dependent behavior (ranges, compound children, output reconnection)
/// dispatches on this enum so a missing arm is a compile error, not a silent
/// string mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrKind {
    Integer,
    Float,
    Boolean,
    Enum,
    String,
    Vector3,
    Divider,
}

impl AttrKind {
    /// Kinds that accept a numeric min/max range.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// The only compound kind: one parent with exactly three axis children.
    pub fn is_compound(self) -> bool {
        matches!(self, Self::Vector3)
    }

    /// Kinds whose captured *output* endpoints are re-driven after a
    /// transplant. String plugs are deliberately excluded.
    pub fn reconnects_outputs(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::Boolean | Self::Enum | Self::Vector3
        )
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
            Self::String => "string",
            Self::Vector3 => "vector3",
            Self::Divider => "divider",
        };
        f.write_str(label)
    }
}

/// A kind-dependent attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    EnumIndex(usize),
    String(String),
    Vector3([f64; 3]),
}

impl AttrValue {
    pub fn kind(&self) -> AttrKind {
        match self {
            Self::Integer(_) => AttrKind::Integer,
            Self::Float(_) => AttrKind::Float,
            Self::Boolean(_) => AttrKind::Boolean,
            Self::EnumIndex(_) => AttrKind::Enum,
            Self::String(_) => AttrKind::String,
            Self::Vector3(_) => AttrKind::Vector3,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_vector3(&self) -> Option<[f64; 3]> {
        match self {
            Self::Vector3(axes) => Some(*axes),
            _ => None,
        }
    }
}

/// Optional numeric clamp, only meaningful for numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Single-level attribute metadata, as the host reports it.
///
/// This is the unit the host can create in one call; compound structure is
/// expressed by creating the parent first and each child with `parent` set,
/// the same order the engine materializes them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrDefinition {
    name: AttrName,
    nice_name: String,
    short_name: String,
    kind: AttrKind,
    hidden: bool,
    keyable: bool,
    default_value: Option<AttrValue>,
    range: NumericRange,
    enum_items: Vec<String>,
    parent: Option<AttrName>,
}

impl AttrDefinition {
    pub fn new(name: AttrName, kind: AttrKind) -> Self {
        let nice_name = name.as_str().to_owned();
        let short_name = name.as_str().to_owned();
        Self {
            name,
            nice_name,
            short_name,
            kind,
            hidden: false,
            keyable: true,
            default_value: None,
            range: NumericRange::default(),
            enum_items: Vec::new(),
            parent: None,
        }
    }

    pub fn name(&self) -> &AttrName {
        &self.name
    }

    pub fn nice_name(&self) -> &str {
        &self.nice_name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn kind(&self) -> AttrKind {
        self.kind
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn keyable(&self) -> bool {
        self.keyable
    }

    pub fn default_value(&self) -> Option<&AttrValue> {
        self.default_value.as_ref()
    }

    pub fn range(&self) -> NumericRange {
        self.range
    }

    pub fn enum_items(&self) -> &[String] {
        &self.enum_items
    }

    /// Back-reference to the compound parent, set on axis children only.
    pub fn parent(&self) -> Option<&AttrName> {
        self.parent.as_ref()
    }

    pub fn set_name(&mut self, name: AttrName) {
        self.name = name;
    }

    pub fn set_nice_name(&mut self, nice_name: impl Into<String>) {
        self.nice_name = nice_name.into();
    }

    pub fn set_short_name(&mut self, short_name: impl Into<String>) {
        self.short_name = short_name.into();
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn set_keyable(&mut self, keyable: bool) {
        self.keyable = keyable;
    }

    pub fn set_default_value(&mut self, default_value: Option<AttrValue>) {
        self.default_value = default_value;
    }

    pub fn set_range(&mut self, range: NumericRange) {
        self.range = range;
    }

    pub fn set_enum_items(&mut self, enum_items: Vec<String>) {
        self.enum_items = enum_items;
    }

    pub fn set_parent(&mut self, parent: Option<AttrName>) {
        self.parent = parent;
    }
}

/// A full, node-independent description of one user-defined attribute.
///
/// Descriptors are ephemeral: built immediately before a transplant and
/// discarded after. A vector3 descriptor always carries exactly three scalar
/// children in axis order, each with its `parent` back-reference set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    definition: AttrDefinition,
    locked: bool,
    current_value: Option<AttrValue>,
    children: Vec<AttributeDescriptor>,
}

impl AttributeDescriptor {
    pub fn new(
        definition: AttrDefinition,
        locked: bool,
        current_value: Option<AttrValue>,
        children: Vec<AttributeDescriptor>,
    ) -> Result<Self, DescriptorError> {
        if definition.kind().is_compound() {
            if children.len() != 3 {
                return Err(DescriptorError::CompoundChildCount {
                    found: children.len(),
                });
            }
            for child in &children {
                if child.definition.kind().is_compound() {
                    return Err(DescriptorError::NestedCompound {
                        child: child.definition.name().clone(),
                    });
                }
                if child.definition.parent() != Some(definition.name()) {
                    return Err(DescriptorError::ChildParentMismatch {
                        child: child.definition.name().clone(),
                    });
                }
            }
        } else if !children.is_empty() {
            return Err(DescriptorError::ChildrenOnScalar {
                kind: definition.kind(),
            });
        }

        Ok(Self {
            definition,
            locked,
            current_value,
            children,
        })
    }

    pub fn definition(&self) -> &AttrDefinition {
        &self.definition
    }

    pub fn name(&self) -> &AttrName {
        self.definition.name()
    }

    pub fn kind(&self) -> AttrKind {
        self.definition.kind()
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn current_value(&self) -> Option<&AttrValue> {
        self.current_value.as_ref()
    }

    pub fn children(&self) -> &[AttributeDescriptor] {
        &self.children
    }

    pub fn is_compound(&self) -> bool {
        self.definition.kind().is_compound()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    CompoundChildCount { found: usize },
    ChildrenOnScalar { kind: AttrKind },
    ChildParentMismatch { child: AttrName },
    NestedCompound { child: AttrName },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompoundChildCount { found } => {
                write!(f, "vector3 descriptor must have exactly 3 children, found {found}")
            }
            Self::ChildrenOnScalar { kind } => {
                write!(f, "{kind} descriptor must not have children")
            }
            Self::ChildParentMismatch { child } => {
                write!(f, "child '{child}' does not back-reference its compound parent")
            }
            Self::NestedCompound { child } => {
                write!(f, "child '{child}' is itself a compound, which is unsupported")
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

#[cfg(test)]
mod tests {
    use super::{AttrDefinition, AttrKind, AttrValue, AttributeDescriptor, DescriptorError};
    use crate::model::AttrName;

    fn name(value: &str) -> AttrName {
        AttrName::new(value).expect("attr name")
    }

    fn scalar_child(child: &str, parent: &str) -> AttributeDescriptor {
        let mut definition = AttrDefinition::new(name(child), AttrKind::Float);
        definition.set_parent(Some(name(parent)));
        AttributeDescriptor::new(definition, false, Some(AttrValue::Float(0.0)), Vec::new())
            .expect("child descriptor")
    }

    #[test]
    fn vector3_descriptor_requires_exactly_three_children() {
        let definition = AttrDefinition::new(name("offset"), AttrKind::Vector3);
        let children = vec![
            scalar_child("offsetX", "offset"),
            scalar_child("offsetY", "offset"),
        ];
        let result = AttributeDescriptor::new(definition, false, None, children);
        assert_eq!(result, Err(DescriptorError::CompoundChildCount { found: 2 }));
    }

    #[test]
    fn scalar_descriptor_rejects_children() {
        let definition = AttrDefinition::new(name("weight"), AttrKind::Float);
        let children = vec![scalar_child("weightX", "weight")];
        let result = AttributeDescriptor::new(definition, false, None, children);
        assert_eq!(
            result,
            Err(DescriptorError::ChildrenOnScalar {
                kind: AttrKind::Float
            })
        );
    }

    #[test]
    fn vector3_child_must_back_reference_parent() {
        let definition = AttrDefinition::new(name("offset"), AttrKind::Vector3);
        let children = vec![
            scalar_child("offsetX", "offset"),
            scalar_child("offsetY", "offset"),
            scalar_child("offsetZ", "elsewhere"),
        ];
        let result = AttributeDescriptor::new(definition, false, None, children);
        assert_eq!(
            result,
            Err(DescriptorError::ChildParentMismatch {
                child: name("offsetZ")
            })
        );
    }

    #[test]
    fn string_kind_does_not_reconnect_outputs() {
        assert!(!AttrKind::String.reconnects_outputs());
        assert!(!AttrKind::Divider.reconnects_outputs());
        assert!(AttrKind::Vector3.reconnects_outputs());
    }

    #[test]
    fn descriptor_serializes_for_transport() {
        let mut definition = AttrDefinition::new(name("amount"), AttrKind::Integer);
        definition.set_default_value(Some(AttrValue::Integer(2)));
        let descriptor =
            AttributeDescriptor::new(definition, true, Some(AttrValue::Integer(5)), Vec::new())
                .expect("descriptor");

        let json = serde_json::to_value(&descriptor).expect("serialize");
        assert_eq!(json["definition"]["name"], "amount");
        assert_eq!(json["locked"], true);
        assert_eq!(json["current_value"]["integer"], 5);
    }
}
