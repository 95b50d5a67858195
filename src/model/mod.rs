// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Everything here is a value object: ids, attribute descriptors and
//! connection sets are built from live host state immediately before an
//! operation and discarded after it.

pub mod attribute;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod plug;

pub use attribute::{
    AttrDefinition, AttrKind, AttrValue, AttributeDescriptor, DescriptorError, NumericRange,
};
pub use ids::{AttrName, Id, IdError, NodeId};
pub use plug::{ConnectionSet, ParsePlugError, Plug};
