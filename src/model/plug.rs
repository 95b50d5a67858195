// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ids::{AttrName, IdError, NodeId};

/// One connection endpoint: a `(node, attribute)` pair.
///
/// The canonical text form is `<node>.<attribute>`, matching how hosts
/// address plugs. Compound children are ordinary plugs; the parent/child
/// relationship lives in the attribute definition, not in the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Plug {
    node: NodeId,
    attr: AttrName,
}

impl Plug {
    pub fn new(node: NodeId, attr: AttrName) -> Self {
        Self { node, attr }
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn attr(&self) -> &AttrName {
        &self.attr
    }
}

impl fmt::Display for Plug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.attr)
    }
}

impl FromStr for Plug {
    type Err = ParsePlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((node, attr)) = s.split_once('.') else {
            return Err(ParsePlugError::MissingDot);
        };
        let node = NodeId::new(node).map_err(ParsePlugError::InvalidNode)?;
        let attr = AttrName::new(attr).map_err(ParsePlugError::InvalidAttr)?;
        Ok(Self { node, attr })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePlugError {
    MissingDot,
    InvalidNode(IdError),
    InvalidAttr(IdError),
}

impl fmt::Display for ParsePlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDot => f.write_str("plug path must contain '.'"),
            Self::InvalidNode(err) => write!(f, "invalid node segment: {err}"),
            Self::InvalidAttr(err) => write!(f, "invalid attribute segment: {err}"),
        }
    }
}

impl std::error::Error for ParsePlugError {}

/// The live wiring captured for one plug: ordered upstream endpoints feeding
/// it (normally 0 or 1) and ordered downstream endpoints it feeds (0..n).
///
/// Connection sets are ephemeral captures; they are rebuilt from the host for
/// every operation and never persist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionSet {
    inputs: SmallVec<[Plug; 1]>,
    outputs: Vec<Plug>,
}

impl ConnectionSet {
    pub fn new(inputs: impl IntoIterator<Item = Plug>, outputs: impl IntoIterator<Item = Plug>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            outputs: outputs.into_iter().collect(),
        }
    }

    pub fn inputs(&self) -> &[Plug] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Plug] {
        &self.outputs
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    /// Every endpoint in this set, inputs first, in capture order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Plug> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
