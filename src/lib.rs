// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — connection-preserving attribute transplant engine for
//! scene-graph hosts.
//!
//! The engine copies, moves and reorders user-defined attributes across the
//! nodes of any host implementing [`host::SceneGraph`], keeping values, lock
//! state and existing connections intact. [`host::MemoryScene`] ships as the
//! in-memory reference host.

pub mod host;
pub mod model;
pub mod ops;
pub mod query;
pub mod session;
