// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer exposes the four page tools and dispatches each call through
//! the operation catalog to the HTTP executor.

mod server;
mod types;

pub use server::NaiadMcp;
pub use types::{AppendBlockParams, AppendBlockResult, DeleteBlockParams, UpdateBlockParams};
