// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The closed error set for tool dispatch.
//!
//! Every failure inside a single tool invocation is one of these variants and is
//! converted to the uniform tool envelope exactly once, at the dispatch boundary.
//! Nothing here is fatal to the server process.

use std::fmt;

use serde_json::Value;

/// Everything that can go wrong between receiving a tool call and returning its
/// envelope.
///
/// Configuration-class: [`MissingBaseUrl`](Self::MissingBaseUrl),
/// [`MissingPageId`](Self::MissingPageId), [`ClientInit`](Self::ClientInit).
/// Lookup-class: [`UnknownTool`](Self::UnknownTool),
/// [`UnknownOperation`](Self::UnknownOperation).
/// The remaining variants map one-to-one onto upstream, domain-shape, and
/// validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// The operation catalog declares no server to call against.
    MissingBaseUrl,
    /// No target page is configured for a page-scoped tool.
    MissingPageId,
    /// The HTTP client could not be built from the configuration.
    ClientInit { message: String },
    /// A tool call named a tool outside the fixed catalog.
    UnknownTool { name: String },
    /// A handler resolved an operation id absent from the catalog.
    UnknownOperation { operation_id: String },
    /// The remote call failed, either in transport or with a non-success
    /// status. Status and response payload are preserved verbatim when the
    /// upstream provided them.
    Upstream {
        status: Option<u16>,
        message: String,
        details: Option<Value>,
    },
    /// The targeted content node's kind has no rich-text-bearing shape, so the
    /// requested text mutation cannot be expressed.
    UnsupportedBlockType { block_type: String },
    /// Tool arguments were missing or ill-typed.
    InvalidArguments { message: String },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => {
                write!(f, "operation catalog declares no base URL")
            }
            Self::MissingPageId => {
                write!(f, "NOTION_PAGE_ID is not set")
            }
            Self::ClientInit { message } => {
                write!(f, "cannot build HTTP client: {message}")
            }
            Self::UnknownTool { name } => {
                write!(f, "unknown tool: {name}")
            }
            Self::UnknownOperation { operation_id } => {
                write!(f, "operation {operation_id} not found in catalog")
            }
            Self::Upstream { status, message, .. } => match status {
                Some(status) => write!(f, "upstream call failed with {status}: {message}"),
                None => write!(f, "upstream call failed: {message}"),
            },
            Self::UnsupportedBlockType { block_type } => {
                write!(
                    f,
                    "block type '{block_type}' does not support text updates via this tool"
                )
            }
            Self::InvalidArguments { message } => {
                write!(f, "invalid arguments: {message}")
            }
        }
    }
}

impl std::error::Error for BridgeError {}
