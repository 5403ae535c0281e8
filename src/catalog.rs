// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The operation catalog.
//!
//! An immutable lookup table from operation identifier to the descriptor of one
//! remote HTTP call (method, path template, path-parameter names), built once at
//! startup and only ever read after that. The identifiers are the stable ids of
//! the Notion OpenAPI description; the catalog itself does no OpenAPI parsing.

use std::collections::BTreeMap;

use reqwest::Method;

use crate::error::BridgeError;

/// `GET /v1/pages/{page_id}` — retrieve a page resource.
pub const RETRIEVE_PAGE: &str = "API-retrieve-a-page";
/// `GET /v1/blocks/{block_id}/children` — list a block's children.
pub const GET_BLOCK_CHILDREN: &str = "API-get-block-children";
/// `PATCH /v1/blocks/{block_id}/children` — append children to a block.
pub const PATCH_BLOCK_CHILDREN: &str = "API-patch-block-children";
/// `GET /v1/blocks/{block_id}` — retrieve a single block.
pub const RETRIEVE_BLOCK: &str = "API-retrieve-a-block";
/// `PATCH /v1/blocks/{block_id}` — update a single block.
pub const UPDATE_BLOCK: &str = "API-update-a-block";
/// `DELETE /v1/blocks/{block_id}` — archive a single block.
pub const DELETE_BLOCK: &str = "API-delete-a-block";

const NOTION_BASE_URL: &str = "https://api.notion.com";

/// How to perform one remote HTTP call.
///
/// Parameters named in `path_params` are substituted into the path template;
/// everything else a caller passes travels as the request body (or as query
/// parameters for GET).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub operation_id: &'static str,
    pub method: Method,
    pub path_template: &'static str,
    pub path_params: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct OperationCatalog {
    base_url: String,
    operations: BTreeMap<&'static str, OperationDescriptor>,
}

impl OperationCatalog {
    /// Builds a catalog from a declared server list and a set of descriptors.
    /// An empty server list is a fatal configuration error; the first declared
    /// server wins, trailing slash normalized away.
    pub fn from_parts(
        servers: &[&str],
        descriptors: Vec<OperationDescriptor>,
    ) -> Result<Self, BridgeError> {
        let base_url = servers.first().ok_or(BridgeError::MissingBaseUrl)?;
        let mut operations = BTreeMap::new();
        for descriptor in descriptors {
            operations.insert(descriptor.operation_id, descriptor);
        }
        Ok(Self { base_url: base_url.trim_end_matches('/').to_owned(), operations })
    }

    /// The fixed Notion table used by the four page tools.
    pub fn notion() -> Result<Self, BridgeError> {
        Self::from_parts(&[NOTION_BASE_URL], notion_operations())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pure map lookup; an absent identifier is a lookup error, never a panic.
    pub fn get(&self, operation_id: &str) -> Result<&OperationDescriptor, BridgeError> {
        self.operations.get(operation_id).ok_or_else(|| BridgeError::UnknownOperation {
            operation_id: operation_id.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn notion_operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor {
            operation_id: RETRIEVE_PAGE,
            method: Method::GET,
            path_template: "/v1/pages/{page_id}",
            path_params: &["page_id"],
        },
        OperationDescriptor {
            operation_id: GET_BLOCK_CHILDREN,
            method: Method::GET,
            path_template: "/v1/blocks/{block_id}/children",
            path_params: &["block_id"],
        },
        OperationDescriptor {
            operation_id: PATCH_BLOCK_CHILDREN,
            method: Method::PATCH,
            path_template: "/v1/blocks/{block_id}/children",
            path_params: &["block_id"],
        },
        OperationDescriptor {
            operation_id: RETRIEVE_BLOCK,
            method: Method::GET,
            path_template: "/v1/blocks/{block_id}",
            path_params: &["block_id"],
        },
        OperationDescriptor {
            operation_id: UPDATE_BLOCK,
            method: Method::PATCH,
            path_template: "/v1/blocks/{block_id}",
            path_params: &["block_id"],
        },
        OperationDescriptor {
            operation_id: DELETE_BLOCK,
            method: Method::DELETE,
            path_template: "/v1/blocks/{block_id}",
            path_params: &["block_id"],
        },
    ]
}
