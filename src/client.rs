// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP execution of catalog operations.
//!
//! The dispatcher never talks to the network directly; it goes through the
//! [`OperationExecutor`] contract, which the reqwest-backed [`ApiClient`]
//! implements in production and test doubles implement in the dispatcher tests.
//! No retry, backoff, or timeout policy lives here.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::catalog::OperationDescriptor;
use crate::error::BridgeError;

/// API version pinned for every call, sent whenever a token is configured.
const NOTION_VERSION: &str = "2022-06-28";

/// The execution contract: perform one remote call described by a descriptor
/// and return its parsed body, or a typed failure.
#[async_trait]
pub trait OperationExecutor: Send + Sync {
    async fn execute(
        &self,
        operation: &OperationDescriptor,
        params: &Map<String, Value>,
    ) -> Result<Value, BridgeError>;
}

/// Reqwest-backed executor for the Notion REST API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl ApiClient {
    /// Builds the client. With a token, every request carries
    /// `Authorization: Bearer <token>` and the pinned `Notion-Version` header;
    /// without one no auth headers are sent and calls fail upstream.
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> Result<Self, BridgeError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let bearer =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                    BridgeError::ClientInit {
                        message: format!("access token is not a valid header value: {err}"),
                    }
                })?;
            headers.insert(AUTHORIZATION, bearer);
            headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            headers,
        })
    }
}

#[async_trait]
impl OperationExecutor for ApiClient {
    async fn execute(
        &self,
        operation: &OperationDescriptor,
        params: &Map<String, Value>,
    ) -> Result<Value, BridgeError> {
        let (path, rest) = render_path(operation, params)?;
        let url = format!("{}{path}", self.base_url);

        let mut request =
            self.client.request(operation.method.clone(), &url).headers(self.headers.clone());
        if !rest.is_empty() {
            if operation.method == Method::GET {
                request = request.query(&query_pairs(&rest));
            } else {
                request = request.json(&Value::Object(rest));
            }
        }

        let response = request.send().await.map_err(|err| BridgeError::Upstream {
            status: None,
            message: format!("{} {path}: {err}", operation.method),
            details: None,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| BridgeError::Upstream {
            status: Some(status.as_u16()),
            message: format!("{} {path}: cannot read response body: {err}", operation.method),
            details: None,
        })?;

        if !status.is_success() {
            return Err(BridgeError::Upstream {
                status: Some(status.as_u16()),
                message: format!("{} {path} returned {status}", operation.method),
                details: serde_json::from_str(&body).ok(),
            });
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| BridgeError::Upstream {
            status: Some(status.as_u16()),
            message: format!("{} {path}: response is not valid JSON: {err}", operation.method),
            details: None,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.headers.contains_key(AUTHORIZATION))
            .finish()
    }
}

/// Substitutes the descriptor's path parameters into its template and returns
/// the rendered path plus the remaining parameters (the body or query part).
/// Missing path parameters and unresolved placeholders are argument errors.
fn render_path(
    operation: &OperationDescriptor,
    params: &Map<String, Value>,
) -> Result<(String, Map<String, Value>), BridgeError> {
    let mut path = operation.path_template.to_owned();
    let mut rest = params.clone();

    for name in operation.path_params {
        let value = rest.remove(*name).ok_or_else(|| BridgeError::InvalidArguments {
            message: format!("missing path parameter '{name}' for {}", operation.operation_id),
        })?;
        path = path.replace(&format!("{{{name}}}"), &scalar_string(&value));
    }

    if path.contains('{') {
        return Err(BridgeError::InvalidArguments {
            message: format!("unresolved placeholder in path template '{path}'"),
        });
    }

    Ok((path, rest))
}

fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params.iter().map(|(name, value)| (name.clone(), scalar_string(value))).collect()
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
