// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::{self, OperationCatalog};
use crate::client::{ApiClient, OperationExecutor};
use crate::config::Config;
use crate::error::BridgeError;
use crate::notion::{self, NodeKind, PageSnapshot};

use super::types::*;

pub const TOOL_READ_PAGE: &str = "read_page";
pub const TOOL_APPEND_BLOCK: &str = "append_block";
pub const TOOL_UPDATE_BLOCK: &str = "update_block";
pub const TOOL_DELETE_BLOCK: &str = "delete_block";

/// The tool dispatcher.
///
/// Holds the read-only pieces every invocation shares (configuration, operation
/// catalog, HTTP executor) and maps each of the four tool names onto its
/// handler. Handlers return `Result<CallToolResult, BridgeError>`; the single
/// error boundary in [`dispatch`](Self::dispatch) converts failures into the
/// uniform `isError` envelope, so no tool-level failure ever reaches the
/// transport as a protocol fault.
#[derive(Clone)]
pub struct NaiadMcp {
    config: Config,
    catalog: OperationCatalog,
    executor: Arc<dyn OperationExecutor>,
}

impl NaiadMcp {
    /// Wires the production executor against the catalog's declared server.
    pub fn new(config: Config, catalog: OperationCatalog) -> Result<Self, BridgeError> {
        let client = ApiClient::new(catalog.base_url(), config.token())?;
        Ok(Self::with_executor(config, catalog, Arc::new(client)))
    }

    /// Uses a caller-supplied executor; the seam the dispatcher tests inject
    /// their doubles through.
    pub fn with_executor(
        config: Config,
        catalog: OperationCatalog,
        executor: Arc<dyn OperationExecutor>,
    ) -> Self {
        Self { config, catalog, executor }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// The static tool catalog: exactly these four, never derived from the
    /// operation catalog.
    pub fn tool_catalog() -> Vec<Tool> {
        vec![
            Tool::new(
                TOOL_READ_PAGE,
                "Read the title and blocks of the configured Notion page.",
                empty_input_schema(),
            ),
            Tool::new(
                TOOL_APPEND_BLOCK,
                "Append a new text paragraph to the configured Notion page.",
                input_schema::<AppendBlockParams>(),
            ),
            Tool::new(
                TOOL_UPDATE_BLOCK,
                "Update the text of an existing block.",
                input_schema::<UpdateBlockParams>(),
            ),
            Tool::new(
                TOOL_DELETE_BLOCK,
                "Delete (archive) a block.",
                input_schema::<DeleteBlockParams>(),
            ),
        ]
    }

    /// Resolves the named tool and runs it. Every failure raised anywhere in
    /// the invocation is caught here, exactly once.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        tracing::debug!(tool = name, "dispatching tool call");
        let outcome = match name {
            TOOL_READ_PAGE => self.handle_read_page().await,
            TOOL_APPEND_BLOCK => self.handle_append_block(arguments).await,
            TOOL_UPDATE_BLOCK => self.handle_update_block(arguments).await,
            TOOL_DELETE_BLOCK => self.handle_delete_block(arguments).await,
            _ => Err(BridgeError::UnknownTool { name: name.to_owned() }),
        };

        match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(tool = name, error = %err, "tool call failed");
                error_result(&err)
            }
        }
    }

    async fn handle_read_page(&self) -> Result<CallToolResult, BridgeError> {
        let page_id = self.config.require_page_id()?;

        let retrieve_page = self.catalog.get(catalog::RETRIEVE_PAGE)?;
        let page = self
            .executor
            .execute(retrieve_page, &single_param("page_id", page_id.as_str()))
            .await?;
        let title = notion::extract_page_title(&page);

        let list_children = self.catalog.get(catalog::GET_BLOCK_CHILDREN)?;
        let listing = self
            .executor
            .execute(list_children, &single_param("block_id", page_id.as_str()))
            .await?;
        let blocks = notion::extract_blocks(&listing);

        Ok(success_json(&PageSnapshot { title, blocks }))
    }

    async fn handle_append_block(
        &self,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, BridgeError> {
        let params: AppendBlockParams = parse_arguments(arguments)?;
        let page_id = self.config.require_page_id()?;
        let text = notion::attributed_text(&params.text, params.user_name.as_deref());

        let append_children = self.catalog.get(catalog::PATCH_BLOCK_CHILDREN)?;
        let mut call_params = single_param("block_id", page_id.as_str());
        call_params
            .insert("children".to_owned(), Value::Array(vec![notion::paragraph_node(&text)]));
        let response = self.executor.execute(append_children, &call_params).await?;

        let block_id = response
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .and_then(|node| node.get("id"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(success_json(&AppendBlockResult { block_id }))
    }

    async fn handle_update_block(
        &self,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, BridgeError> {
        let params: UpdateBlockParams = parse_arguments(arguments)?;
        let text = notion::attributed_text(&params.text, params.user_name.as_deref());

        // Step 1: discover the node's type discriminant. The mutation payload
        // is keyed by it and must not be assumed.
        let retrieve_block = self.catalog.get(catalog::RETRIEVE_BLOCK)?;
        let node = self
            .executor
            .execute(retrieve_block, &single_param("block_id", &params.block_id))
            .await?;
        let discriminant = node.get("type").and_then(Value::as_str).unwrap_or_default();
        let kind = NodeKind::from_discriminant(discriminant);
        if !kind.supports_rich_text() {
            return Err(BridgeError::UnsupportedBlockType { block_type: discriminant.to_owned() });
        }

        // Step 2: write through the discovered discriminant.
        let update_block = self.catalog.get(catalog::UPDATE_BLOCK)?;
        let mut call_params = single_param("block_id", &params.block_id);
        call_params.extend(notion::rich_text_patch(&kind, &text));
        let response = self.executor.execute(update_block, &call_params).await?;

        Ok(success_json(&response))
    }

    async fn handle_delete_block(
        &self,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, BridgeError> {
        let params: DeleteBlockParams = parse_arguments(arguments)?;

        let delete_block = self.catalog.get(catalog::DELETE_BLOCK)?;
        let response = self
            .executor
            .execute(delete_block, &single_param("block_id", &params.block_id))
            .await?;

        Ok(success_json(&response))
    }
}

impl ServerHandler for NaiadMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Naiad Notion page bridge (tools: read_page, append_block, update_block, delete_block)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: Self::tool_catalog(),
            ..Default::default()
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move { Ok(self.dispatch(&request.name, request.arguments).await) }
    }
}

/// Converts a dispatch failure into the uniform error envelope. Upstream
/// failures keep the remote status and payload verbatim; everything else
/// renders its diagnostic text.
fn error_result(err: &BridgeError) -> CallToolResult {
    let text = match err {
        BridgeError::Upstream { details, .. } => serde_json::to_string(&json!({
            "status": "error",
            "message": err.to_string(),
            "details": details.clone().unwrap_or(Value::Null),
        }))
        .expect("error payloads encode as JSON"),
        other => format!("Error: {other}"),
    };
    CallToolResult::error(vec![Content::text(text)])
}

fn success_json<T: Serialize>(payload: &T) -> CallToolResult {
    let text = serde_json::to_string_pretty(payload).expect("tool payloads encode as JSON");
    CallToolResult::success(vec![Content::text(text)])
}

fn parse_arguments<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, BridgeError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|err| BridgeError::InvalidArguments { message: err.to_string() })
}

fn single_param(name: &str, value: &str) -> JsonObject {
    let mut params = JsonObject::new();
    params.insert(name.to_owned(), Value::String(value.to_owned()));
    params
}

fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let schema =
        serde_json::to_value(schemars::schema_for!(T)).expect("tool schemas encode as JSON");
    match schema {
        Value::Object(object) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}

fn empty_input_schema() -> Arc<JsonObject> {
    let mut schema = JsonObject::new();
    schema.insert("type".to_owned(), json!("object"));
    schema.insert("properties".to_owned(), json!({}));
    Arc::new(schema)
}
