// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Public contract checks: the documented tool catalog and operation table.

use naiad::catalog::{
    OperationCatalog, DELETE_BLOCK, GET_BLOCK_CHILDREN, PATCH_BLOCK_CHILDREN, RETRIEVE_BLOCK,
    RETRIEVE_PAGE, UPDATE_BLOCK,
};
use naiad::config::Config;
use naiad::mcp::NaiadMcp;
use rmcp::ServerHandler;

#[test]
fn operation_catalog_covers_the_six_documented_calls() {
    let catalog = OperationCatalog::notion().expect("notion catalog");
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.base_url(), "https://api.notion.com");

    for (operation_id, path) in [
        (RETRIEVE_PAGE, "/v1/pages/{page_id}"),
        (GET_BLOCK_CHILDREN, "/v1/blocks/{block_id}/children"),
        (PATCH_BLOCK_CHILDREN, "/v1/blocks/{block_id}/children"),
        (RETRIEVE_BLOCK, "/v1/blocks/{block_id}"),
        (UPDATE_BLOCK, "/v1/blocks/{block_id}"),
        (DELETE_BLOCK, "/v1/blocks/{block_id}"),
    ] {
        let descriptor = catalog.get(operation_id).expect("documented operation");
        assert_eq!(descriptor.path_template, path);
    }
}

#[test]
fn tool_catalog_matches_the_readme_table() {
    let tools = NaiadMcp::tool_catalog();
    let names = tools.iter().map(|tool| tool.name.as_ref()).collect::<Vec<_>>();
    assert_eq!(names, vec!["read_page", "append_block", "update_block", "delete_block"]);

    for tool in &tools {
        let description = tool.description.as_deref().unwrap_or_default();
        assert!(!description.is_empty(), "tool {} has no description", tool.name);
    }
}

#[test]
fn server_advertises_the_tools_capability() {
    let catalog = OperationCatalog::notion().expect("notion catalog");
    let server = NaiadMcp::new(Config::new(None, None), catalog).expect("server");

    let info = server.get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.expect("instructions").contains("read_page"));
}
