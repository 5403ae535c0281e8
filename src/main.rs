// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Naiad CLI entrypoint.
//!
//! By default this serves MCP over stdio (intended for tool integrations).
//!
//! Use `--http-port` to serve MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp` instead. Diagnostics always go to stderr;
//! stdout belongs to the stdio transport.

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tracing_subscriber::EnvFilter;

use naiad::catalog::OperationCatalog;
use naiad::config::{Config, PageId, PAGE_ID_ENV};
use naiad::mcp::NaiadMcp;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--page <page-id>]\n  {program} [--page <page-id>] --http-port <port>\n\nServes MCP over stdio by default.\n--http-port serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp` instead.\n--page overrides the {PAGE_ID_ENV} environment variable.\n\nEnvironment:\n  NOTION_TOKEN    Notion integration token (bearer auth + pinned API version)\n  {PAGE_ID_ENV}  target page for read_page/append_block"
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    http_port: Option<u16>,
    page: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--http-port" => {
                if options.http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.http_port = Some(port);
            }
            "--page" => {
                if options.page.is_some() {
                    return Err(());
                }
                let page = args.next().ok_or(())?;
                options.page = Some(page);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "naiad".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

        let mut config = Config::from_env();
        if let Some(page) = options.page {
            config = config.with_page_id(PageId::new(page)?);
        }
        if config.page_id().is_none() {
            tracing::warn!(
                "{PAGE_ID_ENV} is not set; read_page and append_block will fail until a page id is configured"
            );
        }

        let catalog = OperationCatalog::notion()?;
        let server = NaiadMcp::new(config, catalog)?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        match options.http_port {
            Some(port) => runtime.block_on(serve_http(server, port))?,
            None => runtime.block_on(server.serve_stdio())?,
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("naiad: {err}");
        std::process::exit(1);
    }
}

async fn serve_http(server: NaiadMcp, port: u16) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(port = listener.local_addr()?.port(), "serving MCP over streamable HTTP");

    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        ..StreamableHttpServerConfig::default()
    };
    let session_manager = Arc::new(LocalSessionManager::default());
    let mcp_service = StreamableHttpService::new(move || Ok(server.clone()), session_manager, config);

    let router = Router::new().nest_service("/mcp", mcp_service);
    axum::serve(listener, router).await?;
    Ok(())
}
