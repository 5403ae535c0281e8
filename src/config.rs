// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process configuration.
//!
//! Credentials and the target page id are read from the environment exactly once
//! at startup and carried as an explicit [`Config`] value from then on; tools
//! that need the page id check it per call through [`Config::require_page_id`]
//! and get a typed absence error instead of probing the environment themselves.

use std::env;

use crate::error::BridgeError;

/// Environment variable holding the Notion integration token.
pub const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Environment variable holding the id of the page the page-scoped tools
/// operate on.
pub const PAGE_ID_ENV: &str = "NOTION_PAGE_ID";

/// A validated, non-empty Notion page id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageId(String);

impl PageId {
    /// Validates and wraps a page id. Empty or whitespace-only input counts as
    /// absent and yields [`BridgeError::MissingPageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, BridgeError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(BridgeError::MissingPageId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    token: Option<String>,
    page_id: Option<PageId>,
}

impl Config {
    pub fn new(token: Option<String>, page_id: Option<PageId>) -> Self {
        Self { token, page_id }
    }

    /// Reads `NOTION_TOKEN` and `NOTION_PAGE_ID`. Blank values count as unset.
    pub fn from_env() -> Self {
        let token = env::var(TOKEN_ENV).ok().filter(|token| !token.trim().is_empty());
        let page_id = env::var(PAGE_ID_ENV).ok().and_then(|raw| PageId::new(raw).ok());
        Self { token, page_id }
    }

    /// Replaces the configured page id (CLI override).
    pub fn with_page_id(mut self, page_id: PageId) -> Self {
        self.page_id = Some(page_id);
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn page_id(&self) -> Option<&PageId> {
        self.page_id.as_ref()
    }

    /// The per-call check used by `read_page` and `append_block`.
    pub fn require_page_id(&self) -> Result<&PageId, BridgeError> {
        self.page_id.as_ref().ok_or(BridgeError::MissingPageId)
    }
}
