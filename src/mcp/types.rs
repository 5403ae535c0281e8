// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AppendBlockParams {
    /// The text content of the new block.
    pub text: String,
    /// When given, an attribution line naming this user and the current time
    /// is appended to the text.
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateBlockParams {
    /// The id of the block to update.
    pub block_id: String,
    /// The new text content.
    pub text: String,
    /// When given, an attribution line naming this user and the current time
    /// is appended to the text.
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteBlockParams {
    /// The id of the block to delete (archive).
    pub block_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppendBlockResult {
    /// Id of the created block, when the remote response carried one.
    pub block_id: Option<String>,
}
