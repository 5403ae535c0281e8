// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Normalization of Notion resource payloads.
//!
//! Notion represents page content as a tagged union: every node carries a
//! `type` discriminant naming the sibling field that holds its payload. This
//! module reduces those loosely-typed payloads into the small stable shapes the
//! tools return ([`PageSnapshot`], [`Block`]) and constructs the content
//! payloads the write tools send. Everything here is pure; nothing is cached or
//! persisted, and every view is recomputed on read.

use chrono::{DateTime, FixedOffset, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const UNTITLED: &str = "Untitled";

/// The known content-node kinds, plus a catch-all for everything else.
///
/// `supports_rich_text` is the explicit capability check that replaces probing
/// the raw payload for a `rich_text` field: a kind either has a
/// rich-text-bearing shape or it does not, and unrecognized kinds never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Callout,
    Code,
    Divider,
    ChildPage,
    ChildDatabase,
    Image,
    Bookmark,
    Equation,
    TableOfContents,
    Other(String),
}

impl NodeKind {
    pub fn from_discriminant(raw: &str) -> Self {
        match raw {
            "paragraph" => Self::Paragraph,
            "heading_1" => Self::Heading1,
            "heading_2" => Self::Heading2,
            "heading_3" => Self::Heading3,
            "bulleted_list_item" => Self::BulletedListItem,
            "numbered_list_item" => Self::NumberedListItem,
            "to_do" => Self::ToDo,
            "toggle" => Self::Toggle,
            "quote" => Self::Quote,
            "callout" => Self::Callout,
            "code" => Self::Code,
            "divider" => Self::Divider,
            "child_page" => Self::ChildPage,
            "child_database" => Self::ChildDatabase,
            "image" => Self::Image,
            "bookmark" => Self::Bookmark,
            "equation" => Self::Equation,
            "table_of_contents" => Self::TableOfContents,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading_1",
            Self::Heading2 => "heading_2",
            Self::Heading3 => "heading_3",
            Self::BulletedListItem => "bulleted_list_item",
            Self::NumberedListItem => "numbered_list_item",
            Self::ToDo => "to_do",
            Self::Toggle => "toggle",
            Self::Quote => "quote",
            Self::Callout => "callout",
            Self::Code => "code",
            Self::Divider => "divider",
            Self::ChildPage => "child_page",
            Self::ChildDatabase => "child_database",
            Self::Image => "image",
            Self::Bookmark => "bookmark",
            Self::Equation => "equation",
            Self::TableOfContents => "table_of_contents",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this kind's payload carries a `rich_text` fragment sequence.
    pub fn supports_rich_text(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading1
                | Self::Heading2
                | Self::Heading3
                | Self::BulletedListItem
                | Self::NumberedListItem
                | Self::ToDo
                | Self::Toggle
                | Self::Quote
                | Self::Callout
                | Self::Code
        )
    }
}

/// Normalized view of one content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Block {
    /// Remote node id.
    pub id: String,
    /// The node's type discriminant, verbatim.
    #[serde(rename = "type")]
    pub kind: String,
    /// Concatenated plain text, empty for kinds without a rich-text shape.
    pub text: String,
}

/// The result of `read_page`: the page title plus its blocks in remote listing
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageSnapshot {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Scans the page's property bag for the property whose declared kind is
/// `title` and concatenates its fragments' plain text. Returns `"Untitled"`
/// when no property qualifies.
///
/// When more than one property carries the title kind the first one in the
/// bag's iteration order wins. The resource model nominally forbids that case
/// but nothing enforces it here, so first-match is implementation-defined
/// behavior, not a guarantee.
pub fn extract_page_title(page: &Value) -> String {
    let Some(properties) = page.get("properties").and_then(Value::as_object) else {
        return UNTITLED.to_owned();
    };

    for property in properties.values() {
        if property.get("type").and_then(Value::as_str) != Some("title") {
            continue;
        }
        let Some(fragments) = property.get("title").and_then(Value::as_array) else {
            continue;
        };
        if fragments.is_empty() {
            continue;
        }
        return join_plain_text(fragments);
    }

    UNTITLED.to_owned()
}

/// Maps a child-listing payload to normalized blocks, in listing order.
/// A missing or non-array `results` field yields an empty sequence; nodes
/// whose kind has no rich-text shape yield empty text.
pub fn extract_blocks(listing: &Value) -> Vec<Block> {
    let Some(results) = listing.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .map(|node| {
            let discriminant = node.get("type").and_then(Value::as_str).unwrap_or_default();
            let kind = NodeKind::from_discriminant(discriminant);
            let text = if kind.supports_rich_text() {
                node.get(discriminant)
                    .and_then(|payload| payload.get("rich_text"))
                    .and_then(Value::as_array)
                    .map(|fragments| join_plain_text(fragments))
                    .unwrap_or_default()
            } else {
                String::new()
            };
            Block {
                id: node.get("id").and_then(Value::as_str).unwrap_or_default().to_owned(),
                kind: discriminant.to_owned(),
                text,
            }
        })
        .collect()
}

/// One paragraph-shaped content node holding a single inline text fragment.
pub fn paragraph_node(text: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": {
            "rich_text": [text_fragment(text)],
        },
    })
}

/// An update payload keyed by the node's discovered discriminant.
pub fn rich_text_patch(kind: &NodeKind, text: &str) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert(
        kind.as_str().to_owned(),
        json!({
            "rich_text": [text_fragment(text)],
        }),
    );
    patch
}

fn text_fragment(text: &str) -> Value {
    json!({
        "type": "text",
        "text": {
            "content": text,
        },
    })
}

fn join_plain_text(fragments: &[Value]) -> String {
    fragments
        .iter()
        .filter_map(|fragment| fragment.get("plain_text").and_then(Value::as_str))
        .collect()
}

/// Appends the attribution suffix to `text` when a user name is given,
/// stamped with the current wall clock.
pub fn attributed_text(text: &str, user_name: Option<&str>) -> String {
    match user_name {
        Some(user_name) => {
            let now = Utc::now().with_timezone(&kolkata_offset());
            format!("{text}{}", attribution_suffix(user_name, now))
        }
        None => text.to_owned(),
    }
}

/// The attribution suffix for a fixed instant; kept separate from the
/// clock-taking wrapper so the rendering is testable.
pub fn attribution_suffix(user_name: &str, at: DateTime<FixedOffset>) -> String {
    let stamp = at.format("%-d/%-m/%Y, %-I:%M:%S %P");
    format!("\n\nAction performed by {user_name} at {stamp}")
}

/// Attribution timestamps render in IST (UTC+05:30). The offset is fixed
/// because IST observes no daylight saving.
fn kolkata_offset() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range")
}
