// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Notion-Version header sent when none is configured.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the public REST API, version segment included.
pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Per-request timeout of the HTTP client, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Traversal boundaries
// ---------------------------------------------------------------------------

/// Levels of children expanded below the root block.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Nodes materialized across a whole conversion before fetching stops.
pub const DEFAULT_MAX_NODES: usize = 500;

/// Site that `link_to_page` targets resolve against.
pub const DEFAULT_SITE_BASE_URL: &str = "https://www.notion.so";

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Number of spaces per indentation level in formatted output.
pub const INDENT_SPACES: usize = 2;

/// Document emitted when a page has nothing renderable.
pub const EMPTY_DOCUMENT_PLACEHOLDER: &str = "(no textual content)";

/// Emitted in place of a table with no rows or no columns.
pub const EMPTY_TABLE_PLACEHOLDER: &str = "[Table]";

/// Fence language for code blocks that declare none.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Configuration bounds
// ---------------------------------------------------------------------------

/// Deepest traversal a user may request.
pub const MAX_DEPTH_LIMIT: usize = 32;

/// Largest node budget a user may request.
pub const MAX_NODES_LIMIT: usize = 100_000;

/// Results converted by `search` when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Title property filtered on by database queries.
pub const DEFAULT_TITLE_PROPERTY: &str = "Name";
