//! yprompt - client-side stores for a browser-based prompt-engineering tool
//!
//! Two independent components with no shared internal state:
//!
//! - [`store::PromptConfigStore`]: a record of editable prompt rule texts with
//!   a three-tier read path (memory → local snapshot → remote account store),
//!   dirty-field tracking for partial sync, and compiled-in defaults that
//!   guarantee every field always has a value.
//! - [`auth::AuthStore`]: session token and user profile lifecycle around a
//!   REST API, mirrored into local storage. A successful login invalidates
//!   the config store's session-loaded guard and re-pulls from remote.
//!
//! Local persistence goes through [`keystore::LocalStore`], the file-backed
//! stand-in for browser local storage.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod rules;
pub mod schema;
pub mod store;

pub use auth::AuthStore;
pub use schema::PromptField;
pub use store::{LoadOutcome, PromptConfigStore};

/// Storage key holding the full prompt rule record as one JSON snapshot
pub const KEY_CONFIG: &str = "yprompt_config";

/// Storage key holding the session token
pub const KEY_TOKEN: &str = "yprompt_token";

/// Storage key holding the serialized user record
pub const KEY_USER: &str = "yprompt_user";

/// Storage key holding the dirty-field markers (remote key names), so a
/// pending sync survives process restarts
pub const KEY_DIRTY: &str = "yprompt_dirty";

/// Feature cache keys removed on logout (optimize and generate module state)
pub const LOGOUT_CACHE_KEYS: [&str; 9] = [
    "user_prompt_optimize_data",
    "yprompt_optimize_active_mode",
    "yprompt_optimize_cache",
    "yprompt_user_optimize_active_tab",
    "yprompt_optimize_loaded_user_prompt",
    "yprompt_optimize_result",
    "yprompt_generate_messages",
    "yprompt_generate_prompt_data",
    "yprompt_settings_cache",
];

/// Storage key prefixes swept on logout, after the fixed list above
pub const LOGOUT_SWEEP_PREFIXES: [&str; 2] = ["yprompt_", "user_prompt_"];
