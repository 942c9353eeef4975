//! keystore - file-backed string key-value store
//!
//! Stands in for browser local storage: a flat namespace of string keys and
//! string values persisted under one directory, one file per key.
//!
//! # Layout
//!
//! ```text
//! {dir}/
//! ├── yprompt_token
//! ├── yprompt_user
//! └── yprompt_config
//! ```
//!
//! # Example
//!
//! ```ignore
//! use keystore::LocalStore;
//!
//! let store = LocalStore::open("~/.local/share/yprompt/storage")?;
//! store.set("yprompt_token", "t1")?;
//! assert_eq!(store.get("yprompt_token")?, Some("t1".to_string()));
//! ```

pub mod cli;
mod store;

pub use store::LocalStore;
