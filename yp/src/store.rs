//! PromptConfigStore - the editable prompt rule record
//!
//! Reads merge three sources in priority order: remote account store (at
//! most once per session), local snapshot, compiled-in default. Writes go to
//! memory, mark the field dirty, and persist the whole record locally; an
//! explicit sync pushes only the dirty fields to the remote store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use eyre::{Result, WrapErr};
use keystore::LocalStore;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{RemoteApi, RemoteRules};
use crate::schema::PromptField;
use crate::{KEY_CONFIG, KEY_DIRTY, KEY_TOKEN, rules};

/// The full prompt rule record. Invariant: every field always has a
/// non-empty value.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRecord {
    values: BTreeMap<PromptField, String>,
}

impl Default for PromptRecord {
    fn default() -> Self {
        let values = PromptField::ALL
            .into_iter()
            .map(|f| (f, f.default_text().to_string()))
            .collect();
        Self { values }
    }
}

/// Treat empty/whitespace JSON strings the same as absent values
fn non_empty_string(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

impl PromptRecord {
    pub fn get(&self, field: PromptField) -> &str {
        // Every field is inserted at construction, so the lookup cannot miss
        self.values.get(&field).map(String::as_str).unwrap_or_else(|| field.default_text())
    }

    pub fn set(&mut self, field: PromptField, value: String) {
        self.values.insert(field, value);
    }

    pub fn reset(&mut self, field: PromptField) {
        self.values.insert(field, field.default_text().to_string());
    }

    /// Serialize as the local snapshot blob (local keys)
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for field in PromptField::ALL {
            map.insert(field.local_key().to_string(), Value::String(self.get(field).to_string()));
        }
        Value::Object(map)
    }

    /// Rebuild from a local snapshot, field-wise: anything missing, empty,
    /// or mistyped falls back to the compiled default. Never fails.
    pub fn from_json(snapshot: &Value) -> Self {
        let mut record = Self::default();
        if let Value::Object(map) = snapshot {
            for field in PromptField::ALL {
                if let Some(value) = non_empty_string(map.get(field.local_key())) {
                    record.set(field, value.to_string());
                }
            }
        }
        record
    }

    /// Rebuild from the remote record (remote keys): a field present
    /// remotely wins, everything else is the compiled default
    pub fn from_remote(rules: &RemoteRules) -> Self {
        let mut record = Self::default();
        for field in PromptField::ALL {
            if let Some(value) = non_empty_string(rules.get(field.remote_key())) {
                record.set(field, value.to_string());
            }
        }
        record
    }
}

/// What a remote load attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No session token in storage; nothing attempted
    NotLoggedIn,
    /// Already loaded this session; no network call made
    AlreadyLoaded,
    /// Remote record fetched and applied over defaults
    Loaded,
    /// Remote answered success without data; defaults kept
    UsedDefaults,
}

/// The config store of spec §2: record + dirty set + session-loaded guard
pub struct PromptConfigStore {
    storage: LocalStore,
    api: Arc<dyn RemoteApi>,
    record: PromptRecord,
    dirty: BTreeSet<PromptField>,
    use_slim_rules: bool,
    /// Process-lifetime guard: at most one remote fetch per session unless
    /// explicitly invalidated. Never persisted.
    session_loaded: bool,
}

impl PromptConfigStore {
    /// Build the store, hydrating the record and the dirty markers from
    /// local storage.
    ///
    /// A missing, unreadable, or malformed snapshot is never an error: the
    /// record degrades field-wise to compiled defaults, and unusable dirty
    /// markers are dropped.
    pub fn open(storage: LocalStore, api: Arc<dyn RemoteApi>) -> Self {
        let record = match storage.get(KEY_CONFIG) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(snapshot) => PromptRecord::from_json(&snapshot),
                Err(e) => {
                    warn!(error = %e, "Malformed local config snapshot, using defaults");
                    PromptRecord::default()
                }
            },
            Ok(None) => PromptRecord::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read local config snapshot, using defaults");
                PromptRecord::default()
            }
        };

        let dirty = match storage.get_json::<Vec<String>>(KEY_DIRTY) {
            Ok(Some(keys)) => keys
                .iter()
                .filter_map(|key| PromptField::from_remote_key(key))
                .collect(),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!(error = %e, "Malformed dirty markers, dropping them");
                BTreeSet::new()
            }
        };

        Self {
            storage,
            api,
            record,
            dirty,
            use_slim_rules: false,
            session_loaded: false,
        }
    }

    /// Toggle the slim variant of the system prompt rules (read path only)
    pub fn set_use_slim_rules(&mut self, use_slim: bool) {
        self.use_slim_rules = use_slim;
    }

    /// Current value of a field
    pub fn get(&self, field: PromptField) -> &str {
        if field == PromptField::SystemPromptRules && self.use_slim_rules {
            return rules::SYSTEM_PROMPT_SLIM_RULES;
        }
        self.record.get(field)
    }

    /// Fields changed locally since the last successful remote sync
    pub fn dirty_fields(&self) -> &BTreeSet<PromptField> {
        &self.dirty
    }

    /// Set a field, mark it dirty, persist the whole record and the dirty
    /// markers locally.
    ///
    /// The value is free-form text; the only adjustment is that an
    /// empty/whitespace value falls back to the compiled default, keeping
    /// the never-empty invariant.
    pub fn update(&mut self, field: PromptField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if value.trim().is_empty() {
            debug!(field = %field, "update: empty value, falling back to default");
            self.record.reset(field);
        } else {
            self.record.set(field, value);
        }
        self.dirty.insert(field);
        self.persist()?;
        self.persist_dirty()
    }

    /// Restore one field to its compiled default, persist locally.
    ///
    /// Does not touch the dirty set: a field reset while dirty pushes its
    /// default on the next sync.
    pub fn reset_field(&mut self, field: PromptField) -> Result<()> {
        debug!(field = %field, "reset_field");
        self.record.reset(field);
        self.persist()
    }

    /// `reset_field` plus a fire-and-forget delete of the field's remote
    /// key; the delete failure is logged, never surfaced.
    pub async fn reset_field_remote(&mut self, field: PromptField) -> Result<()> {
        self.reset_field(field)?;
        if let Some(token) = self.token() {
            let keys = [field.remote_key().to_string()];
            if let Err(e) = self.api.delete_prompt_rules(&token, Some(&keys)).await {
                warn!(field = %field, error = %e, "Remote delete failed");
            }
        }
        Ok(())
    }

    /// Restore every field to its compiled default, persist locally.
    /// Remote state is untouched.
    pub fn reset_all(&mut self) -> Result<()> {
        info!("Resetting all prompt rules to defaults");
        self.record = PromptRecord::default();
        self.persist()
    }

    /// Delete the whole remote record. Unlike the per-field resets this is
    /// an explicit user action, so failure propagates.
    pub async fn purge_remote(&mut self) -> Result<()> {
        let token = self.token().ok_or_else(|| eyre::eyre!("Not logged in"))?;
        self.api
            .delete_prompt_rules(&token, None)
            .await
            .wrap_err("Failed to delete remote prompt rules")
    }

    /// Push dirty fields to the remote store.
    ///
    /// No-op without dirty fields (no network call). The dirty set is
    /// persisted alongside the record, so a pending sync survives a process
    /// restart; it is cleared only after a confirmed remote write, and on
    /// failure it is kept so a retry re-sends the same fields.
    pub async fn sync_to_remote(&mut self) -> Result<usize> {
        if self.dirty.is_empty() {
            debug!("sync_to_remote: no dirty fields, skipping");
            return Ok(0);
        }
        let token = self.token().ok_or_else(|| eyre::eyre!("Not logged in"))?;

        let mut rules = RemoteRules::new();
        for field in &self.dirty {
            rules.insert(
                field.remote_key().to_string(),
                Value::String(self.record.get(*field).to_string()),
            );
        }

        debug!(field_count = rules.len(), "sync_to_remote: saving dirty fields");
        self.api
            .save_prompt_rules(&token, &rules)
            .await
            .wrap_err("Failed to save prompt rules to remote store")?;

        let synced = self.dirty.len();
        self.dirty.clear();
        self.persist_dirty()?;
        self.persist()?;
        info!(synced, "Prompt rules synced to remote store");
        Ok(synced)
    }

    /// Pull the remote record, at most once per session.
    ///
    /// Any field absent remotely falls back to its compiled default. The
    /// session-loaded guard is set on success *and* on terminal failure so
    /// the session does not retry a dead endpoint; `force_reload` clears it.
    pub async fn load_from_remote(&mut self) -> Result<LoadOutcome> {
        let Some(token) = self.token() else {
            debug!("load_from_remote: no session token");
            return Ok(LoadOutcome::NotLoggedIn);
        };
        if self.session_loaded {
            debug!("load_from_remote: already loaded this session");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        self.session_loaded = true;
        match self.api.fetch_prompt_rules(&token).await {
            Ok(Some(rules)) => {
                self.record = PromptRecord::from_remote(&rules);
                self.persist()?;
                info!("Prompt rules loaded from remote store");
                Ok(LoadOutcome::Loaded)
            }
            Ok(None) => {
                debug!("load_from_remote: no remote record, keeping defaults");
                Ok(LoadOutcome::UsedDefaults)
            }
            Err(e) => Err(e).wrap_err("Failed to load prompt rules from remote store"),
        }
    }

    /// Clear the session-loaded guard and pull again
    pub async fn force_reload(&mut self) -> Result<LoadOutcome> {
        self.session_loaded = false;
        self.load_from_remote().await
    }

    /// Clear the session-loaded guard only (logout path)
    pub fn invalidate_session(&mut self) {
        self.session_loaded = false;
    }

    fn token(&self) -> Option<String> {
        self.storage.get(KEY_TOKEN).ok().flatten()
    }

    fn persist(&self) -> Result<()> {
        let snapshot = self.record.to_json().to_string();
        self.storage
            .set(KEY_CONFIG, &snapshot)
            .wrap_err("Failed to persist config snapshot")
    }

    fn persist_dirty(&self) -> Result<()> {
        let keys: Vec<&str> = self.dirty.iter().map(|f| f.remote_key()).collect();
        self.storage
            .set_json(KEY_DIRTY, &keys)
            .wrap_err("Failed to persist dirty markers")
    }
}
