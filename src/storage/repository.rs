//! Load/save contracts between the editor and a key-value store

use super::responses::{validate_submission, FormResponses, ResponseLog, ResponseRecord};
use super::templates::{predefined_templates, Template};
use super::{KeyValueStore, StorageError, StorageResult};
use crate::state::{find_duplicate_id, Field};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

const FIELDS_KEY: &str = "fields";
const CUSTOM_TEMPLATES_KEY: &str = "custom_templates";
const SHARE_PREFIX: &str = "share:";
const RESPONSES_PREFIX: &str = "responses:";

/// Identifier of a shared form snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareId(String);

impl ShareId {
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fill-out link for this snapshot
    pub fn link(&self, base_url: &str) -> String {
        format!("{}/form/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl From<&str> for ShareId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Typed access to everything the editor persists
pub struct FormRepository<S> {
    store: S,
}

impl<S: KeyValueStore> FormRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The working field list, if one was saved
    pub fn load_fields(&self) -> StorageResult<Option<Vec<Field>>> {
        self.read_fields(FIELDS_KEY)
    }

    pub fn save_fields(&mut self, fields: &[Field]) -> StorageResult<()> {
        self.write(FIELDS_KEY, fields)?;
        tracing::debug!(fields = fields.len(), "fields saved");
        Ok(())
    }

    /// Store a read-only snapshot under a fresh share id
    pub fn share(&mut self, fields: &[Field]) -> StorageResult<ShareId> {
        let id = ShareId::mint();
        self.write(&format!("{SHARE_PREFIX}{id}"), fields)?;
        tracing::info!(%id, fields = fields.len(), "form shared");
        Ok(id)
    }

    pub fn load_shared(&self, id: &ShareId) -> StorageResult<Option<Vec<Field>>> {
        self.read_fields(&format!("{SHARE_PREFIX}{id}"))
    }

    /// User-saved templates, in save order
    pub fn custom_templates(&self) -> StorageResult<Vec<Template>> {
        Ok(self.read(CUSTOM_TEMPLATES_KEY)?.unwrap_or_default())
    }

    /// Built-in templates followed by user-saved ones
    pub fn all_templates(&self) -> StorageResult<Vec<Template>> {
        let mut templates = predefined_templates();
        templates.extend(self.custom_templates()?);
        Ok(templates)
    }

    pub fn save_template(&mut self, name: &str, fields: &[Field]) -> StorageResult<()> {
        let mut templates = self.custom_templates()?;
        templates.push(Template::new(name, fields.to_vec()));
        self.write(CUSTOM_TEMPLATES_KEY, &templates)?;
        tracing::info!(name, "template saved");
        Ok(())
    }

    /// Remove every custom template with this name. Returns how many went.
    pub fn delete_template(&mut self, name: &str) -> StorageResult<usize> {
        let mut templates = self.custom_templates()?;
        let before = templates.len();
        templates.retain(|t| t.name != name);
        let removed = before - templates.len();
        if removed > 0 {
            self.write(CUSTOM_TEMPLATES_KEY, &templates)?;
            tracing::info!(name, removed, "template deleted");
        }
        Ok(removed)
    }

    /// Validate and append a submission for a shared form
    pub fn submit_response(
        &mut self,
        form_id: &ShareId,
        record: ResponseRecord,
    ) -> StorageResult<()> {
        let Some(fields) = self.load_shared(form_id)? else {
            return Err(StorageError::FormNotFound(form_id.to_string()));
        };
        validate_submission(&fields, &record.values)?;
        let key = format!("{RESPONSES_PREFIX}{form_id}");
        let mut records: Vec<ResponseRecord> = self.read(&key)?.unwrap_or_default();
        records.push(record);
        self.write(&key, &records)?;
        tracing::info!(%form_id, total = records.len(), "response recorded");
        Ok(())
    }

    pub fn responses(&self, form_id: &ShareId) -> StorageResult<Vec<ResponseRecord>> {
        Ok(self
            .read(&format!("{RESPONSES_PREFIX}{form_id}"))?
            .unwrap_or_default())
    }

    /// Response logs for every form that has any
    pub fn all_responses(&self) -> StorageResult<Vec<ResponseLog>> {
        let mut logs = Vec::new();
        for key in self.store.keys()? {
            let Some(form_id) = key.strip_prefix(RESPONSES_PREFIX) else {
                continue;
            };
            logs.push(ResponseLog {
                form_id: form_id.to_string(),
                records: self.read(&key)?.unwrap_or_default(),
            });
        }
        Ok(logs)
    }

    /// Every response log together with the form it was collected for
    pub fn form_responses(&self) -> StorageResult<Vec<FormResponses>> {
        self.all_responses()?
            .into_iter()
            .map(|log| {
                let fields = self
                    .load_shared(&ShareId::from(log.form_id.as_str()))?
                    .unwrap_or_default();
                Ok(FormResponses { log, fields })
            })
            .collect()
    }

    fn read_fields(&self, key: &str) -> StorageResult<Option<Vec<Field>>> {
        let fields: Option<Vec<Field>> = self.read(key)?;
        if let Some(id) = fields.as_deref().and_then(find_duplicate_id) {
            return Err(StorageError::DuplicateId {
                key: key.to_string(),
                id: id.to_string(),
            });
        }
        Ok(fields)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::MalformedData {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::MalformedData {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &raw)
    }
}
