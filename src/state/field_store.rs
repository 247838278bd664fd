//! Authoritative ordered field collection

use super::error::{EditorError, EditorResult};
use super::field::{find_duplicate_id, Field, FieldId};

/// Owns the field list. Every successful mutation bumps `revision`;
/// callers that need change notification go through `EditorSession`.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    fields: Vec<Field>,
    revision: u64,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing list, rejecting duplicate ids
    pub fn from_fields(fields: Vec<Field>) -> EditorResult<Self> {
        let mut store = Self::new();
        store.replace_all(fields)?;
        store.revision = 0;
        Ok(store)
    }

    /// Read-only view of the current list
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Owned copy of the current list
    pub fn snapshot(&self) -> Vec<Field> {
        self.fields.clone()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of committed mutations since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Append a field to the end
    pub fn add(&mut self, field: Field) -> EditorResult<()> {
        let at = self.fields.len();
        self.insert(at, field)
    }

    /// Insert a field at `index`, clamped to the end of the list
    pub fn insert(&mut self, index: usize, field: Field) -> EditorResult<()> {
        if self.contains(&field.id) {
            return Err(EditorError::DuplicateId(field.id));
        }
        let index = index.min(self.fields.len());
        self.fields.insert(index, field);
        self.commit();
        Ok(())
    }

    /// Remove the field with this id. Absent ids are not an error.
    pub fn remove(&mut self, id: &FieldId) -> Option<Field> {
        let index = self.position(id)?;
        let removed = self.fields.remove(index);
        self.commit();
        Some(removed)
    }

    /// Replace the field sharing `field.id`
    pub fn update(&mut self, field: Field) -> EditorResult<()> {
        let Some(index) = self.position(&field.id) else {
            return Err(EditorError::NotFound(field.id));
        };
        let existing = &self.fields[index];
        if existing.field_type != field.field_type {
            return Err(EditorError::TypeChange {
                id: field.id,
                existing: existing.field_type,
                requested: field.field_type,
            });
        }
        self.fields[index] = field;
        self.commit();
        Ok(())
    }

    /// Atomically replace the whole list
    pub fn replace_all(&mut self, fields: Vec<Field>) -> EditorResult<()> {
        if let Some(id) = find_duplicate_id(&fields) {
            return Err(EditorError::DuplicateId(id.clone()));
        }
        self.fields = fields;
        self.commit();
        Ok(())
    }

    /// Splice the field out of its current slot and back in at `to`
    /// (clamped). Returns the index it was taken from.
    pub fn move_field(&mut self, id: &FieldId, to: usize) -> EditorResult<usize> {
        let Some(from) = self.position(id) else {
            return Err(EditorError::NotFound(id.clone()));
        };
        let to = to.min(self.fields.len() - 1);
        if from != to {
            let field = self.fields.remove(from);
            self.fields.insert(to, field);
            self.commit();
        }
        Ok(from)
    }

    fn commit(&mut self) {
        self.revision += 1;
    }
}
