//! Editing session: the engine instance tying store, history, steps and
//! drag handling together

use super::drag::{DragCoordinator, DropOutcome};
use super::error::{EditorError, EditorResult};
use super::field::{Field, FieldId, FieldType};
use super::field_store::FieldStore;
use super::history::HistoryLog;
use super::observer::FieldObserver;
use super::steps::StepDeriver;

/// One editing session. Every mutation goes through here so that the
/// history log, the step deriver and any subscribers observe the new list
/// before the call returns.
pub struct EditorSession {
    store: FieldStore,
    history: HistoryLog,
    steps: StepDeriver,
    drag: DragCoordinator,
    subscribers: Vec<Box<dyn FieldObserver>>,
}

impl EditorSession {
    /// Start an empty session
    pub fn new() -> Self {
        Self {
            store: FieldStore::new(),
            history: HistoryLog::new(&[]),
            steps: StepDeriver::new(&[]),
            drag: DragCoordinator::new(),
            subscribers: Vec::new(),
        }
    }

    /// Start a session from a previously saved list. History is seeded
    /// with it, so the loaded state is the undo floor.
    pub fn with_fields(fields: Vec<Field>) -> EditorResult<Self> {
        let store = FieldStore::from_fields(fields)?;
        tracing::info!(fields = store.len(), "session started");
        Ok(Self {
            history: HistoryLog::new(store.fields()),
            steps: StepDeriver::new(store.fields()),
            store,
            drag: DragCoordinator::new(),
            subscribers: Vec::new(),
        })
    }

    /// Register an observer; it sees every later change
    pub fn subscribe(&mut self, observer: Box<dyn FieldObserver>) {
        self.subscribers.push(observer);
    }

    pub fn fields(&self) -> &[Field] {
        self.store.fields()
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn steps(&self) -> &StepDeriver {
        &self.steps
    }

    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    /// Store revision; changes whenever the list does
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn add(&mut self, field: Field) -> EditorResult<()> {
        self.mutate(|store| store.add(field))
    }

    pub fn insert(&mut self, index: usize, field: Field) -> EditorResult<()> {
        self.mutate(|store| store.insert(index, field))
    }

    pub fn remove(&mut self, id: &FieldId) -> Option<Field> {
        self.mutate(|store| Ok(store.remove(id))).ok().flatten()
    }

    pub fn update(&mut self, field: Field) -> EditorResult<()> {
        self.mutate(|store| store.update(field))
    }

    /// Apply an edit to a copy of the field with this id
    pub fn edit<F>(&mut self, id: &FieldId, edit: F) -> EditorResult<()>
    where
        F: FnOnce(&mut Field),
    {
        let mut field = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        edit(&mut field);
        self.update(field)
    }

    pub fn replace_all(&mut self, fields: Vec<Field>) -> EditorResult<()> {
        self.mutate(|store| store.replace_all(fields))
    }

    /// Swap in saved data. The loaded list becomes the new undo floor.
    pub fn load(&mut self, fields: Vec<Field>) -> EditorResult<()> {
        self.apply_from_history(fields)?;
        self.history.reset(self.store.fields());
        tracing::info!(fields = self.store.len(), "fields loaded");
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> EditorResult<()> {
        let snapshot = self.history.undo()?;
        self.apply_from_history(snapshot)
    }

    pub fn redo(&mut self) -> EditorResult<()> {
        let snapshot = self.history.redo()?;
        self.apply_from_history(snapshot)
    }

    pub fn next_step(&mut self) {
        self.steps.next();
    }

    pub fn prev_step(&mut self) {
        self.steps.prev();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pick up an existing field
    pub fn begin_drag(&mut self, id: &FieldId) -> EditorResult<()> {
        let index = self
            .store
            .position(id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        self.drag.begin_reorder(id.clone(), index);
        Ok(())
    }

    /// Pick up a new field type from the palette
    pub fn begin_palette_drag(&mut self, field_type: FieldType) {
        self.drag.begin_palette(field_type);
    }

    /// The pointer entered the slot at `target` (index into the whole
    /// list). Returns true when the list was reordered.
    pub fn drag_hover(&mut self, target: usize) -> EditorResult<bool> {
        let Some(id) = self.drag.dragged_id().cloned() else {
            return Ok(false);
        };
        let Some(position) = self.store.position(&id) else {
            tracing::warn!(%id, "dragged field vanished, ending drag");
            self.drag.cancel();
            return Ok(false);
        };
        self.drag.resync(position);
        if target >= self.store.len() {
            return Ok(false);
        }
        let Some(step) = self.drag.hover(target) else {
            return Ok(false);
        };
        let before = self.store.revision();
        self.mutate(|store| store.move_field(&step.id, step.to))?;
        Ok(self.store.revision() != before)
    }

    /// End the current gesture. Palette drops insert a new field at `slot`
    /// (or append) and return its id.
    pub fn drop_drag(&mut self, slot: Option<usize>) -> EditorResult<Option<FieldId>> {
        match self.drag.drop() {
            DropOutcome::Settled => Ok(None),
            DropOutcome::Insert(field_type) => {
                let field = Field::fresh(field_type);
                let id = field.id.clone();
                match slot {
                    Some(index) => self.insert(index, field)?,
                    None => self.add(field)?,
                }
                tracing::info!(%id, %field_type, "field dropped from palette");
                Ok(Some(id))
            }
        }
    }

    /// Abandon the gesture without reverting hovered moves
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    fn apply_from_history(&mut self, snapshot: Vec<Field>) -> EditorResult<()> {
        self.history.suppress_next();
        let result = self.mutate(|store| store.replace_all(snapshot));
        if self.history.is_suppressing() {
            self.history.clear_suppression();
        }
        result
    }

    /// Run a store mutation and, if it committed, notify observers
    fn mutate<T, F>(&mut self, op: F) -> EditorResult<T>
    where
        F: FnOnce(&mut FieldStore) -> EditorResult<T>,
    {
        let before = self.store.revision();
        let result = op(&mut self.store);
        match &result {
            Ok(_) if self.store.revision() != before => self.notify(),
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "field store rejected change"),
        }
        result
    }

    fn notify(&mut self) {
        let fields = self.store.fields();
        tracing::debug!(fields = fields.len(), revision = self.store.revision(), "fields changed");
        self.history.fields_changed(fields);
        self.steps.fields_changed(fields);
        for subscriber in &mut self.subscribers {
            subscriber.fields_changed(fields);
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
