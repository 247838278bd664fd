//! Application state and core logic

use crate::ui::layout;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use formsmith::config::EditorConfig;
use formsmith::state::{
    AppState, DragItem, DragState, EditTarget, EditorError, EditorSession, FieldId, FieldType,
    TextInput, View,
};
use formsmith::storage::{
    predefined_templates, FileStore, FormRepository, FormResponses, KeyValueStore, Template,
};
use ratatui::layout::Rect;

/// Main application struct
pub struct App {
    /// Editor view state
    pub state: AppState,
    /// The editing engine
    pub session: EditorSession,
    /// Persistence for fields, templates and shares
    pub repo: FormRepository<Box<dyn KeyValueStore>>,
    pub config: EditorConfig,
    /// Templates shown in the picker
    pub templates: Vec<Template>,
    /// Collected responses, per shared form
    pub responses: Vec<FormResponses>,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Whether the app should quit
    quit: bool,
    /// Store revision last written to disk
    saved_revision: u64,
}

impl App {
    /// Create a new App instance, restoring the last saved field list
    pub fn new(config: EditorConfig) -> Result<Self> {
        let data_dir = config
            .resolve_data_dir()
            .context("no data directory available; set FORMSMITH_DATA_DIR")?;
        let store = FileStore::open(&data_dir)
            .with_context(|| format!("opening data directory {}", data_dir.display()))?;
        tracing::info!(dir = %data_dir.display(), "data directory opened");
        Ok(Self::with_store(config, Box::new(store)))
    }

    /// Create an App over any key-value store
    pub fn with_store(config: EditorConfig, store: Box<dyn KeyValueStore>) -> Self {
        let repo = FormRepository::new(store);
        let mut state = AppState::default();

        let loaded = match repo.load_fields() {
            Ok(fields) => fields.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "ignoring saved fields");
                state.set_status(format!("Could not restore saved form: {err}"));
                Vec::new()
            }
        };
        let mut session = EditorSession::new();
        if let Err(err) = session.load(loaded) {
            tracing::warn!(%err, "ignoring saved fields");
            state.set_status(format!("Could not restore saved form: {err}"));
        }
        let saved_revision = session.revision();

        Self {
            state,
            session,
            repo,
            config,
            templates: Vec::new(),
            responses: Vec::new(),
            terminal_size: None,
            quit: false,
            saved_revision,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Field type being dragged in from the palette, if any
    pub fn palette_drag_type(&self) -> Option<FieldType> {
        match self.session.drag().state() {
            DragState::Dragging(DragItem::NewField(field_type)) => Some(*field_type),
            _ => None,
        }
    }

    fn screen(&self) -> Rect {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        Rect::new(0, 0, width, height)
    }

    /// Id of the selected card
    fn selected_id(&self) -> Option<FieldId> {
        self.session
            .steps()
            .current_fields()
            .get(self.state.selected_index)
            .map(|f| f.id.clone())
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.is_editing() {
            self.handle_input_key(key);
        } else {
            self.state.status_message = None;
            match self.state.current_view {
                View::Editor => self.handle_editor_key(key),
                View::Templates => self.handle_templates_key(key),
                View::Responses => self.handle_responses_key(key),
            }
        }
        self.after_event();
        Ok(())
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('z') if ctrl => self.undo(),
            KeyCode::Char('y') if ctrl => self.redo(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('U') => self.redo(),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.drop_new_field(FieldType::ALL[idx], None);
            }
            KeyCode::Up if shift => self.reorder_selected(-1),
            KeyCode::Down if shift => self.reorder_selected(1),
            KeyCode::Char('K') => self.reorder_selected(-1),
            KeyCode::Char('J') => self.reorder_selected(1),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.session.steps().current_fields().len();
                self.state.move_selection_down(len);
            }
            KeyCode::Tab => {
                self.session.next_step();
                self.state.selected_index = 0;
            }
            KeyCode::BackTab => {
                self.session.prev_step();
                self.state.selected_index = 0;
            }
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit(EditTarget::Label),
            KeyCode::Char('p') => self.start_edit(EditTarget::Placeholder),
            KeyCode::Char('h') => self.start_edit(EditTarget::HelpText),
            KeyCode::Char('o') => self.start_edit(EditTarget::Options),
            KeyCode::Char('m') => self.start_edit(EditTarget::MinLength),
            KeyCode::Char('M') => self.start_edit(EditTarget::MaxLength),
            KeyCode::Char('/') => self.start_edit(EditTarget::Pattern),
            KeyCode::Char('r') => self.toggle_required(),
            KeyCode::Char('c') => self.toggle_checked(),
            KeyCode::Char('t') => self.open_templates(),
            KeyCode::Char('T') => {
                self.state.input = Some(TextInput::new(EditTarget::TemplateName, String::new()));
            }
            KeyCode::Char('s') => self.share(),
            KeyCode::Char('v') => self.open_responses(),
            KeyCode::Char('?') => self.state.set_status(
                "1-5 add · e p h o m M / edit · r required · c checked · J/K move · d delete · Tab step · v responses",
            ),
            KeyCode::Esc => {
                if self.session.is_dragging() {
                    self.session.cancel_drag();
                }
            }
            _ => {}
        }
    }

    fn handle_templates_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => {
                self.state.current_view = View::Editor;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.template_index = self.state.template_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.template_index + 1 < self.templates.len() {
                    self.state.template_index += 1;
                }
            }
            KeyCode::Enter => self.load_selected_template(),
            KeyCode::Char('x') => self.delete_selected_template(),
            _ => {}
        }
    }

    fn handle_responses_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => {
                self.state.current_view = View::Editor;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.response_index = self.state.response_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.response_index + 1 < self.responses.len() {
                    self.state.response_index += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(input) = self.state.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.input = None,
            KeyCode::Backspace => input.pop_char(),
            KeyCode::Char(c) => input.push_char(c),
            KeyCode::Enter => {
                if let Some(input) = self.state.input.take() {
                    self.commit_input(input);
                }
            }
            _ => {}
        }
    }

    fn start_edit(&mut self, target: EditTarget) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(field) = self.session.store().get(&id) else {
            return;
        };
        let allowed = match target {
            EditTarget::Options => field.field_type.has_options(),
            _ if target.text_only() => field.field_type.is_text_like(),
            _ => true,
        };
        if !allowed {
            self.state
                .set_status(format!("{} fields have no {}", field.field_type, target.title()));
            return;
        }
        self.state.input = Some(TextInput::new(target, target.read(field)));
    }

    fn commit_input(&mut self, input: TextInput) {
        if input.target == EditTarget::TemplateName {
            self.save_template(input.buffer.trim());
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(mut field) = self.session.store().get(&id).cloned() else {
            return;
        };
        if let Err(err) = input.target.apply(&mut field, &input.buffer) {
            self.state.set_status(err.to_string());
            return;
        }
        let result = self.session.update(field);
        self.report(result);
    }

    fn undo(&mut self) {
        match self.session.undo() {
            Ok(()) => self.clamp_selection(),
            Err(_) => self.state.set_status("Nothing to undo"),
        }
    }

    fn redo(&mut self) {
        match self.session.redo() {
            Ok(()) => self.clamp_selection(),
            Err(_) => self.state.set_status("Nothing to redo"),
        }
    }

    fn remove_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Some(removed) = self.session.remove(&id) {
                self.state.set_status(format!("Removed {}", removed.label));
            }
            self.clamp_selection();
        }
    }

    fn toggle_required(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.session.edit(&id, |f| f.required = !f.required);
            self.report(result);
        }
    }

    fn toggle_checked(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let is_checkbox = self
            .session
            .store()
            .get(&id)
            .is_some_and(|f| f.field_type == FieldType::Checkbox);
        if is_checkbox {
            let result = self
                .session
                .edit(&id, |f| f.checked = Some(!f.checked.unwrap_or(false)));
            self.report(result);
        }
    }

    /// Move the selected field one slot up or down through a drag gesture
    fn reorder_selected(&mut self, delta: isize) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(from) = self.session.store().position(&id) else {
            return;
        };
        let Some(to) = from.checked_add_signed(delta) else {
            return;
        };
        if to >= self.session.store().len() {
            return;
        }
        if let Err(err) = self.session.begin_drag(&id) {
            self.report::<()>(Err(err));
            return;
        }
        let moved = self.session.drag_hover(to);
        let dropped = self.session.drop_drag(None);
        self.report(moved.and(dropped));
        self.follow(&id);
    }

    /// Palette drop: insert a new field at `slot` or append
    fn drop_new_field(&mut self, field_type: FieldType, slot: Option<usize>) {
        self.session.begin_palette_drag(field_type);
        match self.session.drop_drag(slot) {
            Ok(Some(id)) => {
                self.state
                    .set_status(format!("Added {} field", field_type.label()));
                self.follow(&id);
            }
            Ok(None) => {}
            Err(err) => self.report::<()>(Err(err)),
        }
    }

    /// Navigate to the step holding `id` and select it
    fn follow(&mut self, id: &FieldId) {
        let Some(position) = self.session.store().position(id) else {
            return;
        };
        while position < self.session.steps().current_offset() && self.session.steps().has_prev() {
            self.session.prev_step();
        }
        loop {
            let steps = self.session.steps();
            let end = steps.current_offset() + steps.current_fields().len();
            if position < end || !steps.has_next() {
                break;
            }
            self.session.next_step();
        }
        self.state.selected_index = position.saturating_sub(self.session.steps().current_offset());
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.session.steps().current_fields().len();
        self.state.clamp_selection(len);
    }

    fn open_templates(&mut self) {
        self.templates = match self.repo.all_templates() {
            Ok(templates) => templates,
            Err(err) => {
                tracing::warn!(%err, "custom templates unavailable");
                self.state
                    .set_status(format!("Custom templates unavailable: {err}"));
                predefined_templates()
            }
        };
        self.state.template_index = 0;
        self.state.current_view = View::Templates;
    }

    fn open_responses(&mut self) {
        match self.repo.form_responses() {
            Ok(responses) => {
                if responses.is_empty() {
                    self.state.set_status("No responses yet");
                }
                self.responses = responses;
                self.state.response_index = 0;
                self.state.current_view = View::Responses;
            }
            Err(err) => {
                tracing::warn!(%err, "responses unavailable");
                self.state.set_status(format!("Responses unavailable: {err}"));
            }
        }
    }

    fn load_selected_template(&mut self) {
        let Some(template) = self.templates.get(self.state.template_index) else {
            return;
        };
        let name = template.name.clone();
        let result = self.session.replace_all(template.instantiate());
        if result.is_ok() {
            tracing::info!(%name, "template loaded");
            self.state.set_status(format!("Loaded template {name}"));
            self.state.selected_index = 0;
            self.state.current_view = View::Editor;
        }
        self.report(result);
    }

    fn delete_selected_template(&mut self) {
        let builtin = predefined_templates().len();
        if self.state.template_index < builtin {
            self.state.set_status("Built-in templates cannot be deleted");
            return;
        }
        let Some(name) = self
            .templates
            .get(self.state.template_index)
            .map(|t| t.name.clone())
        else {
            return;
        };
        match self.repo.delete_template(&name) {
            Ok(_) => {
                self.templates.retain(|t| t.name != name);
                self.state.template_index = self
                    .state
                    .template_index
                    .min(self.templates.len().saturating_sub(1));
                self.state.set_status(format!("Deleted template {name}"));
            }
            Err(err) => self.state.set_status(format!("Delete failed: {err}")),
        }
    }

    fn save_template(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        match self.repo.save_template(name, self.session.fields()) {
            Ok(()) => self.state.set_status(format!("Saved template {name}")),
            Err(err) => self.state.set_status(format!("Save failed: {err}")),
        }
    }

    fn share(&mut self) {
        match self.repo.share(self.session.fields()) {
            Ok(id) => {
                let link = id.link(self.config.share_base_url());
                match self.copy_to_clipboard(&link) {
                    Ok(()) => self.state.set_status(format!("Copied share link: {link}")),
                    Err(err) => {
                        tracing::debug!(%err, "clipboard unavailable");
                        self.state.set_status(format!("Share this form link: {link}"));
                    }
                }
            }
            Err(err) => self.state.set_status(format!("Share failed: {err}")),
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    /// Surface engine errors in the status bar
    fn report<T>(&mut self, result: Result<T, EditorError>) {
        if let Err(err) = result {
            if !err.is_no_op() {
                self.state.set_status(err.to_string());
            }
        }
    }

    /// Handle mouse events: press, drag and release drive the drag
    /// coordinator
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.is_editing() || self.state.current_view != View::Editor {
            return Ok(());
        }
        let (sidebar, canvas) = layout::create_layout(self.screen());
        let (col, row) = (mouse.column, mouse.row);
        let offset = self.session.steps().current_offset();
        let visible = self.session.steps().current_fields().len();
        let scroll = layout::scroll_offset(canvas, visible, self.state.selected_index);
        let card = layout::card_at(canvas, visible, scroll, col, row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(field_type) = layout::palette_at(sidebar, col, row) {
                    self.session.begin_palette_drag(field_type);
                } else if let Some(idx) = card {
                    self.state.selected_index = idx;
                    if let Some(id) = self.selected_id() {
                        let result = self.session.begin_drag(&id);
                        self.report(result);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(idx) = card {
                    let result = self.session.drag_hover(offset + idx);
                    self.report(result);
                    if self.session.drag().dragged_id().is_some() {
                        self.state.selected_index = idx;
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(field_type) = self.palette_drag_type() {
                    if layout::in_canvas(canvas, col, row) {
                        self.session.cancel_drag();
                        self.drop_new_field(field_type, card.map(|idx| offset + idx));
                    } else {
                        self.session.cancel_drag();
                    }
                } else if let Some(id) = self.session.drag().dragged_id().cloned() {
                    let result = self.session.drop_drag(None);
                    self.report(result);
                    self.follow(&id);
                }
            }
            _ => {}
        }
        self.after_event();
        Ok(())
    }

    /// Persist settled changes
    fn after_event(&mut self) {
        if !self.config.autosave() || self.session.is_dragging() {
            return;
        }
        if self.session.revision() == self.saved_revision {
            return;
        }
        match self.repo.save_fields(self.session.fields()) {
            Ok(()) => self.saved_revision = self.session.revision(),
            Err(err) => {
                tracing::warn!(%err, "autosave failed");
                self.state.set_status(format!("Autosave failed: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith::state::Field;
    use formsmith::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(key(*code)).unwrap();
        }
    }

    fn app() -> App {
        App::with_store(EditorConfig::default(), Box::new(MemoryStore::new()))
    }

    fn app_with(labels: &[&str]) -> App {
        let mut store = MemoryStore::new();
        let fields: Vec<Field> = labels
            .iter()
            .map(|l| Field::new(*l, FieldType::Text).with_label(*l))
            .collect();
        store
            .set("fields", &serde_json::to_string(&fields).unwrap())
            .unwrap();
        App::with_store(EditorConfig::default(), Box::new(store))
    }

    fn labels(app: &App) -> Vec<String> {
        app.session.fields().iter().map(|f| f.label.clone()).collect()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_restores_saved_fields() {
        let app = app_with(&["a", "b"]);
        assert_eq!(labels(&app), vec!["a", "b"]);
        assert!(!app.session.can_undo());
    }

    #[test]
    fn test_malformed_save_starts_empty() {
        let mut store = MemoryStore::new();
        store.set("fields", "oops").unwrap();
        let app = App::with_store(EditorConfig::default(), Box::new(store));
        assert!(app.session.fields().is_empty());
        assert!(app.state.status_message.is_some());
    }

    #[test]
    fn test_number_keys_add_fields_and_autosave() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('4')]);
        let types: Vec<_> = app.session.fields().iter().map(|f| f.field_type).collect();
        assert_eq!(types, vec![FieldType::Text, FieldType::Dropdown]);
        let saved = app.repo.load_fields().unwrap().unwrap();
        assert_eq!(saved, app.session.fields().to_vec());
    }

    #[test]
    fn test_new_field_is_selected_on_its_step() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('1')]);
        assert_eq!(app.session.steps().current(), 1);
        assert_eq!(app.state.selected_index, 0);
    }

    #[test]
    fn test_undo_and_redo_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('u')]);
        assert!(app.session.fields().is_empty());
        press(&mut app, &[KeyCode::Char('U')]);
        assert_eq!(app.session.fields().len(), 1);
        press(&mut app, &[KeyCode::Char('U')]);
        assert_eq!(app.state.status_message.as_deref(), Some("Nothing to redo"));
    }

    #[test]
    fn test_edit_label_through_prompt() {
        let mut app = app_with(&["a"]);
        press(
            &mut app,
            &[
                KeyCode::Char('e'),
                KeyCode::Backspace,
                KeyCode::Char('N'),
                KeyCode::Char('o'),
                KeyCode::Enter,
            ],
        );
        assert_eq!(labels(&app), vec!["No"]);
        assert!(!app.state.is_editing());
    }

    #[test]
    fn test_escape_cancels_prompt() {
        let mut app = app_with(&["a"]);
        press(&mut app, &[KeyCode::Char('e'), KeyCode::Char('x'), KeyCode::Esc]);
        assert_eq!(labels(&app), vec!["a"]);
    }

    #[test]
    fn test_length_and_pattern_prompts() {
        let mut app = app_with(&["a"]);
        press(
            &mut app,
            &[
                KeyCode::Char('m'),
                KeyCode::Char('2'),
                KeyCode::Enter,
                KeyCode::Char('M'),
                KeyCode::Char('9'),
                KeyCode::Enter,
                KeyCode::Char('/'),
                KeyCode::Char('x'),
                KeyCode::Enter,
            ],
        );
        let field = &app.session.fields()[0];
        assert_eq!(field.min_length, Some(2));
        assert_eq!(field.max_length, Some(9));
        assert_eq!(field.pattern.as_deref(), Some("x"));
        assert_eq!(app.repo.load_fields().unwrap().unwrap()[0].max_length, Some(9));
    }

    #[test]
    fn test_bad_length_is_reported_not_applied() {
        let mut app = app_with(&["a"]);
        press(
            &mut app,
            &[KeyCode::Char('m'), KeyCode::Char('x'), KeyCode::Enter],
        );
        assert_eq!(app.session.fields()[0].min_length, None);
        assert!(!app.session.can_undo());
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("`x` is not a whole number")
        );
    }

    #[test]
    fn test_length_prompt_rejected_for_checkbox() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('m')]);
        assert!(!app.state.is_editing());
    }

    #[test]
    fn test_options_prompt_rejected_for_text() {
        let mut app = app_with(&["a"]);
        press(&mut app, &[KeyCode::Char('o')]);
        assert!(!app.state.is_editing());
    }

    #[test]
    fn test_reorder_keys_move_across_steps() {
        let mut app = app_with(&["a", "b", "c"]);
        // step 0 holds a, b; select b and move it down into step 1
        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('J')]);
        assert_eq!(labels(&app), vec!["a", "c", "b"]);
        assert_eq!(app.session.steps().current(), 1);
        assert_eq!(app.state.selected_index, 0);
        press(&mut app, &[KeyCode::Char('K'), KeyCode::Char('K')]);
        assert_eq!(labels(&app), vec!["b", "a", "c"]);
        assert_eq!(app.session.steps().current(), 0);
    }

    #[test]
    fn test_remove_and_toggle_required() {
        let mut app = app_with(&["a", "b"]);
        press(&mut app, &[KeyCode::Char('r')]);
        assert!(app.session.fields()[0].required);
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(labels(&app), vec!["b"]);
    }

    #[test]
    fn test_load_template_mints_ids() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('t'), KeyCode::Enter]);
        assert_eq!(app.state.current_view, View::Editor);
        assert_eq!(labels(&app), vec!["Name", "Email", "Message"]);
        assert_ne!(app.session.fields()[0].id.as_str(), "name");
        assert!(app.session.can_undo());
    }

    #[test]
    fn test_save_and_delete_custom_template() {
        let mut app = app_with(&["a"]);
        press(
            &mut app,
            &[
                KeyCode::Char('T'),
                KeyCode::Char('M'),
                KeyCode::Enter,
                KeyCode::Char('t'),
            ],
        );
        assert_eq!(app.templates.len(), 3);
        press(&mut app, &[KeyCode::Char('x')]);
        assert_eq!(app.templates.len(), 3);
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Char('x')]);
        assert_eq!(app.templates.len(), 2);
        assert!(app.repo.custom_templates().unwrap().is_empty());
    }

    #[test]
    fn test_share_reports_link() {
        let mut app = app_with(&["a"]);
        press(&mut app, &[KeyCode::Char('s')]);
        let message = app.state.status_message.clone().unwrap();
        assert!(message.contains("http://localhost:3000/form/"));
    }

    #[test]
    fn test_responses_view_lists_submissions() {
        let mut app = app_with(&["a"]);
        let id = app.repo.share(app.session.fields()).unwrap();
        let mut values = std::collections::BTreeMap::new();
        values.insert(
            FieldId::from("a"),
            formsmith::storage::ResponseValue::Text("hello".to_string()),
        );
        app.repo
            .submit_response(&id, formsmith::storage::ResponseRecord::new(values))
            .unwrap();

        press(&mut app, &[KeyCode::Char('v')]);
        assert_eq!(app.state.current_view, View::Responses);
        assert_eq!(app.responses.len(), 1);
        assert_eq!(app.responses[0].log.form_id, id.as_str());
        let record = &app.responses[0].log.records[0];
        assert_eq!(
            app.responses[0].rows(record),
            vec![("a".to_string(), "hello".to_string())]
        );

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.state.current_view, View::Editor);
    }

    #[test]
    fn test_responses_view_when_empty() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('v')]);
        assert_eq!(app.state.current_view, View::Responses);
        assert_eq!(app.state.status_message.as_deref(), Some("No responses yet"));
    }

    #[test]
    fn test_mouse_drag_reorders_live() {
        let mut app = app_with(&["a", "b", "c", "d"]);
        app.terminal_size = Some((30, 100));
        // canvas starts at x=20; cards at rows 2 and 6
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 7))
            .unwrap();
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 3))
            .unwrap();
        assert_eq!(labels(&app), vec!["b", "a", "c", "d"]);
        // not saved while the drag is in progress
        assert_eq!(
            app.repo.load_fields().unwrap().map(|f| f.len()),
            Some(4)
        );
        assert_eq!(app.repo.load_fields().unwrap().unwrap()[0].label, "a");

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 90, 29))
            .unwrap();
        assert!(!app.session.is_dragging());
        assert_eq!(app.repo.load_fields().unwrap().unwrap()[0].label, "b");
    }

    #[test]
    fn test_hit_testing_follows_scrolled_canvas() {
        let labels: Vec<String> = (0..12).map(|i| format!("f{i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut app = app_with(&refs);
        // 24 rows leave room for five cards; step 0 holds six fields
        app.terminal_size = Some((24, 100));
        press(&mut app, &[KeyCode::Down; 5]);
        assert_eq!(app.state.selected_index, 5);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 3))
            .unwrap();
        assert_eq!(app.state.selected_index, 1);
        assert_eq!(app.session.drag().dragged_id(), Some(&FieldId::from("f1")));
    }

    #[test]
    fn test_palette_drag_onto_card_inserts() {
        let mut app = app_with(&["a", "b"]);
        app.terminal_size = Some((30, 100));
        // Checkbox is the third palette button (rows 7..10)
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 8))
            .unwrap();
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30, 3))
            .unwrap();
        let types: Vec<_> = app.session.fields().iter().map(|f| f.field_type).collect();
        assert_eq!(
            types,
            vec![FieldType::Checkbox, FieldType::Text, FieldType::Text]
        );
    }

    #[test]
    fn test_palette_release_outside_canvas_adds_nothing() {
        let mut app = app_with(&["a"]);
        app.terminal_size = Some((30, 100));
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2))
            .unwrap();
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 20))
            .unwrap();
        assert_eq!(app.session.fields().len(), 1);
        assert!(!app.session.is_dragging());
    }
}
