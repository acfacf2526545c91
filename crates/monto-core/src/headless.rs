//! An in-memory [`EditorHost`].
//!
//! `HeadlessHost` keeps documents as rope-backed text, editors as `(uri, column, selections)`
//! and panels as plain content buffers. Like a real editor it re-fires a selection-change event
//! whenever a selection is assigned, programmatically or not; those events are queued and
//! delivered to a [`Session`] by [`HeadlessHost::pump`].

use crate::host::{EditorHost, EditorId, EditorInfo, Position, Selection, ShowOptions};
use crate::line_index::LineIndex;
use crate::session::Session;
use crate::views::{PanelId, ViewColumn};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Upper bound on events delivered by one [`HeadlessHost::pump`] call.
pub const MAX_PUMPED_EVENTS: usize = 256;

/// An event the host reports back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The selections of an editor changed.
    SelectionChanged {
        /// Editor whose selections changed.
        editor: EditorId,
        /// The new selections.
        selections: Vec<Selection>,
    },
}

#[derive(Debug, Clone)]
struct HeadlessEditor {
    uri: String,
    column: ViewColumn,
    selections: Vec<Selection>,
    revealed: Option<Selection>,
}

/// Content and placement of a headless panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessPanel {
    /// Panel title.
    pub title: String,
    /// Column the panel was created in.
    pub column: ViewColumn,
    /// Last content pushed into the panel.
    pub content: String,
    /// How many times the panel was revealed.
    pub reveal_count: usize,
}

/// In-memory editor host.
#[derive(Default)]
pub struct HeadlessHost {
    documents: HashMap<String, LineIndex>,
    editors: BTreeMap<EditorId, HeadlessEditor>,
    next_editor_id: u64,
    active: Option<EditorId>,
    panels: BTreeMap<PanelId, HeadlessPanel>,
    next_panel_id: u64,
    pending: VecDeque<HostEvent>,
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("document_count", &self.documents.len())
            .field("editor_count", &self.editors.len())
            .field("panel_count", &self.panels.len())
            .field("pending_events", &self.pending.len())
            .field("active", &self.active)
            .finish()
    }
}

impl HeadlessHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text of the document at `uri`, creating it if needed.
    pub fn set_document(&mut self, uri: impl Into<String>, text: &str) {
        self.documents.insert(uri.into(), LineIndex::from_text(text));
    }

    /// Text of the document at `uri`.
    pub fn document_text(&self, uri: &str) -> Option<String> {
        self.documents.get(uri).map(LineIndex::get_text)
    }

    /// Open a new editor for `uri` in `column` and focus it.
    pub fn open_editor(&mut self, uri: impl Into<String>, column: ViewColumn) -> EditorId {
        let uri = uri.into();
        self.documents.entry(uri.clone()).or_default();

        let id = EditorId::new(self.next_editor_id);
        self.next_editor_id = self.next_editor_id.saturating_add(1);
        self.editors.insert(
            id,
            HeadlessEditor {
                uri,
                column,
                selections: vec![Selection::caret(Position::default())],
                revealed: None,
            },
        );
        self.active = Some(id);
        id
    }

    /// Close an editor.
    pub fn close_editor(&mut self, editor: EditorId) -> bool {
        if self.active == Some(editor) {
            self.active = None;
        }
        self.editors.remove(&editor).is_some()
    }

    /// Focus an editor.
    pub fn focus(&mut self, editor: EditorId) {
        if self.editors.contains_key(&editor) {
            self.active = Some(editor);
        }
    }

    /// First editor showing `uri`.
    pub fn editor_for_uri(&self, uri: &str) -> Option<EditorId> {
        self.editors
            .iter()
            .find(|(_, editor)| editor.uri == uri)
            .map(|(id, _)| *id)
    }

    /// Column of `editor`.
    pub fn editor_column(&self, editor: EditorId) -> Option<ViewColumn> {
        self.editors.get(&editor).map(|e| e.column)
    }

    /// Last selection `editor` was scrolled to.
    pub fn revealed(&self, editor: EditorId) -> Option<Selection> {
        self.editors.get(&editor).and_then(|e| e.revealed)
    }

    /// Simulate the user selecting in `editor` (queues a selection-change event).
    pub fn select(&mut self, editor: EditorId, selections: Vec<Selection>) {
        let Some(entry) = self.editors.get_mut(&editor) else {
            return;
        };
        entry.selections = selections.clone();
        self.pending
            .push_back(HostEvent::SelectionChanged { editor, selections });
    }

    /// Select the character range `start..end` in `editor` as the user would.
    pub fn select_offsets(&mut self, editor: EditorId, start: usize, end: usize) {
        let selection = Selection::new(self.position_at(editor, start), self.position_at(editor, end));
        self.select(editor, vec![selection]);
    }

    /// Selections of `editor` as character offsets.
    pub fn selection_offsets(&self, editor: EditorId) -> Vec<(usize, usize)> {
        self.selections(editor)
            .iter()
            .map(|s| (self.offset_at(editor, s.start), self.offset_at(editor, s.end)))
            .collect()
    }

    /// Drain queued events without delivering them.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        self.pending.drain(..).collect()
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Deliver queued events to `session` until the queue is empty (or
    /// [`MAX_PUMPED_EVENTS`] were delivered). Returns the number delivered.
    pub fn pump(&mut self, session: &mut Session) -> usize {
        let mut delivered = 0;
        while delivered < MAX_PUMPED_EVENTS {
            let Some(event) = self.pending.pop_front() else {
                break;
            };
            delivered += 1;
            match event {
                HostEvent::SelectionChanged { editor, selections } => {
                    if let Err(err) = session.on_selection_changed(self, editor, &selections) {
                        tracing::warn!(editor = editor.get(), error = %err, "selection event rejected");
                    }
                }
            }
        }
        delivered
    }

    /// Panel state.
    pub fn panel(&self, panel: PanelId) -> Option<&HeadlessPanel> {
        self.panels.get(&panel)
    }

    /// Close a panel as the user would; the session must be told via
    /// [`Session::on_panel_disposed`].
    pub fn dispose_panel(&mut self, panel: PanelId) -> bool {
        self.panels.remove(&panel).is_some()
    }

    fn document_for(&self, editor: EditorId) -> Option<&LineIndex> {
        let uri = &self.editors.get(&editor)?.uri;
        self.documents.get(uri)
    }
}

impl EditorHost for HeadlessHost {
    fn visible_editors(&self) -> Vec<EditorInfo> {
        self.editors
            .iter()
            .map(|(id, editor)| EditorInfo {
                id: *id,
                uri: editor.uri.clone(),
                column: Some(editor.column),
            })
            .collect()
    }

    fn active_editor(&self) -> Option<EditorId> {
        self.active
    }

    fn editor_uri(&self, editor: EditorId) -> Option<String> {
        self.editors.get(&editor).map(|e| e.uri.clone())
    }

    fn selections(&self, editor: EditorId) -> Vec<Selection> {
        self.editors
            .get(&editor)
            .map(|e| e.selections.clone())
            .unwrap_or_default()
    }

    fn offset_at(&self, editor: EditorId, position: Position) -> usize {
        self.document_for(editor)
            .map(|doc| doc.position_to_char_offset(position))
            .unwrap_or(0)
    }

    fn position_at(&self, editor: EditorId, offset: usize) -> Position {
        self.document_for(editor)
            .map(|doc| doc.char_offset_to_position(offset))
            .unwrap_or_default()
    }

    fn show_document(&mut self, uri: &str, options: ShowOptions) -> Option<EditorId> {
        let existing = self
            .editors
            .iter()
            .find(|(_, editor)| editor.uri == uri && editor.column == options.column)
            .map(|(id, _)| *id);

        let id = match existing {
            Some(id) => id,
            None => {
                let previous_active = self.active;
                let id = self.open_editor(uri, options.column);
                self.active = previous_active;
                id
            }
        };
        if !options.preserve_focus || self.active.is_none() {
            self.active = Some(id);
        }
        Some(id)
    }

    fn set_selections(&mut self, editor: EditorId, selections: &[Selection]) -> bool {
        let Some(entry) = self.editors.get_mut(&editor) else {
            return false;
        };
        if entry.selections == selections {
            return false;
        }
        entry.selections = selections.to_vec();
        self.pending.push_back(HostEvent::SelectionChanged {
            editor,
            selections: selections.to_vec(),
        });
        true
    }

    fn reveal(&mut self, editor: EditorId, selection: Selection) {
        if let Some(entry) = self.editors.get_mut(&editor) {
            entry.revealed = Some(selection);
        }
    }

    fn create_panel(&mut self, title: &str, column: ViewColumn) -> PanelId {
        let id = PanelId::new(self.next_panel_id);
        self.next_panel_id = self.next_panel_id.saturating_add(1);
        self.panels.insert(
            id,
            HeadlessPanel {
                title: title.to_string(),
                column,
                content: String::new(),
                reveal_count: 0,
            },
        );
        id
    }

    fn update_panel(&mut self, panel: PanelId, content: &str) {
        if let Some(entry) = self.panels.get_mut(&panel) {
            entry.content = content.to_string();
        }
    }

    fn reveal_panel(&mut self, panel: PanelId) {
        if let Some(entry) = self.panels.get_mut(&panel) {
            entry.reveal_count += 1;
        }
    }
}
