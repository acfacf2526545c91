//! The editor seam.
//!
//! The session never talks to a UI directly. Hosts implement [`EditorHost`] to expose their
//! open editors, convert between character offsets and positions, and carry out the few editor
//! actions the linker needs. Editor actions are fire-and-continue: any selection-change event a
//! write causes is delivered back to the session later, as a separate call.

use crate::views::{PanelId, ViewColumn};
use std::cmp::Ordering;

/// Opaque identifier of an editor (one view of a document) in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditorId(u64);

impl EditorId {
    /// Wrap a host handle.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Underlying host handle.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Logical position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Selection start position
    pub start: Position,
    /// Selection end position
    pub end: Position,
}

impl Selection {
    /// Create a selection.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty selection (caret) at `position`.
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns `true` if the selection covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A visible editor as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInfo {
    /// Editor handle.
    pub id: EditorId,
    /// Uri of the document shown.
    pub uri: String,
    /// Column the editor sits in, if it has one.
    pub column: Option<ViewColumn>,
}

/// Options for [`EditorHost::show_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    /// Column to show the document in.
    pub column: ViewColumn,
    /// Keep keyboard focus where it is.
    pub preserve_focus: bool,
    /// Open as a transient preview tab.
    pub preview: bool,
}

/// Editor operations and queries the session relies on.
pub trait EditorHost {
    /// Currently visible editors.
    fn visible_editors(&self) -> Vec<EditorInfo>;

    /// Editor with keyboard focus.
    fn active_editor(&self) -> Option<EditorId>;

    /// Uri of the document shown in `editor`.
    fn editor_uri(&self, editor: EditorId) -> Option<String>;

    /// Current selections of `editor`.
    fn selections(&self, editor: EditorId) -> Vec<Selection>;

    /// Character offset of `position` in the document shown by `editor`.
    fn offset_at(&self, editor: EditorId, position: Position) -> usize;

    /// Position of character `offset` in the document shown by `editor`.
    fn position_at(&self, editor: EditorId, offset: usize) -> Position;

    /// Show the document at `uri`, returning the editor showing it.
    fn show_document(&mut self, uri: &str, options: ShowOptions) -> Option<EditorId>;

    /// Replace the selections of `editor`.
    ///
    /// Returns `true` if the host will report a selection-change event for this write.
    fn set_selections(&mut self, editor: EditorId, selections: &[Selection]) -> bool;

    /// Scroll `editor` so that `selection` is visible.
    fn reveal(&mut self, editor: EditorId, selection: Selection);

    /// Create an interactive panel titled `title` in `column`.
    fn create_panel(&mut self, title: &str, column: ViewColumn) -> PanelId;

    /// Replace the content rendered by `panel`, keeping the panel (and its view state).
    fn update_panel(&mut self, panel: PanelId, content: &str);

    /// Bring `panel` to the front without taking focus.
    fn reveal_panel(&mut self, panel: PanelId);
}
