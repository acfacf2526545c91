//! Placement cache for opened documents and product panels.

use crate::uri::TargetUri;
use std::collections::HashMap;

/// Editor column a document is shown in (1-based, as hosts number them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewColumn(u32);

impl ViewColumn {
    /// Primary column.
    pub const ONE: ViewColumn = ViewColumn(1);
    /// Secondary column.
    pub const TWO: ViewColumn = ViewColumn(2);

    /// Column with the given host number.
    pub fn new(column: u32) -> Self {
        Self(column)
    }

    /// Host column number.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Host-allocated handle of an interactive panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(u64);

impl PanelId {
    /// Wrap a host handle.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Underlying host handle.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Whether a document is a source file or a product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// A source document.
    Source,
    /// A product document or panel.
    Product,
}

impl DocumentRole {
    /// Column used the first time a document of this role is placed.
    pub fn default_column(self) -> ViewColumn {
        match self {
            DocumentRole::Source => ViewColumn::ONE,
            DocumentRole::Product => ViewColumn::TWO,
        }
    }
}

/// Remembers where documents are shown and which panel displays each graphic product.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    columns: HashMap<String, ViewColumn>,
    panels: HashMap<TargetUri, PanelId>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column to show `uri` in.
    ///
    /// The first lookup of an unplaced document records the role's default column; later
    /// lookups reuse whatever is recorded.
    pub fn column_for(&mut self, uri: &str, role: DocumentRole) -> ViewColumn {
        *self
            .columns
            .entry(uri.to_string())
            .or_insert_with(|| role.default_column())
    }

    /// Recorded column of `uri`, if any.
    pub fn recorded_column(&self, uri: &str) -> Option<ViewColumn> {
        self.columns.get(uri).copied()
    }

    /// Record the column `uri` was observed in.
    pub fn record_column(&mut self, uri: &str, column: ViewColumn) {
        self.columns.insert(uri.to_string(), column);
    }

    /// Panel currently showing `target`.
    pub fn panel_for(&self, target: &TargetUri) -> Option<PanelId> {
        self.panels.get(target).copied()
    }

    /// Cache `panel` as the display of `target`, returning any panel it replaces.
    pub fn insert_panel(&mut self, target: TargetUri, panel: PanelId) -> Option<PanelId> {
        self.panels.insert(target, panel)
    }

    /// Evict a closed panel, returning the product it showed.
    pub fn remove_panel(&mut self, panel: PanelId) -> Option<TargetUri> {
        let target = self
            .panels
            .iter()
            .find(|(_, id)| **id == panel)
            .map(|(target, _)| target.clone())?;
        self.panels.remove(&target);
        Some(target)
    }

    /// Number of cached panels.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }
}
