//! The process-wide product session.
//!
//! A [`Session`] owns the product store, the tree index built over it and the view registry,
//! and turns editor events into store updates, selection propagation and change
//! notifications. It is created once at startup and handed by reference to whatever delivers
//! events; nothing in it is global.
//!
//! All handlers run to completion on the caller's thread. Events must be fed in arrival
//! order: in particular a product delivered after an edit has to be saved *after* the clear
//! that edit triggers, or the fresh product would be dropped by the stale invalidation.

use crate::config::SessionConfig;
use crate::echo::EchoGuard;
use crate::error::MontoError;
use crate::events::{SessionEvent, SessionEventCallback};
use crate::host::{EditorHost, EditorId, EditorInfo, Selection, ShowOptions};
use crate::linker::{self, AppliedSelections, LinkOutcome};
use crate::product::{ArtifactKind, Product};
use crate::range::{LinkDirection, OffsetRange};
use crate::store::ProductStore;
use crate::tree::ProductTree;
use crate::uri::{SourceUri, TargetUri, is_product_uri};
use crate::views::{DocumentRole, PanelId, ViewRegistry};
use std::collections::HashMap;

/// Content served for a product document when nothing is stored (a single space, never empty).
pub const NO_PRODUCT_CONTENT: &str = " ";

/// How a product was put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenedView {
    /// In a text editor.
    Editor(EditorId),
    /// In an interactive panel.
    Panel(PanelId),
}

/// Product store, tree index and view registry plus the event handlers driving them.
#[derive(Default)]
pub struct Session {
    config: SessionConfig,
    store: ProductStore,
    tree: ProductTree,
    views: ViewRegistry,
    echoes: HashMap<TargetUri, EchoGuard>,
    callbacks: Vec<SessionEventCallback>,
    version: u64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("product_count", &self.store.len())
            .field("panel_count", &self.views.panel_count())
            .field("version", &self.version)
            .finish()
    }
}

impl Session {
    /// Create an empty session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the settings (after the host reports a configuration change).
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    /// Product store.
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Current product tree.
    pub fn tree(&self) -> &ProductTree {
        &self.tree
    }

    /// View registry.
    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    /// Echo-suppression state of `target`.
    ///
    /// Latches are kept per identity, so they survive a clear of the product itself.
    pub fn echo(&self, target: &TargetUri) -> EchoGuard {
        self.echoes.get(target).copied().unwrap_or_default()
    }

    /// Incremented on every store change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscribe to session events.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SessionEvent) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn emit(&mut self, event: SessionEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }

    fn bump_version(&mut self) {
        self.version = self.version.saturating_add(1);
    }

    // Products

    /// Store a product delivered by the producer.
    ///
    /// Text products notify [`SessionEvent::ContentChanged`]; graphic products notify
    /// [`SessionEvent::GraphicChanged`] with the panel currently showing them.
    pub fn save_product(&mut self, product: Product) -> TargetUri {
        let outcome = self.store.save(product);
        self.echoes.remove(&outcome.target);
        self.bump_version();
        tracing::debug!(
            target = %outcome.target,
            appended = outcome.appended,
            replaced = outcome.replaced,
            "saved product"
        );

        match outcome.kind {
            ArtifactKind::Text => self.emit(SessionEvent::ContentChanged(outcome.target.clone())),
            ArtifactKind::Graphic => {
                let panel = self.views.panel_for(&outcome.target);
                self.emit(SessionEvent::GraphicChanged {
                    target: outcome.target.clone(),
                    panel,
                });
            }
        }

        let stored = self.store.get(&outcome.target);
        self.tree.insert(stored);
        self.emit(SessionEvent::TreeChanged);
        outcome.target
    }

    /// Stored product for `target`, or the empty product.
    pub fn product(&self, target: &TargetUri) -> &Product {
        self.store.get(target)
    }

    /// Document content for a product uri.
    pub fn provide_content(&self, target: &TargetUri) -> &str {
        match self.store.find(target) {
            Some(product) => product.content(),
            None => NO_PRODUCT_CONTENT,
        }
    }

    /// Linked intervals for `offset` in `target`'s table for `direction`.
    ///
    /// Total: unknown products and unmatched offsets yield a zero-length range at offset 0.
    pub fn linked_ranges(
        &self,
        target: &TargetUri,
        direction: LinkDirection,
        offset: usize,
    ) -> Vec<OffsetRange> {
        self.store.get(target).linked_ranges(direction, offset)
    }

    /// Drop every product of `source` without consulting the host.
    ///
    /// The tree is rebuilt from the surviving products. Returns the dropped identities.
    pub fn clear_source(&mut self, source: &SourceUri) -> Vec<TargetUri> {
        let removed = self.store.remove_source(source);
        self.tree = ProductTree::rebuild(self.store.iter().map(|(_, product)| product));
        self.bump_version();
        tracing::debug!(source = %source, removed = removed.len(), "cleared products");
        self.emit(SessionEvent::TreeChanged);
        removed
    }

    /// Drop every product of `source` and refresh every visible product view.
    pub fn clear_products<H: EditorHost + ?Sized>(
        &mut self,
        host: &H,
        source: &SourceUri,
    ) -> Vec<TargetUri> {
        let removed = self.clear_source(source);
        for editor in host.visible_editors() {
            if !is_product_uri(&editor.uri) {
                continue;
            }
            match TargetUri::parse(&editor.uri) {
                Ok(target) => self.emit(SessionEvent::ContentChanged(target)),
                Err(err) => tracing::warn!(error = %err, "visible product editor has a malformed uri"),
            }
        }
        removed
    }

    // Document lifecycle

    /// A document was closed.
    pub fn on_document_closed<H: EditorHost + ?Sized>(
        &mut self,
        host: &H,
        uri: &str,
    ) -> Vec<TargetUri> {
        self.invalidate(host, uri)
    }

    /// A document was saved.
    pub fn on_document_saved<H: EditorHost + ?Sized>(
        &mut self,
        host: &H,
        uri: &str,
    ) -> Vec<TargetUri> {
        self.invalidate(host, uri)
    }

    /// A document was edited. Products are only dropped when `updateOnChange` is set.
    pub fn on_document_changed<H: EditorHost + ?Sized>(
        &mut self,
        host: &H,
        uri: &str,
    ) -> Vec<TargetUri> {
        if !self.config.update_on_change {
            return Vec::new();
        }
        self.invalidate(host, uri)
    }

    fn invalidate<H: EditorHost + ?Sized>(&mut self, host: &H, uri: &str) -> Vec<TargetUri> {
        if is_product_uri(uri) {
            return Vec::new();
        }
        self.clear_products(host, &SourceUri::parse(uri))
    }

    // Placement

    /// The set of visible editors changed; remember where each document sits.
    pub fn on_visible_editors_changed(&mut self, editors: &[EditorInfo]) {
        for editor in editors {
            if let Some(column) = editor.column {
                self.views.record_column(&editor.uri, column);
            }
        }
    }

    /// A panel was closed by the user.
    pub fn on_panel_disposed(&mut self, panel: PanelId) -> Option<TargetUri> {
        let target = self.views.remove_panel(panel);
        if let Some(target) = target.as_ref() {
            tracing::debug!(target = %target, panel = panel.get(), "panel disposed");
        }
        target
    }

    /// Show the product `target`: text in an editor, graphics in a reused panel.
    pub fn open_product<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: &TargetUri,
    ) -> Option<OpenedView> {
        let Some(product) = self.store.find(target) else {
            tracing::warn!(target = %target, "cannot open unknown product");
            return None;
        };

        let column = self.views.column_for(target.as_str(), DocumentRole::Product);
        match product.kind() {
            ArtifactKind::Text => host
                .show_document(
                    target.as_str(),
                    ShowOptions {
                        column,
                        preserve_focus: true,
                        preview: false,
                    },
                )
                .map(OpenedView::Editor),
            ArtifactKind::Graphic => {
                let panel = match self.views.panel_for(target) {
                    Some(panel) => panel,
                    None => {
                        let panel = host.create_panel(&panel_title(target), column);
                        self.views.insert_panel(target.clone(), panel);
                        panel
                    }
                };
                host.update_panel(panel, product.content());
                host.reveal_panel(panel);
                Some(OpenedView::Panel(panel))
            }
        }
    }

    /// Push the stored content of a graphic product into its panel, if one is open.
    pub fn refresh_panel<H: EditorHost + ?Sized>(&self, host: &mut H, target: &TargetUri) -> bool {
        match (self.views.panel_for(target), self.store.find(target)) {
            (Some(panel), Some(product)) => {
                host.update_panel(panel, product.content());
                true
            }
            _ => false,
        }
    }

    /// Open any document (e.g. a source file picked in the tree) in its column.
    pub fn open_uri<H: EditorHost + ?Sized>(&mut self, host: &mut H, uri: &str) -> Option<EditorId> {
        let role = if is_product_uri(uri) {
            DocumentRole::Product
        } else {
            DocumentRole::Source
        };
        let column = self.views.column_for(uri, role);
        host.show_document(
            uri,
            ShowOptions {
                column,
                preserve_focus: true,
                preview: false,
            },
        )
    }

    // Selection linking

    /// The selections of `editor` changed.
    ///
    /// Changes in a product view propagate back to the source document; changes in a source
    /// document propagate to every visible view of its products. Echoes of the session's own
    /// writes are swallowed.
    pub fn on_selection_changed<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        editor: EditorId,
        selections: &[Selection],
    ) -> Result<LinkOutcome, MontoError> {
        let Some(uri) = host.editor_uri(editor) else {
            return Ok(LinkOutcome::Unlinked);
        };
        if is_product_uri(&uri) {
            self.propagate_reverse(host, editor, &uri, selections)
        } else {
            Ok(self.propagate_forward(host, editor, &uri, selections, true))
        }
    }

    /// Select the linked ranges of the active editor's selections in all visible product views
    /// of its document, focusing each view written to.
    pub fn select_linked_editors<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> LinkOutcome {
        let Some(editor) = host.active_editor() else {
            return LinkOutcome::Unlinked;
        };
        let Some(uri) = host.editor_uri(editor) else {
            return LinkOutcome::Unlinked;
        };
        let selections = host.selections(editor);
        self.propagate_forward(host, editor, &uri, &selections, false)
    }

    fn propagate_forward<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        source_editor: EditorId,
        source_uri: &str,
        selections: &[Selection],
        from_event: bool,
    ) -> LinkOutcome {
        let source = SourceUri::parse(source_uri);
        let mut applied = Vec::new();
        let mut swallowed = false;

        for view in host.visible_editors() {
            if !is_product_uri(&view.uri) {
                continue;
            }
            let target = match TargetUri::parse(&view.uri) {
                Ok(target) => target,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping product editor with malformed uri");
                    continue;
                }
            };
            if target.source_uri() != source {
                continue;
            }
            let product = self.store.get(&target);
            let echo = self.echoes.entry(target.clone()).or_default();
            if from_event && echo.source.consume() {
                tracing::debug!(target = %target, "swallowed source selection echo");
                swallowed = true;
                continue;
            }

            let mapped = linker::map_selections(
                &*host,
                product,
                LinkDirection::Forward,
                source_editor,
                selections,
                view.id,
            );
            if mapped.is_empty() {
                continue;
            }
            if !from_event {
                let column = self.views.column_for(&view.uri, DocumentRole::Product);
                host.show_document(
                    &view.uri,
                    ShowOptions {
                        column,
                        preserve_focus: false,
                        preview: false,
                    },
                );
            }
            linker::write_selections(host, view.id, &mut echo.target, &mapped);
            applied.push(AppliedSelections {
                editor: view.id,
                uri: view.uri,
                selections: mapped,
            });
        }

        if !applied.is_empty() {
            LinkOutcome::Applied(applied)
        } else if swallowed {
            LinkOutcome::Swallowed
        } else {
            LinkOutcome::Unlinked
        }
    }

    fn propagate_reverse<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        target_editor: EditorId,
        target_uri: &str,
        selections: &[Selection],
    ) -> Result<LinkOutcome, MontoError> {
        let target = TargetUri::parse(target_uri).inspect_err(|err| {
            tracing::warn!(error = %err, "selection change in product editor with malformed uri");
        })?;
        let source = target.source_uri();
        let column = self.views.column_for(source.as_str(), DocumentRole::Source);
        let options = ShowOptions {
            column,
            preserve_focus: true,
            preview: false,
        };
        let Some(source_editor) = host.show_document(source.as_str(), options) else {
            return Ok(LinkOutcome::Unlinked);
        };

        let product = self.store.get(&target);
        let echo = self.echoes.entry(target.clone()).or_default();
        if echo.target.consume() {
            tracing::debug!(target = %target, "swallowed product selection echo");
            return Ok(LinkOutcome::Swallowed);
        }

        let mapped = linker::map_selections(
            &*host,
            product,
            LinkDirection::Reverse,
            target_editor,
            selections,
            source_editor,
        );
        if mapped.is_empty() {
            return Ok(LinkOutcome::Unlinked);
        }
        host.show_document(
            source.as_str(),
            ShowOptions {
                preserve_focus: false,
                ..options
            },
        );
        linker::write_selections(host, source_editor, &mut echo.source, &mapped);
        Ok(LinkOutcome::Applied(vec![AppliedSelections {
            editor: source_editor,
            uri: source.as_str().to_string(),
            selections: mapped,
        }]))
    }
}

fn panel_title(target: &TargetUri) -> String {
    let name = target.product_name();
    let full_path = match name.split_once(crate::uri::PRODUCT_SEPARATOR) {
        Some((path, file)) => format!("{path} {file}"),
        None => name.to_string(),
    };
    match full_path.rfind('/') {
        Some(index) => full_path[index + 1..].to_string(),
        None => full_path,
    }
}
