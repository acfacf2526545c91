//! Change notifications emitted by the session for the rendering side.

use crate::uri::TargetUri;
use crate::views::PanelId;

/// A change the renderer must react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The content of a text product changed; re-fetch it with
    /// [`crate::Session::provide_content`].
    ContentChanged(TargetUri),
    /// A graphic product changed.
    ///
    /// When `panel` is set, the product is on screen in that panel; re-inject the content into
    /// it rather than creating a new one, so pan/zoom state survives.
    GraphicChanged {
        /// Changed product.
        target: TargetUri,
        /// Panel currently showing it.
        panel: Option<PanelId>,
    },
    /// The product tree changed; re-render it from [`crate::Session::tree`].
    TreeChanged,
}

/// Session event callback.
pub type SessionEventCallback = Box<dyn FnMut(&SessionEvent) + Send>;
