#![warn(missing_docs)]
//! Monto Core - Product Store and Selection Linking for Editor-Derived Artifacts
//!
//! # Overview
//!
//! `monto-core` keeps the artifacts ("products") an external producer derives from source
//! documents: pretty-printed trees, generated code, diagrams. Each product carries two
//! range tables mapping offsets of the source to offsets of the product and back, which the
//! session uses to keep selections in both documents in step.
//!
//! It does not talk to an editor directly. The upper layer implements [`EditorHost`] and
//! feeds editor events into a [`Session`]; [`HeadlessHost`] is an in-memory implementation
//! for tests and tools.
//!
//! # Core Features
//!
//! - **Product Store**: keyed by target uri, with append semantics and graphic dispatch
//! - **Tree Index**: hierarchical view of stored products, rebuilt on invalidation
//! - **Selection Linking**: bidirectional propagation with echo suppression
//! - **View Registry**: column placement memory and panel reuse for graphic products
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Session (event handlers, commands)         │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Linker (selection mapping, echo latches)   │  ← Propagation
//! ├──────────────────────┬──────────────────────┤
//! │  Product Store       │  View Registry       │  ← State
//! ├──────────────────────┴──────────────────────┤
//! │  Range Tables / Uris                        │  ← Data Model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use monto_core::{
//!     HeadlessHost, OffsetRange, Product, RangeEntry, Session, SessionConfig, ViewColumn,
//! };
//!
//! let mut session = Session::new(SessionConfig::default());
//! let mut host = HeadlessHost::new();
//! host.set_document("file:///a.c", "int x;");
//!
//! let product = Product::new("file:///a.c", "ast", "text", "decl x").with_range_maps(
//!     vec![RangeEntry::new(OffsetRange::new(4, 5), vec![OffsetRange::new(5, 6)])],
//!     vec![RangeEntry::new(OffsetRange::new(5, 6), vec![OffsetRange::new(4, 5)])],
//! );
//! let target = session.save_product(product);
//! host.set_document(target.as_str(), session.provide_content(&target));
//!
//! let source = host.open_editor("file:///a.c", ViewColumn::ONE);
//! let view = host.open_editor(target.as_str(), ViewColumn::TWO);
//! host.focus(source);
//!
//! host.select_offsets(source, 4, 4);
//! host.pump(&mut session);
//! assert_eq!(host.selection_offsets(view), vec![(5, 6)]);
//! ```
//!
//! # Module Description
//!
//! - [`range`] - offset ranges and range tables
//! - [`uri`] - source and target document identities
//! - [`product`] - the product record
//! - [`store`] - product store
//! - [`tree`] - tree index over stored products
//! - [`views`] - column placement and panel cache
//! - [`echo`] - echo suppression latches
//! - [`host`] - the editor host interface
//! - [`linker`] - selection mapping
//! - [`session`] - event handlers and commands
//! - [`headless`] - in-memory host

pub mod config;
pub mod echo;
pub mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod line_index;
pub mod linker;
pub mod product;
pub mod range;
pub mod session;
pub mod store;
pub mod tree;
pub mod uri;
pub mod views;

pub use config::{SessionConfig, VerifiedFunction};
pub use echo::{EchoGuard, EchoLatch};
pub use error::MontoError;
pub use events::{SessionEvent, SessionEventCallback};
pub use headless::{HeadlessHost, HeadlessPanel, HostEvent};
pub use host::{EditorHost, EditorId, EditorInfo, Position, Selection, ShowOptions};
pub use line_index::LineIndex;
pub use linker::{AppliedSelections, LinkOutcome};
pub use product::{ArtifactKind, Product};
pub use range::{LinkDirection, OffsetRange, RangeEntry};
pub use session::{NO_PRODUCT_CONTENT, OpenedView, Session};
pub use store::{ProductStore, SaveOutcome};
pub use tree::{NodeAction, ProductTree, TreeNode};
pub use uri::{SourceUri, TargetUri};
pub use views::{DocumentRole, PanelId, ViewColumn, ViewRegistry};
