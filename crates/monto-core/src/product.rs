//! Products: named, versioned artifacts derived from one source document.

use crate::range::{LinkDirection, OffsetRange, RangeEntry, resolve_targets};
use crate::uri::{SourceUri, TargetUri};
use serde::{Deserialize, Serialize};

/// How a product's content is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Plain text shown in a read-only editor.
    Text,
    /// Vector graphic (SVG) shown in a persistent interactive panel.
    Graphic,
}

impl ArtifactKind {
    /// Derive the kind from the producer's language tag.
    pub fn from_language(language: &str) -> Self {
        if language.eq_ignore_ascii_case("svg") {
            Self::Graphic
        } else {
            Self::Text
        }
    }
}

/// Wire shape of a product as delivered by the producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductWire {
    uri: String,
    name: String,
    language: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    append: bool,
    #[serde(default)]
    range_map: Vec<RangeEntry>,
    #[serde(default)]
    range_map_rev: Vec<RangeEntry>,
}

/// One version of a derived artifact.
///
/// The range tables are fixed at construction; a newer version of the same artifact replaces
/// the whole product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductWire", into = "ProductWire")]
pub struct Product {
    source: SourceUri,
    name: String,
    language: String,
    kind: ArtifactKind,
    content: String,
    append: bool,
    range_map: Vec<RangeEntry>,
    range_map_rev: Vec<RangeEntry>,
}

impl From<ProductWire> for Product {
    fn from(wire: ProductWire) -> Self {
        Product::new(&wire.uri, wire.name, wire.language, wire.content)
            .with_append(wire.append)
            .with_range_maps(wire.range_map, wire.range_map_rev)
    }
}

impl From<Product> for ProductWire {
    fn from(product: Product) -> Self {
        Self {
            uri: product.source.as_str().to_string(),
            name: product.name,
            language: product.language,
            content: product.content,
            append: product.append,
            range_map: product.range_map,
            range_map_rev: product.range_map_rev,
        }
    }
}

impl Product {
    /// Create a replacing product with empty range tables.
    pub fn new(
        source_uri: &str,
        name: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let language = language.into();
        Self {
            source: SourceUri::parse(source_uri),
            name: name.into(),
            kind: ArtifactKind::from_language(&language),
            language,
            content: content.into(),
            append: false,
            range_map: Vec::new(),
            range_map_rev: Vec::new(),
        }
    }

    /// The product returned for identities that have nothing stored.
    ///
    /// Both tables hold a single degenerate entry so range lookups stay total.
    pub fn empty() -> Self {
        Self {
            source: SourceUri::from_path(""),
            name: String::new(),
            language: String::new(),
            kind: ArtifactKind::Text,
            content: String::new(),
            append: false,
            range_map: vec![RangeEntry::degenerate()],
            range_map_rev: vec![RangeEntry::degenerate()],
        }
    }

    /// Mark the product as a continuation of the stored version.
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Attach the forward (`source -> product`) and reverse (`product -> source`) tables.
    pub fn with_range_maps(mut self, forward: Vec<RangeEntry>, reverse: Vec<RangeEntry>) -> Self {
        self.range_map = forward;
        self.range_map_rev = reverse;
        self
    }

    /// Identity of the originating source document.
    pub fn source_uri(&self) -> &SourceUri {
        &self.source
    }

    /// Artifact name (e.g. `ast`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language tag (e.g. `text`, `svg`).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Rendering kind.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Artifact body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this version continues the stored one.
    pub fn is_append(&self) -> bool {
        self.append
    }

    /// Forward table.
    pub fn range_map(&self) -> &[RangeEntry] {
        &self.range_map
    }

    /// Reverse table.
    pub fn range_map_rev(&self) -> &[RangeEntry] {
        &self.range_map_rev
    }

    /// Table used for lookups in `direction`.
    pub fn table(&self, direction: LinkDirection) -> &[RangeEntry] {
        match direction {
            LinkDirection::Forward => &self.range_map,
            LinkDirection::Reverse => &self.range_map_rev,
        }
    }

    /// Store key of this product.
    pub fn target_uri(&self) -> TargetUri {
        TargetUri::new(&self.source, &self.name, &self.language)
    }

    /// Tree label path: `<source path>|<name>.<language>`.
    pub fn product_name(&self) -> String {
        self.target_uri().product_name().to_string()
    }

    /// Entry in the `direction` table containing `offset`, if any.
    pub fn find_containing(&self, direction: LinkDirection, offset: usize) -> Option<&RangeEntry> {
        crate::range::find_containing(self.table(direction), offset)
    }

    /// Linked intervals for `offset`, or a zero-length range at offset 0 when nothing matches.
    pub fn linked_ranges(&self, direction: LinkDirection, offset: usize) -> Vec<OffsetRange> {
        resolve_targets(self.table(direction), offset)
    }

    /// Prepend `previous` content when this version continues it.
    pub(crate) fn prepare_for_store(&mut self, previous: Option<&Product>) {
        if self.append
            && let Some(previous) = previous
        {
            self.content.insert_str(0, &previous.content);
        }
    }
}
