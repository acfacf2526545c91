//! Product store: the latest version of every product, keyed by target identity.

use crate::product::{ArtifactKind, Product};
use crate::uri::{SourceUri, TargetUri};
use std::collections::BTreeMap;

/// Result of saving a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Store key the product was saved under.
    pub target: TargetUri,
    /// Rendering kind of the saved product.
    pub kind: ArtifactKind,
    /// `true` if the content was concatenated to a stored version.
    pub appended: bool,
    /// `true` if an earlier version was overwritten.
    pub replaced: bool,
}

/// Latest product per target identity.
pub struct ProductStore {
    products: BTreeMap<TargetUri, Product>,
    empty: Product,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            empty: Product::empty(),
        }
    }
}

impl std::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("product_count", &self.products.len())
            .finish()
    }
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Store `product`, replacing or extending the version under the same identity.
    pub fn save(&mut self, mut product: Product) -> SaveOutcome {
        let target = product.target_uri();
        let previous = self.products.get(&target);
        let appended = product.is_append() && previous.is_some();
        let replaced = previous.is_some();
        product.prepare_for_store(previous);

        let kind = product.kind();
        self.products.insert(target.clone(), product);
        SaveOutcome {
            target,
            kind,
            appended,
            replaced,
        }
    }

    /// Stored product for `target`, or the empty product when none is stored.
    pub fn get(&self, target: &TargetUri) -> &Product {
        self.products.get(target).unwrap_or(&self.empty)
    }

    /// Stored product for `target`, if any.
    pub fn find(&self, target: &TargetUri) -> Option<&Product> {
        self.products.get(target)
    }

    pub(crate) fn find_mut(&mut self, target: &TargetUri) -> Option<&mut Product> {
        self.products.get_mut(target)
    }

    /// Returns `true` if a product is stored for `target`.
    pub fn contains(&self, target: &TargetUri) -> bool {
        self.products.contains_key(target)
    }

    /// Drop every product derived from `source` and return their identities.
    pub fn remove_source(&mut self, source: &SourceUri) -> Vec<TargetUri> {
        let removed: Vec<TargetUri> = self
            .products
            .iter()
            .filter(|(_, product)| product.source_uri() == source)
            .map(|(target, _)| target.clone())
            .collect();
        for target in &removed {
            self.products.remove(target);
        }
        removed
    }

    /// Stored products in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TargetUri, &Product)> {
        self.products.iter()
    }

    /// Stored identities in key order.
    pub fn targets(&self) -> impl Iterator<Item = &TargetUri> {
        self.products.keys()
    }
}
