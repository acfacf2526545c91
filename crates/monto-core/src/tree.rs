//! Hierarchical index over the product store.
//!
//! Each product name (`<source path>|<name>.<language>`) is split on the separator; the first
//! segment becomes an intermediate node per source file and the last one a leaf per product.
//! Siblings are kept sorted by label with any file extension stripped, ignoring case, so `a.c`
//! and `A.h` sort next to each other and `ast.text` sorts before `cfg.svg` regardless of
//! extension. Byte order breaks ties.

use crate::product::Product;
use crate::uri::{SourceUri, TargetUri};
use std::cmp::Ordering;

/// Label of the tree root.
pub const ROOT_LABEL: &str = "Products";

/// What activating a tree node does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAction {
    /// Open the product shown by a leaf.
    OpenProduct(TargetUri),
    /// Open the source document an intermediate node stands for.
    OpenSource(SourceUri),
}

/// A node of the product tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    full_path: Option<String>,
    children: Vec<TreeNode>,
    product: Option<TargetUri>,
}

impl TreeNode {
    fn root() -> Self {
        Self {
            label: ROOT_LABEL.to_string(),
            full_path: None,
            children: Vec::new(),
            product: None,
        }
    }

    fn child_of(parent: &TreeNode, key: &str, product: Option<TargetUri>) -> Self {
        let full_path = match parent.full_path.as_deref() {
            Some(parent_path) => format!("{parent_path} {key}"),
            None => key.to_string(),
        };
        Self {
            label: key.to_string(),
            full_path: Some(full_path),
            children: Vec::new(),
            product,
        }
    }

    /// Node label (one key segment).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label for display: the text after the last `/`.
    pub fn short_label(&self) -> &str {
        match self.label.rfind('/') {
            Some(index) => &self.label[index + 1..],
            None => &self.label,
        }
    }

    /// Space-joined labels from the first level down to this node; `None` for the root.
    pub fn full_path(&self) -> Option<&str> {
        self.full_path.as_deref()
    }

    /// Sorted children.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Stored product shown by this node, for leaves.
    pub fn product(&self) -> Option<&TargetUri> {
        self.product.as_ref()
    }

    /// Returns `true` if this node stands for a stored product.
    pub fn is_leaf(&self) -> bool {
        self.product.is_some()
    }

    /// Action bound to this node.
    pub fn action(&self) -> Option<NodeAction> {
        match (&self.product, &self.full_path) {
            (Some(target), _) => Some(NodeAction::OpenProduct(target.clone())),
            (None, Some(path)) => Some(NodeAction::OpenSource(SourceUri::from_path(path))),
            (None, None) => None,
        }
    }

    fn child_index(&self, key: &str) -> Option<usize> {
        self.children.iter().position(|child| child.label == key)
    }

    fn push_sorted(&mut self, node: TreeNode) -> usize {
        let label = node.label.clone();
        self.children.push(node);
        self.children.sort_by(compare_labels);
        self.child_index(&label).unwrap_or(self.children.len() - 1)
    }
}

fn trim_extension(label: &str) -> &str {
    match label.rfind('.') {
        Some(index) => &label[..index],
        None => label,
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn compare_labels(a: &TreeNode, b: &TreeNode) -> Ordering {
    cmp_ignore_case(trim_extension(&a.label), trim_extension(&b.label))
        .then_with(|| cmp_ignore_case(&a.label, &b.label))
        .then_with(|| a.label.cmp(&b.label))
}

fn insert_keys(parent: &mut TreeNode, keys: &[&str], target: TargetUri) {
    let Some((&key, rest)) = keys.split_first() else {
        return;
    };

    let existing = parent.child_index(key);
    if rest.is_empty() {
        let mut leaf = TreeNode::child_of(parent, key, Some(target));
        match existing {
            Some(index) => {
                // Products whose names extend this one hang below it.
                leaf.children = std::mem::take(&mut parent.children[index].children);
                parent.children[index] = leaf;
            }
            None => {
                parent.push_sorted(leaf);
            }
        }
        return;
    }

    let index = match existing {
        Some(index) => index,
        None => {
            let node = TreeNode::child_of(parent, key, None);
            parent.push_sorted(node)
        }
    };
    insert_keys(&mut parent.children[index], rest, target);
}

/// Tree of stored products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTree {
    root: TreeNode,
}

impl Default for ProductTree {
    fn default() -> Self {
        Self {
            root: TreeNode::root(),
        }
    }
}

impl ProductTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh tree from `products`.
    pub fn rebuild<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut tree = Self::new();
        for product in products {
            tree.insert(product);
        }
        tree
    }

    /// Root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Insert (or replace) the leaf for `product`.
    pub fn insert(&mut self, product: &Product) {
        let target = product.target_uri();
        let keys: Vec<&str> = target.keys().collect();
        insert_keys(&mut self.root, &keys, target.clone());
    }

    /// Node reached by following `keys` from the root.
    pub fn find(&self, keys: &[&str]) -> Option<&TreeNode> {
        let mut node = &self.root;
        for key in keys {
            node = &node.children[node.child_index(key)?];
        }
        Some(node)
    }

    /// Identities of all leaves, depth first.
    pub fn leaves(&self) -> Vec<&TargetUri> {
        fn walk<'a>(node: &'a TreeNode, out: &mut Vec<&'a TargetUri>) {
            if let Some(target) = node.product.as_ref() {
                out.push(target);
            }
            for child in &node.children {
                walk(child, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }
}
