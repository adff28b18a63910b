use alloc::vec::Vec;

use crate::key::KeyMap;
use crate::{ColumnId, ColumnIndex, ColumnTreeError};

/// Column configuration as supplied by the table definition.
///
/// Leaf vs. group is structural: a column with no `children` is a leaf (bound to data and
/// directly resizable), anything else is a group whose width is derived from its children.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDef {
    pub id: ColumnId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_width: f32,
    /// `None` means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_width: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default = "default_resizable"))]
    pub resizable: bool,
    /// Configured default width, used when nothing has been committed or rendered yet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ColumnDef>,
}

#[cfg(feature = "serde")]
fn default_resizable() -> bool {
    true
}

impl ColumnDef {
    pub fn leaf(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            min_width: 0.0,
            max_width: None,
            resizable: true,
            width: None,
            children: Vec::new(),
        }
    }

    pub fn group(id: impl Into<ColumnId>, children: impl IntoIterator<Item = ColumnDef>) -> Self {
        Self {
            children: children.into_iter().collect(),
            ..Self::leaf(id)
        }
    }

    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn with_max_width(mut self, max_width: Option<f32>) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_width(mut self, width: Option<f32>) -> Self {
        self.width = width;
        self
    }

    pub fn with_child(mut self, child: ColumnDef) -> Self {
        self.children.push(child);
        self
    }
}

/// One column inside a [`ColumnTree`].
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnNode {
    id: ColumnId,
    min_width: f32,
    max_width: Option<f32>,
    resizable: bool,
    width: Option<f32>,
    parent: Option<ColumnIndex>,
    children: Vec<ColumnIndex>,
    depth: usize,
}

impl ColumnNode {
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    pub fn max_width(&self) -> Option<f32> {
        self.max_width
    }

    /// The configured flag. Groups report it as configured but are never draggable.
    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn parent(&self) -> Option<ColumnIndex> {
        self.parent
    }

    pub fn children(&self) -> &[ColumnIndex] {
        &self.children
    }

    /// Number of ancestors (roots are at depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether a drag may target this column.
    pub fn is_draggable(&self) -> bool {
        self.resizable && self.is_leaf()
    }

    /// Clamps `width` into `[min_width, max_width]`; an absent `max_width` is unbounded.
    pub fn clamp_width(&self, width: f32) -> f32 {
        let width = width.max(self.min_width);
        match self.max_width {
            Some(max) => width.min(max),
            None => width,
        }
    }
}

/// An immutable arena of columns with parent/child links.
///
/// Nodes are stored in pre-order, so a parent always precedes its descendants. Construction
/// and every query walk the tree with explicit stacks or parent links, never recursion, so
/// arbitrarily deep hierarchies are fine.
#[derive(Clone, Debug)]
pub struct ColumnTree {
    nodes: Vec<ColumnNode>,
    roots: Vec<ColumnIndex>,
    by_id: KeyMap<ColumnId, ColumnIndex>,
}

impl ColumnTree {
    pub fn new(columns: impl IntoIterator<Item = ColumnDef>) -> Result<Self, ColumnTreeError> {
        let mut nodes: Vec<ColumnNode> = Vec::new();
        let mut roots = Vec::new();
        let mut by_id = KeyMap::new();

        let mut stack: Vec<(ColumnDef, Option<ColumnIndex>, usize)> = columns
            .into_iter()
            .map(|def| (def, None, 0))
            .collect();
        stack.reverse();

        while let Some((def, parent, depth)) = stack.pop() {
            let ColumnDef {
                id,
                min_width,
                max_width,
                resizable,
                width,
                children,
            } = def;
            validate(&id, min_width, max_width)?;

            let index = ColumnIndex(nodes.len());
            if by_id.insert(id.clone(), index).is_some() {
                return Err(ColumnTreeError::DuplicateId { id });
            }
            match parent {
                Some(p) => nodes[p.0].children.push(index),
                None => roots.push(index),
            }
            nodes.push(ColumnNode {
                id,
                min_width,
                max_width,
                resizable,
                width,
                parent,
                children: Vec::with_capacity(children.len()),
                depth,
            });

            // Reverse so siblings pop (and get their indexes) in declaration order.
            for child in children.into_iter().rev() {
                stack.push((child, Some(index), depth + 1));
            }
        }

        rdebug!(columns = nodes.len(), roots = roots.len(), "ColumnTree::new");
        Ok(Self {
            nodes,
            roots,
            by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[ColumnIndex] {
        &self.roots
    }

    pub fn get(&self, index: ColumnIndex) -> Option<&ColumnNode> {
        self.nodes.get(index.0)
    }

    pub fn node(&self, index: ColumnIndex) -> &ColumnNode {
        &self.nodes[index.0]
    }

    pub fn index_of(&self, id: &str) -> Option<ColumnIndex> {
        self.by_id.get(id).copied()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ColumnNode> {
        self.index_of(id).map(|i| &self.nodes[i.0])
    }

    /// Iterates all columns in pre-order (parents before children, siblings in order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ColumnIndex, &ColumnNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ColumnIndex(i), node))
    }

    /// Walks the ancestor chain of `index`, nearest parent first, root last.
    pub fn ancestors(&self, index: ColumnIndex) -> Ancestors<'_> {
        let next = self.get(index).and_then(ColumnNode::parent);
        Ancestors { tree: self, next }
    }

    /// Collects the ancestor chain of `index`, nearest parent first.
    pub fn ancestor_chain(&self, index: ColumnIndex) -> Vec<ColumnIndex> {
        let depth = self.get(index).map_or(0, ColumnNode::depth);
        let mut out = Vec::with_capacity(depth);
        out.extend(self.ancestors(index));
        out
    }

    /// Visits the leaf descendants of `index` in display order without allocating output.
    ///
    /// A leaf visits itself.
    pub fn for_each_leaf(&self, index: ColumnIndex, mut f: impl FnMut(ColumnIndex, &ColumnNode)) {
        if self.get(index).is_none() {
            return;
        }
        let mut stack = Vec::from([index]);
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i.0];
            if node.is_leaf() {
                f(i, node);
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Returns the ordered leaf-descendant ids of `index`.
    pub fn flatten_leaves(&self, index: ColumnIndex) -> Vec<ColumnId> {
        let mut out = Vec::new();
        self.for_each_leaf(index, |_, node| out.push(node.id.clone()));
        out
    }

    /// Returns every leaf of the table in display order.
    pub fn leaf_ids(&self) -> Vec<ColumnId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.for_each_leaf(root, |_, node| out.push(node.id.clone()));
        }
        out
    }

    /// Number of levels in the deepest branch (a flat table has depth 1).
    pub fn max_depth(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.depth + 1)
            .max()
            .unwrap_or(0)
    }
}

fn validate(id: &ColumnId, min_width: f32, max_width: Option<f32>) -> Result<(), ColumnTreeError> {
    if id.is_empty() {
        return Err(ColumnTreeError::EmptyId);
    }
    if !min_width.is_finite() || min_width < 0.0 {
        return Err(ColumnTreeError::InvalidMinWidth {
            id: id.clone(),
            min_width,
        });
    }
    if let Some(max_width) = max_width {
        if !max_width.is_finite() || max_width < min_width {
            return Err(ColumnTreeError::InvalidMaxWidth {
                id: id.clone(),
                min_width,
                max_width,
            });
        }
    }
    Ok(())
}

/// Iterator over a column's ancestors, nearest first. See [`ColumnTree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a ColumnTree,
    next: Option<ColumnIndex>,
}

impl Iterator for Ancestors<'_> {
    type Item = ColumnIndex;

    fn next(&mut self) -> Option<ColumnIndex> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
