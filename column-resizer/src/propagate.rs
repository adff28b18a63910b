//! Width propagation from a resized leaf up to its enclosing groups.
//!
//! A group's displayed width is the sum of its immediate children's displayed widths. When a
//! leaf changes, only its ancestor chain can change, so propagation walks that chain nearest
//! parent first: each resum sees the already-updated width of the child below it. Cost per
//! frame is proportional to the hierarchy depth (times the fan-out of each ancestor), not to
//! the size of the tree.

use alloc::vec::Vec;

use crate::{ColumnId, ColumnIndex, ColumnTree, VisualSurface};

/// Handles for one immediate child of a group, captured when a drag starts.
#[derive(Clone, Debug)]
pub struct ChildRefs<H> {
    column: ColumnIndex,
    handles: Vec<H>,
    /// Displayed width at capture time; used when every handle went stale mid-drag.
    baseline: f32,
}

impl<H> ChildRefs<H> {
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }
}

/// Everything needed to resum one ancestor group during a drag.
#[derive(Clone, Debug)]
pub struct GroupRefs<H> {
    group: ColumnIndex,
    handles: Vec<H>,
    children: Vec<ChildRefs<H>>,
    leaves: Vec<ColumnId>,
}

impl<H> GroupRefs<H> {
    /// Resolves the handles of `group` and of its immediate children, and flattens the group
    /// to its leaf ids. Done once per drag, never per frame.
    pub fn capture<S>(tree: &ColumnTree, surface: &S, group: ColumnIndex) -> Self
    where
        S: VisualSurface<Handle = H> + ?Sized,
    {
        let node = tree.node(group);
        let mut handles = Vec::new();
        surface.resolve(node.id(), &mut handles);

        let children = node
            .children()
            .iter()
            .map(|&child| {
                let mut child_handles = Vec::new();
                surface.resolve(tree.node(child).id(), &mut child_handles);
                let baseline = first_live_width(surface, &child_handles).unwrap_or(0.0);
                ChildRefs {
                    column: child,
                    handles: child_handles,
                    baseline,
                }
            })
            .collect();

        Self {
            group,
            handles,
            children,
            leaves: tree.flatten_leaves(group),
        }
    }

    pub fn group(&self) -> ColumnIndex {
        self.group
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    pub fn children(&self) -> &[ChildRefs<H>] {
        &self.children
    }

    /// Ordered leaf-descendant ids of the group.
    pub fn leaves(&self) -> &[ColumnId] {
        &self.leaves
    }
}

/// Recomputes a group's width as the sum of its immediate children's current widths.
///
/// `fresh` carries the child on the dragged chain together with the width computed for it in
/// this frame; that value wins over whatever the surface reports. Other children are read
/// from the surface, falling back to their captured baseline when no handle is live.
pub fn resum_group<S>(
    surface: &S,
    group: &GroupRefs<S::Handle>,
    fresh: Option<(ColumnIndex, f32)>,
) -> f32
where
    S: VisualSurface + ?Sized,
{
    group
        .children
        .iter()
        .map(|child| match fresh {
            Some((column, width)) if column == child.column => width,
            _ => first_live_width(surface, &child.handles).unwrap_or(child.baseline),
        })
        .sum()
}

/// Writes `leaf_width` up the ancestor chain.
///
/// `groups` must be ordered nearest ancestor first (as built by the resizer at drag start).
/// Returns the resummed width of each group in the same order.
pub fn propagate<S>(
    surface: &mut S,
    groups: &[GroupRefs<S::Handle>],
    leaf: ColumnIndex,
    leaf_width: f32,
    out: &mut Vec<f32>,
) where
    S: VisualSurface + ?Sized,
{
    out.clear();
    let mut fresh = (leaf, leaf_width);
    for group in groups {
        let width = resum_group(surface, group, Some(fresh));
        for handle in &group.handles {
            surface.set_width(handle, width);
        }
        rtrace!(group = group.group.get(), width, "propagate");
        out.push(width);
        fresh = (group.group, width);
    }
}

fn first_live_width<S>(surface: &S, handles: &[S::Handle]) -> Option<f32>
where
    S: VisualSurface + ?Sized,
{
    handles.iter().find_map(|h| surface.width(h))
}
