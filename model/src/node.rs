//! `LeakNode`: the immutable, parent-linked retaining-path tree.
//!
//! An arena of nodes with integer parent indices (spec §9 design note)
//! rather than an `Rc`-linked tree: cheap to push, cheap to walk back to
//! the root, and the whole tree survives as a single contiguous buffer
//! until results are consumed — mirroring the teacher crate's
//! `Vec<SearchNodeV1>` node pool.

use crate::ids::ObjectId;
use crate::reference::LeakReference;

/// An index into a [`LeakNodeArena`]. Never constructed outside this module;
/// the only way to obtain one is to push a node into its owning arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeakNodeId(u32);

/// Either the root of a retaining path (a GC root instance) or a child
/// reached from some parent via a labeled reference.
#[derive(Debug, Clone)]
pub enum LeakNodeKind {
    Root,
    Child {
        parent: LeakNodeId,
        reference: LeakReference,
        /// `Some(description)` iff an exclusion rule matched this edge.
        exclusion_description: Option<String>,
    },
}

/// One node in the retaining-path tree.
#[derive(Debug, Clone)]
pub struct LeakNodeData {
    pub instance: ObjectId,
    /// Strictly increasing; assigned at push time. Tie-breaks the frontier
    /// within equal priority (spec §3).
    pub visit_order: u64,
    pub kind: LeakNodeKind,
}

/// Owns every node ever pushed during one `find_paths` call.
///
/// Lifecycle matches spec §3: created fresh per call, cleared (dropped) at
/// the end of the call. Not reused across calls.
#[derive(Debug, Default)]
pub struct LeakNodeArena {
    nodes: Vec<LeakNodeData>,
    next_visit_order: u64,
}

impl LeakNodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_visit_order: 0,
        }
    }

    /// Push a GC-root node. Assigns the next `visit_order`.
    pub fn push_root(&mut self, instance: ObjectId) -> LeakNodeId {
        self.push(instance, LeakNodeKind::Root)
    }

    /// Push a child node reached from `parent` via `reference`.
    pub fn push_child(
        &mut self,
        instance: ObjectId,
        parent: LeakNodeId,
        reference: LeakReference,
        exclusion_description: Option<String>,
    ) -> LeakNodeId {
        self.push(
            instance,
            LeakNodeKind::Child {
                parent,
                reference,
                exclusion_description,
            },
        )
    }

    fn push(&mut self, instance: ObjectId, kind: LeakNodeKind) -> LeakNodeId {
        let id = LeakNodeId(u32::try_from(self.nodes.len()).expect("arena overflow"));
        self.nodes.push(LeakNodeData {
            instance,
            visit_order: self.next_visit_order,
            kind,
        });
        self.next_visit_order += 1;
        id
    }

    #[must_use]
    pub fn get(&self, id: LeakNodeId) -> &LeakNodeData {
        &self.nodes[id.0 as usize]
    }

    /// The path from the GC root to `id`, root first, `id` last.
    #[must_use]
    pub fn path_to(&self, id: LeakNodeId) -> Vec<ObjectId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            path.push(node.instance);
            current = match &node.kind {
                LeakNodeKind::Root => None,
                LeakNodeKind::Child { parent, .. } => Some(*parent),
            };
        }
        path.reverse();
        path
    }
}
