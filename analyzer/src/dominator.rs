//! Incremental, best-effort "nearest retained ancestor" map (spec §4.4).
//!
//! Not a true dominator tree: it is an LCA computation restricted to the
//! forest of leaking-candidate ancestors, monotonically safe in the sense
//! that a recorded dominator is always a true ancestor and any ambiguity
//! defaults to `undominated` — so retained-size totals this feeds are
//! lower bounds, never overcounts.

use std::collections::{HashMap, HashSet};

use retainer_model::ObjectId;

use crate::error::AnalyzerError;

/// Tracks, for each visited non-leaking id, the nearest leaking ancestor
/// that dominates it (if any is known).
#[derive(Debug, Default)]
pub struct DominatorTracker {
    dominated: HashMap<ObjectId, ObjectId>,
    undominated: HashSet<ObjectId>,
}

impl DominatorTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dominator_of(&self, id: ObjectId) -> Option<ObjectId> {
        self.dominated.get(&id).copied()
    }

    #[must_use]
    pub fn is_undominated(&self, id: ObjectId) -> bool {
        self.undominated.contains(&id)
    }

    #[must_use]
    pub fn undominated_len(&self) -> usize {
        self.undominated.len()
    }

    /// Iterate `(instance, dominator)` pairs for the retained-size phase.
    pub fn dominated_pairs(&self) -> impl Iterator<Item = (ObjectId, ObjectId)> + '_ {
        self.dominated.iter().map(|(&child, &dom)| (child, dom))
    }

    /// Mark `id` as lying outside every leaking subtree: GC roots, class
    /// references, and ids whose two observed dominator chains disagree.
    pub fn undominate(&mut self, id: ObjectId) {
        self.dominated.remove(&id);
        self.undominated.insert(id);
    }

    /// Record (or refine) that `child` is reached via `parent`.
    ///
    /// `leaking` is the set of leaking-candidate ids: a leaking id is
    /// treated as the dominator of its own subtree rather than looking up
    /// its own entry in `dominated` (spec §3 invariant).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::DominatorInvariantViolation`] if `parent` has
    /// no recorded dominator and is not itself undominated — this can only
    /// happen if the driver calls this out of order relative to visitation,
    /// which is an internal bug.
    pub fn update_dominator(
        &mut self,
        parent: ObjectId,
        child: ObjectId,
        leaking: &HashSet<ObjectId>,
    ) -> Result<(), AnalyzerError> {
        if self.undominated.contains(&child) {
            return Ok(());
        }

        let current_dom = self.dominated.get(&child).copied();
        let parent_dom = self.dominated.get(&parent).copied();
        let next_dom = if leaking.contains(&parent) {
            Some(parent)
        } else {
            parent_dom
        };

        let Some(next_dom) = next_dom else {
            if !self.undominated.contains(&parent) {
                return Err(AnalyzerError::DominatorInvariantViolation { child, parent });
            }
            self.dominated.remove(&child);
            self.undominated.insert(child);
            return Ok(());
        };

        match current_dom {
            None => {
                self.dominated.insert(child, next_dom);
            }
            Some(cur) if cur == next_dom => {}
            Some(cur) => {
                let chain_a: HashSet<ObjectId> = self.ancestor_chain(cur).into_iter().collect();
                let shared = self
                    .ancestor_chain(next_dom)
                    .into_iter()
                    .find(|candidate| chain_a.contains(candidate));
                match shared {
                    Some(shared_dominator) => {
                        self.dominated.insert(child, shared_dominator);
                    }
                    None => {
                        self.dominated.remove(&child);
                        self.undominated.insert(child);
                    }
                }
            }
        }
        Ok(())
    }

    /// `start`, then each successive recorded dominator, until the chain
    /// runs out (the id has no further dominator recorded — it is itself a
    /// leaking candidate, a root, or otherwise not in `dominated`).
    fn ancestor_chain(&self, start: ObjectId) -> Vec<ObjectId> {
        let mut chain = vec![start];
        let mut current = start;
        while let Some(&next) = self.dominated.get(&current) {
            if chain.contains(&next) {
                break; // defensive: never expected, but avoids an infinite loop
            }
            chain.push(next);
            current = next;
        }
        chain
    }
}
