//! Route edits produced by the external route patcher.
//!
//! Patches are authored against the original route: every delete is applied
//! first (in list order) so that inserts land on a route with the unwanted
//! stops already cleared.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::route::{LocationLink, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchType {
    Insert,
    Delete,
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchType::Insert => f.write_str("insert"),
            PatchType::Delete => f.write_str("delete"),
        }
    }
}

/// A structural edit around `this`, anchored by `previous` and `next`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePatch {
    #[serde(rename = "type")]
    pub kind: PatchType,
    pub previous: String,
    pub this: String,
    pub next: String,
}

impl RoutePatch {
    pub fn new(
        kind: PatchType,
        previous: impl Into<String>,
        this: impl Into<String>,
        next: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            previous: previous.into(),
            this: this.into(),
            next: next.into(),
        }
    }

    pub fn insert(previous: impl Into<String>, this: impl Into<String>, next: impl Into<String>) -> Self {
        Self::new(PatchType::Insert, previous, this, next)
    }

    pub fn delete(previous: impl Into<String>, this: impl Into<String>, next: impl Into<String>) -> Self {
        Self::new(PatchType::Delete, previous, this, next)
    }
}

/// Applies every delete, then every insert, to a copy of `route`.
///
/// Insert anchors are looked up in the route as it stands after the deletes,
/// before any insert lands. Inserts sharing one anchor are spliced in list
/// order, so `insert(p, t1, n), insert(p, t2, n)` yields `p->t1->t2->n`.
///
/// The first patch that does not match aborts the whole operation; `route`
/// itself is never modified.
pub fn apply_patches(route: &Route, patches: &[RoutePatch]) -> Result<Route, PlanError> {
    let mut links = route.links().to_vec();

    for patch in patches.iter().filter(|patch| patch.kind == PatchType::Delete) {
        apply_delete(&mut links, patch)?;
        log_applied(patch);
    }

    let mut detours: Vec<Vec<&RoutePatch>> = vec![Vec::new(); links.len()];
    for patch in patches.iter().filter(|patch| patch.kind == PatchType::Insert) {
        let index = insert_anchor(&links, patch)?;
        detours[index].push(patch);
    }

    let inserted: usize = detours.iter().map(Vec::len).sum();
    let mut spliced = Vec::with_capacity(links.len() + inserted);
    for (link, stops) in links.into_iter().zip(detours) {
        let mut from = link.this;
        for patch in stops {
            spliced.push(LocationLink::new(from, patch.this.clone()));
            from = patch.this.clone();
            log_applied(patch);
        }
        spliced.push(LocationLink::new(from, link.next));
    }

    Ok(Route::new(spliced))
}

fn log_applied(patch: &RoutePatch) {
    debug!(
        kind = %patch.kind,
        previous = %patch.previous,
        this = %patch.this,
        next = %patch.next,
        "applied route patch"
    );
}

/// Replaces `previous->this, this->next` with `previous->next`.
fn apply_delete(links: &mut Vec<LocationLink>, patch: &RoutePatch) -> Result<(), PlanError> {
    let position = links.windows(2).position(|pair| {
        pair[0].this == patch.previous
            && pair[0].next == patch.this
            && pair[1].this == patch.this
            && pair[1].next == patch.next
    });

    let Some(index) = position else {
        return Err(PlanError::PatchApplication {
            patch: patch.clone(),
            reason: "consecutive triple not found in route".to_string(),
        });
    };

    links[index].next = patch.next.clone();
    links.remove(index + 1);
    Ok(())
}

/// Index of the `previous->next` link an insert splices into.
fn insert_anchor(links: &[LocationLink], patch: &RoutePatch) -> Result<usize, PlanError> {
    links
        .iter()
        .position(|link| link.this == patch.previous && link.next == patch.next)
        .ok_or_else(|| PlanError::PatchApplication {
            patch: patch.clone(),
            reason: "anchor pair not found in route".to_string(),
        })
}
