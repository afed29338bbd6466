// SPDX-License-Identifier: Apache-2.0

use crate::RenderingId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: usize, to: usize },
    Unchanged,
    NotFound(RenderingId),
}

/// Drag-end reorder: `active` takes the position currently held by `over`,
/// everything in between shifts by one.
pub fn move_rendering(
    ids: &mut Vec<RenderingId>,
    active: &RenderingId,
    over: &RenderingId,
) -> MoveOutcome {
    let Some(from) = ids.iter().position(|id| id == active) else {
        return MoveOutcome::NotFound(active.clone());
    };
    let Some(to) = ids.iter().position(|id| id == over) else {
        return MoveOutcome::NotFound(over.clone());
    };
    if from == to {
        return MoveOutcome::Unchanged;
    }
    let item = ids.remove(from);
    ids.insert(to, item);
    MoveOutcome::Moved { from, to }
}
