//! Drag-and-drop move planning.
//!
//! A drag gesture is reduced to the identity of the dragged task and a
//! [`DropTarget`]. [`plan_move`] turns that pair into a [`MovePlan`]: the
//! minimal set of `(task, status, position)` placements that leaves every
//! touched column densely numbered from zero. Planning is pure; applying the
//! plan locally and persisting it are the caller's job.

use super::{BoardColumn, Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// Where a dragged task was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Released over another task; the dragged task takes that task's slot.
    Task(TaskId),
    /// Released over a column itself; the dragged task goes to its end.
    Column(TaskStatus),
}

/// A single task's new column slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Task being placed.
    pub task_id: TaskId,
    /// Column the task ends up in.
    pub status: TaskStatus,
    /// Ordinal within that column.
    pub position: u32,
}

/// Placements produced by one move, restricted to tasks that change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovePlan {
    placements: Vec<Placement>,
}

impl MovePlan {
    /// Returns the placements in column order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns `true` when the move changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the placement for `task_id`, if the plan moves it.
    #[must_use]
    pub fn placement_for(&self, task_id: TaskId) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|placement| placement.task_id == task_id)
    }

    /// Applies every placement to the matching task in `tasks`.
    ///
    /// Placements whose task is absent are skipped.
    pub fn apply(&self, tasks: &mut [Task]) {
        for placement in &self.placements {
            if let Some(task) = tasks
                .iter_mut()
                .find(|task| task.id() == placement.task_id)
            {
                task.place(placement.status, placement.position);
            }
        }
    }

    /// Builds the plan that renumbers each `(status, ordered ids)` column
    /// from zero, keeping only placements that differ from `tasks`.
    fn diff(tasks: &[Task], columns: &[(TaskStatus, Vec<TaskId>)]) -> Self {
        let current: HashMap<TaskId, &Task> = tasks.iter().map(|task| (task.id(), task)).collect();
        let placements = columns
            .iter()
            .flat_map(|(status, ids)| {
                ids.iter().enumerate().map(move |(index, id)| Placement {
                    task_id: *id,
                    status: *status,
                    position: ordinal(index),
                })
            })
            .filter(|placement| {
                current.get(&placement.task_id).is_none_or(|task| {
                    task.status() != placement.status || task.position() != placement.position
                })
            })
            .collect();
        Self { placements }
    }
}

/// Plans the placements for dropping `active_id` on `target`.
///
/// Resolution rules:
///
/// - Dropping a task onto itself, or dragging an unknown task, plans nothing.
/// - Dropping on a task resolves to that task's column and index; dropping
///   on a column resolves to its end (index zero when empty).
/// - A task target that is not on the board falls back to the end of the
///   dragged task's own column.
/// - Within one column the move uses splice semantics: the dragged task is
///   removed, then reinserted at the target's former index.
/// - Across columns the dragged task is inserted immediately before the
///   target task, and both columns are renumbered.
#[must_use]
pub fn plan_move(tasks: &[Task], active_id: TaskId, target: DropTarget) -> MovePlan {
    if target == DropTarget::Task(active_id) {
        return MovePlan::default();
    }
    let Some(active) = tasks.iter().find(|task| task.id() == active_id) else {
        return MovePlan::default();
    };

    let source_status = active.status();
    let (target_status, anchor) = resolve_target(tasks, source_status, target);
    let source = BoardColumn::collect(source_status, tasks).ids();

    if target_status == source_status {
        let reordered = splice_within(source, active_id, anchor);
        return MovePlan::diff(tasks, &[(source_status, reordered)]);
    }

    let remaining: Vec<TaskId> = source.into_iter().filter(|id| *id != active_id).collect();
    let mut destination = BoardColumn::collect(target_status, tasks).ids();
    let insert_at = anchor
        .and_then(|anchor_id| destination.iter().position(|id| *id == anchor_id))
        .unwrap_or(destination.len());
    destination.insert(insert_at, active_id);

    MovePlan::diff(
        tasks,
        &[(source_status, remaining), (target_status, destination)],
    )
}

/// Plans the renumbering that closes any gaps or duplicates in `status`.
#[must_use]
pub fn plan_compaction(tasks: &[Task], status: TaskStatus) -> MovePlan {
    let ids = BoardColumn::collect(status, tasks).ids();
    MovePlan::diff(tasks, &[(status, ids)])
}

fn resolve_target(
    tasks: &[Task],
    source_status: TaskStatus,
    target: DropTarget,
) -> (TaskStatus, Option<TaskId>) {
    match target {
        DropTarget::Column(status) => (status, None),
        DropTarget::Task(target_id) => tasks
            .iter()
            .find(|task| task.id() == target_id)
            .map_or((source_status, None), |task| {
                (task.status(), Some(target_id))
            }),
    }
}

fn splice_within(mut ids: Vec<TaskId>, active_id: TaskId, anchor: Option<TaskId>) -> Vec<TaskId> {
    let Some(from) = ids.iter().position(|id| *id == active_id) else {
        return ids;
    };
    let to = anchor
        .and_then(|anchor_id| ids.iter().position(|id| *id == anchor_id))
        .unwrap_or_else(|| ids.len().saturating_sub(1));
    let moved = ids.remove(from);
    ids.insert(to.min(ids.len()), moved);
    ids
}

fn ordinal(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
