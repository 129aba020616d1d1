//! In-memory integration tests for board session operations.

use super::helpers::{
    FixedClock, TestStore, clock, date, id_of, open_session, seed, store, titles_in,
};
use rstest::rstest;
use std::sync::Arc;
use trellis::board::{
    domain::{DropTarget, Owner, Priority, TaskFilter, TaskStatus},
    ports::TaskStore,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_within_a_column_persists_dense_positions(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    seed(&store, "A", TaskStatus::Backlog, 0).await?;
    seed(&store, "B", TaskStatus::Backlog, 1).await?;
    seed(&store, "C", TaskStatus::Backlog, 2).await?;
    let mut session = open_session(&store, &clock).await?;

    let c = id_of(session.tasks(), "C")?;
    let a = id_of(session.tasks(), "A")?;
    let report = session.move_task(c, DropTarget::Task(a)).await;

    eyre::ensure!(report.failed.is_empty(), "no write should fail");
    let stored = store.list().await?;
    assert_eq!(titles_in(&stored, TaskStatus::Backlog), ["C", "A", "B"]);
    let positions: Vec<u32> = stored.iter().map(|task| task.position()).collect();
    assert_eq!(positions, [0, 1, 2]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_column_move_changes_exactly_one_status(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    seed(&store, "A", TaskStatus::Backlog, 0).await?;
    seed(&store, "B", TaskStatus::Backlog, 1).await?;
    seed(&store, "X", TaskStatus::Waiting, 0).await?;
    let before = store.list().await?;
    let mut session = open_session(&store, &clock).await?;

    let a = id_of(session.tasks(), "A")?;
    let x = id_of(session.tasks(), "X")?;
    session.move_task(a, DropTarget::Task(x)).await;

    let after = store.list().await?;
    let status_changes = after
        .iter()
        .filter(|task| {
            before
                .iter()
                .any(|old| old.id() == task.id() && old.status() != task.status())
        })
        .count();
    assert_eq!(status_changes, 1);
    assert_eq!(titles_in(&after, TaskStatus::Backlog), ["B"]);
    assert_eq!(titles_in(&after, TaskStatus::Waiting), ["A", "X"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_task_then_edit_round_trips_through_the_store(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    let mut session = open_session(&store, &clock).await?;

    let mut draft = session.create_task(Some("mickey@example.com")).await?;
    draft.set_title("Book the venue");
    draft.set_priority(Priority::Critical);
    draft.set_labels_input("venue, deposit");
    draft.set_due_date(Some(date(2024, 1, 5)?));
    let item = draft.add_checklist_item();
    draft.set_checklist_label(item, "  Sign contract ")?;
    let saved = session.save(draft).await?;

    let stored = store.list().await?;
    let persisted = stored
        .iter()
        .find(|task| task.id() == saved.id())
        .ok_or_else(|| eyre::eyre!("saved task missing from store"))?;
    assert_eq!(persisted.title(), "Book the venue");
    assert_eq!(persisted.owner(), Some(Owner::Mickey));
    assert_eq!(persisted.priority(), Priority::Critical);
    assert_eq!(persisted.labels_display(), "venue, deposit");
    let labels: Vec<&str> = persisted
        .checklist()
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(labels, ["Sign contract"]);

    let due_soon = session.columns(&TaskFilter::new().due_soon().with_label("venue"));
    let visible: usize = due_soon.iter().map(|column| column.len()).sum();
    assert_eq!(visible, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_compacts_its_column(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    seed(&store, "A", TaskStatus::Done, 0).await?;
    seed(&store, "B", TaskStatus::Done, 1).await?;
    seed(&store, "C", TaskStatus::Done, 2).await?;
    let mut session = open_session(&store, &clock).await?;

    let a = id_of(session.tasks(), "A")?;
    session.delete(a).await?;

    let stored = store.list().await?;
    assert_eq!(titles_in(&stored, TaskStatus::Done), ["B", "C"]);
    let positions: Vec<u32> = stored.iter().map(|task| task.position()).collect();
    assert_eq!(positions, [0, 1]);
    Ok(())
}
