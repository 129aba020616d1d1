//! In-memory integration tests for realtime refresh between sessions.

use super::helpers::{FixedClock, TestStore, clock, id_of, open_session, seed, store, titles_in};
use rstest::rstest;
use std::sync::Arc;
use trellis::board::domain::{DropTarget, TaskStatus};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moves_by_one_collaborator_reach_the_other(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    seed(&store, "A", TaskStatus::Backlog, 0).await?;
    seed(&store, "B", TaskStatus::Backlog, 1).await?;
    let mut mickey = open_session(&store, &clock).await?;
    let mut shivani = open_session(&store, &clock).await?;

    let a = id_of(mickey.tasks(), "A")?;
    mickey
        .move_task(a, DropTarget::Column(TaskStatus::InProgress))
        .await;

    let drained = shivani.sync_pending_changes().await;
    eyre::ensure!(drained > 0, "expected pending change notifications");
    assert_eq!(titles_in(shivani.tasks(), TaskStatus::InProgress), ["A"]);
    assert_eq!(titles_in(shivani.tasks(), TaskStatus::Backlog), ["B"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_deletes_remove_local_tasks(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    seed(&store, "A", TaskStatus::Waiting, 0).await?;
    let mut mickey = open_session(&store, &clock).await?;
    let mut shivani = open_session(&store, &clock).await?;

    let a = id_of(mickey.tasks(), "A")?;
    mickey.delete(a).await?;

    eyre::ensure!(shivani.sync_next_change().await, "expected a delete notification");
    assert!(shivani.tasks().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_sessions_stop_syncing(
    store: TestStore,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    let mut mickey = open_session(&store, &clock).await?;
    let shivani = open_session(&store, &clock).await?;
    shivani.close();

    mickey.create_task(None).await?;

    assert_eq!(format!("{store:?}"), "InMemoryTaskStore { subscribers: 1, .. }");
    assert_eq!(mickey.sync_pending_changes().await, 1);
    Ok(())
}
