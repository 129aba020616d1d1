//! Then steps for drag-and-drop BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async, split_titles};
use rstest_bdd_macros::then;
use trellis::board::{
    domain::{Task, TaskStatus, group_columns},
    ports::TaskStore,
};

#[then(r#"the "{column}" column reads "{titles}""#)]
fn column_reads(
    world: &mut BoardWorld,
    column: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let status = parse_status(&column)?;
    let actual: Vec<String> = group_columns(world.session()?.tasks())
        .into_iter()
        .filter(|board_column| board_column.status() == status)
        .flat_map(|board_column| {
            board_column
                .tasks()
                .iter()
                .map(|task| task.title().to_owned())
                .collect::<Vec<_>>()
        })
        .collect();
    let expected = split_titles(&titles);
    eyre::ensure!(
        actual == expected,
        "column {column}: expected {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("every column is densely numbered")]
fn every_column_dense(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    for board_column in group_columns(world.session()?.tasks()) {
        eyre::ensure!(
            board_column.has_dense_positions(),
            "column {} has gaps or duplicates",
            board_column.status()
        );
    }
    Ok(())
}

#[then("the store matches the board")]
fn store_matches_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.store.list())?;
    let local = world.session()?.tasks();
    for task in &stored {
        let mirror = local
            .iter()
            .find(|candidate| candidate.id() == task.id())
            .ok_or_else(|| eyre::eyre!("stored task {} missing locally", task.title()))?;
        eyre::ensure!(
            placement(mirror) == placement(task),
            "task {} differs between store and board",
            task.title()
        );
    }
    Ok(())
}

#[then("no placement is written")]
fn no_placement_written(world: &BoardWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move report"))?;
    eyre::ensure!(report.is_noop(), "expected no writes, got {report:?}");
    Ok(())
}

fn placement(task: &Task) -> (TaskStatus, u32) {
    (task.status(), task.position())
}
