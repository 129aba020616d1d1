//! Given steps for drag-and-drop BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async, split_titles};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use trellis::board::{domain::NewTask, ports::TaskStore};

#[given(r#"the "{column}" column holds "{titles}""#)]
fn column_holds(
    world: &mut BoardWorld,
    column: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let status = parse_status(&column)?;
    for (position, title) in (0_u32..).zip(split_titles(&titles)) {
        let new_task = NewTask::new(title)?.at(status, position);
        run_async(world.store.insert(new_task)).wrap_err("seed scenario task")?;
    }
    Ok(())
}
