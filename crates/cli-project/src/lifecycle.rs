//! Fixture lifecycle wrapper.
//!
//! [`with_project`] packages a test body into a zero-argument async closure.
//! Invoking it builds the fixture, runs its setup, runs the body and always
//! tears the fixture down afterwards, whether the body returned `Ok`, `Err`
//! or panicked.
//!
//! When the body fails and teardown fails as well, the body's error is
//! returned and the teardown error is logged. A body panic is resumed after
//! teardown.

use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tracing::{debug, error};

use crate::config::ProjectConfig;
use crate::error::ProjectError;
use crate::factory::ProjectFactory;
use crate::project::{CliProject, Project};

/// Wrap `test` in the lifecycle of a [`CliProject`] built from `cfg`.
///
/// Nothing runs until the returned closure is awaited.
///
/// # Examples
///
/// ```no_run
/// use cli_project::{CliProject, ProcessParams, ProjectConfig, with_project};
///
/// # async fn demo() -> anyhow::Result<()> {
/// let cfg = ProjectConfig::new("/tmp/demo", "my-tool", ()).with_file("in.txt", "data");
/// let run = with_project(cfg, async |project: &mut CliProject<()>| -> anyhow::Result<()> {
///     let args = project.args(&ProcessParams::new().positional("in.txt"))?;
///     assert_eq!(args, ["in.txt"]);
///     Ok(())
/// });
/// run().await?;
/// # Ok(())
/// # }
/// ```
pub fn with_project<T, F, E>(cfg: ProjectConfig<T>, test: F) -> impl AsyncFnOnce() -> Result<(), E>
where
    F: AsyncFnOnce(&mut CliProject<T>) -> Result<(), E>,
    E: From<ProjectError>,
{
    with_project_using(cfg, test, ProjectFactory::create::<CliProject<T>>)
}

/// Like [`with_project`] but builds the fixture with `factory`.
///
/// Lets callers substitute their own [`Project`] type or construction logic.
pub fn with_project_using<P, F, C, E>(
    cfg: ProjectConfig<P::Options>,
    test: F,
    factory: C,
) -> impl AsyncFnOnce() -> Result<(), E>
where
    P: Project,
    F: AsyncFnOnce(&mut P) -> Result<(), E>,
    C: AsyncFnOnce(ProjectConfig<P::Options>) -> Result<P, ProjectError>,
    E: From<ProjectError>,
{
    async move || run_lifecycle(cfg, test, factory).await
}

async fn run_lifecycle<P, F, C, E>(
    cfg: ProjectConfig<P::Options>,
    test: F,
    factory: C,
) -> Result<(), E>
where
    P: Project,
    F: AsyncFnOnce(&mut P) -> Result<(), E>,
    C: AsyncFnOnce(ProjectConfig<P::Options>) -> Result<P, ProjectError>,
    E: From<ProjectError>,
{
    let name = cfg.name.clone();
    let mut project = factory(cfg).await?;
    project.setup().await?;
    debug!(project = %name, "running test body");

    let outcome = AssertUnwindSafe(test(&mut project)).catch_unwind().await;
    let teardown = project.teardown().await;

    match outcome {
        Ok(Ok(())) => {
            teardown?;
            debug!(project = %name, "test passed");
            Ok(())
        }
        Ok(Err(e)) => {
            if let Err(td) = teardown {
                error!(project = %name, error = %td, "teardown failed after test failure");
            }
            Err(e)
        }
        Err(payload) => {
            if let Err(td) = teardown {
                error!(project = %name, error = %td, "teardown failed after test panic");
            }
            panic::resume_unwind(payload)
        }
    }
}
