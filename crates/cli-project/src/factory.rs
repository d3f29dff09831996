//! Construction of project fixtures.

use tracing::{debug, warn};

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::project::Project;

/// Builds initialised fixtures from their configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFactory;

impl ProjectFactory {
    /// Build an empty `P` and run its internal setup with `cfg`.
    ///
    /// If `init` fails the half-built fixture is torn down once before the
    /// init error is returned. A failing cleanup is logged and does not
    /// replace the init error.
    ///
    /// # Errors
    ///
    /// Returns whatever [`Project::init`] returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cli_project::{CliProject, ProjectConfig, ProjectFactory};
    ///
    /// # async fn demo() -> Result<(), cli_project::ProjectError> {
    /// let cfg = ProjectConfig::new("/tmp/demo", "my-tool", ());
    /// let project: CliProject<()> = ProjectFactory::create(cfg).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create<P: Project>(cfg: ProjectConfig<P::Options>) -> Result<P> {
        let name = cfg.name.clone();
        let mut project = P::empty();
        if let Err(e) = project.init(cfg).await {
            if let Err(cleanup) = project.teardown().await {
                warn!(project = %name, error = %cleanup, "cleanup after failed init failed");
            }
            return Err(e);
        }
        debug!(project = %name, "project created");
        Ok(project)
    }
}
