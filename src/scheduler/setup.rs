use crate::config::Config;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

/// Build the worker pool shared by every pivot round of a scheduler.
pub(super) fn build_pool(config: &Config) -> Result<ThreadPool, ThreadPoolBuildError> {
    let workers = config.effective_workers().get();
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|idx| format!("cfw-row-{idx}"))
        .build()?;
    debug!(workers, "built row-task pool");
    Ok(pool)
}
