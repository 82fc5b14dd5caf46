//! Cron-driven watch mode.
//!
//! Each tick runs one independent cycle. Nothing is carried between ticks, so
//! an announcement that stays inside the window across two ticks is
//! notified twice.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::cycle::{handle_invocation, LivePipeline};

/// Builds and starts a scheduler that runs `pipeline` on every tick of
/// `schedule` (six-field cron, seconds first).
///
/// The returned [`JobScheduler`] must be kept alive; dropping it stops the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `schedule` is not a valid cron
/// expression or the scheduler cannot be started.
pub(crate) async fn build_scheduler(
    pipeline: Arc<LivePipeline>,
    schedule: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let pipeline = Arc::clone(&pipeline);
        Box::pin(async move {
            tracing::info!("scheduler: starting cycle");
            let status = handle_invocation(pipeline.as_ref()).await;
            tracing::info!(status_code = status.status_code, "scheduler: cycle complete");
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(schedule, "scheduler started");
    Ok(scheduler)
}
