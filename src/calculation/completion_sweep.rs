//! Completion sweep planning.
//!
//! Approved schedules whose date has passed are marked completed by a periodic
//! job. The job writes through the document store in bounded batches; this
//! module decides which records go into which batch and applies a batch to an
//! in-memory snapshot. Every eligible record lands in some batch.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleRequest, ScheduleStatus};

/// Batch size used when the configuration does not set one.
pub const DEFAULT_SWEEP_BATCH_SIZE: usize = 500;

/// The batches of schedule IDs a sweep run will complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSweepPlan {
    /// Cut-off date; schedules strictly before it are eligible.
    pub today: NaiveDate,
    /// Schedule IDs grouped into batches of at most `batch_size`.
    pub batches: Vec<Vec<String>>,
    /// The batch size used.
    pub batch_size: usize,
    /// Total eligible schedules across all batches.
    pub total: usize,
}

/// Plans a completion sweep over `schedules`.
///
/// Eligible schedules are `approved` and dated strictly before `today`. They
/// are ordered by date then ID and split into batches of at most
/// `batch_size`. A zero batch size is rejected.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use shift_engine::calculation::plan_completion_sweep;
/// use shift_engine::models::{ScheduleRequest, ScheduleStatus};
///
/// let past = |id: &str, day: u32| ScheduleRequest {
///     id: id.to_string(),
///     store_id: "store_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     shift_id: "open".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
///     status: ScheduleStatus::Approved,
///     start_time: None,
///     end_time: None,
///     requested_by: "emp_001".to_string(),
///     created_by: "emp_001".to_string(),
///     assigned_by: None,
///     approved_by: None,
///     created_at: Utc::now(),
///     updated_at: None,
/// };
/// let schedules = vec![past("a", 1), past("b", 2), past("c", 3)];
/// let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
///
/// let plan = plan_completion_sweep(&schedules, today, 2).unwrap();
/// assert_eq!(plan.batches, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
/// assert_eq!(plan.total, 3);
/// ```
pub fn plan_completion_sweep(
    schedules: &[ScheduleRequest],
    today: NaiveDate,
    batch_size: usize,
) -> EngineResult<CompletionSweepPlan> {
    if batch_size == 0 {
        return Err(EngineError::InvalidBatchSize { size: batch_size });
    }

    let mut eligible: Vec<&ScheduleRequest> = schedules
        .iter()
        .filter(|s| s.status == ScheduleStatus::Approved && s.date < today)
        .collect();
    eligible.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let batches: Vec<Vec<String>> = eligible
        .chunks(batch_size)
        .map(|chunk| chunk.iter().map(|s| s.id.clone()).collect())
        .collect();

    info!(
        %today,
        total = eligible.len(),
        batches = batches.len(),
        batch_size,
        "Planned completion sweep"
    );

    Ok(CompletionSweepPlan {
        today,
        total: eligible.len(),
        batches,
        batch_size,
    })
}

/// Marks the schedules named in `batch` as completed.
///
/// Records that are already completed are left untouched, so re-applying a
/// batch is a no-op. Returns how many records changed. The batch is applied
/// all or nothing: if any named record is in a status that cannot be
/// completed, nothing is written and the error names that record.
pub fn apply_completion_batch(
    schedules: &mut [ScheduleRequest],
    batch: &[String],
    at: DateTime<Utc>,
) -> EngineResult<usize> {
    let ids: HashSet<&str> = batch.iter().map(String::as_str).collect();

    if let Some(blocked) = schedules.iter().find(|s| {
        ids.contains(s.id.as_str())
            && !matches!(s.status, ScheduleStatus::Approved | ScheduleStatus::Completed)
    }) {
        return Err(EngineError::InvalidTransition {
            schedule_id: blocked.id.clone(),
            from: blocked.status,
            to: ScheduleStatus::Completed,
        });
    }

    let mut changed = 0;
    for schedule in schedules.iter_mut().filter(|s| ids.contains(s.id.as_str())) {
        if schedule.transition(ScheduleStatus::Completed, at)? {
            changed += 1;
        }
    }
    debug!(requested = batch.len(), changed, "Applied completion batch");
    Ok(changed)
}
