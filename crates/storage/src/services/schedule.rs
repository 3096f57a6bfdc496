use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::dto::field::GenerateScheduleRequest;
use crate::error::{Result, StorageError};

/// Longest date range a single generation request may cover.
pub const MAX_SCHEDULE_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub fn plan_from_request(req: &GenerateScheduleRequest) -> Result<Vec<SlotWindow>> {
    plan_slots(
        req.start_date,
        req.end_date,
        req.start_time,
        req.end_time,
        req.slot_duration_minutes,
    )
}

/// Cuts every day of `[start_date, end_date]` into back-to-back slots over
/// `[start_time, end_time)`. Deterministic: the same input always yields the
/// same windows, so storage can skip ones that already exist.
pub fn plan_slots(
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    duration_minutes: i64,
) -> Result<Vec<SlotWindow>> {
    if duration_minutes <= 0 {
        return Err(StorageError::InvalidRange(
            "slot duration must be positive".to_string(),
        ));
    }
    if end_time <= start_time {
        return Err(StorageError::InvalidRange(
            "end_time must be after start_time".to_string(),
        ));
    }
    if end_date < start_date {
        return Err(StorageError::InvalidRange(
            "end_date must be on or after start_date".to_string(),
        ));
    }
    if (end_date - start_date).num_days() >= MAX_SCHEDULE_DAYS {
        return Err(StorageError::InvalidRange(format!(
            "date range must not exceed {MAX_SCHEDULE_DAYS} days"
        )));
    }

    if duration_minutes > (end_time - start_time).num_minutes() {
        return Ok(Vec::new());
    }

    let duration = Duration::minutes(duration_minutes);
    let mut windows = Vec::new();

    for day in start_date.iter_days().take_while(|day| *day <= end_date) {
        let day_end = day.and_time(end_time);
        let mut cursor = day.and_time(start_time);

        while cursor + duration <= day_end {
            windows.push(SlotWindow {
                start: cursor,
                end: cursor + duration,
            });
            cursor += duration;
        }
    }

    Ok(windows)
}
