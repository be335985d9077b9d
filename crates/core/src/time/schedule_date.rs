use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

/// Picks the schedule date for a run.
///
/// An explicit `YYYY-MM-DD` wins. Otherwise "today" is taken in the configured
/// UTC offset, falling back to the host's local time zone.
pub fn resolve_schedule_date(
    date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
    utc_offset_hours: Option<i32>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = date_arg.map(str::trim).filter(|s| !s.is_empty()) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"));
    }

    match utc_offset_hours {
        Some(hours) => {
            let offset = FixedOffset::east_opt(hours * 3600)
                .with_context(|| format!("invalid UTC offset: {hours}h"))?;
            Ok(now_utc.with_timezone(&offset).date_naive())
        }
        None => Ok(now_utc.with_timezone(&Local).date_naive()),
    }
}
