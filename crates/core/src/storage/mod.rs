pub mod schedule_cache;

pub use schedule_cache::ScheduleCache;
