pub mod schedule_date;

pub use schedule_date::resolve_schedule_date;
