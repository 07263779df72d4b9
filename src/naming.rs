use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// `<program>_<YYYYMMDD>`, the stem of a live recording.
pub fn live_basename(program: &str, date: NaiveDate) -> String {
    format!("{}_{}", program, date.format("%Y%m%d"))
}

/// `<program>_<YYYYMMDD>_<hhmm>`, the stem of an on-demand episode.
pub fn episode_basename(program: &str, start: NaiveDateTime) -> String {
    format!("{}_{}", program, start.format("%Y%m%d_%H%M"))
}
