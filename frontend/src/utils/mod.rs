pub mod schedule;
pub mod storage;
pub mod time;
