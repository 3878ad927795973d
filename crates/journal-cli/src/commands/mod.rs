//! CLI 명령어 구현 모듈.

pub mod add;
pub mod calendar;
pub mod day;
pub mod insights;
pub mod output;
pub mod summary;
