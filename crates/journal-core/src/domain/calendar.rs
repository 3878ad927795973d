//! 월간 캘린더 그리드.
//!
//! 한 주는 일요일에 시작합니다. 1일이 해당 요일 열에 오도록
//! 앞쪽을 빈 칸(`None`)으로 채웁니다.

use chrono::{Datelike, NaiveDate};

use crate::error::JournalResult;
use crate::types::YearMonth;

/// 그리드 한 행의 칸 수.
pub const DAYS_PER_WEEK: usize = 7;

/// 1일 앞의 빈 칸 수 (1일의 요일, 일요일 = 0).
pub fn leading_blanks(month: YearMonth) -> usize {
    month.first_day().weekday().num_days_from_sunday() as usize
}

/// 월간 캘린더 칸 목록.
///
/// 길이 = 앞쪽 빈 칸 수 + 해당 월 일수.
pub fn calendar_days(month: YearMonth) -> Vec<Option<NaiveDate>> {
    let blanks = leading_blanks(month);
    let mut cells = Vec::with_capacity(blanks + month.days_in_month() as usize);
    cells.resize(blanks, None);
    cells.extend(month.days().map(Some));
    cells
}

/// `YYYY-MM` 키로 캘린더 칸 목록을 만듭니다.
pub fn calendar_days_for_key(key: &str) -> JournalResult<Vec<Option<NaiveDate>>> {
    let month: YearMonth = key.parse()?;
    Ok(calendar_days(month))
}

/// 그리드의 행(주) 수. 마지막 행은 7칸보다 짧을 수 있습니다.
pub fn week_count(month: YearMonth) -> usize {
    (leading_blanks(month) + month.days_in_month() as usize).div_ceil(DAYS_PER_WEEK)
}
