//! 캘린더 화면 단위인 연-월 키.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{JournalError, JournalResult};

/// 허용 연도 범위 (`YYYY` 네 자리).
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// 연-월 (예: `2024-05`).
///
/// 생성 시점에 검증되므로 보유한 값은 항상 유효한 달을 가리킵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// 연도와 월(1-12)로 생성합니다.
    pub fn new(year: i32, month: u32) -> JournalResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(JournalError::MalformedYearMonth(format!(
                "{}-{:02}",
                year, month
            )));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| JournalError::MalformedYearMonth(format!("{}-{:02}", year, month)))
    }

    /// 범위를 벗어난 월을 정규화하여 생성합니다.
    ///
    /// 0월은 전년도 12월, 13월은 다음 해 1월이 됩니다.
    pub fn from_parts_normalized(year: i32, month: i32) -> JournalResult<Self> {
        let zero_based = i64::from(month) - 1;
        let normalized_year = i64::from(year) + zero_based.div_euclid(12);
        let normalized_month = zero_based.rem_euclid(12) as u32 + 1;
        let normalized_year = i32::try_from(normalized_year)
            .map_err(|_| JournalError::MalformedYearMonth(format!("{}-{}", year, month)))?;
        Self::new(normalized_year, normalized_month)
    }

    /// 날짜가 속한 연-월을 반환합니다.
    pub fn of(date: NaiveDate) -> JournalResult<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// 해당 월의 1일.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// 해당 월의 일수 (윤년 반영).
    pub fn days_in_month(&self) -> u32 {
        self.days().count() as u32
    }

    /// 1일부터 말일까지의 날짜를 순서대로 반환합니다.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month();
        self.first_day
            .iter_days()
            .take_while(move |d| d.month() == month)
    }

    /// 날짜가 이 달에 속하는지 확인합니다.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// 다음 달. 허용 범위를 넘으면 `None`.
    pub fn next(&self) -> Option<Self> {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|d| Self::of(d).ok())
    }

    /// 이전 달. 허용 범위를 넘으면 `None`.
    pub fn prev(&self) -> Option<Self> {
        self.first_day
            .checked_sub_months(Months::new(1))
            .and_then(|d| Self::of(d).ok())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || JournalError::MalformedYearMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;

        if year.len() != 4 || !(1..=2).contains(&month.len()) {
            return Err(malformed());
        }
        if !year.chars().all(|c| c.is_ascii_digit()) || !month.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }

        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month).map_err(|_| malformed())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = JournalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
