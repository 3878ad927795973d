//! 진입 시각 파싱과 기준 시간대 변환.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// 시간대 정보 없는 로컬 일시 형식.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// 진입 시각을 UTC 시각으로 파싱합니다.
///
/// 지원 형식:
/// - RFC 3339: `2024-05-15T14:30:00Z`, `2024-05-15T23:30:00+09:00` (오프셋 그대로 사용)
/// - 로컬 일시: `2024-05-15T14:30` (기준 시간대 `tz`의 시각으로 해석)
/// - 날짜만: `2024-05-15` (기준 시간대 자정)
///
/// 기준 시간대에 존재하지 않는 로컬 시각(서머타임 공백)은 `None`을,
/// 중복되는 시각은 더 이른 시각을 반환합니다.
pub fn parse_entry_time(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let local = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// UTC 시각의 기준 시간대 날짜를 반환합니다.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
