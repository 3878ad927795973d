//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `JOURNAL__` 접두사 환경 변수 순으로 병합합니다.
//! 예: `JOURNAL__CALENDAR__TIMEZONE=Asia/Seoul`

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{JournalError, JournalResult};
use crate::logging::{LogConfig, LogFormat};

/// 매매일지 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JournalConfig {
    /// 캘린더 설정
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 캘린더 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// 날짜 집계와 로컬 진입 시각 해석에 쓰는 IANA 시간대
    pub timezone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl JournalConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`가 주어지면 해당 파일이 반드시 있어야 합니다.
    pub fn load(path: Option<&Path>) -> JournalResult<Self> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("calendar.timezone", "UTC")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 파일에서 로드
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // 환경 변수로 오버라이드
        let config = builder
            .add_source(
                config::Environment::with_prefix("JOURNAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.timezone()?;
        Ok(loaded)
    }

    /// 기준 시간대.
    pub fn timezone(&self) -> JournalResult<Tz> {
        self.calendar
            .timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| JournalError::Config(format!("알 수 없는 시간대: '{}'", self.calendar.timezone)))
    }

    /// 로깅 초기화 설정.
    pub fn log_config(&self) -> JournalResult<LogConfig> {
        let format: LogFormat = self.logging.format.parse().map_err(JournalError::Config)?;
        Ok(LogConfig::new(self.logging.level.clone()).with_format(format))
    }
}
