//! # Journal Core
//!
//! 매매일지의 거래 집계 및 심리 인사이트 엔진을 제공합니다.
//!
//! 이 크레이트는 다음 기능을 제공합니다:
//! - 거래 기록과 심리 태그 어휘
//! - 월간 캘린더 그리드 생성
//! - 일별/주별 손익 집계
//! - 요약 통계 (총손익, 승률, 평균 거래)
//! - 승/패별 심리 태그 빈도 분석
//! - 2단계 거래 입력 워크플로우
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod journal;
pub mod logging;
pub mod types;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use journal::Journal;
pub use logging::*;
pub use types::*;
