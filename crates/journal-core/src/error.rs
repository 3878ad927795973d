//! 매매일지 엔진의 에러 타입.
//!
//! 입력 검증 실패는 [`ValidationError`]로, 그 외 엔진 에러는
//! [`JournalError`]로 표현합니다.

use thiserror::Error;

/// 거래 입력 검증 에러.
///
/// 항상 복구 가능하며, 발생해도 워크플로우 상태는 바뀌지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 손익 값이 숫자가 아님
    #[error("올바른 손익 값을 입력하세요: '{0}'")]
    InvalidPnl(String),

    /// 매수/매도가 아닌 방향
    #[error("매수(buy) 또는 매도(sell)를 선택하세요: '{0}'")]
    InvalidSide(String),

    /// 종목 누락
    #[error("종목(pair)을 입력하세요")]
    MissingPair,

    /// 선택 숫자 필드가 숫자가 아님
    #[error("'{field}' 값이 숫자가 아닙니다: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// 진입 시각 파싱 실패
    #[error("진입 시각 형식이 올바르지 않습니다: '{0}'")]
    InvalidEntryDate(String),

    /// 심리 태그 미선택
    #[error("최소 한 개의 심리 태그를 선택하세요")]
    NoPsychologyTags,

    /// 현재 어휘에 없는 태그
    #[error("'{tag}' 태그는 {vocabulary} 어휘에 속하지 않습니다")]
    TagNotInVocabulary { tag: String, vocabulary: String },

    /// 알 수 없는 태그 라벨
    #[error("알 수 없는 심리 태그: '{0}'")]
    UnknownTag(String),
}

/// 매매일지 엔진 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 입력 검증 에러
    #[error("검증 에러: {0}")]
    Validation(#[from] ValidationError),

    /// 현재 단계에서 허용되지 않는 워크플로우 동작
    #[error("'{operation}' 동작은 {stage} 단계에서 허용되지 않습니다")]
    InvalidTransition {
        operation: &'static str,
        stage: &'static str,
    },

    /// 연-월 키 파싱 실패
    #[error("잘못된 연-월 키: '{0}' (YYYY-MM 형식 필요)")]
    MalformedYearMonth(String),

    /// 거래 데이터 무결성 위반
    #[error("데이터 무결성 에러 (거래 #{trade_id}): {reason}")]
    DataIntegrity { trade_id: u64, reason: String },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 사용자 입력을 고쳐 다시 시도할 수 있는 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            JournalError::Validation(_) | JournalError::InvalidTransition { .. }
        )
    }

    /// 검증 에러라면 내부 값을 반환합니다.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            JournalError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}
