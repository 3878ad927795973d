//! 매매일지 CLI 도구 모음.
//!
//! 이 crate는 다음 명령을 제공합니다:
//! - 요약 통계
//! - 월간 손익 캘린더
//! - 날짜별 거래 조회
//! - 심리 태그 인사이트
//! - 거래 입력

pub mod commands;
