//! 심리 태그 어휘와 거래 결과 분류.
//!
//! 승리 거래와 패배 거래는 서로 겹치지 않는 고정 어휘를 사용합니다.
//! 어떤 어휘를 쓸지는 손익 부호로 결정됩니다 ([`TagVocabulary::for_pnl`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Money;

/// 거래에 붙이는 심리 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PsychologyTag {
    // 승리 사유
    #[serde(rename = "Patience")]
    Patience,
    #[serde(rename = "Proper Analysis")]
    ProperAnalysis,
    #[serde(rename = "Discipline")]
    Discipline,
    #[serde(rename = "Risk Management")]
    RiskManagement,
    #[serde(rename = "Following Plan")]
    FollowingPlan,
    #[serde(rename = "Market Structure")]
    MarketStructure,
    #[serde(rename = "News Confirmation")]
    NewsConfirmation,
    #[serde(rename = "Technical Confirmation")]
    TechnicalConfirmation,

    // 패배 사유
    #[serde(rename = "Greed")]
    Greed,
    #[serde(rename = "FOMO")]
    Fomo,
    #[serde(rename = "Revenge Trading")]
    RevengeTrading,
    #[serde(rename = "Impatience")]
    Impatience,
    #[serde(rename = "Ignoring Stop Loss")]
    IgnoringStopLoss,
    #[serde(rename = "Overtrading")]
    Overtrading,
    #[serde(rename = "No Plan")]
    NoPlan,
    #[serde(rename = "Emotional Trading")]
    EmotionalTrading,
}

const WIN_REASONS: [PsychologyTag; 8] = [
    PsychologyTag::Patience,
    PsychologyTag::ProperAnalysis,
    PsychologyTag::Discipline,
    PsychologyTag::RiskManagement,
    PsychologyTag::FollowingPlan,
    PsychologyTag::MarketStructure,
    PsychologyTag::NewsConfirmation,
    PsychologyTag::TechnicalConfirmation,
];

const LOSS_REASONS: [PsychologyTag; 8] = [
    PsychologyTag::Greed,
    PsychologyTag::Fomo,
    PsychologyTag::RevengeTrading,
    PsychologyTag::Impatience,
    PsychologyTag::IgnoringStopLoss,
    PsychologyTag::Overtrading,
    PsychologyTag::NoPlan,
    PsychologyTag::EmotionalTrading,
];

impl PsychologyTag {
    /// 화면 표시 및 직렬화에 쓰는 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            PsychologyTag::Patience => "Patience",
            PsychologyTag::ProperAnalysis => "Proper Analysis",
            PsychologyTag::Discipline => "Discipline",
            PsychologyTag::RiskManagement => "Risk Management",
            PsychologyTag::FollowingPlan => "Following Plan",
            PsychologyTag::MarketStructure => "Market Structure",
            PsychologyTag::NewsConfirmation => "News Confirmation",
            PsychologyTag::TechnicalConfirmation => "Technical Confirmation",
            PsychologyTag::Greed => "Greed",
            PsychologyTag::Fomo => "FOMO",
            PsychologyTag::RevengeTrading => "Revenge Trading",
            PsychologyTag::Impatience => "Impatience",
            PsychologyTag::IgnoringStopLoss => "Ignoring Stop Loss",
            PsychologyTag::Overtrading => "Overtrading",
            PsychologyTag::NoPlan => "No Plan",
            PsychologyTag::EmotionalTrading => "Emotional Trading",
        }
    }

    /// 이 태그가 속한 어휘.
    pub fn vocabulary(&self) -> TagVocabulary {
        if WIN_REASONS.contains(self) {
            TagVocabulary::Win
        } else {
            TagVocabulary::Loss
        }
    }

    /// 두 어휘의 모든 태그.
    pub fn all() -> impl Iterator<Item = PsychologyTag> {
        WIN_REASONS.into_iter().chain(LOSS_REASONS)
    }
}

impl fmt::Display for PsychologyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PsychologyTag {
    type Err = ValidationError;

    /// 라벨을 대소문자 구분 없이 파싱합니다 (`"fomo"`, `"proper analysis"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .find(|tag| tag.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownTag(s.to_string()))
    }
}

/// 심리 태그 어휘 (승리 사유 / 패배 사유).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagVocabulary {
    Win,
    Loss,
}

impl TagVocabulary {
    /// 손익 부호로 어휘를 선택합니다. 0 이하는 패배 어휘입니다.
    pub fn for_pnl(pnl: Money) -> Self {
        if pnl > Decimal::ZERO {
            TagVocabulary::Win
        } else {
            TagVocabulary::Loss
        }
    }

    /// 어휘에 속한 태그 목록 (표시 순서).
    pub fn tags(&self) -> &'static [PsychologyTag] {
        match self {
            TagVocabulary::Win => &WIN_REASONS,
            TagVocabulary::Loss => &LOSS_REASONS,
        }
    }

    pub fn contains(&self, tag: PsychologyTag) -> bool {
        tag.vocabulary() == *self
    }
}

impl fmt::Display for TagVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagVocabulary::Win => write!(f, "win-reasons"),
            TagVocabulary::Loss => write!(f, "loss-reasons"),
        }
    }
}

/// 손익 기준 거래 결과.
///
/// 승률과 인사이트 집계에서 0 손익은 승리도 패배도 아닙니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// 손익 > 0
    Win,
    /// 손익 < 0
    Loss,
    /// 손익 = 0
    Breakeven,
    /// 손익 미기록 (미청산)
    Open,
}

impl Outcome {
    pub fn of(pnl: Option<Money>) -> Self {
        match pnl {
            None => Outcome::Open,
            Some(p) if p > Decimal::ZERO => Outcome::Win,
            Some(p) if p < Decimal::ZERO => Outcome::Loss,
            Some(_) => Outcome::Breakeven,
        }
    }
}
