//! 매매일지 거래 기록.
//!
//! 이 모듈은 거래 관련 타입을 정의합니다:
//! - `Side` - 거래 방향 (매수/매도)
//! - `Trade` - 입력 워크플로우를 마친 거래 기록
//! - `TradeInfo` - 집계/통계 계산에 필요한 정보를 꺼내는 trait

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Outcome, PsychologyTag, TagVocabulary};
use crate::error::{JournalError, JournalResult, ValidationError};
use crate::types::{is_pnl_in_range, local_date, Money, MAX_PNL_MAGNITUDE};

/// 거래 ID. 커밋 시점에 단조 증가로 부여됩니다.
pub type TradeId = u64;

/// 거래 방향 (매수 또는 매도).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(ValidationError::InvalidSide(s.to_string())),
        }
    }
}

/// 커밋된 거래 기록.
///
/// 커밋 후에는 변경되지 않습니다. 손익이 `None`이면 미청산 포지션으로,
/// 날짜 집계와 손익 합계에서 제외됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// 거래 ID
    pub id: TradeId,
    /// 종목 (예: "EUR/USD")
    pub pair: String,
    /// 거래 방향
    pub side: Side,
    /// 실현 손익 (None = 미청산)
    pub pnl: Option<Money>,
    /// 손절가 (표시용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    /// 익절가 (표시용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
    /// 랏 크기 (표시용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<Decimal>,
    /// 진입가 (표시용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<Decimal>,
    /// 청산가 (표시용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Decimal>,
    /// 매매 메모
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 진입 시각 (UTC)
    pub entry_date: DateTime<Utc>,
    /// 심리 태그 (중복 없음, 선택 순서 유지)
    #[serde(default)]
    pub psychology_tags: Vec<PsychologyTag>,
    /// 심리 메모
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychology_notes: Option<String>,
}

impl Trade {
    /// 거래 결과.
    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.pnl)
    }

    /// 미청산 거래인지 확인합니다.
    pub fn is_open(&self) -> bool {
        self.pnl.is_none()
    }

    /// 기준 시간대의 진입 날짜.
    pub fn entry_day(&self, tz: Tz) -> NaiveDate {
        local_date(self.entry_date, tz)
    }

    /// 거래 기록의 무결성을 검사합니다.
    ///
    /// - 종목이 비어 있지 않아야 함
    /// - 태그 중복 없음, 한 어휘에서만 선택
    /// - 손익이 있으면 태그가 최소 하나, 손익 부호에 맞는 어휘
    /// - 손익 절댓값이 [`MAX_PNL_MAGNITUDE`] 이하
    pub fn check_integrity(&self) -> JournalResult<()> {
        let fail = |reason: String| JournalError::DataIntegrity {
            trade_id: self.id,
            reason,
        };

        if self.pair.trim().is_empty() {
            return Err(fail("종목이 비어 있습니다".to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.psychology_tags.iter().find(|tag| !seen.insert(**tag)) {
            return Err(fail(format!("중복된 심리 태그: {}", dup)));
        }

        let expected = match self.pnl {
            Some(pnl) => {
                if !is_pnl_in_range(pnl) {
                    return Err(fail(format!(
                        "손익 {}이(가) 허용 범위(±{})를 벗어났습니다",
                        pnl, MAX_PNL_MAGNITUDE
                    )));
                }
                if self.psychology_tags.is_empty() {
                    return Err(fail("심리 태그가 없습니다".to_string()));
                }
                Some(TagVocabulary::for_pnl(pnl))
            }
            None => self.psychology_tags.first().map(|tag| tag.vocabulary()),
        };

        if let Some(vocabulary) = expected {
            if let Some(stray) = self
                .psychology_tags
                .iter()
                .find(|tag| !vocabulary.contains(**tag))
            {
                return Err(fail(format!(
                    "'{}' 태그는 {} 어휘에 속하지 않습니다",
                    stray, vocabulary
                )));
            }
        }

        Ok(())
    }
}

/// 거래 정보를 제공하는 trait.
///
/// 집계, 통계, 인사이트 계산은 이 trait만 사용하므로
/// `Trade` 외의 타입(테스트 더블, 외부 레코드)에도 적용할 수 있습니다.
pub trait TradeInfo {
    /// 거래 종목.
    fn pair(&self) -> &str;

    /// 실현 손익.
    ///
    /// # Returns
    ///
    /// - `Some(pnl)`: 청산된 거래의 손익
    /// - `None`: 미청산 거래
    fn pnl(&self) -> Option<Money>;

    /// 진입 시각.
    fn entry_time(&self) -> DateTime<Utc>;

    /// 심리 태그.
    fn psychology_tags(&self) -> &[PsychologyTag];

    /// 기준 시간대의 진입 날짜.
    fn entry_day_in(&self, tz: Tz) -> NaiveDate {
        local_date(self.entry_time(), tz)
    }
}

impl TradeInfo for Trade {
    fn pair(&self) -> &str {
        &self.pair
    }

    fn pnl(&self) -> Option<Money> {
        self.pnl
    }

    fn entry_time(&self) -> DateTime<Utc> {
        self.entry_date
    }

    fn psychology_tags(&self) -> &[PsychologyTag] {
        &self.psychology_tags
    }
}

impl<T: TradeInfo> TradeInfo for &T {
    fn pair(&self) -> &str {
        (*self).pair()
    }

    fn pnl(&self) -> Option<Money> {
        (*self).pnl()
    }

    fn entry_time(&self) -> DateTime<Utc> {
        (*self).entry_time()
    }

    fn psychology_tags(&self) -> &[PsychologyTag] {
        (*self).psychology_tags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn trade(pnl: Option<Decimal>, tags: Vec<PsychologyTag>) -> Trade {
        Trade {
            id: 1,
            pair: "EUR/USD".to_string(),
            side: Side::Buy,
            pnl,
            stop_loss: None,
            take_profit: None,
            lot_size: None,
            entry_price: None,
            exit_price: None,
            notes: None,
            entry_date: Utc.with_ymd_and_hms(2024, 5, 15, 14, 30, 0).unwrap(),
            psychology_tags: tags,
            psychology_notes: None,
        }
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" Sell ".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!(
            "hold".parse::<Side>().unwrap_err(),
            ValidationError::InvalidSide("hold".to_string())
        );
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn test_entry_day_uses_reference_zone() {
        let t = trade(Some(dec!(10)), vec![PsychologyTag::Patience]);
        assert_eq!(t.entry_day(Tz::UTC), NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        // 14:30 UTC = 서울 23:30
        assert_eq!(
            t.entry_day(chrono_tz::Asia::Seoul),
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
        );
        // 14:30 UTC = 브리즈번 다음 날 00:30 (+10)
        assert_eq!(
            t.entry_day(chrono_tz::Australia::Brisbane),
            NaiveDate::from_ymd_opt(2024, 5, 16).unwrap()
        );
    }

    #[test]
    fn test_integrity_accepts_valid_trades() {
        assert!(trade(Some(dec!(10)), vec![PsychologyTag::Patience])
            .check_integrity()
            .is_ok());
        assert!(trade(Some(dec!(0)), vec![PsychologyTag::Greed])
            .check_integrity()
            .is_ok());
        assert!(trade(None, vec![]).check_integrity().is_ok());
    }

    #[test]
    fn test_integrity_rejects_vocabulary_mismatch() {
        let err = trade(Some(dec!(10)), vec![PsychologyTag::Fomo])
            .check_integrity()
            .unwrap_err();
        assert!(matches!(err, JournalError::DataIntegrity { trade_id: 1, .. }));

        let err = trade(None, vec![PsychologyTag::Patience, PsychologyTag::Greed])
            .check_integrity()
            .unwrap_err();
        assert!(matches!(err, JournalError::DataIntegrity { .. }));
    }

    #[test]
    fn test_integrity_rejects_missing_or_duplicate_tags() {
        assert!(trade(Some(dec!(-1)), vec![]).check_integrity().is_err());
        assert!(trade(
            Some(dec!(-1)),
            vec![PsychologyTag::Fomo, PsychologyTag::Fomo]
        )
        .check_integrity()
        .is_err());
    }

    #[test]
    fn test_integrity_rejects_out_of_range_pnl() {
        let err = trade(
            Some(dec!(70000000000000000000000000000)),
            vec![PsychologyTag::Patience],
        )
        .check_integrity()
        .unwrap_err();
        assert!(matches!(err, JournalError::DataIntegrity { trade_id: 1, .. }));

        assert!(trade(Some(Decimal::MIN), vec![PsychologyTag::Greed])
            .check_integrity()
            .is_err());
        assert!(trade(
            Some(-Decimal::from(MAX_PNL_MAGNITUDE)),
            vec![PsychologyTag::Greed]
        )
        .check_integrity()
        .is_ok());
    }

    #[test]
    fn test_serde_camel_case() {
        let t = trade(Some(dec!(125.5)), vec![PsychologyTag::Patience]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["side"], "buy");
        assert_eq!(json["psychologyTags"][0], "Patience");
        assert!(json.get("stopLoss").is_none());
        assert!(json.get("entryDate").is_some());
    }
}
