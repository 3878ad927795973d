//! 거래 스냅샷 JSON 로딩.
//!
//! camelCase JSON 배열(`entryDate`, `psychologyTags`, ...)을 읽어 거래 목록으로
//! 변환합니다. 숫자 필드는 JSON 숫자와 문자열을 모두 받습니다. 레코드 하나라도
//! 잘못되면 해당 거래 ID를 담은 `DataIntegrity` 에러로 전체 로딩이 실패합니다.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::info;

use crate::domain::{PsychologyTag, Side, Trade, TradeId};
use crate::error::{JournalError, JournalResult};
use crate::types::parse_entry_time;

/// 기본 예시 거래 두 건.
pub const SAMPLE_TRADES_JSON: &str = r#"[
  {
    "id": 1,
    "pair": "EUR/USD",
    "side": "buy",
    "pnl": 125.50,
    "stopLoss": 1.0800,
    "takeProfit": 1.1000,
    "notes": "Bullish breakout confirmed on 4H, RSI divergence.",
    "entryDate": "2024-05-15T14:30:00Z",
    "psychologyTags": ["Patience", "Proper Analysis"],
    "psychologyNotes": "Waited for confirmation, didn't FOMO.",
    "lotSize": 0.5,
    "entryPrice": 1.0850,
    "exitPrice": 1.0975
  },
  {
    "id": 2,
    "pair": "GBP/JPY",
    "side": "sell",
    "pnl": -85.20,
    "stopLoss": 185.00,
    "takeProfit": 182.00,
    "notes": "Entered too early before London session.",
    "entryDate": "2024-05-18T08:15:00Z",
    "psychologyTags": ["Impatience", "FOMO"],
    "psychologyNotes": "Jumped in without waiting for price action confirmation.",
    "lotSize": 0.3,
    "entryPrice": 184.20,
    "exitPrice": 184.65
  }
]"#;

/// 파싱 전 원시 레코드.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TradeRecord {
    id: TradeId,
    #[serde(default)]
    pair: String,
    #[serde(default)]
    side: String,
    #[serde(default)]
    pnl: Value,
    #[serde(default)]
    stop_loss: Value,
    #[serde(default)]
    take_profit: Value,
    #[serde(default)]
    lot_size: Value,
    #[serde(default)]
    entry_price: Value,
    #[serde(default)]
    exit_price: Value,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    entry_date: String,
    #[serde(default)]
    psychology_tags: Vec<String>,
    #[serde(default)]
    psychology_notes: Option<String>,
}

impl TradeRecord {
    fn into_trade(self, tz: Tz) -> JournalResult<Trade> {
        let id = self.id;
        let fail = |reason: String| JournalError::DataIntegrity { trade_id: id, reason };

        let side = Side::from_str(&self.side).map_err(|e| fail(e.to_string()))?;
        let entry_date = parse_entry_time(&self.entry_date, tz)
            .ok_or_else(|| fail(format!("진입 시각을 해석할 수 없습니다: '{}'", self.entry_date)))?;
        let psychology_tags = self
            .psychology_tags
            .iter()
            .map(|label| PsychologyTag::from_str(label))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| fail(e.to_string()))?;

        let number = |field: &str, value: &Value| {
            decimal_field(value).map_err(|raw| fail(format!("'{}' 값이 숫자가 아닙니다: {}", field, raw)))
        };

        let trade = Trade {
            id,
            pair: self.pair.trim().to_string(),
            side,
            pnl: number("pnl", &self.pnl)?,
            stop_loss: number("stopLoss", &self.stop_loss)?,
            take_profit: number("takeProfit", &self.take_profit)?,
            lot_size: number("lotSize", &self.lot_size)?,
            entry_price: number("entryPrice", &self.entry_price)?,
            exit_price: number("exitPrice", &self.exit_price)?,
            notes: self.notes.filter(|s| !s.trim().is_empty()),
            entry_date,
            psychology_tags,
            psychology_notes: self.psychology_notes.filter(|s| !s.trim().is_empty()),
        };

        trade.check_integrity()?;
        Ok(trade)
    }
}

/// JSON 숫자/문자열/null을 Decimal로 변환합니다.
///
/// null과 빈 문자열은 `None`, 해석할 수 없는 값은 원문을 `Err`로 돌려줍니다.
fn decimal_field(value: &Value) -> Result<Option<Decimal>, String> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        other => return Err(other.to_string()),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| text)
}

/// JSON 배열에서 거래 목록을 읽습니다.
///
/// 시간대 정보 없는 `entryDate`는 `tz` 기준 로컬 시각으로 해석합니다.
pub fn load_trades_json(json: &str, tz: Tz) -> JournalResult<Vec<Trade>> {
    let records: Vec<TradeRecord> = serde_json::from_str(json)?;

    let mut ids = HashSet::with_capacity(records.len());
    let mut trades = Vec::with_capacity(records.len());
    for record in records {
        if !ids.insert(record.id) {
            return Err(JournalError::DataIntegrity {
                trade_id: record.id,
                reason: "중복된 거래 ID".to_string(),
            });
        }
        trades.push(record.into_trade(tz)?);
    }

    info!(count = trades.len(), timezone = %tz, "Trade snapshot loaded");
    Ok(trades)
}

/// 기본 예시 거래.
pub fn sample_trades() -> JournalResult<Vec<Trade>> {
    load_trades_json(SAMPLE_TRADES_JSON, Tz::UTC)
}
