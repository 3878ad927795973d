//! 거래 저장소.
//!
//! 커밋된 거래를 입력 순서대로 보관합니다. 삽입과 ID/날짜 조회 외의
//! 로직은 없으며, 모든 파생 뷰(통계, 집계, 인사이트)는 [`TradeStore::trades`]
//! 스냅샷에서 매번 새로 계산합니다.

use chrono::NaiveDate;
use chrono_tz::Tz;
use std::collections::HashSet;
use tracing::debug;

use crate::domain::{Trade, TradeId};
use crate::error::{JournalError, JournalResult};

/// 버전이 붙은 거래 컬렉션.
///
/// 변경 지점은 [`TradeStore::append`] 하나뿐이며, 변경마다 `version`이 증가합니다.
#[derive(Debug, Clone, Default)]
pub struct TradeStore {
    trades: Vec<Trade>,
    version: u64,
}

impl TradeStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 거래로 저장소를 생성합니다.
    ///
    /// 각 거래의 무결성과 ID 중복을 검사합니다.
    pub fn from_trades(trades: Vec<Trade>) -> JournalResult<Self> {
        let mut ids = HashSet::with_capacity(trades.len());
        for trade in &trades {
            trade.check_integrity()?;
            if !ids.insert(trade.id) {
                return Err(JournalError::DataIntegrity {
                    trade_id: trade.id,
                    reason: "중복된 거래 ID".to_string(),
                });
            }
        }

        Ok(Self { trades, version: 0 })
    }

    /// 현재 스냅샷.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// 변경 횟수.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// ID로 거래를 조회합니다.
    pub fn get(&self, id: TradeId) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// 기준 시간대 날짜가 일치하는 거래 (입력 순서).
    pub fn on_date(&self, date: NaiveDate, tz: Tz) -> Vec<&Trade> {
        self.trades
            .iter()
            .filter(|t| t.entry_day(tz) == date)
            .collect()
    }

    /// 다음 커밋에 부여할 ID.
    ///
    /// 가장 큰 ID가 이미 `TradeId::MAX`이면 더 부여할 수 없어 오류를 반환합니다.
    pub fn next_id(&self) -> JournalResult<TradeId> {
        match self.trades.iter().map(|t| t.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| JournalError::DataIntegrity {
                trade_id: max,
                reason: "다음 거래 ID가 범위를 벗어났습니다".to_string(),
            }),
        }
    }

    /// 거래를 추가합니다. 입력 워크플로우의 커밋 단계에서만 호출됩니다.
    pub(crate) fn append(&mut self, trade: Trade) -> &Trade {
        self.trades.push(trade);
        self.version += 1;
        debug!(
            version = self.version,
            trade_count = self.trades.len(),
            "Trade store updated"
        );
        &self.trades[self.trades.len() - 1]
    }
}
