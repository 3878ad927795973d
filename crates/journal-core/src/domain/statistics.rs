//! 매매일지 요약 통계.
//!
//! 총손익, 승률, 거래 수, 평균 거래 손익을 계산합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, TradeInfo};
use crate::types::{DecimalExt, Money, Percent};

/// 거래 통계 요약.
///
/// 승률과 평균 거래의 분모는 미청산 거래를 포함한 전체 거래 수입니다.
/// 손익 0인 거래는 승리로 세지 않지만 분모에는 포함됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStatistics {
    /// 총손익 (미청산 제외)
    #[serde(rename = "totalPnL")]
    pub total_pnl: Money,
    /// 승률 (백분율, 소수점 1자리)
    pub win_rate: Percent,
    /// 총 거래 수 (미청산 포함)
    pub total_trades: usize,
    /// 평균 거래 손익 (소수점 2자리)
    pub avg_trade: Money,
    /// 수익 거래 수
    pub winning_trades: usize,
    /// 손실 거래 수
    pub losing_trades: usize,
    /// 미청산 거래 수
    pub open_trades: usize,
}

impl Default for JournalStatistics {
    fn default() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            win_rate: Decimal::new(0, 1),
            total_trades: 0,
            avg_trade: Decimal::new(0, 2),
            winning_trades: 0,
            losing_trades: 0,
            open_trades: 0,
        }
    }
}

impl JournalStatistics {
    /// 거래 목록으로부터 통계 계산.
    ///
    /// # Type Parameters
    ///
    /// * `T` - TradeInfo trait을 구현한 타입
    pub fn from_trades<T: TradeInfo>(trades: &[T]) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total_trades: trades.len(),
            ..Self::default()
        };

        for trade in trades {
            if let Some(pnl) = trade.pnl() {
                stats.total_pnl = stats.total_pnl.saturating_add(pnl);
            }

            match Outcome::of(trade.pnl()) {
                Outcome::Win => stats.winning_trades += 1,
                Outcome::Loss => stats.losing_trades += 1,
                Outcome::Open => stats.open_trades += 1,
                Outcome::Breakeven => {}
            }
        }

        let total = Decimal::from(stats.total_trades);
        stats.win_rate = Decimal::from(stats.winning_trades)
            .percent_of(total)
            .round_half_away(1);
        stats.avg_trade = (stats.total_pnl / total).round_half_away(2);

        stats
    }

    /// 손익 0 거래 수.
    pub fn breakeven_trades(&self) -> usize {
        self.total_trades - self.winning_trades - self.losing_trades - self.open_trades
    }
}
