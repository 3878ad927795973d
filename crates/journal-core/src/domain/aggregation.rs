//! 일별/주별 손익 집계.
//!
//! # 주별 집계 기준
//!
//! 주는 ISO 주가 아니라 캘린더 그리드의 행입니다. 앞쪽 빈 칸을 포함한
//! 그리드 위치를 7칸씩 나누며 (주 번호 = 위치 / 7), 빈 칸은 자리만 차지하고
//! 손익에는 기여하지 않습니다. 주별 합계가 화면의 캘린더 행과 일치해야 합니다.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::calendar::{calendar_days, DAYS_PER_WEEK};
use crate::domain::TradeInfo;
use crate::types::{Money, YearMonth};

/// 날짜별 손익 합계.
pub type DailyPnL = BTreeMap<NaiveDate, Money>;

/// 그리드 행(주) 번호별 손익 합계.
pub type WeeklyPnL = BTreeMap<usize, Money>;

/// 기준 시간대 날짜별 손익 합계를 계산합니다.
///
/// 미청산 거래(손익 없음)는 어떤 날짜에도 나타나지 않습니다.
pub fn daily_pnl<T: TradeInfo>(trades: &[T], tz: Tz) -> DailyPnL {
    let mut daily = DailyPnL::new();
    for trade in trades {
        let Some(pnl) = trade.pnl() else {
            continue;
        };
        let total = daily.entry(trade.entry_day_in(tz)).or_insert(Decimal::ZERO);
        *total = total.saturating_add(pnl);
    }
    daily
}

/// 월간 그리드 행별 손익 합계를 계산합니다.
///
/// 그리드의 모든 행 번호가 포함되며, 손익이 없는 행은 0입니다.
pub fn weekly_pnl<T: TradeInfo>(trades: &[T], month: YearMonth, tz: Tz) -> WeeklyPnL {
    weekly_from_daily(&daily_pnl(trades, tz), month)
}

/// 이미 계산된 일별 합계로 그리드 행별 합계를 만듭니다.
pub fn weekly_from_daily(daily: &DailyPnL, month: YearMonth) -> WeeklyPnL {
    calendar_days(month)
        .chunks(DAYS_PER_WEEK)
        .enumerate()
        .map(|(week, cells)| {
            let total: Money = cells
                .iter()
                .flatten()
                .filter_map(|date| daily.get(date))
                .fold(Decimal::ZERO, |acc, pnl| acc.saturating_add(*pnl));
            (week, total)
        })
        .collect()
}

/// 기준 시간대 날짜가 일치하는 거래 (드릴다운용).
pub fn trades_on<T: TradeInfo>(trades: &[T], date: NaiveDate, tz: Tz) -> Vec<&T> {
    trades
        .iter()
        .filter(|t| t.entry_day_in(tz) == date)
        .collect()
}

/// 캘린더 날짜 칸의 손익 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayOutcome {
    /// 합계 > 0
    Profit,
    /// 합계 ≤ 0 (청산 거래가 있는 날)
    Loss,
    /// 청산 거래 없음
    NoTrades,
}

impl DayOutcome {
    pub fn of(day_total: Option<Money>) -> Self {
        match day_total {
            None => DayOutcome::NoTrades,
            Some(total) if total > Decimal::ZERO => DayOutcome::Profit,
            Some(_) => DayOutcome::Loss,
        }
    }
}

/// 캘린더 그리드 한 칸.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarCell {
    /// 1일 앞의 빈 칸
    Blank,
    /// 날짜 칸
    Day {
        date: NaiveDate,
        pnl: Option<Money>,
        outcome: DayOutcome,
    },
}

/// 한 달 캘린더 화면에 필요한 집계 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    /// 대상 월
    pub month: YearMonth,
    /// 그리드 칸 (빈 칸 포함)
    pub cells: Vec<CalendarCell>,
    /// 그리드 행별 합계
    pub weeks: Vec<Money>,
}

impl MonthView {
    /// 거래 스냅샷으로 월간 뷰를 만듭니다.
    pub fn build<T: TradeInfo>(trades: &[T], month: YearMonth, tz: Tz) -> Self {
        let daily = daily_pnl(trades, tz);

        let cells = calendar_days(month)
            .into_iter()
            .map(|cell| match cell {
                None => CalendarCell::Blank,
                Some(date) => {
                    let pnl = daily.get(&date).copied();
                    CalendarCell::Day {
                        date,
                        pnl,
                        outcome: DayOutcome::of(pnl),
                    }
                }
            })
            .collect();

        let weeks = weekly_from_daily(&daily, month).into_values().collect();

        Self {
            month,
            cells,
            weeks,
        }
    }

    /// 월 전체 손익 합계.
    pub fn total(&self) -> Money {
        self.weeks
            .iter()
            .fold(Decimal::ZERO, |acc, pnl| acc.saturating_add(*pnl))
    }

    /// 그리드 행과 행별 합계를 함께 순회합니다.
    pub fn rows(&self) -> impl Iterator<Item = (&[CalendarCell], Money)> + '_ {
        self.cells
            .chunks(DAYS_PER_WEEK)
            .zip(self.weeks.iter().copied())
    }
}
