//! 손익 계산을 위한 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};

/// 손익 금액 타입.
pub type Money = Decimal;

/// 퍼센트 타입 (50.0 = 50%).
pub type Percent = Decimal;

/// 거래 한 건 손익의 절댓값 상한 (10^15).
///
/// 이 범위의 손익은 수십억 건을 더해도 `Decimal` 범위를 넘지 않습니다.
pub const MAX_PNL_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// 손익이 허용 범위 안인지 확인합니다.
pub fn is_pnl_in_range(pnl: Money) -> bool {
    pnl.abs() <= Decimal::from(MAX_PNL_MAGNITUDE)
}

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_away(&self, dp: u32) -> Decimal;

    /// 전체 대비 비율을 백분율로 계산합니다. 분모가 0이면 0을 반환합니다.
    fn percent_of(&self, total: Decimal) -> Percent;
}

impl DecimalExt for Decimal {
    fn round_half_away(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn percent_of(&self, total: Decimal) -> Percent {
        if total.is_zero() {
            Decimal::ZERO
        } else {
            *self / total * Decimal::ONE_HUNDRED
        }
    }
}

/// 손익을 화면 표시용 문자열로 변환합니다.
///
/// 손익이 없는 거래(미청산)는 `"Open"`으로 표시합니다.
pub fn format_pnl(pnl: Option<Money>) -> String {
    match pnl {
        Some(value) => format!("${:.2}", value.round_half_away(2)),
        None => "Open".to_string(),
    }
}
