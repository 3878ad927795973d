//! 심리 태그 인사이트.
//!
//! 승리 거래(손익 > 0)와 패배 거래(손익 < 0)를 나누고, 각 그룹에서
//! 태그가 등장한 비율을 구해 높은 순으로 정렬합니다. 손익 0과 미청산
//! 거래는 어느 그룹에도 들어가지 않습니다.
//!
//! 비율의 분모는 그룹의 거래 수이므로, 여러 태그가 붙은 거래가 있으면
//! 한 그룹의 비율 합계는 100%를 넘을 수 있습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, PsychologyTag, TradeInfo};
use crate::types::{DecimalExt, Percent};

/// 태그 하나의 빈도.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInsight {
    pub tag: PsychologyTag,
    /// 그룹 내 등장 횟수
    pub count: usize,
    /// 등장 횟수 / 그룹 거래 수 × 100
    pub percentage: Percent,
}

/// 승/패 그룹별 태그 순위.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologyInsights {
    pub win_insights: Vec<TagInsight>,
    pub loss_insights: Vec<TagInsight>,
    pub total_wins: usize,
    pub total_losses: usize,
}

impl PsychologyInsights {
    /// 거래 목록으로부터 인사이트 계산.
    pub fn from_trades<T: TradeInfo>(trades: &[T]) -> Self {
        let wins: Vec<&T> = trades
            .iter()
            .filter(|t| Outcome::of(t.pnl()) == Outcome::Win)
            .collect();
        let losses: Vec<&T> = trades
            .iter()
            .filter(|t| Outcome::of(t.pnl()) == Outcome::Loss)
            .collect();

        Self {
            win_insights: rank_tags(&wins),
            loss_insights: rank_tags(&losses),
            total_wins: wins.len(),
            total_losses: losses.len(),
        }
    }

    /// 승리 거래에서 가장 많이 나온 태그.
    pub fn top_win_driver(&self) -> Option<&TagInsight> {
        self.win_insights.first()
    }

    /// 패배 거래에서 가장 많이 나온 태그.
    pub fn top_loss_driver(&self) -> Option<&TagInsight> {
        self.loss_insights.first()
    }
}

/// 그룹 내 태그 빈도를 비율 내림차순으로 정렬합니다.
///
/// 동률은 처음 등장한 순서를 유지합니다.
fn rank_tags<T: TradeInfo>(partition: &[T]) -> Vec<TagInsight> {
    let mut counts: Vec<(PsychologyTag, usize)> = Vec::new();
    for trade in partition {
        for &tag in trade.psychology_tags() {
            match counts.iter_mut().find(|(seen, _)| *seen == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag, 1)),
            }
        }
    }

    let size = Decimal::from(partition.len());
    let mut insights: Vec<TagInsight> = counts
        .into_iter()
        .map(|(tag, count)| TagInsight {
            tag,
            count,
            percentage: Decimal::from(count).percent_of(size),
        })
        .collect();

    insights.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    insights
}
