//! 매매일지 퍼사드.
//!
//! 거래 저장소, 입력 워크플로우, 기준 시간대를 묶어 화면 계층이 쓰는
//! 연산을 제공합니다. 모든 조회는 현재 스냅샷에서 매번 다시 계산합니다.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::info;

use crate::config::JournalConfig;
use crate::domain::{
    calendar_days, calendar_days_for_key, daily_pnl, trades_on, weekly_pnl, DailyPnL,
    DraftWithVocabulary, IntakeStage, IntakeWorkflow, MonthView, PsychologyInsights, PsychologyTag,
    JournalStatistics, Trade, TradeForm, TradeStore, WeeklyPnL,
};
use crate::error::JournalResult;
use crate::journal_span;
use crate::types::YearMonth;

/// 매매일지.
#[derive(Debug, Clone)]
pub struct Journal {
    store: TradeStore,
    intake: IntakeWorkflow,
    tz: Tz,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Journal {
    /// 빈 매매일지를 생성합니다.
    pub fn new(tz: Tz) -> Self {
        Self {
            store: TradeStore::new(),
            intake: IntakeWorkflow::new(tz),
            tz,
        }
    }

    /// 기존 거래로 매매일지를 생성합니다.
    pub fn with_trades(trades: Vec<Trade>, tz: Tz) -> JournalResult<Self> {
        let store = TradeStore::from_trades(trades)?;
        info!(trade_count = store.len(), timezone = %tz, "Journal opened");
        Ok(Self {
            store,
            intake: IntakeWorkflow::new(tz),
            tz,
        })
    }

    /// 설정의 시간대로 매매일지를 생성합니다.
    pub fn from_config(config: &JournalConfig, trades: Vec<Trade>) -> JournalResult<Self> {
        Self::with_trades(trades, config.timezone()?)
    }

    /// 기준 시간대.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// 커밋된 거래 스냅샷.
    pub fn trades(&self) -> &[Trade] {
        self.store.trades()
    }

    pub fn store(&self) -> &TradeStore {
        &self.store
    }

    // ==================== 조회 ====================

    pub fn calendar_days(&self, month: YearMonth) -> Vec<Option<NaiveDate>> {
        calendar_days(month)
    }

    pub fn calendar_days_for_key(&self, key: &str) -> JournalResult<Vec<Option<NaiveDate>>> {
        calendar_days_for_key(key)
    }

    /// 기준 시간대 날짜별 손익 합계.
    pub fn daily_pnl(&self) -> DailyPnL {
        daily_pnl(self.trades(), self.tz)
    }

    /// 그리드 행별 손익 합계.
    pub fn weekly_pnl(&self, month: YearMonth) -> WeeklyPnL {
        weekly_pnl(self.trades(), month, self.tz)
    }

    pub fn statistics(&self) -> JournalStatistics {
        JournalStatistics::from_trades(self.trades())
    }

    pub fn psychology_insights(&self) -> PsychologyInsights {
        PsychologyInsights::from_trades(self.trades())
    }

    /// 해당 날짜의 거래 (입력 순서).
    pub fn trades_on(&self, date: NaiveDate) -> Vec<&Trade> {
        trades_on(self.trades(), date, self.tz)
    }

    pub fn month_view(&self, month: YearMonth) -> MonthView {
        MonthView::build(self.trades(), month, self.tz)
    }

    // ==================== 입력 워크플로우 ====================

    pub fn begin_trade_intake(&mut self) -> JournalResult<()> {
        self.intake.begin()
    }

    pub fn submit_facts(&mut self, form: TradeForm) -> JournalResult<DraftWithVocabulary> {
        let span = journal_span!("submit_facts", form.pair.trim());
        let _enter = span.enter();
        self.intake.submit_facts(form)
    }

    pub fn toggle_tag(&mut self, tag: PsychologyTag) -> JournalResult<bool> {
        self.intake.toggle_tag(tag)
    }

    pub fn toggle_tag_label(&mut self, label: &str) -> JournalResult<bool> {
        self.intake.toggle_tag_label(label)
    }

    pub fn set_psychology_notes(&mut self, text: &str) -> JournalResult<()> {
        self.intake.set_psychology_notes(text)
    }

    /// 입력 중인 거래를 확정합니다.
    pub fn commit_trade(&mut self) -> JournalResult<Trade> {
        let pair = self
            .intake
            .draft()
            .map(|draft| draft.pair)
            .unwrap_or_default();
        let span = match self.store.next_id() {
            Ok(next_id) => journal_span!("commit_trade", pair, next_id),
            Err(_) => journal_span!("commit_trade", pair),
        };
        let _enter = span.enter();
        self.intake.commit(&mut self.store)
    }

    /// 입력 중인 초안을 버립니다.
    pub fn cancel_intake(&mut self) -> bool {
        self.intake.cancel()
    }

    pub fn intake_stage(&self) -> &IntakeStage {
        self.intake.stage()
    }

    /// 2단계 초안 요약.
    pub fn intake_draft(&self) -> Option<DraftWithVocabulary> {
        self.intake.draft()
    }
}
