//! 2단계 거래 입력 워크플로우.
//!
//! ```text
//! Idle ──begin──▶ EnteringFacts ──submit_facts──▶ SelectingPsychology ──commit──▶ Idle
//!                       │                                  │
//!                       └──────────── cancel ──────────────┴──▶ Idle
//! ```
//!
//! 1단계에서 거래 사실(종목, 방향, 손익 등)을 검증하고, 2단계에서 손익 부호에
//! 맞는 심리 태그를 하나 이상 고른 뒤 커밋합니다. 검증 실패는 단계를 바꾸지
//! 않으며, 저장소는 커밋에서만 변경됩니다.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::mem;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::domain::{PsychologyTag, Side, TagVocabulary, Trade, TradeStore};
use crate::error::{JournalError, JournalResult, ValidationError};
use crate::types::{is_pnl_in_range, parse_entry_time, Money};

/// 1단계 입력 폼. 모든 값은 사용자가 입력한 문자열 그대로입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeForm {
    pub pair: String,
    pub side: String,
    pub pnl: String,
    pub stop_loss: String,
    pub take_profit: String,
    pub lot_size: String,
    pub entry_price: String,
    pub exit_price: String,
    pub notes: String,
    /// 비어 있으면 현재 시각
    pub entry_date: String,
}

/// 검증을 통과하고 심리 태그 선택을 기다리는 거래.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTrade {
    pub pair: String,
    pub side: Side,
    pub pnl: Money,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub lot_size: Option<Decimal>,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub notes: Option<String>,
    pub entry_date: DateTime<Utc>,
    /// 손익 부호로 정해진 태그 어휘
    pub vocabulary: TagVocabulary,
    /// 선택된 태그 (선택 순서)
    pub selected: Vec<PsychologyTag>,
    pub psychology_notes: Option<String>,
}

impl PendingTrade {
    fn into_trade(self, id: u64) -> Trade {
        Trade {
            id,
            pair: self.pair,
            side: self.side,
            pnl: Some(self.pnl),
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            lot_size: self.lot_size,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            notes: self.notes,
            entry_date: self.entry_date,
            psychology_tags: self.selected,
            psychology_notes: self.psychology_notes,
        }
    }
}

/// 2단계 화면에 보여줄 초안 요약.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftWithVocabulary {
    pub pair: String,
    pub side: Side,
    pub pnl: Money,
    pub entry_date: DateTime<Utc>,
    pub vocabulary: TagVocabulary,
    /// 선택 가능한 태그
    pub offered_tags: Vec<PsychologyTag>,
}

impl From<&PendingTrade> for DraftWithVocabulary {
    fn from(pending: &PendingTrade) -> Self {
        Self {
            pair: pending.pair.clone(),
            side: pending.side,
            pnl: pending.pnl,
            entry_date: pending.entry_date,
            vocabulary: pending.vocabulary,
            offered_tags: pending.vocabulary.tags().to_vec(),
        }
    }
}

/// 워크플로우 단계.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum IntakeStage {
    /// 입력 중인 거래 없음
    #[default]
    Idle,
    /// 1단계: 마지막으로 제출된 폼을 보관
    EnteringFacts { form: TradeForm },
    /// 2단계: 심리 태그 선택
    SelectingPsychology(Box<PendingTrade>),
}

impl IntakeStage {
    /// 단계 이름.
    pub fn name(&self) -> &'static str {
        match self {
            IntakeStage::Idle => "Idle",
            IntakeStage::EnteringFacts { .. } => "EnteringFacts",
            IntakeStage::SelectingPsychology(_) => "SelectingPsychology",
        }
    }

    /// 입력이 진행 중인지 확인합니다.
    pub fn is_active(&self) -> bool {
        !matches!(self, IntakeStage::Idle)
    }
}

/// 거래 입력 상태 머신.
#[derive(Debug, Clone)]
pub struct IntakeWorkflow {
    stage: IntakeStage,
    /// 로컬 진입 시각을 해석할 기준 시간대
    tz: Tz,
}

impl IntakeWorkflow {
    pub fn new(tz: Tz) -> Self {
        Self {
            stage: IntakeStage::Idle,
            tz,
        }
    }

    /// 현재 단계.
    pub fn stage(&self) -> &IntakeStage {
        &self.stage
    }

    /// 새 거래 입력을 시작합니다. `Idle`에서만 가능합니다.
    pub fn begin(&mut self) -> JournalResult<()> {
        if self.stage.is_active() {
            return Err(self.invalid_transition("begin"));
        }

        self.stage = IntakeStage::EnteringFacts {
            form: TradeForm::default(),
        };
        debug!(stage = self.stage.name(), "Trade intake started");
        Ok(())
    }

    /// 1단계 폼을 검증하고 심리 태그 선택 단계로 넘어갑니다.
    ///
    /// 검증 순서: 손익 → 방향 → 종목 → 선택 숫자 필드 → 진입 시각.
    /// 실패하면 제출된 폼을 보관한 채 `EnteringFacts`에 머뭅니다.
    pub fn submit_facts(&mut self, form: TradeForm) -> JournalResult<DraftWithVocabulary> {
        if !matches!(self.stage, IntakeStage::EnteringFacts { .. }) {
            return Err(self.invalid_transition("submit_facts"));
        }

        match validate_form(&form, self.tz) {
            Ok(pending) => {
                let draft = DraftWithVocabulary::from(&pending);
                self.stage = IntakeStage::SelectingPsychology(Box::new(pending));
                debug!(
                    pair = %draft.pair,
                    pnl = %draft.pnl,
                    vocabulary = %draft.vocabulary,
                    "Trade facts accepted"
                );
                Ok(draft)
            }
            Err(e) => {
                warn!(error = %e, "Trade facts rejected");
                self.stage = IntakeStage::EnteringFacts { form };
                Err(e.into())
            }
        }
    }

    /// 태그 선택을 토글합니다. 토글 후 선택 상태를 반환합니다.
    pub fn toggle_tag(&mut self, tag: PsychologyTag) -> JournalResult<bool> {
        let pending = self.pending_mut("toggle_tag")?;

        if !pending.vocabulary.contains(tag) {
            let err = ValidationError::TagNotInVocabulary {
                tag: tag.to_string(),
                vocabulary: pending.vocabulary.to_string(),
            };
            warn!(error = %err, "Tag toggle rejected");
            return Err(err.into());
        }

        let selected = match pending.selected.iter().position(|t| *t == tag) {
            Some(index) => {
                pending.selected.remove(index);
                false
            }
            None => {
                pending.selected.push(tag);
                true
            }
        };
        debug!(tag = %tag, selected, "Psychology tag toggled");
        Ok(selected)
    }

    /// 라벨 문자열로 태그를 토글합니다.
    pub fn toggle_tag_label(&mut self, label: &str) -> JournalResult<bool> {
        let tag = PsychologyTag::from_str(label)?;
        self.toggle_tag(tag)
    }

    /// 심리 메모를 설정합니다. 빈 문자열은 메모 없음으로 처리합니다.
    pub fn set_psychology_notes(&mut self, text: &str) -> JournalResult<()> {
        let pending = self.pending_mut("set_psychology_notes")?;
        pending.psychology_notes = non_empty(text);
        Ok(())
    }

    /// 현재 선택된 태그.
    pub fn selected_tags(&self) -> &[PsychologyTag] {
        match &self.stage {
            IntakeStage::SelectingPsychology(pending) => &pending.selected,
            _ => &[],
        }
    }

    /// 2단계 초안 요약.
    pub fn draft(&self) -> Option<DraftWithVocabulary> {
        match &self.stage {
            IntakeStage::SelectingPsychology(pending) => Some(DraftWithVocabulary::from(&**pending)),
            _ => None,
        }
    }

    /// 거래를 확정하고 저장소에 추가합니다.
    ///
    /// 태그가 하나도 없거나 부여할 ID가 없으면 실패하며 단계는 유지됩니다.
    pub fn commit(&mut self, store: &mut TradeStore) -> JournalResult<Trade> {
        let pending = self.pending_mut("commit")?;
        if pending.selected.is_empty() {
            let err = ValidationError::NoPsychologyTags;
            warn!(error = %err, "Trade commit rejected");
            return Err(err.into());
        }

        let id = store.next_id().inspect_err(|err| {
            warn!(error = %err, "Trade commit rejected");
        })?;

        let IntakeStage::SelectingPsychology(pending) = mem::take(&mut self.stage) else {
            return Err(self.invalid_transition("commit"));
        };

        let trade = pending.into_trade(id);
        let committed = store.append(trade).clone();
        info!(
            trade_id = committed.id,
            pair = %committed.pair,
            side = %committed.side,
            pnl = ?committed.pnl,
            tags = committed.psychology_tags.len(),
            "Trade committed"
        );
        Ok(committed)
    }

    /// 입력 중인 초안을 버립니다. 버린 초안이 있으면 `true`.
    pub fn cancel(&mut self) -> bool {
        let previous = mem::take(&mut self.stage);
        if previous.is_active() {
            debug!(stage = previous.name(), "Trade intake cancelled");
        }
        previous.is_active()
    }

    fn pending_mut(&mut self, operation: &'static str) -> JournalResult<&mut PendingTrade> {
        match &mut self.stage {
            IntakeStage::SelectingPsychology(pending) => Ok(pending),
            other => Err(JournalError::InvalidTransition {
                operation,
                stage: other.name(),
            }),
        }
    }

    fn invalid_transition(&self, operation: &'static str) -> JournalError {
        JournalError::InvalidTransition {
            operation,
            stage: self.stage.name(),
        }
    }
}

fn validate_form(form: &TradeForm, tz: Tz) -> Result<PendingTrade, ValidationError> {
    let pnl = parse_decimal(&form.pnl)
        .filter(|pnl| is_pnl_in_range(*pnl))
        .ok_or_else(|| ValidationError::InvalidPnl(form.pnl.clone()))?;
    let side = Side::from_str(&form.side)?;

    let pair = form.pair.trim();
    if pair.is_empty() {
        return Err(ValidationError::MissingPair);
    }

    let stop_loss = optional_number("stopLoss", &form.stop_loss)?;
    let take_profit = optional_number("takeProfit", &form.take_profit)?;
    let lot_size = optional_number("lotSize", &form.lot_size)?;
    let entry_price = optional_number("entryPrice", &form.entry_price)?;
    let exit_price = optional_number("exitPrice", &form.exit_price)?;

    let entry_date = if form.entry_date.trim().is_empty() {
        Utc::now()
    } else {
        parse_entry_time(&form.entry_date, tz)
            .ok_or_else(|| ValidationError::InvalidEntryDate(form.entry_date.clone()))?
    };

    Ok(PendingTrade {
        pair: pair.to_string(),
        side,
        pnl,
        stop_loss,
        take_profit,
        lot_size,
        entry_price,
        exit_price,
        notes: non_empty(&form.notes),
        entry_date,
        vocabulary: TagVocabulary::for_pnl(pnl),
        selected: Vec::new(),
        psychology_notes: None,
    })
}

/// 10진수 문자열 파싱 (`125.50`, `-85.2`, `1e3`).
fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn optional_number(field: &'static str, value: &str) -> Result<Option<Decimal>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_decimal(value)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
