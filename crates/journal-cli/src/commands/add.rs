//! 거래 입력.
//!
//! 입력 워크플로우를 처음부터 끝까지 실행해 메모리 상의 매매일지에 거래를
//! 추가합니다. 파일에는 다시 쓰지 않습니다.

use anyhow::{Context, Result};
use clap::Args;
use journal_core::{Journal, JournalStatistics, Trade, TradeForm};
use serde::Serialize;
use tracing::info;

use super::output::{format_json, OutputFormat};
use super::{day, summary};

/// 거래 입력 인자.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// 종목 (예: EUR/USD)
    #[arg(long)]
    pub pair: String,

    /// 방향 (buy, sell)
    #[arg(long)]
    pub side: String,

    /// 실현 손익
    #[arg(long, allow_hyphen_values = true)]
    pub pnl: String,

    /// 진입 시각 (YYYY-MM-DDTHH:MM, 비우면 현재 시각)
    #[arg(long, default_value = "")]
    pub entry_date: String,

    #[arg(long, default_value = "")]
    pub stop_loss: String,

    #[arg(long, default_value = "")]
    pub take_profit: String,

    #[arg(long, default_value = "")]
    pub lot_size: String,

    #[arg(long, default_value = "")]
    pub entry_price: String,

    #[arg(long, default_value = "")]
    pub exit_price: String,

    /// 매매 메모
    #[arg(long, default_value = "")]
    pub notes: String,

    /// 심리 태그 (쉼표 구분, 예: "Patience,Proper Analysis")
    #[arg(long, value_delimiter = ',', required = true)]
    pub tags: Vec<String>,

    /// 심리 메모
    #[arg(long, default_value = "")]
    pub psychology_notes: String,
}

impl AddArgs {
    fn form(&self) -> TradeForm {
        TradeForm {
            pair: self.pair.clone(),
            side: self.side.clone(),
            pnl: self.pnl.clone(),
            stop_loss: self.stop_loss.clone(),
            take_profit: self.take_profit.clone(),
            lot_size: self.lot_size.clone(),
            entry_price: self.entry_price.clone(),
            exit_price: self.exit_price.clone(),
            notes: self.notes.clone(),
            entry_date: self.entry_date.clone(),
        }
    }
}

/// 커밋 결과.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    pub trade: Trade,
    pub statistics: JournalStatistics,
}

/// 거래를 입력하고 갱신된 통계를 반환합니다.
///
/// 중간에 실패하면 입력 중인 초안을 버립니다.
pub fn add_trade(journal: &mut Journal, args: &AddArgs) -> Result<AddOutcome> {
    journal.begin_trade_intake()?;

    let result = drive_intake(journal, args);
    if result.is_err() {
        journal.cancel_intake();
    }
    let trade = result?;

    info!(trade_id = trade.id, "Trade added to in-memory journal");
    Ok(AddOutcome {
        trade,
        statistics: journal.statistics(),
    })
}

fn drive_intake(journal: &mut Journal, args: &AddArgs) -> Result<Trade> {
    journal
        .submit_facts(args.form())
        .context("Trade facts rejected")?;

    for label in args.tags.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        journal
            .toggle_tag_label(label)
            .with_context(|| format!("Cannot select tag: {}", label))?;
    }
    journal.set_psychology_notes(&args.psychology_notes)?;

    journal.commit_trade().context("Trade commit rejected")
}

/// 거래를 입력하고 결과를 렌더링합니다.
pub fn run(journal: &mut Journal, args: &AddArgs, format: OutputFormat) -> Result<String> {
    let outcome = add_trade(journal, args)?;
    match format {
        OutputFormat::Table => {
            let mut output = day::format_table(outcome.trade.entry_day(journal.timezone()), &[&outcome.trade]);
            output.push_str("\n\n");
            output.push_str(&summary::format_table(&outcome.statistics));
            Ok(output)
        }
        OutputFormat::Json => format_json(&outcome),
    }
}
