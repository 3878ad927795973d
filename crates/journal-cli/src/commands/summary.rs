//! 요약 통계 출력.

use anyhow::Result;
use journal_core::{format_pnl, Journal, JournalStatistics};

use super::output::{format_json, OutputFormat};

/// 요약 통계를 렌더링합니다.
pub fn run(journal: &Journal, format: OutputFormat) -> Result<String> {
    let stats = journal.statistics();
    match format {
        OutputFormat::Table => Ok(format_table(&stats)),
        OutputFormat::Json => format_json(&stats),
    }
}

/// 테이블 형식 출력.
pub fn format_table(stats: &JournalStatistics) -> String {
    let rows = [
        ("Total P&L", format_pnl(Some(stats.total_pnl))),
        ("Win Rate", format!("{:.1}%", stats.win_rate)),
        ("Total Trades", stats.total_trades.to_string()),
        ("Avg Trade", format_pnl(Some(stats.avg_trade))),
        ("Wins", stats.winning_trades.to_string()),
        ("Losses", stats.losing_trades.to_string()),
        ("Breakeven", stats.breakeven_trades().to_string()),
        ("Open", stats.open_trades.to_string()),
    ];

    let mut output = String::new();
    for (label, value) in rows {
        output.push_str(&format!("{:<14} {:>12}\n", label, value));
    }
    output
}
