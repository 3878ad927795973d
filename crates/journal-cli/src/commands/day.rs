//! 날짜별 거래 조회.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use journal_core::{format_pnl, Journal, Trade};

use super::output::{format_json, truncate, OutputFormat};

/// 해당 날짜의 거래를 렌더링합니다.
pub fn run(journal: &Journal, date: &str, format: OutputFormat) -> Result<String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", date))?;
    let trades = journal.trades_on(date);

    match format {
        OutputFormat::Table => Ok(format_table(date, &trades)),
        OutputFormat::Json => format_json(&trades),
    }
}

/// 테이블 형식 출력.
pub fn format_table(date: NaiveDate, trades: &[&Trade]) -> String {
    let mut output = String::new();

    if trades.is_empty() {
        output.push_str(&format!("No trades on {}\n", date));
        return output;
    }

    output.push_str(&format!(
        "{:<6} {:<10} {:<5} {:>12} {:<40} {:<30}\n",
        "ID", "PAIR", "SIDE", "P&L", "TAGS", "NOTES"
    ));
    output.push_str(&"-".repeat(108));
    output.push('\n');

    for trade in trades {
        let tags: Vec<&str> = trade.psychology_tags.iter().map(|t| t.label()).collect();
        output.push_str(&format!(
            "{:<6} {:<10} {:<5} {:>12} {:<40} {:<30}\n",
            trade.id,
            truncate(&trade.pair, 10),
            trade.side.to_string(),
            format_pnl(trade.pnl),
            truncate(&tags.join(", "), 40),
            truncate(trade.notes.as_deref().unwrap_or("-"), 30),
        ));
        if let Some(notes) = &trade.psychology_notes {
            output.push_str(&format!("       ↳ {}\n", notes));
        }
    }

    output.push('\n');
    output.push_str(&format!("Total: {} trades on {}", trades.len(), date));
    output
}
