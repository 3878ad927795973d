//! 심리 태그 인사이트 출력.

use anyhow::Result;
use journal_core::{DecimalExt, Journal, PsychologyInsights, TagInsight};

use super::output::{format_json, OutputFormat};

/// 승/패 태그 순위를 렌더링합니다.
pub fn run(journal: &Journal, format: OutputFormat) -> Result<String> {
    let insights = journal.psychology_insights();
    match format {
        OutputFormat::Table => Ok(format_table(&insights)),
        OutputFormat::Json => format_json(&insights),
    }
}

/// 테이블 형식 출력.
pub fn format_table(insights: &PsychologyInsights) -> String {
    let mut output = String::new();
    push_section(
        &mut output,
        "Winning trades",
        insights.total_wins,
        &insights.win_insights,
    );
    output.push('\n');
    push_section(
        &mut output,
        "Losing trades",
        insights.total_losses,
        &insights.loss_insights,
    );
    output
}

fn push_section(output: &mut String, title: &str, total: usize, insights: &[TagInsight]) {
    output.push_str(&format!("{} ({})\n", title, total));
    if insights.is_empty() {
        output.push_str("  (no data)\n");
        return;
    }

    for insight in insights {
        output.push_str(&format!(
            "  {:<24} {:>4} {:>7}%\n",
            insight.tag.label(),
            insight.count,
            format!("{:.1}", insight.percentage.round_half_away(1)),
        ));
    }
}
