//! 월간 손익 캘린더 출력.

use anyhow::Result;
use journal_core::{CalendarCell, DayOutcome, Journal, MonthView, YearMonth};

use super::output::{format_json, OutputFormat};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 10;

/// 월간 캘린더를 렌더링합니다.
pub fn run(journal: &Journal, month: &str, format: OutputFormat) -> Result<String> {
    let month: YearMonth = month.parse()?;
    let view = journal.month_view(month);
    match format {
        OutputFormat::Table => Ok(format_table(&view)),
        OutputFormat::Json => format_json(&view),
    }
}

/// 테이블 형식 출력.
///
/// 그리드 한 행을 날짜 줄과 손익 줄 두 줄로 그리고, 행 끝에 주간 합계를 붙입니다.
pub fn format_table(view: &MonthView) -> String {
    let mut output = String::new();
    let width = (CELL_WIDTH + 1) * WEEKDAYS.len() + 12;

    output.push_str(&format!("{:^width$}\n", view.month.to_string(), width = width));
    for name in WEEKDAYS {
        output.push_str(&format!("{:<w$} ", name, w = CELL_WIDTH));
    }
    output.push_str(&format!("{:>12}\n", "Week"));
    output.push_str(&"-".repeat(width));
    output.push('\n');

    for (cells, week_total) in view.rows() {
        let mut days = String::new();
        let mut amounts = String::new();
        for cell in cells {
            let (day, amount) = match cell {
                CalendarCell::Blank => (String::new(), String::new()),
                CalendarCell::Day { date, pnl, outcome } => {
                    let amount = match (pnl, outcome) {
                        (Some(pnl), DayOutcome::Profit) => format!("+{:.2}", pnl),
                        (Some(pnl), _) => format!("{:.2}", pnl),
                        (None, _) => String::new(),
                    };
                    (date.format("%e").to_string().trim().to_string(), amount)
                }
            };
            days.push_str(&format!("{:<w$} ", day, w = CELL_WIDTH));
            amounts.push_str(&format!("{:<w$} ", amount, w = CELL_WIDTH));
        }

        // 마지막 행은 7칸보다 짧을 수 있음
        let padding = (WEEKDAYS.len() - cells.len()) * (CELL_WIDTH + 1);
        output.push_str(days.trim_end());
        output.push('\n');
        output.push_str(&amounts);
        output.push_str(&" ".repeat(padding));
        output.push_str(&format!("{:>12}\n", format!("{:.2}", week_total)));
    }

    output.push_str(&"-".repeat(width));
    output.push_str(&format!("\nMonth total: {:.2}\n", view.total()));
    output
}
