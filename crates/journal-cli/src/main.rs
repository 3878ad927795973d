//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 예시 거래로 요약 통계 보기
//! journal summary
//!
//! # 거래 파일의 2024년 5월 캘린더
//! journal --trades trades.json calendar --month 2024-05
//!
//! # 특정 날짜 거래를 JSON으로
//! journal --format json day --date 2024-05-18
//!
//! # 거래 입력 후 갱신된 통계 보기
//! journal add --pair EUR/USD --side buy --pnl 42.5 --tags "Patience,Discipline"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use journal_core::{init_logging, load_trades_json, sample_trades, Journal, JournalConfig, YearMonth};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use journal_cli::commands::add::{self, AddArgs};
use journal_cli::commands::output::OutputFormat;
use journal_cli::commands::{calendar, day, insights, summary};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal - 손익 캘린더와 심리 태그 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 거래 JSON 파일 (기본: 예시 거래)
    #[arg(long, global = true)]
    trades: Option<PathBuf>,

    /// 설정 파일 (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 출력 형식 (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 요약 통계 (총손익, 승률, 거래 수, 평균 거래)
    Summary,

    /// 월간 손익 캘린더
    Calendar {
        /// 대상 월 (YYYY-MM, 기본: 이번 달)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// 특정 날짜의 거래
    Day {
        /// 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },

    /// 승/패별 심리 태그 순위
    Insights,

    /// 거래 입력 (파일에 저장하지 않음)
    Add(AddArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = JournalConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(config.log_config()?).map_err(|e| anyhow::anyhow!(e))?;

    let format = OutputFormat::parse(&cli.format)?;
    let tz = config.timezone()?;
    let trades = match &cli.trades {
        Some(path) => load_trades_file(path, &config)?,
        None => {
            debug!("No trade file given, using sample trades");
            sample_trades()?
        }
    };
    let mut journal = Journal::from_config(&config, trades)?;

    let content = match cli.command {
        Commands::Summary => summary::run(&journal, format)?,
        Commands::Calendar { month } => {
            let month = match month {
                Some(month) => month,
                None => YearMonth::of(Utc::now().with_timezone(&tz).date_naive())?.to_string(),
            };
            calendar::run(&journal, &month, format)?
        }
        Commands::Day { date } => day::run(&journal, &date, format)?,
        Commands::Insights => insights::run(&journal, format)?,
        Commands::Add(args) => add::run(&mut journal, &args, format)?,
    };

    println!("{}", content);
    Ok(())
}

fn load_trades_file(path: &Path, config: &JournalConfig) -> Result<Vec<journal_core::Trade>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trade file: {}", path.display()))?;
    let trades = load_trades_json(&json, config.timezone()?)
        .with_context(|| format!("Invalid trade file: {}", path.display()))?;
    info!(path = %path.display(), count = trades.len(), "Trades loaded");
    Ok(trades)
}
