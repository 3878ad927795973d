//! 매매일지 시나리오 통합 테스트
//!
//! 공개 API만으로 예시 거래 집계, 입력 워크플로우, 캘린더 집계를 검증합니다.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use journal_core::{
    calendar_days, format_pnl, load_trades_json, sample_trades, CalendarCell, DayOutcome,
    IntakeStage, Journal, JournalError, JournalStatistics, PsychologyInsights, PsychologyTag,
    TradeForm, ValidationError, YearMonth,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_journal() -> Journal {
    Journal::with_trades(sample_trades().unwrap(), Tz::UTC).unwrap()
}

fn loss_form() -> TradeForm {
    TradeForm {
        pair: "GBP/USD".to_string(),
        side: "Sell".to_string(),
        pnl: "-12.5".to_string(),
        entry_date: "2024-05-20T09:00".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_sample_statistics_and_insights() {
    let trades = sample_trades().unwrap();

    let stats = JournalStatistics::from_trades(&trades);
    assert_eq!(stats.total_pnl, dec!(40.30));
    assert_eq!(stats.win_rate, dec!(50.0));
    assert_eq!(stats.total_trades, 2);
    assert_eq!(stats.avg_trade, dec!(20.15));

    let insights = PsychologyInsights::from_trades(&trades);
    assert_eq!(insights.total_wins, 1);
    assert_eq!(insights.total_losses, 1);

    let wins: Vec<_> = insights
        .win_insights
        .iter()
        .map(|i| (i.tag, i.percentage))
        .collect();
    assert_eq!(
        wins,
        vec![
            (PsychologyTag::Patience, dec!(100)),
            (PsychologyTag::ProperAnalysis, dec!(100)),
        ]
    );

    let losses: Vec<_> = insights.loss_insights.iter().map(|i| i.tag).collect();
    assert_eq!(losses, vec![PsychologyTag::Impatience, PsychologyTag::Fomo]);
}

#[test]
fn test_sample_month_view() {
    let journal = sample_journal();
    let view = journal.month_view(YearMonth::new(2024, 5).unwrap());

    // 2024-05-01은 수요일 → 빈 칸 3개
    assert_eq!(view.cells.len(), 34);
    assert!(view.cells[..3].iter().all(|c| *c == CalendarCell::Blank));

    let outcome_of = |day: u32| match &view.cells[2 + day as usize] {
        CalendarCell::Day { outcome, .. } => *outcome,
        CalendarCell::Blank => panic!("blank cell for day {day}"),
    };
    assert_eq!(outcome_of(15), DayOutcome::Profit);
    assert_eq!(outcome_of(18), DayOutcome::Loss);
    assert_eq!(outcome_of(16), DayOutcome::NoTrades);

    // 15일과 18일은 모두 그리드 2행 (12일~18일)
    assert_eq!(view.weeks[2], dec!(40.30));
    assert_eq!(view.weeks.iter().filter(|w| !w.is_zero()).count(), 1);
}

#[test]
fn test_invalid_pnl_leaves_journal_unchanged() {
    let mut journal = sample_journal();
    journal.begin_trade_intake().unwrap();

    let err = journal
        .submit_facts(TradeForm {
            pnl: "abc".to_string(),
            ..loss_form()
        })
        .unwrap_err();

    assert!(err.is_recoverable());
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::InvalidPnl("abc".to_string()))
    );
    assert_eq!(journal.intake_stage().name(), "EnteringFacts");
    assert_eq!(journal.trades().len(), 2);
    assert_eq!(journal.store().version(), 0);
}

#[test]
fn test_commit_without_tags_stays_in_selection() {
    let mut journal = sample_journal();
    journal.begin_trade_intake().unwrap();
    let draft = journal.submit_facts(loss_form()).unwrap();
    assert_eq!(draft.offered_tags, journal_core::TagVocabulary::Loss.tags());

    let err = journal.commit_trade().unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::NoPsychologyTags));
    assert!(matches!(
        journal.intake_stage(),
        IntakeStage::SelectingPsychology(_)
    ));

    // 태그를 고르면 커밋 가능
    journal.toggle_tag_label("overtrading").unwrap();
    let trade = journal.commit_trade().unwrap();
    assert_eq!(trade.psychology_tags, vec![PsychologyTag::Overtrading]);
}

#[test]
fn test_committed_trade_reads_back_on_same_local_date() {
    let seoul = chrono_tz::Asia::Seoul;
    let mut journal = Journal::new(seoul);

    journal.begin_trade_intake().unwrap();
    journal
        .submit_facts(TradeForm {
            pair: "USD/KRW".to_string(),
            side: "buy".to_string(),
            pnl: "30".to_string(),
            entry_date: "2024-06-01T00:30".to_string(),
            ..Default::default()
        })
        .unwrap();
    journal.toggle_tag(PsychologyTag::FollowingPlan).unwrap();
    let trade = journal.commit_trade().unwrap();

    // 서울 6월 1일 00:30 = UTC 5월 31일 15:30
    assert_eq!(
        trade.entry_date,
        Utc.with_ymd_and_hms(2024, 5, 31, 15, 30, 0).unwrap()
    );

    let june_first = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    assert_eq!(journal.trades_on(june_first).len(), 1);
    assert_eq!(journal.daily_pnl()[&june_first], dec!(30));

    let june = YearMonth::new(2024, 6).unwrap();
    assert_eq!(journal.weekly_pnl(june)[&0], dec!(30));
    assert!(journal
        .weekly_pnl(YearMonth::new(2024, 5).unwrap())
        .values()
        .all(Decimal::is_zero));
}

#[test]
fn test_wrong_stage_operations_are_transition_errors() {
    let mut journal = sample_journal();
    let err = journal.toggle_tag(PsychologyTag::Greed).unwrap_err();
    assert!(matches!(err, JournalError::InvalidTransition { .. }));
    assert!(err.is_recoverable());

    journal.begin_trade_intake().unwrap();
    assert!(journal.begin_trade_intake().is_err());
    assert!(journal.cancel_intake());
    assert!(journal.begin_trade_intake().is_ok());
}

#[test]
fn test_month_navigation_and_grid() {
    let dec_2024 = YearMonth::new(2024, 12).unwrap();
    let jan_2025 = dec_2024.next().unwrap();
    assert_eq!(jan_2025.to_string(), "2025-01");
    assert_eq!(jan_2025.prev(), Some(dec_2024));

    // 2025-01-01은 수요일
    let grid = calendar_days(jan_2025);
    assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 3);
    assert_eq!(grid.iter().flatten().count(), 31);

    assert!(matches!(
        "2024/05".parse::<YearMonth>(),
        Err(JournalError::MalformedYearMonth(_))
    ));
}

#[test]
fn test_open_trade_in_snapshot() {
    let json = r#"[
        {"id": 1, "pair": "EUR/USD", "side": "buy", "pnl": 50,
         "entryDate": "2024-05-02T10:00:00Z", "psychologyTags": ["Discipline"]},
        {"id": 2, "pair": "EUR/USD", "side": "buy", "pnl": null,
         "entryDate": "2024-05-02T11:00:00Z"}
    ]"#;
    let trades = load_trades_json(json, Tz::UTC).unwrap();
    let journal = Journal::with_trades(trades, Tz::UTC).unwrap();

    let stats = journal.statistics();
    assert_eq!(stats.total_trades, 2);
    assert_eq!(stats.open_trades, 1);
    assert_eq!(stats.win_rate, dec!(50.0));
    assert_eq!(stats.avg_trade, dec!(25.00));

    let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    assert_eq!(journal.trades_on(date).len(), 2);
    assert_eq!(journal.daily_pnl()[&date], dec!(50));

    let formatted: Vec<_> = journal.trades().iter().map(|t| format_pnl(t.pnl)).collect();
    assert_eq!(formatted, vec!["$50.00", "Open"]);
}

#[test]
fn test_oversized_pnl_snapshot_rejected() {
    let json = r#"[
        {"id": 1, "pair": "EUR/USD", "side": "buy", "pnl": "70000000000000000000000000000",
         "entryDate": "2024-05-02T10:00:00Z", "psychologyTags": ["Discipline"]},
        {"id": 2, "pair": "EUR/USD", "side": "buy", "pnl": "70000000000000000000000000000",
         "entryDate": "2024-05-02T11:00:00Z", "psychologyTags": ["Patience"]}
    ]"#;
    assert!(matches!(
        load_trades_json(json, Tz::UTC),
        Err(JournalError::DataIntegrity { trade_id: 1, .. })
    ));
}

#[test]
fn test_commit_after_largest_id_is_rejected() {
    let json = r#"[
        {"id": 18446744073709551615, "pair": "EUR/USD", "side": "buy", "pnl": 10,
         "entryDate": "2024-05-02T10:00:00Z", "psychologyTags": ["Patience"]}
    ]"#;
    let trades = load_trades_json(json, Tz::UTC).unwrap();
    let mut journal = Journal::with_trades(trades, Tz::UTC).unwrap();

    journal.begin_trade_intake().unwrap();
    journal.submit_facts(loss_form()).unwrap();
    journal.toggle_tag_label("FOMO").unwrap();

    let err = journal.commit_trade().unwrap_err();
    assert!(matches!(
        err,
        JournalError::DataIntegrity { trade_id: u64::MAX, .. }
    ));
    assert!(matches!(
        journal.intake_stage(),
        IntakeStage::SelectingPsychology(_)
    ));
    assert_eq!(journal.trades().len(), 1);

    assert!(journal.cancel_intake());
    assert_eq!(journal.statistics().total_pnl, dec!(10));
}
