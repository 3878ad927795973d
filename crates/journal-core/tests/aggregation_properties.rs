//! 집계 불변식 속성 테스트 (proptest)

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use journal_core::{
    calendar_days, daily_pnl, week_count, weekly_pnl, Journal, JournalStatistics,
    PsychologyInsights, Side, TagVocabulary, Trade, TradeForm, YearMonth,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// (손익 센트, 2024년 기준 경과 시간, 태그 선택 비트)
type RawTrade = (Option<i64>, i64, u8);

fn raw_trades() -> impl Strategy<Value = Vec<RawTrade>> {
    prop::collection::vec(
        (
            prop::option::weighted(0.85, -50_000i64..50_000),
            0i64..(24 * 400),
            any::<u8>(),
        ),
        0..40,
    )
}

fn build(raw: &[RawTrade]) -> Vec<Trade> {
    let origin = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    raw.iter()
        .enumerate()
        .map(|(i, &(cents, hours, bits))| {
            let pnl = cents.map(|c| Decimal::new(c, 2));
            let vocabulary = TagVocabulary::for_pnl(pnl.unwrap_or_default());
            let mut tags: Vec<_> = vocabulary
                .tags()
                .iter()
                .enumerate()
                .filter(|(bit, _)| bits & (1 << bit) != 0)
                .map(|(_, tag)| *tag)
                .collect();
            if tags.is_empty() {
                tags.push(vocabulary.tags()[0]);
            }

            Trade {
                id: i as u64 + 1,
                pair: "EUR/USD".to_string(),
                side: if i % 2 == 0 { Side::Buy } else { Side::Sell },
                pnl,
                stop_loss: None,
                take_profit: None,
                lot_size: None,
                entry_price: None,
                exit_price: None,
                notes: None,
                entry_date: origin + Duration::hours(hours),
                psychology_tags: tags,
                psychology_notes: None,
            }
        })
        .collect()
}

fn zones() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(chrono_tz::Asia::Seoul),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Pacific::Auckland),
    ]
}

fn months() -> impl Strategy<Value = YearMonth> {
    (1900i32..2100, 1u32..=12).prop_map(|(y, m)| YearMonth::new(y, m).unwrap())
}

proptest! {
    #[test]
    fn statistics_bounds(raw in raw_trades()) {
        let trades = build(&raw);
        let stats = JournalStatistics::from_trades(&trades);

        prop_assert_eq!(stats.total_trades, trades.len());
        prop_assert!(stats.win_rate >= Decimal::ZERO);
        prop_assert!(stats.win_rate <= Decimal::ONE_HUNDRED);
        if stats.winning_trades == 0 {
            prop_assert!(stats.win_rate.is_zero());
        }
        prop_assert_eq!(
            stats.winning_trades + stats.losing_trades + stats.open_trades + stats.breakeven_trades(),
            stats.total_trades
        );

        let expected: Decimal = trades.iter().filter_map(|t| t.pnl).sum();
        prop_assert_eq!(stats.total_pnl, expected);
    }

    #[test]
    fn daily_totals_sum_to_total_pnl(raw in raw_trades(), tz in zones()) {
        let trades = build(&raw);
        let daily = daily_pnl(&trades, tz);
        let stats = JournalStatistics::from_trades(&trades);

        prop_assert_eq!(daily.values().copied().sum::<Decimal>(), stats.total_pnl);
    }

    #[test]
    fn grid_shape(month in months()) {
        let grid = calendar_days(month);
        let blanks = grid.iter().take_while(|c| c.is_none()).count();

        prop_assert_eq!(blanks, month.first_day().weekday().num_days_from_sunday() as usize);
        prop_assert!(blanks < 7);
        prop_assert_eq!(grid.iter().flatten().count(), month.days_in_month() as usize);
        prop_assert!(grid[blanks..].iter().all(Option::is_some));

        let dates: Vec<NaiveDate> = grid.iter().flatten().copied().collect();
        prop_assert!(dates.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
        prop_assert!(dates.iter().all(|d| month.contains(*d)));
    }

    #[test]
    fn weekly_totals_match_month(raw in raw_trades(), tz in zones(), m in 1u32..=12) {
        let trades = build(&raw);
        let month = YearMonth::new(2024, m).unwrap();

        let weekly = weekly_pnl(&trades, month, tz);
        let in_month: Decimal = daily_pnl(&trades, tz)
            .iter()
            .filter(|(date, _)| month.contains(**date))
            .map(|(_, pnl)| *pnl)
            .sum();

        prop_assert_eq!(weekly.len(), week_count(month));
        prop_assert_eq!(weekly.values().copied().sum::<Decimal>(), in_month);
    }

    #[test]
    fn insight_percentages_bounded(raw in raw_trades()) {
        let trades = build(&raw);
        let insights = PsychologyInsights::from_trades(&trades);

        for (list, partition) in [
            (&insights.win_insights, insights.total_wins),
            (&insights.loss_insights, insights.total_losses),
        ] {
            for insight in list {
                prop_assert!(insight.count >= 1);
                prop_assert!(insight.count <= partition);
                prop_assert!(insight.percentage > Decimal::ZERO);
                prop_assert!(insight.percentage <= Decimal::ONE_HUNDRED);
            }
            prop_assert!(list.windows(2).all(|w| w[0].percentage >= w[1].percentage));
        }
    }

    #[test]
    fn breakeven_counts_only_in_totals(raw in raw_trades()) {
        let mut trades = build(&raw);
        let before_stats = JournalStatistics::from_trades(&trades);
        let before_insights = PsychologyInsights::from_trades(&trades);

        let mut flat = build(&[(Some(0), 12, 1)]).remove(0);
        flat.id = trades.len() as u64 + 1;
        trades.push(flat);

        let stats = JournalStatistics::from_trades(&trades);
        let insights = PsychologyInsights::from_trades(&trades);

        prop_assert_eq!(stats.total_trades, before_stats.total_trades + 1);
        prop_assert_eq!(stats.winning_trades, before_stats.winning_trades);
        prop_assert_eq!(stats.total_pnl, before_stats.total_pnl);
        prop_assert_eq!(insights, before_insights);
    }

    #[test]
    fn committed_date_round_trips(
        day_offset in 0i64..730,
        hour in 0u32..24,
        minute in 0u32..60,
        tz in prop_oneof![Just(Tz::UTC), Just(chrono_tz::Asia::Seoul), Just(chrono_tz::Asia::Kolkata)],
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(day_offset);
        let mut journal = Journal::new(tz);

        journal.begin_trade_intake().unwrap();
        journal.submit_facts(TradeForm {
            pair: "EUR/USD".to_string(),
            side: "buy".to_string(),
            pnl: "1".to_string(),
            entry_date: format!("{}T{:02}:{:02}", date, hour, minute),
            ..Default::default()
        }).unwrap();
        journal.toggle_tag_label("Patience").unwrap();
        let trade = journal.commit_trade().unwrap();

        prop_assert_eq!(trade.entry_day(tz), date);
        prop_assert_eq!(journal.trades_on(date).len(), 1);
    }
}
