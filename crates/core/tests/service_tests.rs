// ═══════════════════════════════════════════════════════════════════
// Service Tests: AnalyticsService, ChartService
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use stock_dashboard_core::errors::CoreError;
use stock_dashboard_core::models::chart::TimeRange;
use stock_dashboard_core::models::position::Position;
use stock_dashboard_core::services::analytics_service::{
    AnalyticsService, MOCK_ANNUALIZED_RETURN_PCT, MOCK_YTD_RETURN_PCT,
};
use stock_dashboard_core::services::chart_service::ChartService;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn holdings() -> Vec<Position> {
    vec![
        Position::new("1", "AAPL", "Apple Inc.", 15.0, 145.75),
        Position::new("2", "MSFT", "Microsoft Corporation", 10.0, 287.65),
        Position::new("3", "aapl", "Apple Inc. (second lot)", 5.0, 180.0),
    ]
}

fn prices() -> HashMap<String, f64> {
    HashMap::from([("AAPL".to_string(), 200.0), ("MSFT".to_string(), 400.0)])
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService: pricing
// ═══════════════════════════════════════════════════════════════════

mod analytics_pricing {
    use super::*;

    #[test]
    fn unique_symbols_first_seen_order() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.unique_symbols(&holdings()), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn unique_symbols_empty() {
        let svc = AnalyticsService::new();
        assert!(svc.unique_symbols(&[]).is_empty());
    }

    #[test]
    fn apply_prices_sets_value_and_gain() {
        let svc = AnalyticsService::new();
        let priced = svc.apply_prices(&holdings(), &prices(), "Test Quotes").unwrap();
        assert_eq!(priced.len(), 3);
        for p in &priced {
            assert!((p.value - p.shares * p.current_price).abs() < 1e-9);
            assert!((p.gain - p.shares * (p.current_price - p.avg_cost)).abs() < 1e-9);
        }
        assert_eq!(priced[2].symbol, "AAPL");
        assert_eq!(priced[2].current_price, 200.0);
    }

    #[test]
    fn apply_prices_does_not_touch_input() {
        let svc = AnalyticsService::new();
        let input = holdings();
        let _ = svc.apply_prices(&input, &prices(), "Test Quotes").unwrap();
        assert!(input.iter().all(|p| p.current_price == 0.0));
    }

    #[test]
    fn missing_quote_fails_whole_batch() {
        let svc = AnalyticsService::new();
        let only_apple = HashMap::from([("AAPL".to_string(), 200.0)]);
        let err = svc.apply_prices(&holdings(), &only_apple, "Test Quotes").unwrap_err();
        assert!(matches!(err, CoreError::MarketData { .. }));
        assert!(err.to_string().contains("MSFT"));
        assert!(err.to_string().contains("(Test Quotes)"));
    }

    #[test]
    fn non_finite_quote_rejected() {
        let svc = AnalyticsService::new();
        let bad = HashMap::from([("AAPL".to_string(), f64::NAN), ("MSFT".to_string(), 1.0)]);
        assert!(svc.apply_prices(&holdings(), &bad, "Test Quotes").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService: allocation & totals
// ═══════════════════════════════════════════════════════════════════

mod analytics_allocation {
    use super::*;

    #[test]
    fn allocations_sum_to_hundred() {
        let svc = AnalyticsService::new();
        let mut priced = svc.apply_prices(&holdings(), &prices(), "Test Quotes").unwrap();
        svc.calculate_allocations(&mut priced);
        let sum: f64 = priced.iter().map(|p| p.allocation).sum();
        assert!((sum - 100.0).abs() < 1e-6);
        // 3000 / 8000, 4000 / 8000, 1000 / 8000
        assert!((priced[0].allocation - 37.5).abs() < 1e-9);
        assert!((priced[1].allocation - 50.0).abs() < 1e-9);
        assert!((priced[2].allocation - 12.5).abs() < 1e-9);
    }

    #[test]
    fn allocations_of_empty_list() {
        let svc = AnalyticsService::new();
        let mut empty: Vec<Position> = Vec::new();
        svc.calculate_allocations(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn zero_total_gives_zero_allocations() {
        let svc = AnalyticsService::new();
        let mut unpriced = holdings();
        svc.calculate_allocations(&mut unpriced);
        assert!(unpriced.iter().all(|p| p.allocation == 0.0 && p.allocation.is_finite()));
    }

    #[test]
    fn totals_from_priced_positions() {
        let svc = AnalyticsService::new();
        let priced = svc.apply_prices(&holdings(), &prices(), "Test Quotes").unwrap();
        let totals = svc.totals(&priced);
        let cost = 15.0 * 145.75 + 10.0 * 287.65 + 5.0 * 180.0;
        assert_eq!(totals.position_count, 3);
        assert!((totals.total_value - 8000.0).abs() < 1e-9);
        assert!((totals.total_cost - cost).abs() < 1e-9);
        assert!((totals.total_return - (8000.0 - cost)).abs() < 1e-9);
        assert!((totals.total_return_percent - (8000.0 - cost) / cost * 100.0).abs() < 1e-9);
    }

    #[test]
    fn totals_of_empty_list() {
        let totals = AnalyticsService::new().totals(&[]);
        assert_eq!(totals.position_count, 0);
        assert_eq!(totals.total_value, 0.0);
        assert_eq!(totals.total_return_percent, 0.0);
    }

    #[test]
    fn breakdown_sorted_largest_first() {
        let svc = AnalyticsService::new();
        let mut priced = svc.apply_prices(&holdings(), &prices(), "Test Quotes").unwrap();
        svc.calculate_allocations(&mut priced);
        let breakdown = svc.allocation_breakdown(&priced);
        let symbols: Vec<&str> = breakdown.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL", "AAPL"]);
        assert!(breakdown.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService: performance
// ═══════════════════════════════════════════════════════════════════

mod analytics_performance {
    use super::*;

    #[test]
    fn performance_uses_fixed_return_figures() {
        let svc = AnalyticsService::new();
        let priced = svc.apply_prices(&holdings(), &prices(), "Test Quotes").unwrap();
        let perf = svc.performance(&priced, 0.01);
        assert!((perf.total_value - 8000.0).abs() < 1e-9);
        assert!((perf.day_change - 80.0).abs() < 1e-9);
        assert!((perf.day_change_percent - 1.0).abs() < 1e-9);
        assert!((perf.ytd_return - 8000.0 * 0.15).abs() < 1e-9);
        assert_eq!(perf.ytd_return_percent, MOCK_YTD_RETURN_PCT);
        assert_eq!(perf.annualized_return_percent, MOCK_ANNUALIZED_RETURN_PCT);
    }

    #[test]
    fn performance_of_empty_list_is_zero() {
        let perf = AnalyticsService::new().performance(&[], 0.02);
        assert_eq!(perf.total_value, 0.0);
        assert_eq!(perf.day_change, 0.0);
        assert_eq!(perf.day_change_percent, 0.0);
        assert_eq!(perf.total_return_percent, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService: base tables
// ═══════════════════════════════════════════════════════════════════

mod chart_tables {
    use super::*;

    #[test]
    fn table_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let tables = ChartService::new().generate_tables(&mut rng, date(2024, 6, 15));
        assert_eq!(tables.daily.len(), 30);
        assert_eq!(tables.weekly.len(), 12);
        assert_eq!(tables.monthly.len(), 12);
        assert_eq!(tables.five_year.len(), 60);
        assert_eq!(tables.all_time.len(), 120);
    }

    #[test]
    fn every_table_ends_at_as_of() {
        let as_of = date(2024, 6, 15);
        let mut rng = StdRng::seed_from_u64(2);
        let tables = ChartService::new().generate_tables(&mut rng, as_of);
        for table in [&tables.daily, &tables.weekly, &tables.monthly, &tables.five_year, &tables.all_time] {
            assert_eq!(table.last().unwrap().date, as_of);
            assert!(table.windows(2).all(|w| w[0].date < w[1].date));
        }
    }

    #[test]
    fn labels_follow_granularity() {
        let mut rng = StdRng::seed_from_u64(3);
        let tables = ChartService::new().generate_tables(&mut rng, date(2024, 6, 15));
        assert_eq!(tables.daily.last().unwrap().label, "6/15");
        assert_eq!(tables.daily[0].label, "5/17");
        assert_eq!(tables.weekly[0].label, "Week 1");
        assert_eq!(tables.weekly[11].label, "Week 12");
        assert_eq!(tables.monthly.last().unwrap().label, "Jun");
        assert_eq!(tables.monthly[0].label, "Jul");
        assert_eq!(tables.five_year.last().unwrap().label, "Jun 2024");
        assert_eq!(tables.all_time[0].label, "Jul 2014");
    }

    #[test]
    fn short_ranges_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(4);
        let tables = ChartService::new().generate_tables(&mut rng, date(2024, 1, 31));
        for (i, p) in tables.daily.iter().enumerate() {
            let floor = 130.0 + i as f64 * 0.5;
            assert!(p.portfolio >= floor && p.portfolio <= floor + 1.5 + 0.01);
        }
        for (i, p) in tables.monthly.iter().enumerate() {
            let floor = 100.0 + i as f64 * 2.0;
            assert!(p.sp500 >= floor && p.sp500 <= floor + 3.0 + 0.01);
        }
    }

    #[test]
    fn same_seed_same_tables() {
        let svc = ChartService::new();
        let a = svc.generate_tables(&mut StdRng::seed_from_u64(9), date(2024, 3, 1));
        let b = svc.generate_tables(&mut StdRng::seed_from_u64(9), date(2024, 3, 1));
        assert_eq!(a.daily, b.daily);
        assert_eq!(a.all_time, b.all_time);
    }

    #[test]
    fn month_end_dates_clamp() {
        let mut rng = StdRng::seed_from_u64(5);
        let tables = ChartService::new().generate_tables(&mut rng, date(2024, 3, 31));
        // February has no 31st
        assert!(tables.monthly.iter().any(|p| p.date == date(2024, 2, 29)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService: market cycles
// ═══════════════════════════════════════════════════════════════════

mod chart_cycles {
    use super::*;

    #[test]
    fn cycle_length_matches_years() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = ChartService::new().generate_market_cycles(&mut rng, date(2024, 6, 1), 3);
        assert_eq!(points.len(), 36);
    }

    #[test]
    fn tracks_stay_positive() {
        let mut rng = StdRng::seed_from_u64(12);
        let points = ChartService::new().generate_market_cycles(&mut rng, date(2024, 6, 1), 10);
        assert!(points
            .iter()
            .all(|p| p.portfolio > 0.0 && p.sp500 > 0.0 && p.nasdaq > 0.0 && p.dow > 0.0));
    }

    #[test]
    fn first_month_is_a_rising_month() {
        // Month 0 rises 1.0–1.8% for the S&P track and a shock drops at
        // most 15%, so the first point stays within these bounds.
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = ChartService::new().generate_market_cycles(&mut rng, date(2024, 6, 1), 1);
            let first = &points[0];
            assert!(first.sp500 <= 101.8 + 0.01);
            assert!(first.sp500 >= 101.0 * 0.85 - 0.01);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService: scaling
// ═══════════════════════════════════════════════════════════════════

mod chart_scaling {
    use super::*;

    fn priced_holdings() -> Vec<Position> {
        vec![
            Position::new("1", "AAPL", "Apple Inc.", 10.0, 100.0).priced(150.0),
            Position::new("2", "MSFT", "Microsoft Corporation", 5.0, 300.0).priced(350.0),
        ]
    }

    #[test]
    fn last_point_equals_total_value() {
        let svc = ChartService::new();
        let tables = svc.generate_tables(&mut StdRng::seed_from_u64(21), date(2024, 6, 15));
        for range in TimeRange::ALL_RANGES {
            let base = svc.base_series(&tables, range);
            let scaled = svc.scale_to_portfolio(base, &priced_holdings());
            assert_eq!(scaled.len(), range.point_count());
            assert!((scaled.last().unwrap().value - 3250.0).abs() < 0.01, "range {range}");
        }
    }

    #[test]
    fn benchmark_is_weighted_sp500() {
        let svc = ChartService::new();
        let tables = svc.generate_tables(&mut StdRng::seed_from_u64(22), date(2024, 6, 15));
        let base = svc.base_series(&tables, TimeRange::OneYear);
        let scaled = svc.scale_to_portfolio(base, &priced_holdings());
        let last = base.last().unwrap();
        let scale = 3250.0 / (last.portfolio * 100.0);
        for (b, s) in base.iter().zip(&scaled) {
            let expected = b.sp500 * 100.0 * scale * 0.8;
            assert!((s.benchmark_value - expected).abs() < 0.01);
            assert_eq!(s.label, b.label);
            assert_eq!(s.date, b.date);
        }
    }

    #[test]
    fn empty_portfolio_gives_zero_series() {
        let svc = ChartService::new();
        let tables = svc.generate_tables(&mut StdRng::seed_from_u64(23), date(2024, 6, 15));
        let scaled = svc.scale_to_portfolio(svc.base_series(&tables, TimeRange::OneMonth), &[]);
        assert_eq!(scaled.len(), 30);
        assert!(scaled.iter().all(|p| p.value == 0.0 && p.benchmark_value == 0.0));
    }

    #[test]
    fn six_months_is_tail_of_one_year() {
        let svc = ChartService::new();
        let tables = svc.generate_tables(&mut StdRng::seed_from_u64(24), date(2024, 6, 15));
        let year = svc.base_series(&tables, TimeRange::OneYear);
        let half = svc.base_series(&tables, TimeRange::SixMonths);
        assert_eq!(half, &year[6..]);
    }
}
