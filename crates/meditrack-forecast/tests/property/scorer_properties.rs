use meditrack_core::models::{
    Climate, ClimateFactors, Conditions, Medicine, Season, SeasonalTrend,
};
use meditrack_forecast::{DemandScorer, HighRiskCategories, RiskTables};
use proptest::prelude::*;

fn arb_season() -> impl Strategy<Value = Season> {
    prop_oneof![
        Just(Season::Winter),
        Just(Season::Spring),
        Just(Season::Summer),
        Just(Season::Fall),
    ]
}

fn arb_climate() -> impl Strategy<Value = Climate> {
    prop_oneof![
        Just(Climate::Rainy),
        Just(Climate::Dry),
        Just(Climate::Cold),
        Just(Climate::Hot),
    ]
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Analgesics".to_string()),
        Just("Vitamins".to_string()),
        Just("Rehydration".to_string()),
        Just("Dermatology".to_string()),
        Just("Moisturizers".to_string()),
    ]
}

fn medicine(
    category: String,
    seasonal: Option<f64>,
    climate: Option<f64>,
    season: Season,
    clim: Climate,
) -> Medicine {
    let mut m = Medicine::new("Probe", category, 10, 10);
    if let Some(f) = seasonal {
        let mut trend = SeasonalTrend::default();
        match season {
            Season::Winter => trend.winter = f,
            Season::Spring => trend.spring = f,
            Season::Summer => trend.summer = f,
            Season::Fall => trend.fall = f,
        }
        m = m.with_seasonal_trend(trend);
    }
    if let Some(f) = climate {
        let mut factors = ClimateFactors::default();
        match clim {
            Climate::Rainy => factors.rainy = f,
            Climate::Dry => factors.dry = f,
            Climate::Cold => factors.cold = f,
            Climate::Hot => factors.hot = f,
        }
        m = m.with_climate_factors(factors);
    }
    m
}

// ── Multiplier is the product of the applicable factors ─────────────────

proptest! {
    #[test]
    fn multiplier_is_product_of_factors(
        season in arb_season(),
        climate in arb_climate(),
        category in arb_category(),
        seasonal in proptest::option::of(0.1f64..5.0),
        clim in proptest::option::of(0.1f64..5.0),
    ) {
        let tables = RiskTables::default();
        let high_risk = tables.high_risk_categories(season, climate);
        let m = medicine(category.clone(), seasonal, clim, season, climate);
        let score = DemandScorer::default().score(&m, &Conditions { season, climate }, &high_risk);

        let mut expected = seasonal.unwrap_or(1.0) * clim.unwrap_or(1.0);
        if high_risk.contains(&category) {
            expected *= 1.5;
        }
        prop_assert!((score.multiplier - expected).abs() < 1e-9,
            "multiplier {} != {}", score.multiplier, expected);
    }
}

// ── Reasons: one per factor above 1.2, plus the boost, in fixed order ───

proptest! {
    #[test]
    fn reasons_follow_factors_in_order(
        season in arb_season(),
        climate in arb_climate(),
        category in arb_category(),
        seasonal in 0.1f64..5.0,
        clim in 0.1f64..5.0,
    ) {
        let high_risk = RiskTables::default().high_risk_categories(season, climate);
        let m = medicine(category.clone(), Some(seasonal), Some(clim), season, climate);
        let score = DemandScorer::default().score(&m, &Conditions { season, climate }, &high_risk);

        let mut expected_prefixes = Vec::new();
        if seasonal > 1.2 {
            expected_prefixes.push("Seasonal factor");
        }
        if clim > 1.2 {
            expected_prefixes.push("Climate factor");
        }
        if high_risk.contains(&category) {
            expected_prefixes.push("High-risk category");
        }
        prop_assert_eq!(score.reasons.len(), expected_prefixes.len());
        for (reason, prefix) in score.reasons.iter().zip(expected_prefixes) {
            prop_assert!(reason.starts_with(prefix), "{} !~ {}", reason, prefix);
        }
    }
}

// ── No ceiling, never below zero ────────────────────────────────────────

proptest! {
    #[test]
    fn multiplier_is_positive_and_uncapped(
        seasonal in 1.0f64..50.0,
        clim in 1.0f64..50.0,
    ) {
        let conditions = Conditions { season: Season::Winter, climate: Climate::Cold };
        let high_risk: HighRiskCategories = ["Analgesics"].into_iter().collect();
        let m = medicine("Analgesics".into(), Some(seasonal), Some(clim), Season::Winter, Climate::Cold);
        let score = DemandScorer::default().score(&m, &conditions, &high_risk);
        prop_assert!(score.multiplier > 0.0);
        prop_assert!(score.multiplier >= seasonal * clim);
    }
}
