use chrono::{Duration, TimeZone, Utc};
use meditrack_alerts::passes::{expiry, low_stock, ExpiryPolicy};
use meditrack_alerts::AlertSynthesizer;
use meditrack_core::config::AlertConfig;
use meditrack_core::models::{AlertType, Medicine, Severity};
use proptest::prelude::*;

fn arb_medicine() -> impl Strategy<Value = Medicine> {
    (
        0u32..200,
        0u32..100,
        prop_oneof![
            Just("Analgesics"),
            Just("Vitamins"),
            Just("Dermatology"),
            Just("Rehydration"),
        ],
        proptest::option::of(-5i64..60),
    )
        .prop_map(|(stock, min, category, expiry_days)| {
            let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
            let mut m = Medicine::new(format!("{category}-{stock}-{min}"), category, stock, min);
            if let Some(days) = expiry_days {
                m = m.with_expiry(now + Duration::days(days));
            }
            m
        })
}

// ── Low stock: exactly the medicines at or below minimum ────────────────

proptest! {
    #[test]
    fn low_stock_covers_exactly_low_medicines(meds in proptest::collection::vec(arb_medicine(), 0..30)) {
        let drafts = low_stock::detect(&meds);
        let expected: Vec<&str> = meds
            .iter()
            .filter(|m| m.current_stock <= m.min_stock_level)
            .map(|m| m.id.as_str())
            .collect();
        let got: Vec<&str> = drafts.iter().map(|d| d.medicine_id.as_str()).collect();
        prop_assert_eq!(got, expected);

        for d in &drafts {
            let m = meds.iter().find(|m| m.id == d.medicine_id).unwrap();
            let high = 2 * m.current_stock <= m.min_stock_level;
            prop_assert_eq!(d.severity == Severity::High, high);
        }
    }
}

// ── Expiry: exactly the medicines inside the window ─────────────────────

proptest! {
    #[test]
    fn expiry_covers_window(meds in proptest::collection::vec(arb_medicine(), 0..30)) {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let policy = ExpiryPolicy::on_demand(&AlertConfig::default());
        let drafts = expiry::detect(&meds, now, policy);
        let expected = meds
            .iter()
            .filter(|m| m.expiry_date.is_some_and(|e| e >= now && e <= now + Duration::days(30)))
            .count();
        prop_assert_eq!(drafts.len(), expected);

        for d in &drafts {
            let m = meds.iter().find(|m| m.id == d.medicine_id).unwrap();
            let days = expiry::days_to_expiry(m.expiry_date.unwrap(), now);
            prop_assert_eq!(d.severity == Severity::High, days < 15);
        }
    }
}

// ── Synthesizer: no duplicate (medicine, type) in one batch ─────────────

proptest! {
    #[test]
    fn batch_has_one_draft_per_medicine_and_type(meds in proptest::collection::vec(arb_medicine(), 0..30)) {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let drafts = AlertSynthesizer::default().synthesize(&meds, now);
        let mut seen = std::collections::HashSet::new();
        for d in &drafts {
            prop_assert!(seen.insert((d.medicine_id.clone(), d.alert_type)),
                "duplicate {:?} for {}", d.alert_type, d.medicine_id);
        }
        // Recommendations only target low-stock medicines.
        for d in drafts.iter().filter(|d| d.alert_type == AlertType::RecommendedStock) {
            let m = meds.iter().find(|m| m.id == d.medicine_id).unwrap();
            prop_assert!(m.is_low_stock());
        }
    }
}
