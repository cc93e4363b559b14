use chrono::{TimeZone, Utc};
use meditrack_core::models::*;

// ── Medicine deserialization ─────────────────────────────────────────────

#[test]
fn missing_factor_keys_default_to_neutral() {
    let json = r#"{
        "id": "m1",
        "name": "Paracetamol 500mg",
        "category": "Analgesics",
        "currentStock": 40,
        "demandFactors": {
            "seasonal": true,
            "seasonalTrend": { "winter": 2.0 },
            "climateDependent": true,
            "climateFactors": {}
        }
    }"#;
    let medicine: Medicine = serde_json::from_str(json).unwrap();
    assert_eq!(medicine.min_stock_level, 10);
    assert_eq!(medicine.demand_factors.seasonal_trend.factor(Season::Winter), 2.0);
    assert_eq!(medicine.demand_factors.seasonal_trend.factor(Season::Summer), 1.0);
    for climate in Climate::ALL {
        assert_eq!(medicine.demand_factors.climate_factors.factor(climate), 1.0);
    }
}

#[test]
fn null_factors_read_back_neutral() {
    let json = r#"{
        "id": "m3",
        "name": "Vitamin C 1000mg",
        "category": "Vitamins",
        "currentStock": 100,
        "demandFactors": {
            "seasonal": true,
            "seasonalTrend": { "winter": null, "summer": 1.5 },
            "climateFactors": { "hot": null }
        }
    }"#;
    let medicine: Medicine = serde_json::from_str(json).unwrap();
    assert_eq!(medicine.demand_factors.seasonal_trend.winter, 1.0);
    assert_eq!(medicine.demand_factors.seasonal_trend.summer, 1.5);
    assert_eq!(medicine.demand_factors.climate_factors.hot, 1.0);
}

#[test]
fn infinite_factor_survives_a_json_round_trip() {
    let mut medicine = Medicine::new("Vitamin C 1000mg", "Vitamins", 100, 20);
    medicine.demand_factors.seasonal_trend.winter = f64::INFINITY;
    let json = serde_json::to_string(&medicine).unwrap();
    let back: Medicine = serde_json::from_str(&json).unwrap();
    assert_eq!(back.demand_factors.seasonal_trend.winter, 1.0);
    assert_eq!(back.name, medicine.name);
}

#[test]
fn missing_demand_factors_block_is_neutral_and_disabled() {
    let json = r#"{"id":"m2","name":"ORS","category":"Rehydration","currentStock":3,"minStockLevel":5}"#;
    let medicine: Medicine = serde_json::from_str(json).unwrap();
    assert!(!medicine.demand_factors.seasonal);
    assert!(!medicine.demand_factors.climate_dependent);
    assert!(medicine.expiry_date.is_none());
}

#[test]
fn stock_predicates() {
    let at_min = Medicine::new("A", "Vitamins", 20, 20);
    assert!(at_min.is_low_stock());
    assert!(!at_min.is_well_stocked(2.0));

    let double = Medicine::new("B", "Vitamins", 40, 20);
    assert!(!double.is_low_stock());
    // Exactly 2x minimum is not "well stocked".
    assert!(!double.is_well_stocked(2.0));

    let plenty = Medicine::new("C", "Vitamins", 41, 20);
    assert!(plenty.is_well_stocked(2.0));
}

// ── Enum string forms ────────────────────────────────────────────────────

#[test]
fn alert_enums_parse_their_own_strings() {
    for t in AlertType::ALL {
        assert_eq!(t.as_str().parse::<AlertType>().unwrap(), t);
    }
    for s in AlertStatus::ALL {
        assert_eq!(s.as_str().parse::<AlertStatus>().unwrap(), s);
    }
    for s in Severity::ALL {
        assert_eq!(s.as_str().parse::<Severity>().unwrap(), s);
    }
    assert!("urgent".parse::<Severity>().is_err());
    assert!("autumn".parse::<Season>().is_err());
}

#[test]
fn alert_type_serializes_snake_case() {
    let json = serde_json::to_string(&AlertType::HighDemandPredicted).unwrap();
    assert_eq!(json, "\"high_demand_predicted\"");
}

#[test]
fn defaults_match_alert_schema() {
    assert_eq!(Severity::default(), Severity::Medium);
    assert_eq!(AlertStatus::default(), AlertStatus::New);
    assert!(AlertStatus::New.is_unresolved());
    assert!(AlertStatus::Read.is_unresolved());
    assert!(!AlertStatus::Resolved.is_unresolved());
}

// ── Drafts and filters ───────────────────────────────────────────────────

#[test]
fn draft_materializes_as_new_alert() {
    let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
    let draft = AlertDraft::new("m1", AlertType::LowStock, "Low stock", Severity::High);
    let alert = draft.clone().into_alert(now);
    assert_eq!(alert.status, AlertStatus::New);
    assert_eq!(alert.created_at, now);
    assert_eq!(alert.updated_at, now);
    assert!(alert.resolved_by.is_none());
    assert_eq!(alert.to_draft(), draft);
    assert!(!alert.id.is_empty());
}

#[test]
fn alert_wire_format_uses_type_key() {
    let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
    let alert = AlertDraft::new("m1", AlertType::Expiry, "x", Severity::Medium).into_alert(now);
    let value = serde_json::to_value(&alert).unwrap();
    assert_eq!(value["type"], "expiry");
    assert_eq!(value["medicineId"], "m1");
    assert_eq!(value["status"], "new");
}

#[test]
fn filter_matches_on_every_set_field() {
    let now = Utc::now();
    let alert = AlertDraft::new("m1", AlertType::Expiry, "x", Severity::High).into_alert(now);

    assert!(AlertFilter::default().matches(&alert));
    assert!(AlertFilter::unresolved().matches(&alert));
    assert!(AlertFilter::default().with_type(AlertType::Expiry).matches(&alert));
    assert!(!AlertFilter::default().with_type(AlertType::LowStock).matches(&alert));
    assert!(!AlertFilter::default().with_severity(Severity::Low).matches(&alert));
    assert!(!AlertFilter::default()
        .with_status(AlertStatus::Resolved)
        .matches(&alert));
}

#[test]
fn generation_report_omits_absent_error() {
    let ok = serde_json::to_value(GenerationReport::succeeded(4, 2)).unwrap();
    assert_eq!(ok["success"], true);
    assert_eq!(ok["count"], 4);
    assert!(ok.get("error").is_none());

    let failed = GenerationReport::failed("store offline");
    assert!(!failed.success);
    assert_eq!(failed.error.as_deref(), Some("store offline"));
}

#[test]
fn conditions_display_as_season_slash_climate() {
    let conditions = Conditions {
        season: Season::Winter,
        climate: Climate::Cold,
    };
    assert_eq!(conditions.to_string(), "winter/cold");
}
