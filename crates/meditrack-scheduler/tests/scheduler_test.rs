//! Scheduler start and stop on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use meditrack_alerts::AlertEngine;
use meditrack_core::config::SchedulerConfig;
use meditrack_core::errors::{ConfigError, MediTrackError};
use meditrack_core::models::{AlertFilter, AlertType, Medicine};
use meditrack_core::MediTrackConfig;
use meditrack_scheduler::jobs::{EXPIRY_SWEEP_JOB, GENERATION_JOB};
use meditrack_scheduler::Scheduler;
use meditrack_storage::StorageEngine;

#[derive(Deserialize)]
struct Catalog {
    #[allow(dead_code)]
    now: DateTime<Utc>,
    medicines: Vec<Medicine>,
}

async fn seeded_engine() -> AlertEngine<StorageEngine> {
    let catalog: Catalog = test_fixtures::load_fixture("medicines/winter_catalog.json");
    let store = StorageEngine::open_in_memory().unwrap();
    store.seed(&catalog.medicines).await.unwrap();
    AlertEngine::new(Arc::new(store), &MediTrackConfig::default())
}

#[tokio::test(start_paused = true)]
async fn generation_fires_within_one_cadence() {
    let engine = seeded_engine().await;
    let handle = Scheduler::start(engine.clone(), &SchedulerConfig::default()).unwrap();
    assert_eq!(handle.jobs(), [GENERATION_JOB, EXPIRY_SWEEP_JOB]);
    assert!(handle.is_running());

    tokio::time::sleep(Duration::from_secs(6 * 3600 + 60)).await;

    // Stock levels do not depend on the calendar, so the low-stock alert is always raised.
    let low = engine
        .list_alerts(&AlertFilter::unresolved().with_type(AlertType::LowStock))
        .await
        .unwrap();
    assert!(low.iter().any(|a| a.medicine_id == "med-ibuprofen"));

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn nothing_runs_before_the_first_fire_time() {
    let engine = seeded_engine().await;
    let config = SchedulerConfig {
        generation_cron: "0 0 * * *".into(),
        ..SchedulerConfig::default()
    };
    let handle = Scheduler::start(engine.clone(), &config).unwrap();
    tokio::task::yield_now().await;

    assert!(engine.list_alerts(&AlertFilter::default()).await.unwrap().is_empty());
    handle.shutdown().await;
}

#[tokio::test]
async fn disabled_scheduler_spawns_nothing() {
    let engine = seeded_engine().await;
    let config = SchedulerConfig {
        enabled: false,
        ..SchedulerConfig::default()
    };
    let handle = Scheduler::start(engine, &config).unwrap();
    assert!(handle.jobs().is_empty());
    assert!(!handle.is_running());
}

#[tokio::test]
async fn bad_cadence_is_a_config_error() {
    let engine = seeded_engine().await;
    let config = SchedulerConfig {
        expiry_sweep_cron: "0 0 1 * *".into(),
        ..SchedulerConfig::default()
    };
    let err = Scheduler::start(engine, &config).err().unwrap();
    assert!(matches!(
        err,
        MediTrackError::Config(ConfigError::InvalidCadence { .. })
    ));
}
