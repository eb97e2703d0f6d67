#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use car_cost_core::{
    config::ConfigManager,
    domain::{AcquisitionType, VehicleProfile, YearMonth},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Storage and config managers backed by a unique directory for each test.
pub fn setup_test_env() -> (JsonStorage, ConfigManager, PathBuf) {
    let base = temp_base();
    let storage = JsonStorage::new(Some(base.clone()), Some(3)).expect("create json storage");
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (storage, config_manager, base)
}

pub fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid month")
}

pub fn bought_vehicle(name: &str, purchase_cost: f64) -> VehicleProfile {
    VehicleProfile::new(name, AcquisitionType::Cash, month(2025, 11))
        .with_build(month(2019, 1))
        .with_purchase_cost(purchase_cost)
        .with_running_costs(1_000.0, 280.0, 0.08)
        .with_depreciation(0.08)
}

pub fn personal_lease(name: &str, monthly_lease: f64, fuel_per_km: f64) -> VehicleProfile {
    VehicleProfile::new(name, AcquisitionType::PersonalLease, month(2025, 1))
        .with_running_costs(0.0, 0.0, fuel_per_km)
        .with_lease(monthly_lease, 0.0, false)
}
