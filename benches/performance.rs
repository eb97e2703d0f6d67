use car_cost_core::core::services::SeedService;
use car_cost_core::cost::{
    generate_cost_series, simulate_fleet, RoundingPolicy, ScenarioInputs, ScenarioParameters,
};
use car_cost_core::domain::{AcquisitionType, Garage, VehicleProfile, YearMonth};
use car_cost_core::storage::json_backend::{load_garage_from_path, save_garage_to_path};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

fn build_fleet(size: usize) -> Vec<VehicleProfile> {
    let acquired = YearMonth::new(2025, 1).expect("month");
    (0..size)
        .map(|idx| {
            let acquisition = match idx % 3 {
                0 => AcquisitionType::Cash,
                1 => AcquisitionType::PersonalLease,
                _ => AcquisitionType::BusinessLease,
            };
            VehicleProfile::new(format!("vehicle_{idx}"), acquisition, acquired)
                .with_purchase_cost(15_000.0 + (idx % 50) as f64 * 500.0)
                .with_running_costs(800.0, 200.0, 0.08)
                .with_lease(450.0 + (idx % 7) as f64 * 25.0, 40_000.0, idx % 2 == 0)
        })
        .collect()
}

fn bench_cost_series(c: &mut Criterion) {
    let inputs = ScenarioInputs::default();
    let params = ScenarioParameters {
        years: 20,
        ..ScenarioParameters::default()
    };

    c.bench_function("generate_cost_series_20y", |b| {
        b.iter(|| {
            let comparison = generate_cost_series(black_box(&inputs), &params).expect("series");
            black_box(comparison);
        })
    });
}

fn bench_fleet(c: &mut Criterion) {
    let fleet = build_fleet(1_000);
    let per_step = ScenarioParameters::default();
    let final_only = ScenarioParameters {
        rounding: RoundingPolicy::FinalOnly,
        ..ScenarioParameters::default()
    };

    c.bench_function("simulate_fleet_1k_per_step", |b| {
        b.iter(|| black_box(simulate_fleet(&fleet, 5, 15_000.0, &per_step).expect("fleet")))
    });
    c.bench_function("simulate_fleet_1k_final_only", |b| {
        b.iter(|| black_box(simulate_fleet(&fleet, 5, 15_000.0, &final_only).expect("fleet")))
    });
}

fn bench_garage_io(c: &mut Criterion) {
    let mut garage = Garage::new("Benchmark");
    SeedService::seed(&mut garage).expect("seed");
    garage.vehicles.extend(build_fleet(5_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("garage.json");

    c.bench_function("garage_save_5k", |b| {
        b.iter(|| save_garage_to_path(&garage, &file_path).expect("save garage"))
    });

    save_garage_to_path(&garage, &file_path).expect("seed file");
    c.bench_function("garage_load_5k", |b| {
        b.iter(|| black_box(load_garage_from_path(&file_path).expect("load garage")))
    });
}

criterion_group!(benches, bench_cost_series, bench_fleet, bench_garage_io);
criterion_main!(benches);
