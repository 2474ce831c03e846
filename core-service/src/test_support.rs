//! Synthetic datasets shared by unit tests

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::logic::dataset::{TrainingDataset, TrainingRow};
use crate::logic::features::{compute_lsf, FeatureVector, ProcessInputs, FEATURE_COUNT, FEATURE_LAYOUT, TARGET_NAME};

/// Route `log` output through the test harness (RUST_LOG=debug to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Plausible plant readings with every field inside its slider range
pub fn nominal_inputs() -> ProcessInputs {
    ProcessInputs {
        limestone_pct: 80.0,
        silica_pct: 5.0,
        al2o3_pct: 2.0,
        fe2o3_pct: 2.0,
        kiln_temp: 1425.0,
        fuel_rate: 4.5,
        o2: 4.5,
        cooling_rate: 3.2,
        blaine: 320.0,
        mill_power: 2200.0,
        lsf: None,
    }
}

fn random_row(rng: &mut StdRng) -> [f64; FEATURE_COUNT] {
    let limestone = rng.gen_range(75.0..85.0);
    [
        limestone,
        rng.gen_range(4.0..6.0),
        rng.gen_range(1.5..2.5),
        rng.gen_range(1.5..2.5),
        compute_lsf(limestone),
        rng.gen_range(1350.0..1500.0),
        rng.gen_range(4.0..5.0),
        rng.gen_range(3.0..6.0),
        rng.gen_range(2.5..4.0),
        rng.gen_range(280.0..360.0),
        rng.gen_range(2000.0..2400.0),
    ]
}

/// strength depends on kiln_temp alone; everything else is noise
pub fn kiln_linear_dataset(n: usize, seed: u64) -> TrainingDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| {
            let values = random_row(&mut rng);
            let strength = 2.0 + 0.015 * (values[5] - 1350.0);
            TrainingRow::new(FeatureVector::from_values(values), strength)
        })
        .collect();
    TrainingDataset::from_rows(rows)
}

/// strength mixes several features plus measurement noise
pub fn mixed_dataset(n: usize, seed: u64) -> TrainingDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| {
            let v = random_row(&mut rng);
            let strength = 1.0 + 0.01 * (v[5] - 1350.0) + 0.005 * (v[9] - 280.0) - 0.2 * (v[7] - 3.0)
                + rng.gen_range(-0.05..0.05);
            TrainingRow::new(FeatureVector::from_values(v), strength)
        })
        .collect();
    TrainingDataset::from_rows(rows)
}

/// Dataset rendered back to CSV with the canonical header
pub fn to_csv(dataset: &TrainingDataset) -> String {
    let mut out: Vec<String> = Vec::with_capacity(dataset.len() + 1);
    let mut header: Vec<&str> = FEATURE_LAYOUT.to_vec();
    header.push(TARGET_NAME);
    out.push(header.join(","));

    for row in dataset.rows() {
        let cells: Vec<String> = row
            .features
            .values
            .iter()
            .chain(std::iter::once(&row.strength_28d))
            .map(|v| v.to_string())
            .collect();
        out.push(cells.join(","));
    }
    out.join("\n")
}
