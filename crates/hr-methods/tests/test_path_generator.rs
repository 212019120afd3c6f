//! Integration tests for the two-factor path generator.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use hr_core::Error;
use hr_math::PairedStatistics;
use hr_methods::{PathGenSettings, TimeGrid, TwoFactorPathGenerator};
use hr_processes::{LognormalForwardProcess, State2};
use proptest::prelude::*;

fn generator(settings: PathGenSettings, rho: f64) -> TwoFactorPathGenerator<LognormalForwardProcess> {
    TwoFactorPathGenerator::new(LognormalForwardProcess::new(0.3, 0.25), rho, settings)
}

fn f0() -> State2 {
    State2::new(60.0, 7.0)
}

#[test]
fn same_seed_is_bit_identical() {
    let grid = TimeGrid::new(0.5, 12).unwrap();
    let gen = generator(PathGenSettings::default().with_n_paths(2_001).with_batch_size(300), 0.4);
    let a = gen.simulate_terminal(f0(), &grid, 42).unwrap();
    let b = gen.simulate_terminal(f0(), &grid, 42).unwrap();
    assert_eq!(a, b);
    let c = gen.simulate_terminal(f0(), &grid, 43).unwrap();
    assert_ne!(a, c);
}

#[test]
fn zero_volatility_paths_stay_at_forwards() {
    let grid = TimeGrid::new(1.0, 10).unwrap();
    let gen = TwoFactorPathGenerator::new(
        LognormalForwardProcess::new(0.0, 0.0),
        0.7,
        PathGenSettings::default().with_n_paths(101),
    );
    let draws = gen.simulate_terminal(f0(), &grid, 5).unwrap();
    assert_eq!(draws.len(), 101);
    for (p, g) in draws.iter() {
        assert_eq!(p, 60.0);
        assert_eq!(g, 7.0);
    }
}

#[test]
fn terminal_forwards_are_martingales() {
    let grid = TimeGrid::new(1.0, 4).unwrap();
    let gen = generator(PathGenSettings::default().with_n_paths(100_000), 0.6);
    let draws = gen.simulate_terminal(f0(), &grid, 7).unwrap();
    let mut stats = PairedStatistics::new();
    for (p, g) in draws.iter() {
        stats.add(p, g);
    }
    assert_abs_diff_eq!(stats.mean_x().unwrap(), 60.0, epsilon = 0.5);
    assert_abs_diff_eq!(stats.mean_y().unwrap(), 7.0, epsilon = 0.05);
}

#[test]
fn log_returns_carry_the_factor_correlation() {
    let grid = TimeGrid::new(1.0, 2).unwrap();
    let rho = 0.6;
    let gen = generator(
        PathGenSettings::default().with_n_paths(50_000).with_antithetic(false),
        rho,
    );
    let draws = gen.simulate_terminal(f0(), &grid, 11).unwrap();
    let mut stats = PairedStatistics::new();
    for (p, g) in draws.iter() {
        stats.add((p / 60.0).ln(), (g / 7.0).ln());
    }
    let corr = stats.covariance().unwrap()
        / (stats.variance_x().unwrap() * stats.variance_y().unwrap()).sqrt();
    assert_abs_diff_eq!(corr, rho, epsilon = 0.02);
}

#[test]
fn raised_flag_cancels() {
    let flag = Arc::new(AtomicBool::new(true));
    let grid = TimeGrid::new(1.0, 4).unwrap();
    let gen = generator(PathGenSettings::default().with_n_paths(10), 0.5).with_cancellation(flag);
    let res = gen.simulate_terminal(f0(), &grid, 1);
    assert!(matches!(res, Err(Error::Cancelled)));
}

#[test]
fn lowered_flag_does_not_cancel() {
    let flag = Arc::new(AtomicBool::new(false));
    let grid = TimeGrid::new(1.0, 4).unwrap();
    let gen = generator(PathGenSettings::default().with_n_paths(10), 0.5).with_cancellation(flag);
    assert_eq!(gen.simulate_terminal(f0(), &grid, 1).unwrap().len(), 10);
}

#[test]
fn batch_size_only_splits_the_work() {
    // 40 antithetic paths need 20 draws, so both caps give a single batch
    let grid = TimeGrid::new(1.0, 3).unwrap();
    let a = generator(PathGenSettings::default().with_n_paths(40).with_batch_size(20), 0.3)
        .simulate_terminal(f0(), &grid, 3)
        .unwrap();
    let b = generator(PathGenSettings::default().with_n_paths(40).with_batch_size(1_000), 0.3)
        .simulate_terminal(f0(), &grid, 3)
        .unwrap();
    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn stores_exactly_n_paths(
        n_paths in 0usize..500,
        batch_size in 1usize..64,
        antithetic in any::<bool>(),
    ) {
        let grid = TimeGrid::new(0.25, 2).unwrap();
        let gen = generator(
            PathGenSettings { n_paths, antithetic, batch_size },
            0.2,
        );
        let draws = gen.simulate_terminal(f0(), &grid, 17).unwrap();
        prop_assert_eq!(draws.len(), n_paths);
        prop_assert_eq!(draws.power().len(), draws.gas().len());
    }
}
