//! Kirk engine: vectorization, branch selection and domain errors.

use approx::assert_abs_diff_eq;
use hr_core::{Batch, Error};
use hr_instruments::{Corr, Df, Forwards, HeatRateCallSpec, PricingContext, Vols};
use hr_pricingengines::{KirkEngine, KirkSettings, Pricer};
use proptest::prelude::*;

fn context(contract: HeatRateCallSpec, forwards: Forwards, vols: Vols) -> PricingContext {
    PricingContext::new(contract, forwards, vols, Corr::new(0.5), Df::new(0.05)).unwrap()
}

#[test]
fn scalar_and_length_one_vector_agree() {
    let engine = KirkEngine::default();
    let scalar = context(
        HeatRateCallSpec::new(7.0, 5.0, 1.0, 0.0),
        Forwards::new(60.0, 7.0),
        Vols::new(0.3, 0.25),
    );
    let vector = context(
        HeatRateCallSpec::new(7.0, vec![5.0], 1.0, 0.0),
        Forwards::new(vec![60.0], 7.0),
        Vols::new(0.3, 0.25),
    );
    let a = engine.price(&scalar).unwrap();
    let b = engine.price(&vector).unwrap();
    assert!(a.is_scalar());
    assert_eq!(b, Batch::Vector(vec![a.at(0)]));
}

#[test]
fn branches_are_chosen_per_entry() {
    // entry 0 has zero vols and takes the intrinsic branch; entry 1 does not
    let ctx = context(
        HeatRateCallSpec::new(7.0, 5.0, 1.0, 0.0),
        Forwards::new(50.0, 7.0),
        Vols::new(vec![0.0, 0.3], vec![0.0, 0.25]),
    );
    let p = KirkEngine::default().price(&ctx).unwrap();
    assert_abs_diff_eq!(p.at(0), -4.0 * (-0.05_f64).exp(), epsilon = 1e-12);
    assert!(p.at(1) > 0.0);
}

#[test]
fn domain_error_lists_every_offending_index() {
    let ctx = context(
        HeatRateCallSpec::new(7.0, vec![5.0, -60.0, 1.0, -100.0], 1.0, 0.0),
        Forwards::new(60.0, 7.0),
        Vols::new(0.3, 0.25),
    );
    match KirkEngine::default().price(&ctx).unwrap_err() {
        Error::Domain { message, indices } => {
            assert_eq!(indices, vec![1, 3]);
            assert!(message.contains("[1, 3]"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn effective_parameters_are_priced() {
    // costs folded into the contract give the same price as folding them
    // into the forwards and strike by hand
    let engine = KirkEngine::default();
    let with_costs = context(
        HeatRateCallSpec::new(7.0, 5.0, 1.0, 2.0)
            .with_tp_cost(0.2)
            .with_gas_adder(0.1)
            .with_c_allowance(0.5),
        Forwards::new(80.0, 7.0).with_ghg(4.0),
        Vols::new(0.3, 0.25),
    );
    let by_hand = context(
        HeatRateCallSpec::new(7.0, 5.0 + 2.0 + 2.0, 1.0, 0.0),
        Forwards::new(80.0, 7.3),
        Vols::new(0.3, 0.25),
    );
    assert_abs_diff_eq!(
        engine.price(&with_costs).unwrap().at(0),
        engine.price(&by_hand).unwrap().at(0),
        epsilon = 1e-12
    );
}

#[test]
fn start_fuel_raises_the_heat_rate() {
    let engine = KirkEngine::default();
    let base = HeatRateCallSpec::new(7.0, 5.0, 1.0, 0.0).with_quantity(100.0);
    let fuelled = base.clone().with_start_fuel(50.0);
    let vols = Vols::new(0.3, 0.25);
    let plain = engine.price(&context(base, Forwards::new(60.0, 7.0), vols.clone())).unwrap();
    let heavy = engine.price(&context(fuelled, Forwards::new(60.0, 7.0), vols)).unwrap();
    assert!(heavy.at(0) < plain.at(0));
}

#[test]
fn effective_volatility_follows_shape() {
    let ctx = context(
        HeatRateCallSpec::new(7.0, vec![5.0, 10.0], 1.0, 0.0),
        Forwards::new(60.0, 7.0),
        Vols::new(0.3, 0.25),
    );
    let sig = KirkEngine::default().effective_volatility(&ctx).unwrap();
    assert_eq!(sig.len(), Some(2));
    assert!(sig.at(0) > 0.0 && sig.at(1) > 0.0);
}

#[test]
fn out_of_range_correlation_is_priced_as_given_without_clipping() {
    let ctx = PricingContext::new(
        HeatRateCallSpec::new(7.0, 5.0, 1.0, 0.0),
        Forwards::new(60.0, 7.0),
        Vols::new(0.3, 0.25),
        Corr::new(-0.4),
        Df::new(0.05),
    )
    .unwrap();
    assert_eq!(ctx.diagnostics().len(), 1);
    let plain = KirkEngine::default().price(&ctx).unwrap();
    let clipped = KirkEngine::new(KirkSettings::default().with_clip_rho(true))
        .price(&ctx)
        .unwrap();
    assert_eq!(plain, clipped);
}

proptest! {
    #[test]
    fn non_negative_whenever_volatility_is_positive(
        f_power in 10.0f64..150.0,
        f_gas in 1.0f64..15.0,
        h in 1.0f64..12.0,
        strike in 0.0f64..30.0,
        vol_power in 0.05f64..1.0,
        vol_gas in 0.05f64..1.0,
        rho in -0.9f64..0.9,
    ) {
        let ctx = PricingContext::new(
            HeatRateCallSpec::new(h, strike, 1.0, 0.0),
            Forwards::new(f_power, f_gas),
            Vols::new(vol_power, vol_gas),
            Corr::new(rho),
            Df::new(0.03),
        )
        .unwrap();
        let engine = KirkEngine::default();
        let sig = engine.effective_volatility(&ctx).unwrap().at(0);
        prop_assume!(sig >= engine.settings().eps_sigma);
        prop_assert!(engine.price(&ctx).unwrap().at(0) >= 0.0);
    }

    #[test]
    fn strip_matches_entrywise_pricing(
        strikes in prop::collection::vec(0.0f64..20.0, 1..10),
    ) {
        let engine = KirkEngine::default();
        let strip = context(
            HeatRateCallSpec::new(7.0, strikes.clone(), 1.0, 0.0),
            Forwards::new(60.0, 7.0),
            Vols::new(0.3, 0.25),
        );
        let prices = engine.price(&strip).unwrap();
        for (i, k) in strikes.iter().enumerate() {
            let single = context(
                HeatRateCallSpec::new(7.0, *k, 1.0, 0.0),
                Forwards::new(60.0, 7.0),
                Vols::new(0.3, 0.25),
            );
            prop_assert_eq!(prices.at(i), engine.price(&single).unwrap().at(0));
        }
    }
}
