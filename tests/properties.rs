use approx::assert_relative_eq;
use bondcurve::coins::{Coin, Coins, DecCoin};
use bondcurve::fees::percentage_fee;
use bondcurve::{Bond, BondConfig, BondError, Curve, Dec, FunctionType};
use proptest::prelude::*;

fn swapper(tx_fee: Dec) -> Bond {
    Bond::new(BondConfig {
        token: "pool".into(),
        name: String::new(),
        description: String::new(),
        creator: "creator".into(),
        function_type: FunctionType::Swapper,
        function_parameters: Default::default(),
        reserve_tokens: vec!["bbb".into(), "aaa".into()],
        reserve_address: String::new(),
        tx_fee_percentage: tx_fee,
        exit_fee_percentage: Dec::zero(),
        fee_address: String::new(),
        max_supply: u128::MAX,
        order_quantity_limits: Coins::new(),
        sanity_rate: Dec::zero(),
        sanity_margin_percentage: Dec::zero(),
        allow_sells: true,
        signers: vec!["creator".into()],
        batch_blocks: 1,
    })
}

fn pct(basis_points: u32) -> Dec {
    Dec::from(basis_points as u128).quo(&Dec::from(100u128)).unwrap()
}

proptest! {
    #[test]
    fn power_integral_matches_float_closed_form(
        m in 1u32..50,
        n in 0u64..4,
        c in 0u32..1000,
        x in 0u64..100_000,
    ) {
        let curve = Curve::Power { m: Dec::from(m as u128), n, c: Dec::from(c as u128) };
        let exact = curve.integral(&Dec::from(x as u128)).unwrap().to_f64();
        let xf = x as f64;
        let float = m as f64 * xf.powi(n as i32 + 1) / (n as f64 + 1.0) + c as f64 * xf;
        assert_relative_eq!(exact, float, max_relative = 1e-9, epsilon = 1e-9);
    }

    #[test]
    fn sigmoid_integral_is_anchored_and_monotone(
        a in 1u32..100,
        b in 0u32..1_000,
        c in 1u32..10_000,
        x in 0u64..1_000_000,
    ) {
        let curve = Curve::Sigmoid {
            a: Dec::from(a as u128),
            b: Dec::from(b as u128),
            c: Dec::from(c as u128),
        };
        prop_assert!(curve.integral(&Dec::zero()).unwrap().is_zero());
        let here = curve.integral(&Dec::from(x as u128)).unwrap();
        let next = curve.integral(&Dec::from(x as u128 + 1)).unwrap();
        prop_assert!(next >= here);

        let (af, bf, cf, xf) = (a as f64, b as f64, c as f64, x as f64);
        let float = af * (((xf - bf).powi(2) + cf).sqrt() + xf) - af * (bf * bf + cf).sqrt();
        assert_relative_eq!(here.to_f64(), float, max_relative = 1e-6, epsilon = 1e-5);
    }

    #[test]
    fn sigmoid_price_stays_below_twice_amplitude(
        a in 1u32..100,
        b in 0u32..10_000,
        c in 1u32..10_000,
        x in 0u64..1_000_000,
    ) {
        let amplitude = Dec::from(a as u128);
        let curve = Curve::Sigmoid { a: amplitude.clone(), b: Dec::from(b as u128), c: Dec::from(c as u128) };
        let price = curve.price(&Dec::from(x as u128)).unwrap();
        prop_assert!(!price.is_negative());
        prop_assert!(price <= &amplitude + &amplitude);
    }

    #[test]
    fn positive_fee_never_rounds_to_zero(
        units in 1u64..u64::MAX,
        scale in 0u32..6,
        basis_points in 1u32..10_000,
    ) {
        let amount = Dec::from(units as u128).quo(&Dec::from(10u128.pow(scale))).unwrap();
        let fee = percentage_fee(&pct(basis_points), &DecCoin::new("aaa", amount)).unwrap();
        prop_assert!(fee.amount > 0);
    }

    #[test]
    fn swap_conserves_the_pool(
        from_balance in 1u64..u64::MAX,
        to_balance in 1u64..u64::MAX,
        input in 1u64..u64::MAX,
        basis_points in 0u32..1_000,
    ) {
        let bond = swapper(pct(basis_points));
        let reserves = [Coin::new("aaa", from_balance as u128), Coin::new("bbb", to_balance as u128)]
            .into_iter()
            .collect::<Result<Coins, BondError>>()
            .unwrap();
        if let Ok((out, fee)) = bond.returns_for_swap(&Coin::new("aaa", input as u128), "bbb", &reserves) {
            let received = out.amount_of("bbb");
            prop_assert!(received > 0);
            prop_assert!(received < to_balance as u128);
            prop_assert!(fee.amount <= input as u128);
            // x·y never shrinks
            let before = from_balance as u128 as f64 * to_balance as f64;
            let after = (from_balance as u128 + input as u128 - fee.amount) as f64
                * (to_balance as u128 - received) as f64;
            prop_assert!(after >= before * (1.0 - 1e-12));
        }
    }

    #[test]
    fn new_bond_sorts_reserve_tokens(mut tokens in proptest::collection::btree_set("[a-z]{3,8}", 1..6)
        .prop_map(|s| s.into_iter().collect::<Vec<_>>())
        .prop_shuffle())
    {
        let mut cfg = BondConfig {
            token: "zzzzzzzzzz".into(),
            name: String::new(),
            description: String::new(),
            creator: "creator".into(),
            function_type: FunctionType::Power,
            function_parameters: [("m", Dec::one()), ("n", Dec::one()), ("c", Dec::zero())]
                .into_iter()
                .collect(),
            reserve_tokens: tokens.clone(),
            reserve_address: String::new(),
            tx_fee_percentage: Dec::zero(),
            exit_fee_percentage: Dec::zero(),
            fee_address: String::new(),
            max_supply: 1,
            order_quantity_limits: Coins::new(),
            sanity_rate: Dec::zero(),
            sanity_margin_percentage: Dec::zero(),
            allow_sells: true,
            signers: vec!["creator".into()],
            batch_blocks: 1,
        };
        cfg.order_quantity_limits = tokens
            .iter()
            .map(|t| Coin::new(t.clone(), 7))
            .collect::<Result<Coins, BondError>>()
            .unwrap();
        let bond = Bond::new(cfg);
        tokens.sort();
        prop_assert_eq!(&bond.reserve_tokens, &tokens);
        prop_assert_eq!(bond.current_supply.amount, 0);
        let limit_tokens: Vec<&str> = bond.order_quantity_limits.denoms().collect();
        prop_assert_eq!(limit_tokens, tokens.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert!(bond.reserve_denoms_equal_to(tokens.iter().rev().map(String::as_str)));
    }
}
