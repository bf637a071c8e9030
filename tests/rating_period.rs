use approx::assert_abs_diff_eq;
use glicko2_period::{
    calculate_new_rating, new_player_rating, Error, Game, Outcome, Rating, RatingSystem,
    SolverStage,
};
use rayon::prelude::*;

fn reference_games() -> [Game; 3] {
    [
        Game::win(Rating::new(1400.0, 30.0, 0.06)),
        Game::loss(Rating::new(1550.0, 100.0, 0.06)),
        Game::loss(Rating::new(1700.0, 300.0, 0.06)),
    ]
}

#[test]
fn test_glickman_example() {
    let player = Rating::new(1500.0, 200.0, 0.06);
    let updated = calculate_new_rating(&player, &reference_games()).unwrap();
    assert_abs_diff_eq!(f64::from(updated.rating), 1464.05, epsilon = 0.01);
    assert_abs_diff_eq!(f64::from(updated.deviation), 151.52, epsilon = 0.01);
    assert_abs_diff_eq!(f64::from(updated.volatility), 0.05999, epsilon = 1e-4);

    // Inputs are plain values and stay untouched.
    assert_eq!(player, Rating::new(1500.0, 200.0, 0.06));
}

#[test]
fn test_glickman_example_with_final_win() {
    let player = Rating::new(1500.0, 200.0, 0.06);
    let mut games = reference_games();
    games[2].outcome = Outcome::Win;

    let updated = calculate_new_rating(&player, &games).unwrap();
    assert_abs_diff_eq!(f64::from(updated.rating), 1559.76, epsilon = 0.01);
    assert_abs_diff_eq!(f64::from(updated.deviation), 151.52, epsilon = 0.01);
    assert_abs_diff_eq!(f64::from(updated.volatility), 0.05999, epsilon = 1e-4);
}

#[test]
fn test_three_new_players() {
    let player = new_player_rating();
    let opponent1 = new_player_rating();
    let opponent2 = new_player_rating();

    let games = [
        Game::new(opponent1, Outcome::Win),
        Game::new(opponent2, Outcome::Loss),
        Game::new(opponent1, Outcome::Win),
    ];
    let updated = calculate_new_rating(&player, &games).unwrap();

    assert_abs_diff_eq!(f64::from(updated.rating), 1600.0, epsilon = 0.2);
    assert_abs_diff_eq!(f64::from(updated.deviation), 227.74, epsilon = 0.1);
    assert_abs_diff_eq!(f64::from(updated.volatility), 0.059998, epsilon = 0.1);
}

#[test]
fn test_no_games_only_inflates_deviation() {
    for player in [
        new_player_rating(),
        Rating::new(1623.7, 42.5, 0.06),
        Rating::new(2841.0, 60.0, 0.2),
        Rating::new(873.25, 1.0, 0.01),
    ] {
        let updated = calculate_new_rating(&player, &[]).unwrap();
        assert_eq!(updated.rating, player.rating);
        assert_eq!(updated.volatility, player.volatility);
        assert!(updated.deviation > player.deviation);
    }
}

#[test]
fn test_win_and_loss_are_symmetric() {
    let first = Rating::new(1620.0, 80.0, 0.06);
    let second = first;

    let winner = calculate_new_rating(&first, &[Game::win(second)]).unwrap();
    let loser = calculate_new_rating(&second, &[Game::loss(first)]).unwrap();

    let gain = winner.rating - first.rating;
    let loss = loser.rating - second.rating;
    assert!(f64::from(gain) > 0.0);
    assert_abs_diff_eq!(f64::from(gain), -f64::from(loss), epsilon = 1e-9);
    assert_eq!(winner.deviation, loser.deviation);
    assert_eq!(winner.volatility, loser.volatility);
}

#[test]
fn test_single_game_keeps_volatility_stable() {
    let cases = [
        (Rating::new(1500.0, 350.0, 0.06), Game::win(Rating::new(1500.0, 350.0, 0.06))),
        (Rating::new(1500.0, 50.0, 0.06), Game::win(Rating::new(2200.0, 50.0, 0.06))),
        (Rating::new(2000.0, 30.0, 0.06), Game::loss(Rating::new(1200.0, 30.0, 0.06))),
        (Rating::new(1800.0, 120.0, 0.09), Game::draw(Rating::new(1450.0, 200.0, 0.06))),
    ];

    for (player, game) in cases {
        let updated = calculate_new_rating(&player, &[game]).unwrap();
        let ratio = f64::from(updated.volatility) / f64::from(player.volatility);
        assert!((0.95..=1.05).contains(&ratio), "volatility ratio {ratio}");
    }
}

#[test]
fn test_order_of_games_is_irrelevant() {
    let player = Rating::new(1500.0, 200.0, 0.06);
    let games = reference_games();
    let expected = calculate_new_rating(&player, &games).unwrap();

    for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
        let shuffled = order.map(|i| games[i]);
        let updated = calculate_new_rating(&player, &shuffled).unwrap();
        assert_abs_diff_eq!(
            f64::from(updated.rating),
            f64::from(expected.rating),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            f64::from(updated.deviation),
            f64::from(expected.deviation),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            f64::from(updated.volatility),
            f64::from(expected.volatility),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_invalid_ratings_are_rejected() {
    let valid = new_player_rating();
    for invalid in [
        Rating::new(1500.0, 0.0, 0.06),
        Rating::new(1500.0, -50.0, 0.06),
        Rating::new(1500.0, 350.0, 0.0),
        Rating::new(1500.0, 350.0, -0.06),
        Rating::new(f64::NAN, 350.0, 0.06),
    ] {
        assert!(matches!(
            calculate_new_rating(&invalid, &[Game::win(valid)]),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            calculate_new_rating(&valid, &[Game::win(invalid)]),
            Err(Error::InvalidInput { .. })
        ));
    }
}

#[test]
fn test_non_convergence_is_reported() {
    let rating_system = RatingSystem::builder().max_iterations(1).build();
    let player = Rating::new(1500.0, 200.0, 0.06);
    assert_eq!(
        rating_system.calculate_new_rating(&player, &reference_games()),
        Err(Error::NonConvergence {
            stage: SolverStage::RegulaFalsi,
            iterations: 1,
        })
    );
}

#[test]
fn test_shifted_scale() {
    let shifted = RatingSystem::builder()
        .rating_center(0.0)
        .default_rating(0.0)
        .build();

    let player = shifted.new_player_rating();
    let games = [
        Game::win(Rating::new(-100.0, 30.0, 0.06)),
        Game::draw(Rating::new(50.0, 100.0, 0.06)),
    ];
    let updated = shifted.calculate_new_rating(&player, &games).unwrap();

    let standard = calculate_new_rating(
        &new_player_rating(),
        &[
            Game::win(Rating::new(1400.0, 30.0, 0.06)),
            Game::draw(Rating::new(1550.0, 100.0, 0.06)),
        ],
    )
    .unwrap();

    assert_abs_diff_eq!(
        f64::from(updated.rating) + 1500.0,
        f64::from(standard.rating),
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        f64::from(updated.deviation),
        f64::from(standard.deviation),
        epsilon = 1e-9
    );
}

#[test]
fn test_smaller_tau_moves_volatility_less() {
    let player = Rating::new(1500.0, 50.0, 0.06);
    let upsets = [Game::win(Rating::new(2200.0, 50.0, 0.06)); 5];

    let loose = RatingSystem::builder().tau(1.2).build();
    let tight = RatingSystem::builder().tau(0.3).build();

    let loose = loose.calculate_new_rating(&player, &upsets).unwrap();
    let tight = tight.calculate_new_rating(&player, &upsets).unwrap();

    assert!(loose.volatility > tight.volatility);
    assert!(tight.volatility > player.volatility);
}

#[test]
fn test_parallel_updates_match_sequential() {
    let rating_system = RatingSystem::new();
    let opponents: Vec<Rating> = (0..16)
        .map(|i| Rating::new(1200.0 + 40.0 * f64::from(i), 60.0 + 10.0 * f64::from(i), 0.06))
        .collect();
    let periods: Vec<(Rating, Vec<Game>)> = (0..256u32)
        .map(|i| {
            let player = Rating::new(1000.0 + 4.0 * f64::from(i), 50.0 + f64::from(i % 300), 0.06);
            let games = opponents
                .iter()
                .enumerate()
                .filter(|(j, _)| (*j as u32 + i) % 3 != 0)
                .map(|(j, &opponent)| match (j as u32 + i) % 4 {
                    0 => Game::loss(opponent),
                    1 => Game::draw(opponent),
                    _ => Game::win(opponent),
                })
                .collect();
            (player, games)
        })
        .collect();

    let sequential: Vec<_> = periods
        .iter()
        .map(|(player, games)| rating_system.calculate_new_rating(player, games))
        .collect();
    let parallel: Vec<_> = periods
        .par_iter()
        .map(|(player, games)| rating_system.calculate_new_rating(player, games))
        .collect();

    assert_eq!(sequential, parallel);
    assert!(parallel.iter().all(Result::is_ok));
}

#[cfg(feature = "serde")]
#[test]
fn test_builder_from_config() {
    let builder: glicko2_period::RatingSystemBuilder =
        serde_json::from_str(r#"{ "tau": 0.75, "default_volatility": 0.09 }"#).unwrap();
    let rating_system = builder.build();
    assert_eq!(rating_system.tau(), 0.75);
    assert_eq!(
        rating_system.new_player_rating(),
        Rating::new(1500.0, 350.0, 0.09)
    );

    let game: Game = serde_json::from_str(
        r#"{
            "opponent": { "rating": 1400.0, "deviation": 30.0, "volatility": 0.06 },
            "outcome": "win"
        }"#,
    )
    .unwrap();
    assert_eq!(game, Game::win(Rating::new(1400.0, 30.0, 0.06)));
}

#[cfg(feature = "serde")]
#[test]
fn test_invalid_config_is_an_error() {
    for config in [
        r#"{ "tau": -1.0 }"#,
        r#"{ "max_iterations": 0 }"#,
        r#"{ "rating_scale": 0.0 }"#,
        r#"{ "default_deviation": -350.0 }"#,
    ] {
        let err = serde_json::from_str::<glicko2_period::RatingSystemBuilder>(config).unwrap_err();
        assert!(err.to_string().contains("invalid rating system config"), "{err}");
    }
}
