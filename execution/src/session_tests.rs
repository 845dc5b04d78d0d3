//! Cross-component session tests: controller, clock, sacrifice and outcome engine together.

use proptest::prelude::*;
use soulbet_types::{
    BetSlip, Color, GameError, IllegalAction, LossReason, PenaltyReason, Pick, SacrificePhase,
    Screen, SessionConfig, SessionEvent, SessionOutcome, POCKET_COUNT,
};

use crate::mocks::{fixed_clock_config, fixed_controller, FixedWheel};
use crate::TurnController;

fn slip(amount: &str, color: Color, number: u8) -> BetSlip {
    BetSlip::new(amount, Pick::new(color, number).unwrap())
}

fn penalties(events: &[SessionEvent], wanted: PenaltyReason) -> usize {
    events
        .iter()
        .filter(|event| {
            matches!(event, SessionEvent::TimePenalty { reason, .. } if *reason == wanted)
        })
        .count()
}

fn ended(events: &[SessionEvent]) -> Vec<(SessionOutcome, Option<LossReason>, Screen)> {
    events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::SessionEnded {
                outcome,
                loss_reason,
                screen,
                ..
            } => Some((*outcome, *loss_reason, *screen)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_jackpot_turn_event_order() {
    let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([7]));
    controller.place_bet(&slip("100", Color::Red, 7)).unwrap();

    let kinds: Vec<&'static str> = controller
        .sink()
        .iter()
        .map(|event| match event {
            SessionEvent::BetAccepted { .. } => "bet_accepted",
            SessionEvent::TimePenalty { .. } => "time_penalty",
            SessionEvent::TurnAdvanced { .. } => "turn_advanced",
            SessionEvent::MoneyChanged { .. } => "money_changed",
            SessionEvent::SpinResolved { .. } => "spin_resolved",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "bet_accepted",
            "time_penalty",
            "turn_advanced",
            "money_changed",
            "spin_resolved"
        ]
    );

    assert!(controller.sink().contains(&SessionEvent::BetAccepted {
        bet: slip("100", Color::Red, 7).parse().unwrap(),
        money: 2_400,
    }));
    assert!(controller
        .sink()
        .contains(&SessionEvent::MoneyChanged { from: 2_400, to: 4_900 }));
}

#[test]
fn test_jackpot_penalty_applied_once_per_qualifying_turn() {
    let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([7, 9, 7]));
    for _ in 0..3 {
        controller.place_bet(&slip("10", Color::Red, 7)).unwrap();
        controller.spin_settled();
    }
    // 7 (jackpot), 9 (color only), 7 (jackpot).
    assert_eq!(penalties(controller.sink(), PenaltyReason::Jackpot), 2);
    assert_eq!(controller.state().time_left_secs, 300.0);
}

#[test]
fn test_color_only_has_no_penalty() {
    let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([9]));
    let outcome = controller.place_bet(&slip("100", Color::Red, 7)).unwrap();
    assert_eq!(outcome.jackpot_penalty, None);
    assert_eq!(outcome.money, 2_600);
    assert_eq!(penalties(controller.sink(), PenaltyReason::Jackpot), 0);
}

#[test]
fn test_insufficient_funds_reported() {
    let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([7]));
    let err = controller.place_bet(&slip("2501", Color::Red, 7)).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientFunds {
            amount: 2_501,
            balance: 2_500
        }
    );
    assert_eq!(controller.state().money, 2_500);
    assert_eq!(
        controller.sink().as_slice(),
        &[SessionEvent::BetRejected {
            message: "You don't have enough money.".to_string()
        }]
    );
}

#[test]
fn test_bankrupt_loses_and_freezes() {
    let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([8]));
    let outcome = controller.place_bet(&slip("2500", Color::Red, 7)).unwrap();
    assert_eq!(outcome.money, 0);
    assert_eq!(outcome.session, SessionOutcome::Lost);
    assert_eq!(
        ended(controller.sink()),
        vec![(SessionOutcome::Lost, Some(LossReason::Bankrupt), Screen::Loss)]
    );
    assert!(!controller.betting_open());
    assert!(!controller.clock().is_running());

    let before = controller.state().clone();
    let events_before = controller.sink().len();
    let err = controller.place_bet(&slip("1", Color::Red, 7)).unwrap_err();
    assert_eq!(err, GameError::IllegalAction(IllegalAction::SessionOver));
    assert_eq!(controller.state(), &before);
    assert_eq!(controller.sink().len(), events_before);
    assert_eq!(controller.tick_clock(), None);
}

#[test]
fn test_reaching_target_wins_and_freezes() {
    let config = SessionConfig {
        target_money: 4_000,
        ..SessionConfig::default()
    };
    let mut controller = fixed_controller(config, FixedWheel::new([7]));
    let outcome = controller.place_bet(&slip("100", Color::Red, 7)).unwrap();
    assert_eq!(outcome.money, 4_900);
    assert_eq!(outcome.session, SessionOutcome::Won);
    assert_eq!(
        ended(controller.sink()),
        vec![(SessionOutcome::Won, None, Screen::Win)]
    );

    let before = controller.state().clone();
    assert!(controller.place_bet(&slip("100", Color::Red, 7)).is_err());
    assert!(controller.use_sacrifice().is_err());
    assert_eq!(controller.state(), &before);
}

#[test]
fn test_clock_expiry_forces_loss_with_healthy_money() {
    let config = fixed_clock_config(2.0, 1.5, 3.0);
    let mut controller = fixed_controller(config, FixedWheel::new([9]));

    assert_eq!(controller.tick_clock(), Some(std::time::Duration::from_secs(3)));
    assert!(controller.state().is_ongoing());
    assert_eq!(controller.tick_clock(), None);

    assert_eq!(controller.state().outcome, SessionOutcome::Lost);
    assert_eq!(controller.state().money, 2_500);
    assert_eq!(controller.state().time_left_secs, 0.0);
    assert_eq!(
        ended(controller.sink()),
        vec![(SessionOutcome::Lost, Some(LossReason::ClockExpired), Screen::Loss)]
    );
    assert!(controller.place_bet(&slip("100", Color::Red, 7)).is_err());
    assert_eq!(controller.state().turn_count, 0);
}

#[test]
fn test_clock_expiry_mid_spin_ends_session() {
    let config = fixed_clock_config(1.0, 1.0, 1.0);
    let mut controller = fixed_controller(config, FixedWheel::new([9]));
    controller.place_bet(&slip("100", Color::Red, 7)).unwrap();
    assert!(controller.is_spin_in_flight());

    assert_eq!(controller.tick_clock(), None);
    assert_eq!(controller.state().outcome, SessionOutcome::Lost);
    assert!(!controller.spin_settled(), "betting stays closed");
}

#[test]
fn test_jackpot_that_exhausts_clock_loses_after_credit() {
    let config = fixed_clock_config(20.0, 1.0, 1.0);
    let mut controller = fixed_controller(config, FixedWheel::new([7]));
    let outcome = controller.place_bet(&slip("100", Color::Red, 7)).unwrap();

    assert!(outcome.jackpot_penalty.unwrap().expired);
    assert_eq!(outcome.money, 4_900, "winnings are still credited");
    assert_eq!(outcome.session, SessionOutcome::Lost);
    assert_eq!(
        ended(controller.sink()),
        vec![(SessionOutcome::Lost, Some(LossReason::ClockExpired), Screen::Loss)]
    );
}

#[test]
fn test_jackpot_reaching_target_wins_even_if_clock_runs_out() {
    let config = SessionConfig {
        target_money: 4_000,
        ..fixed_clock_config(20.0, 1.0, 1.0)
    };
    let mut controller = fixed_controller(config, FixedWheel::new([7]));
    let outcome = controller.place_bet(&slip("100", Color::Red, 7)).unwrap();
    assert_eq!(outcome.session, SessionOutcome::Won);
    assert_eq!(ended(controller.sink()).len(), 1);
}

#[test]
fn test_sacrifice_lifecycle_through_controller() {
    // Intro at turn 2, cooldown 3.
    let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([8]));
    let bet = slip("10", Color::Red, 7);

    assert_eq!(
        controller.use_sacrifice(),
        Err(GameError::IllegalAction(IllegalAction::SacrificeNotReady))
    );

    controller.place_bet(&bet).unwrap();
    controller.spin_settled();
    assert_eq!(controller.sacrifice_state().phase, SacrificePhase::Locked);

    controller.place_bet(&bet).unwrap();
    controller.spin_settled();
    assert_eq!(controller.sacrifice_state().phase, SacrificePhase::Unlocking);
    assert!(controller
        .sink()
        .iter()
        .any(|event| matches!(event, SessionEvent::SacrificeIntro { .. })));

    // Turns played while the intro is on screen do not count.
    controller.place_bet(&bet).unwrap();
    controller.spin_settled();
    assert!(controller.finish_sacrifice_intro());
    assert!(!controller.finish_sacrifice_intro());
    assert_eq!(controller.sacrifice_state().turns_since_last_use, 0);

    for _ in 0..2 {
        controller.place_bet(&bet).unwrap();
        controller.spin_settled();
    }
    assert!(!controller.sacrifice_state().is_ready());
    let events_before = controller.sink().len();
    assert!(controller.use_sacrifice().is_err());
    assert_eq!(controller.sink().len(), events_before, "not-ready use is silent");

    controller.place_bet(&bet).unwrap();
    controller.spin_settled();
    assert!(controller.sacrifice_state().is_ready());
    assert_eq!(
        controller
            .sink()
            .iter()
            .filter(|event| matches!(event, SessionEvent::SacrificeReady))
            .count(),
        1
    );

    let time_before = controller.state().time_left_secs;
    let outcome = controller.use_sacrifice().unwrap();
    assert_eq!(outcome.seconds, 20.0);
    assert_eq!(controller.state().time_left_secs, time_before - 20.0);
    assert_eq!(controller.sacrifice_state().turns_since_last_use, 0);
    assert!(!controller.sacrifice_state().is_ready());
    assert_eq!(penalties(controller.sink(), PenaltyReason::Sacrifice), 1);
    assert!(controller.sink().contains(&SessionEvent::SacrificeUsed {
        message: "You embraced the sacrifice... More power now, less future.".to_string()
    }));

    assert!(controller.use_sacrifice().is_err());
    assert_eq!(penalties(controller.sink(), PenaltyReason::Sacrifice), 1);
}

#[test]
fn test_sacrifice_that_exhausts_clock_loses() {
    let config = SessionConfig {
        sacrifice_cooldown_turns: 0,
        ..fixed_clock_config(15.0, 1.0, 1.0)
    };
    let mut controller = fixed_controller(config, FixedWheel::new([8]));
    for _ in 0..2 {
        controller.place_bet(&slip("10", Color::Red, 7)).unwrap();
        controller.spin_settled();
    }
    assert!(controller.finish_sacrifice_intro());
    assert!(controller.sacrifice_state().is_ready());

    let outcome = controller.use_sacrifice().unwrap();
    assert!(outcome.expired);
    assert_eq!(controller.state().outcome, SessionOutcome::Lost);
    assert_eq!(
        ended(controller.sink()),
        vec![(SessionOutcome::Lost, Some(LossReason::ClockExpired), Screen::Loss)]
    );
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let play = |seed: u64| {
        let mut controller =
            TurnController::from_seed(SessionConfig::default(), seed, Vec::<SessionEvent>::new());
        for number in [1u8, 2, 3, 4, 5] {
            let pick = Pick::new(Color::of(number), number).unwrap();
            let _ = controller.place_bet(&BetSlip::new("50", pick));
            controller.spin_settled();
            controller.tick_clock();
        }
        controller.into_sink()
    };
    assert_eq!(play(11), play(11));
}

proptest! {
    #[test]
    fn prop_non_positive_or_garbage_rejected(
        amount in prop_oneof![
            (i64::MIN..=0).prop_map(|value| value.to_string()),
            "[a-z ]{0,8}",
        ],
    ) {
        let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([7]));
        let err = controller.place_bet(&slip(&amount, Color::Red, 7)).unwrap_err();
        prop_assert!(matches!(err, GameError::InvalidBet(_)));
        prop_assert_eq!(controller.state().money, 2_500);
        prop_assert_eq!(controller.state().turn_count, 0);
    }

    #[test]
    fn prop_over_balance_rejected(amount in 2_501u64..10_000_000) {
        let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([7]));
        let err = controller.place_bet(&slip(&amount.to_string(), Color::Red, 7)).unwrap_err();
        let is_insufficient = matches!(err, GameError::InsufficientFunds { .. });
        prop_assert!(is_insufficient);
        prop_assert_eq!(controller.state().money, 2_500);
        prop_assert_eq!(controller.state().turn_count, 0);
    }

    #[test]
    fn prop_valid_bet_conserves_money(
        amount in 1u64..=2_500,
        number in 0u8..POCKET_COUNT,
        draw in 0u8..POCKET_COUNT,
    ) {
        let mut controller = fixed_controller(SessionConfig::default(), FixedWheel::new([draw]));
        let pick = Pick::new(Color::of(number), number).unwrap();
        let outcome = controller.place_bet(&BetSlip::new(amount.to_string(), pick)).unwrap();

        prop_assert_eq!(controller.state().money, 2_500 - amount + outcome.spin.winnings);
        prop_assert_eq!(controller.state().turn_count, 1);
        prop_assert_eq!(outcome.jackpot_penalty.is_some(), outcome.spin.is_jackpot());
        prop_assert_eq!(
            penalties(controller.sink(), PenaltyReason::Jackpot),
            usize::from(outcome.spin.is_jackpot())
        );
    }
}
