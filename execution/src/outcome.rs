//! Outcome engine.
//!
//! Pure spin resolution: given a bet and a drawn pocket, classify the match and compute the
//! payout. The engine owns no randomness and has no side effects, so identical inputs always
//! resolve identically.

use soulbet_types::{BetRequest, Color, MatchKind, SpinResult, MAX_NUMBER};

/// Resolve a spin.
///
/// The stake has already been taken from the balance by the caller, so `winnings` is the full
/// amount credited back: `amount * multiplier`, with multipliers 25 (number and color), 10
/// (number only), 2 (color only) and 0 otherwise.
///
/// The caller guarantees the pick is consistent with the wheel table; the engine does not
/// re-check it.
pub fn resolve_spin(bet: &BetRequest, draw: u8) -> SpinResult {
    debug_assert!(draw <= MAX_NUMBER, "draw out of range: {draw}");

    let result_color = Color::of(draw);
    let number_match = draw == bet.chosen_number();
    let color_match = result_color == bet.chosen_color();

    let match_kind = MatchKind::classify(number_match, color_match);
    let payout_multiplier = match_kind.multiplier();

    SpinResult {
        result_number: draw,
        result_color,
        match_kind,
        payout_multiplier,
        winnings: bet.amount.saturating_mul(payout_multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use soulbet_types::{Pick, POCKET_COUNT, RED_NUMBERS};

    fn bet(amount: u64, color: Color, number: u8) -> BetRequest {
        BetRequest {
            amount,
            pick: Pick::new(color, number).unwrap(),
        }
    }

    #[test]
    fn test_both_match_pays_25x() {
        let spin = resolve_spin(&bet(100, Color::Red, 7), 7);
        assert_eq!(spin.result_number, 7);
        assert_eq!(spin.result_color, Color::Red);
        assert_eq!(spin.match_kind, MatchKind::Both);
        assert_eq!(spin.payout_multiplier, 25);
        assert_eq!(spin.winnings, 2_500);
        assert!(spin.is_jackpot());
    }

    #[test]
    fn test_color_only_pays_2x() {
        // 9 is red, bet was red 7.
        let spin = resolve_spin(&bet(100, Color::Red, 7), 9);
        assert_eq!(spin.match_kind, MatchKind::ColorOnly);
        assert_eq!(spin.winnings, 200);
    }

    #[test]
    fn test_miss_pays_nothing() {
        let spin = resolve_spin(&bet(100, Color::Red, 7), 8);
        assert_eq!(spin.result_color, Color::Black);
        assert_eq!(spin.match_kind, MatchKind::None);
        assert_eq!(spin.payout_multiplier, 0);
        assert_eq!(spin.winnings, 0);
    }

    #[test]
    fn test_zero_on_green() {
        let spin = resolve_spin(&bet(40, Color::Green, 0), 0);
        assert_eq!(spin.match_kind, MatchKind::Both);
        assert_eq!(spin.winnings, 1_000);

        // Red bet on a zero draw is a plain loss.
        let spin = resolve_spin(&bet(40, Color::Red, 1), 0);
        assert_eq!(spin.result_color, Color::Green);
        assert_eq!(spin.match_kind, MatchKind::None);
    }

    #[test]
    fn test_winnings_saturate() {
        let spin = resolve_spin(&bet(u64::MAX, Color::Black, 2), 2);
        assert_eq!(spin.winnings, u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_resolution_is_pure(
            amount in 1u64..1_000_000,
            number in 0u8..POCKET_COUNT,
            draw in 0u8..POCKET_COUNT,
        ) {
            let bet = bet(amount, Color::of(number), number);
            prop_assert_eq!(resolve_spin(&bet, draw), resolve_spin(&bet, draw));
        }

        #[test]
        fn prop_winnings_follow_match_table(
            amount in 1u64..1_000_000,
            number in 0u8..POCKET_COUNT,
            draw in 0u8..POCKET_COUNT,
        ) {
            let bet = bet(amount, Color::of(number), number);
            let spin = resolve_spin(&bet, draw);

            let expected = if draw == number {
                // A consistent pick that hits its number always matches its color too.
                MatchKind::Both
            } else if Color::of(draw) == Color::of(number) {
                MatchKind::ColorOnly
            } else {
                MatchKind::None
            };
            prop_assert_eq!(spin.match_kind, expected);
            prop_assert!([0, 2, 10, 25].contains(&spin.payout_multiplier));
            prop_assert_eq!(spin.winnings, amount * spin.payout_multiplier);
            prop_assert_eq!(spin.result_color == Color::Red, RED_NUMBERS.contains(&draw));
        }
    }
}
