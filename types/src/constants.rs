/// Highest pocket on a single-zero wheel.
pub const MAX_NUMBER: u8 = 36;

/// Number of pockets on a single-zero wheel.
pub const POCKET_COUNT: u8 = MAX_NUMBER + 1;

/// Red pockets on a European wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Black pockets on a European wheel.
pub const BLACK_NUMBERS: [u8; 18] = [
    2, 4, 6, 8, 10, 11, 13, 15, 17, 20, 22, 24, 26, 28, 29, 31, 33, 35,
];

/// Payout multipliers on the full bet amount (the stake is deducted before the draw).
pub const BOTH_MULTIPLIER: u64 = 25;
pub const NUMBER_ONLY_MULTIPLIER: u64 = 10;
pub const COLOR_ONLY_MULTIPLIER: u64 = 2;

/// Starting balance of a fresh session.
pub const STARTING_MONEY: u64 = 2_500;

/// Balance that pays off the debt.
pub const TARGET_MONEY: u64 = 50_000;

/// Clock budget in seconds (six "hours" of soul debt, one second per minute).
pub const TOTAL_SECONDS: f64 = 360.0;

/// Seconds burned by a jackpot.
pub const JACKPOT_PENALTY_SECONDS: f64 = 30.0;

/// Seconds burned by a sacrifice.
pub const SACRIFICE_PENALTY_SECONDS: f64 = 20.0;

/// Turns that must pass after unlock or use before the sacrifice is ready again.
pub const SACRIFICE_COOLDOWN_TURNS: u32 = 3;

/// Inclusive turn range the sacrifice intro threshold is sampled from.
pub const SACRIFICE_INTRO_MIN_TURN: u32 = 2;
pub const SACRIFICE_INTRO_MAX_TURN: u32 = 3;

/// Per-tick clock decrement bounds (seconds).
pub const TICK_DECREMENT_MIN: f64 = 0.5;
pub const TICK_DECREMENT_MAX: f64 = 2.0;

/// Delay between clock ticks (seconds).
pub const TICK_INTERVAL_MIN: f64 = 2.0;
pub const TICK_INTERVAL_MAX: f64 = 6.0;

/// Winnings at or above this read as a jackpot on the payout display.
pub const JACKPOT_DISPLAY_THRESHOLD: u64 = 5_000;

/// Winnings at or above this read as a huge win on the payout display.
pub const HUGE_WIN_DISPLAY_THRESHOLD: u64 = 1_000;
