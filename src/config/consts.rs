/// Bytes of the SHA-256 digest kept in a unit identifier (8 hex chars)
pub const UNIT_ID_BYTES: usize = 4;
/// Tokens added to the reward pool per reward-class outcome
pub const DEFAULT_REWARD_AMOUNT: u64 = 10;
/// Default cap on paths enumerated per round
pub const DEFAULT_MAX_PATHS: usize = 100_000;
/// Default cap on units per enumerated path
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Offset on `x` between a spent unit and the successor minted from it
pub const SUCCESSOR_X_STEP: f64 = 0.1;
/// Rounds run by a scenario that does not say otherwise
pub const DEFAULT_ROUNDS: u64 = 1;
