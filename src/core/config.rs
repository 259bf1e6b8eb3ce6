//! Environment configuration.
//!
//! - `RewardConfig`: the reward assigned to each outcome
//! - `EnvConfig`: turn limit, opening placement, seeding, opponent depth
//!
//! Both are plain serde-serializable values with builder-style setters, so a
//! training harness can load them from JSON and tweak individual fields.
//! Deserializing an `EnvConfig` runs [`EnvConfig::validate`], so a loaded
//! config is as sound as one built through the setters.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Reward policy.
///
/// Defaults reproduce the shaping used when the environment was first trained
/// against: asymmetric stalemate rewards, a large bonus for wiping out the
/// opponent, and no per-turn decay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Both sides blocked, perspective holds more cells.
    pub stalemate_win: f32,

    /// Both sides blocked, perspective holds fewer cells.
    pub stalemate_loss: f32,

    /// Both sides blocked with equal cell counts.
    pub stalemate_draw: f32,

    /// Opposing side has no cells left.
    pub elimination_win: f32,

    /// Perspective side has no cells left.
    pub elimination_loss: f32,

    /// Caller chose an illegal action while legal ones existed.
    pub illegal_action: f32,

    /// Subtracted once per completed half-move on non-terminal steps
    /// (0 = flat zero baseline).
    pub turn_decay: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            stalemate_win: 50.0,
            stalemate_loss: -10.0,
            stalemate_draw: 0.0,
            elimination_win: 100.0,
            elimination_loss: -10.0,
            illegal_action: -5.0,
            turn_decay: 0.0,
        }
    }
}

impl RewardConfig {
    /// Set the illegal-action penalty.
    #[must_use]
    pub fn with_illegal_action(mut self, reward: f32) -> Self {
        self.illegal_action = reward;
        self
    }

    /// Set the per-turn decay applied to non-terminal steps.
    #[must_use]
    pub fn with_turn_decay(mut self, decay: f32) -> Self {
        self.turn_decay = decay;
        self
    }

    /// Reward for a non-terminal step after `turn_count` half-moves.
    #[must_use]
    pub fn non_terminal(&self, turn_count: u32) -> f32 {
        -self.turn_decay * turn_count as f32
    }
}

/// Environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedEnvConfig")]
pub struct EnvConfig {
    /// Half-moves after which the episode is truncated.
    pub turn_limit: u32,

    /// Randomize the opening placement on reset.
    pub random_start: bool,

    /// With `random_start`, the chance that a reset still uses the fixed
    /// corner opening.
    pub fixed_start_probability: f64,

    /// Seed for the session RNG.
    pub seed: u64,

    /// Search depth handed to the opponent oracle.
    pub opponent_depth: u32,

    /// Reward policy.
    pub rewards: RewardConfig,
}

/// `EnvConfig` as read off the wire, before validation.
#[derive(Deserialize)]
struct UncheckedEnvConfig {
    turn_limit: u32,
    random_start: bool,
    fixed_start_probability: f64,
    seed: u64,
    opponent_depth: u32,
    rewards: RewardConfig,
}

impl TryFrom<UncheckedEnvConfig> for EnvConfig {
    type Error = ConfigError;

    fn try_from(raw: UncheckedEnvConfig) -> Result<Self, Self::Error> {
        let config = Self {
            turn_limit: raw.turn_limit,
            random_start: raw.random_start,
            fixed_start_probability: raw.fixed_start_probability,
            seed: raw.seed,
            opponent_depth: raw.opponent_depth,
            rewards: raw.rewards,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            turn_limit: 100,
            random_start: false,
            fixed_start_probability: 1.0 / 11.0,
            seed: 42,
            opponent_depth: 3,
            rewards: RewardConfig::default(),
        }
    }
}

impl EnvConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the fields a session relies on.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for a zero turn limit or a fixed-start probability
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_limit == 0 {
            return Err(ConfigError::ZeroTurnLimit);
        }
        if !(0.0..=1.0).contains(&self.fixed_start_probability) {
            return Err(ConfigError::InvalidProbability(self.fixed_start_probability));
        }
        Ok(())
    }

    /// Set the truncation limit.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    #[must_use]
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        assert!(limit > 0, "Turn limit must be at least 1");
        self.turn_limit = limit;
        self
    }

    /// Enable or disable randomized openings.
    #[must_use]
    pub fn with_random_start(mut self, enabled: bool) -> Self {
        self.random_start = enabled;
        self
    }

    /// Set the fixed-opening probability used with `random_start`.
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside `[0, 1]`.
    #[must_use]
    pub fn with_fixed_start_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be within [0, 1]"
        );
        self.fixed_start_probability = probability;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the opponent search depth.
    #[must_use]
    pub fn with_opponent_depth(mut self, depth: u32) -> Self {
        self.opponent_depth = depth;
        self
    }

    /// Replace the reward policy.
    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.turn_limit, 100);
        assert!(!config.random_start);
        assert_eq!(config.seed, 42);
        assert_eq!(config.opponent_depth, 3);
        assert_eq!(config.rewards.elimination_win, 100.0);
        assert_eq!(config.rewards.illegal_action, -5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EnvConfig::new()
            .with_turn_limit(20)
            .with_random_start(true)
            .with_fixed_start_probability(0.0)
            .with_seed(7)
            .with_opponent_depth(1)
            .with_rewards(RewardConfig::default().with_turn_decay(0.01));

        assert_eq!(config.turn_limit, 20);
        assert!(config.random_start);
        assert_eq!(config.fixed_start_probability, 0.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.opponent_depth, 1);
        assert_eq!(config.rewards.turn_decay, 0.01);
    }

    #[test]
    fn test_non_terminal_reward() {
        let flat = RewardConfig::default();
        assert_eq!(flat.non_terminal(30), 0.0);

        let decaying = RewardConfig::default().with_turn_decay(0.5);
        assert_eq!(decaying.non_terminal(4), -2.0);
    }

    #[test]
    #[should_panic(expected = "Turn limit must be at least 1")]
    fn test_zero_turn_limit() {
        let _ = EnvConfig::new().with_turn_limit(0);
    }

    #[test]
    fn test_serialization() {
        let config = EnvConfig::default()
            .with_seed(99)
            .with_fixed_start_probability(0.25);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_validate() {
        assert_eq!(EnvConfig::default().validate(), Ok(()));

        let mut config = EnvConfig::default();
        config.turn_limit = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTurnLimit));

        let mut config = EnvConfig::default();
        config.fixed_start_probability = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialization_rejects_invalid_values() {
        let mut value = serde_json::to_value(EnvConfig::default()).unwrap();
        value["fixed_start_probability"] = serde_json::json!(1.5);
        let err = serde_json::from_value::<EnvConfig>(value).unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));

        let mut value = serde_json::to_value(EnvConfig::default()).unwrap();
        value["turn_limit"] = serde_json::json!(0);
        let err = serde_json::from_value::<EnvConfig>(value).unwrap_err();
        assert!(err.to_string().contains("turn limit must be at least 1"));
    }
}
