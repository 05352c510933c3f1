//! Game configuration.
//!
//! `GameConfig` fixes the table size and hand targets. `SpecialRules`
//! switches the optional special-card actions on or off; when a rule is
//! off, cards carrying that action fall back to a plain placement.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Largest supported table. Round and board masks are sized for it.
pub const MAX_PLAYERS: usize = 4;

/// Optional special-card rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRules {
    /// Disarm-character closes a position to styles and weapons.
    pub disarm: bool,
    /// Capture-weapon takes the weapon into the capturer's hand.
    pub capture_weapon: bool,
    /// Retain-weapon cards go back to their owner's hand when removed
    /// mid-challenge.
    pub retain_weapon: bool,
}

impl Default for SpecialRules {
    fn default() -> Self {
        Self {
            disarm: true,
            capture_weapon: true,
            retain_weapon: true,
        }
    }
}

impl SpecialRules {
    /// Every optional rule switched off.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            disarm: false,
            capture_weapon: false,
            retain_weapon: false,
        }
    }
}

/// Top-level game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2..=4).
    pub player_count: usize,

    /// Characters each hand is topped up to at the start of a challenge.
    pub target_characters: usize,

    /// Skills each hand is topped up to at the start of a challenge.
    pub target_skills: usize,

    pub rules: SpecialRules,
}

impl GameConfig {
    /// Create a configuration with standard hand sizes.
    ///
    /// Panics if the player count is unsupported.
    pub fn new(player_count: usize) -> Self {
        let config = Self {
            player_count,
            target_characters: 4,
            target_skills: 6,
            rules: SpecialRules::default(),
        };
        if let Err(e) = config.validate() {
            panic!("{e}");
        }
        config
    }

    /// Check the configuration, e.g. after deserializing it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount {
                count: self.player_count,
                max: MAX_PLAYERS,
            });
        }
        if self.target_characters == 0 {
            return Err(ConfigError::Zero("target_characters"));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_hand_targets(mut self, characters: usize, skills: usize) -> Self {
        self.target_characters = characters;
        self.target_skills = skills;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: SpecialRules) -> Self {
        self.rules = rules;
        self
    }
}
