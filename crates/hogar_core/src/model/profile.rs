//! Profile progression record and task priority weights.
//!
//! # Responsibility
//! - Hold the aggregate level/XP/completion state of one household.
//! - Map task priority to its fixed XP weight.
//!
//! # Invariants
//! - `level >= 1`.
//! - `xp < compute_level_requirement(level)` once normalized by progression.
//! - Persisted shape is the flat record `{level, xp, totalTasksCompleted}`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// XP granted (or withdrawn) for a low priority task.
pub const XP_LOW: u32 = 10;
/// XP granted (or withdrawn) for a medium priority task.
pub const XP_MEDIUM: u32 = 20;
/// XP granted (or withdrawn) for a high priority task.
pub const XP_HIGH: u32 = 30;

/// Task priority; decides how much XP a completion is worth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Fixed XP delta applied on completion/un-completion.
    pub fn xp_delta(self) -> u32 {
        match self {
            Self::Low => XP_LOW,
            Self::Medium => XP_MEDIUM,
            Self::High => XP_HIGH,
        }
    }

    /// Stable lowercase label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses textual priority input from outer layers (FFI/CLI).
    ///
    /// Accepts `low|medium|high`, case-insensitive and trimmed.
    pub fn parse(value: &str) -> Result<Self, PriorityParseError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(PriorityParseError(value.trim().to_string())),
        }
    }
}

/// Priority text outside the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityParseError(pub String);

impl Display for PriorityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported priority `{}`; expected low|medium|high",
            self.0
        )
    }
}

impl Error for PriorityParseError {}

/// Aggregate gamification progress of one household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Current level, starting at 1.
    pub level: u32,
    /// XP banked towards the next level.
    pub xp: u32,
    /// Net completed tasks (completions minus reverted completions, floored at 0).
    pub total_tasks_completed: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_tasks_completed: 0,
        }
    }
}

/// Profile state that cannot come out of progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileValidationError {
    ZeroLevel,
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroLevel => write!(f, "profile level must be >= 1"),
        }
    }
}

impl Error for ProfileValidationError {}

impl Profile {
    /// Checks invariants that persisted data could violate.
    ///
    /// Only the level floor is checked; an un-normalized `xp` is repaired by
    /// the next progression step instead of being rejected.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.level == 0 {
            return Err(ProfileValidationError::ZeroLevel);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Profile, ProfileValidationError};

    #[test]
    fn priority_weights_are_fixed() {
        assert_eq!(Priority::Low.xp_delta(), 10);
        assert_eq!(Priority::Medium.xp_delta(), 20);
        assert_eq!(Priority::High.xp_delta(), 30);
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse(" HIGH ").unwrap(), Priority::High);
        assert_eq!(Priority::parse("low").unwrap(), Priority::Low);
        let err = Priority::parse("urgent").unwrap_err();
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn default_profile_starts_at_level_one() {
        let profile = Profile::default();
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.total_tasks_completed, 0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_level() {
        let profile = Profile {
            level: 0,
            xp: 0,
            total_tasks_completed: 0,
        };
        assert_eq!(profile.validate(), Err(ProfileValidationError::ZeroLevel));
    }
}
