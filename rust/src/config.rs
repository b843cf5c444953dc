//! Configuration types for the scheduling engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Order in which equally-ready tasks leave the topological sorter.
///
/// This never changes computed times; it only decides the order of
/// `ScheduleReport::order` and which of several equal critical paths is
/// listed first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// FIFO ready queue seeded in registration order.
    #[default]
    Registration,
    /// Lexicographically smallest task name first.
    Name,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown tie-break strategy: {0}")]
pub struct UnknownTieBreak(pub String);

impl FromStr for TieBreak {
    type Err = UnknownTieBreak;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(Self::Registration),
            "name" => Ok(Self::Name),
            other => Err(UnknownTieBreak(other.to_string())),
        }
    }
}

/// Configuration for [`crate::CriticalPathScheduler`].
#[derive(Clone, Debug, Default)]
pub struct ScheduleConfig {
    /// Tie-break among tasks that become ready at the same time.
    pub tie_break: TieBreak,
    /// Maximum number of paths a single enumeration emits (None = unlimited).
    pub path_limit: Option<usize>,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl ScheduleConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_path_limit(mut self, limit: usize) -> Self {
        self.path_limit = Some(limit);
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.tie_break, TieBreak::Registration);
        assert_eq!(config.path_limit, None);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_builder_methods() {
        let config = ScheduleConfig::default()
            .with_tie_break(TieBreak::Name)
            .with_path_limit(10)
            .with_verbosity(2);
        assert_eq!(config.tie_break, TieBreak::Name);
        assert_eq!(config.path_limit, Some(10));
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn test_tie_break_parse() {
        assert_eq!("name".parse::<TieBreak>(), Ok(TieBreak::Name));
        assert_eq!(
            "registration".parse::<TieBreak>(),
            Ok(TieBreak::Registration)
        );
        assert_eq!(
            "random".parse::<TieBreak>(),
            Err(UnknownTieBreak("random".to_string()))
        );
        assert_eq!(TieBreak::Name.to_string(), "name");
    }
}
