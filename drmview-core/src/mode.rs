//! Runtime mode configuration for Drmview.

use serde::{Deserialize, Serialize};

/// Where video metadata comes from.
///
/// `Offline` never touches the network and answers lookups from the built-in
/// sample table. `Live` queries the configured metadata endpoint, provided a
/// credential is configured as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuntimeMode {
    /// Query the remote metadata API
    #[default]
    Live,
    /// Serve deterministic sample data without network access
    Offline,
}

impl RuntimeMode {
    /// Check if running without network access.
    pub fn is_offline(self) -> bool {
        matches!(self, Self::Offline)
    }

    /// Check if remote lookups are allowed.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "LIVE"),
            Self::Offline => write!(f, "OFFLINE"),
        }
    }
}

impl std::str::FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" | "online" => Ok(Self::Live),
            "offline" | "mock" => Ok(Self::Offline),
            _ => Err(format!(
                "Invalid runtime mode: '{s}'. Valid options are: live, offline"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("live".parse::<RuntimeMode>(), Ok(RuntimeMode::Live));
        assert_eq!("MOCK".parse::<RuntimeMode>(), Ok(RuntimeMode::Offline));
        assert!("staging".parse::<RuntimeMode>().is_err());
    }

    #[test]
    fn test_default_is_live() {
        assert!(RuntimeMode::default().is_live());
        assert_eq!(RuntimeMode::Offline.to_string(), "OFFLINE");
    }
}
