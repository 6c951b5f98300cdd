//! The two reserve levels the policy can produce.

/// Reserve level to apply to the battery system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Standard reserve, no actionable warning.
    Normal,
    /// Raised reserve while a severe warning is active.
    Elevated,
}

impl Decision {
    /// Control payload for the normal reserve.
    pub const NORMAL_PAYLOAD: &'static str = r#"{"value": 25}"#;
    /// Control payload for the elevated reserve.
    pub const ELEVATED_PAYLOAD: &'static str = r#"{"value": 50}"#;

    /// Minimum state of charge in percent.
    pub fn reserve_percent(self) -> u8 {
        match self {
            Decision::Normal => 25,
            Decision::Elevated => 50,
        }
    }

    /// JSON payload published to the MinimumSocLimit setting.
    pub fn payload(self) -> &'static str {
        match self {
            Decision::Normal => Self::NORMAL_PAYLOAD,
            Decision::Elevated => Self::ELEVATED_PAYLOAD,
        }
    }

    pub fn is_elevated(self) -> bool {
        matches!(self, Decision::Elevated)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Normal => write!(f, "normal ({}%)", self.reserve_percent()),
            Decision::Elevated => write!(f, "elevated ({}%)", self.reserve_percent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payloads_are_value_objects() {
        for decision in [Decision::Normal, Decision::Elevated] {
            let json: serde_json::Value = serde_json::from_str(decision.payload()).unwrap();
            assert_eq!(json["value"], u64::from(decision.reserve_percent()));
            assert_eq!(json.as_object().unwrap().len(), 1);
        }
    }

    #[test]
    fn test_payload_text() {
        assert_eq!(Decision::Normal.payload(), "{\"value\": 25}");
        assert_eq!(Decision::Elevated.payload(), "{\"value\": 50}");
    }

    #[test]
    fn test_display() {
        assert_eq!(Decision::Normal.to_string(), "normal (25%)");
        assert_eq!(Decision::Elevated.to_string(), "elevated (50%)");
        assert!(Decision::Elevated.is_elevated());
        assert!(!Decision::Normal.is_elevated());
    }
}
