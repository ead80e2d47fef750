use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocChatError;

/// The session model, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// One active session id, replaced on every upload.
    Single,
    /// An ordered list of document ids, all referenced by every question.
    #[default]
    Multi,
}

impl SessionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }
}

impl fmt::Display for SessionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionPolicy {
    type Err = DocChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(DocChatError::config(format!(
                "Unknown session policy '{other}' (expected 'single' or 'multi')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("single".parse::<SessionPolicy>().unwrap(), SessionPolicy::Single);
        assert_eq!(" MULTI ".parse::<SessionPolicy>().unwrap(), SessionPolicy::Multi);
        assert!("both".parse::<SessionPolicy>().unwrap_err().to_string().contains("both"));
    }

    #[test]
    fn test_default_is_multi() {
        assert_eq!(SessionPolicy::default(), SessionPolicy::Multi);
    }
}
