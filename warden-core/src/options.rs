// Warden configuration options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level Warden configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WardenOptions {
    /// Database / schema routing configuration.
    pub database: DatabaseOptions,
    /// Authorization-code configuration.
    pub codes: CodeOptions,
}

impl Default for WardenOptions {
    fn default() -> Self {
        Self {
            database: DatabaseOptions::default(),
            codes: CodeOptions::default(),
        }
    }
}

impl WardenOptions {
    /// Validate the entire configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.database
            .validate()
            .map_err(|e| format!("database validation failed: {}", e))?;
        self.codes
            .validate()
            .map_err(|e| format!("codes validation failed: {}", e))?;
        Ok(())
    }
}

/// Database dialect and schema routing options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Database dialect identifier (e.g. "POSTGRESQL", "H2"). Unset or
    /// unrecognized dialects use the generic schema switch command.
    pub dialect: Option<String>,
    /// Schema used before any tenant is resolved.
    pub default_schema: String,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            dialect: None,
            default_schema: "public".to_string(),
        }
    }
}

impl DatabaseOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_schema.is_empty() {
            return Err("default schema cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Authorization-code issuance options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeOptions {
    /// How long an issued code stays redeemable.
    #[serde(with = "humantime_serde")]
    pub code_ttl: Duration,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            code_ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CodeOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.code_ttl.as_secs() == 0 {
            return Err("code TTL must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WardenOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let options = WardenOptions {
            codes: CodeOptions {
                code_ttl: Duration::from_secs(0),
            },
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn options_round_trip_through_json() {
        let options = WardenOptions {
            database: DatabaseOptions {
                dialect: Some("POSTGRESQL".to_string()),
                default_schema: "warden".to_string(),
            },
            codes: CodeOptions::default(),
        };

        let json = serde_json::to_string(&options).unwrap();
        let back: WardenOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
