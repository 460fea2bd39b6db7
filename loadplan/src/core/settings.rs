//! Environment-level settings shared by every plan a builder produces.
//!
//! Scenario files describe the target request; these settings describe the
//! server under test and how the login step hands out its token.

use anyhow::{Result, anyhow};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::method::HttpMethod;

pub const DEFAULT_LOGIN_PATH: &str = "_ah/login?action=Log+In&email=${email}&isAdmin=${isAdmin}&continue=http://localhost:8080/webapi/auth";

/// Builder settings (TOML). Missing fields fall back to the local dev server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BuilderSettings {
    pub server: ServerSettings,
    pub login: LoginSettings,
    pub token: TokenSettings,
    pub data_source: DataSourceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub domain: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            domain: "localhost".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoginSettings {
    /// May reference data-source columns, e.g. `${email}`.
    pub path: String,
    pub method: HttpMethod,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_LOGIN_PATH.to_string(),
            method: HttpMethod::Post,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenSettings {
    /// Applied to login response headers; group 1 is the token.
    pub regex: String,
    /// Variable the captured token is stored under.
    pub variable: String,
    /// Request header that carries the token on mutating requests.
    pub header: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            regex: "CSRF-TOKEN=(.+?);".to_string(),
            variable: "csrfToken".to_string(),
            header: "X-CSRF-TOKEN".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataSourceSettings {
    pub delimiter: String,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            delimiter: "|".to_string(),
        }
    }
}

impl BuilderSettings {
    pub fn validate(&self) -> Result<()> {
        if self.server.domain.trim().is_empty() {
            return Err(anyhow!("server.domain must be non-empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be > 0"));
        }
        if self.login.path.trim().is_empty() {
            return Err(anyhow!("login.path must be non-empty"));
        }
        let regex = Regex::new(&self.token.regex)
            .map_err(|err| anyhow!("token.regex is invalid: {err}"))?;
        if regex.captures_len() < 2 {
            return Err(anyhow!("token.regex must contain a capture group"));
        }
        if self.token.variable.trim().is_empty() {
            return Err(anyhow!("token.variable must be non-empty"));
        }
        if self.token.header.trim().is_empty() {
            return Err(anyhow!("token.header must be non-empty"));
        }
        if self.data_source.delimiter.chars().count() != 1 {
            return Err(anyhow!("data_source.delimiter must be a single character"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        BuilderSettings::default().validate().expect("valid defaults");
    }

    #[test]
    fn rejects_regex_without_group() {
        let mut settings = BuilderSettings::default();
        settings.token.regex = "CSRF-TOKEN=.+?;".to_string();
        let err = settings.validate().expect_err("no group");
        assert!(err.to_string().contains("capture group"));
    }

    #[test]
    fn rejects_unparseable_regex() {
        let mut settings = BuilderSettings::default();
        settings.token.regex = "(".to_string();
        let err = settings.validate().expect_err("bad regex");
        assert!(err.to_string().contains("token.regex is invalid"));
    }

    #[test]
    fn rejects_multi_char_delimiter() {
        let mut settings = BuilderSettings::default();
        settings.data_source.delimiter = "||".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: BuilderSettings =
            toml::from_str("[server]\nport = 9090\n").expect("parse");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.domain, "localhost");
        assert_eq!(settings.token, TokenSettings::default());
    }
}
