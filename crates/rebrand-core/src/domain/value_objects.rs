//! Domain value objects: AppId, AppName, Version, IconRole.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity, validated on
//! construction. Once you hold an `AppId` it is well-formed; nothing
//! downstream re-checks it.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── AppId ────────────────────────────────────────────────────────────────────

/// A reverse-domain application identifier such as `com.example.app`.
///
/// Every segment matches `[a-z][a-z0-9]*` and there are at least two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);

impl AppId {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidAppId {
            value: value.to_string(),
            reason,
        };

        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() < 2 {
            return Err(invalid("needs at least two dot-separated segments".into()));
        }

        for (index, segment) in segments.iter().enumerate() {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(invalid(format!("segment {} is empty", index + 1))),
                Some(c) if !c.is_ascii_lowercase() => {
                    return Err(invalid(format!(
                        "segment '{segment}' must start with a lowercase letter"
                    )));
                }
                Some(_) => {}
            }
            if let Some(bad) = chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit())) {
                return Err(invalid(format!(
                    "segment '{segment}' contains '{bad}'; only a-z and 0-9 are allowed"
                )));
            }
        }

        Ok(Self(value.to_string()))
    }

    /// For literals known to be well-formed.
    pub(crate) fn new_unchecked(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Every segment except the last, e.g. `com.example` for `com.example.app`.
    pub fn namespace(&self) -> &str {
        // parse() guarantees at least one dot
        self.0.rsplit_once('.').map_or(&self.0, |(ns, _)| ns)
    }

    /// The id as a directory path, e.g. `com/example/app`.
    pub fn as_path(&self) -> String {
        self.0.replace('.', "/")
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AppId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AppId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AppId> for String {
    fn from(id: AppId) -> Self {
        id.0
    }
}

// ── AppName ──────────────────────────────────────────────────────────────────

/// Human-readable display name, e.g. `Task Flow`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAppName {
                value: value.to_string(),
                reason: "name cannot be empty".into(),
            });
        }
        if snake_case(trimmed).is_empty() {
            return Err(DomainError::InvalidAppName {
                value: value.to_string(),
                reason: "name has no letters or digits".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn new_unchecked(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase, `_`-separated form used as the package name.
    pub fn snake_case(&self) -> String {
        snake_case(&self.0)
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AppName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AppName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AppName> for String {
    fn from(name: AppName) -> Self {
        name.0
    }
}

/// Lowercase, collapse every run of non-alphanumerics into one `_`, trim
/// separators from both ends.
pub fn snake_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

// ── Version ──────────────────────────────────────────────────────────────────

/// `MAJOR.MINOR.PATCH` with an optional numeric `+BUILD` suffix.
///
/// Kept exactly as written: `1.02.3+007` reaches the manifest unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    pub const BASELINE: &'static str = "0.1.0";

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let (core, build) = match value.split_once('+') {
            Some((core, build)) => (core, Some(build)),
            None => (value, None),
        };

        let mut parts = core.split('.');
        let well_formed = parts.by_ref().take(3).filter(|p| is_number(p)).count() == 3
            && parts.next().is_none()
            && build.is_none_or(is_number);

        if well_formed {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidVersion {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `+BUILD` suffix, digits only.
    pub fn build(&self) -> Option<&str> {
        self.0.split_once('+').map(|(_, build)| build)
    }
}

fn is_number(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

impl Default for Version {
    fn default() -> Self {
        Self(Self::BASELINE.to_string())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.0
    }
}

// ── IconRole ─────────────────────────────────────────────────────────────────

/// The part an icon image plays in launcher icon generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconRole {
    Main,
    AdaptiveBackground,
    AdaptiveForeground,
    AdaptiveMonochrome,
    Notification,
}

impl IconRole {
    pub const ALL: [IconRole; 5] = [
        Self::Main,
        Self::AdaptiveBackground,
        Self::AdaptiveForeground,
        Self::AdaptiveMonochrome,
        Self::Notification,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::AdaptiveBackground => "adaptiveBackground",
            Self::AdaptiveForeground => "adaptiveForeground",
            Self::AdaptiveMonochrome => "adaptiveMonochrome",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for IconRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_accepts_reverse_domain() {
        let id = AppId::parse("com.example.purplestack").unwrap();
        assert_eq!(id.namespace(), "com.example");
        assert_eq!(id.as_path(), "com/example/purplestack");
        assert!(AppId::parse("io.app2").is_ok());
    }

    #[test]
    fn app_id_rejects_digit_leading_segment() {
        assert!(matches!(
            AppId::parse("com.1company.app"),
            Err(DomainError::InvalidAppId { .. })
        ));
    }

    #[test]
    fn app_id_rejects_uppercase_and_single_segment() {
        assert!(AppId::parse("com.Example.app").is_err());
        assert!(AppId::parse("purplestack").is_err());
        assert!(AppId::parse("com..app").is_err());
        assert!(AppId::parse("com.example.my_app").is_err());
        assert!(AppId::parse("").is_err());
    }

    #[test]
    fn snake_case_collapses_and_trims() {
        assert_eq!(snake_case("Task Flow"), "task_flow");
        assert_eq!(snake_case("  --My   App!! 2 "), "my_app_2");
        assert_eq!(snake_case("Purplestack"), "purplestack");
        assert_eq!(snake_case("!!!"), "");
    }

    #[test]
    fn app_name_rejects_symbol_only() {
        assert!(AppName::parse("   ").is_err());
        assert!(AppName::parse("***").is_err());
        assert_eq!(AppName::parse(" Task Flow ").unwrap().as_str(), "Task Flow");
    }

    #[test]
    fn version_requires_patch() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("1.2.x").is_err());
        assert!(Version::parse("1.2.3+").is_err());
        assert!(Version::parse("1.2.3+rc1").is_err());
    }

    #[test]
    fn version_accepts_build_suffix() {
        let v = Version::parse("1.2.3+4").unwrap();
        assert_eq!(v.build(), Some("4"));
        assert_eq!(v.to_string(), "1.2.3+4");
        assert_eq!(Version::parse("1.2.3").unwrap().build(), None);
    }

    #[test]
    fn version_keeps_the_text_as_written() {
        assert_eq!(Version::parse("1.02.3+007").unwrap().as_str(), "1.02.3+007");
        let long = "123456789012345678901234.0.0";
        assert_eq!(Version::parse(long).unwrap().to_string(), long);
    }

    #[test]
    fn version_default_is_baseline() {
        assert_eq!(Version::default().to_string(), Version::BASELINE);
    }
}
