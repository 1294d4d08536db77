//! Country/region codes as used by the directory URLs and the num-list name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A two-letter country or region code, stored lowercase.
///
/// The lowercase form is the URL path segment (`/countries/jp`), the
/// uppercase form prefixes the generated list name (`JP_ASN`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Returns the lowercase code used in request paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the uppercase code used in script output.
    pub fn upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Returns the num-list name, e.g. `CN_ASN`.
    pub fn list_name(&self) -> String {
        format!("{}_ASN", self.upper())
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self("us".to_string())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CountryCodeError(s.to_string()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid country code '{0}'. Expected two letters, e.g. us, cn, jp, hk")]
pub struct CountryCodeError(String);
