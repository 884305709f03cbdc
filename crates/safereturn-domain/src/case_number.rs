//! Case numbers — the human-facing identifier of an approved case.
//!
//! Format: `LP/<DISTRICT>/<YYYY>/<MM>/<NNNN>`, where `<NNNN>` is a 4-digit
//! zero-padded sequence scoped to (district, year, month). Sequences above
//! 9999 print unpadded; the 4-digit width is a minimum, not a cap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// District used when the approving admin has none assigned.
pub const DEFAULT_DISTRICT: &str = "GENERAL";

/// A parsed case number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseNumber {
    pub district: String,
    pub year: i32,
    pub month: u32,
    pub seq: u32,
}

impl CaseNumber {
    pub fn new(district: impl Into<String>, year: i32, month: u32, seq: u32) -> Self {
        Self {
            district: district.into(),
            year,
            month,
            seq,
        }
    }

    /// The shared prefix of all case numbers in one (district, year, month)
    /// scope, including the trailing slash.
    pub fn scope_prefix(district: &str, year: i32, month: u32) -> String {
        format!("LP/{district}/{year}/{month:02}/")
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LP/{}/{}/{:02}/{:04}",
            self.district, self.year, self.month, self.seq
        )
    }
}

/// Error returned when a string is not a well-formed case number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("malformed case number")]
pub struct ParseCaseNumberError;

impl FromStr for CaseNumber {
    type Err = ParseCaseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let (Some("LP"), Some(district), Some(year), Some(month), Some(seq), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(ParseCaseNumberError);
        };
        if district.is_empty() {
            return Err(ParseCaseNumberError);
        }
        let year: i32 = year.parse().map_err(|_| ParseCaseNumberError)?;
        let month: u32 = month.parse().map_err(|_| ParseCaseNumberError)?;
        if !(1..=12).contains(&month) {
            return Err(ParseCaseNumberError);
        }
        let seq: u32 = seq.parse().map_err(|_| ParseCaseNumberError)?;
        Ok(Self {
            district: district.to_owned(),
            year,
            month,
            seq,
        })
    }
}

impl Serialize for CaseNumber {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CaseNumber {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
