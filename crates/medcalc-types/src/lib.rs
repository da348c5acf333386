//! # medcalc types
//!
//! Validated value types shared by the knowledge base, the HTTP layer and the CLI.

use std::fmt;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// A condition identifier contained something other than `a-z`, `0-9` or `_`
    #[error("invalid condition id '{0}': only lowercase ASCII letters, digits and '_' allowed")]
    InvalidConditionId(String),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a condition in the knowledge base, e.g. `common_cold`.
///
/// Always lowercase ASCII letters, digits and underscores; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionId(String);

impl ConditionId {
    /// Parses an already-normalised identifier.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::InvalidConditionId` if any
    /// character falls outside `[a-z0-9_]`.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let raw = input.as_ref();
        if raw.trim().is_empty() {
            return Err(TextError::Empty);
        }

        let ok = raw
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_'));
        if !ok {
            return Err(TextError::InvalidConditionId(raw.to_owned()));
        }

        Ok(Self(raw.to_owned()))
    }

    /// Normalises a user-supplied condition name into lookup form.
    ///
    /// Lowercases and turns spaces into underscores. The result is not validated; an input such
    /// as `"Common Cold"` becomes `"common_cold"`, anything else simply fails to match.
    pub fn normalise(name: &str) -> String {
        name.to_lowercase().replace(' ', "_")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier with underscores turned into spaces, as it would appear in free text.
    pub fn phrase(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Human-readable title-cased form, e.g. `Common Cold`.
    pub fn display_name(&self) -> String {
        title_case(&self.phrase())
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConditionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ConditionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ConditionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ConditionId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Title-cases `input`: the first letter of every run of letters is uppercased, the rest of the
/// run lowercased. Non-letters pass through and start a new run.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}
