// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip identifiers.

use alloc::format;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

/// Caller-supplied token pairing one trigger element with one floating element.
///
/// Ids are embedded in attribute values and in a CSS dashed ident
/// (`--<id>`), so they are restricted to ASCII letters, digits, `-` and `_`.
/// Uniqueness within a document is the caller's responsibility.
///
/// ```
/// use understory_trigger::TooltipId;
///
/// let id = TooltipId::new("save-hint").unwrap();
/// assert_eq!(id.anchor_name(), "--save-hint");
/// assert!(TooltipId::new("two words").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TooltipId(String);

/// Error returned by [`TooltipId::new`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTooltipId {
    /// The id was empty.
    #[error("tooltip id is empty")]
    Empty,
    /// The id contained a character outside `[A-Za-z0-9_-]`.
    #[error("tooltip id `{id}` contains `{ch}`; only ASCII letters, digits, `-` and `_` are allowed")]
    InvalidChar {
        /// The rejected id.
        id: String,
        /// The first offending character.
        ch: char,
    },
}

impl TooltipId {
    /// Validate and wrap an id.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidTooltipId> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidTooltipId::Empty);
        }
        if let Some(ch) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(InvalidTooltipId::InvalidChar { id, ch });
        }
        Ok(Self(id))
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The CSS anchor name derived from this id, e.g. `--save-hint`.
    pub fn anchor_name(&self) -> String {
        format!("--{}", self.0)
    }
}

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TooltipId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TooltipId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TooltipId {
    type Error = InvalidTooltipId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TooltipId> for String {
    fn from(value: TooltipId) -> Self {
        value.0
    }
}
