//! Classification of tag inputs into text, binary, and metadata variants.

use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeDelta, Utc};
use etagger_core::error::{CoreError, CoreResult};
use serde_json::{Map, Value};

/// Size and last modification time of a stored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stat {
    /// Size in bytes.
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl Stat {
    #[must_use]
    pub const fn new(size: u64, modified: DateTime<Utc>) -> Self {
        Self { size, modified }
    }

    /// ## Summary
    /// Modification time as whole milliseconds since the Unix epoch.
    #[must_use]
    pub fn modified_millis(&self) -> i64 {
        self.modified.timestamp_millis()
    }
}

impl TryFrom<&std::fs::Metadata> for Stat {
    type Error = CoreError;

    /// ## Summary
    /// Adapts already-obtained filesystem metadata.
    ///
    /// ## Errors
    /// Returns `InvalidArgument` if the platform does not report a modification
    /// time, or reports one outside the representable range.
    fn try_from(metadata: &std::fs::Metadata) -> CoreResult<Self> {
        let modified = metadata.modified().map_err(|e| {
            CoreError::invalid_argument(format!("modification time unavailable: {e}"))
        })?;
        let modified = datetime_from_system_time(modified).ok_or_else(|| {
            CoreError::invalid_argument("modification time is out of range")
        })?;

        Ok(Self::new(metadata.len(), modified))
    }
}

pub(crate) fn datetime_from_system_time(time: SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            DateTime::<Utc>::UNIX_EPOCH.checked_add_signed(TimeDelta::from_std(after).ok()?)
        }
        Err(before) => DateTime::<Utc>::UNIX_EPOCH
            .checked_sub_signed(TimeDelta::from_std(before.duration()).ok()?),
    }
}

/// Input to tag generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity<'a> {
    /// Text, measured and hashed as UTF-8.
    Text(&'a str),
    Binary(Cow<'a, [u8]>),
    /// Resource metadata; tagged without reading content.
    Metadata(Stat),
}

impl Entity<'_> {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Binary(_) => "binary",
            Self::Metadata(_) => "metadata",
        }
    }

    #[must_use]
    pub const fn is_metadata(&self) -> bool {
        matches!(self, Self::Metadata(_))
    }
}

impl<'a> From<&'a str> for Entity<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Entity<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Entity<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Binary(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Entity<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Binary(Cow::Borrowed(bytes))
    }
}

impl<'a> From<&'a Vec<u8>> for Entity<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Binary(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for Entity<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(Cow::Owned(bytes))
    }
}

impl From<Stat> for Entity<'_> {
    fn from(stat: Stat) -> Self {
        Self::Metadata(stat)
    }
}

impl<'a> TryFrom<&'a Value> for Entity<'a> {
    type Error = CoreError;

    /// ## Summary
    /// Classifies an untyped value.
    ///
    /// Strings are text, arrays of integers in `0..=255` are bytes, and objects
    /// carrying a non-negative integer `size` plus an integer `mtime` (epoch
    /// milliseconds) are metadata.
    ///
    /// ## Errors
    /// Returns `InvalidArgument` for anything else.
    fn try_from(value: &'a Value) -> CoreResult<Self> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Array(items) => items
                .iter()
                .map(byte_from_value)
                .collect::<CoreResult<Vec<u8>>>()
                .map(Self::from),
            Value::Object(fields) => stat_from_fields(fields).map(Self::Metadata),
            Value::Null => Err(CoreError::invalid_argument("got null")),
            Value::Bool(_) => Err(CoreError::invalid_argument("got a boolean")),
            Value::Number(_) => Err(CoreError::invalid_argument("got a number")),
        }
    }
}

fn byte_from_value(item: &Value) -> CoreResult<u8> {
    item.as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| {
            CoreError::invalid_argument(format!("byte sequence item {item} is not in 0..=255"))
        })
}

fn stat_from_fields(fields: &Map<String, Value>) -> CoreResult<Stat> {
    let size = fields
        .get("size")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            CoreError::invalid_argument("metadata record needs a non-negative integer size")
        })?;
    let millis = fields
        .get("mtime")
        .and_then(Value::as_i64)
        .ok_or_else(|| CoreError::invalid_argument("metadata record needs an integer mtime"))?;
    let modified = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CoreError::invalid_argument(format!("mtime {millis} is out of range")))?;

    Ok(Stat::new(size, modified))
}
