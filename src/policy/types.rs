/*!
 * Admission Policy Types
 * Domain types for selecting how conflicting readers and writers are ordered
 */

use crate::errors::PolicyParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Admission policy of a [`ReadersWritersLock`](crate::ReadersWritersLock)
///
/// # Starvation
/// - `ReaderPriority` can starve writers under continuous read load
/// - `WriterPriority` can starve readers under continuous write load
/// - `Fair` admits requests in arrival order and starves nobody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Readers enter whenever no writer is active
    ReaderPriority,
    /// Readers stay out while any writer is active or waiting
    WriterPriority,
    /// Strict arrival order across readers and writers
    Fair,
}

impl Policy {
    /// Every policy, in the order the demo driver exercises them
    pub const ALL: [Policy; 3] = [Self::ReaderPriority, Self::WriterPriority, Self::Fair];

    /// Convert to string representation
    ///
    /// # Performance
    /// Hot path - used in every structured log field
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReaderPriority => "reader_priority",
            Self::WriterPriority => "writer_priority",
            Self::Fair => "fair",
        }
    }

    /// Whether this policy keeps an admission queue
    #[inline(always)]
    pub const fn is_queued(&self) -> bool {
        matches!(self, Self::Fair)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::Fair
    }
}

impl FromStr for Policy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reader_priority" | "readerpriority" | "readers" | "reader" => Ok(Self::ReaderPriority),
            "writer_priority" | "writerpriority" | "writers" | "writer" => Ok(Self::WriterPriority),
            "fair" | "fifo" => Ok(Self::Fair),
            _ => Err(PolicyParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Kind of access a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
