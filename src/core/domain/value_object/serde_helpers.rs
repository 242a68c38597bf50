//! Serde helpers for custom serialization.

use serde::{Deserialize, Deserializer, Serializer, de::Error};
use std::time::Duration;

/// Serialization and deserialization for `Duration` as seconds.
///
/// Fractional values are kept, so `0.5` round-trips as 500ms instead of
/// collapsing to zero.
pub mod duration_secs {
    use super::*;

    /// Serialize a `Duration` as a number of seconds.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_u64(duration.as_secs())
        } else {
            serializer.serialize_f64(duration.as_secs_f64())
        }
    }

    /// Deserialize a non-negative number of seconds into a `Duration`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
