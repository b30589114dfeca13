//! Configuration module
//!
//! The converter recognizes a single option: the set of rooms in scope.
//! Loaded once at startup from the environment; empty or absent means every
//! room is in scope.

use std::collections::HashSet;
use std::env;

use serde::Deserialize;

use crate::error::ConvertError;

/// The optional configured set of rooms in scope for conversion. Immutable
/// for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RoomAllowList(HashSet<String>);

impl RoomAllowList {
    pub fn new<I>(rooms: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self(rooms.into_iter().collect())
    }

    /// True when the list is empty (universal scope) or contains the room.
    pub fn permits(&self, room_id: &str) -> bool {
        self.0.is_empty() || self.0.contains(room_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl FromIterator<String> for RoomAllowList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Converter configuration. Deserializable so hosts that hand plugins a
/// config document get the schema for free; `from_env` covers standalone
/// deployments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    pub rooms: RoomAllowList,
}

impl ConverterConfig {
    /// Read configuration from the environment. `DEHEIF_ROOMS` is a
    /// comma-separated list of room identifiers.
    pub fn from_env() -> Result<Self, ConvertError> {
        let raw = env::var("DEHEIF_ROOMS").unwrap_or_default();
        let config = Self {
            rooms: Self::parse_rooms(&raw),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a comma-separated room list, dropping empty entries.
    pub fn parse_rooms(raw: &str) -> RoomAllowList {
        raw.split(',')
            .map(|room| room.trim().to_string())
            .filter(|room| !room.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        for room in self.rooms.iter() {
            if !room.starts_with('!') || !room.contains(':') {
                return Err(ConvertError::Config(format!(
                    "'{}' is not a valid room identifier",
                    room
                )));
            }
        }
        Ok(())
    }
}
