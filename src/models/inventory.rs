//! Inventory snapshot structures as returned by the inventory endpoint.
//!
//! Parsing is lenient: `null` lists read as empty, numeric group ids are
//! accepted, and `null` states read as an empty (non-matching) state, so
//! one odd record never fails the whole snapshot.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One fetched inventory response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// All cars of the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub car_inventories: Vec<CarRecord>,
}

impl InventorySnapshot {
    /// Find a car by exact physical name. The first match wins.
    pub fn find_car(&self, name: &str) -> Option<&CarRecord> {
        self.car_inventories
            .iter()
            .find(|car| car.physical_car_name == name)
    }
}

/// Seat layout of a single physical car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub physical_car_name: String,

    /// Seat arrangements in source order
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrangements: Vec<SeatArrangement>,
}

/// A single seat and its current states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatArrangement {
    /// Numeric group (row) identifier, encoded as text
    #[serde(default, deserialize_with = "group_id_as_text")]
    pub seat_group_id: String,

    /// Seat letter within the group (e.g. "A")
    #[serde(default, deserialize_with = "null_as_default")]
    pub seat_id: String,

    #[serde(default)]
    pub reservation_state: ReservationState,

    #[serde(default)]
    pub arrangement_state: ArrangementState,
}

/// Read `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Group ids arrive as text or as JSON numbers.
fn group_id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GroupId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<GroupId>::deserialize(deserializer)? {
        Some(GroupId::Text(s)) => s,
        Some(GroupId::Int(n)) => n.to_string(),
        Some(GroupId::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

/// Whether a seat is held by someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ReservationState {
    Vacant,
    /// Any other state, kept verbatim
    Other(String),
}

impl ReservationState {
    pub fn is_vacant(&self) -> bool {
        matches!(self, Self::Vacant)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Vacant => "VACANT",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ReservationState {
    fn from(value: String) -> Self {
        if value == "VACANT" {
            Self::Vacant
        } else {
            Self::Other(value)
        }
    }
}

impl From<Option<String>> for ReservationState {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => s.into(),
            None => Self::default(),
        }
    }
}

impl Default for ReservationState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<ReservationState> for String {
    fn from(value: ReservationState) -> Self {
        match value {
            ReservationState::Vacant => "VACANT".to_string(),
            ReservationState::Other(s) => s,
        }
    }
}

impl fmt::Display for ReservationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the booking system can currently assign a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ArrangementState {
    Arrangeable,
    /// Blocked for any other reason (maintenance, pending, ...), kept verbatim
    Other(String),
}

impl ArrangementState {
    pub fn is_arrangeable(&self) -> bool {
        matches!(self, Self::Arrangeable)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Arrangeable => "ARRANGEABLE",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ArrangementState {
    fn from(value: String) -> Self {
        if value == "ARRANGEABLE" {
            Self::Arrangeable
        } else {
            Self::Other(value)
        }
    }
}

impl From<Option<String>> for ArrangementState {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => s.into(),
            None => Self::default(),
        }
    }
}

impl Default for ArrangementState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<ArrangementState> for String {
    fn from(value: ArrangementState) -> Self {
        match value {
            ArrangementState::Arrangeable => "ARRANGEABLE".to_string(),
            ArrangementState::Other(s) => s,
        }
    }
}

impl fmt::Display for ArrangementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
