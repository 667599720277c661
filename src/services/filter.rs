// src/services/filter.rs

//! Seat filtering rules.
//!
//! A seat matches when its group id is an even integer, its letter is
//! `A` or `D`, and nobody holds it. Matched seats are then split by
//! whether the booking system can currently arrange them.

use crate::models::{InventorySnapshot, SeatArrangement, SeatPartition};

/// Seat letters that qualify (window seats).
const SEAT_LETTERS: [&str; 2] = ["A", "D"];

/// Selects qualifying seats from the target car of a snapshot.
#[derive(Debug, Clone)]
pub struct SeatFilter {
    target_car: String,
}

impl SeatFilter {
    pub fn new(target_car: impl Into<String>) -> Self {
        Self {
            target_car: target_car.into(),
        }
    }

    pub fn target_car(&self) -> &str {
        &self.target_car
    }

    /// Partition the target car's seats.
    ///
    /// Returns `None` when the snapshot has no car with the target name.
    pub fn evaluate(&self, snapshot: &InventorySnapshot) -> Option<SeatPartition> {
        let Some(car) = snapshot.find_car(&self.target_car) else {
            log::info!("Target car not found in inventory: {}", self.target_car);
            return None;
        };

        let (available, blocked): (Vec<_>, Vec<_>) = car
            .arrangements
            .iter()
            .filter(|seat| Self::matches(seat))
            .cloned()
            .partition(|seat| seat.arrangement_state.is_arrangeable());

        if !blocked.is_empty() {
            log::warn!(
                "{} matching seat(s) in {} are not ARRANGEABLE:",
                blocked.len(),
                self.target_car
            );
            for seat in &blocked {
                crate::utils::log::warn_item(&format!(
                    "- Group {} Seat {} (State: {})",
                    seat.seat_group_id, seat.seat_id, seat.arrangement_state
                ));
            }
        }

        Some(SeatPartition { available, blocked })
    }

    /// The three-part match rule, independent of arrangement state.
    pub fn matches(seat: &SeatArrangement) -> bool {
        let even_group = match parse_group_id(&seat.seat_group_id) {
            Some(group) => group % 2 == 0,
            None => {
                log::debug!("Skipping non-numeric seat group id: {:?}", seat.seat_group_id);
                false
            }
        };

        even_group
            && SEAT_LETTERS.contains(&seat.seat_id.as_str())
            && seat.reservation_state.is_vacant()
    }
}

/// Leniently parse a group id as an integer.
///
/// Leading whitespace and a single sign are accepted, then the leading
/// run of ASCII digits is taken ("12B" is 12). Returns `None` when there
/// are no digits or the value does not fit in an `i64`.
///
/// Unlike a float-based `parseInt`, `"-9223372036854775808"` and ids of
/// 20 or more digits therefore yield `None` and are excluded.
pub fn parse_group_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArrangementState, CarRecord, ReservationState};

    const TARGET: &str = "2号車";

    fn seat(group: &str, id: &str, reservation: &str, arrangement: &str) -> SeatArrangement {
        SeatArrangement {
            seat_group_id: group.to_string(),
            seat_id: id.to_string(),
            reservation_state: ReservationState::from(reservation.to_string()),
            arrangement_state: ArrangementState::from(arrangement.to_string()),
        }
    }

    fn snapshot(car: &str, seats: Vec<SeatArrangement>) -> InventorySnapshot {
        InventorySnapshot {
            car_inventories: vec![
                CarRecord {
                    physical_car_name: "1号車".to_string(),
                    arrangements: vec![seat("2", "A", "VACANT", "ARRANGEABLE")],
                },
                CarRecord {
                    physical_car_name: car.to_string(),
                    arrangements: seats,
                },
            ],
        }
    }

    fn four_seats_and_odd_group() -> Vec<SeatArrangement> {
        vec![
            seat("2", "A", "VACANT", "ARRANGEABLE"),
            seat("2", "D", "VACANT", "ARRANGEABLE"),
            seat("4", "A", "VACANT", "ARRANGEABLE"),
            seat("4", "D", "VACANT", "ARRANGEABLE"),
            seat("1", "A", "VACANT", "ARRANGEABLE"),
        ]
    }

    #[test]
    fn test_odd_group_is_excluded() {
        let seats = four_seats_and_odd_group();
        let partition = SeatFilter::new(TARGET)
            .evaluate(&snapshot(TARGET, seats.clone()))
            .unwrap();

        assert_eq!(partition.available, seats[..4].to_vec());
        assert!(partition.blocked.is_empty());
    }

    #[test]
    fn test_non_arrangeable_seat_goes_to_blocked() {
        let mut seats = four_seats_and_odd_group();
        seats[3] = seat("4", "D", "VACANT", "BLOCKED");

        let partition = SeatFilter::new(TARGET)
            .evaluate(&snapshot(TARGET, seats.clone()))
            .unwrap();

        assert_eq!(partition.available_count(), 3);
        assert_eq!(partition.blocked, vec![seats[3].clone()]);
    }

    #[test]
    fn test_missing_target_car() {
        let result = SeatFilter::new(TARGET).evaluate(&snapshot("3号車", four_seats_and_odd_group()));
        assert!(result.is_none());
    }

    #[test]
    fn test_only_target_car_is_considered() {
        let partition = SeatFilter::new(TARGET)
            .evaluate(&snapshot(TARGET, Vec::new()))
            .unwrap();
        assert_eq!(partition, SeatPartition::default());
    }

    #[test]
    fn test_match_rule_conditions() {
        assert!(SeatFilter::matches(&seat("2", "A", "VACANT", "ARRANGEABLE")));
        assert!(SeatFilter::matches(&seat("10", "D", "VACANT", "PENDING")));
        assert!(!SeatFilter::matches(&seat("3", "A", "VACANT", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("2", "B", "VACANT", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("2", "a", "VACANT", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("2", "AD", "VACANT", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("2", "A", "RESERVED", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("2", "A", "vacant", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("two", "A", "VACANT", "ARRANGEABLE")));
        assert!(!SeatFilter::matches(&seat("", "A", "VACANT", "ARRANGEABLE")));
    }

    #[test]
    fn test_partition_is_disjoint_and_stable() {
        let seats = vec![
            seat("6", "D", "VACANT", "MAINTENANCE"),
            seat("2", "A", "VACANT", "ARRANGEABLE"),
            seat("2", "B", "VACANT", "ARRANGEABLE"),
            seat("8", "A", "VACANT", "PENDING"),
            seat("4", "D", "HELD", "ARRANGEABLE"),
            seat("0", "A", "VACANT", "ARRANGEABLE"),
        ];

        let partition = SeatFilter::new(TARGET)
            .evaluate(&snapshot(TARGET, seats.clone()))
            .unwrap();

        assert_eq!(partition.available, vec![seats[1].clone(), seats[5].clone()]);
        assert_eq!(partition.blocked, vec![seats[0].clone(), seats[3].clone()]);
        assert!(
            partition
                .available
                .iter()
                .all(|s| !partition.blocked.contains(s))
        );
    }

    #[test]
    fn test_parse_group_id() {
        assert_eq!(parse_group_id("12"), Some(12));
        assert_eq!(parse_group_id("  7"), Some(7));
        assert_eq!(parse_group_id("12B"), Some(12));
        assert_eq!(parse_group_id("-4"), Some(-4));
        assert_eq!(parse_group_id("+8"), Some(8));
        assert_eq!(parse_group_id("007"), Some(7));
        assert_eq!(parse_group_id("B12"), None);
        assert_eq!(parse_group_id("-"), None);
        assert_eq!(parse_group_id(""), None);
        assert_eq!(parse_group_id("99999999999999999999999"), None);
        assert_eq!(parse_group_id("-9223372036854775808"), None);
    }
}
