// src/models/mod.rs

//! Domain models for the seat monitor.
//!
//! Configuration and inventory data structures, organized by their
//! primary purpose.

mod config;
mod inventory;

// Re-export all public types
pub use config::{Config, HttpConfig, MonitorConfig, NotifierConfig, WEBHOOK_PLACEHOLDER};
pub use inventory::{
    ArrangementState, CarRecord, InventorySnapshot, ReservationState, SeatArrangement,
};

/// Seats of the target car that passed the match rule, split by
/// whether they can currently be booked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatPartition {
    /// Matched and arrangeable, in source order
    pub available: Vec<SeatArrangement>,
    /// Matched but not arrangeable, in source order
    pub blocked: Vec<SeatArrangement>,
}

impl SeatPartition {
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }
}
