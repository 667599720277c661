//! Service layer for the seat monitor.
//!
//! This module contains the pieces of one check cycle:
//! - Inventory fetching (`HttpInventory`)
//! - Seat selection (`SeatFilter`)
//! - Availability alerts (`WebhookNotifier`)

mod filter;
mod inventory;
mod notifier;

pub use filter::{SeatFilter, parse_group_id};
pub use inventory::{HttpInventory, InventorySource};
pub use notifier::{
    Delivery, Embed, EmbedField, Notifier, WebhookNotifier, WebhookPayload, build_payload,
};
