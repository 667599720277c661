// src/services/notifier.rs

//! Webhook notifier.
//!
//! Posts a Discord-style embed listing the bookable seats. A webhook left
//! at its placeholder value turns delivery into a logged no-op.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{NotifierConfig, SeatArrangement};
use crate::utils::format_local;

const EMBED_TITLE: &str = "🎯 Train seat availability";
/// Embed accent color (green).
const EMBED_COLOR: u32 = 3_066_993;

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Webhook accepted the message (2xx)
    Sent,
    /// No webhook configured
    Skipped,
}

/// Destination for availability alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce `seats` of `car` as bookable.
    async fn notify(&self, car: &str, seats: &[SeatArrangement]) -> Result<Delivery>;
}

/// Webhook request body.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline,
        }
    }
}

/// Build the embed message for a qualifying check.
pub fn build_payload(
    car: &str,
    seats: &[SeatArrangement],
    booking_url: &str,
    checked_at: DateTime<Utc>,
    tz: Tz,
) -> WebhookPayload {
    let seat_list = seats
        .iter()
        .map(|seat| format!("• Group {} Seat {}", seat.seat_group_id, seat.seat_id))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = Embed {
        title: EMBED_TITLE.to_string(),
        description: format!("Found **{}** bookable seats!", seats.len()),
        color: EMBED_COLOR,
        fields: vec![
            EmbedField::new("Car", car, true),
            EmbedField::new("Available seats", seat_list, false),
            EmbedField::new("Checked at", format_local(checked_at, tz), false),
            EmbedField::new("Booking", booking_url, false),
        ],
    };

    WebhookPayload {
        embeds: vec![embed],
    }
}

/// Posts availability alerts to a Discord-compatible webhook.
pub struct WebhookNotifier {
    client: Client,
    webhook: Option<Url>,
    booking_url: String,
    tz: Tz,
}

impl WebhookNotifier {
    pub fn new(
        client: Client,
        webhook: Option<Url>,
        booking_url: impl Into<String>,
        tz: Tz,
    ) -> Self {
        Self {
            client,
            webhook,
            booking_url: booking_url.into(),
            tz,
        }
    }

    /// Build from notifier settings, validating webhook URL and time zone.
    pub fn from_config(
        client: Client,
        config: &NotifierConfig,
        booking_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(
            client,
            config.webhook()?,
            booking_url,
            config.timezone()?,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.webhook.is_some()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, car: &str, seats: &[SeatArrangement]) -> Result<Delivery> {
        let Some(webhook) = &self.webhook else {
            log::warn!("Webhook URL not configured, skipping notification");
            return Ok(Delivery::Skipped);
        };

        let payload = build_payload(car, seats, &self.booking_url, Utc::now(), self.tz);
        let response = self
            .client
            .post(webhook.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Webhook {
                status: status.as_u16(),
            });
        }

        log::info!("Webhook notification sent");
        Ok(Delivery::Sent)
    }
}
