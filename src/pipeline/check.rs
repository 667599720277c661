// src/pipeline/check.rs

//! One check cycle: fetch, filter, conditionally notify.

use crate::error::Result;
use crate::models::SeatPartition;
use crate::services::{Delivery, InventorySource, Notifier, SeatFilter};
use crate::utils::log::sub_item;

/// Notification result of a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Fewer available seats than the threshold
    BelowThreshold,
    Sent,
    /// Webhook not configured
    Skipped,
    /// Delivery failed; the message is kept for reporting
    Failed(String),
}

/// Result of a completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Target car absent from the snapshot
    CarMissing,
    Evaluated {
        partition: SeatPartition,
        notification: NotificationStatus,
    },
}

/// Wires the fetcher, filter and notifier together.
pub struct SeatMonitor {
    source: Box<dyn InventorySource>,
    filter: SeatFilter,
    notifier: Box<dyn Notifier>,
    threshold: usize,
}

impl SeatMonitor {
    pub fn new(
        source: Box<dyn InventorySource>,
        filter: SeatFilter,
        notifier: Box<dyn Notifier>,
        threshold: usize,
    ) -> Self {
        Self {
            source,
            filter,
            notifier,
            threshold,
        }
    }

    pub fn target_car(&self) -> &str {
        self.filter.target_car()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Run one cycle.
    ///
    /// Fetch and parse failures are returned. Notification failures are
    /// logged and reported in the outcome instead.
    pub async fn check(&self) -> Result<CheckOutcome> {
        let snapshot = self.source.fetch().await?;

        let Some(partition) = self.filter.evaluate(&snapshot) else {
            return Ok(CheckOutcome::CarMissing);
        };

        log::info!(
            "Check result: {} has {} arrangeable matching seat(s)",
            self.target_car(),
            partition.available_count()
        );

        let notification = if partition.available_count() >= self.threshold {
            self.announce(&partition).await
        } else {
            NotificationStatus::BelowThreshold
        };

        Ok(CheckOutcome::Evaluated {
            partition,
            notification,
        })
    }

    async fn announce(&self, partition: &SeatPartition) -> NotificationStatus {
        log::info!(
            "Found {} bookable seat(s)!",
            partition.available_count()
        );
        for seat in &partition.available {
            sub_item(&format!(
                "- Group {} Seat {} ({})",
                seat.seat_group_id, seat.seat_id, seat.arrangement_state
            ));
        }

        match self
            .notifier
            .notify(self.target_car(), &partition.available)
            .await
        {
            Ok(Delivery::Sent) => NotificationStatus::Sent,
            Ok(Delivery::Skipped) => NotificationStatus::Skipped,
            Err(e) => {
                log::error!("Notification failed: {}", e);
                NotificationStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::{
        ArrangementState, CarRecord, InventorySnapshot, ReservationState, SeatArrangement,
    };

    pub(crate) const TARGET: &str = "2号車";

    pub(crate) fn seat(group: &str, id: &str, arrangement: &str) -> SeatArrangement {
        SeatArrangement {
            seat_group_id: group.to_string(),
            seat_id: id.to_string(),
            reservation_state: ReservationState::Vacant,
            arrangement_state: ArrangementState::from(arrangement.to_string()),
        }
    }

    pub(crate) fn snapshot_with(seats: Vec<SeatArrangement>) -> InventorySnapshot {
        InventorySnapshot {
            car_inventories: vec![CarRecord {
                physical_car_name: TARGET.to_string(),
                arrangements: seats,
            }],
        }
    }

    pub(crate) fn qualifying_snapshot() -> InventorySnapshot {
        snapshot_with(vec![
            seat("2", "A", "ARRANGEABLE"),
            seat("2", "D", "ARRANGEABLE"),
            seat("4", "A", "ARRANGEABLE"),
            seat("4", "D", "ARRANGEABLE"),
            seat("1", "A", "ARRANGEABLE"),
        ])
    }

    /// Serves the same snapshot (or a failure) and counts fetches.
    pub(crate) struct FixedSource {
        pub snapshot: Option<InventorySnapshot>,
        pub fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl InventorySource for FixedSource {
        async fn fetch(&self) -> Result<InventorySnapshot> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.snapshot
                .clone()
                .ok_or_else(|| AppError::config("inventory unavailable"))
        }
    }

    /// Records every notification; optionally fails each one.
    pub(crate) struct RecordingNotifier {
        pub sent: Arc<AtomicUsize>,
        pub fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, _car: &str, _seats: &[SeatArrangement]) -> Result<Delivery> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::Webhook { status: 500 })
            } else {
                Ok(Delivery::Sent)
            }
        }
    }

    pub(crate) fn fake_monitor(
        snapshot: Option<InventorySnapshot>,
        fail_notify: bool,
    ) -> (SeatMonitor, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let sent = Arc::new(AtomicUsize::new(0));
        let monitor = SeatMonitor::new(
            Box::new(FixedSource {
                snapshot,
                fetches: Arc::clone(&fetches),
            }),
            SeatFilter::new(TARGET),
            Box::new(RecordingNotifier {
                sent: Arc::clone(&sent),
                fail: fail_notify,
            }),
            4,
        );
        (monitor, fetches, sent)
    }

    #[tokio::test]
    async fn test_notifies_at_threshold() {
        let (monitor, _, sent) = fake_monitor(Some(qualifying_snapshot()), false);

        let outcome = monitor.check().await.unwrap();
        let CheckOutcome::Evaluated {
            partition,
            notification,
        } = outcome
        else {
            panic!("expected evaluated outcome");
        };
        assert_eq!(partition.available_count(), 4);
        assert_eq!(notification, NotificationStatus::Sent);
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_below_threshold_does_not_notify() {
        for available in 0..4 {
            let seats = ["2", "4", "6", "8"]
                .iter()
                .enumerate()
                .map(|(i, group)| {
                    let state = if i < available { "ARRANGEABLE" } else { "BLOCKED" };
                    seat(group, "A", state)
                })
                .collect();
            let (monitor, _, sent) = fake_monitor(Some(snapshot_with(seats)), false);

            let outcome = monitor.check().await.unwrap();
            assert!(matches!(
                outcome,
                CheckOutcome::Evaluated {
                    notification: NotificationStatus::BelowThreshold,
                    ..
                }
            ));
            assert_eq!(sent.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_blocked_seat_keeps_count_below_threshold() {
        let mut snapshot = qualifying_snapshot();
        snapshot.car_inventories[0].arrangements[3] = seat("4", "D", "BLOCKED");
        let (monitor, _, sent) = fake_monitor(Some(snapshot), false);

        let CheckOutcome::Evaluated { partition, notification } = monitor.check().await.unwrap()
        else {
            panic!("expected evaluated outcome");
        };
        assert_eq!(partition.available_count(), 3);
        assert_eq!(partition.blocked_count(), 1);
        assert_eq!(notification, NotificationStatus::BelowThreshold);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_car_is_not_an_error() {
        let mut snapshot = qualifying_snapshot();
        snapshot.car_inventories[0].physical_car_name = "3号車".to_string();
        let (monitor, _, sent) = fake_monitor(Some(snapshot), false);

        assert_eq!(monitor.check().await.unwrap(), CheckOutcome::CarMissing);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let (monitor, fetches, sent) = fake_monitor(None, false);

        assert!(monitor.check().await.is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_notification_failure_is_swallowed() {
        let (monitor, _, sent) = fake_monitor(Some(qualifying_snapshot()), true);

        let outcome = monitor.check().await.unwrap();
        assert!(matches!(
            outcome,
            CheckOutcome::Evaluated {
                notification: NotificationStatus::Failed(_),
                ..
            }
        ));
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeated_cycles_notify_each_time() {
        let (monitor, _, sent) = fake_monitor(Some(qualifying_snapshot()), false);

        for _ in 0..3 {
            monitor.check().await.unwrap();
        }
        assert_eq!(sent.load(Ordering::SeqCst), 3);
    }
}
