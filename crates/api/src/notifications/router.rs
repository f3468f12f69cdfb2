//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the domain event bus and writes a
//! notification row for each affected user: reviewers of the relevant
//! country when data is submitted, the submitter when a decision comes
//! back.

use std::sync::Arc;

use melboard_core::error::CoreError;
use melboard_core::workflow::Priority;
use melboard_events::{event_types, DomainEvent};
use melboard_store::models::{CreateNotification, DataPointView};
use melboard_store::repositories::{DataPointRepo, NotificationRepo, UserRepo};
use melboard_store::Store;
use tokio::sync::broadcast;

/// Routes domain events to user notifications.
pub struct NotificationRouter {
    store: Arc<Store>,
}

impl NotificationRouter {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](melboard_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all affected users.
    pub async fn route_event(&self, event: &DomainEvent) -> Result<(), CoreError> {
        let Some(data_point_id) = event.entity_id else {
            return Ok(());
        };

        // The point may have been deleted between publish and delivery;
        // nothing to notify about then.
        let view = match DataPointRepo::find_view_by_id(&self.store, data_point_id).await {
            Ok(view) => view,
            Err(CoreError::NotFound { .. }) => return Ok(()),
            Err(e) => return Err(e),
        };

        match event.event_type.as_str() {
            event_types::DATA_POINT_SUBMITTED => self.notify_reviewers(event, &view).await,
            event_types::DATA_POINT_IN_REVIEW => {
                self.notify_submitter(
                    event,
                    &view,
                    "Submission in review",
                    format!(
                        "Your {} submission for {} is being reviewed",
                        view.indicator_name, view.project_name
                    ),
                    Priority::Normal,
                )
                .await
            }
            event_types::DATA_POINT_APPROVED => {
                self.notify_submitter(
                    event,
                    &view,
                    "Submission approved",
                    format!(
                        "Your {} submission for {} ({}) was approved",
                        view.indicator_name, view.project_name, view.data_point.period
                    ),
                    Priority::Normal,
                )
                .await
            }
            event_types::DATA_POINT_REJECTED => {
                let reason = view
                    .data_point
                    .rejection_reason
                    .as_deref()
                    .unwrap_or("no reason recorded");
                self.notify_submitter(
                    event,
                    &view,
                    "Submission rejected",
                    format!(
                        "Your {} submission for {} was rejected: {reason}",
                        view.indicator_name, view.project_name
                    ),
                    Priority::High,
                )
                .await
            }
            event_types::DATA_POINT_CHANGES_REQUESTED => {
                self.notify_submitter(
                    event,
                    &view,
                    "Changes requested",
                    format!(
                        "A reviewer requested changes to your {} submission for {}",
                        view.indicator_name, view.project_name
                    ),
                    Priority::High,
                )
                .await
            }
            other => {
                tracing::debug!(event_type = other, "No notification rule for event");
                Ok(())
            }
        }
    }

    /// Notify every reviewer scoped to the submission's country, except the
    /// actor themselves.
    async fn notify_reviewers(
        &self,
        event: &DomainEvent,
        view: &DataPointView,
    ) -> Result<(), CoreError> {
        let reviewers = UserRepo::reviewers_for_country(&self.store, view.country_id).await;
        for reviewer in reviewers {
            if Some(reviewer.id) == event.actor_user_id {
                continue;
            }
            NotificationRepo::create(
                &self.store,
                CreateNotification {
                    user_id: reviewer.id,
                    title: "New submission awaiting review".to_string(),
                    message: format!(
                        "{} submitted {} for {} ({})",
                        view.submitter_name,
                        view.indicator_name,
                        view.project_name,
                        view.data_point.period
                    ),
                    entity_type: "data_point".to_string(),
                    entity_id: view.data_point.id,
                    priority: view.data_point.priority,
                },
            )
            .await?;
        }
        Ok(())
    }

    /// Notify the submitter about a decision on their submission, unless
    /// they made the decision themselves.
    async fn notify_submitter(
        &self,
        event: &DomainEvent,
        view: &DataPointView,
        title: &str,
        message: String,
        priority: Priority,
    ) -> Result<(), CoreError> {
        let submitter = view.data_point.submitted_by;
        if Some(submitter) == event.actor_user_id {
            return Ok(());
        }
        NotificationRepo::create(
            &self.store,
            CreateNotification {
                user_id: submitter,
                title: title.to_string(),
                message,
                entity_type: "data_point".to_string(),
                entity_id: view.data_point.id,
                priority,
            },
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melboard_store::LatencyProfile;

    async fn seeded() -> Arc<Store> {
        Arc::new(Store::seeded(LatencyProfile::NONE).unwrap())
    }

    /// Fixture 14 is a pending submission by user 5 on a Tanzania project.
    const PENDING_ID: i64 = 14;

    #[tokio::test]
    async fn submission_notifies_scoped_reviewers() {
        let store = seeded().await;
        let router = NotificationRouter::new(Arc::clone(&store));

        let event = DomainEvent::new(event_types::DATA_POINT_SUBMITTED)
            .with_entity("data_point", PENDING_ID)
            .with_actor(5);
        router.route_event(&event).await.unwrap();

        // Tanzania has no scoped manager, so only the (unscoped) super
        // admin is notified.
        assert_eq!(NotificationRepo::unread_count(&store, 1).await, 1);
        assert_eq!(NotificationRepo::unread_count(&store, 2).await, 0);
        assert_eq!(NotificationRepo::unread_count(&store, 5).await, 0);
    }

    #[tokio::test]
    async fn decision_notifies_submitter_only() {
        let store = seeded().await;
        let router = NotificationRouter::new(Arc::clone(&store));
        DataPointRepo::approve(&store, PENDING_ID, 1, None).await.unwrap();

        let event = DomainEvent::new(event_types::DATA_POINT_APPROVED)
            .with_entity("data_point", PENDING_ID)
            .with_actor(1);
        router.route_event(&event).await.unwrap();

        let items = NotificationRepo::list_for_user(&store, 5, true, 10, 0).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Submission approved");
        assert_eq!(NotificationRepo::unread_count(&store, 1).await, 0);
    }

    #[tokio::test]
    async fn rejection_is_high_priority_and_carries_reason() {
        let store = seeded().await;
        let router = NotificationRouter::new(Arc::clone(&store));
        DataPointRepo::reject(&store, PENDING_ID, 1, "register missing pages")
            .await
            .unwrap();

        let event = DomainEvent::new(event_types::DATA_POINT_REJECTED)
            .with_entity("data_point", PENDING_ID)
            .with_actor(1);
        router.route_event(&event).await.unwrap();

        let items = NotificationRepo::list_for_user(&store, 5, true, 10, 0).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].priority, Priority::High);
        assert!(items[0].message.contains("register missing pages"));
    }

    #[tokio::test]
    async fn deleted_entity_is_ignored() {
        let store = seeded().await;
        let router = NotificationRouter::new(Arc::clone(&store));

        let event = DomainEvent::new(event_types::DATA_POINT_SUBMITTED)
            .with_entity("data_point", 9999)
            .with_actor(5);
        router.route_event(&event).await.unwrap();

        assert_eq!(NotificationRepo::unread_count(&store, 1).await, 0);
    }

    #[tokio::test]
    async fn actor_is_never_self_notified() {
        let store = seeded().await;
        let router = NotificationRouter::new(Arc::clone(&store));
        DataPointRepo::approve(&store, PENDING_ID, 5, None).await.unwrap();

        // The decision actor is the submitter; no self-notification.
        let event = DomainEvent::new(event_types::DATA_POINT_APPROVED)
            .with_entity("data_point", PENDING_ID)
            .with_actor(5);
        router.route_event(&event).await.unwrap();

        assert_eq!(NotificationRepo::unread_count(&store, 5).await, 0);
    }
}
