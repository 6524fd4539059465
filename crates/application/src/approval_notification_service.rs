//! Document trigger handler announcing account approvals.

use std::sync::Arc;

use steward_core::AppResult;
use steward_domain::{
    NotificationLogEntry, PushMessage, Uid, UserDocument, is_approval_transition,
};
use tracing::{debug, info, warn};

use crate::{NotificationDeliveryLedger, NotificationLogRepository, PushNotificationSender};

/// Update event for a `Users/{uid}` document.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdatedEvent {
    /// Path parameter of the updated document.
    pub uid: Uid,
    /// Platform event identifier, stable across redeliveries of the same event.
    pub event_id: Option<String>,
    /// Document snapshot before the update.
    pub before: Option<UserDocument>,
    /// Document snapshot after the update.
    pub after: Option<UserDocument>,
}

/// Reason an update event produced no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalSkipReason {
    /// One of the snapshots was absent.
    MissingSnapshot,
    /// The status did not move from `pending` to `approved`.
    NoApprovalTransition,
    /// The approved document has no delivery token.
    MissingDeliveryToken,
    /// The same event was already delivered.
    AlreadyDelivered,
}

impl ApprovalSkipReason {
    /// Returns a stable label for responses and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingSnapshot => "missing_snapshot",
            Self::NoApprovalTransition => "no_approval_transition",
            Self::MissingDeliveryToken => "missing_delivery_token",
            Self::AlreadyDelivered => "already_delivered",
        }
    }
}

/// Result of handling one update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Push sent and log entry appended.
    Delivered,
    /// Nothing was done.
    Skipped(ApprovalSkipReason),
}

/// Application service behind the `Users/{uid}` update trigger.
#[derive(Clone)]
pub struct ApprovalNotificationService {
    push_sender: Arc<dyn PushNotificationSender>,
    notification_log: Arc<dyn NotificationLogRepository>,
    delivery_ledger: Option<Arc<dyn NotificationDeliveryLedger>>,
}

impl ApprovalNotificationService {
    /// Creates a notification service without duplicate suppression.
    #[must_use]
    pub fn new(
        push_sender: Arc<dyn PushNotificationSender>,
        notification_log: Arc<dyn NotificationLogRepository>,
    ) -> Self {
        Self {
            push_sender,
            notification_log,
            delivery_ledger: None,
        }
    }

    /// Enables duplicate suppression keyed by uid and event id.
    #[must_use]
    pub fn with_delivery_ledger(mut self, ledger: Arc<dyn NotificationDeliveryLedger>) -> Self {
        self.delivery_ledger = Some(ledger);
        self
    }

    /// Sends the approval notice when the event is a `pending` to `approved` transition.
    pub async fn handle_user_updated(&self, event: UserUpdatedEvent) -> AppResult<ApprovalOutcome> {
        let (Some(before), Some(after)) = (event.before.as_ref(), event.after.as_ref()) else {
            return Ok(self.skip(&event, ApprovalSkipReason::MissingSnapshot));
        };

        if !is_approval_transition(before, after) {
            return Ok(self.skip(&event, ApprovalSkipReason::NoApprovalTransition));
        }

        let Some(token) = after.delivery_token() else {
            return Ok(self.skip(&event, ApprovalSkipReason::MissingDeliveryToken));
        };

        let claimed_key = match (&self.delivery_ledger, event.event_id.as_deref()) {
            (Some(ledger), Some(event_id)) => {
                let key = delivery_key(&event.uid, event_id);
                if !ledger.try_claim(key.as_str()).await? {
                    return Ok(self.skip(&event, ApprovalSkipReason::AlreadyDelivered));
                }
                Some((ledger, key))
            }
            _ => None,
        };

        if let Err(send_error) = self
            .push_sender
            .send(PushMessage::approval(token, &event.uid))
            .await
        {
            if let Some((ledger, key)) = claimed_key {
                if let Err(release_error) = ledger.release(key.as_str()).await {
                    warn!(
                        uid = %event.uid,
                        error = %release_error,
                        "failed to release approval delivery key"
                    );
                }
            }
            return Err(send_error);
        }

        self.notification_log
            .append_entry(NotificationLogEntry::approval(
                event.uid.clone(),
                chrono::Utc::now(),
            ))
            .await?;

        info!(uid = %event.uid, "approval notification delivered");
        Ok(ApprovalOutcome::Delivered)
    }

    fn skip(&self, event: &UserUpdatedEvent, reason: ApprovalSkipReason) -> ApprovalOutcome {
        debug!(
            uid = %event.uid,
            reason = reason.as_str(),
            "approval notification skipped"
        );
        ApprovalOutcome::Skipped(reason)
    }
}

fn delivery_key(uid: &Uid, event_id: &str) -> String {
    format!("approval:{uid}:{event_id}")
}

#[cfg(test)]
mod tests;
