use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use steward_core::{AppError, AppResult};
use steward_domain::{NotificationLogEntry, NotificationType, PushMessage, Uid, UserDocument};

use super::{ApprovalNotificationService, ApprovalOutcome, ApprovalSkipReason, UserUpdatedEvent};
use crate::{NotificationDeliveryLedger, NotificationLogRepository, PushNotificationSender};

#[derive(Default)]
struct TestPushSender {
    sent: Mutex<Vec<PushMessage>>,
    fail: bool,
}

impl TestPushSender {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<PushMessage> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PushNotificationSender for TestPushSender {
    async fn send(&self, message: PushMessage) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Infrastructure(
                "failed to send push notification: unavailable".to_owned(),
            ));
        }

        self.sent
            .lock()
            .map_err(|error| AppError::Infrastructure(format!("failed to lock sender: {error}")))?
            .push(message);
        Ok(())
    }
}

#[derive(Default)]
struct TestNotificationLog {
    entries: Mutex<Vec<NotificationLogEntry>>,
}

impl TestNotificationLog {
    fn entries(&self) -> Vec<NotificationLogEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationLogRepository for TestNotificationLog {
    async fn append_entry(&self, entry: NotificationLogEntry) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(|error| AppError::Infrastructure(format!("failed to lock log: {error}")))?
            .push(entry);
        Ok(())
    }
}

#[derive(Default)]
struct TestLedger {
    keys: Mutex<HashSet<String>>,
}

impl TestLedger {
    fn contains(&self, key: &str) -> bool {
        self.keys
            .lock()
            .map(|guard| guard.contains(key))
            .unwrap_or(false)
    }
}

#[async_trait]
impl NotificationDeliveryLedger for TestLedger {
    async fn try_claim(&self, key: &str) -> AppResult<bool> {
        Ok(self
            .keys
            .lock()
            .map_err(|error| AppError::Infrastructure(format!("failed to lock ledger: {error}")))?
            .insert(key.to_owned()))
    }

    async fn release(&self, key: &str) -> AppResult<()> {
        self.keys
            .lock()
            .map_err(|error| AppError::Infrastructure(format!("failed to lock ledger: {error}")))?
            .remove(key);
        Ok(())
    }
}

fn document(value: Value) -> Option<UserDocument> {
    serde_json::from_value(value).ok()
}

fn event(before: Option<UserDocument>, after: Option<UserDocument>) -> UserUpdatedEvent {
    let Ok(uid) = Uid::new("u1") else {
        panic!("valid uid expected");
    };
    UserUpdatedEvent {
        uid,
        event_id: None,
        before,
        after,
    }
}

#[tokio::test]
async fn pending_to_approved_sends_one_push_and_logs_once() {
    let sender = Arc::new(TestPushSender::default());
    let log = Arc::new(TestNotificationLog::default());
    let service = ApprovalNotificationService::new(sender.clone(), log.clone());

    let outcome = service
        .handle_user_updated(event(
            document(json!({"status": "pending"})),
            document(json!({"status": "approved", "fcmToken": "tok1"})),
        ))
        .await;

    assert!(matches!(outcome, Ok(ApprovalOutcome::Delivered)));

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "tok1");
    assert_eq!(sent[0].title, "Approval Complete");
    assert_eq!(sent[0].body, "Your account has been approved.");
    assert_eq!(sent[0].data.get("uid"), Some(&Value::from("u1")));

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].uid.as_str(), "u1");
    assert_eq!(entries[0].notification_type, NotificationType::Approval);
}

#[tokio::test]
async fn approved_to_approved_is_a_no_op() {
    let sender = Arc::new(TestPushSender::default());
    let log = Arc::new(TestNotificationLog::default());
    let service = ApprovalNotificationService::new(sender.clone(), log.clone());

    let outcome = service
        .handle_user_updated(event(
            document(json!({"status": "approved", "fcmToken": "tok1"})),
            document(json!({"status": "approved", "fcmToken": "tok1", "name": "Ada"})),
        ))
        .await;

    assert!(matches!(
        outcome,
        Ok(ApprovalOutcome::Skipped(
            ApprovalSkipReason::NoApprovalTransition
        ))
    ));
    assert!(sender.sent().is_empty());
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn missing_delivery_token_is_skipped_without_error() {
    let sender = Arc::new(TestPushSender::default());
    let log = Arc::new(TestNotificationLog::default());
    let service = ApprovalNotificationService::new(sender.clone(), log.clone());

    let outcome = service
        .handle_user_updated(event(
            document(json!({"status": "pending"})),
            document(json!({"status": "approved"})),
        ))
        .await;

    assert!(matches!(
        outcome,
        Ok(ApprovalOutcome::Skipped(
            ApprovalSkipReason::MissingDeliveryToken
        ))
    ));
    assert!(sender.sent().is_empty());
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn missing_snapshot_is_skipped() {
    let sender = Arc::new(TestPushSender::default());
    let log = Arc::new(TestNotificationLog::default());
    let service = ApprovalNotificationService::new(sender.clone(), log.clone());

    let outcome = service
        .handle_user_updated(event(
            None,
            document(json!({"status": "approved", "fcmToken": "tok1"})),
        ))
        .await;

    assert!(matches!(
        outcome,
        Ok(ApprovalOutcome::Skipped(ApprovalSkipReason::MissingSnapshot))
    ));
    assert!(sender.sent().is_empty());
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn push_failure_leaves_log_untouched_and_propagates() {
    let sender = Arc::new(TestPushSender::failing());
    let log = Arc::new(TestNotificationLog::default());
    let service = ApprovalNotificationService::new(sender, log.clone());

    let outcome = service
        .handle_user_updated(event(
            document(json!({"status": "pending"})),
            document(json!({"status": "approved", "fcmToken": "tok1"})),
        ))
        .await;

    assert!(matches!(outcome, Err(AppError::Infrastructure(_))));
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn redelivered_event_is_sent_only_once() {
    let sender = Arc::new(TestPushSender::default());
    let log = Arc::new(TestNotificationLog::default());
    let ledger = Arc::new(TestLedger::default());
    let service = ApprovalNotificationService::new(sender.clone(), log.clone())
        .with_delivery_ledger(ledger.clone());

    let mut update = event(
        document(json!({"status": "pending"})),
        document(json!({"status": "approved", "fcmToken": "tok1"})),
    );
    update.event_id = Some("evt-1".to_owned());

    let first = service.handle_user_updated(update.clone()).await;
    let second = service.handle_user_updated(update).await;

    assert!(matches!(first, Ok(ApprovalOutcome::Delivered)));
    assert!(matches!(
        second,
        Ok(ApprovalOutcome::Skipped(ApprovalSkipReason::AlreadyDelivered))
    ));
    assert_eq!(sender.sent().len(), 1);
    assert_eq!(log.entries().len(), 1);
    assert!(ledger.contains("approval:u1:evt-1"));
}

#[tokio::test]
async fn failed_delivery_releases_ledger_key() {
    let sender = Arc::new(TestPushSender::failing());
    let log = Arc::new(TestNotificationLog::default());
    let ledger = Arc::new(TestLedger::default());
    let service =
        ApprovalNotificationService::new(sender, log).with_delivery_ledger(ledger.clone());

    let mut update = event(
        document(json!({"status": "pending"})),
        document(json!({"status": "approved", "fcmToken": "tok1"})),
    );
    update.event_id = Some("evt-2".to_owned());

    assert!(service.handle_user_updated(update).await.is_err());
    assert!(!ledger.contains("approval:u1:evt-2"));
}
