//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_push_notification_sender;
mod http_push_notification_sender;
mod in_memory_append_log;
mod in_memory_identity_claims_repository;
mod in_memory_notification_delivery_ledger;
mod postgres_admin_audit_repository;
mod postgres_identity_claims_repository;
mod postgres_notification_log_repository;
mod redis_notification_delivery_ledger;

pub use console_push_notification_sender::ConsolePushNotificationSender;
pub use http_push_notification_sender::{HttpPushConfig, HttpPushNotificationSender};
pub use in_memory_append_log::{InMemoryAdminAuditRepository, InMemoryNotificationLogRepository};
pub use in_memory_identity_claims_repository::InMemoryIdentityClaimsRepository;
pub use in_memory_notification_delivery_ledger::InMemoryNotificationDeliveryLedger;
pub use postgres_admin_audit_repository::PostgresAdminAuditRepository;
pub use postgres_identity_claims_repository::PostgresIdentityClaimsRepository;
pub use postgres_notification_log_repository::PostgresNotificationLogRepository;
pub use redis_notification_delivery_ledger::RedisNotificationDeliveryLedger;
