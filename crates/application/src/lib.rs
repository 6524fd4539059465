//! Application services and ports.

#![forbid(unsafe_code)]

mod admin_maintenance_service;
mod approval_notification_service;
mod audit_ports;
mod claims_ports;
mod notification_ports;
mod promotion_service;

pub use admin_maintenance_service::AdminMaintenanceService;
pub use approval_notification_service::{
    ApprovalNotificationService, ApprovalOutcome, ApprovalSkipReason, UserUpdatedEvent,
};
pub use audit_ports::{AdminAuditRepository, NotificationLogRepository};
pub use claims_ports::IdentityClaimsRepository;
pub use notification_ports::{NotificationDeliveryLedger, PushNotificationSender};
pub use promotion_service::{
    PromoteToAdminRequest, PromoteToAdminResult, PromotionService, authorize_promotion,
};
