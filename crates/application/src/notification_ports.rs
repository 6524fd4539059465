use async_trait::async_trait;
use steward_core::AppResult;
use steward_domain::PushMessage;

/// Port for sending push notifications. Infrastructure provides HTTP or console implementations.
#[async_trait]
pub trait PushNotificationSender: Send + Sync {
    /// Sends one message to its device token.
    async fn send(&self, message: PushMessage) -> AppResult<()>;
}

/// Port for suppressing duplicate deliveries of the same trigger event.
#[async_trait]
pub trait NotificationDeliveryLedger: Send + Sync {
    /// Records a delivery key. Returns `false` when the key was already recorded.
    async fn try_claim(&self, key: &str) -> AppResult<bool>;

    /// Forgets a delivery key so a redelivered event can be processed again.
    async fn release(&self, key: &str) -> AppResult<()>;
}
