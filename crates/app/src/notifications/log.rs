//! Logging notifier.

use async_trait::async_trait;
use tracing::info;

use crate::notifications::{Notifier, NotifyError, OrderNotice};

/// Records notices in the log instead of sending them. Used when no email API is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn order_placed(&self, notice: &OrderNotice) -> Result<(), NotifyError> {
        info!(
            serial_number = %notice.serial_number,
            buyer = %notice.buyer.email,
            lines = notice.lines.len(),
            total_amount = %notice.total_amount,
            "order placed"
        );

        Ok(())
    }
}
