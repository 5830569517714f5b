//! Order notifications.
//!
//! Notifications are sent after an order commits. Delivery failures are logged by the caller and
//! never undo the order.

use async_trait::async_trait;
use mockall::automock;

mod email;
mod errors;
mod log;
mod notice;

pub use email::{EmailConfig, EmailNotifier};
pub use errors::NotifyError;
pub use log::LogNotifier;
pub use notice::{Contact, NoticeLine, OrderNotice};

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce a newly placed order to the buyer and the marketplace admin.
    async fn order_placed(&self, notice: &OrderNotice) -> Result<(), NotifyError>;
}
