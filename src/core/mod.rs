pub mod detector;
pub mod dispatch;
pub mod extract;
pub mod fingerprint;
pub mod state;
pub mod watcher;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    Change, Channel, CheckOutcome, DeliveryReport, Detection, Fingerprint, Notification,
};
pub use crate::domain::ports::{Notifier, PageSource, Storage};
pub use crate::utils::error::Result;
