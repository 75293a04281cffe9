use crate::core::{Channel, DeliveryReport, Notification, Notifier};

/// Fans a notification out to every configured channel.
#[derive(Default)]
pub struct Dispatcher {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    pub fn with(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Box::new(notifier));
        self
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.notifiers.iter().map(|n| n.channel()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// 單一通道失敗不影響其他通道
    pub async fn notify(&self, notification: &Notification) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for notifier in &self.notifiers {
            let channel = notifier.channel();
            match notifier.send(notification).await {
                Ok(()) => {
                    tracing::info!("{} notification sent: {}", channel, notification.subject);
                    report.delivered.push(channel);
                }
                Err(e) => {
                    tracing::error!("{} notification failed: {}", channel, e);
                    report.failed.push(channel);
                }
            }
        }

        if !report.any_delivered() {
            tracing::warn!("No notification could be delivered!");
        }

        report
    }
}
