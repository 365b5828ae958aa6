//! The side effect a valid submission triggers

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::error::SubmissionError;
use super::ContactMessage;

#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<(), SubmissionError>;
}

/// Waits a fixed delay and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmissionTransport for SimulatedTransport {
    async fn send(&self, message: &ContactMessage) -> Result<(), SubmissionError> {
        info!(
            subject = %message.subject,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating contact message delivery"
        );

        tokio::time::sleep(self.delay).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_waits_then_succeeds() {
        let transport = SimulatedTransport::new(Duration::from_millis(2000));
        let message = ContactMessage {
            name: "Al".to_string(),
            email: "al@x.co".to_string(),
            subject: "Hi there".to_string(),
            message: "This is ten+".to_string(),
        };

        let start = tokio::time::Instant::now();
        transport.send(&message).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
