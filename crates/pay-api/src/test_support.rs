//! In-process gateway for handler and router tests.

use async_trait::async_trait;
use pay_core::{PaymentError, PaymentGateway, PaymentResult, SnapTransaction, TransactionPayload};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

enum Outcome {
    Succeed {
        token: String,
        redirect_url: Option<String>,
    },
    Fail {
        status: u16,
        data: serde_json::Value,
    },
    Panic,
}

pub struct MockGateway {
    outcome: Outcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    last_payload: Mutex<Option<TransactionPayload>>,
}

impl MockGateway {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn succeeding(token: &str, redirect_url: Option<&str>) -> Self {
        Self::with_outcome(Outcome::Succeed {
            token: token.to_string(),
            redirect_url: redirect_url.map(String::from),
        })
    }

    pub fn failing(status: u16, data: serde_json::Value) -> Self {
        Self::with_outcome(Outcome::Fail { status, data })
    }

    pub fn panicking() -> Self {
        Self::with_outcome(Outcome::Panic)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<TransactionPayload> {
        self.last_payload.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> PaymentResult<SnapTransaction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_payload.lock() {
            *last = Some(payload.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            Outcome::Succeed {
                token,
                redirect_url,
            } => Ok(SnapTransaction {
                token: token.clone(),
                redirect_url: redirect_url.clone(),
            }),
            Outcome::Fail { status, data } => Err(PaymentError::Gateway {
                message: format!("Request failed with status code {}", status),
                status: Some(*status),
                data: Some(data.clone()),
            }),
            Outcome::Panic => panic!("gateway exploded"),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
