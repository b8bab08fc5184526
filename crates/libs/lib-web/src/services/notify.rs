//! # Notification Client
//!
//! Client for the platform's external notification service. The only caller
//! is the password-reset flow; the contract is a single synchronous POST that
//! must be acknowledged with a 2xx status. Delivery failure is surfaced to
//! the caller as a dependency error, never retried here.

use lib_core::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Templated notification payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub template_type: String,
    pub template_data: HashMap<String, String>,
}

/// HTTP client for the notification service.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl NotificationClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Deliver a notification request and require a 2xx acknowledgement.
    pub async fn send(&self, request: &NotificationRequest) -> Result<()> {
        debug!(
            "[NOTIFY] Sending '{}' notification to {}",
            request.template_type, request.email
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("[NOTIFY] Notification service unreachable: {}", e);
                AppError::Dependency(format!("notification service unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            warn!(
                "[NOTIFY] Notification service rejected request: {}",
                response.status()
            );
            return Err(AppError::Dependency(format!(
                "notification service returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
