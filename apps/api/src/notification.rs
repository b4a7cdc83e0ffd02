//! Notification — forwards the contact addresses of selected resumes to the mail service.

use std::time::Duration;

use axum::{extract::State, Json};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysisResult;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sent_to: Vec<String>,
    #[serde(default)]
    pub failed_to: Vec<String>,
}

#[derive(Clone)]
pub struct NotificationClient {
    client: Client,
    service_url: String,
}

impl NotificationClient {
    pub fn new(service_url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            service_url,
        })
    }

    /// POSTs the address list as a JSON array and decodes the service's report.
    pub async fn send(&self, emails: &[String]) -> Result<EmailResponse, AppError> {
        let response = self
            .client
            .post(&self.service_url)
            .json(emails)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("mail service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "mail service returned {status}: {body}"
            )));
        }

        response
            .json::<EmailResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid mail service response: {e}")))
    }
}

/// Addresses of the selected results, in order, without duplicates.
pub fn selected_emails(results: &[ResumeAnalysisResult]) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for result in results.iter().filter(|r| r.selected && !r.is_failure()) {
        if let Some(email) = &result.email {
            if !emails.contains(email) {
                emails.push(email.clone());
            }
        }
    }
    emails
}

/// POST /api/v1/notify
pub async fn handle_notify(
    State(state): State<AppState>,
    Json(results): Json<Vec<ResumeAnalysisResult>>,
) -> Result<Json<EmailResponse>, AppError> {
    let notifier = state.notifier.as_ref().ok_or_else(|| {
        AppError::Unavailable("Mail service is not configured (MAIL_SERVICE_URL)".to_string())
    })?;

    let emails = selected_emails(&results);
    if emails.is_empty() {
        return Err(AppError::Validation(
            "No selected resume carries an e-mail address".to_string(),
        ));
    }

    info!("Sending notifications to {} recipients", emails.len());
    let response = notifier.send(&emails).await?;
    info!(
        "Mail service reported success={}, sent {}, failed {}",
        response.success,
        response.sent_to.len(),
        response.failed_to.len()
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};

    fn result(name: &str, selected: bool, email: Option<&str>) -> ResumeAnalysisResult {
        ResumeAnalysisResult {
            resume_name: name.to_string(),
            score: if selected { 80 } else { 10 },
            selected,
            email: email.map(str::to_string),
            error: None,
        }
    }

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/send")
    }

    #[test]
    fn test_selected_emails_filters_and_dedups() {
        let results = vec![
            result("a.pdf", true, Some("a@example.com")),
            result("b.pdf", false, Some("b@example.com")),
            result("c.pdf", true, None),
            result("d.pdf", true, Some("a@example.com")),
            ResumeAnalysisResult::failure("boom"),
        ];
        assert_eq!(selected_emails(&results), vec!["a@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_send_posts_addresses_and_decodes_report() {
        let router = Router::new().route(
            "/send",
            post(|Json(emails): Json<Vec<String>>| async move {
                Json(serde_json::json!({
                    "success": true,
                    "message": "ok",
                    "sentTo": emails,
                    "failedTo": []
                }))
            }),
        );
        let url = spawn_server(router).await;
        let client = NotificationClient::new(url).unwrap();

        let response = client
            .send(&["a@example.com".to_string(), "b@example.com".to_string()])
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.sent_to, vec!["a@example.com", "b@example.com"]);
        assert!(response.failed_to.is_empty());
    }

    #[tokio::test]
    async fn test_send_maps_service_failure_to_upstream_error() {
        let router = Router::new().route(
            "/send",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "smtp down") }),
        );
        let url = spawn_server(router).await;
        let client = NotificationClient::new(url).unwrap();

        let err = client.send(&["a@example.com".to_string()]).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(msg) if msg.contains("smtp down")));
    }
}
