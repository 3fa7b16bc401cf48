use reqwest::{Client, Response};
use serde::Serialize;

use zodsign_domain::notification::NotificationMessage;
use zodsign_domain::DomainError;

/// Message every channel sends for `test()`
pub(super) fn test_message() -> NotificationMessage {
    NotificationMessage::new(
        "zodsign test",
        "Notification channel is configured correctly.",
    )
}

/// POST a JSON payload; anything but a 2xx status is a notification error
pub(super) async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    channel: &str,
    url: &str,
    payload: &T,
) -> Result<Response, DomainError> {
    let response = client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(|e| DomainError::Notification(format!("{} request failed: {}", channel, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DomainError::Notification(format!(
            "{} returned status {}: {}",
            channel, status, body
        )));
    }

    log::debug!("{} accepted the message with status {}", channel, status);
    Ok(response)
}
