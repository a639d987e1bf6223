//! Notification endpoints

use serde::{Deserialize, Serialize};

use super::Ack;
use crate::core::http::{ApiClient, ApiError, ApiRequest, Transport};
use crate::core::models::Notification;

#[derive(Serialize)]
struct ListQuery {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    unread_only: bool,
}

#[derive(Deserialize)]
struct ListBody {
    #[serde(default)]
    notifications: Vec<Notification>,
}

#[derive(Deserialize)]
struct CountBody {
    unread_count: u32,
}

pub struct NotificationApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> NotificationApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, unread_only: bool) -> Result<Vec<Notification>, ApiError> {
        let request = ApiRequest::get("/notifications").query(&ListQuery { unread_only })?;
        let body: ListBody = self.client.request_json(request).await?;
        Ok(body.notifications)
    }

    /// Unread total for the navbar badge. Failures are not announced to the UI.
    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let request = ApiRequest::get("/notifications/unread/count").silent();
        let body: CountBody = self.client.request_json(request).await?;
        Ok(body.unread_count)
    }

    pub async fn mark_read(&self, notification_id: i64) -> Result<(), ApiError> {
        let _: Ack = self
            .client
            .request_json(ApiRequest::post(format!("/notifications/{}/read", notification_id)))
            .await?;
        Ok(())
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        let ack: Ack = self
            .client
            .request_json(ApiRequest::post("/notifications/read-all"))
            .await?;
        tracing::debug!(detail = ack.message.as_deref().unwrap_or_default(), "notifications marked read");
        Ok(())
    }
}
