//! HTTP client for the Eventora API.

use crate::core::auth::TokenStore;
use crate::core::error::{ApiError, ApiResult};
use crate::core::logic::{interaction_path, recommendations_path, search_path};
use crate::features::discovery::api::EventsApi;
use async_trait::async_trait;
use eventora_api_models::{
    EventFilterRequest, EventId, EventListPayload, EventPage, EventSearchParams, EventSummary,
    UserInfo,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use std::rc::Rc;

#[derive(Clone)]
pub(crate) struct ApiClient {
    base_url: String,
    tokens: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.into(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: Request) -> Request {
        // Read on every call; another tab may have replaced or cleared the token.
        match self.tokens.load_token() {
            Some(token) if !token.trim().is_empty() => {
                request.header("Authorization", &format!("Bearer {token}"))
            }
            _ => request,
        }
    }

    async fn send(&self, request: Request) -> ApiResult<String> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let status = response.status();
        let ok = response.ok();
        let body = response.text().await.map_err(ApiError::transport)?;
        if !ok {
            return Err(ApiError::Status { status, body });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(Request::get(&self.url(path))).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(ApiError::decode)
}

fn decode_list(body: &str) -> ApiResult<EventListPayload> {
    if body.trim().is_empty() {
        return Ok(EventListPayload::List(Vec::new()));
    }
    decode(body)
}

#[async_trait(?Send)]
impl EventsApi for ApiClient {
    async fn recommendations(&self, count: u32) -> ApiResult<Vec<EventSummary>> {
        self.get_json(&recommendations_path(count)).await
    }

    async fn events_by_filter(&self, filter: &EventFilterRequest) -> ApiResult<EventListPayload> {
        let request = Request::post(&self.url("/public/api/events/getByFilter"))
            .json(filter)
            .map_err(ApiError::transport)?;
        let body = self.send(request).await?;
        decode_list(&body)
    }

    async fn search_events(&self, params: &EventSearchParams) -> ApiResult<EventPage> {
        self.get_json(&search_path(params)).await
    }

    async fn my_events(&self) -> ApiResult<EventListPayload> {
        let body = self
            .send(Request::get(&self.url("/api/registrations/getMyEvents")))
            .await?;
        decode_list(&body)
    }

    async fn watchlist(&self) -> ApiResult<EventListPayload> {
        let body = self.send(Request::get(&self.url("/api/interactions"))).await?;
        decode_list(&body)
    }

    async fn like_event(&self, event_id: EventId) -> ApiResult<()> {
        self.send(Request::post(&self.url(&interaction_path(event_id))))
            .await
            .map(drop)
    }

    async fn unlike_event(&self, event_id: EventId) -> ApiResult<()> {
        self.send(Request::delete(&self.url(&interaction_path(event_id))))
            .await
            .map(drop)
    }

    async fn user_info(&self) -> ApiResult<UserInfo> {
        self.get_json("/public/api/getUserInfo").await
    }
}
