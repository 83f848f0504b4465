//! Discovery API boundary and effect executor.
//!
//! # Design
//! - `EventsApi` is the only seam to the network; the browser client and test fakes implement it.
//! - `execute` runs one request effect and packages the ticketed response for the controller.
//! - Timer effects are not requests and are left to the shell.

use crate::core::error::ApiResult;
use crate::features::discovery::controller::DiscoveryController;
use crate::features::discovery::likes::LikeTicket;
use crate::features::discovery::search::SearchTicket;
use crate::features::discovery::state::{
    DiscoveryEffect, PrimaryRequest, PrimaryTicket, WatchlistTicket,
};
use async_trait::async_trait;
use eventora_api_models::{
    EventFilterRequest, EventId, EventListPayload, EventPage, EventSearchParams, EventSummary,
    UserInfo,
};

/// Remote operations the discovery page depends on.
#[async_trait(?Send)]
pub trait EventsApi {
    /// `count` recommended events.
    async fn recommendations(&self, count: u32) -> ApiResult<Vec<EventSummary>>;
    /// Events matching a filter.
    async fn events_by_filter(&self, filter: &EventFilterRequest) -> ApiResult<EventListPayload>;
    /// Paged name/organiser search.
    async fn search_events(&self, params: &EventSearchParams) -> ApiResult<EventPage>;
    /// Events the current user registered for.
    async fn my_events(&self) -> ApiResult<EventListPayload>;
    /// Events the current user liked.
    async fn watchlist(&self) -> ApiResult<EventListPayload>;
    /// Like an event.
    async fn like_event(&self, event_id: EventId) -> ApiResult<()>;
    /// Remove a like.
    async fn unlike_event(&self, event_id: EventId) -> ApiResult<()>;
    /// Profile of the current user.
    async fn user_info(&self) -> ApiResult<UserInfo>;
}

/// Ticketed outcome of a request effect.
#[derive(Clone, Debug, PartialEq)]
pub enum DiscoveryResponse {
    /// Primary list outcome.
    Primary {
        /// Ticket from the effect.
        ticket: PrimaryTicket,
        /// Flattened events or the failure.
        result: ApiResult<Vec<EventSummary>>,
    },
    /// Search outcome.
    Search {
        /// Ticket from the effect.
        ticket: SearchTicket,
        /// Page or the failure.
        result: ApiResult<EventPage>,
    },
    /// Watchlist outcome.
    Watchlist {
        /// Ticket from the effect.
        ticket: WatchlistTicket,
        /// Flattened events or the failure.
        result: ApiResult<Vec<EventSummary>>,
    },
    /// Like/unlike outcome.
    Like {
        /// Ticket from the effect.
        ticket: LikeTicket,
        /// Success or the failure.
        result: ApiResult<()>,
    },
}

/// Run a request effect. Returns `None` for timer effects.
pub async fn execute<A>(api: &A, effect: DiscoveryEffect) -> Option<DiscoveryResponse>
where
    A: EventsApi + ?Sized,
{
    let response = match effect {
        DiscoveryEffect::FetchPrimary { ticket, request } => {
            let result = match request {
                PrimaryRequest::Recommendations { count } => api.recommendations(count).await,
                PrimaryRequest::Filter(filter) => api
                    .events_by_filter(&filter)
                    .await
                    .map(EventListPayload::into_events),
                PrimaryRequest::MyEvents => {
                    api.my_events().await.map(EventListPayload::into_events)
                }
            };
            DiscoveryResponse::Primary { ticket, result }
        }
        DiscoveryEffect::Search { ticket, params } => DiscoveryResponse::Search {
            result: api.search_events(&params).await,
            ticket,
        },
        DiscoveryEffect::FetchWatchlist { ticket } => DiscoveryResponse::Watchlist {
            result: api.watchlist().await.map(EventListPayload::into_events),
            ticket,
        },
        DiscoveryEffect::Like { ticket } => {
            let result = if ticket.liked {
                api.like_event(ticket.event_id).await
            } else {
                api.unlike_event(ticket.event_id).await
            };
            DiscoveryResponse::Like { ticket, result }
        }
        DiscoveryEffect::ScheduleSearch { .. } | DiscoveryEffect::CancelSearch => return None,
    };
    Some(response)
}

impl DiscoveryController {
    /// Feed a response back and collect follow-up effects.
    pub fn apply_response(&mut self, response: DiscoveryResponse) -> Vec<DiscoveryEffect> {
        match response {
            DiscoveryResponse::Primary { ticket, result } => self.apply_primary(ticket, result),
            DiscoveryResponse::Search { ticket, result } => self.apply_search(&ticket, result),
            DiscoveryResponse::Watchlist { ticket, result } => {
                self.apply_watchlist(ticket, result)
            }
            DiscoveryResponse::Like { ticket, result } => self.apply_like(ticket, &result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DiscoveryConfig;
    use crate::core::error::ApiError;
    use crate::features::discovery::search::SearchQuery;
    use crate::features::discovery::state::ViewMode;
    use eventora_api_models::{EventCategory, EventStatus};
    use std::cell::RefCell;

    fn event(id: EventId, liked: bool) -> EventSummary {
        EventSummary {
            id,
            title: format!("Event {id}"),
            organizer_name: None,
            event_category: None,
            location_name: None,
            city: None,
            state: None,
            country: None,
            event_status: EventStatus::Scheduled,
            start_date: None,
            participant_count: None,
            current_participants: None,
            is_liked: liked,
        }
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        fail_likes: bool,
        fail_search: bool,
    }

    impl FakeApi {
        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl EventsApi for FakeApi {
        async fn recommendations(&self, count: u32) -> ApiResult<Vec<EventSummary>> {
            self.record(format!("recommendations:{count}"));
            Ok(vec![event(1, false), event(2, false)])
        }

        async fn events_by_filter(
            &self,
            filter: &EventFilterRequest,
        ) -> ApiResult<EventListPayload> {
            let body = serde_json::to_string(filter).map_err(ApiError::decode)?;
            self.record(format!("filter:{body}"));
            Ok(EventListPayload::Wrapped {
                events: vec![event(3, false)],
            })
        }

        async fn search_events(&self, params: &EventSearchParams) -> ApiResult<EventPage> {
            self.record(format!("search:{}:{}", params.event_name, params.is_my_event_list));
            if self.fail_search {
                return Err(ApiError::transport("offline"));
            }
            Ok(EventPage {
                content: vec![event(9, false)],
                total_elements: Some(1),
                number: Some(0),
            })
        }

        async fn my_events(&self) -> ApiResult<EventListPayload> {
            self.record("my_events");
            Ok(EventListPayload::List(vec![event(4, true)]))
        }

        async fn watchlist(&self) -> ApiResult<EventListPayload> {
            self.record("watchlist");
            Ok(EventListPayload::List(vec![event(1, true)]))
        }

        async fn like_event(&self, event_id: EventId) -> ApiResult<()> {
            self.record(format!("like:{event_id}"));
            if self.fail_likes {
                return Err(ApiError::Status {
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(())
        }

        async fn unlike_event(&self, event_id: EventId) -> ApiResult<()> {
            self.record(format!("unlike:{event_id}"));
            if self.fail_likes {
                return Err(ApiError::transport("offline"));
            }
            Ok(())
        }

        async fn user_info(&self) -> ApiResult<UserInfo> {
            self.record("user_info");
            Ok(UserInfo::default())
        }
    }

    async fn drive(
        controller: &mut DiscoveryController,
        api: &FakeApi,
        effects: Vec<DiscoveryEffect>,
    ) -> Vec<u64> {
        let mut timers = Vec::new();
        let mut queue = effects;
        while let Some(effect) = queue.pop() {
            if let DiscoveryEffect::ScheduleSearch { generation, .. } = effect {
                timers.push(generation);
                continue;
            }
            if let Some(response) = execute(api, effect).await {
                queue.extend(controller.apply_response(response));
            }
        }
        timers
    }

    #[tokio::test]
    async fn initial_load_then_quick_filter_round_trip() {
        let api = FakeApi::default();
        let mut controller = DiscoveryController::new(DiscoveryConfig::default(), false);

        let effects = controller.initial_load(None);
        drive(&mut controller, &api, effects).await;
        assert_eq!(controller.displayed().len(), 2);

        let effects = controller.apply_quick_filter(EventCategory::Sports);
        drive(&mut controller, &api, effects).await;
        let effects = controller.apply_quick_filter(EventCategory::Sports);
        drive(&mut controller, &api, effects).await;

        assert_eq!(
            api.calls(),
            vec![
                "recommendations:10".to_string(),
                r#"filter:{"eventCategory":"SPORTS"}"#.to_string(),
                "filter:{}".to_string(),
            ]
        );
        assert_eq!(controller.displayed()[0].id, 3);
    }

    #[tokio::test]
    async fn debounced_search_issues_single_request() {
        let api = FakeApi::default();
        let mut controller = DiscoveryController::default();
        let effects = controller.initial_load(None);
        drive(&mut controller, &api, effects).await;

        let mut timers = Vec::new();
        for text in ["jaz", "jazz"] {
            let effects = controller.set_search(SearchQuery::new(text, ""));
            timers.extend(drive(&mut controller, &api, effects).await);
        }
        for generation in timers {
            let effects = controller.search_timer_fired(generation);
            drive(&mut controller, &api, effects).await;
        }

        let searches: Vec<_> = api
            .calls()
            .into_iter()
            .filter(|call| call.starts_with("search:"))
            .collect();
        assert_eq!(searches, vec!["search:jazz:false".to_string()]);
        assert_eq!(controller.displayed()[0].id, 9);
    }

    #[tokio::test]
    async fn failed_search_keeps_baseline() {
        let api = FakeApi {
            fail_search: true,
            ..FakeApi::default()
        };
        let mut controller = DiscoveryController::default();
        let effects = controller.initial_load(None);
        drive(&mut controller, &api, effects).await;

        let effects = controller.set_search(SearchQuery::new("jazz", ""));
        for generation in drive(&mut controller, &api, effects).await {
            let effects = controller.search_timer_fired(generation);
            drive(&mut controller, &api, effects).await;
        }
        assert!(controller.error().is_none());
        assert_eq!(controller.displayed().len(), 2);
    }

    #[tokio::test]
    async fn my_events_and_watchlist_load_for_session() {
        let api = FakeApi::default();
        let mut controller = DiscoveryController::new(DiscoveryConfig::default(), true);
        let effects = controller.initial_load(Some(ViewMode::Mine));
        drive(&mut controller, &api, effects).await;
        assert_eq!(controller.displayed()[0].id, 4);

        controller.select_view(ViewMode::Watchlist);
        let effects = controller.load_watchlist();
        drive(&mut controller, &api, effects).await;
        assert_eq!(controller.watchlist().events.len(), 1);
        assert!(!controller.watchlist().loading);
    }

    #[tokio::test]
    async fn unlike_failure_restores_watchlist_entry() {
        let api = FakeApi {
            fail_likes: true,
            ..FakeApi::default()
        };
        let mut controller = DiscoveryController::new(DiscoveryConfig::default(), true);
        controller.select_view(ViewMode::Watchlist);
        let effects = controller.load_watchlist();
        drive(&mut controller, &api, effects).await;

        let effects = controller.toggle_like(1, false);
        assert!(controller.watchlist().events.is_empty());
        drive(&mut controller, &api, effects).await;

        assert_eq!(controller.watchlist().events.len(), 1);
        assert!(controller.watchlist().events[0].is_liked);
        assert!(controller.notice().is_some());
        assert!(api.calls().contains(&"unlike:1".to_string()));
    }

    #[tokio::test]
    async fn timer_effects_are_not_executed() {
        let api = FakeApi::default();
        assert!(execute(&api, DiscoveryEffect::CancelSearch).await.is_none());
        assert!(api.calls().is_empty());
        let profile = api.user_info().await;
        assert!(profile.is_ok());
    }
}
