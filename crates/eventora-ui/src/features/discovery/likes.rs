//! Optimistic like/unlike with per-event reconciliation.
//!
//! # Design
//! - Flip the flag in every held list before the request settles.
//! - Watchlist membership means liked, so an unlike removes the entry and keeps a snapshot.
//! - Every toggle gets a sequence number; only the newest intent for an id owns the display.
//! - A failed newest intent rolls back to the last server-confirmed state.

use crate::core::error::ApiResult;
use eventora_api_models::{EventId, EventSummary};
use std::collections::BTreeMap;

/// Identity of one like/unlike request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeTicket {
    /// Target event.
    pub event_id: EventId,
    /// Per-toggler sequence number.
    pub seq: u64,
    /// Requested state.
    pub liked: bool,
}

/// What a settled response did to the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeSettlement {
    /// Server agreed with the newest intent, or an older success was recorded.
    Confirmed,
    /// Failure of an intent that was already superseded; display untouched.
    Superseded,
    /// Newest intent failed; lists were restored to `liked`.
    RolledBack {
        /// State restored in every list.
        liked: bool,
    },
    /// No toggle is tracked for this id.
    Unknown,
}

#[derive(Clone, Debug, PartialEq)]
struct LikeEntry {
    latest_seq: u64,
    desired: bool,
    confirmed: bool,
    confirmed_seq: u64,
    outstanding: usize,
    removed: Option<(usize, EventSummary)>,
}

/// Tracks outstanding like requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LikeToggler {
    entries: BTreeMap<EventId, LikeEntry>,
    next_seq: u64,
}

impl LikeToggler {
    /// Whether any request for `event_id` is still outstanding.
    #[must_use]
    pub fn in_flight(&self, event_id: EventId) -> bool {
        self.entries.contains_key(&event_id)
    }

    /// Apply the optimistic flip and return the request to issue.
    pub fn toggle<'a>(
        &mut self,
        event_id: EventId,
        liked: bool,
        main: impl IntoIterator<Item = &'a mut Vec<EventSummary>>,
        watchlist: &mut Vec<EventSummary>,
    ) -> LikeTicket {
        let mut main: Vec<&'a mut Vec<EventSummary>> = main.into_iter().collect();
        let previous = main
            .iter()
            .map(|list| list.as_slice())
            .chain(std::iter::once(watchlist.as_slice()))
            .find_map(|list| find(list, event_id).map(|event| event.is_liked))
            .unwrap_or(!liked);

        self.next_seq += 1;
        let seq = self.next_seq;
        let entry = self.entries.entry(event_id).or_insert_with(|| LikeEntry {
            latest_seq: 0,
            desired: previous,
            confirmed: previous,
            confirmed_seq: 0,
            outstanding: 0,
            removed: None,
        });
        entry.latest_seq = seq;
        entry.desired = liked;
        entry.outstanding += 1;

        for list in &mut main {
            set_liked(list, event_id, liked);
        }
        apply_to_watchlist(entry, watchlist, event_id, liked);

        LikeTicket {
            event_id,
            seq,
            liked,
        }
    }

    /// Reconcile a settled request.
    pub fn settle<'a>(
        &mut self,
        ticket: LikeTicket,
        result: &ApiResult<()>,
        main: impl IntoIterator<Item = &'a mut Vec<EventSummary>>,
        watchlist: &mut Vec<EventSummary>,
    ) -> LikeSettlement {
        let Some(entry) = self.entries.get_mut(&ticket.event_id) else {
            return LikeSettlement::Unknown;
        };
        entry.outstanding = entry.outstanding.saturating_sub(1);

        let settlement = match result {
            Ok(()) => {
                if ticket.seq >= entry.confirmed_seq {
                    entry.confirmed = ticket.liked;
                    entry.confirmed_seq = ticket.seq;
                }
                LikeSettlement::Confirmed
            }
            Err(_) if ticket.seq != entry.latest_seq => LikeSettlement::Superseded,
            Err(err) => {
                let liked = entry.confirmed;
                entry.desired = liked;
                tracing::warn!(
                    event_id = ticket.event_id,
                    liked = ticket.liked,
                    error = %err,
                    "like request failed; restoring confirmed state"
                );
                for list in main {
                    set_liked(list, ticket.event_id, liked);
                }
                apply_to_watchlist(entry, watchlist, ticket.event_id, liked);
                LikeSettlement::RolledBack { liked }
            }
        };

        if entry.outstanding == 0 {
            self.entries.remove(&ticket.event_id);
        }
        settlement
    }

    /// Re-apply outstanding intents onto a freshly fetched main list.
    pub fn overlay(&self, events: &mut [EventSummary]) {
        for event in events {
            if let Some(desired) = self.desired(event.id) {
                event.is_liked = desired;
            }
        }
    }

    /// Re-apply outstanding intents onto a freshly fetched watchlist.
    pub fn overlay_watchlist(&self, events: &mut Vec<EventSummary>) {
        events.retain(|event| self.desired(event.id) != Some(false));
        self.overlay(events);
    }

    fn desired(&self, event_id: EventId) -> Option<bool> {
        self.entries.get(&event_id).map(|entry| entry.desired)
    }
}

fn apply_to_watchlist(
    entry: &mut LikeEntry,
    watchlist: &mut Vec<EventSummary>,
    event_id: EventId,
    liked: bool,
) {
    if liked {
        set_liked(watchlist, event_id, true);
        if let Some((index, mut event)) = entry.removed.take()
            && find(watchlist, event_id).is_none()
        {
            event.is_liked = true;
            watchlist.insert(index.min(watchlist.len()), event);
        }
    } else if let Some(index) = watchlist.iter().position(|event| event.id == event_id) {
        let mut event = watchlist.remove(index);
        event.is_liked = false;
        entry.removed.get_or_insert((index, event));
    }
}

fn find(list: &[EventSummary], event_id: EventId) -> Option<&EventSummary> {
    list.iter().find(|event| event.id == event_id)
}

fn set_liked(list: &mut [EventSummary], event_id: EventId, liked: bool) {
    for event in list.iter_mut().filter(|event| event.id == event_id) {
        event.is_liked = liked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;

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
            event_status: eventora_api_models::EventStatus::Scheduled,
            start_date: None,
            participant_count: None,
            current_participants: None,
            is_liked: liked,
        }
    }

    fn liked(list: &[EventSummary], id: EventId) -> Option<bool> {
        find(list, id).map(|event| event.is_liked)
    }

    fn failure() -> ApiResult<()> {
        Err(ApiError::Status {
            status: 500,
            body: String::new(),
        })
    }

    #[test]
    fn like_flips_main_list_and_watchlist_immediately() {
        let mut toggler = LikeToggler::default();
        let mut main = vec![event(1, false), event(2, false)];
        let mut watchlist = vec![event(1, false)];

        let ticket = toggler.toggle(1, true, [&mut main], &mut watchlist);
        assert!(ticket.liked);
        assert_eq!(liked(&main, 1), Some(true));
        assert_eq!(liked(&watchlist, 1), Some(true));
        assert_eq!(liked(&main, 2), Some(false));
        assert!(toggler.in_flight(1));

        let settled = toggler.settle(ticket, &Ok(()), [&mut main], &mut watchlist);
        assert_eq!(settled, LikeSettlement::Confirmed);
        assert!(!toggler.in_flight(1));
    }

    #[test]
    fn unlike_removes_from_watchlist_and_flips_main() {
        let mut toggler = LikeToggler::default();
        let mut main = vec![event(1, true)];
        let mut watchlist = vec![event(3, true), event(1, true)];

        toggler.toggle(1, false, [&mut main], &mut watchlist);
        assert_eq!(liked(&main, 1), Some(false));
        assert!(find(&watchlist, 1).is_none());
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn failed_unlike_restores_watchlist_position() {
        let mut toggler = LikeToggler::default();
        let mut main: Vec<EventSummary> = Vec::new();
        let mut watchlist = vec![event(3, true), event(1, true), event(4, true)];

        let ticket = toggler.toggle(1, false, [&mut main], &mut watchlist);
        let settled = toggler.settle(ticket, &failure(), [&mut main], &mut watchlist);

        assert_eq!(settled, LikeSettlement::RolledBack { liked: true });
        let ids: Vec<_> = watchlist.iter().map(|event| event.id).collect();
        assert_eq!(ids, vec![3, 1, 4]);
        assert_eq!(liked(&watchlist, 1), Some(true));
    }

    #[test]
    fn failed_like_rolls_back_main_list() {
        let mut toggler = LikeToggler::default();
        let mut main = vec![event(1, false)];
        let mut search = vec![event(1, false)];
        let mut watchlist = Vec::new();

        let ticket = toggler.toggle(1, true, [&mut main, &mut search], &mut watchlist);
        toggler.settle(ticket, &failure(), [&mut main, &mut search], &mut watchlist);
        assert_eq!(liked(&main, 1), Some(false));
        assert_eq!(liked(&search, 1), Some(false));
    }

    #[test]
    fn superseded_failure_leaves_newest_intent() {
        let mut toggler = LikeToggler::default();
        let mut main = vec![event(1, false)];
        let mut watchlist = Vec::new();

        let like = toggler.toggle(1, true, [&mut main], &mut watchlist);
        let unlike = toggler.toggle(1, false, [&mut main], &mut watchlist);
        let relike = toggler.toggle(1, true, [&mut main], &mut watchlist);

        assert_eq!(
            toggler.settle(unlike, &failure(), [&mut main], &mut watchlist),
            LikeSettlement::Superseded
        );
        assert_eq!(liked(&main, 1), Some(true));

        toggler.settle(like, &Ok(()), [&mut main], &mut watchlist);
        assert_eq!(
            toggler.settle(relike, &failure(), [&mut main], &mut watchlist),
            LikeSettlement::RolledBack { liked: true }
        );
        assert_eq!(liked(&main, 1), Some(true));
        assert!(!toggler.in_flight(1));
    }

    #[test]
    fn older_success_does_not_override_newer_confirmation() {
        let mut toggler = LikeToggler::default();
        let mut main = vec![event(1, false)];
        let mut watchlist = Vec::new();

        let like = toggler.toggle(1, true, [&mut main], &mut watchlist);
        let unlike = toggler.toggle(1, false, [&mut main], &mut watchlist);
        let third = toggler.toggle(1, true, [&mut main], &mut watchlist);

        toggler.settle(unlike, &Ok(()), [&mut main], &mut watchlist);
        toggler.settle(like, &Ok(()), [&mut main], &mut watchlist);
        let settled = toggler.settle(third, &failure(), [&mut main], &mut watchlist);
        assert_eq!(settled, LikeSettlement::RolledBack { liked: false });
        assert_eq!(liked(&main, 1), Some(false));
    }

    #[test]
    fn overlay_keeps_pending_intent_on_refetched_lists() {
        let mut toggler = LikeToggler::default();
        let mut main = vec![event(1, false)];
        let mut watchlist = vec![event(2, true)];
        toggler.toggle(1, true, [&mut main], &mut watchlist);
        toggler.toggle(2, false, [&mut main], &mut watchlist);

        let mut refetched = vec![event(1, false), event(2, true)];
        toggler.overlay(&mut refetched);
        assert_eq!(liked(&refetched, 1), Some(true));
        assert_eq!(liked(&refetched, 2), Some(false));

        let mut refetched_watchlist = vec![event(2, true)];
        toggler.overlay_watchlist(&mut refetched_watchlist);
        assert!(refetched_watchlist.is_empty());
    }

    #[test]
    fn unknown_tickets_are_reported() {
        let mut toggler = LikeToggler::default();
        let ticket = LikeTicket {
            event_id: 9,
            seq: 1,
            liked: true,
        };
        let mut watchlist = Vec::new();
        assert_eq!(
            toggler.settle(
                ticket,
                &Ok(()),
                std::iter::empty::<&mut Vec<EventSummary>>(),
                &mut watchlist
            ),
            LikeSettlement::Unknown
        );
    }
}
