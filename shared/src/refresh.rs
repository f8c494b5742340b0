//! State machine behind the polling hook.
//!
//! Kept free of any UI framework so the transitions can be tested natively.
//! The hook wraps [`RefreshState`] and feeds it [`RefreshAction`]s.

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::format::safe_date;

#[derive(Debug)]
pub struct RefreshState<T> {
    pub data: Option<Rc<T>>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum RefreshAction<T> {
    Started,
    Loaded {
        data: Rc<T>,
        last_update: DateTime<Utc>,
    },
    Failed(ApiError),
}

/// What a feature should render for the current state.
#[derive(Debug, PartialEq)]
pub enum Phase<'a, T> {
    /// Nothing loaded yet and a request is in flight
    Loading,
    /// Nothing loaded and the last request failed
    Failed(&'a ApiError),
    /// Data available, possibly stale when `stale` is set
    Ready { data: &'a T, stale: Option<&'a ApiError> },
}

impl<T> Default for RefreshState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            last_update: None,
        }
    }
}

impl<T> Clone for RefreshState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
            last_update: self.last_update,
        }
    }
}

impl<T> PartialEq for RefreshState<T> {
    fn eq(&self, other: &Self) -> bool {
        let same_data = match (&self.data, &other.data) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_data
            && self.loading == other.loading
            && self.error == other.error
            && self.last_update == other.last_update
    }
}

impl<T> RefreshState<T> {
    /// Applies one transition and returns the next state.
    pub fn apply(&self, action: RefreshAction<T>) -> Self {
        match action {
            // Only the first load shows a spinner; later polls refresh in place.
            RefreshAction::Started => Self {
                loading: self.data.is_none(),
                ..self.clone()
            },
            RefreshAction::Loaded { data, last_update } => Self {
                data: Some(data),
                loading: false,
                error: None,
                last_update: Some(last_update),
            },
            RefreshAction::Failed(error) => Self {
                loading: false,
                error: Some(error),
                ..self.clone()
            },
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    /// Optimistic: the endpoint counts as reachable until a fetch fails.
    pub fn is_reachable(&self) -> bool {
        self.error.is_none()
    }

    pub fn phase(&self) -> Phase<'_, T> {
        match (&self.data, &self.error) {
            (Some(data), stale) => Phase::Ready {
                data: data.as_ref(),
                stale: stale.as_ref(),
            },
            (None, Some(error)) => Phase::Failed(error),
            (None, None) => Phase::Loading,
        }
    }
}

/// Server refresh time when the response carries one, otherwise `now`.
pub fn resolve_last_update(server_time: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    server_time.and_then(safe_date).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[fixture]
    fn loaded() -> RefreshState<Vec<u32>> {
        RefreshState::default().apply(RefreshAction::Loaded {
            data: Rc::new(vec![1, 2, 3]),
            last_update: at(1),
        })
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state: RefreshState<()> = RefreshState::default();
        assert!(state.loading);
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[rstest]
    fn test_refresh_does_not_flicker(loaded: RefreshState<Vec<u32>>) {
        let refreshing = loaded.apply(RefreshAction::Started);
        assert!(!refreshing.loading);
        assert_eq!(refreshing.data(), Some(&vec![1, 2, 3]));
    }

    #[rstest]
    fn test_failure_keeps_stale_data(loaded: RefreshState<Vec<u32>>) {
        let failed = loaded.apply(RefreshAction::Failed(ApiError::Network("offline".into())));
        assert!(!failed.loading);
        assert_eq!(failed.data(), Some(&vec![1, 2, 3]));
        assert_eq!(failed.last_update, Some(at(1)));
        match failed.phase() {
            Phase::Ready { stale: Some(err), .. } => assert!(err.is_transient()),
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[rstest]
    fn test_success_clears_error(loaded: RefreshState<Vec<u32>>) {
        let recovered = loaded
            .apply(RefreshAction::Failed(ApiError::Network("offline".into())))
            .apply(RefreshAction::Loaded { data: Rc::new(vec![9]), last_update: at(2) });
        assert_eq!(recovered.error, None);
        assert_eq!(recovered.data(), Some(&vec![9]));
        assert_eq!(recovered.last_update, Some(at(2)));
    }

    #[test]
    fn test_first_load_failure() {
        let state: RefreshState<()> = RefreshState::default()
            .apply(RefreshAction::Started)
            .apply(RefreshAction::Failed(ApiError::Decode("bad".into())));
        assert!(!state.loading);
        assert!(matches!(state.phase(), Phase::Failed(ApiError::Decode(_))));
    }

    #[test]
    fn test_reachable_until_a_fetch_fails() {
        let pending: RefreshState<()> = RefreshState::default().apply(RefreshAction::Started);
        assert!(pending.is_reachable());
        let failed = pending.apply(RefreshAction::Failed(ApiError::Network("offline".into())));
        assert!(!failed.is_reachable());
    }

    #[test]
    fn test_resolve_last_update() {
        assert_eq!(resolve_last_update(Some("2024-01-01 05:00:00"), at(9)), at(5));
        assert_eq!(resolve_last_update(Some("2024-01-01T05:00:00Z"), at(9)), at(5));
        assert_eq!(resolve_last_update(Some("Never"), at(9)), at(9));
        assert_eq!(resolve_last_update(None, at(9)), at(9));
    }
}
