// src/views/query.rs
use crate::services::error::ApiError;

/// Collections that can resolve to "no rows".
pub trait Presence {
    fn is_absent(&self) -> bool;
}

impl<T> Presence for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! always_present {
    ($($ty:ty),* $(,)?) => {
        $(impl Presence for $ty {
            fn is_absent(&self) -> bool {
                false
            }
        })*
    };
}

always_present!(
    crate::models::QuotaSnapshot,
    crate::models::QuotaBreakdown,
    crate::models::AuctionDetail,
);

/// Lifecycle of a single fetch as seen by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Dependent query whose key is not set.
    Idle,
    Loading,
    Empty,
    Failed(ApiError),
    Ready(T),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Idle
    }
}

impl<T: Presence> QueryState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) if value.is_absent() => QueryState::Empty,
            Ok(value) => QueryState::Ready(value),
            Err(err) => QueryState::Failed(err),
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Renders `present` for data, a status line otherwise.
    pub fn render_with<F>(&self, what: &str, present: F) -> String
    where
        F: FnOnce(&T) -> String,
    {
        match self {
            QueryState::Idle => String::new(),
            QueryState::Loading => format!("Loading {}...", what),
            QueryState::Empty => format!("No {} available.", what),
            QueryState::Failed(err) => format!("Error: failed to load {}: {}", what, err),
            QueryState::Ready(value) => present(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuotaBreakdown;

    #[test]
    fn empty_list_is_distinct_from_failure() {
        let empty: QueryState<Vec<u32>> = QueryState::from_result(Ok(vec![]));
        let failed: QueryState<Vec<u32>> =
            QueryState::from_result(Err(ApiError::network_error("connection refused")));
        let ready: QueryState<Vec<u32>> = QueryState::from_result(Ok(vec![1, 2]));

        assert_eq!(empty, QueryState::Empty);
        assert_eq!(failed.error().map(|e| e.message.as_str()), Some("connection refused"));
        assert_eq!(ready.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn records_are_never_empty() {
        let state = QueryState::from_result(Ok(QuotaBreakdown::default()));
        assert!(matches!(state, QueryState::Ready(_)));
    }

    #[test]
    fn each_state_renders_differently() {
        let render = |state: QueryState<Vec<u32>>| state.render_with("rows", |v| format!("{} rows", v.len()));

        assert_eq!(render(QueryState::Idle), "");
        assert_eq!(render(QueryState::Loading), "Loading rows...");
        assert_eq!(render(QueryState::Empty), "No rows available.");
        assert_eq!(
            render(QueryState::Failed(ApiError::status_error(500, "boom"))),
            "Error: failed to load rows: boom"
        );
        assert_eq!(render(QueryState::Ready(vec![7])), "1 rows");
    }
}
