use crate::api::ApiError;
use crate::models::Post;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum QueryStatus {
    Loading,
    Ready(Post),
    Failed(String),
}

/// Cached query for "the post" of the detail view.
///
/// Pull-based: the only sanctioned write path is `invalidate()`, which bumps
/// the epoch so the page's tracked fetch effect re-runs and re-fetches.
/// Nothing ever writes a Post into the cache directly.
///
/// Responses are guarded by a request ticket; a response for a superseded
/// request is dropped, so the last *issued* fetch wins.
#[derive(Clone, Copy)]
pub(crate) struct PostQuery {
    status: RwSignal<QueryStatus>,
    epoch: RwSignal<u64>,
    request_id: RwSignal<u64>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(QueryStatus::Loading),
            epoch: RwSignal::new(0),
            request_id: RwSignal::new(0),
        }
    }

    /// Tracked read for views.
    pub fn status(&self) -> QueryStatus {
        self.status.get()
    }

    #[allow(dead_code)]
    pub fn status_untracked(&self) -> QueryStatus {
        self.status.get_untracked()
    }

    /// Current canonical post, if loaded. Untracked; event handlers use this.
    pub fn post_untracked(&self) -> Option<Post> {
        match self.status.get_untracked() {
            QueryStatus::Ready(post) => Some(post),
            _ => None,
        }
    }

    /// Tracked read of the invalidation epoch. A fetch effect that reads
    /// this re-runs whenever the query is invalidated.
    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Force the next read to re-fetch.
    pub fn invalidate(&self) {
        self.epoch.update(|e| *e += 1);
    }

    /// Mark a fetch as outstanding and hand out its stale-guard ticket.
    pub fn begin_request(&self) -> u64 {
        let ticket = self.request_id.get_untracked() + 1;
        self.request_id.set(ticket);
        self.status.set(QueryStatus::Loading);
        ticket
    }

    /// Settle the fetch identified by `ticket`; superseded tickets are ignored.
    pub fn finish(&self, ticket: u64, result: Result<Post, ApiError>) {
        if self.request_id.get_untracked() != ticket {
            return;
        }
        match result {
            Ok(post) => self.status.set(QueryStatus::Ready(post)),
            Err(e) => self.status.set(QueryStatus::Failed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    fn post(id: &str, title: &str) -> Post {
        Post {
            post_id: id.to_string(),
            title: title.to_string(),
            body: "b".to_string(),
            category: "c".to_string(),
            name: "n".to_string(),
            date: "d".to_string(),
            user_id: "u".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn begin_request_sets_loading() {
        let q = PostQuery::new();
        let _ = q.begin_request();
        assert_eq!(q.status_untracked(), QueryStatus::Loading);
    }

    #[test]
    fn finish_ready_exposes_post() {
        let q = PostQuery::new();
        let t = q.begin_request();
        q.finish(t, Ok(post("p-1", "hello")));
        assert_eq!(q.post_untracked().map(|p| p.post_id), Some("p-1".to_string()));
    }

    #[test]
    fn stale_response_is_dropped() {
        let q = PostQuery::new();
        let first = q.begin_request();
        let second = q.begin_request();
        q.finish(second, Ok(post("p-2", "fresh")));
        // The slow first response arrives after the second settled.
        q.finish(first, Ok(post("p-1", "stale")));
        assert_eq!(q.post_untracked().map(|p| p.post_id), Some("p-2".to_string()));
    }

    #[test]
    fn fetch_failure_is_terminal_for_the_view() {
        let q = PostQuery::new();
        let t = q.begin_request();
        q.finish(
            t,
            Err(ApiError {
                kind: ApiErrorKind::NotFound,
                message: "no such post".to_string(),
            }),
        );
        assert_eq!(
            q.status_untracked(),
            QueryStatus::Failed("no such post".to_string())
        );
        assert!(q.post_untracked().is_none());
    }

    #[test]
    fn invalidate_bumps_epoch_without_touching_status() {
        let q = PostQuery::new();
        let t = q.begin_request();
        q.finish(t, Ok(post("p-1", "hello")));

        let before = q.epoch.get_untracked();
        q.invalidate();
        q.invalidate();
        assert_eq!(q.epoch.get_untracked(), before + 2);
        // Status stays Ready until the refetch effect starts a new request.
        assert!(matches!(q.status_untracked(), QueryStatus::Ready(_)));
    }
}
