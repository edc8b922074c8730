//! Controller logic for one inline-edit session.
//!
//! The detail page owns `Viewing`/`Editing` as a signal; the decisions it
//! makes (who sees the controls, what the edit toggle does, what a
//! confirmed or declined delete does, and when a settled mutation may
//! invalidate the query) live here as pure functions so the semantics are
//! testable without a DOM.

use crate::api::ApiResult;
use crate::models::{Post, SessionUser};
use crate::tags::TagEditor;

/// Owner gate for the control bar: only the session matching the post's
/// `user_id` gets edit/delete controls. Callers re-evaluate this on every
/// render; the decision is never cached.
pub(crate) fn is_owner(session: Option<&SessionUser>, post: &Post) -> bool {
    session.map(|u| u.user_id == post.user_id).unwrap_or(false)
}

/// Transient copy of the editable Post fields. Exists only while edit mode
/// is active; discarded on save, never persisted locally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditDraft {
    pub title: String,
    pub body: String,
    pub tag_editor: TagEditor,
}

impl EditDraft {
    /// Entering edit mode: copy the canonical fields, clear the tag buffer.
    pub fn seeded_from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            tag_editor: TagEditor::seeded(post.tags.clone()),
        }
    }

    /// Leaving edit mode (toggle-as-save): the canonical post with
    /// `title`, `body`, `tags` overridden by the draft. Identity and
    /// server-owned fields pass through untouched.
    pub fn merged_into(&self, post: &Post) -> Post {
        Post {
            title: self.title.clone(),
            body: self.body.clone(),
            tags: self.tag_editor.tags.clone(),
            ..post.clone()
        }
    }
}

/// What activating the edit control does. One control covers both modes;
/// there is no cancel variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ToggleAction {
    /// Enter edit mode with this seeded draft.
    Enter(EditDraft),
    /// Leave edit mode and submit exactly this update.
    Save(Post),
}

pub(crate) fn decide_toggle(editing: bool, post: &Post, draft: &EditDraft) -> ToggleAction {
    if editing {
        ToggleAction::Save(draft.merged_into(post))
    } else {
        ToggleAction::Enter(EditDraft::seeded_from(post))
    }
}

/// Outcome of the delete confirmation prompt. The two fields are
/// dispatched independently: navigation is not sequenced after the
/// mutation's resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DeleteDecision {
    /// Issue the delete mutation for this post id.
    pub submit: Option<String>,
    /// Navigate here right away.
    pub navigate_to: Option<&'static str>,
}

pub(crate) fn decide_delete(confirmed: bool, post: &Post) -> DeleteDecision {
    if confirmed {
        DeleteDecision {
            submit: Some(post.post_id.clone()),
            navigate_to: Some("/"),
        }
    } else {
        DeleteDecision {
            submit: None,
            navigate_to: None,
        }
    }
}

/// The sole write path into the cached query: invalidate after a mutation
/// succeeds, never after a failure.
pub(crate) fn should_invalidate<T>(result: &ApiResult<T>) -> bool {
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::tags::TagKey;

    fn canonical() -> Post {
        Post {
            post_id: "p-1".to_string(),
            title: "old title".to_string(),
            body: "old body".to_string(),
            category: "general".to_string(),
            name: "jun".to_string(),
            date: "2023. 8. 14.".to_string(),
            user_id: "u-1".to_string(),
            tags: vec!["rust".to_string(), "board".to_string()],
        }
    }

    fn session(user_id: &str) -> SessionUser {
        SessionUser {
            user_id: user_id.to_string(),
            email: "u@example.com".to_string(),
            name: "u".to_string(),
        }
    }

    #[test]
    fn seeding_copies_canonical_fields_and_clears_buffer() {
        let post = canonical();
        let draft = EditDraft::seeded_from(&post);
        assert_eq!(draft.title, post.title);
        assert_eq!(draft.body, post.body);
        assert_eq!(draft.tag_editor.tags, post.tags);
        assert_eq!(draft.tag_editor.buffer, "");
    }

    #[test]
    fn merge_overlays_only_the_editable_fields() {
        let post = canonical();
        let mut draft = EditDraft::seeded_from(&post);
        draft.title = "new title".to_string();
        draft.body = "new body".to_string();
        draft.tag_editor.set_buffer("extra tag");
        draft.tag_editor.handle_key(TagKey::Enter);

        let updated = draft.merged_into(&post);
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.body, "new body");
        assert_eq!(updated.tags, vec!["rust", "board", "extratag"]);

        // Identity and server-owned fields are preserved.
        assert_eq!(updated.post_id, post.post_id);
        assert_eq!(updated.user_id, post.user_id);
        assert_eq!(updated.category, post.category);
        assert_eq!(updated.name, post.name);
        assert_eq!(updated.date, post.date);
    }

    #[test]
    fn untouched_draft_merges_back_to_the_canonical_post() {
        let post = canonical();
        let draft = EditDraft::seeded_from(&post);
        assert_eq!(draft.merged_into(&post), post);
    }

    #[test]
    fn only_the_matching_session_passes_the_owner_gate() {
        let post = canonical();
        assert!(is_owner(Some(&session("u-1")), &post));
        assert!(!is_owner(Some(&session("u-2")), &post));
        assert!(!is_owner(None, &post));
    }

    #[test]
    fn owner_gate_ignores_edit_session_state() {
        // The gate has no edit-state input at all: a non-owner is refused
        // identically whether a draft exists or not.
        let post = canonical();
        let stranger = session("u-2");
        let _mid_edit = EditDraft::seeded_from(&post);
        assert!(!is_owner(Some(&stranger), &post));
    }

    #[test]
    fn toggle_in_read_mode_enters_with_a_seeded_draft() {
        let post = canonical();
        let action = decide_toggle(false, &post, &EditDraft::default());
        assert_eq!(action, ToggleAction::Enter(EditDraft::seeded_from(&post)));
    }

    #[test]
    fn toggle_in_edit_mode_submits_exactly_the_merged_update() {
        let post = canonical();
        let mut draft = EditDraft::seeded_from(&post);
        draft.title = "new title".to_string();

        let action = decide_toggle(true, &post, &draft);
        let ToggleAction::Save(updated) = action else {
            panic!("toggling out of edit mode must save");
        };
        assert_eq!(updated, draft.merged_into(&post));
    }

    #[test]
    fn declined_delete_issues_nothing_and_stays_put() {
        let post = canonical();
        let decision = decide_delete(false, &post);
        assert_eq!(decision.submit, None);
        assert_eq!(decision.navigate_to, None);
    }

    #[test]
    fn confirmed_delete_submits_and_navigates_home_independently() {
        let post = canonical();
        let decision = decide_delete(true, &post);
        assert_eq!(decision.submit.as_deref(), Some("p-1"));
        // Navigation is decided up front; the mutation's eventual result
        // is not an input to it.
        assert_eq!(decision.navigate_to, Some("/"));
    }

    #[test]
    fn invalidation_follows_success_only() {
        assert!(should_invalidate::<()>(&Ok(())));
        assert!(!should_invalidate::<()>(&Err(ApiError {
            kind: ApiErrorKind::Network,
            message: "connection reset".to_string(),
        })));
    }
}
