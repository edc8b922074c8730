use serde::{Deserialize, Serialize};

/// A board entry as the backend stores it.
///
/// Wire keys follow the board service (`postid`, `userid`, lowercase single
/// words). `date` is display-formatted server-side and never recomputed here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Post {
    #[serde(rename = "postid")]
    pub post_id: String,

    pub title: String,
    pub body: String,
    pub category: String,

    /// Author display name.
    pub name: String,

    pub date: String,

    /// Owner identity; gates edit/delete controls.
    #[serde(rename = "userid")]
    pub user_id: String,

    /// Ordered, duplicates allowed, may be empty.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Identity of the signed-in user, written to localStorage by the outer
/// shell. Read-only for this crate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionUser {
    #[serde(rename = "userid")]
    pub user_id: String,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_deserializes_from_service_wire_shape() {
        let json = r#"{
            "postid": "p-1",
            "title": "hello",
            "body": "first post",
            "category": "general",
            "name": "jun",
            "date": "2023. 8. 14.",
            "userid": "u-1",
            "tags": ["rust", "board"]
        }"#;
        let post: Post = serde_json::from_str(json).expect("post should parse");
        assert_eq!(post.post_id, "p-1");
        assert_eq!(post.user_id, "u-1");
        assert_eq!(post.tags, vec!["rust", "board"]);
    }

    #[test]
    fn post_tags_default_to_empty_when_missing() {
        let json = r#"{
            "postid": "p-2",
            "title": "t",
            "body": "b",
            "category": "c",
            "name": "n",
            "date": "d",
            "userid": "u-2"
        }"#;
        let post: Post = serde_json::from_str(json).expect("post should parse");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn post_serializes_with_wire_keys() {
        let post = Post {
            post_id: "p-3".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            category: "c".to_string(),
            name: "n".to_string(),
            date: "d".to_string(),
            user_id: "u-3".to_string(),
            tags: vec![],
        };
        let v = serde_json::to_value(post).expect("should serialize");
        assert_eq!(v["postid"], "p-3");
        assert_eq!(v["userid"], "u-3");
        assert!(v.get("post_id").is_none());
    }

    #[test]
    fn session_user_roundtrip() {
        let json = r#"{"userid": "u-9", "email": "u@example.com", "name": "nine"}"#;
        let user: SessionUser = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.user_id, "u-9");
        assert_eq!(user.name, "nine");
    }
}
