use crate::models::Post;
use crate::storage::load_token_from_storage;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    NotFound,
    Validation,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        let kind = match status.as_u16() {
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Http,
        };
        Self {
            kind,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:4000".to_string();

        // We support BOTH `window.ENV.API_URL` (documented style) and
        // `window.ENV.api_url` (legacy/implementation detail) for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

/// Client for the board service. Carries an optional bearer token; obtaining
/// the token (login) is the shell's job, we only replay it.
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        Self {
            base_url: get_api_url(),
            token: load_token_from_storage(),
        }
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);
        req = Self::with_auth_headers(req, self.token.clone());

        if let Some(b) = body {
            req = req.json(b);
        }

        req.send().await.map_err(ApiError::network)
    }

    async fn request_api<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    /// Like `request_api` but discards the response body; the board service
    /// answers some mutations with an empty 200.
    async fn request_unit(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<()> {
        let res = self.send(method, path, body).await?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn fetch_posts(&self) -> ApiResult<Vec<Post>> {
        self.request_api(reqwest::Method::GET, "/posts", None::<&()>)
            .await
    }

    pub async fn fetch_post(&self, post_id: &str) -> ApiResult<Post> {
        self.request_api(
            reqwest::Method::GET,
            &format!("/posts/{}", post_id),
            None::<&()>,
        )
        .await
    }

    pub async fn update_post(&self, post: &Post) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::PUT,
            &format!("/posts/{}", post.post_id),
            Some(post),
        )
        .await
    }

    pub async fn delete_post(&self, post_id: &str) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::DELETE,
            &format!("/posts/{}", post_id),
            None::<&()>,
        )
        .await
    }

    pub async fn update_nickname(&self, user_id: &str, name: &str) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::PATCH,
            &format!("/users/{}", user_id),
            Some(&serde_json::json!({ "name": name })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_client_new_has_no_token() {
        let client = ApiClient::new("http://localhost:4000".to_string());
        assert_eq!(client.base_url, "http://localhost:4000");
        assert!(client.token.is_none());
    }

    #[test]
    fn http_error_maps_404_to_not_found() {
        let e = ApiError::http(
            reqwest::StatusCode::NOT_FOUND,
            "no such post".to_string(),
            "Request failed",
        );
        assert_eq!(e.kind, ApiErrorKind::NotFound);
        assert!(e.to_string().contains("no such post"));
    }

    #[test]
    fn http_error_maps_422_to_validation() {
        let e = ApiError::http(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            "title required".to_string(),
            "Request failed",
        );
        assert_eq!(e.kind, ApiErrorKind::Validation);
    }

    #[test]
    fn http_error_maps_other_statuses_to_http() {
        let e = ApiError::http(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            String::new(),
            "Request failed",
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
    }
}
