use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{api::types::ApiError, config, state::session::SessionStore};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn bearer_headers(token: &str) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unauthorized("Invalid token format"))?,
        );
        Ok(headers)
    }

    fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self
            .session
            .get_token()
            .ok_or_else(|| ApiError::unauthorized("No token"))?;
        Self::bearer_headers(&token)
    }

    pub(crate) async fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.resolved_base_url().await, path);
        log::debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
    }

    pub(crate) async fn authorized_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let headers = self.get_auth_headers()?;
        Ok(self.public_request(method, path).await.headers(headers))
    }

    pub(crate) async fn request_with_token(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let headers = Self::bearer_headers(token)?;
        Ok(self.public_request(method, path).await.headers(headers))
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        builder
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    /// Sends an authenticated request; a 401 drops the active session.
    pub(crate) async fn send_authorized(
        &self,
        builder: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = self.send(builder).await?;
        self.handle_unauthorized_status(response.status());
        Ok(response)
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            if let Err(err) = self.session.logout() {
                log::warn!("failed to clear session after 401: {}", err);
            }
            Self::redirect_to_login_if_needed();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn redirect_to_login_if_needed() {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/login" {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn redirect_to_login_if_needed() {}

    pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    pub(crate) async fn expect_success(response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ApiError::from_response(status, &body)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.authorized_request(Method::GET, path).await?;
        let response = self.send_authorized(builder).await?;
        Self::parse_json(response).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.authorized_request(method, path).await?.json(body);
        let response = self.send_authorized(builder).await?;
        Self::parse_json(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.authorized_request(Method::DELETE, path).await?;
        let response = self.send_authorized(builder).await?;
        Self::expect_success(response).await
    }
}

pub(crate) fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|v| {
                format!(
                    "{}={}",
                    key,
                    percent_encoding::utf8_percent_encode(v, percent_encoding::NON_ALPHANUMERIC)
                )
            })
        })
        .collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::with_query;

    #[test]
    fn with_query_skips_absent_params() {
        assert_eq!(with_query("/users", &[("role", None)]), "/users");
        assert_eq!(
            with_query(
                "/users",
                &[("role", Some("Super Admin".into())), ("tenant_id", Some("7".into()))]
            ),
            "/users?role=Super%20Admin&tenant_id=7"
        );
    }
}
