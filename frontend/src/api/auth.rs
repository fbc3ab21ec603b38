use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, AuthResponse, LoginRequest, User},
};

impl ApiClient {
    /// Exchanges credentials for a token. Does not touch the session store.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let builder = self
            .public_request(Method::POST, "/auth/login")
            .await
            .json(request);
        let response = self.send(builder).await?;
        Self::parse_json(response).await
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }

    /// Fetches the profile behind `token` without reading or changing the
    /// active session.
    pub async fn get_me_with_token(&self, token: &str) -> Result<User, ApiError> {
        let builder = self
            .request_with_token(Method::GET, "/auth/me", token)
            .await?;
        let response = self.send(builder).await?;
        Self::parse_json(response).await
    }

    /// Requests a token scoped to the administrator of `tenant_id`. Does not
    /// touch the session store.
    pub async fn impersonate(&self, tenant_id: i64) -> Result<AuthResponse, ApiError> {
        let path = format!("/auth/impersonate/{}", tenant_id);
        let builder = self.authorized_request(Method::POST, &path).await?;
        let response = self.send(builder).await?;
        Self::parse_json(response).await
    }
}
