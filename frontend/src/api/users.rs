use reqwest::Method;

use super::{
    client::{with_query, ApiClient},
    types::{ApiError, Role, User, UserPayload},
};

impl ApiClient {
    pub async fn list_users(
        &self,
        role: Option<Role>,
        tenant_id: Option<i64>,
    ) -> Result<Vec<User>, ApiError> {
        let path = with_query(
            "/users",
            &[
                ("role", role.map(|r| r.label().to_string())),
                ("tenant_id", tenant_id.map(|id| id.to_string())),
            ],
        );
        self.get_json(&path).await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError> {
        self.send_json(Method::POST, "/users", payload).await
    }

    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> Result<User, ApiError> {
        self.send_json(Method::PUT, &format!("/users/{}", id), payload)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/users/{}", id)).await
    }
}
