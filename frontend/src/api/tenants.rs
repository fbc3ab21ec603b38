use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, Tenant, TenantPayload},
};

impl ApiClient {
    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, ApiError> {
        self.get_json("/tenants").await
    }

    pub async fn get_tenant(&self, id: i64) -> Result<Tenant, ApiError> {
        self.get_json(&format!("/tenants/{}", id)).await
    }

    pub async fn create_tenant(&self, payload: &TenantPayload) -> Result<Tenant, ApiError> {
        self.send_json(Method::POST, "/tenants", payload).await
    }

    pub async fn update_tenant(&self, id: i64, payload: &TenantPayload) -> Result<Tenant, ApiError> {
        self.send_json(Method::PUT, &format!("/tenants/{}", id), payload)
            .await
    }

    pub async fn delete_tenant(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/tenants/{}", id)).await
    }
}
