//! Super admin acting as a tenant administrator.
//!
//! `Normal -> Impersonating` swaps the active slot for a tenant-admin token
//! and parks the super admin's identity in the original slot.
//! `Impersonating -> Normal` promotes the original slot back. Impersonating a
//! second tenant requires a restore first.

use leptos::*;

use crate::{
    api::{ApiError, AuthResponse, User},
    state::{
        auth::{use_auth, use_auth_service, AuthService, AuthState},
        session::ImpersonationState,
    },
};

impl AuthService {
    pub async fn impersonate(&self, tenant_id: i64) -> Result<AuthResponse, ApiError> {
        let token = self
            .session
            .get_token()
            .ok_or_else(|| ApiError::unauthorized("No active session"))?;
        if self.session.impersonation_state() == ImpersonationState::Impersonating {
            return Err(ApiError::already_impersonating());
        }

        let response = self.api.impersonate(tenant_id).await?;

        if self.session.has_stale_original() {
            log::warn!("discarding stale original session before impersonating");
            self.session.clear_original()?;
        }
        let current_user = self.session.current_user();
        self.session.save_original(&token, current_user.as_ref())?;
        self.session.save_session(&response)?;
        self.session.mark_impersonating()?;

        log::info!(
            "impersonating tenant {} as {}",
            tenant_id,
            response.user.username
        );
        Ok(response)
    }

    pub async fn restore(&self) -> Result<User, ApiError> {
        if self.session.impersonation_state() != ImpersonationState::Impersonating {
            return Err(ApiError::no_original_session());
        }
        let original = self
            .session
            .original_session()
            .ok_or_else(ApiError::no_original_session)?;

        let user = match original.user.into_user() {
            Some(user) => user,
            None => {
                log::warn!("original user unreadable; fetching profile for restored token");
                self.api.get_me_with_token(&original.token).await?
            }
        };

        self.session.set_token(&original.token)?;
        self.session.set_current_user(&user)?;
        self.session.clear_original()?;

        log::info!("restored original session for {}", user.username);
        Ok(user)
    }
}

pub async fn impersonate_request(
    tenant_id: i64,
    service: &AuthService,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<User, ApiError> {
    let response = service.impersonate(tenant_id).await?;
    set_auth_state.set(AuthState::signed_in(response.user.clone(), true));
    Ok(response.user)
}

pub async fn restore_request(
    service: &AuthService,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<User, ApiError> {
    let user = service.restore().await?;
    set_auth_state.set(AuthState::signed_in(user.clone(), false));
    Ok(user)
}

pub fn use_impersonate_action() -> Action<i64, Result<User, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let service = use_auth_service();

    create_action(move |tenant_id: &i64| {
        let tenant_id = *tenant_id;
        let service = service.clone();
        async move { impersonate_request(tenant_id, &service, set_auth).await }
    })
}

pub fn use_restore_action() -> Action<(), Result<User, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let service = use_auth_service();

    create_action(move |_: &()| {
        let service = service.clone();
        async move { restore_request(&service, set_auth).await }
    })
}
