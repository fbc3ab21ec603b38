use crate::{
    api::{ApiClient, ApiError, AuthResponse, LoginRequest, User},
    state::session::{ImpersonationState, SessionStore},
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_impersonating: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(user: User, is_impersonating: bool) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            is_impersonating,
            loading: false,
        }
    }

    pub fn signed_out(is_impersonating: bool) -> Self {
        Self {
            is_impersonating,
            ..Self::default()
        }
    }
}

/// Every session mutation goes through here: login, logout, impersonate and
/// restore (the latter two live in `state::impersonation`).
#[derive(Clone)]
pub struct AuthService {
    pub(crate) api: ApiClient,
    pub(crate) session: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        let session = api.session().clone();
        Self { api, session }
    }

    pub fn browser() -> Self {
        Self::new(ApiClient::new(SessionStore::browser()))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn is_impersonating(&self) -> bool {
        self.session.impersonation_state() == ImpersonationState::Impersonating
    }

    pub fn snapshot(&self) -> AuthState {
        let is_impersonating = self.is_impersonating();
        if !self.session.is_authenticated() {
            return AuthState::signed_out(is_impersonating);
        }
        match self.session.current_user() {
            Some(user) => AuthState::signed_in(user, is_impersonating),
            None => AuthState::signed_out(is_impersonating),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self.api.login(request).await?;
        // A fresh sign-in supersedes any identity parked by an earlier impersonation.
        if self.session.original_session().is_some() || self.session.has_stale_original() {
            log::info!("discarding original session left by a previous sign-in");
            self.session.clear_original()?;
        }
        self.session.save_session(&response)?;
        log::info!(
            "signed in as {} ({})",
            response.user.username,
            response.user.role.label()
        );
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.logout()?;
        log::info!("signed out");
        Ok(())
    }

    /// Loads the signed-in user. A stored profile is trusted as-is; a token
    /// whose profile is missing or unreadable is re-validated with the backend.
    pub async fn resume(&self) -> Result<User, ApiError> {
        if self.session.get_token().is_none() {
            return Err(ApiError::unauthorized("No active session"));
        }
        if let Some(user) = self.session.current_user() {
            return Ok(user);
        }
        let user = self.api.get_me().await?;
        self.session.set_current_user(&user)?;
        Ok(user)
    }
}

fn create_auth_context(service: AuthService) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        loading: true,
        ..AuthState::default()
    });

    spawn_local(async move {
        let is_impersonating = service.is_impersonating();
        match service.resume().await {
            Ok(user) => set_auth_state.set(AuthState::signed_in(user, is_impersonating)),
            Err(err) => {
                log::debug!("no session to resume: {}", err);
                set_auth_state.set(AuthState::signed_out(service.is_impersonating()));
            }
        }
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let service = use_context::<AuthService>().unwrap_or_else(AuthService::browser);
    provide_context(service.clone());
    provide_context(service.api().clone());
    let ctx = create_auth_context(service);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_auth_service() -> AuthService {
    use_context::<AuthService>().unwrap_or_else(AuthService::browser)
}

pub async fn login_request(
    request: LoginRequest,
    service: &AuthService,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<User, ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match service.login(&request).await {
        Ok(response) => {
            set_auth_state.set(AuthState::signed_in(
                response.user.clone(),
                service.is_impersonating(),
            ));
            Ok(response.user)
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub fn logout(service: &AuthService, set_auth_state: WriteSignal<AuthState>) -> Result<(), ApiError> {
    let result = service.logout();
    set_auth_state.set(AuthState::signed_out(service.is_impersonating()));
    result
}

pub fn use_login_action() -> Action<LoginRequest, Result<User, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let service = use_auth_service();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let service = service.clone();
        async move { login_request(payload, &service, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let service = use_auth_service();

    create_action(move |_: &()| {
        let service = service.clone();
        async move { logout(&service, set_auth) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, super_admin_user};
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    fn service() -> AuthService {
        AuthService::new(ApiClient::new_with_base_url(
            "http://unused.invalid",
            SessionStore::in_memory(),
        ))
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[test]
    fn snapshot_reflects_stored_session() {
        let service = service();
        assert_eq!(service.snapshot(), AuthState::signed_out(false));

        service
            .session()
            .save_session(&AuthResponse {
                token: "A".into(),
                user: super_admin_user(),
            })
            .unwrap();
        assert_eq!(
            service.snapshot(),
            AuthState::signed_in(super_admin_user(), false)
        );
    }

    #[test]
    fn logout_resets_state_and_reports_pending_restore() {
        with_runtime(|| {
            let service = service();
            let session = service.session();
            session.save_original("A", Some(&super_admin_user())).unwrap();
            session.mark_impersonating().unwrap();
            session
                .save_session(&AuthResponse {
                    token: "B".into(),
                    user: admin_user(7),
                })
                .unwrap();

            let (state, set_state) = create_signal(service.snapshot());
            assert!(state.get_untracked().is_impersonating);

            logout(&service, set_state).unwrap();
            let snapshot = state.get_untracked();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.is_impersonating);
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{specialist_user, user_json};
    use crate::utils::storage::{KeyValueStore, MemoryStore};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::rc::Rc;

    fn service(server: &MockServer) -> AuthService {
        AuthService::new(ApiClient::new_with_base_url(
            server.url("/api"),
            SessionStore::in_memory(),
        ))
    }

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(200).json_body(json!({
                    "token": "T1",
                    "user": user_json(3, "Especialista", Some(7))
                }));
            })
            .await;

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let service = service(&server);

        let user = login_request(
            LoginRequest {
                email: "user3@uppamed.com".into(),
                password: "secret".into(),
            },
            &service,
            set_state,
        )
        .await
        .unwrap();

        assert_eq!(user, specialist_user());
        assert_eq!(service.session().get_token().as_deref(), Some("T1"));
        let snapshot = state.get_untracked();
        assert!(snapshot.is_authenticated);
        assert!(!snapshot.loading);

        logout(&service, set_state).unwrap();
        let snapshot = state.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        assert!(service.session().get_token().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(401).json_body(json!({"message": "Credenciales inválidas"}));
            })
            .await;

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let service = service(&server);
        service.session().set_token("OLD").unwrap();

        let err = login_request(
            LoginRequest {
                email: "x@y.z".into(),
                password: "bad".into(),
            },
            &service,
            set_state,
        )
        .await
        .unwrap_err();

        assert_eq!(err.error, "Credenciales inválidas");
        assert_eq!(service.session().get_token().as_deref(), Some("OLD"));
        assert!(!state.get_untracked().loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn resume_refetches_profile_when_stored_user_is_malformed() {
        let server = MockServer::start_async().await;
        let me = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/auth/me")
                    .header("Authorization", "Bearer T1");
                then.status(200)
                    .json_body(user_json(3, "Especialista", Some(7)));
            })
            .await;

        let local = MemoryStore::new();
        local.set("user", "{broken").unwrap();
        let session = SessionStore::new(Rc::new(MemoryStore::new()), Rc::new(local));
        let service = AuthService::new(ApiClient::new_with_base_url(server.url("/api"), session));
        service.session().set_token("T1").unwrap();
        let user = service.resume().await.unwrap();
        me.assert_async().await;
        assert_eq!(user, specialist_user());
        assert_eq!(service.session().current_user(), Some(specialist_user()));

        // Second call trusts the stored profile.
        service.resume().await.unwrap();
        me.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn resume_without_token_is_unauthorized() {
        let server = MockServer::start_async().await;
        let err = service(&server).resume().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    async fn mock_login(server: &MockServer, email: &str, token: &str, user: serde_json::Value) {
        let body = json!({"token": token, "user": user});
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/login")
                    .json_body_partial(json!({"email": email}).to_string());
                then.status(200).json_body(body);
            })
            .await;
    }

    async fn mock_impersonation(server: &MockServer, tenant_id: i64, bearer: &str, token: &str) {
        let path = format!("/api/auth/impersonate/{}", tenant_id);
        let auth = format!("Bearer {}", bearer);
        let body = json!({"token": token, "user": user_json(2, "Administrador", Some(tenant_id))});
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(path.as_str())
                    .header("Authorization", auth.as_str());
                then.status(200).json_body(body);
            })
            .await;
    }

    fn credentials(email: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: "secret".into(),
        }
    }

    /// Super admin signs in with token A, impersonates tenant 7 and logs out.
    async fn logged_out_while_impersonating(server: &MockServer) -> AuthService {
        mock_login(server, "user1@uppamed.com", "A", user_json(1, "Super Admin", None)).await;
        mock_impersonation(server, 7, "A", "B").await;
        let service = service(server);
        service.login(&credentials("user1@uppamed.com")).await.unwrap();
        service.impersonate(7).await.unwrap();
        service.logout().unwrap();
        assert!(service.is_impersonating());
        service
    }

    #[tokio::test]
    async fn next_sign_in_cannot_restore_a_previous_super_admin() {
        let server = MockServer::start_async().await;
        let service = logged_out_while_impersonating(&server).await;
        mock_login(&server, "user4@uppamed.com", "P", user_json(4, "Paciente", Some(7))).await;

        service.login(&credentials("user4@uppamed.com")).await.unwrap();
        assert!(!service.is_impersonating());
        assert!(service.session().original_session().is_none());
        assert!(!service.snapshot().is_impersonating);

        let err = service.restore().await.unwrap_err();
        assert_eq!(err.code, "NO_ORIGINAL_SESSION");
        assert_eq!(service.session().get_token().as_deref(), Some("P"));
    }

    #[tokio::test]
    async fn super_admin_signing_back_in_can_impersonate_again() {
        let server = MockServer::start_async().await;
        let service = logged_out_while_impersonating(&server).await;
        mock_login(&server, "admin@uppamed.com", "C", user_json(1, "Super Admin", None)).await;
        mock_impersonation(&server, 8, "C", "D").await;

        service.login(&credentials("admin@uppamed.com")).await.unwrap();
        service.impersonate(8).await.unwrap();

        assert_eq!(service.session().get_token().as_deref(), Some("D"));
        let original = service.session().original_session().unwrap();
        assert_eq!(original.token, "C");
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_the_pending_restore() {
        let server = MockServer::start_async().await;
        let service = logged_out_while_impersonating(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/login")
                    .json_body_partial(json!({"email": "x@y.z"}).to_string());
                then.status(401)
                    .json_body(json!({"message": "Credenciales inválidas"}));
            })
            .await;

        service.login(&credentials("x@y.z")).await.unwrap_err();
        assert!(service.is_impersonating());
        service.restore().await.unwrap();
        assert_eq!(service.session().get_token().as_deref(), Some("A"));
    }
}
