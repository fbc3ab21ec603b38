use crate::{
    api::Role,
    components::layout::LoadingSpinner,
    state::auth::{use_auth, AuthState},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Loading,
    Blank,
    Redirect(&'static str),
    Render,
}

pub fn gate_decision(state: &AuthState, expected: Role) -> GateDecision {
    if state.loading {
        return GateDecision::Loading;
    }
    match state.user.as_ref() {
        None => GateDecision::Blank,
        Some(user) if user.role != expected => GateDecision::Redirect(user.role.dashboard_path()),
        Some(_) => GateDecision::Render,
    }
}

fn redirect_to(path: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(path);
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading || state.is_authenticated {
            return;
        }
        redirect_to("/login");
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Renders `children` only for users holding `role`; everyone else is sent
/// to their own dashboard.
#[component]
pub fn RequireRole(role: Role, children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let decision = create_memo(move |_| gate_decision(&auth.get(), role));
    create_effect(move |_| {
        if let GateDecision::Redirect(path) = decision.get() {
            log::debug!("{} page requested by another role; redirecting to {}", role.label(), path);
            redirect_to(path);
        }
    });
    view! {
        <Show
            when=move || decision.get() == GateDecision::Render
            fallback=move || {
                if decision.get() == GateDecision::Loading {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Landing route: signed-in users go to their dashboard, others to login.
#[component]
pub fn HomeRedirect() -> impl IntoView {
    let (auth, _) = use_auth();
    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        redirect_to(home_target(&state));
    });
    view! { <LoadingSpinner /> }
}

pub fn home_target(state: &AuthState) -> &'static str {
    match state.user.as_ref() {
        Some(user) if state.is_authenticated => user.role.dashboard_path(),
        _ => "/login",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, patient_user, specialist_user};

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }

    #[test]
    fn specialist_on_admin_page_is_sent_to_specialist_dashboard() {
        let state = AuthState::signed_in(specialist_user(), false);
        assert_eq!(
            gate_decision(&state, Role::Administrador),
            GateDecision::Redirect("/dashboard/specialist")
        );
    }

    #[test]
    fn matching_role_renders() {
        let state = AuthState::signed_in(admin_user(7), true);
        assert_eq!(gate_decision(&state, Role::Administrador), GateDecision::Render);
    }

    #[test]
    fn loading_wins_over_everything() {
        let state = AuthState {
            loading: true,
            ..AuthState::signed_in(patient_user(), false)
        };
        assert_eq!(gate_decision(&state, Role::SuperAdmin), GateDecision::Loading);
    }

    #[test]
    fn missing_user_renders_nothing() {
        assert_eq!(
            gate_decision(&AuthState::signed_out(false), Role::Paciente),
            GateDecision::Blank
        );
    }

    #[test]
    fn home_target_follows_role() {
        assert_eq!(home_target(&AuthState::signed_out(false)), "/login");
        assert_eq!(
            home_target(&AuthState::signed_in(patient_user(), false)),
            "/dashboard/patient"
        );
    }
}
