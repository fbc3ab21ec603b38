use crate::{
    components::toast::{use_toasts, ToastHost},
    state::{
        auth::{self, use_auth, AuthState},
        impersonation::use_restore_action,
    },
};
use leptos::*;

fn go_to(path: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(path);
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let dashboard_href = move || {
        auth.get()
            .user
            .map(|user| user.role.dashboard_path())
            .unwrap_or("/login")
    };
    let user_label = move || user_label(&auth.get());
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    let toasts = use_toasts();
    {
        create_effect(move |_| match logout_action.value().get() {
            Some(Ok(())) => go_to("/login"),
            Some(Err(err)) => toasts.error(err.error),
            None => {}
        });
    }
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href=dashboard_href class="text-xl font-semibold text-fg">
                        "UppaMed"
                    </a>
                    <nav class="flex items-center space-x-4">
                        <span class="text-sm text-fg-muted">{user_label}</span>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                            disabled={move || logout_pending.get()}
                        >
                            "Cerrar sesión"
                        </button>
                    </nav>
                </div>
            </div>
        </header>
    }
}

fn user_label(state: &AuthState) -> String {
    match state.user.as_ref() {
        Some(user) => format!("{} · {}", user.username, user.role.label()),
        None => String::new(),
    }
}

/// Shown while a super admin is acting as a tenant administrator.
#[component]
pub fn ImpersonationBanner() -> impl IntoView {
    let (auth, _) = use_auth();
    let restore_action = use_restore_action();
    let restoring = restore_action.pending();
    let toasts = use_toasts();

    create_effect(move |_| match restore_action.value().get() {
        Some(Ok(user)) => go_to(user.role.dashboard_path()),
        Some(Err(err)) => {
            log::error!("restore failed: {}", err);
            toasts.error(err.error);
        }
        None => {}
    });

    let on_restore = move |_| {
        if restoring.get_untracked() {
            return;
        }
        restore_action.dispatch(());
    };

    view! {
        <Show when=move || auth.get().is_impersonating>
            <div class="mb-4 bg-status-warning-bg border border-status-warning-border text-status-warning-text px-4 py-3 rounded">
                <div class="flex flex-col gap-3 lg:flex-row lg:items-center lg:justify-between">
                    <p class="font-semibold">
                        {move || impersonation_message(&auth.get())}
                    </p>
                    <button
                        class="inline-flex items-center justify-center px-4 py-2 border border-status-warning-border text-sm font-medium rounded disabled:opacity-60"
                        on:click=on_restore
                        disabled=move || restoring.get()
                    >
                        {move || if restoring.get() { "Restaurando..." } else { "Volver a Super Admin" }}
                    </button>
                </div>
            </div>
        </Show>
    }
}

fn impersonation_message(state: &AuthState) -> String {
    match state.user.as_ref() {
        Some(user) => format!("Estás actuando como {} ({}).", user.username, user.role.label()),
        None => "Sesión de suplantación pendiente de restaurar.".to_string(),
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                <ImpersonationBanner/>
                {children()}
            </main>
            <ToastHost/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}
