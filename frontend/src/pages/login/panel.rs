use crate::{
    api::ApiError,
    components::{
        layout::ImpersonationBanner,
        toast::{use_toasts, ToastHost},
    },
    pages::login::{components::form::LoginForm, utils},
    state::auth,
};
use leptos::{ev::SubmitEvent, Callback, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();
    let toasts = use_toasts();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => {
                    error.set(None);
                    set_password.set(String::new());
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(user.role.dashboard_path());
                    }
                }
                Err(err) => {
                    log::warn!("login failed: {}", err);
                    toasts.error(err.error.clone());
                    error.set(Some(err));
                }
            }
        }
    });

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        match utils::validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(request) => {
                error.set(None);
                login_action.dispatch(request);
            }
            Err(err) => error.set(Some(err)),
        }
    });

    let email_input = Callback::new(move |value: String| set_email.set(value));
    let password_input = Callback::new(move |value: String| set_password.set(value));

    view! {
        <div class="max-w-md mx-auto pt-6 px-4">
            <ImpersonationBanner />
        </div>
        <LoginForm
            email=email.into()
            password=password.into()
            error=error.into()
            pending=pending.into()
            on_email_input=email_input
            on_password_input=password_input
            on_submit=handle_submit
        />
        <ToastHost />
    }
}
