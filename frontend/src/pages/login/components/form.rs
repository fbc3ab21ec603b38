use crate::{api::ApiError, components::error::InlineErrorMessage};
use leptos::{ev::SubmitEvent, Callback, *};
use web_sys::HtmlInputElement;

#[component]
pub fn LoginForm(
    email: Signal<String>,
    password: Signal<String>,
    error: Signal<Option<ApiError>>,
    pending: Signal<bool>,
    on_email_input: Callback<String>,
    on_password_input: Callback<String>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                        "Iniciar sesión en UppaMed"
                    </h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Gestión de centros médicos"
                    </p>
                </div>
                <form class="mt-8 space-y-6" on:submit=move |ev| on_submit.call(ev)>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="email" class="sr-only">"Correo electrónico"</label>
                            <input
                                id="email"
                                name="email"
                                type="email"
                                autocomplete="username"
                                required
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-t-md focus:outline-none focus:z-10 sm:text-sm"
                                placeholder="Correo electrónico"
                                prop:value=move || email.get()
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    on_email_input.call(target.value());
                                }
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"Contraseña"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                required
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-b-md focus:outline-none focus:z-10 sm:text-sm"
                                placeholder="Contraseña"
                                prop:value=move || password.get()
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    on_password_input.call(target.value());
                                }
                            />
                        </div>
                    </div>

                    <InlineErrorMessage error=error />

                    <div>
                        <button
                            type="submit"
                            disabled=move || pending.get()
                            class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                        >
                            {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn form_shows_validation_errors_and_pending_label() {
        let html = render_to_string(|| {
            let mut err = ApiError::validation("Completa los campos obligatorios");
            err.details = Some(serde_json::json!({"errors": ["El correo es obligatorio"]}));
            let noop = Callback::new(|_: String| {});
            view! {
                <LoginForm
                    email=Signal::derive(String::new)
                    password=Signal::derive(String::new)
                    error=Signal::derive(move || Some(err.clone()))
                    pending=Signal::derive(|| true)
                    on_email_input=noop
                    on_password_input=noop
                    on_submit=Callback::new(|_: SubmitEvent| {})
                />
            }
        });
        assert!(html.contains("El correo es obligatorio"));
        assert!(html.contains("Ingresando..."));
    }
}
