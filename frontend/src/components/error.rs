use crate::api::ApiError;
use leptos::*;

fn field_errors(error: &ApiError) -> Vec<String> {
    if error.code != "VALIDATION_ERROR" {
        return Vec::new();
    }
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|err| err.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn shows_code(code: &str) -> bool {
    !code.is_empty() && code != "UNKNOWN" && code != "VALIDATION_ERROR"
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let fields = field_errors(&e);
                    if !fields.is_empty() {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {fields.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                            </ul>
                        }
                        .into_view()
                    } else if shows_code(&e.code) {
                        view! { <div class="text-xs opacity-75">{format!("Código: {}", e.code)}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                })}
            </div>
        </Show>
    }
}
