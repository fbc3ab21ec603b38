use crate::{
    api::User,
    components::layout::{ErrorMessage, LoadingSpinner},
    pages::dashboard::{
        components::{AppointmentList, StatCard},
        repository,
    },
    state::auth::use_auth_service,
};
use leptos::*;

#[component]
pub fn PatientPanel(user: User) -> impl IntoView {
    let api = use_auth_service().api().clone();
    let summary = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            let user = user.clone();
            async move { repository::fetch_patient_summary(&api, &user).await }
        },
    );

    view! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"Mi salud"</h2>
            {move || match summary.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(data)) => {
                    let upcoming_count = data.upcoming.len();
                    view! {
                        <div class="grid grid-cols-2 gap-4 sm:grid-cols-3">
                            <StatCard label="Próximas citas" value=upcoming_count />
                            <StatCard label="Recetas" value=data.prescriptions />
                            <StatCard label="Exámenes" value=data.exams />
                        </div>
                        <div class="bg-surface-elevated shadow rounded-lg p-4">
                            <h3 class="font-semibold mb-2">"Próximas citas"</h3>
                            <AppointmentList
                                appointments=data.upcoming
                                empty_text="No tienes citas programadas."
                            />
                        </div>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}
