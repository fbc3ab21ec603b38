use crate::{
    api::User,
    components::layout::{ErrorMessage, LoadingSpinner},
    pages::dashboard::{
        components::{AppointmentList, RoleBreakdown, StatCard},
        repository,
    },
    state::auth::use_auth_service,
};
use leptos::*;

#[component]
pub fn AdminPanel(user: User) -> impl IntoView {
    let api = use_auth_service().api().clone();
    let summary = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            let user = user.clone();
            async move { repository::fetch_admin_summary(&api, &user).await }
        },
    );

    view! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"Panel del centro médico"</h2>
            {move || match summary.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(data)) => view! {
                    <div class="grid grid-cols-2 gap-4 sm:grid-cols-5">
                        <StatCard label="Total de citas" value=data.appointments.total() />
                        <StatCard label="Pendientes" value=data.appointments.pending />
                        <StatCard label="Confirmadas" value=data.appointments.confirmed />
                        <StatCard label="Completadas" value=data.appointments.completed />
                        <StatCard label="Canceladas" value=data.appointments.cancelled />
                    </div>
                    <div class="bg-surface-elevated shadow rounded-lg p-4">
                        <h3 class="font-semibold mb-2">"Personal por rol"</h3>
                        <RoleBreakdown counts=data.staff_by_role />
                    </div>
                    <div class="bg-surface-elevated shadow rounded-lg p-4">
                        <h3 class="font-semibold mb-2">"Citas de hoy"</h3>
                        <AppointmentList appointments=data.today empty_text="No hay citas para hoy." />
                    </div>
                }
                .into_view(),
            }}
        </section>
    }
}
