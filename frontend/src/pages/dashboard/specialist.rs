use crate::{
    api::User,
    components::layout::{ErrorMessage, LoadingSpinner},
    pages::dashboard::{
        components::{AppointmentList, StatCard},
        repository,
    },
    state::auth::use_auth_service,
    utils::{
        schedule::{available_slots, WorkingHours},
        time::today_local,
    },
};
use chrono::NaiveDateTime;
use leptos::*;

const SLOT_MINUTES: u32 = 30;

fn slot_labels(slots: &[NaiveDateTime]) -> Vec<String> {
    slots.iter().map(|slot| slot.format("%H:%M").to_string()).collect()
}

#[component]
pub fn SpecialistPanel(user: User) -> impl IntoView {
    let api = use_auth_service().api().clone();
    let specialist_id = user.id;
    let summary = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            let user = user.clone();
            async move { repository::fetch_specialist_summary(&api, &user).await }
        },
    );

    view! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"Mi agenda"</h2>
            {move || match summary.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(data)) => {
                    let free = available_slots(
                        &data.today,
                        specialist_id,
                        today_local(),
                        WorkingHours::default(),
                        SLOT_MINUTES,
                    );
                    let today_count = data.today.len();
                    view! {
                        <div class="grid grid-cols-2 gap-4 sm:grid-cols-3">
                            <StatCard label="Citas de hoy" value=today_count />
                            <StatCard label="Pendientes" value=data.appointments.pending />
                            <StatCard label="Horarios libres" value=free.len() />
                        </div>
                        <div class="bg-surface-elevated shadow rounded-lg p-4">
                            <h3 class="font-semibold mb-2">"Citas de hoy"</h3>
                            <AppointmentList appointments=data.today empty_text="No hay citas para hoy." />
                        </div>
                        <div class="bg-surface-elevated shadow rounded-lg p-4">
                            <h3 class="font-semibold mb-2">"Horarios disponibles"</h3>
                            <p class="text-sm text-fg-muted">{slot_labels(&free).join(", ")}</p>
                        </div>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn slot_labels_use_hours_and_minutes() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let slots = vec![
            day.and_hms_opt(8, 0, 0).unwrap(),
            day.and_hms_opt(14, 30, 0).unwrap(),
        ];
        assert_eq!(slot_labels(&slots), vec!["08:00", "14:30"]);
    }
}
