use crate::{
    api::{Appointment, Role},
    utils::time::format_date_time,
};
use leptos::*;

#[component]
pub fn StatCard(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <p class="text-sm text-fg-muted">{label}</p>
            <p class="text-2xl font-semibold text-fg">{value}</p>
        </div>
    }
}

#[component]
pub fn RoleBreakdown(counts: Vec<(Role, usize)>) -> impl IntoView {
    view! {
        <ul class="divide-y divide-border">
            {counts
                .into_iter()
                .map(|(role, count)| {
                    view! {
                        <li class="flex justify-between py-2 text-sm">
                            <span>{role.label()}</span>
                            <span class="font-semibold">{count}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn AppointmentList(appointments: Vec<Appointment>, empty_text: &'static str) -> impl IntoView {
    if appointments.is_empty() {
        return view! { <p class="text-sm text-fg-muted">{empty_text}</p> }.into_view();
    }
    view! {
        <ul class="divide-y divide-border">
            {appointments
                .into_iter()
                .map(|appt| {
                    view! {
                        <li class="flex justify-between py-2 text-sm">
                            <span>{format_date_time(&appt.scheduled_at)}</span>
                            <span>{appt.reason.unwrap_or_default()}</span>
                            <span class="font-medium">{appt.status.label()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}
