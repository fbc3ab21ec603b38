use crate::{
    api::{ApiError, Tenant},
    components::{
        layout::{ErrorMessage, LoadingSpinner},
        toast::use_toasts,
    },
    pages::dashboard::{
        components::{RoleBreakdown, StatCard},
        repository::{self, SuperAdminSummary},
    },
    state::{auth::use_auth_service, impersonation::use_impersonate_action},
};
use leptos::*;

#[component]
pub fn SuperAdminPanel() -> impl IntoView {
    let api = use_auth_service().api().clone();
    let summary = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_super_admin_summary(&api).await }
        },
    );

    let impersonate_action = use_impersonate_action();
    let pending = impersonate_action.pending();
    let toasts = use_toasts();
    create_effect(move |_| match impersonate_action.value().get() {
        Some(Ok(user)) => {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href(user.role.dashboard_path());
            }
        }
        Some(Err(err)) => {
            log::error!("impersonation failed: {}", err);
            toasts.error(err.error);
        }
        None => {}
    });
    let on_impersonate = Callback::new(move |tenant_id: i64| {
        if pending.get_untracked() {
            return;
        }
        impersonate_action.dispatch(tenant_id);
    });

    view! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"Panel de Super Admin"</h2>
            {move || match summary.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => summary_error(err).into_view(),
                Some(Ok(data)) => view! {
                    <SummaryView data=data on_impersonate=on_impersonate pending=pending.into() />
                }
                .into_view(),
            }}
        </section>
    }
}

fn summary_error(err: ApiError) -> impl IntoView {
    view! { <ErrorMessage message=err.error /> }
}

#[component]
fn SummaryView(
    data: SuperAdminSummary,
    on_impersonate: Callback<i64>,
    pending: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 gap-4 sm:grid-cols-3">
            <StatCard label="Centros médicos" value=data.tenant_summary.total />
            <StatCard label="Activos" value=data.tenant_summary.active />
            <StatCard label="Inactivos" value=data.tenant_summary.inactive />
        </div>
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <h3 class="font-semibold mb-2">"Usuarios por rol"</h3>
            <RoleBreakdown counts=data.users_by_role />
        </div>
        <TenantTable tenants=data.tenants on_impersonate=on_impersonate pending=pending />
    }
}

#[component]
pub fn TenantTable(
    tenants: Vec<Tenant>,
    on_impersonate: Callback<i64>,
    pending: Signal<bool>,
) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-border bg-surface-elevated shadow rounded-lg">
            <thead>
                <tr>
                    <th class="px-4 py-2 text-left text-sm">"Centro"</th>
                    <th class="px-4 py-2 text-left text-sm">"Estado"</th>
                    <th class="px-4 py-2"></th>
                </tr>
            </thead>
            <tbody>
                {tenants
                    .into_iter()
                    .map(|tenant| {
                        let id = tenant.id;
                        let active = tenant.is_active;
                        view! {
                            <tr>
                                <td class="px-4 py-2 text-sm">{tenant.name}</td>
                                <td class="px-4 py-2 text-sm">
                                    {if active { "Activo" } else { "Inactivo" }}
                                </td>
                                <td class="px-4 py-2 text-right">
                                    <button
                                        class="text-sm font-medium text-action-primary-text disabled:opacity-50"
                                        disabled=move || pending.get() || !active
                                        on:click=move |_| on_impersonate.call(id)
                                    >
                                        "Ingresar como administrador"
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
