//! One dashboard per role. Each page is gated by `RequireRole` and reads the
//! signed-in user from the auth context.

mod admin;
pub mod components;
mod patient;
pub mod repository;
mod specialist;
mod super_admin;
pub mod utils;

use crate::{
    api::{Role, User},
    components::{guard::RequireRole, layout::Layout},
    state::auth::use_auth,
};
use leptos::*;

use admin::AdminPanel;
use patient::PatientPanel;
use specialist::SpecialistPanel;
use super_admin::SuperAdminPanel;

fn signed_in_user() -> Option<User> {
    let (auth, _) = use_auth();
    auth.get_untracked().user
}

#[component]
pub fn SuperAdminDashboardPage() -> impl IntoView {
    view! {
        <RequireRole role=Role::SuperAdmin>
            <Layout>
                <SuperAdminPanel />
            </Layout>
        </RequireRole>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Administrador>
            {move || signed_in_user().map(|user| view! {
                <Layout>
                    <AdminPanel user=user />
                </Layout>
            })}
        </RequireRole>
    }
}

#[component]
pub fn SpecialistDashboardPage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Especialista>
            {move || signed_in_user().map(|user| view! {
                <Layout>
                    <SpecialistPanel user=user />
                </Layout>
            })}
        </RequireRole>
    }
}

#[component]
pub fn PatientDashboardPage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Paciente>
            {move || signed_in_user().map(|user| view! {
                <Layout>
                    <PatientPanel user=user />
                </Layout>
            })}
        </RequireRole>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, patient_user, specialist_user, super_admin_user};
    use crate::test_support::ssr::render_as;

    #[test]
    fn super_admin_page_renders_for_super_admin() {
        let html = render_as(Some(super_admin_user()), || view! { <SuperAdminDashboardPage /> });
        assert!(html.contains("Panel de Super Admin"));
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn admin_page_is_hidden_from_specialist() {
        let html = render_as(Some(specialist_user()), || view! { <AdminDashboardPage /> });
        assert!(!html.contains("Panel del centro médico"));
    }

    #[test]
    fn admin_page_renders_for_admin() {
        let html = render_as(Some(admin_user(7)), || view! { <AdminDashboardPage /> });
        assert!(html.contains("Panel del centro médico"));
    }

    #[test]
    fn specialist_page_renders_for_specialist() {
        let html = render_as(Some(specialist_user()), || view! { <SpecialistDashboardPage /> });
        assert!(html.contains("Mi agenda"));
    }

    #[test]
    fn patient_page_is_hidden_from_admin() {
        let html = render_as(Some(admin_user(7)), || view! { <PatientDashboardPage /> });
        assert!(!html.contains("Mi salud"));
        let html = render_as(Some(patient_user()), || view! { <PatientDashboardPage /> });
        assert!(html.contains("Mi salud"));
    }
}
