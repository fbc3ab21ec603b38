use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    components::{guard::HomeRedirect, toast::provide_toasts},
    pages::{
        AdminDashboardPage, LoginPage, PatientDashboardPage, SpecialistDashboardPage,
        SuperAdminDashboardPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/dashboard/super-admin",
    "/dashboard/admin",
    "/dashboard/specialist",
    "/dashboard/patient",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_toasts();
    view! {
        <Title text="UppaMed"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomeRedirect/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/dashboard/super-admin" view=SuperAdminDashboardPage/>
                    <Route path="/dashboard/admin" view=AdminDashboardPage/>
                    <Route path="/dashboard/specialist" view=SpecialistDashboardPage/>
                    <Route path="/dashboard/patient" view=PatientDashboardPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
