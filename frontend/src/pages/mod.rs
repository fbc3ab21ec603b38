pub mod dashboard;
pub mod login;

pub use dashboard::{
    AdminDashboardPage, PatientDashboardPage, SpecialistDashboardPage, SuperAdminDashboardPage,
};
pub use login::LoginPage;
