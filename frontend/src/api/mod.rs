mod appointments;
mod auth;
mod clinical;
pub mod client;
mod tenants;
pub mod types;
mod users;

pub use client::*;
pub use types::*;
