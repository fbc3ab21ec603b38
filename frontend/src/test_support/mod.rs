#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::User;
    use crate::state::auth::AuthState;
    use leptos::*;
    use serde_json::{json, Value};

    pub fn user_json(id: i64, role: &str, tenant_id: Option<i64>) -> Value {
        json!({
            "id": id,
            "username": format!("user{}", id),
            "email": format!("user{}@uppamed.com", id),
            "role": role,
            "tenant_id": tenant_id
        })
    }

    fn user(id: i64, role: &str, tenant_id: Option<i64>) -> User {
        serde_json::from_value(user_json(id, role, tenant_id)).expect("valid user json")
    }

    pub fn super_admin_user() -> User {
        user(1, "Super Admin", None)
    }

    pub fn admin_user(tenant_id: i64) -> User {
        user(2, "Administrador", Some(tenant_id))
    }

    pub fn specialist_user() -> User {
        user(3, "Especialista", Some(7))
    }

    pub fn patient_user() -> User {
        user(4, "Paciente", Some(7))
    }

    pub fn provide_auth(user: Option<User>) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let state = match user {
            Some(user) => AuthState::signed_in(user, false),
            None => AuthState::signed_out(false),
        };
        let (auth, set_auth) = create_signal(state);
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
