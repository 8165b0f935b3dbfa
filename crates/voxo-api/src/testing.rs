use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use voxo_db::Database;
use voxo_db::models::{NewUser, UserRow};
use voxo_types::api::Claims;
use voxo_types::models::Role;

use crate::auth::{AppState, AppStateInner};

pub const SECRET: &str = "test-secret";

pub fn state() -> AppState {
    AppStateInner::new(Database::open_in_memory().unwrap(), SECRET.to_string())
}

/// User whose provider id is `clerk_<name>`.
pub fn user(state: &AppState, name: &str, role: Role) -> UserRow {
    let clerk_id = format!("clerk_{name}");
    state
        .db
        .ensure_user(&NewUser {
            clerk_id: &clerk_id,
            username: name,
            image_url: None,
            role,
        })
        .unwrap()
}

/// Bearer token for the user created by `user(_, name, _)`.
pub fn token(name: &str) -> String {
    let claims = Claims {
        sub: format!("clerk_{name}"),
        username: Some(name.to_string()),
        image_url: None,
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}
