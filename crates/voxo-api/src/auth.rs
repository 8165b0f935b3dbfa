use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::error;

use voxo_db::Database;
use voxo_db::models::{NewUser, UserRow};
use voxo_types::api::{Claims, SelfStats};
use voxo_types::models::{Role, User};

use crate::authority::Authority;
use crate::convert;
use crate::error::{ApiError, InvalidOperation};
use crate::revalidate::Invalidations;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub invalidations: Invalidations,
}

impl AppStateInner {
    pub fn new(db: Database, jwt_secret: String) -> AppState {
        Arc::new(Self {
            db,
            jwt_secret,
            invalidations: Invalidations::new(),
        })
    }

    /// Resolve the caller to a stored user, creating it on first contact.
    /// Done once per request; the result is passed explicitly from there on.
    pub fn resolve_actor(&self, claims: &Claims) -> Result<UserRow, ApiError> {
        if claims.sub.is_empty() {
            return Err(ApiError::Unauthorized("Unauthorized"));
        }

        if let Some(user) = self.db.get_user_by_clerk_id(&claims.sub)? {
            return Ok(user);
        }

        let username = claims
            .username
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_username(&claims.sub));

        let user = self.db.ensure_user(&NewUser {
            clerk_id: &claims.sub,
            username: &username,
            image_url: claims.image_url.as_deref(),
            role: Role::User,
        })?;
        Ok(user)
    }

    pub fn authority(&self) -> Authority<'_> {
        Authority::new(&self.db, &self.invalidations)
    }
}

/// Placeholder for providers that don't supply a username. Provider ids
/// carry their own `user_` prefix, which is dropped before taking the
/// fragment. Storage appends a suffix if the placeholder is already taken.
pub fn default_username(provider_id: &str) -> String {
    let id = provider_id.strip_prefix("user_").unwrap_or(provider_id);
    let fragment: String = id.chars().take(8).collect();
    format!("user_{}", fragment)
}

/// Run blocking SQLite work off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(e.into())
    })?
}

/// GET /me
pub async fn get_self(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, ApiError> {
    let actor = blocking(move || state.resolve_actor(&claims)).await?;
    Ok(Json(convert::user(actor)))
}

/// GET /me/stats
pub async fn get_self_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SelfStats>, ApiError> {
    let stats = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().self_stats(&actor)
    })
    .await?;

    Ok(Json(stats))
}

/// GET /users/{username} — public profile lookup.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = blocking(move || {
        state
            .db
            .get_user_by_username(&username)?
            .ok_or(ApiError::InvalidOperation(InvalidOperation::UserNotFound))
    })
    .await?;

    Ok(Json(convert::user(user)))
}
