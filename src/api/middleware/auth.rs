//! Admin gate for the moderation routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::Caller;
use crate::api::AppState;
use crate::domain::User;
use crate::errors::AppError;

/// Admin-only middleware.
///
/// Resolves the caller against the user registry and rejects anyone who is
/// not a registered admin. The resolved caller is stored in the request
/// extensions for the handlers.
pub async fn admin_middleware(
    State(state): State<AppState>,
    caller: Caller,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state
        .users
        .get_user(caller.0.clone())
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::forbidden("Admin access required"),
            other => other,
        })?;
    require_admin(&user)?;

    tracing::debug!(admin = %user.email, "Admin request");
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &User) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}
