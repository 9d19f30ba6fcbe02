use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::error;

use crate::{entities::user, errors::AppError, models::auth::Claims, state::AppState};

/// Resolves the bearer token to a full user record and stores it in the
/// request extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            error!("Missing Authorization header");
            AppError::Unauthorized
        })?;

    if !auth_header.starts_with("Bearer ") {
        error!("Authorization header must start with Bearer");
        return Err(AppError::Unauthorized);
    }

    let token = auth_header.trim_start_matches("Bearer ");

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 10;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        error!("JWT verification failed: {:?}", e);
        AppError::Unauthorized
    })?;

    // The subject claim carries the user's email address.
    let user_record = user::Entity::find()
        .filter(user::Column::Email.eq(&token_data.claims.sub))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!(
                "Database error during auth middleware for {}: {:?}",
                token_data.claims.sub, e
            );
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| {
            error!(
                "Token is valid, but user {} not found in database",
                token_data.claims.sub
            );
            AppError::Unauthorized
        })?;

    req.extensions_mut().insert(user_record);

    Ok(next.run(req).await)
}
