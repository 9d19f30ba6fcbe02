/// Health check endpoint
///
/// Liveness check; does not touch the database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = String),
    ),
    tag = "general",
)]
pub async fn health() -> &'static str {
    "skillbridge backend is up"
}
