//! Admin access log
//!
//! Applied with `route_layer` to the `/admin` routes. Before the handler
//! runs, it records who called what and when: once as a structured log line
//! and once as an `ADMIN_ACCESS` audit entry. The audit write is best effort
//! and never blocks the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use chrono::Utc;
use taskdesk_shared::auth::AuthUser;
use taskdesk_shared::models::audit_log::ADMIN_ACCESS;
use taskdesk_shared::services::audit;

use crate::app::AppState;

pub async fn admin_access_log(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    req: Request,
    next: Next,
) -> Response {
    let requested_at = Utc::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    tracing::info!(
        admin_id = admin.id,
        requested_at = %requested_at.to_rfc3339(),
        method = %method,
        uri = %uri,
        "Admin API access"
    );

    let detail = format!(
        "admin {} {} {} at {}",
        admin.id,
        method,
        uri,
        requested_at.to_rfc3339()
    );
    audit::record_best_effort(&state.db, ADMIN_ACCESS, &detail).await;

    next.run(req).await
}
