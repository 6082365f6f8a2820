use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::flags::FeatureFlagGate;
use crate::state::AppState;

/// Extractor for the flag gate of the current request.
pub struct FlagGate(pub Arc<FeatureFlagGate>);

impl<S> FromRequestParts<S> for FlagGate
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<FeatureFlagGate>>()
            .cloned()
            .map(FlagGate)
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "missing flag gate"))
    }
}

/// Gives every request its own empty gate. Flags are read lazily on first use and the
/// cached snapshot goes away with the request.
pub async fn with_flag_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let gate = FeatureFlagGate::new(state.flag_store.clone());
    req.extensions_mut().insert(Arc::new(gate));
    next.run(req).await
}
