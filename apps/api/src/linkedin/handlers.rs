use axum::{extract::State, response::Redirect};

use crate::config::DEFAULT_LINKEDIN_CLIENT_ID;
use crate::linkedin::{authorization_url, new_state};
use crate::state::AppState;

/// GET /api/v1/linkedin/authorize
pub async fn handle_authorize(State(state): State<AppState>) -> Redirect {
    let client_id = &state.config.linkedin_client_id;
    if client_id == DEFAULT_LINKEDIN_CLIENT_ID {
        tracing::warn!("LINKEDIN_CLIENT_ID is not set, LinkedIn will reject the request");
    }
    let url = authorization_url(client_id, &state.config.public_base_url, &new_state());
    Redirect::to(&url)
}
