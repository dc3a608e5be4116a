//! Map view endpoint.

use axum::{extract::State, Json};

use truckscout_data::{map_view, MapView};

use crate::AppState;

/// Marker layers in display order, plus map center and styling.
///
/// GET /api/v1/map
#[utoipa::path(get, path = "/api/v1/map", tag = "Map",
    responses((status = 200, description = "Four marker layers with map settings")))]
pub async fn get_map(State(state): State<AppState>) -> Json<MapView> {
    Json(map_view(&state.dataset, state.config.mapbox_token.clone()))
}
