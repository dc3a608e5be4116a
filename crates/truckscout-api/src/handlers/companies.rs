//! Company profile and fleet image endpoints.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use truckscout_core::CompanyRecord;
use truckscout_data::CompanyProfile;

use crate::{ApiError, AppState};

pub(crate) fn find_company(state: &AppState, place_id: i64) -> Result<&CompanyRecord, ApiError> {
    state
        .dataset
        .find(place_id)
        .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", place_id)))
}

/// Profile for one company.
///
/// GET /api/v1/companies/{place_id}
#[utoipa::path(get, path = "/api/v1/companies/{place_id}", tag = "Companies",
    params(("place_id" = i64, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Rendered profile; financials_error set when the financial data is malformed"),
        (status = 404, description = "Unknown company")))]
pub async fn get_company(
    State(state): State<AppState>,
    Path(place_id): Path<i64>,
) -> Result<Json<CompanyProfile>, ApiError> {
    let record = find_company(&state, place_id)?;
    Ok(Json(CompanyProfile::render(record)))
}

/// Fleet image bytes.
///
/// GET /api/v1/companies/{place_id}/images/{index}
#[utoipa::path(get, path = "/api/v1/companies/{place_id}/images/{index}", tag = "Companies",
    params(
        ("place_id" = i64, Path, description = "Company identifier"),
        ("index" = usize, Path, description = "Position in the fleet image list")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Unknown company, index or file")))]
pub async fn get_company_image(
    State(state): State<AppState>,
    Path((place_id, index)): Path<(i64, usize)>,
) -> Result<impl IntoResponse, ApiError> {
    let record = find_company(&state, place_id)?;
    let reference = record.fleet_images.get(index).ok_or_else(|| {
        ApiError::NotFound(format!("Company {} has no image {}", place_id, index))
    })?;

    let image = state.images.read(reference).await?;
    debug!(place_id, index, size = image.bytes.len(), "Serving fleet image");
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}
