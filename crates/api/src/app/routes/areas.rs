use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use kennywood_core::AreaId;
use kennywood_park::AreaDraft;

use super::{parse_id, read_body, HandlerResult};
use crate::app::dto::{self, Links};
use crate::app::errors::{domain_error_to_response, store_error_to_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_areas).post(create_area))
        .route("/:id", get(get_area).put(update_area).delete(delete_area))
}

pub async fn list_areas(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
) -> HandlerResult {
    let items = services
        .areas
        .list()
        .await
        .map_err(store_error_to_response)?
        .iter()
        .map(|a| dto::area_to_json(&links, a))
        .collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(items)).into_response())
}

pub async fn get_area(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
    Path(id): Path<String>,
) -> HandlerResult {
    let id: AreaId = parse_id(&id)?;
    let area = services.areas.get(id).await.map_err(store_error_to_response)?;
    Ok((StatusCode::OK, Json(dto::area_to_json(&links, &area))).into_response())
}

pub async fn create_area(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
    body: Result<Json<dto::AreaRequest>, JsonRejection>,
) -> HandlerResult {
    let body = read_body(body)?;
    let draft = AreaDraft::new(&body.name).map_err(domain_error_to_response)?;

    let created = services
        .areas
        .create(draft)
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(area_id = %created.id, "area created");

    Ok((StatusCode::CREATED, Json(dto::area_to_json(&links, &created))).into_response())
}

pub async fn update_area(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AreaRequest>, JsonRejection>,
) -> HandlerResult {
    let id: AreaId = parse_id(&id)?;
    let current = services.areas.get(id).await.map_err(store_error_to_response)?;

    let body = read_body(body)?;
    let draft = AreaDraft::new(&body.name).map_err(domain_error_to_response)?;

    services
        .areas
        .save(&draft.into_record(current.id))
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(area_id = %id, "area updated");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Cascades to the area's attractions and their itinerary items.
pub async fn delete_area(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id: AreaId = parse_id(&id)?;

    let attractions = services
        .delete_area(id)
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(area_id = %id, attractions, "area deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
