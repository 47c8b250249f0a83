use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use kennywood_core::{AreaId, AttractionId};
use kennywood_park::AttractionDraft;

use super::{parse_id, read_body, read_query, HandlerResult};
use crate::app::dto::{self, Links};
use crate::app::errors::{domain_error_to_response, store_error_to_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_attractions).post(create_attraction))
        .route(
            "/:id",
            get(get_attraction)
                .put(update_attraction)
                .delete(delete_attraction),
        )
}

/// `GET /attractions[?area=<id>]`. Without a filter every attraction is listed.
pub async fn list_attractions(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
    query: Result<Query<dto::ListAttractionsQuery>, QueryRejection>,
) -> HandlerResult {
    let query = read_query(query)?;
    let area = match query.area.as_deref() {
        Some(raw) => Some(parse_id::<AreaId>(raw)?),
        None => None,
    };

    let attractions = services
        .attractions
        .list(area)
        .await
        .map_err(store_error_to_response)?;
    let areas = services.area_index().await.map_err(store_error_to_response)?;

    let items = attractions
        .iter()
        .map(|a| dto::attraction_to_json(&links, a, areas.get(&a.area_id)))
        .collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(items)).into_response())
}

pub async fn get_attraction(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
    Path(id): Path<String>,
) -> HandlerResult {
    let id: AttractionId = parse_id(&id)?;
    let attraction = services
        .attractions
        .get(id)
        .await
        .map_err(store_error_to_response)?;
    let area = services
        .area_of(&attraction)
        .await
        .map_err(store_error_to_response)?;

    Ok((
        StatusCode::OK,
        Json(dto::attraction_to_json(&links, &attraction, area.as_ref())),
    )
        .into_response())
}

pub async fn create_attraction(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
    body: Result<Json<dto::AttractionRequest>, JsonRejection>,
) -> HandlerResult {
    let body = read_body(body)?;
    let draft = AttractionDraft::new(&body.name, body.area_id).map_err(domain_error_to_response)?;
    let area = services
        .require_area(draft.area_id)
        .await
        .map_err(store_error_to_response)?;

    let created = services
        .attractions
        .create(draft)
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(attraction_id = %created.id, area_id = %created.area_id, "attraction created");

    Ok((
        StatusCode::CREATED,
        Json(dto::attraction_to_json(&links, &created, Some(&area))),
    )
        .into_response())
}

/// Full overwrite of `name` and `area_id`.
pub async fn update_attraction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AttractionRequest>, JsonRejection>,
) -> HandlerResult {
    let id: AttractionId = parse_id(&id)?;
    let current = services
        .attractions
        .get(id)
        .await
        .map_err(store_error_to_response)?;

    let body = read_body(body)?;
    let draft = AttractionDraft::new(&body.name, body.area_id).map_err(domain_error_to_response)?;
    services
        .require_area(draft.area_id)
        .await
        .map_err(store_error_to_response)?;

    services
        .attractions
        .save(&draft.into_record(current.id))
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(attraction_id = %id, "attraction updated");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Itinerary items booked on the attraction go with it.
pub async fn delete_attraction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id: AttractionId = parse_id(&id)?;

    let itineraries = services
        .delete_attraction(id)
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(attraction_id = %id, itineraries, "attraction deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
