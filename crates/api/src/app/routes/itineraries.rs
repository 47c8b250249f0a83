use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use kennywood_core::ItineraryId;
use kennywood_park::ItineraryDraft;

use super::{parse_id, read_body, HandlerResult};
use crate::app::dto::{self, Links};
use crate::app::errors::{domain_error_to_response, store_error_to_response};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_itineraries).post(create_itinerary))
        .route(
            "/:id",
            get(get_itinerary)
                .put(update_itinerary)
                .delete(delete_itinerary),
        )
}

pub async fn list_itineraries(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
) -> HandlerResult {
    let itineraries = services
        .itineraries
        .list()
        .await
        .map_err(store_error_to_response)?;
    let attractions = services
        .attraction_index()
        .await
        .map_err(store_error_to_response)?;
    let areas = services.area_index().await.map_err(store_error_to_response)?;

    let items = itineraries
        .iter()
        .map(|i| {
            let attraction = attractions
                .get(&i.attraction_id)
                .map(|a| (a, areas.get(&a.area_id)));
            dto::itinerary_to_json(&links, i, attraction)
        })
        .collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(items)).into_response())
}

pub async fn get_itinerary(
    Extension(services): Extension<Arc<AppServices>>,
    links: Links,
    Path(id): Path<String>,
) -> HandlerResult {
    let id: ItineraryId = parse_id(&id)?;
    let itinerary = services
        .itineraries
        .get(id)
        .await
        .map_err(store_error_to_response)?;
    let attraction = services
        .attraction_with_area(itinerary.attraction_id)
        .await
        .map_err(store_error_to_response)?;

    let json = dto::itinerary_to_json(
        &links,
        &itinerary,
        attraction.as_ref().map(|(a, area)| (a, area.as_ref())),
    );
    Ok((StatusCode::OK, Json(json)).into_response())
}

/// The owner is always the caller, whatever the body says.
pub async fn create_itinerary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    links: Links,
    body: Result<Json<dto::ItineraryRequest>, JsonRejection>,
) -> HandlerResult {
    let body = read_body(body)?;
    let draft = ItineraryDraft::new(body.starttime, body.attraction_id);

    let attraction = services
        .require_attraction(draft.attraction_id)
        .await
        .map_err(store_error_to_response)?;
    let area = services
        .area_of(&attraction)
        .await
        .map_err(store_error_to_response)?;

    let created = services
        .itineraries
        .create(draft, principal.customer_id())
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(
        itinerary_id = %created.id,
        customer_id = %created.customer_id,
        "itinerary created"
    );

    let json = dto::itinerary_to_json(&links, &created, Some((&attraction, area.as_ref())));
    Ok((StatusCode::CREATED, Json(json)).into_response())
}

/// Full overwrite of `starttime` and `attraction_id`; only the owner may do it.
pub async fn update_itinerary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::ItineraryRequest>, JsonRejection>,
) -> HandlerResult {
    let id: ItineraryId = parse_id(&id)?;
    let caller = principal.customer_id();

    let current = services
        .itineraries
        .get(id)
        .await
        .map_err(store_error_to_response)?;
    current.ensure_owned_by(caller).map_err(domain_error_to_response)?;

    let body = read_body(body)?;
    let draft = ItineraryDraft::new(body.starttime, body.attraction_id);
    services
        .require_attraction(draft.attraction_id)
        .await
        .map_err(store_error_to_response)?;

    let next = current.overwrite(draft, caller).map_err(domain_error_to_response)?;
    services
        .itineraries
        .save(&next)
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(itinerary_id = %id, "itinerary updated");

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_itinerary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id: ItineraryId = parse_id(&id)?;

    let current = services
        .itineraries
        .get(id)
        .await
        .map_err(store_error_to_response)?;
    current
        .ensure_owned_by(principal.customer_id())
        .map_err(domain_error_to_response)?;

    services
        .itineraries
        .delete(id)
        .await
        .map_err(store_error_to_response)?;
    tracing::info!(itinerary_id = %id, "itinerary deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
