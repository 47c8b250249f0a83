use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use kennywood_core::{AreaId, AttractionId, Entity};
use kennywood_park::{Area, Attraction, Itinerary};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AreaRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AttractionRequest {
    pub name: String,
    pub area_id: AreaId,
}

/// Any `customer_id` a client sends is ignored; the owner is the caller.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    pub starttime: DateTime<Utc>,
    pub attraction_id: AttractionId,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListAttractionsQuery {
    pub area: Option<String>,
}

// -------------------------
// Self links
// -------------------------

/// Configured public base URL, installed as a request extension.
#[derive(Debug, Clone, Default)]
pub struct PublicUrl(pub Option<String>);

/// Builds absolute `url` fields for rendered records.
///
/// Base resolution: configured public URL, else scheme + `Host` header, else
/// root-relative links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    base: String,
}

impl Links {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn url<E: Entity>(&self, id: E::Id) -> String {
        format!("{}/{}/{}", self.base, E::COLLECTION, id)
    }

    fn from_parts(parts: &Parts) -> Self {
        if let Some(PublicUrl(Some(base))) = parts.extensions.get::<PublicUrl>() {
            return Self::new(base.clone());
        }

        let host = parts.headers.get(HOST).and_then(|h| h.to_str().ok());
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("http");

        match host {
            Some(host) => Self::new(format!("{scheme}://{host}")),
            None => Self::new(""),
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Links {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

// -------------------------
// JSON rendering
// -------------------------
//
// Reference fields are expanded up to two levels: itinerary -> attraction ->
// area. A reference whose target is gone renders as null.

pub fn area_to_json(links: &Links, area: &Area) -> serde_json::Value {
    serde_json::json!({
        "id": area.id,
        "url": links.url::<Area>(area.id),
        "name": area.name,
    })
}

pub fn attraction_to_json(links: &Links, attraction: &Attraction, area: Option<&Area>) -> serde_json::Value {
    serde_json::json!({
        "id": attraction.id,
        "url": links.url::<Attraction>(attraction.id),
        "name": attraction.name,
        "area": area.map(|a| area_to_json(links, a)),
    })
}

pub fn itinerary_to_json(
    links: &Links,
    itinerary: &Itinerary,
    attraction: Option<(&Attraction, Option<&Area>)>,
) -> serde_json::Value {
    serde_json::json!({
        "id": itinerary.id,
        "url": links.url::<Itinerary>(itinerary.id),
        "starttime": itinerary.starttime,
        "attraction": attraction.map(|(a, area)| attraction_to_json(links, a, area)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::TimeZone;
    use kennywood_core::{CustomerId, ItineraryId};

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn configured_public_url_wins_over_host() {
        let mut p = parts(Request::get("/attractions").header(HOST, "internal:8080"));
        p.extensions.insert(PublicUrl(Some("https://park.example".into())));

        let links = Links::from_parts(&p);
        assert_eq!(links.url::<Area>(AreaId::new(2)), "https://park.example/areas/2");
    }

    #[test]
    fn falls_back_to_host_header_then_relative() {
        let p = parts(
            Request::get("/")
                .header(HOST, "localhost:8000")
                .header("x-forwarded-proto", "https"),
        );
        assert_eq!(
            Links::from_parts(&p).url::<Attraction>(AttractionId::new(7)),
            "https://localhost:8000/attractions/7"
        );

        let bare = parts(Request::get("/"));
        assert_eq!(
            Links::from_parts(&bare).url::<Itinerary>(ItineraryId::new(1)),
            "/itineraries/1"
        );
    }

    #[test]
    fn itinerary_renders_two_levels_and_hides_customer() {
        let links = Links::new("http://h");
        let area = Area { id: AreaId::new(1), name: "Lost Kennywood".into() };
        let attraction = Attraction {
            id: AttractionId::new(3),
            name: "Phantom's Revenge".into(),
            area_id: area.id,
        };
        let itinerary = Itinerary {
            id: ItineraryId::new(9),
            starttime: Utc.with_ymd_and_hms(2026, 7, 4, 13, 30, 0).unwrap(),
            attraction_id: attraction.id,
            customer_id: CustomerId::new(5),
        };

        let json = itinerary_to_json(&links, &itinerary, Some((&attraction, Some(&area))));

        assert_eq!(json["id"], 9);
        assert_eq!(json["url"], "http://h/itineraries/9");
        assert_eq!(json["starttime"], "2026-07-04T13:30:00Z");
        assert_eq!(json["attraction"]["name"], "Phantom's Revenge");
        assert_eq!(json["attraction"]["area"]["id"], 1);
        assert_eq!(json["attraction"]["area"]["url"], "http://h/areas/1");
        assert!(json.get("customer").is_none());
        assert!(json.get("customer_id").is_none());
    }

    #[test]
    fn dangling_reference_renders_null() {
        let links = Links::new("");
        let attraction = Attraction {
            id: AttractionId::new(1),
            name: "Racer".into(),
            area_id: AreaId::new(42),
        };
        let json = attraction_to_json(&links, &attraction, None);
        assert!(json["area"].is_null());
    }
}
