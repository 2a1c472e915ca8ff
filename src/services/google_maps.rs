//!
//! Documentation of the google_maps module.
//! Asks the routing API for distance and fuel between two points.
//!

use std::time::Duration;

use anyhow::Context;
use hyper::header::Headers;
use hyper::net::HttpsConnector;
use hyper::Client;
use hyper_sync_rustls;
use log::debug;
use serde::{Serialize, Deserialize};

/// Distance (km) and fuel (liters) of a computed route.
/// Zero-valued when the API had no answer.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RouteDetails {
    pub distance: f64,
    pub fuel: f64,
}

/// The routing API client. Best-effort by contract: callers always get a
/// RouteDetails back, failures of any kind collapse to zeros.
pub struct MapsService {
    hostname: String,
    api_key: String,
}

impl MapsService {
    pub fn new(hostname: String, api_key: String) -> MapsService {
        MapsService { hostname, api_key }
    }

    ///
    /// Route details between two locations
    ///
    /// # Arguments
    ///
    /// * `slat`, `slong` - the starting location
    /// * `dlat`, `dlong` - the destination location
    ///
    /// # Output
    ///
    /// * RouteDetails - computed values, or zeros when the request failed,
    ///   timed out or came back without a route
    ///
    pub fn get_route_details(&self, slat: String, slong: String, dlat: String, dlong: String) -> RouteDetails {
        match self.fetch_route_details(slat, slong, dlat, dlong) {
            Ok(value) => value,
            Err(value) => {
                debug!("{}", format!("Directions lookup failed, substituting zeros: {}", value));
                RouteDetails::default()
            },
        }
    }

    /// The fallible half of get_route_details
    fn fetch_route_details(&self, slat: String, slong: String, dlat: String, dlong: String) -> anyhow::Result<RouteDetails> {
        let https = HttpsConnector::new(hyper_sync_rustls::TlsClient::new());
        let mut client = Client::with_connector(https);
        client.set_read_timeout(Some(Duration::from_secs(1)));
        client.set_write_timeout(Some(Duration::from_secs(1)));

        let payload = serde_json::json!({
            "origin": {
                "location": { "latLng": { "latitude": slat, "longitude": slong } }
            },
            "destination": {
                "location": { "latLng": { "latitude": dlat, "longitude": dlong } }
            },
            "routeModifiers": { "vehicleInfo": { "emissionType": "GASOLINE" } },
            "travelMode": "DRIVE",
            "routingPreference": "TRAFFIC_AWARE_OPTIMAL",
            "extraComputations": [ "FUEL_CONSUMPTION" ],
        })
        .to_string();

        let mut headers = Headers::new();
        headers.set_raw("Content-Type", vec![b"application/json".to_vec()]);
        headers.set_raw("X-Goog-Api-Key", vec![self.api_key.clone().into_bytes()]);
        headers.set_raw(
            "X-Goog-FieldMask",
            vec![b"routes.distanceMeters,routes.duration,routes.routeLabels,routes.routeToken,routes.travelAdvisory.fuelConsumptionMicroliters".to_vec()],
        );

        let url = format!("https://{}/directions/v2:computeRoutes", self.hostname);
        let response = client
            .post(&url[..])
            .headers(headers)
            .body(&payload[..])
            .send()
            .context("failed to send request to API")?;

        if !response.status.is_success() {
            return Err(anyhow::anyhow!(
                "got non-success status {}",
                response.status
            ));
        }

        let data: serde_json::Value = serde_json::from_reader(response)
            .context("failed to deserialize response")?;

        let route = data
            .get("routes")
            .and_then(|value| value.get(0))
            .context("no route in response")?;

        let distance = int_field(route.get("distanceMeters")) as f64 / 1000.0;
        let fuel = int_field(
            route
                .get("travelAdvisory")
                .and_then(|value| value.get("fuelConsumptionMicroliters")),
        ) as f64
            / (1000.0 * 1000.0);

        Ok(RouteDetails { distance, fuel })
    }
}

/// The API writes int64 fields as JSON strings, takes both forms
fn int_field(value: Option<&serde_json::Value>) -> i64 {
    match value {
        Some(serde_json::Value::Number(number)) => number.as_i64().unwrap_or(0),
        Some(serde_json::Value::String(text)) => text.parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}
