//! Local stand-ins for the upstream services used by service tests

use std::collections::HashMap;

use axum::{extract::Query, routing::get, Json, Router};
use serde_json::{json, Map, Value};
use shared::pipeline::ensemble::ENSEMBLE_MEMBERS;
use shared::ENSEMBLE_PRECIPITATION_PARAMETER;

use crate::config::Config;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Configuration with every upstream pointed at `base_url`
///
/// Forecast collections become `/surface`, `/height` and `/ensemble`.
pub fn config_for(base_url: &str) -> Config {
    Config::with_defaults("test")
        .unwrap()
        .set_override("forecast.base_url", base_url)
        .unwrap()
        .set_override("forecast.surface_collection", "surface")
        .unwrap()
        .set_override("forecast.height_collection", "height")
        .unwrap()
        .set_override("forecast.ensemble_collection", "ensemble")
        .unwrap()
        .set_override("llm.endpoint", format!("{}/api/generate", base_url))
        .unwrap()
        .set_override("classifier.endpoint", format!("{}/upload", base_url))
        .unwrap()
        .set_override("alerts.base_url", base_url)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

/// EDR position routes answering every query with mild autumn weather
pub fn forecast_routes() -> Router {
    Router::new().route("/:collection/position", get(position))
}

async fn position(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let parameters = query.get("parameter-name").cloned().unwrap_or_default();
    let datetime = query.get("datetime").cloned().unwrap_or_default();

    if parameters == ENSEMBLE_PRECIPITATION_PARAMETER {
        return Json(ensemble(2));
    }
    let names: Vec<&str> = parameters.split(',').collect();
    let instants = datetime.split(',').count();
    Json(collection(&names, instants))
}

fn reading(name: &str) -> f64 {
    match name {
        "temperature_gnd-surf" | "apparent-temperature" => 284.15,
        "dewpoint-temperature" => 279.15,
        "pressure_gnd-surf" => 101_300.0,
        "visibility_gnd-surf" => 24_000.0,
        "relative-humidity_0-isoterm" => 60.0,
        "total-cloud-cover_atmosphere" => 40.0,
        "wind-speed-gust_gnd-surf" => 6.0,
        _ => 0.0,
    }
}

fn collection(names: &[&str], instants: usize) -> Value {
    let parameters: Map<String, Value> = names
        .iter()
        .map(|name| (name.to_string(), json!({ "unit": { "symbol": unit(name) } })))
        .collect();
    let coverages: Vec<Value> = (0..instants)
        .flat_map(|_| names.iter())
        .map(|name| {
            let mut ranges = Map::new();
            ranges.insert(name.to_string(), json!({ "values": [reading(name)] }));
            json!({ "ranges": Value::Object(ranges) })
        })
        .collect();
    json!({ "type": "CoverageCollection", "parameters": parameters, "coverages": coverages })
}

fn unit(name: &str) -> &'static str {
    match name {
        "temperature_gnd-surf" | "apparent-temperature" | "dewpoint-temperature" => "K",
        "pressure_gnd-surf" => "Pa",
        "visibility_gnd-surf" => "m",
        "wind-speed-gust_gnd-surf" => "m/s",
        "snow-depth_gnd-surf" => "m",
        _ => "%",
    }
}

/// Dry member-major ensemble with `buckets` six-hour readings per member
fn ensemble(buckets: usize) -> Value {
    let coverages: Vec<Value> = (0..ENSEMBLE_MEMBERS * buckets)
        .map(|i| {
            let mut ranges = Map::new();
            ranges.insert(
                format!("{ENSEMBLE_PRECIPITATION_PARAMETER}_mem-{}", i / buckets + 1),
                json!({ "values": [0.0] }),
            );
            json!({ "ranges": Value::Object(ranges) })
        })
        .collect();
    json!({ "type": "CoverageCollection", "coverages": coverages })
}
