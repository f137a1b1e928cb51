/// HTTP endpoint serving classified station status.
///
/// Provides the small REST surface the dashboard polls. Readings come from
/// the relational store the ingestion collaborator maintains; thresholds
/// come from the registry snapshot; classification happens in-process on
/// every request.
///
/// Endpoints:
/// - GET /station/{station_id} - Latest reading for one station, classified
/// - GET /summary - Fleet-wide severity summary for the dashboard banner
/// - GET /health - Service health check

use std::sync::Arc;

use chrono::{DateTime, Utc};
use postgres::Client;
use serde::Serialize;

use crate::analysis::fleet::{summarize, FleetSummary};
use crate::db;
use crate::model::{ClassificationResult, ClassifyError, Reading};
use crate::registry::{RegistryHandle, ThresholdRegistry};
use crate::risk::classify::classify;
use crate::risk::trend::{estimate_trend, DEFAULT_TREND_EPSILON_M};
use crate::stations::find_station;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Classified status for one station, shaped for the dashboard cards.
#[derive(Debug, Serialize)]
pub struct StationStatusResponse {
    pub station_id: String,
    pub name: String,
    pub river: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Current reading, if any has been stored
    pub current_level_m: Option<f64>,
    pub previous_level_m: Option<f64>,
    pub measured_at: Option<DateTime<Utc>>,

    /// Classification ("N/A" when the level or thresholds are unknown)
    pub status: String,
    pub risk_level: String,
    pub trend: String,
    pub percent_of_alert: Option<f64>,

    /// Configured thresholds, if the registry knows this station
    pub thresholds: Option<ThresholdData>,
}

/// Threshold data for JSON response, meters.
#[derive(Debug, Serialize)]
pub struct ThresholdData {
    pub alert_level_m: Option<f64>,
    pub minor_flood_level_m: Option<f64>,
    pub major_flood_level_m: Option<f64>,
}

/// Fleet summary plus the per-station statuses it was computed from.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: FleetSummary,
    pub stations: Vec<StationStatusResponse>,
}

// ---------------------------------------------------------------------------
// Classification with per-station degradation
// ---------------------------------------------------------------------------

/// Classifies a reading, degrading to an "N/A" result instead of failing.
///
/// A station missing from the registry or carrying a bad level must not
/// take down the whole response; it surfaces as unclassified and the other
/// stations render normally.
pub fn classify_or_degrade(
    registry: &ThresholdRegistry,
    reading: &Reading,
) -> ClassificationResult {
    match classify(registry, reading) {
        Ok(result) => result,
        Err(e) => {
            match &e {
                ClassifyError::ThresholdsNotFound(_) => {}
                ClassifyError::InvalidReading { .. } => {
                    // Ingestion should have rejected this upstream.
                    eprintln!("   ⚠ {}", e);
                }
            }
            ClassificationResult {
                station_id: reading.station_id.clone(),
                status: None,
                risk_level: None,
                percent_of_alert: None,
                trend: estimate_trend(
                    reading.current_level_m,
                    reading.previous_level_m,
                    DEFAULT_TREND_EPSILON_M,
                ),
            }
        }
    }
}

/// Assembles the full station response from a reading and its result.
fn station_response(
    registry: &ThresholdRegistry,
    reading: Option<&Reading>,
    result: Option<&ClassificationResult>,
    station_id: &str,
) -> StationStatusResponse {
    let meta = find_station(station_id);
    let thresholds = registry.get(station_id).ok().map(|t| ThresholdData {
        alert_level_m: t.alert(),
        minor_flood_level_m: t.minor_flood(),
        major_flood_level_m: t.major_flood(),
    });

    StationStatusResponse {
        station_id: station_id.to_string(),
        name: meta.map(|s| s.name.to_string()).unwrap_or_else(|| station_id.to_string()),
        river: meta.map(|s| s.river.to_string()),
        latitude: meta.map(|s| s.latitude),
        longitude: meta.map(|s| s.longitude),
        current_level_m: reading.and_then(|r| r.current_level_m),
        previous_level_m: reading.and_then(|r| r.previous_level_m),
        measured_at: reading.map(|r| r.measured_at),
        status: result.map(|r| r.status_label()).unwrap_or("N/A").to_string(),
        risk_level: result.map(|r| r.risk_label()).unwrap_or("N/A").to_string(),
        trend: result
            .map(|r| r.trend.as_str())
            .unwrap_or("UNKNOWN")
            .to_string(),
        percent_of_alert: result.and_then(|r| r.percent_of_alert),
        thresholds,
    }
}

// ---------------------------------------------------------------------------
// HTTP server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port
pub fn start_endpoint_server(
    port: u16,
    mut client: Client,
    registry: Arc<RegistryHandle>,
) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /station/{{station_id}} - Classified station status");
    println!("   GET /summary - Fleet severity summary");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let url = request.url();
        let snapshot = registry.snapshot();

        // Route requests
        let response = if url == "/health" {
            handle_health()
        } else if url == "/summary" {
            handle_summary(&mut client, &snapshot)
        } else if url.starts_with("/station/") {
            let station_id = url.trim_start_matches("/station/");
            handle_station_query(&mut client, &snapshot, station_id)
        } else {
            create_response(
                404,
                serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": ["/health", "/summary", "/station/{station_id}"]
                }),
            )
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Handle /health endpoint
fn handle_health() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "floodrisk_service",
            "version": "0.1.0"
        }),
    )
}

/// Handle /station/{station_id} endpoint
fn handle_station_query(
    client: &mut Client,
    registry: &ThresholdRegistry,
    station_id: &str,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    if find_station(station_id).is_none() && !registry.contains(station_id) {
        return create_response(
            404,
            serde_json::json!({
                "error": format!("Unknown station: {}", station_id),
                "station_id": station_id
            }),
        );
    }

    match db::fetch_latest_reading(client, station_id) {
        Ok(reading) => {
            let result = reading.as_ref().map(|r| classify_or_degrade(registry, r));
            let body = station_response(registry, reading.as_ref(), result.as_ref(), station_id);
            create_response(200, serde_json::to_value(&body).unwrap())
        }
        Err(e) => create_response(
            500,
            serde_json::json!({
                "error": e,
                "station_id": station_id
            }),
        ),
    }
}

/// Handle /summary endpoint
fn handle_summary(
    client: &mut Client,
    registry: &ThresholdRegistry,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let readings = match db::fetch_latest_readings(client) {
        Ok(readings) => readings,
        Err(e) => {
            return create_response(500, serde_json::json!({ "error": e }));
        }
    };

    let results: Vec<ClassificationResult> = readings
        .iter()
        .map(|r| classify_or_degrade(registry, r))
        .collect();
    let summary = summarize(&results);

    let stations = readings
        .iter()
        .zip(results.iter())
        .map(|(reading, result)| {
            station_response(registry, Some(reading), Some(result), &reading.station_id)
        })
        .collect();

    let body = SummaryResponse { summary, stations };
    create_response(200, serde_json::to_value(&body).unwrap())
}

/// Create HTTP response with JSON body
fn create_response(
    status_code: u16,
    json: serde_json::Value,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap();
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
