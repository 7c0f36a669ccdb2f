//! Request handlers for the venue routing API.
//!
//! Handlers parse and validate input, call into `venueroute-lib`, and shape
//! the result. Failures are returned as RFC 9457 problem documents.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use venueroute_lib::{list_landmarks, nearest_nodes, plan_route, Destination};

use crate::metrics::{
    record_nodes_located, record_route_calculated, record_route_failed, record_route_hops,
};
use crate::problem::{failure_reason, from_lib_error};
use crate::request::{MarkersQuery, NearestQuery, SafeRouteRequest, Validate};
use crate::response::{MarkersResponse, NearestResponse, SafeRouteResponse};
use crate::{AppState, ProblemDetails, RequestId};

/// Handle `POST /api/v1/safe-route`.
pub async fn safe_route_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<SafeRouteRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            record_route_failed("invalid_query");
            return ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
                .into_response();
        }
    };

    info!(
        start_lat = request.start_lat,
        start_lng = request.start_lng,
        end_lat = ?request.end_lat,
        end_lng = ?request.end_lng,
        target_category = ?request.target_category,
        closest_exit = request.closest_exit,
        wheelchair = request.prefer_wheelchair,
        avoid_crowds = request.avoid_crowds,
        "handling safe-route request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_route_failed("invalid_query");
        return (*problem).into_response();
    }

    let lib_request = request.to_lib_request();
    let plan = match plan_route(state.graph(), state.config(), &lib_request) {
        Ok(plan) => plan,
        Err(e) => {
            let reason = failure_reason(&e);
            if reason == "invalid_query" {
                warn!(error = %e, "route request rejected");
            } else {
                error!(error = %e, "route planning failed");
            }
            record_route_failed(reason);
            return from_lib_error(&e, request_id.as_str()).into_response();
        }
    };

    if !plan.is_found() {
        info!(start = %plan.start, "no route satisfies the request");
        record_route_failed("no_route");
        return Json(SafeRouteResponse::from(plan)).into_response();
    }

    let destination = match plan.destination {
        Destination::Point(_) => "point",
        Destination::Category { .. } => "category",
    };
    record_route_calculated(
        destination,
        plan.preferences.wheelchair,
        plan.preferences.avoid_crowds,
    );
    record_route_hops(plan.hop_count());

    info!(
        start = %plan.start,
        goal = plan.goal().map(|n| n.id.as_str()).unwrap_or_default(),
        hops = plan.hop_count(),
        distance = plan.distance,
        "route computed successfully"
    );

    Json(SafeRouteResponse::from(plan)).into_response()
}

/// Handle `GET /api/v1/markers`.
pub async fn markers_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<MarkersQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
                .into_response();
        }
    };

    if let Err(problem) = query.validate(request_id.as_str()) {
        return (*problem).into_response();
    }

    let categories = query.categories().unwrap_or_default();
    let markers = list_landmarks(state.graph(), &categories);
    record_nodes_located("markers", markers.len());
    info!(categories = ?categories, count = markers.len(), "markers listed");

    Json(MarkersResponse::from(markers)).into_response()
}

/// Handle `GET /api/v1/nearest`.
pub async fn nearest_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
                .into_response();
        }
    };

    if let Err(problem) = query.validate(request_id.as_str()) {
        return (*problem).into_response();
    }

    if state.graph().is_empty() {
        return from_lib_error(&venueroute_lib::Error::EmptyGraph, request_id.as_str())
            .into_response();
    }

    let nodes = nearest_nodes(state.graph(), query.point(), &query.to_lib_query());
    record_nodes_located("nearest", nodes.len());
    info!(
        lat = query.lat,
        lng = query.lng,
        limit = query.limit,
        count = nodes.len(),
        "nearest nodes located"
    );

    Json(NearestResponse::from(nodes)).into_response()
}
