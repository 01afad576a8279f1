use common::http::RouteError;
use common::make_response;
use hyper::StatusCode;
use serde_json::json;

use crate::graph::GraphError;

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to parse http body: {0}")]
    ParseHttpBody(#[from] hyper::Error),
    #[error("failed to parse json: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Maps a graph error onto the wire contract: a status code plus a stable
/// `code` the caller can branch on. Store failures keep their details out
/// of the response body.
#[track_caller]
pub fn graph_error(err: GraphError) -> RouteError<ApiError> {
    let status = match &err {
        GraphError::SelfFollow | GraphError::InvalidPagination => StatusCode::BAD_REQUEST,
        GraphError::TargetNotFound | GraphError::EdgeNotFound => StatusCode::NOT_FOUND,
        GraphError::DuplicateEdge => StatusCode::CONFLICT,
        GraphError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match &err {
        GraphError::Store(_) => "store unavailable".to_string(),
        _ => err.to_string(),
    };

    let response = make_response!(
        status,
        json!({ "success": false, "code": err.code(), "message": message })
    );

    RouteError::from(response).with_source(Some(ApiError::Graph(err)))
}
