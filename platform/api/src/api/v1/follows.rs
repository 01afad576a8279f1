use std::sync::Arc;

use common::http::ext::ResultExt;
use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::Router;
use serde_json::json;

use super::super::error::{graph_error, ApiError, Result};
use super::super::ext::RequestExt as _;
use crate::global::GlobalState;

#[derive(Debug, serde::Deserialize)]
struct EdgeRequest {
    follower_id: i64,
    following_id: i64,
}

async fn read_edge_request(req: &mut Request<Body>) -> Result<EdgeRequest> {
    let body = hyper::body::to_bytes(req.body_mut())
        .await
        .map_err_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

    serde_json::from_slice(&body).map_err_route((StatusCode::BAD_REQUEST, "body is not valid json"))
}

async fn create_follow(mut req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let edge = read_edge_request(&mut req).await?;

    let follow = global
        .graph
        .follow(edge.follower_id, edge.following_id)
        .await
        .map_err(graph_error)?;

    Ok(make_response!(
        StatusCode::CREATED,
        json!({ "success": true, "follow": follow })
    ))
}

async fn delete_follow(mut req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let edge = read_edge_request(&mut req).await?;

    global
        .graph
        .unfollow(edge.follower_id, edge.following_id)
        .await
        .map_err(graph_error)?;

    Ok(make_response!(StatusCode::OK, json!({ "success": true })))
}

pub fn routes(_global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    Router::builder()
        .post("/", create_follow)
        .delete("/", delete_follow)
        .build()
        .expect("failed to build router")
}
