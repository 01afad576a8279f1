use std::sync::Arc;

use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::Router;
use serde_json::json;

use super::super::error::{graph_error, ApiError, Result};
use super::super::ext::RequestExt as _;
use super::{param_id, PageQuery};
use crate::global::GlobalState;

async fn feed(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let user_id = param_id(&req, "user_id")?;
    let page = PageQuery::page(&req)?;

    let posts = global
        .feed
        .feed_for(user_id, page)
        .await
        .map_err(graph_error)?;
    let count = posts.len();

    Ok(make_response!(
        StatusCode::OK,
        json!({ "data": posts, "count": count })
    ))
}

pub fn routes(_global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    Router::builder()
        .get("/:user_id", feed)
        .build()
        .expect("failed to build router")
}
