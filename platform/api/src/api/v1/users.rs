use std::sync::Arc;

use common::http::RouteError;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use routerify::Router;
use serde_json::json;

use super::super::error::{graph_error, ApiError, Result};
use super::super::ext::RequestExt as _;
use super::{param_id, PageQuery};
use crate::database::user;
use crate::global::GlobalState;
use crate::graph::GraphError;

/// A user profile: the account summary plus its follow counts.
async fn get_user(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let user_id = param_id(&req, "user_id")?;

    let user = user::by_id(&global.db, user_id)
        .await
        .map_err(|err| graph_error(GraphError::Store(err)))?
        .ok_or_else(|| RouteError::from((StatusCode::NOT_FOUND, "user not found")))?;

    let stats = global.graph.stats(user_id).await.map_err(graph_error)?;

    Ok(make_response!(
        StatusCode::OK,
        json!({
            "id": user.id,
            "username": user.username,
            "display_name": user.display_name,
            "created_at": user.created_at,
            "following": stats.following_count,
            "followers": stats.follower_count,
        })
    ))
}

async fn following(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let user_id = param_id(&req, "user_id")?;
    let page = PageQuery::page(&req)?;

    let users = global
        .graph
        .following(user_id, page)
        .await
        .map_err(graph_error)?;
    let count = users.len();

    Ok(make_response!(
        StatusCode::OK,
        json!({ "data": users, "count": count })
    ))
}

async fn followers(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let user_id = param_id(&req, "user_id")?;
    let page = PageQuery::page(&req)?;

    let users = global
        .graph
        .followers(user_id, page)
        .await
        .map_err(graph_error)?;
    let count = users.len();

    Ok(make_response!(
        StatusCode::OK,
        json!({ "data": users, "count": count })
    ))
}

async fn is_following(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let user_id = param_id(&req, "user_id")?;
    let target_id = param_id(&req, "target_id")?;

    let following = global
        .graph
        .is_following(user_id, target_id)
        .await
        .map_err(graph_error)?;

    Ok(make_response!(
        StatusCode::OK,
        json!({ "following": following })
    ))
}

async fn stats(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let user_id = param_id(&req, "user_id")?;

    let stats = global.graph.stats(user_id).await.map_err(graph_error)?;

    Ok(make_response!(
        StatusCode::OK,
        json!({
            "following": stats.following_count,
            "followers": stats.follower_count,
        })
    ))
}

pub fn routes(_global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    Router::builder()
        .get("/:user_id", get_user)
        .get("/:user_id/following", following)
        .get("/:user_id/followers", followers)
        .get("/:user_id/following/:target_id", is_following)
        .get("/:user_id/stats", stats)
        .build()
        .expect("failed to build router")
}
