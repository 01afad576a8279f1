use std::sync::Arc;

use common::http::ext::{OptionExt, ResultExt};
use common::http::RouteError;
use hyper::{Body, Request, StatusCode};
use routerify::prelude::RequestExt as _;
use routerify::Router;

use super::error::{ApiError, Result};
use crate::global::GlobalState;
use crate::graph::{DEFAULT_LIMIT, Page};

pub mod feed;
pub mod follows;
pub mod health;
pub mod users;

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    Router::builder()
        .scope("/health", health::routes(global))
        .scope("/follows", follows::routes(global))
        .scope("/users", users::routes(global))
        .scope("/feed", feed::routes(global))
        .build()
        .expect("failed to build router")
}

/// Pulls a path parameter and parses it as an id.
pub fn param_id(req: &Request<Body>, name: &str) -> Result<i64> {
    req.param(name)
        .map_err_route((StatusCode::BAD_REQUEST, format!("missing {}", name)))?
        .parse()
        .map_ignore_err_route((
            StatusCode::BAD_REQUEST,
            format!("{} must be an integer", name),
        ))
}

/// The raw `limit`/`offset` query parameters of a list request. Range
/// validation happens in [`Page::new`], this only parses.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageQuery {
    pub fn new(req: &Request<Body>) -> Result<Self> {
        Ok(req
            .uri()
            .query()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes()).try_fold(
                    PageQuery::default(),
                    |mut acc, (key, value)| {
                        match key.as_ref() {
                            "limit" => {
                                acc.limit = value.parse::<i64>().map_ignore_err_route((
                                    StatusCode::BAD_REQUEST,
                                    format!("invalid limit value: {}", value),
                                ))?;
                            }
                            "offset" => {
                                acc.offset = value.parse::<i64>().map_ignore_err_route((
                                    StatusCode::BAD_REQUEST,
                                    format!("invalid offset value: {}", value),
                                ))?;
                            }
                            _ => {}
                        }

                        Ok::<_, RouteError<ApiError>>(acc)
                    },
                )
            })
            .transpose()?
            .unwrap_or_default())
    }

    /// Parses and validates in one go, the shape every list handler wants.
    pub fn page(req: &Request<Body>) -> Result<Page> {
        let query = Self::new(req)?;

        Page::new(query.limit, query.offset).map_err(super::error::graph_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::new(&request("http://murmur.test/v1/users/1/following")).unwrap();

        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_page_query_parses_both() {
        let query = PageQuery::new(&request(
            "http://murmur.test/v1/users/1/following?limit=5&offset=10",
        ))
        .unwrap();

        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 10);
    }

    #[test]
    fn test_page_query_ignores_unknown_keys() {
        let query = PageQuery::new(&request(
            "http://murmur.test/v1/users/1/following?limit=5&verbose=true",
        ))
        .unwrap();

        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_page_query_rejects_garbage() {
        assert!(PageQuery::new(&request(
            "http://murmur.test/v1/users/1/following?limit=abc"
        ))
        .is_err());
        assert!(PageQuery::new(&request(
            "http://murmur.test/v1/users/1/following?offset=1.5"
        ))
        .is_err());
    }

    #[test]
    fn test_page_query_negative_values_fail_validation() {
        // Negatives parse fine, Page::new is what rejects them.
        let req = request("http://murmur.test/v1/users/1/following?limit=-1");

        assert_eq!(PageQuery::new(&req).unwrap().limit, -1);
        assert!(PageQuery::page(&req).is_err());
    }
}
