//! Shared pieces for the HTTP surfaces: a route error that carries its
//! prepared response, and the routerify error handler that renders it.

use std::fmt::{Debug, Display};
use std::panic::Location;

use hyper::{Body, Response, StatusCode};
use routerify::RequestInfo;
use serde_json::json;

#[macro_export]
macro_rules! make_response {
    ($status:expr, $body:expr) => {
        hyper::Response::builder()
            .status($status)
            .header("Content-Type", "application/json")
            .body(hyper::Body::from($body.to_string()))
            .expect("failed to build response")
    };
}

/// An error produced by a route handler.
///
/// The response to send the caller is decided at the point the error is
/// raised, so the error handler only has to log and unwrap it. The
/// construction site is captured for the log line.
pub struct RouteError<E> {
    source: Option<E>,
    location: &'static Location<'static>,
    span: tracing::Span,
    response: Response<Body>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShouldLog {
    Yes,
    Debug,
    No,
}

impl<E> RouteError<E> {
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn response(self) -> Response<Body> {
        self.response
    }

    /// Server errors are always logged, client errors only when they carry
    /// an underlying source.
    pub fn should_log(&self) -> ShouldLog {
        if self.response.status().is_server_error() {
            ShouldLog::Yes
        } else if self.source.is_some() {
            ShouldLog::Debug
        } else {
            ShouldLog::No
        }
    }

    pub fn with_source(mut self, source: Option<E>) -> Self {
        self.source = source;
        self
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = location;
        self
    }
}

impl<E> From<Response<Body>> for RouteError<E> {
    #[track_caller]
    fn from(response: Response<Body>) -> Self {
        Self {
            source: None,
            location: Location::caller(),
            span: tracing::Span::current(),
            response,
        }
    }
}

impl<E, S: AsRef<str>> From<(StatusCode, S)> for RouteError<E> {
    #[track_caller]
    fn from((status, message): (StatusCode, S)) -> Self {
        Self {
            source: None,
            location: Location::caller(),
            span: tracing::Span::current(),
            response: make_response!(
                status,
                json!({ "success": false, "message": message.as_ref() })
            ),
        }
    }
}

impl<E, S: AsRef<str>, T: Into<E>> From<(StatusCode, S, T)> for RouteError<E> {
    #[track_caller]
    fn from((status, message, source): (StatusCode, S, T)) -> Self {
        Self {
            source: Some(source.into()),
            location: Location::caller(),
            span: tracing::Span::current(),
            response: make_response!(
                status,
                json!({ "success": false, "message": message.as_ref() })
            ),
        }
    }
}

impl<E: Debug> Debug for RouteError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(err) => write!(f, "RouteError: {:?}", err),
            None => write!(f, "RouteError: {}", self.response.status()),
        }
    }
}

impl<E: Display> Display for RouteError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(err) => write!(f, "RouteError: {}", err),
            None => write!(f, "RouteError: {}", self.response.status()),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RouteError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|err| err as _)
    }
}

/// The routerify error handler, logs the error in the span it was raised
/// in and returns the prepared response.
pub async fn error_handler<E: std::error::Error + 'static>(
    err: Box<dyn std::error::Error + Send + Sync + 'static>,
    info: RequestInfo,
) -> Response<Body> {
    match err.downcast::<RouteError<E>>() {
        Ok(err) => {
            let location = err.location();

            err.span().in_scope(|| match err.should_log() {
                ShouldLog::Yes => {
                    tracing::error!(path = %info.uri(), method = %info.method(), location = location.to_string(), error = ?err, "http error")
                }
                ShouldLog::Debug => {
                    tracing::debug!(path = %info.uri(), method = %info.method(), location = location.to_string(), error = ?err, "http error")
                }
                ShouldLog::No => (),
            });

            err.response()
        }
        Err(err) => {
            tracing::error!(path = %info.uri(), method = %info.method(), error = ?err, "unhandled http error");
            make_response!(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "message": "internal server error" })
            )
        }
    }
}

pub mod ext {
    use std::panic::Location;
    use std::sync::{Arc, Weak};

    use hyper::StatusCode;

    use super::RouteError;

    pub trait ResultExt<T, E, E2>: Sized {
        /// Replaces the error with `ctx`, keeping the original as the
        /// logged source.
        fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
        where
            RouteError<E2>: From<C>,
            E2: From<E>;

        /// Replaces the error with `ctx`, discarding the original.
        fn map_ignore_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
        where
            RouteError<E2>: From<C>;
    }

    impl<T, E, E2> ResultExt<T, E, E2> for Result<T, E> {
        #[track_caller]
        fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
        where
            RouteError<E2>: From<C>,
            E2: From<E>,
        {
            match self {
                Ok(val) => Ok(val),
                Err(err) => Err(RouteError::from(ctx)
                    .with_source(Some(err.into()))
                    .with_location(Location::caller())),
            }
        }

        #[track_caller]
        fn map_ignore_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
        where
            RouteError<E2>: From<C>,
        {
            match self {
                Ok(val) => Ok(val),
                Err(_) => Err(RouteError::from(ctx).with_location(Location::caller())),
            }
        }
    }

    pub trait OptionExt<T, E>: Sized {
        fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E>>
        where
            RouteError<E>: From<C>;
    }

    impl<T, E> OptionExt<T, E> for Option<T> {
        #[track_caller]
        fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E>>
        where
            RouteError<E>: From<C>,
        {
            match self {
                Some(val) => Ok(val),
                None => Err(RouteError::from(ctx).with_location(Location::caller())),
            }
        }
    }

    pub trait RequestGlobalExt<E> {
        /// Upgrades the weak global state reference attached to the
        /// router. The reference is weak so open keep-alive connections do
        /// not hold the process alive during shutdown.
        fn get_global<G: Send + Sync + 'static>(&self) -> Result<Arc<G>, RouteError<E>>;
    }

    impl<E, B> RequestGlobalExt<E> for hyper::Request<B>
    where
        Self: routerify::ext::RequestExt,
    {
        fn get_global<G: Send + Sync + 'static>(&self) -> Result<Arc<G>, RouteError<E>> {
            use routerify::ext::RequestExt;

            Ok(self
                .data::<Weak<G>>()
                .expect("global state not set")
                .upgrade()
                .ok_or((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to upgrade global state",
                ))?)
        }
    }
}
