use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use url::Url;

use super::request_id::REQUEST_ID_HEADER;

/// Allows browsers on the given origins to call the API.
///
/// Without any origins the router is returned unchanged, i.e. only same
/// origin requests are possible.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>, origins: &[Url]) -> Router<S> {
    let origins = origins
        .iter()
        .filter_map(|url| {
            let origin = url.origin().ascii_serialization();
            HeaderValue::from_str(&origin)
                .inspect_err(|err| warn!("Ignoring invalid cors origin {origin:?}: {err}"))
                .ok()
        })
        .collect::<Vec<_>>();

    if origins.is_empty() {
        return router;
    }

    router.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .expose_headers([REQUEST_ID_HEADER]),
    )
}
