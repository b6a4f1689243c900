//! Cross-origin policy: a fixed origin allow-list with credentials.

use crate::error::ConfigError;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Credentialed CORS for `origins`, granting any method and any header.
///
/// Browsers reject `*` together with credentials, so methods and headers are
/// granted by echoing what the preflight asks for.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|o| match o.as_str() {
            "*" => Err(ConfigError::InvalidOrigin(o.clone())),
            _ => HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.clone())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
