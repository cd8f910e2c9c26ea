//! Request extractors.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Header carrying the authenticated merchant's shop domain.
///
/// Session handling lives in front of this service; by the time a request
/// arrives here the platform gateway has verified it and stamped the shop
/// it belongs to.
pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";

/// Extractor for the requesting shop's domain.
#[derive(Debug, Clone)]
pub struct ShopDomain(pub String);

impl<S> FromRequestParts<S> for ShopDomain
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let shop = parts
            .headers
            .get(SHOP_DOMAIN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|shop| !shop.is_empty());

        match shop {
            Some(shop) => Ok(Self(shop.to_string())),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "missing_shop",
                    "message": "X-Shopify-Shop-Domain header is required"
                })),
            )
                .into_response()),
        }
    }
}
