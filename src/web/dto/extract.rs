//! Request body extraction for the Minimail API.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// An extractor accepting either a flat JSON object or a form-encoded body.
///
/// The browser client posts JSON while the command-line client posts form
/// pairs, so both encodings are in active use. A body that parses as
/// neither yields the type's default, which handlers read as all fields
/// missing.
///
/// # Example
///
/// ```ignore
/// async fn register(
///     LooseBody(req): LooseBody<RegisterRequest>,
/// ) -> Result<Json<ApiStatus>, ApiError> {
///     // req.email / req.password are None when absent
///     // ...
/// }
/// ```
pub struct LooseBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LooseBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = String::from_request(req, state).await.unwrap_or_default();
        Ok(Self(parse_loose(&body)))
    }
}

fn parse_loose<T: DeserializeOwned + Default>(body: &str) -> T {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return T::default();
    }
    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed).unwrap_or_default();
    }
    serde_json::from_value(parse_form_pairs(trimmed)).unwrap_or_default()
}

/// Parse `k=v&k2=v2` pairs into a JSON object of strings.
fn parse_form_pairs(body: &str) -> Value {
    let mut map = serde_json::Map::new();

    for pair in body.split('&') {
        let mut parts = pair.splitn(2, '=');
        let (key, value) = match (parts.next(), parts.next()) {
            (Some(key), Some(value)) => (key, value),
            _ => continue,
        };
        map.insert(
            decode_component(key),
            Value::String(decode_component(value)),
        );
    }

    Value::Object(map)
}

/// Decode one form component; an undecodable component is kept raw.
fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
