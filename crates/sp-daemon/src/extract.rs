// extract.rs — Request identity.
//
// Authentication itself lives upstream (a gateway validates credentials
// and stamps the request); the daemon only trusts the `x-user-id`
// header it is handed. Anything without a well-formed user id is a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

pub const USER_HEADER: &str = "x-user-id";

/// The authenticated user for this request.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser(pub Uuid);

impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing x-user-id header"))?;

        let user_id = value
            .parse::<Uuid>()
            .map_err(|_| ApiError::unauthorized("malformed x-user-id header"))?;

        Ok(AuthedUser(user_id))
    }
}
