use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    Error, HttpMessage, HttpRequest,
};

use crate::{api::error, utils::SessionClaims, ENV};

pub const SESSION_COOKIE: &str = "frame_session";

/// Admin-scope guard: a valid session cookie is required, everything else is 401.
pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let token = match req.cookie(SESSION_COOKIE) {
        Some(c) => c.value().to_string(),
        None => {
            return Err(error::Error::unauthorized("Authentication required").into());
        }
    };

    let claims = SessionClaims::decode(&token, ENV.session_secret.as_ref())
        .map_err(|_| error::Error::unauthorized("Session invalid or expired"))?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_session(req: &HttpRequest) -> Result<SessionClaims, error::Error> {
    let extensions = req.extensions();

    let claims = extensions
        .get::<SessionClaims>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(claims)
}
