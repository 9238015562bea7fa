use actix_web::{get, post, web, HttpRequest};

use crate::api::{error, success::Success};
use crate::middlewares::SESSION_COOKIE;
use crate::modules::auth::{
    model::{AuthStatusBody, LoginModel},
    service::AuthService,
};
use crate::utils::ValidatedJson;

#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    body: ValidatedJson<LoginModel>,
) -> Result<Success<()>, error::Error> {
    let token = service.login(&body.0.username, &body.0.password)?;
    let cookie = service.session_cookie(token);

    Ok(Success::ok(None).message("Login successful").cookies(vec![cookie]))
}

#[post("/logout")]
pub async fn logout(service: web::Data<AuthService>) -> Result<Success<()>, error::Error> {
    Ok(Success::ok(None).message("Logout successful").cookies(vec![service.clear_cookie()]))
}

#[get("/status")]
pub async fn status(
    service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<Success<AuthStatusBody>, error::Error> {
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    let (is_authenticated, username) = service.session_status(token.as_deref());

    Ok(Success::ok(Some(AuthStatusBody { is_authenticated, username })))
}
