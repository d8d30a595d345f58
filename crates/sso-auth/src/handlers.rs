use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use sso_core::ID;
use std::time::Duration;

/// Deadline applied to every request handed to the auth core.
#[derive(Debug, Clone, Copy)]
pub struct Timeout(pub Duration);

/// Mounts the auth endpoints under `/auth`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/is-admin", web::post().to(is_admin)),
    );
}

pub async fn register(
    service: web::Data<Service>,
    timeout: web::Data<Timeout>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(e) = Validation::register(&req) {
        log::info!("[register] invalid request: {}", e);
        return HttpResponse::BadRequest().body(e);
    }
    let req = req.into_inner();
    let ref ctx = Context::with_timeout(timeout.0);
    let params = Register {
        email: req.email,
        password: req.password,
    };
    match service.register(ctx, params).await {
        Ok(id) => HttpResponse::Ok().json(RegisterResponse {
            user_id: id.inner(),
        }),
        Err(e) => reject("register", e),
    }
}

pub async fn login(
    service: web::Data<Service>,
    timeout: web::Data<Timeout>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    if let Err(e) = Validation::login(&req) {
        log::info!("[login] invalid request: {}", e);
        return HttpResponse::BadRequest().body(e);
    }
    let req = req.into_inner();
    let ref ctx = Context::with_timeout(timeout.0);
    let params = Login {
        email: req.email,
        password: req.password,
        app: ID::from(req.app_id),
    };
    match service.login(ctx, params).await {
        Ok(token) => HttpResponse::Ok().json(LoginResponse { token }),
        Err(e) => reject("login", e),
    }
}

pub async fn is_admin(
    service: web::Data<Service>,
    timeout: web::Data<Timeout>,
    req: web::Json<IsAdminRequest>,
) -> impl Responder {
    if let Err(e) = Validation::is_admin(&req) {
        log::info!("[is_admin] invalid request: {}", e);
        return HttpResponse::BadRequest().body(e);
    }
    let ref ctx = Context::with_timeout(timeout.0);
    let params = IsAdmin {
        user: ID::from(req.user_id),
    };
    match service.is_admin(ctx, params).await {
        Ok(is_admin) => HttpResponse::Ok().json(IsAdminResponse { is_admin }),
        Err(e) => reject("is_admin", e),
    }
}

/// Maps core failures to status codes. Internal detail is logged, never sent.
fn reject(method: &str, error: AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidCredentials => {
            log::info!("[{}] invalid credentials", method);
            HttpResponse::Unauthorized().body("invalid credentials")
        }
        AuthError::InvalidAppId => {
            log::info!("[{}] invalid app id", method);
            HttpResponse::BadRequest().body("invalid app id")
        }
        AuthError::InvalidUserId => {
            log::info!("[{}] invalid userId", method);
            HttpResponse::BadRequest().body("invalid userId")
        }
        AuthError::UserAlreadyExists => {
            log::info!("[{}] user already exists", method);
            HttpResponse::Conflict().body("user already exists")
        }
        AuthError::DeadlineExceeded => {
            log::warn!("[{}] deadline exceeded", method);
            HttpResponse::GatewayTimeout().body("deadline exceeded")
        }
        AuthError::Cancelled => {
            log::warn!("[{}] request cancelled", method);
            HttpResponse::ServiceUnavailable().body("request cancelled")
        }
        AuthError::Internal(e) => {
            log::error!("[{}] {:#}", method, e);
            HttpResponse::InternalServerError().body("internal error")
        }
    }
}
