//! HTTP transport for the sso service.
//!
//! Mounts the auth routes and a database health probe on an actix-web
//! server. Every auth request runs under the configured timeout.
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use sso_auth::Service;
use sso_auth::Timeout;
use sso_core::Server;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Serves until the process receives a shutdown signal.
#[rustfmt::skip]
pub async fn run(server: &Server, service: Service, client: Arc<Client>) -> Result<(), std::io::Error> {
    let service = web::Data::new(service);
    let timeout = web::Data::new(Timeout(server.timeout));
    let client = web::Data::new(client);
    log::info!("starting sso server on {}:{}", server.host, server.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .app_data(service.clone())
            .app_data(timeout.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .configure(sso_auth::routes)
    })
    .workers(server.workers)
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
