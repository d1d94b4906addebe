use std::io;

use actix_web::{
    self,
    error::{JsonPayloadError, PathError},
    middleware::Logger,
    web, App, HttpRequest, HttpServer,
};
use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::Pool;

use crate::models::{
    self,
    session::{PgStore, Store},
};

use super::{admin_handler, errors::TodoApiError, middlewares::auth::ResolveIdentity, user_handler};

pub struct ServerSettings {
    pub bind: String,
    pub workers: usize,
    pub database_url: String,
}

/// Registers the admin and user route groups for a store type
pub fn configure<S: Store>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(reject_path))
        .app_data(web::JsonConfig::default().error_handler(reject_json))
        .service(
            web::scope("/admin")
                .wrap(ResolveIdentity)
                .route("/todo", web::get().to(admin_handler::list_todos::<S>))
                .route(
                    "/todo/{todo_id}",
                    web::delete().to(admin_handler::delete_todo::<S>),
                ),
        )
        .service(
            web::scope("/user")
                .wrap(ResolveIdentity)
                .route("", web::get().to(user_handler::get_user::<S>))
                .route("/", web::get().to(user_handler::get_user::<S>))
                .route(
                    "/password",
                    web::put().to(user_handler::change_password::<S>),
                ),
        );
}

fn reject_path(err: PathError, _: &HttpRequest) -> actix_web::Error {
    TodoApiError::Validation(err.to_string()).into()
}

fn reject_json(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    TodoApiError::Validation(err.to_string()).into()
}

#[actix_web::main]
pub async fn start_server(settings: ServerSettings) -> io::Result<()> {
    let manager = ConnectionManager::<PgConnection>::new(settings.database_url);

    let pool: models::Pool = Pool::builder().build(manager).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to connect to PG database: {}", e),
        )
    })?;

    let store = web::Data::new(PgStore::new(pool));

    log::info!(
        "Starting server on {} with {} worker(s)",
        settings.bind,
        settings.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(configure::<PgStore>)
    })
    .workers(settings.workers)
    .bind(settings.bind.as_str())?
    .run()
    .await
}
