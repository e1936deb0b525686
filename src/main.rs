use actix_web::web::{get, post, resource, scope, Data};
use actix_web::HttpServer;
use sqlx::mysql::MySqlPoolOptions;

use cohort::config::DbConfig;
use cohort::handlers;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    std::env::set_var("RUST_LOG", "actix_web=info");
    env_logger::init();
    let config = DbConfig::from_env().expect("invalid database configuration");
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&config.connection_url())
        .await
        .expect("failed to connect to database");
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(pool.clone()))
            .service(resource("/").route(get().to(handlers::application::index)))
            .service(
                scope("applications")
                    .route("", get().to(handlers::application::list))
                    .route("update_status", post().to(handlers::application::update_status))
                    .service(
                        scope("{application_id}")
                            .route("", get().to(handlers::application::detail))
                            .route("update_status", post().to(handlers::application::update_status_in_detail)),
                    ),
            )
            .service(scope("programs").route("", get().to(handlers::program::list)))
    })
    .bind(("0.0.0.0", 8000))?
    .run()
    .await
}
