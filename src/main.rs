use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing::info;

use issue_tracker::api;
use issue_tracker::configuration::get_configuration;
use issue_tracker::db::init_db_and_migrate;
use issue_tracker::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = get_configuration()?;

    let subscriber = get_subscriber(
        "issue_tracker".into(),
        settings.log_filter.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber)?;

    info!("애플리케이션 시작 중...");

    let db = init_db_and_migrate(&settings.database).await?;
    let db_data = Data::new(db);

    let (host, port) = settings.application.address();
    info!("서버 시작 중: http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(db_data.clone())
            .configure(api::configure)
    })
        .bind((host, port))?
        .run()
        .await?;

    Ok(())
}
