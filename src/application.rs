use std::{net::TcpListener, time::Duration};

use actix_cors::Cors;
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing_actix_web::TracingLogger;

use foyer_shared::{
    jwt::Jwt,
    settings::{DatabaseSettings, Settings},
};

use crate::routes::{health_check, invitations};

/// Base URL used to compose shareable invitation links.
pub struct ApplicationBaseUrl(pub String);

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, std::io::Error> {
        let db_pool = get_db_pool(&settings.database)
            .await
            .expect("Could not connect to database.");

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .expect("Failed to migrate the database.");

        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );

        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr().unwrap().port();

        let server = run(
            listener,
            db_pool,
            settings.application.base_url,
            settings.application.jwt_secret,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn get_db_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(settings.connect_options())
        .await
}

fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    base_url: String,
    jwt_secret: String,
) -> Result<Server, std::io::Error> {
    let db_pool = Data::new(db_pool);
    let base_url = Data::new(ApplicationBaseUrl(base_url));
    let jwt = Data::new(Jwt::new(jwt_secret));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allow_any_header()
                    .allow_any_method()
                    .allow_any_origin(),
            )
            .app_data(db_pool.clone())
            .app_data(base_url.clone())
            .app_data(jwt.clone())
            .route("/health_check", web::get().to(health_check))
            .route(
                "/invitations/create",
                web::post().to(invitations::create),
            )
            .route(
                "/invitations/list",
                web::get().to(invitations::list),
            )
            .route(
                "/invitations/group/{group_id}",
                web::get().to(invitations::get_for_group),
            )
            .route(
                "/invitations/validate/{token}",
                web::get().to(invitations::validate),
            )
            .route(
                "/invitations/redeem/{token}",
                web::post().to(invitations::redeem),
            )
            .route(
                "/invitations/{id}/revoke",
                web::post().to(invitations::revoke),
            )
            .route(
                "/invitations/{id}",
                web::delete().to(invitations::delete),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
