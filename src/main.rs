#[macro_use]
extern crate rocket;

mod api;
mod database;
mod db;
mod env;
mod error;
mod models;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;

use api::{
    api_create_achievement, api_create_athlete, api_delete_achievement, api_delete_athlete,
    api_get_achievements, api_get_athlete_achievements, api_get_athletes, health,
};
use env::{DatabaseSettings, load_environment};
use error::AppError;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use sqlx::SqlitePool;
use telemetry::{TelemetryFairing, init_tracing, shutdown_telemetry};
use thiserror::Error;
use tracing::info;
use validation::default_catcher;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Rocket(#[from] rocket::Error),
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    let environment = load_environment()
        .map_err(|e| anyhow::anyhow!("Failed to load environment: {}", e))?;
    init_tracing();
    environment.log();

    let settings = DatabaseSettings::from_env()?;
    let pool = database::connect(&settings).await?;

    let _rocket = init_rocket(pool).launch().await?;

    Ok(())
}

pub fn init_rocket(pool: SqlitePool) -> Rocket<Build> {
    info!("Starting athlete records service");

    rocket::build()
        .manage(pool)
        .mount(
            "/",
            routes![
                api_get_athletes,
                api_create_athlete,
                api_get_athlete_achievements,
                api_delete_athlete,
                api_get_achievements,
                api_create_achievement,
                api_delete_achievement,
                health,
            ],
        )
        .register("/", catchers![default_catcher])
        .attach(TelemetryFairing)
        .attach(AdHoc::on_shutdown("Telemetry shutdown", |_| {
            Box::pin(async move { shutdown_telemetry() })
        }))
}
