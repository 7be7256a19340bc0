use rocket::State;
use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::{self, Json};
use sqlx::{Pool, Sqlite};

use crate::db::{
    create_achievement, create_athlete, delete_achievement, delete_athlete, get_achievements,
    get_all_athletes, get_athlete_achievements,
};
use crate::models::{Achievement, Athlete, NewAchievement, NewAthlete};
use crate::validation::{ApiError, AppErrorExt, JsonValidateExt, parse_id_filter};

#[get("/athletes")]
pub async fn api_get_athletes(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Athlete>>, ApiError> {
    let athletes = get_all_athletes(db).await.validate_custom()?;

    Ok(Json(athletes))
}

#[post("/athletes", data = "<athlete>")]
pub async fn api_create_athlete(
    athlete: Result<Json<NewAthlete>, json::Error<'_>>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Athlete>>, ApiError> {
    let validated = athlete.validate_custom()?;

    let athlete = create_athlete(db, &validated).await.validate_custom()?;

    Ok(Created::new(format!("/athletes/{}", athlete.id)).body(Json(athlete)))
}

#[get("/athletes/<id>/achievements")]
pub async fn api_get_athlete_achievements(
    id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    let achievements = get_athlete_achievements(db, id).await.validate_custom()?;

    Ok(Json(achievements))
}

#[delete("/athletes/<id>")]
pub async fn api_delete_athlete(id: i64, db: &State<Pool<Sqlite>>) -> Result<Status, ApiError> {
    delete_athlete(db, id).await.validate_custom()?;

    Ok(Status::NoContent)
}

#[get("/achievements?<athlete_id>")]
pub async fn api_get_achievements(
    athlete_id: Option<&str>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    let athlete_id = parse_id_filter("athlete_id", athlete_id).validate_custom()?;

    let achievements = get_achievements(db, athlete_id).await.validate_custom()?;

    Ok(Json(achievements))
}

#[post("/achievements", data = "<achievement>")]
pub async fn api_create_achievement(
    achievement: Result<Json<NewAchievement>, json::Error<'_>>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Achievement>>, ApiError> {
    let validated = achievement.validate_custom()?;

    let achievement = create_achievement(db, &validated).await.validate_custom()?;

    Ok(Created::new(format!("/achievements/{}", achievement.id)).body(Json(achievement)))
}

#[delete("/achievements/<id>")]
pub async fn api_delete_achievement(
    id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, ApiError> {
    delete_achievement(db, id).await.validate_custom()?;

    Ok(Status::NoContent)
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
