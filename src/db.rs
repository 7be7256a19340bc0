use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};
use validator::Validate;

use crate::error::AppError;
use crate::models::{Achievement, Athlete, NewAchievement, NewAthlete};

#[instrument(skip(pool))]
pub async fn get_all_athletes(pool: &Pool<Sqlite>) -> Result<Vec<Athlete>, AppError> {
    info!("Getting all athletes");

    let athletes =
        sqlx::query_as::<_, Athlete>("SELECT id, name, country FROM athletes ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(athletes)
}

#[instrument(skip(pool))]
pub async fn get_athlete(pool: &Pool<Sqlite>, athlete_id: i64) -> Result<Athlete, AppError> {
    let row = sqlx::query_as::<_, Athlete>("SELECT id, name, country FROM athletes WHERE id = ?")
        .bind(athlete_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(athlete) => Ok(athlete),
        _ => Err(AppError::NotFound("Athlete not found".to_string())),
    }
}

#[instrument(skip(pool))]
pub async fn create_athlete(
    pool: &Pool<Sqlite>,
    athlete: &NewAthlete,
) -> Result<Athlete, AppError> {
    info!("Creating athlete");
    athlete.validate()?;

    let res = sqlx::query("INSERT INTO athletes (name, country) VALUES (?, ?)")
        .bind(&athlete.name)
        .bind(&athlete.country)
        .execute(pool)
        .await?;

    Ok(Athlete {
        id: res.last_insert_rowid(),
        name: athlete.name.clone(),
        country: athlete.country.clone(),
    })
}

/// Deletes the athlete; the foreign key cascade removes its achievements.
#[instrument(skip(pool))]
pub async fn delete_athlete(pool: &Pool<Sqlite>, athlete_id: i64) -> Result<(), AppError> {
    info!("Deleting athlete");

    let res = sqlx::query("DELETE FROM athletes WHERE id = ?")
        .bind(athlete_id)
        .execute(pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Athlete not found".to_string()));
    }

    Ok(())
}

#[instrument(skip(pool))]
pub async fn get_athlete_achievements(
    pool: &Pool<Sqlite>,
    athlete_id: i64,
) -> Result<Vec<Achievement>, AppError> {
    info!("Getting achievements for athlete");
    get_athlete(pool, athlete_id).await?;

    get_achievements(pool, Some(athlete_id)).await
}

#[instrument(skip(pool))]
pub async fn get_achievements(
    pool: &Pool<Sqlite>,
    athlete_id: Option<i64>,
) -> Result<Vec<Achievement>, AppError> {
    info!("Getting achievements");

    let rows = match athlete_id {
        Some(athlete_id) => {
            sqlx::query_as::<_, Achievement>(
                "SELECT id, sport, result, date, athlete_id FROM achievements
                 WHERE athlete_id = ? ORDER BY id",
            )
            .bind(athlete_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Achievement>(
                "SELECT id, sport, result, date, athlete_id FROM achievements ORDER BY id",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Inserts an achievement after checking, in the same transaction, that its
/// athlete still exists.
#[instrument(skip(pool))]
pub async fn create_achievement(
    pool: &Pool<Sqlite>,
    achievement: &NewAchievement,
) -> Result<Achievement, AppError> {
    info!("Creating achievement");
    achievement.validate()?;

    let mut tx = pool.begin().await?;

    let athlete = sqlx::query_scalar::<_, i64>("SELECT id FROM athletes WHERE id = ?")
        .bind(achievement.athlete_id)
        .fetch_optional(&mut *tx)
        .await?;

    if athlete.is_none() {
        return Err(AppError::NotFound("Athlete not found".to_string()));
    }

    let res = sqlx::query(
        "INSERT INTO achievements (sport, result, date, athlete_id) VALUES (?, ?, ?, ?)",
    )
    .bind(&achievement.sport)
    .bind(&achievement.result)
    .bind(achievement.date)
    .bind(achievement.athlete_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Achievement {
        id: res.last_insert_rowid(),
        sport: achievement.sport.clone(),
        result: achievement.result.clone(),
        date: achievement.date,
        athlete_id: achievement.athlete_id,
    })
}

#[instrument(skip(pool))]
pub async fn delete_achievement(pool: &Pool<Sqlite>, achievement_id: i64) -> Result<(), AppError> {
    info!("Deleting achievement");

    let res = sqlx::query("DELETE FROM achievements WHERE id = ?")
        .bind(achievement_id)
        .execute(pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Achievement not found".to_string()));
    }

    Ok(())
}
