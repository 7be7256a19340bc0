use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Athlete {
    pub id: i64,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Achievement {
    pub id: i64,
    pub sport: String,
    pub result: String,
    pub date: NaiveDate,
    pub athlete_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAthlete {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Country must be 1 to 100 characters"))]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAchievement {
    #[validate(length(min = 1, max = 100, message = "Sport must be 1 to 100 characters"))]
    pub sport: String,
    #[validate(length(min = 1, max = 100, message = "Result must be 1 to 100 characters"))]
    pub result: String,
    pub date: NaiveDate,
    pub athlete_id: i64,
}
