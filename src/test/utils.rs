#[cfg(test)]
pub mod test_utils {
    use crate::database;
    use crate::db::{create_achievement, create_athlete};
    use crate::env::DatabaseSettings;
    use crate::error::AppError;
    use crate::init_rocket;
    use crate::models::{NewAchievement, NewAthlete};
    use chrono::NaiveDate;
    use rocket::local::asynchronous::Client;
    use sqlx::{Pool, Sqlite};
    use std::collections::HashMap;
    use std::sync::Once;
    use tracing::log::LevelFilter;

    static INIT: Once = Once::new();

    #[derive(Default)]
    pub struct TestDbBuilder {
        athletes: Vec<TestAthlete>,
        achievements: Vec<TestAchievement>,
    }

    pub struct TestAthlete {
        pub name: String,
        pub country: String,
    }

    pub struct TestAchievement {
        pub athlete_name: String,
        pub sport: String,
        pub result: String,
        pub date: NaiveDate,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn athlete(mut self, name: &str, country: &str) -> Self {
            self.athletes.push(TestAthlete {
                name: name.to_string(),
                country: country.to_string(),
            });
            self
        }

        pub fn achievement(
            mut self,
            athlete_name: &str,
            sport: &str,
            result: &str,
            date: &str,
        ) -> Self {
            self.achievements.push(TestAchievement {
                athlete_name: athlete_name.to_string(),
                sport: sport.to_string(),
                result: result.to_string(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid test date"),
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .filter_level(LevelFilter::Debug)
                    .is_test(true)
                    .try_init();
            });

            // A single connection keeps every query on the same in-memory database.
            let pool = database::connect(&DatabaseSettings {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            })
            .await?;

            let mut athlete_id_map: HashMap<String, i64> = HashMap::new();
            let mut achievement_ids: Vec<i64> = Vec::new();

            for athlete in &self.athletes {
                let created = create_athlete(
                    &pool,
                    &NewAthlete {
                        name: athlete.name.clone(),
                        country: athlete.country.clone(),
                    },
                )
                .await?;

                athlete_id_map.insert(athlete.name.clone(), created.id);
            }

            for achievement in &self.achievements {
                let athlete_id = athlete_id_map
                    .get(&achievement.athlete_name)
                    .copied()
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "Test athlete {} was never added",
                            achievement.athlete_name
                        ))
                    })?;

                let created = create_achievement(
                    &pool,
                    &NewAchievement {
                        sport: achievement.sport.clone(),
                        result: achievement.result.clone(),
                        date: achievement.date,
                        athlete_id,
                    },
                )
                .await?;

                achievement_ids.push(created.id);
            }

            Ok(TestDb {
                pool,
                athlete_id_map,
                achievement_ids,
            })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub athlete_id_map: HashMap<String, i64>,
        pub achievement_ids: Vec<i64>,
    }

    impl TestDb {
        pub fn athlete_id(&self, name: &str) -> Option<i64> {
            self.athlete_id_map.get(name).copied()
        }

        pub async fn achievement_count(&self) -> Result<i64, sqlx::Error> {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM achievements")
                .fetch_one(&self.pool)
                .await
        }
    }

    /// Two athletes, three achievements; Alice owns two of them.
    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .athlete("Alice", "US")
            .athlete("Bob", "KE")
            .achievement("Alice", "Run", "9.58s", "2024-01-01")
            .achievement("Alice", "Long Jump", "8.95m", "2024-02-15")
            .achievement("Bob", "Marathon", "2:01:09", "2024-03-10")
            .build()
            .await
            .expect("Failed to build test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let client = Client::tracked(init_rocket(test_db.pool.clone()))
            .await
            .expect("Failed to build rocket client");

        (client, test_db)
    }
}
