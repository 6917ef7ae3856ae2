pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub session_id: String,
    pub created_at: OffsetDateTime,
}

/// Meal record, serialized with the column names of the `meals` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub is_on_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub session_id: String,
}

/// Writable fields of a meal, shared by create and update.
#[derive(Debug, Clone)]
pub struct MealInput {
    pub name: String,
    pub description: String,
    pub date_time: OffsetDateTime,
    pub is_on_diet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealOrder {
    /// `date_time` descending.
    NewestFirst,
    /// Order the rows were created in.
    Inserted,
}

#[async_trait]
pub trait DietStore: Send + Sync {
    async fn create_user(&self, new: NewUser) -> anyhow::Result<User>;

    /// First user registered under `session_id`, if any.
    async fn find_user_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>>;

    async fn create_meal(&self, user_id: Uuid, input: MealInput) -> anyhow::Result<Meal>;

    async fn list_meals(&self, user_id: Uuid, order: MealOrder) -> anyhow::Result<Vec<Meal>>;

    async fn find_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>>;

    /// Returns `None` when no meal matches `(meal_id, user_id)`.
    async fn update_meal(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        input: MealInput,
    ) -> anyhow::Result<Option<Meal>>;

    /// Returns whether a row was deleted.
    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn meal_serializes_table_columns_only() {
        let at = datetime!(2024-05-01 8:00 UTC);
        let meal = Meal {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            name: "Oats".into(),
            description: "plain".into(),
            date_time: at,
            is_on_diet: true,
            created_at: at,
            updated_at: at,
        };
        let json = serde_json::to_value(&meal).unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "created_at",
                "date_time",
                "description",
                "id",
                "is_on_diet",
                "name",
                "updated_at",
                "user_id"
            ]
        );
        assert_eq!(json["date_time"], "2024-05-01T08:00:00Z");
    }
}
