use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;
use uuid::Uuid;

use super::{DietStore, Meal, MealInput, MealOrder, NewUser, User};
use crate::config::AppConfig;

const MEAL_COLUMNS: &str =
    "id, user_id, name, description, date_time, is_on_diet, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl DietStore for PgStore {
    async fn create_user(&self, new: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, session_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, session_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.session_id)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    async fn find_user_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, session_id, created_at
            FROM users
            WHERE session_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await
        .context("find user by session")?;
        Ok(user)
    }

    async fn create_meal(&self, user_id: Uuid, input: MealInput) -> anyhow::Result<Meal> {
        let sql = format!(
            "INSERT INTO meals (id, user_id, name, description, date_time, is_on_diet) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MEAL_COLUMNS}"
        );
        let meal = sqlx::query_as::<_, Meal>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.date_time)
            .bind(input.is_on_diet)
            .fetch_one(&self.db)
            .await
            .context("insert meal")?;
        Ok(meal)
    }

    async fn list_meals(&self, user_id: Uuid, order: MealOrder) -> anyhow::Result<Vec<Meal>> {
        let order_by = match order {
            MealOrder::NewestFirst => "date_time DESC",
            MealOrder::Inserted => "created_at ASC, id ASC",
        };
        let sql = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = $1 ORDER BY {order_by}");
        let rows = sqlx::query_as::<_, Meal>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .context("list meals")?;
        debug!(%user_id, count = rows.len(), "meals listed");
        Ok(rows)
    }

    async fn find_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let sql = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2");
        let meal = sqlx::query_as::<_, Meal>(&sql)
            .bind(meal_id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .context("find meal")?;
        Ok(meal)
    }

    async fn update_meal(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        input: MealInput,
    ) -> anyhow::Result<Option<Meal>> {
        let sql = format!(
            "UPDATE meals \
             SET name = $3, description = $4, date_time = $5, is_on_diet = $6, updated_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {MEAL_COLUMNS}"
        );
        let meal = sqlx::query_as::<_, Meal>(&sql)
            .bind(meal_id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.date_time)
            .bind(input.is_on_diet)
            .fetch_optional(&self.db)
            .await
            .context("update meal")?;
        Ok(meal)
    }

    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(result.rows_affected() > 0)
    }
}
