use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DietStore, Meal, MealInput, MealOrder, NewUser, User};

/// Vec-backed store; rows keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    meals: RwLock<Vec<Meal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DietStore for MemoryStore {
    async fn create_user(&self, new: NewUser) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            session_id: new.session_id,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.session_id == session_id).cloned())
    }

    async fn create_meal(&self, user_id: Uuid, input: MealInput) -> anyhow::Result<Meal> {
        let now = OffsetDateTime::now_utc();
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id,
            name: input.name,
            description: input.description,
            date_time: input.date_time,
            is_on_diet: input.is_on_diet,
            created_at: now,
            updated_at: now,
        };
        self.meals.write().await.push(meal.clone());
        Ok(meal)
    }

    async fn list_meals(&self, user_id: Uuid, order: MealOrder) -> anyhow::Result<Vec<Meal>> {
        let mut rows: Vec<Meal> = self
            .meals
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        if order == MealOrder::NewestFirst {
            rows.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        }
        Ok(rows)
    }

    async fn find_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let meals = self.meals.read().await;
        Ok(meals
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }

    async fn update_meal(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        input: MealInput,
    ) -> anyhow::Result<Option<Meal>> {
        let mut meals = self.meals.write().await;
        let Some(meal) = meals
            .iter_mut()
            .find(|m| m.id == meal_id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        meal.name = input.name;
        meal.description = input.description;
        meal.date_time = input.date_time;
        meal.is_on_diet = input.is_on_diet;
        meal.updated_at = OffsetDateTime::now_utc();
        Ok(Some(meal.clone()))
    }

    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut meals = self.meals.write().await;
        let before = meals.len();
        meals.retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(meals.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn input(name: &str, date_time: OffsetDateTime, is_on_diet: bool) -> MealInput {
        MealInput {
            name: name.into(),
            description: String::new(),
            date_time,
            is_on_diet,
        }
    }

    async fn user(store: &MemoryStore, session: &str) -> User {
        store
            .create_user(NewUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                session_id: session.into(),
            })
            .await
            .expect("create user")
    }

    #[tokio::test]
    async fn first_registered_user_wins_for_shared_session() {
        let store = MemoryStore::new();
        let first = user(&store, "shared").await;
        let _second = user(&store, "shared").await;

        let found = store.find_user_by_session("shared").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(first.id));
        assert!(store.find_user_by_session("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_orders_by_requested_order() {
        let store = MemoryStore::new();
        let u = user(&store, "s").await;
        store
            .create_meal(u.id, input("breakfast", datetime!(2024-01-01 08:00 UTC), true))
            .await
            .unwrap();
        store
            .create_meal(u.id, input("dinner", datetime!(2024-01-01 20:00 UTC), false))
            .await
            .unwrap();
        store
            .create_meal(u.id, input("lunch", datetime!(2024-01-01 12:00 UTC), true))
            .await
            .unwrap();

        let newest: Vec<String> = store
            .list_meals(u.id, MealOrder::NewestFirst)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(newest, ["dinner", "lunch", "breakfast"]);

        let inserted: Vec<String> = store
            .list_meals(u.id, MealOrder::Inserted)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(inserted, ["breakfast", "dinner", "lunch"]);
    }

    #[tokio::test]
    async fn update_and_delete_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let owner = user(&store, "a").await;
        let other = user(&store, "b").await;
        let meal = store
            .create_meal(owner.id, input("salad", datetime!(2024-02-02 12:00 UTC), true))
            .await
            .unwrap();

        let updated = store
            .update_meal(other.id, meal.id, input("pizza", meal.date_time, false))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!store.delete_meal(other.id, meal.id).await.unwrap());

        let updated = store
            .update_meal(owner.id, meal.id, input("bowl", meal.date_time, false))
            .await
            .unwrap()
            .expect("owner can update");
        assert_eq!(updated.name, "bowl");
        assert!(!updated.is_on_diet);
        assert!(updated.updated_at >= meal.updated_at);

        assert!(store.delete_meal(owner.id, meal.id).await.unwrap());
        assert!(store.find_meal(owner.id, meal.id).await.unwrap().is_none());
    }
}
