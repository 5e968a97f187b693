use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, TransactionTrait, TryIntoModel};

use models::drink;

use super::domain::Drink;
use crate::errors::ServiceError;

/// Persistence for drinks. Recipes cross this boundary already JSON-encoded.
#[async_trait]
pub trait DrinkRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Drink>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<Drink>, ServiceError>;
    async fn insert(&self, title: String, recipe: String) -> Result<Drink, ServiceError>;
    async fn update(&self, id: i32, title: Option<String>, recipe: Option<String>) -> Result<Option<Drink>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

pub struct SeaOrmDrinkRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmDrinkRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl DrinkRepository for SeaOrmDrinkRepository {
    async fn list(&self) -> Result<Vec<Drink>, ServiceError> {
        drink::Entity::find().all(&self.db).await?.into_iter().map(Drink::try_from).collect()
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, ServiceError> {
        drink::Entity::find_by_id(id).one(&self.db).await?.map(Drink::try_from).transpose()
    }

    async fn insert(&self, title: String, recipe: String) -> Result<Drink, ServiceError> {
        let txn = self.db.begin().await?;
        let created = drink::ActiveModel { title: Set(title), recipe: Set(recipe), ..Default::default() }
            .insert(&txn)
            .await?;
        txn.commit().await?;
        Drink::try_from(created)
    }

    async fn update(&self, id: i32, title: Option<String>, recipe: Option<String>) -> Result<Option<Drink>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(found) = drink::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let mut am = found.into_active_model();
        if let Some(t) = title {
            am.title = Set(t);
        }
        if let Some(r) = recipe {
            am.recipe = Set(r);
        }
        // No changed columns means no UPDATE statement; return the row as is.
        let updated = if am.is_changed() { am.update(&txn).await? } else { am.try_into_model()? };
        txn.commit().await?;
        Drink::try_from(updated).map(Some)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let res = drink::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
