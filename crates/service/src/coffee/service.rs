use std::sync::Arc;

use tracing::{info, instrument};

use models::errors::ModelError;

use super::domain::{encode_recipe, Drink, DrinkPatch, Ingredient, NewDrink, RecipeInput, ShortDrink};
use super::repository::DrinkRepository;
use crate::errors::ServiceError;

pub struct CoffeeService<R: DrinkRepository> {
    repo: Arc<R>,
}

impl<R: DrinkRepository> CoffeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Public menu: colours and proportions only.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<ShortDrink>, ServiceError> {
        Ok(self.repo.list().await?.iter().map(Drink::short).collect())
    }

    #[instrument(skip(self))]
    pub async fn details(&self) -> Result<Vec<Drink>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewDrink) -> Result<Drink, ServiceError> {
        let title = input.title.ok_or_else(|| ModelError::required("title"))?;
        models::drink::validate_title(&title)?;
        let recipe = checked_recipe(input.recipe.ok_or_else(|| ModelError::required("recipe"))?)?;
        let created = self.repo.insert(title, encode_recipe(&recipe)?).await?;
        info!(drink_id = created.id, title = %created.title, "drink_created");
        Ok(created)
    }

    /// Apply the supplied fields; a patch with neither returns the drink unchanged.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: DrinkPatch) -> Result<Drink, ServiceError> {
        if let Some(title) = &patch.title {
            models::drink::validate_title(title)?;
        }
        let recipe = match patch.recipe {
            Some(r) => Some(encode_recipe(&checked_recipe(r)?)?),
            None => None,
        };
        let updated = self
            .repo
            .update(id, patch.title, recipe)
            .await?
            .ok_or_else(|| ServiceError::not_found("drink"))?;
        info!(drink_id = id, "drink_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<i32, ServiceError> {
        if self.repo.find(id).await?.is_none() {
            return Err(ServiceError::not_found("drink"));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("drink"));
        }
        info!(drink_id = id, "drink_deleted");
        Ok(id)
    }
}

fn checked_recipe(input: RecipeInput) -> Result<Vec<Ingredient>, ModelError> {
    let recipe = input.into_vec();
    if recipe.is_empty() {
        return Err(ModelError::Validation("recipe needs at least one ingredient".into()));
    }
    for i in &recipe {
        models::errors::require_text("ingredient name", &i.name)?;
        if i.parts == 0 {
            return Err(ModelError::Validation(format!("ingredient '{}' needs at least one part", i.name)));
        }
    }
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coffee::repository::SeaOrmDrinkRepository;
    use crate::test_support::get_db;

    fn service(db: sea_orm::DatabaseConnection) -> CoffeeService<SeaOrmDrinkRepository> {
        CoffeeService::new(Arc::new(SeaOrmDrinkRepository::new(db)))
    }

    fn water() -> Ingredient {
        Ingredient { name: "water".into(), color: "blue".into(), parts: 1 }
    }

    fn new_drink(title: &str) -> NewDrink {
        NewDrink { title: Some(title.into()), recipe: Some(RecipeInput::One(water())) }
    }

    #[tokio::test]
    async fn created_drink_appears_on_menu() -> anyhow::Result<()> {
        let svc = service(get_db().await?);
        let d = svc.create(new_drink("Water")).await?;
        assert_eq!(d.recipe, vec![water()]);

        let menu = svc.menu().await?;
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].recipe[0].color, "blue");
        assert_eq!(svc.details().await?[0].recipe[0].name, "water");
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_title_is_a_constraint_failure() -> anyhow::Result<()> {
        let svc = service(get_db().await?);
        svc.create(new_drink("Water")).await?;
        let err = svc.create(new_drink("Water")).await.err();
        assert!(matches!(err, Some(ServiceError::Constraint(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_recipe_or_empty_recipe_is_rejected() -> anyhow::Result<()> {
        let svc = service(get_db().await?);
        let no_recipe = NewDrink { title: Some("Air".into()), recipe: None };
        assert!(matches!(svc.create(no_recipe).await, Err(ServiceError::Model(_))));
        let empty = NewDrink { title: Some("Air".into()), recipe: Some(RecipeInput::Many(vec![])) };
        assert!(matches!(svc.create(empty).await, Err(ServiceError::Model(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_supplied_fields() -> anyhow::Result<()> {
        let svc = service(get_db().await?);
        let d = svc.create(new_drink("Water")).await?;

        let renamed = svc.update(d.id, DrinkPatch { title: Some("Still Water".into()), recipe: None }).await?;
        assert_eq!(renamed.title, "Still Water");
        assert_eq!(renamed.recipe, vec![water()]);

        let unchanged = svc.update(d.id, DrinkPatch::default()).await?;
        assert_eq!(unchanged, renamed);

        let missing = svc.update(999, DrinkPatch { title: Some("x".into()), recipe: None }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_delete_again_is_not_found() -> anyhow::Result<()> {
        let svc = service(get_db().await?);
        let d = svc.create(new_drink("Water")).await?;
        assert_eq!(svc.delete(d.id).await?, d.id);
        assert!(matches!(svc.delete(d.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
