use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// Ingredient without its name, as shown on the public menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// A submitted recipe may be a single ingredient or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    One(Ingredient),
    Many(Vec<Ingredient>),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::One(i) => vec![i],
            RecipeInput::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortDrink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| ShortIngredient { color: i.color.clone(), parts: i.parts })
                .collect(),
        }
    }
}

impl TryFrom<models::drink::Model> for Drink {
    type Error = ServiceError;

    fn try_from(m: models::drink::Model) -> Result<Self, Self::Error> {
        let recipe = decode_recipe(&m.recipe)?;
        Ok(Self { id: m.id, title: m.title, recipe })
    }
}

pub fn encode_recipe(recipe: &[Ingredient]) -> Result<String, ServiceError> {
    serde_json::to_string(recipe).map_err(|e| ServiceError::Db(format!("recipe encode: {}", e)))
}

/// Stored recipes are JSON arrays; a single stored object is read as a
/// one-ingredient recipe.
pub fn decode_recipe(stored: &str) -> Result<Vec<Ingredient>, ServiceError> {
    serde_json::from_str::<RecipeInput>(stored)
        .map(RecipeInput::into_vec)
        .map_err(|e| ServiceError::Db(format!("stored recipe is not valid JSON: {}", e)))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDrink {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinkPatch {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}
