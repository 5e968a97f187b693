use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryFilter, ColumnTrait, Set, SqlErr};

use super::memory_db;
use crate::{artist, category, drink, question, show, venue};

fn venue_am(name: &str, city: &str, state: &str) -> venue::ActiveModel {
    venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        genres: Set(venue::join_genres(&["Jazz".to_string(), "Folk".to_string()])),
        seeking_talent: Set(true),
        ..Default::default()
    }
}

fn artist_am(name: &str) -> artist::ActiveModel {
    artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        seeking_venue: Set(false),
        ..Default::default()
    }
}

#[tokio::test]
async fn venue_artist_show_round_trip() -> Result<()> {
    let db = memory_db().await?;

    let v = venue_am("The Musical Hop", "San Francisco", "CA").insert(&db).await?;
    let a = artist_am("Guns N Petals").insert(&db).await?;
    assert!(v.id > 0);
    assert_eq!(v.genres.as_deref(), Some("Jazz,Folk"));

    let s = show::ActiveModel {
        artist_id: Set(a.id),
        venue_id: Set(v.id),
        start_time: Set("2019-05-21 21:30:00".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let with_artist = show::Entity::find_by_id(s.id)
        .find_also_related(artist::Entity)
        .one(&db)
        .await?
        .expect("show exists");
    assert_eq!(with_artist.1.map(|a| a.name), Some("Guns N Petals".to_string()));

    let venue_shows = v.find_related(show::Entity).all(&db).await?;
    assert_eq!(venue_shows.len(), 1);
    Ok(())
}

#[tokio::test]
async fn show_with_unknown_artist_violates_foreign_key() -> Result<()> {
    let db = memory_db().await?;
    let v = venue_am("Park Square Live", "San Francisco", "CA").insert(&db).await?;

    let err = show::ActiveModel {
        artist_id: Set(9999),
        venue_id: Set(v.id),
        start_time: Set("2035-04-01 20:00:00".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect_err("foreign key must reject unknown artist");
    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn venue_with_shows_cannot_be_deleted() -> Result<()> {
    let db = memory_db().await?;
    let v = venue_am("Dueling Pianos", "New York", "NY").insert(&db).await?;
    let a = artist_am("Matt Quevedo").insert(&db).await?;
    show::ActiveModel {
        artist_id: Set(a.id),
        venue_id: Set(v.id),
        start_time: Set("2019-06-15 23:00:00".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let err = venue::Entity::delete_by_id(v.id).exec(&db).await.expect_err("restricted delete");
    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    assert!(venue::Entity::find_by_id(v.id).one(&db).await?.is_some());

    let err = artist::Entity::delete_by_id(a.id).exec(&db).await.expect_err("restricted delete");
    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn question_requires_existing_category() -> Result<()> {
    let db = memory_db().await?;
    let c = category::ActiveModel { kind: Set("Science".to_string()), ..Default::default() }
        .insert(&db)
        .await?;

    let q = question::ActiveModel {
        question: Set("What is the heaviest organ in the human body?".to_string()),
        answer: Set("The Liver".to_string()),
        category: Set(c.id),
        difficulty: Set(4),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let by_category = question::Entity::find()
        .filter(question::Column::Category.eq(c.id))
        .all(&db)
        .await?;
    assert_eq!(by_category, vec![q]);

    let err = question::ActiveModel {
        question: Set("Orphan?".to_string()),
        answer: Set("Yes".to_string()),
        category: Set(c.id + 100),
        difficulty: Set(1),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect_err("unknown category");
    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn drink_titles_are_unique() -> Result<()> {
    let db = memory_db().await?;
    let recipe = r#"[{"name":"water","color":"blue","parts":1}]"#.to_string();
    drink::ActiveModel { title: Set("Water".to_string()), recipe: Set(recipe.clone()), ..Default::default() }
        .insert(&db)
        .await?;
    let err = drink::ActiveModel { title: Set("Water".to_string()), recipe: Set(recipe), ..Default::default() }
        .insert(&db)
        .await
        .expect_err("duplicate title");
    assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn category_type_column_maps_to_kind() -> Result<()> {
    let db = memory_db().await?;
    category::ActiveModel { kind: Set("Art".to_string()), ..Default::default() }
        .insert(&db)
        .await?;
    let found = category::Entity::find()
        .filter(category::Column::Kind.eq("Art"))
        .one(&db)
        .await?;
    assert_eq!(found.map(|c| c.kind), Some("Art".to_string()));
    Ok(())
}
