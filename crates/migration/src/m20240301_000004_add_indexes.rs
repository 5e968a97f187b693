use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Venue listing groups by (city, state)
        manager
            .create_index(
                Index::create()
                    .name("idx_venue_area")
                    .table(Venue::Table)
                    .col(Venue::City)
                    .col(Venue::State)
                    .to_owned(),
            )
            .await?;

        // Show lookups from either side of the join
        manager
            .create_index(
                Index::create()
                    .name("idx_shows_venue")
                    .table(Shows::Table)
                    .col(Shows::VenueId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_shows_artist")
                    .table(Shows::Table)
                    .col(Shows::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Questions by category
        manager
            .create_index(
                Index::create()
                    .name("idx_question_category")
                    .table(Question::Table)
                    .col(Question::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_venue_area").table(Venue::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shows_venue").table(Shows::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shows_artist").table(Shows::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_question_category").table(Question::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Venue { Table, City, State }

#[derive(DeriveIden)]
enum Shows { Table, VenueId, ArtistId }

#[derive(DeriveIden)]
enum Question { Table, Category }
