//! Create `venue`, `artist` and `shows` tables.
//!
//! `shows` joins an artist to a venue at a start time. Its foreign keys are
//! `NO ACTION`: a venue or artist with shows cannot be deleted, and the store
//! reports it as a plain foreign-key violation.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(pk_auto(Venue::Id))
                    .col(string(Venue::Name))
                    .col(string_len(Venue::City, 120))
                    .col(string_len(Venue::State, 120))
                    .col(string_len_null(Venue::Address, 120))
                    .col(string_len_null(Venue::Phone, 120))
                    .col(string_null(Venue::Genres))
                    .col(string_len_null(Venue::ImageLink, 500))
                    .col(string_null(Venue::Website))
                    .col(string_len_null(Venue::FacebookLink, 120))
                    .col(boolean(Venue::SeekingTalent).default(false))
                    .col(string_null(Venue::SeekingDescription))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(pk_auto(Artist::Id))
                    .col(string(Artist::Name))
                    .col(string_len(Artist::City, 120))
                    .col(string_len(Artist::State, 120))
                    .col(string_len_null(Artist::Phone, 120))
                    .col(string_null(Artist::Genres))
                    .col(string_null(Artist::Website))
                    .col(string_len_null(Artist::ImageLink, 500))
                    .col(string_len_null(Artist::FacebookLink, 120))
                    .col(boolean(Artist::SeekingVenue).default(false))
                    .col(string_null(Artist::SeekingDescription))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Shows::Table)
                    .if_not_exists()
                    .col(pk_auto(Shows::Id))
                    .col(integer(Shows::ArtistId))
                    .col(integer(Shows::VenueId))
                    .col(string_len(Shows::StartTime, 32))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shows_artist")
                            .from(Shows::Table, Shows::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shows_venue")
                            .from(Shows::Table, Shows::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Shows::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Artist::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Venue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Venue {
    Table,
    Id,
    Name,
    City,
    State,
    Address,
    Phone,
    Genres,
    ImageLink,
    Website,
    FacebookLink,
    SeekingTalent,
    SeekingDescription,
}

#[derive(DeriveIden)]
enum Artist {
    Table,
    Id,
    Name,
    City,
    State,
    Phone,
    Genres,
    Website,
    ImageLink,
    FacebookLink,
    SeekingVenue,
    SeekingDescription,
}

#[derive(DeriveIden)]
enum Shows { Table, Id, ArtistId, VenueId, StartTime }
