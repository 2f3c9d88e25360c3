use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260826_000001_agent_user::AgentUser;

static FK_LISTING_OWNER_ID: &str = "fk_listing_owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listing::Table)
                    .if_not_exists()
                    .col(pk_auto(Listing::Id))
                    .col(string(Listing::Title))
                    .col(text(Listing::Description))
                    .col(big_integer(Listing::Price))
                    .col(string(Listing::Street))
                    .col(string(Listing::City))
                    .col(string(Listing::State))
                    .col(string(Listing::ZipCode))
                    .col(double(Listing::Latitude))
                    .col(double(Listing::Longitude))
                    .col(integer(Listing::Bedrooms))
                    .col(integer(Listing::Bathrooms))
                    .col(integer(Listing::SquareFootage))
                    .col(string(Listing::PropertyType))
                    .col(integer_null(Listing::YearBuilt))
                    .col(text(Listing::Images).default("[]"))
                    .col(text(Listing::Features).default("[]"))
                    .col(string(Listing::Status))
                    .col(string(Listing::ListingType))
                    .col(boolean(Listing::IsPinned).default(false))
                    .col(integer_null(Listing::OwnerId))
                    .col(timestamp(Listing::CreatedAt))
                    .col(timestamp(Listing::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LISTING_OWNER_ID)
                    .from_tbl(Listing::Table)
                    .from_col(Listing::OwnerId)
                    .to_tbl(AgentUser::Table)
                    .to_col(AgentUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LISTING_OWNER_ID)
                    .table(Listing::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Listing::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Listing {
    Table,
    Id,
    Title,
    Description,
    Price,
    Street,
    City,
    State,
    ZipCode,
    Latitude,
    Longitude,
    Bedrooms,
    Bathrooms,
    SquareFootage,
    PropertyType,
    YearBuilt,
    Images,
    Features,
    Status,
    ListingType,
    IsPinned,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
