use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260826_000002_listing::Listing;

static FK_INQUIRY_LISTING_ID: &str = "fk_inquiry_listing_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiry::Table)
                    .if_not_exists()
                    .col(pk_auto(Inquiry::Id))
                    .col(string(Inquiry::Name))
                    .col(string(Inquiry::Email))
                    .col(string_null(Inquiry::Phone))
                    .col(text(Inquiry::Message))
                    .col(integer(Inquiry::ListingId))
                    .col(string(Inquiry::Status).default("NEW"))
                    .col(timestamp(Inquiry::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INQUIRY_LISTING_ID)
                    .from_tbl(Inquiry::Table)
                    .from_col(Inquiry::ListingId)
                    .to_tbl(Listing::Table)
                    .to_col(Listing::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_INQUIRY_LISTING_ID)
                    .table(Inquiry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Inquiry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Inquiry {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Message,
    ListingId,
    Status,
    CreatedAt,
}
