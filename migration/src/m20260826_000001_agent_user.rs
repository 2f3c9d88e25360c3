use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AgentUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AgentUser::Id))
                    .col(string_uniq(AgentUser::Email))
                    .col(string(AgentUser::Name))
                    .col(string(AgentUser::Password))
                    .col(string(AgentUser::Role))
                    .col(timestamp(AgentUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AgentUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AgentUser {
    Table,
    Id,
    Email,
    Name,
    Password,
    Role,
    CreatedAt,
}
