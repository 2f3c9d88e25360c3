pub use sea_orm_migration::prelude::*;

mod m20260826_000001_agent_user;
mod m20260826_000002_listing;
mod m20260826_000003_inquiry;
mod m20260826_000004_favorite;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260826_000001_agent_user::Migration),
            Box::new(m20260826_000002_listing::Migration),
            Box::new(m20260826_000003_inquiry::Migration),
            Box::new(m20260826_000004_favorite::Migration),
        ]
    }
}
