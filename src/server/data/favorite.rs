use chrono::Utc;
use entity::{favorite, listing};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder,
};

pub struct FavoriteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteRepository<'a> {
    /// Creates a new instance of [`FavoriteRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the listings a user has favorited, most recently saved first.
    pub async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(favorite::Model, Option<listing::Model>)>, DbErr> {
        entity::prelude::Favorite::find()
            .find_also_related(entity::prelude::Listing)
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Toggles a favorite: removes it when present, saves it otherwise.
    /// Returns whether the listing is favorited after the call.
    pub async fn toggle(&self, user_id: i32, listing_id: i32) -> Result<bool, DbErr> {
        let existing = entity::prelude::Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::ListingId.eq(listing_id))
            .one(self.db)
            .await?;

        match existing {
            Some(row) => {
                row.delete(self.db).await?;

                Ok(false)
            }
            None => {
                let row = favorite::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    listing_id: ActiveValue::Set(listing_id),
                    created_at: ActiveValue::Set(Utc::now().naive_utc()),
                    ..Default::default()
                };

                row.insert(self.db).await?;

                Ok(true)
            }
        }
    }
}
