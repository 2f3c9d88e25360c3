use chrono::Utc;
use entity::{agent_user, listing};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    DeleteResult, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::listing::{to_json_list, ListingPayload},
    server::service::listing::page::PageSpec,
};

pub struct ListingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ListingRepository<'a> {
    /// Creates a new instance of [`ListingRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches one page of listings plus the total row count for the same
    /// predicate.
    ///
    /// The page fetch is ordered pinned-first and bounded by the page spec;
    /// the count is unbounded. Both queries share the identical condition so
    /// pagination metadata stays consistent with the returned rows, and they
    /// execute concurrently since neither depends on the other.
    pub async fn search(
        &self,
        condition: Condition,
        page: &PageSpec,
    ) -> Result<(Vec<(listing::Model, Option<agent_user::Model>)>, u64), DbErr> {
        let rows = entity::prelude::Listing::find()
            .find_also_related(entity::prelude::AgentUser)
            .filter(condition.clone())
            .order_by_desc(listing::Column::IsPinned)
            .order_by(page.sort_column(), page.order())
            .offset(page.offset())
            .limit(page.limit)
            .all(self.db);

        let total = entity::prelude::Listing::find()
            .filter(condition)
            .count(self.db);

        tokio::try_join!(rows, total)
    }

    /// Returns every listing with its resolved owner, newest first.
    pub async fn find_all(
        &self,
    ) -> Result<Vec<(listing::Model, Option<agent_user::Model>)>, DbErr> {
        entity::prelude::Listing::find()
            .find_also_related(entity::prelude::AgentUser)
            .order_by_desc(listing::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Returns active listings, pinned first, then newest first.
    pub async fn find_active(&self) -> Result<Vec<listing::Model>, DbErr> {
        entity::prelude::Listing::find()
            .filter(listing::Column::Status.eq("ACTIVE"))
            .order_by_desc(listing::Column::IsPinned)
            .order_by_desc(listing::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<(listing::Model, Option<agent_user::Model>)>, DbErr> {
        entity::prelude::Listing::find_by_id(id)
            .find_also_related(entity::prelude::AgentUser)
            .one(self.db)
            .await
    }

    /// Inserts a new listing, normalizing enum casing to stored form and
    /// serializing the image/feature lists into their JSON text columns.
    pub async fn create(
        &self,
        payload: &ListingPayload,
        owner_id: Option<i32>,
    ) -> Result<listing::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let row = listing::ActiveModel {
            title: ActiveValue::Set(payload.title.clone()),
            description: ActiveValue::Set(payload.description.clone()),
            price: ActiveValue::Set(payload.price),
            street: ActiveValue::Set(payload.address.street.clone()),
            city: ActiveValue::Set(payload.address.city.clone()),
            state: ActiveValue::Set(payload.address.state.clone()),
            zip_code: ActiveValue::Set(payload.address.zip_code.clone()),
            latitude: ActiveValue::Set(payload.address.coordinates.lat),
            longitude: ActiveValue::Set(payload.address.coordinates.lng),
            bedrooms: ActiveValue::Set(payload.details.bedrooms),
            bathrooms: ActiveValue::Set(payload.details.bathrooms),
            square_footage: ActiveValue::Set(payload.details.square_footage),
            property_type: ActiveValue::Set(
                payload.details.property_type.as_stored().to_string(),
            ),
            year_built: ActiveValue::Set(payload.details.year_built),
            images: ActiveValue::Set(to_json_list(&payload.images)),
            features: ActiveValue::Set(to_json_list(&payload.features)),
            status: ActiveValue::Set(payload.status.as_stored().to_string()),
            listing_type: ActiveValue::Set(payload.listing_type.as_stored().to_string()),
            is_pinned: ActiveValue::Set(payload.is_pinned),
            owner_id: ActiveValue::Set(owner_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        row.insert(self.db).await
    }

    /// Replaces a listing's contents. Returns `Ok(None)` when no row has
    /// the given id.
    pub async fn update(
        &self,
        id: i32,
        payload: &ListingPayload,
    ) -> Result<Option<listing::Model>, DbErr> {
        let Some(existing) = entity::prelude::Listing::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut row: listing::ActiveModel = existing.into();
        row.title = ActiveValue::Set(payload.title.clone());
        row.description = ActiveValue::Set(payload.description.clone());
        row.price = ActiveValue::Set(payload.price);
        row.street = ActiveValue::Set(payload.address.street.clone());
        row.city = ActiveValue::Set(payload.address.city.clone());
        row.state = ActiveValue::Set(payload.address.state.clone());
        row.zip_code = ActiveValue::Set(payload.address.zip_code.clone());
        row.latitude = ActiveValue::Set(payload.address.coordinates.lat);
        row.longitude = ActiveValue::Set(payload.address.coordinates.lng);
        row.bedrooms = ActiveValue::Set(payload.details.bedrooms);
        row.bathrooms = ActiveValue::Set(payload.details.bathrooms);
        row.square_footage = ActiveValue::Set(payload.details.square_footage);
        row.property_type =
            ActiveValue::Set(payload.details.property_type.as_stored().to_string());
        row.year_built = ActiveValue::Set(payload.details.year_built);
        row.images = ActiveValue::Set(to_json_list(&payload.images));
        row.features = ActiveValue::Set(to_json_list(&payload.features));
        row.status = ActiveValue::Set(payload.status.as_stored().to_string());
        row.listing_type = ActiveValue::Set(payload.listing_type.as_stored().to_string());
        row.is_pinned = ActiveValue::Set(payload.is_pinned);
        row.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        row.update(self.db).await.map(Some)
    }

    /// Deletes a listing
    ///
    /// Returns OK regardless of the listing existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Listing::delete_by_id(id).exec(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Schema};

    use crate::server::util::test::setup::test_setup;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;

        let db = test.state.db;
        let schema = Schema::new(DbBackend::Sqlite);

        let stmts = vec![
            schema.create_table_from_entity(entity::prelude::AgentUser),
            schema.create_table_from_entity(entity::prelude::Listing),
        ];

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(db)
    }

    mod search_tests {
        use sea_orm::DbErr;

        use crate::server::{
            data::listing::{tests::setup, ListingRepository},
            service::listing::{
                filter::{ListingFilter, SearchParams},
                page::{PageSpec, DEFAULT_SEARCH_LIMIT},
            },
            util::test::mock::insert_listing_with,
        };

        fn default_page() -> PageSpec {
            PageSpec::resolve(&None, &None, &None, &None, DEFAULT_SEARCH_LIMIT)
        }

        fn params_with(f: impl FnOnce(&mut SearchParams)) -> SearchParams {
            let mut params = SearchParams::default();
            f(&mut params);
            params
        }

        /// Price range bounds are inclusive
        #[tokio::test]
        async fn price_range_is_inclusive() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            insert_listing_with(&db, |l| {
                l.price = sea_orm::ActiveValue::Set(100_000);
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.price = sea_orm::ActiveValue::Set(200_000);
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.price = sea_orm::ActiveValue::Set(300_000);
            })
            .await?;

            let filter = ListingFilter::from_params(&params_with(|p| {
                p.min_price = Some("100000".to_string());
                p.max_price = Some("200000".to_string());
            }));

            let (rows, total) = repo.search(filter.condition(), &default_page()).await?;

            assert_eq!(total, 2);
            assert_eq!(rows.len(), 2);

            Ok(())
        }

        /// A malformed minPrice applies no price floor
        #[tokio::test]
        async fn malformed_min_price_applies_no_floor() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            insert_listing_with(&db, |l| {
                l.price = sea_orm::ActiveValue::Set(50_000);
            })
            .await?;

            let filter = ListingFilter::from_params(&params_with(|p| {
                p.min_price = Some("abc".to_string());
            }));

            let (_, total) = repo.search(filter.condition(), &default_page()).await?;

            assert_eq!(total, 1);

            Ok(())
        }

        /// Bathrooms filters as an at-least match
        #[tokio::test]
        async fn bathrooms_matches_at_least() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            insert_listing_with(&db, |l| {
                l.bathrooms = sea_orm::ActiveValue::Set(1);
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.bathrooms = sea_orm::ActiveValue::Set(3);
            })
            .await?;

            let filter = ListingFilter::from_params(&params_with(|p| {
                p.bathrooms = Some("2".to_string());
            }));

            let (rows, total) = repo.search(filter.condition(), &default_page()).await?;

            assert_eq!(total, 1);
            assert_eq!(rows[0].0.bathrooms, 3);

            Ok(())
        }

        /// Free-text search matches case-insensitively across text columns
        #[tokio::test]
        async fn search_term_is_case_insensitive() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("Vila ne Dajt".to_string());
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("Garsoniere".to_string());
                l.street = sea_orm::ActiveValue::Set("Rruga e Dajtit".to_string());
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("Apartament qendror".to_string());
                l.street = sea_orm::ActiveValue::Set("Bulevardi Zogu I".to_string());
            })
            .await?;

            let filter = ListingFilter::from_params(&params_with(|p| {
                p.search = Some("DAJT".to_string());
            }));

            let (_, total) = repo.search(filter.condition(), &default_page()).await?;

            assert_eq!(total, 2);

            Ok(())
        }

        /// Row pages never exceed the limit and the count covers all pages
        #[tokio::test]
        async fn page_is_bounded_and_count_is_not() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            for _ in 0..5 {
                insert_listing_with(&db, |_| {}).await?;
            }

            let page = PageSpec::resolve(
                &Some("1".to_string()),
                &Some("2".to_string()),
                &None,
                &None,
                DEFAULT_SEARCH_LIMIT,
            );
            let filter = ListingFilter::from_params(&SearchParams::default());

            let (rows, total) = repo.search(filter.condition(), &page).await?;

            assert_eq!(rows.len(), 2);
            assert_eq!(total, 5);
            assert_eq!(page.total_pages(total), 3);
            assert!(page.has_more(total));

            Ok(())
        }

        /// Pinned listings sort ahead of non-pinned regardless of sort field
        #[tokio::test]
        async fn pinned_listings_come_first() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("cheap".to_string());
                l.price = sea_orm::ActiveValue::Set(50_000);
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("pinned".to_string());
                l.price = sea_orm::ActiveValue::Set(900_000);
                l.is_pinned = sea_orm::ActiveValue::Set(true);
            })
            .await?;

            let page = PageSpec::resolve(
                &None,
                &None,
                &Some("price".to_string()),
                &Some("asc".to_string()),
                DEFAULT_SEARCH_LIMIT,
            );
            let filter = ListingFilter::from_params(&SearchParams::default());

            let (rows, _) = repo.search(filter.condition(), &page).await?;

            assert_eq!(rows[0].0.title, "pinned");

            Ok(())
        }
    }

    mod find_active_tests {
        use sea_orm::DbErr;

        use crate::server::{
            data::listing::{tests::setup, ListingRepository},
            util::test::mock::insert_listing_with,
        };

        /// Seeding two active (one pinned) and one sold listing returns
        /// exactly the two active rows, pinned first
        #[tokio::test]
        async fn returns_active_pinned_first() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("active".to_string());
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("active pinned".to_string());
                l.is_pinned = sea_orm::ActiveValue::Set(true);
            })
            .await?;
            insert_listing_with(&db, |l| {
                l.title = sea_orm::ActiveValue::Set("sold".to_string());
                l.status = sea_orm::ActiveValue::Set("SOLD".to_string());
            })
            .await?;

            let rows = repo.find_active().await?;

            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].title, "active pinned");
            assert_eq!(rows[1].title, "active");

            Ok(())
        }
    }

    mod crud_tests {
        use sea_orm::DbErr;

        use crate::server::{
            data::listing::{tests::setup, ListingRepository},
            util::test::mock::{insert_user, mock_listing_payload},
        };

        /// Creating a listing normalizes enum casing and JSON columns
        #[tokio::test]
        async fn create_normalizes_stored_form() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            let payload = mock_listing_payload();
            let created = repo.create(&payload, None).await?;

            assert_eq!(created.property_type, "APARTMENT");
            assert_eq!(created.status, "ACTIVE");
            assert_eq!(created.listing_type, "SALE");
            assert_eq!(created.images, r#"["https://img.example/1.jpg"]"#);

            Ok(())
        }

        /// Creating with an owner resolves the owner on read
        #[tokio::test]
        async fn create_with_owner_resolves_owner() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            let user = insert_user(&db, "agent@pasurite-tiranes.al", "AGENT").await?;
            let created = repo.create(&mock_listing_payload(), Some(user.id)).await?;

            let found = repo.find_by_id(created.id).await?;
            let (_, owner) = found.unwrap();

            assert_eq!(owner.unwrap().id, user.id);

            Ok(())
        }

        /// Updating a missing listing returns None
        #[tokio::test]
        async fn update_missing_returns_none() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            let result = repo.update(42, &mock_listing_payload()).await?;

            assert!(result.is_none());

            Ok(())
        }

        /// Deleting returns the affected row count
        #[tokio::test]
        async fn delete_reports_rows_affected() -> Result<(), DbErr> {
            let db = setup().await?;
            let repo = ListingRepository::new(&db);

            let created = repo.create(&mock_listing_payload(), None).await?;

            let deleted = repo.delete(created.id).await?;
            assert_eq!(deleted.rows_affected, 1);

            let deleted_again = repo.delete(created.id).await?;
            assert_eq!(deleted_again.rows_affected, 0);

            Ok(())
        }
    }
}
