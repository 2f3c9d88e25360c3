//! Listing search, retrieval, and write coordination.

pub mod filter;
pub mod page;

use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::{
    model::listing::{
        ActivePropertiesResponseDto, ListingDto, ListingPayload, PagePaginationDto,
        PaginatedResponseDto, PropertiesResponseDto, SearchPaginationDto, SearchResponseDto,
    },
    server::{
        data::listing::ListingRepository,
        error::Error,
        service::listing::{
            filter::{ListingFilter, SearchParams},
            page::{PageParams, PageSpec, DEFAULT_PAGINATED_LIMIT, DEFAULT_SEARCH_LIMIT},
        },
        util::cache::ResponseCache,
    },
};

/// Time cached pages of the paginated endpoint stay fresh.
const PAGINATED_CACHE_TTL: Duration = Duration::from_secs(60);

pub struct ListingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ListingService<'a> {
    /// Creates a new instance of [`ListingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every listing regardless of status, newest first.
    pub async fn list_all(&self) -> Result<PropertiesResponseDto, Error> {
        let rows = ListingRepository::new(self.db).find_all().await?;

        let properties = rows
            .into_iter()
            .map(|(listing, owner)| ListingDto::from_model(listing, owner.as_ref()))
            .collect();

        Ok(PropertiesResponseDto { properties })
    }

    /// Active listings with their count, pinned first.
    ///
    /// Owners are not resolved here; every listing carries the placeholder
    /// agent contact.
    pub async fn list_active(&self) -> Result<ActivePropertiesResponseDto, Error> {
        let rows = ListingRepository::new(self.db).find_active().await?;

        let properties: Vec<ListingDto> = rows
            .into_iter()
            .map(|listing| ListingDto::from_model(listing, None))
            .collect();
        let count = properties.len();

        Ok(ActivePropertiesResponseDto { properties, count })
    }

    /// Filtered, sorted, paginated search over listings.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponseDto, Error> {
        let page = PageSpec::resolve(
            &params.page,
            &params.limit,
            &params.sort_by,
            &params.sort_order,
            DEFAULT_SEARCH_LIMIT,
        );
        let filter = ListingFilter::from_params(params);

        let (rows, total) = ListingRepository::new(self.db)
            .search(filter.condition(), &page)
            .await?;

        let properties = rows
            .into_iter()
            .map(|(listing, owner)| ListingDto::from_model(listing, owner.as_ref()))
            .collect();

        let total_pages = page.total_pages(total);

        Ok(SearchResponseDto {
            properties,
            pagination: SearchPaginationDto {
                current_page: page.page,
                total_pages,
                total_count: total,
                has_next_page: page.page < total_pages,
                has_prev_page: page.page > 1,
                limit: page.limit,
            },
            filters: filter.echo(page.sort_by, page.sort_order),
        })
    }

    /// One cached page of active listings, fixed newest-first ordering.
    ///
    /// The whole transformed envelope is cached per page/limit pair, so a
    /// cache hit touches neither the database nor the transformer.
    pub async fn paginated(
        &self,
        cache: &ResponseCache,
        params: &PageParams,
    ) -> Result<PaginatedResponseDto, Error> {
        let page = PageSpec::resolve_fixed(params, DEFAULT_PAGINATED_LIMIT);
        let key = format!("properties-paginated-{}-{}", page.page, page.limit);

        let db = self.db;
        let page = &page;

        cache
            .get_or_compute(&key, PAGINATED_CACHE_TTL, || async move {
                let (rows, total) = ListingRepository::new(db)
                    .search(ListingFilter::active().condition(), page)
                    .await?;

                let properties = rows
                    .into_iter()
                    .map(|(listing, owner)| ListingDto::from_model(listing, owner.as_ref()))
                    .collect();

                Ok(PaginatedResponseDto {
                    success: true,
                    error: None,
                    properties,
                    pagination: PagePaginationDto {
                        page: page.page,
                        limit: page.limit,
                        total,
                        total_pages: page.total_pages(total),
                        has_more: page.has_more(total),
                    },
                })
            })
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<ListingDto>, Error> {
        let row = ListingRepository::new(self.db).find_by_id(id).await?;

        Ok(row.map(|(listing, owner)| ListingDto::from_model(listing, owner.as_ref())))
    }

    pub async fn create(
        &self,
        payload: &ListingPayload,
        owner_id: Option<i32>,
    ) -> Result<ListingDto, Error> {
        let repository = ListingRepository::new(self.db);

        let created = repository.create(payload, owner_id).await?;
        let owner = match created.owner_id {
            Some(_) => repository.find_by_id(created.id).await?.and_then(|(_, o)| o),
            None => None,
        };

        Ok(ListingDto::from_model(created, owner.as_ref()))
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &ListingPayload,
    ) -> Result<Option<ListingDto>, Error> {
        let repository = ListingRepository::new(self.db);

        let Some(updated) = repository.update(id, payload).await? else {
            return Ok(None);
        };

        let owner = match updated.owner_id {
            Some(_) => repository.find_by_id(updated.id).await?.and_then(|(_, o)| o),
            None => None,
        };

        Ok(Some(ListingDto::from_model(updated, owner.as_ref())))
    }

    /// Deletes a listing, returning whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, Error> {
        let result = ListingRepository::new(self.db).delete(id).await?;

        Ok(result.rows_affected > 0)
    }
}
