use chrono::Utc;
use entity::{inquiry, listing};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    DeleteResult, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::inquiry::{CreateInquiryRequest, InquiryStatus};

pub struct InquiryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InquiryRepository<'a> {
    /// Creates a new instance of [`InquiryRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new inquiry against a listing. New inquiries always start
    /// in the NEW status.
    pub async fn create(
        &self,
        request: &CreateInquiryRequest,
    ) -> Result<inquiry::Model, DbErr> {
        let row = inquiry::ActiveModel {
            name: ActiveValue::Set(request.name.clone()),
            email: ActiveValue::Set(request.email.clone()),
            phone: ActiveValue::Set(request.phone.clone()),
            message: ActiveValue::Set(request.message.clone()),
            listing_id: ActiveValue::Set(request.property_id),
            status: ActiveValue::Set(InquiryStatus::New.as_stored().to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        row.insert(self.db).await
    }

    /// Fetches one page of inquiries, newest first, with each inquiry's
    /// listing resolved. Page fetch and count share the same predicate and
    /// run concurrently.
    pub async fn find_page(
        &self,
        property_id: Option<i32>,
        status: Option<InquiryStatus>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<(inquiry::Model, Option<listing::Model>)>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(property_id) = property_id {
            condition = condition.add(inquiry::Column::ListingId.eq(property_id));
        }

        if let Some(status) = status {
            condition = condition.add(inquiry::Column::Status.eq(status.as_stored()));
        }

        let rows = entity::prelude::Inquiry::find()
            .find_also_related(entity::prelude::Listing)
            .filter(condition.clone())
            .order_by_desc(inquiry::Column::CreatedAt)
            .offset((page - 1).saturating_mul(limit))
            .limit(limit)
            .all(self.db);

        let total = entity::prelude::Inquiry::find()
            .filter(condition)
            .count(self.db);

        tokio::try_join!(rows, total)
    }

    /// Moves an inquiry to a new status. Returns `Ok(None)` when no row has
    /// the given id.
    pub async fn update_status(
        &self,
        id: i32,
        status: InquiryStatus,
    ) -> Result<Option<inquiry::Model>, DbErr> {
        let Some(existing) = entity::prelude::Inquiry::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut row: inquiry::ActiveModel = existing.into();
        row.status = ActiveValue::Set(status.as_stored().to_string());

        row.update(self.db).await.map(Some)
    }

    /// Deletes an inquiry
    ///
    /// Returns OK regardless of the inquiry existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Inquiry::delete_by_id(id).exec(self.db).await
    }
}
