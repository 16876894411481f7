//! PostgreSQL-backed `PilgrimageRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::page::{Page, PageRequest, SortSpec};
use crate::domain::ports::{PilgrimageRepository, PilgrimageRepositoryError};
use crate::domain::{Pilgrimage, PilgrimageDraft};

use super::diesel_error_mapping;
use super::models::{NewPilgrimageRow, PilgrimageChangeset, PilgrimageRow};
use super::pool::{DbPool, PoolError};
use super::schema::pilgrimages;

/// Diesel-backed implementation of the `PilgrimageRepository` port.
#[derive(Clone)]
pub struct DieselPilgrimageRepository {
    pool: DbPool,
}

impl DieselPilgrimageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PilgrimageRepositoryError {
    diesel_error_mapping::map_pool_error(error, |message| {
        PilgrimageRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> PilgrimageRepositoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        PilgrimageRepositoryError::query,
        PilgrimageRepositoryError::connection,
    )
}

fn row_to_pilgrimage(row: PilgrimageRow) -> Pilgrimage {
    Pilgrimage {
        id: row.id,
        name: row.name,
        start_date: row.start_date,
        end_date: row.end_date,
    }
}

/// Apply the validated sort specification to a boxed pilgrimages query.
fn ordered(
    query: pilgrimages::BoxedQuery<'static, diesel::pg::Pg>,
    sort: Option<&SortSpec>,
) -> pilgrimages::BoxedQuery<'static, diesel::pg::Pg> {
    let Some(spec) = sort else {
        return query.order(pilgrimages::id.asc());
    };
    match (spec.field.as_str(), spec.direction.is_descending()) {
        ("name", false) => query.order(pilgrimages::name.asc()),
        ("name", true) => query.order(pilgrimages::name.desc()),
        ("startDate", false) => query.order(pilgrimages::start_date.asc()),
        ("startDate", true) => query.order(pilgrimages::start_date.desc()),
        ("endDate", false) => query.order(pilgrimages::end_date.asc()),
        ("endDate", true) => query.order(pilgrimages::end_date.desc()),
        (_, false) => query.order(pilgrimages::id.asc()),
        (_, true) => query.order(pilgrimages::id.desc()),
    }
}

#[async_trait]
impl PilgrimageRepository for DieselPilgrimageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Pilgrimage>, PilgrimageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PilgrimageRow> = pilgrimages::table
            .find(id)
            .select(PilgrimageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_pilgrimage))
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Pilgrimage>, PilgrimageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PilgrimageRow> = ordered(pilgrimages::table.into_boxed(), request.sort())
            .select(PilgrimageRow::as_select())
            .offset(request.offset())
            .limit(request.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total: i64 = pilgrimages::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        #[expect(clippy::cast_sign_loss, reason = "COUNT(*) is never negative")]
        let total = total as u64;

        let items = rows.into_iter().map(row_to_pilgrimage).collect();
        Ok(Page::new(items, request.page(), request.size(), total))
    }

    async fn create(&self, draft: &PilgrimageDraft) -> Result<Pilgrimage, PilgrimageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPilgrimageRow {
            name: &draft.name,
            start_date: draft.start_date,
            end_date: draft.end_date,
        };

        let row: PilgrimageRow = diesel::insert_into(pilgrimages::table)
            .values(&new_row)
            .returning(PilgrimageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_pilgrimage(row))
    }

    async fn save(&self, pilgrimage: &Pilgrimage) -> Result<Pilgrimage, PilgrimageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = PilgrimageChangeset {
            name: &pilgrimage.name,
            start_date: pilgrimage.start_date,
            end_date: pilgrimage.end_date,
        };

        let row: PilgrimageRow = diesel::update(pilgrimages::table.find(pilgrimage.id))
            .set(&changeset)
            .returning(PilgrimageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_pilgrimage(row))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, PilgrimageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(pilgrimages::table.find(id)))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PilgrimageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(pilgrimages::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
