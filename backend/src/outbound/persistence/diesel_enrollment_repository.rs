//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Enrollments carry a database-level unique constraint on
//! `(person_id, pilgrimage_id)` as a backstop for the service-level
//! duplicate check, and foreign keys to persons and pilgrimages.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::page::{Page, PageRequest, SortSpec};
use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{Enrollment, EnrollmentDraft, EnrollmentStatus};

use super::diesel_error_mapping;
use super::models::{EnrollmentChangeset, EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::enrollments;

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Row filter shared by the paged lookups.
enum PageFilter {
    All,
    Person(i64),
    Pilgrimage(i64),
    Status(EnrollmentStatus),
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    diesel_error_mapping::map_pool_error(error, |message| {
        EnrollmentRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

/// Convert a database row to a domain enrollment.
///
/// The status column is constrained by the application to the UPPERCASE
/// wire forms, so a parse failure means the row was tampered with outside
/// the application.
fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    let status = row.status.parse::<EnrollmentStatus>().map_err(|err| {
        warn!(enrollment_id = row.id, value = %err.value, "unrecognised enrollment status in database");
        EnrollmentRepositoryError::query("unrecognised enrollment status")
    })?;

    Ok(Enrollment {
        id: row.id,
        person_id: row.person_id,
        pilgrimage_id: row.pilgrimage_id,
        enrolled_at: row.enrolled_at,
        status,
        notes: row.notes,
    })
}

fn filtered(filter: &PageFilter) -> enrollments::BoxedQuery<'static, diesel::pg::Pg> {
    let query = enrollments::table.into_boxed();
    match filter {
        PageFilter::All => query,
        PageFilter::Person(person_id) => query.filter(enrollments::person_id.eq(*person_id)),
        PageFilter::Pilgrimage(pilgrimage_id) => {
            query.filter(enrollments::pilgrimage_id.eq(*pilgrimage_id))
        }
        PageFilter::Status(status) => query.filter(enrollments::status.eq(status.as_str())),
    }
}

/// Apply the sort specification to a boxed enrollments query.
fn ordered(
    query: enrollments::BoxedQuery<'static, diesel::pg::Pg>,
    sort: Option<&SortSpec>,
) -> enrollments::BoxedQuery<'static, diesel::pg::Pg> {
    let Some(spec) = sort else {
        return query.order(enrollments::id.asc());
    };
    match (spec.field.as_str(), spec.direction.is_descending()) {
        ("enrollmentDate", false) => query.order(enrollments::enrolled_at.asc()),
        ("enrollmentDate", true) => query.order(enrollments::enrolled_at.desc()),
        ("status", false) => query.order(enrollments::status.asc()),
        ("status", true) => query.order(enrollments::status.desc()),
        (_, false) => query.order(enrollments::id.asc()),
        (_, true) => query.order(enrollments::id.desc()),
    }
}

impl DieselEnrollmentRepository {
    async fn find_page_where(
        &self,
        request: &PageRequest,
        filter: PageFilter,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = ordered(filtered(&filter), request.sort())
            .select(EnrollmentRow::as_select())
            .offset(request.offset())
            .limit(request.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total: i64 = filtered(&filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        #[expect(clippy::cast_sign_loss, reason = "COUNT(*) is never negative")]
        let total = total as u64;

        let items = rows
            .into_iter()
            .map(row_to_enrollment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, request.page(), request.size(), total))
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EnrollmentRow> = enrollments::table
            .find(id)
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_enrollment).transpose()
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        self.find_page_where(request, PageFilter::All).await
    }

    async fn find_page_by_person(
        &self,
        person_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        self.find_page_where(request, PageFilter::Person(person_id))
            .await
    }

    async fn find_page_by_pilgrimage(
        &self,
        pilgrimage_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        self.find_page_where(request, PageFilter::Pilgrimage(pilgrimage_id))
            .await
    }

    async fn find_page_by_status(
        &self,
        status: EnrollmentStatus,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        self.find_page_where(request, PageFilter::Status(status))
            .await
    }

    async fn exists_for_person_and_pilgrimage(
        &self,
        person_id: i64,
        pilgrimage_id: i64,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            enrollments::table
                .filter(enrollments::person_id.eq(person_id))
                .filter(enrollments::pilgrimage_id.eq(pilgrimage_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn create(
        &self,
        draft: &EnrollmentDraft,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEnrollmentRow {
            person_id: draft.person_id,
            pilgrimage_id: draft.pilgrimage_id,
            enrolled_at: draft.enrolled_at,
            status: draft.status.as_str(),
            notes: draft.notes.as_deref(),
        };

        let row: EnrollmentRow = diesel::insert_into(enrollments::table)
            .values(&new_row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_enrollment(row)
    }

    async fn save(&self, enrollment: &Enrollment) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = EnrollmentChangeset {
            status: enrollment.status.as_str(),
            notes: enrollment.notes.as_deref(),
        };

        let row: EnrollmentRow = diesel::update(enrollments::table.find(enrollment.id))
            .set(&changeset)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_enrollment(row)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(enrollments::table.find(id)))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(enrollments::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the row and error mapping.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn sample_row(status: &str) -> EnrollmentRow {
        EnrollmentRow {
            id: 11,
            person_id: 1,
            pilgrimage_id: 2,
            enrolled_at: Utc::now(),
            status: status.to_string(),
            notes: Some("walking boots packed".into()),
        }
    }

    #[rstest]
    fn row_conversion_parses_stored_status() {
        let enrollment = row_to_enrollment(sample_row("CONFIRMED")).unwrap();

        assert_eq!(enrollment.status, EnrollmentStatus::Confirmed);
        assert_eq!(enrollment.notes.as_deref(), Some("walking boots packed"));
    }

    #[rstest]
    fn row_conversion_rejects_unrecognised_status() {
        let error = row_to_enrollment(sample_row("LOITERING")).unwrap_err();

        assert!(matches!(error, EnrollmentRepositoryError::Query { .. }));
        assert!(error.to_string().contains("unrecognised enrollment status"));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("pool exhausted"));

        assert!(matches!(error, EnrollmentRepositoryError::Connection { .. }));
        assert!(error.to_string().contains("pool exhausted"));
    }
}
