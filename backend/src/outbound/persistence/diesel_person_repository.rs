//! PostgreSQL-backed `PersonRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::page::{Page, PageRequest, SortSpec};
use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonDraft};

use super::diesel_error_mapping;
use super::models::{NewPersonRow, PersonChangeset, PersonRow};
use super::pool::{DbPool, PoolError};
use super::schema::persons;

/// Diesel-backed implementation of the `PersonRepository` port.
#[derive(Clone)]
pub struct DieselPersonRepository {
    pool: DbPool,
}

impl DieselPersonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PersonRepositoryError {
    diesel_error_mapping::map_pool_error(error, |message| {
        PersonRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> PersonRepositoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        PersonRepositoryError::query,
        PersonRepositoryError::connection,
    )
}

fn row_to_person(row: PersonRow) -> Person {
    Person {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        birth_date: row.birth_date,
    }
}

/// Apply the validated sort specification to a boxed persons query.
///
/// Sort fields arrive in their wire spelling; anything outside the
/// allow-list was rejected at the HTTP boundary, so unknown fields fall
/// back to the stable id ordering.
fn ordered(
    query: persons::BoxedQuery<'static, diesel::pg::Pg>,
    sort: Option<&SortSpec>,
) -> persons::BoxedQuery<'static, diesel::pg::Pg> {
    let Some(spec) = sort else {
        return query.order(persons::id.asc());
    };
    match (spec.field.as_str(), spec.direction.is_descending()) {
        ("firstName", false) => query.order(persons::first_name.asc()),
        ("firstName", true) => query.order(persons::first_name.desc()),
        ("lastName", false) => query.order(persons::last_name.asc()),
        ("lastName", true) => query.order(persons::last_name.desc()),
        ("birthDate", false) => query.order(persons::birth_date.asc()),
        ("birthDate", true) => query.order(persons::birth_date.desc()),
        (_, false) => query.order(persons::id.asc()),
        (_, true) => query.order(persons::id.desc()),
    }
}

#[async_trait]
impl PersonRepository for DieselPersonRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PersonRow> = persons::table
            .find(id)
            .select(PersonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_person))
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PersonRow> = ordered(persons::table.into_boxed(), request.sort())
            .select(PersonRow::as_select())
            .offset(request.offset())
            .limit(request.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total: i64 = persons::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        #[expect(clippy::cast_sign_loss, reason = "COUNT(*) is never negative")]
        let total = total as u64;

        let items = rows.into_iter().map(row_to_person).collect();
        Ok(Page::new(items, request.page(), request.size(), total))
    }

    async fn create(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPersonRow {
            first_name: draft.first_name.as_deref(),
            last_name: draft.last_name.as_deref(),
            birth_date: draft.birth_date,
        };

        let row: PersonRow = diesel::insert_into(persons::table)
            .values(&new_row)
            .returning(PersonRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_person(row))
    }

    async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = PersonChangeset {
            first_name: person.first_name.as_deref(),
            last_name: person.last_name.as_deref(),
            birth_date: person.birth_date,
        };

        let row: PersonRow = diesel::update(persons::table.find(person.id))
            .set(&changeset)
            .returning(PersonRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_person(row))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(persons::table.find(id)))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(persons::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
