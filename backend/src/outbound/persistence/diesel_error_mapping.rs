//! Shared Diesel error mapping for the repository adapters.
//!
//! Every repository error enum here has the same two-variant shape
//! (connection vs query), so the translation from pool and Diesel failures
//! is written once and parameterised over the constructors.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Lost connections map to connection errors; everything else, including
/// constraint violations that slipped past the service-level checks, maps
/// to query errors.
pub fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("duplicate record")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::domain::ports::PersonRepositoryError;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error: PersonRepositoryError = map_pool_error(
            PoolError::checkout("connection refused"),
            |message| PersonRepositoryError::connection(message),
        );

        assert!(matches!(
            error,
            PersonRepositoryError::Connection { .. }
        ));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        let error: PersonRepositoryError = map_diesel_error(
            diesel::result::Error::NotFound,
            PersonRepositoryError::query,
            PersonRepositoryError::connection,
        );

        assert!(matches!(error, PersonRepositoryError::Query { .. }));
        assert!(error.to_string().contains("record not found"));
    }
}
