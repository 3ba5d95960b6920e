use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transaction error: {0}")]
    TransactionError(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::Duplicate
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                DatabaseError::InvalidInput("referenced record does not exist".to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

pub type DbResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DatabaseError::NotFound));
    }

    #[test]
    fn other_sqlx_errors_pass_through() {
        let err = DatabaseError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, DatabaseError::Sqlx(_)));
    }
}
