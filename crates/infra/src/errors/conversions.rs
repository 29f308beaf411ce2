//! Conversions from external infrastructure errors into domain errors.

use std::time::Duration;

use prashiskshan_domain::{DeliveryError, PrashiskshanError};
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PrashiskshanError);

impl From<InfraError> for PrashiskshanError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PrashiskshanError> for InfraError {
    fn from(value: PrashiskshanError) -> Self {
        InfraError(value)
    }
}

trait IntoPrashiskshanError {
    fn into_domain(self) -> PrashiskshanError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → PrashiskshanError */
/* -------------------------------------------------------------------------- */

impl IntoPrashiskshanError for SqlError {
    fn into_domain(self) -> PrashiskshanError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => {
                        PrashiskshanError::Database("database is busy".into())
                    }
                    ErrorCode::DatabaseLocked => {
                        PrashiskshanError::Database("database is locked".into())
                    }
                    ErrorCode::DiskFull => {
                        PrashiskshanError::StorageUnavailable("storage quota exhausted".into())
                    }
                    ErrorCode::CannotOpen
                    | ErrorCode::PermissionDenied
                    | ErrorCode::ReadOnly
                    | ErrorCode::NotADatabase
                    | ErrorCode::DatabaseCorrupt => PrashiskshanError::StorageUnavailable(
                        format!("sqlite store unusable ({:?}): {message}", err.code),
                    ),
                    _ => PrashiskshanError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                PrashiskshanError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                PrashiskshanError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                PrashiskshanError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => PrashiskshanError::StorageUnavailable(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => PrashiskshanError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → PrashiskshanError */
/* -------------------------------------------------------------------------- */

impl IntoPrashiskshanError for r2d2::Error {
    fn into_domain(self) -> PrashiskshanError {
        PrashiskshanError::StorageUnavailable(format!("connection pool: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DeliveryError → PrashiskshanError */
/* -------------------------------------------------------------------------- */

/// Classify a transport-level failure.
///
/// `timeout` is the configured per-request timeout, reported back in
/// [`DeliveryError::Timeout`].
pub fn delivery_error_from_http(err: &HttpError, timeout: Duration) -> DeliveryError {
    if err.is_timeout() {
        return DeliveryError::Timeout(timeout);
    }

    if err.is_connect() {
        return DeliveryError::Network(format!("HTTP connection failure: {err}"));
    }

    if err.is_builder() {
        return DeliveryError::Config(format!("invalid request: {err}"));
    }

    if let Some(status) = err.status() {
        let code = status.as_u16();
        let message =
            format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

        return match code {
            429 | 503 => DeliveryError::RateLimit(message),
            400..=499 => DeliveryError::Client(message),
            _ => DeliveryError::Server(message),
        };
    }

    DeliveryError::Network(err.to_string())
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let timeout = Duration::from_secs(prashiskshan_domain::constants::DEFAULT_API_TIMEOUT_SECS);
        InfraError(delivery_error_from_http(&value, timeout).into())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: PrashiskshanError = InfraError::from(err).into();
        assert!(matches!(mapped, PrashiskshanError::Database(msg) if msg.contains("busy")));
    }

    #[test]
    fn sqlite_cannot_open_maps_to_storage_unavailable() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::CannotOpen, extended_code: 14 },
            Some("unable to open database file".into()),
        );

        let mapped: PrashiskshanError = InfraError::from(err).into();
        assert!(matches!(mapped, PrashiskshanError::StorageUnavailable(_)));
    }

    #[test]
    fn sqlite_disk_full_maps_to_storage_unavailable() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DiskFull, extended_code: 13 },
            None,
        );

        let mapped: PrashiskshanError = InfraError::from(err).into();
        assert!(mapped.is_storage_error());
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped: PrashiskshanError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(mapped, PrashiskshanError::NotFound(_)));
    }

    #[tokio::test]
    async fn http_status_503_maps_to_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::SERVICE_UNAVAILABLE))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped = delivery_error_from_http(&error, Duration::from_secs(1));
        assert!(matches!(mapped, DeliveryError::RateLimit(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn http_status_422_maps_to_delivery_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNPROCESSABLE_ENTITY))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: PrashiskshanError = InfraError::from(error).into();
        assert!(matches!(mapped, PrashiskshanError::DeliveryFailed(msg) if msg.contains("422")));
    }
}
