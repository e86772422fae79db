use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod attendance;
mod auth;
mod employees;
mod products;
mod reports;
mod sales;
mod server;
mod stock;

pub mod types {
    pub mod user {
        pub use api_types::user::{RegisterUser, UserRole, UserView};
    }

    pub mod employee {
        pub use api_types::employee::{
            EmployeeCreate, EmployeeListResponse, EmployeeStatus, EmployeeUpdate, EmployeeView,
        };
    }

    pub mod attendance {
        pub use api_types::attendance::{
            AttendanceListResponse, AttendanceMark, AttendanceQuery, AttendanceStatus,
            AttendanceView,
        };
    }

    pub mod product {
        pub use api_types::product::{
            ProductCreate, ProductListResponse, ProductUpdate, ProductView,
        };
    }

    pub mod stock {
        pub use api_types::stock::{
            StockItemCreate, StockItemUpdate, StockItemView, StockListResponse,
        };
    }

    pub mod sale {
        pub use api_types::sale::{
            Customer, PaymentNew, PaymentStatus, PaymentView, SaleCreate, SaleItemNew,
            SaleItemView, SaleListResponse, SaleUpdate, SaleView,
        };
    }

    pub mod report {
        pub use api_types::report::{
            ProductBreakdownRow, SalaryReport, SalaryReportQuery, SalaryReportRow, SalesReport,
        };
    }
}

/// Successful responses are wrapped in a `data` envelope.
#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    fn new(data: T) -> Self {
        Self { data }
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) | EngineError::InvalidId(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::Validation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_bad_amount_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
