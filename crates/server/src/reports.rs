//! Reports API endpoints, including the CSV export of the sales report.

use api_types::report::{
    ProductBreakdownRow, SalaryReport, SalaryReportQuery, SalaryReportRow, SalesReport,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use csv::Writer;

use crate::{Data, ServerError, server::ServerState};
use engine::users;

fn map_sales_report(report: engine::SalesReport) -> SalesReport {
    SalesReport {
        total_sales_minor: report.total_sales_minor,
        total_paid_minor: report.total_paid_minor,
        total_pending_minor: report.total_pending_minor,
        total_quantity_milli: report.total_quantity_milli,
        total_orders: report.total_orders,
        total_products: report.total_products,
        by_product: report
            .by_product
            .into_iter()
            .map(|row| ProductBreakdownRow {
                product_name: row.product_name,
                quantity_milli: row.quantity_milli,
                revenue_minor: row.revenue_minor,
            })
            .collect(),
    }
}

pub async fn sales(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Data<SalesReport>>, ServerError> {
    let report = state.engine.sales_report(&user.username).await?;
    Ok(Json(Data::new(map_sales_report(report))))
}

/// The sales list flattened into a CSV download, one row per sale.
pub async fn sales_export(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let sales = state.engine.sales(&user.username).await?;

    let mut writer = Writer::from_writer(vec![]);
    writer
        .write_record([
            "sold_on",
            "customer_name",
            "customer_phone",
            "subtotal_minor",
            "discount_minor",
            "tax_minor",
            "total_minor",
            "paid_minor",
            "remaining_minor",
            "payment_method",
            "payment_status",
        ])
        .map_err(|err| ServerError::Generic(err.to_string()))?;
    for sale in &sales {
        writer
            .write_record([
                sale.sold_on.to_string(),
                sale.customer_name.clone(),
                sale.customer_phone.clone(),
                sale.subtotal_minor.to_string(),
                sale.discount_minor.to_string(),
                sale.tax_minor.to_string(),
                sale.total_minor.to_string(),
                sale.paid_minor.to_string(),
                sale.remaining_minor.to_string(),
                sale.payment_method.clone(),
                sale.payment_status.as_str().to_string(),
            ])
            .map_err(|err| ServerError::Generic(err.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sales-report.csv\"".to_string(),
            ),
        ],
        body,
    ))
}

pub async fn salaries(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<SalaryReportQuery>,
) -> Result<Json<Data<SalaryReport>>, ServerError> {
    let report = state
        .engine
        .salary_report(&user.username, query.year, query.month)
        .await?;

    Ok(Json(Data::new(SalaryReport {
        month: report.month,
        year: report.year,
        days_in_month: report.days_in_month,
        rows: report
            .lines
            .into_iter()
            .map(|line| SalaryReportRow {
                employee_id: line.employee_id,
                name: line.name,
                role: line.role,
                salary_minor: line.salary_minor,
                present_days: line.present_days,
                calculated_salary_minor: line.calculated_salary_minor,
            })
            .collect(),
        total_payroll_minor: report.total_payroll_minor,
        average_salary_minor: report.average_salary_minor,
    })))
}
