use std::collections::HashMap;

use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    AttendanceStatus, ResultEngine, attendance, employees, products, prorated_salary_minor,
    sale_items, sales, util,
};

use super::Engine;
use super::attendance::month_bounds;

/// Per-product slice of the sales report, sorted by revenue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalesReportRow {
    pub product_name: String,
    pub quantity_milli: i64,
    pub revenue_minor: i64,
}

/// Aggregate over every sale of an owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalesReport {
    pub total_sales_minor: i64,
    pub total_paid_minor: i64,
    pub total_pending_minor: i64,
    pub total_quantity_milli: i64,
    pub total_orders: u64,
    pub total_products: u64,
    pub by_product: Vec<SalesReportRow>,
}

/// One employee's pay for a month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalaryLine {
    pub employee_id: Uuid,
    pub name: String,
    pub role: String,
    pub salary_minor: i64,
    pub present_days: u32,
    pub calculated_salary_minor: i64,
}

/// Attendance-prorated payroll for a calendar month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalaryReport {
    pub month: u32,
    pub year: i32,
    pub days_in_month: u32,
    pub lines: Vec<SalaryLine>,
    pub total_payroll_minor: i64,
    pub average_salary_minor: i64,
}

impl Engine {
    /// Aggregate all sales of an owner into a single report.
    pub async fn sales_report(&self, owner: &str) -> ResultEngine<SalesReport> {
        let sale_models = sales::Entity::find()
            .filter(sales::Column::Owner.eq(owner))
            .all(&self.database)
            .await?;

        let mut total_sales_minor = 0i64;
        let mut total_paid_minor = 0i64;
        let mut total_pending_minor = 0i64;
        let sale_ids: Vec<String> = sale_models.iter().map(|s| s.id.clone()).collect();
        for sale in &sale_models {
            total_sales_minor += sale.total_minor;
            total_paid_minor += sale.paid_minor;
            total_pending_minor += sale.remaining_minor;
        }

        let items = if sale_ids.is_empty() {
            Vec::new()
        } else {
            sale_items::Entity::find()
                .filter(sale_items::Column::SaleId.is_in(sale_ids))
                .all(&self.database)
                .await?
        };

        let mut total_quantity_milli = 0i64;
        let mut by_product: HashMap<String, (i64, i64)> = HashMap::new();
        for item in &items {
            total_quantity_milli += item.quantity_milli;
            let entry = by_product.entry(item.product_name.clone()).or_default();
            entry.0 += item.quantity_milli;
            entry.1 += item.total_minor;
        }

        // The catalog size, not the number of distinct products sold.
        let total_products = products::Entity::find()
            .filter(products::Column::Owner.eq(owner))
            .count(&self.database)
            .await?;

        let mut by_product: Vec<SalesReportRow> = by_product
            .into_iter()
            .map(|(product_name, (quantity_milli, revenue_minor))| SalesReportRow {
                product_name,
                quantity_milli,
                revenue_minor,
            })
            .collect();
        by_product.sort_by(|a, b| {
            b.revenue_minor
                .cmp(&a.revenue_minor)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });

        Ok(SalesReport {
            total_sales_minor,
            total_paid_minor,
            total_pending_minor,
            total_quantity_milli,
            total_orders: sale_models.len() as u64,
            total_products,
            by_product,
        })
    }

    /// Payroll for a month: every employee's salary prorated by the
    /// days marked present.
    pub async fn salary_report(
        &self,
        owner: &str,
        year: i32,
        month: u32,
    ) -> ResultEngine<SalaryReport> {
        let (first, last) = month_bounds(year, month)?;
        let days = u32::try_from(last.signed_duration_since(first).num_days() + 1).unwrap_or(0);

        let employee_models = employees::Entity::find()
            .filter(employees::Column::Owner.eq(owner))
            .order_by_asc(employees::Column::Name)
            .all(&self.database)
            .await?;

        let mut lines = Vec::with_capacity(employee_models.len());
        let mut total_payroll_minor = 0i64;
        for employee in employee_models {
            let present_days = attendance::Entity::find()
                .filter(attendance::Column::EmployeeId.eq(employee.id.clone()))
                .filter(attendance::Column::Day.gte(first))
                .filter(attendance::Column::Day.lte(last))
                .filter(attendance::Column::Status.eq(AttendanceStatus::Present.as_str()))
                .count(&self.database)
                .await? as u32;

            let calculated_salary_minor =
                prorated_salary_minor(employee.salary_minor, present_days, days);
            total_payroll_minor += calculated_salary_minor;

            lines.push(SalaryLine {
                employee_id: util::parse_uuid(&employee.id, "employee")?,
                name: employee.name,
                role: employee.role,
                salary_minor: employee.salary_minor,
                present_days,
                calculated_salary_minor,
            });
        }

        let average_salary_minor = if lines.is_empty() {
            0
        } else {
            util::mul_div_round(total_payroll_minor, 1, lines.len() as i64)
        };

        Ok(SalaryReport {
            month,
            year,
            days_in_month: days,
            lines,
            total_payroll_minor,
            average_salary_minor,
        })
    }
}
