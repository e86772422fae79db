use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Role stored on a user account.
    ///
    /// Roles are informational only; the server does not gate routes on
    /// them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum UserRole {
        Admin,
        Manager,
        Employee,
    }

    impl UserRole {
        /// Returns the canonical role string used by the engine/database.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Admin => "admin",
                Self::Manager => "manager",
                Self::Employee => "employee",
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterUser {
        pub username: String,
        pub password: String,
        pub full_name: String,
        pub email: String,
        pub role: UserRole,
    }

    /// A user profile. The password is never serialized back.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub username: String,
        pub full_name: String,
        pub email: String,
        pub role: UserRole,
        pub created_at: DateTime<Utc>,
    }
}

pub mod employee {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EmployeeStatus {
        Active,
        Inactive,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EmployeeCreate {
        pub name: String,
        pub contact: Option<String>,
        pub role: String,
        pub joining_date: NaiveDate,
        /// Monthly salary in minor units.
        pub salary_minor: i64,
        /// Free-form on create: anything other than `inactive` is
        /// stored as `active`.
        pub status: Option<String>,
        pub address: Option<String>,
    }

    /// Partial update; absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EmployeeUpdate {
        pub name: Option<String>,
        pub contact: Option<String>,
        pub role: Option<String>,
        pub joining_date: Option<NaiveDate>,
        pub salary_minor: Option<i64>,
        pub status: Option<EmployeeStatus>,
        pub address: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EmployeeView {
        pub id: Uuid,
        pub name: String,
        pub contact: String,
        pub role: String,
        pub joining_date: NaiveDate,
        pub salary_minor: i64,
        pub status: EmployeeStatus,
        pub address: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EmployeeListResponse {
        pub employees: Vec<EmployeeView>,
    }
}

pub mod attendance {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AttendanceStatus {
        Present,
        Absent,
        Leave,
    }

    /// Marks attendance for one employee on one day (upsert).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AttendanceMark {
        pub employee_id: Uuid,
        pub day: NaiveDate,
        pub status: AttendanceStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AttendanceView {
        pub employee_id: Uuid,
        pub day: NaiveDate,
        pub status: AttendanceStatus,
    }

    /// Query string for listing an employee's attendance.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AttendanceQuery {
        /// 1-12; when present `year` is required too.
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AttendanceListResponse {
        pub entries: Vec<AttendanceView>,
        pub present_days: u32,
    }
}

pub mod product {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductCreate {
        pub name: String,
        pub description: Option<String>,
        /// Price per unit in minor units.
        pub price_minor: i64,
        pub unit: String,
        pub category: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProductUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
        pub price_minor: Option<i64>,
        pub unit: Option<String>,
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductView {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub price_minor: i64,
        pub unit: String,
        pub category: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductListResponse {
        pub products: Vec<ProductView>,
    }
}

pub mod stock {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StockItemCreate {
        pub name: String,
        /// Quantity in thousandths of `unit` (1.5 kg = 1500).
        pub quantity_milli: i64,
        pub unit: String,
        pub description: Option<String>,
        /// Defaults to today when absent.
        pub received_on: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StockItemUpdate {
        pub name: Option<String>,
        pub quantity_milli: Option<i64>,
        pub unit: Option<String>,
        pub description: Option<String>,
        pub received_on: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StockItemView {
        pub id: Uuid,
        pub name: String,
        pub quantity_milli: i64,
        pub unit: String,
        pub description: String,
        pub received_on: NaiveDate,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StockListResponse {
        pub items: Vec<StockItemView>,
    }
}

pub mod sale {
    use super::*;

    /// Derived from paid vs. total amount; never set by clients.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentStatus {
        Unpaid,
        PartiallyPaid,
        FullyPaid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Customer {
        pub name: String,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub address: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleItemNew {
        pub product_id: Uuid,
        pub quantity_milli: i64,
        /// Overrides the product's current price when present.
        pub price_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleCreate {
        /// Defaults to today when absent.
        pub sold_on: Option<NaiveDate>,
        pub customer: Customer,
        pub items: Vec<SaleItemNew>,
        pub discount_minor: Option<i64>,
        pub tax_minor: Option<i64>,
        pub payment_method: Option<String>,
        /// Clamped to `[0, total]`; recorded as an "Initial payment".
        pub initial_payment_minor: Option<i64>,
    }

    /// Partial update; line items and totals are immutable after creation.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SaleUpdate {
        pub sold_on: Option<NaiveDate>,
        pub customer_name: Option<String>,
        pub customer_phone: Option<String>,
        pub customer_email: Option<String>,
        pub customer_address: Option<String>,
        pub payment_method: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        pub amount_minor: i64,
        pub method: Option<String>,
        pub note: Option<String>,
        /// Defaults to today when absent.
        pub paid_on: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: Uuid,
        pub paid_on: NaiveDate,
        pub amount_minor: i64,
        pub method: String,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleItemView {
        pub product_id: Uuid,
        /// Product name copied at sale time; later renames do not affect it.
        pub product_name: String,
        pub quantity_milli: i64,
        pub price_minor: i64,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleView {
        pub id: Uuid,
        pub sold_on: NaiveDate,
        pub customer: Customer,
        pub items: Vec<SaleItemView>,
        pub subtotal_minor: i64,
        pub discount_minor: i64,
        pub tax_minor: i64,
        pub total_minor: i64,
        pub paid_minor: i64,
        pub remaining_minor: i64,
        pub payment_method: String,
        pub payment_status: PaymentStatus,
        pub payments: Vec<PaymentView>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleListResponse {
        pub sales: Vec<SaleView>,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductBreakdownRow {
        pub product_name: String,
        pub quantity_milli: i64,
        pub revenue_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalesReport {
        pub total_sales_minor: i64,
        pub total_paid_minor: i64,
        pub total_pending_minor: i64,
        pub total_quantity_milli: i64,
        pub total_orders: u64,
        pub total_products: u64,
        /// Sorted by revenue, highest first.
        pub by_product: Vec<ProductBreakdownRow>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryReportQuery {
        /// 1-12.
        pub month: u32,
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryReportRow {
        pub employee_id: Uuid,
        pub name: String,
        pub role: String,
        pub salary_minor: i64,
        pub present_days: u32,
        /// `round(salary * present_days / days_in_month)`.
        pub calculated_salary_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryReport {
        pub month: u32,
        pub year: i32,
        pub days_in_month: u32,
        pub rows: Vec<SalaryReportRow>,
        pub total_payroll_minor: i64,
        pub average_salary_minor: i64,
    }
}
