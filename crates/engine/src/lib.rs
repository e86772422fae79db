pub use attendance::{Attendance, AttendanceStatus, days_in_month, prorated_salary_minor};
pub use employees::{Employee, EmployeeChanges, EmployeeStatus, NewEmployee};
pub use error::EngineError;
pub use ops::{
    AttendanceMonth, Engine, EngineBuilder, SalaryLine, SalaryReport, SalesReport, SalesReportRow,
};
pub use payments::{NewPayment, PaymentRecord};
pub use products::{NewProduct, Product, ProductChanges};
pub use sale_items::{NewSaleItem, SaleItem};
pub use sales::{DEFAULT_PAYMENT_METHOD, NewSale, PaymentStatus, Sale, SaleChanges};
pub use stock_items::{NewStockItem, StockItem, StockItemChanges};
pub use users::{NewUser, Role, User};

mod attendance;
mod employees;
mod error;
mod ops;
mod payments;
mod products;
mod sale_items;
mod sales;
mod stock_items;
// The server's auth middleware queries this entity directly.
pub mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
