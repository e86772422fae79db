//! Initial schema migration - creates all tables from scratch.
//!
//! Complete schema for Mithai:
//!
//! - `users`: authentication, one account per shop owner
//! - `employees`: staff with a monthly salary
//! - `attendance`: one row per employee per day
//! - `products`: the sweets catalog
//! - `stock_items`: raw-material inventory
//! - `sales`: orders with cached totals and payment status
//! - `sale_items`: line items, product name copied at sale time
//! - `payments`: the payment ledger of a sale

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
    FullName,
    Email,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Owner,
    Name,
    Contact,
    Role,
    JoiningDate,
    SalaryMinor,
    Status,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Attendance {
    Table,
    EmployeeId,
    Day,
    Status,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Owner,
    Name,
    NameNorm,
    Description,
    PriceMinor,
    Unit,
    Category,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum StockItems {
    Table,
    Id,
    Owner,
    Name,
    QuantityMilli,
    Unit,
    Description,
    ReceivedOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    Owner,
    SoldOn,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    CustomerAddress,
    SubtotalMinor,
    DiscountMinor,
    TaxMinor,
    TotalMinor,
    PaidMinor,
    RemainingMinor,
    PaymentMethod,
    PaymentStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SaleItems {
    Table,
    Id,
    SaleId,
    ProductId,
    ProductName,
    QuantityMilli,
    PriceMinor,
    TotalMinor,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    SaleId,
    PaidOn,
    AmountMinor,
    Method,
    Note,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Employees
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Owner).string().not_null())
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::Contact).string().not_null())
                    .col(ColumnDef::new(Employees::Role).string().not_null())
                    .col(ColumnDef::new(Employees::JoiningDate).date().not_null())
                    .col(
                        ColumnDef::new(Employees::SalaryMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Status).string().not_null())
                    .col(ColumnDef::new(Employees::Address).string())
                    .col(ColumnDef::new(Employees::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Employees::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employees-owner")
                            .from(Employees::Table, Employees::Owner)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-employees-owner")
                    .table(Employees::Table)
                    .col(Employees::Owner)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Attendance
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Attendance::EmployeeId).string().not_null())
                    .col(ColumnDef::new(Attendance::Day).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(Attendance::EmployeeId)
                            .col(Attendance::Day),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendance-employee_id")
                            .from(Attendance::Table, Attendance::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Products
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Owner).string().not_null())
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::NameNorm).string().not_null())
                    .col(ColumnDef::new(Products::Description).string().not_null())
                    .col(
                        ColumnDef::new(Products::PriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::Unit).string().not_null())
                    .col(ColumnDef::new(Products::Category).string())
                    .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-products-owner")
                            .from(Products::Table, Products::Owner)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-products-owner-name_norm-unique")
                    .table(Products::Table)
                    .col(Products::Owner)
                    .col(Products::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Stock items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(StockItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockItems::Owner).string().not_null())
                    .col(ColumnDef::new(StockItems::Name).string().not_null())
                    .col(
                        ColumnDef::new(StockItems::QuantityMilli)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockItems::Unit).string().not_null())
                    .col(ColumnDef::new(StockItems::Description).string().not_null())
                    .col(ColumnDef::new(StockItems::ReceivedOn).date().not_null())
                    .col(ColumnDef::new(StockItems::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(StockItems::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-stock_items-owner")
                            .from(StockItems::Table, StockItems::Owner)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stock_items-owner")
                    .table(StockItems::Table)
                    .col(StockItems::Owner)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Sales
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sales::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Sales::Owner).string().not_null())
                    .col(ColumnDef::new(Sales::SoldOn).date().not_null())
                    .col(ColumnDef::new(Sales::CustomerName).string().not_null())
                    .col(ColumnDef::new(Sales::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Sales::CustomerEmail).string())
                    .col(ColumnDef::new(Sales::CustomerAddress).string())
                    .col(
                        ColumnDef::new(Sales::SubtotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sales::DiscountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::TaxMinor).big_integer().not_null())
                    .col(ColumnDef::new(Sales::TotalMinor).big_integer().not_null())
                    .col(ColumnDef::new(Sales::PaidMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sales::RemainingMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Sales::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(Sales::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Sales::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales-owner")
                            .from(Sales::Table, Sales::Owner)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sales-owner-sold_on")
                    .table(Sales::Table)
                    .col(Sales::Owner)
                    .col(Sales::SoldOn)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Sale items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SaleItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SaleItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SaleItems::SaleId).string().not_null())
                    .col(ColumnDef::new(SaleItems::ProductId).string().not_null())
                    .col(ColumnDef::new(SaleItems::ProductName).string().not_null())
                    .col(
                        ColumnDef::new(SaleItems::QuantityMilli)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SaleItems::PriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SaleItems::TotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sale_items-sale_id")
                            .from(SaleItems::Table, SaleItems::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sale_items-sale_id")
                    .table(SaleItems::Table)
                    .col(SaleItems::SaleId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::SaleId).string().not_null())
                    .col(ColumnDef::new(Payments::PaidOn).date().not_null())
                    .col(
                        ColumnDef::new(Payments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::Method).string().not_null())
                    .col(ColumnDef::new(Payments::Note).string())
                    .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payments-sale_id")
                            .from(Payments::Table, Payments::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-sale_id")
                    .table(Payments::Table)
                    .col(Payments::SaleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SaleItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
