// src/schema/mod.rs

pub mod ddl;
pub mod naming;

pub use ddl::{create_table_sql, insert_sql, quote_ident};
pub use naming::{column_names, sanitize_column_name, UNNAMED_COLUMN};
