//! Presentational building blocks shared by the page views.

pub mod data_table;
