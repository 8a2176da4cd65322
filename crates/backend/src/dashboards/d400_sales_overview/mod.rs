pub mod aggregations;
pub mod charts;
pub mod filter;
pub mod interaction;
pub mod service;
