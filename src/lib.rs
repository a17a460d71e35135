pub mod cli;
pub mod error;
pub mod histogram;
pub mod search;
pub mod similarity;
pub mod store;
pub mod ui;
