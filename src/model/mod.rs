pub mod activity;
pub mod statement;
