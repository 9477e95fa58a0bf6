pub mod compare;
pub mod query;
