pub mod link;
pub mod pagination;
pub mod query;
