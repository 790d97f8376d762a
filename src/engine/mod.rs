pub mod odds;
pub mod summary;
