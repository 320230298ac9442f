pub mod client;
pub mod row;
