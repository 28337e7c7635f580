pub mod list;
pub mod push_all;
