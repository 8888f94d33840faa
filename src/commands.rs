pub mod info;
pub mod select;
