pub mod title;
pub mod value;
