pub mod builder;
pub mod normalizer;
pub mod parser;
pub mod types;

pub use builder::*;
pub use normalizer::*;
pub use parser::*;
pub use types::*;
