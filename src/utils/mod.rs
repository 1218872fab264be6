mod errors;

pub use errors::Error;

pub type CinedexResult<T> = Result<T, Error>;
