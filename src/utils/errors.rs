use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to analyze title: {0:?}")]
    TitleParse(String),
}
