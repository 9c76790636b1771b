#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid url given")]
    InvalidUrl,
    #[error("token exchange request failed: {0}")]
    Exchange(#[from] reqwest::Error),
    #[error("an IO error occured: {0}")]
    IO(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
