use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("http request error: {0}")]
    Request(String),
    #[error("forecast api answered with status {0}")]
    Status(u16),
}
impl From<ureq::Error> for ForecastError {
    fn from(e: ureq::Error) -> ForecastError {
        match e {
            ureq::Error::StatusCode(code) => ForecastError::Status(code),
            e => ForecastError::Request(e.to_string()),
        }
    }
}
