use crate::session::SessionState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{event} event received while session is {state}")]
    InvalidState {
        event: &'static str,
        state: SessionState,
    },

    #[error(transparent)]
    Har(#[from] harlog_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
