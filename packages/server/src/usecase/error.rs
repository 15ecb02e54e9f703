//! Use case error types.

use thiserror::Error;

use crate::domain::{ReadError, RoomError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Why a connection's relay loop ended abnormally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("read failed: {0}")]
    Read(#[from] ReadError),

    #[error("could not relay message: {0}")]
    Send(#[from] SendMessageError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
