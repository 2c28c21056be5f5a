//! Uniform `{status, message, data}` response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Response envelope shared by all endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = ()> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful envelope wrapping `data`.
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a human readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    /// Successful envelope with only a message.
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failed envelope with only a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// An envelope paired with the HTTP status code it is sent with.
#[derive(Debug)]
pub struct Reply<T = ()> {
    pub code: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> Reply<T> {
    pub fn ok(body: Envelope<T>) -> Self {
        Self {
            code: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: Envelope<T>) -> Self {
        Self {
            code: StatusCode::CREATED,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}
