//! Async client for the survey-management REST API.
//!
//! # Overview
//! One service per resource collection (interviewers, translations, survey
//! response codes), all built on the generic `ResourceClient`. Every
//! operation validates its identifiers, builds one `HttpRequest`, hands it to
//! the injected `HttpTransport` and parses the JSON response.
//!
//! # Design
//! - `Connection` is the immutable context: base URI plus transport, bound
//!   once and shared read-only by every service and call.
//! - The `build_request` / `parse_*` halves of a call are pure functions;
//!   only `HttpTransport::execute` does I/O. Tests swap in a recording
//!   transport.
//! - Failures are one flat `ApiError` per call. Nothing is retried.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! # async fn run() -> Result<(), survey_client::ApiError> {
//! use survey_client::{ClientConfig, Connection};
//!
//! let connection = Connection::from_config(&ClientConfig::from_env()?)?;
//! let texts = connection.translations().query("S1", 5).await?;
//! let greeting = texts.iter().find(|t| t.name.as_deref() == Some("Greeting"));
//! # let _ = greeting;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod http;
pub mod interviewers;
pub mod resource;
pub mod response_codes;
pub mod translations;
pub mod transport;
pub mod types;
pub mod validation;

pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use interviewers::InterviewersService;
pub use resource::{Resource, ResourceClient, ResourcePath};
pub use response_codes::SurveyResponseCodesService;
pub use translations::TranslationsService;
pub use transport::ReqwestTransport;
pub use types::{
    ChangePassword, Interviewer, SurveyResponseCode, Translation, UpdateInterviewer,
    UpdateSurveyResponseCode,
};
