//! The context every service is bound to: base server URI plus transport.
//!
//! A `Connection` is built once and never mutated afterwards. Cloning it is
//! an `Arc` bump, so services and concurrent calls share it read-only.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::interviewers::InterviewersService;
use crate::response_codes::SurveyResponseCodesService;
use crate::transport::ReqwestTransport;
use crate::translations::TranslationsService;

#[derive(Clone)]
pub struct Connection {
    server_uri: Url,
    transport: Arc<dyn HttpTransport>,
}

impl Connection {
    /// Bind a transport to `server_uri`.
    ///
    /// # Errors
    /// `InvalidConfig` when the URI does not parse or cannot carry path
    /// segments (e.g. `mailto:`).
    pub fn new(server_uri: &str, transport: Arc<dyn HttpTransport>) -> Result<Self, ApiError> {
        let server_uri = Url::parse(server_uri.trim()).map_err(|e| {
            ApiError::InvalidConfig(format!("invalid server URI {server_uri:?}: {e}"))
        })?;
        if server_uri.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "server URI {server_uri} cannot be a base"
            )));
        }
        Ok(Self {
            server_uri,
            transport,
        })
    }

    /// Bind a `ReqwestTransport` configured from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Self::new(&config.server_uri, Arc::new(transport))
    }

    pub fn server_uri(&self) -> &Url {
        &self.server_uri
    }

    pub fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    pub fn interviewers(&self) -> InterviewersService {
        InterviewersService::new(self.clone())
    }

    pub fn translations(&self) -> TranslationsService {
        TranslationsService::new(self.clone())
    }

    pub fn response_codes(&self) -> SurveyResponseCodesService {
        SurveyResponseCodesService::new(self.clone())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("server_uri", &self.server_uri.as_str())
            .finish_non_exhaustive()
    }
}
