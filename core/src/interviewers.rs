//! Interviewer accounts: `interviewers` and `interviewers/{id}`.

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::resource::{Resource, ResourceClient, ResourcePath};
use crate::types::{ChangePassword, Interviewer, UpdateInterviewer};
use crate::validation::require_id;

/// Updates are PATCHed with the `UpdateInterviewer` projection.
#[derive(Debug)]
pub enum Interviewers {}

impl Resource for Interviewers {
    type Entity = Interviewer;
    const NAME: &'static str = "interviewers";
    const UPDATE_METHOD: HttpMethod = HttpMethod::Patch;
}

#[derive(Debug, Clone)]
pub struct InterviewersService {
    client: ResourceClient<Interviewers>,
}

fn collection() -> ResourcePath {
    ResourcePath::new().segment("interviewers")
}

fn item(interviewer: &Interviewer) -> Result<ResourcePath, ApiError> {
    let id = require_id("interviewerId", interviewer.interviewer_id.as_deref())?;
    Ok(collection().segment(id))
}

impl InterviewersService {
    pub fn new(connection: Connection) -> Self {
        Self {
            client: ResourceClient::new(connection),
        }
    }

    /// Create an interviewer. The returned record carries the
    /// server-assigned id.
    pub async fn add(&self, interviewer: &Interviewer) -> Result<Interviewer, ApiError> {
        self.client.add(&collection(), interviewer).await
    }

    pub async fn remove(&self, interviewer: &Interviewer) -> Result<(), ApiError> {
        let path = item(interviewer)?;
        self.client.remove(&path).await
    }

    /// Send the name, email and telephone fields. The id only addresses the
    /// record; the password is never sent here.
    pub async fn update(&self, interviewer: &Interviewer) -> Result<Interviewer, ApiError> {
        let path = item(interviewer)?;
        self.client.update(&path, &UpdateInterviewer::from(interviewer)).await
    }

    pub async fn query(&self) -> Result<Vec<Interviewer>, ApiError> {
        self.client.query(&collection()).await
    }

    pub async fn change_password(
        &self,
        interviewer: &Interviewer,
        password: &str,
    ) -> Result<Interviewer, ApiError> {
        let path = item(interviewer)?;
        let body = ChangePassword {
            password: password.to_string(),
        };
        self.client.replace(&path, &body).await
    }
}
