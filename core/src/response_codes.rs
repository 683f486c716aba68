//! Survey response codes: `Surveys/{surveyId}/ResponseCodes[/{code}]`.

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::resource::{Resource, ResourceClient, ResourcePath};
use crate::types::{SurveyResponseCode, UpdateSurveyResponseCode};
use crate::validation::require_survey_id;

/// Updates are PATCHed with the `UpdateSurveyResponseCode` projection.
#[derive(Debug)]
pub enum SurveyResponseCodes {}

impl Resource for SurveyResponseCodes {
    type Entity = SurveyResponseCode;
    const NAME: &'static str = "response_codes";
    const UPDATE_METHOD: HttpMethod = HttpMethod::Patch;
}

#[derive(Debug, Clone)]
pub struct SurveyResponseCodesService {
    client: ResourceClient<SurveyResponseCodes>,
}

fn collection(survey_id: &str) -> Result<ResourcePath, ApiError> {
    let survey_id = require_survey_id(survey_id)?;
    Ok(ResourcePath::new()
        .segment("Surveys")
        .segment(survey_id)
        .segment("ResponseCodes"))
}

impl SurveyResponseCodesService {
    pub fn new(connection: Connection) -> Self {
        Self {
            client: ResourceClient::new(connection),
        }
    }

    pub async fn query(&self, survey_id: &str) -> Result<Vec<SurveyResponseCode>, ApiError> {
        let path = collection(survey_id)?;
        self.client.query(&path).await
    }

    pub async fn get(&self, survey_id: &str, code: i32) -> Result<SurveyResponseCode, ApiError> {
        let path = collection(survey_id)?.segment(code);
        self.client.get(&path).await
    }

    pub async fn add(
        &self,
        survey_id: &str,
        response_code: &SurveyResponseCode,
    ) -> Result<SurveyResponseCode, ApiError> {
        let path = collection(survey_id)?;
        self.client.add(&path, response_code).await
    }

    /// The code number addresses the record and cannot itself be changed.
    pub async fn update(
        &self,
        survey_id: &str,
        response_code: &SurveyResponseCode,
    ) -> Result<SurveyResponseCode, ApiError> {
        let path = collection(survey_id)?.segment(response_code.response_code);
        self.client
            .update(&path, &UpdateSurveyResponseCode::from(response_code))
            .await
    }

    pub async fn remove(&self, survey_id: &str, code: i32) -> Result<(), ApiError> {
        let path = collection(survey_id)?.segment(code);
        self.client.remove(&path).await
    }
}
