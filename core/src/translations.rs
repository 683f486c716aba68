//! Survey translations, keyed by survey, language and text name:
//! `Surveys/{surveyId}/Languages/{languageId}/Translations[/{name}]`.

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::resource::{Resource, ResourceClient, ResourcePath};
use crate::types::Translation;
use crate::validation::{require_id, require_survey_id};

/// Updates PUT the full entity to the collection URI and return nothing.
#[derive(Debug)]
pub enum Translations {}

impl Resource for Translations {
    type Entity = Translation;
    const NAME: &'static str = "translations";
    const UPDATE_METHOD: HttpMethod = HttpMethod::Put;
}

#[derive(Debug, Clone)]
pub struct TranslationsService {
    client: ResourceClient<Translations>,
}

fn collection(survey_id: &str, language_id: i32) -> Result<ResourcePath, ApiError> {
    let survey_id = require_survey_id(survey_id)?;
    Ok(ResourcePath::new()
        .segment("Surveys")
        .segment(survey_id)
        .segment("Languages")
        .segment(language_id)
        .segment("Translations"))
}

impl TranslationsService {
    pub fn new(connection: Connection) -> Self {
        Self {
            client: ResourceClient::new(connection),
        }
    }

    pub async fn query(
        &self,
        survey_id: &str,
        language_id: i32,
    ) -> Result<Vec<Translation>, ApiError> {
        let path = collection(survey_id, language_id)?;
        self.client.query(&path).await
    }

    pub async fn add(
        &self,
        survey_id: &str,
        language_id: i32,
        translation: &Translation,
    ) -> Result<Translation, ApiError> {
        let path = collection(survey_id, language_id)?;
        self.client.add(&path, translation).await
    }

    /// The server locates the text by the `Name` inside the body.
    pub async fn update(
        &self,
        survey_id: &str,
        language_id: i32,
        translation: &Translation,
    ) -> Result<(), ApiError> {
        let path = collection(survey_id, language_id)?;
        self.client.update_discarding(&path, translation).await
    }

    /// Delete the text named by `translation.name`. A missing or blank name
    /// is rejected so the collection URI itself is never deleted.
    pub async fn remove(
        &self,
        survey_id: &str,
        language_id: i32,
        translation: &Translation,
    ) -> Result<(), ApiError> {
        let path = collection(survey_id, language_id)?;
        let name = require_id("name", translation.name.as_deref())?;
        self.client.remove(&path.segment(name)).await
    }

    /// Texts the server ships for languages without their own translation.
    pub async fn default_texts(&self) -> Result<Vec<Translation>, ApiError> {
        self.client.query(&ResourcePath::new().segment("DefaultTexts")).await
    }
}
