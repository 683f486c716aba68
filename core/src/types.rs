//! Domain DTOs for the survey API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift. Keys are PascalCase on the wire.
//! Response code flags are `Option<bool>` and always serialize, so `null`
//! stays distinct from `false`.

use serde::{Deserialize, Serialize};

/// An interviewer account.
///
/// `interviewer_id` is assigned by the server and is `None` until the
/// interviewer has been added. `password` is write-only: it is sent when set
/// and the server never returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Interviewer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub telephone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// The mutable subset of an interviewer sent on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateInterviewer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
}

impl From<&Interviewer> for UpdateInterviewer {
    fn from(interviewer: &Interviewer) -> Self {
        Self {
            first_name: interviewer.first_name.clone(),
            last_name: interviewer.last_name.clone(),
            email_address: interviewer.email_address.clone(),
            telephone_number: interviewer.telephone_number.clone(),
        }
    }
}

/// Request payload for changing an interviewer's password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangePassword {
    pub password: String,
}

/// A translated text for one survey language. `name` identifies the text
/// within its `(survey, language)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Translation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Translation {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: Some(text.into()),
        }
    }
}

/// A response code defined for a survey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SurveyResponseCode {
    #[serde(default)]
    pub survey_id: Option<String>,
    /// Unique within the survey.
    pub response_code: i32,
    #[serde(default)]
    pub response_code_description: Option<String>,
    #[serde(default)]
    pub is_definite: Option<bool>,
    #[serde(default)]
    pub is_selectable: Option<bool>,
    #[serde(default)]
    pub allow_appointment: Option<bool>,
}

/// The mutable subset of a response code sent on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSurveyResponseCode {
    pub response_code_description: Option<String>,
    pub is_definite: Option<bool>,
    pub is_selectable: Option<bool>,
    pub allow_appointment: Option<bool>,
}

impl From<&SurveyResponseCode> for UpdateSurveyResponseCode {
    fn from(code: &SurveyResponseCode) -> Self {
        Self {
            response_code_description: code.response_code_description.clone(),
            is_definite: code.is_definite,
            is_selectable: code.is_selectable,
            allow_appointment: code.allow_appointment,
        }
    }
}
