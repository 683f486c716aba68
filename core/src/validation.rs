//! Argument checks run before any request is built.

use crate::error::ApiError;

/// `.` and `..` are dropped rather than encoded when joined onto a URL, so
/// they can never stand for an identifier.
pub fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// Reject a survey id that is empty after trimming or a dot segment.
pub fn require_survey_id(survey_id: &str) -> Result<&str, ApiError> {
    if survey_id.trim().is_empty() {
        return Err(ApiError::InvalidArgument {
            name: "surveyId",
            reason: "cannot be empty",
        });
    }
    if is_dot_segment(survey_id) {
        return Err(ApiError::InvalidArgument {
            name: "surveyId",
            reason: "cannot be `.` or `..`",
        });
    }
    Ok(survey_id)
}

/// Reject an identifier that is absent, blank or a dot segment.
pub fn require_id<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    match value {
        None => Err(ApiError::InvalidArgument {
            name,
            reason: "is required",
        }),
        Some(v) if v.trim().is_empty() => Err(ApiError::InvalidArgument {
            name,
            reason: "cannot be empty",
        }),
        Some(v) if is_dot_segment(v) => Err(ApiError::InvalidArgument {
            name,
            reason: "cannot be `.` or `..`",
        }),
        Some(v) => Ok(v),
    }
}
