//! In-memory implementation of the survey API routes.
//!
//! Wire shapes match the client's DTOs: PascalCase keys, `null` for unset
//! flags. Creates return 201, deletes 204, unknown items 404 and a duplicate
//! response code 409.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Interviewer {
    #[serde(default)]
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
    /// Accepted on create, never returned.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateInterviewer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangePassword {
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Translation {
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SurveyResponseCode {
    #[serde(default)]
    pub survey_id: Option<String>,
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

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSurveyResponseCode {
    pub response_code_description: Option<String>,
    pub is_definite: Option<bool>,
    pub is_selectable: Option<bool>,
    pub allow_appointment: Option<bool>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub interviewers: BTreeMap<String, Interviewer>,
    pub translations: BTreeMap<(String, i32), BTreeMap<String, Translation>>,
    pub response_codes: BTreeMap<String, BTreeMap<i32, SurveyResponseCode>>,
    pub default_texts: Vec<Translation>,
}

pub type Db = Arc<RwLock<Store>>;

/// Texts served from `/DefaultTexts` by `app()`.
pub fn default_texts() -> Vec<Translation> {
    [("ButtonNext", "Next"), ("ButtonBack", "Back")]
        .into_iter()
        .map(|(name, text)| Translation {
            name: name.to_string(),
            text: Some(text.to_string()),
        })
        .collect()
}

pub fn app() -> Router {
    app_with(Store {
        default_texts: default_texts(),
        ..Store::default()
    })
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/interviewers", get(list_interviewers).post(create_interviewer))
        .route(
            "/interviewers/{id}",
            put(change_password).patch(update_interviewer).delete(delete_interviewer),
        )
        .route(
            "/Surveys/{survey_id}/Languages/{language_id}/Translations",
            get(list_translations).post(create_translation).put(update_translation),
        )
        .route(
            "/Surveys/{survey_id}/Languages/{language_id}/Translations/{name}",
            delete(delete_translation),
        )
        .route("/DefaultTexts", get(list_default_texts))
        .route(
            "/Surveys/{survey_id}/ResponseCodes",
            get(list_response_codes).post(create_response_code),
        )
        .route(
            "/Surveys/{survey_id}/ResponseCodes/{code}",
            get(get_response_code)
                .patch(update_response_code)
                .delete(delete_response_code),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- interviewers ---

async fn list_interviewers(State(db): State<Db>) -> Json<Vec<Interviewer>> {
    let store = db.read().await;
    Json(store.interviewers.values().cloned().collect())
}

async fn create_interviewer(
    State(db): State<Db>,
    Json(mut input): Json<Interviewer>,
) -> (StatusCode, Json<Interviewer>) {
    let id = Uuid::new_v4().simple().to_string();
    input.interviewer_id = Some(id.clone());
    debug!(%id, "interviewer created");
    db.write().await.interviewers.insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn update_interviewer(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateInterviewer>,
) -> Result<Json<Interviewer>, StatusCode> {
    let mut store = db.write().await;
    let interviewer = store.interviewers.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(first_name) = input.first_name {
        interviewer.first_name = Some(first_name);
    }
    if let Some(last_name) = input.last_name {
        interviewer.last_name = Some(last_name);
    }
    if let Some(email_address) = input.email_address {
        interviewer.email_address = Some(email_address);
    }
    if let Some(telephone_number) = input.telephone_number {
        interviewer.telephone_number = Some(telephone_number);
    }
    Ok(Json(interviewer.clone()))
}

async fn change_password(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ChangePassword>,
) -> Result<Json<Interviewer>, StatusCode> {
    let mut store = db.write().await;
    let interviewer = store.interviewers.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    interviewer.password = Some(input.password);
    Ok(Json(interviewer.clone()))
}

async fn delete_interviewer(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .interviewers
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- translations ---

async fn list_translations(
    State(db): State<Db>,
    Path(key): Path<(String, i32)>,
) -> Json<Vec<Translation>> {
    let store = db.read().await;
    let texts = store
        .translations
        .get(&key)
        .map(|texts| texts.values().cloned().collect())
        .unwrap_or_default();
    Json(texts)
}

async fn create_translation(
    State(db): State<Db>,
    Path(key): Path<(String, i32)>,
    Json(input): Json<Translation>,
) -> Result<(StatusCode, Json<Translation>), StatusCode> {
    let mut store = db.write().await;
    match store.translations.entry(key).or_default().entry(input.name.clone()) {
        Entry::Occupied(_) => Err(StatusCode::CONFLICT),
        Entry::Vacant(slot) => {
            slot.insert(input.clone());
            Ok((StatusCode::CREATED, Json(input)))
        }
    }
}

async fn update_translation(
    State(db): State<Db>,
    Path(key): Path<(String, i32)>,
    Json(input): Json<Translation>,
) -> Result<Json<Translation>, StatusCode> {
    let mut store = db.write().await;
    let existing = store
        .translations
        .get_mut(&key)
        .and_then(|texts| texts.get_mut(&input.name))
        .ok_or(StatusCode::NOT_FOUND)?;
    existing.text = input.text;
    Ok(Json(existing.clone()))
}

async fn delete_translation(
    State(db): State<Db>,
    Path((survey_id, language_id, name)): Path<(String, i32, String)>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .translations
        .get_mut(&(survey_id, language_id))
        .and_then(|texts| texts.remove(&name))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_default_texts(State(db): State<Db>) -> Json<Vec<Translation>> {
    Json(db.read().await.default_texts.clone())
}

// --- response codes ---

async fn list_response_codes(
    State(db): State<Db>,
    Path(survey_id): Path<String>,
) -> Json<Vec<SurveyResponseCode>> {
    let store = db.read().await;
    let codes = store
        .response_codes
        .get(&survey_id)
        .map(|codes| codes.values().cloned().collect())
        .unwrap_or_default();
    Json(codes)
}

async fn create_response_code(
    State(db): State<Db>,
    Path(survey_id): Path<String>,
    Json(mut input): Json<SurveyResponseCode>,
) -> Result<(StatusCode, Json<SurveyResponseCode>), StatusCode> {
    input.survey_id = Some(survey_id.clone());
    let mut store = db.write().await;
    match store.response_codes.entry(survey_id).or_default().entry(input.response_code) {
        Entry::Occupied(_) => Err(StatusCode::CONFLICT),
        Entry::Vacant(slot) => {
            slot.insert(input.clone());
            Ok((StatusCode::CREATED, Json(input)))
        }
    }
}

async fn get_response_code(
    State(db): State<Db>,
    Path((survey_id, code)): Path<(String, i32)>,
) -> Result<Json<SurveyResponseCode>, StatusCode> {
    let store = db.read().await;
    store
        .response_codes
        .get(&survey_id)
        .and_then(|codes| codes.get(&code))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Every field of the projection is written, so `null` clears a flag.
async fn update_response_code(
    State(db): State<Db>,
    Path((survey_id, code)): Path<(String, i32)>,
    Json(input): Json<UpdateSurveyResponseCode>,
) -> Result<Json<SurveyResponseCode>, StatusCode> {
    let mut store = db.write().await;
    let existing = store
        .response_codes
        .get_mut(&survey_id)
        .and_then(|codes| codes.get_mut(&code))
        .ok_or(StatusCode::NOT_FOUND)?;
    existing.response_code_description = input.response_code_description;
    existing.is_definite = input.is_definite;
    existing.is_selectable = input.is_selectable;
    existing.allow_appointment = input.allow_appointment;
    Ok(Json(existing.clone()))
}

async fn delete_response_code(
    State(db): State<Db>,
    Path((survey_id, code)): Path<(String, i32)>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .response_codes
        .get_mut(&survey_id)
        .and_then(|codes| codes.remove(&code))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
