//! Service behaviour observed through a recording transport.
//!
//! # Design
//! `RecordingTransport` stores every request it receives and answers with a
//! caller-supplied closure, so tests can assert both what went over the wire
//! and that nothing went over the wire at all.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use survey_client::{
    ApiError, Connection, HttpMethod, HttpRequest, HttpResponse, HttpTransport, Interviewer,
    SurveyResponseCode, Translation, TransportError,
};

type Reply = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

struct RecordingTransport {
    calls: Mutex<Vec<HttpRequest>>,
    reply: Reply,
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = (self.reply)(&request);
        self.calls.lock().unwrap().push(request);
        reply
    }
}

fn ok(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    })
}

/// Build a connection whose transport answers with `reply`.
fn connect<F>(reply: F) -> (Connection, Arc<RecordingTransport>)
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
{
    let transport = Arc::new(RecordingTransport {
        calls: Mutex::new(Vec::new()),
        reply: Box::new(reply),
    });
    let connection = Connection::new("http://api.test/v1/", transport.clone()).unwrap();
    (connection, transport)
}

/// Answers every request with its own body, or `[]` when there is none.
fn echo() -> (Connection, Arc<RecordingTransport>) {
    connect(|req| ok(200, req.body.as_deref().unwrap_or("[]")))
}

fn calls(transport: &RecordingTransport) -> Vec<HttpRequest> {
    transport.calls.lock().unwrap().clone()
}

fn body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

fn saved_interviewer() -> Interviewer {
    Interviewer {
        interviewer_id: Some("i-1".to_string()),
        user_name: Some("ada".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email_address: Some("ada@example.com".to_string()),
        telephone_number: Some("0123".to_string()),
        password: None,
    }
}

// ---------------------------------------------------------------------------
// Validation happens before any transport call
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_survey_id_never_reaches_transport() {
    let (conn, transport) = echo();
    let translations = conn.translations();
    let codes = conn.response_codes();
    let text = Translation::new("Greeting", "Hello");
    let code = SurveyResponseCode {
        response_code: 1,
        ..Default::default()
    };

    for survey_id in ["", "   ", "\t"] {
        let results = [
            translations.query(survey_id, 5).await.map(|_| ()),
            translations.add(survey_id, 5, &text).await.map(|_| ()),
            translations.update(survey_id, 5, &text).await,
            translations.remove(survey_id, 5, &text).await,
            codes.query(survey_id).await.map(|_| ()),
            codes.get(survey_id, 1).await.map(|_| ()),
            codes.add(survey_id, &code).await.map(|_| ()),
            codes.update(survey_id, &code).await.map(|_| ()),
            codes.remove(survey_id, 1).await,
        ];
        for result in results {
            let err = result.unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidArgument { name: "surveyId", .. }),
                "{survey_id:?}: {err}"
            );
        }
    }
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn interviewer_without_id_never_reaches_transport() {
    let (conn, transport) = echo();
    let interviewers = conn.interviewers();

    for id in [None, Some(String::new()), Some("  ".to_string())] {
        let interviewer = Interviewer {
            interviewer_id: id,
            ..saved_interviewer()
        };
        assert!(interviewers.remove(&interviewer).await.unwrap_err().is_invalid_argument());
        assert!(interviewers.update(&interviewer).await.unwrap_err().is_invalid_argument());
        assert!(interviewers
            .change_password(&interviewer, "secret")
            .await
            .unwrap_err()
            .is_invalid_argument());
    }
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn translation_without_name_cannot_be_removed() {
    let (conn, transport) = echo();
    let nameless = Translation {
        name: None,
        text: Some("Hello".to_string()),
    };

    let err = conn.translations().remove("S1", 5, &nameless).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument { name: "name", .. }));
    assert!(calls(&transport).is_empty());
}

// ---------------------------------------------------------------------------
// URI construction and verbs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_translations_uri() {
    let (conn, transport) = echo();
    let texts = conn.translations().query("S1", 5).await.unwrap();
    assert!(texts.is_empty());

    let calls = calls(&transport);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, HttpMethod::Get);
    assert!(calls[0].url.ends_with("Surveys/S1/Languages/5/Translations"), "{}", calls[0].url);
    assert!(calls[0].body.is_none());
}

#[tokio::test]
async fn remove_translation_uri() {
    let (conn, transport) = connect(|_| ok(204, ""));
    conn.translations()
        .remove("S1", 5, &Translation::new("Greeting", "Hello"))
        .await
        .unwrap();

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Delete);
    assert_eq!(calls[0].url, "http://api.test/v1/Surveys/S1/Languages/5/Translations/Greeting");
}

#[tokio::test]
async fn identifiers_are_path_encoded() {
    let (conn, transport) = connect(|_| ok(204, ""));
    conn.translations()
        .remove("S 1", 5, &Translation::new("a/b", ""))
        .await
        .unwrap();

    assert_eq!(
        calls(&transport)[0].url,
        "http://api.test/v1/Surveys/S%201/Languages/5/Translations/a%2Fb"
    );
}

#[tokio::test]
async fn dot_segment_identifiers_never_reach_transport() {
    let (conn, transport) = connect(|_| ok(204, ""));

    for dot in [".", ".."] {
        let err = conn
            .translations()
            .remove("S1", 5, &Translation::new(dot, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument { name: "name", .. }), "{dot:?}");

        let err = conn.response_codes().remove(dot, 3).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument { name: "surveyId", .. }), "{dot:?}");

        let interviewer = Interviewer {
            interviewer_id: Some(dot.to_string()),
            ..saved_interviewer()
        };
        let err = conn.interviewers().remove(&interviewer).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument { name: "interviewerId", .. }), "{dot:?}");
    }
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn default_texts_uri() {
    let (conn, transport) = connect(|_| ok(200, r#"[{"Name":"ButtonNext","Text":"Next"}]"#));
    let texts = conn.translations().default_texts().await.unwrap();
    assert_eq!(texts, vec![Translation::new("ButtonNext", "Next")]);
    assert_eq!(calls(&transport)[0].url, "http://api.test/v1/DefaultTexts");
}

#[tokio::test]
async fn interviewer_update_patches_projection() {
    let (conn, transport) = echo();
    let interviewer = Interviewer {
        password: Some("should-not-be-sent".to_string()),
        ..saved_interviewer()
    };
    conn.interviewers().update(&interviewer).await.unwrap();

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Patch);
    assert_eq!(calls[0].url, "http://api.test/v1/interviewers/i-1");
    assert_eq!(
        body(&calls[0]),
        json!({
            "FirstName": "Ada",
            "LastName": "Lovelace",
            "EmailAddress": "ada@example.com",
            "TelephoneNumber": "0123",
        })
    );
}

#[tokio::test]
async fn interviewer_change_password_puts_password_only() {
    let (conn, transport) = connect(|_| ok(200, r#"{"InterviewerId":"i-1","UserName":"ada"}"#));
    let returned = conn
        .interviewers()
        .change_password(&saved_interviewer(), "n3w")
        .await
        .unwrap();
    assert_eq!(returned.interviewer_id.as_deref(), Some("i-1"));
    assert!(returned.password.is_none());

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Put);
    assert_eq!(calls[0].url, "http://api.test/v1/interviewers/i-1");
    assert_eq!(body(&calls[0]), json!({"Password": "n3w"}));
}

#[tokio::test]
async fn interviewer_remove_deletes_item() {
    let (conn, transport) = connect(|_| ok(204, ""));
    conn.interviewers().remove(&saved_interviewer()).await.unwrap();

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Delete);
    assert_eq!(calls[0].url, "http://api.test/v1/interviewers/i-1");
}

#[tokio::test]
async fn translation_update_puts_full_entity_to_collection() {
    // The response body is ignored, even when it is not JSON.
    let (conn, transport) = connect(|_| ok(200, "ok"));
    conn.translations()
        .update("S1", 5, &Translation::new("Greeting", "Hi"))
        .await
        .unwrap();

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Put);
    assert_eq!(calls[0].url, "http://api.test/v1/Surveys/S1/Languages/5/Translations");
    assert_eq!(body(&calls[0]), json!({"Name": "Greeting", "Text": "Hi"}));
}

#[tokio::test]
async fn response_code_update_patches_item_projection() {
    let (conn, transport) = connect(|_| ok(200, r#"{"SurveyId":"S1","ResponseCode":12}"#));
    let code = SurveyResponseCode {
        survey_id: Some("S1".to_string()),
        response_code: 12,
        response_code_description: Some("Refused".to_string()),
        is_definite: Some(false),
        is_selectable: None,
        allow_appointment: Some(true),
    };
    conn.response_codes().update("S1", &code).await.unwrap();

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Patch);
    assert_eq!(calls[0].url, "http://api.test/v1/Surveys/S1/ResponseCodes/12");
    assert_eq!(
        body(&calls[0]),
        json!({
            "ResponseCodeDescription": "Refused",
            "IsDefinite": false,
            "IsSelectable": null,
            "AllowAppointment": true,
        })
    );
}

#[tokio::test]
async fn response_code_get_and_remove_address_item() {
    let (conn, transport) = connect(|req| match req.method {
        HttpMethod::Get => ok(200, r#"{"SurveyId":"S1","ResponseCode":3}"#),
        _ => ok(204, ""),
    });
    let codes = conn.response_codes();
    let code = codes.get("S1", 3).await.unwrap();
    assert_eq!(code.response_code, 3);
    codes.remove("S1", 3).await.unwrap();

    let calls = calls(&transport);
    assert_eq!(calls[0].url, "http://api.test/v1/Surveys/S1/ResponseCodes/3");
    assert_eq!(calls[1].method, HttpMethod::Delete);
    assert_eq!(calls[1].url, calls[0].url);
}

// ---------------------------------------------------------------------------
// Round-trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn added_interviewer_round_trips() {
    let (conn, transport) = connect(|req| {
        let body = req.body.as_deref().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(body).unwrap();
        value["InterviewerId"] = json!("assigned-by-server");
        ok(201, &value.to_string())
    });
    let input = Interviewer {
        interviewer_id: None,
        ..saved_interviewer()
    };

    let created = conn.interviewers().add(&input).await.unwrap();
    assert_eq!(created.interviewer_id.as_deref(), Some("assigned-by-server"));
    assert_eq!(
        Interviewer {
            interviewer_id: None,
            ..created
        },
        input
    );

    let calls = calls(&transport);
    assert_eq!(calls[0].method, HttpMethod::Post);
    assert_eq!(calls[0].url, "http://api.test/v1/interviewers");
    assert!(body(&calls[0]).get("InterviewerId").is_none());
}

#[tokio::test]
async fn response_code_flags_round_trip_all_three_states() {
    let (conn, _transport) = echo();
    let flags = [Some(true), Some(false), None];

    for is_definite in flags {
        for allow_appointment in flags {
            let code = SurveyResponseCode {
                survey_id: Some("S1".to_string()),
                response_code: 7,
                response_code_description: None,
                is_definite,
                is_selectable: Some(false),
                allow_appointment,
            };
            let back = conn.response_codes().add("S1", &code).await.unwrap();
            assert_eq!(back, code);
        }
    }
}

#[tokio::test]
async fn queried_records_are_fresh_values() {
    let (conn, _transport) =
        connect(|_| ok(200, r#"[{"Name":"A","Text":"1"},{"Name":"B","Text":"2"}]"#));
    let translations = conn.translations();

    let mut first = translations.query("S1", 5).await.unwrap();
    first[0].text = Some("changed locally".to_string());
    let second = translations.query("S1", 5).await.unwrap();

    assert_eq!(second[0].text.as_deref(), Some("1"));
    let names: Vec<_> = second.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, ["A", "B"]);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transport_fault_surfaces_once_without_retry() {
    let (conn, transport) = connect(|_| Err(TransportError::new("connection reset")));

    let err = conn.interviewers().query().await.unwrap_err();
    match err {
        ApiError::Transport(inner) => assert_eq!(inner.message(), "connection reset"),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(calls(&transport).len(), 1);
}

#[tokio::test]
async fn server_errors_map_to_api_errors() {
    let (conn, _) = connect(|_| ok(404, ""));
    assert!(matches!(
        conn.response_codes().get("S1", 1).await.unwrap_err(),
        ApiError::NotFound
    ));

    let (conn, _) = connect(|_| ok(409, "duplicate"));
    let err = conn
        .response_codes()
        .add("S1", &SurveyResponseCode::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 409, ref body } if body == "duplicate"));

    let (conn, _) = connect(|_| ok(200, "<html>"));
    assert!(matches!(
        conn.interviewers().query().await.unwrap_err(),
        ApiError::DeserializationError(_)
    ));
}

#[tokio::test]
async fn concurrent_calls_share_one_connection() {
    let (conn, transport) = echo();
    let interviewers = conn.interviewers();
    let translations = conn.translations();

    let (a, b, c) = tokio::join!(
        interviewers.query(),
        translations.query("S1", 5),
        translations.query("S2", 6),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(calls(&transport).len(), 3);
}
