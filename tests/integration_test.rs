use company_info::api::types::*;
use company_info::api::{ApiType, ClientConfig, CompanyInfoClient};
use company_info::error::CompanyInfoError;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

const NUMBER: &str = "1234567890123";

fn mof_client(base_url: &str) -> CompanyInfoClient {
    let config = ClientConfig::mof("test_key", "4", ResponseType::XmlUnicode).with_base_url(base_url);
    CompanyInfoClient::new(config).unwrap()
}

fn meti_client(base_url: &str) -> CompanyInfoClient {
    let config = ClientConfig::meti("meti_token").with_base_url(base_url);
    CompanyInfoClient::new(config).unwrap()
}

#[test]
fn test_api_type_from_str() {
    assert_eq!(ApiType::from_str("mof"), Some(ApiType::Mof));
    assert_eq!(ApiType::from_str("meti"), Some(ApiType::Meti));
    assert_eq!(ApiType::from_str("invalid"), None);
}

#[tokio::test]
async fn test_mof_number_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/4/num")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".to_string(), "test_key".to_string()),
            Matcher::UrlEncoded("number".to_string(), NUMBER.to_string()),
            Matcher::UrlEncoded("type".to_string(), "12".to_string()),
            Matcher::UrlEncoded("history".to_string(), "1".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/xml; charset=UTF-8")
        .with_body("<corporations><count>1</count></corporations>")
        .create_async()
        .await;

    let options = NumberOptions::Mof(NumberSearchOptions {
        history: Some(Flag::Include),
    });
    let payload = mof_client(&server.url())
        .search_by_number(NUMBER, &options)
        .await
        .unwrap();

    assert_eq!(payload.text(), "<corporations><count>1</count></corporations>");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_mof_shift_jis_body_is_returned_byte_for_byte() {
    let mut server = Server::new_async().await;
    // "株式会社" in Shift-JIS
    let body: Vec<u8> = vec![0x8a, 0x94, 0x8e, 0xae, 0x89, 0xef, 0x8e, 0xd0];
    let _mock = server
        .mock("GET", "/4/num")
        .match_query(Matcher::UrlEncoded("type".to_string(), "01".to_string()))
        .with_status(200)
        .with_body(body.clone())
        .create_async()
        .await;

    let config = ClientConfig::mof("test_key", "4", ResponseType::CsvShiftJis)
        .with_base_url(server.url());
    let payload = CompanyInfoClient::new(config)
        .unwrap()
        .search_by_number(NUMBER, &NumberOptions::default_for(ApiType::Mof))
        .await
        .unwrap();

    assert_eq!(payload.as_bytes(), body.as_slice());
}

#[tokio::test]
async fn test_mof_error_status_is_api_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/4/num")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("<error>invalid application id</error>")
        .create_async()
        .await;

    let err = mof_client(&server.url())
        .search_by_number(NUMBER, &NumberOptions::default_for(ApiType::Mof))
        .await
        .unwrap_err();

    match err {
        CompanyInfoError::ApiError { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "<error>invalid application id</error>");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let err = mof_client("http://127.0.0.1:9")
        .search_by_number(NUMBER, &NumberOptions::default_for(ApiType::Mof))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, CompanyInfoError::Transport(_)));
}

#[tokio::test]
async fn test_mof_name_search_sends_raw_name_fragment() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/4/name")
        .match_query(Matcher::Regex(
            "^id=test_key&type=12&mode=2&target=1&name=%E3%83%86%E3%82%B9%E3%83%88\\+%28%E6%A0%AA%29$"
                .to_string(),
        ))
        .with_status(200)
        .with_body("<corporations/>")
        .create_async()
        .await;

    let options = NameSearchOptions {
        mode: Some(SearchMode::PartialMatch),
        ..Default::default()
    };
    let payload = mof_client(&server.url())
        .search_by_name("テスト (株)", &options)
        .await
        .unwrap();

    assert_eq!(payload.text(), "<corporations/>");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_meti_lookup_sends_token_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/hojin/v1/hojin/1234567890123")
        .match_header("x-hojininfo-api-token", "meti_token")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"hojin-infos":[{"corporate_number":"1234567890123"}]}"#)
        .create_async()
        .await;

    let payload = meti_client(&server.url())
        .search_by_number(NUMBER, &NumberOptions::default_for(ApiType::Meti))
        .await
        .unwrap();

    assert_eq!(
        payload.json().unwrap()["hojin-infos"][0]["corporate_number"],
        NUMBER
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_meti_detailed_lookup_with_two_failures() {
    let mut server = Server::new_async().await;
    let _base = server
        .mock("GET", "/hojin/v1/hojin/1234567890123")
        .with_status(200)
        .with_body(r#"{"id":"basic"}"#)
        .create_async()
        .await;

    let mut mocks = Vec::new();
    for resource in SubResource::ALL {
        let failing = matches!(resource, SubResource::Finance | SubResource::Workplace);
        let mock = server
            .mock(
                "GET",
                format!("/hojin/v1/hojin/1234567890123/{}", resource.as_str()).as_str(),
            )
            .match_header("x-hojininfo-api-token", "meti_token")
            .with_status(if failing { 500 } else { 200 })
            .with_body(format!(r#"{{"id":"{}"}}"#, resource.as_str()))
            .create_async()
            .await;
        mocks.push(mock);
    }

    let value = meti_client(&server.url())
        .search_by_number(NUMBER, &NumberOptions::Meti(MetiNumberSearchOptions { detail: true }))
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(
        value,
        json!({
            "basic": {"id": "basic"},
            "certification": {"id": "certification"},
            "commendation": {"id": "commendation"},
            "finance": {"error": "Failed to fetch /hojin/v1/hojin/1234567890123/finance"},
            "patent": {"id": "patent"},
            "procurement": {"id": "procurement"},
            "subsidy": {"id": "subsidy"},
            "workplace": {"error": "Failed to fetch /hojin/v1/hojin/1234567890123/workplace"},
        })
    );
    for mock in &mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_meti_detailed_lookup_base_404_fails() {
    let mut server = Server::new_async().await;
    let _base = server
        .mock("GET", "/hojin/v1/hojin/1234567890123")
        .with_status(404)
        .with_body(r#"{"errors":[{"message":"not found"}]}"#)
        .create_async()
        .await;
    let subs = server
        .mock("GET", Matcher::Regex("^/hojin/v1/hojin/1234567890123/".to_string()))
        .with_status(200)
        .with_body("{}")
        .expect(0)
        .create_async()
        .await;

    let err = meti_client(&server.url())
        .search_by_number(NUMBER, &NumberOptions::Meti(MetiNumberSearchOptions { detail: true }))
        .await
        .unwrap_err();

    assert!(err.is_api());
    assert_eq!(err.status(), Some(404));
    subs.assert_async().await;
}

#[tokio::test]
async fn test_name_search_on_meti_is_rejected_without_request() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = meti_client(&server.url())
        .search_by_name("テスト株式会社", &NameSearchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CompanyInfoError::UnsupportedOperation {
            backend: ApiType::Meti,
            ..
        }
    ));
    any.assert_async().await;
}
