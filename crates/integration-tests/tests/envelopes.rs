mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;
use serde_json::{Value, json};

async fn server() -> TestServer {
    let config = ConfigBuilder::new().with_service_name("accounts").build();
    TestServer::start(config).await.unwrap()
}

async fn post_json(server: &TestServer, path: &str, body: &Value) -> (u16, Value) {
    let resp = server.client().post(server.url(path)).json(body).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn post_form(server: &TestServer, path: &str, form: &[(&str, &str)]) -> (u16, Value) {
    let resp = server.client().post(server.url(path)).form(form).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn missing_query_parameter_is_mandatory() {
    let server = server().await;

    let (status, body) = server.get_json("/users").await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 400);
    assert_eq!(body["status"], "BAD_REQUEST");
    assert_eq!(body["message"], "ACCOUNTS_SERVICE_ERROR");
    assert_eq!(body["type"], "MissingParameter");
    assert_eq!(body["subType"], "MISSING_PARAMETER");
    assert_eq!(body["category"], "MANDATORY");
    assert!(body["detail"].as_str().unwrap().contains("userId"));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn body_with_required_and_range_violations() {
    let server = server().await;

    let (status, body) = post_json(&server, "/users", &json!({ "age": 150 })).await;

    assert_eq!(status, 400);
    assert_eq!(body["type"], "BodyValidationFailed");
    assert_eq!(body["subType"], "REQUEST_BODY");
    assert_eq!(body["category"], "MANDATORY");
    assert_eq!(
        body["errors"],
        json!([
            { "field": "email", "code": "REQUIRED", "message": "must not be null" },
            { "field": "age", "code": "MAX", "message": "must be less than or equal to 130" }
        ])
    );
    assert_eq!(
        body["detail"],
        "Validation failed for request body: [email (REQUIRED): must not be null, age (MAX): must be less than or \
         equal to 130]"
    );
}

#[tokio::test]
async fn body_with_only_range_violation_is_invalid() {
    let server = server().await;

    let (status, body) = post_json(&server, "/users", &json!({ "email": "a@b.c", "age": 9 })).await;

    assert_eq!(status, 400);
    assert_eq!(body["category"], "INVALID");
    assert_eq!(body["errors"][0]["code"], "MIN");
}

#[tokio::test]
async fn malformed_body() {
    let server = server().await;

    let resp = server
        .client()
        .post(server.url("/users"))
        .header("content-type", "application/json")
        .body("{\"email\": tru")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["type"], "BodyNotReadable");
    assert_eq!(body["detail"], "Malformed JSON request body");
}

#[tokio::test]
async fn unrouted_request_names_method_and_path() {
    let server = server().await;

    let (status, body) = server.get_json("/unknown").await;

    assert_eq!(status, 404);
    assert_eq!(body["message"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["detail"], "No resource found for GET /unknown");
    assert_eq!(body["category"], "ROUTING");
}

#[tokio::test]
async fn wrong_method_on_known_path() {
    let server = server().await;

    let resp = server.client().delete(server.url("/users")).send().await.unwrap();

    assert_eq!(resp.status(), 405);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Request method 'DELETE' is not supported");
    assert_eq!(body["subType"], "HTTP");
}

#[tokio::test]
async fn unsupported_media_type() {
    let server = server().await;

    let resp = server
        .client()
        .post(server.url("/users"))
        .header("content-type", "text/csv")
        .body("email,age")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 415);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Content type 'text/csv' not supported");
}

#[tokio::test]
async fn path_variable_type_mismatch() {
    let server = server().await;

    let (status, body) = server.get_json("/users/abc/orders/5").await;

    assert_eq!(status, 400);
    assert_eq!(body["type"], "TypeMismatch");
    assert_eq!(body["detail"], "Parameter 'id' must be of type u64");
    assert_eq!(body["category"], "INVALID");
}

#[tokio::test]
async fn unparseable_query_parameter_names_it() {
    let server = server().await;

    let (status, body) = server.get_json("/users?userId=ten").await;

    assert_eq!(status, 400);
    assert_eq!(body["type"], "TypeMismatch");
    assert_eq!(body["subType"], "TYPE_MISMATCH");
    assert_eq!(body["detail"], "Parameter 'userId' must be of type integer");
}

#[tokio::test]
async fn form_binding_failures() {
    let server = server().await;

    let (status, body) = post_form(&server, "/subscriptions", &[("seats", "many")]).await;
    assert_eq!(status, 400);
    assert_eq!(body["type"], "BindingFailed");
    assert_eq!(body["subType"], "BIND_ERROR");
    assert_eq!(body["category"], "INVALID");

    let (status, body) = post_form(&server, "/subscriptions", &[("seats", "0")]).await;
    assert_eq!(status, 400);
    assert_eq!(body["type"], "BindingFailed");
    assert_eq!(body["errors"][0]["field"], "seats");
    assert_eq!(body["errors"][0]["code"], "MIN");
}

#[tokio::test]
async fn unknown_enum_value_is_rewritten() {
    let server = server().await;

    let (status, body) = server.get_json("/colors/PURPLE").await;

    assert_eq!(status, 400);
    assert_eq!(body["subType"], "ILLEGAL_ARGUMENT");
    assert_eq!(body["detail"], "Invalid enum value 'PURPLE'. Please use a valid option.");
}

#[tokio::test]
async fn panic_does_not_leak_details() {
    let server = server().await;

    let (status, body) = server.get_json("/crash").await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["detail"], "An unexpected error occurred");
    assert_eq!(body["category"], "UNEXPECTED");
    assert!(!body.to_string().contains("postgres"));
}

#[tokio::test]
async fn successful_requests_are_untouched() {
    let server = server().await;

    let resp = server.client().get(server.url("/users?userId=42")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "42");
}
