//! Round-trips against the live mock server through `UreqTransport`.
//!
//! Most tests start the mock server on a random port on its own thread, then
//! drive `RequestClient` over real HTTP. Body-decoding tests answer from a
//! one-shot raw TCP listener instead, to send bytes axum would not.

use std::io::{Read, Write};

use mock_server::{Echo, User};
use serde_json::json;
use webapi_core::{
    ApiError, BodyPolicy, ClientConfig, HttpMethod, MethodTable, RequestClient, RequestSpec,
    ResponseResult,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn users_lifecycle() {
    let client = RequestClient::new(ClientConfig::new(start_server()));

    let mut delivered: Vec<ResponseResult> = Vec::new();
    client
        .send(RequestSpec::get("/users"), |r| delivered.push(r))
        .await
        .unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].status_code, 200);
    assert_eq!(delivered[0].status_name, "Ok");
    assert_eq!(delivered[0].body_text, "[]");

    let created = client
        .fetch(RequestSpec::post("/users", &json!({ "name": "a" })).unwrap())
        .await
        .unwrap();
    assert_eq!(created.status_name, "Created");
    let user: User = created.json().unwrap();
    assert_eq!(user.name, "a");

    let fetched: User = client
        .fetch(RequestSpec::get(format!("/users/{}", user.id)))
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(fetched, user);

    let users: Vec<User> = client.fetch(RequestSpec::get("/users")).await.unwrap().json().unwrap();
    assert_eq!(users, vec![user]);
}

#[tokio::test(flavor = "multi_thread")]
async fn wire_headers_and_body() {
    let config = ClientConfig::new(start_server()).with_auth_header("x-api-key", "secret");
    let client = RequestClient::new(config);

    let echo: Echo = client
        .fetch(RequestSpec::new("/echo", HttpMethod::Put).with_body(json!({ "score": 10 })))
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.headers["x-api-key"], "secret");
    assert_eq!(echo.headers["content-type"], "application/json");
    let body: serde_json::Value = serde_json::from_str(&echo.body).unwrap();
    assert_eq!(body, json!({ "score": 10 }));

    let echo: Echo = client.fetch(RequestSpec::get("/echo")).await.unwrap().json().unwrap();
    assert_eq!(echo.method, "GET");
    assert!(echo.body.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn auth_header_absent_when_disabled() {
    let mut config = ClientConfig::new(start_server()).with_auth_header("x-api-key", "secret");
    config.use_auth_header = false;
    let client = RequestClient::new(config);

    let echo: Echo = client.fetch(RequestSpec::get("/echo")).await.unwrap().json().unwrap();
    assert!(!echo.headers.contains_key("x-api-key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_standard_method_passes_through() {
    let client = RequestClient::new(ClientConfig::new(start_server()))
        .with_methods(MethodTable::default().allow(HttpMethod::Purge, BodyPolicy::Empty));

    let echo: Echo = client
        .fetch(RequestSpec::new("/echo", HttpMethod::Purge))
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echo.method, "PURGE");
}

#[tokio::test(flavor = "multi_thread")]
async fn negative_statuses_are_errors() {
    let client = RequestClient::new(ClientConfig::new(start_server()));

    let err = client
        .send(RequestSpec::post("/missing", &json!({ "name": "a" })).unwrap(), |_| {
            panic!("handler must not run on a negative response")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, ref status_name, .. } if status_name == "Not Found"));

    let err = client.fetch(RequestSpec::get("/status/204")).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 204, .. }));

    let err = client.fetch(RequestSpec::get("/status/500")).await.unwrap_err();
    match err {
        ApiError::Http {
            status_name, body, ..
        } => {
            assert_eq!(status_name, "Internal Server Error");
            assert_eq!(body, "status 500");
        }
        other => panic!("expected Http error, got {other:?}"),
    }

    let accepted = client.fetch(RequestSpec::get("/status/202")).await.unwrap();
    assert_eq!(accepted.status_name, "Accepted");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = RequestClient::new(ClientConfig::new(format!("http://127.0.0.1:{port}")));

    let err = client.fetch(RequestSpec::get("/users")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

/// Serve one canned raw HTTP response, ignoring the request.
fn serve_raw_once(head: &'static str, body: &'static [u8]) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn non_utf8_body_still_classified_as_http() {
    let base = serve_raw_once(
        "HTTP/1.1 404 Not Found\r\ncontent-length: 3\r\nconnection: close\r\n\r\n",
        &[0xff, 0xfe, 0x41],
    );
    let client = RequestClient::new(ClientConfig::new(base));

    let err = client.fetch(RequestSpec::get("/x")).await.unwrap_err();
    match err {
        ApiError::Http {
            status,
            status_name,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_name, "Not Found");
            assert_eq!(body, "\u{FFFD}\u{FFFD}A");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_utf8_body_on_success_is_lossy_text() {
    let base = serve_raw_once(
        "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n",
        &[0x41, 0xff],
    );
    let client = RequestClient::new(ClientConfig::new(base));

    let result = client.fetch(RequestSpec::get("/x")).await.unwrap();
    assert_eq!(result.status_code, 200);
    assert_eq!(result.body_text, "A\u{FFFD}");
}
