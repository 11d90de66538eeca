//! Odoo repositories over the reqwest executor, driven from async code.
//!
//! The client is built with `OdooClient::connect` inside the test runtime, the
//! way an application would build it.

use std::{
    net::SocketAddr,
    sync::{mpsc, Arc, Mutex},
    thread,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use odoo_jsonrpc::{
    odoo::{
        EmployeesRepository, OdooClient, OdooEmployeesRepository, OdooRecruitmentRepository,
        OdooSession, RecruitmentJobState, RecruitmentRepository,
    },
    HttpClientConfig,
};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Seen {
    calls: Arc<Mutex<Vec<(String, HeaderMap, Value)>>>,
}

impl Seen {
    fn all(&self) -> Vec<(String, HeaderMap, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

fn result(value: Value) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({"jsonrpc": "2.0", "id": 1, "result": value}).to_string(),
    )
        .into_response()
}

async fn dispatch(State(seen): State<Seen>, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let request: Value = serde_json::from_slice(&body).unwrap();
    seen.calls
        .lock()
        .unwrap()
        .push((uri.path().to_string(), headers, request));

    match uri.path() {
        "/web/dataset/call_kw/hr.employee/search_read/" => result(json!([
            {
                "id": 1,
                "name": "Anna Petrova",
                "job_title": "Engineer",
                "work_email": "anna@example.org",
                "department_id": [3, "R&D"]
            },
            {
                "id": 2,
                "name": "Ivan Sidorov",
                "job_title": false,
                "work_email": false,
                "department_id": false
            }
        ])),
        "/web/dataset/call_kw/hr.job/search_read/" => result(json!([
            {
                "id": 10,
                "name": "Backend Developer",
                "state": "recruit",
                "is_favorite": false,
                "no_of_recruitment": 2,
                "new_application_count": 1,
                "application_count": 5,
                "website_url": "/jobs/detail/10",
                "website_published": true
            },
            {
                "id": 11,
                "name": false,
                "state": "open",
                "is_favorite": true,
                "website_url": false
            }
        ])),
        "/web/dataset/call_kw/hr.job/write/" => result(json!(true)),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn spawn_server() -> (String, Seen) {
    let seen = Seen::default();
    let state = seen.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async move {
            let app = Router::new().fallback(dispatch).with_state(state);
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    let addr: SocketAddr = rx.recv().unwrap();
    (format!("http://{}/", addr), seen)
}

async fn connect(base_url: &str) -> OdooClient {
    OdooClient::connect(HttpClientConfig::new(base_url), OdooSession::new("sid-42"))
        .await
        .unwrap()
}

#[tokio::test]
async fn employees_are_listed_from_async_code() {
    let (base_url, seen) = spawn_server();
    let repository = OdooEmployeesRepository::new(connect(&base_url).await);

    let employees = repository.get_all_employees().await.unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].name.as_deref(), Some("Anna Petrova"));
    assert_eq!(
        employees[0].department.as_ref().map(|d| d.name.as_str()),
        Some("R&D")
    );
    assert_eq!(employees[1].job_title, None);
    assert_eq!(employees[1].department, None);

    let (path, headers, request) = seen.all().pop().unwrap();
    assert_eq!(path, "/web/dataset/call_kw/hr.employee/search_read/");
    assert_eq!(headers[header::COOKIE], "session_id=sid-42");
    assert_eq!(request["method"], "call");
    assert_eq!(request["params"]["model"], "hr.employee");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn recruitment_jobs_round_trip_on_a_multi_thread_runtime() {
    let (base_url, seen) = spawn_server();
    let repository =
        OdooRecruitmentRepository::new(connect(&base_url).await, "https://portal.example/");

    let jobs = repository.get_recruitment_jobs().await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].id, 11);
    assert_eq!(jobs[0].name, "Untitled Job");
    assert_eq!(jobs[0].state, RecruitmentJobState::RecruitDone);
    assert_eq!(jobs[0].url, "https://portal.example/");
    assert_eq!(jobs[1].id, 10);
    assert_eq!(jobs[1].url, "https://portal.example/jobs/detail/10");
    assert_eq!(jobs[1].number_of_application, 5);
    assert!(jobs[1].is_published);

    assert!(repository.set_job_publication(10, false).await.unwrap());

    let calls = seen.all();
    assert_eq!(calls.len(), 2);
    let (path, headers, request) = &calls[1];
    assert_eq!(path, "/web/dataset/call_kw/hr.job/write/");
    assert_eq!(headers[header::COOKIE], "session_id=sid-42");
    assert_eq!(
        request["params"]["args"],
        json!([[10], {"website_published": false}])
    );
}

#[tokio::test]
async fn connect_rejects_an_unusable_config() {
    let mut config = HttpClientConfig::new("http://127.0.0.1:1/");
    config
        .default_headers
        .insert("bad header".into(), "value".into());

    let result = OdooClient::connect(config, OdooSession::new("sid")).await;

    assert!(matches!(result, Err(odoo_jsonrpc::Error::InvalidRequest(_))));
}
