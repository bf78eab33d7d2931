use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::client::{RpcClient, RpcError};
use crate::model::NewAsset;
use crate::notify::{BusyIndicator, MemoryNotifier, Severity};
use crate::session::Session;

struct StubRoute {
    function: &'static str,
    status: u16,
    body: String,
    delay_ms: u64,
}

fn route(function: &'static str, status: u16, body: Value) -> StubRoute {
    StubRoute {
        function,
        status,
        body: body.to_string(),
        delay_ms: 0,
    }
}

fn route_delayed(function: &'static str, status: u16, body: Value, delay_ms: u64) -> StubRoute {
    StubRoute {
        function,
        status,
        body: body.to_string(),
        delay_ms,
    }
}

fn route_raw(function: &'static str, status: u16, body: &str) -> StubRoute {
    StubRoute {
        function,
        status,
        body: body.to_string(),
        delay_ms: 0,
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn read_request(stream: &mut TcpStream) -> Option<Value> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    let headers_end;
    let content_length;
    loop {
        let n = stream.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
            content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            headers_end = pos + 4;
            break;
        }
    }
    while buf.len() < headers_end + content_length {
        let n = stream.read(&mut tmp).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
    }
    serde_json::from_slice(buf.get(headers_end..headers_end + content_length)?).ok()
}

async fn handle_connection(
    mut stream: TcpStream,
    routes: Arc<Mutex<Vec<StubRoute>>>,
    received: Arc<Mutex<Vec<Value>>>,
) {
    let request = match read_request(&mut stream).await {
        Some(request) => request,
        None => return,
    };
    let function = request
        .get("function")
        .and_then(|f| f.as_str())
        .unwrap_or("")
        .to_string();
    if let Ok(mut log) = received.lock() {
        log.push(request);
    }

    let matched = routes.lock().ok().and_then(|mut routes| {
        let idx = routes.iter().position(|r| r.function == function)?;
        Some(routes.remove(idx))
    });
    let (status, body, delay_ms) = match matched {
        Some(route) => (route.status, route.body, route.delay_ms),
        None => (404, "{}".to_string(), 0),
    };

    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn spawn_stub(routes: Vec<StubRoute>) -> (String, Arc<Mutex<Vec<Value>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(Mutex::new(routes));
    let received: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

    let routes_for_task = routes.clone();
    let received_for_task = received.clone();
    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            tokio::spawn(handle_connection(
                stream,
                routes_for_task.clone(),
                received_for_task.clone(),
            ));
        }
    });

    (format!("http://{addr}/exec"), received)
}

fn session_for(endpoint: &str) -> (Session, MemoryNotifier) {
    let notifier = MemoryNotifier::new();
    let client = RpcClient::new(endpoint, 5, None).unwrap();
    let session = Session::new(client, Box::new(notifier.clone()), BusyIndicator::hidden());
    (session, notifier)
}

fn received_functions(received: &Arc<Mutex<Vec<Value>>>) -> Vec<String> {
    received
        .lock()
        .unwrap()
        .iter()
        .map(|r| {
            r.get("function")
                .and_then(|f| f.as_str())
                .unwrap_or("")
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn call_posts_the_function_name_and_parameter_bag() {
    let (endpoint, received) = spawn_stub(vec![route("getAssets", 200, json!([]))]).await;
    let client = RpcClient::new(&endpoint, 5, None).unwrap();

    let result = client.call("getAssets", json!({ "tag": "x" })).await.unwrap();
    assert_eq!(result, json!([]));

    let bodies = received.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({ "function": "getAssets", "parameters": { "tag": "x" } })
    );
}

#[tokio::test]
async fn call_surfaces_non_success_statuses() {
    let (endpoint, _received) = spawn_stub(vec![route("getAssets", 500, json!({}))]).await;
    let client = RpcClient::new(&endpoint, 5, None).unwrap();

    let err = client.call("getAssets", json!({})).await.unwrap_err();
    match err {
        RpcError::Status { function, status } => {
            assert_eq!(function, "getAssets");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn call_surfaces_unreadable_bodies() {
    let (endpoint, _received) =
        spawn_stub(vec![route_raw("getAssets", 200, "plainly not json")]).await;
    let client = RpcClient::new(&endpoint, 5, None).unwrap();

    let err = client.call("getAssets", json!({})).await.unwrap_err();
    assert!(matches!(err, RpcError::Decode { .. }));
}

#[tokio::test]
async fn server_errors_are_absorbed_with_one_notification() {
    let (endpoint, _received) = spawn_stub(vec![route("getAssets", 500, json!({}))]).await;
    let (mut session, notifier) = session_for(&endpoint);

    assert!(!session.load_assets().await);
    assert!(session.store().assets().is_empty());

    let events = notifier.events();
    assert_eq!(
        events,
        vec![(Severity::Error, "Error connecting to server".to_string())]
    );
}

#[tokio::test]
async fn unexpected_payload_shapes_are_absorbed() {
    let (endpoint, _received) =
        spawn_stub(vec![route("getAssets", 200, json!({ "success": true }))]).await;
    let (mut session, notifier) = session_for(&endpoint);

    assert!(!session.load_assets().await);
    assert!(session.store().assets().is_empty());

    let events = notifier.events();
    assert_eq!(
        events,
        vec![(Severity::Error, "Error loading assets".to_string())]
    );
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_snapshot() {
    let (endpoint, _received) = spawn_stub(vec![
        route(
            "getAssets",
            200,
            json!([
                { "id": "A-1", "name": "Desk" },
                { "id": "A-2", "name": "Chair" }
            ]),
        ),
        route("getAssets", 500, json!({})),
    ])
    .await;
    let (mut session, _notifier) = session_for(&endpoint);

    assert!(session.load_assets().await);
    assert_eq!(session.store().assets().len(), 2);

    assert!(!session.load_assets().await);
    assert_eq!(session.store().assets().len(), 2);
    assert_eq!(session.store().assets()[0].id, "A-1");
}

#[tokio::test]
async fn initial_load_merges_both_reference_feeds() {
    let (endpoint, _received) = spawn_stub(vec![
        route_delayed(
            "getCategories",
            200,
            json!([{ "id": "C-1", "name": "IT", "assetCount": 3 }]),
            150,
        ),
        route(
            "getLocations",
            200,
            json!([
                { "id": "L-1", "name": "HQ" },
                { "id": "L-2", "name": "Warehouse" }
            ]),
        ),
    ])
    .await;
    let (mut session, notifier) = session_for(&endpoint);

    assert!(session.load_initial().await);
    assert_eq!(session.store().category_names(), vec!["IT".to_string()]);
    assert_eq!(session.store().locations().len(), 2);
    assert!(notifier.events().is_empty());
}

#[tokio::test]
async fn initial_load_reports_each_failed_feed() {
    let (endpoint, _received) = spawn_stub(vec![
        route("getCategories", 500, json!({})),
        route(
            "getLocations",
            200,
            json!([{ "id": "L-1", "name": "HQ" }]),
        ),
    ])
    .await;
    let (mut session, notifier) = session_for(&endpoint);

    assert!(!session.load_initial().await);
    assert!(session.store().categories().is_empty());
    assert_eq!(session.store().locations().len(), 1);
    assert_eq!(notifier.events().len(), 1);
}

#[tokio::test]
async fn create_asset_success_notifies_and_reloads() {
    let (endpoint, received) = spawn_stub(vec![
        route("createAsset", 200, json!({ "success": true })),
        route("getAssets", 200, json!([{ "id": "A-1", "name": "Laptop" }])),
        route("getDashboardData", 200, json!({})),
    ])
    .await;
    let (mut session, notifier) = session_for(&endpoint);

    let asset = NewAsset {
        name: "Laptop".to_string(),
        category: "IT".to_string(),
        location: "HQ".to_string(),
        status: "Active".to_string(),
        purchase_date: String::new(),
        value: 999.0,
        description: String::new(),
    };
    assert!(session.create_asset(&asset).await);
    assert_eq!(session.store().assets().len(), 1);

    let events = notifier.events();
    assert_eq!(
        events[0],
        (Severity::Success, "Asset created successfully!".to_string())
    );

    assert_eq!(
        received_functions(&received),
        vec!["createAsset", "getAssets", "getDashboardData"]
    );

    let bodies = received.lock().unwrap();
    assert_eq!(bodies[0]["parameters"]["name"], "Laptop");
    assert_eq!(bodies[0]["parameters"]["purchaseDate"], "");
}

#[tokio::test]
async fn create_asset_failure_skips_reloads() {
    let (endpoint, received) =
        spawn_stub(vec![route("createAsset", 200, json!({ "success": false }))]).await;
    let (mut session, notifier) = session_for(&endpoint);

    let asset = NewAsset {
        name: "Laptop".to_string(),
        ..NewAsset::default()
    };
    assert!(!session.create_asset(&asset).await);

    let events = notifier.events();
    assert_eq!(
        events,
        vec![(Severity::Error, "Error creating asset".to_string())]
    );
    assert_eq!(received_functions(&received), vec!["createAsset"]);
}

#[tokio::test]
async fn delete_asset_sends_the_id_and_reloads() {
    let (endpoint, received) = spawn_stub(vec![
        route("deleteAsset", 200, json!({ "success": true })),
        route("getAssets", 200, json!([])),
        route("getDashboardData", 200, json!({})),
    ])
    .await;
    let (mut session, notifier) = session_for(&endpoint);

    assert!(session.delete_asset("A-9").await);

    let events = notifier.events();
    assert_eq!(
        events[0],
        (Severity::Success, "Asset deleted successfully!".to_string())
    );

    let bodies = received.lock().unwrap();
    assert_eq!(bodies[0]["parameters"]["id"], "A-9");
}

#[tokio::test]
async fn report_failure_adds_a_generation_toast() {
    let (endpoint, _received) = spawn_stub(vec![route("generateReport", 500, json!({}))]).await;
    let (session, notifier) = session_for(&endpoint);

    let report = session.generate_report("inventory", "", "").await;
    assert!(report.is_none());

    let events = notifier.events();
    assert_eq!(
        events,
        vec![
            (Severity::Error, "Error connecting to server".to_string()),
            (Severity::Error, "Error generating report".to_string()),
        ]
    );
}

#[tokio::test]
async fn report_success_passes_the_window_through() {
    let (endpoint, received) = spawn_stub(vec![route(
        "generateReport",
        200,
        json!({ "rows": [1, 2, 3] }),
    )])
    .await;
    let (session, _notifier) = session_for(&endpoint);

    let report = session
        .generate_report("inventory", "2024-01-01", "2024-02-01")
        .await
        .unwrap();
    assert_eq!(report["rows"], json!([1, 2, 3]));

    let bodies = received.lock().unwrap();
    assert_eq!(bodies[0]["parameters"]["type"], "inventory");
    assert_eq!(bodies[0]["parameters"]["startDate"], "2024-01-01");
    assert_eq!(bodies[0]["parameters"]["endDate"], "2024-02-01");
}

#[tokio::test]
async fn busy_indicator_is_released_after_failures() {
    let (endpoint, _received) = spawn_stub(vec![route("getAssets", 500, json!({}))]).await;
    let busy = BusyIndicator::hidden();
    let notifier = MemoryNotifier::new();
    let client = RpcClient::new(&endpoint, 5, None).unwrap();
    let mut session = Session::new(client, Box::new(notifier), busy.clone());

    session.load_assets().await;
    assert!(!busy.is_active());
}

#[test]
fn missing_config_is_allowed_only_when_stated() {
    let path = std::env::temp_dir().join(format!(
        "assetdash-config-missing-{}.yml",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let cfg = crate::config::load_config(&path, true).unwrap();
    assert!(cfg.endpoint.is_none());

    assert!(crate::config::load_config(&path, false).is_err());
}

#[test]
fn config_yaml_fields_parse() {
    let path = std::env::temp_dir().join(format!(
        "assetdash-config-parse-{}.yml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "endpoint: https://example.com/exec\npage_size: 25\nno_color: true\n",
    )
    .unwrap();

    let cfg = crate::config::load_config(&path, false).unwrap();
    assert_eq!(cfg.endpoint.as_deref(), Some("https://example.com/exec"));
    assert_eq!(cfg.page_size, Some(25));
    assert_eq!(cfg.no_color, Some(true));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn tilde_expansion_leaves_plain_paths_alone() {
    let path = crate::config::expand_tilde("./reports/config.yml");
    assert_eq!(path, std::path::PathBuf::from("./reports/config.yml"));
    assert_eq!(
        crate::config::expand_tilde_string("./reports/config.yml"),
        "./reports/config.yml".to_string()
    );
}
