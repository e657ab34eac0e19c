use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TrackerView {
    daily_ml: u64,
    bucket_level_ml: u64,
    can_water: bool,
    can_undo: bool,
    flowers: Vec<serde_json::Value>,
    input_default: u64,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    message: Option<String>,
    view: TrackerView,
}

struct TestServer {
    base_url: String,
    child: Child,
    client: Client,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl TestServer {
    async fn state(&self) -> TrackerView {
        self.client
            .get(format!("{}/api/state", self.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> reqwest::Response {
        let mut request = self.client.post(format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.unwrap()
    }

    async fn add(&self, amount: serde_json::Value) -> reqwest::Response {
        self.post("/api/intake", Some(serde_json::json!({ "amount": amount })))
            .await
    }
}

static SPAWNED: Lazy<std::sync::Mutex<Vec<u32>>> = Lazy::new(|| std::sync::Mutex::new(Vec::new()));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;

    static REGISTER: Once = Once::new();

    pub fn register() {
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        let pids = match super::SPAWNED.lock() {
            Ok(pids) => pids.clone(),
            Err(_) => return,
        };
        for pid in pids {
            unsafe {
                libc::kill(pid as i32, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("water_garden_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(client: &Client, base_url: &str) {
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_water_garden"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    SPAWNED.lock().unwrap().push(child.id());
    #[cfg(unix)]
    cleanup::register();

    let client = Client::new();
    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&client, &base_url).await;

    TestServer {
        base_url,
        child,
        client,
    }
}

#[tokio::test]
async fn http_session_scenario() {
    let server = spawn_server(&unique_data_path()).await;

    assert!(server.add(serde_json::json!("500")).await.status().is_success());
    let response: ActionResponse = server.add(serde_json::json!(700)).await.json().await.unwrap();
    assert_eq!(response.view.bucket_level_ml, 1200);
    assert_eq!(response.view.daily_ml, 1200);
    assert!(response.view.can_undo);
    assert!(response.view.can_water);
    assert_eq!(response.view.input_default, 250);

    let undone: ActionResponse = server.post("/api/undo", None).await.json().await.unwrap();
    assert_eq!(undone.view.bucket_level_ml, 500);
    assert!(!undone.view.can_undo);
    assert!(undone.message.is_none());

    let again = server.post("/api/undo", None).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    assert_eq!(server.state().await.bucket_level_ml, 500);

    assert!(server.add(serde_json::json!("500")).await.status().is_success());
    let watered: ActionResponse = server.post("/api/flower", None).await.json().await.unwrap();
    assert_eq!(watered.view.bucket_level_ml, 0);
    assert_eq!(watered.view.flowers.len(), 1);
    assert!(watered.message.is_some());

    let dry = server.post("/api/flower", None).await;
    assert_eq!(dry.status(), StatusCode::CONFLICT);
    assert!(dry.text().await.unwrap().contains("1000 ml"));
}

#[tokio::test]
async fn http_invalid_amounts_are_rejected() {
    let server = spawn_server(&unique_data_path()).await;
    assert!(server.add(serde_json::json!("300")).await.status().is_success());

    for amount in [
        serde_json::json!(-5),
        serde_json::json!("abc"),
        serde_json::json!("0"),
        serde_json::json!(12.5),
        serde_json::json!(null),
    ] {
        let response = server.add(amount).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let state = server.state().await;
    assert_eq!(state.bucket_level_ml, 300);
    assert_eq!(state.daily_ml, 300);
    assert!(state.can_undo);
}

#[tokio::test]
async fn http_restart_blocks_undo() {
    let data_path = unique_data_path();
    let first = spawn_server(&data_path).await;
    assert!(first.add(serde_json::json!("800")).await.status().is_success());
    assert!(first.state().await.can_undo);
    drop(first);

    let second = spawn_server(&data_path).await;
    let state = second.state().await;
    assert_eq!(state.bucket_level_ml, 800);
    assert!(!state.can_undo);
    assert!(!state.can_water);

    let response = second.post("/api/undo", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert!(second.add(serde_json::json!("250")).await.status().is_success());
    let reloaded: ActionResponse = second.post("/api/reload", None).await.json().await.unwrap();
    assert_eq!(reloaded.view.bucket_level_ml, 1050);
    assert!(!reloaded.view.can_undo);
}

#[tokio::test]
async fn http_form_routes_redirect_home() {
    let server = spawn_server(&unique_data_path()).await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client
        .post(format!("{}/intake", server.base_url))
        .form(&[("amount", "400")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(server.state().await.bucket_level_ml, 400);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<span id="bucket">400</span>"#));
}
