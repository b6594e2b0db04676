use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DefaultsResponse {
    date: String,
    day_of_cycle: i64,
}

#[derive(Debug, Deserialize)]
struct TableView {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
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

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/defaults")).send().await {
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

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_cycle_tracker"))
        .env("PORT", port.to_string())
        .env("BIND_HOST", "127.0.0.1")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn entries(client: &Client, base_url: &str) -> Vec<Value> {
    client
        .get(format!("{base_url}/api/entries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_append_returns_full_list_with_new_record_last() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = entries(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&json!({
            "clicks": 1,
            "date": "01-01-2024",
            "day_of_cycle": 1,
            "bleeding": 2,
            "cramps": 1,
            "fluid": "Super Fertile",
            "presumed_ovulation": ["True"],
            "exercise": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let records: Vec<Value> = response.json().await.unwrap();
    assert_eq!(records.len(), before.len() + 1);
    let last = records.last().unwrap();
    assert_eq!(last["Date"], "01-01-2024");
    assert_eq!(last["Day of Cycle"], 1);
    assert_eq!(last["Bleeding"], 2);
    assert_eq!(last["Cramps"], 1);
    assert_eq!(last["Acne"], 0);
    assert_eq!(last["Fluid"], "Super Fertile");
    assert_eq!(last["Presumed Ovulation"], "Yes");
    assert_eq!(last["Exercise"], "No");
    assert!(last["Mood"].is_null());

    assert_eq!(entries(&client, &server.base_url).await, records);
    assert_eq!(entries(&client, &server.base_url).await, records);
}

#[tokio::test]
async fn http_out_of_range_scale_is_rejected_without_append() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = entries(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&json!({ "clicks": 1, "date": "02-01-2024", "bleeding": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response.text().await.unwrap();
    assert!(message.contains("Bleeding"), "unexpected message: {message}");

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&json!({ "clicks": 1, "date": "2024-01-02" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(entries(&client, &server.base_url).await, before);
}

#[tokio::test]
async fn http_idle_submission_never_appends() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = entries(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&json!({ "clicks": 0, "date": "03-01-2024", "bleeding": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let records: Vec<Value> = response.json().await.unwrap();
    assert_eq!(records, before);
}

#[tokio::test]
async fn http_form_submission_appends_and_redirects() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = entries(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/entries", server.base_url))
        .form(&[
            ("clicks", "1"),
            ("date", "04-01-2024"),
            ("day_of_cycle", "4"),
            ("bleeding", "1"),
            ("mood", "Happy"),
            ("exercise", "True"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    assert!(page.contains("04-01-2024"));

    let records = entries(&client, &server.base_url).await;
    assert_eq!(records.len(), before.len() + 1);
    assert_eq!(records.last().unwrap()["Exercise"], "Yes");

    let response = client
        .post(format!("{}/entries", server.base_url))
        .form(&[("clicks", "1"), ("date", "05-01-2024"), ("cramps", "7")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(entries(&client, &server.base_url).await.len(), records.len());

    let response = client
        .post(format!("{}/entries", server.base_url))
        .form(&[("date", "06-01-2024"), ("cramps", "x")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(entries(&client, &server.base_url).await.len(), records.len());
}

#[tokio::test]
async fn http_table_views_and_defaults() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let full: TableView = client
        .get(format!("{}/api/table", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(full.columns.len(), 15);
    assert_eq!(full.columns[10], "Presumed Ovulation");

    let legacy: TableView = client
        .get(format!("{}/api/table?view=legacy", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(legacy.columns.len(), 8);
    assert_eq!(legacy.rows.len(), full.rows.len());
    assert!(legacy.rows.iter().all(|row| row.len() == 8));

    let defaults: DefaultsResponse = client
        .get(format!("{}/api/defaults", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(defaults.date.len(), "01-01-2024".len());
    if full.rows.is_empty() {
        assert_eq!(defaults.day_of_cycle, 1);
    }
}
