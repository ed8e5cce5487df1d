//! Runs the `asset-board` binary as a stub server and as a client of it.
#![cfg(feature = "stub")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn lists_and_exports_assets_from_stub_process() {
    let addr = allocate_bind_addr();
    let _child = spawn_stub_process(&addr);
    wait_for_server(&addr, Duration::from_secs(8));

    let (status, body) = http_request(
        &addr,
        "POST",
        "/api/v1/assets",
        Some(r#"{"name":"Roof Array","type":"solar","sector":"supply","capacity_kw":12.5}"#),
    )
    .expect("create request should succeed");
    assert_eq!(status, 201);
    let created: Value = serde_json::from_str(&body).expect("created body should be JSON");
    assert_eq!(created["status"], "online");

    let (status, _) = http_request(
        &addr,
        "POST",
        "/api/v1/assets",
        Some(r#"{"name":"Main Load","type":"demand_sector","sector":"demand"}"#),
    )
    .expect("create request should succeed");
    assert_eq!(status, 201);

    let csv_path = std::env::temp_dir().join(format!("asset-board-{}.csv", std::process::id()));
    let output = Command::new(env!("CARGO_BIN_EXE_asset-board"))
        .args(["--base-url", &format!("http://{addr}"), "--export"])
        .arg(&csv_path)
        .env_remove("ASSET_BOARD_API_URL")
        .env_remove("ASSET_BOARD_TOKEN")
        .output()
        .expect("client process should run");
    assert!(output.status.success(), "client exited with {}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Roof Array"));
    assert!(stdout.contains("https://dashboard.energy-response.io/energy-supply"));
    assert!(stdout.contains("https://dashboard.energy-response.io/energy-demand"));
    // Demand group is listed before supply.
    let demand_at = stdout.find("[demand]").expect("demand group header");
    let supply_at = stdout.find("[supply]").expect("supply group header");
    assert!(demand_at < supply_at);

    let csv = std::fs::read_to_string(&csv_path).expect("csv should be written");
    let _ = std::fs::remove_file(&csv_path);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "id,name,type,sector,capacity_kw,status,created_at");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(",Roof Array,solar,supply,12.5,online,"));
}

#[test]
fn invalid_page_flag_exits_nonzero() {
    let status = Command::new(env!("CARGO_BIN_EXE_asset-board"))
        .args(["--page", "first"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("process should run");
    assert!(!status.success());
}

#[test]
fn invalid_base_url_fails_validation() {
    let output = Command::new(env!("CARGO_BIN_EXE_asset-board"))
        .args(["--base-url", "ftp://example.com"])
        .env_remove("ASSET_BOARD_API_URL")
        .output()
        .expect("process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("api.base_url"));
}

fn allocate_bind_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let addr = listener
        .local_addr()
        .expect("local_addr should be available")
        .to_string();
    drop(listener);
    addr
}

fn spawn_stub_process(bind_addr: &str) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_asset-board"))
        .args(["--serve-stub", bind_addr])
        .env_remove("ASSET_BOARD_TOKEN")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("asset-board process should spawn");

    ChildGuard { child }
}

fn wait_for_server(bind_addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((status, _)) = http_request(bind_addr, "GET", "/api/v1/assets", None) {
            if status == 200 {
                return;
            }
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for stub API on {bind_addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_request(
    bind_addr: &str,
    method: &str,
    path: &str,
    json: Option<&str>,
) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(bind_addr).map_err(|err| format!("connect: {err}"))?;
    let body = json.unwrap_or("");
    let content_type = if json.is_some() {
        "Content-Type: application/json\r\n"
    } else {
        ""
    };
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {bind_addr}\r\n{content_type}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_code = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, body.to_string()))
}
