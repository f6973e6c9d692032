use std::process::{Output, Stdio};

use serde_json::{Value, json};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Endpoint URL for a mock server.
pub fn endpoint(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/2.2/users", server.address().port())
}

/// A users page with the given `(id, name, reputation)` entries.
pub fn users_page(users: &[(u64, &str, u64)], has_more: bool) -> Value {
    let items: Vec<Value> = users
        .iter()
        .map(|(id, name, reputation)| {
            json!({
                "user_id": id,
                "display_name": name,
                "profile_image": format!("https://example.com/{id}.png"),
                "reputation": reputation
            })
        })
        .collect();
    json!({ "items": items, "has_more": has_more })
}

/// Serve `body` for every users request.
pub async fn serve(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/2.2/users"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_userdir"));
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("USERDIR_ENDPOINT");
    cmd.env_remove("USERDIR_SITE");
    cmd
}

/// Run the CLI binary with arguments.
pub async fn run_cli(args: &[&str]) -> Output {
    command(args)
        .stdin(Stdio::null())
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI with `input` on stdin.
pub async fn run_cli_with_input(args: &[&str], input: &str) -> Output {
    let mut child = command(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");

    let mut stdin = child.stdin.take().expect("stdin is piped");
    stdin.write_all(input.as_bytes()).await.expect("Failed to write stdin");
    drop(stdin);

    child.wait_with_output().await.expect("Failed to wait for CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
