use std::process::{Output, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use wiremock::MockServer;

/// API base URL of a mock server.
pub fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/api", server.address().port())
}

fn command(args: &[&str], api_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mucsit"));
    cmd.args(args);
    cmd.env("MUCSIT_API_URL", api_url);
    cmd.env("MUCSIT_SITE_URL", "https://mucsit.test");
    cmd.env("MUCSIT_TIMEOUT_SECS", "5");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Run the CLI binary against a backend.
pub async fn run_cli(args: &[&str], api_url: &str) -> Output {
    command(args, api_url)
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI with `input` piped to stdin.
pub async fn run_cli_with_input(args: &[&str], api_url: &str, input: &str) -> Output {
    let mut child = command(args, api_url)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    let mut stdin = child.stdin.take().expect("stdin is piped");
    stdin
        .write_all(input.as_bytes())
        .await
        .expect("Failed to write stdin");
    drop(stdin);

    child
        .wait_with_output()
        .await
        .expect("Failed to wait for CLI")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str], api_url: &str) -> String {
    let output = run_cli(args, api_url).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
