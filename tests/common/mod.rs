//! Shared utilities for end-to-end tests of the deployer binary.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::process::Command;

/// Anvil's first well-known account key.
#[allow(dead_code)]
pub const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Account the mock node reports from `eth_accounts`.
#[allow(dead_code)]
pub const NODE_ACCOUNT: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Address the mock node puts in every receipt.
#[allow(dead_code)]
pub const DEPLOYED_ADDRESS: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

/// Chain ID the mock node reports (Hardhat/Anvil default).
#[allow(dead_code)]
pub const NODE_CHAIN_ID: u64 = 31337;

const DEPLOY_TX_HASH: &str = "0x4c1c2b0f0d5e5f54d2a3c6e1b6ac3c7f2ef1a0b4d0c9e8f7a6b5c4d3e2f1a0b9";
const BLOCK_HASH: &str = "0x9a3f5d2e1c0b4a6f8e7d6c5b4a39281706f5e4d3c2b1a09f8e7d6c5b4a392817";

/// Artifacts tree holding a `PlatformToken` whose `name()` is "PlatformToken".
pub fn fixture_artifacts() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifacts")
}

/// Write a single-network config into `dir` and return its path.
pub fn write_config(dir: &Path, rpc_url: &str, artifacts: &Path) -> PathBuf {
    write_network_config(dir, rpc_url, artifacts, "")
}

/// Like [`write_config`], with extra keys appended to the network table.
pub fn write_network_config(dir: &Path, rpc_url: &str, artifacts: &Path, extra: &str) -> PathBuf {
    let path = dir.join("deploy.toml");
    let content = format!(
        r#"
        [contract]
        artifacts_dir = "{}"

        [networks.localhost]
        rpc_url = "{}"
        rpc_timeout_secs = 5
        poll_interval_ms = 100
        {}
        "#,
        artifacts.display(),
        rpc_url,
        extra
    );
    std::fs::write(&path, content).unwrap();
    path
}

/// Run the deployer in `dir` with the given private key (if any).
pub async fn run_deployer(dir: &Path, private_key: Option<&str>, args: &[&str]) -> Output {
    run_deployer_with_env(dir, private_key, args, &[]).await
}

/// Run the deployer with extra environment variables set.
#[allow(dead_code)]
pub async fn run_deployer_with_env(
    dir: &Path,
    private_key: Option<&str>,
    args: &[&str],
    env: &[(&str, &str)],
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_token-deployer"));
    cmd.current_dir(dir).args(args).env_remove("RUST_LOG");
    // Test nodes are on loopback.
    for var in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    match private_key {
        Some(key) => cmd.env("DEPLOYER_PRIVATE_KEY", key),
        None => cmd.env_remove("DEPLOYER_PRIVATE_KEY"),
    };
    cmd.envs(env.iter().copied());
    cmd.output().await.expect("failed to run token-deployer")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// What the mock node answers to `eth_getTransactionReceipt`.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum ReceiptMode {
    /// Mined in block 1 with status 1.
    Success,
    /// Mined in block 1 with status 0.
    Reverted,
    /// Never mined: the receipt stays `null`.
    Missing,
}

/// A JSON-RPC node that signs nothing and answers from canned responses.
#[allow(dead_code)]
pub struct MockNode {
    pub url: String,
    calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockNode {
    /// Number of requests received for `method`.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }
}

/// Start a mock node on an ephemeral port.
#[allow(dead_code)]
pub async fn start_mock_node(receipt: ReceiptMode) -> MockNode {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let calls = Arc::new(Mutex::new(Vec::new()));

    let recorded = calls.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        serve_request(socket, receipt, recorded).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode { url, calls }
}

async fn serve_request(
    mut socket: TcpStream,
    receipt: ReceiptMode,
    calls: Arc<Mutex<Vec<String>>>,
) {
    let Some(body) = read_request_body(&mut socket).await else {
        return;
    };
    let Ok(request) = serde_json::from_slice::<Value>(&body) else {
        return;
    };

    let method = request["method"].as_str().unwrap_or_default().to_string();
    calls.lock().unwrap().push(method.clone());

    let response = rpc_response(&method, request["id"].clone(), receipt).to_string();
    let response_str = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.len(),
        response
    );
    let _ = socket.write_all(response_str.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            if buf.len() >= start + length {
                return Some(buf[start..start + length].to_vec());
            }
        }

        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn rpc_response(method: &str, id: Value, receipt: ReceiptMode) -> Value {
    let result = match method {
        "eth_accounts" => json!([NODE_ACCOUNT]),
        "eth_chainId" => json!(format!("{NODE_CHAIN_ID:#x}")),
        "eth_blockNumber" => json!("0x1"),
        "eth_sendTransaction" => json!(DEPLOY_TX_HASH),
        "eth_getTransactionReceipt" => match receipt {
            ReceiptMode::Success => receipt_json("0x1"),
            ReceiptMode::Reverted => receipt_json("0x0"),
            ReceiptMode::Missing => Value::Null,
        },
        "eth_call" => json!(encoded_token_name()),
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {method} not supported") },
            })
        }
    };
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn receipt_json(status: &str) -> Value {
    json!({
        "type": "0x2",
        "status": status,
        "cumulativeGasUsed": "0x1d4c0",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": DEPLOY_TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x1",
        "gasUsed": "0x1d4c0",
        "effectiveGasPrice": "0x3b9aca00",
        "from": NODE_ACCOUNT,
        "to": null,
        "contractAddress": DEPLOYED_ADDRESS,
    })
}

/// ABI encoding of the string "PlatformToken".
fn encoded_token_name() -> String {
    let name = b"PlatformToken";
    let mut data = String::from("0x");
    data.push_str(&format!("{:064x}", 0x20));
    data.push_str(&format!("{:064x}", name.len()));
    for byte in name {
        data.push_str(&format!("{byte:02x}"));
    }
    data.push_str(&"00".repeat(32 - name.len()));
    data
}
