//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, B256};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use flow_deployer::artifacts::ContractArtifact;
use flow_deployer::blockchain::types::BlockchainResult;
use flow_deployer::blockchain::CreationReceipt;
use flow_deployer::deploy::{ConstructorArg, ContractDeployer};

/// Well-known test private key (Anvil's first account).
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[allow(dead_code)]
pub const ADMIN: &str = "0xD427d37B5F6d33f7D42C4125979361E011FFbfD9";

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

/// Start a programmable mock backend on an ephemeral port.
///
/// Every request is recorded, then answered with whatever `f` returns.
pub async fn start_programmable_backend<F>(f: F) -> (SocketAddr, Recorder)
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorder = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let rec = recorded.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let rec = rec.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(&request);
                        rec.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = (header_end + content_length).min(buf.len());
    Some(RecordedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&buf[header_end..end]).to_string(),
    })
}

/// Minimal JSON-RPC node answering `eth_chainId` and `eth_getTransactionCount`.
#[allow(dead_code)]
pub fn json_rpc_node(chain_id: u64, nonce: u64) -> impl Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static {
    move |req| {
        let parsed: serde_json::Value = serde_json::from_str(&req.body).unwrap_or_default();
        let id = parsed.get("id").cloned().unwrap_or(serde_json::Value::from(0));
        let method = parsed.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let body = match method {
            "eth_chainId" => serde_json::json!({"jsonrpc": "2.0", "id": id, "result": format!("0x{:x}", chain_id)}),
            "eth_getTransactionCount" => serde_json::json!({"jsonrpc": "2.0", "id": id, "result": format!("0x{:x}", nonce)}),
            other => serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": -32601, "message": format!("method {} not supported by mock", other)}
            }),
        };
        (200, body.to_string())
    }
}

/// How [`mock_chain`] mines creation transactions.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningMode {
    /// Every creation succeeds.
    Success,
    /// The creation at this index (0-based) reverts.
    RevertAt(usize),
    /// Receipts come back successful but without `contractAddress`.
    NoContractAddress,
}

/// JSON-RPC node that accepts signed creation transactions from `deployer`.
///
/// Answers the calls a signing provider makes on the send path. The n-th raw
/// transaction is "mined" immediately at `deployer.create(start_nonce + n)`.
#[allow(dead_code)]
pub fn mock_chain(
    chain_id: u64,
    deployer: Address,
    start_nonce: u64,
    mode: MiningMode,
) -> impl Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static {
    let sent: Arc<Mutex<Vec<B256>>> = Arc::new(Mutex::new(Vec::new()));
    move |req| {
        let parsed: serde_json::Value = serde_json::from_str(&req.body).unwrap_or_default();
        let id = parsed.get("id").cloned().unwrap_or(serde_json::Value::from(0));
        let method = parsed.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let params = parsed.get("params").cloned().unwrap_or_default();
        let mut sent = sent.lock().unwrap();

        let result = match method {
            "eth_chainId" => serde_json::json!(format!("0x{:x}", chain_id)),
            "eth_getTransactionCount" => {
                serde_json::json!(format!("0x{:x}", start_nonce + sent.len() as u64))
            }
            "eth_estimateGas" => serde_json::json!("0x2dc6c0"),
            "eth_gasPrice" | "eth_maxPriorityFeePerGas" => serde_json::json!("0x3b9aca00"),
            "eth_blockNumber" => serde_json::json!("0x1"),
            "eth_feeHistory" => serde_json::json!({
                "oldestBlock": "0x1",
                "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
                "gasUsedRatio": [0.5],
                "reward": [["0x3b9aca00"]]
            }),
            "eth_sendRawTransaction" => {
                let hash = B256::with_last_byte(sent.len() as u8 + 1);
                sent.push(hash);
                serde_json::json!(hash)
            }
            "eth_getTransactionReceipt" => {
                let requested: Option<B256> = params
                    .get(0)
                    .and_then(|h| serde_json::from_value(h.clone()).ok());
                match requested.and_then(|h| sent.iter().position(|s| *s == h)) {
                    Some(index) => creation_receipt(
                        sent[index],
                        deployer,
                        deployer.create(start_nonce + index as u64),
                        mode,
                        index,
                    ),
                    None => serde_json::Value::Null,
                }
            }
            "eth_getBlockByNumber" => serde_json::Value::Null,
            other => {
                let body = serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": -32601, "message": format!("method {} not supported by mock", other)}
                });
                return (200, body.to_string());
            }
        };
        let body = serde_json::json!({"jsonrpc": "2.0", "id": id, "result": result});
        (200, body.to_string())
    }
}

fn creation_receipt(
    hash: B256,
    from: Address,
    contract: Address,
    mode: MiningMode,
    index: usize,
) -> serde_json::Value {
    let status = if mode == MiningMode::RevertAt(index) { "0x0" } else { "0x1" };
    let contract_address = match mode {
        MiningMode::NoContractAddress => serde_json::Value::Null,
        _ => serde_json::json!(contract),
    };
    serde_json::json!({
        "type": "0x2",
        "status": status,
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": B256::with_last_byte(0xbb),
        "blockNumber": "0x1",
        "from": from,
        "to": null,
        "contractAddress": contract_address,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512))
    })
}

/// Raw-transaction payloads sent to a JSON-RPC mock, in order.
#[allow(dead_code)]
pub fn raw_transactions(recorder: &Recorder) -> Vec<String> {
    recorder
        .lock()
        .unwrap()
        .iter()
        .filter_map(|r| serde_json::from_str::<serde_json::Value>(&r.body).ok())
        .filter(|v| v.get("method").and_then(|m| m.as_str()) == Some("eth_sendRawTransaction"))
        .filter_map(|v| v.pointer("/params/0").and_then(|p| p.as_str()).map(str::to_string))
        .collect()
}

/// A backend that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_stalled_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Methods seen by a JSON-RPC mock, in order.
#[allow(dead_code)]
pub fn rpc_methods(recorder: &Recorder) -> Vec<String> {
    recorder
        .lock()
        .unwrap()
        .iter()
        .filter_map(|r| {
            serde_json::from_str::<serde_json::Value>(&r.body)
                .ok()
                .and_then(|v| v.get("method").and_then(|m| m.as_str()).map(str::to_string))
        })
        .collect()
}

/// Fresh temp directory.
#[allow(dead_code)]
pub fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flow-deployer-{}-{}", tag, uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write Foundry-layout artifacts for both contracts under `root`.
#[allow(dead_code)]
pub fn write_foundry_artifacts(root: &PathBuf) {
    for name in ["FlowNFTDescriptor", "SablierFlow"] {
        let dir = root.join(format!("{}.sol", name));
        fs::create_dir_all(&dir).unwrap();
        let artifact = serde_json::json!({
            "abi": [],
            "bytecode": {"object": "0x6080604052"},
            "metadata": {
                "compiler": {"version": "0.8.26+commit.8a97fa7a"},
                "settings": {"compilationTarget": {format!("src/{}.sol", name): name}}
            }
        });
        fs::write(dir.join(format!("{}.json", name)), artifact.to_string()).unwrap();
    }
}

/// Write a build-info file and return its path.
#[allow(dead_code)]
pub fn write_build_info(root: &PathBuf) -> PathBuf {
    let path = root.join("build-info.json");
    fs::write(
        &path,
        r#"{"solcVersion":"0.8.26","solcLongVersion":"0.8.26+commit.8a97fa7a","input":{"language":"Solidity","sources":{}}}"#,
    )
    .unwrap();
    path
}

/// Write a build-info file named by hash under `<root>/build-info`, the way
/// the compiler does, covering both contracts' sources.
#[allow(dead_code)]
pub fn write_hashed_build_info(root: &PathBuf) -> PathBuf {
    let dir = root.join("build-info");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("3f9a1c0be7d24e58.json");
    let info = serde_json::json!({
        "id": "3f9a1c0be7d24e58",
        "solcVersion": "0.8.26",
        "solcLongVersion": "0.8.26+commit.8a97fa7a",
        "input": {
            "language": "Solidity",
            "sources": {
                "src/FlowNFTDescriptor.sol": {"content": ""},
                "src/SablierFlow.sol": {"content": ""}
            }
        }
    });
    fs::write(&path, info.to_string()).unwrap();
    path
}

/// Deployer whose addresses follow CREATE from `sender` starting at `nonce`.
#[allow(dead_code)]
pub struct CreateDeployer {
    pub sender: Address,
    pub nonce: Mutex<u64>,
    pub calls: Mutex<Vec<(String, Vec<ConstructorArg>)>>,
}

#[allow(dead_code)]
impl CreateDeployer {
    pub fn new(sender: Address, nonce: u64) -> Self {
        Self {
            sender,
            nonce: Mutex::new(nonce),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ContractDeployer for CreateDeployer {
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: &[ConstructorArg],
    ) -> BlockchainResult<CreationReceipt> {
        self.calls
            .lock()
            .unwrap()
            .push((artifact.name.clone(), args.to_vec()));
        let mut nonce = self.nonce.lock().unwrap();
        let contract_address = self.sender.create(*nonce);
        *nonce += 1;
        Ok(CreationReceipt {
            tx_hash: TxHash::with_last_byte(*nonce as u8),
            contract_address,
            block_number: Some(1),
        })
    }
}
