//! A simulated bulb for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use crate::config::ClientOptions;

pub(crate) type Handler = Box<dyn Fn(&Value) -> Option<String> + Send + 'static>;

/// Answers each datagram with whatever the handler returns; `None` means the
/// request is swallowed and the client times out.
pub(crate) struct FakeBulb {
    pub address: String,
    requests: Arc<Mutex<Vec<Value>>>,
    task: JoinHandle<()>,
}

impl FakeBulb {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let address = socket.local_addr().unwrap().to_string();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let handler: Handler = Box::new(handler);

        let task = tokio::spawn(async move {
            let mut buf = [0u8; 2048];
            loop {
                let Ok((n, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let request: Value = serde_json::from_slice(&buf[..n]).unwrap_or(Value::Null);
                let reply = handler(&request);
                recorded.lock().unwrap().push(request);
                if let Some(reply) = reply {
                    let _ = socket.send_to(reply.as_bytes(), peer).await;
                }
            }
        });

        FakeBulb {
            address,
            requests,
            task,
        }
    }

    /// A well-behaved bulb reporting `pilot` and accepting every change.
    pub async fn with_pilot(pilot: Value) -> Self {
        Self::start(move |request| {
            let reply = match request["method"].as_str()? {
                "getPilot" => json!({"method": "getPilot", "env": "pro", "result": pilot}),
                "setPilot" => json!({"method": "setPilot", "env": "pro", "result": {"success": true}}),
                "getSystemConfig" => json!({
                    "method": "getSystemConfig",
                    "env": "pro",
                    "result": {
                        "mac": "a8bb50aabbcc",
                        "homeId": 5385975,
                        "moduleName": "ESP01_SHRGB1C_31",
                        "fwVersion": "1.18.0",
                    },
                }),
                _ => return None,
            };
            Some(reply.to_string())
        })
        .await
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r["method"].as_str().map(String::from))
            .collect()
    }
}

impl Drop for FakeBulb {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Options with a deadline short enough for tests.
pub(crate) fn quick_options() -> ClientOptions {
    ClientOptions::default().with_timeout(Duration::from_millis(250))
}
