//! Shared helpers for client tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use herald_sdk::{async_trait, HeraldError, Method, Request, Result, Transport};
use serde_json::Value;

/// What a [`RecordingTransport`] answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(Value),
    Fail { status: u16, message: String },
}

/// Transport stub that records every request and answers with a fixed reply.
pub struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<(Method, Request)>>,
}

impl RecordingTransport {
    pub fn returning(body: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Body(body),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail {
                status,
                message: message.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(Method, Request)> {
        self.calls.lock().unwrap().clone()
    }

    /// The only recorded call; panics unless exactly one request was made.
    pub fn single_call(&self) -> (Method, Request) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {:?}", calls);
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn request(&self, method: Method, request: Request) -> Result<Value> {
        self.calls.lock().unwrap().push((method, request));
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail { status, message } => Err(HeraldError::api(*status, message.clone())),
        }
    }
}

/// Install a test subscriber so `RUST_LOG=herald_sdk=debug` shows SDK logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
