#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use afip_ws::{AfipError, AuthDelegate, Credential, SoapTransport};

/// Transport double: records every (operation, params) pair and replays a
/// queue of canned responses in order.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, AfipError>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn returning(responses: Vec<Result<Value, AfipError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoapTransport for MockTransport {
    async fn execute(&self, operation: &str, params: Value) -> Result<Value, AfipError> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_owned(), params));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock transport ran out of canned responses")
    }
}

/// Auth delegate double: hands out a fixed credential and records which
/// services were asked for one.
pub struct MockDelegate {
    requests: Mutex<Vec<String>>,
}

impl MockDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthDelegate for MockDelegate {
    async fn credential(&self, service: &str) -> Result<Credential, AfipError> {
        self.requests.lock().unwrap().push(service.to_owned());
        Ok(delegate_credential())
    }
}

/// The credential [`MockDelegate`] hands out.
pub fn delegate_credential() -> Credential {
    Credential {
        token: "delegate-token".into(),
        sign: "delegate-sign".into(),
    }
}
