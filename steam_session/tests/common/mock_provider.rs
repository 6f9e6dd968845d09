//! Axum-based mock of Steam's OpenID endpoint
//!
//! Each test starts its own provider on an ephemeral port. The provider hands
//! out positive assertions and answers `check_authentication` the way Steam
//! does: it only confirms an assertion it issued, with every signed field
//! unchanged, and only once.

use axum::{Form, Router, extract::State, http::StatusCode, routing::post};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

use steam_session::{AssertionResponse, VerifierConfig};

pub const SIGNED_FIELDS: &str =
    "signed,op_endpoint,claimed_id,identity,return_to,response_nonce,assoc_handle";
pub const RETURN_TO: &str = "http://localhost:3000/api/auth/steam-callback";
pub const IDENTITY_PREFIX: &str = "https://steamcommunity.com/openid/id/";

#[derive(Clone, Copy, Debug)]
pub enum ReplyMode {
    /// Confirm only assertions this provider issued, unchanged, once
    Honest,
    /// Confirm anything (an attacker-controlled "provider")
    AlwaysValid,
    /// Fixed HTTP status with a positive body
    Status(u16),
}

#[derive(Clone)]
struct MockProviderState {
    mode: ReplyMode,
    delay: Duration,
    issued: Arc<Mutex<HashMap<String, HashMap<String, String>>>>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub struct MockProvider {
    pub endpoint: String,
    state: MockProviderState,
    counter: Mutex<u64>,
    _handle: JoinHandle<()>,
}

impl MockProvider {
    pub async fn start(mode: ReplyMode) -> Self {
        Self::start_with_delay(mode, Duration::ZERO).await
    }

    pub async fn start_with_delay(mode: ReplyMode, delay: Duration) -> Self {
        let state = MockProviderState {
            mode,
            delay,
            issued: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/openid/login", post(check_authentication))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock provider");
        let port = listener.local_addr().expect("local addr").port();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock provider crashed");
        });

        Self {
            endpoint: format!("http://127.0.0.1:{port}/openid/login"),
            state,
            counter: Mutex::new(0),
            _handle: handle,
        }
    }

    /// Verifier settings pinned to this provider
    pub fn verifier_config(&self, timeout: Duration) -> VerifierConfig {
        VerifierConfig {
            provider_endpoint: self.endpoint.clone(),
            identity_prefix: IDENTITY_PREFIX.to_string(),
            timeout,
            expected_return_to: Some(RETURN_TO.to_string()),
        }
    }

    /// A positive assertion for `steam_id`, as it would arrive on the callback
    pub fn issue_assertion(&self, steam_id: &str) -> AssertionResponse {
        let n = {
            let mut counter = self.counter.lock().unwrap();
            *counter += 1;
            *counter
        };
        let claimed = format!("{IDENTITY_PREFIX}{steam_id}");
        let sig = format!("c2lnbmF0dXJl{n:08}");

        let fields: HashMap<String, String> = [
            ("openid.ns", "http://specs.openid.net/auth/2.0".to_string()),
            ("openid.mode", "id_res".to_string()),
            ("openid.op_endpoint", self.endpoint.clone()),
            ("openid.claimed_id", claimed.clone()),
            ("openid.identity", claimed),
            ("openid.return_to", RETURN_TO.to_string()),
            ("openid.response_nonce", format!("2025-01-01T00:00:00Z{n}")),
            ("openid.assoc_handle", "1234567890".to_string()),
            ("openid.signed", SIGNED_FIELDS.to_string()),
            ("openid.sig", sig.clone()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        self.state
            .issued
            .lock()
            .unwrap()
            .insert(sig, fields.clone());

        AssertionResponse::from_pairs(fields)
    }

    /// Every `check_authentication` form received so far
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn check_authentication(
    State(state): State<MockProviderState>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(form.clone());

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let verdict = match state.mode {
        ReplyMode::AlwaysValid => true,
        ReplyMode::Status(status) => {
            let status = StatusCode::from_u16(status).expect("valid status");
            return (status, "ns:http://specs.openid.net/auth/2.0\nis_valid:true\n".to_string());
        }
        ReplyMode::Honest => honest_verdict(&state, &form),
    };

    (
        StatusCode::OK,
        format!("ns:http://specs.openid.net/auth/2.0\nis_valid:{verdict}\n"),
    )
}

fn honest_verdict(state: &MockProviderState, form: &HashMap<String, String>) -> bool {
    if form.get("openid.mode").map(String::as_str) != Some("check_authentication") {
        return false;
    }
    let Some(sig) = form.get("openid.sig") else {
        return false;
    };

    // Each assertion can be confirmed once
    let Some(issued) = state.issued.lock().unwrap().remove(sig) else {
        return false;
    };

    let Some(signed) = form.get("openid.signed") else {
        return false;
    };
    signed.split(',').all(|field| {
        let key = format!("openid.{field}");
        form.get(&key).is_some() && form.get(&key) == issued.get(&key)
    })
}
