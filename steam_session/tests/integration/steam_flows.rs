use std::time::Duration;

use steam_session::{
    AssertionVerifier, CoordinationError, OpenIdError, SESSION_TOKEN_TTL_SECS, VerifierConfig,
    authenticate_bearer, complete_steam_login, prepare_steam_login,
};

use crate::common::{MockProvider, ReplyMode, STEAM_ID, credentials};

const TIMEOUT: Duration = Duration::from_secs(5);

fn verifier_for(provider: &MockProvider, timeout: Duration) -> AssertionVerifier {
    AssertionVerifier::new(provider.verifier_config(timeout)).expect("valid verifier config")
}

#[tokio::test]
async fn test_full_sign_in_flow_issues_usable_token() {
    let provider = MockProvider::start(ReplyMode::Honest).await;
    let verifier = verifier_for(&provider, TIMEOUT);
    let credentials = credentials();

    let auth_url = prepare_steam_login(
        &verifier,
        crate::common::mock_provider::RETURN_TO,
        "http://localhost:3000",
    )
    .expect("auth url");
    assert!(auth_url.starts_with(&provider.endpoint));
    assert!(auth_url.contains("openid.mode=checkid_setup"));

    let params = provider.issue_assertion(STEAM_ID);
    let login = complete_steam_login(&verifier, &credentials, &params)
        .await
        .expect("honest assertion is accepted");

    assert_eq!(login.steam_id, STEAM_ID);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].get("openid.mode").map(String::as_str),
        Some("check_authentication")
    );

    let header = format!("Bearer {}", login.token);
    let payload = authenticate_bearer(&credentials, Some(&header)).expect("token validates");
    assert_eq!(payload.subject, STEAM_ID);
    assert_eq!(
        (payload.expires_at - payload.issued_at).num_seconds(),
        SESSION_TOKEN_TTL_SECS
    );
}

#[tokio::test]
async fn test_tampered_claimed_id_is_rejected_by_provider() {
    let provider = MockProvider::start(ReplyMode::Honest).await;
    let verifier = verifier_for(&provider, TIMEOUT);

    let mut params = provider.issue_assertion(STEAM_ID);
    let forged = "https://steamcommunity.com/openid/id/76561198099999999";
    params.insert("openid.claimed_id", forged);
    params.insert("openid.identity", forged);

    let result = verifier.verify_assertion_checked(&params).await;

    assert!(matches!(result, Err(OpenIdError::AssertionRejected(_))));
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn test_replayed_assertion_is_rejected() {
    let provider = MockProvider::start(ReplyMode::Honest).await;
    let verifier = verifier_for(&provider, TIMEOUT);
    let credentials = credentials();

    let params = provider.issue_assertion(STEAM_ID);
    complete_steam_login(&verifier, &credentials, &params)
        .await
        .expect("first use is accepted");

    let replay = complete_steam_login(&verifier, &credentials, &params).await;
    assert!(matches!(replay, Err(CoordinationError::Unauthorized)));
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let provider =
        MockProvider::start_with_delay(ReplyMode::AlwaysValid, Duration::from_secs(3)).await;
    let verifier = verifier_for(&provider, Duration::from_millis(200));

    let started = std::time::Instant::now();
    let result = verifier
        .verify_assertion(&provider.issue_assertion(STEAM_ID))
        .await;

    assert!(result.is_none());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_non_200_confirmation_is_rejected() {
    let provider = MockProvider::start(ReplyMode::Status(500)).await;
    let verifier = verifier_for(&provider, TIMEOUT);

    let result = verifier
        .verify_assertion_checked(&provider.issue_assertion(STEAM_ID))
        .await;

    assert!(matches!(result, Err(OpenIdError::AssertionRejected(_))));
}

#[tokio::test]
async fn test_unreachable_provider_is_rejected() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    let dead_endpoint = format!("http://127.0.0.1:{port}/openid/login");

    let provider = MockProvider::start(ReplyMode::AlwaysValid).await;
    let mut params = provider.issue_assertion(STEAM_ID);
    params.insert("openid.op_endpoint", dead_endpoint.as_str());

    let config = VerifierConfig {
        provider_endpoint: dead_endpoint,
        ..provider.verifier_config(TIMEOUT)
    };
    let verifier = AssertionVerifier::new(config).expect("valid verifier config");

    let result = verifier.verify_assertion_checked(&params).await;
    assert!(matches!(result, Err(OpenIdError::AssertionRejected(_))));
}

#[tokio::test]
async fn test_cancel_makes_no_network_request() {
    let provider = MockProvider::start(ReplyMode::AlwaysValid).await;
    let verifier = verifier_for(&provider, TIMEOUT);

    let mut params = provider.issue_assertion(STEAM_ID);
    params.insert("openid.mode", "cancel");

    assert!(verifier.verify_assertion(&params).await.is_none());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_foreign_op_endpoint_is_never_contacted() {
    let steam = MockProvider::start(ReplyMode::Honest).await;
    let attacker = MockProvider::start(ReplyMode::AlwaysValid).await;
    let verifier = verifier_for(&steam, TIMEOUT);

    // Assertion that claims to come from the attacker's endpoint
    let params = attacker.issue_assertion(STEAM_ID);

    let result = verifier.verify_assertion_checked(&params).await;

    assert!(matches!(result, Err(OpenIdError::AssertionRejected(_))));
    assert!(steam.requests().is_empty());
    assert!(attacker.requests().is_empty());
}

#[tokio::test]
async fn test_unexpected_return_to_makes_no_network_request() {
    let provider = MockProvider::start(ReplyMode::AlwaysValid).await;
    let verifier = verifier_for(&provider, TIMEOUT);

    let mut params = provider.issue_assertion(STEAM_ID);
    params.insert("openid.return_to", "https://evil.example/api/auth/steam-callback");

    assert!(verifier.verify_assertion(&params).await.is_none());
    assert!(provider.requests().is_empty());
}
