//! End-to-end submission pipeline tests against in-process test doubles.
//!
//! The wallet and the transport are the two external collaborators; both are
//! replaced with instrumented fakes so the tests can observe exactly what was
//! signed and what was transmitted, and control completion order.

use std::sync::Arc;

use async_lock::Mutex;
use chrono::Utc;
use perpex::prelude::*;
use tokio::sync::oneshot;

// ─── Test doubles ────────────────────────────────────────────────────────────

/// Records every event (sign requests, network calls) in issue order.
type EventLog = Arc<Mutex<Vec<String>>>;

#[derive(Clone)]
struct StubSigner {
    connection: WalletConnection,
    /// Message the wallet was asked to sign.
    seen: Arc<Mutex<Option<String>>>,
    /// Outcome handed back for the next request.
    outcome: Arc<Mutex<StubOutcome>>,
    log: EventLog,
}

enum StubOutcome {
    Sign,
    Reject,
    /// Block until released, then sign. Models the user staring at the
    /// wallet prompt.
    WaitFor(oneshot::Receiver<()>),
}

impl StubSigner {
    fn connected(log: EventLog) -> Self {
        Self {
            connection: WalletConnection::connected(Address::from("0xAbC123")),
            seen: Arc::new(Mutex::new(None)),
            outcome: Arc::new(Mutex::new(StubOutcome::Sign)),
            log,
        }
    }

    fn disconnected(log: EventLog) -> Self {
        Self {
            connection: WalletConnection::disconnected(),
            ..Self::connected(log)
        }
    }

    fn signature() -> String {
        format!("0x{}", "7f".repeat(65))
    }
}

impl WalletSigner for StubSigner {
    fn connection(&self) -> WalletConnection {
        self.connection.clone()
    }

    async fn sign_message(&self, message: &str) -> Result<String, SignerError> {
        self.log.lock().await.push("sign".to_string());
        *self.seen.lock().await = Some(message.to_string());

        let outcome = std::mem::replace(&mut *self.outcome.lock().await, StubOutcome::Sign);
        match outcome {
            StubOutcome::Sign => Ok(Self::signature()),
            StubOutcome::Reject => Err(SignerError::Rejected),
            StubOutcome::WaitFor(release) => {
                release.await.map_err(|_| {
                    SignerError::Unavailable("wallet bridge dropped".to_string())
                })?;
                Ok(Self::signature())
            }
        }
    }
}

#[derive(Clone)]
struct StubApi {
    /// Bodies received by POST /api/orders.
    submitted: Arc<Mutex<Vec<PlaceOrderRequest>>>,
    /// Error for the next submit, if any.
    fail_with: Arc<Mutex<Option<SdkError>>>,
    log: EventLog,
}

impl StubApi {
    fn new(log: EventLog) -> Self {
        Self {
            submitted: Arc::new(Mutex::new(Vec::new())),
            fail_with: Arc::new(Mutex::new(None)),
            log,
        }
    }

    /// Echo the request back as an accepted Pending order, the way the venue
    /// does.
    fn accept(body: &PlaceOrderRequest) -> OrderResponse {
        let now = Utc::now().timestamp() as u64;
        serde_json::from_value(serde_json::json!({
            "id": format!("order_{}", body.signature.len()),
            "user_id": body.user_id,
            "pair_id": body.pair_id,
            "amount": body.amount,
            "filled_amount": 0u64,
            "price": body.price.unwrap_or(0),
            "side": body.side,
            "status": "Pending",
            "created_at": now,
            "updated_at": now,
        }))
        .unwrap()
    }
}

impl OrderApi for StubApi {
    async fn fetch_orders(&self) -> SdkResult<Vec<OrderResponse>> {
        Ok(Vec::new())
    }

    async fn submit_order(&self, body: &PlaceOrderRequest) -> SdkResult<OrderResponse> {
        self.log.lock().await.push("submit".to_string());
        if let Some(error) = self.fail_with.lock().await.take() {
            return Err(error);
        }
        let response = Self::accept(body);
        self.submitted.lock().await.push(body.clone());
        Ok(response)
    }
}

fn eth_usdc_draft() -> OrderDraft {
    OrderDraft {
        pair: PairId::new("ETH/USDC").unwrap(),
        side: Side::Buy,
        amount: "1.5".to_string(),
        kind: OrderKind::Limit {
            price: "3245.67".to_string(),
        },
    }
}

fn pipeline_with(
    signer: StubSigner,
    api: StubApi,
) -> SubmissionPipeline<StubSigner, StubApi> {
    let registry = Arc::new(OrderRegistry::new(api.clone()));
    SubmissionPipeline::new(signer, api, registry)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_signs_before_transmitting_and_transmits_what_was_signed() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let api = StubApi::new(log.clone());
    let pipeline = pipeline_with(signer.clone(), api.clone());

    let order = pipeline.submit(&eth_usdc_draft()).await.unwrap();

    // Signing strictly precedes the network call.
    assert_eq!(*log.lock().await, vec!["sign", "submit"]);

    // The wallet saw the canonical encoding, byte for byte.
    let signed_message = signer.seen.lock().await.clone().unwrap();
    assert_eq!(
        signed_message,
        r#"{"pair_id":"ETH/USDC","amount":1500000,"price":3245670000,"side":true}"#
    );

    // The transmitted body carries exactly the signed fields.
    let bodies = api.submitted.lock().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body.user_id, "0xAbC123");
    assert_eq!(body.pair_id, "ETH/USDC");
    assert_eq!(body.amount, 1_500_000);
    assert_eq!(body.price, Some(3_245_670_000));
    assert_eq!(body.side, true);
    assert_eq!(body.signature, StubSigner::signature());

    // Scenario: one Pending buy order with those exact lot values.
    assert_eq!(order.status, OrderStatus::Pending);
    let snapshot = pipeline.registry().snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].side, Side::Buy);
    assert_eq!(snapshot[0].amount, 1_500_000);
    assert_eq!(snapshot[0].price, 3_245_670_000);
    assert_eq!(pipeline.state().await, SubmissionState::Succeeded);
}

#[tokio::test]
async fn invalid_amount_fails_before_any_signing_or_network() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let api = StubApi::new(log.clone());
    let pipeline = pipeline_with(signer, api);

    let mut draft = eth_usdc_draft();
    draft.amount = "not-a-number".to_string();

    let result = pipeline.submit(&draft).await;
    assert!(matches!(result, Err(SdkError::Validation(_))));
    assert!(log.lock().await.is_empty());
    assert_eq!(pipeline.state().await, SubmissionState::Failed);
}

#[tokio::test]
async fn disconnected_wallet_fails_without_signing() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::disconnected(log.clone());
    let api = StubApi::new(log.clone());
    let pipeline = pipeline_with(signer, api);

    let result = pipeline.submit(&eth_usdc_draft()).await;
    assert!(matches!(
        result,
        Err(SdkError::Signer(SignerError::Unavailable(_)))
    ));
    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn user_rejection_aborts_without_network_call() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    *signer.outcome.lock().await = StubOutcome::Reject;
    let api = StubApi::new(log.clone());
    let pipeline = pipeline_with(signer, api);

    let result = pipeline.submit(&eth_usdc_draft()).await;
    assert!(matches!(result, Err(SdkError::Signer(SignerError::Rejected))));
    assert_eq!(*log.lock().await, vec!["sign"]); // no "submit"
    assert_eq!(pipeline.state().await, SubmissionState::Failed);
}

#[tokio::test]
async fn cancellation_during_signing_discards_the_signature() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let (release_tx, release_rx) = oneshot::channel();
    *signer.outcome.lock().await = StubOutcome::WaitFor(release_rx);
    let api = StubApi::new(log.clone());
    let pipeline = pipeline_with(signer, api.clone());

    let draft = eth_usdc_draft();
    let driver = async {
        // Let the submission reach the wallet prompt, then abandon the draft
        // and only afterwards let the signature arrive.
        while !log.lock().await.contains(&"sign".to_string()) {
            tokio::task::yield_now().await;
        }
        pipeline.cancel_pending();
        release_tx.send(()).unwrap();
    };

    let (result, _) = tokio::join!(pipeline.submit(&draft), driver);

    assert!(matches!(result, Err(SdkError::Cancelled)));
    // The late signature was discarded, not acted upon.
    assert_eq!(*log.lock().await, vec!["sign"]);
    assert!(api.submitted.lock().await.is_empty());
    assert!(pipeline.registry().snapshot().await.is_empty());
}

#[tokio::test]
async fn transport_failure_surfaces_server_detail_and_leaves_registry_intact() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let api = StubApi::new(log.clone());
    *api.fail_with.lock().await = Some(SdkError::Transport(TransportError::Status {
        status: 400,
        detail: "insufficient margin".to_string(),
    }));
    let pipeline = pipeline_with(signer, api);

    let result = pipeline.submit(&eth_usdc_draft()).await;
    match result {
        Err(SdkError::Transport(TransportError::Status { status, detail })) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "insufficient margin");
        }
        other => panic!("unexpected outcome: {:?}", other.map(|o| o.id)),
    }
    assert!(pipeline.registry().snapshot().await.is_empty());
    assert_eq!(pipeline.state().await, SubmissionState::Failed);
}

#[tokio::test]
async fn empty_success_body_is_a_protocol_error_not_a_success() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let api = StubApi::new(log.clone());
    *api.fail_with.lock().await = Some(SdkError::Protocol(ProtocolError::EmptyBody));
    let pipeline = pipeline_with(signer, api);

    let result = pipeline.submit(&eth_usdc_draft()).await;
    assert!(matches!(
        result,
        Err(SdkError::Protocol(ProtocolError::EmptyBody))
    ));
    assert!(pipeline.registry().snapshot().await.is_empty());
}

#[tokio::test]
async fn each_attempt_rebuilds_and_resigns() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let api = StubApi::new(log.clone());
    *api.fail_with.lock().await = Some(SdkError::Transport(TransportError::TimedOut));
    let pipeline = pipeline_with(signer.clone(), api.clone());

    assert!(pipeline.submit(&eth_usdc_draft()).await.is_err());
    assert_eq!(pipeline.state().await, SubmissionState::Failed);

    // A new user action with an edited draft re-signs a fresh message.
    pipeline.reset().await;
    assert_eq!(pipeline.state().await, SubmissionState::Idle);
    let mut draft = eth_usdc_draft();
    draft.amount = "2".to_string();
    pipeline.submit(&draft).await.unwrap();

    assert_eq!(*log.lock().await, vec!["sign", "submit", "sign", "submit"]);
    let signed_message = signer.seen.lock().await.clone().unwrap();
    assert!(signed_message.contains(r#""amount":2000000"#));
}

#[tokio::test]
async fn market_order_signs_the_reference_price() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let signer = StubSigner::connected(log.clone());
    let api = StubApi::new(log.clone());
    let pipeline = pipeline_with(signer.clone(), api.clone());

    let draft = OrderDraft {
        pair: PairId::new("BTC/USD").unwrap(),
        side: Side::Sell,
        amount: "0.25".to_string(),
        kind: OrderKind::Market {
            reference_price: "64245.67".to_string(),
        },
    };
    pipeline.submit(&draft).await.unwrap();

    let signed_message = signer.seen.lock().await.clone().unwrap();
    assert_eq!(
        signed_message,
        r#"{"pair_id":"BTC/USD","amount":250000,"price":64245670000,"side":false}"#
    );
    let bodies = api.submitted.lock().await;
    assert_eq!(bodies[0].price, Some(64_245_670_000));
    assert_eq!(bodies[0].side, false);
}
