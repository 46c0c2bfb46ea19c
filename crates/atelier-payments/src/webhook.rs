//! Stripe Webhook Handling
//!
//! Verifies the `Stripe-Signature` header over the exact raw request bytes,
//! decodes the event envelope and dispatches on the event type string.
//!
//! Verification follows Stripe's scheme: the header carries a timestamp `t`
//! and one or more `v1` signatures, each an HMAC-SHA256 of `"{t}.{body}"`
//! keyed with the endpoint signing secret. Any matching `v1` accepts, and
//! the timestamp must sit within the replay tolerance window.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::{PaymentError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Default replay tolerance, matching Stripe's SDKs.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Parsed `Stripe-Signature` header.
#[derive(Clone, Debug)]
pub struct SignatureHeader {
    /// Unix timestamp the signature was generated at
    pub timestamp: i64,

    /// Candidate `v1` signatures, hex-encoded
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parse the comma-separated `k=v` header format.
    ///
    /// Unknown scheme keys (`v0`, future versions) are ignored.
    pub fn parse(header: &str) -> Result<Self> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for pair in header.split(',') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        PaymentError::WebhookSignature("malformed timestamp".into())
                    })?);
                }
                "v1" => signatures.push(value.to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| PaymentError::WebhookSignature("missing timestamp".into()))?;
        if signatures.is_empty() {
            return Err(PaymentError::WebhookSignature("no v1 signature".into()));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Webhook event envelope.
///
/// Only the fields the dispatcher needs; `data.object` stays raw JSON since
/// its shape depends on the event type.
#[derive(Clone, Debug, Deserialize)]
pub struct Event {
    /// Stripe event ID (`evt_...`)
    pub id: String,

    /// Event type string, e.g. `payment_intent.succeeded`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp of event creation
    pub created: i64,

    /// Event payload
    pub data: EventData,

    #[serde(default)]
    pub livemode: bool,
}

/// The `data` member of an event envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct EventData {
    /// The API object the event describes, kept as raw JSON
    pub object: serde_json::Value,
}

impl Event {
    /// ID of the object the event describes, empty when absent.
    fn object_id(&self) -> String {
        self.data
            .object
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// Classified webhook event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebhookEvent {
    /// A payment intent was confirmed and captured
    PaymentSucceeded { payment_intent_id: String },

    /// A payment intent failed at confirmation
    PaymentFailed { payment_intent_id: String },

    /// A hosted checkout session completed
    CheckoutCompleted { session_id: String },

    /// A Stripe invoice was paid
    InvoicePaid { invoice_id: String },

    /// A Stripe invoice payment failed
    InvoicePaymentFailed { invoice_id: String },

    /// Unhandled event type, acknowledged without action
    Other { event_type: String },
}

/// Verifies and dispatches webhook deliveries.
pub struct WebhookDispatcher {
    secret: String,
    tolerance_secs: i64,
}

impl WebhookDispatcher {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Override the replay tolerance window.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verify the signature and decode the envelope.
    ///
    /// An invalid or stale signature is terminal; the payload is never
    /// inspected before verification passes.
    pub fn construct_event(&self, payload: &[u8], signature_header: &str) -> Result<Event> {
        self.verify_at(payload, signature_header, Utc::now().timestamp())?;
        serde_json::from_slice(payload).map_err(|e| PaymentError::WebhookParse(e.to_string()))
    }

    fn verify_at(&self, payload: &[u8], signature_header: &str, now: i64) -> Result<()> {
        let header = SignatureHeader::parse(signature_header)?;

        if (now - header.timestamp).abs() > self.tolerance_secs {
            return Err(PaymentError::WebhookSignature(
                "timestamp outside tolerance".into(),
            ));
        }

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| PaymentError::WebhookSignature(e.to_string()))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);

        // Constant-time compare via Mac::verify_slice; any v1 entry may match.
        for candidate in &header.signatures {
            let Ok(bytes) = hex::decode(candidate) else {
                continue;
            };
            if mac.clone().verify_slice(&bytes).is_ok() {
                return Ok(());
            }
        }

        Err(PaymentError::WebhookSignature(
            "no signature matched".into(),
        ))
    }

    /// Classify a verified event and run its branch.
    ///
    /// Every branch only logs for now; downstream actions (confirmation
    /// emails, delivery triggers) plug in here.
    pub fn dispatch(&self, event: &Event) -> WebhookEvent {
        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            "Processing Stripe webhook"
        );

        let classified = classify(event);

        match &classified {
            WebhookEvent::PaymentSucceeded { payment_intent_id } => {
                tracing::info!(%payment_intent_id, "Payment succeeded");
            }
            WebhookEvent::PaymentFailed { payment_intent_id } => {
                tracing::warn!(%payment_intent_id, "Payment failed");
            }
            WebhookEvent::CheckoutCompleted { session_id } => {
                tracing::info!(%session_id, "Checkout session completed");
            }
            WebhookEvent::InvoicePaid { invoice_id } => {
                tracing::info!(%invoice_id, "Invoice paid");
            }
            WebhookEvent::InvoicePaymentFailed { invoice_id } => {
                tracing::warn!(%invoice_id, "Invoice payment failed");
            }
            WebhookEvent::Other { event_type } => {
                tracing::debug!(%event_type, "Unhandled webhook event");
            }
        }

        classified
    }
}

fn classify(event: &Event) -> WebhookEvent {
    match event.event_type.as_str() {
        "payment_intent.succeeded" => WebhookEvent::PaymentSucceeded {
            payment_intent_id: event.object_id(),
        },
        "payment_intent.payment_failed" => WebhookEvent::PaymentFailed {
            payment_intent_id: event.object_id(),
        },
        "checkout.session.completed" => WebhookEvent::CheckoutCompleted {
            session_id: event.object_id(),
        },
        "invoice.payment_succeeded" => WebhookEvent::InvoicePaid {
            invoice_id: event.object_id(),
        },
        "invoice.payment_failed" => WebhookEvent::InvoicePaymentFailed {
            invoice_id: event.object_id(),
        },
        _ => WebhookEvent::Other {
            event_type: event.event_type.clone(),
        },
    }
}
