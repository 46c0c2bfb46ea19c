//! Stripe Gateway
//!
//! Wraps the Stripe client behind the two session-creation operations the
//! site uses: direct payment intents (confirmed client-side with Elements)
//! and hosted checkout sessions (redirect flow).

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData, CreatePaymentIntent,
    CreatePaymentIntentAutomaticPaymentMethods, Currency, PaymentIntent,
};

use crate::error::{PaymentError, Result};

const DEFAULT_CURRENCY: Currency = Currency::EUR;
const DEFAULT_PRODUCT_NAME: &str = "Prestation de développement web";

/// Stripe client wrapper
pub struct StripeGateway {
    client: Client,
    webhook_secret: String,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(secret_key: &str, webhook_secret: &str) -> Self {
        Self {
            client: Client::new(secret_key),
            webhook_secret: webhook_secret.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET")
            .map_err(|_| PaymentError::Config("STRIPE_WEBHOOK_SECRET not set".into()))?;

        Ok(Self::new(&secret_key, &webhook_secret))
    }

    /// Get the webhook signing secret
    pub fn webhook_secret(&self) -> &str {
        &self.webhook_secret
    }

    /// Create a PaymentIntent (Embedded approach)
    ///
    /// Returns the client secret the frontend feeds to Stripe Elements for
    /// confirmation. The amount is in minor units and must be positive.
    pub async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntentSession> {
        let amount = validate_amount(request.amount)?;
        let currency = parse_currency(request.currency.as_deref())?;

        let mut params = CreatePaymentIntent::new(amount, currency);
        params.automatic_payment_methods = Some(CreatePaymentIntentAutomaticPaymentMethods {
            allow_redirects: None,
            enabled: true,
        });
        if !request.metadata.is_empty() {
            params.metadata = Some(request.metadata);
        }

        let intent = PaymentIntent::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Stripe("No client secret returned".into()))?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount,
            currency = %currency,
            "Created payment intent"
        );

        Ok(PaymentIntentSession {
            payment_intent_id: intent.id.to_string(),
            client_secret,
        })
    }

    /// Create a Stripe Checkout session (Hosted approach)
    ///
    /// Returns a URL to redirect the user to Stripe's hosted checkout page.
    /// One-off payment mode; the amount is in minor units and must be
    /// positive.
    pub async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession> {
        let amount = validate_amount(request.amount)?;
        let currency = parse_currency(request.currency.as_deref())?;

        let product_name = request
            .product_name
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.customer_email = request.customer_email.as_deref();
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);

        if !request.metadata.is_empty() {
            params.metadata = Some(request.metadata);
        }

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(1),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency,
                unit_amount: Some(amount),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: product_name,
                    description: request.description,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(
            session_id = %session.id,
            amount,
            currency = %currency,
            "Created checkout session"
        );

        Ok(CheckoutSession {
            id: session.id.to_string(),
            checkout_url,
        })
    }

    /// Get the underlying Stripe client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Amounts are minor units (cents) everywhere; zero and negative are
/// rejected in both session variants.
fn validate_amount(amount: i64) -> Result<i64> {
    if amount <= 0 {
        return Err(PaymentError::InvalidAmount(amount));
    }
    Ok(amount)
}

fn parse_currency(code: Option<&str>) -> Result<Currency> {
    match code {
        None => Ok(DEFAULT_CURRENCY),
        Some(code) => {
            Currency::from_str(&code.to_lowercase()).map_err(|_| PaymentError::InvalidCurrency(code.to_string()))
        }
    }
}

/// Request to create a payment intent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in minor currency units (cents)
    pub amount: i64,

    /// ISO currency code, defaults to "eur"
    #[serde(default)]
    pub currency: Option<String>,

    /// Arbitrary tracking metadata forwarded to Stripe
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Result of creating a payment intent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentIntentSession {
    /// Stripe payment intent ID
    pub payment_intent_id: String,

    /// Secret the frontend uses to confirm the payment
    pub client_secret: String,
}

/// Request to create a hosted checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Amount in minor currency units (cents)
    pub amount: i64,

    /// ISO currency code, defaults to "eur"
    #[serde(default)]
    pub currency: Option<String>,

    /// Line-item product name shown on the Stripe page
    #[serde(default)]
    pub product_name: Option<String>,

    /// Line-item description
    #[serde(default)]
    pub description: Option<String>,

    /// Pre-filled customer email
    #[serde(default)]
    pub customer_email: Option<String>,

    /// URL to redirect after successful payment
    pub success_url: String,

    /// URL to redirect if checkout is cancelled
    pub cancel_url: String,

    /// Arbitrary tracking metadata forwarded to Stripe
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session ID
    pub id: String,

    /// URL to redirect the user to
    pub checkout_url: String,
}
