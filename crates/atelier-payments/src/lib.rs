//! # atelier-payments
//!
//! Stripe payment orchestration for the atelier site.
//!
//! ## Stripe Integration Strategies
//!
//! This crate supports two Stripe integration approaches, matching the two
//! payment surfaces of the site:
//!
//! ### 1. Payment Intent (Embedded) - invoice and quote payments
//!
//! **Flow:** Server creates a PaymentIntent → client confirms it with
//! Stripe Elements using the returned client secret. The user never leaves
//! the site.
//!
//! ```text
//! ┌──────────────┐  clientSecret  ┌─────────────────┐
//! │  POST /api/  │───────────────▶│  Stripe Elements │
//! │payment-intent│                │  (card iframe)   │
//! └──────────────┘                └─────────────────┘
//! ```
//!
//! ### 2. Stripe Checkout (Hosted) - fixed-price services
//!
//! **Flow:** Server creates a one-off Checkout Session → client is
//! redirected to Stripe's hosted page → redirected back on completion.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  Your Site  │────▶│  Stripe Hosted  │────▶│  Your Site  │
//! │  (services) │     │  Checkout Page  │     │  (success)  │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! In both variants the amount is expressed in **minor currency units**
//! (cents) and must be strictly positive; the crate performs no unit
//! conversion. Stripe owns the payment lifecycle entirely, this crate keeps
//! no payment state.
//!
//! Webhook notifications are verified against the endpoint signing secret
//! over the exact raw request bytes (see [`WebhookDispatcher`]) and
//! dispatched by event type. The business branches only log today.

mod error;
mod gateway;
mod webhook;

pub use error::{PaymentError, Result};
pub use gateway::{
    CheckoutRequest, CheckoutSession, PaymentIntentRequest, PaymentIntentSession, StripeGateway,
};
pub use webhook::{Event, SignatureHeader, WebhookDispatcher, WebhookEvent};
