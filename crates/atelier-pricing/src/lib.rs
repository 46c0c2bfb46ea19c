//! # atelier-pricing
//!
//! Quote (devis) estimation for the atelier site.
//!
//! A quote is priced from three form inputs: the service category, a
//! complexity tier and a delivery timeline. The price is a deterministic
//! product of the category's base price and two scalar multipliers:
//!
//! ```text
//! price = round(base(service) × mult(complexity) × mult(timeline))
//! ```
//!
//! Inputs arrive as the literal labels the quote form displays (in French).
//! Unrecognized labels fall back to the default tier rather than erroring,
//! so the form can evolve without breaking older clients; missing required
//! fields, on the other hand, are a hard validation error.
//!
//! ## Usage
//!
//! ```rust
//! use atelier_pricing::{QuoteRequest, estimate};
//!
//! let request = QuoteRequest {
//!     service_type: "Sites WordPress Expert".into(),
//!     complexity: "Complexe (x2.5)".into(),
//!     timeline: "Urgent (1-2 semaines)".into(),
//!     name: "Jeanne Martin".into(),
//!     email: "jeanne@example.com".into(),
//!     description: "Refonte complète du site vitrine".into(),
//!     ..Default::default()
//! };
//!
//! let quote = estimate(&request).unwrap();
//! assert_eq!(quote.price, 5625);
//! ```

mod error;
mod quote;
mod service;

pub use error::{PricingError, Result};
pub use quote::{Estimate, QuoteRequest, estimate};
pub use service::{Complexity, ServiceType, Timeline};
