//! # atelier-invoicing
//!
//! Read-only client for the Zoho Invoice API.
//!
//! The site lets a client look up an invoice by its number before paying
//! it; Zoho owns the invoices, this crate only reads them. Authentication
//! uses the OAuth refresh-token flow: a long-lived refresh token mints
//! short-lived access tokens, cached in-process until shortly before they
//! expire. Two concurrent refreshes are serialized by the cache mutex; a
//! duplicated fetch across server instances is accepted (single-instance
//! deployment).

mod client;
mod error;
mod invoice;
mod token;

pub use client::{ZohoClient, ZohoConfig};
pub use error::{InvoicingError, Result};
pub use invoice::{Invoice, SanitizedInvoice};
