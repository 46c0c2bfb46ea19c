//! Quote Requests and Estimates
//!
//! A [`QuoteRequest`] is one quote-form submission. It is never persisted;
//! the server computes an [`Estimate`] per request and logs the submission.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::service::{Complexity, ServiceType, Timeline};

/// One submission of the quote form.
///
/// The selection fields carry the raw form labels; they are resolved to
/// catalog entries at estimation time. Fields absent from the JSON body
/// deserialize to empty strings so that [`QuoteRequest::validate`] owns the
/// missing-field error, not the deserializer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    /// Service category label
    pub service_type: String,

    /// Complexity tier label
    pub complexity: String,

    /// Delivery timeline label
    pub timeline: String,

    /// Company name (optional)
    #[serde(default)]
    pub company: Option<String>,

    /// Contact name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Phone number (optional)
    #[serde(default)]
    pub phone: Option<String>,

    /// Project description
    pub description: String,

    /// Declared budget range (optional, informational only)
    #[serde(default)]
    pub budget: Option<String>,
}

impl QuoteRequest {
    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let required: [(&'static str, &str); 6] = [
            ("serviceType", &self.service_type),
            ("complexity", &self.complexity),
            ("timeline", &self.timeline),
            ("name", &self.name),
            ("email", &self.email),
            ("description", &self.description),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(PricingError::MissingField(field));
            }
        }

        Ok(())
    }
}

/// A computed price with its breakdown.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Final price in whole euros
    pub price: i64,

    /// Base price of the selected service
    pub base_price: i64,

    /// Complexity multiplier applied
    pub complexity_multiplier: f64,

    /// Timeline multiplier applied
    pub timeline_multiplier: f64,

    /// Echoed service label
    pub service_type: String,

    /// Echoed complexity label
    pub complexity: String,

    /// Echoed timeline label
    pub timeline: String,
}

/// Price a quote request.
///
/// Validates required fields, then computes
/// `round(base × complexity × timeline)`. The result is always a
/// non-negative integer: base prices are positive and multipliers sit in
/// `0.9..=2.5`.
pub fn estimate(request: &QuoteRequest) -> Result<Estimate> {
    request.validate()?;

    let service = ServiceType::from_label(&request.service_type);
    let complexity = Complexity::from_label(&request.complexity);
    let timeline = Timeline::from_label(&request.timeline);

    let base_price = service.base_price();
    let complexity_multiplier = complexity.multiplier();
    let timeline_multiplier = timeline.multiplier();

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let price = (base_price as f64 * complexity_multiplier * timeline_multiplier).round() as i64;

    tracing::debug!(
        service = ?service,
        complexity = ?complexity,
        timeline = ?timeline,
        price,
        "Computed quote estimate"
    );

    Ok(Estimate {
        price,
        base_price,
        complexity_multiplier,
        timeline_multiplier,
        service_type: request.service_type.clone(),
        complexity: request.complexity.clone(),
        timeline: request.timeline.clone(),
    })
}
