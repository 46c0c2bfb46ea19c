//! Invoice Records
//!
//! Shapes mirror the Zoho Invoice v3 list response. Invoices are owned by
//! Zoho; nothing here is written back.

use serde::{Deserialize, Serialize};

/// A Zoho invoice, as returned by the list endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub invoice_number: String,

    /// Zoho status string: "paid", "unpaid", "overdue", ...
    pub status: String,

    /// Invoice total in major units
    pub total: f64,

    /// Outstanding balance in major units
    pub balance: f64,

    pub customer_name: String,
    pub customer_id: String,

    #[serde(default)]
    pub email: String,

    /// Issue date (Zoho format, `YYYY-MM-DD`)
    pub date: String,

    pub due_date: String,
    pub currency_code: String,
    pub currency_symbol: String,
}

/// Public subset of an invoice, safe to return to an anonymous caller.
///
/// Customer identity fields stay server-side; the payment page only needs
/// the balance and status for the invoice number the caller already holds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SanitizedInvoice {
    pub invoice_id: String,
    pub invoice_number: String,
    pub status: String,
    pub balance: f64,
    pub currency_symbol: String,
}

impl Invoice {
    /// Strip customer PII for the public lookup endpoint.
    pub fn sanitized(&self) -> SanitizedInvoice {
        SanitizedInvoice {
            invoice_id: self.invoice_id.clone(),
            invoice_number: self.invoice_number.clone(),
            status: self.status.clone(),
            balance: self.balance,
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_drops_customer_fields() {
        let invoice = Invoice {
            invoice_id: "inv_1".into(),
            invoice_number: "INV-000042".into(),
            status: "unpaid".into(),
            total: 1200.0,
            balance: 600.0,
            customer_name: "ACME SARL".into(),
            customer_id: "cust_9".into(),
            email: "compta@acme.fr".into(),
            date: "2026-08-01".into(),
            due_date: "2026-08-31".into(),
            currency_code: "EUR".into(),
            currency_symbol: "€".into(),
        };

        let public = invoice.sanitized();
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(json["invoice_number"], "INV-000042");
        assert_eq!(json["balance"], 600.0);
        assert!(json.get("customer_name").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_missing_email_defaults_empty() {
        let json = serde_json::json!({
            "invoice_id": "inv_1",
            "invoice_number": "INV-1",
            "status": "paid",
            "total": 100.0,
            "balance": 0.0,
            "customer_name": "ACME",
            "customer_id": "c1",
            "date": "2026-01-01",
            "due_date": "2026-02-01",
            "currency_code": "EUR",
            "currency_symbol": "€"
        });

        let invoice: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(invoice.email, "");
    }
}
