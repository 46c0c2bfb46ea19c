//! Zoho Invoice Client

use std::time::Duration;

use serde::Deserialize;

use crate::error::{InvoicingError, Result};
use crate::invoice::Invoice;
use crate::token::TokenCache;

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.zoho.com";
const DEFAULT_API_URL: &str = "https://www.zohoapis.com";

/// Zoho credentials and endpoints
#[derive(Clone, Debug)]
pub struct ZohoConfig {
    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Long-lived refresh token
    pub refresh_token: String,

    /// Zoho organization the invoices belong to
    pub organization_id: String,

    /// Accounts host for the token endpoint
    pub accounts_base_url: String,

    /// API host for invoice endpoints
    pub api_base_url: String,
}

impl ZohoConfig {
    /// Create from environment variables.
    ///
    /// All four credentials are required; the endpoint hosts may be
    /// overridden for testing.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| InvoicingError::Config(format!("{name} not set")))
        };

        Ok(Self {
            client_id: var("ZOHO_CLIENT_ID")?,
            client_secret: var("ZOHO_CLIENT_SECRET")?,
            refresh_token: var("ZOHO_REFRESH_TOKEN")?,
            organization_id: var("ZOHO_ORGANIZATION_ID")?,
            accounts_base_url: std::env::var("ZOHO_ACCOUNTS_URL")
                .unwrap_or_else(|_| DEFAULT_ACCOUNTS_URL.into()),
            api_base_url: std::env::var("ZOHO_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.into()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct InvoiceListResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    invoices: Vec<Invoice>,
}

/// Read-only Zoho Invoice API client
pub struct ZohoClient {
    http: reqwest::Client,
    config: ZohoConfig,
    token: TokenCache,
}

impl ZohoClient {
    /// Create from configuration
    pub fn from_config(config: ZohoConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: TokenCache::new(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ZohoConfig::from_env()?))
    }

    /// Get a valid access token, refreshing through the accounts host
    /// when the cached one is gone or about to expire.
    async fn access_token(&self) -> Result<String> {
        self.token
            .get_or_refresh(|| async {
                let url = format!("{}/oauth/v2/token", self.config.accounts_base_url);

                let response = self
                    .http
                    .post(&url)
                    .form(&[
                        ("refresh_token", self.config.refresh_token.as_str()),
                        ("client_id", self.config.client_id.as_str()),
                        ("client_secret", self.config.client_secret.as_str()),
                        ("grant_type", "refresh_token"),
                    ])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(InvoicingError::Token(format!("HTTP {status}: {body}")));
                }

                let token: TokenResponse = response
                    .json()
                    .await
                    .map_err(|e| InvoicingError::Token(e.to_string()))?;

                Ok((token.access_token, Duration::from_secs(token.expires_in)))
            })
            .await
    }

    /// Look up an invoice by its human-facing number.
    ///
    /// Returns `Ok(None)` when Zoho knows no invoice under that number;
    /// transport and API failures surface as errors.
    pub async fn get_invoice_by_number(&self, invoice_number: &str) -> Result<Option<Invoice>> {
        let mut invoices = self
            .list_invoices(&[("invoice_number", invoice_number)])
            .await?;

        if invoices.is_empty() {
            return Ok(None);
        }
        Ok(Some(invoices.remove(0)))
    }

    /// List every invoice with an outstanding balance.
    pub async fn list_unpaid_invoices(&self) -> Result<Vec<Invoice>> {
        self.list_invoices(&[("status", "unpaid")]).await
    }

    async fn list_invoices(&self, filters: &[(&str, &str)]) -> Result<Vec<Invoice>> {
        let access_token = self.access_token().await?;
        let url = format!("{}/invoice/v3/invoices", self.config.api_base_url);

        let response = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Zoho-oauthtoken {access_token}"),
            )
            .query(&[("organization_id", self.config.organization_id.as_str())])
            .query(filters)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %message, "Zoho API error");
            return Err(InvoicingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let list: InvoiceListResponse = response.json().await?;
        if list.code != 0 {
            return Err(InvoicingError::Api {
                status: status.as_u16(),
                message: format!("Zoho code {}: {}", list.code, list.message),
            });
        }

        Ok(list.invoices)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn test_config(server: &MockServer) -> ZohoConfig {
        ZohoConfig {
            client_id: "cid".into(),
            client_secret: "csecret".into(),
            refresh_token: "rtok".into(),
            organization_id: "org42".into(),
            accounts_base_url: server.base_url(),
            api_base_url: server.base_url(),
        }
    }

    fn invoice_body(number: &str, status: &str, balance: f64) -> serde_json::Value {
        json!({
            "invoice_id": "inv_1",
            "invoice_number": number,
            "status": status,
            "total": 1200.0,
            "balance": balance,
            "customer_name": "ACME SARL",
            "customer_id": "cust_9",
            "email": "compta@acme.fr",
            "date": "2026-08-01",
            "due_date": "2026-08-31",
            "currency_code": "EUR",
            "currency_symbol": "€"
        })
    }

    #[tokio::test]
    async fn test_invoice_lookup_with_token_refresh() {
        let server = MockServer::start_async().await;

        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth/v2/token")
                    .body_contains("grant_type=refresh_token");
                then.status(200)
                    .json_body(json!({"access_token": "tok_1", "expires_in": 3600}));
            })
            .await;

        let invoice_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/invoice/v3/invoices")
                    .header("authorization", "Zoho-oauthtoken tok_1")
                    .query_param("organization_id", "org42")
                    .query_param("invoice_number", "INV-000042");
                then.status(200).json_body(json!({
                    "code": 0,
                    "message": "success",
                    "invoices": [invoice_body("INV-000042", "unpaid", 600.0)]
                }));
            })
            .await;

        let client = ZohoClient::from_config(test_config(&server));

        let invoice = client
            .get_invoice_by_number("INV-000042")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(invoice.invoice_number, "INV-000042");
        assert_eq!(invoice.balance, 600.0);

        // A second lookup reuses the cached token.
        let again = client.get_invoice_by_number("INV-000042").await.unwrap();
        assert!(again.is_some());

        token_mock.assert_hits_async(1).await;
        invoice_mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_unknown_invoice_is_none() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/v2/token");
                then.status(200)
                    .json_body(json!({"access_token": "tok_1", "expires_in": 3600}));
            })
            .await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/invoice/v3/invoices");
                then.status(200)
                    .json_body(json!({"code": 0, "message": "success", "invoices": []}));
            })
            .await;

        let client = ZohoClient::from_config(test_config(&server));
        let invoice = client.get_invoice_by_number("INV-404").await.unwrap();
        assert!(invoice.is_none());
    }

    #[tokio::test]
    async fn test_token_refresh_failure_surfaces() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/v2/token");
                then.status(400).body("invalid_client");
            })
            .await;

        let client = ZohoClient::from_config(test_config(&server));
        let err = client.get_invoice_by_number("INV-1").await.unwrap_err();
        assert!(matches!(err, InvoicingError::Token(_)));
    }

    #[tokio::test]
    async fn test_zoho_error_code_surfaces() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/v2/token");
                then.status(200)
                    .json_body(json!({"access_token": "tok_1", "expires_in": 3600}));
            })
            .await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/invoice/v3/invoices");
                then.status(200)
                    .json_body(json!({"code": 57, "message": "invalid organization"}));
            })
            .await;

        let client = ZohoClient::from_config(test_config(&server));
        let err = client.list_unpaid_invoices().await.unwrap_err();
        assert!(matches!(err, InvoicingError::Api { .. }));
    }

    #[tokio::test]
    async fn test_unpaid_listing() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/v2/token");
                then.status(200)
                    .json_body(json!({"access_token": "tok_1", "expires_in": 3600}));
            })
            .await;

        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/invoice/v3/invoices")
                    .query_param("status", "unpaid");
                then.status(200).json_body(json!({
                    "code": 0,
                    "message": "success",
                    "invoices": [
                        invoice_body("INV-1", "unpaid", 100.0),
                        invoice_body("INV-2", "overdue", 250.0)
                    ]
                }));
            })
            .await;

        let client = ZohoClient::from_config(test_config(&server));
        let invoices = client.list_unpaid_invoices().await.unwrap();
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[1].invoice_number, "INV-2");
    }
}
