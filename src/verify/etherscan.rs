//! Etherscan-compatible verification API (`module=contract`).
//!
//! Submission is a single `verifysourcecode` POST. The returned GUID is then
//! polled with `checkverifystatus`; polling never resubmits.

use std::time::Duration;

use alloy::hex;
use serde::Deserialize;

use crate::verify::source::SourceInput;
use crate::verify::types::{
    http_client, VerificationRequest, VerificationStatus, VerifyError, VerifyResult,
};

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

impl ApiResponse {
    fn result_text(&self) -> String {
        match &self.result {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => self.message.clone(),
            other => other.to_string(),
        }
    }
}

fn is_already_verified(text: &str) -> bool {
    text.to_lowercase().contains("already verified")
}

/// Client for an Etherscan-style explorer.
#[derive(Debug, Clone)]
pub struct EtherscanVerifier {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    source: SourceInput,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl EtherscanVerifier {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        source: SourceInput,
        poll_attempts: u32,
        poll_interval: Duration,
        request_timeout: Duration,
    ) -> VerifyResult<Self> {
        Ok(Self {
            http: http_client(request_timeout)?,
            api_url: api_url.into(),
            api_key,
            source,
            poll_attempts,
            poll_interval,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit one verification request.
    pub async fn verify(&self, request: &VerificationRequest) -> VerifyResult<VerificationStatus> {
        let source = self.source.resolve(request)?;
        let source_code = serde_json::to_string(&source.input)
            .map_err(|e| VerifyError::MissingSource(format!("unserializable input: {}", e)))?;
        let version = request
            .compiler_version
            .as_deref()
            .unwrap_or_else(|| source.compiler_version());
        let compiler_version = format!("v{}", version.trim_start_matches('v'));

        let mut params: Vec<(&str, String)> = vec![
            ("module", "contract".into()),
            ("action", "verifysourcecode".into()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", source_code),
            ("codeformat", "solidity-standard-json-input".into()),
            ("contractname", request.fully_qualified_name.clone()),
            ("compilerversion", compiler_version),
            // Misspelling is part of the Etherscan API.
            ("constructorArguements", hex::encode(&request.encoded_args)),
        ];
        if let Some(key) = &self.api_key {
            params.push(("apikey", key.clone()));
        }

        tracing::info!(
            contract = %request.contract_name,
            address = %request.address,
            api_url = %self.api_url,
            "Submitting verification"
        );

        let response: ApiResponse = self
            .http
            .post(&self.api_url)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response.result_text();
        if response.status != "1" {
            if is_already_verified(&text) {
                return Ok(VerificationStatus::AlreadyVerified);
            }
            return Err(VerifyError::Rejected(text));
        }

        tracing::info!(guid = %text, "Verification submitted");
        self.poll_status(&text).await
    }

    async fn poll_status(&self, guid: &str) -> VerifyResult<VerificationStatus> {
        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let mut query: Vec<(&str, &str)> = vec![
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ];
            if let Some(key) = &self.api_key {
                query.push(("apikey", key.as_str()));
            }

            let response: ApiResponse = self
                .http
                .get(&self.api_url)
                .query(&query)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            let text = response.result_text();

            if is_already_verified(&text) {
                return Ok(VerificationStatus::AlreadyVerified);
            }
            if text.starts_with("Pass") {
                return Ok(VerificationStatus::Verified);
            }
            if text.to_lowercase().contains("pending") {
                tracing::debug!(guid = guid, attempt = attempt, "Verification pending");
                continue;
            }
            if response.status != "1" {
                return Err(VerifyError::Failed(text));
            }
        }

        Ok(VerificationStatus::Submitted {
            reference: guid.to_string(),
        })
    }
}
