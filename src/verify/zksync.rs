//! zkSync-style contract verification service.
//!
//! `POST <url>` with a JSON body returns a numeric request id; `GET <url>/<id>`
//! reports `queued`, `in_progress`, `successful` or `failed`.

use std::time::Duration;

use alloy::hex;
use serde::{Deserialize, Serialize};

use crate::verify::source::SourceInput;
use crate::verify::types::{
    http_client, VerificationRequest, VerificationStatus, VerifyError, VerifyResult,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    contract_address: String,
    source_code: &'a serde_json::Value,
    code_format: &'static str,
    contract_name: &'a str,
    compiler_solc_version: &'a str,
    compiler_zksolc_version: &'a str,
    optimization_used: bool,
    constructor_arguments: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    compilation_errors: Option<Vec<String>>,
}

/// Client for a zkSync-style verification endpoint.
#[derive(Debug, Clone)]
pub struct ZksyncVerifier {
    http: reqwest::Client,
    api_url: String,
    zksolc_version: Option<String>,
    source: SourceInput,
    poll_attempts: u32,
    poll_interval: Duration,
}

/// `0.8.26+commit.8a97fa7a` → `0.8.26`
fn short_solc_version(version: &str) -> &str {
    version
        .trim_start_matches('v')
        .split('+')
        .next()
        .unwrap_or(version)
}

/// The service answers with a bare id, either as a number or a string.
fn parse_request_id(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body).ok()? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl ZksyncVerifier {
    pub fn new(
        api_url: impl Into<String>,
        zksolc_version: Option<String>,
        source: SourceInput,
        poll_attempts: u32,
        poll_interval: Duration,
        request_timeout: Duration,
    ) -> VerifyResult<Self> {
        Ok(Self {
            http: http_client(request_timeout)?,
            api_url: api_url.into(),
            zksolc_version,
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
        let zksolc_version = self.zksolc_version.as_deref().ok_or_else(|| {
            VerifyError::MissingSource("verification.zksolc_version not set".into())
        })?;
        let source = self.source.resolve(request)?;
        let solc_version = short_solc_version(
            request
                .compiler_version
                .as_deref()
                .unwrap_or(source.solc_version.as_str()),
        );

        let body = SubmitBody {
            contract_address: request.address.to_string(),
            source_code: &source.input,
            code_format: "solidity-standard-json-input",
            contract_name: &request.fully_qualified_name,
            compiler_solc_version: solc_version,
            compiler_zksolc_version: zksolc_version,
            optimization_used: true,
            constructor_arguments: hex::encode_prefixed(&request.encoded_args),
        };

        tracing::info!(
            contract = %request.contract_name,
            address = %request.address,
            api_url = %self.api_url,
            "Submitting verification"
        );

        let response = self.http.post(&self.api_url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if text.to_lowercase().contains("already verified") {
                return Ok(VerificationStatus::AlreadyVerified);
            }
            return Err(VerifyError::Rejected(format!("{}: {}", status, text.trim())));
        }

        let id = parse_request_id(&text)
            .ok_or_else(|| VerifyError::Rejected(format!("unexpected response: {}", text.trim())))?;

        tracing::info!(request_id = %id, "Verification submitted");
        self.poll_status(&id).await
    }

    async fn poll_status(&self, id: &str) -> VerifyResult<VerificationStatus> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), id);

        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let response: StatusResponse = self
                .http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            match response.status.as_str() {
                "successful" => return Ok(VerificationStatus::Verified),
                "failed" => {
                    let mut reason = response.error.unwrap_or_else(|| "unknown error".into());
                    if let Some(errors) = response.compilation_errors.filter(|e| !e.is_empty()) {
                        reason.push_str(": ");
                        reason.push_str(&errors.join("; "));
                    }
                    return Err(VerifyError::Failed(reason));
                }
                other => {
                    tracing::debug!(request_id = id, attempt = attempt, status = other, "Verification pending");
                }
            }
        }

        Ok(VerificationStatus::Submitted {
            reference: id.to_string(),
        })
    }
}
