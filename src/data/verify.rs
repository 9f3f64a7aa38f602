use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};

/// How `source_code` is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormat {
    /// One flattened `.sol` file; optimizer settings travel as form fields.
    SingleFile,
    /// The solc standard JSON input, settings included.
    StandardJsonInput,
}

impl CodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFormat::SingleFile => "solidity-single-file",
            CodeFormat::StandardJsonInput => "solidity-standard-json-input",
        }
    }
}

/// Source verification request for an Etherscan-compatible explorer.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub address: Address,
    pub code_format: CodeFormat,
    pub source_code: String,
    /// Bare name for single files; "contracts/JengawizeStore.sol:JengawizeStore"
    /// for standard JSON input.
    pub contract_name: String,
    /// Long solc version, e.g. "v0.8.20+commit.a1b79de6".
    pub compiler_version: String,
    /// Only sent for single files.
    pub optimizer_runs: Option<u32>,
    pub constructor_args: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Guid(String),
    AlreadyVerified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed(String),
}

/// Client for the `module=contract` endpoints of Etherscan-style explorers
/// (Etherscan, BaseScan, ...).
pub struct ExplorerClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl ExplorerClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_url: api_url.into(),
            api_key,
        }
    }

    /// POST {api}?module=contract&action=verifysourcecode
    pub async fn submit(&self, request: &VerificationRequest) -> Result<Submission> {
        let fields = form_fields(request, self.api_key.as_deref());
        let response = self
            .client
            .post(&self.api_url)
            .form(&fields)
            .send()
            .await
            .wrap_err("Verification request failed")?;
        if !response.status().is_success() {
            bail!("Explorer answered HTTP {}", response.status());
        }

        let body: serde_json::Value = response.json().await?;
        parse_submission(&body)
    }

    /// GET {api}?module=contract&action=checkverifystatus&guid={guid}
    pub async fn check_status(&self, guid: &str) -> Result<VerificationStatus> {
        let mut query = vec![
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
        ];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("apikey", key));
        }

        let response = self
            .client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .wrap_err("Verification status request failed")?;
        let body: serde_json::Value = response.json().await?;
        parse_status(&body)
    }

    /// Submit and poll until the explorer settles or `attempts` run out.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
        poll_interval: Duration,
        attempts: usize,
    ) -> Result<VerificationStatus> {
        let guid = match self.submit(request).await? {
            Submission::AlreadyVerified => return Ok(VerificationStatus::Verified),
            Submission::Guid(guid) => guid,
        };
        tracing::info!(%guid, "verification submitted");

        for _ in 0..attempts {
            tokio::time::sleep(poll_interval).await;
            match self.check_status(&guid).await? {
                VerificationStatus::Pending => continue,
                settled => return Ok(settled),
            }
        }
        Ok(VerificationStatus::Pending)
    }
}

pub fn form_fields(
    request: &VerificationRequest,
    api_key: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("module", "contract".to_string()),
        ("action", "verifysourcecode".to_string()),
        ("contractaddress", format!("{:#x}", request.address)),
        ("sourceCode", request.source_code.clone()),
        ("codeformat", request.code_format.as_str().to_string()),
        ("contractname", request.contract_name.clone()),
        ("compilerversion", request.compiler_version.clone()),
        // The explorer API spells it this way.
        (
            "constructorArguements",
            alloy::primitives::hex::encode(&request.constructor_args),
        ),
    ];
    if request.code_format == CodeFormat::SingleFile {
        fields.push((
            "optimizationUsed",
            if request.optimizer_runs.is_some() { "1" } else { "0" }.to_string(),
        ));
        fields.push(("runs", request.optimizer_runs.unwrap_or(200).to_string()));
    }
    if let Some(key) = api_key {
        fields.push(("apikey", key.to_string()));
    }
    fields
}

fn result_str(body: &serde_json::Value) -> Result<&str> {
    body.get("result")
        .and_then(|r| r.as_str())
        .ok_or_else(|| eyre!("Malformed explorer response: {body}"))
}

/// Explorer returns status "1" with the GUID in "result" on success.
fn parse_submission(body: &serde_json::Value) -> Result<Submission> {
    let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("0");
    let result = result_str(body)?;

    if status == "1" {
        return Ok(Submission::Guid(result.to_string()));
    }
    if result.to_lowercase().contains("already verified") {
        return Ok(Submission::AlreadyVerified);
    }
    bail!("Explorer rejected verification: {result}")
}

fn parse_status(body: &serde_json::Value) -> Result<VerificationStatus> {
    let result = result_str(body)?;
    let lower = result.to_lowercase();

    if lower.contains("pending") {
        Ok(VerificationStatus::Pending)
    } else if lower.contains("pass") || lower.contains("already verified") {
        Ok(VerificationStatus::Verified)
    } else {
        Ok(VerificationStatus::Failed(result.to_string()))
    }
}
