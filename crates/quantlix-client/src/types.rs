//! Request and response types for the Quantlix API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const REDACTED: &str = "[REDACTED]";

// --- Auth ---

/// Email and password for signup and login.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Result of login and email verification.
///
/// Carries the raw API key; the caller must store it, the client never does.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub api_key: String,
    pub user_id: String,
}

impl fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResult")
            .field("api_key", &REDACTED)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Result of signup: a verification email was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupResult {
    pub message: String,
    pub email: String,
    /// Only returned by development servers that may not deliver email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_link: Option<String>,
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResult {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordStrength {
    pub valid: bool,
    /// 0 to 5, one point per satisfied rule.
    pub score: u8,
    /// Requirements not yet met.
    #[serde(default)]
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub plan: String,
}

// --- API keys ---

/// API key metadata. Never contains the secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyInfo {
    pub id: String,
    pub name: Option<String>,
    pub created_at: String,
}

/// A freshly created (or rotated) API key.
///
/// The secret is shown exactly once and cannot be retrieved again.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateApiKeyResult {
    pub api_key: String,
    pub id: String,
    pub name: Option<String>,
}

impl fmt::Debug for CreateApiKeyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateApiKeyResult")
            .field("api_key", &REDACTED)
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiKeyList {
    pub api_keys: Vec<ApiKeyInfo>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateApiKeyRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

// --- Deploy / run ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployRequest {
    pub model_id: String,
    /// Serialized as `null` when unset.
    pub model_path: Option<String>,
    /// Always serialized; `{}` when the caller gave no config.
    pub config: Map<String, Value>,
    /// Existing deployment to update; the server records a new revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
}

/// Optional parts of a deploy call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeployOptions {
    pub model_path: Option<String>,
    pub config: Option<Map<String, Value>>,
    pub deployment_id: Option<String>,
}

impl DeployOptions {
    pub fn model_path(mut self, model_path: impl Into<String>) -> Self {
        self.model_path = Some(model_path.into());
        self
    }

    pub fn config(mut self, config: Map<String, Value>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }

    pub(crate) fn into_request(self, model_id: String) -> DeployRequest {
        DeployRequest {
            model_id,
            model_path: self.model_path,
            config: self.config.unwrap_or_default(),
            deployment_id: self.deployment_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployResult {
    pub deployment_id: String,
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub deployment_id: String,
    /// Forwarded verbatim.
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub job_id: String,
    pub status: String,
    pub message: String,
}

// --- Status ---

/// Which kind of resource a status lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Deployment,
    Job,
}

/// Status of a deployment or job. Job-only fields are `None` for deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_seconds: Option<f64>,
}

impl StatusResult {
    pub fn is_job(&self) -> bool {
        self.kind == ResourceKind::Job
    }

    pub fn is_deployment(&self) -> bool {
        self.kind == ResourceKind::Deployment
    }
}

// --- Deployments ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub id: String,
    pub model_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub revision_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentList {
    pub deployments: Vec<DeploymentSummary>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRevision {
    pub revision_number: u32,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Revisions of one deployment, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionList {
    pub deployment_id: String,
    pub revisions: Vec<DeploymentRevision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackResult {
    pub deployment_id: String,
    pub revision: u32,
}

// --- Jobs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    pub deployment_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobList {
    pub jobs: Vec<JobSummary>,
}

// --- Usage ---

/// Date filters for a usage query. Omitted bounds mean "all time".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UsageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }
}

/// Usage totals for the authenticated user.
///
/// Limits of `0` or unset mean unlimited; use the accessor methods rather than
/// reading the raw fields when enforcing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageResult {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    pub tokens_used: u64,
    pub compute_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_seconds: Option<f64>,
    pub job_count: u64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub tokens_limit: Option<u64>,
    #[serde(default)]
    pub compute_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_seconds_overage: Option<f64>,
}

impl UsageResult {
    /// Monthly token limit, `None` when unlimited.
    pub fn token_limit(&self) -> Option<u64> {
        self.tokens_limit.filter(|limit| *limit > 0)
    }

    /// Monthly CPU limit in seconds, `None` when unlimited.
    pub fn compute_limit_seconds(&self) -> Option<f64> {
        self.compute_limit.filter(|limit| *limit > 0.0)
    }

    /// Monthly GPU allowance in seconds, `None` when the plan has none.
    pub fn gpu_limit_seconds(&self) -> Option<f64> {
        self.gpu_limit.filter(|limit| *limit > 0.0)
    }

    /// Tokens left this period, `None` when unlimited.
    pub fn tokens_remaining(&self) -> Option<u64> {
        self.token_limit()
            .map(|limit| limit.saturating_sub(self.tokens_used))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageDailyPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub compute_seconds: f64,
    #[serde(default)]
    pub gpu_seconds: f64,
    #[serde(default)]
    pub job_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsageHistory {
    pub daily: Vec<UsageDailyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Fraction of completed jobs, 0 to 1.
    pub success_rate: f64,
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub avg_latency_s: Option<f64>,
    #[serde(default)]
    pub p50_latency_s: Option<f64>,
    #[serde(default)]
    pub p95_latency_s: Option<f64>,
}

// --- Health ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// --- Request bodies ---

#[derive(Debug, Serialize)]
pub(crate) struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PasswordRequest<'a> {
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}
