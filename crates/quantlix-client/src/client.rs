//! Authenticated Quantlix API client.

use crate::error::QuantlixError;
use crate::transport::{api_key_header, segment, Call, Transport};
use crate::types::*;
use secrecy::SecretString;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::instrument;

/// Quantlix API client for calls made on behalf of a user.
///
/// The API key is stored using `SecretString` and sent as a sensitive header,
/// so it never shows up in logs or debug output. The client holds no other
/// state; clones share one connection pool and can be used concurrently.
#[derive(Clone)]
pub struct QuantlixClient {
    transport: Transport,
    api_key: SecretString,
}

impl QuantlixClient {
    /// Create a client for `base_url` authenticating with `api_key`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
    ) -> Result<Self, QuantlixError> {
        Self::from_transport(Transport::new(base_url.as_ref(), None)?, api_key.into())
    }

    /// Same as [`new`](Self::new) with a per-request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, QuantlixError> {
        Self::from_transport(
            Transport::new(base_url.as_ref(), Some(timeout))?,
            api_key.into(),
        )
    }

    pub(crate) fn from_transport(
        transport: Transport,
        api_key: String,
    ) -> Result<Self, QuantlixError> {
        let api_key = SecretString::new(api_key);
        // Reject unusable keys here instead of on the first request
        api_key_header(&api_key)?;
        Ok(Self { transport, api_key })
    }

    /// Normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, call: Call) -> Result<T, QuantlixError> {
        self.transport.send(call, Some(&self.api_key)).await
    }

    /// Deploy a model. Pass `DeployOptions::deployment_id` to update an
    /// existing deployment, which records a new revision.
    #[instrument(skip(self, options))]
    pub async fn deploy(
        &self,
        model_id: &str,
        options: DeployOptions,
    ) -> Result<DeployResult, QuantlixError> {
        let request = options.into_request(model_id.to_string());
        self.send(Call::post("/deploy").json(&request)?).await
    }

    /// Run inference on a deployment. `input` is forwarded untouched.
    #[instrument(skip(self, input))]
    pub async fn run(&self, deployment_id: &str, input: Value) -> Result<RunResult, QuantlixError> {
        let request = RunRequest {
            deployment_id: deployment_id.to_string(),
            input,
        };
        self.send(Call::post("/run").json(&request)?).await
    }

    /// Status of a deployment or a job; check [`StatusResult::kind`].
    #[instrument(skip(self))]
    pub async fn status(&self, resource_id: &str) -> Result<StatusResult, QuantlixError> {
        self.send(Call::get(format!("/status/{}", segment(resource_id))))
            .await
    }

    /// Usage totals. Bounds left unset are not sent.
    #[instrument(skip(self))]
    pub async fn usage(&self, query: UsageQuery) -> Result<UsageResult, QuantlixError> {
        let call = Call::get("/usage")
            .query_opt("start_date", query.start_date)
            .query_opt("end_date", query.end_date);
        self.send(call).await
    }

    /// Daily usage breakdown over the last `days` days.
    #[instrument(skip(self))]
    pub async fn usage_history(&self, days: u32) -> Result<Vec<UsageDailyPoint>, QuantlixError> {
        let history: UsageHistory = self
            .send(Call::get("/usage/history").query("days", days))
            .await?;
        Ok(history.daily)
    }

    #[instrument(skip(self))]
    pub async fn usage_metrics(&self, days: u32) -> Result<UsageMetrics, QuantlixError> {
        self.send(Call::get("/usage/metrics").query("days", days))
            .await
    }

    /// Most recent jobs first.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self, limit: u32) -> Result<Vec<JobSummary>, QuantlixError> {
        let jobs: JobList = self.send(Call::get("/jobs").query("limit", limit)).await?;
        Ok(jobs.jobs)
    }

    #[instrument(skip(self))]
    pub async fn list_deployments(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<DeploymentList, QuantlixError> {
        let call = Call::get("/deployments")
            .query("limit", limit)
            .query("offset", offset);
        self.send(call).await
    }

    #[instrument(skip(self))]
    pub async fn list_revisions(&self, deployment_id: &str) -> Result<RevisionList, QuantlixError> {
        self.send(Call::get(format!(
            "/deployments/{}/revisions",
            segment(deployment_id)
        )))
        .await
    }

    /// Point a deployment back at an earlier revision.
    #[instrument(skip(self))]
    pub async fn rollback(
        &self,
        deployment_id: &str,
        revision: u32,
    ) -> Result<RollbackResult, QuantlixError> {
        let call = Call::post(format!("/deployments/{}/rollback", segment(deployment_id)))
            .query("revision", revision);
        self.send(call).await
    }

    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserInfo, QuantlixError> {
        self.send(Call::get("/auth/me")).await
    }

    /// API keys in the order the server returns them. Metadata only.
    #[instrument(skip(self))]
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKeyInfo>, QuantlixError> {
        let list: ApiKeyList = self.send(Call::get("/auth/api-keys")).await?;
        Ok(list.api_keys)
    }

    /// Create an API key. The secret in the result is shown only once.
    #[instrument(skip(self))]
    pub async fn create_api_key(
        &self,
        name: Option<&str>,
    ) -> Result<CreateApiKeyResult, QuantlixError> {
        let call = Call::post("/auth/api-keys").json(&CreateApiKeyRequest { name })?;
        self.send(call).await
    }

    #[instrument(skip(self))]
    pub async fn revoke_api_key(&self, key_id: &str) -> Result<MessageResult, QuantlixError> {
        self.send(Call::delete(format!("/auth/api-keys/{}", segment(key_id))))
            .await
    }

    /// Replace the key this client uses with a new one.
    ///
    /// The server revokes the current key in the same step, so this client
    /// stops working once the call returns. Build a new client from the result.
    #[instrument(skip(self))]
    pub async fn rotate_api_key(&self) -> Result<CreateApiKeyResult, QuantlixError> {
        self.send(Call::post("/auth/api-keys/rotate")).await
    }
}

impl fmt::Debug for QuantlixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantlixClient")
            .field("base_url", &self.transport.base_url())
            .field("api_key", &self.api_key)
            .finish()
    }
}
