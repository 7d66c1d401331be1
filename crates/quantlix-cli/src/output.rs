//! Plain-text rendering of API results.

use quantlix_client::{
    ApiKeyInfo, AuthResult, CreateApiKeyResult, DeployResult, DeploymentList, JobSummary,
    PasswordStrength, RevisionList, RunResult, StatusResult, UsageDailyPoint, UsageMetrics,
    UsageResult, UserInfo,
};

/// Two-column `field  value` block, skipping rows without a value.
fn fields(rows: &[(&str, Option<String>)]) -> String {
    rows.iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("  {:<16} {}", name, v)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Shown once after login, verification, key creation or rotation.
fn key_notice(api_key: &str) -> String {
    format!(
        "\nSave this key now, it won't be shown again. Set in .env or export:\n  QUANTLIX_API_KEY={}",
        api_key
    )
}

pub fn auth(title: &str, result: &AuthResult) -> String {
    format!(
        "{}\n{}\n{}",
        title,
        fields(&[
            ("user_id", Some(result.user_id.clone())),
            ("api_key", Some(result.api_key.clone())),
        ]),
        key_notice(&result.api_key)
    )
}

pub fn new_api_key(title: &str, result: &CreateApiKeyResult) -> String {
    format!(
        "{}\n{}\n{}",
        title,
        fields(&[
            ("id", Some(result.id.clone())),
            ("name", result.name.clone()),
            ("api_key", Some(result.api_key.clone())),
        ]),
        key_notice(&result.api_key)
    )
}

pub fn api_keys(keys: &[ApiKeyInfo]) -> String {
    if keys.is_empty() {
        return "No API keys.".into();
    }

    let mut lines = vec![format!("{:<38} {:<20} {}", "ID", "Name", "Created")];
    for key in keys {
        lines.push(format!(
            "{:<38} {:<20} {}",
            key.id,
            or_dash(key.name.as_deref()),
            key.created_at
        ));
    }
    lines.join("\n")
}

pub fn password_strength(result: &PasswordStrength) -> String {
    let mut out = format!(
        "{} (score {}/5)",
        if result.valid { "Strong password" } else { "Weak password" },
        result.score
    );
    for item in &result.feedback {
        out.push_str(&format!("\n  - {}", item));
    }
    out
}

pub fn user(info: &UserInfo) -> String {
    fields(&[
        ("id", Some(info.id.clone())),
        ("email", Some(info.email.clone())),
        ("plan", Some(info.plan.clone())),
    ])
}

pub fn deploy(result: &DeployResult) -> String {
    format!(
        "{}\n{}",
        result.message,
        fields(&[
            ("deployment_id", Some(result.deployment_id.clone())),
            ("status", Some(result.status.clone())),
            ("revision", result.revision.map(|r| r.to_string())),
        ])
    )
}

pub fn run(result: &RunResult) -> String {
    format!(
        "{}\n{}",
        result.message,
        fields(&[
            ("job_id", Some(result.job_id.clone())),
            ("status", Some(result.status.clone())),
        ])
    )
}

pub fn status(result: &StatusResult) -> String {
    let kind = if result.is_job() { "job" } else { "deployment" };
    let output = result
        .output_data
        .as_ref()
        .and_then(|data| serde_json::to_string_pretty(data).ok());

    fields(&[
        ("id", Some(result.id.clone())),
        ("type", Some(kind.to_string())),
        ("status", Some(result.status.clone())),
        ("created_at", result.created_at.clone()),
        ("updated_at", result.updated_at.clone()),
        ("error_message", result.error_message.clone()),
        ("tokens_used", result.tokens_used.map(|t| t.to_string())),
        (
            "compute_seconds",
            result.compute_seconds.map(|s| format!("{:.2}", s)),
        ),
        ("output_data", output),
    ])
}

fn limit_text(limit: Option<String>) -> Option<String> {
    Some(limit.unwrap_or_else(|| "unlimited".into()))
}

pub fn usage(result: &UsageResult) -> String {
    fields(&[
        ("user_id", Some(result.user_id.clone())),
        ("plan", result.plan.clone()),
        ("tokens_used", Some(result.tokens_used.to_string())),
        (
            "compute_seconds",
            Some(format!("{:.0}s (CPU)", result.compute_seconds)),
        ),
        ("gpu_seconds", result.gpu_seconds.map(|s| format!("{:.0}s", s))),
        ("job_count", Some(result.job_count.to_string())),
        ("start_date", result.start_date.map(|d| d.to_string())),
        ("end_date", result.end_date.map(|d| d.to_string())),
        (
            "tokens_limit",
            limit_text(result.token_limit().map(|l| l.to_string())),
        ),
        (
            "tokens_left",
            result.tokens_remaining().map(|t| t.to_string()),
        ),
        (
            "compute_limit",
            limit_text(result.compute_limit_seconds().map(|l| format!("{:.0}s", l))),
        ),
        (
            "gpu_limit",
            result
                .gpu_limit_seconds()
                .map(|l| format!("{:.1}h", l / 3600.0)),
        ),
        (
            "gpu_overage",
            result
                .gpu_seconds_overage
                .filter(|s| *s > 0.0)
                .map(|s| format!("{:.0}s", s)),
        ),
    ])
}

pub fn usage_history(days: &[UsageDailyPoint]) -> String {
    if days.is_empty() {
        return "No usage recorded.".into();
    }

    let mut lines = vec![format!(
        "{:<12} {:>12} {:>12} {:>10} {:>6}",
        "Date", "Tokens", "CPU (s)", "GPU (s)", "Jobs"
    )];
    for day in days {
        lines.push(format!(
            "{:<12} {:>12} {:>12.1} {:>10.1} {:>6}",
            day.date.to_string(),
            day.tokens_used,
            day.compute_seconds,
            day.gpu_seconds,
            day.job_count
        ));
    }
    lines.join("\n")
}

pub fn usage_metrics(metrics: &UsageMetrics) -> String {
    let seconds = |v: Option<f64>| v.map(|s| format!("{:.2}s", s));
    fields(&[
        (
            "success_rate",
            Some(format!("{:.1}%", metrics.success_rate * 100.0)),
        ),
        ("total_jobs", Some(metrics.total_jobs.to_string())),
        ("avg_latency", seconds(metrics.avg_latency_s)),
        ("p50_latency", seconds(metrics.p50_latency_s)),
        ("p95_latency", seconds(metrics.p95_latency_s)),
    ])
}

pub fn jobs(jobs: &[JobSummary]) -> String {
    if jobs.is_empty() {
        return "No jobs.".into();
    }

    let mut lines = vec![format!(
        "{:<38} {:<38} {:<12} {:>8} {}",
        "Job ID", "Deployment", "Status", "Tokens", "Created"
    )];
    for job in jobs {
        lines.push(format!(
            "{:<38} {:<38} {:<12} {:>8} {}",
            job.id,
            job.deployment_id,
            job.status,
            job.tokens_used
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".into()),
            or_dash(job.created_at.as_deref())
        ));
    }
    lines.join("\n")
}

pub fn deployments(list: &DeploymentList) -> String {
    if list.deployments.is_empty() {
        return "No deployments.".into();
    }

    let mut lines = vec![format!(
        "{:<38} {:<24} {:<12} {:>9} {}",
        "ID", "Model", "Status", "Revisions", "Updated"
    )];
    for dep in &list.deployments {
        lines.push(format!(
            "{:<38} {:<24} {:<12} {:>9} {}",
            dep.id,
            dep.model_id,
            dep.status,
            dep.revision_count,
            or_dash(dep.updated_at.as_deref())
        ));
    }
    lines.push(format!(
        "Showing {} of {}",
        list.deployments.len(),
        list.total
    ));
    lines.join("\n")
}

pub fn revisions(list: &RevisionList) -> String {
    if list.revisions.is_empty() {
        return format!("No revisions for {}.", list.deployment_id);
    }

    let mut lines = vec![format!(
        "{:>8} {:<24} {:<30} {}",
        "Revision", "Model", "Path", "Created"
    )];
    for rev in &list.revisions {
        lines.push(format!(
            "{:>8} {:<24} {:<30} {}",
            rev.revision_number,
            rev.model_id,
            or_dash(rev.model_path.as_deref()),
            or_dash(rev.created_at.as_deref())
        ));
    }
    lines.join("\n")
}
