use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "quantlix", version)]
#[command(about = "Quantlix CLI: deploy models, run inference, check status", long_about = None)]
pub struct Args {
    /// API key (overrides QUANTLIX_API_KEY)
    #[arg(long, short = 'k', global = true)]
    pub api_key: Option<String>,

    /// API base URL (overrides QUANTLIX_API_URL)
    #[arg(long = "url", short = 'u', global = true)]
    pub url: Option<String>,

    /// Print the raw JSON response
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account; a verification link is emailed to you
    Signup {
        /// Prompted for when omitted
        #[arg(long, short = 'e')]
        email: Option<String>,
        /// Min 12 chars with upper, lower, digit and special character.
        /// Prompted for (hidden) when omitted
        #[arg(long, short = 'p', env = "QUANTLIX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Verify your email and receive an API key
    Verify {
        /// Token from the verification link
        token: String,
    },
    /// Send the verification email again
    ResendVerification {
        #[arg(long, short = 'e')]
        email: String,
    },
    /// Email a password reset link
    ForgotPassword {
        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Set a new password using the token from the reset email
    ResetPassword {
        token: String,
        /// New password, prompted for (hidden) when omitted
        #[arg(long, short = 'p', env = "QUANTLIX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in and print an API key
    Login {
        #[arg(long, short = 'e')]
        email: Option<String>,
        /// Prompted for (hidden) when omitted
        #[arg(long, short = 'p', env = "QUANTLIX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Check a password against the signup rules
    PasswordStrength {
        #[arg(long, short = 'p', env = "QUANTLIX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Check that the API is up
    Health,
    /// Show the account behind the API key
    Whoami,
    /// Deploy a model
    Deploy {
        /// Model identifier (e.g. my-llama-7b)
        model_id: String,
        /// Storage path to the model files
        #[arg(long, short = 'p')]
        model_path: Option<String>,
        /// JSON config (e.g. '{"replicas": 1}')
        #[arg(long, short = 'c')]
        config: Option<String>,
        /// Deploy with GPU
        #[arg(long, short = 'g')]
        gpu: bool,
        /// Update this deployment instead of creating one (adds a revision)
        #[arg(long)]
        deployment_id: Option<String>,
    },
    /// Run inference on a deployment
    Run {
        deployment_id: String,
        /// Inline JSON (object or array) or path to a .json file
        #[arg(long = "input", short = 'i', default_value = "{}")]
        input: String,
    },
    /// Status of a deployment or job
    Status {
        /// Deployment or job ID
        resource_id: String,
    },
    /// Usage totals (tokens, compute seconds, jobs)
    Usage {
        /// Start date (YYYY-MM-DD)
        #[arg(long = "start", short = 's')]
        start_date: Option<NaiveDate>,
        /// End date (YYYY-MM-DD)
        #[arg(long = "end", short = 'e')]
        end_date: Option<NaiveDate>,
    },
    /// Daily usage breakdown
    UsageHistory {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Success rate and latency statistics
    UsageMetrics {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Recent inference jobs
    Jobs {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// List deployments
    Deployments {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// List revisions of a deployment
    Revisions { deployment_id: String },
    /// Roll a deployment back to an earlier revision
    Rollback {
        deployment_id: String,
        #[arg(long, short = 'r')]
        revision: u32,
    },
    /// List API keys
    ApiKeys,
    /// Create an API key (shown only once)
    CreateApiKey {
        #[arg(long, short = 'n')]
        name: Option<String>,
    },
    /// Revoke an API key
    RevokeApiKey {
        /// Key ID from `quantlix api-keys`
        key_id: String,
    },
    /// Replace the current API key with a new one
    RotateApiKey,
}
