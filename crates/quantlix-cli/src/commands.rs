//! Command dispatch: one SDK call per subcommand.

use crate::args::Command;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::input::{parse_deploy_config, parse_run_input};
use crate::output;
use crate::prompt::{Prompt, Terminal};
use quantlix_client::{Credentials, DeployOptions, PublicClient, QuantlixClient, UsageQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Context {
    base_url: String,
    api_key: Option<SecretString>,
    config: Config,
    json: bool,
    prompt: Box<dyn Prompt>,
}

impl Context {
    /// Flags win over configuration.
    pub fn new(config: Config, api_key: Option<String>, url: Option<String>, json: bool) -> Self {
        Self {
            base_url: url.unwrap_or_else(|| config.api_url.clone()),
            api_key: api_key.map(SecretString::new).or_else(|| config.api_key.clone()),
            config,
            json,
            prompt: Box::new(Terminal),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn public(&self) -> CliResult<PublicClient> {
        Ok(PublicClient::with_timeout(&self.base_url, self.config.timeout)?)
    }

    fn client(&self) -> CliResult<QuantlixClient> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(CliError::MissingApiKey)?;

        Ok(QuantlixClient::with_timeout(
            api_key.expose_secret().trim(),
            &self.base_url,
            self.config.timeout,
        )?)
    }

    /// Use the argument if given, otherwise ask for it.
    fn text_or_prompt(&self, value: Option<String>, label: &str) -> CliResult<String> {
        let value = match value {
            Some(value) => value,
            None => self.prompt.text(label)?,
        };
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(CliError::InvalidInput(format!("{} is required", label)));
        }
        Ok(value)
    }

    /// Like [`text_or_prompt`](Self::text_or_prompt) with the answer hidden.
    /// The value is passed through untrimmed.
    fn secret_or_prompt(&self, value: Option<String>, label: &str) -> CliResult<String> {
        let value = match value {
            Some(value) => value,
            None => self.prompt.secret(label)?,
        };
        if value.is_empty() {
            return Err(CliError::InvalidInput(format!("{} is required", label)));
        }
        Ok(value)
    }

    /// Pretty JSON with `--json`, otherwise the human rendering.
    fn emit<T: Serialize>(
        &self,
        value: &T,
        render: impl FnOnce(&T) -> String,
    ) -> CliResult<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(render(value))
        }
    }
}

/// Run a command and return what should be printed.
pub async fn execute(command: Command, ctx: &Context) -> CliResult<String> {
    debug!(base_url = %ctx.base_url(), "Executing command");

    match command {
        Command::Signup { email, password } => {
            let email = ctx.text_or_prompt(email, "Email")?;
            let password = ctx.secret_or_prompt(password, "Password")?;
            let result = ctx
                .public()?
                .signup(&Credentials::new(email, password))
                .await?;
            ctx.emit(&result, |r| {
                let mut out = format!(
                    "Account created\n  {}\n  email: {}\n\nCheck your inbox and click the verification link, then run:\n  quantlix verify <token>",
                    r.message, r.email
                );
                if let Some(link) = &r.verification_link {
                    out.push_str(&format!("\n\nVerification link: {}", link));
                }
                out
            })
        }
        Command::Verify { token } => {
            let result = ctx.public()?.verify_email(&token).await?;
            ctx.emit(&result, |r| output::auth("Email verified", r))
        }
        Command::ResendVerification { email } => {
            let result = ctx.public()?.resend_verification(&email).await?;
            ctx.emit(&result, |r| r.message.clone())
        }
        Command::ForgotPassword { email } => {
            let email = ctx.text_or_prompt(email, "Email")?;
            let result = ctx.public()?.forgot_password(&email).await?;
            ctx.emit(&result, |r| {
                format!(
                    "{}\n\nThen run: quantlix reset-password <token> --password <new-password>",
                    r.message
                )
            })
        }
        Command::ResetPassword { token, password } => {
            let password = ctx.secret_or_prompt(password, "New password")?;
            let result = ctx.public()?.reset_password(&token, &password).await?;
            ctx.emit(&result, |r| {
                format!("{}\n\nYou can now log in with: quantlix login", r.message)
            })
        }
        Command::Login { email, password } => {
            let email = ctx.text_or_prompt(email, "Email")?;
            let password = ctx.secret_or_prompt(password, "Password")?;
            let result = ctx
                .public()?
                .login(&Credentials::new(email, password))
                .await?;
            ctx.emit(&result, |r| output::auth("Logged in", r))
        }
        Command::PasswordStrength { password } => {
            let password = ctx.secret_or_prompt(password, "Password")?;
            let result = ctx.public()?.check_password_strength(&password).await?;
            ctx.emit(&result, output::password_strength)
        }
        Command::Health => {
            let result = ctx.public()?.health().await?;
            ctx.emit(&result, |r| format!("{}: {}", ctx.base_url(), r.status))
        }
        Command::Whoami => {
            let result = ctx.client()?.me().await?;
            ctx.emit(&result, output::user)
        }
        Command::Deploy {
            model_id,
            model_path,
            config,
            gpu,
            deployment_id,
        } => {
            let client = ctx.client()?;
            let options = DeployOptions {
                model_path,
                config: Some(parse_deploy_config(config.as_deref(), gpu)?),
                deployment_id,
            };
            let result = client.deploy(&model_id, options).await?;
            ctx.emit(&result, output::deploy)
        }
        Command::Run {
            deployment_id,
            input,
        } => {
            let client = ctx.client()?;
            let input = parse_run_input(&input)?;
            let result = client.run(&deployment_id, input).await?;
            ctx.emit(&result, output::run)
        }
        Command::Status { resource_id } => {
            let result = ctx.client()?.status(&resource_id).await?;
            ctx.emit(&result, output::status)
        }
        Command::Usage {
            start_date,
            end_date,
        } => {
            let query = UsageQuery {
                start_date,
                end_date,
            };
            let result = ctx.client()?.usage(query).await?;
            ctx.emit(&result, output::usage)
        }
        Command::UsageHistory { days } => {
            let result = ctx.client()?.usage_history(days).await?;
            ctx.emit(&result, |r| output::usage_history(r))
        }
        Command::UsageMetrics { days } => {
            let result = ctx.client()?.usage_metrics(days).await?;
            ctx.emit(&result, output::usage_metrics)
        }
        Command::Jobs { limit } => {
            let result = ctx.client()?.list_jobs(limit).await?;
            ctx.emit(&result, |r| output::jobs(r))
        }
        Command::Deployments { limit, offset } => {
            let result = ctx.client()?.list_deployments(limit, offset).await?;
            ctx.emit(&result, output::deployments)
        }
        Command::Revisions { deployment_id } => {
            let result = ctx.client()?.list_revisions(&deployment_id).await?;
            ctx.emit(&result, output::revisions)
        }
        Command::Rollback {
            deployment_id,
            revision,
        } => {
            let result = ctx.client()?.rollback(&deployment_id, revision).await?;
            ctx.emit(&result, |r| {
                format!(
                    "Rolled back {} to revision {}",
                    r.deployment_id, r.revision
                )
            })
        }
        Command::ApiKeys => {
            let result = ctx.client()?.list_api_keys().await?;
            ctx.emit(&result, |r| output::api_keys(r))
        }
        Command::CreateApiKey { name } => {
            let result = ctx.client()?.create_api_key(name.as_deref()).await?;
            ctx.emit(&result, |r| output::new_api_key("API key created", r))
        }
        Command::RevokeApiKey { key_id } => {
            let result = ctx.client()?.revoke_api_key(&key_id).await?;
            ctx.emit(&result, |r| r.message.clone())
        }
        Command::RotateApiKey => {
            let result = ctx.client()?.rotate_api_key().await?;
            ctx.emit(&result, |r| {
                format!(
                    "{}\nThe old key no longer works.",
                    output::new_api_key("API key rotated", r)
                )
            })
        }
    }
}
