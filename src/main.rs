mod api;
mod auth;
mod cache;
mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use auth::Authenticator;
use cache::CredentialCache;
use cli::Cli;
use commands::Executor;
use commands::executor::report;
use config::{Config, ConfigStore};
use error::CommandError;

/// Runtime context containing config and the credential cache
pub struct Context<'a> {
    pub config: &'a Config,
    pub cache: CredentialCache,
}

impl Context<'_> {
    /// Create an API client, logging in first if `authenticated` is set
    pub async fn client(&self, authenticated: bool) -> Result<ApiClient, CommandError> {
        let url = self.config.pnc_url()?;
        let token = if authenticated {
            let authenticator = Authenticator::from_config(self.config, self.cache.clone())?;
            Some(authenticator.token().await?)
        } else {
            None
        };
        Ok(ApiClient::new(url, token))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,bacon=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn cancel_on_interrupt(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        debug!("Received interrupt");
        cancel.cancel();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.options.verbose);

    let mut store = ConfigStore::new();
    store.configure(&cli.options.config);
    let config = match store.instance() {
        Ok(config) => config,
        Err(e) => return report(Err(e.into())),
    };
    if let Some(location) = store.location() {
        debug!("Loaded configuration from {}", location.display());
    }

    let ctx = Context {
        config,
        cache: CredentialCache::in_folder(&cli.options.config_folder()),
    };
    debug!("Credential cache at {}", ctx.cache.path().display());

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_interrupt(cancel.clone()));

    let executor = Executor::new(cancel);
    report(executor.execute(cli.command.run(&ctx)).await)
}
