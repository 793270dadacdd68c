//! mesos-sched: a minimal Mesos framework.
//!
//! Registers with the leading master, declines every offer and
//! acknowledges status updates. Useful for checking that a cluster
//! accepts HTTP schedulers.
//!
//! # Usage
//!
//! ```text
//! mesos-sched run --master http://master:5050 --role web
//! mesos-sched run --config scheduler.toml
//! mesos-sched print-config --master zk://zk1:2181/mesos
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mesos_scheduler_client::proto::{Event, event};
use mesos_scheduler_client::{EventHandler, RemoteHandle, Scheduler, SchedulerConfig, SchedulerError};
use tracing::{debug, info, warn};

/// Seconds the master should withhold a declined offer.
const DECLINE_REFUSE_SECONDS: f64 = 5.0;

#[derive(Parser)]
#[command(name = "mesos-sched", about = "Mesos HTTP scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Subscribe and run until interrupted or disconnected.
    Run {
        #[command(flatten)]
        opts: ConfigOpts,

        /// On Ctrl-C, close without tearing the framework down.
        #[arg(long)]
        keep_registered: bool,
    },
    /// Print the effective configuration as TOML.
    PrintConfig {
        #[command(flatten)]
        opts: ConfigOpts,
    },
}

#[derive(Args)]
struct ConfigOpts {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Master URL (`http(s)://host:port` or `zk://hosts/path`).
    #[arg(long)]
    master: Option<String>,

    /// Framework name.
    #[arg(long)]
    name: Option<String>,

    /// Role to subscribe with. May be repeated.
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Reuse an existing framework ID.
    #[arg(long)]
    framework_id: Option<String>,

    /// Accept any TLS certificate from the masters.
    #[arg(long)]
    insecure: bool,
}

impl ConfigOpts {
    /// File settings overridden by flags.
    fn load(self) -> anyhow::Result<SchedulerConfig> {
        let mut config = match &self.config {
            Some(path) => SchedulerConfig::from_file(path)?,
            None => SchedulerConfig::default(),
        };
        if let Some(master) = self.master {
            config.master_url = master;
        }
        if let Some(name) = self.name {
            config.name = Some(name);
        }
        if !self.roles.is_empty() {
            config.roles = self.roles;
        }
        if let Some(id) = self.framework_id {
            config.framework_id = Some(id);
        }
        if self.insecure {
            config.disable_tls_verification = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Declines offers and acknowledges updates.
struct Decliner {
    remote: Option<RemoteHandle>,
}

impl EventHandler for Decliner {
    async fn on_subscribe(
        &mut self,
        remote: RemoteHandle,
        subscribed: event::Subscribed,
    ) -> anyhow::Result<()> {
        info!(
            framework_id = %subscribed.framework_id,
            heartbeat = ?subscribed.heartbeat_interval_seconds,
            "framework subscribed"
        );
        self.remote = Some(remote);
        Ok(())
    }

    async fn on_event(&mut self, event: Event) -> anyhow::Result<()> {
        let Some(remote) = &self.remote else {
            return Ok(());
        };

        match event.r#type() {
            event::Type::Offers => {
                let ids: Vec<_> = event
                    .offers
                    .map(|o| o.offers.into_iter().map(|offer| offer.id).collect())
                    .unwrap_or_default();
                info!(count = ids.len(), "declining offers");
                remote.decline(ids, Some(DECLINE_REFUSE_SECONDS)).await;
            }
            event::Type::Update => {
                if let Some(update) = event.update {
                    let status = update.status;
                    info!(
                        task_id = %status.task_id,
                        state = status.state().as_str_name(),
                        "task status update"
                    );
                    if status.uuid.is_some() {
                        remote.acknowledge(&status).await;
                    }
                }
            }
            event::Type::UpdateOperationStatus => {
                if let Some(update) = event.update_operation_status {
                    if update.status.uuid.is_some() {
                        remote.acknowledge_operation_status(&update.status).await;
                    }
                }
            }
            event::Type::Error => {
                let message = event.error.map(|e| e.message).unwrap_or_default();
                warn!(%message, "master reported an error");
            }
            other => debug!(event = other.as_str_name(), "ignoring event"),
        }
        Ok(())
    }

    async fn on_disconnect(&mut self) {
        warn!("master closed the subscription");
    }

    async fn on_terminate(&mut self, error: SchedulerError) {
        tracing::error!(%error, "scheduler terminated");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mesos_scheduler_client=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            opts,
            keep_registered,
        } => run(opts.load()?, keep_registered).await,
        Command::PrintConfig { opts } => {
            print!("{}", opts.load()?.to_toml_string()?);
            Ok(())
        }
    }
}

async fn run(config: SchedulerConfig, keep_registered: bool) -> anyhow::Result<()> {
    info!(master = %config.master_url, "starting scheduler");
    let scheduler = Scheduler::builder(config)
        .start(Decliner { remote: None })
        .await?;

    let state = tokio::select! {
        state = scheduler.join() => state,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, shutting down");
            match scheduler.remote() {
                Some(remote) if !keep_registered => remote.teardown().await,
                _ => scheduler.close(),
            }
            scheduler.join().await
        }
    };

    info!(%state, framework_id = %scheduler.framework_id(), "scheduler stopped");
    Ok(())
}
