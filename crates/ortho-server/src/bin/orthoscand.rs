//! Daemon entry point: `serve` runs the WebSocket endpoint, `worker`
//! processes one scan and exits. The orchestrator re-executes this
//! binary with `worker` for each side of a dual-scan job.

use clap::{Parser, Subcommand};
use ortho_model::Checkpoints;
use ortho_pipeline::ScanTask;
use ortho_server::{run_task, ModelConfig, ServerConfig};
use ortho_types::JawSide;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "orthoscand", version, about = "Dental scan segmentation service")]
struct Cli {
    /// Log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the WebSocket endpoint.
    Serve {
        /// Path to the YAML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Process one scan and exit. Spawned by the orchestrator.
    Worker {
        /// Path to the input scan mesh.
        #[arg(long)]
        scan: PathBuf,
        /// Directory the artifacts are written into.
        #[arg(long)]
        output_dir: PathBuf,
        /// Jaw side ("lower" or "upper"); detected from the scan when
        /// omitted.
        #[arg(long)]
        jaw: Option<String>,
        /// Accelerator device to pin.
        #[arg(long)]
        device: Option<u32>,
        /// The external inference command.
        #[arg(long)]
        model_command: PathBuf,
        /// Checkpoint for the sampling stage.
        #[arg(long)]
        checkpoint_fps: PathBuf,
        /// Checkpoint for the boundary stage.
        #[arg(long)]
        checkpoint_bdl: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Serve { config } => serve(config.as_deref()),
        Command::Worker {
            scan,
            output_dir,
            jaw,
            device,
            model_command,
            checkpoint_fps,
            checkpoint_bdl,
        } => {
            let jaw = match jaw.as_deref().map(parse_jaw).transpose() {
                Ok(jaw) => jaw,
                Err(bad) => {
                    eprintln!("invalid jaw side: {bad}");
                    return ExitCode::FAILURE;
                }
            };
            let mut task = ScanTask::new(scan, output_dir);
            task.jaw = jaw;
            task.device = device;
            let model = ModelConfig {
                command: model_command,
                checkpoints: Checkpoints::new(checkpoint_fps, checkpoint_bdl),
            };
            worker(&task, &model)
        }
    }
}

fn parse_jaw(s: &str) -> Result<JawSide, String> {
    JawSide::parse(s).ok_or_else(|| s.to_owned())
}

fn serve(config_path: Option<&std::path::Path>) -> ExitCode {
    let config = match ServerConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "cannot start runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(ortho_server::serve(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

fn worker(task: &ScanTask, model: &ModelConfig) -> ExitCode {
    match run_task(task, model) {
        Ok(report) => {
            info!(jaw = %report.jaw, anchors = report.anchor_count, "worker done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The supervisor reads the last stderr line as the failure
            // detail.
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
