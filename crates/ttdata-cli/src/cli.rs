use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use ttdata_client::AccessKey;
use ttdata_client::source::DatasetSource;

use crate::config::Config;
use crate::context::CliContext;
use crate::logging::install_file_logger;
use crate::scenario::bulk::{
    DEFAULT_BATCH_SIZE, DEFAULT_DATA_DATE, DEFAULT_MAX_BATCHES, DEFAULT_REPORT_DATE,
};
use crate::scenario::{
    BulkUploadConfig, ScenarioReport, check_bulk_upload, check_register_upload_fetch,
};
use crate::{print_err, print_info, print_success, print_warn};

#[derive(Parser, Debug)]
#[command(name = "ttdata", author, version, about = "Integration checks against a TTData server", long_about = None)]
pub struct CliArgs {
    /// Base URL of the TTData server.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
    /// Device id to register and upload under.
    #[arg(long, global = true)]
    pub device_id: Option<String>,
    /// Directory receiving the dated log file.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    /// Access key of an already registered device.
    #[arg(long, global = true, env = "TTDATA_APPKEY", hide_env_values = true)]
    pub appkey: Option<AccessKey>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the device, upload one record and fetch it back.
    Register,
    /// Upload a daily report in batches and fetch the shared data.
    Bulk(BulkArgs),
    /// Run `register` then `bulk`. This is the default.
    All(BulkArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BulkArgs {
    /// CSV path or URL; defaults to the CSSE daily report for `--report-date`.
    #[arg(long)]
    pub source: Option<DatasetSource>,
    /// CSSE daily report to fetch (MM-DD-YYYY).
    #[arg(long, default_value = DEFAULT_REPORT_DATE)]
    pub report_date: String,
    /// Date every uploaded record is tagged with.
    #[arg(long, default_value = DEFAULT_DATA_DATE)]
    pub date: String,
    /// Rows per upload request.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub batch_size: usize,
    /// Stop after this many batches; 0 uploads nothing.
    #[arg(long, default_value_t = DEFAULT_MAX_BATCHES)]
    pub max_batches: usize,
}

impl From<BulkArgs> for BulkUploadConfig {
    fn from(args: BulkArgs) -> Self {
        BulkUploadConfig {
            source: args.source,
            report_date: args.report_date,
            date: args.date,
            batch_size: args.batch_size,
            max_batches: args.max_batches,
        }
    }
}

impl CliArgs {
    /// `config` with command-line flags applied on top.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(endpoint) = &self.endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(device_id) = &self.device_id {
            config.device_id = device_id.clone();
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = log_dir.clone();
        }
        config
    }
}

pub fn cli_main(config: Config) -> ExitCode {
    let args = CliArgs::parse();
    let config = args.apply_to(config);

    match install_file_logger(&config.log_dir) {
        Ok(path) => tracing::debug!("logging to {}", path.display()),
        Err(e) => print_warn!("{e:#}"),
    }

    let time_begin = std::time::Instant::now();
    print_info!("starting ttdata ...");
    print_info!("using {}", config.api_endpoint);

    let mut context = CliContext::new(config);
    if let Some(appkey) = args.appkey {
        context.client_mut().set_access_key(appkey);
    }

    let cli_res = handle_command(args.command, &mut context);

    print_info!(
        "Time elapsed for the current execution: {:.2} sec",
        time_begin.elapsed().as_secs_f64()
    );

    match cli_res {
        Ok(report) if report.passed() => {
            print_success!("All {} stages passed", report.stages().len());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            let failures: Vec<&str> = report.failures().collect();
            print_err!("Failed stages: {}", failures.join(", "));
            ExitCode::FAILURE
        }
        Err(e) => {
            print_err!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn handle_command(
    command: Option<Commands>,
    context: &mut CliContext,
) -> anyhow::Result<ScenarioReport> {
    match command {
        Some(Commands::Register) => {
            let (client, device_id) = context.session();
            check_register_upload_fetch(client, device_id)
        }
        Some(Commands::Bulk(args)) => check_bulk_upload(
            context.client(),
            context.device_id(),
            &BulkUploadConfig::from(args),
        ),
        Some(Commands::All(args)) => run_all(context, BulkUploadConfig::from(args)),
        None => run_all(context, BulkUploadConfig::default()),
    }
}

fn run_all(context: &mut CliContext, bulk: BulkUploadConfig) -> anyhow::Result<ScenarioReport> {
    let (client, device_id) = context.session();
    let mut report = check_register_upload_fetch(client, device_id)?;

    print_info!("== /covid19 bulk upload ==");
    report.merge(check_bulk_upload(
        context.client(),
        context.device_id(),
        &bulk,
    )?);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_everything() {
        let args = CliArgs::try_parse_from(["ttdata"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.apply_to(Config::default()), Config::default());
    }

    #[test]
    fn bulk_args_have_script_defaults() {
        let args = CliArgs::try_parse_from(["ttdata", "bulk"]).unwrap();
        let Some(Commands::Bulk(bulk)) = args.command else {
            panic!("expected bulk command");
        };
        let config = BulkUploadConfig::from(bulk);

        assert!(config.source.is_none());
        assert_eq!(config.report_date, "05-17-2020");
        assert_eq!(config.date, "2020-05-09");
        assert_eq!(config.batch_size, 200);
        assert_eq!(config.max_batches, 9999);
    }

    #[test]
    fn global_flags_override_config() {
        let args = CliArgs::try_parse_from([
            "ttdata",
            "all",
            "--endpoint",
            "http://192.168.1.196:7061",
            "--device-id",
            "test-ttdata-20200611",
            "--max-batches",
            "1",
            "--source",
            "data/05-17-2020.csv",
        ])
        .unwrap();
        let config = args.apply_to(Config::default());

        assert_eq!(config.api_endpoint, "http://192.168.1.196:7061");
        assert_eq!(config.device_id, "test-ttdata-20200611");

        let Some(Commands::All(bulk)) = args.command else {
            panic!("expected all command");
        };
        assert_eq!(bulk.max_batches, 1);
        assert!(matches!(bulk.source, Some(DatasetSource::Path(_))));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(CliArgs::try_parse_from(["ttdata", "bulk", "--batch-size", "0"]).is_err());
    }
}
