use {
    aws_config::{BehaviorVersion, Region},
    clap::{ArgGroup, Parser},
    log::{debug, error, info},
    scratchstack_quotas::{
        aws::AwsServiceQuotasClient,
        config::{Config, ResolvedQuotasConfig},
        QuotaError, QuotaIdentifier, Resolver,
    },
    std::{path::PathBuf, process::ExitCode},
    tokio::runtime::Builder as RuntimeBuilder,
};

const DEFAULT_CONFIG_FILENAME: &str = "servicequotas.toml";
const EXIT_LOOKUP_ERROR: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;

/// Look up a service quota and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "ssquota", version)]
#[command(group(ArgGroup::new("quota").required(true).args(["quota_code", "quota_name"])))]
struct Args {
    /// Configuration file.
    #[arg(short, long, env = "SSQUOTA_CONFIG", default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    /// The service the quota belongs to, e.g. "vpc".
    #[arg(short, long)]
    service_code: String,

    /// The quota code, e.g. "L-F678F1CE".
    #[arg(long)]
    quota_code: Option<String>,

    /// The exact quota name, e.g. "VPCs per Region".
    #[arg(long)]
    quota_name: Option<String>,

    /// Override the region from the configuration file.
    #[arg(long)]
    region: Option<String>,

    /// Override the account id from the configuration file.
    #[arg(long)]
    account_id: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    info!("Reading configuration from {}", args.config.display());
    let mut config = match Config::read_file(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Unable to read configuration file {}: {}", args.config.display(), e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    if let Some(region) = &args.region {
        config.quotas.region = region.clone();
    }

    if let Some(account_id) = &args.account_id {
        config.quotas.account_id = account_id.clone();
    }

    let config = match config.quotas.resolve() {
        Ok(c) => c,
        Err(e) => {
            error!("Error in configuration file {}: {}", args.config.display(), e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    debug!("Resolved configuration: {:?}", config);

    let identifier = match QuotaIdentifier::from_parts(args.quota_code.as_deref(), args.quota_name.as_deref()) {
        Ok(identifier) => identifier,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let runtime = match RuntimeBuilder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Unable to create runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(lookup(config, &args.service_code, &identifier)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Lookups rejected before reaching the quota service are configuration errors; anything else is a lookup failure.
fn exit_status(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<QuotaError>() {
        Some(QuotaError::Config(_)) => EXIT_CONFIG_ERROR,
        _ => EXIT_LOOKUP_ERROR,
    }
}

async fn lookup(
    config: ResolvedQuotasConfig,
    service_code: &str,
    identifier: &QuotaIdentifier,
) -> anyhow::Result<String> {
    let region = Region::new(config.arn_context.region.clone());
    let sdk_config = aws_config::defaults(BehaviorVersion::latest()).region(region).load().await;
    let client = AwsServiceQuotasClient::new(aws_sdk_servicequotas::Client::new(&sdk_config));
    let resolver = Resolver::new(client, config.arn_context).with_retry_policy(config.retry);

    let quota = resolver.resolve_quota(service_code, identifier).await?;
    Ok(serde_json::to_string_pretty(&quota)?)
}
