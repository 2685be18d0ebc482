use std::process::ExitCode;

use anyhow::Result;
use aws_config::BehaviorVersion;
use tracing::{debug, info};

use ngup::config::{self, Config};
use ngup::eks::EksClient;
use ngup::logging;
use ngup::observer::TracingObserver;
use ngup::ssm::SsmClient;
use ngup::updater::Updater;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_args();
    logging::init(&config.log_format, &config.log_level);

    info!(
        version = config::VERSION,
        commit = config::COMMIT,
        build_date = config::BUILD_DATE,
        "Node group AMI updater starting"
    );

    let region = config.region();
    debug!(region = %region, "Loading AWS SDK configuration");
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;

    let eks = EksClient::new(&sdk_config);
    let ssm = SsmClient::new(&sdk_config);
    let observer = TracingObserver::new();

    let outcome = Updater::new(&eks, &ssm, &observer).run(&config).await;

    info!(
        outcome = outcome.kind(),
        status_code = outcome.status_code(),
        "Node group AMI updater finished"
    );
    println!("{}", serde_json::to_string(&outcome.to_response())?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
