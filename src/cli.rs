use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "depcanary",
    about = "Extract a normalized dependency inventory from lockfiles and submit it for scanning",
    version
)]
pub struct Cli {
    /// Comma-separated kind:path lockfile entries; discovered from the
    /// working directory when omitted [env: CANARY_LOCKFILES]
    #[arg(long, value_name = "LIST")]
    pub lockfiles: Option<String>,

    /// Project identifier stamped into the inventory [env: CANARY_PROJECT_ID, GITHUB_REPOSITORY]
    #[arg(long, value_name = "ID")]
    pub project_id: Option<String>,

    /// Include development/test dependencies; the literal "false" disables [env: CANARY_INCLUDE_DEV]
    #[arg(long, value_name = "BOOL")]
    pub include_dev: Option<String>,

    /// Working directory for discovery and output placement [env: CANARY_WORKDIR, GITHUB_WORKSPACE]
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Scanning endpoint base URL; submission is skipped when unset [env: CANARY_WORKER_URL]
    #[arg(long, value_name = "URL")]
    pub worker_url: Option<String>,

    /// Bearer token attached to the submission request [env: CANARY_TOKEN]
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Treat submission failure as fatal; the literal "false" relaxes it to a warning [env: CANARY_FAIL_ON_ERROR]
    #[arg(long, value_name = "BOOL")]
    pub fail_on_error: Option<String>,

    /// List every inventoried dependency in the report
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}
