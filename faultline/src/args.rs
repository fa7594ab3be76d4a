use std::path::PathBuf;

use clap::Parser;

/// Faultline demo service
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Demo service answering every failure with a canonical error envelope")]
pub struct Args {
    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "FAULTLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "FAULTLINE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directive, e.g. `info` or `faultline_core=debug`
    #[arg(long, default_value = "info", env = "FAULTLINE_LOG")]
    pub log_filter: String,
}
