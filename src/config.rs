use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::model::Route;

/// Browse clusters, commands, applications and jobs of a Genie service.
#[derive(Debug, Clone, Parser)]
#[command(name = "genie-console", version, about)]
pub struct Config {
    /// Base URL of the service.
    #[arg(long, default_value = "http://localhost:8080")]
    pub url: String,

    /// Page size used when the route does not specify one.
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub page_size: u32,

    /// Initial route, e.g. `jobs?status=RUNNING` or `commands?name=spark`.
    #[arg(long, default_value = "commands")]
    pub route: Route,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Write logs to this file. Without it logs are discarded.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `genie_console=trace`.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["genie-console"]);
        assert_eq!(cfg.url, "http://localhost:8080");
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.route.kind, ResourceKind::Commands);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn route_argument_is_parsed() {
        let cfg = Config::parse_from(["genie-console", "--route", "jobs?status=RUNNING", "--page-size", "50"]);
        assert_eq!(cfg.route.kind, ResourceKind::Jobs);
        assert_eq!(cfg.route.query.get("status"), Some("RUNNING"));
        assert_eq!(cfg.page_size, 50);
    }

    #[test]
    fn bad_route_is_rejected() {
        assert!(Config::try_parse_from(["genie-console", "--route", "hosts"]).is_err());
    }
}
