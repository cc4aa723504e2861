use std::path::PathBuf;

use clap::Parser;

use fluid_model::EngineKind;

/// Resolve the runtime info of one cache runtime.
#[derive(Debug, Parser)]
#[command(name = "fluid-resolve")]
#[command(
    about = "Resolve runtime info (worker selector, bound dataset) for a cache runtime",
    long_about = None
)]
pub struct Cli {
    /// Engine kind (alluxio, jindo, juicefs, goosefs, thin, efc, vineyard)
    #[arg(long, value_name = "KIND")]
    pub kind: EngineKind,

    /// Runtime name
    #[arg(long)]
    pub name: String,

    /// Runtime namespace
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Read cluster state from a JSON snapshot instead of a live cluster
    #[arg(long, value_name = "PATH", conflicts_with = "kube", required_unless_present = "kube")]
    pub fixture: Option<PathBuf>,

    /// Read cluster state from the Kubernetes API (in-cluster or kubeconfig)
    #[arg(long)]
    pub kube: bool,

    /// JSON config file with `logger` and `resolve` sections
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Check the worker DaemonSet node selector against the derived key
    #[arg(long)]
    pub verify_worker_selector: bool,

    /// Log filter expression, overrides the config file
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log format (text, json, journald), overrides the config file
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Print resolution metrics in Prometheus text format to stderr
    #[arg(long)]
    pub metrics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixture_invocation() {
        let cli = Cli::try_parse_from([
            "fluid-resolve",
            "--kind",
            "JindoRuntime",
            "--name",
            "hbase",
            "--namespace",
            "fluid",
            "--fixture",
            "state.json",
        ])
        .unwrap();

        assert_eq!(cli.kind, EngineKind::Jindo);
        assert_eq!(cli.name, "hbase");
        assert_eq!(cli.namespace, "fluid");
        assert_eq!(cli.fixture, Some(PathBuf::from("state.json")));
        assert!(!cli.kube);
    }

    #[test]
    fn namespace_defaults() {
        let cli = Cli::try_parse_from([
            "fluid-resolve",
            "--kind",
            "alluxio",
            "--name",
            "a",
            "--kube",
        ])
        .unwrap();
        assert_eq!(cli.namespace, "default");
        assert!(cli.kube);
    }

    #[test]
    fn requires_exactly_one_source() {
        let none = Cli::try_parse_from(["fluid-resolve", "--kind", "jindo", "--name", "a"]);
        assert!(none.is_err());

        let both = Cli::try_parse_from([
            "fluid-resolve",
            "--kind",
            "jindo",
            "--name",
            "a",
            "--kube",
            "--fixture",
            "x.json",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        let res = Cli::try_parse_from(["fluid-resolve", "--kind", "ceph", "--name", "a", "--kube"]);
        assert!(res.is_err());
    }
}
