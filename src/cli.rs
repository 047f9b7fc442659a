use clap::{Parser, Subcommand};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR_NAME, DEFAULT_REGISTRY_TOOL, FOLDER_TIMESTAMP_FORMAT,
};
use crate::models::MetadataMap;

/// Command-line arguments for the snapshot collector.
///
/// Collects machine configuration artifacts, host information and metadata
/// into a destination folder for support handoff.
#[derive(Parser, Debug)]
#[clap(name = "snapshot-collector", version, about = "Machine-state snapshot collector for support handoff")]
pub struct Args {
    /// Destination folder (default: ./collector-output/{yyyyMMdd_HHmmss})
    #[clap(long = "dest", visible_alias = "destination")]
    pub destination: Option<PathBuf>,

    /// Path to the task catalog (JSON, or YAML by extension)
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Checklist workbook template (.xlsx) to fill
    #[clap(long)]
    pub checklist: Option<PathBuf>,

    /// Metadata override, repeatable (also accepted as --meta:key=value)
    #[clap(long = "meta", value_name = "KEY=VALUE", value_parser = parse_metadata_pair)]
    pub meta: Vec<(String, String)>,

    /// Registry export program
    #[clap(long, default_value = DEFAULT_REGISTRY_TOOL)]
    pub reg_tool: PathBuf,

    /// Package the destination folder into {destination}.zip
    #[clap(long)]
    pub archive: bool,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the collector.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the built-in task catalog to a file
    InitConfig {
        /// Output file; `.yaml`/`.yml` selects YAML, anything else JSON
        #[clap(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
        path: PathBuf,
    },
}

impl Args {
    /// Parse the process arguments after rewriting `--meta:key=value` tokens.
    pub fn try_parse_normalized() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_meta_args(env::args_os()))
    }

    /// Overrides in command-line order; later duplicates win.
    pub fn metadata_overrides(&self) -> MetadataMap {
        self.meta.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Destination root, absolute against `cwd`.
    pub fn destination_root(&self, cwd: &Path) -> PathBuf {
        match &self.destination {
            Some(dest) if dest.is_absolute() => dest.clone(),
            Some(dest) => cwd.join(dest),
            None => cwd
                .join(DEFAULT_OUTPUT_DIR_NAME)
                .join(chrono::Local::now().format(FOLDER_TIMESTAMP_FORMAT).to_string()),
        }
    }

    /// Catalog path: `--config`, or the default file next to the executable.
    pub fn config_path(&self) -> PathBuf {
        if let Some(config) = &self.config {
            return config.clone();
        }
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE_NAME))
    }
}

/// Split `key=value`, trimming both sides.
pub fn parse_metadata_pair(raw: &str) -> Result<(String, String), String> {
    let index = match raw.find('=') {
        Some(index) if index > 0 && index < raw.len() - 1 => index,
        _ => return Err(format!("invalid metadata '{}': expected key=value", raw)),
    };

    let key = raw[..index].trim();
    if key.is_empty() {
        return Err(format!("invalid metadata '{}': key is empty", raw));
    }

    Ok((key.to_string(), raw[index + 1..].trim().to_string()))
}

/// Rewrite `--meta:key=value` into `--meta key=value`.
pub fn normalize_meta_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut normalized = Vec::new();
    for arg in args {
        let arg: OsString = arg.into();
        match arg.to_str().and_then(|s| s.strip_prefix("--meta:")) {
            Some(pair) => {
                normalized.push(OsString::from("--meta"));
                normalized.push(OsString::from(pair));
            }
            None => normalized.push(arg),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(normalize_meta_args(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_basic_args_parsing() {
        let args = parse(&[
            "snapshot-collector",
            "--dest", "D:\\snapshots\\run1",
            "--checklist", "template.xlsx",
            "--archive",
            "--verbose",
        ]);

        assert_eq!(args.destination, Some(PathBuf::from("D:\\snapshots\\run1")));
        assert_eq!(args.checklist, Some(PathBuf::from("template.xlsx")));
        assert!(args.archive);
        assert!(args.verbose);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_default_values() {
        let args = parse(&["snapshot-collector"]);

        assert_eq!(args.reg_tool, PathBuf::from("reg.exe"));
        assert!(args.meta.is_empty());
        assert!(args.config.is_none());
        assert!(!args.archive);
        assert!(!args.verbose);
    }

    #[test]
    fn test_destination_alias() {
        let args = parse(&["snapshot-collector", "--destination", "out"]);
        assert_eq!(args.destination, Some(PathBuf::from("out")));
        assert_eq!(args.destination_root(Path::new("/work")), Path::new("/work/out"));
    }

    #[test]
    fn test_default_destination_is_timestamped() {
        let args = parse(&["snapshot-collector"]);
        let root = args.destination_root(Path::new("/work"));
        assert!(root.starts_with("/work/collector-output"));
        assert_eq!(root.file_name().unwrap().len(), "20240101_120000".len());
    }

    #[test]
    fn test_meta_spellings() {
        let args = parse(&[
            "snapshot-collector",
            "--meta", "Customer=ACME",
            "--meta:Machine = TR7600 ",
            "--meta=customer=Globex",
        ]);

        let overrides = args.metadata_overrides();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("CUSTOMER"), Some("Globex"));
        assert_eq!(overrides.get("Machine"), Some("TR7600"));
    }

    #[test]
    fn test_parse_metadata_pair_rules() {
        assert_eq!(parse_metadata_pair("a=b"), Ok(("a".to_string(), "b".to_string())));
        assert_eq!(parse_metadata_pair(" Serial = X1 "), Ok(("Serial".to_string(), "X1".to_string())));
        assert_eq!(parse_metadata_pair("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert!(parse_metadata_pair("novalue").is_err());
        assert!(parse_metadata_pair("=b").is_err());
        assert!(parse_metadata_pair("a=").is_err());
        assert!(parse_metadata_pair("  =b").is_err());
    }

    #[test]
    fn test_bad_meta_is_argument_error() {
        let err = Args::try_parse_from(["snapshot-collector", "--meta", "oops"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_init_config_subcommand() {
        let args = parse(&["snapshot-collector", "init-config", "--path", "catalog.yaml"]);

        match args.command {
            Some(Commands::InitConfig { path }) => assert_eq!(path, PathBuf::from("catalog.yaml")),
            _ => panic!("Expected InitConfig command"),
        }
    }

    #[test]
    fn test_explicit_config_path() {
        let args = parse(&["snapshot-collector", "-c", "site.json"]);
        assert_eq!(args.config_path(), PathBuf::from("site.json"));

        let default = parse(&["snapshot-collector"]).config_path();
        assert_eq!(default.file_name().unwrap(), "collector.config.json");
    }
}
