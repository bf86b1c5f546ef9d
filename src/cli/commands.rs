// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Defines the single command's configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → PathBuf, bool, Mode)
//
// Mode is a plain domain enum; clap parses it through its
// FromStr impl, so no clap derives leak into the domain layer.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{ArgAction, Args};

use crate::application::ingest_use_case::IngestConfig;
use crate::domain::mode::Mode;

/// All arguments for a repacking run.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Directory scanned for <mode>*.zip archives
    #[arg(long, default_value = "data/raw")]
    pub input_dir: PathBuf,

    /// Root of the written output tree
    #[arg(long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// Run mode: train (class level in paths) or test
    #[arg(long, default_value = "train")]
    pub mode: Mode,

    /// Scratch root used to extract archive entries.
    /// The default is a ramdisk — extraction never hits disk.
    #[arg(long, default_value = "/dev/shm")]
    pub tmp_dir: PathBuf,

    /// Whether to print each destination path as it is written
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub verbose: bool,
}

/// CLI args → application config. One direction only:
/// the application layer never sees clap types.
impl From<IngestArgs> for IngestConfig {
    fn from(args: IngestArgs) -> Self {
        Self {
            input_dir: args.input_dir,
            output_dir: args.output_dir,
            mode: args.mode,
            tmp_dir: args.tmp_dir,
            verbose: args.verbose,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: IngestArgs,
    }

    #[test]
    fn test_defaults_match_the_documented_ones() {
        let cli = TestCli::parse_from(["prep"]);
        assert_eq!(cli.args.input_dir, PathBuf::from("data/raw"));
        assert_eq!(cli.args.output_dir, PathBuf::from("data/processed"));
        assert_eq!(cli.args.mode, Mode::Train);
        assert_eq!(cli.args.tmp_dir, PathBuf::from("/dev/shm"));
        assert!(cli.args.verbose);
    }

    #[test]
    fn test_mode_and_verbose_parse_as_values() {
        let cli = TestCli::parse_from([
            "prep",
            "--mode",
            "test",
            "--verbose",
            "false",
            "--tmp-dir",
            "/tmp/x",
        ]);
        assert_eq!(cli.args.mode, Mode::Test);
        assert!(!cli.args.verbose);
        assert_eq!(cli.args.tmp_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_bad_mode_is_rejected() {
        assert!(TestCli::try_parse_from(["prep", "--mode", "validate"]).is_err());
    }
}
