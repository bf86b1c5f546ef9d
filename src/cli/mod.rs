// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// There is exactly one command — repack the archives — so
// there are no subcommands, just keyword options with
// defaults. Running the binary bare processes `data/raw`
// into `data/processed` in train mode.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::IngestArgs;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "seizure-data-prep",
    version = "0.1.0",
    about = "Repack zipped seizure-detection recordings into a patient/class/segment tree."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: IngestArgs,
}

impl Cli {
    /// Convert the parsed args into a config and hand off to
    /// Layer 2. This keeps the CLI layer thin — it only routes,
    /// never computes.
    pub fn run(self) -> Result<()> {
        use crate::application::ingest_use_case::IngestUseCase;

        tracing::info!(
            "Repacking {} archives from '{}' into '{}'",
            self.args.mode,
            self.args.input_dir.display(),
            self.args.output_dir.display()
        );

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = IngestUseCase::new(self.args.into());
        let written = use_case.execute()?;

        println!("Done. {} record(s) written.", written);
        Ok(())
    }
}
