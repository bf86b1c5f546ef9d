// ============================================================
// Layer 3 — Run Mode
// ============================================================
// The one branch in the whole pipeline: train data carries a
// class label in its filename and gets a <class> level in the
// output tree; test data has neither.
//
// The mode also selects which archives are picked up at all —
// only `<mode>*.zip` files in the input directory are read.
//
// This is a plain domain enum. clap parses it on the CLI side
// through the FromStr impl below, so no clap derive macros leak
// into this layer.
//
// Reference: Rust Book §6 (Enums), §10 (Trait Implementations)

use std::fmt;
use std::str::FromStr;

/// Whether this run processes train or test archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Labelled data: filenames have a class part,
    /// output paths get a class directory level
    Train,

    /// Unlabelled data: no class anywhere
    Test,
}

impl Mode {
    /// The lowercase name used in archive globs and output paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Train => "train",
            Mode::Test => "test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Mode::Train),
            "test" => Ok(Mode::Test),
            other => Err(format!("mode must be 'train' or 'test', got '{}'", other)),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_both_modes() {
        assert_eq!("train".parse::<Mode>().unwrap(), Mode::Train);
        assert_eq!("test".parse::<Mode>().unwrap(), Mode::Test);
    }

    #[test]
    fn test_rejects_anything_else() {
        assert!("validate".parse::<Mode>().is_err());
        assert!("Train".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(Mode::Train.to_string(), "train");
        assert_eq!(Mode::Test.to_string(), "test");
    }
}
