//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the basket examples
#[derive(Debug, Parser)]
pub struct ExampleBasketArgs {
    /// Fixture set to use for the catalogue, basket & offers
    #[clap(short, long, default_value = "fruit")]
    pub fixture: String,

    /// Directory holding the fixture sets
    #[clap(short, long, default_value = "./fixtures")]
    pub base_path: PathBuf,

    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`
    #[clap(short, long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults() -> TestResult {
        let args = ExampleBasketArgs::try_parse_from(["basket"])?;

        assert_eq!(args.fixture, "fruit");
        assert_eq!(args.base_path, PathBuf::from("./fixtures"));
        assert_eq!(args.log_level, "warn");

        Ok(())
    }

    #[test]
    fn short_flags() -> TestResult {
        let args =
            ExampleBasketArgs::try_parse_from(["basket", "-f", "grocery", "-b", "/tmp", "-l", "debug"])?;

        assert_eq!(args.fixture, "grocery");
        assert_eq!(args.base_path, PathBuf::from("/tmp"));
        assert_eq!(args.log_level, "debug");

        Ok(())
    }
}
