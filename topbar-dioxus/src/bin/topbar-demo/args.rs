//! Command-line argument parsing.

use std::path::PathBuf;

/// Options for the demo window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoArgs {
    /// Config file to load instead of the default location.
    pub config: Option<PathBuf>,
    /// Item whose popup should be expanded at startup.
    pub open: Option<String>,
}

/// Parse the process arguments.
pub fn parse_args() -> DemoArgs {
    parse(std::env::args().skip(1))
}

fn parse(args: impl IntoIterator<Item = String>) -> DemoArgs {
    let mut parsed = DemoArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => parsed.config = Some(PathBuf::from(path)),
                None => log::warn!("Missing path after {arg}"),
            },
            "--open" | "-o" => match args.next() {
                Some(name) => parsed.open = Some(name),
                None => log::warn!("Missing item name after {arg}"),
            },
            other => log::warn!("Ignoring unknown argument: {other}"),
        }
    }

    parsed
}
