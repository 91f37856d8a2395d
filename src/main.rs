mod debug_log;
mod quota;
mod usage_paths;

use clap::error::ErrorKind;
use clap::Parser;
use quota::cache::QuotaCache;
use quota::types::DEFAULT_QUERY_KIND;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "glm-usage")]
#[command(about = "Print GLM quota usage as a percentage for terminal status lines")]
#[command(version)]
struct Cli {
    /// Usage record type to report (e.g. TOKENS_LIMIT, TIME_LIMIT)
    #[arg(short, long, default_value = DEFAULT_QUERY_KIND)]
    kind: String,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            kind: DEFAULT_QUERY_KIND.to_string(),
        }
    }
}

/// Parses arguments without ever exiting non-zero; bad arguments fall back to defaults.
fn parse_cli<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            None
        }
        Err(_) => Some(Cli::default()),
    }
}

fn main() {
    let Some(cli) = parse_cli(std::env::args_os()) else {
        return;
    };

    let value = QuotaCache::with_defaults(&cli.kind).get_display_value();

    // The status bar reads stdout verbatim, so no trailing newline.
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", value);
    let _ = stdout.flush();
}
