use clap::Parser;
use dowelkit::cli::{self, Cli};
use dowelkit::init_logging;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    cli::run(cli, &mut stdout.lock())
}
