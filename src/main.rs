use clap::Parser;
use miette::Result;
use propdesk::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Init(args) => propdesk::cli::commands::init::run(args),
        Commands::Import(args) => propdesk::cli::commands::import::run(args, &global),
        Commands::Fields(args) => propdesk::cli::commands::fields::run(args),
        Commands::List(args) => propdesk::cli::commands::list::run(args),
        Commands::Config(cmd) => propdesk::cli::commands::config::run(cmd),
        Commands::Completions(args) => propdesk::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr; RUST_LOG wins over --verbose
fn init_tracing(global: &GlobalOpts) {
    let default = if global.verbose {
        "propdesk=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
