use clap::Parser;
use miette::Result;
use oreg::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostic logging on stderr; user-facing output stays on stdout
fn init_tracing(global: &GlobalOpts) {
    let filter = if global.verbose {
        EnvFilter::new("oreg=debug")
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env("OREG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
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
        Commands::List(args) => oreg::cli::commands::list::run(args, &global),
        Commands::Summary(args) => oreg::cli::commands::summary::run(args, &global),
        Commands::Compare(args) => oreg::cli::commands::compare::run(args, &global),
        Commands::Matrix(args) => oreg::cli::commands::matrix::run(args, &global),
        Commands::Export(args) => oreg::cli::commands::export::run(args, &global),
        Commands::Facets(args) => oreg::cli::commands::facets::run(args, &global),
        Commands::Glossary(args) => oreg::cli::commands::glossary::run(args, &global),
        Commands::Config(cmd) => oreg::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => oreg::cli::commands::completions::run(args),
    }
}
