use clap::Parser;
use signum::cli::commands::{add::AddArgs, edit::EditArgs};
use signum::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to stderr.
///
/// `SIGNUM_LOG` takes a standard filter directive; otherwise `--verbose`
/// selects `debug` and the default is `warn`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SIGNUM_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => signum::cli::commands::init::execute(&cli),
        Commands::List {
            ref search,
            ref category,
        } => signum::cli::commands::list::execute(&cli, search.as_deref(), category.as_deref()),
        Commands::Add {
            ref title,
            ref username,
            ref password,
            ref url,
            ref description,
            ref notes,
            ref tokens,
            ref tags,
            ref category,
        } => signum::cli::commands::add::execute(
            &cli,
            AddArgs {
                title,
                username,
                password: password.as_deref(),
                url: url.as_deref(),
                description: description.as_deref(),
                notes: notes.as_deref(),
                tokens: tokens.as_deref(),
                tags,
                category: category.as_deref(),
            },
        ),
        Commands::Show { ref id, reveal } => signum::cli::commands::show::execute(&cli, id, reveal),
        Commands::Copy { ref id } => signum::cli::commands::copy::execute(&cli, id),
        Commands::Edit {
            ref id,
            ref title,
            ref username,
            ref password,
            ref url,
            ref description,
            ref notes,
            ref tokens,
            ref tags,
            ref category,
            no_category,
        } => signum::cli::commands::edit::execute(
            &cli,
            EditArgs {
                id,
                title: title.as_deref(),
                username: username.as_deref(),
                password: password.as_deref(),
                url: url.as_deref(),
                description: description.as_deref(),
                notes: notes.as_deref(),
                tokens: tokens.as_deref(),
                tags: tags.as_deref(),
                category: category.as_deref(),
                no_category,
            },
        ),
        Commands::Delete { ref id, force } => signum::cli::commands::delete::execute(&cli, id, force),
        Commands::Category { ref action } => signum::cli::commands::category::execute(&cli, action),
        Commands::ChangePassword => signum::cli::commands::change_password::execute(&cli),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        signum::cli::output::error(&e.user_message());
        std::process::exit(1);
    }
}
