use cardstudio::cli::{
    handle_assign, handle_design, handle_init, handle_lookup, handle_order, handle_receive,
    handle_share, handle_theme, handle_view, Cli, Commands,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::View { role, json } => handle_view(role, json),
        Commands::Order {
            company,
            details,
            json,
        } => handle_order(company, details, json),
        Commands::Design {
            order_id,
            template,
            json,
        } => handle_design(order_id, template, json),
        Commands::Assign {
            design_id,
            name,
            email,
            phone,
            title,
            json,
        } => handle_assign(design_id, name, email, phone, title, json),
        Commands::Share { card_id } => handle_share(card_id),
        Commands::Receive { code, json } => handle_receive(code, json),
        Commands::Lookup { code, json } => handle_lookup(code, json),
        Commands::Theme { mode } => handle_theme(mode),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. Warnings reach the user through the CLI's own
/// messages, so the default filter only lets errors through.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "error".into()))
        .with_writer(std::io::stderr)
        .init();
}
