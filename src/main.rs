use clap::Parser;

use movie_db::cli::RootArgs;
use movie_db::store::MovieStore;
use movie_db::ui::{self, Style};

fn main() -> eyre::Result<()> {
    init_tracing();

    let args = RootArgs::parse();
    let style = Style::new(!args.no_color);
    let mut store = MovieStore::seeded();

    ui::run(&mut store, &style, std::io::stdin().lock())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    // logs on stderr so they never interleave with the menu on stdout
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
