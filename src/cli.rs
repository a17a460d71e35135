use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "movie-db")]
#[command(about = "Interactive in-memory movie rating database")]
pub struct RootArgs {
    #[arg(long, help = "Disable ANSI colors in output")]
    pub no_color: bool,
}
