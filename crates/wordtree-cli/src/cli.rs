use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wordtree", about = "Dictionary shell backed by a red-black tree", version)]
pub struct Cli {
    /// Word list to load, one word per line [default: dictionary.txt]
    #[arg(long, short = 'd')]
    pub dictionary: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Compare words case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Order shorter words before longer ones
    #[arg(long)]
    pub length_first: bool,

    /// Print the tree in level order after loading
    #[arg(long)]
    pub level_order: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress log output
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,
}
