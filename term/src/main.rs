use clap::Parser;
use sweeper_core::{CellCount, Coord, Difficulty, GameConfig, GameSession, RandomMineGenerator};
use tracing_subscriber::filter::LevelFilter;

mod app;
mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: beginner, intermediate or expert
    #[arg(short, long, default_value_t = Difficulty::Beginner)]
    difficulty: Difficulty,

    /// Override the preset's row count
    #[arg(long)]
    rows: Option<Coord>,

    /// Override the preset's column count
    #[arg(long)]
    cols: Option<Coord>,

    /// Override the preset's mine count
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random for the first game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the HUD as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Disable coloured numbers
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn game_config(&self) -> sweeper_core::Result<GameConfig> {
        let preset = self.difficulty.config();
        GameConfig::new(
            self.rows.unwrap_or(preset.rows),
            self.cols.unwrap_or(preset.cols),
            self.mines.unwrap_or(preset.mines),
        )
    }
}

fn init_logging(filter: log::LevelFilter) -> anyhow::Result<()> {
    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Error initializing logger: {err}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter())?;

    let config = args.game_config()?;
    let generator = match args.seed {
        Some(seed) => RandomMineGenerator::new(seed),
        None => RandomMineGenerator::from_entropy(),
    };
    log::info!("new {:?} game, seed {}", config, generator.seed());
    let session = GameSession::with_generator(config, generator)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    app::App::new(session, args.json, !args.no_color).run(stdin.lock(), &mut stdout)
}
