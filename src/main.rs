use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use valley_bingo::{
    CELL_COUNT, FontSet, ItemPool, PageOptions, Theme, generate_card_set, render_card_page,
    save_card_page,
};

/// Generate randomized neighborhood bingo cards as print-ready pages.
#[derive(Parser, Debug)]
#[command(
    name = "valley-bingo",
    version,
    about = "Generate randomized 5x5 bingo card pages from a pool of tile ideas"
)]
struct Cli {
    /// Number of cards to generate
    #[arg(long, default_value_t = 5)]
    cards: usize,

    /// Directory to write the card pages into
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Directory holding OldLondon.ttf and AppleGaramond.ttf
    #[arg(long, default_value = "fonts")]
    fonts: PathBuf,

    /// Item pool file (JSON string array, or one item per line); defaults to
    /// the built-in list
    #[arg(long)]
    items: Option<PathBuf>,

    /// Theme overrides (JSON)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Dots per inch for the rendered pages
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Seed for reproducible card sets (default: random)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let pool = match &cli.items {
        Some(path) => ItemPool::load(path)?,
        None => ItemPool::default(),
    };
    let theme = match &cli.theme {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };
    let fonts = FontSet::load(&cli.fonts)?;

    // Fail before any sampling or rendering if the pool cannot fill a card.
    pool.select_subset(CELL_COUNT)?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let cards = generate_card_set(&pool, cli.cards, &mut rng)?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory {}", cli.output.display()))?;

    let options = PageOptions { dpi: cli.dpi };
    for (idx, card) in cards.iter().enumerate() {
        let path = cli.output.join(format!("bingo_card_{}.png", idx + 1));
        let page = render_card_page(card, &pool, &theme, &fonts, &options);
        save_card_page(&page, &path)?;
        println!("Generated {}", path.display());
    }

    Ok(())
}
