use clap::{Parser, Subcommand};
use std::path::PathBuf;

use catalog_search::{CatalogData, CatalogEngine, SearchConfig, SearchResultType};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Catalog Search CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog JSON file (built-in catalog when omitted)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Match accuracy (clamped to at least 1)
    #[arg(short, long)]
    accuracy: Option<f64>,

    /// Compare with whitespace instead of stripping it
    #[arg(long)]
    include_whitespace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog sections
    Sections,

    /// Search a section (empty query lists everything)
    Search {
        /// Section name
        section: String,

        /// Search query
        #[arg(default_value = "")]
        query: String,
    },

    /// List every item across sections
    Featured,

    /// Buy an item
    Buy {
        /// Item id
        id: String,

        /// Quantity to buy
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Funds offered
        #[arg(short, long)]
        funds: u64,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let data = match &cli.catalog {
        Some(path) => CatalogData::load(path)?,
        None => CatalogData::builtin()?,
    };

    let base = data.search.unwrap_or_default().with_env_overrides();
    let config = SearchConfig::new(
        cli.include_whitespace || base.include_whitespace(),
        cli.accuracy.unwrap_or(base.accuracy()),
    );
    let mut engine = CatalogEngine::with_config(data, config)?;

    match cli.command {
        Commands::Sections => {
            println!("📚 Sections:");
            for name in engine.sections() {
                let count = engine.section_items(name)?.len();
                println!("   {} ({} items)", name, count);
            }
        }

        Commands::Search { section, query } => {
            println!("🔍 Searching {} for: {:?}", section, query);

            let response = engine.browse(&section, &query)?;

            if response.result_type == SearchResultType::NoMatches {
                println!("\n❌ No matches");
            } else {
                println!();
                for (i, row) in response.results.iter().enumerate() {
                    let score = row
                        .score
                        .map(|s| format!("{:.1}", s))
                        .unwrap_or_else(|| "-".to_string());
                    let stock = engine
                        .stock(&row.item.id)
                        .map(|s| s.stock.to_string())
                        .unwrap_or_else(|| "N/A".to_string());
                    println!(
                        "   {}. {} [{}] score={} price={} stock={}",
                        i + 1,
                        row.item.display_name(),
                        row.item.id,
                        score,
                        row.item.price,
                        stock
                    );
                }
            }
            println!("\n   Latency: {:.2}ms", response.latency_ms);
        }

        Commands::Featured => {
            println!("⭐ Featured:");
            for item in engine.featured() {
                println!("   {} [{}] - {}", item.display_name(), item.id, item.description);
            }
        }

        Commands::Buy { id, quantity, funds } => {
            let receipt = engine.purchase(&id, quantity, funds)?;

            println!("✅ Bought {} x {}", receipt.quantity, receipt.item_id);
            println!("   Total: {}", receipt.total);
            println!("   Change: {}", receipt.change);
            println!("   Remaining: {} ({:?})", receipt.remaining_stock, receipt.status);
        }
    }

    Ok(())
}
