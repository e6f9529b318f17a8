use clap::{Parser, ValueEnum};
use log::debug;
use recipe_finder::{FinderConfig, HtmlRenderer, RecipeFinder, Renderer, TextRenderer};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

/// Find recipes that use the ingredients you have.
#[derive(Parser, Debug)]
#[command(name = "recipe-finder", author, version, about)]
struct Cli {
    /// Comma separated ingredients, e.g. "chicken, garlic, lemon".
    /// Without it, every line read from stdin runs one search.
    ingredients: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Base URL of a TheMealDB-compatible service
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of recipes to fetch details for
    #[arg(long)]
    max_candidates: Option<usize>,

    /// Fail instead of using the offline recipes when the service is down
    #[arg(long)]
    no_fallback: bool,
}

impl Cli {
    fn apply(&self, config: &mut FinderConfig) {
        if let Some(url) = &self.base_url {
            config.api_base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(max) = self.max_candidates {
            config.max_candidates = max.max(1);
        }
        if self.no_fallback {
            config.fallback_enabled = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = FinderConfig::load()?;
    cli.apply(&mut config);
    debug!("{:?}", config);

    let renderer: Box<dyn Renderer> = match cli.format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Html => Box::new(HtmlRenderer),
    };
    let finder = RecipeFinder::from_config(&config)?;

    if let Some(ingredients) = &cli.ingredients {
        let outcome = finder.search_text(ingredients).await?;
        print!("{}", renderer.render(&outcome));
        return Ok(());
    }

    // One search per line, like pressing Enter in a search box
    let session = finder.session();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = session.search_text(&line).await?;
        print!("{}", renderer.render(&outcome));
        println!();
    }

    Ok(())
}
