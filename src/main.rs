use anyhow::Result;
use clap::{Parser, Subcommand};
use scoreup::{App, Config};
use scoreup::stats;
use scoreup::store::PersistentStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scoreup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print your practice statistics
    Stats,
    /// Delete all stored practice data
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Stats) => print_stats(),
        Some(Commands::Reset { yes }) => reset_data(yes),
        None => {
            // Launch TUI
            let config = Config::load()?;
            let mut app = App::new(config)?;
            app.run().await?;
            Ok(())
        }
    }
}

fn print_stats() -> Result<()> {
    let store = PersistentStore::open_default()?;
    let history = store.history();

    let overview = stats::compute_overview(store.question_count(), store.correct_count());
    println!("Questions practiced: {}", overview.total_questions);
    println!("Correct rate:        {}%", overview.correct_rate_percent);

    let breakdown = stats::compute_topic_breakdown(&history);
    if !breakdown.is_empty() {
        println!("\nTopics:");
        for topic in &breakdown {
            println!("  {:<30} {} questions", topic.topic, topic.count);
        }
    }

    let weakest = stats::compute_weakest_topic(&history);
    if let Some(topic) = weakest.topic {
        println!("\nWeakest topic: {} ({:.1}% accuracy)", topic, weakest.accuracy_percent);
    }

    Ok(())
}

fn reset_data(yes: bool) -> Result<()> {
    if !yes {
        print!("Reset ALL your ScoreUp practice data? This cannot be undone. [y/N] ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let store = PersistentStore::open_default()?;
    store.clear_all()?;
    println!("All your ScoreUp data has been reset!");
    Ok(())
}
