use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use seeder::{ContentSeedConfig, UserSeedConfig, seed_content, seed_users};

/// SkillBridge database seeder CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Database connection URL (required)
    #[arg(short, long)]
    db_url: Option<String>,

    /// Number of students to generate
    #[arg(short = 's', long, default_value = "20")]
    num_students: usize,

    /// Number of mentors to generate
    #[arg(short = 'm', long, default_value = "5")]
    num_mentors: usize,

    /// Random seed for reproducibility (default: 0)
    #[arg(short, long, default_value = "0")]
    rng_seed: u64,

    /// Skip user generation and only seed quizzes, communities and resources
    #[arg(long)]
    content_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let db_url = match args.db_url {
        Some(url) => url,
        None => Input::new().with_prompt("Database URL").interact_text()?,
    };

    let db = Database::connect(&db_url).await?;
    Migrator::up(&db, None).await?;

    if !args.content_only {
        let emails = seed_users(
            &db,
            UserSeedConfig {
                num_students: args.num_students,
                num_mentors: args.num_mentors,
                seed: args.rng_seed,
            },
        )
        .await?;
        println!("All seeded accounts use the password `password123`");
        println!("First account: {}", emails.first().map_or("", |e| e));
    }

    seed_content(
        &db,
        ContentSeedConfig {
            require_mentor: !args.content_only,
        },
    )
    .await?;

    Ok(())
}
