use std::path::PathBuf;

use anyhow::Context;

use media_url_store::error::{Result, StoreError};
use media_url_store::{Catalog, Config, Repository, UrlStore};

const USAGE: &str = "\
Usage: media-urls <command>

Commands:
  --list                        print every video url
  --videos                      print every video record as JSON
  --subtitles <video-id>        print the subtitle records of a video as JSON
  --import <catalog.toml>       insert or replace the videos and subtitles of a catalog
  --seed                        insert the sample catalog into an empty store
  --watched <video-url> <secs>  store the resume position of a video";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Videos,
    Subtitles(i64),
    Import(PathBuf),
    Seed,
    Watched(String, i64),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let flag = match args.get(1) {
        Some(flag) => flag.as_str(),
        None => return Ok(Command::Help),
    };

    let command = match (flag, &args[2..]) {
        ("--list", []) => Command::List,
        ("--videos", []) => Command::Videos,
        ("--subtitles", [id]) => Command::Subtitles(parse_number(id, "video id")?),
        ("--import", [path]) => Command::Import(PathBuf::from(path)),
        ("--seed", []) => Command::Seed,
        ("--watched", [url, secs]) => Command::Watched(url.clone(), parse_number(secs, "seconds")?),
        ("--help" | "-h", _) => Command::Help,
        _ => {
            return Err(StoreError::InvalidArgument(format!(
                "unrecognized arguments: {}",
                args[1..].join(" ")
            )))
        }
    };
    Ok(command)
}

fn parse_number(value: &str, what: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| StoreError::InvalidArgument(format!("{what} must be an integer, got {value:?}")))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging (RUST_LOG wins over the configured level)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(1);
        }
    };

    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let repository = Repository::open_with_config(&config).await?;
    run_and_close(command, repository).await
}

/// Run one command, then close the store. A command failure is reported
/// ahead of a close failure.
async fn run_and_close(command: Command, repository: Repository) -> Result<()> {
    let result = run(command, &repository).await;
    let closed = repository.close().await;
    result?;
    closed
}

async fn run(command: Command, repository: &Repository) -> Result<()> {
    match command {
        Command::List => {
            for url in repository.get_all_video_urls().await? {
                println!("{}", url);
            }
        }
        Command::Videos => {
            for video in repository.get_all_videos().await? {
                println!("{}", serde_json::to_string(&video)?);
            }
        }
        Command::Subtitles(video_id) => {
            for subtitle in repository.get_subtitle_urls_for_video(video_id).await? {
                println!("{}", serde_json::to_string(&subtitle)?);
            }
        }
        Command::Import(path) => {
            let catalog = Catalog::from_path(&path)
                .with_context(|| format!("Failed to read catalog {:?}", path))?;
            let (videos, subtitles) = catalog.import_into(repository).await?;
            println!("Imported {} videos and {} subtitles from {:?}", videos, subtitles, path);
        }
        Command::Seed => {
            let sample = Catalog::sample();
            if repository.seed_if_empty(sample.videos, sample.subtitles).await? {
                println!("Seeded sample catalog");
            } else {
                println!("Store already has videos, nothing seeded");
            }
        }
        Command::Watched(url, seconds) => {
            let changed = repository.update_watched_length(&url, seconds).await?;
            if changed == 0 {
                tracing::warn!("No video stored with url {}", url);
            }
            println!("Updated {} video(s)", changed);
        }
        Command::Help => println!("{}", USAGE),
    }
    Ok(())
}
