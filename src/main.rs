use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;

mod cli;
mod config;
mod download;
mod errors;
mod i18n;
mod links;
#[cfg(test)]
mod tests;
mod video_id;
mod web;
use config::Config;
use i18n::Language;
use links::Variant;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // log records from dependencies and our own `log::` calls go through tracing
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    init_logging();

    let config = Config::load()?;

    match args.command {
        cli::Command::Serve { addr } => web::start_daemon(config, addr),

        cli::Command::Languages {} => {
            for info in i18n::supported_languages() {
                println!("{}\t{} {}", info.code, info.flag, info.name);
            }
            Ok(())
        }

        cli::Command::Links { url, lang, json } => {
            let lang = Language::from_code_or_default(
                lang.as_deref().unwrap_or(&config.default_language),
            );
            let t = lang.labels();

            let link_set =
                match links::resolve(&config.platform(), &config.link_deriver(), &url) {
                    Ok(link_set) => link_set,
                    Err(err) => {
                        let msg = match err {
                            video_id::ExtractError::NotRecognizable => t.errors.invalid_url,
                            video_id::ExtractError::NoIdentifier => t.errors.extract_id,
                        };
                        anyhow::bail!("{msg}");
                    }
                };

            if json {
                println!("{}", serde_json::to_string_pretty(&link_set)?);
                return Ok(());
            }

            println!("{}: {}", t.video_id, link_set.video_id);
            for link in link_set.links() {
                println!(
                    "{:<8} {:>9}  {}",
                    link.variant.key(),
                    link.variant.size_label(),
                    link.url
                );
            }
            Ok(())
        }

        cli::Command::Download {
            url,
            variant,
            out_dir,
        } => {
            let link_set = links::resolve(&config.platform(), &config.link_deriver(), &url)?;

            let variants = if variant.is_empty() {
                Variant::BY_SIZE.to_vec()
            } else {
                variant
            };

            let dir = out_dir
                .or_else(|| config.download_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            let downloader = download::Downloader::new(
                &config.image_base,
                Duration::from_secs(config.request_timeout_secs),
            )
            .context("failed to build http client")?;

            for path in downloader.save_all(&link_set, &variants, &dir) {
                println!("{}", path.display());
            }

            Ok(())
        }
    }
}
