use crate::links::Variant;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start thumbgrab as a web service.
    Serve {
        /// Address to listen on. Overrides `listen_addr` from config.yaml
        #[clap(long)]
        addr: Option<String>,
    },
    /// Print every thumbnail url of a video
    Links {
        /// A video url
        #[clap(allow_hyphen_values = true)]
        url: String,

        /// Label language (en, es, fr, de, pt, ja)
        #[clap(short, long)]
        lang: Option<String>,

        /// Print json instead of a table
        #[clap(long, default_value = "false")]
        json: bool,
    },
    /// Save thumbnails to disk
    Download {
        /// A video url
        #[clap(allow_hyphen_values = true)]
        url: String,

        /// Sizes to save. Defaults to maxres, hq, mq and sd
        #[clap(short, long, value_enum)]
        variant: Vec<Variant>,

        /// Output directory. Overrides `download_dir` from config.yaml
        #[clap(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// List supported languages
    Languages {},
}
