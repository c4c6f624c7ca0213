mod actions;
mod actor;
mod cast;
mod config;
mod error;
mod game;
mod point;
mod services;
mod term;
mod trail;

use std::fs::File;

use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use crate::config::Args;
use crate::error::GameError;

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    let settings = args.settings()?;

    // The terminal is in raw mode while playing, so logs go to a file
    WriteLogger::init(args.log_level.into(), Config::default(), File::create(&args.log_file)?)?;
    info!("starting with {:?}", settings);

    let mut director = game::Director::new(settings)?;
    director.run()
}
