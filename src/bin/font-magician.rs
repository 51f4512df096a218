// font-magician/src/bin/font-magician.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adds `@font-face` rules to a stylesheet.

use clap::Parser;
use font_magician::{FontMagician, Options, Stylesheet};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The stylesheet to process. Reads standard input when omitted.
    input: Option<PathBuf>,

    /// A JSON options file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the result. Writes to standard output when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let options = match args.config {
        Some(ref path) => Options::from_path(path)?,
        None => Options::new(),
    };
    let magician = FontMagician::from_options(options)?;

    let source = match args.input {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };
    let mut sheet = Stylesheet::parse(&source)?;
    let report = magician.process(&mut sheet)?;
    for family in &report.unresolved {
        log::warn!("no font found for `{}`", family);
    }

    match args.output {
        Some(ref path) => fs::write(path, sheet.to_string())?,
        None => println!("{}", sheet),
    }
    Ok(())
}
