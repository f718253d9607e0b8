// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::process::exit;

use log::LevelFilter;
use structopt::StructOpt;

use refvar::cli::{self, Refvar};

pub fn main() {
    let opt = Refvar::from_args();

    let level = match cli::verbosity(&opt) {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .unwrap();

    exit(match cli::run(opt) {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
        _ => 0,
    })
}
