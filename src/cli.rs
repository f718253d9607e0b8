// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::{Path, PathBuf};

use anyhow::Context;
use structopt::StructOpt;

use crate::orchestrator;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "refvar",
    about = "A reference-anchored variant caller and evaluator for aligned sequencing reads.",
    setting = structopt::clap::AppSettings::ColoredHelp,
)]
pub enum Refvar {
    #[structopt(
        name = "call",
        about = "Call variants from an alignment against a reference and compare them to a ground-truth set.",
        setting = structopt::clap::AppSettings::ColoredHelp,
    )]
    Call {
        #[structopt(parse(from_os_str), help = "Indexed BAM/CRAM alignment file.")]
        alignment: PathBuf,
        #[structopt(parse(from_os_str), help = "Reference FASTA.")]
        reference: PathBuf,
        #[structopt(parse(from_os_str), help = "Ground-truth variant file (VCF/BCF).")]
        ground_truth: PathBuf,
        #[structopt(
            long = "output",
            short = "o",
            parse(from_os_str),
            help = "Report output path. Defaults to stdout."
        )]
        output: Option<PathBuf>,
        #[structopt(
            long = "min-reads",
            default_value = "5",
            help = "Minimum number of overlapping reads required to emit a call at a position."
        )]
        min_reads: usize,
        #[structopt(
            long = "lines-per-window",
            default_value = "100",
            help = "Number of reference FASTA lines to scan per window."
        )]
        lines_per_window: usize,
        #[structopt(long, short = "v", parse(from_occurrences), help = "Increase logging verbosity.")]
        verbose: u8,
    },
}

/// Resolves a positional path argument against the parent of the current
/// working directory, matching `original_source`'s `formFullPath` exactly —
/// including for already-absolute arguments. This is a deliberate,
/// documented quirk, not a bug — see DESIGN.md.
pub fn resolve_path(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let parent = cwd.parent().unwrap_or(&cwd);
    parent.join(path)
}

pub fn run(opt: Refvar) -> anyhow::Result<()> {
    match opt {
        Refvar::Call { alignment, reference, ground_truth, output, min_reads, lines_per_window, .. } => {
            let alignment = resolve_path(&alignment);
            let reference = resolve_path(&reference);
            let ground_truth = resolve_path(&ground_truth);

            let params = orchestrator::Params { min_reads, lines_per_window };
            let result = orchestrator::run(&alignment, &reference, &ground_truth, &params)?;

            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("failed to create report file {}", path.display()))?;
                    crate::report::write(file, &result, &path)?;
                }
                None => {
                    crate::report::write(std::io::stdout(), &result, Path::new("<stdout>"))?;
                }
            }
            Ok(())
        }
    }
}

pub fn verbosity(opt: &Refvar) -> u8 {
    match opt {
        Refvar::Call { verbose, .. } => *verbose,
    }
}
