mod config;

use anyhow::{Context, Result};
use bitpatch_core::{apply_patches, Outcome, PatchReport};
use config::{parse_args, Args};
use log::debug;
use std::process;

fn main() {
    let args = parse_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    debug!("Arguments: {:?}", args);
    println!("--- Patching: {:?}", args.file);

    let report = apply_patches(&args.file, args.dry_run)
        .with_context(|| format!("Could not patch {:?}", args.file))?;

    print_report(&report, args.dry_run);
    Ok(())
}

fn print_report(report: &PatchReport, dry_run: bool) {
    for rule in &report.reports {
        match rule.outcome {
            Outcome::Applied if dry_run => println!("    [DRY RUN] {} would be applied.", rule.rule),
            Outcome::Applied => println!("    [APPLIED] {}.", rule.rule),
            Outcome::AlreadyApplied => println!("    [SKIPPED] {} already applied.", rule.rule),
            Outcome::MissingAnchor { anchor } => println!(
                "    [WARNING] {} not applied, could not find {:?}.",
                rule.rule, anchor
            ),
        }
    }

    println!(
        "\n--- Summary: {} ({}) ---",
        report.kind.file_name(),
        report.kind
    );
    if report.written {
        println!("File updated: {:?}", report.path);
    } else if report.changed {
        println!("[DRY RUN] File would be updated.");
    } else {
        println!("No changes needed or patch failed.");
    }
}
