use clap::Parser;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"SUPPORTED FILES:
    convert-hf-to-gguf-bitnet.py   register BitNetForCausalLM, map ffn_sub_norm tensors
    setup_env.py                   add the microsoft/BitNet-b1.58-2B-4T-gguf repository

EXAMPLES:
    # Patch the conversion script in a BitNet checkout
    bitpatch BitNet/utils/convert-hf-to-gguf-bitnet.py

    # Show what would change without touching the file
    bitpatch --dry-run BitNet/setup_env.py

Running the same file twice is safe: patches already present are skipped."#)]
pub struct Args {
    #[arg(value_name = "FILE", help = "Script to patch, recognised by its file name")]
    pub file: PathBuf,

    #[arg(long, help = "Report what would change without writing the file")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable debug logging (RUST_LOG takes precedence)")]
    pub verbose: bool,
}

impl Args {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Parses the command line, exiting with status 1 on usage errors and 0 for
/// `--help`/`--version`.
pub fn parse_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    })
}
