use std::path::PathBuf;

use clap::Parser;

use crate::archive::DEFAULT_ARCHIVE_NAME;

/// Arguments for the save command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Archive a resolved image list:\n    airlift save images.txt\n\n\
                  Keep going when an image cannot be saved:\n    airlift save images.txt --skip-failed\n\n\
                  Keep the per-image tarballs next to the archive:\n    airlift save images.txt --keep-parts")]
pub struct SaveArgs {
    /// Newline-separated image list to archive
    pub images: PathBuf,

    /// Combined archive destination
    #[arg(long, short = 'o', default_value = DEFAULT_ARCHIVE_NAME, value_name = "FILE")]
    pub output: PathBuf,

    /// Warn and continue when an image exhausts its save retries
    #[arg(long)]
    pub skip_failed: bool,

    /// Leave the per-image tarballs next to the archive
    #[arg(long)]
    pub keep_parts: bool,
}
