//! Save command implementation

use console::Style;

use crate::archive::{self, ArchiveOptions, ArchiveSummary};
use crate::cli::SaveArgs;
use crate::commands::resolve::plural;
use crate::error::Result;
use crate::images::ImageSet;
use crate::progress::ProgressDisplay;
use crate::runtime::{CliRuntime, ContainerRuntime};

/// Run save command
pub fn run(runtime_bin: &str, args: SaveArgs) -> Result<()> {
    let images = ImageSet::load(&args.images)?;
    if images.is_empty() {
        println!("No images to save in {}", args.images.display());
        return Ok(());
    }

    let runtime = CliRuntime::new(runtime_bin);
    let options = ArchiveOptions {
        output: args.output.clone(),
        skip_failed: args.skip_failed,
        keep_parts: args.keep_parts,
        ..ArchiveOptions::default()
    };

    println!(
        "Saving {} image{} to {}",
        Style::new().bold().apply_to(images.len()),
        plural(images.len()),
        args.output.display()
    );

    let summary = archive_with_progress(&runtime, &images, &options)?;
    report(&summary);
    Ok(())
}

/// Archive a set behind a progress bar, finishing or abandoning it to match
/// the outcome
pub fn archive_with_progress(
    runtime: &dyn ContainerRuntime,
    images: &ImageSet,
    options: &ArchiveOptions,
) -> Result<ArchiveSummary> {
    let progress = ProgressDisplay::new(images.len() as u64);
    let result = archive::archive_images(runtime, images, options, Some(&progress));
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }
    result
}

/// Print an archive run's outcome, warnings first
pub fn report(summary: &ArchiveSummary) {
    let warn = Style::new().bold().yellow();
    for skipped in &summary.skipped {
        eprintln!(
            "{} {} left out of the archive: {}",
            warn.apply_to("warning:"),
            skipped.reference,
            skipped.reason
        );
    }
    println!(
        "Archived {} image{}{} -> {}",
        summary.saved.len(),
        plural(summary.saved.len()),
        if summary.skipped.is_empty() {
            String::new()
        } else {
            format!(" ({} skipped)", summary.skipped.len())
        },
        summary.archive.display()
    );
}
