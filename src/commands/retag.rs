//! Retag command implementation

use console::Style;

use crate::cli::RetagArgs;
use crate::commands::resolve::plural;
use crate::error::Result;
use crate::images::ImageSet;
use crate::mover::{self, MoveOptions, MoveSummary};
use crate::progress::ProgressDisplay;
use crate::runtime::{CliRuntime, ContainerRuntime};

/// Run retag command
pub fn run(runtime_bin: &str, args: RetagArgs) -> Result<()> {
    let images = ImageSet::load(&args.images)?;
    if images.is_empty() {
        println!("No images to retag in {}", args.images.display());
        return Ok(());
    }

    let runtime = CliRuntime::new(runtime_bin);
    let options = MoveOptions {
        new_registry: args.new_registry.clone(),
        push: args.push,
    };

    println!(
        "Retagging {} image{} to '{}'{}",
        Style::new().bold().apply_to(images.len()),
        plural(images.len()),
        args.new_registry,
        if args.push { " (with push)" } else { "" }
    );

    let summary = retag_with_progress(&runtime, &images, &options)?;

    summary.retagged.write(&args.output)?;
    println!(
        "Pulled {}, retagged {}{} -> {}",
        summary.pulled,
        summary.retagged.len(),
        if args.push {
            format!(", pushed {}", summary.pushed)
        } else {
            String::new()
        },
        args.output.display()
    );
    Ok(())
}

/// Retag a set behind a progress bar, finishing or abandoning it to match
/// the outcome
pub fn retag_with_progress(
    runtime: &dyn ContainerRuntime,
    images: &ImageSet,
    options: &MoveOptions,
) -> Result<MoveSummary> {
    let progress = ProgressDisplay::new(images.len() as u64);
    let result = mover::retag_images(runtime, images, options, Some(&progress));
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }
    result
}
