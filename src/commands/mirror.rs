//! Mirror command implementation
//!
//! The end-to-end pipeline: resolve the bundle, pull and retag every image
//! for the target registry (optionally pushing), and optionally archive the
//! set for offline transfer. Each stage is the same function the individual
//! commands use; this command only sequences them and reports.

use std::path::PathBuf;

use console::Style;

use crate::archive::ArchiveOptions;
use crate::bundle::Bundle;
use crate::cli::MirrorArgs;
use crate::commands::resolve::{plural, resolve_with_status};
use crate::commands::retag::retag_with_progress;
use crate::commands::save::{archive_with_progress, report};
use crate::discovery::DiscoveryOptions;
use crate::error::Result;
use crate::mover::MoveOptions;
use crate::runtime::CliRuntime;

/// Default image list artifact written by a mirror run
pub const IMAGES_FILE: &str = "images.txt";

/// Default retagged list artifact written by a mirror run
pub const RETAGGED_FILE: &str = "retagged-images.txt";

/// Run mirror command
pub fn run(runtime_bin: &str, args: MirrorArgs, verbose: bool) -> Result<()> {
    let runtime = CliRuntime::new(runtime_bin);
    let bold = Style::new().bold();

    // Stage 1: resolve
    let bundle = Bundle::load(&args.bundle)?;
    let discovery_options = DiscoveryOptions {
        github_base: args.github_base.clone(),
        script: args.script.clone(),
        use_cache: !args.no_cache,
    };
    let images = resolve_with_status(&bundle, &discovery_options, false, verbose)?;
    images.write(&PathBuf::from(IMAGES_FILE))?;
    println!(
        "Resolved {} image{} -> {IMAGES_FILE}\n",
        bold.apply_to(images.len()),
        plural(images.len())
    );

    if images.is_empty() {
        println!("Nothing to mirror.");
        return Ok(());
    }

    // Stage 2: pull + retag (+ push)
    let move_options = MoveOptions {
        new_registry: args.new_registry.clone(),
        push: args.push,
    };
    println!(
        "Retagging to '{}'{}",
        args.new_registry,
        if args.push { " (with push)" } else { "" }
    );
    let moved = retag_with_progress(&runtime, &images, &move_options)?;
    moved.retagged.write(&PathBuf::from(RETAGGED_FILE))?;
    println!(
        "Pulled {}, retagged {}{} -> {RETAGGED_FILE}\n",
        moved.pulled,
        moved.retagged.len(),
        if args.push {
            format!(", pushed {}", moved.pushed)
        } else {
            String::new()
        }
    );

    // Stage 3: archive (optional)
    if let Some(archive_path) = &args.save {
        let archive_options = ArchiveOptions {
            output: archive_path.clone(),
            skip_failed: args.skip_failed,
            ..ArchiveOptions::default()
        };
        println!("Archiving to {}", archive_path.display());
        let summary = archive_with_progress(&runtime, &images, &archive_options)?;
        report(&summary);
    }

    println!("\n{}", bold.apply_to("Mirror complete."));
    Ok(())
}
