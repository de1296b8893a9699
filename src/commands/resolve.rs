//! Resolve command implementation
//!
//! Loads and validates the bundle manifest, fetches each application's
//! source repo, runs the two discovery paths (listing script or charm
//! metadata) and writes the merged, sorted image list.

use console::Style;

use crate::bundle::{Bundle, DiscoverySource};
use crate::cli::ResolveArgs;
use crate::discovery::{self, DiscoveryOptions};
use crate::error::Result;
use crate::images::ImageSet;

/// Run resolve command
pub fn run(args: ResolveArgs, verbose: bool) -> Result<()> {
    let to_stdout = args.output.as_os_str() == "-";
    let options = DiscoveryOptions {
        github_base: args.github_base.clone(),
        script: args.script.clone(),
        use_cache: !args.no_cache,
    };

    let bundle = Bundle::load(&args.bundle)?;
    let images = resolve_with_status(&bundle, &options, to_stdout, verbose)?;

    if to_stdout {
        for image in images.iter() {
            println!("{image}");
        }
        return Ok(());
    }

    images.write(&args.output)?;
    println!(
        "\nResolved {} image{} -> {}",
        Style::new().bold().apply_to(images.len()),
        plural(images.len()),
        args.output.display()
    );
    Ok(())
}

/// Resolve every application, printing per-application status lines.
///
/// With `-o -` the image list owns stdout, so status moves to stderr.
pub fn resolve_with_status(
    bundle: &Bundle,
    options: &DiscoveryOptions,
    status_to_stderr: bool,
    verbose: bool,
) -> Result<ImageSet> {
    let targets = bundle.discovery_targets()?;
    let excluded = bundle.applications.len() - targets.len();

    let status = |line: String| {
        if status_to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    status(format!(
        "Resolving {} application{}{}",
        targets.len(),
        plural(targets.len()),
        if excluded > 0 {
            format!(" ({excluded} excluded)")
        } else {
            String::new()
        }
    ));

    let name_style = Style::new().bold().yellow();
    let mut images = ImageSet::new();
    for (name, source) in &targets {
        status(format!(
            "  {} <- {}",
            name_style.apply_to(name),
            describe_source(source)
        ));

        let discovered = discovery::discover(source, options)?;
        status(format!(
            "    {} image{}",
            discovered.len(),
            plural(discovered.len())
        ));
        if verbose {
            for image in discovered.iter() {
                status(format!("      {image}"));
            }
        }
        images.merge(discovered);
    }

    Ok(images)
}

fn describe_source(source: &DiscoverySource) -> String {
    match source {
        DiscoverySource::Direct { repo, branch } => {
            format!("{repo}@{} (listing script)", branch.as_deref().unwrap_or("HEAD"))
        }
        DiscoverySource::Dependency { repo, branch } => {
            format!("{repo}@{} (charm metadata)", branch.as_deref().unwrap_or("HEAD"))
        }
        DiscoverySource::Excluded => "excluded".to_string(),
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
