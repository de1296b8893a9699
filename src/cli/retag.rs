use std::path::PathBuf;

use clap::Parser;

/// Arguments for the retag command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Retag a resolved image list for a mirror registry:\n    \
                  airlift retag images.txt --new-registry 172.16.0.1:5000\n\n\
                  Retag and push to the mirror:\n    \
                  airlift retag images.txt --new-registry 172.16.0.1:5000 --push\n\n\
                  Retag under a path inside the registry:\n    \
                  airlift retag images.txt --new-registry 172.16.0.1:5000/kubeflow")]
pub struct RetagArgs {
    /// Newline-separated image list to retag
    pub images: PathBuf,

    /// Target registry prefix for the retagged names
    #[arg(long, value_name = "PREFIX")]
    pub new_registry: String,

    /// Output file for the retagged image list
    #[arg(
        long,
        short = 'o',
        default_value = "retagged-images.txt",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Push each retagged image to the target registry
    #[arg(long)]
    pub push: bool,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_retag_with_push_and_output() {
        let cli = Cli::try_parse_from([
            "airlift",
            "retag",
            "images.txt",
            "--new-registry",
            "mirror.internal/kubeflow",
            "-o",
            "mirrored.txt",
            "--push",
        ])
        .unwrap();
        match cli.command {
            Commands::Retag(args) => {
                assert_eq!(args.images, std::path::PathBuf::from("images.txt"));
                assert_eq!(args.new_registry, "mirror.internal/kubeflow");
                assert_eq!(args.output, std::path::PathBuf::from("mirrored.txt"));
                assert!(args.push);
            }
            _ => panic!("Expected Retag command"),
        }
    }
}
