use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    airlift completions bash > ~/.bash_completion.d/airlift\n\n\
                  Generate zsh completions:\n    airlift completions zsh > ~/.zfunc/_airlift\n\n\
                  Generate fish completions:\n    airlift completions fish > ~/.config/fish/completions/airlift.fish\n\n\
                  Generate PowerShell completions:\n    airlift completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
