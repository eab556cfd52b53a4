use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    spool completions bash > ~/.bash_completion.d/spool\n\n\
                  Generate zsh completions:\n    spool completions zsh > ~/.zfunc/_spool\n\n\
                  Generate fish completions:\n    spool completions fish > ~/.config/fish/completions/spool.fish\n\n\
                  Generate PowerShell completions:\n    spool completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
