//! Shell completion generation
//!
//! Print completion scripts for iamctl.

use clap::CommandFactory;
use clap_complete::Shell;

use super::Cli;
use crate::exit_code::ExitCode;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate shell completions and print to stdout
pub fn execute(args: CompletionsArgs) -> ExitCode {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout().lock());
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shell: Shell) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(shell, &mut cmd, "iamctl", &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_completions_bash() {
        let output = render(Shell::Bash);
        assert!(output.contains("iamctl"));
        assert!(output.contains("complete"));
        assert!(output.contains("service-user"));
    }

    #[test]
    fn test_completions_zsh() {
        let output = render(Shell::Zsh);
        assert!(output.contains("iamctl"));
        assert!(output.contains("compdef"));
    }

    #[test]
    fn test_completions_fish() {
        let output = render(Shell::Fish);
        assert!(output.contains("iamctl"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn test_completions_powershell() {
        let output = render(Shell::PowerShell);
        assert!(output.contains("iamctl"));
        assert!(output.contains("Register-ArgumentCompleter"));
    }
}
