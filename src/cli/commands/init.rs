//! `propdesk init` command - Initialize a new workspace

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::workspace::{Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite the workspace config even if .propdesk/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let workspace = if args.force {
        Workspace::init_force(&path)
    } else {
        Workspace::init(&path)
    };

    match workspace {
        Ok(workspace) => {
            println!(
                "{} Initialized propdesk workspace at {}",
                style("✓").green(),
                style(workspace.root().display()).cyan()
            );
            println!();
            print_structure(workspace.root());
            println!();
            println!("Next steps:");
            println!(
                "  {} Get a CSV template for leads",
                style("propdesk import --template contact > leads.csv").yellow()
            );
            println!(
                "  {} Import it",
                style("propdesk import contact leads.csv").yellow()
            );
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} propdesk workspace already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("propdesk init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn print_structure(root: &Path) {
    println!("  {}/", style(root.display()).dim());
    println!("  ├── .propdesk/config.yaml");
    println!("  └── data/");
}
