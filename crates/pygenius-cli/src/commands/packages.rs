//! Installed package list

use crate::args::PackagesAction;
use crate::commands::open_prefs;
use crate::console::CliConsole;
use colored::*;
use pygenius_core::{PackageRegistry, PyGeniusConfig, PyPackage};

pub fn run(config: &PyGeniusConfig, console: &CliConsole, action: PackagesAction) -> anyhow::Result<()> {
    let registry = PackageRegistry::new(open_prefs(config)?);

    match action {
        PackagesAction::List => print_packages(console, &registry.installed(), "No packages installed"),
        PackagesAction::Search { query } => {
            print_packages(console, &registry.search(&query), "No packages match your search")
        }
        PackagesAction::Install { name } => {
            console.info(&format!("Installing {}...", name));
            if registry.install(&name)? {
                console.success(&format!("Installed {}", name.trim()));
            } else {
                console.warn(&format!("{} is already installed", name.trim()));
            }
        }
        PackagesAction::Uninstall { name } => {
            if registry.uninstall(&name)? {
                console.success(&format!("Uninstalled {}", name.trim()));
            } else {
                console.warn(&format!("{} is not installed", name.trim()));
            }
        }
    }
    Ok(())
}

fn print_packages(console: &CliConsole, packages: &[PyPackage], empty: &str) {
    if packages.is_empty() {
        console.warn(empty);
        return;
    }
    console.print_header(&format!("{} packages installed", packages.len()));
    for package in packages {
        println!("  {:<24} {}", package.name.bold(), package.version.dimmed());
    }
}
