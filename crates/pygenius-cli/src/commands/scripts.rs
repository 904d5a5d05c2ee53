//! Saved script management

use crate::args::{CodeInput, ScriptsAction};
use crate::commands::{open_prefs, read_code};
use crate::console::CliConsole;
use anyhow::bail;
use colored::*;
use pygenius_core::{PyGeniusConfig, UserProgress};

pub fn run(config: &PyGeniusConfig, console: &CliConsole, action: ScriptsAction) -> anyhow::Result<()> {
    let progress = UserProgress::open(open_prefs(config)?)?;

    match action {
        ScriptsAction::Save { name, input } => save(&progress, console, &name, &input),
        ScriptsAction::List => {
            list(&progress, console);
            Ok(())
        }
        ScriptsAction::Show { name } => match progress.script(&name) {
            Some(entry) => {
                print!("{}", entry.content);
                if !entry.content.ends_with('\n') {
                    println!();
                }
                Ok(())
            }
            None => bail!("No saved script named '{}'", name),
        },
        ScriptsAction::Delete { name } => {
            if progress.delete_script(&name)? {
                console.success(&format!("Deleted {}", name));
                Ok(())
            } else {
                bail!("No saved script named '{}'", name)
            }
        }
    }
}

fn save(
    progress: &UserProgress,
    console: &CliConsole,
    name: &str,
    input: &CodeInput,
) -> anyhow::Result<()> {
    let code = read_code(input)?;
    progress.save_script(name, &code)?;
    console.success(&format!("Saved {} ({} lines)", name, code.lines().count()));
    Ok(())
}

fn list(progress: &UserProgress, console: &CliConsole) {
    let scripts = progress.scripts();
    if scripts.is_empty() {
        console.warn("No saved scripts");
        return;
    }

    console.print_header("Saved Scripts");
    for (name, entry) in &scripts {
        println!("  {:<30} {}", name.bold(), entry.formatted_date().dimmed());
    }
}
