//! `weave doctor` - quick health check of configuration and catalogs.

use anyhow::Result;
use colored::Colorize;

use crate::theme::Theme;

/// Load configuration and both catalogs, reporting what it finds. Never
/// fails outright on a missing catalog directory — that is a normal,
/// reportable state, not a doctor error.
pub fn run_doctor(workspace: Option<&std::path::Path>) -> Result<()> {
    println!("{}", "weave doctor".cyan().bold());
    println!();

    print!("  Checking configuration... ");
    let config = weave_config::load(workspace)?;
    println!("{}", "OK".green());
    println!("    l3.max_iterations: {}", config.l3.max_iterations);
    println!("    l1.max_steps: {}", config.l1.max_steps);

    print!("  Checking skill catalog... ");
    match weave_skills::load_dirs(&config.directories.skills) {
        Ok(registry) => println!("{} ({} entries)", "OK".green(), registry.catalog().len()),
        Err(err) => println!("{} - {err}", Theme::warning("WARN")),
    }

    print!("  Checking sub-agent catalog... ");
    match weave_subagents::load_dirs(&config.directories.subagents) {
        Ok(registry) => println!("{} ({} entries)", "OK".green(), registry.catalog().len()),
        Err(err) => println!("{} - {err}", Theme::warning("WARN")),
    }

    println!();
    println!("{}", Theme::success("all checks completed"));
    Ok(())
}
