// Configuration operations

use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::utils;
use crate::utils::error::AppResult;

pub fn handle_config_command(
    mut config: Config,
    config_path: Option<&Path>,
    command: Option<ConfigCommands>,
) -> AppResult<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_file_path);

    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config, &path),
        Some(ConfigCommands::Path) => {
            println!("{}", path.display());
            Ok(())
        }
        Some(ConfigCommands::Reset) => handle_reset_command(&mut config, &path),
        None => handle_config_help(&path),
    }
}

fn handle_show_command(config: &Config, path: &Path) -> AppResult<()> {
    println!("⚙️  Scorecard Configuration");
    println!("==========================");
    println!("File: {}", path.display());
    println!("General:");
    println!("  Database file: {}", config.general.database_file.display());
    println!("  Color: {}", config.general.color);
    println!("  Default weight: {}", config.general.default_weight);
    println!("  Report format: {:?}", config.general.report_format);
    Ok(())
}

fn handle_config_help(path: &Path) -> AppResult<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  scorecard config show    - Show current configuration");
    println!("  scorecard config path    - Print the configuration file location");
    println!("  scorecard config reset   - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", path.display());
    Ok(())
}

fn handle_reset_command(config: &mut Config, path: &Path) -> AppResult<()> {
    if utils::prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        *config = Config::default();
        config.save_to(path)?;
        println!("✓ Configuration reset to defaults!");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}
