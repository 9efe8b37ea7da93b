use anyhow::Result;
use colored::Colorize;
use phone_finder::config::Config;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective configuration (file, env overrides and defaults) as TOML
pub fn show(cfg: &Config) -> Result<()> {
    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = render(cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

fn render(cfg: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_config() {
        let rendered = render(&Config::default()).unwrap();
        assert!(rendered.contains("[inventory]"));
        assert!(rendered.contains("path = \"phones.xlsx\""));
        assert!(rendered.contains("log_format = \"text\""));
    }
}
