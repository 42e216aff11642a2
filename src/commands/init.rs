use std::io::{self, Write};

use crate::board::DEFAULT_PROJECT_ID;
use crate::config::Config;
use crate::error::Result;

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn render(token: &str, project_id: &str, log_dir: &str) -> String {
    let mut content = String::new();
    if !token.is_empty() {
        content.push_str(&format!("token = \"{token}\"\n"));
    }
    if !project_id.is_empty() {
        content.push_str(&format!("project_id = \"{project_id}\"\n"));
    }
    if !log_dir.is_empty() {
        content.push_str(&format!("log_dir = \"{log_dir}\"\n"));
    }
    content
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("signalhound Configuration");
    println!("=========================\n");

    let token = prompt(
        "GitHub token with project scope [optional, SIGNALHOUND_GITHUB_TOKEN/GITHUB_TOKEN also work]: ",
    )?;
    let project_id = prompt(&format!("Project ID [{DEFAULT_PROJECT_ID}]: "))?;
    let log_dir = prompt("Log directory [optional, logs go to stderr otherwise]: ")?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config_path, render(&token, &project_id, &log_dir))?;

    println!("\nConfig saved to {}", config_path.display());

    Ok(())
}
