use tabled::Tabled;

use crate::board::ProjectManager;
use crate::cli::{IssuesArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, state_colored, truncate};
use crate::types::Issue;

const SUMMARY_BODY_LIMIT: usize = 200;

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            number: format!("#{}", issue.number),
            title: truncate(&issue.title, 60),
            state: state_colored(&issue.state),
            url: issue.url.clone(),
        }
    }
}

/// Numbered plain-text listing, as handed to assistants and chat tools.
pub fn summary(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "No issues found on the project board".to_string();
    }

    let mut text = format!("Found {} issue(s) on the project board:\n\n", issues.len());
    for (i, issue) in issues.iter().enumerate() {
        text.push_str(&format!("{}. #{}: {}\n", i + 1, issue.number, issue.title));
        text.push_str(&format!("   State: {}\n", issue.state));
        text.push_str(&format!("   URL: {}\n", issue.url));
        if !issue.body.is_empty() {
            text.push_str(&format!(
                "   Body: {}\n",
                truncate(&issue.body, SUMMARY_BODY_LIMIT)
            ));
        }
        text.push('\n');
    }
    text
}

pub async fn list(board: &dyn ProjectManager, config: &Config, args: IssuesArgs) -> Result<()> {
    let page_size = args.per_page.unwrap_or_else(|| config.page_size());
    let issues = board.retrieve_filtered_issues(page_size).await?;

    match output::format() {
        OutputFormat::Compact => print!("{}", summary(&issues)),
        _ if issues.is_empty() && !output::is_json_output() => {
            output::print_message("No failing or flaky issues on the current release");
        }
        _ => output::print_table(
            &issues,
            |i| IssueRow::from(i),
            |i| format!("#{} {}", i.number, i.title),
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: u64, body: &str) -> Issue {
        Issue {
            number,
            title: format!("[Flaking Test] Test{number}"),
            body: body.to_string(),
            state: "OPEN".to_string(),
            url: format!("https://github.com/kubernetes/kubernetes/issues/{number}"),
        }
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(summary(&[]), "No issues found on the project board");
    }

    #[test]
    fn test_summary_lists_issues() {
        let text = summary(&[issue(1, ""), issue(2, "details")]);
        assert!(text.starts_with("Found 2 issue(s) on the project board:\n\n"));
        assert!(text.contains("1. #1: [Flaking Test] Test1\n   State: OPEN\n"));
        assert!(text.contains("2. #2: [Flaking Test] Test2\n"));
        assert!(text.contains("   Body: details\n"));
        assert_eq!(text.matches("Body:").count(), 1);
    }

    #[test]
    fn test_summary_truncates_body() {
        let text = summary(&[issue(3, &"x".repeat(500))]);
        let body_line = text.lines().find(|l| l.contains("Body:")).unwrap();
        assert!(body_line.ends_with("..."));
        assert_eq!(body_line.trim_start_matches("   Body: ").chars().count(), SUMMARY_BODY_LIMIT);
    }
}
