use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::api::ApiResult;
use crate::constants::DESCRIPTION_PREVIEW_CHARS;
use crate::models::{Category, Comment, Session, Warning, WarningStatus};
use crate::session::AuthState;

/// Print a result envelope as pretty JSON
pub fn print_json<T: Serialize>(result: &ApiResult<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Counts shown at the top of the moderation overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModerationStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
}

impl ModerationStats {
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        Self {
            total: warnings.len(),
            approved: warnings
                .iter()
                .filter(|w| w.status == WarningStatus::Approved)
                .count(),
            pending: warnings
                .iter()
                .filter(|w| w.status == WarningStatus::Pending)
                .count(),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        text.to_string()
    }
}

fn status_label(status: WarningStatus) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        WarningStatus::Approved => label.green(),
        WarningStatus::Pending => label.yellow(),
        WarningStatus::Rejected => label.red(),
        WarningStatus::Unknown => label.dimmed(),
    }
}

fn category_label(warning: &Warning) -> &str {
    warning.category_name.as_deref().unwrap_or("Uncategorized")
}

pub fn print_warning_list(warnings: &[Warning]) {
    if warnings.is_empty() {
        println!("No warnings found");
        return;
    }

    for warning in warnings {
        println!(
            "{} {} {}",
            format!("#{}", warning.id).dimmed(),
            warning.title.bold(),
            format!("[{}]", category_label(warning)).cyan()
        );
        if !warning.description.is_empty() {
            println!("    {}", preview(&warning.description));
        }
    }
}

pub fn print_warning_detail(warning: &Warning, comments: &[Comment]) {
    println!("{}", format!("[{}]", category_label(warning)).cyan());
    println!("{}", warning.title.bold());
    if let Some(date) = &warning.date_posted {
        println!("Posted on {}", date);
    }
    if let Some(author) = &warning.author_username {
        println!("By {}", author);
    }

    println!();
    println!("{}", "Description".bold());
    println!("{}", warning.description);

    let signs = warning.sign_list();
    if !signs.is_empty() {
        println!();
        println!("{}", "Warning Signs".bold());
        for sign in signs {
            println!("  {} {}", "!".red().bold(), sign);
        }
    }

    println!();
    println!("{}", format!("Community Comments ({})", comments.len()).bold());
    print_comments(comments);
}

pub fn print_comments(comments: &[Comment]) {
    for comment in comments {
        let date = comment
            .created_on()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .or_else(|| comment.created_at.clone())
            .unwrap_or_default();
        println!(
            "  {} {} {}",
            comment.username.bold(),
            date.dimmed(),
            format!("(#{})", comment.id).dimmed()
        );
        println!("    {}", comment.text);
    }
}

pub fn print_categories(categories: &[Category]) {
    for category in categories {
        println!("  {:>3}  {}", category.id, category.name);
    }
}

pub fn print_session(state: &AuthState) {
    match &state.user {
        Some(user) => print_user(user),
        None => println!("Not logged in"),
    }
}

pub fn print_user(user: &Session) {
    let role = if user.is_admin { "admin".magenta() } else { "member".normal() };
    print!("{} (id {}, {})", user.username.bold(), user.id, role);
    if let Some(email) = &user.email {
        print!(" <{}>", email);
    }
    println!();
}

pub fn print_admin_overview(warnings: &[Warning]) {
    let stats = ModerationStats::from_warnings(warnings);
    println!(
        "Total: {}  Approved: {}  Pending: {}",
        stats.total.to_string().bold(),
        stats.approved.to_string().green(),
        stats.pending.to_string().yellow()
    );
    println!();

    if warnings.is_empty() {
        println!("No warnings found");
        return;
    }

    for warning in warnings {
        println!(
            "{} {} {}",
            format!("#{}", warning.id).dimmed(),
            warning.title.bold(),
            status_label(warning.status)
        );
        println!(
            "    By {} - {}",
            warning.author_username.as_deref().unwrap_or("unknown"),
            category_label(warning)
        );
        if !warning.description.is_empty() {
            println!("    {}", preview(&warning.description));
        }
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "OK".green().bold(), message);
}
