use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::{
    api::ApiResult,
    app::{init_config, AppContext},
    constants::{HOME_WARNING_LIMIT, STATUS_CHECK_TIMEOUT_MS},
    models::{Category, Comment, Credentials, NewWarning, Registration, Warning, WarningUpdate},
    session::AuthState,
    utils::ScamwatchError,
};

use super::args::{AdminCommand, Commands, CommentsCommand, OutputFormat, WarningForm, WarningsCommand};
use super::output::{
    print_admin_overview, print_categories, print_comments, print_json, print_session,
    print_success, print_user, print_warning_detail, print_warning_list, ModerationStats,
};

/// Render a successful result, or turn a failure into an error for the caller
///
/// Failures are printed once by the caller of [`handle_command`] (see
/// [`failure_envelope`]), so each command emits at most one JSON document.
fn finish<T: Serialize>(
    format: OutputFormat,
    result: ApiResult<T>,
    render: impl FnOnce(&T),
) -> Result<()> {
    match result {
        ApiResult::Success { data } => {
            match format {
                OutputFormat::Json => print_json(&ApiResult::success(data))?,
                OutputFormat::Text => render(&data),
            }
            Ok(())
        }
        ApiResult::Failure { error } => Err(ScamwatchError::ApiError(error).into()),
    }
}

/// JSON envelope for a command that ended in an error
pub fn failure_envelope(error: &anyhow::Error) -> ApiResult<()> {
    ApiResult::failure(format!("{:#}", error))
}

/// Handle a CLI command against an initialized context
pub async fn handle_command(ctx: &AppContext, command: &Commands, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Init => handle_init(None, format),
        Commands::Status => show_status(ctx, format).await,
        Commands::Register {
            username,
            email,
            password,
            login,
        } => register(ctx, format, Registration::new(username, email, password), *login).await,
        Commands::Login { email, password } => {
            login(ctx, format, Credentials::new(email, password)).await
        }
        Commands::Logout => logout(ctx, format).await,
        Commands::Home => {
            let latest = WarningsCommand::List {
                limit: Some(HOME_WARNING_LIMIT),
            };
            handle_warnings(ctx, &latest, format).await
        }
        Commands::Whoami => {
            let state = ctx.session.state();
            finish(format, ApiResult::success(state), print_session)
        }
        Commands::Warnings(command) => handle_warnings(ctx, command, format).await,
        Commands::Categories => {
            let result = ctx.gateway.categories().get_all().await;
            finish(format, result, |categories| print_categories(categories))
        }
        Commands::Comments(command) => handle_comments(ctx, command, format).await,
        Commands::Admin(command) => handle_admin(ctx, command, format).await,
    }
}

#[derive(Serialize)]
struct InitReport {
    path: PathBuf,
    created: bool,
}

/// Write a default config file (to `path` when given)
pub fn handle_init(path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let (path, created) = init_config(path)?;
    finish(format, ApiResult::success(InitReport { path, created }), |report| {
        if report.created {
            println!("Created default configuration at: {}", report.path.display());
        } else {
            println!("Configuration already exists at: {}", report.path.display());
        }
    })
}

#[derive(Serialize)]
struct StatusReport {
    base_url: String,
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    session: AuthState,
}

async fn show_status(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let reachability = tokio::time::timeout(
        Duration::from_millis(STATUS_CHECK_TIMEOUT_MS),
        ctx.gateway.categories().get_all(),
    )
    .await;

    let error = match reachability {
        Ok(ApiResult::Success { .. }) => None,
        Ok(ApiResult::Failure { error }) => Some(error),
        Err(_) => Some("Timed out".to_string()),
    };

    let report = StatusReport {
        base_url: ctx.gateway.base_url().to_string(),
        reachable: error.is_none(),
        error,
        session: ctx.session.state(),
    };

    finish(format, ApiResult::success(report), |report| {
        println!("Scamwatch Status:");
        println!();
        match &report.error {
            None => println!("  [OK] Service: {}", report.base_url),
            Some(e) => println!("  [ERROR] Service: {} ({})", report.base_url, e),
        }
        print!("  Session: ");
        print_session(&report.session);
    })
}

async fn register(
    ctx: &AppContext,
    format: OutputFormat,
    form: Registration,
    then_login: bool,
) -> Result<()> {
    form.validate().map_err(ScamwatchError::from)?;

    let result = ctx
        .gateway
        .auth()
        .register(&form.username, &form.email, &form.password)
        .await;

    if !then_login {
        return finish(format, result, |_| {
            print_success("Your account has been created successfully.");
            println!("Please login.");
        });
    }

    // With --login the login result is the command's only JSON output
    result.into_result().map_err(ScamwatchError::ApiError)?;
    if format == OutputFormat::Text {
        print_success("Your account has been created successfully.");
    }
    login(ctx, format, Credentials::new(&form.email, &form.password)).await
}

async fn login(ctx: &AppContext, format: OutputFormat, credentials: Credentials) -> Result<()> {
    credentials.validate().map_err(ScamwatchError::from)?;

    let result = ctx
        .gateway
        .auth()
        .login(&credentials.email, &credentials.password)
        .await;
    if let Some(session) = result.data() {
        ctx.session
            .login(session.clone())
            .await
            .context("Logged in, but the session could not be saved")?;
    }
    finish(format, result, |user| {
        print_success("You have logged in successfully");
        print_user(user);
    })
}

async fn logout(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let was_logged_in = ctx.session.is_logged_in();
    if was_logged_in {
        ctx.session.logout().await?;
    }
    finish(format, ApiResult::success(ctx.session.state()), |_| {
        if was_logged_in {
            print_success("You have been logged out");
        } else {
            println!("Not logged in");
        }
    })
}

/// Service categories, or the built-in list when they cannot be fetched
async fn categories_or_fallback(ctx: &AppContext) -> Vec<Category> {
    match ctx.gateway.categories().get_all().await {
        ApiResult::Success { data } => data,
        ApiResult::Failure { error } => {
            warn!(%error, "Failed to load categories, using built-in list");
            eprintln!("{} Failed to load categories: {}", "warning:".yellow(), error);
            Category::fallback_list()
        }
    }
}

fn pick_category(categories: &[Category], needle: &str) -> Result<i64> {
    Category::resolve(categories, needle)
        .map(|c| c.id)
        .with_context(|| format!("Unknown category: {}", needle))
}

/// Category id from an id or a name; names need the category list
async fn resolve_category(ctx: &AppContext, needle: &str) -> Result<i64> {
    if let Ok(id) = needle.trim().parse::<i64>() {
        return Ok(id);
    }
    pick_category(&categories_or_fallback(ctx).await, needle)
}

#[derive(Serialize)]
struct WarningDetail {
    warning: Warning,
    comments: Vec<Comment>,
}

async fn handle_warnings(ctx: &AppContext, command: &WarningsCommand, format: OutputFormat) -> Result<()> {
    let warnings = ctx.gateway.warnings();
    match command {
        WarningsCommand::List { limit } => {
            let mut result = warnings.get_all().await;
            if let (ApiResult::Success { data }, Some(limit)) = (&mut result, limit) {
                data.truncate(*limit);
            }
            finish(format, result, |list| print_warning_list(list))
        }
        WarningsCommand::Show { id } => {
            let warning = match warnings.get_by_id(*id).await {
                ApiResult::Success { data } => data,
                failure => return finish(format, failure, |_| {}),
            };

            // Comments are secondary; show the warning even if they fail
            let comments = match ctx.gateway.comments().get_by_warning_id(*id).await {
                ApiResult::Success { data } => data,
                ApiResult::Failure { error } => {
                    warn!(warning_id = id, %error, "Failed to fetch comments");
                    Vec::new()
                }
            };

            let detail = WarningDetail { warning, comments };
            finish(format, ApiResult::success(detail), |d| {
                print_warning_detail(&d.warning, &d.comments)
            })
        }
        WarningsCommand::Search { term, category } => {
            let category_id = match category {
                Some(needle) => Some(resolve_category(ctx, needle).await?),
                None => None,
            };
            let result = warnings.search(term, category_id).await;
            finish(format, result, |list| print_warning_list(list))
        }
        WarningsCommand::Create(form) => create_warning(ctx, form, format).await,
    }
}

async fn create_warning(ctx: &AppContext, form: &WarningForm, format: OutputFormat) -> Result<()> {
    let user = ctx.session.require_login()?;

    // An unknown or missing category is reported by the form check, after the text checks
    let category_id = match &form.category {
        Some(needle) => {
            let categories = categories_or_fallback(ctx).await;
            let found = Category::resolve(&categories, needle).map(|c| c.id);
            if found.is_none() {
                warn!(category = %needle, "Unknown category");
            }
            found
        }
        None => None,
    };

    let new_warning = NewWarning::new(&form.title, &form.description, &form.signs, category_id);
    new_warning.validate().map_err(ScamwatchError::from)?;

    let result = ctx.gateway.warnings().create(&new_warning, user.id).await;
    finish(format, result, |_| {
        print_success("Your warning has been submitted successfully")
    })
}

async fn handle_comments(ctx: &AppContext, command: &CommentsCommand, format: OutputFormat) -> Result<()> {
    match command {
        CommentsCommand::List { warning_id } => {
            let result = ctx.gateway.comments().get_by_warning_id(*warning_id).await;
            finish(format, result, |comments| {
                if comments.is_empty() {
                    println!("No comments yet");
                }
                print_comments(comments)
            })
        }
        CommentsCommand::Add { warning_id, text } => {
            let user = ctx
                .session
                .require_login()
                .context("Please login to add a comment")?;
            let result = ctx.gateway.comments().add(*warning_id, text, user.id).await;
            finish(format, result, |_| {
                print_success("Your comment has been submitted successfully")
            })
        }
    }
}

#[derive(Serialize)]
struct AdminOverview {
    stats: ModerationStats,
    warnings: Vec<Warning>,
}

async fn handle_admin(ctx: &AppContext, command: &AdminCommand, format: OutputFormat) -> Result<()> {
    let user = ctx.session.require_admin()?;
    let admin = ctx.gateway.admin();

    match command {
        AdminCommand::Verify => {
            let result = admin.verify_admin(user.id).await;
            finish(format, result, |data| println!("{}", data))
        }
        AdminCommand::List => {
            let result = admin.get_all_warnings(user.id).await.map(|warnings| AdminOverview {
                stats: ModerationStats::from_warnings(&warnings),
                warnings,
            });
            finish(format, result, |overview| print_admin_overview(&overview.warnings))
        }
        AdminCommand::Update {
            id,
            title,
            description,
            signs,
            category,
            status,
        } => {
            let categories_api = ctx.gateway.categories();
            let (listed, categories) = tokio::join!(
                admin.get_all_warnings(user.id),
                categories_api.get_all()
            );
            let listed = listed.into_result().map_err(ScamwatchError::ApiError)?;
            let categories = categories
                .into_result()
                .unwrap_or_else(|_| Category::fallback_list());

            let current = listed
                .iter()
                .find(|w| w.id == *id)
                .with_context(|| format!("Warning #{} not found", id))?;

            let mut update = WarningUpdate::from_warning(current, &categories);
            if let Some(title) = title {
                update.title = title.trim().to_string();
            }
            if let Some(description) = description {
                update.description = description.trim().to_string();
            }
            if let Some(signs) = signs {
                update.warning_signs = signs.trim().to_string();
            }
            if let Some(needle) = category {
                update.category_id = pick_category(&categories, needle)?;
            }
            if let Some(status) = status {
                update.status = (*status).into();
            }
            update.validate().map_err(ScamwatchError::from)?;

            let result = admin.update_warning(*id, &update, user.id).await;
            finish(format, result, |_| print_success("Warning updated successfully"))
        }
        AdminCommand::Delete { id } => {
            let result = admin.delete_warning(*id, user.id).await;
            finish(format, result, |_| print_success("Warning deleted successfully"))
        }
        AdminCommand::Approve { id } => {
            let result = admin.approve_warning(*id, user.id).await;
            finish(format, result, |_| print_success("Warning approved"))
        }
        AdminCommand::Reject { id } => {
            let result = admin.reject_warning(*id, user.id).await;
            finish(format, result, |_| print_success("Warning rejected"))
        }
        AdminCommand::DeleteComment { id } => {
            let result = admin.delete_comment(*id, user.id).await;
            finish(format, result, |_| print_success("Comment deleted"))
        }
    }
}
