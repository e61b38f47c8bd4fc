//! Hand-off to the system web browser.
//!
//! Account links and row action workflows (payment method, amount,
//! cancellation) are completed on the website; this module builds those URLs
//! and opens them.

use crate::app::{EditAction, EditIntent};
use crate::contributions::models::AccountRef;
use anyhow::Result;
use std::process::{Command, Stdio};

/// Profile page of an account.
pub fn profile_url(website_url: &str, account: &AccountRef) -> String {
    format!("{}/{}", website_url.trim_end_matches('/'), account.slug)
}

/// Page where the paying account manages the contribution behind `intent`.
pub fn edit_workflow_url(website_url: &str, intent: &EditIntent) -> String {
    let base = website_url.trim_end_matches('/');
    let slug = &intent.order.from_account.slug;
    let action = match intent.action {
        EditAction::EditPaymentMethod => "editPaymentMethod",
        EditAction::EditAmount => "editAmount",
        EditAction::Cancel => "cancel",
    };
    format!(
        "{}/{}/manage-contributions/recurring?order={}&action={}",
        base, slug, intent.order.legacy_id, action
    )
}

/// Open a URL in the default browser.
///
/// # Arguments
/// * `url` - Page to open
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Uses `$BROWSER` when set, then the platform opener (`xdg-open` on Linux,
/// `open` on macOS, `cmd /C start` on Windows).
pub fn open_in_browser(url: &str) -> Result<()> {
    let mut candidates: Vec<(String, Vec<String>)> = Vec::new();

    if let Ok(browser) = std::env::var("BROWSER")
        && !browser.trim().is_empty()
    {
        candidates.push((browser, Vec::new()));
    }

    if cfg!(target_os = "macos") {
        candidates.push(("open".to_string(), Vec::new()));
    } else if cfg!(target_os = "windows") {
        candidates.push((
            "cmd".to_string(),
            vec!["/C".to_string(), "start".to_string(), String::new()],
        ));
    } else {
        candidates.push(("xdg-open".to_string(), Vec::new()));
    }

    for (program, args) in &candidates {
        let spawned = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => {
                tracing::info!(%url, %program, "opened in browser");
                return Ok(());
            }
            Err(e) => tracing::debug!(%program, error = %e, "browser launcher failed"),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to open {}: no browser launcher available. Set $BROWSER or install xdg-open.",
        url
    ))
}
