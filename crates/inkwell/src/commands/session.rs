//! Session commands: whoami, status, login-url, logout-url.

use serde::Serialize;

use inkwell_core::{CoreError, Store, User};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn user_detail(u: &User) -> String {
    output::detail_lines(&[
        ("ID", u.id.to_string()),
        ("Username", u.username.clone()),
        ("Name", u.display_name()),
        ("Email", u.email.clone()),
    ])
}

pub async fn whoami(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    store.fetch_current_user().await;
    let Some(user) = store.current_user() else {
        return Err(CliError::NotSignedIn {
            reason: store
                .user()
                .error
                .unwrap_or_else(|| "no session".into()),
        });
    };
    let out = output::render_single(&global.output, &user, user_detail, |u| {
        u.username.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatusReport {
    api_base: String,
    auth_base: String,
    authenticated: bool,
    username: Option<String>,
}

pub async fn status(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let authenticated = store.check_authentication().await;
    let endpoints = store.client().endpoints();
    let report = StatusReport {
        api_base: endpoints.api_base().to_string(),
        auth_base: endpoints.auth_base().to_string(),
        authenticated,
        username: store.current_user().map(|u| u.username),
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            output::detail_lines(&[
                ("API", r.api_base.clone()),
                ("Auth", r.auth_base.clone()),
                ("Signed in", output::flag(r.authenticated, color)),
                ("User", r.username.clone().unwrap_or_default()),
            ])
        },
        |r| r.authenticated.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn login_url(store: &Store, next: Option<&str>, global: &GlobalOpts) -> Result<(), CliError> {
    let url = store
        .client()
        .login_url(next)
        .map_err(CoreError::from)?;
    output::print_output(url.as_str(), global.quiet);
    Ok(())
}

pub fn logout_url(store: &Store, next: Option<&str>, global: &GlobalOpts) -> Result<(), CliError> {
    let url = store
        .client()
        .logout_url(next)
        .map_err(CoreError::from)?;
    output::print_output(url.as_str(), global.quiet);
    Ok(())
}
