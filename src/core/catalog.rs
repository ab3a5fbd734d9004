//! Page-type to command-sequence scripts.
//!
//! Every script lives here; the dispatch engine only ever sees the compiled
//! `Vec<Command>`.

use super::command::Command;
use super::profile::UserProfile;

/// Turns a page classification into the ordered commands a fresh session
/// should run. Implementations must be deterministic for the same inputs and
/// return a non-empty sequence for every page type.
pub trait CommandCatalog: Send + Sync {
    fn compile(&self, page_type: &str, profile: Option<&UserProfile>) -> Vec<Command>;
}

/// Scripts for the signup flow the browser agent drives.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

pub const MAIN_PAGE: &str = "main";
pub const DASHBOARD_PAGE: &str = "dashboard";
pub const AUTHENTICATOR_PAGE: &str = "authenticator";

impl CommandCatalog for BuiltinCatalog {
    fn compile(&self, page_type: &str, profile: Option<&UserProfile>) -> Vec<Command> {
        match page_type {
            MAIN_PAGE => main_page(),
            DASHBOARD_PAGE => dashboard_page(),
            AUTHENTICATOR_PAGE => authenticator_page(profile),
            _ => vec![Command::wait("unknown_01", "Wait on unrecognized page", 2000)],
        }
    }
}

fn main_page() -> Vec<Command> {
    vec![
        Command::click("main_01", "Click the Sign in link", "Sign in", "link", 2000),
        Command::wait("main_02", "Wait for navigation", 3000),
    ]
}

fn dashboard_page() -> Vec<Command> {
    vec![Command::wait("dashboard_01", "Wait for redirect", 5000)]
}

fn authenticator_page(profile: Option<&UserProfile>) -> Vec<Command> {
    let field = |pick: fn(&UserProfile) -> &str| profile.map(pick).unwrap_or_default().to_owned();

    vec![
        Command::click("auth_01", "Click the Sign up link", "Sign up", "link", 2000),
        Command::wait("auth_02", "Wait for the signup form", 3000),
        Command::type_into("auth_03", "Enter first name", "first_name", field(|p| p.first_name.as_str())),
        Command::type_into("auth_04", "Enter last name", "last_name", field(|p| p.last_name.as_str())),
        Command::type_into("auth_05", "Enter email", "email", field(|p| p.email.as_str())),
        Command::click("auth_06", "Click the first Continue button", "Continue", "button", 1500),
        Command::wait("auth_07", "Wait for the password field", 2000),
        Command::type_into("auth_08", "Enter password", "password", field(|p| p.password.as_str())),
        Command::click("auth_09", "Click the second Continue button", "Continue", "button", 1500),
        Command::complete("auth_10", "Signup finished", "Signup completed successfully"),
    ]
}
