//! Login, registration, and logout.

use liquid_luxury_client::auth::{AuthFlow, AuthOutcome};

use super::Context;

pub async fn login(ctx: &Context, email: &str, password: &str) {
    let flow = AuthFlow::new(ctx.resources.client().clone());
    match flow.login(email, password).await {
        AuthOutcome::SignedIn(route) => {
            tracing::info!("Signed in; landing route: {}", route.path());
        }
        AuthOutcome::Failed(message) => tracing::error!("Login failed: {message}"),
    }
}

pub async fn register(ctx: &Context, username: &str, email: &str, password: &str) {
    let flow = AuthFlow::new(ctx.resources.client().clone());
    match flow.register(username, email, password).await {
        AuthOutcome::SignedIn(route) => {
            tracing::info!("Account created and signed in; landing route: {}", route.path());
        }
        AuthOutcome::Failed(message) => tracing::error!("Registration failed: {message}"),
    }
}

pub fn logout(ctx: &Context) {
    let flow = AuthFlow::new(ctx.resources.client().clone());
    flow.logout();
    tracing::info!("Signed out");
}

pub fn whoami(ctx: &Context) {
    match ctx.session.current_user() {
        Some(user) => println!("{} <{}> ({})", user.username, user.email, if user.is_admin() { "admin" } else { "customer" }),
        None => println!("Not signed in"),
    }
}
