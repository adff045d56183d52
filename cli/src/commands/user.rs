use anyhow::Result;

use fitplan_core::models::UserAccount;

use super::CliTracker;

fn public_fields(account: &UserAccount) -> serde_json::Value {
    serde_json::json!({ "name": account.name, "email": account.email })
}

pub(crate) fn cmd_user_register(
    tracker: &CliTracker<'_>,
    name: &str,
    email: &str,
    password: &str,
    json: bool,
) -> Result<()> {
    let account = tracker.users().register(name, email, password)?;

    if json {
        println!("{}", serde_json::json!({ "registered": public_fields(&account) }));
    } else {
        println!("Registration successful! Log in with `fitplan user login`.");
    }

    Ok(())
}

pub(crate) fn cmd_user_login(
    tracker: &CliTracker<'_>,
    email: &str,
    password: &str,
    json: bool,
) -> Result<()> {
    let account = tracker.users().login(email, password)?;

    if json {
        println!("{}", serde_json::json!({ "user": public_fields(&account) }));
    } else {
        println!("Login successful! Welcome back, {}.", account.name);
    }

    Ok(())
}
