use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vault::blocking::Vault;
use vault::io::export;
use vault::{resolve, resolve_at, ResolvedStatus, ResolvedSubscription};

use crate::{AccountFilter, Res};

pub fn resolve_file(file: &Path) -> Res<()> {
    let record = export::read_account(file)?;
    println!("{}", serde_json::to_string_pretty(&resolve(&record))?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedUser {
    uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    subscription: ResolvedSubscription,
}

pub fn list(vault: &Vault, file: &Path, filter: Option<AccountFilter>, json: bool) -> Res<()> {
    let now = Utc::now();
    let users: Vec<ListedUser> = vault
        .list_accounts()?
        .into_iter()
        .map(|(uid, record)| ListedUser {
            uid,
            subscription: resolve_at(&record, now),
            email: record.email,
        })
        .filter(|user| filter.map(|f| matches(f, &user.subscription, now)).unwrap_or(true))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        let msg = match filter {
            None => "There are no users.",
            Some(AccountFilter::Paying) => "There are no paying users.",
            Some(AccountFilter::Trialing) => "There are no trialing users.",
            Some(AccountFilter::Pass) => "There are no users on a pass.",
            Some(AccountFilter::Lapsed) => "There are no lapsed users.",
            Some(AccountFilter::Lifetime) => "There are no lifetime users.",
            Some(AccountFilter::Free) => "There are no free users.",
        };

        println!("{msg} ({})", file.display());
    } else {
        for user in users {
            let sub = &user.subscription;
            println!(
                "{}\t{}\t{}\t{}\t{}",
                user.uid,
                user.email.as_deref().unwrap_or("-"),
                sub.tier,
                sub.status.as_str(),
                if sub.is_active { "active" } else { "inactive" },
            );
        }
    }

    Ok(())
}

fn matches(filter: AccountFilter, sub: &ResolvedSubscription, now: DateTime<Utc>) -> bool {
    match filter {
        AccountFilter::Paying => sub.is_paying_at(now),
        AccountFilter::Trialing => sub.status == ResolvedStatus::Trialing,
        AccountFilter::Pass => sub.status == ResolvedStatus::Pass,
        AccountFilter::Lapsed => sub.is_lapsed(),
        AccountFilter::Lifetime => sub.has_lifetime_access,
        AccountFilter::Free => sub.status == ResolvedStatus::Free,
    }
}
