use serde::Serialize;
use vault::blocking::Vault;

use crate::Res;

pub fn revenue(vault: &Vault, json: bool) -> Res<()> {
    let report = vault.revenue_report()?;
    if json {
        return print_json(&report);
    }

    println!("paying users:\t{}", report.paying_users);
    println!("mrr:\t\t{}", dollars(report.mrr_cents));
    println!("arr:\t\t{}", dollars(report.arr_cents));
    println!("arpu:\t\t{}", dollars(report.arpu_cents));
    for (plan, revenue) in &report.by_plan {
        println!("->\t{plan}: {} subscribers, {}/mo", revenue.subscribers, dollars(revenue.mrr_cents));
    }
    Ok(())
}

pub fn funnel(vault: &Vault, json: bool) -> Res<()> {
    let report = vault.funnel_report()?;
    if json {
        return print_json(&report);
    }

    println!("accounts:\t\t{}", report.total_accounts);
    println!("pending:\t\t{}", report.pending);
    println!("ever subscribed:\t{}", report.ever_subscribed);
    println!("trialing:\t\t{}", report.trialing);
    println!("on a pass:\t\t{}", report.on_pass);
    println!("paying:\t\t\t{}", report.paying);
    println!("lifetime:\t\t{}", report.lifetime);
    println!("trial to paid:\t\t{}", percent(report.trial_to_paid_rate));
    Ok(())
}

pub fn churn(vault: &Vault, json: bool) -> Res<()> {
    let report = vault.churn_report()?;
    if json {
        return print_json(&report);
    }

    println!("paying:\t\t{}", report.paying);
    println!("lapsed:\t\t{}", report.lapsed);
    println!("churn:\t\t{}", percent(report.churn_rate));
    Ok(())
}

pub fn insights(vault: &Vault, json: bool) -> Res<()> {
    let insights = vault.user_insights()?;
    if json {
        return print_json(&insights);
    }

    println!("users:\t\t{}", insights.total);
    println!("active:\t\t{}", insights.active);
    println!("lifetime:\t{}", insights.lifetime);
    println!("by status:");
    for (status, count) in &insights.by_status {
        println!("->\t{status}: {count}");
    }
    println!("by tier:");
    for (tier, count) in &insights.by_tier {
        println!("->\t{tier}: {count}");
    }
    println!("sign-ups:");
    for (month, count) in &insights.signups_by_month {
        println!("->\t{month}: {count}");
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Res<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn dollars(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
