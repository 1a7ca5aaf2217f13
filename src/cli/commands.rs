//! Handlers behind each `mailup` subcommand.

use crate::context::RequestContext;
use crate::error::MailupError;
use crate::resources::{DynamicField, Import, MailingList, SubscriptionStatus};

use super::output::{
    format_fields, format_groups, format_import, format_lists, format_recipient,
    format_result_set, print_json, result_set_json, OutputMode,
};

pub async fn run_lists(ctx: &mut RequestContext, mode: OutputMode) -> Result<(), MailupError> {
    let lists = MailingList::all(ctx).await?;
    match mode {
        OutputMode::Json => print_json(&lists),
        OutputMode::Pretty => print!("{}", format_lists(&lists)),
    }
    Ok(())
}

pub async fn run_count(
    ctx: &mut RequestContext,
    list_id: i64,
    status: &str,
    mode: OutputMode,
) -> Result<(), MailupError> {
    let status: SubscriptionStatus = status.parse()?;
    let count = MailingList::with_id(list_id)
        .count_recipients(ctx, status)
        .await?;
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "list": list_id,
            "status": status.as_str(),
            "count": count,
        })),
        OutputMode::Pretty => println!("{count}"),
    }
    Ok(())
}

/// Print one page of recipients. With `lenient`, items the service returns
/// in an unexpected shape are reported instead of aborting the command.
pub async fn run_recipients(
    ctx: &mut RequestContext,
    list_id: i64,
    page: u32,
    size: u32,
    status: &str,
    lenient: bool,
    mode: OutputMode,
) -> Result<(), MailupError> {
    let results = MailingList::with_id(list_id)
        .recipients_paginated_managed(ctx, page, size, status, lenient)
        .await?;
    match mode {
        OutputMode::Json => print_json(&result_set_json(&results)),
        OutputMode::Pretty => print!("{}", format_result_set(&results)),
    }
    Ok(())
}

pub async fn run_find(
    ctx: &mut RequestContext,
    list_id: i64,
    email: &str,
    mode: OutputMode,
) -> Result<(), MailupError> {
    let found = MailingList::with_id(list_id)
        .find_recipient(ctx, email)
        .await?;
    match (mode, found) {
        (OutputMode::Json, found) => print_json(&found),
        (OutputMode::Pretty, Some(recipient)) => println!("{}", format_recipient(&recipient)),
        (OutputMode::Pretty, None) => println!("No subscribed recipient matches {email}."),
    }
    Ok(())
}

pub async fn run_groups(
    ctx: &mut RequestContext,
    list_id: i64,
    mode: OutputMode,
) -> Result<(), MailupError> {
    let groups = MailingList::with_id(list_id).groups(ctx).await?;
    match mode {
        OutputMode::Json => print_json(&groups),
        OutputMode::Pretty => print!("{}", format_groups(&groups)),
    }
    Ok(())
}

pub async fn run_import_status(
    ctx: &mut RequestContext,
    import_id: i64,
    mode: OutputMode,
) -> Result<(), MailupError> {
    let import = Import::retrieve(ctx, import_id).await?;
    match mode {
        OutputMode::Json => print_json(&import),
        OutputMode::Pretty => println!("{}", format_import(&import)),
    }
    Ok(())
}

pub async fn run_fields(ctx: &mut RequestContext, mode: OutputMode) -> Result<(), MailupError> {
    let fields = DynamicField::all(ctx).await?;
    match mode {
        OutputMode::Json => print_json(&fields),
        OutputMode::Pretty => println!("{}", format_fields(&fields)),
    }
    Ok(())
}
