//! Prashiskshan - offline application queue host
//!
//! Line-driven host around [`AppContext`]. Reads commands from stdin so the
//! queue can be driven from a terminal or a wrapper process.
//!
//! ```text
//! online | offline                 report connectivity
//! apply <project> <student> [msg]  queue an application
//! list | summary | usage           inspect the queue
//! sync | retry                     run a pass / re-queue failed records
//! sms <from> <body...>             simulate an inbound SMS
//! quit
//! ```

use anyhow::{Context, Result};
use prashiskshan_domain::SmsWebhookPayload;
use prashiskshan_lib::utils::logging::init_tracing;
use prashiskshan_lib::{
    get_network_status, get_queue_summary, get_storage_usage, handle_sms_webhook,
    list_queued_applications, queue_application, retry_failed_applications, set_network_status,
    sync_queued_applications, AppContext, QueueApplicationRequest,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = prashiskshan_infra::config::load().unwrap_or_default();
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let ctx = AppContext::new_with_config(config).await.context("failed to start")?;
    tracing::info!("Prashiskshan ready; type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        if let Err(err) = dispatch(&ctx, line).await {
            eprintln!("error: {err}");
        }
    }

    ctx.shutdown().await.context("shutdown failed")?;
    Ok(())
}

async fn dispatch(ctx: &AppContext, line: &str) -> Result<()> {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match command {
        "online" => println!("changed: {}", set_network_status(ctx, true)),
        "offline" => println!("changed: {}", set_network_status(ctx, false)),
        "status" => println!("online: {}", get_network_status(ctx)),
        "apply" => {
            let mut args = rest.splitn(3, ' ');
            let project_id = args.next().unwrap_or_default().to_string();
            let student_id = args.next().unwrap_or_default().to_string();
            let cover_letter = args.next().map(str::to_string);
            let id = queue_application(
                ctx,
                QueueApplicationRequest { project_id, student_id, cover_letter },
            )
            .await
            .map_err(anyhow::Error::msg)?;
            println!("queued: {id}");
        }
        "list" => print_json(&list_queued_applications(ctx).await.map_err(anyhow::Error::msg)?)?,
        "summary" => print_json(&get_queue_summary(ctx).await.map_err(anyhow::Error::msg)?)?,
        "usage" => print_json(&get_storage_usage(ctx).await.map_err(anyhow::Error::msg)?)?,
        "sync" => {
            let synced = sync_queued_applications(ctx).await.map_err(anyhow::Error::msg)?;
            println!("synced: {}", synced.len());
        }
        "retry" => {
            let count = retry_failed_applications(ctx).await.map_err(anyhow::Error::msg)?;
            println!("re-queued: {count}");
        }
        "sms" => {
            let (from, body) = rest.split_once(' ').unwrap_or((rest, ""));
            println!("{}", handle_sms_webhook(ctx, local_sms(from, body)).await);
        }
        "help" => println!("online | offline | status | apply <project> <student> [msg] | list | summary | usage | sync | retry | sms <from> <body> | quit"),
        other => anyhow::bail!("unknown command `{other}`"),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn local_sms(from: &str, body: &str) -> SmsWebhookPayload {
    SmsWebhookPayload {
        from: from.to_string(),
        body: body.to_string(),
        message_sid: "local".to_string(),
        account_sid: "local".to_string(),
        messaging_service_sid: None,
        num_media: "0".to_string(),
        profile_name: None,
        sms_message_sid: "local".to_string(),
        sms_sid: "local".to_string(),
        sms_status: "received".to_string(),
        to: "local".to_string(),
        api_version: "2010-04-01".to_string(),
    }
}
