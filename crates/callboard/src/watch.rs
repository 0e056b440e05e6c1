//! Live session: re-render the active view whenever its fetch settles

use crate::render::{render_call_detail, render_snapshot, RenderOptions};
use anyhow::Result;
use callboard_core::{TabSession, ViewEvent, ViewId};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

/// One line typed on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    Switch(ViewId),
    Refresh,
    Days(u32),
    Detail(i64),
    Help,
    Quit,
}

impl WatchCommand {
    /// `None` for blank lines, `Err` for anything unrecognised
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(None);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "d" | "dashboard" => Self::Switch(ViewId::Dashboard),
            "c" | "calls" => Self::Switch(ViewId::Calls),
            "a" | "analytics" => Self::Switch(ViewId::Analytics),
            "s" | "settings" => Self::Switch(ViewId::Settings),
            "r" | "refresh" => Self::Refresh,
            "7" => Self::Days(7),
            "14" => Self::Days(14),
            "30" => Self::Days(30),
            "v" | "call" => {
                let id = parts
                    .next()
                    .and_then(|id| id.parse::<i64>().ok())
                    .ok_or_else(|| format!("usage: {} <call id>", head))?;
                Self::Detail(id)
            }
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{}' (h for help)", other)),
        };
        Ok(Some(command))
    }
}

const HELP: &str =
    "d/c/a/s switch tab, r refresh, 7/14/30 analytics range, v <id> call detail, q quit";

fn print_active(session: &TabSession, opts: &RenderOptions) {
    if let Some(snapshot) = session.snapshot() {
        println!("{}\n", render_snapshot(&snapshot, opts));
    }
}

/// Run until `q` or Ctrl-C, reading commands from stdin
pub async fn run(session: TabSession, initial: ViewId, opts: RenderOptions) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    run_until(session, initial, opts, input, tokio::signal::ctrl_c()).await
}

/// Closed input keeps the session live; only `q` or `shutdown` end it
async fn run_until<R, S>(
    mut session: TabSession,
    initial: ViewId,
    opts: RenderOptions,
    input: R,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Future,
{
    let mut events = session.events().subscribe();
    let mut lines = input.lines();
    let mut input_open = true;
    tokio::pin!(shutdown);

    if !opts.json {
        eprintln!("{}", HELP);
    }
    session.switch_to(initial)?;
    print_active(&session, &opts);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,

            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    tracing::debug!("Input closed, waiting for Ctrl-C");
                    input_open = false;
                    continue;
                };
                match WatchCommand::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(Some(WatchCommand::Help)) => eprintln!("{}", HELP),
                    Ok(Some(WatchCommand::Switch(view))) => {
                        if session.switch_to(view)?.is_some() || view == ViewId::Settings {
                            print_active(&session, &opts);
                        }
                    }
                    Ok(Some(WatchCommand::Refresh)) => {
                        session.refresh();
                    }
                    Ok(Some(WatchCommand::Days(days))) => {
                        session.set_analytics_days(days)?;
                    }
                    Ok(Some(WatchCommand::Detail(id))) => match session.call_detail(id).await {
                        Ok(detail) => println!("{}\n", render_call_detail(&detail, &opts)),
                        Err(e) => eprintln!("! {}", e),
                    },
                    Err(message) => eprintln!("{}", message),
                }
            }

            event = events.recv() => match event {
                Ok(ViewEvent::FetchSettled { view, .. }) if session.active_view() == Some(view) => {
                    print_active(&session, &opts);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event receiver lagged");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    session.shutdown();
    Ok(())
}
