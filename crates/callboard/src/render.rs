//! Terminal rendering of view models (tables or JSON)

use callboard_core::view_model::{
    AnalyticsView, CallDetailView, CallsView, CustomerRow, DashboardView, SettingsView,
    StatusBadge, TicketRow,
};
use callboard_core::{FetchStatus, ViewId, ViewModel, ViewSnapshot};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub json: bool,
    pub no_color: bool,
}

impl RenderOptions {
    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        if self.no_color {
            table.set_header(headers.to_vec());
        } else {
            table.set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).fg(Color::Cyan))
                    .collect::<Vec<_>>(),
            );
        }
        table
    }

    fn badge(&self, text: &str, badge: StatusBadge) -> Cell {
        let cell = Cell::new(text);
        if self.no_color {
            return cell;
        }
        cell.fg(match badge {
            StatusBadge::Success => Color::Green,
            StatusBadge::Warning => Color::Yellow,
            StatusBadge::Danger => Color::Red,
            StatusBadge::Info => Color::Blue,
        })
    }
}

pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Full view: title, status line, then the model (or a placeholder)
pub fn render_snapshot(snapshot: &ViewSnapshot, opts: &RenderOptions) -> String {
    if opts.json {
        return to_json(snapshot);
    }

    let mut out = Vec::new();
    let title = match snapshot.view {
        ViewId::Dashboard => "Dashboard Overview",
        ViewId::Calls => "Call History",
        ViewId::Analytics => "Analytics",
        ViewId::Settings => "Settings",
    };
    out.push(format!("== {} ==", title));

    match snapshot.status {
        FetchStatus::Loading if snapshot.model.is_some() => out.push("(refreshing...)".to_string()),
        FetchStatus::Error => {
            if let Some(error) = &snapshot.error {
                out.push(format!("! {}", error));
            }
        }
        _ => {}
    }

    match &snapshot.model {
        Some(model) => out.push(render_model(model, opts)),
        None if snapshot.status == FetchStatus::Error => {}
        None => out.push(format!("Loading {}...", snapshot.view)),
    }

    out.join("\n")
}

pub fn render_model(model: &ViewModel, opts: &RenderOptions) -> String {
    match model {
        ViewModel::Dashboard(view) => render_dashboard(view, opts),
        ViewModel::Calls(view) => render_calls(view, opts),
        ViewModel::Analytics(view) => render_analytics(view, opts),
        ViewModel::Settings(view) => render_settings(view, opts),
    }
}

pub fn render_dashboard(view: &DashboardView, opts: &RenderOptions) -> String {
    let mut cards = opts.table(&["Metric", "Value", "Detail"]);
    for card in &view.cards {
        cards.add_row(vec![card.title, card.value.as_str(), card.caption.as_str()]);
    }

    let intents = if view.has_intents {
        let mut table = opts.table(&["Intent", "Count", "Percentage"]);
        for row in &view.intents {
            table.add_row(vec![row.intent.clone(), row.count.to_string(), row.share.clone()]);
        }
        table.to_string()
    } else {
        "No intent data available".to_string()
    };

    let issues = if view.has_issues {
        let mut table = opts.table(&["Issue Type", "Count"]);
        for row in &view.top_issues {
            table.add_row(vec![row.issue.clone(), row.count.to_string()]);
        }
        table.to_string()
    } else {
        "No issue data available".to_string()
    };

    format!(
        "{}\n\nCall Intents\n{}\n\nTop Issues\n{}",
        cards, intents, issues
    )
}

pub fn render_calls(view: &CallsView, opts: &RenderOptions) -> String {
    if view.is_empty() {
        return "No calls found.".to_string();
    }

    let mut table = opts.table(&["ID", "Caller", "Start Time", "Duration", "Intent", "Status"]);
    for row in &view.rows {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(&row.caller),
            Cell::new(&row.started),
            Cell::new(&row.duration),
            Cell::new(&row.intent),
            opts.badge(&row.status, row.badge),
        ]);
    }
    table.to_string()
}

pub fn render_call_detail(detail: &CallDetailView, opts: &RenderOptions) -> String {
    if opts.json {
        return to_json(detail);
    }

    let row = &detail.row;
    let lines = [
        format!("Call ID:     {}", row.id),
        format!("Caller:      {}", row.caller),
        format!("Start Time:  {}", row.started),
        format!("End Time:    {}", detail.ended),
        format!("Duration:    {}", row.duration),
        format!("Intent:      {}", row.intent),
        format!("Status:      {}", row.status),
        format!("Resolution:  {}", detail.resolution),
        String::new(),
        "Transcript:".to_string(),
        detail
            .transcript
            .clone()
            .unwrap_or_else(|| "No transcript available".to_string()),
    ];
    lines.join("\n")
}

pub fn render_analytics(view: &AnalyticsView, opts: &RenderOptions) -> String {
    let daily = if view.daily.is_empty() {
        "No call volume in range".to_string()
    } else {
        let mut table = opts.table(&["Date", "Total Calls", "Avg Duration (s)"]);
        for point in &view.daily {
            table.add_row(vec![
                point.date.to_string(),
                point.total_calls.to_string(),
                format!("{:.1}", point.avg_duration),
            ]);
        }
        table.to_string()
    };

    let intents = if view.intents.is_empty() {
        "No intent data available".to_string()
    } else {
        let mut table = opts.table(&["Intent", "Count", "Share", "Avg Duration"]);
        for slice in &view.intents {
            table.add_row(vec![
                slice.intent.clone(),
                slice.count.to_string(),
                slice.share.clone(),
                slice.avg_duration.clone(),
            ]);
        }
        table.to_string()
    };

    format!(
        "Daily Call Volume (last {} days)\n{}\n\nIntent Distribution\n{}",
        view.days, daily, intents
    )
}

pub fn render_settings(view: &SettingsView, opts: &RenderOptions) -> String {
    view.groups
        .iter()
        .map(|group| {
            let mut table = opts.table(&["Setting", "Value"]);
            for field in &group.fields {
                table.add_row(vec![field.label, field.value.as_str()]);
            }
            format!("{}\n{}", group.title, table)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_customers(rows: &[CustomerRow], opts: &RenderOptions) -> String {
    if opts.json {
        return to_json(&rows);
    }
    if rows.is_empty() {
        return "No customers found.".to_string();
    }

    let mut table = opts.table(&["ID", "Name", "Phone", "Email", "Plan", "Balance", "Status"]);
    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.name.clone(),
            row.phone.clone(),
            row.email.clone(),
            row.plan.clone(),
            row.balance.clone(),
            row.status.clone(),
        ]);
    }
    table.to_string()
}

pub fn render_tickets(rows: &[TicketRow], opts: &RenderOptions) -> String {
    if opts.json {
        return to_json(&rows);
    }
    if rows.is_empty() {
        return "No tickets found.".to_string();
    }

    let mut table = opts.table(&["ID", "Customer", "Type", "Status", "Priority", "Created"]);
    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.customer_id.to_string(),
            row.kind.clone(),
            row.status.clone(),
            row.priority.clone(),
            row.created.clone(),
        ]);
    }
    table.to_string()
}
