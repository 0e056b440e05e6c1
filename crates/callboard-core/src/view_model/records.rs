//! Customer and ticket list rows

use super::format::{format_timestamp, or_placeholder};
use callboard_types::{Customer, Ticket};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub plan: String,
    pub balance: String,
    pub status: String,
}

impl CustomerRow {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: or_placeholder(customer.email.as_deref(), "N/A"),
            plan: or_placeholder(customer.plan.as_deref(), "N/A"),
            balance: format!("${:.2}", customer.balance),
            status: or_placeholder(customer.status.as_deref(), "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketRow {
    pub id: i64,
    pub customer_id: i64,
    pub kind: String,
    pub status: String,
    pub priority: String,
    pub created: String,
    pub description: String,
}

impl TicketRow {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            customer_id: ticket.customer_id,
            kind: or_placeholder(ticket.kind.as_deref(), "N/A"),
            status: or_placeholder(ticket.status.as_deref(), "unknown"),
            priority: or_placeholder(ticket.priority.as_deref(), "normal"),
            created: format_timestamp(ticket.created_at),
            description: or_placeholder(ticket.description.as_deref(), ""),
        }
    }
}

pub fn customer_rows(customers: &[Customer]) -> Vec<CustomerRow> {
    customers.iter().map(CustomerRow::from_customer).collect()
}

pub fn ticket_rows(tickets: &[Ticket]) -> Vec<TicketRow> {
    tickets.iter().map(TicketRow::from_ticket).collect()
}
