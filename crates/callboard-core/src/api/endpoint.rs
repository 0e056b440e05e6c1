//! Endpoint descriptors and request parameters for the call-center backend

use std::fmt;

/// Default number of days for the daily analytics series
pub const DEFAULT_DAYS: u32 = 7;

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: u32 = 100;

/// Static description of one backend route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Human-readable name used in errors and logs
    pub name: &'static str,
    /// Path with `{id}` placeholders
    pub path_template: &'static str,
    /// Names of accepted query parameters
    pub query: &'static [&'static str],
}

/// The backend routes consumed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Analytics,
    DailyAnalytics,
    IntentAnalytics,
    Calls,
    CallDetail,
    Customers,
    Tickets,
}

const ANALYTICS: EndpointDescriptor = EndpointDescriptor {
    name: "analytics summary",
    path_template: "/api/analytics",
    query: &[],
};

const DAILY_ANALYTICS: EndpointDescriptor = EndpointDescriptor {
    name: "daily analytics",
    path_template: "/api/analytics/daily",
    query: &["days"],
};

const INTENT_ANALYTICS: EndpointDescriptor = EndpointDescriptor {
    name: "intent analytics",
    path_template: "/api/analytics/intents",
    query: &[],
};

const CALLS: EndpointDescriptor = EndpointDescriptor {
    name: "calls list",
    path_template: "/api/calls",
    query: &["skip", "limit"],
};

const CALL_DETAIL: EndpointDescriptor = EndpointDescriptor {
    name: "call detail",
    path_template: "/api/calls/{id}",
    query: &[],
};

const CUSTOMERS: EndpointDescriptor = EndpointDescriptor {
    name: "customers list",
    path_template: "/api/customers",
    query: &["skip", "limit"],
};

const TICKETS: EndpointDescriptor = EndpointDescriptor {
    name: "tickets list",
    path_template: "/api/tickets",
    query: &["skip", "limit"],
};

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Analytics,
        Endpoint::DailyAnalytics,
        Endpoint::IntentAnalytics,
        Endpoint::Calls,
        Endpoint::CallDetail,
        Endpoint::Customers,
        Endpoint::Tickets,
    ];

    pub fn descriptor(&self) -> &'static EndpointDescriptor {
        match self {
            Endpoint::Analytics => &ANALYTICS,
            Endpoint::DailyAnalytics => &DAILY_ANALYTICS,
            Endpoint::IntentAnalytics => &INTENT_ANALYTICS,
            Endpoint::Calls => &CALLS,
            Endpoint::CallDetail => &CALL_DETAIL,
            Endpoint::Customers => &CUSTOMERS,
            Endpoint::Tickets => &TICKETS,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// skip/limit window for list endpoints (passed through, never interpreted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One concrete call: an endpoint plus its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRequest {
    Analytics,
    DailyAnalytics { days: u32 },
    IntentAnalytics,
    Calls(Page),
    CallDetail { call_id: i64 },
    Customers(Page),
    Tickets(Page),
}

impl ApiRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ApiRequest::Analytics => Endpoint::Analytics,
            ApiRequest::DailyAnalytics { .. } => Endpoint::DailyAnalytics,
            ApiRequest::IntentAnalytics => Endpoint::IntentAnalytics,
            ApiRequest::Calls(_) => Endpoint::Calls,
            ApiRequest::CallDetail { .. } => Endpoint::CallDetail,
            ApiRequest::Customers(_) => Endpoint::Customers,
            ApiRequest::Tickets(_) => Endpoint::Tickets,
        }
    }

    /// Path with placeholders substituted
    pub fn path(&self) -> String {
        let template = self.endpoint().descriptor().path_template;
        match self {
            ApiRequest::CallDetail { call_id } => template.replace("{id}", &call_id.to_string()),
            _ => template.to_string(),
        }
    }

    /// Query pairs in descriptor order
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ApiRequest::DailyAnalytics { days } => vec![("days", days.to_string())],
            ApiRequest::Calls(page) | ApiRequest::Customers(page) | ApiRequest::Tickets(page) => {
                vec![
                    ("skip", page.skip.to_string()),
                    ("limit", page.limit.to_string()),
                ]
            }
            _ => Vec::new(),
        }
    }
}
