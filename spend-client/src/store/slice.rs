use shared::Page;
use std::collections::HashMap;

/// Which request stream a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    List,
    Item,
    Mutation,
}

/// Issued when a request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    kind: RequestKind,
    seq: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Current list position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            total: 0,
        }
    }
}

impl Paging {
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.per_page)) as u32
        }
    }
}

/// Entities addressable by id
pub trait Identified {
    fn id(&self) -> i64;
}

/// Cached state of one resource
///
/// Every dispatch takes a ticket; a response is applied only if no newer
/// request of the same kind was dispatched after it, so a slow stale
/// response cannot overwrite a fresh one.
#[derive(Debug, Clone)]
pub struct Slice<T> {
    pub items: Vec<T>,
    pub paging: Paging,
    pub current: Option<T>,
    pub error: Option<String>,
    seq: u64,
    latest: HashMap<RequestKind, u64>,
    in_flight: HashMap<RequestKind, u64>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            paging: Paging::default(),
            current: None,
            error: None,
            seq: 0,
            latest: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }
}

impl<T> Slice<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dispatch
    pub fn begin(&mut self, kind: RequestKind) -> RequestTicket {
        self.seq += 1;
        self.latest.insert(kind, self.seq);
        *self.in_flight.entry(kind).or_default() += 1;
        RequestTicket { kind, seq: self.seq }
    }

    /// Whether `ticket` is still the newest of its kind
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.get(&ticket.kind) == Some(&ticket.seq)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.values().any(|n| *n > 0)
    }

    pub fn is_loading_kind(&self, kind: RequestKind) -> bool {
        self.in_flight.get(&kind).is_some_and(|n| *n > 0)
    }

    fn settle(&mut self, ticket: &RequestTicket) -> bool {
        if let Some(n) = self.in_flight.get_mut(&ticket.kind) {
            *n = n.saturating_sub(1);
        }
        let current = self.is_current(ticket);
        if !current {
            tracing::debug!(kind = ?ticket.kind, seq = ticket.seq, "Discarding stale response");
        }
        current
    }

    /// Apply a list response; `false` if it was stale
    pub fn finish_list(&mut self, ticket: RequestTicket, page: Page<T>) -> bool {
        if !self.settle(&ticket) {
            return false;
        }
        self.paging = Paging {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
        };
        self.items = page.items;
        self.error = None;
        true
    }

    /// Apply a single-entity response; `false` if it was stale
    pub fn finish_item(&mut self, ticket: RequestTicket, item: T) -> bool {
        if !self.settle(&ticket) {
            return false;
        }
        self.current = Some(item);
        self.error = None;
        true
    }

    /// Close a request without a payload (mutations, failures)
    pub fn finish(&mut self, ticket: RequestTicket) -> bool {
        self.settle(&ticket)
    }

    /// Record a failure if the ticket is still current
    pub fn fail(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.settle(&ticket) {
            return false;
        }
        self.error = Some(message.into());
        true
    }

    /// Drop cached data; tickets issued before the clear become stale
    pub fn clear(&mut self) {
        let seq = self.seq;
        *self = Self::default();
        self.seq = seq;
    }
}

impl<T: Identified + Clone> Slice<T> {
    /// Replace the entity with the same id or append it
    pub fn upsert(&mut self, item: T) {
        let id = item.id();
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(slot) => *slot = item.clone(),
            None => {
                self.items.push(item.clone());
                self.paging.total += 1;
            }
        }
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = Some(item);
        }
    }

    pub fn remove(&mut self, id: i64) {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        if self.items.len() < before {
            self.paging.total = self.paging.total.saturating_sub(1);
        }
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = None;
        }
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }
}
