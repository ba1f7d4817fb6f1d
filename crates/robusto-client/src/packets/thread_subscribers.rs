//! `thread/subscribers/get`: cursor-paginated subscriber listing of a thread.

use serde::{Deserialize, Serialize};

use robusto_core::error::Result;
use robusto_core::packet::persons::{collect_persons, HasPersons, Person, PersonsMap};
use robusto_core::protocol::robusto::MIN_SUPPORTED_API_VERSION;
use robusto_core::{PacketParams, Priority, RobustoCall, RobustoReply};

use super::paging::{normalize_cursor, PageClause};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetThreadSubscribers {
    thread_id: String,
    role: String,
    page_size: u32,
    page: PageClause,
}

impl GetThreadSubscribers {
    /// `role` is kept for the caller; the server does not filter by it.
    pub fn new(
        thread_id: impl Into<String>,
        role: impl Into<String>,
        page_size: u32,
        cursor: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            role: role.into(),
            page_size,
            page: PageClause::new(page_size, cursor),
        }
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn cursor(&self) -> Option<&str> {
        self.page.cursor()
    }

    pub fn next_page(&self, cursor: impl Into<String>) -> Self {
        Self::new(self.thread_id.clone(), self.role.clone(), self.page_size, cursor)
    }

    pub fn restart(&self) -> Self {
        self.next_page(String::new())
    }
}

#[derive(Debug, Serialize)]
pub struct ThreadSubscribersParams {
    #[serde(rename = "threadId")]
    thread_id: String,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadSubscriber {
    #[serde(rename = "sn")]
    pub aimid: String,
}

#[derive(Debug, Default, Deserialize)]
struct ThreadSubscribersWire {
    #[serde(default)]
    subscribers: Vec<ThreadSubscriber>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    persons: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreadSubscribersPage {
    /// Always the requested thread id.
    pub thread_id: String,
    pub subscribers: Vec<ThreadSubscriber>,
    pub cursor: Option<String>,
    pub persons: PersonsMap,
    pub reset_pages: bool,
}

impl ThreadSubscribersPage {
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }
}

impl HasPersons for ThreadSubscribersPage {
    fn persons(&self) -> &PersonsMap {
        &self.persons
    }
}

impl RobustoCall for GetThreadSubscribers {
    type Params = ThreadSubscribersParams;
    type Output = ThreadSubscribersPage;

    fn method(&self) -> &'static str {
        "thread/subscribers/get"
    }

    fn priority(&self) -> Priority {
        Priority::Top
    }

    fn api_version(&self, _params: &PacketParams) -> u32 {
        MIN_SUPPORTED_API_VERSION
    }

    fn paginated(&self) -> bool {
        true
    }

    fn params(&self) -> ThreadSubscribersParams {
        ThreadSubscribersParams {
            thread_id: self.thread_id.clone(),
            page_size: self.page.page_size(),
            cursor: self.page.cursor().map(str::to_string),
        }
    }

    fn parse_results(&mut self, reply: &RobustoReply<'_>) -> Result<ThreadSubscribersPage> {
        let wire: ThreadSubscribersWire = reply.results_or_default()?;
        Ok(ThreadSubscribersPage {
            thread_id: self.thread_id.clone(),
            subscribers: wire.subscribers,
            cursor: normalize_cursor(wire.cursor),
            persons: collect_persons(wire.persons),
            reset_pages: reply.reset_pages,
        })
    }
}
