//! `getChatMembers`: role-filtered, cursor-paginated member listing.

use serde::{Deserialize, Serialize};

use robusto_core::error::{PacketError, Result};
use robusto_core::packet::persons::{collect_persons, HasPersons, Person, PersonsMap};
use robusto_core::protocol::status::robusto_membership_error;
use robusto_core::{RobustoCall, RobustoReply};

use super::paging::{normalize_cursor, PageClause};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetChatMembers {
    aimid: String,
    role: String,
    page_size: u32,
    page: PageClause,
}

impl GetChatMembers {
    /// An empty `cursor` requests the first page filtered by `role`.
    pub fn new(
        aimid: impl Into<String>,
        role: impl Into<String>,
        page_size: u32,
        cursor: impl Into<String>,
    ) -> Self {
        Self {
            aimid: aimid.into(),
            role: role.into(),
            page_size,
            page: PageClause::new(page_size, cursor),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.aimid
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn cursor(&self) -> Option<&str> {
        self.page.cursor()
    }

    /// Same listing, continued from `cursor`.
    pub fn next_page(&self, cursor: impl Into<String>) -> Self {
        Self::new(self.aimid.clone(), self.role.clone(), self.page_size, cursor)
    }

    /// Same listing from page one, after the server reset the cursor.
    pub fn restart(&self) -> Self {
        self.next_page(String::new())
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMembersParams {
    id: String,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<RoleFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct RoleFilter {
    role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMember {
    #[serde(rename = "sn")]
    pub aimid: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "lastseen")]
    pub last_seen: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatMembersWire {
    #[serde(default)]
    members: Vec<ChatMember>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    persons: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatMembersPage {
    pub chat_id: String,
    pub members: Vec<ChatMember>,
    /// Continuation token for the next page, if any.
    pub cursor: Option<String>,
    pub persons: PersonsMap,
    /// Cached cursors are void; restart from page one.
    pub reset_pages: bool,
}

impl ChatMembersPage {
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }
}

impl HasPersons for ChatMembersPage {
    fn persons(&self) -> &PersonsMap {
        &self.persons
    }
}

impl RobustoCall for GetChatMembers {
    type Params = ChatMembersParams;
    type Output = ChatMembersPage;

    fn method(&self) -> &'static str {
        "getChatMembers"
    }

    fn paginated(&self) -> bool {
        true
    }

    fn params(&self) -> ChatMembersParams {
        ChatMembersParams {
            id: self.aimid.clone(),
            page_size: self.page.page_size(),
            filter: self.page.is_first().then(|| RoleFilter { role: self.role.clone() }),
            cursor: self.page.cursor().map(str::to_string),
        }
    }

    fn parse_results(&mut self, reply: &RobustoReply<'_>) -> Result<ChatMembersPage> {
        let wire: ChatMembersWire = reply.results_or_default()?;
        Ok(ChatMembersPage {
            chat_id: self.aimid.clone(),
            members: wire.members,
            cursor: normalize_cursor(wire.cursor),
            persons: collect_persons(wire.persons),
            reset_pages: reply.reset_pages,
        })
    }

    fn on_error_code(&self, code: u32) -> PacketError {
        robusto_membership_error(code).into()
    }
}
