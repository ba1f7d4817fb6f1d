//! `blockChatMembers` / `unblockChatMembers`.

use serde::Serialize;

use robusto_core::error::{PacketError, Result};
use robusto_core::protocol::status::robusto_membership_error;
use robusto_core::{HttpVerb, RobustoCall, RobustoReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockChatMember {
    chat: String,
    contact: String,
    block: bool,
    remove_messages: bool,
}

impl BlockChatMember {
    pub fn block(
        chat: impl Into<String>,
        contact: impl Into<String>,
        remove_messages: bool,
    ) -> Self {
        Self {
            chat: chat.into(),
            contact: contact.into(),
            block: true,
            remove_messages,
        }
    }

    pub fn unblock(chat: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            chat: chat.into(),
            contact: contact.into(),
            block: false,
            remove_messages: false,
        }
    }

    pub fn chat(&self) -> &str {
        &self.chat
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn is_block(&self) -> bool {
        self.block
    }
}

#[derive(Debug, Serialize)]
pub struct BlockParams {
    id: String,
    members: Vec<MemberRef>,
    #[serde(rename = "deleteLastMessages", skip_serializing_if = "Option::is_none")]
    delete_last_messages: Option<bool>,
}

#[derive(Debug, Serialize)]
struct MemberRef {
    sn: String,
}

impl RobustoCall for BlockChatMember {
    type Params = BlockParams;
    type Output = ();

    fn method(&self) -> &'static str {
        if self.block {
            "blockChatMembers"
        } else {
            "unblockChatMembers"
        }
    }

    fn verb(&self) -> HttpVerb {
        HttpVerb::Post
    }

    fn params(&self) -> BlockParams {
        BlockParams {
            id: self.chat.clone(),
            members: vec![MemberRef { sn: self.contact.clone() }],
            delete_last_messages: self.block.then_some(self.remove_messages),
        }
    }

    fn parse_results(&mut self, _reply: &RobustoReply<'_>) -> Result<()> {
        Ok(())
    }

    fn on_error_code(&self, code: u32) -> PacketError {
        robusto_membership_error(code).into()
    }
}
