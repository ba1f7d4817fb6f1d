//! Concrete backend calls.
//!
//! Robusto calls are used as `RobustoPacket<Call>`, plain WIM calls as
//! `WimPacket<Call>`; the aliases below name the packet for each call.

pub mod block_chat_member;
pub mod chat_members;
pub mod gdpr_agreement;
pub mod paging;
pub mod send_imstat;
pub mod sticker_suggests;
pub mod stop_poll;
pub mod sync_address_book;
pub mod thread_subscribers;

use robusto_core::{RobustoPacket, WimPacket};

pub use block_chat_member::BlockChatMember;
pub use chat_members::{ChatMember, ChatMembersPage, GetChatMembers};
pub use gdpr_agreement::{AcceptAgreementInfo, AgreementAction, AgreementType, GdprAgreement};
pub use paging::PageClause;
pub use send_imstat::SendImStat;
pub use sticker_suggests::GetStickerSuggests;
pub use stop_poll::StopPoll;
pub use sync_address_book::SyncAddressBook;
pub use thread_subscribers::{GetThreadSubscribers, ThreadSubscriber, ThreadSubscribersPage};

pub type BlockChatMemberPacket = RobustoPacket<BlockChatMember>;
pub type ChatMembersPacket = RobustoPacket<GetChatMembers>;
pub type GdprAgreementPacket = WimPacket<GdprAgreement>;
pub type StickerSuggestsPacket = RobustoPacket<GetStickerSuggests>;
pub type StopPollPacket = RobustoPacket<StopPoll>;
pub type SyncAddressBookPacket = RobustoPacket<SyncAddressBook>;
pub type ThreadSubscribersPacket = RobustoPacket<GetThreadSubscribers>;
