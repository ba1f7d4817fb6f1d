use serde::Serialize;

use robusto_core::error::Result;
use robusto_core::{HttpVerb, RobustoCall, RobustoReply};

/// `syncAddressBook`: uploads the phone list under a sync keyword.
///
/// Resolves to the robusto status code; the body is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncAddressBook {
    keyword: String,
    phones: Vec<String>,
}

impl SyncAddressBook {
    pub fn new(keyword: impl Into<String>, phones: Vec<String>) -> Self {
        Self {
            keyword: keyword.into(),
            phones,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }
}

#[derive(Debug, Serialize)]
pub struct SyncAddressBookParams {
    keyword: String,
    #[serde(rename = "phoneList")]
    phone_list: Vec<String>,
}

impl RobustoCall for SyncAddressBook {
    type Params = SyncAddressBookParams;
    type Output = u32;

    fn method(&self) -> &'static str {
        "syncAddressBook"
    }

    fn verb(&self) -> HttpVerb {
        HttpVerb::Post
    }

    fn params(&self) -> SyncAddressBookParams {
        SyncAddressBookParams {
            keyword: self.keyword.clone(),
            phone_list: self.phones.clone(),
        }
    }

    fn parse_results(&mut self, reply: &RobustoReply<'_>) -> Result<u32> {
        Ok(reply.code)
    }
}
