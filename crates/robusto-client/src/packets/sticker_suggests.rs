use serde::{Deserialize, Serialize};

use robusto_core::error::Result;
use robusto_core::{RobustoCall, RobustoReply};

/// `getStickersSuggest`: sticker ids matching a draft message to a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetStickerSuggests {
    contact: String,
    text: String,
}

impl GetStickerSuggests {
    pub fn new(contact: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            contact: contact.into(),
            text: text.into(),
        }
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Serialize)]
pub struct StickerSuggestsParams {
    sn: String,
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestsWire {
    #[serde(default)]
    stickers: Vec<SuggestedSticker>,
}

#[derive(Debug, Deserialize)]
struct SuggestedSticker {
    #[serde(rename = "fileId")]
    file_id: String,
}

impl RobustoCall for GetStickerSuggests {
    type Params = StickerSuggestsParams;
    /// File ids in server order.
    type Output = Vec<String>;

    fn method(&self) -> &'static str {
        "getStickersSuggest"
    }

    fn params(&self) -> StickerSuggestsParams {
        StickerSuggestsParams {
            sn: self.contact.clone(),
            text: self.text.clone(),
        }
    }

    fn parse_results(&mut self, reply: &RobustoReply<'_>) -> Result<Vec<String>> {
        let wire: SuggestsWire = reply.results_or_default()?;
        Ok(wire.stickers.into_iter().map(|s| s.file_id).collect())
    }
}
