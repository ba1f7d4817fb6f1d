use serde::Serialize;

use robusto_core::error::Result;
use robusto_core::{RobustoCall, RobustoReply};

/// `poll/stop`: closes a poll for further votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopPoll {
    poll_id: String,
}

impl StopPoll {
    pub fn new(poll_id: impl Into<String>) -> Self {
        Self { poll_id: poll_id.into() }
    }

    pub fn poll_id(&self) -> &str {
        &self.poll_id
    }
}

#[derive(Debug, Serialize)]
pub struct StopPollParams {
    #[serde(rename = "pollId")]
    poll_id: String,
}

impl RobustoCall for StopPoll {
    type Params = StopPollParams;
    type Output = ();

    fn method(&self) -> &'static str {
        "poll/stop"
    }

    fn params(&self) -> StopPollParams {
        StopPollParams { poll_id: self.poll_id.clone() }
    }

    fn parse_results(&mut self, _reply: &RobustoReply<'_>) -> Result<()> {
        Ok(())
    }
}
