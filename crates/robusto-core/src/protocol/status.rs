//! Status-code tables for the robusto and WIM conventions.

use crate::error::ProtocolError;

/// Robusto: request succeeded.
pub const ROBUSTO_OK: u32 = 20000;
/// Robusto: request succeeded but the pagination cursor was invalidated.
pub const ROBUSTO_RESET_PAGE: u32 = 20002;
/// Robusto: caller is not a member of the target chat.
pub const ROBUSTO_NOT_CHAT_MEMBER: u32 = 40001;
/// Robusto: caller is blocked in the target chat.
pub const ROBUSTO_BLOCKED: u32 = 40002;

/// WIM: request succeeded.
pub const WIM_OK: u32 = 200;
pub const WIM_INVALID_REQUEST: u32 = 400;
pub const WIM_AUTH_REQUIRED: u32 = 401;
pub const WIM_RATE_LIMITED: u32 = 430;
pub const WIM_MISSING_PARAMETER: u32 = 460;
pub const WIM_PARAMETER_ERROR: u32 = 462;
pub const WIM_TOO_MANY_REQUESTS: u32 = 607;

/// Whether a robusto code belongs to the success family (`parse_results` runs).
pub fn is_robusto_success(code: u32) -> bool {
    code == ROBUSTO_OK || code == ROBUSTO_RESET_PAGE
}

/// Default robusto mapping for codes a call does not refine.
pub fn robusto_default_error(code: u32) -> ProtocolError {
    ProtocolError::Unhandled(code)
}

/// Robusto mapping used by chat-membership sensitive calls.
pub fn robusto_membership_error(code: u32) -> ProtocolError {
    match code {
        ROBUSTO_NOT_CHAT_MEMBER => ProtocolError::NotChatMember,
        ROBUSTO_BLOCKED => ProtocolError::Blocked,
        _ => robusto_default_error(code),
    }
}

/// Default WIM mapping for non-200 codes.
pub fn wim_default_error(code: u32) -> ProtocolError {
    match code {
        WIM_INVALID_REQUEST | WIM_MISSING_PARAMETER | WIM_PARAMETER_ERROR => {
            ProtocolError::InvalidRequest(code)
        }
        WIM_AUTH_REQUIRED => ProtocolError::AuthRequired,
        WIM_RATE_LIMITED | WIM_TOO_MANY_REQUESTS => ProtocolError::RateLimited(code),
        _ => ProtocolError::Unhandled(code),
    }
}
