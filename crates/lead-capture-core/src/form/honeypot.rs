//! Honeypot bot detection
//!
//! The `website` input is positioned off-screen and skipped by keyboard
//! navigation, so people never fill it in. Form-filling scripts usually do.

use super::FormState;

/// True when the hidden `website` field carries anything but whitespace
pub fn is_bot(state: &FormState) -> bool {
    !state.website.trim().is_empty()
}
