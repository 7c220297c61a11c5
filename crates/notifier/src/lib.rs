//! Telegram notifications for new shipping requests.
//!
//! [`TelegramNotifier`] formats a [`RequestRecord`](shipdesk_common::types::RequestRecord),
//! posts it to the Bot API and reports the outcome as a [`DispatchResult`].
//! It never returns an error to the caller: a failed notification must not
//! undo an already stored request.

pub mod error;
pub mod format;
pub mod telegram;
pub mod transport;

pub use error::{DispatchResult, NotifyError};
pub use format::format_request_message;
pub use telegram::{DEFAULT_TIMEOUT, TelegramNotifier};
pub use transport::{ReqwestTransport, TelegramTransport, TransportError, TransportResponse};
