//! Application services: parsing, execution, dispatch and webhook admission.

pub mod command_executor;
pub mod command_parser;
pub mod event_dispatcher;
pub mod redelivery_guard;
pub mod reply_text;
pub mod webhook_gate;

pub use command_executor::CommandExecutor;
pub use event_dispatcher::{EventDispatcher, EventOutcome};
pub use redelivery_guard::RedeliveryGuard;
pub use webhook_gate::{Admission, GateError, WebhookGate, SIGNATURE_HEADER};
