//! Domain models for the shopping list service.

pub mod command;
pub mod config;
pub mod event;
pub mod shopping_list;

pub use command::{Command, Reply};
pub use config::{
    Config, DispatchConfig, LineConfig, LogFormat, LoggingConfig, NonPostResponse,
    RotationPolicy, ServerConfig, StoreBackend, StoreConfig,
};
pub use event::{
    DeliveryContext, Event, EventSource, EventType, MessageContent, WebhookBatch,
    UNKNOWN_PARTITION,
};
pub use shopping_list::{ShoppingList, EMPTY_LIST_TEXT};
