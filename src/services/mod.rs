pub mod chat_client;
pub mod relay;
pub mod transport;
pub mod upstream;
pub mod webhook;
