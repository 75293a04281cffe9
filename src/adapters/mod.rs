// Adapters layer: concrete implementations of the domain ports (http page source, local storage, notifiers).

pub mod http;
pub mod notify;
pub mod storage;
