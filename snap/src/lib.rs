//! The Linea Voyager wallet snap.
//!
//! The wallet host calls into [`SnapHandler`] on install, update, home-page
//! render and remote-procedure requests. The handler refreshes the persisted
//! state through the [`Aggregator`](voyager_upstream::Aggregator) and hands
//! the result to the presenter, which describes the UI as a tree of
//! [`Component`]s for the host to draw.

pub mod captions;
pub mod error;
pub mod handler;
pub mod host;
pub mod presenter;
pub mod ui;

pub use captions::{bundled_captions, load_captions, resolve_language};
pub use error::SnapError;
pub use handler::SnapHandler;
pub use host::{Host, HostChain};
pub use presenter::render_home;
pub use ui::{Component, Dialog, PlainText, Visitor};
