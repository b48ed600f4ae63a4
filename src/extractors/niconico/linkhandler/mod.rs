mod comments;
mod playlist;
pub mod search;
mod stream;
mod trend;
mod user;

pub use comments::NiconicoCommentsLinkHandlerFactory;
pub use playlist::NiconicoPlaylistLinkHandlerFactory;
pub use search::NiconicoSearchQueryHandlerFactory;
pub use stream::NiconicoStreamLinkHandlerFactory;
pub use trend::{NiconicoTrendLinkHandlerFactory, TRENDING_KIOSK_ID};
pub use user::NiconicoUserLinkHandlerFactory;
