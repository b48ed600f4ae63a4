pub mod niconico;

pub use niconico::NiconicoService;
