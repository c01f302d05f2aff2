pub(crate) mod state;
pub(crate) mod sticker;

pub use state::BoothSession;
pub use sticker::{Sticker, StickerId};
