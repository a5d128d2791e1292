//! Service layer.
//!
//! Services compose the lower-level modules; API handlers stay thin and
//! delegate here.

pub mod now_playing;

pub use now_playing::{NowPlaying, NowPlayingService};
