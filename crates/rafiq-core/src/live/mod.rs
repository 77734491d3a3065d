pub mod clock;
pub mod pcm;
pub mod session;
pub mod types;

pub use clock::PlaybackClock;
pub use session::{LiveEvent, LiveRegistry, LiveSessionHandle, LiveState};
