//! # gamepack
//!
//! gamepack reads football tracking data from its msgpack "gamepack" form (a
//! ball artifact, home and away team artifacts, and a JSON metadata
//! descriptor per match) and re-serializes it to JSON, using
//! [serde](https://github.com/serde-rs/serde) for serialization. It also
//! assembles the decoded artifacts into an iterable [`Match`] for analysis
//! code.
//!
//! ```no_run
//! # fn run() -> Result<(), gamepack::Error> {
//! use std::path::Path;
//!
//! let m = gamepack::load_match(Path::new("TRACKING"), 1059714, true)?;
//!
//! let mut alive = 0;
//! for (ball, _home, _away) in m.frames() {
//!     if ball.alive {
//!         alive += 1;
//!     }
//! }
//! println!("{m}: {alive} alive frames of {}", m.frame_count());
//! # Ok(())
//! # }
//! ```
//!
//! Converting a gamepack to JSON goes through [`Converter`] or the
//! `convert_match_to_*_json` wrappers; both write one document per artifact
//! and copy the metadata file verbatim.

pub use self::decoder::{
    decode_ball_frames, decode_metadata, decode_team_frames, read_ball_frames, read_metadata,
    read_team_frames,
};
pub use self::errors::*;
pub use self::gamepack::*;
pub use self::json::*;
pub use self::models::*;
pub use self::progress::*;

mod decoder;
mod errors;
mod gamepack;
mod json;
mod models;
mod progress;
