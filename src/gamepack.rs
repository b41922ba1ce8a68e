//! # Gamepack assembly
//!
//! A gamepack is the bundle of four artifacts describing one match:
//! `<id>.BALL.msgpack`, `<id>.HOME.msgpack`, `<id>.AWAY.msgpack` and
//! `<id>.METADATA.json`, stored under `<root>/<id>/`, or under
//! `<root>/<id>/5fps/` for the reduced-frame-rate capture. This module
//! builds those paths, assembles a [`Match`] from them, and drives the
//! msgpack to JSON conversion of a whole gamepack.
use crate::decoder;
use crate::errors::Error;
use crate::json::{self, Encoding};
use crate::models::Match;
use crate::progress::{NoProgress, Progress};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the reduced-frame-rate subdirectory.
pub const FPS5_SUBDIR: &str = "5fps";

/// The four artifact paths of one gamepack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamepackPaths {
    pub ball: PathBuf,
    pub home: PathBuf,
    pub away: PathBuf,
    pub metadata: PathBuf,
}

impl GamepackPaths {
    fn base_dir(root: &Path, match_id: u64, fps5: bool) -> PathBuf {
        let mut dir = root.join(match_id.to_string());
        if fps5 {
            dir.push(FPS5_SUBDIR);
        }
        dir
    }

    /// Paths of the msgpack input artifacts for `match_id` under `root`.
    pub fn locate(root: &Path, match_id: u64, fps5: bool) -> Self {
        let dir = Self::base_dir(root, match_id, fps5);
        GamepackPaths {
            ball: dir.join(format!("{match_id}.BALL.msgpack")),
            home: dir.join(format!("{match_id}.HOME.msgpack")),
            away: dir.join(format!("{match_id}.AWAY.msgpack")),
            metadata: dir.join(format!("{match_id}.METADATA.json")),
        }
    }

    /// Paths of the JSON output artifacts for `match_id` under `root`,
    /// mirroring the input tree layout.
    pub fn locate_json(root: &Path, match_id: u64, fps5: bool) -> Self {
        let dir = Self::base_dir(root, match_id, fps5);
        GamepackPaths {
            ball: dir.join(format!("{match_id}.BALL.json")),
            home: dir.join(format!("{match_id}.HOME.json")),
            away: dir.join(format!("{match_id}.AWAY.json")),
            metadata: dir.join(format!("{match_id}.METADATA.json")),
        }
    }
}

/// Load a full match from the gamepack under `root`. Officials are part of
/// the data model but have no artifact, so `official_frames` is left empty.
pub fn load_match(root: &Path, match_id: u64, fps5: bool) -> Result<Match, Error> {
    load_match_with(root, match_id, fps5, &mut NoProgress)
}

/// [`load_match`] with an injected progress sink.
pub fn load_match_with(
    root: &Path,
    match_id: u64,
    fps5: bool,
    progress: &mut dyn Progress,
) -> Result<Match, Error> {
    let paths = GamepackPaths::locate(root, match_id, fps5);

    Ok(Match {
        match_id,
        ball_frames: decoder::read_ball_frames(&paths.ball, progress)?,
        home_frames: decoder::read_team_frames(&paths.home, progress)?,
        away_frames: decoder::read_team_frames(&paths.away, progress)?,
        official_frames: Vec::new(),
        metadata: decoder::read_metadata(&paths.metadata)?,
    })
}

/// Converts one msgpack gamepack into a JSON gamepack.
///
/// Options default to the 25fps capture, the efficient encoding, compact
/// output and no progress reporting:
///
/// ```no_run
/// # fn run() -> Result<(), gamepack::Error> {
/// use gamepack::{Converter, Encoding};
/// use std::path::Path;
///
/// let outputs = Converter::new(Path::new("TRACKING"), Path::new("JSON"))
///     .fps5(true)
///     .encoding(Encoding::Readable)
///     .spacing(Some(2))
///     .convert(1059714)?;
/// println!("ball frames written to {}", outputs.ball.display());
/// # Ok(())
/// # }
/// ```
pub struct Converter<'a> {
    tracking_root: &'a Path,
    output_root: &'a Path,
    fps5: bool,
    encoding: Encoding,
    spacing: Option<usize>,
    progress: Box<dyn Progress + 'a>,
}

impl<'a> Converter<'a> {
    pub fn new(tracking_root: &'a Path, output_root: &'a Path) -> Self {
        Converter {
            tracking_root,
            output_root,
            fps5: false,
            encoding: Encoding::Efficient,
            spacing: None,
            progress: Box::new(NoProgress),
        }
    }

    /// Convert the reduced-frame-rate capture in the `5fps/` subdirectory.
    pub fn fps5(mut self, fps5: bool) -> Self {
        self.fps5 = fps5;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Indent width in spaces for the output documents; `None` is compact.
    pub fn spacing(mut self, spacing: Option<usize>) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress + 'a>) -> Self {
        self.progress = progress;
        self
    }

    /// Decode every artifact of `match_id`, write the ball and team JSON
    /// documents, copy the metadata file byte for byte, and return the four
    /// output paths. A failed conversion may leave a partial destination
    /// file behind; nothing is cleaned up.
    pub fn convert(mut self, match_id: u64) -> Result<GamepackPaths, Error> {
        let inputs = GamepackPaths::locate(self.tracking_root, match_id, self.fps5);
        let outputs = GamepackPaths::locate_json(self.output_root, match_id, self.fps5);

        let progress = self.progress.as_mut();

        log::info!("converting ball frames for match {match_id}");
        let balls = decoder::read_ball_frames(&inputs.ball, progress)?;
        progress.begin("writing", balls.len());
        json::save_ball_frames(&outputs.ball, &balls, self.encoding, self.spacing)?;
        progress.finish();

        log::info!("converting home team frames for match {match_id}");
        let home = decoder::read_team_frames(&inputs.home, progress)?;
        progress.begin("writing", home.len());
        json::save_team_frames(&outputs.home, &home, self.encoding, self.spacing)?;
        progress.finish();

        log::info!("converting away team frames for match {match_id}");
        let away = decoder::read_team_frames(&inputs.away, progress)?;
        progress.begin("writing", away.len());
        json::save_team_frames(&outputs.away, &away, self.encoding, self.spacing)?;
        progress.finish();

        // metadata is already JSON and moves across verbatim
        fs::copy(&inputs.metadata, &outputs.metadata)
            .map_err(|e| Error::io(&outputs.metadata, e))?;

        Ok(outputs)
    }
}

/// Convert a single ball artifact to JSON, independent of the gamepack
/// layout.
pub fn convert_ball_file(
    input: &Path,
    output: &Path,
    encoding: Encoding,
    spacing: Option<usize>,
) -> Result<(), Error> {
    let frames = decoder::read_ball_frames(input, &mut NoProgress)?;
    json::save_ball_frames(output, &frames, encoding, spacing)
}

/// Convert a single home or away team artifact to JSON, independent of the
/// gamepack layout.
pub fn convert_team_file(
    input: &Path,
    output: &Path,
    encoding: Encoding,
    spacing: Option<usize>,
) -> Result<(), Error> {
    let frames = decoder::read_team_frames(input, &mut NoProgress)?;
    json::save_team_frames(output, &frames, encoding, spacing)
}

/// Convert a whole gamepack to compact positional JSON.
pub fn convert_match_to_efficient_json(
    tracking_root: &Path,
    match_id: u64,
    output_root: &Path,
    fps5: bool,
) -> Result<GamepackPaths, Error> {
    Converter::new(tracking_root, output_root)
        .fps5(fps5)
        .convert(match_id)
}

/// Convert a whole gamepack to keyed JSON indented by `spacing` spaces.
pub fn convert_match_to_readable_json(
    tracking_root: &Path,
    match_id: u64,
    output_root: &Path,
    fps5: bool,
    spacing: usize,
) -> Result<GamepackPaths, Error> {
    Converter::new(tracking_root, output_root)
        .fps5(fps5)
        .encoding(Encoding::Readable)
        .spacing(Some(spacing))
        .convert(match_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_artifacts_in_match_folder() {
        let paths = GamepackPaths::locate(Path::new("TRACKING"), 1_059_714, false);
        assert_eq!(
            paths.ball,
            Path::new("TRACKING/1059714/1059714.BALL.msgpack")
        );
        assert_eq!(
            paths.metadata,
            Path::new("TRACKING/1059714/1059714.METADATA.json")
        );
    }

    #[test]
    fn fps5_inserts_subdirectory() {
        let paths = GamepackPaths::locate(Path::new("TRACKING"), 919_268, true);
        assert_eq!(
            paths.home,
            Path::new("TRACKING/919268/5fps/919268.HOME.msgpack")
        );
    }

    #[test]
    fn json_outputs_mirror_the_layout() {
        let paths = GamepackPaths::locate_json(Path::new("JSON"), 919_268, true);
        assert_eq!(paths.away, Path::new("JSON/919268/5fps/919268.AWAY.json"));
        assert_eq!(
            paths.metadata,
            Path::new("JSON/919268/5fps/919268.METADATA.json")
        );
    }
}
