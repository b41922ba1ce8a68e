//! # JSON projection
//!
//! Decoded records serialize to JSON in one of two shapes:
//!
//! - [`Encoding::Efficient`]: positional arrays in exact binary field order,
//!   e.g. a ball frame becomes `[3,47,-17,32,true,"H",2464660512]`. No field
//!   names are present; consumers must know the schema out-of-band.
//! - [`Encoding::Readable`]: objects with fixed uppercase keys, e.g.
//!   `{"FRAMEID":3,"XPOS":47,...}`.
//!
//! Neither shape is the natural serde rendition of the model structs, so the
//! models stay serde-free and thin wrapper types here carry hand-written
//! `Serialize` impls. Output is always a single JSON document holding the
//! full top-level array, optionally pretty-printed with a caller-chosen
//! indent width.
use crate::errors::Error;
use crate::models::{Ball, Player, Team};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Which of the two JSON shapes to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Positional arrays, schema known out-of-band.
    Efficient,
    /// Keyed objects with fixed uppercase field names.
    Readable,
}

struct EfficientBall<'a>(&'a Ball);

impl Serialize for EfficientBall<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let b = self.0;
        let mut seq = serializer.serialize_seq(Some(7))?;
        seq.serialize_element(&b.frame_id)?;
        seq.serialize_element(&b.x_pos)?;
        seq.serialize_element(&b.y_pos)?;
        seq.serialize_element(&b.z_pos)?;
        seq.serialize_element(&b.alive)?;
        seq.serialize_element(&b.owning_team)?;
        seq.serialize_element(&b.owning_player_id)?;
        seq.end()
    }
}

struct ReadableBall<'a>(&'a Ball);

impl Serialize for ReadableBall<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let b = self.0;
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry("FRAMEID", &b.frame_id)?;
        map.serialize_entry("XPOS", &b.x_pos)?;
        map.serialize_entry("YPOS", &b.y_pos)?;
        map.serialize_entry("ZPOS", &b.z_pos)?;
        map.serialize_entry("ALIVE", &b.alive)?;
        map.serialize_entry("TEAM", &b.owning_team)?;
        map.serialize_entry("PLAYERID", &b.owning_player_id)?;
        map.end()
    }
}

struct EfficientPlayer<'a>(&'a Player);

impl Serialize for EfficientPlayer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let p = self.0;
        let mut seq = serializer.serialize_seq(Some(6))?;
        seq.serialize_element(&p.team)?;
        seq.serialize_element(&p.player_id)?;
        seq.serialize_element(&p.shirt_num)?;
        seq.serialize_element(&p.x_pos)?;
        seq.serialize_element(&p.y_pos)?;
        seq.serialize_element(&p.ball_owned)?;
        seq.end()
    }
}

struct ReadablePlayer<'a>(&'a Player);

impl Serialize for ReadablePlayer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let p = self.0;
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("TEAM", &p.team)?;
        map.serialize_entry("PLAYERID", &p.player_id)?;
        map.serialize_entry("SHIRT", &p.shirt_num)?;
        map.serialize_entry("XPOS", &p.x_pos)?;
        map.serialize_entry("YPOS", &p.y_pos)?;
        map.serialize_entry("BALL", &p.ball_owned)?;
        map.end()
    }
}

struct EfficientPlayers<'a>(&'a [Player]);

impl Serialize for EfficientPlayers<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(EfficientPlayer))
    }
}

struct ReadablePlayers<'a>(&'a [Player]);

impl Serialize for ReadablePlayers<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ReadablePlayer))
    }
}

struct EfficientTeam<'a>(&'a Team);

impl Serialize for EfficientTeam<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let t = self.0;
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&t.frame_id)?;
        seq.serialize_element(&t.ball_owned)?;
        seq.serialize_element(&EfficientPlayers(&t.players))?;
        seq.end()
    }
}

struct ReadableTeam<'a>(&'a Team);

impl Serialize for ReadableTeam<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let t = self.0;
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("FRAMEID", &t.frame_id)?;
        map.serialize_entry("BALL", &t.ball_owned)?;
        map.serialize_entry("PLAYERS", &ReadablePlayers(&t.players))?;
        map.end()
    }
}

/// The full ball document: one JSON array with an element per frame.
struct BallDocument<'a> {
    frames: &'a [Ball],
    encoding: Encoding,
}

impl Serialize for BallDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.frames.len()))?;
        for ball in self.frames {
            match self.encoding {
                Encoding::Efficient => seq.serialize_element(&EfficientBall(ball))?,
                Encoding::Readable => seq.serialize_element(&ReadableBall(ball))?,
            }
        }
        seq.end()
    }
}

/// The full team document: one JSON array with an element per frame.
struct TeamDocument<'a> {
    frames: &'a [Team],
    encoding: Encoding,
}

impl Serialize for TeamDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.frames.len()))?;
        for team in self.frames {
            match self.encoding {
                Encoding::Efficient => seq.serialize_element(&EfficientTeam(team))?,
                Encoding::Readable => seq.serialize_element(&ReadableTeam(team))?,
            }
        }
        seq.end()
    }
}

fn to_writer<W: Write, T: Serialize>(
    writer: W,
    value: &T,
    spacing: Option<usize>,
) -> Result<(), serde_json::Error> {
    match spacing {
        None => serde_json::to_writer(writer, value),
        Some(width) => {
            let indent = vec![b' '; width];
            let formatter = PrettyFormatter::with_indent(&indent);
            let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
            value.serialize(&mut ser)
        }
    }
}

/// Serialize ball frames into `writer` as one JSON document. `spacing` is
/// the indent width in spaces; `None` produces compact output.
pub fn write_ball_frames<W: Write>(
    writer: W,
    frames: &[Ball],
    encoding: Encoding,
    spacing: Option<usize>,
) -> Result<(), serde_json::Error> {
    to_writer(writer, &BallDocument { frames, encoding }, spacing)
}

/// Serialize team frames into `writer` as one JSON document.
pub fn write_team_frames<W: Write>(
    writer: W,
    frames: &[Team],
    encoding: Encoding,
    spacing: Option<usize>,
) -> Result<(), serde_json::Error> {
    to_writer(writer, &TeamDocument { frames, encoding }, spacing)
}

fn create_output(path: &Path) -> Result<BufWriter<File>, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(path, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    Ok(BufWriter::new(file))
}

fn json_to_io(err: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Write ball frames to `path`, creating parent directories as needed and
/// truncating any existing file.
pub fn save_ball_frames(
    path: &Path,
    frames: &[Ball],
    encoding: Encoding,
    spacing: Option<usize>,
) -> Result<(), Error> {
    let mut writer = create_output(path)?;
    write_ball_frames(&mut writer, frames, encoding, spacing)
        .map_err(|e| Error::io(path, json_to_io(e)))?;
    writer.flush().map_err(|e| Error::io(path, e))
}

/// Write team frames to `path`, creating parent directories as needed and
/// truncating any existing file.
pub fn save_team_frames(
    path: &Path,
    frames: &[Team],
    encoding: Encoding,
    spacing: Option<usize>,
) -> Result<(), Error> {
    let mut writer = create_output(path)?;
    write_team_frames(&mut writer, frames, encoding, spacing)
        .map_err(|e| Error::io(path, json_to_io(e)))?;
    writer.flush().map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ball() -> Ball {
        Ball {
            frame_id: 3,
            x_pos: 47,
            y_pos: -17,
            z_pos: 32,
            alive: true,
            owning_team: 'H',
            owning_player_id: 2_464_660_512,
        }
    }

    fn sample_team() -> Team {
        Team {
            frame_id: 3,
            ball_owned: true,
            players: vec![
                Player {
                    team: 'A',
                    player_id: 10,
                    shirt_num: 7,
                    x_pos: 5,
                    y_pos: 20,
                    ball_owned: false,
                },
                Player {
                    team: 'A',
                    player_id: 11,
                    shirt_num: 9,
                    x_pos: -4,
                    y_pos: 1,
                    ball_owned: true,
                },
            ],
        }
    }

    fn ball_json(frames: &[Ball], encoding: Encoding, spacing: Option<usize>) -> String {
        let mut out = Vec::new();
        write_ball_frames(&mut out, frames, encoding, spacing).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn team_json(frames: &[Team], encoding: Encoding, spacing: Option<usize>) -> String {
        let mut out = Vec::new();
        write_team_frames(&mut out, frames, encoding, spacing).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn efficient_ball_matches_binary_field_order() {
        let json = ball_json(&[sample_ball()], Encoding::Efficient, None);
        assert_eq!(json, r#"[[3,47,-17,32,true,"H",2464660512]]"#);
    }

    #[test]
    fn readable_ball_uses_fixed_keys() {
        let json = ball_json(&[sample_ball()], Encoding::Readable, None);
        assert_eq!(
            json,
            r#"[{"FRAMEID":3,"XPOS":47,"YPOS":-17,"ZPOS":32,"ALIVE":true,"TEAM":"H","PLAYERID":2464660512}]"#
        );
    }

    #[test]
    fn efficient_team_nests_player_arrays() {
        let json = team_json(&[sample_team()], Encoding::Efficient, None);
        assert_eq!(
            json,
            r#"[[3,true,[["A",10,7,5,20,false],["A",11,9,-4,1,true]]]]"#
        );
    }

    #[test]
    fn readable_team_nests_keyed_players() {
        let json = team_json(&[sample_team()], Encoding::Readable, None);
        assert_eq!(
            json,
            concat!(
                r#"[{"FRAMEID":3,"BALL":true,"PLAYERS":["#,
                r#"{"TEAM":"A","PLAYERID":10,"SHIRT":7,"XPOS":5,"YPOS":20,"BALL":false},"#,
                r#"{"TEAM":"A","PLAYERID":11,"SHIRT":9,"XPOS":-4,"YPOS":1,"BALL":true}]}]"#
            )
        );
    }

    #[test]
    fn spacing_controls_indentation() {
        let frames = [sample_ball()];
        let compact = ball_json(&frames, Encoding::Efficient, None);
        let spaced = ball_json(&frames, Encoding::Efficient, Some(2));

        assert!(!compact.contains('\n'));
        assert!(spaced.contains("\n  "));

        let reparsed: serde_json::Value = serde_json::from_str(&spaced).unwrap();
        let original: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn projection_is_idempotent() {
        let frames = [sample_ball(), sample_ball()];
        let first = ball_json(&frames, Encoding::Readable, Some(4));
        let second = ball_json(&frames, Encoding::Readable, Some(4));
        assert_eq!(first, second);
    }
}
