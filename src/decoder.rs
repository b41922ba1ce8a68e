//! # Decoder
//!
//! The three binary artifacts of a gamepack are msgpack documents whose top
//! level is an array of fixed-arity records. Field meaning is positional, so
//! each record shape gets a raw tuple struct here that serde decodes from
//! the msgpack array, and the raw record is then mapped into its typed model.
//! A record with the wrong arity or a field of the wrong type fails
//! deserialization, which surfaces as [`DecodeError::Msgpack`].
//!
//! Metadata is the odd one out: a UTF-8 JSON document whose top level is a
//! single-element array wrapping the effective object.
use crate::errors::{DecodeError, Error};
use crate::models::{Ball, Metadata, Period, Player, Team};
use crate::progress::Progress;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// `[frame_id, x, y, z, alive, team_code_byte, owning_player_id]`
#[derive(Deserialize)]
struct RawBall(u64, i32, i32, i32, bool, u8, u64);

impl From<RawBall> for Ball {
    fn from(raw: RawBall) -> Self {
        Ball {
            frame_id: raw.0,
            x_pos: raw.1,
            y_pos: raw.2,
            z_pos: raw.3,
            alive: raw.4,
            owning_team: char::from(raw.5),
            owning_player_id: raw.6,
        }
    }
}

/// `[team_code_byte, player_id, shirt_num, x, y, ball_owned]`
#[derive(Deserialize)]
struct RawPlayer(u8, u64, u32, i32, i32, bool);

impl From<RawPlayer> for Player {
    fn from(raw: RawPlayer) -> Self {
        Player {
            team: char::from(raw.0),
            player_id: raw.1,
            shirt_num: raw.2,
            x_pos: raw.3,
            y_pos: raw.4,
            ball_owned: raw.5,
        }
    }
}

/// `[frame_id, team_ball_owned, [player segments...]]`
#[derive(Deserialize)]
struct RawTeam(u64, bool, Vec<RawPlayer>);

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        Team {
            frame_id: raw.0,
            ball_owned: raw.1,
            players: raw.2.into_iter().map(Player::from).collect(),
        }
    }
}

fn map_records<R, T: From<R>>(raw: Vec<R>, progress: &mut dyn Progress) -> Vec<T> {
    progress.begin("reading", raw.len());
    let records = raw
        .into_iter()
        .map(|r| {
            progress.tick();
            T::from(r)
        })
        .collect();
    progress.finish();
    records
}

/// Decode a `.BALL.msgpack` buffer into ball frames, order preserved.
pub fn decode_ball_frames(buf: &[u8]) -> Result<Vec<Ball>, DecodeError> {
    let raw: Vec<RawBall> = rmp_serde::from_slice(buf)?;
    Ok(raw.into_iter().map(Ball::from).collect())
}

/// Decode a `.HOME.msgpack` or `.AWAY.msgpack` buffer into team frames,
/// frame and player order preserved.
pub fn decode_team_frames(buf: &[u8]) -> Result<Vec<Team>, DecodeError> {
    let raw: Vec<RawTeam> = rmp_serde::from_slice(buf)?;
    Ok(raw.into_iter().map(Team::from).collect())
}

/// Read and decode a ball artifact, reporting one progress tick per frame.
pub fn read_ball_frames(path: &Path, progress: &mut dyn Progress) -> Result<Vec<Ball>, Error> {
    let buf = fs::read(path).map_err(|e| Error::io(path, e))?;
    let raw: Vec<RawBall> =
        rmp_serde::from_slice(&buf).map_err(|e| Error::decode(path, e.into()))?;
    Ok(map_records(raw, progress))
}

/// Read and decode a home or away team artifact, reporting one progress tick
/// per frame.
pub fn read_team_frames(path: &Path, progress: &mut dyn Progress) -> Result<Vec<Team>, Error> {
    let buf = fs::read(path).map_err(|e| Error::io(path, e))?;
    let raw: Vec<RawTeam> =
        rmp_serde::from_slice(&buf).map_err(|e| Error::decode(path, e.into()))?;
    Ok(map_records(raw, progress))
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(rename = "MATCHID")]
    match_id: u64,
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "FPS")]
    fps: f64,
    #[serde(rename = "PITCH_DIMS")]
    pitch_dims: [f64; 2],
    #[serde(rename = "PERIODS")]
    periods: Vec<BTreeMap<String, [u64; 2]>>,
    #[serde(rename = "OPTA_F7")]
    opta_f7: bool,
    #[serde(rename = "OPTA_F24")]
    opta_f24: bool,
    #[serde(rename = "TRACKING_PROVIDER")]
    tracking_provider: String,
}

/// Derive one [`Period`] from a period object.
///
/// The object should hold exactly one entry keyed by the period id. Some
/// malformed documents carry extra keys; in that case the id is whichever
/// key is a single digit in '0'..='5'. No matching key is a decode failure
/// rather than a silently invalid period.
fn resolve_period(obj: &BTreeMap<String, [u64; 2]>) -> Result<Period, DecodeError> {
    let entry = if obj.len() == 1 {
        obj.iter().next()
    } else {
        obj.iter().find(|(key, _)| {
            let mut chars = key.chars();
            matches!((chars.next(), chars.next()), (Some('0'..='5'), None))
        })
    };

    let (key, span) = entry.ok_or(DecodeError::UnresolvedPeriodId)?;
    let period_id = key
        .parse::<u8>()
        .map_err(|_| DecodeError::InvalidPeriodKey(key.clone()))?;

    Ok(Period {
        period_id,
        start_frame: span[0],
        end_frame: span[1],
    })
}

/// Decode a `.METADATA.json` buffer.
pub fn decode_metadata(buf: &[u8]) -> Result<Metadata, DecodeError> {
    let mut docs: Vec<RawMetadata> = serde_json::from_slice(buf)?;
    if docs.is_empty() {
        return Err(DecodeError::EmptyMetadata);
    }
    // the document's top level is an array; its first element is the
    // effective object
    let raw = docs.swap_remove(0);

    let periods = raw
        .periods
        .iter()
        .map(resolve_period)
        .collect::<Result<Vec<Period>, DecodeError>>()?;

    Ok(Metadata {
        match_id: raw.match_id,
        date: raw.date,
        fps: raw.fps,
        pitch_dims: raw.pitch_dims,
        periods,
        opta_f7: raw.opta_f7,
        opta_f24: raw.opta_f24,
        tracking_provider: raw.tracking_provider,
    })
}

/// Read and decode a metadata artifact.
pub fn read_metadata(path: &Path) -> Result<Metadata, Error> {
    let buf = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode_metadata(&buf).map_err(|e| Error::decode(path, e))
}
