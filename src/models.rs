//! # Models
//!
//! Here lie the data structures that a gamepack is decoded into. The binary
//! artifacts store positional arrays, so none of these types derive serde
//! traits directly; the decoder maps raw records into them and the two JSON
//! projections live in [`crate::json`].
//!
//! A match owns three parallel per-frame sequences (ball, home team, away
//! team). They are nominally the same length; when they are not, the usable
//! frame count degrades to the shorter sequence with a logged diagnostic
//! rather than an error.
use std::fmt;
use std::slice;

/// Per-frame ball state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub frame_id: u64,
    pub x_pos: i32,
    pub y_pos: i32,
    pub z_pos: i32,
    pub alive: bool,

    /// Single character team code: 'H' home, 'A' away, 'U' undefined. The
    /// decoder preserves whatever byte the artifact carried, so other codes
    /// are representable.
    pub owning_team: char,
    pub owning_player_id: u64,
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame {}, ball alive: {}, pos: ({}, {}, {})",
            self.frame_id, self.alive, self.x_pos, self.y_pos, self.z_pos
        )
    }
}

/// One player's state within a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub team: char,
    pub player_id: u64,
    pub shirt_num: u32,
    pub x_pos: i32,
    pub y_pos: i32,
    pub ball_owned: bool,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlayerID: {}, Shirt: {}, ({},{})",
            self.player_id, self.shirt_num, self.x_pos, self.y_pos
        )
    }
}

/// One team's state within a single frame: a possession flag and the players
/// present, in artifact order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub frame_id: u64,
    pub ball_owned: bool,
    pub players: Vec<Player>,
}

impl Team {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterate the players in stored (artifact) order.
    pub fn players(&self) -> slice::Iter<'_, Player> {
        self.players.iter()
    }
}

impl<'a> IntoIterator for &'a Team {
    type Item = &'a Player;
    type IntoIter = slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame {}, Players: {}", self.frame_id, self.players.len())
    }
}

/// A contiguous span of frames making up one period of the match. Period ids
/// are nominally 1 through 5 (two halves, two extra-time periods, shootout).
/// `start_frame <= end_frame` is expected of well-formed data but not
/// enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub period_id: u8,
    pub start_frame: u64,
    pub end_frame: u64,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PeriodID: {}, [{},{}]",
            self.period_id, self.start_frame, self.end_frame
        )
    }
}

/// Match-level descriptor loaded from the `.METADATA.json` side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub match_id: u64,
    pub date: String,
    pub fps: f64,
    /// Pitch width and height in metres.
    pub pitch_dims: [f64; 2],
    pub periods: Vec<Period>,
    pub opta_f7: bool,
    pub opta_f24: bool,
    pub tracking_provider: String,
}

/// A fully loaded match: the three parallel frame sequences plus metadata.
///
/// `official_frames` exists in the gamepack data model but no artifact for it
/// is shipped, so the loader leaves it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub match_id: u64,
    pub ball_frames: Vec<Ball>,
    pub home_frames: Vec<Team>,
    pub away_frames: Vec<Team>,
    pub official_frames: Vec<Team>,
    pub metadata: Metadata,
}

impl Match {
    /// The number of usable frames.
    ///
    /// When the ball/home/away sequences agree this is their shared length.
    /// When they disagree a "uneven list lengths" warning is logged and the
    /// historical selection rule applies: the ball length if the ball
    /// sequence is strictly shorter than both team sequences, otherwise the
    /// shorter of the two team sequences. Note that for orderings like
    /// ball=9, home=10, away=8 the rule compares only the team lengths and
    /// returns 8 rather than a guaranteed three-way minimum; this matches
    /// the behaviour existing consumers were built against.
    pub fn frame_count(&self) -> usize {
        let balls = self.ball_frames.len();
        let home = self.home_frames.len();
        let away = self.away_frames.len();

        if balls == home && balls == away {
            return balls;
        }

        log::warn!(
            "uneven list lengths in match {}: ball={}, home={}, away={}",
            self.match_id,
            balls,
            home,
            away
        );

        if balls < home && balls < away {
            balls
        } else if home < away {
            home
        } else {
            away
        }
    }

    /// Iterate synchronized `(ball, home, away)` triples for frames
    /// `0..frame_count()`. The iterator is finite and a fresh one can be
    /// obtained at any time.
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            match_: self,
            index: 0,
            len: self.frame_count(),
        }
    }

    /// Random access to one synchronized frame. Returns `None` past
    /// `frame_count()`.
    pub fn frame(&self, idx: usize) -> Option<Frame<'_>> {
        if idx < self.frame_count() {
            Some(Frame {
                frame_id: self.ball_frames[idx].frame_id,
                ball: &self.ball_frames[idx],
                home: &self.home_frames[idx],
                away: &self.away_frames[idx],
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Match {} has {} frames",
            self.match_id,
            self.ball_frames.len()
        )
    }
}

impl<'a> IntoIterator for &'a Match {
    type Item = (&'a Ball, &'a Team, &'a Team);
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames()
    }
}

/// One synchronized frame of a match, borrowed from the owning [`Match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub frame_id: u64,
    pub ball: &'a Ball,
    pub home: &'a Team,
    pub away: &'a Team,
}

impl Frame<'_> {
    pub fn is_alive(&self) -> bool {
        self.ball.alive
    }
}

/// Iterator over the synchronized frames of a [`Match`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    match_: &'a Match,
    index: usize,
    len: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = (&'a Ball, &'a Team, &'a Team);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.len {
            let i = self.index;
            self.index += 1;
            Some((
                &self.match_.ball_frames[i],
                &self.match_.home_frames[i],
                &self.match_.away_frames[i],
            ))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(frame_id: u64) -> Ball {
        Ball {
            frame_id,
            x_pos: 0,
            y_pos: 0,
            z_pos: 0,
            alive: true,
            owning_team: 'U',
            owning_player_id: 0,
        }
    }

    fn team(frame_id: u64, players: usize) -> Team {
        Team {
            frame_id,
            ball_owned: false,
            players: (0..players)
                .map(|i| Player {
                    team: 'H',
                    player_id: i as u64,
                    shirt_num: i as u32 + 1,
                    x_pos: 0,
                    y_pos: 0,
                    ball_owned: false,
                })
                .collect(),
        }
    }

    fn metadata() -> Metadata {
        Metadata {
            match_id: 1,
            date: String::new(),
            fps: 25.0,
            pitch_dims: [105.0, 68.0],
            periods: vec![],
            opta_f7: false,
            opta_f24: false,
            tracking_provider: String::new(),
        }
    }

    fn match_with_lengths(balls: usize, home: usize, away: usize) -> Match {
        Match {
            match_id: 1,
            ball_frames: (0..balls as u64).map(ball).collect(),
            home_frames: (0..home as u64).map(|i| team(i, 2)).collect(),
            away_frames: (0..away as u64).map(|i| team(i, 2)).collect(),
            official_frames: Vec::new(),
            metadata: metadata(),
        }
    }

    #[test]
    fn frame_count_even_lengths() {
        assert_eq!(match_with_lengths(10, 10, 10).frame_count(), 10);
    }

    #[test]
    fn frame_count_ball_shortest() {
        assert_eq!(match_with_lengths(8, 10, 9).frame_count(), 8);
    }

    #[test]
    fn frame_count_home_shortest() {
        assert_eq!(match_with_lengths(10, 7, 9).frame_count(), 7);
    }

    #[test]
    fn frame_count_away_shortest() {
        assert_eq!(match_with_lengths(10, 9, 8).frame_count(), 8);
    }

    #[test]
    fn iteration_is_bounded_and_restartable() {
        let m = match_with_lengths(10, 10, 10);
        assert_eq!(m.frames().count(), 10);

        let ids: Vec<u64> = m.frames().map(|(b, _, _)| b.frame_id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<u64>>());

        // a second pass starts from the beginning
        assert_eq!(m.frames().count(), 10);
    }

    #[test]
    fn iteration_stops_at_usable_length() {
        let m = match_with_lengths(8, 10, 9);
        assert_eq!(m.frames().count(), 8);
    }

    #[test]
    fn indexed_frame_access() {
        let m = match_with_lengths(5, 5, 5);
        let frame = m.frame(4).unwrap();
        assert_eq!(frame.frame_id, 4);
        assert!(frame.is_alive());
        assert!(m.frame(5).is_none());
    }

    #[test]
    fn team_players_keep_stored_order() {
        let t = team(0, 11);
        assert_eq!(t.player_count(), 11);
        let shirts: Vec<u32> = t.players().map(|p| p.shirt_num).collect();
        assert_eq!(shirts, (1..=11).collect::<Vec<u32>>());
    }
}
