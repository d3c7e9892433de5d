//! Hand landmark topology and per-frame hand tracking results.

mod result;

pub use result::{FrameResult, HandDetection};

/// The number of landmarks the hand tracking solution estimates per hand.
pub const NUM_LANDMARKS: usize = 21;

/// Whether a detected hand is a left or a right hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Classifies a handedness label emitted by the hand tracking solution.
    ///
    /// Only the exact label `"Left"` denotes a left hand, every other label is treated as a right
    /// hand.
    pub fn from_label(label: &str) -> Self {
        if label == "Left" {
            Self::Left
        } else {
            Self::Right
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    #[inline]
    pub fn is_left(&self) -> bool {
        *self == Self::Left
    }
}

/// Names for the hand landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// A skeletal edge between two landmarks, identified by their indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    start: usize,
    end: usize,
}

impl Connection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    const fn between(start: LandmarkIdx, end: LandmarkIdx) -> Self {
        Self::new(start as usize, end as usize)
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }
}

/// The skeleton topology of a hand.
pub const HAND_CONNECTIONS: &[Connection] = {
    use LandmarkIdx::*;
    &[
        // Palm:
        Connection::between(Wrist, ThumbCmc),
        Connection::between(Wrist, IndexFingerMcp),
        Connection::between(MiddleFingerMcp, RingFingerMcp),
        Connection::between(RingFingerMcp, PinkyMcp),
        Connection::between(IndexFingerMcp, MiddleFingerMcp),
        Connection::between(Wrist, PinkyMcp),
        // Thumb:
        Connection::between(ThumbCmc, ThumbMcp),
        Connection::between(ThumbMcp, ThumbIp),
        Connection::between(ThumbIp, ThumbTip),
        // Index:
        Connection::between(IndexFingerMcp, IndexFingerPip),
        Connection::between(IndexFingerPip, IndexFingerDip),
        Connection::between(IndexFingerDip, IndexFingerTip),
        // Middle:
        Connection::between(MiddleFingerMcp, MiddleFingerPip),
        Connection::between(MiddleFingerPip, MiddleFingerDip),
        Connection::between(MiddleFingerDip, MiddleFingerTip),
        // Ring:
        Connection::between(RingFingerMcp, RingFingerPip),
        Connection::between(RingFingerPip, RingFingerDip),
        Connection::between(RingFingerDip, RingFingerTip),
        // Pinky:
        Connection::between(PinkyMcp, PinkyPip),
        Connection::between(PinkyPip, PinkyDip),
        Connection::between(PinkyDip, PinkyTip),
    ]
};
