use serde::Serialize;

// Result of a toggle: whether the viewer now holds a vote.
#[derive(Debug, Serialize)]
pub struct VoteState {
    pub voted: bool,
}
