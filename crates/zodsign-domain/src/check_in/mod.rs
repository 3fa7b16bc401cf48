mod credential;
mod interpreter;
mod mood;
mod page;
mod value_objects;

#[cfg(test)]
mod value_objects_test;

pub use credential::Credential;
pub use interpreter::{
    extract_root_text, ResponseInterpreter, ResponsePhrases, ALREADY_CHECKED_IN,
    NO_EMBEDDED_TEXT, NO_RECOGNIZABLE_SIGNAL,
};
pub use mood::{MoodCatalog, DEFAULT_MOODS};
pub use page::{
    FormHash, PageMarkers, SessionStatus, DEFAULT_AUTHENTICATED_MARKER,
    DEFAULT_UNAUTHENTICATED_MARKER,
};
pub use value_objects::{CheckInOutcome, Reward};
