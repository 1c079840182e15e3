use crate::dataset::{Dataset, DatasetError};
use crate::picker::WordPicker;
use itertools::Itertools;

/// Wrong guesses allowed per session before the game ends.
pub const MAX_GUESSES: u32 = 3;
/// Points awarded for every solved word.
pub const POINTS_PER_WORD: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Stage {
    #[strum(serialize = "start")]
    Start,
    #[strum(serialize = "playing")]
    Playing,
    #[strum(serialize = "ended")]
    Ended,
}

/// Input accepted by the session reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Start,
    Guess(char),
    Retry,
}

/// What a call to [`Game::apply`] did, so callers can redraw or react
/// without diffing the whole state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A round was seeded and play began.
    Started,
    /// The guess revealed at least one letter.
    Hit,
    /// The guess was wrong and cost one remaining guess.
    Miss,
    /// The letter was already classified; nothing changed.
    Repeat,
    /// Input that does not lowercase to a single alphabetic char; dropped.
    Ignored,
    /// The guess completed the word: score went up and a new round started.
    RoundWon,
    /// The last remaining guess was spent; the session ended.
    GameOver,
    /// Score and guesses were reset and the session returned to the start screen.
    Reset,
    /// The event does not apply in the current stage.
    NoEffect,
}

/// A single game session: one secret word at a time, a running score
/// across rounds, and a shared pool of wrong guesses.
#[derive(Debug)]
pub struct Game {
    pub stage: Stage,
    pub picked_word: String,
    pub picked_category: String,
    /// Lowercased characters of the secret word, duplicates and order kept.
    pub letters: Vec<char>,
    /// Correct guesses in the order they were made. Membership is what
    /// matters; order is kept for display.
    pub guessed_letters: Vec<char>,
    /// Wrong guesses in the order they were made.
    pub wrong_letters: Vec<char>,
    pub guesses_remaining: u32,
    pub score: u32,
    dataset: Dataset,
    picker: Box<dyn WordPicker>,
}

impl Game {
    /// Validates the dataset up front so later picks cannot fail on an
    /// empty mapping.
    pub fn new(dataset: Dataset, picker: Box<dyn WordPicker>) -> Result<Self, DatasetError> {
        dataset.validate()?;
        Ok(Self {
            stage: Stage::Start,
            picked_word: String::new(),
            picked_category: String::new(),
            letters: vec![],
            guessed_letters: vec![],
            wrong_letters: vec![],
            guesses_remaining: MAX_GUESSES,
            score: 0,
            dataset,
            picker,
        })
    }

    /// Advance the session by one event. All derived checks (win, loss)
    /// run synchronously inside this call; there is nothing to poll
    /// afterwards.
    pub fn apply(&mut self, event: GameEvent) -> Result<Transition, DatasetError> {
        match (self.stage, event) {
            (Stage::Start, GameEvent::Start) => {
                self.seed_round()?;
                self.stage = Stage::Playing;
                Ok(Transition::Started)
            }
            (Stage::Playing, GameEvent::Guess(raw)) => self.guess(raw),
            (Stage::Ended, GameEvent::Retry) => {
                self.score = 0;
                self.guesses_remaining = MAX_GUESSES;
                self.stage = Stage::Start;
                Ok(Transition::Reset)
            }
            _ => Ok(Transition::NoEffect),
        }
    }

    pub fn start(&mut self) -> Result<Transition, DatasetError> {
        self.apply(GameEvent::Start)
    }

    pub fn guess_letter(&mut self, letter: char) -> Result<Transition, DatasetError> {
        self.apply(GameEvent::Guess(letter))
    }

    pub fn retry(&mut self) -> Result<Transition, DatasetError> {
        self.apply(GameEvent::Retry)
    }

    /// Unique letters of the secret word, first-seen order.
    pub fn unique_letters(&self) -> Vec<char> {
        self.letters.iter().copied().unique().collect()
    }

    /// True once every unique letter of a non-empty word has been guessed.
    pub fn word_solved(&self) -> bool {
        !self.letters.is_empty()
            && self
                .letters
                .iter()
                .unique()
                .all(|c| self.guessed_letters.contains(c))
    }

    pub fn is_revealed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&letter)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn seed_round(&mut self) -> Result<(), DatasetError> {
        let pick = self.picker.pick(&self.dataset)?;
        self.letters = pick.word.chars().flat_map(char::to_lowercase).collect();
        self.picked_word = pick.word;
        self.picked_category = pick.category;
        self.guessed_letters.clear();
        self.wrong_letters.clear();
        Ok(())
    }

    fn guess(&mut self, raw: char) -> Result<Transition, DatasetError> {
        let Some(letter) = normalize_guess(raw) else {
            return Ok(Transition::Ignored);
        };

        // A letter already classified is never reclassified.
        if self.guessed_letters.contains(&letter) || self.wrong_letters.contains(&letter) {
            return Ok(Transition::Repeat);
        }

        if self.letters.contains(&letter) {
            // Right guesses only ever extend the guessed set and check the
            // win condition; they cannot touch the guess counter.
            self.guessed_letters.push(letter);
            if self.word_solved() {
                self.score += POINTS_PER_WORD;
                // The session stays in Playing: the next word is seeded
                // silently, with the guess counter carried over.
                self.seed_round()?;
                return Ok(Transition::RoundWon);
            }
            Ok(Transition::Hit)
        } else {
            // Wrong guesses only ever decrement the counter and check the
            // loss condition; they cannot complete the guessed set.
            self.wrong_letters.push(letter);
            self.guesses_remaining -= 1;
            if self.guesses_remaining == 0 {
                self.guessed_letters.clear();
                self.wrong_letters.clear();
                self.stage = Stage::Ended;
                return Ok(Transition::GameOver);
            }
            Ok(Transition::Miss)
        }
    }
}

/// Lowercase the guess and keep it only if it stays a single alphabetic
/// character. Everything else is dropped rather than rejected loudly.
fn normalize_guess(raw: char) -> Option<char> {
    let mut lower = raw.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l.is_alphabetic() => Some(l),
        _ => None,
    }
}
