mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use hangword::{
    config::{Config, ConfigStore, FileConfigStore},
    dataset::Dataset,
    game::{Game, GameEvent, Stage},
    picker::{RandomPicker, WordPicker},
    runtime::{EventSource, TerminalEvents, UiEvent},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const POLL_INTERVAL_MS: u64 = 100;

/// terminal word-guessing game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret word one letter at a time. Three wrong guesses end the game; every solved word scores 100 points and rolls straight into the next round."
)]
pub struct Cli {
    /// path to a custom dataset (json mapping category names to word lists)
    #[clap(short, long)]
    dataset: Option<PathBuf>,

    /// play words from a single category only
    #[clap(short, long)]
    category: Option<String>,

    /// seed the word picker for a reproducible word sequence
    #[clap(long)]
    seed: Option<u64>,

    /// do not remember dataset/category choices in the config file
    #[clap(long)]
    no_save: bool,
}

pub struct App {
    pub game: Game,
}

impl App {
    pub fn new(cli: &Cli, config: &Config) -> Result<Self, Box<dyn Error>> {
        let dataset_path = cli.dataset.clone().or_else(|| config.dataset.clone());
        let mut dataset = match &dataset_path {
            Some(path) => Dataset::from_path(path)?,
            None => Dataset::embedded(),
        };

        if let Some(category) = cli.category.as_ref().or(config.category.as_ref()) {
            dataset = dataset.restricted_to(category)?;
        }

        let picker: Box<dyn WordPicker> = match cli.seed {
            Some(seed) => Box::new(RandomPicker::seeded(seed)),
            None => Box::new(RandomPicker::new()),
        };

        Ok(Self {
            game: Game::new(dataset, picker)?,
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = store.load();

    // Build the session before touching the terminal so dataset errors
    // print as plain messages.
    let mut app = App::new(&cli, &config)?;

    if !cli.no_save {
        let merged = Config {
            dataset: cli.dataset.clone().or(config.dataset),
            category: cli.category.clone().or(config.category),
        };
        let _ = store.save(&merged);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app, &mut TerminalEvents);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

enum KeyAction {
    Quit,
    Game(GameEvent),
    Pass,
}

fn key_action(stage: Stage, key: &KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if key.code == KeyCode::Esc {
        return KeyAction::Quit;
    }

    match (stage, key.code) {
        (Stage::Start, KeyCode::Enter) => KeyAction::Game(GameEvent::Start),
        (Stage::Start, KeyCode::Char('q')) => KeyAction::Quit,
        // During play every character key is a guess; the game drops
        // anything that is not a letter.
        (Stage::Playing, KeyCode::Char(c)) => KeyAction::Game(GameEvent::Guess(c)),
        (Stage::Ended, KeyCode::Enter) | (Stage::Ended, KeyCode::Char('r')) => {
            KeyAction::Game(GameEvent::Retry)
        }
        (Stage::Ended, KeyCode::Char('q')) => KeyAction::Quit,
        _ => KeyAction::Pass,
    }
}

fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut E,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let Some(event) = events.next_event(Duration::from_millis(POLL_INTERVAL_MS))? else {
            continue;
        };

        match event {
            UiEvent::Resize => {}
            UiEvent::Key(key) => match key_action(app.game.stage, &key) {
                KeyAction::Quit => break,
                KeyAction::Game(game_event) => {
                    app.game.apply(game_event)?;
                }
                KeyAction::Pass => {}
            },
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangword::picker::{Pick, ScriptedPicker};
    use hangword::runtime::ScriptedEvents;
    use ratatui::backend::TestBackend;

    fn scripted_app(picks: Vec<Pick>) -> App {
        let dataset =
            Dataset::from_json(r#"{ "name": "t", "categories": { "animals": ["cat", "dog"] } }"#)
                .unwrap();
        let game = Game::new(dataset, Box::new(ScriptedPicker::new(picks))).unwrap();
        App { game }
    }

    fn cat_pick() -> Pick {
        Pick {
            word: "cat".to_string(),
            category: "animals".to_string(),
        }
    }

    #[test]
    fn enter_starts_only_from_the_start_screen() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        assert!(matches!(
            key_action(Stage::Start, &enter),
            KeyAction::Game(GameEvent::Start)
        ));
        assert!(matches!(key_action(Stage::Playing, &enter), KeyAction::Pass));
        assert!(matches!(
            key_action(Stage::Ended, &enter),
            KeyAction::Game(GameEvent::Retry)
        ));
    }

    #[test]
    fn characters_are_guesses_only_while_playing() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        assert!(matches!(key_action(Stage::Start, &key), KeyAction::Pass));
        assert!(matches!(
            key_action(Stage::Playing, &key),
            KeyAction::Game(GameEvent::Guess('a'))
        ));
        assert!(matches!(key_action(Stage::Ended, &key), KeyAction::Pass));
    }

    #[test]
    fn escape_and_ctrl_c_quit_everywhere() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        for stage in [Stage::Start, Stage::Playing, Stage::Ended] {
            assert!(matches!(key_action(stage, &esc), KeyAction::Quit));
            assert!(matches!(key_action(stage, &ctrl_c), KeyAction::Quit));
        }
    }

    #[test]
    fn run_plays_a_full_winning_round() {
        let mut app = scripted_app(vec![
            cat_pick(),
            Pick {
                word: "dog".to_string(),
                category: "animals".to_string(),
            },
        ]);

        let mut events = ScriptedEvents::default();
        events.push_key(KeyCode::Enter);
        events.type_str("cat");
        events.push_key(KeyCode::Esc);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        run(&mut terminal, &mut app, &mut events).unwrap();

        assert_eq!(app.game.score, 100);
        assert_eq!(app.game.stage, Stage::Playing);
        assert_eq!(app.game.picked_word, "dog");
    }

    #[test]
    fn run_reaches_game_over_and_retries() {
        let mut app = scripted_app(vec![cat_pick()]);

        let mut events = ScriptedEvents::default();
        events.push_key(KeyCode::Enter);
        events.type_str("xyz");
        events.push_key(KeyCode::Enter); // retry from the game over screen
        events.push_key(KeyCode::Esc);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        run(&mut terminal, &mut app, &mut events).unwrap();

        assert_eq!(app.game.stage, Stage::Start);
        assert_eq!(app.game.score, 0);
        assert_eq!(app.game.guesses_remaining, hangword::game::MAX_GUESSES);
    }

    #[test]
    fn app_new_rejects_unknown_category() {
        let cli = Cli {
            dataset: None,
            category: Some("spaceships".to_string()),
            seed: None,
            no_save: true,
        };

        assert!(App::new(&cli, &Config::default()).is_err());
    }

    #[test]
    fn app_new_with_seed_is_reproducible() {
        let cli = Cli {
            dataset: None,
            category: None,
            seed: Some(9),
            no_save: true,
        };

        let mut a = App::new(&cli, &Config::default()).unwrap();
        let mut b = App::new(&cli, &Config::default()).unwrap();
        a.game.start().unwrap();
        b.game.start().unwrap();

        assert_eq!(a.game.picked_word, b.game.picked_word);
        assert_eq!(a.game.picked_category, b.game.picked_category);
    }
}
