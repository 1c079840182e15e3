use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;
use hangword::game::{Game, Stage};

const HORIZONTAL_MARGIN: u16 = 5;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn hint() -> Style {
    Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = &self.game;

        let lines = match game.stage {
            Stage::Start => start_lines(game),
            Stage::Playing => board_lines(game),
            Stage::Ended => game_over_lines(game),
        };

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let widest = lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref().width())
                    .sum::<usize>()
            })
            .max()
            .unwrap_or(0);

        let occupied = lines.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length((area.height.saturating_sub(occupied)) / 2),
                    Constraint::Length(occupied),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        let widget = Paragraph::new(lines)
            .alignment(if widest <= max_chars_per_line as usize {
                // when everything fits on its line, centering gives a nice
                // zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });

        widget.render(chunks[1], buf);
    }
}

fn start_lines(game: &Game) -> Vec<Line<'static>> {
    let dataset = game.dataset();
    vec![
        Line::from(Span::styled(
            "HANGWORD",
            bold().fg(Color::Magenta),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "{} categories · {} words · {} wrong guesses allowed",
                dataset.categories.len(),
                dataset.word_count(),
                hangword::game::MAX_GUESSES,
            ),
            dim(),
        )),
        Line::default(),
        Line::from(Span::styled("press enter to play · esc to quit", hint())),
    ]
}

fn board_lines(game: &Game) -> Vec<Line<'static>> {
    let category_line = Line::from(vec![
        Span::styled("category: ".to_string(), dim()),
        Span::styled(game.picked_category.clone(), bold().fg(Color::Magenta)),
    ]);

    // One span per letter so revealed and hidden positions style
    // independently, blanks as underscores.
    let mut word_spans: Vec<Span> = vec![];
    for (idx, letter) in game.letters.iter().enumerate() {
        if idx > 0 {
            word_spans.push(Span::raw(" "));
        }
        if game.is_revealed(*letter) {
            word_spans.push(Span::styled(letter.to_string(), bold().fg(Color::Green)));
        } else {
            word_spans.push(Span::styled("_".to_string(), bold().add_modifier(Modifier::DIM)));
        }
    }

    let missed_line = if game.wrong_letters.is_empty() {
        Line::from(Span::styled("no misses yet".to_string(), dim()))
    } else {
        let mut spans = vec![Span::styled("missed: ".to_string(), dim())];
        for (idx, letter) in game.wrong_letters.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(letter.to_string(), bold().fg(Color::Red)));
        }
        Line::from(spans)
    };

    vec![
        category_line,
        Line::default(),
        Line::from(word_spans),
        Line::default(),
        missed_line,
        Line::from(Span::styled(
            format!(
                "guesses left: {} · score: {}",
                game.guesses_remaining, game.score
            ),
            dim(),
        )),
    ]
}

fn game_over_lines(game: &Game) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("game over", bold().fg(Color::Red))),
        Line::default(),
        Line::from(vec![
            Span::styled("the word was ".to_string(), dim()),
            Span::styled(game.picked_word.to_lowercase(), bold().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("final score: ".to_string(), dim()),
            Span::styled(game.score.to_string(), bold()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "press enter to play again · esc to quit",
            hint(),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangword::dataset::Dataset;
    use hangword::picker::{Pick, ScriptedPicker};

    fn playing_game() -> Game {
        let dataset =
            Dataset::from_json(r#"{ "name": "t", "categories": { "animals": ["cat"] } }"#).unwrap();
        let picker = ScriptedPicker::new(vec![Pick {
            word: "cat".to_string(),
            category: "animals".to_string(),
        }]);
        let mut game = Game::new(dataset, Box::new(picker)).unwrap();
        game.start().unwrap();
        game
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn board_shows_blanks_then_revealed_letters() {
        let mut game = playing_game();

        let word_row = line_text(&board_lines(&game)[2]);
        assert_eq!(word_row, "_ _ _");

        game.guess_letter('a').unwrap();
        let word_row = line_text(&board_lines(&game)[2]);
        assert_eq!(word_row, "_ a _");
    }

    #[test]
    fn board_lists_missed_letters_and_guesses_left() {
        let mut game = playing_game();
        game.guess_letter('z').unwrap();
        game.guess_letter('x').unwrap();

        let lines = board_lines(&game);
        assert_eq!(line_text(&lines[4]), "missed: z x");
        assert_eq!(line_text(&lines[5]), "guesses left: 1 · score: 0");
    }

    #[test]
    fn board_names_the_category() {
        let game = playing_game();

        assert_eq!(line_text(&board_lines(&game)[0]), "category: animals");
    }

    #[test]
    fn game_over_screen_reveals_word_and_score() {
        let mut game = playing_game();
        for letter in ['x', 'y', 'z'] {
            game.guess_letter(letter).unwrap();
        }

        let lines = game_over_lines(&game);
        assert_eq!(line_text(&lines[0]), "game over");
        assert_eq!(line_text(&lines[2]), "the word was cat");
        assert_eq!(line_text(&lines[3]), "final score: 0");
    }

    #[test]
    fn start_screen_summarizes_the_dataset() {
        let dataset =
            Dataset::from_json(r#"{ "name": "t", "categories": { "animals": ["cat", "dog"] } }"#)
                .unwrap();
        let picker = ScriptedPicker::new(vec![Pick {
            word: "cat".to_string(),
            category: "animals".to_string(),
        }]);
        let game = Game::new(dataset, Box::new(picker)).unwrap();

        let lines = start_lines(&game);
        assert_eq!(line_text(&lines[0]), "HANGWORD");
        assert_eq!(
            line_text(&lines[2]),
            "1 categories · 2 words · 3 wrong guesses allowed"
        );
    }
}
