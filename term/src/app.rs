use std::io::{BufRead, Write};
use sweeper_core::{ClickOutcome, Coord, GameSession};

use crate::command::{Command, HELP};
use crate::render;

/// Presentation loop state: the session plus the flag-mode toggle it is driven with.
pub(crate) struct App {
    session: GameSession,
    flag_mode: bool,
    json: bool,
    color: bool,
}

impl App {
    pub(crate) fn new(session: GameSession, json: bool, color: bool) -> Self {
        Self {
            session,
            flag_mode: false,
            json,
            color,
        }
    }

    /// Reads commands line by line until `q` or end of input.
    pub(crate) fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> anyhow::Result<()> {
        self.draw(out)?;
        writeln!(out, "type h for help")?;

        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err:#}")?;
                    continue;
                }
            };
            log::trace!("command: {:?}", command);

            match command {
                Command::Quit => break,
                Command::Help => writeln!(out, "{HELP}")?,
                Command::Redraw => self.draw(out)?,
                Command::ToggleFlagMode => {
                    self.flag_mode = !self.flag_mode;
                    self.draw(out)?;
                }
                Command::Restart => {
                    self.session = self.session.restart()?;
                    self.draw(out)?;
                }
                Command::Click { row, col } => self.click(row, col, self.flag_mode, out)?,
                Command::Reveal { row, col } => self.click(row, col, false, out)?,
                Command::Flag { row, col } => self.click(row, col, true, out)?,
            }
        }
        Ok(())
    }

    fn click<W: Write>(
        &mut self,
        row: Coord,
        col: Coord,
        flag_mode: bool,
        out: &mut W,
    ) -> anyhow::Result<()> {
        match self.session.on_cell_click(row, col, flag_mode) {
            Ok(ClickOutcome::NoChange) => {
                if self.session.is_over() {
                    writeln!(out, "the game is over, press n for a new game")?;
                } else {
                    writeln!(out, "nothing to do at ({row}, {col})")?;
                }
                Ok(())
            }
            Ok(outcome) => {
                log::debug!("click at ({}, {}): {:?}", row, col, outcome);
                self.draw(out)
            }
            Err(err) => {
                writeln!(out, "{err}")?;
                Ok(())
            }
        }
    }

    fn draw<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let hud = self.session.hud();
        write!(out, "{}", render::board(&self.session, self.color))?;
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&hud)?)?;
        } else {
            writeln!(out, "{}", render::hud(&hud, self.flag_mode))?;
        }
        if let Some(banner) = render::banner(hud.outcome) {
            writeln!(out, "{banner}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{Board, GameState};

    fn app(size: (u8, u8), mines: &[(u8, u8)], json: bool) -> App {
        let board = Board::from_mine_coords(size, mines).unwrap();
        App::new(GameSession::from_board(board), json, false)
    }

    fn play(app: &mut App, script: &str) -> String {
        let mut out = Vec::new();
        app.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn flag_mode_applies_to_plain_clicks() {
        let mut app = app((3, 3), &[(1, 1)], false);

        let output = play(&mut app, "m\n1 1\nm\n0 0\nq\n");

        assert!(app.session.board().cell_at((1, 1)).is_flagged);
        assert!(app.session.board().cell_at((0, 0)).is_revealed);
        assert!(output.contains("mode: flag"));
        assert!(output.contains("flags: 0"));
    }

    #[test]
    fn winning_prints_banner_and_ignores_further_clicks() {
        let mut app = app((3, 3), &[(2, 2)], false);

        let output = play(&mut app, "r 0 0\nf 2 2\n");

        assert_eq!(app.session.state(), GameState::Won);
        assert!(output.contains("You won!"));
        assert!(output.contains("the game is over"));
    }

    #[test]
    fn bad_input_is_reported_and_play_continues() {
        let mut app = app((3, 3), &[(1, 1)], false);

        let output = play(&mut app, "x y\n9 9\n1 1\n");

        assert!(output.contains("invalid row"));
        assert!(output.contains("Invalid coordinates (9, 9)"));
        assert!(output.contains("Game over!"));
        assert_eq!(app.session.state(), GameState::Lost);
    }

    #[test]
    fn restart_replaces_the_session() {
        let mut app = app((3, 3), &[(1, 1)], false);

        play(&mut app, "1 1\nn\n");

        assert_eq!(app.session.state(), GameState::NotStarted);
        assert_eq!(app.session.flags_remaining(), 1);
    }

    #[test]
    fn json_mode_prints_hud_objects() {
        let mut app = app((1, 2), &[(0, 0)], true);

        let output = play(&mut app, "0 1\n");

        assert!(output.contains(r#""outcome":"Won""#));
        assert!(output.contains(r#""flags_remaining":1"#));
    }
}
