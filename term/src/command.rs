use anyhow::{Context, bail};
use sweeper_core::Coord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Click using the current flag mode
    Click { row: Coord, col: Coord },
    Reveal { row: Coord, col: Coord },
    Flag { row: Coord, col: Coord },
    ToggleFlagMode,
    Restart,
    Redraw,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  <row> <col>        click a cell using the current mode
  r <row> <col>      reveal a cell
  f <row> <col>      toggle a flag
  m                  switch between reveal and flag mode
  n                  start a new game
  <enter>            refresh the timer
  h                  show this help
  q                  quit";

impl Command {
    pub(crate) fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Self::Redraw);
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let (row, col) = parse_coords(&mut words)?;
                Self::Reveal { row, col }
            }
            "f" | "flag" => {
                let (row, col) = parse_coords(&mut words)?;
                Self::Flag { row, col }
            }
            "m" | "mode" => Self::ToggleFlagMode,
            "n" | "new" | "restart" => Self::Restart,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => {
                let row = parse_coord(first, "row")?;
                let col = parse_coord(words.next().context("missing column")?, "column")?;
                Self::Click { row, col }
            }
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<(Coord, Coord)> {
    let row = parse_coord(words.next().context("missing row")?, "row")?;
    let col = parse_coord(words.next().context("missing column")?, "column")?;
    Ok((row, col))
}

fn parse_coord(word: &str, what: &str) -> anyhow::Result<Coord> {
    word.parse()
        .with_context(|| format!("invalid {what} {word:?}, try \"h\" for help"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clicks_and_explicit_actions() {
        assert_eq!(
            Command::parse("3 4").unwrap(),
            Command::Click { row: 3, col: 4 }
        );
        assert_eq!(
            Command::parse("  r 0 8 ").unwrap(),
            Command::Reveal { row: 0, col: 8 }
        );
        assert_eq!(
            Command::parse("FLAG 2 2").unwrap(),
            Command::Flag { row: 2, col: 2 }
        );
    }

    #[test]
    fn parses_single_word_commands() {
        assert_eq!(Command::parse("m").unwrap(), Command::ToggleFlagMode);
        assert_eq!(Command::parse("restart").unwrap(), Command::Restart);
        assert_eq!(Command::parse("?").unwrap(), Command::Help);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
        assert_eq!(Command::parse("").unwrap(), Command::Redraw);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Command::parse("r 1").is_err());
        assert!(Command::parse("1").is_err());
        assert!(Command::parse("1 -2").is_err());
        assert!(Command::parse("1 300").is_err());
        assert!(Command::parse("q now").is_err());
        assert!(Command::parse("dig 1 1").is_err());
    }
}
