use crossterm::style::{Color, Stylize};
use std::fmt;
use sweeper_core::{CellView, GameSession, HudView, Outcome};

/// One colour per adjacent-mine count, starting at 1.
const NUMBER_COLORS: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Magenta,
    Color::Yellow,
    Color::Cyan,
    Color::DarkMagenta,
    Color::Grey,
];

#[derive(Copy, Clone, Debug, PartialEq)]
enum Glyph {
    Covered,
    Flagged,
    Empty,
    Number(u8),
    Mine,
    Misflagged,
}

impl Glyph {
    fn of(view: &CellView) -> Self {
        match (view.is_flagged, view.known_mine(), view.adjacent_mines) {
            (true, Some(false), _) => Self::Misflagged,
            (true, _, _) => Self::Flagged,
            (false, Some(true), _) => Self::Mine,
            (false, _, Some(0)) => Self::Empty,
            (false, _, Some(count)) => Self::Number(count),
            (false, _, None) => Self::Covered,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Covered => '#',
            Self::Flagged => 'F',
            Self::Empty => '.',
            Self::Number(count) => char::from(b'0' + count),
            Self::Mine => '*',
            Self::Misflagged => 'X',
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            Self::Covered | Self::Empty => None,
            Self::Flagged => Some(Color::DarkYellow),
            Self::Number(count) => NUMBER_COLORS.get(usize::from(count).checked_sub(1)?).copied(),
            Self::Mine | Self::Misflagged => Some(Color::DarkRed),
        }
    }
}

/// Text grid with row and column rulers.
pub(crate) struct BoardView<'a> {
    session: &'a GameSession,
    color: bool,
}

pub(crate) fn board(session: &GameSession, color: bool) -> BoardView<'_> {
    BoardView { session, color }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.session.board().size();
        let width = (rows.max(cols).saturating_sub(1)).to_string().len();

        write!(f, "{:width$} ", "")?;
        for col in 0..cols {
            write!(f, " {col:>width$}")?;
        }
        writeln!(f)?;

        let views: Vec<CellView> = self.session.cell_views().collect();
        for (row, line) in views.chunks(usize::from(cols)).enumerate() {
            write!(f, "{row:>width$} ")?;
            for view in line {
                let glyph = Glyph::of(view);
                let symbol = format!("{:>width$}", glyph.symbol());
                match glyph.color().filter(|_| self.color) {
                    Some(c) => write!(f, " {}", symbol.with(c))?,
                    None => write!(f, " {symbol}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub(crate) fn hud(hud: &HudView, flag_mode: bool) -> String {
    let mode = if flag_mode { "flag" } else { "reveal" };
    format!(
        "flags: {}  time: {}  mode: {}",
        hud.flags_remaining,
        hud.clock(),
        mode
    )
}

pub(crate) fn banner(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::None => None,
        Outcome::Won => Some("You won! Press n for a new game or q to quit."),
        Outcome::Lost => Some("Game over! Press n for a new game or q to quit."),
    }
}
