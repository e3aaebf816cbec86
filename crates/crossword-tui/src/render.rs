use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use crossword_core::{Orientation, Position};
use std::io;

/// Each cell is 3 columns wide and 2 rows tall: number on top, letter below
const CELL_WIDTH: u16 = 3;
const CELL_HEIGHT: u16 = 2;
const PANEL_WIDTH: u16 = 36;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    if app.session.is_finished() {
        render_finished_screen(stdout, app, term_width, term_height)?;
    } else {
        render_game_screen(stdout, app, term_width, term_height)?;
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let puzzle = app.session.puzzle();
    let grid_width = puzzle.cols() as u16 * CELL_WIDTH;
    let grid_height = puzzle.rows() as u16 * CELL_HEIGHT;

    let total_width = grid_width + 3 + PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;

    let panel_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, panel_x, start_y)?;
    render_clues(stdout, app, panel_x, start_y + 8, term_height)?;

    let controls_y = (start_y + grid_height + 1).max(start_y + 8);
    render_controls(stdout, app, start_x, controls_y.min(term_height.saturating_sub(2)))?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let puzzle = app.session.puzzle();
    for row in 0..puzzle.rows() {
        for col in 0..puzzle.cols() {
            let pos = Position::new(row, col);
            let cx = x + col as u16 * CELL_WIDTH;
            let cy = y + row as u16 * CELL_HEIGHT;
            render_cell(stdout, app, pos, cx, cy)?;
        }
    }
    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let puzzle = session.puzzle();

    if !puzzle.is_occupied(pos) {
        execute!(
            stdout,
            SetBackgroundColor(theme.blocked_bg),
            MoveTo(x, y),
            Print("   "),
            MoveTo(x, y + 1),
            Print("   ")
        )?;
        return Ok(());
    }

    let bg = if session.focus() == Some(pos) {
        theme.selected_bg
    } else if app.is_highlighted(pos) {
        theme.highlight_bg
    } else {
        theme.cell_bg
    };

    let number = puzzle
        .number_at(pos)
        .map(|n| format!("{:<3}", n))
        .unwrap_or_else(|| "   ".to_string());

    let fg = if session.is_solved() {
        theme.success
    } else {
        match session.cell_feedback(pos) {
            Some(true) => theme.success,
            Some(false) => theme.error,
            None => theme.filled,
        }
    };
    let letter = session
        .input()
        .letter(pos)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or(' ');

    execute!(
        stdout,
        SetBackgroundColor(bg),
        MoveTo(x, y),
        SetForegroundColor(theme.number),
        Print(number),
        MoveTo(x, y + 1),
        SetForegroundColor(fg),
        Print(format!(" {} ", letter))
    )?;

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== CROSSWORD ===")
    )?;

    let hints = match session.hints_remaining() {
        Some(left) => format!("{} left", left),
        None => "unlimited".to_string(),
    };
    let rows = [
        format!("Level: {:>10}", session.difficulty()),
        format!("Score: {:>10}", session.score()),
        format!("Time:  {:>10}", session.elapsed_string()),
        format!("Hints: {:>10}", hints),
    ];
    for (i, line) in rows.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetForegroundColor(theme.info),
            Print(line)
        )?;
    }

    if session.is_solved() {
        execute!(
            stdout,
            MoveTo(x, y + 6),
            SetForegroundColor(theme.success),
            Print("Solved!")
        )?;
    }

    Ok(())
}

fn render_clues(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let puzzle = app.session.puzzle();
    let focused: Vec<(Orientation, u32)> = app
        .focused_words()
        .iter()
        .map(|word| (word.orientation, word.number))
        .collect();

    let mut line = y;
    for orientation in [Orientation::Across, Orientation::Down] {
        if line >= term_height {
            break;
        }
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(theme.key),
            Print(orientation.as_str().to_uppercase())
        )?;
        line += 1;

        for (number, clue) in puzzle.clues(orientation) {
            if line >= term_height.saturating_sub(1) {
                break;
            }
            let color = if focused.contains(&(orientation, number)) {
                theme.fg
            } else {
                theme.info
            };
            let text = truncate(&format!("{:>3}. {}", number, clue), PANEL_WIDTH as usize);
            execute!(stdout, MoveTo(x, line), SetForegroundColor(color), Print(text))?;
            line += 1;
        }
        line += 1;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("A-Z", "Type"),
        ("Arrows", "Move"),
        ("Del", "Clear"),
        ("?", "Hint"),
        ("Enter", "Next level"),
        ("1/2/3", "Difficulty"),
        ("Esc", "Quit"),
    ];

    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 2;
        let row = i % 2;
        let cx = x + (col as u16) * 18;
        let cy = y + row as u16;

        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_finished_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lines = [
        ("ALL LEVELS COMPLETE".to_string(), theme.success),
        (format!("Final score: {}", app.session.score()), theme.fg),
        (String::new(), theme.fg),
        ("Press 1, 2 or 3 to play again, Esc to quit".to_string(), theme.info),
    ];

    let top = (term_height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        let x = term_width.saturating_sub(text.len() as u16) / 2;
        execute!(
            stdout,
            MoveTo(x, top + i as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded),
        SetBackgroundColor(Color::Reset)
    )?;

    Ok(())
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
