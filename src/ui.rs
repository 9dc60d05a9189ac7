//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::{Cell, Grid, Position},
    types::{GameOverItem, MainMenuItem, MenuType, Screen},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item)?,
        Screen::InGame => in_game(app, frame)?,
        Screen::GameOver(item) => game_over(app, frame, item)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and time-expired menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the selected one.
///
/// # Errors
///
/// This function returns an error if the layout has fewer rows than there are entries.
fn menu_entries(
    frame: &mut Frame,
    rows: &[Rect],
    entries: &[&str],
    selected: usize,
) -> Result<()> {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, entry) in entries.iter().enumerate() {
        let style = if idx == selected {
            active_content_style
        } else {
            content_style
        };
        let row = rows
            .get(idx)
            .copied()
            .ok_or_eyre("failed to get menu row from layout")?;

        frame.render_widget(Line::raw(*entry).centered().style(style), row);
    }

    Ok(())
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game" and "Quit". It highlights
/// the currently selected option and provides visual feedback for user navigation.
///
/// # Errors
///
/// This function may return errors from layout lookups.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) -> Result<()> {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::MainMenu(2));
    let selected = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::Quit => 1,
    };
    menu_entries(frame, &inner_layout, &["Start Game", "Quit"], selected)
}

/// Renders the time-expired screen.
///
/// This function shows the level and score the game ended with above a menu offering to restart
/// from level one or go back to the main menu.
///
/// # Errors
///
/// This function may return errors from layout lookups.
pub(crate) fn game_over(app: &App, frame: &mut Frame, item: GameOverItem) -> Result<()> {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::GameOver(2));
    let selected = match item {
        GameOverItem::Restart => 0,
        GameOverItem::MainMenu => 1,
    };
    menu_entries(frame, &inner_layout, &["Restart", "Main Menu"], selected)?;

    let summary_area = Layout::vertical([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.area())
        .first()
        .copied()
        .ok_or_eyre("failed to get summary area from layout")?;
    let summary = Line::raw(format!(
        "Reached level {} with a score of {}",
        app.session.level(),
        app.session.score()
    ))
    .centered()
    .style(Style::default().fg(Color::Green));

    frame.render_widget(summary, summary_area);

    Ok(())
}

/// Transforms grid positions to screen coordinates for canvas rendering.
///
/// This function converts grid positions (x, y) to canvas coordinates using the standard
/// centering formulas: coordinate[i] = (n - 1) / 2 - i for rows and coordinate[i] = i - (n - 1) / 2
/// for columns.
///
/// # Errors
///
/// This function returns an error if the grid or a position does not fit in a terminal axis.
pub(crate) fn transform_grid_to_screen_coords(
    positions: &[Position],
    grid: &Grid,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(grid.height())?);
    let cols_n = f64::from(u16::try_from(grid.width())?);

    positions
        .iter()
        .map(|pos| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(pos.y)?);
            let screen_x = f64::from(u16::try_from(pos.x)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Returns canvas bounds that put one grid cell on each of `cells` terminal cells.
///
/// Ratatui maps a point to column `(x - left) * (cells - 1) / (right - left)`, so bounds of
/// `(cells - 1) / 2` on either side land every centred coordinate on its own cell. A single cell
/// still needs a non-empty range to be drawn at all.
pub(crate) fn canvas_bounds(cells: u16) -> [f64; 2] {
    let half = ((f64::from(cells) - 1.) / 2.).max(0.5);

    [-half, half]
}

/// Renders the in-game screen with the maze, the timer, the score and the level.
///
/// This function draws the walls, the highlighted start and goal cells and the player marker on a
/// [`Canvas`] sized to one terminal cell per grid cell, with the three text fields above it and
/// the last status message and key hints below it.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion operations.
#[expect(
    clippy::too_many_lines,
    reason = "UI rendering function requires many lines for layout and drawing operations."
)]
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = &app.session;
    let grid = session.grid();
    let maze_rows = u16::try_from(grid.height())?;
    let maze_columns = u16::try_from(grid.width())?;

    // Header, maze, status line and tooltip block
    let overall_layout = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(frame.area());

    let header_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get header area from layout")?;
    let maze_content_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_area = *overall_layout
        .get(2)
        .ok_or_eyre("failed to get status area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let header = Line::raw(format!(
        "Time: {}s   Score: {}   Level: {}",
        session.time_left(),
        session.score(),
        session.level()
    ))
    .centered()
    .style(Style::default().fg(Color::Green));
    frame.render_widget(header, header_area);

    let maze_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(maze_rows),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(maze_columns),
        Constraint::Min(1),
    ])
    .split(maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    if let Some(status) = &app.status {
        let status_line = Line::raw(status.as_str())
            .centered()
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(status_line, status_area);
    }

    // Render tooltip as a block at the bottom center with top border
    let tooltip_block = Block::bordered()
        .title("(arrows/wasd) move / (r) restart / (esc) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_full_area);

    // Terminals too small for the maze still get the text rows
    if space.is_empty() {
        return Ok(());
    }

    // Pre-compute screen coordinates to handle errors before the paint closure
    let walls: Vec<Position> = grid
        .cells()
        .filter(|&(_, cell)| cell == Cell::Wall)
        .map(|(pos, _)| pos)
        .collect();
    let wall_coords = transform_grid_to_screen_coords(&walls, grid)?;
    let start_coords = transform_grid_to_screen_coords(&[Position::new(0, 0)], grid)?;
    let goal_coords = transform_grid_to_screen_coords(&[session.goal()], grid)?;
    let player_coords = transform_grid_to_screen_coords(&[session.player()], grid)?;

    let maze = Canvas::default()
        .x_bounds(canvas_bounds(space.width))
        .y_bounds(canvas_bounds(space.height))
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &start_coords,
                color: Color::LightGreen,
            });
            ctx.draw(&Points {
                coords: &goal_coords,
                color: Color::Blue,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &player_coords,
                color: Color::Yellow,
            });
        });

    frame.render_widget(maze, space);

    Ok(())
}
