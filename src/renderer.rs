use crate::entities::{Alien, Bounded, GameState, Projectile, Rect as WorldRect, Ship};
use crate::game::Game;
use crate::stats::GameStats;
use rand::Rng;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const PLAY_BUTTON_WIDTH: u16 = 20;
const PLAY_BUTTON_HEIGHT: u16 = 3;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub ship: &'a Ship,
    pub aliens: &'a [Alien],
    pub projectiles: &'a [Projectile],
    pub stats: &'a GameStats,
    /// Play area in world units
    pub world: WorldRect,
    pub frame_count: u64,
    pub area: Rect,
    pub fps: u32,
}

impl<'a> RenderView<'a> {
    pub fn from_game(game: &'a Game, area: Rect, frame_count: u64, fps: u32) -> Self {
        Self {
            game_state: game.state(),
            ship: game.ship(),
            aliens: game.aliens(),
            projectiles: game.projectiles(),
            stats: game.stats(),
            world: game.area(),
            frame_count,
            area,
            fps,
        }
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer {}

impl GameRenderer {
    /// Creates a new GameRenderer
    pub fn new() -> Self {
        Self {}
    }

    /// Where the Play button sits for a terminal of size `area`. Shared by
    /// drawing and mouse hit testing.
    pub fn play_button_area(area: Rect) -> Rect {
        let width = PLAY_BUTTON_WIDTH.min(area.width);
        let height = PLAY_BUTTON_HEIGHT.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    /// The bordered play field between the HUD row and the controls row
    pub fn play_field(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y.saturating_add(1),
            width: area.width,
            height: area.height.saturating_sub(2),
        }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        match view.game_state {
            GameState::Active => {}
            GameState::LifeLost { .. } => self.render_life_lost(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::Inactive => self.render_title(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the board, the HUD and the controls hint
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let field = Self::play_field(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let game_area = block.inner(field);
        frame.render_widget(block, field);

        let buffer = frame.buffer_mut();

        // Render stars (simple background)
        if view.frame_count % 10 < 5 && game_area.width > 0 {
            let mut rng = rand::rng();
            for y in game_area.top()..game_area.bottom() {
                if rng.random_bool(0.05) {
                    let x = game_area.x + rng.random_range(0..game_area.width);
                    buffer.set_string(x, y, ".", Style::default().fg(Color::DarkGray));
                }
            }
        }

        for alien in view.aliens {
            if let Some(cells) = project(alien.rect(), view.world, game_area) {
                fill(
                    buffer,
                    cells,
                    "▓",
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        for projectile in view.projectiles {
            if let Some(cells) = project(projectile.rect(), view.world, game_area) {
                fill(buffer, cells, "═", Style::default().fg(Color::Yellow));
            }
        }

        if let Some(cells) = project(view.ship.rect(), view.world, game_area) {
            let color = if matches!(view.game_state, GameState::LifeLost { .. }) {
                Color::Red
            } else {
                Color::Cyan
            };
            fill(
                buffer,
                cells,
                "█",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        self.render_hud(frame, view);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[W/S or Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };

        let ships = "◀".repeat(view.stats.ships_left as usize);
        let left = Line::from(vec![
            Span::styled("Ships: ", label),
            Span::styled(ships, value(Color::Cyan)),
            Span::styled("  Level: ", label),
            Span::styled(view.stats.level.to_string(), value(Color::Magenta)),
        ]);
        frame.render_widget(Paragraph::new(left), hud_area);

        let center = Line::from(vec![
            Span::styled("Hi Score: ", label),
            Span::styled(format_score(view.stats.hi_score), value(Color::Yellow)),
        ]);
        frame.render_widget(Paragraph::new(center).centered(), hud_area);

        let right = Line::from(vec![
            Span::styled("Max: ", label),
            Span::styled(format_score(view.stats.max_score), value(Color::White)),
            Span::styled("  Score: ", label),
            Span::styled(format_score(view.stats.score), value(Color::Yellow)),
            Span::styled("  FPS: ", label),
            Span::styled(view.fps.to_string(), value(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(right).right_aligned(), hud_area);
    }

    /// Title and Play button shown before the first game
    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        let button = Self::play_button_area(view.area);

        let title_area = Rect {
            x: view.area.x,
            y: button.y.saturating_sub(2),
            width: view.area.width,
            height: view.area.height.min(1),
        };
        frame.render_widget(
            Paragraph::new(Line::from("ALIEN INVASION").centered().bold().red()),
            title_area,
        );

        self.render_play_button(frame, button);
        self.render_button_hint(frame, view.area, button, "Click Play or press Enter");
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = centered(area, 30, 6);
        frame.render_widget(Clear, pause_area);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    fn render_life_lost(&self, frame: &mut Frame, view: &RenderView) {
        let banner = centered(view.area, 20, 1);
        frame.render_widget(
            Paragraph::new(Line::from("SHIP LOST").centered().bold().red()),
            banner,
        );
    }

    /// Renders the game over box above the Play button
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let button = Self::play_button_area(area);

        let game_over_text = vec![
            Line::from("GAME OVER!").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", format_score(view.stats.score)))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Level Reached: {}", view.stats.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(format!("Hi Score: {}", format_score(view.stats.hi_score)))
                .centered()
                .white(),
        ];

        let width = 34u16.min(area.width);
        let height: u16 = 7;
        let box_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: button.y.saturating_sub(height),
            width,
            height: height.min(button.y.saturating_sub(area.y)),
        };

        frame.render_widget(Clear, box_area);
        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            box_area,
        );

        self.render_play_button(frame, button);
        self.render_button_hint(frame, area, button, "Press R to restart, Q to quit");
    }

    fn render_play_button(&self, frame: &mut Frame, button: Rect) {
        frame.render_widget(Clear, button);
        frame.render_widget(
            Paragraph::new(Line::from("Play").centered().bold())
                .style(Style::default().fg(Color::White).bg(Color::Green))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::White).bg(Color::Green)),
                ),
            button,
        );
    }

    fn render_button_hint(&self, frame: &mut Frame, area: Rect, button: Rect, hint: &str) {
        let hint_area = Rect {
            x: area.x,
            y: button.bottom(),
            width: area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Line::from(hint.to_string()).centered().white()),
            hint_area,
        );
    }
}

/// Formats a score with thousands separators, e.g. `12,400`
pub fn format_score(score: u32) -> String {
    let digits = score.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Maps a world rectangle onto terminal cells inside `field`. Anything
/// visible covers at least one cell.
fn project(rect: WorldRect, world: WorldRect, field: Rect) -> Option<Rect> {
    if world.width <= 0 || world.height <= 0 || field.width == 0 || field.height == 0 {
        return None;
    }
    let sx = field.width as f32 / world.width as f32;
    let sy = field.height as f32 / world.height as f32;

    let x0 = ((rect.left() - world.left()) as f32 * sx).floor().max(0.0);
    let x1 = ((rect.right() - world.left()) as f32 * sx)
        .ceil()
        .min(field.width as f32);
    let y0 = ((rect.top() - world.top()) as f32 * sy).floor().max(0.0);
    let y1 = ((rect.bottom() - world.top()) as f32 * sy)
        .ceil()
        .min(field.height as f32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(Rect {
        x: field.x + x0 as u16,
        y: field.y + y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    })
}

fn fill(buffer: &mut Buffer, cells: Rect, symbol: &str, style: Style) {
    let line = symbol.repeat(cells.width as usize);
    for y in cells.top()..cells.bottom() {
        buffer.set_string(cells.x, y, &line, style);
    }
}
