//! Ratatui-based terminal dashboard.
//!
//! One card per indicator, laid out in a grid. Moving the mouse over any
//! chart (or stepping with ←/→) moves a shared year cursor; every card then
//! shows its value for that year, or "No data for <year>".

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{self, LoadRequest};
use crate::app::state::AppState;
use crate::cli::DashboardArgs;
use crate::data::EntityGroups;
use crate::domain::{IndicatorDescriptor, MISSING_GLYPH, Rgb, ValueFormat};
use crate::error::AppError;
use crate::sync::{ChartFrame, ScreenPoint, Viewport};

mod debounce;
mod picker;
mod plotters_chart;

use debounce::{Debouncer, RESIZE_SETTLE};
use picker::{EntityPicker, PickerRow};
use plotters_chart::TimelineChart;

const TICK: Duration = Duration::from_millis(100);

/// Start the dashboard.
pub fn run(args: DashboardArgs) -> Result<(), AppError> {
    // Usage errors are reported before the terminal is taken over.
    let request = LoadRequest::from_args(&args.source)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(request, args.country);
    app.redraw(&mut terminal)?;
    app.load(&terminal)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

enum Phase {
    Loading,
    /// Batch failed; nothing is rendered but the message.
    Failed(String),
    Ready(AppState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
    Reload,
}

struct App {
    request: LoadRequest,
    country: Option<String>,
    phase: Phase,
    picker: Option<EntityPicker>,
    resize: Debouncer,
    status: String,
}

impl App {
    fn new(request: LoadRequest, country: Option<String>) -> Self {
        let status = format!("Loading {} indicators from {}...", request.indicators.len(), request.root);
        Self {
            request,
            country,
            phase: Phase::Loading,
            picker: None,
            resize: Debouncer::new(RESIZE_SETTLE),
            status,
        }
    }

    fn chart_count(&self) -> usize {
        self.request.indicators.len()
    }

    fn load<B: Backend>(&mut self, terminal: &Terminal<B>) -> Result<(), AppError> {
        let area = terminal_area(terminal)?;
        match pipeline::load_registry(&self.request) {
            Ok(registry) => {
                let mut state = AppState::new(Arc::new(registry), self.country.as_deref());
                state.set_viewports(chart_viewports(area, self.chart_count()));
                self.status = format!(
                    "Loaded {} indicators, {} entities from {}",
                    self.chart_count(),
                    state.registry().entities().len(),
                    self.request.root
                );
                self.phase = Phase::Ready(state);
            }
            Err(err) => {
                self.status = "Load failed (see log)".to_string();
                self.phase = Phase::Failed(err.to_string());
            }
        }
        Ok(())
    }

    /// Fetch everything again and swap the registry in one step.
    fn reload(&mut self) {
        let Phase::Ready(state) = &mut self.phase else {
            return;
        };
        match pipeline::load_registry(&self.request) {
            Ok(registry) => {
                state.replace_registry(Arc::new(registry));
                self.status = format!(
                    "Reloaded {} entities from {}",
                    state.registry().entities().len(),
                    self.request.root
                );
            }
            Err(err) => {
                // The previous registry stays on screen.
                self.status = err.to_string();
            }
        }
    }

    fn redraw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        terminal
            .draw(|f| self.draw(f))
            .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
        Ok(())
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.redraw(terminal)?;
                needs_redraw = false;
            }

            let now = Instant::now();
            if self.resize.fire_if_due(now) {
                self.apply_resize(terminal)?;
                needs_redraw = true;
                continue;
            }

            let timeout = self.resize.time_left(now).map_or(TICK, |left| left.min(TICK));
            if !event::poll(timeout).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match self.handle_key(key.code) {
                        KeyOutcome::Quit => break,
                        KeyOutcome::Reload => {
                            self.status = format!("Reloading from {}...", self.request.root);
                            self.redraw(terminal)?;
                            self.reload();
                        }
                        KeyOutcome::Continue => {}
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw = self.handle_mouse(mouse) || needs_redraw;
                }
                Event::Resize(_, _) => {
                    self.resize.schedule(Instant::now());
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Rebuild chart scales for the settled terminal size.
    fn apply_resize<B: Backend>(&mut self, terminal: &Terminal<B>) -> Result<(), AppError> {
        let area = terminal_area(terminal)?;
        let count = self.chart_count();
        if let Phase::Ready(state) = &mut self.phase {
            tracing::debug!(width = area.width, height = area.height, "resize settled");
            state.set_viewports(chart_viewports(area, count));
        }
        Ok(())
    }

    /// Returns true when the cursor changed.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.picker.is_some() {
            return false;
        }
        let Phase::Ready(state) = &mut self.phase else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let before = state.cursor();
                state.pointer_at(mouse.column, mouse.row) != before
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> KeyOutcome {
        if self.picker.is_some() {
            self.handle_picker_key(code);
            return KeyOutcome::Continue;
        }

        let Phase::Ready(state) = &mut self.phase else {
            return match code {
                KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
                _ => KeyOutcome::Continue,
            };
        };

        match code {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('r') => return KeyOutcome::Reload,
            KeyCode::Char('c') | KeyCode::Char('/') => {
                self.picker = Some(EntityPicker::open(state.groups(), state.selected()));
            }
            KeyCode::Char(']') => state.cycle_entity(1),
            KeyCode::Char('[') => state.cycle_entity(-1),
            KeyCode::Left => state.step_cursor(-1),
            KeyCode::Right => state.step_cursor(1),
            KeyCode::Esc => state.pointer_leave(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        let (Some(picker), Phase::Ready(state)) = (&mut self.picker, &mut self.phase) else {
            self.picker = None;
            return;
        };

        match code {
            KeyCode::Esc => self.picker = None,
            KeyCode::Enter => {
                if let Some(entity) = picker.chosen(state.groups()) {
                    let (code, name) = (entity.code.clone(), entity.name.clone());
                    state.select_entity(&code);
                    self.status = format!("Showing {name} ({code})");
                }
                self.picker = None;
            }
            KeyCode::Up => picker.move_by(-1, state.groups()),
            KeyCode::Down => picker.move_by(1, state.groups()),
            KeyCode::PageUp => picker.move_by(-10, state.groups()),
            KeyCode::PageDown => picker.move_by(10, state.groups()),
            KeyCode::Backspace => picker.pop(),
            KeyCode::Char(c) => picker.push(c),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let layout = dashboard_layout(frame.area(), self.chart_count());

        self.draw_header(frame, layout.header);
        self.draw_body(frame, &layout);
        self.draw_footer(frame, layout.footer);

        if let (Some(picker), Phase::Ready(state)) = (&self.picker, &self.phase) {
            draw_picker(frame, picker, state.groups());
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("timeline", Style::default().fg(Color::Cyan)),
            Span::raw(" — World Bank development indicators"),
        ]));

        let (entity, year) = match &self.phase {
            Phase::Ready(state) => {
                let entity = state
                    .selected_entity()
                    .map(|e| format!("{} ({})", e.name, e.code))
                    .unwrap_or_else(|| state.selected().to_string());
                let year = state
                    .cursor()
                    .year()
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| MISSING_GLYPH.to_string());
                (entity, year)
            }
            _ => ("-".to_string(), MISSING_GLYPH.to_string()),
        };

        lines.push(Line::from(vec![
            Span::styled("country: ", Style::default().fg(Color::Gray)),
            Span::styled(entity, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" | year: ", Style::default().fg(Color::Gray)),
            Span::styled(year, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" | source: {}", self.request.root), Style::default().fg(Color::Gray)),
        ]));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, layout: &DashboardLayout) {
        match &self.phase {
            Phase::Loading => {
                let msg = Paragraph::new("Loading indicator data...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, centered_line(layout.body));
            }
            Phase::Failed(message) => {
                let msg = Paragraph::new(message.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
                frame.render_widget(msg, centered_line(layout.body));
            }
            Phase::Ready(state) => {
                let frames = state.frames();
                for ((&card, chart), binding) in layout.cards.iter().zip(&frames).zip(state.bindings()) {
                    draw_card(frame, card, chart, binding.descriptor);
                }
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.picker.is_some() {
            "type to filter  ↑/↓ move  Enter select  Esc close"
        } else {
            "mouse/←/→ year  Esc clear  c country  [/] prev/next  r reload  q quit"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_card(frame: &mut ratatui::Frame<'_>, card: Rect, chart: &ChartFrame, descriptor: &IndicatorDescriptor) {
    let color = term_color(descriptor.color);
    let block = Block::default().borders(Borders::ALL).title(Line::from(vec![
        Span::styled(chart.title, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", chart.subtitle), Style::default().fg(Color::Gray)),
    ]));
    frame.render_widget(block, card);

    let parts = card_layout(card);
    let readout = Line::from(vec![
        Span::styled(&chart.readout.value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(&chart.readout.caption, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(readout), parts.readout);

    frame.render_widget(Clear, parts.chart);
    frame.render_widget(
        TimelineChart {
            frame: chart,
            color: descriptor.color,
        },
        parts.chart,
    );
    if let Some((x, y)) = chart.readout.marker_screen.and_then(|p| marker_cell(parts.chart, p)) {
        frame
            .buffer_mut()
            .set_string(x, y, "●", Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    }
    if let Some(insets) = parts.insets {
        draw_axis_ticks(frame, parts.plot, parts.chart, insets, chart, descriptor.format);
    }
}

/// Absolute cell for a viewport-relative marker, if it lands inside `chart`.
fn marker_cell(chart: Rect, p: ScreenPoint) -> Option<(u16, u16)> {
    let (x, y) = (p.x.round(), p.y.round());
    if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
        return None;
    }
    let (x, y) = (x as u32, y as u32);
    (x < u32::from(chart.width) && y < u32::from(chart.height)).then(|| (chart.x + x as u16, chart.y + y as u16))
}

fn draw_picker(frame: &mut ratatui::Frame<'_>, picker: &EntityPicker, groups: &EntityGroups) {
    let area = centered_rect(frame.area(), 50, 70);
    frame.render_widget(Clear, area);

    let rows = picker.rows(groups);
    let selected_row = rows
        .iter()
        .position(|row| matches!(row, PickerRow::Entity { selected: true, .. }));

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Span::styled("No matches", Style::default().fg(Color::Gray)))]
    } else {
        rows.iter()
            .map(|row| match row {
                PickerRow::Header(label) => ListItem::new(Span::styled(
                    *label,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                PickerRow::Entity { entity, .. } => ListItem::new(format!("{} ({})", entity.name, entity.code)),
            })
            .collect()
    };

    let title = format!("Country: {}_", picker.query());
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("» ");

    let mut state = ListState::default();
    state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut state);
}

fn term_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

fn terminal_area<B: Backend>(terminal: &Terminal<B>) -> Result<Rect, AppError> {
    let size = terminal
        .size()
        .map_err(|e| AppError::new(4, format!("Failed to query terminal size: {e}")))?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

impl From<Rect> for Viewport {
    fn from(r: Rect) -> Self {
        Viewport {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DashboardLayout {
    header: Rect,
    body: Rect,
    cards: Vec<Rect>,
    footer: Rect,
}

/// Header, chart grid, footer. Two columns once the terminal is wide enough.
fn dashboard_layout(area: Rect, charts: usize) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    let body = chunks[1];

    let mut cards = Vec::with_capacity(charts);
    if charts > 0 {
        let cols = if body.width >= 100 && charts > 1 { 2 } else { 1 };
        let rows = charts.div_ceil(cols);

        let row_rects = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
            .split(body);
        for row in row_rects.iter() {
            let col_rects = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row);
            cards.extend(col_rects.iter().copied());
        }
        cards.truncate(charts);
    }

    DashboardLayout {
        header: chunks[0],
        body,
        cards,
        footer: chunks[2],
    }
}

/// Chart surfaces (in terminal cells) for the current terminal size.
fn chart_viewports(area: Rect, charts: usize) -> Vec<Viewport> {
    dashboard_layout(area, charts)
        .cards
        .into_iter()
        .map(|card| card_layout(card).chart.into())
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct CardLayout {
    /// Value and caption line.
    readout: Rect,
    /// Everything below the readout, including tick label cells.
    plot: Rect,
    /// The plotting surface itself.
    chart: Rect,
    insets: Option<AxisInsets>,
}

fn card_layout(card: Rect) -> CardLayout {
    let inner = Block::default().borders(Borders::ALL).inner(card);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    let (chart, insets) = chart_layout(chunks[1]);
    CardLayout {
        readout: chunks[0],
        plot: chunks[1],
        chart,
        insets,
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 0,
        bottom: 1,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 2 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    desc: &ChartFrame,
    format: ValueFormat,
) {
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = desc.x_bounds;
    let [y0, y1] = desc.y_bounds;

    let x_ticks = 5usize;
    for i in 0..x_ticks {
        let u = i as f64 / (x_ticks as f64 - 1.0);
        let label = format!("{:.0}", x0 + u * (x1 - x0));
        let label_len = label.len() as u16;
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let start = x
            .saturating_sub(label_len / 2)
            .min(inner.x + inner.width - label_len);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let y_ticks = if chart.height >= 6 { 3usize } else { 2 };
    for i in 0..y_ticks {
        let u = i as f64 / (y_ticks as f64 - 1.0);
        let label = format.format(Some(y0 + u * (y1 - y0)));
        let label_len = label.chars().count() as u16;
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: area.height.min(1),
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::data::{DataRoot, Registry};
    use crate::domain::CATALOG;
    use crate::error::LOAD_FAILED_MESSAGE;
    use crate::io::parse_dataset;
    use crate::sync::Cursor;

    const EXPORT: &str = "\"Data Source\",\"World Development Indicators\",\n\
\n\
\"Last Updated Date\",\"2025-01-28\",\n\
\n\
\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"1974\",\"1975\",\"1976\",\n\
\"Nigeria\",\"NGA\",\"X\",\"X\",\"1\",\"2\",\"3\",\n\
\"World\",\"WLD\",\"X\",\"X\",\"4\",\"5\",\"\",\n";

    fn request() -> LoadRequest {
        LoadRequest {
            root: DataRoot::Local(PathBuf::from("Datasets")),
            indicators: CATALOG.iter().take(3).collect(),
        }
    }

    fn ready_app(area: Rect) -> App {
        let request = request();
        let datasets = request.indicators.iter().map(|_| parse_dataset(EXPORT)).collect();
        let registry = Registry::from_datasets(request.indicators.clone(), datasets);
        let mut state = AppState::new(Arc::new(registry), None);
        state.set_viewports(chart_viewports(area, request.indicators.len()));

        let mut app = App::new(request, None);
        app.phase = Phase::Ready(state);
        app
    }

    fn state(app: &App) -> &AppState {
        match &app.phase {
            Phase::Ready(state) => state,
            _ => panic!("app not ready"),
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn wide_terminals_get_two_columns() {
        let area = Rect::new(0, 0, 160, 50);
        let layout = dashboard_layout(area, 7);
        assert_eq!(layout.cards.len(), 7);
        assert_eq!(layout.cards[0].y, layout.cards[1].y);
        assert!(layout.cards[1].x > layout.cards[0].x);

        let narrow = dashboard_layout(Rect::new(0, 0, 80, 50), 7);
        assert!(narrow.cards.iter().all(|c| c.x == narrow.cards[0].x));
    }

    #[test]
    fn viewports_are_disjoint_and_on_screen() {
        let area = Rect::new(0, 0, 160, 60);
        let viewports = chart_viewports(area, 7);
        assert_eq!(viewports.len(), 7);
        for (i, a) in viewports.iter().enumerate() {
            assert!(a.width > 0 && a.height > 0);
            assert!(a.x + a.width <= area.width && a.y + a.height <= area.height);
            for b in &viewports[i + 1..] {
                let overlap = a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height;
                assert!(!overlap, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn hovering_one_chart_moves_every_readout() {
        let area = Rect::new(0, 0, 160, 50);
        let mut app = ready_app(area);
        let vp = state(&app).bindings()[1].viewport;

        let moved = app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: vp.x,
            row: vp.y,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert!(moved);
        assert_eq!(state(&app).cursor(), Cursor::Hovering(1960));
        assert!(
            state(&app)
                .frames()
                .iter()
                .all(|f| f.readout.caption == "No data for 1960" && f.readout.crosshair == Some(1960))
        );

        app.handle_key(KeyCode::Esc);
        assert_eq!(state(&app).cursor(), Cursor::Idle);
    }

    #[test]
    fn arrow_keys_step_the_shared_year() {
        let mut app = ready_app(Rect::new(0, 0, 120, 40));
        app.handle_key(KeyCode::Right);
        assert_eq!(state(&app).cursor(), Cursor::Hovering(1960));
        for _ in 0..15 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(state(&app).cursor(), Cursor::Hovering(1975));
        assert!(state(&app).frames().iter().all(|f| f.readout.caption == "Year 1975"));
    }

    #[test]
    fn picker_filters_and_selects() {
        let mut app = ready_app(Rect::new(0, 0, 120, 40));
        assert_eq!(state(&app).selected(), "WLD");

        app.handle_key(KeyCode::Char('c'));
        assert!(app.picker.is_some());
        for ch in "nig".chars() {
            assert_eq!(app.handle_key(KeyCode::Char(ch)), KeyOutcome::Continue);
        }
        app.handle_key(KeyCode::Enter);

        assert!(app.picker.is_none());
        assert_eq!(state(&app).selected(), "NGA");
        assert!(app.status.contains("Nigeria"));
    }

    #[test]
    fn quit_and_reload_keys() {
        let mut app = ready_app(Rect::new(0, 0, 120, 40));
        assert_eq!(app.handle_key(KeyCode::Char('r')), KeyOutcome::Reload);
        assert_eq!(app.handle_key(KeyCode::Char('q')), KeyOutcome::Quit);

        // While the picker is open, letters are filter input.
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.handle_key(KeyCode::Char('q')), KeyOutcome::Continue);
    }

    #[test]
    fn popup_fits_very_wide_terminals() {
        // Struct literal: `Rect::new` would clamp the area.
        let area = Rect {
            x: 0,
            y: 0,
            width: u16::MAX,
            height: 400,
        };
        let popup = centered_rect(area, 50, 70);
        assert_eq!(popup.width, u16::MAX / 2);
        assert_eq!(popup.height, 280);
        assert!(u32::from(popup.x) + u32::from(popup.width) <= u32::from(area.width));
    }

    #[test]
    fn marker_lands_on_the_hovered_point() {
        let mut app = ready_app(Rect::new(0, 0, 160, 50));
        for _ in 0..16 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(state(&app).cursor(), Cursor::Hovering(1975));

        let binding = &state(&app).bindings()[0];
        let vp = binding.viewport;
        let chart = Rect::new(vp.x, vp.y, vp.width, vp.height);
        let frame = binding.frame(state(&app).cursor());
        let (x, y) = frame
            .readout
            .marker_screen
            .and_then(|p| marker_cell(chart, p))
            .unwrap();

        // World 1975 = 5.0, the top of the 4.0..5.0 extent before padding.
        assert_eq!(x, vp.x + binding.x.map(1975.0).round() as u16);
        assert_eq!(y, vp.y + binding.y.map(5.0).round() as u16);
        assert!(vp.contains(x, y));

        let outside = ScreenPoint {
            x: f64::from(vp.width),
            y: 0.0,
        };
        assert_eq!(marker_cell(chart, outside), None);
    }

    #[test]
    fn failed_load_renders_only_the_message() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut app = App::new(request(), None);
        app.phase = Phase::Failed(LOAD_FAILED_MESSAGE.to_string());
        app.redraw(&mut terminal).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Error loading data."));
        assert!(!text.contains(CATALOG[0].title));
    }

    #[test]
    fn loading_frame_shows_indicator() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let mut app = App::new(request(), None);
        app.redraw(&mut terminal).unwrap();
        assert!(screen_text(&terminal).contains("Loading indicator data..."));
    }
}
