//! Interactive list console using ratatui + crossterm.
//!
//! Shows one paginated list with search, status filter, sort and page-size
//! controls, a record view, a not-found view and a log panel. Page loads run
//! on tokio tasks and come back over a channel; the list controller drops
//! any that were overtaken by a newer request.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use kyc::controller::{ListController, ListEvent, ListState, PageRequest};
use kyc::{
    Action, AppState, FilterCondition, KycError, LoadedPage, PageOrigin, PAGE_SIZE_OPTIONS,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::commands::{admin_state, Listed};
use crate::config::ConsoleConfig;
use crate::context::{Context, Source};
use crate::error::ConsoleError;
use crate::logging::LogBuffer;

/// Pending page loads and lookups are bounded by this many messages.
const CHANNEL_CAPACITY: usize = 32;

const HELP: &str = " ↑↓ select  ⏎ open  n/p page  g/G first/last  z size  s sort  o order  f status  / search  i id  r reload  J/K move  w save  q quit";

// ---------------------------------------------------------------------------
// Internal types
// ---------------------------------------------------------------------------

enum View<T> {
    List,
    Record(Box<T>),
    NotFound { entity: &'static str, id: String },
}

enum Prompt {
    None,
    Search(String),
    GoTo(String),
}

/// Local reorder not yet saved: the page as loaded and as rearranged.
struct PendingOrder<T> {
    before: Vec<T>,
    after: Vec<T>,
}

type PageResult<T> = (PageRequest, kyc::Result<LoadedPage<T>>);
type LookupResult<T> = (String, kyc::Result<T>);

struct Console<T: Listed> {
    ctx: Arc<Context>,
    controller: ListController<T, Source<T>>,
    app: AppState,
    view: View<T>,
    prompt: Prompt,
    selected: usize,
    sort_idx: usize,
    pending_order: Option<PendingOrder<T>>,
    page_tx: mpsc::Sender<PageResult<T>>,
    lookup_tx: mpsc::Sender<LookupResult<T>>,
    quit: bool,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the console for entity `T` until `q` or cancellation.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal cannot be set up or the sample
/// dataset cannot be read.
pub async fn run_console<T: Listed>(
    ctx: Context,
    config: ConsoleConfig,
    level: Option<String>,
    logs: LogBuffer,
    cancel: CancellationToken,
) -> Result<(), ConsoleError> {
    let ctx = Arc::new(ctx);
    let loader = Arc::new(ctx.loader::<T>()?);
    let mut controller =
        ListController::new(loader, T::default_sort()).with_page_size(config.page_size);
    if let Some(level) = &level {
        controller = controller.with_scope(FilterCondition::equals("levelId", level.as_str()));
    }

    let (page_tx, mut page_rx) = mpsc::channel::<PageResult<T>>(CHANNEL_CAPACITY);
    let (lookup_tx, mut lookup_rx) = mpsc::channel::<LookupResult<T>>(CHANNEL_CAPACITY);

    let mut console = Console {
        ctx,
        controller,
        app: admin_state(),
        view: View::List,
        prompt: Prompt::None,
        selected: 0,
        sort_idx: 0,
        pending_order: None,
        page_tx,
        lookup_tx,
        quit: false,
    };

    info!(entity = T::NAME, offline = console.ctx.offline, "console starting");
    let request = console.controller.begin_reload();
    console.spawn_load(request);

    // Set up terminal.
    enable_raw_mode().map_err(|e| ConsoleError::Terminal(format!("enable raw mode: {e}")))?;
    io::stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| ConsoleError::Terminal(format!("enter alternate screen: {e}")))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(|e| ConsoleError::Terminal(format!("create terminal: {e}")))?;

    let mut render_interval = tokio::time::interval(config.render_interval);

    // Main event loop.
    let result: Result<(), ConsoleError> = loop {
        if console.quit {
            break Ok(());
        }

        tokio::select! {
            Some((request, outcome)) = page_rx.recv() => {
                console.on_page(&request, outcome);
            }

            Some((id, outcome)) = lookup_rx.recv() => {
                console.on_lookup(id, outcome);
            }

            // Render tick, also polls keyboard input.
            _ = render_interval.tick() => {
                while event::poll(Duration::ZERO).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press {
                            console.on_key(key).await;
                        }
                    }
                }

                if !console.quit {
                    let log_lines = logs.tail(config.log_capacity);
                    let _ = terminal.draw(|frame| console.render(frame, &log_lines));
                }
            }

            _ = cancel.cancelled() => {
                break Ok(());
            }
        }
    };

    restore_terminal(&mut terminal);
    result
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl<T: Listed> Console<T> {
    fn spawn_load(&self, request: PageRequest) {
        let loader = self.controller.loader();
        let tx = self.page_tx.clone();
        tokio::spawn(async move {
            let outcome = loader.load_page(&request.params).await;
            let _ = tx.send((request, outcome)).await;
        });
    }

    fn send(&mut self, event: ListEvent) {
        let request = self.controller.dispatch(event);
        self.spawn_load(request);
    }

    fn spawn_lookup(&self, id: String) {
        let ctx = Arc::clone(&self.ctx);
        let tx = self.lookup_tx.clone();
        tokio::spawn(async move {
            let outcome = ctx.find::<T>(&id).await;
            let _ = tx.send((id, outcome)).await;
        });
    }

    fn on_page(&mut self, request: &PageRequest, outcome: kyc::Result<LoadedPage<T>>) {
        let origin = outcome.as_ref().ok().map(|p| p.origin);
        if !self.controller.complete(request, outcome) {
            return;
        }
        if self.pending_order.take().is_some() {
            warn!("unsaved order discarded");
        }
        let state = self.controller.state();
        self.selected = self.selected.min(state.items.len().saturating_sub(1));
        match (&state.error, origin) {
            (Some(e), _) => error!(error = %e, "page load failed"),
            (None, Some(PageOrigin::Fallback)) => {
                info!(page = state.page, total = state.total_count, "showing sample data")
            }
            _ => info!(page = state.page, total = state.total_count, "page loaded"),
        }
    }

    fn on_lookup(&mut self, id: String, outcome: kyc::Result<T>) {
        match outcome {
            Ok(record) => self.view = View::Record(Box::new(record)),
            Err(KycError::NotFound { entity, id }) => {
                warn!(entity, id = %id, "not found");
                self.view = View::NotFound { entity, id };
            }
            Err(e) => error!(id = %id, error = %e, "lookup failed"),
        }
    }

    fn rows(&self) -> &[T] {
        match &self.pending_order {
            Some(order) => &order.after,
            None => &self.controller.state().items,
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

impl<T: Listed> Console<T> {
    async fn on_key(&mut self, key: KeyEvent) {
        match std::mem::replace(&mut self.prompt, Prompt::None) {
            Prompt::Search(text) => return self.on_prompt_key(key, text, true),
            Prompt::GoTo(text) => return self.on_prompt_key(key, text, false),
            Prompt::None => {}
        }

        if !matches!(self.view, View::List) {
            match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.view = View::List,
                KeyCode::Char('q') => self.quit = true,
                _ => {}
            }
            return;
        }

        let state = self.controller.state();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rows().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter => {
                if let Some(record) = self.rows().get(self.selected) {
                    self.view = View::Record(Box::new(record.clone()));
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                if let Some(event) = self.controller.next_page_event() {
                    self.send(event);
                }
            }
            KeyCode::Left | KeyCode::Char('p') => {
                if let Some(event) = self.controller.previous_page_event() {
                    self.send(event);
                }
            }
            KeyCode::Char('g') => {
                if let Some(event) = self.controller.first_page_event() {
                    self.send(event);
                }
            }
            KeyCode::Char('G') => {
                if let Some(event) = self.controller.last_page_event() {
                    self.send(event);
                }
            }
            KeyCode::Char('z') => {
                let next = next_page_size(state.page_size);
                self.send(ListEvent::SetPageSize(next));
            }
            KeyCode::Char('s') => {
                if !T::SORT_FIELDS.is_empty() {
                    self.sort_idx = (self.sort_idx + 1) % T::SORT_FIELDS.len();
                    self.send(ListEvent::SetSortField(T::SORT_FIELDS[self.sort_idx].into()));
                }
            }
            KeyCode::Char('o') => self.send(ListEvent::ToggleSortOrder),
            KeyCode::Char('f') => {
                let next = state.status_filter.next();
                self.send(ListEvent::SetStatusFilter(next));
            }
            KeyCode::Char('/') => self.prompt = Prompt::Search(state.search.clone()),
            KeyCode::Char('i') => self.prompt = Prompt::GoTo(String::new()),
            KeyCode::Char('r') => self.send(ListEvent::Reload),
            KeyCode::Char('J') => self.move_selected(true),
            KeyCode::Char('K') => self.move_selected(false),
            KeyCode::Char('w') => self.save_order().await,
            _ => {}
        }
    }

    fn on_prompt_key(&mut self, key: KeyEvent, mut text: String, search: bool) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                if search {
                    self.send(ListEvent::SetSearch(text));
                } else if !text.trim().is_empty() {
                    self.spawn_lookup(text.trim().to_string());
                }
                return;
            }
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            _ => {}
        }
        self.prompt = if search {
            Prompt::Search(text)
        } else {
            Prompt::GoTo(text)
        };
    }

    fn move_selected(&mut self, down: bool) {
        let len = self.rows().len();
        let from = self.selected;
        let to = if down {
            from + 1
        } else {
            match from.checked_sub(1) {
                Some(to) => to,
                None => return,
            }
        };
        if to >= len {
            return;
        }

        let items = &self.controller.state().items;
        let order = self.pending_order.get_or_insert_with(|| PendingOrder {
            before: items.clone(),
            after: items.clone(),
        });
        if T::move_row(&mut order.after, from, to) {
            self.selected = to;
        } else {
            self.pending_order = None;
            warn!(entity = T::NAME, "this list cannot be reordered");
        }
    }

    async fn save_order(&mut self) {
        let Some(order) = self.pending_order.take() else {
            return;
        };
        match T::save_order(&self.ctx, &mut self.app, &order.before, &order.after).await {
            Ok(saved) => {
                info!(saved, "order saved");
                self.send(ListEvent::Reload);
            }
            Err(e) => {
                error!(error = %e, "saving order failed");
                self.app.apply(Action::OperationFailed(e.to_string()));
                self.pending_order = Some(order);
            }
        }
    }
}

/// The page size after `current` in the selector, wrapping around.
fn next_page_size(current: u32) -> u32 {
    PAGE_SIZE_OPTIONS
        .iter()
        .position(|&s| s == current)
        .and_then(|i| PAGE_SIZE_OPTIONS.get(i + 1))
        .copied()
        .unwrap_or(PAGE_SIZE_OPTIONS[0])
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

/// Restore terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    let _ = terminal.show_cursor();
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

// ---------------------------------------------------------------------------
// UI rendering
// ---------------------------------------------------------------------------

impl<T: Listed> Console<T> {
    fn render(&self, frame: &mut Frame, log_lines: &[String]) {
        let area = frame.area();

        // Layout: header, main panel, status line, log.
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),   // header
                Constraint::Ratio(3, 5), // list / record
                Constraint::Length(3),   // status
                Constraint::Min(5),      // log
            ])
            .split(area);

        let header = Paragraph::new(format!(" KYC CONSOLE - {} | 'q' to quit", T::PATH))
            .style(Style::default().fg(Color::White).bg(Color::Blue).bold())
            .alignment(Alignment::Center);
        frame.render_widget(header, main_layout[0]);

        match &self.view {
            View::List => self.render_list(frame, main_layout[1]),
            View::Record(record) => render_record(frame, main_layout[1], record.as_ref()),
            View::NotFound { entity, id } => render_not_found(frame, main_layout[1], entity, id),
        }
        self.render_status(frame, main_layout[2]);
        render_log(frame, main_layout[3], log_lines);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let state = self.controller.state();
        let header = Row::new(T::COLUMNS.iter().map(|c| Cell::from(*c)))
            .style(Style::default().fg(Color::Yellow).bold());
        let rows: Vec<Row> = self
            .rows()
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let row = Row::new(record.row());
                if i == self.selected {
                    row.style(Style::default().bg(Color::DarkGray))
                } else {
                    row
                }
            })
            .collect();
        let widths = vec![Constraint::Fill(1); T::COLUMNS.len()];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(list_title(state, self.pending_order.is_some()));
        frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.prompt {
            Prompt::Search(text) => Line::from(format!(" search: {text}_")),
            Prompt::GoTo(text) => Line::from(format!(" open id: {text}_")),
            Prompt::None => match (&self.controller.state().error, &self.app.admin.error) {
                (Some(e), _) | (None, Some(e)) => {
                    Line::styled(format!(" error: {e}"), Style::default().fg(Color::Red))
                }
                (None, None) => Line::styled(HELP, Style::default().fg(Color::DarkGray)),
            },
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

/// Block title: position, sort, filter, search and data source.
fn list_title<T>(state: &ListState<T>, unsaved: bool) -> String {
    let mut title = format!(
        " page {}/{} | {} total | {} {} | status: {} ",
        state.page,
        state.total_pages.max(1),
        state.total_count,
        state.sort_field,
        state.sort_order,
        state.status_filter.label(),
    );
    if !state.search.is_empty() {
        title.push_str(&format!("| search: {} ", state.search));
    }
    if state.origin == Some(PageOrigin::Fallback) {
        title.push_str("| sample data ");
    }
    if state.loading {
        title.push_str("| loading... ");
    }
    if unsaved {
        title.push_str("| unsaved order ");
    }
    title
}

fn render_record<T: Listed>(frame: &mut Frame, area: Rect, record: &T) {
    let lines: Vec<Line> = T::COLUMNS
        .iter()
        .zip(record.row())
        .map(|(column, value)| {
            Line::from(vec![
                Span::styled(format!(" {column:<14}"), Style::default().fg(Color::Yellow)),
                Span::raw(value),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} {} | Esc to return ", T::NAME, record.id()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_not_found(frame: &mut Frame, area: Rect, entity: &str, id: &str) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("{entity} {id:?} was not found"),
            Style::default().fg(Color::Red).bold(),
        ),
        Line::from(""),
        Line::styled("press Esc to return to the list", Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Not found ");
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

/// Render the log panel.
fn render_log(frame: &mut Frame, area: Rect, log_lines: &[String]) {
    // Show the newest lines that fit.
    let visible = area.height.saturating_sub(2) as usize;
    let start = log_lines.len().saturating_sub(visible);
    let lines: Vec<Line> = log_lines[start..]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Log ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc::controller::StatusFilter;
    use kyc::{KycStatus, PaginatedResponse, User};

    #[test]
    fn test_next_page_size_wraps() {
        assert_eq!(next_page_size(5), 10);
        assert_eq!(next_page_size(50), 100);
        assert_eq!(next_page_size(100), 5);
        assert_eq!(next_page_size(7), 5);
    }

    #[test]
    fn test_list_title_flags() {
        let loader = Arc::new(kyc::PageLoader::new(
            kyc::SampleData::new(kyc::samples::users()),
            None,
        ));
        let mut controller: ListController<User, kyc::SampleData<User>> =
            ListController::new(loader, "lastName");
        let request = controller.dispatch(ListEvent::SetStatusFilter(StatusFilter::Only(
            KycStatus::Approved,
        )));
        controller.complete(
            &request,
            Ok(LoadedPage {
                response: PaginatedResponse::empty(),
                origin: PageOrigin::Fallback,
            }),
        );
        let title = list_title(controller.state(), true);
        assert!(title.contains("page 1/1"));
        assert!(title.contains("lastName asc"));
        assert!(title.contains("status: Approved"));
        assert!(title.contains("sample data"));
        assert!(title.contains("unsaved order"));
        assert!(!title.contains("loading"));
    }
}
