//! Interactive board: lists with nested items, inline editing, and keyboard
//! drag-and-drop. Grabbing an item and dropping it somewhere produces the
//! same source/destination shape a pointer drag would, and goes through the
//! drag-end resolver like any other move.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::dragdrop::{self, DragSpot};
use crate::editor::{self, CollapseState};
use crate::hierarchy::{LoadOutcome, Snapshot};
use crate::model::{Item, ParentKind};
use crate::remote::ApiClient;
use crate::session::SessionStore;

mod input;
use input::Input;

pub fn run(store: &SessionStore) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the board requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::open(store.clone())?;
    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Auth,
    Board,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthFocus {
    Email,
    Password,
}

#[derive(Clone, Debug)]
enum PromptKind {
    NewList,
    RenameList(String),
    NewItem {
        parent: ParentKind,
        container_id: String,
    },
    EditItem(String),
}

struct Prompt {
    kind: PromptKind,
    label: String,
    input: Input,
}

struct Grab {
    item_id: String,
    source: DragSpot,
}

/// One visible line of the board.
#[derive(Clone, Debug)]
enum Row {
    ListHeader {
        list_id: String,
        title: String,
    },
    ItemRow {
        item_id: String,
        list_id: String,
        container_id: String,
        index: usize,
        depth: usize,
        content: String,
        complete: bool,
        collapsed: bool,
        has_children: bool,
    },
}

struct App {
    store: SessionStore,
    api: Option<ApiClient>,
    snapshot: Snapshot,
    collapse: CollapseState,
    cursor: usize,
    grab: Option<Grab>,
    prompt: Option<Prompt>,
    status: String,
    screen: Screen,
    email: Input,
    password: Input,
    focus: AuthFocus,
    quit: bool,
}

impl App {
    fn open(store: SessionStore) -> Result<Self> {
        let mut app = Self {
            store,
            api: None,
            snapshot: Snapshot::new(),
            collapse: CollapseState::new(),
            cursor: 0,
            grab: None,
            prompt: None,
            status: String::new(),
            screen: Screen::Auth,
            email: Input::default(),
            password: Input::default(),
            focus: AuthFocus::Email,
            quit: false,
        };

        let cfg = app.store.read()?;
        if let Some(identity) = cfg.identity {
            let api = ApiClient::with_identity(&cfg.base_url, &identity.user_id)?;
            let mut snapshot = Snapshot::new();
            match snapshot.load(&api) {
                Ok(LoadOutcome::Loaded) => {
                    app.api = Some(api);
                    app.snapshot = snapshot;
                    app.screen = Screen::Board;
                }
                Ok(LoadOutcome::LoggedOut) => {
                    app.store.clear_identity()?;
                    app.status = "Session expired; log in again".to_string();
                }
                Err(err) => {
                    app.status = format!("{:#}", err);
                }
            }
        }

        Ok(app)
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for list in self.snapshot.lists() {
            rows.push(Row::ListHeader {
                list_id: list.id.clone(),
                title: list.title.clone(),
            });
            push_item_rows(&mut rows, &list.id, &list.id, &list.items, 0, &self.collapse);
        }
        rows
    }

    fn selected_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// A mutation just reloaded (or tried to). Fall back to the login
    /// screen when the server stopped recognizing us.
    fn after_reload(&mut self, outcome: LoadOutcome) -> Result<()> {
        match outcome {
            LoadOutcome::Loaded => {}
            LoadOutcome::LoggedOut => {
                self.store.clear_identity()?;
                self.api = None;
                self.snapshot = Snapshot::new();
                self.screen = Screen::Auth;
                self.status = "Session expired; log in again".to_string();
            }
        }
        self.grab = None;
        self.clamp_cursor();
        Ok(())
    }
}

fn push_item_rows(
    rows: &mut Vec<Row>,
    list_id: &str,
    container_id: &str,
    items: &[Item],
    depth: usize,
    collapse: &CollapseState,
) {
    for (index, item) in items.iter().enumerate() {
        let collapsed = collapse.is_collapsed(&item.id);
        rows.push(Row::ItemRow {
            item_id: item.id.clone(),
            list_id: list_id.to_string(),
            container_id: container_id.to_string(),
            index,
            depth,
            content: item.content.clone(),
            complete: item.complete,
            collapsed,
            has_children: !item.sub_items.is_empty(),
        });
        if !collapsed {
            push_item_rows(rows, list_id, &item.id, &item.sub_items, depth + 1, collapse);
        }
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app)).context("draw frame")?;

        if app.quit {
            return Ok(());
        }

        let Event::Key(key) = event::read().context("read terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.screen {
            Screen::Auth => handle_auth_key(app, key)?,
            Screen::Board => handle_board_key(app, key)?,
        }
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit = true,
            KeyCode::Char('r') => submit_auth(app, true)?,
            _ => {}
        }
        return Ok(());
    }

    let field = match app.focus {
        AuthFocus::Email => &mut app.email,
        AuthFocus::Password => &mut app.password,
    };

    match key.code {
        KeyCode::Esc => app.quit = true,
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            app.focus = match app.focus {
                AuthFocus::Email => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Email,
            };
        }
        KeyCode::Enter => match app.focus {
            AuthFocus::Email => app.focus = AuthFocus::Password,
            AuthFocus::Password => submit_auth(app, false)?,
        },
        KeyCode::Char(c) => field.insert_char(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        _ => {}
    }
    Ok(())
}

fn submit_auth(app: &mut App, register: bool) -> Result<()> {
    let email = app.email.buf.trim().to_string();
    let password = app.password.buf.clone();
    if email.is_empty() || password.trim().is_empty() {
        app.status = "Email and password are required".to_string();
        return Ok(());
    }

    let cfg = app.store.read()?;
    let api = ApiClient::new(&cfg.base_url)?;

    if register {
        match api.register(&email, &password) {
            Ok(()) => app.status = "Registered; press Enter to log in".to_string(),
            Err(err) => app.status = format!("{:#}", err),
        }
        return Ok(());
    }

    match api.login(&email, &password) {
        Ok(user_id) => {
            app.store.set_identity(&user_id, &email)?;
            let api = ApiClient::with_identity(&cfg.base_url, &user_id)?;
            let mut snapshot = Snapshot::new();
            match snapshot.load(&api)? {
                LoadOutcome::Loaded => {
                    app.api = Some(api);
                    app.snapshot = snapshot;
                    app.screen = Screen::Board;
                    app.password.clear();
                    app.status.clear();
                    app.cursor = 0;
                }
                LoadOutcome::LoggedOut => {
                    app.store.clear_identity()?;
                    app.status = "Login rejected".to_string();
                }
            }
        }
        Err(err) => app.status = format!("{:#}", err),
    }
    Ok(())
}

fn handle_board_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.prompt.is_some() {
        return handle_prompt_key(app, key);
    }

    let Some(api) = app.api.clone() else {
        app.screen = Screen::Auth;
        return Ok(());
    };

    match key.code {
        KeyCode::Char('q') => app.quit = true,

        KeyCode::Char('r') => {
            let outcome = app.snapshot.load(&api)?;
            app.after_reload(outcome)?;
        }

        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor += 1;
            app.clamp_cursor();
        }

        KeyCode::Char(' ') => {
            if let Some(Row::ItemRow { item_id, .. }) = app.selected_row() {
                let outcome = editor::toggle_complete(&api, &mut app.snapshot, &item_id)?;
                app.after_reload(outcome)?;
            }
        }

        KeyCode::Char('c') => {
            if let Some(Row::ItemRow { item_id, .. }) = app.selected_row() {
                app.collapse.toggle(&item_id);
                app.clamp_cursor();
            }
        }

        KeyCode::Char('N') => {
            app.prompt = Some(Prompt {
                kind: PromptKind::NewList,
                label: "new list".to_string(),
                input: Input::default(),
            });
        }

        KeyCode::Char('n') => {
            let list_id = match app.selected_row() {
                Some(Row::ListHeader { list_id, .. }) => Some(list_id),
                Some(Row::ItemRow { list_id, .. }) => Some(list_id),
                None => None,
            };
            if let Some(list_id) = list_id {
                app.prompt = Some(Prompt {
                    kind: PromptKind::NewItem {
                        parent: ParentKind::List,
                        container_id: list_id,
                    },
                    label: "new item".to_string(),
                    input: Input::default(),
                });
            } else {
                app.status = "No list selected (N creates one)".to_string();
            }
        }

        KeyCode::Char('s') => {
            if let Some(Row::ItemRow { item_id, depth, .. }) = app.selected_row() {
                if editor::can_add_sub_item(depth) {
                    app.prompt = Some(Prompt {
                        kind: PromptKind::NewItem {
                            parent: ParentKind::Item,
                            container_id: item_id,
                        },
                        label: "new sub-item".to_string(),
                        input: Input::default(),
                    });
                } else {
                    app.status = "Sub-items can only be added two levels deep".to_string();
                }
            }
        }

        KeyCode::Char('e') => {
            if let Some(Row::ItemRow {
                item_id, content, ..
            }) = app.selected_row()
            {
                let mut input = Input::default();
                input.set(content);
                app.prompt = Some(Prompt {
                    kind: PromptKind::EditItem(item_id),
                    label: "edit item".to_string(),
                    input,
                });
            }
        }

        KeyCode::Char('t') => {
            let target = match app.selected_row() {
                Some(Row::ListHeader { list_id, title }) => Some((list_id, title)),
                Some(Row::ItemRow { list_id, .. }) => app
                    .snapshot
                    .list(&list_id)
                    .map(|l| (l.id.clone(), l.title.clone())),
                None => None,
            };
            if let Some((list_id, title)) = target {
                let mut input = Input::default();
                input.set(title);
                app.prompt = Some(Prompt {
                    kind: PromptKind::RenameList(list_id),
                    label: "rename list".to_string(),
                    input,
                });
            }
        }

        KeyCode::Char('d') => match app.selected_row() {
            Some(Row::ItemRow { item_id, .. }) => {
                let outcome = editor::delete_item(&api, &mut app.snapshot, &item_id)?;
                app.after_reload(outcome)?;
            }
            Some(Row::ListHeader { list_id, .. }) => {
                app.snapshot.remove_list(&api, &list_id);
                app.clamp_cursor();
            }
            None => {}
        },

        KeyCode::Char('g') => match app.grab.take() {
            None => {
                if let Some(Row::ItemRow {
                    item_id,
                    container_id,
                    index,
                    ..
                }) = app.selected_row()
                {
                    app.grab = Some(Grab {
                        item_id,
                        source: DragSpot::new(&container_id, index),
                    });
                    app.status = "Moving: navigate and press g to drop, i to drop into, Esc to cancel"
                        .to_string();
                }
            }
            Some(grab) => {
                let destination = match app.selected_row() {
                    Some(Row::ItemRow {
                        container_id,
                        index,
                        ..
                    }) => Some(DragSpot::new(&container_id, index)),
                    Some(Row::ListHeader { list_id, .. }) => {
                        // Dropping on a header lands at the end of that list.
                        let len = app.snapshot.container_len(&list_id).unwrap_or(0);
                        Some(DragSpot::new(&list_id, len))
                    }
                    None => None,
                };
                let outcome = dragdrop::perform_drag(
                    &api,
                    &mut app.snapshot,
                    &grab.source,
                    destination.as_ref(),
                    &grab.item_id,
                )?;
                app.status.clear();
                app.after_reload(outcome)?;
            }
        },

        KeyCode::Char('i') => {
            if let Some(grab) = app.grab.take() {
                let destination = match app.selected_row() {
                    Some(Row::ItemRow { item_id, .. }) if item_id != grab.item_id => {
                        let len = app.snapshot.container_len(&item_id).unwrap_or(0);
                        Some(DragSpot::new(&item_id, len))
                    }
                    _ => None,
                };
                let outcome = dragdrop::perform_drag(
                    &api,
                    &mut app.snapshot,
                    &grab.source,
                    destination.as_ref(),
                    &grab.item_id,
                )?;
                app.status.clear();
                app.after_reload(outcome)?;
            }
        }

        KeyCode::Esc => {
            app.grab = None;
            app.status.clear();
        }

        _ => {}
    }
    Ok(())
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.prompt = None;
            return Ok(());
        }
        KeyCode::Enter => {
            if let Some(prompt) = app.prompt.take() {
                commit_prompt(app, prompt)?;
            }
            return Ok(());
        }
        _ => {}
    }

    if let Some(prompt) = app.prompt.as_mut() {
        match key.code {
            KeyCode::Char(c) => prompt.input.insert_char(c),
            KeyCode::Backspace => prompt.input.backspace(),
            KeyCode::Delete => prompt.input.delete(),
            KeyCode::Left => prompt.input.move_left(),
            KeyCode::Right => prompt.input.move_right(),
            _ => {}
        }
    }
    Ok(())
}

fn commit_prompt(app: &mut App, prompt: Prompt) -> Result<()> {
    let Some(api) = app.api.clone() else {
        return Ok(());
    };
    let draft = prompt.input.buf;

    match prompt.kind {
        PromptKind::NewList => {
            app.snapshot.create_list(&api, &draft)?;
            app.clamp_cursor();
        }
        PromptKind::RenameList(list_id) => {
            let outcome = editor::rename_list(&api, &mut app.snapshot, &list_id, &draft)?;
            app.after_reload(outcome)?;
        }
        PromptKind::NewItem {
            parent: ParentKind::List,
            container_id,
        } => {
            let outcome = editor::create_item(&api, &mut app.snapshot, &container_id, &draft)?;
            app.after_reload(outcome)?;
        }
        PromptKind::NewItem {
            parent: ParentKind::Item,
            container_id,
        } => {
            let outcome = editor::create_sub_item(&api, &mut app.snapshot, &container_id, &draft)?;
            app.after_reload(outcome)?;
        }
        PromptKind::EditItem(item_id) => {
            let outcome = editor::edit_item_content(&api, &mut app.snapshot, &item_id, &draft)?;
            app.after_reload(outcome)?;
        }
    }
    Ok(())
}

fn draw(f: &mut ratatui::Frame, app: &mut App) {
    match app.screen {
        Screen::Auth => draw_auth(f, app),
        Screen::Board => draw_board(f, app),
    }
}

fn draw_auth(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let mask: String = "*".repeat(app.password.buf.chars().count());
    let field = |label: &str, value: &str, focused: bool| -> Line<'static> {
        let marker = if focused { "> " } else { "  " };
        Line::from(vec![
            Span::styled(
                format!("{}{:<10}", marker, label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.to_string()),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  stacklist",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("email", &app.email.buf, app.focus == AuthFocus::Email),
        field("password", &mask, app.focus == AuthFocus::Password),
    ];

    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("log in"));
    f.render_widget(body, chunks[0]);

    let status = Paragraph::new(app.status.as_str()).style(Style::default().fg(Color::Yellow));
    f.render_widget(status, chunks[1]);

    let hint = Paragraph::new("Enter: next/log in   Ctrl-r: register   Esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[2]);
}

fn draw_board(f: &mut ratatui::Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let rows = app.rows();
    let items: Vec<ListItem> = rows.iter().map(|row| render_row(row, app)).collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("stacklist"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.cursor.min(rows.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    let status = Paragraph::new(app.status.as_str()).style(Style::default().fg(Color::Yellow));
    f.render_widget(status, chunks[1]);

    let bottom = match &app.prompt {
        Some(prompt) => format!("{}> {}", prompt.label, prompt.input.buf),
        None => {
            "N list  n item  s sub  e edit  t title  d del  space done  c fold  g move  q quit"
                .to_string()
        }
    };
    let bottom = Paragraph::new(bottom).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bottom, chunks[2]);
}

fn render_row(row: &Row, app: &App) -> ListItem<'static> {
    match row {
        Row::ListHeader { title, .. } => ListItem::new(Line::from(Span::styled(
            format!("▌ {}", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        Row::ItemRow {
            item_id,
            depth,
            content,
            complete,
            collapsed,
            has_children,
            ..
        } => {
            let indent = "  ".repeat(depth + 1);
            let fold = if *has_children {
                if *collapsed { "+" } else { "-" }
            } else {
                " "
            };
            let mark = if *complete { "[x]" } else { "[ ]" };

            let grabbed = app
                .grab
                .as_ref()
                .map(|g| g.item_id == *item_id)
                .unwrap_or(false);
            let mut style = Style::default();
            if *complete {
                style = style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
            }
            if grabbed {
                style = style.fg(Color::Magenta).add_modifier(Modifier::ITALIC);
            }

            ListItem::new(Line::from(Span::styled(
                format!("{}{} {} {}", indent, fold, mark, content),
                style,
            )))
        }
    }
}
