// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use remould_app::numeric::format_dollars;
use remould_app::{
    AppCommand, AppEvent, AppState, DashboardStats, DialogVisibility, ImageRequestId, IntakeField,
    NavTarget, ProjectCard, ProjectRef, ProjectStatus, Room, RoomCard, RoomIntake, TabKind,
    UserType,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReadEvent {
    Loaded {
        request_id: ImageRequestId,
        data_uri: String,
    },
    Failed {
        request_id: ImageRequestId,
        error: String,
    },
}

impl ImageReadEvent {
    pub const fn request_id(&self) -> ImageRequestId {
        match self {
            Self::Loaded { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

/// Side effects the UI cannot perform itself. The binary provides a
/// filesystem-backed implementation; tests provide canned results.
pub trait AppRuntime {
    /// Reads `source` and returns it as a `data:<mime>;base64,...` URI.
    fn read_image(&mut self, source: &str) -> Result<String>;

    /// Starts a read whose outcome arrives on `tx`. Runs inline unless the
    /// runtime moves the work elsewhere.
    fn spawn_image_read(
        &mut self,
        request_id: ImageRequestId,
        source: &str,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let event = match self.read_image(source) {
            Ok(data_uri) => ImageReadEvent::Loaded {
                request_id,
                data_uri,
            },
            Err(error) => ImageReadEvent::Failed {
                request_id,
                error: format!("{error:#}"),
            },
        };
        tx.send(InternalEvent::ImageRead(event))
            .map_err(|_| anyhow::anyhow!("image event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    ImageRead(ImageReadEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    room_cursor: usize,
    project_cursor: usize,
    /// Room whose projects are listed in place of the room cards.
    open_room: Option<usize>,
    room_project_cursor: usize,
    intake_field: IntakeField,
    help_visible: bool,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            room_cursor: 0,
            project_cursor: 0,
            open_room: None,
            room_project_cursor: 0,
            intake_field: IntakeField::Name,
            help_visible: false,
            status_token: 0,
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::ImageRead(ImageReadEvent::Loaded {
                request_id,
                data_uri,
            }) => {
                apply(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::CompleteImageRead {
                        request_id,
                        data_uri,
                    },
                );
            }
            InternalEvent::ImageRead(ImageReadEvent::Failed { request_id, error }) => {
                apply(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::FailImageRead {
                        request_id,
                        reason: error,
                    },
                );
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    apply(
        state,
        runtime,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

/// Dispatches `command` and carries out the UI side of the resulting events.
fn apply<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let mut pending = state.dispatch(command);
    while !pending.is_empty() {
        let mut follow_up = Vec::new();
        for event in pending {
            match event {
                AppEvent::StatusUpdated(_) => {
                    view_data.status_token = view_data.status_token.saturating_add(1);
                    schedule_status_clear(internal_tx, view_data.status_token);
                }
                AppEvent::DialogChanged(DialogVisibility::Open) => {
                    view_data.intake_field = IntakeField::Name;
                }
                AppEvent::RoomAdded(_) => {
                    view_data.room_cursor = state.rooms.len().saturating_sub(1);
                }
                AppEvent::ImageReadRequested { request_id, source } => {
                    if let Err(error) =
                        runtime.spawn_image_read(request_id, &source, internal_tx.clone())
                    {
                        warn!(request = request_id.get(), %error, "image read not started");
                        follow_up.extend(state.dispatch(AppCommand::FailImageRead {
                            request_id,
                            reason: format!("{error:#}"),
                        }));
                    }
                }
                _ => {}
            }
        }
        pending = follow_up;
    }
    clamp_cursors(state, view_data);
}

fn clamp_cursors(state: &AppState, view_data: &mut ViewData) {
    view_data.room_cursor = clamp_index(view_data.room_cursor, state.rooms.len());
    view_data.project_cursor = clamp_index(view_data.project_cursor, state.projects.len());
    if let Some(index) = view_data.open_room {
        match state.rooms.get(index) {
            Some(room) => {
                view_data.room_project_cursor =
                    clamp_index(view_data.room_project_cursor, room.projects.len());
            }
            None => {
                view_data.open_room = None;
                view_data.room_project_cursor = 0;
            }
        }
    }
}

const fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index >= len {
        len - 1
    } else {
        index
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.dialog_open() {
        handle_intake_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    handle_nav_key(state, runtime, view_data, internal_tx, key)
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char(digit @ '1'..='5') => {
            let index = digit as usize - '1' as usize;
            if let Some(target) = NavTarget::ALL.get(index).copied() {
                navigate(state, runtime, view_data, internal_tx, target);
            }
        }
        KeyCode::Tab => shift_tab(state, runtime, view_data, internal_tx, 1),
        KeyCode::BackTab => shift_tab(state, runtime, view_data, internal_tx, -1),
        KeyCode::Char('a') | KeyCode::Char('+') => {
            apply(state, runtime, view_data, internal_tx, AppCommand::OpenAddRoom);
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, view_data, -1),
        KeyCode::Char('g') | KeyCode::Home => move_cursor(state, view_data, isize::MIN),
        KeyCode::Char('G') | KeyCode::End => move_cursor(state, view_data, isize::MAX),
        _ => match state.active_tab {
            TabKind::Rooms => handle_rooms_key(state, runtime, view_data, internal_tx, key),
            TabKind::Projects => {
                if let Some(project) = selected_standalone_project(state, view_data) {
                    handle_project_key(state, runtime, view_data, internal_tx, key, project);
                }
            }
            TabKind::Shopping | TabKind::Profile => {}
        },
    }
    false
}

fn navigate<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    target: NavTarget,
) {
    if let NavTarget::Tab(tab) = target
        && tab != state.active_tab
    {
        view_data.open_room = None;
        view_data.room_project_cursor = 0;
    }
    apply(
        state,
        runtime,
        view_data,
        internal_tx,
        AppCommand::Navigate(target),
    );
}

fn shift_tab<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    delta: isize,
) {
    let len = TabKind::ALL.len() as isize;
    let current = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0) as isize;
    let next = TabKind::ALL[(current + delta).rem_euclid(len) as usize];
    navigate(state, runtime, view_data, internal_tx, NavTarget::Tab(next));
}

fn move_cursor(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let (cursor, len) = match (state.active_tab, view_data.open_room) {
        (TabKind::Rooms, Some(index)) => (
            &mut view_data.room_project_cursor,
            state.rooms.get(index).map_or(0, |room| room.projects.len()),
        ),
        (TabKind::Rooms, None) => (&mut view_data.room_cursor, state.rooms.len()),
        (TabKind::Projects, _) => (&mut view_data.project_cursor, state.projects.len()),
        (TabKind::Shopping | TabKind::Profile, _) => return,
    };
    if len == 0 {
        *cursor = 0;
        return;
    }
    let next = (*cursor as isize).saturating_add(delta).clamp(0, len as isize - 1);
    *cursor = next as usize;
}

fn handle_rooms_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if let Some(index) = view_data.open_room {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left
        ) {
            view_data.open_room = None;
            view_data.room_project_cursor = 0;
            return;
        }
        let Some(room) = state.rooms.get(index) else {
            view_data.open_room = None;
            return;
        };
        if key.code == KeyCode::Char('n') {
            let room_id = room.id.clone();
            apply(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::AddProjectToRoom(room_id),
            );
            return;
        }
        if let Some(project) = room.projects.get(view_data.room_project_cursor) {
            let project = ProjectRef::InRoom {
                room_id: room.id.clone(),
                project_id: project.id.clone(),
            };
            handle_project_key(state, runtime, view_data, internal_tx, key, project);
        }
        return;
    }

    let Some(room) = state.rooms.get(view_data.room_cursor) else {
        if key.code == KeyCode::Enter {
            apply(state, runtime, view_data, internal_tx, AppCommand::OpenAddRoom);
        }
        return;
    };
    let room_id = room.id.clone();
    match key.code {
        KeyCode::Enter => apply(
            state,
            runtime,
            view_data,
            internal_tx,
            AppCommand::ViewRoomDetails(room_id),
        ),
        KeyCode::Char('n') => apply(
            state,
            runtime,
            view_data,
            internal_tx,
            AppCommand::AddProjectToRoom(room_id),
        ),
        KeyCode::Char('l') | KeyCode::Right => {
            view_data.open_room = Some(view_data.room_cursor);
            view_data.room_project_cursor = 0;
        }
        _ => {}
    }
}

fn handle_project_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
    project: ProjectRef,
) {
    let command = match key.code {
        KeyCode::Enter => AppCommand::ViewProjectDetails(project),
        KeyCode::Char('b') => {
            let open = state
                .project(&project)
                .is_some_and(|found| found.status != ProjectStatus::Completed);
            if !open {
                emit_status(
                    state,
                    runtime,
                    view_data,
                    internal_tx,
                    "completed projects need no more shopping",
                );
                return;
            }
            AppCommand::AddToShoppingList(project)
        }
        KeyCode::Char('s') => AppCommand::AdvanceProjectStatus(project),
        KeyCode::Char('S') => {
            let previous = state
                .project(&project)
                .and_then(|found| previous_status(found.status));
            let Some(previous) = previous else {
                return;
            };
            AppCommand::SetProjectStatus(project, previous)
        }
        _ => return,
    };
    apply(state, runtime, view_data, internal_tx, command);
}

const fn previous_status(status: ProjectStatus) -> Option<ProjectStatus> {
    match status {
        ProjectStatus::Planned => None,
        ProjectStatus::InProgress => Some(ProjectStatus::Planned),
        ProjectStatus::Completed => Some(ProjectStatus::InProgress),
    }
}

fn selected_standalone_project(state: &AppState, view_data: &ViewData) -> Option<ProjectRef> {
    state
        .projects
        .get(view_data.project_cursor)
        .map(|project| ProjectRef::Standalone(project.id.clone()))
}

fn handle_intake_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field = view_data.intake_field;
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let command = match key.code {
            KeyCode::Char('s') => AppCommand::SubmitAddRoom,
            KeyCode::Char('x') => AppCommand::RemoveImage,
            KeyCode::Char('u') => AppCommand::EditIntake {
                field,
                value: String::new(),
            },
            _ => return,
        };
        apply(state, runtime, view_data, internal_tx, command);
        return;
    }

    match key.code {
        KeyCode::Esc => apply(state, runtime, view_data, internal_tx, AppCommand::CancelAddRoom),
        KeyCode::Tab | KeyCode::Down => view_data.intake_field = shift_field(field, 1),
        KeyCode::BackTab | KeyCode::Up => view_data.intake_field = shift_field(field, -1),
        KeyCode::Enter if field == IntakeField::Photo => {
            apply(state, runtime, view_data, internal_tx, AppCommand::BeginImageRead);
        }
        KeyCode::Enter => apply(state, runtime, view_data, internal_tx, AppCommand::SubmitAddRoom),
        KeyCode::Delete if field == IntakeField::Photo => {
            apply(state, runtime, view_data, internal_tx, AppCommand::RemoveImage);
        }
        KeyCode::Left if field == IntakeField::RoomType => {
            apply(state, runtime, view_data, internal_tx, AppCommand::CycleRoomType(-1));
        }
        KeyCode::Right if field == IntakeField::RoomType => {
            apply(state, runtime, view_data, internal_tx, AppCommand::CycleRoomType(1));
        }
        KeyCode::Backspace => {
            let mut value = state.intake.text(field).to_owned();
            if value.pop().is_some() {
                apply(
                    state,
                    runtime,
                    view_data,
                    internal_tx,
                    AppCommand::EditIntake { field, value },
                );
            }
        }
        KeyCode::Char(ch) => {
            let mut value = state.intake.text(field).to_owned();
            value.push(ch);
            apply(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::EditIntake { field, value },
            );
        }
        _ => {}
    }
    debug!(field = field.label(), "intake key handled");
}

fn shift_field(field: IntakeField, delta: isize) -> IntakeField {
    let len = IntakeField::ALL.len() as isize;
    let current = IntakeField::ALL
        .iter()
        .position(|candidate| *candidate == field)
        .unwrap_or(0) as isize;
    IntakeField::ALL[(current + delta).rem_euclid(len) as usize]
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = NavTarget::ALL
        .iter()
        .position(|target| *target == NavTarget::Tab(state.active_tab))
        .unwrap_or(0);
    let tabs = Tabs::new(nav_titles())
        .block(Block::default().title("ReMould").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    let body = Paragraph::new(render_tab_text(state, view_data))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.active_tab.label()),
        );
    frame.render_widget(body, layout[1]);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if state.dialog_open() {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(render_intake_text(&state.intake, view_data.intake_field))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Add New Room")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(dialog, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn nav_titles() -> Vec<String> {
    NavTarget::ALL
        .iter()
        .enumerate()
        .map(|(index, target)| format!("{} {}", index + 1, target.label()))
        .collect()
}

fn render_tab_text(state: &AppState, view_data: &ViewData) -> String {
    match state.active_tab {
        TabKind::Rooms => match view_data.open_room.and_then(|index| state.rooms.get(index)) {
            Some(room) => render_room_projects_text(room, view_data.room_project_cursor),
            None => render_rooms_text(state, view_data.room_cursor),
        },
        TabKind::Projects => render_projects_text(state, view_data.project_cursor),
        TabKind::Shopping => render_shopping_text(state),
        TabKind::Profile => render_profile_text(state),
    }
}

fn render_rooms_text(state: &AppState, cursor: usize) -> String {
    let stats = DashboardStats::collect(&state.rooms, &state.projects);
    let mut lines = vec![
        "Welcome to ReMould".to_owned(),
        "Transform your space, track your progress".to_owned(),
        "[a] Add Your First Room".to_owned(),
        String::new(),
        format!(
            "{} Rooms | {} Projects | {} Completed",
            stats.rooms, stats.projects, stats.completed
        ),
        String::new(),
        "Your Rooms".to_owned(),
    ];

    if state.rooms.is_empty() {
        lines.extend([
            String::new(),
            "No rooms added yet".to_owned(),
            "Add your first room to get started".to_owned(),
            "[enter] Add Room".to_owned(),
        ]);
        return lines.join("\n");
    }

    for (index, room) in state.rooms.iter().enumerate() {
        lines.push(String::new());
        lines.extend(room_card_lines(&RoomCard::project(room), index == cursor));
    }
    lines.join("\n")
}

fn room_card_lines(card: &RoomCard, selected: bool) -> Vec<String> {
    let marker = if selected { ">" } else { " " };
    let photo = if card.has_image { " [photo]" } else { "" };
    let mut lines = vec![
        format!("{marker} {} [{}]{photo}", card.name, card.type_badge),
        format!("  {}", card.project_line),
    ];
    if let Some(measurements) = &card.measurement_line {
        lines.push(format!("  {measurements}"));
    }
    let over = if card.over_budget { " over budget" } else { "" };
    lines.push(format!(
        "  Budget {} {}{over}",
        card.budget_line,
        progress_bar(card.progress_percentage, PROGRESS_BAR_WIDTH)
    ));
    if let Some(active) = &card.active_line {
        lines.push(format!("  {active}"));
    }
    lines
}

fn render_room_projects_text(room: &Room, cursor: usize) -> String {
    let card = RoomCard::project(room);
    let mut lines = vec![
        format!("{} [{}]", card.name, card.type_badge),
        format!("{} | Budget {}", card.project_line, card.budget_line),
    ];
    if room.projects.is_empty() {
        lines.extend([
            String::new(),
            "No projects in this room yet".to_owned(),
            "[n] Add Project".to_owned(),
        ]);
        return lines.join("\n");
    }
    for (index, project) in room.projects.iter().enumerate() {
        lines.push(String::new());
        lines.extend(project_card_lines(&ProjectCard::project(project), index == cursor));
    }
    lines.join("\n")
}

fn render_projects_text(state: &AppState, cursor: usize) -> String {
    let mut lines = vec![
        "Projects".to_owned(),
        "Track your renovation progress".to_owned(),
        String::new(),
        "AI Project Suggestions".to_owned(),
        "Get smart recommendations based on your room photos".to_owned(),
    ];
    for (index, project) in state.projects.iter().enumerate() {
        lines.push(String::new());
        lines.extend(project_card_lines(&ProjectCard::project(project), index == cursor));
    }
    lines.join("\n")
}

fn project_card_lines(card: &ProjectCard, selected: bool) -> Vec<String> {
    let marker = if selected { ">" } else { " " };
    let mut badges = vec![format!("[{}]", card.status_badge), format!("[{}]", card.origin_badge)];
    if let Some(category) = &card.category_badge {
        badges.push(format!("[{category}]"));
    }

    let mut lines = vec![format!("{marker} {} {}", card.title, badges.join(" "))];
    if let Some(description) = &card.description {
        lines.push(format!("  {description}"));
    }
    let contractor = if card.contractor_required {
        " | contractor required"
    } else {
        ""
    };
    lines.push(format!("  Est. {}{contractor}", card.cost_line));

    let mut actions = Vec::new();
    if card.actions.details {
        actions.push("enter details".to_owned());
    }
    if card.actions.add_to_shopping_list {
        actions.push("b shopping list".to_owned());
    }
    if let Some(action) = card.actions.status_action {
        actions.push(format!("s {}", action.label()));
    }
    lines.push(format!("  {}", actions.join(" | ")));
    lines
}

fn render_shopping_text(state: &AppState) -> String {
    let mut lines = vec![
        "Shopping List".to_owned(),
        "Items needed for your projects".to_owned(),
        String::new(),
    ];
    if state.shopping_list.is_empty() {
        lines.extend([
            "No items in your shopping list".to_owned(),
            "Add items from your projects".to_owned(),
        ]);
        return lines.join("\n");
    }
    for item in &state.shopping_list {
        let check = if item.purchased { "x" } else { " " };
        lines.push(format!(
            "[{check}] {} ({}) {}",
            item.name,
            item.category,
            format_dollars(item.estimated_cost_cents)
        ));
    }
    lines.join("\n")
}

fn render_profile_text(state: &AppState) -> String {
    let user_type = match state.user.user_type {
        UserType::Renter => "Renter",
        UserType::Homeowner => "Homeowner",
    };
    [
        "Profile".to_owned(),
        "Manage your account and preferences".to_owned(),
        String::new(),
        "Welcome User".to_owned(),
        state.user.email.clone(),
        format!("{user_type} | language {}", state.user.language),
    ]
    .join("\n")
}

fn render_intake_text(intake: &RoomIntake, focused: IntakeField) -> String {
    let mut lines = Vec::new();
    for field in IntakeField::ALL {
        let marker = if field == focused { ">" } else { " " };
        let value = intake_value_text(intake, field);
        lines.push(format!("{marker} {}: {value}", field.label()));
        if field == IntakeField::Height
            && let Some(area) = intake.square_footage_preview()
        {
            lines.push(format!("  Square footage: {area} sq ft"));
        }
    }
    lines.push(String::new());
    if intake.can_submit() {
        lines.push("[enter] Add Room | [esc] Cancel".to_owned());
    } else {
        lines.push("Add Room needs a name and a type | [esc] Cancel".to_owned());
    }
    lines.join("\n")
}

fn intake_value_text(intake: &RoomIntake, field: IntakeField) -> String {
    let text = intake.text(field);
    let shown = if text.is_empty() {
        format!("<{}>", field.placeholder())
    } else {
        text.to_owned()
    };
    match field {
        IntakeField::Photo if intake.image.is_loading() => format!("{shown} (loading...)"),
        IntakeField::Photo if intake.image.preview.is_some() => {
            format!("{shown} (preview ready, ctrl+x remove)")
        }
        IntakeField::RoomType => format!("< {shown} >"),
        _ => shown,
    }
}

fn progress_bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {clamped:.0}%",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    )
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let (mode, hints) = if state.dialog_open() {
        (
            "FORM",
            "tab/shift+tab field | left/right type | enter add/read photo | ctrl+x remove photo | esc cancel",
        )
    } else {
        (
            "NAV",
            "1-5 nav | tab tabs | a add room | j/k move | enter details | ? help | q quit",
        )
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+c/ctrl+q quit | ? help\n\
nav: 1 rooms 2 projects 3 add 4 shopping 5 profile | tab/shift+tab tabs | a or + add room\n\
nav: j/k move | g/G first/last | q quit\n\
rooms: enter details | n add project | l open projects | h/esc back\n\
projects: enter details | s start/complete | S step back | b shopping list\n\
add room: tab/shift+tab field | type to edit | backspace | ctrl+u clear field\n\
add room: left/right room type | enter on photo reads it | ctrl+x remove photo\n\
add room: enter or ctrl+s submit | esc cancel"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, ImageReadEvent, InternalEvent, ViewData, handle_key_event, help_overlay_text,
        nav_titles, process_internal_events, progress_bar, render_intake_text,
        render_profile_text, render_projects_text, render_room_projects_text, render_rooms_text,
        render_shopping_text, status_text,
    };
    use anyhow::{Result, bail};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use remould_app::{
        AppCommand, AppState, ImageRequestId, IntakeField, ProjectRef, ProjectStatus, RoomId,
        RoomType, TabKind,
    };
    use std::sync::mpsc::{self, Receiver, Sender};

    #[derive(Debug, Default)]
    struct TestRuntime {
        data_uri: Option<String>,
        reads: Vec<String>,
    }

    impl AppRuntime for TestRuntime {
        fn read_image(&mut self, source: &str) -> Result<String> {
            self.reads.push(source.to_owned());
            match &self.data_uri {
                Some(data_uri) => Ok(data_uri.clone()),
                None => bail!("{source} is not an image -- choose a png or jpeg and retry"),
            }
        }
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: Sender<InternalEvent>,
        rx: Receiver<InternalEvent>,
    }

    impl Harness {
        fn new(state: AppState) -> Self {
            let (tx, rx) = mpsc::channel();
            Self {
                state,
                runtime: TestRuntime::default(),
                view_data: ViewData::default(),
                tx,
                rx,
            }
        }

        fn demo() -> Self {
            Self::new(AppState::with_demo_data())
        }

        fn press(&mut self, code: KeyCode) -> bool {
            self.press_with(code, KeyModifiers::NONE)
        }

        fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
            handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                KeyEvent::new(code, modifiers),
            )
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn drain(&mut self) {
            process_internal_events(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                &self.rx,
            );
        }
    }

    #[test]
    fn number_keys_follow_nav_bar_order() {
        let mut harness = Harness::demo();

        harness.press(KeyCode::Char('2'));
        assert_eq!(harness.state.active_tab, TabKind::Projects);

        harness.press(KeyCode::Char('3'));
        assert_eq!(harness.state.active_tab, TabKind::Projects);
        assert!(harness.state.dialog_open());

        harness.press(KeyCode::Esc);
        assert!(!harness.state.dialog_open());

        harness.press(KeyCode::Char('5'));
        assert_eq!(harness.state.active_tab, TabKind::Profile);
    }

    #[test]
    fn tab_key_cycles_tabs() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Tab);
        assert_eq!(harness.state.active_tab, TabKind::Projects);
        harness.press(KeyCode::BackTab);
        harness.press(KeyCode::BackTab);
        assert_eq!(harness.state.active_tab, TabKind::Profile);
    }

    #[test]
    fn q_quits_in_nav_but_types_in_dialog() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('a'));
        assert!(!harness.press(KeyCode::Char('q')));
        assert_eq!(harness.state.intake.name, "q");

        harness.press(KeyCode::Esc);
        assert!(harness.press(KeyCode::Char('q')));
        assert!(harness.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn typed_intake_submits_room() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('a'));
        assert_eq!(harness.view_data.intake_field, IntakeField::Name);

        harness.type_text("Den");
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Right);
        assert_eq!(harness.state.intake.room_type, Some(RoomType::LivingRoom));
        harness.press(KeyCode::Tab);
        harness.type_text("12");
        harness.press(KeyCode::Tab);
        harness.type_text("10");
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Tab);
        harness.type_text("2500");
        harness.press(KeyCode::Enter);

        assert!(!harness.state.dialog_open());
        assert_eq!(harness.state.active_tab, TabKind::Rooms);
        assert_eq!(harness.state.rooms.len(), 3);
        let room = &harness.state.rooms[2];
        assert_eq!(room.name, "Den");
        assert_eq!(room.total_budget_cents, 250_000);
        assert_eq!(
            room.measurements.and_then(|measurements| measurements.square_footage),
            Some(120.0)
        );
        assert_eq!(harness.view_data.room_cursor, 2);
        assert!(harness.state.intake.is_blank());
    }

    #[test]
    fn submit_without_type_keeps_dialog_open() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('+'));
        harness.type_text("Porch");
        harness.press_with(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(harness.state.dialog_open());
        assert_eq!(harness.state.rooms.len(), 2);
        assert_eq!(harness.state.intake.name, "Porch");
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("room type is required -- choose a room type and retry")
        );
    }

    #[test]
    fn backspace_and_ctrl_u_edit_focused_field() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('a'));
        harness.type_text("Attic");
        harness.press(KeyCode::Backspace);
        assert_eq!(harness.state.intake.name, "Atti");
        harness.press_with(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(harness.state.intake.name, "");
    }

    #[test]
    fn free_form_room_type_is_typed() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('a'));
        harness.press(KeyCode::Tab);
        harness.type_text("Sunroom");
        assert_eq!(
            harness.state.intake.room_type,
            Some(RoomType::Custom("Sunroom".to_owned()))
        );
    }

    #[test]
    fn photo_enter_reads_through_runtime() {
        let mut harness = Harness::demo();
        harness.runtime.data_uri = Some("data:image/png;base64,AAAA".to_owned());
        harness.press(KeyCode::Char('a'));
        harness.press(KeyCode::BackTab);
        assert_eq!(harness.view_data.intake_field, IntakeField::Photo);
        harness.type_text("room.png");
        harness.press(KeyCode::Enter);
        assert_eq!(harness.runtime.reads, vec!["room.png".to_owned()]);
        assert!(harness.state.intake.image.is_loading());

        harness.drain();
        assert_eq!(
            harness.state.intake.image.preview.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert!(harness.state.dialog_open());
    }

    #[test]
    fn failed_photo_read_reports_status() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('a'));
        harness.press(KeyCode::BackTab);
        harness.type_text("notes.txt");
        harness.press(KeyCode::Enter);
        harness.drain();

        assert!(!harness.state.intake.image.is_loading());
        assert_eq!(harness.state.intake.image.preview, None);
        let status = harness.state.status_line.clone().unwrap_or_default();
        assert!(status.starts_with("image not loaded: notes.txt is not an image"));
    }

    #[test]
    fn stale_photo_read_is_discarded() -> Result<()> {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('a'));
        harness.press(KeyCode::BackTab);
        harness.type_text("room.png");
        harness.state.dispatch(AppCommand::BeginImageRead);
        let stale = harness
            .state
            .intake
            .image
            .pending()
            .ok_or_else(|| anyhow::anyhow!("read should be pending"))?;
        harness.press_with(KeyCode::Char('x'), KeyModifiers::CONTROL);

        harness.tx.send(InternalEvent::ImageRead(ImageReadEvent::Loaded {
            request_id: stale,
            data_uri: "data:image/png;base64,AAAA".to_owned(),
        }))?;
        harness.drain();
        assert_eq!(harness.state.intake.image.preview, None);
        assert_eq!(stale, ImageRequestId::new(1));
        Ok(())
    }

    #[test]
    fn status_clear_honors_latest_token() -> Result<()> {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Enter);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("room details: Master Bedroom")
        );
        let first = harness.view_data.status_token;

        harness.press(KeyCode::Char('n'));
        harness.tx.send(InternalEvent::ClearStatus { token: first })?;
        harness.drain();
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("adding projects to Master Bedroom is not available yet")
        );

        harness.tx.send(InternalEvent::ClearStatus {
            token: harness.view_data.status_token,
        })?;
        harness.drain();
        assert_eq!(harness.state.status_line, None);
        Ok(())
    }

    #[test]
    fn s_advances_selected_project_and_shift_s_steps_back() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('2'));
        harness.press(KeyCode::Char('j'));
        harness.press(KeyCode::Char('s'));
        assert_eq!(harness.state.projects[1].status, ProjectStatus::InProgress);
        harness.press(KeyCode::Char('s'));
        assert_eq!(harness.state.projects[1].status, ProjectStatus::Completed);
        harness.press(KeyCode::Char('s'));
        assert_eq!(harness.state.projects[1].status, ProjectStatus::Completed);
        harness.press(KeyCode::Char('S'));
        assert_eq!(harness.state.projects[1].status, ProjectStatus::InProgress);
        assert_eq!(harness.state.projects[0].status, ProjectStatus::InProgress);
    }

    #[test]
    fn shopping_key_only_offered_for_open_projects() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('2'));
        harness.press(KeyCode::Char('b'));
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("shopping list is not available yet (Paint accent wall)")
        );
    }

    #[test]
    fn room_drill_in_addresses_room_projects() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('l'));
        assert_eq!(harness.view_data.open_room, Some(0));
        harness.press(KeyCode::Char('j'));
        harness.press(KeyCode::Char('s'));

        let baseboards = ProjectRef::InRoom {
            room_id: RoomId::new("1"),
            project_id: remould_app::ProjectId::new("2"),
        };
        assert_eq!(
            harness.state.project(&baseboards).map(|project| project.status),
            Some(ProjectStatus::InProgress)
        );
        assert_eq!(harness.state.projects[1].status, ProjectStatus::Planned);

        harness.press(KeyCode::Esc);
        assert_eq!(harness.view_data.open_room, None);
    }

    #[test]
    fn cursor_stays_within_rooms() {
        let mut harness = Harness::demo();
        for _ in 0..5 {
            harness.press(KeyCode::Char('j'));
        }
        assert_eq!(harness.view_data.room_cursor, 1);
        harness.press(KeyCode::Char('g'));
        assert_eq!(harness.view_data.room_cursor, 0);
    }

    #[test]
    fn empty_rooms_enter_opens_dialog() {
        let mut harness = Harness::new(AppState::default());
        harness.press(KeyCode::Enter);
        assert!(harness.state.dialog_open());
        assert!(render_rooms_text(&harness.state, 0).contains("No rooms added yet"));
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut harness = Harness::demo();
        harness.press(KeyCode::Char('?'));
        assert!(harness.view_data.help_visible);
        assert!(status_text(&harness.state, &harness.view_data).is_empty());
        assert!(!harness.press(KeyCode::Char('q')));
        harness.press(KeyCode::Esc);
        assert!(!harness.view_data.help_visible);
        assert!(help_overlay_text().contains("ctrl+x remove photo"));
    }

    #[test]
    fn rooms_text_shows_stats_and_cards() {
        let state = AppState::with_demo_data();
        let text = render_rooms_text(&state, 0);
        assert!(text.contains("Welcome to ReMould"));
        assert!(text.contains("2 Rooms | 2 Projects | 2 Completed"));
        assert!(text.contains("> Master Bedroom [Bedroom] [photo]"));
        assert!(text.contains("2 projects • 1 completed"));
        assert!(text.contains("Budget $350 / $1,500"));
        assert!(text.contains("1 active project"));
        assert!(text.contains("  Living Room [Living Room]"));
    }

    #[test]
    fn room_projects_text_lists_owned_projects() {
        let state = AppState::with_demo_data();
        let text = render_room_projects_text(&state.rooms[1], 0);
        assert!(text.contains("> New lighting [completed] [AI Suggested] [Electrical]"));
        assert!(text.contains("Est. $300 | contractor required"));
        assert!(!text.contains("b shopping list"));
    }

    #[test]
    fn projects_text_shows_banner_and_actions() {
        let state = AppState::with_demo_data();
        let text = render_projects_text(&state, 1);
        assert!(text.contains("AI Project Suggestions"));
        assert!(text.contains("Add a warm accent color to create visual interest"));
        assert!(text.contains("> Install crown molding [planned] [Manual] [Trim]"));
        assert!(text.contains("enter details | b shopping list | s Start"));
        assert!(text.contains("s Complete"));
    }

    #[test]
    fn shopping_and_profile_text() {
        let state = AppState::with_demo_data();
        assert!(render_shopping_text(&state).contains("No items in your shopping list"));
        let profile = render_profile_text(&state);
        assert!(profile.contains("user@example.com"));
        assert!(profile.contains("Homeowner"));
    }

    #[test]
    fn intake_text_shows_focus_and_area_preview() {
        let mut state = remould_testkit::state_with_open_intake("Den", RoomType::Bedroom);
        state.dispatch(AppCommand::EditIntake {
            field: IntakeField::Length,
            value: "12".to_owned(),
        });
        state.dispatch(AppCommand::EditIntake {
            field: IntakeField::Width,
            value: "10.5".to_owned(),
        });
        let text = render_intake_text(&state.intake, IntakeField::Width);
        assert!(text.contains("> Width (ft): 10.5"));
        assert!(text.contains("  Room Type: < Bedroom >"));
        assert!(text.contains("Square footage: 126.0 sq ft"));
        assert!(text.contains("[enter] Add Room"));

        state.dispatch(AppCommand::CancelAddRoom);
        let blank = render_intake_text(&state.intake, IntakeField::Name);
        assert!(blank.contains("<e.g., Master Bedroom>"));
        assert!(blank.contains("Add Room needs a name and a type"));
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(50.0, 4), "[##--] 50%");
        assert_eq!(progress_bar(250.0, 4), "[####] 100%");
        assert_eq!(progress_bar(-5.0, 2), "[--] 0%");
    }

    #[test]
    fn nav_titles_include_add_entry() {
        assert_eq!(
            nav_titles(),
            vec!["1 Rooms", "2 Projects", "3 Add", "4 Shopping", "5 Profile"]
        );
    }
}
