// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::forms::{IntakeError, IntakeField, RoomIntake};
use crate::{
    DialogVisibility, ImageRequestId, NavTarget, Project, ProjectRef, ProjectStatus, Room, RoomId,
    RoomIdGenerator, ShoppingItem, TabKind, User, seed,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub rooms: Vec<Room>,
    pub projects: Vec<Project>,
    pub shopping_list: Vec<ShoppingItem>,
    pub user: User,
    pub active_tab: TabKind,
    pub add_room_dialog: DialogVisibility,
    pub intake: RoomIntake,
    pub status_line: Option<String>,
    room_ids: RoomIdGenerator,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            rooms: Vec::new(),
            projects: Vec::new(),
            shopping_list: Vec::new(),
            user: seed::demo_user(),
            active_tab: TabKind::Rooms,
            add_room_dialog: DialogVisibility::Closed,
            intake: RoomIntake::default(),
            status_line: None,
            room_ids: RoomIdGenerator::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Navigate(NavTarget),
    OpenAddRoom,
    CancelAddRoom,
    SubmitAddRoom,
    EditIntake { field: IntakeField, value: String },
    CycleRoomType(isize),
    BeginImageRead,
    CompleteImageRead {
        request_id: ImageRequestId,
        data_uri: String,
    },
    FailImageRead {
        request_id: ImageRequestId,
        reason: String,
    },
    RemoveImage,
    AdvanceProjectStatus(ProjectRef),
    SetProjectStatus(ProjectRef, ProjectStatus),
    ViewRoomDetails(RoomId),
    AddProjectToRoom(RoomId),
    ViewProjectDetails(ProjectRef),
    AddToShoppingList(ProjectRef),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(TabKind),
    DialogChanged(DialogVisibility),
    IntakeEdited(IntakeField),
    RoomAdded(RoomId),
    IntakeRejected(IntakeError),
    ImageReadRequested {
        request_id: ImageRequestId,
        source: String,
    },
    ImagePreviewReady(ImageRequestId),
    ImageReadFailed(ImageRequestId),
    StaleImageReadDiscarded(ImageRequestId),
    ImageRemoved,
    ProjectStatusChanged {
        project: ProjectRef,
        from: ProjectStatus,
        to: ProjectStatus,
    },
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_demo_data() -> Self {
        Self {
            rooms: seed::demo_rooms(),
            projects: seed::demo_projects(),
            ..Self::default()
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.add_room_dialog == DialogVisibility::Open
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        self.dispatch_at(command, OffsetDateTime::now_utc())
    }

    /// Applies `command` to a copy and returns the new snapshot.
    pub fn reduce(&self, command: AppCommand) -> (Self, Vec<AppEvent>) {
        let mut next = self.clone();
        let events = next.dispatch(command);
        (next, events)
    }

    /// Like [`AppState::dispatch`], with the clock used for new room ids.
    pub fn dispatch_at(&mut self, command: AppCommand, now: OffsetDateTime) -> Vec<AppEvent> {
        match command {
            AppCommand::Navigate(NavTarget::Add) | AppCommand::OpenAddRoom => self.open_dialog(),
            AppCommand::Navigate(NavTarget::Tab(tab)) => {
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::CancelAddRoom => {
                if !self.dialog_open() {
                    return Vec::new();
                }
                self.close_dialog()
            }
            AppCommand::SubmitAddRoom => self.submit_room(now),
            AppCommand::EditIntake { field, value } => {
                if !self.dialog_open() {
                    return Vec::new();
                }
                self.intake.set_text(field, value);
                vec![AppEvent::IntakeEdited(field)]
            }
            AppCommand::CycleRoomType(delta) => {
                if !self.dialog_open() {
                    return Vec::new();
                }
                self.intake.cycle_room_type(delta);
                vec![AppEvent::IntakeEdited(IntakeField::RoomType)]
            }
            AppCommand::BeginImageRead => self.begin_image_read(),
            AppCommand::CompleteImageRead {
                request_id,
                data_uri,
            } => {
                if self.intake.image.complete_read(request_id, data_uri) {
                    debug!(request = request_id.get(), "image preview ready");
                    vec![AppEvent::ImagePreviewReady(request_id)]
                } else {
                    debug!(request = request_id.get(), "discarded stale image read");
                    vec![AppEvent::StaleImageReadDiscarded(request_id)]
                }
            }
            AppCommand::FailImageRead { request_id, reason } => {
                if !self.intake.image.fail_read(request_id) {
                    return vec![AppEvent::StaleImageReadDiscarded(request_id)];
                }
                warn!(request = request_id.get(), %reason, "image read failed");
                vec![
                    AppEvent::ImageReadFailed(request_id),
                    self.set_status(format!("image not loaded: {reason}")),
                ]
            }
            AppCommand::RemoveImage => {
                self.intake.image.remove();
                vec![AppEvent::ImageRemoved]
            }
            AppCommand::AdvanceProjectStatus(project) => self.advance_project(project),
            AppCommand::SetProjectStatus(project, status) => self.set_project_status(project, status),
            AppCommand::ViewRoomDetails(room_id) => match self.room(&room_id) {
                Some(room) => {
                    let message = format!("room details: {}", room.name);
                    info!(room = %room_id, "view room details");
                    vec![self.set_status(message)]
                }
                None => vec![self.set_status(format!("room {room_id} not found"))],
            },
            AppCommand::AddProjectToRoom(room_id) => match self.room(&room_id) {
                Some(room) => {
                    let message = format!("adding projects to {} is not available yet", room.name);
                    info!(room = %room_id, "add project to room requested");
                    vec![self.set_status(message)]
                }
                None => vec![self.set_status(format!("room {room_id} not found"))],
            },
            AppCommand::ViewProjectDetails(project) => match self.project(&project) {
                Some(found) => {
                    let message = format!("project details: {}", found.title);
                    info!(project = %project.project_id(), "view project details");
                    vec![self.set_status(message)]
                }
                None => vec![self.project_not_found(&project)],
            },
            AppCommand::AddToShoppingList(project) => match self.project(&project) {
                Some(found) => {
                    let message =
                        format!("shopping list is not available yet ({})", found.title);
                    info!(project = %project.project_id(), "add to shopping list requested");
                    vec![self.set_status(message)]
                }
                None => vec![self.project_not_found(&project)],
            },
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == room_id)
    }

    pub fn project(&self, project: &ProjectRef) -> Option<&Project> {
        match project {
            ProjectRef::Standalone(project_id) => {
                self.projects.iter().find(|found| &found.id == project_id)
            }
            ProjectRef::InRoom {
                room_id,
                project_id,
            } => self.room(room_id)?.project(project_id),
        }
    }

    fn project_mut(&mut self, project: &ProjectRef) -> Option<&mut Project> {
        match project {
            ProjectRef::Standalone(project_id) => self
                .projects
                .iter_mut()
                .find(|found| &found.id == project_id),
            ProjectRef::InRoom {
                room_id,
                project_id,
            } => self
                .rooms
                .iter_mut()
                .find(|room| &room.id == room_id)?
                .projects
                .iter_mut()
                .find(|found| &found.id == project_id),
        }
    }

    fn open_dialog(&mut self) -> Vec<AppEvent> {
        if self.dialog_open() {
            return Vec::new();
        }
        self.add_room_dialog = DialogVisibility::Open;
        vec![AppEvent::DialogChanged(self.add_room_dialog)]
    }

    fn close_dialog(&mut self) -> Vec<AppEvent> {
        self.intake.reset();
        self.add_room_dialog = DialogVisibility::Closed;
        vec![AppEvent::DialogChanged(self.add_room_dialog)]
    }

    fn submit_room(&mut self, now: OffsetDateTime) -> Vec<AppEvent> {
        if !self.dialog_open() {
            return Vec::new();
        }

        let request = match self.intake.to_request() {
            Ok(request) => request,
            Err(error) => {
                debug!(%error, "room intake rejected");
                return vec![
                    AppEvent::IntakeRejected(error),
                    self.set_status(error.to_string()),
                ];
            }
        };

        let room_id = self.room_ids.next_at(now);
        info!(room = %room_id, name = %request.name, "room added");
        self.rooms.push(request.into_room(room_id.clone()));

        let mut events = vec![AppEvent::RoomAdded(room_id)];
        events.extend(self.close_dialog());
        events
    }

    fn begin_image_read(&mut self) -> Vec<AppEvent> {
        if !self.dialog_open() {
            return Vec::new();
        }
        let source = self.intake.image.source.trim().to_owned();
        if source.is_empty() {
            return vec![self.set_status("choose an image file path first")];
        }
        self.intake.image.preview = None;
        let request_id = self.intake.image.begin_read();
        debug!(request = request_id.get(), %source, "image read started");
        vec![AppEvent::ImageReadRequested { request_id, source }]
    }

    fn advance_project(&mut self, project: ProjectRef) -> Vec<AppEvent> {
        let Some(current) = self.project(&project).map(|found| found.status) else {
            return vec![self.project_not_found(&project)];
        };
        match current.advance_action() {
            Some(action) => self.set_project_status(project, action.target()),
            None => Vec::new(),
        }
    }

    fn set_project_status(&mut self, project: ProjectRef, status: ProjectStatus) -> Vec<AppEvent> {
        let Some(found) = self.project_mut(&project) else {
            return vec![self.project_not_found(&project)];
        };
        let from = found.status;
        if from == status {
            return Vec::new();
        }
        found.status = status;
        info!(
            project = %project.project_id(),
            from = from.as_str(),
            to = status.as_str(),
            "project status changed"
        );
        vec![AppEvent::ProjectStatusChanged {
            project,
            from,
            to: status,
        }]
    }

    fn project_not_found(&mut self, project: &ProjectRef) -> AppEvent {
        warn!(project = %project.project_id(), "project not found");
        self.set_status(format!("project {} not found", project.project_id()))
    }

    fn set_status(&mut self, message: impl Into<String>) -> AppEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}
