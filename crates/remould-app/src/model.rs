// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "planned")]
    Planned,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl ProjectStatus {
    pub const ALL: [Self; 3] = [Self::Planned, Self::InProgress, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planned" => Some(Self::Planned),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }

    /// The single forward step offered for this status, if any.
    pub const fn advance_action(self) -> Option<StatusAction> {
        match self {
            Self::Planned => Some(StatusAction::Start),
            Self::InProgress => Some(StatusAction::Complete),
            Self::Completed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Start,
    Complete,
}

impl StatusAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Complete => "Complete",
        }
    }

    pub const fn target(self) -> ProjectStatus {
        match self {
            Self::Start => ProjectStatus::InProgress,
            Self::Complete => ProjectStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectOrigin {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "AI-suggested")]
    AiSuggested,
}

impl ProjectOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AiSuggested => "AI-suggested",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::AiSuggested => "AI Suggested",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    DiningRoom,
    HomeOffice,
    Basement,
    Garage,
    LaundryRoom,
    Hallway,
    Closet,
    Other,
    Custom(String),
}

impl RoomType {
    pub const PRESETS: [Self; 12] = [
        Self::LivingRoom,
        Self::Bedroom,
        Self::Kitchen,
        Self::Bathroom,
        Self::DiningRoom,
        Self::HomeOffice,
        Self::Basement,
        Self::Garage,
        Self::LaundryRoom,
        Self::Hallway,
        Self::Closet,
        Self::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::DiningRoom => "Dining Room",
            Self::HomeOffice => "Home Office",
            Self::Basement => "Basement",
            Self::Garage => "Garage",
            Self::LaundryRoom => "Laundry Room",
            Self::Hallway => "Hallway",
            Self::Closet => "Closet",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }

    /// Preset labels map to their variant; anything else is kept verbatim.
    pub fn parse(value: &str) -> Self {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.label() == value)
            .unwrap_or_else(|| Self::Custom(value.to_owned()))
    }

    pub fn preset_index(&self) -> Option<usize> {
        Self::PRESETS.iter().position(|preset| preset == self)
    }
}

impl From<String> for RoomType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RoomType> for String {
    fn from(value: RoomType) -> Self {
        match value {
            RoomType::Custom(label) => label,
            preset => preset.label().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<f64>,
}

impl Measurements {
    /// Square footage is fixed here from length and width; later edits to the
    /// record do not recompute it. A product too large to represent is absent.
    pub fn new(length: Option<f64>, width: Option<f64>, height: Option<f64>) -> Self {
        let square_footage = match (length, width) {
            (Some(length), Some(width)) => Some(length * width).filter(|area| area.is_finite()),
            _ => None,
        };
        Self {
            length,
            width,
            height,
            square_footage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(rename = "type")]
    pub origin: ProjectOrigin,
    pub status: ProjectStatus,
    #[serde(rename = "estimatedCost", with = "crate::numeric::dollars")]
    pub estimated_cost_cents: i64,
    pub contractor_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub projects: Vec<Project>,
    #[serde(rename = "totalBudget", with = "crate::numeric::dollars")]
    pub total_budget_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
    pub completed_projects: usize,
}

impl Room {
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Renter,
    Homeowner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub language: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub project_id: ProjectId,
    pub name: String,
    pub category: String,
    #[serde(rename = "estimatedCost", with = "crate::numeric::dollars")]
    pub estimated_cost_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub purchased: bool,
}

/// Addresses a project in whichever collection holds it. Project ids are only
/// unique within one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectRef {
    Standalone(ProjectId),
    InRoom { room_id: RoomId, project_id: ProjectId },
}

impl ProjectRef {
    pub fn project_id(&self) -> &ProjectId {
        match self {
            Self::Standalone(project_id) | Self::InRoom { project_id, .. } => project_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Rooms,
    Projects,
    Shopping,
    Profile,
}

impl TabKind {
    pub const ALL: [Self; 4] = [Self::Rooms, Self::Projects, Self::Shopping, Self::Profile];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Projects => "projects",
            Self::Shopping => "shopping",
            Self::Profile => "profile",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rooms" => Some(Self::Rooms),
            "projects" => Some(Self::Projects),
            "shopping" => Some(Self::Shopping),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rooms => "Rooms",
            Self::Projects => "Projects",
            Self::Shopping => "Shopping",
            Self::Profile => "Profile",
        }
    }
}

/// Entries of the bottom navigation bar. `Add` is an action, not a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Tab(TabKind),
    Add,
}

impl NavTarget {
    pub const ALL: [Self; 5] = [
        Self::Tab(TabKind::Rooms),
        Self::Tab(TabKind::Projects),
        Self::Add,
        Self::Tab(TabKind::Shopping),
        Self::Tab(TabKind::Profile),
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tab(tab) => tab.label(),
            Self::Add => "Add",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogVisibility {
    Closed,
    Open,
}
