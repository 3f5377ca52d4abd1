// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Read-only card projections. Renderers draw these and route the exposed
//! actions back as commands; nothing here mutates state.

use crate::numeric::{format_dollars, format_feet, format_square_feet};
use crate::summary::{ProjectActions, RoomSummary};
use crate::{Measurements, Project, ProjectId, Room, RoomId};

#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub room_id: RoomId,
    pub name: String,
    pub type_badge: String,
    pub has_image: bool,
    pub project_line: String,
    pub measurement_line: Option<String>,
    pub budget_line: String,
    pub progress_percentage: f64,
    pub over_budget: bool,
    pub active_line: Option<String>,
}

impl RoomCard {
    pub fn project(room: &Room) -> Self {
        let summary = RoomSummary::for_room(room);
        Self {
            room_id: room.id.clone(),
            name: room.name.clone(),
            type_badge: room.room_type.label().to_owned(),
            has_image: room.image_url.is_some(),
            project_line: format!(
                "{} projects • {} completed",
                summary.project_count, summary.completed_projects
            ),
            measurement_line: room.measurements.as_ref().map(measurement_line),
            budget_line: format!(
                "{} / {}",
                format_dollars(summary.budget_used_cents),
                format_dollars(summary.total_budget_cents)
            ),
            progress_percentage: summary.progress_percentage(),
            over_budget: summary.over_budget(),
            active_line: active_line(summary.active_projects),
        }
    }
}

/// `12' × 10' (120 sq ft)` with both sides known, otherwise the known sides.
/// The area is left out when it was not stored.
pub fn measurement_line(measurements: &Measurements) -> String {
    if let (Some(length), Some(width)) = (measurements.length, measurements.width) {
        let sides = format!("{}' × {}'", format_feet(length), format_feet(width));
        return match measurements.square_footage {
            Some(area) => format!("{sides} ({} sq ft)", format_square_feet(area)),
            None => sides,
        };
    }

    [
        measurements.length.map(|value| format!("{}'L", format_feet(value))),
        measurements.width.map(|value| format!("{}'W", format_feet(value))),
        measurements.height.map(|value| format!("{}'H", format_feet(value))),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" × ")
}

fn active_line(active: usize) -> Option<String> {
    match active {
        0 => None,
        1 => Some("1 active project".to_owned()),
        count => Some(format!("{count} active projects")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status_badge: &'static str,
    pub origin_badge: &'static str,
    pub category_badge: Option<String>,
    pub cost_line: String,
    pub contractor_required: bool,
    pub actions: ProjectActions,
}

impl ProjectCard {
    pub fn project(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            status_badge: project.status.label(),
            origin_badge: project.origin.label(),
            category_badge: project.category.clone(),
            cost_line: format_dollars(project.estimated_cost_cents),
            contractor_required: project.contractor_required,
            actions: ProjectActions::for_project(project),
        }
    }
}
