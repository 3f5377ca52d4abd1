// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::{Project, ProjectStatus, Room, StatusAction};

/// Budget and progress figures derived from a room on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomSummary {
    pub project_count: usize,
    pub budget_used_cents: i64,
    pub total_budget_cents: i64,
    pub active_projects: usize,
    /// Stored on the room when it was created.
    pub completed_projects: usize,
    /// Counted from the owned projects right now.
    pub completed_by_status: usize,
}

impl RoomSummary {
    pub fn for_room(room: &Room) -> Self {
        Self {
            project_count: room.projects.len(),
            budget_used_cents: budget_used_cents(&room.projects),
            total_budget_cents: room.total_budget_cents,
            active_projects: count_with_status(&room.projects, ProjectStatus::InProgress),
            completed_projects: room.completed_projects,
            completed_by_status: count_with_status(&room.projects, ProjectStatus::Completed),
        }
    }

    /// Unclamped used/total ratio; `None` without a budget.
    pub fn budget_ratio(&self) -> Option<f64> {
        if self.total_budget_cents <= 0 {
            return None;
        }
        Some(self.budget_used_cents as f64 / self.total_budget_cents as f64)
    }

    pub fn budget_percentage(&self) -> f64 {
        self.budget_ratio().map_or(0.0, |ratio| ratio * 100.0)
    }

    /// Percentage for a progress bar, held to [0, 100].
    pub fn progress_percentage(&self) -> f64 {
        self.budget_percentage().clamp(0.0, 100.0)
    }

    pub fn over_budget(&self) -> bool {
        self.budget_ratio().is_some_and(|ratio| ratio > 1.0)
    }

    pub fn completed_count_drifted(&self) -> bool {
        self.completed_projects != self.completed_by_status
    }
}

pub fn budget_used_cents(projects: &[Project]) -> i64 {
    projects
        .iter()
        .map(|project| project.estimated_cost_cents)
        .fold(0i64, i64::saturating_add)
}

pub fn count_with_status(projects: &[Project], status: ProjectStatus) -> usize {
    projects
        .iter()
        .filter(|project| project.status == status)
        .count()
}

/// Intents a project card offers for its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectActions {
    pub details: bool,
    pub add_to_shopping_list: bool,
    pub status_action: Option<StatusAction>,
}

impl ProjectActions {
    pub fn for_project(project: &Project) -> Self {
        let open = project.status != ProjectStatus::Completed;
        Self {
            details: true,
            add_to_shopping_list: open,
            status_action: project.status.advance_action(),
        }
    }
}

/// Headline numbers of the rooms tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub rooms: usize,
    pub projects: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn collect(rooms: &[Room], projects: &[Project]) -> Self {
        Self {
            rooms: rooms.len(),
            projects: projects.len(),
            completed: rooms.iter().map(|room| room.completed_projects).sum(),
        }
    }
}
