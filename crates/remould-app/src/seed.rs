// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Records the app starts with. Nothing is persisted, so every session begins
//! from these.

use crate::{
    Project, ProjectId, ProjectOrigin, ProjectStatus, Room, RoomId, RoomType, User, UserId,
    UserType,
};

pub const HERO_IMAGE: &str = "assets/hero-image.jpg";

pub fn demo_rooms() -> Vec<Room> {
    vec![
        Room {
            id: RoomId::new("1"),
            name: "Master Bedroom".to_owned(),
            room_type: RoomType::Bedroom,
            image_url: Some(HERO_IMAGE.to_owned()),
            projects: vec![
                project(
                    "1",
                    "Paint walls",
                    ProjectOrigin::Manual,
                    ProjectStatus::InProgress,
                    20_000,
                    false,
                    "Paint",
                ),
                project(
                    "2",
                    "Install baseboards",
                    ProjectOrigin::AiSuggested,
                    ProjectStatus::Planned,
                    15_000,
                    false,
                    "Trim",
                ),
            ],
            total_budget_cents: 150_000,
            measurements: None,
            completed_projects: 1,
        },
        Room {
            id: RoomId::new("2"),
            name: "Living Room".to_owned(),
            room_type: RoomType::LivingRoom,
            image_url: None,
            projects: vec![project(
                "3",
                "New lighting",
                ProjectOrigin::AiSuggested,
                ProjectStatus::Completed,
                30_000,
                true,
                "Electrical",
            )],
            total_budget_cents: 200_000,
            measurements: None,
            completed_projects: 1,
        },
    ]
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            description: Some("Add a warm accent color to create visual interest".to_owned()),
            ..project(
                "1",
                "Paint accent wall",
                ProjectOrigin::AiSuggested,
                ProjectStatus::InProgress,
                18_000,
                false,
                "Paint",
            )
        },
        project(
            "2",
            "Install crown molding",
            ProjectOrigin::Manual,
            ProjectStatus::Planned,
            45_000,
            true,
            "Trim",
        ),
    ]
}

pub fn demo_user() -> User {
    User {
        id: UserId::new("user-1"),
        email: "user@example.com".to_owned(),
        language: "en".to_owned(),
        user_type: UserType::Homeowner,
    }
}

fn project(
    id: &str,
    title: &str,
    origin: ProjectOrigin,
    status: ProjectStatus,
    estimated_cost_cents: i64,
    contractor_required: bool,
    category: &str,
) -> Project {
    Project {
        id: ProjectId::new(id),
        title: title.to_owned(),
        origin,
        status,
        estimated_cost_cents,
        contractor_required,
        category: Some(category.to_owned()),
        description: None,
    }
}
