// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use remould_app::{
    AppCommand, AppState, IntakeField, NavTarget, Project, ProjectId, ProjectOrigin,
    ProjectStatus, Room, RoomId, RoomType,
};
use std::path::PathBuf;

const PROJECT_TITLES: [(&str, &[&str]); 8] = [
    ("Paint", &["Paint walls", "Paint accent wall", "Refinish ceiling"]),
    ("Trim", &["Install baseboards", "Install crown molding", "Replace door casing"]),
    ("Electrical", &["Add outlets", "Swap light switches", "Install dimmer"]),
    ("Plumbing", &["Replace faucet", "Fix running toilet", "Install shower head"]),
    ("Flooring", &["Lay vinyl plank", "Refinish hardwood", "Replace carpet"]),
    ("Lighting", &["New lighting", "Install pendant lights", "Add under-cabinet lights"]),
    ("Storage", &["Build closet shelves", "Add wall hooks", "Install pantry organizer"]),
    ("Windows", &["Replace blinds", "Seal window frames", "Hang curtains"]),
];

const ROOM_NAMES: [&str; 10] = [
    "Master Bedroom",
    "Guest Room",
    "Kitchen",
    "Main Bath",
    "Half Bath",
    "Living Room",
    "Den",
    "Office",
    "Mudroom",
    "Garage",
];

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// SplitMix64 stream. Small, seedable, and stable across platforms, which is
/// all fixtures need.
#[derive(Debug, Clone)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform enough in `0..bound` for fixture data; 0 when `bound` is 0.
    fn below(&mut self, bound: usize) -> usize {
        match bound {
            0 | 1 => 0,
            bound => (self.next_u64() % bound as u64) as usize,
        }
    }

    fn one_in(&mut self, odds: usize) -> bool {
        self.below(odds) == 0
    }
}

/// Seeded generator of plausible rooms and projects. The same seed always
/// yields the same records.
#[derive(Debug, Clone)]
pub struct RenovationFaker {
    rng: SplitMix64,
    issued_ids: u64,
}

impl RenovationFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            issued_ids: 0,
        }
    }

    pub fn project(&mut self) -> Project {
        let (category, titles) = PROJECT_TITLES[self.rng.below(PROJECT_TITLES.len())];
        let status = ProjectStatus::ALL[self.rng.below(ProjectStatus::ALL.len())];
        let origin = if self.rng.one_in(2) {
            ProjectOrigin::AiSuggested
        } else {
            ProjectOrigin::Manual
        };
        let id = self.issue_id();
        Project {
            title: titles[self.rng.below(titles.len())].to_owned(),
            origin,
            contractor_required: category == "Electrical" || self.rng.one_in(5),
            category: Some(category.to_owned()),
            // $50 to $2,000 in whole dollars.
            ..project(&id.to_string(), status, self.dollars(50, 2_000))
        }
    }

    /// A room owning `project_count` faked projects. Its stored completed
    /// count agrees with the project statuses.
    pub fn room(&mut self, project_count: usize) -> Room {
        let projects = (0..project_count).map(|_| self.project()).collect::<Vec<_>>();
        let completed_projects = projects
            .iter()
            .filter(|project| project.status == ProjectStatus::Completed)
            .count();
        let id = self.issue_id();
        let budget = self.dollars(5_000, 50_000);
        Room {
            name: ROOM_NAMES[self.rng.below(ROOM_NAMES.len())].to_owned(),
            room_type: RoomType::PRESETS[self.rng.below(RoomType::PRESETS.len())].clone(),
            completed_projects,
            ..room_with_projects(&format!("room-{id}"), budget, projects)
        }
    }

    /// `count` rooms with up to `max_projects` projects each.
    pub fn rooms(&mut self, count: usize, max_projects: usize) -> Vec<Room> {
        (0..count)
            .map(|_| {
                let project_count = self.rng.below(max_projects + 1);
                self.room(project_count)
            })
            .collect()
    }

    fn issue_id(&mut self) -> u64 {
        self.issued_ids += 1;
        self.issued_ids
    }

    fn dollars(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min).max(0) as usize;
        (min + self.rng.below(span + 1) as i64) * 100
    }
}

pub fn project(id: &str, status: ProjectStatus, estimated_cost_cents: i64) -> Project {
    Project {
        id: ProjectId::new(id),
        title: format!("Project {id}"),
        origin: ProjectOrigin::Manual,
        status,
        estimated_cost_cents,
        contractor_required: false,
        category: None,
        description: None,
    }
}

pub fn room_with_projects(id: &str, total_budget_cents: i64, projects: Vec<Project>) -> Room {
    Room {
        id: RoomId::new(id),
        name: format!("Room {id}"),
        room_type: RoomType::Other,
        image_url: None,
        projects,
        total_budget_cents,
        measurements: None,
        completed_projects: 0,
    }
}

/// Demo state with the add-room dialog open and name/type filled in.
pub fn state_with_open_intake(name: &str, room_type: RoomType) -> AppState {
    let mut state = AppState::with_demo_data();
    state.dispatch(AppCommand::Navigate(NavTarget::Add));
    state.dispatch(AppCommand::EditIntake {
        field: IntakeField::Name,
        value: name.to_owned(),
    });
    state.dispatch(AppCommand::EditIntake {
        field: IntakeField::RoomType,
        value: room_type.label().to_owned(),
    });
    state
}

/// Writes a file holding just a PNG signature under a fresh temp dir.
pub fn temp_image_file(file_name: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(file_name);
    std::fs::write(&path, PNG_SIGNATURE)
        .with_context(|| format!("write image fixture {}", path.display()))?;
    Ok((dir, path))
}

pub fn png_fixture_bytes() -> &'static [u8] {
    &PNG_SIGNATURE
}
