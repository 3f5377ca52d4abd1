// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numeric::{
    format_square_feet_preview, parse_budget_cents, parse_leading_number, parse_measurement,
};
use crate::{ImageRequestId, Measurements, Room, RoomId, RoomType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("room name is required -- enter a name and retry")]
    MissingName,
    #[error("room type is required -- choose a room type and retry")]
    MissingType,
}

/// Room-creation request handed from the intake dialog to the room list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "totalBudget", with = "crate::numeric::dollars")]
    pub total_budget_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
}

impl CreateRoomRequest {
    pub fn into_room(self, id: RoomId) -> Room {
        Room {
            id,
            name: self.name,
            room_type: self.room_type,
            image_url: self.image_url,
            projects: Vec::new(),
            total_budget_cents: self.total_budget_cents,
            measurements: self.measurements,
            completed_projects: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    Photo,
    Name,
    RoomType,
    Length,
    Width,
    Height,
    Budget,
}

impl IntakeField {
    pub const ALL: [Self; 7] = [
        Self::Photo,
        Self::Name,
        Self::RoomType,
        Self::Length,
        Self::Width,
        Self::Height,
        Self::Budget,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Photo => "Room Photo (Optional)",
            Self::Name => "Room Name",
            Self::RoomType => "Room Type",
            Self::Length => "Length (ft)",
            Self::Width => "Width (ft)",
            Self::Height => "Height (ft)",
            Self::Budget => "Total Budget (Optional)",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Photo => "path to an image file",
            Self::Name => "e.g., Master Bedroom",
            Self::RoomType => "Select room type",
            Self::Length => "Length (ft)",
            Self::Width => "Width (ft)",
            Self::Height => "Height (ft)",
            Self::Budget => "0",
        }
    }
}

/// Image picked in the intake dialog. Only the read matching `pending` may
/// fill the preview; every new read or removal moves the token on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlot {
    pub source: String,
    pub preview: Option<String>,
    pending: Option<ImageRequestId>,
    issued: u64,
}

impl ImageSlot {
    pub fn begin_read(&mut self) -> ImageRequestId {
        self.issued = self.issued.saturating_add(1);
        let request_id = ImageRequestId::new(self.issued);
        self.pending = Some(request_id);
        request_id
    }

    /// Returns false and leaves the slot untouched when `request_id` is stale.
    pub fn complete_read(&mut self, request_id: ImageRequestId, data_uri: String) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        self.preview = Some(data_uri);
        true
    }

    pub fn fail_read(&mut self, request_id: ImageRequestId) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        true
    }

    /// A different path invalidates the loaded preview and any read in flight.
    pub fn set_source(&mut self, source: String) {
        if self.source != source {
            self.pending = None;
            self.preview = None;
        }
        self.source = source;
    }

    pub fn remove(&mut self) {
        self.pending = None;
        self.preview = None;
        self.source.clear();
    }

    pub fn pending(&self) -> Option<ImageRequestId> {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// Local state of the add-room dialog: raw field text plus the image slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomIntake {
    pub name: String,
    pub room_type: Option<RoomType>,
    pub budget: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub image: ImageSlot,
}

impl RoomIntake {
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.name.trim().is_empty() {
            return Err(IntakeError::MissingName);
        }
        match &self.room_type {
            None => Err(IntakeError::MissingType),
            Some(RoomType::Custom(label)) if label.trim().is_empty() => {
                Err(IntakeError::MissingType)
            }
            Some(_) => Ok(()),
        }
    }

    pub fn to_request(&self) -> Result<CreateRoomRequest, IntakeError> {
        self.validate()?;
        let room_type = self.room_type.clone().ok_or(IntakeError::MissingType)?;
        Ok(CreateRoomRequest {
            name: self.name.clone(),
            room_type,
            image_url: self.image.preview.clone(),
            total_budget_cents: parse_budget_cents(&self.budget),
            measurements: self.measurements(),
        })
    }

    /// Present as soon as any dimension has text, even if none of it parses.
    pub fn measurements(&self) -> Option<Measurements> {
        let any_text = [&self.length, &self.width, &self.height]
            .into_iter()
            .any(|text| !text.is_empty());
        if !any_text {
            return None;
        }
        Some(Measurements::new(
            parse_measurement(&self.length),
            parse_measurement(&self.width),
            parse_measurement(&self.height),
        ))
    }

    /// Live "Square footage: N sq ft" figure shown while both sides are typed.
    pub fn square_footage_preview(&self) -> Option<String> {
        if self.length.is_empty() || self.width.is_empty() {
            return None;
        }
        let length = parse_leading_number(&self.length)?;
        let width = parse_leading_number(&self.width)?;
        Some(length * width)
            .filter(|area| area.is_finite())
            .map(format_square_feet_preview)
    }

    pub fn text(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::Photo => &self.image.source,
            IntakeField::Name => &self.name,
            IntakeField::RoomType => self.room_type.as_ref().map_or("", RoomType::label),
            IntakeField::Length => &self.length,
            IntakeField::Width => &self.width,
            IntakeField::Height => &self.height,
            IntakeField::Budget => &self.budget,
        }
    }

    pub fn set_text(&mut self, field: IntakeField, value: String) {
        match field {
            IntakeField::Photo => self.image.set_source(value),
            IntakeField::Name => self.name = value,
            IntakeField::RoomType => {
                self.room_type = if value.trim().is_empty() {
                    None
                } else {
                    Some(RoomType::parse(&value))
                };
            }
            IntakeField::Length => self.length = value,
            IntakeField::Width => self.width = value,
            IntakeField::Height => self.height = value,
            IntakeField::Budget => self.budget = value,
        }
    }

    /// Steps through the preset room types, starting from the first one when
    /// nothing (or a free-form type) is selected.
    pub fn cycle_room_type(&mut self, delta: isize) {
        let presets = RoomType::PRESETS;
        let len = presets.len() as isize;
        let next = match self.room_type.as_ref().and_then(RoomType::preset_index) {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.room_type = Some(presets[next as usize].clone());
    }

    pub fn reset(&mut self) {
        *self = Self {
            image: ImageSlot {
                issued: self.image.issued,
                ..ImageSlot::default()
            },
            ..Self::default()
        };
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.room_type.is_none()
            && self.budget.is_empty()
            && self.length.is_empty()
            && self.width.is_empty()
            && self.height.is_empty()
            && self.image.source.is_empty()
            && self.image.preview.is_none()
            && self.image.pending.is_none()
    }
}
