// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Wire format of an appointment's date and time of day.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Wire format of a calendar day in appointment queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Most appointments one doctor may hold at the same timestamp.
pub const SLOT_CAPACITY: usize = 3;
pub const SLOT_INTERVAL_MINUTES: u32 = 15;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    #[serde(with = "slot_datetime")]
    pub datetime: NaiveDateTime,
    pub kind: AppointmentKind,
}

impl Appointment {
    pub fn new(
        doctor_id: &str,
        patient_first_name: &str,
        patient_last_name: &str,
        datetime: NaiveDateTime,
        kind: AppointmentKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            doctor_id: doctor_id.to_string(),
            patient_first_name: patient_first_name.to_string(),
            patient_last_name: patient_last_name.to_string(),
            datetime,
            kind,
        }
    }

    /// Whether this appointment occupies the given doctor's slot at `datetime`.
    pub fn occupies(&self, doctor_id: &str, datetime: &NaiveDateTime) -> bool {
        self.doctor_id == doctor_id && self.datetime == *datetime
    }

    pub fn patient_name(&self) -> String {
        format!("{} {}", self.patient_first_name, self.patient_last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentKind {
    #[serde(rename = "New Patient")]
    NewPatient,

    #[serde(rename = "Follow-up")]
    FollowUp,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::NewPatient => "New Patient",
            AppointmentKind::FollowUp => "Follow-up",
        }
    }
}

impl fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentKind {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New Patient" => Ok(AppointmentKind::NewPatient),
            "Follow-up" => Ok(AppointmentKind::FollowUp),
            _ => Err(AppointmentError::InvalidKind),
        }
    }
}

/// Serde adapter keeping appointment datetimes in `YYYY-MM-DD HH:MM` form.
pub mod slot_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;
    use crate::services::validation::format_datetime;

    pub fn serialize<S>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_datetime(datetime))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Body of `POST /appointments`. Every field is optional on the wire so that
/// absent and empty values are reported the same way by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddAppointmentRequest {
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub patient_first_name: Option<String>,
    #[serde(default)]
    pub patient_last_name: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// An add request that passed every check that does not need the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAppointment {
    pub doctor_id: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub datetime: NaiveDateTime,
    pub kind: AppointmentKind,
}

impl ValidatedAppointment {
    pub fn into_appointment(self) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            doctor_id: self.doctor_id,
            patient_first_name: self.patient_first_name,
            patient_last_name: self.patient_last_name,
            datetime: self.datetime,
            kind: self.kind,
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid appointment type. Must be 'New Patient' or 'Follow-up'.")]
    InvalidKind,

    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDateFormat,

    #[error("Invalid datetime format. Please use YYYY-MM-DD HH:MM.")]
    InvalidDateTimeFormat,

    #[error("Appointment time must be in 15 minute intervals")]
    InvalidInterval,

    #[error("This doctor already has 3 appointments at the same time")]
    SlotFull,

    #[error("No appointments found with given doctor and date.")]
    NoAppointmentsFound,

    #[error("Appointment was not found")]
    NotFound,
}
