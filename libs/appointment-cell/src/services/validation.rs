use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;

use crate::models::{
    AddAppointmentRequest, AppointmentError, AppointmentKind, ValidatedAppointment,
    DATETIME_FORMAT, DATE_FORMAT, SLOT_INTERVAL_MINUTES,
};

// chrono skips whitespace and accepts a signed year, so the raw shape is checked first.
// Single-digit fields stay valid.
static DATE_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").ok());
static DATETIME_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}\s+[0-9]{1,2}:[0-9]{1,2}$").ok());

fn has_shape(shape: &LazyLock<Option<Regex>>, raw: &str) -> bool {
    Option::as_ref(shape).is_some_and(|re| re.is_match(raw))
}

/// Parse the day segment of an appointment query. Surrounding whitespace is ignored.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppointmentError> {
    let raw = raw.trim();
    if !has_shape(&DATE_SHAPE, raw) {
        return Err(AppointmentError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppointmentError::InvalidDateFormat)
}

pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, AppointmentError> {
    if !has_shape(&DATETIME_SHAPE, raw) {
        return Err(AppointmentError::InvalidDateTimeFormat);
    }

    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map_err(|_| AppointmentError::InvalidDateTimeFormat)
}

pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

pub fn check_interval(datetime: &NaiveDateTime) -> Result<(), AppointmentError> {
    if datetime.minute() % SLOT_INTERVAL_MINUTES != 0 {
        return Err(AppointmentError::InvalidInterval);
    }

    Ok(())
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Run the checks that only look at the request itself, in the order their
/// errors take precedence: required fields, kind, datetime format, interval.
/// Slot capacity is checked by the store.
pub fn validate_add_request(request: AddAppointmentRequest) -> Result<ValidatedAppointment, AppointmentError> {
    let (doctor_id, patient_first_name, patient_last_name, datetime, kind) = match (
        required(request.doctor_id),
        required(request.patient_first_name),
        required(request.patient_last_name),
        required(request.datetime),
        required(request.kind),
    ) {
        (Some(d), Some(f), Some(l), Some(dt), Some(k)) => (d, f, l, dt, k),
        _ => return Err(AppointmentError::MissingFields),
    };

    let kind: AppointmentKind = kind.parse()?;
    let datetime = parse_datetime(&datetime)?;
    check_interval(&datetime)?;

    Ok(ValidatedAppointment {
        doctor_id,
        patient_first_name,
        patient_last_name,
        datetime,
        kind,
    })
}
