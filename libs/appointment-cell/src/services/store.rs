use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::{Doctor, DoctorError, DoctorRoster};

use crate::models::{
    AddAppointmentRequest, Appointment, AppointmentError, AppointmentKind, SLOT_CAPACITY,
};
use crate::services::validation::{parse_date, parse_datetime, validate_add_request};

/// Appointments present when the clinic opens: (doctor, patient, datetime, kind).
const SEED_APPOINTMENTS: [(&str, &str, &str, &str, &str, AppointmentKind); 3] = [
    ("Jack", "Smith", "June", "Lane", "2024-04-23 08:00", AppointmentKind::NewPatient),
    ("Jack", "Smith", "Mary", "Jane", "2024-04-23 09:00", AppointmentKind::FollowUp),
    ("Emily", "Lee", "Crystal", "Lee", "2024-04-23 10:00", AppointmentKind::NewPatient),
];

/// Authoritative in-memory record of the clinic's doctors and appointments.
///
/// Every mutation, and the capacity count that guards an insert, runs under
/// the write half of a single lock so concurrent requests cannot overbook a slot.
pub struct AppointmentStore {
    doctors: Arc<DoctorRoster>,
    appointments: RwLock<Vec<Appointment>>,
}

impl AppointmentStore {
    pub fn new(doctors: Arc<DoctorRoster>) -> Self {
        Self::with_appointments(doctors, Vec::new())
    }

    pub fn with_appointments(doctors: Arc<DoctorRoster>, appointments: Vec<Appointment>) -> Self {
        Self {
            doctors,
            appointments: RwLock::new(appointments),
        }
    }

    /// Store holding the starting appointments for whichever seed doctors the roster knows.
    pub fn seeded(doctors: Arc<DoctorRoster>) -> Self {
        let appointments: Vec<Appointment> = SEED_APPOINTMENTS
            .iter()
            .filter_map(|(doc_first, doc_last, first, last, datetime, kind)| {
                let doctor = doctors.find_by_name(doc_first, doc_last)?;
                let datetime = parse_datetime(datetime).ok()?;
                debug!("Seeding appointment for {} {} with Dr. {}", first, last, doctor.full_name());
                Some(Appointment::new(&doctor.id.to_string(), first, last, datetime, *kind))
            })
            .collect();

        info!("Seeded {} doctors and {} appointments", doctors.len(), appointments.len());

        Self::with_appointments(doctors, appointments)
    }

    pub fn doctors(&self) -> Arc<DoctorRoster> {
        self.doctors.clone()
    }

    pub fn list_doctors(&self) -> Result<&[Doctor], DoctorError> {
        self.doctors.list_doctors()
    }

    /// Appointments for `doctor_id` on the calendar day `date` (`YYYY-MM-DD`), in store order.
    pub async fn find_appointments(
        &self,
        doctor_id: &str,
        date: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let date = parse_date(date)?;

        let appointments = self.appointments.read().await;
        let matches: Vec<Appointment> = appointments
            .iter()
            .filter(|apt| apt.doctor_id == doctor_id && apt.datetime.date() == date)
            .cloned()
            .collect();

        debug!("Found {} appointments for doctor {} on {}", matches.len(), doctor_id, date);

        if matches.is_empty() {
            return Err(AppointmentError::NoAppointmentsFound);
        }

        Ok(matches)
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        // Ids are always UUIDs, so anything else cannot match.
        let id = Uuid::parse_str(appointment_id).map_err(|_| AppointmentError::NotFound)?;

        let mut appointments = self.appointments.write().await;
        let position = appointments
            .iter()
            .position(|apt| apt.id == id)
            .ok_or(AppointmentError::NotFound)?;

        let removed = appointments.remove(position);
        info!(
            "Deleted appointment {} ({}) for doctor {}",
            removed.id, removed.patient_name(), removed.doctor_id
        );

        Ok(())
    }

    pub async fn add_appointment(
        &self,
        request: AddAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let validated = validate_add_request(request)?;

        let mut appointments = self.appointments.write().await;

        let booked = appointments
            .iter()
            .filter(|apt| apt.occupies(&validated.doctor_id, &validated.datetime))
            .count();

        if booked >= SLOT_CAPACITY {
            warn!(
                "Slot {} for doctor {} is full ({} booked)",
                validated.datetime, validated.doctor_id, booked
            );
            return Err(AppointmentError::SlotFull);
        }

        let appointment = validated.into_appointment();
        appointments.push(appointment.clone());

        info!(
            "Booked {} appointment {} for {} with doctor {} at {}",
            appointment.kind, appointment.id, appointment.patient_name(), appointment.doctor_id,
            appointment.datetime
        );

        Ok(appointment)
    }

    pub async fn appointment_count(&self) -> usize {
        self.appointments.read().await.len()
    }
}
