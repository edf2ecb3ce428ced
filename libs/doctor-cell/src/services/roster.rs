use tracing::debug;

use crate::models::{Doctor, DoctorError};

/// Doctors known to the clinic, in seed order.
///
/// The roster is fixed once the process starts, so it is shared behind an
/// `Arc` without any locking.
#[derive(Debug, Clone, Default)]
pub struct DoctorRoster {
    doctors: Vec<Doctor>,
}

impl DoctorRoster {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// The clinic's starting roster.
    pub fn seeded() -> Self {
        Self::new(vec![
            Doctor::new("Jack", "Smith"),
            Doctor::new("Emily", "Lee"),
        ])
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn list_doctors(&self) -> Result<&[Doctor], DoctorError> {
        debug!("Listing {} doctors", self.doctors.len());

        if self.doctors.is_empty() {
            return Err(DoctorError::NoDoctorsAvailable);
        }

        Ok(&self.doctors)
    }

    pub fn find_by_name(&self, first_name: &str, last_name: &str) -> Option<&Doctor> {
        self.doctors
            .iter()
            .find(|doctor| doctor.first_name == first_name && doctor.last_name == last_name)
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
