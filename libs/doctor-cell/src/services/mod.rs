pub mod roster;

pub use roster::DoctorRoster;
