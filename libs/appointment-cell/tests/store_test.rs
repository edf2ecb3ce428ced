use std::sync::Arc;

use assert_matches::assert_matches;
use futures::future::join_all;

use appointment_cell::models::*;
use appointment_cell::services::validation::format_datetime;
use appointment_cell::AppointmentStore;
use doctor_cell::DoctorRoster;

fn request(doctor_id: &str, datetime: &str) -> AddAppointmentRequest {
    AddAppointmentRequest {
        doctor_id: Some(doctor_id.to_string()),
        patient_first_name: Some("June".to_string()),
        patient_last_name: Some("Lane".to_string()),
        datetime: Some(datetime.to_string()),
        kind: Some("New Patient".to_string()),
    }
}

fn seeded_store() -> (AppointmentStore, String, String) {
    let roster = Arc::new(DoctorRoster::seeded());
    let doctors = roster.list_doctors().unwrap();
    let jack = doctors[0].id.to_string();
    let emily = doctors[1].id.to_string();
    (AppointmentStore::seeded(roster), jack, emily)
}

#[tokio::test]
async fn test_seeded_store_contents() {
    let (store, jack, emily) = seeded_store();

    assert_eq!(store.list_doctors().unwrap().len(), 2);
    assert_eq!(store.appointment_count().await, 3);

    let jack_day = store.find_appointments(&jack, "2024-04-23").await.unwrap();
    assert_eq!(jack_day.len(), 2);
    assert_eq!(jack_day[0].patient_name(), "June Lane");
    assert_eq!(jack_day[1].patient_name(), "Mary Jane");
    assert_eq!(jack_day[1].kind, AppointmentKind::FollowUp);

    let emily_day = store.find_appointments(&emily, "2024-04-23").await.unwrap();
    assert_eq!(emily_day.len(), 1);
    assert_eq!(format_datetime(&emily_day[0].datetime), "2024-04-23 10:00");
}

#[tokio::test]
async fn test_seed_skips_unknown_doctors() {
    let store = AppointmentStore::seeded(Arc::new(DoctorRoster::empty()));

    assert_eq!(store.appointment_count().await, 0);
    assert!(store.list_doctors().is_err());
}

#[tokio::test]
async fn test_add_appointment_returns_canonical_record() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::seeded()));

    let appointment = store.add_appointment(request("doc-1", "2024-4-23 8:00")).await.unwrap();

    assert_eq!(appointment.doctor_id, "doc-1");
    assert_eq!(format_datetime(&appointment.datetime), "2024-04-23 08:00");
    assert_eq!(store.find_appointments("doc-1", "2024-04-23").await.unwrap(), vec![appointment]);
}

#[tokio::test]
async fn test_ids_are_unique() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));

    let first = store.add_appointment(request("doc-1", "2024-04-23 08:00")).await.unwrap();
    let second = store.add_appointment(request("doc-1", "2024-04-23 08:00")).await.unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_slot_capacity() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));

    for _ in 0..SLOT_CAPACITY {
        store.add_appointment(request("doc-1", "2024-04-23 08:00")).await.unwrap();
    }

    assert_matches!(
        store.add_appointment(request("doc-1", "2024-04-23 08:00")).await,
        Err(AppointmentError::SlotFull)
    );
    assert_eq!(store.appointment_count().await, SLOT_CAPACITY);

    // Neighbouring slot and another doctor at the same time are unaffected.
    assert!(store.add_appointment(request("doc-1", "2024-04-23 08:15")).await.is_ok());
    assert!(store.add_appointment(request("doc-2", "2024-04-23 08:00")).await.is_ok());
}

#[tokio::test]
async fn test_equivalent_datetimes_share_a_slot() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));

    store.add_appointment(request("doc-1", "2024-04-23 08:00")).await.unwrap();
    store.add_appointment(request("doc-1", "2024-4-23 08:00")).await.unwrap();
    store.add_appointment(request("doc-1", "2024-04-23 8:00")).await.unwrap();

    assert_matches!(
        store.add_appointment(request("doc-1", "2024-04-23 08:00")).await,
        Err(AppointmentError::SlotFull)
    );
}

#[tokio::test]
async fn test_format_errors_reported_before_capacity() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));
    for _ in 0..SLOT_CAPACITY {
        store.add_appointment(request("doc-1", "2024-04-23 08:00")).await.unwrap();
    }

    assert_matches!(
        store.add_appointment(request("doc-1", "2024-04-23 08:00:00")).await,
        Err(AppointmentError::InvalidDateTimeFormat)
    );

    let mut bad_kind = request("doc-1", "2024-04-23 08:00");
    bad_kind.kind = Some("Walk-in".to_string());
    assert_matches!(store.add_appointment(bad_kind).await, Err(AppointmentError::InvalidKind));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_never_overbook() {
    let store = Arc::new(AppointmentStore::new(Arc::new(DoctorRoster::empty())));

    let attempts = (0..12).map(|_| {
        let store = store.clone();
        tokio::spawn(async move {
            store.add_appointment(request("doc-1", "2024-04-23 11:45")).await
        })
    });

    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let booked = results.iter().filter(|r| r.is_ok()).count();
    let full = results.iter().filter(|r| matches!(r, Err(AppointmentError::SlotFull))).count();

    assert_eq!(booked, SLOT_CAPACITY);
    assert_eq!(full, 12 - SLOT_CAPACITY);
    assert_eq!(store.appointment_count().await, SLOT_CAPACITY);
}

#[tokio::test]
async fn test_find_matches_doctor_and_day_only() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));

    store.add_appointment(request("doc-1", "2024-04-23 00:00")).await.unwrap();
    store.add_appointment(request("doc-1", "2024-04-23 23:45")).await.unwrap();
    store.add_appointment(request("doc-1", "2024-04-24 08:00")).await.unwrap();
    store.add_appointment(request("doc-2", "2024-04-23 08:00")).await.unwrap();

    let found = store.find_appointments("doc-1", "2024-04-23").await.unwrap();
    let times: Vec<String> = found.iter().map(|apt| format_datetime(&apt.datetime)).collect();
    assert_eq!(times, vec!["2024-04-23 00:00", "2024-04-23 23:45"]);

    assert_matches!(
        store.find_appointments("doc-3", "2024-04-23").await,
        Err(AppointmentError::NoAppointmentsFound)
    );
    assert_matches!(
        store.find_appointments("doc-1", "2024-04-25").await,
        Err(AppointmentError::NoAppointmentsFound)
    );
}

#[tokio::test]
async fn test_find_rejects_bad_date_before_lookup() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));

    for date in ["23-04-2024", "+2024-04-23"] {
        assert_matches!(
            store.find_appointments("doc-1", date).await,
            Err(AppointmentError::InvalidDateFormat),
            "{date}"
        );
    }
}

#[tokio::test]
async fn test_malformed_datetimes_are_never_booked() {
    let store = AppointmentStore::new(Arc::new(DoctorRoster::empty()));

    for datetime in ["2024-04-2308:00", " 2024-04-23 08:00", "+2024-04-23 08:00"] {
        assert_matches!(
            store.add_appointment(request("doc-1", datetime)).await,
            Err(AppointmentError::InvalidDateTimeFormat),
            "{datetime}"
        );
    }

    assert_eq!(store.appointment_count().await, 0);
}

#[tokio::test]
async fn test_delete_appointment() {
    let (store, jack, _) = seeded_store();
    let target = store.find_appointments(&jack, "2024-04-23").await.unwrap().remove(0);

    store.delete_appointment(&target.id.to_string()).await.unwrap();
    assert_eq!(store.appointment_count().await, 2);

    let remaining = store.find_appointments(&jack, "2024-04-23").await.unwrap();
    assert!(remaining.iter().all(|apt| apt.id != target.id));

    assert_matches!(
        store.delete_appointment(&target.id.to_string()).await,
        Err(AppointmentError::NotFound)
    );
    assert_eq!(store.appointment_count().await, 2);
}

#[tokio::test]
async fn test_delete_unknown_id_leaves_store_untouched() {
    let (store, jack, emily) = seeded_store();
    let jack_before = store.find_appointments(&jack, "2024-04-23").await.unwrap();
    let emily_before = store.find_appointments(&emily, "2024-04-23").await.unwrap();

    for id in ["not-a-uuid", "", "00000000-0000-0000-0000-000000000000"] {
        assert_matches!(store.delete_appointment(id).await, Err(AppointmentError::NotFound));
    }

    assert_eq!(store.appointment_count().await, 3);
    assert_eq!(store.find_appointments(&jack, "2024-04-23").await.unwrap(), jack_before);
    assert_eq!(store.find_appointments(&emily, "2024-04-23").await.unwrap(), emily_before);
}

#[test]
fn test_appointment_json_shape() {
    let appointment = Appointment::new(
        "doc-1",
        "June",
        "Lane",
        appointment_cell::services::validation::parse_datetime("2024-04-23 08:00").unwrap(),
        AppointmentKind::NewPatient,
    );

    let json = serde_json::to_value(&appointment).unwrap();
    assert_eq!(json["id"], appointment.id.to_string());
    assert_eq!(json["doctor_id"], "doc-1");
    assert_eq!(json["datetime"], "2024-04-23 08:00");
    assert_eq!(json["kind"], "New Patient");

    let back: Appointment = serde_json::from_value(json).unwrap();
    assert_eq!(back, appointment);
}
