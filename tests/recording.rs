mod common;

use chrono::NaiveDate;
use common::{empty_manager, entry, status_id};
use klassenbuch::error::Error;

fn day(day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day_of_month).expect("valid test date")
}

#[test]
fn creates_a_new_record_for_the_day() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    let result = manager
        .record_for_date(day(4), &[entry(student.id, present, None, None)])
        .unwrap();
    assert_eq!(result, Some(group.id));

    let record = manager
        .find_record_for_day(student.id, day(4))
        .unwrap()
        .expect("record stored");
    assert_eq!(record.status_id, present);
    assert_eq!(record.date, day(4));
    assert_eq!(record.comment, None);
}

#[test]
fn second_submission_updates_the_record_in_place() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");
    let sick = status_id(&mut manager, "Krank");

    manager
        .record_for_date(day(4), &[entry(student.id, present, None, Some("morgens da"))])
        .unwrap();
    let first = manager
        .find_record_for_day(student.id, day(4))
        .unwrap()
        .expect("first submission stored");

    manager
        .record_for_date(day(4), &[entry(student.id, sick, None, Some("nach Hause gegangen"))])
        .unwrap();
    let second = manager
        .find_record_for_day(student.id, day(4))
        .unwrap()
        .expect("second submission stored");

    assert_eq!(second.id, first.id);
    assert_eq!(second.status_id, sick);
    assert_eq!(second.comment.as_deref(), Some("nach Hause gegangen"));
    assert_eq!(manager.records_for_student(student.id).unwrap().len(), 1);
}

#[test]
fn separate_days_get_separate_records() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    manager
        .record_for_date(day(4), &[entry(student.id, present, None, None)])
        .unwrap();
    manager
        .record_for_date(day(5), &[entry(student.id, present, None, None)])
        .unwrap();

    assert_eq!(manager.records_for_student(student.id).unwrap().len(), 2);
}

#[test]
fn late_arrival_gets_a_lateness_note() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    manager
        .record_for_date(day(4), &[entry(student.id, present, Some("08:15"), None)])
        .unwrap();

    let record = manager
        .find_record_for_day(student.id, day(4))
        .unwrap()
        .expect("record stored");
    assert_eq!(record.comment.as_deref(), Some("Verspätung: 15 Minuten"));
}

#[test]
fn late_arrival_appends_to_an_existing_comment() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    manager
        .record_for_date(
            day(4),
            &[entry(student.id, present, Some("08:15"), Some("bitte ignorieren"))],
        )
        .unwrap();

    let record = manager
        .find_record_for_day(student.id, day(4))
        .unwrap()
        .expect("record stored");
    assert_eq!(
        record.comment.as_deref(),
        Some("bitte ignorieren | Verspätung: 15 Minuten")
    );
}

#[test]
fn on_time_arrival_adds_no_note() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    manager
        .record_for_date(day(4), &[entry(student.id, present, Some("08:00"), None)])
        .unwrap();

    let record = manager
        .find_record_for_day(student.id, day(4))
        .unwrap()
        .expect("record stored");
    assert_eq!(record.comment, None);
}

#[test]
fn unknown_student_rolls_back_the_whole_batch() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    let result = manager.record_for_date(
        day(4),
        &[
            entry(student.id, present, None, None),
            entry(999, present, None, None),
        ],
    );

    assert!(matches!(result, Err(Error::StudentNotFound(999))));
    assert!(manager.records_for_student(student.id).unwrap().is_empty());
}

#[test]
fn unknown_status_rolls_back_the_whole_batch() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let student = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    let result = manager.record_for_date(
        day(4),
        &[
            entry(student.id, present, None, None),
            entry(student.id, 999, None, None),
        ],
    );

    assert!(matches!(result, Err(Error::StatusNotFound(999))));
    assert!(manager.records_for_student(student.id).unwrap().is_empty());
}

#[test]
fn malformed_arrival_time_rolls_back_the_whole_batch() {
    let mut manager = empty_manager();
    let group = manager.find_or_create_group("10b").unwrap();
    let first = manager.add_student("Mustermann", "Max", group.id).unwrap();
    let second = manager.add_student("Musterfrau", "Erika", group.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    let result = manager.record_for_date(
        day(4),
        &[
            entry(first.id, present, None, None),
            entry(second.id, present, Some("8:15"), None),
        ],
    );

    assert!(matches!(result, Err(Error::InvalidArrivalTime(_))));
    assert!(manager.records_for_student(first.id).unwrap().is_empty());
    assert!(manager.records_for_student(second.id).unwrap().is_empty());
}

#[test]
fn returns_the_group_of_the_last_entry() {
    let mut manager = empty_manager();
    let group_a = manager.find_or_create_group("10a").unwrap();
    let group_b = manager.find_or_create_group("10b").unwrap();
    let student_a = manager.add_student("Mustermann", "Max", group_a.id).unwrap();
    let student_b = manager.add_student("Musterfrau", "Erika", group_b.id).unwrap();
    let present = status_id(&mut manager, "Anwesend");

    let result = manager
        .record_for_date(
            day(4),
            &[
                entry(student_a.id, present, None, None),
                entry(student_b.id, present, None, None),
            ],
        )
        .unwrap();
    assert_eq!(result, Some(group_b.id));
}

#[test]
fn empty_batch_records_nothing() {
    let mut manager = empty_manager();

    let result = manager.record_for_date(day(4), &[]).unwrap();
    assert_eq!(result, None);
}
