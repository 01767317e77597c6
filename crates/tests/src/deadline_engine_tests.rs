//! Case-type deadline computation tests
//! Runs the engine over the shipped catalog and California court holidays.

use deadline_engine::compliance::date_math::{business_days_between, is_weekend};
use deadline_engine::compliance::{compute_deadlines, parse_base_date, uncovered_years};
use deadline_engine::RuleCatalog;
use pretty_assertions::assert_eq;
use shared_types::{CaseType, DayUnit, DeadlineError, DeadlineRule, HolidayCalendar};

use crate::common::*;

fn motion_only() -> RuleCatalog {
    RuleCatalog::from_rules(vec![(
        CaseType::Motion,
        DeadlineRule::new("File Motion", -16, DayUnit::Business, "Serve and file moving papers"),
    )])
    .unwrap()
}

#[test]
fn file_motion_sixteen_court_days_before_hearing() {
    // Fri Sep 5 2025 hearing, Labor Day Mon Sep 1 skipped
    let engine = engine_with(motion_only(), labor_day_calendar());
    let deadlines = engine.compute_deadlines("motion", "2025-09-05").unwrap();
    assert_eq!(deadlines.len(), 1);
    assert_eq!(deadlines[0].rule_name, "File Motion");
    assert_eq!(deadlines[0].result_date, date(2025, 8, 13));
    assert_eq!(deadlines[0].offset_days, -16);
    assert_eq!(deadlines[0].unit, DayUnit::Business);
    assert!(!deadlines[0].was_adjusted());
}

#[test]
fn day_zero_petition_on_saturday_moves_to_monday() {
    let catalog = RuleCatalog::from_rules(vec![(
        CaseType::Probate,
        DeadlineRule::new("File Petition", 0, DayUnit::Calendar, ""),
    )])
    .unwrap();
    let engine = engine_with(catalog, HolidayCalendar::empty("test"));
    let deadlines = engine.compute_deadlines("probate", "2025-11-29").unwrap();
    assert_eq!(deadlines[0].result_date, date(2025, 12, 1));
    assert_eq!(deadlines[0].raw_date, date(2025, 11, 29));
    assert!(deadlines[0].was_adjusted());
}

#[test]
fn shipped_motion_rules_for_labor_day_week_hearing() {
    let deadlines = shipped_engine().compute_deadlines("motion", "2025-09-05").unwrap();
    assert_eq!(
        summary(&deadlines),
        vec![
            (date(2025, 8, 13), "File Motion"),
            (date(2025, 8, 22), "Opposition Due"),
            (date(2025, 8, 28), "Reply Due"),
            (date(2025, 9, 5), "Hearing"),
        ]
    );
}

#[test]
fn shipped_probate_rules_from_thanksgiving_saturday() {
    let deadlines = shipped_engine().compute_deadlines("probate", "2025-11-29").unwrap();
    assert_eq!(
        summary(&deadlines),
        vec![
            (date(2025, 12, 1), "File Petition"),
            (date(2025, 12, 5), "Publish Notice of Petition"),
            (date(2025, 12, 15), "Mail Notice of Hearing"),
            (date(2026, 3, 30), "Inventory and Appraisal Due"),
            (date(2026, 3, 30), "Creditor Claim Period Ends"),
            (date(2026, 11, 30), "Status Report Due"),
        ]
    );
}

#[test]
fn ties_keep_catalog_order() {
    // Both -15 calendar days from Mon Dec 1 land on Sun Nov 16 -> Mon Nov 17
    let deadlines = shipped_engine()
        .compute_deadlines("conservatorship", "2025-12-01")
        .unwrap();
    assert_eq!(
        summary(&deadlines),
        vec![
            (date(2025, 11, 13), "Court Investigator Interview"),
            (date(2025, 11, 17), "Serve Citation on Proposed Conservatee"),
            (date(2025, 11, 17), "Mail Notice to Relatives"),
            (date(2025, 11, 20), "File Proof of Service"),
            (date(2025, 12, 1), "Hearing"),
            (date(2026, 3, 2), "Inventory and Appraisal Due"),
        ]
    );
}

#[test]
fn ties_follow_catalog_order_not_name_order() {
    let catalog = RuleCatalog::from_rules(vec![
        (CaseType::Motion, DeadlineRule::new("Zeta", 3, DayUnit::Calendar, "")),
        (CaseType::Motion, DeadlineRule::new("Alpha", 3, DayUnit::Calendar, "")),
        (CaseType::Motion, DeadlineRule::new("Early", 1, DayUnit::Calendar, "")),
    ])
    .unwrap();
    let engine = engine_with(catalog, HolidayCalendar::empty("test"));
    // Mon Oct 6 2025
    let deadlines = engine.compute_deadlines("motion", "2025-10-06").unwrap();
    assert_eq!(
        summary(&deadlines),
        vec![
            (date(2025, 10, 7), "Early"),
            (date(2025, 10, 9), "Zeta"),
            (date(2025, 10, 9), "Alpha"),
        ]
    );
}

#[test]
fn weekend_and_adjacent_holiday_collapse_without_dropping_rules() {
    // Sat and Sun both land on Mon -> Labor Day -> Tue Sep 2; all three kept
    let catalog = RuleCatalog::from_rules(vec![
        (CaseType::Motion, DeadlineRule::new("Saturday", 1, DayUnit::Calendar, "")),
        (CaseType::Motion, DeadlineRule::new("Sunday", 2, DayUnit::Calendar, "")),
        (CaseType::Motion, DeadlineRule::new("Monday", 3, DayUnit::Calendar, "")),
    ])
    .unwrap();
    let engine = engine_with(catalog, labor_day_calendar());
    let deadlines = engine.compute_deadlines("motion", "2025-08-29").unwrap();
    assert_eq!(deadlines.len(), 3);
    assert!(deadlines.iter().all(|d| d.result_date == date(2025, 9, 2)));
    assert_eq!(
        deadlines.iter().map(|d| d.rule_name.as_str()).collect::<Vec<_>>(),
        vec!["Saturday", "Sunday", "Monday"]
    );
}

#[test]
fn backward_calendar_offset_landing_moves_forward() {
    // From Mon Oct 6: -3 calendar hits Fri Oct 3, -1 hits Sun Oct 5 -> Mon Oct 6
    let catalog = RuleCatalog::from_rules(vec![
        (CaseType::Motion, DeadlineRule::new("Three Before", -3, DayUnit::Calendar, "")),
        (CaseType::Motion, DeadlineRule::new("One Before", -1, DayUnit::Calendar, "")),
    ])
    .unwrap();
    let engine = engine_with(catalog, HolidayCalendar::empty("test"));
    let deadlines = engine.compute_deadlines("motion", "2025-10-06").unwrap();
    assert_eq!(
        summary(&deadlines),
        vec![(date(2025, 10, 3), "Three Before"), (date(2025, 10, 6), "One Before")]
    );
}

#[test]
fn year_boundary_uses_next_years_holidays() {
    // Reply Due -5 court days from Mon Jan 5 2026 skips Jan 1 and Dec 25
    let deadlines = shipped_engine().compute_deadlines("motion", "2026-01-05").unwrap();
    assert_eq!(
        summary(&deadlines),
        vec![
            (date(2025, 12, 10), "File Motion"),
            (date(2025, 12, 19), "Opposition Due"),
            (date(2025, 12, 26), "Reply Due"),
            (date(2026, 1, 5), "Hearing"),
        ]
    );
}

#[test]
fn result_dates_are_business_days_for_every_base_date() {
    let engine = shipped_engine();
    let calendar = engine.calendar().clone();
    let mut base = date(2025, 1, 1);
    while base <= date(2025, 12, 31) {
        for case_type in CaseType::ALL {
            let deadlines = engine.compute(case_type, base).unwrap();
            assert_business_days(&deadlines, &calendar);
            let rule_count = engine.catalog().rules_for(case_type).unwrap().len();
            assert_eq!(deadlines.len(), rule_count);
            assert!(deadlines.windows(2).all(|w| w[0].result_date <= w[1].result_date));
        }
        base = base.succ_opt().unwrap();
    }
}

#[test]
fn zero_offset_on_business_day_is_identity() {
    let engine = shipped_engine();
    // Tue Sep 2 2025
    let deadlines = engine.compute_deadlines("probate", "2025-09-02").unwrap();
    let petition = deadlines.iter().find(|d| d.rule_name == "File Petition").unwrap();
    assert_eq!(petition.result_date, date(2025, 9, 2));
    assert!(!petition.was_adjusted());
}

#[test]
fn forward_business_offset_counts_exact_business_days() {
    let engine = shipped_engine();
    let calendar = engine.calendar().clone();
    let mut base = date(2025, 11, 20);
    while base <= date(2025, 12, 31) {
        let deadlines = engine.compute(CaseType::Probate, base).unwrap();
        let notice = deadlines
            .iter()
            .find(|d| d.rule_name == "Publish Notice of Petition")
            .unwrap();
        assert_eq!(business_days_between(base, notice.result_date, &calendar), 5);
        base = base.succ_opt().unwrap();
    }
}

#[test]
fn backward_business_offsets_are_strictly_earlier() {
    let engine = shipped_engine();
    let mut base = date(2025, 8, 25);
    while base <= date(2025, 9, 30) {
        for d in engine.compute(CaseType::Motion, base).unwrap() {
            if d.unit == DayUnit::Business && d.offset_days < 0 {
                assert!(d.result_date < base, "{} from {}", d.rule_name, base);
                assert!(!is_weekend(d.result_date));
            }
        }
        base = base.succ_opt().unwrap();
    }
}

#[test]
fn repeated_calls_are_identical() {
    let engine = shipped_engine();
    let first = engine.compute_deadlines("trust_litigation", "2025-10-15").unwrap();
    for _ in 0..5 {
        assert_eq!(engine.compute_deadlines("trust_litigation", "2025-10-15").unwrap(), first);
    }
}

#[test]
fn concurrent_callers_share_one_engine() {
    let engine = shipped_engine();
    let expected = engine.compute_deadlines("motion", "2025-09-05").unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.compute_deadlines("motion", "2025-09-05").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn unknown_case_type_identifier_is_error() {
    let err = shipped_engine()
        .compute_deadlines("bankruptcy", "2025-09-05")
        .unwrap_err();
    assert_eq!(err, DeadlineError::unknown_case_type("bankruptcy"));
}

#[test]
fn case_type_missing_from_catalog_is_error() {
    let engine = engine_with(motion_only(), labor_day_calendar());
    let err = engine.compute_deadlines("probate", "2025-09-05").unwrap_err();
    assert!(matches!(
        err,
        DeadlineError::UnknownCaseType { ref case_type } if case_type == "probate"
    ));
    assert!(engine.compute(CaseType::Probate, date(2025, 9, 5)).is_err());
}

#[test]
fn unknown_case_type_reported_before_bad_date() {
    let err = shipped_engine().compute_deadlines("bankruptcy", "not a date").unwrap_err();
    assert!(matches!(err, DeadlineError::UnknownCaseType { .. }));
}

#[test]
fn invalid_base_date_is_error() {
    for input in ["", "   ", "2025-13-01", "2025-02-30", "yesterday", "09/31/2025"] {
        let err = shipped_engine().compute_deadlines("motion", input).unwrap_err();
        assert!(
            matches!(err, DeadlineError::InvalidBaseDate { .. }),
            "{input:?} gave {err:?}"
        );
    }
}

#[test]
fn base_date_formats_normalize_to_the_same_day() {
    let expected = date(2025, 9, 5);
    for input in [
        "2025-09-05",
        " 2025-09-05 ",
        "09/05/2025",
        "2025-09-05T16:30:00",
        "2025-09-05 08:00:00.250",
        "2025-09-05T23:30:00-07:00",
        "2025-09-05T00:00:00Z",
    ] {
        assert_eq!(parse_base_date(input).unwrap(), expected, "{input}");
    }
}

#[test]
fn case_type_identifier_is_loose() {
    let engine = shipped_engine();
    let a = engine.compute_deadlines("trust-litigation", "2025-10-15").unwrap();
    let b = engine.compute_deadlines("Trust Litigation", "2025-10-15").unwrap();
    assert_eq!(a, b);
    assert_eq!(a[0].case_type, CaseType::TrustLitigation);
}

#[test]
fn out_of_range_arithmetic_is_invalid_base_date() {
    let catalog = RuleCatalog::from_rules(vec![(
        CaseType::Motion,
        DeadlineRule::new("Next Day", 1, DayUnit::Calendar, ""),
    )])
    .unwrap();
    let calendar = HolidayCalendar::empty("test");
    let err = compute_deadlines(CaseType::Motion, chrono::NaiveDate::MAX, &catalog, &calendar)
        .unwrap_err();
    assert!(matches!(err, DeadlineError::InvalidBaseDate { .. }));
}

#[test]
fn deadline_carries_rule_fields() {
    let deadlines = shipped_engine().compute_deadlines("motion", "2025-09-05").unwrap();
    let opposition = &deadlines[1];
    assert_eq!(opposition.description, "Serve and file opposition papers");
    assert_eq!(opposition.offset_days, -9);
    assert_eq!(opposition.unit, DayUnit::Business);
    assert_eq!(opposition.case_type, CaseType::Motion);
    assert_eq!(opposition.base_date, date(2025, 9, 5));
}

#[test]
fn uncovered_years_empty_inside_loaded_calendar() {
    let engine = shipped_engine();
    let deadlines = engine.compute(CaseType::Probate, date(2025, 11, 29)).unwrap();
    assert_eq!(uncovered_years(&deadlines, engine.calendar()), Vec::<i32>::new());
}

#[test]
fn uncovered_years_reports_years_without_holiday_data() {
    let engine = shipped_engine();
    // The 120- and 365-day deadlines land in 2027, past the shipped calendars
    let deadlines = engine.compute(CaseType::Probate, date(2026, 12, 1)).unwrap();
    assert_eq!(uncovered_years(&deadlines, engine.calendar()), vec![2027]);

    // New Year's Day 2027 is not a holiday without 2027 data
    let deadlines = engine.compute(CaseType::Probate, date(2027, 1, 1)).unwrap();
    assert_eq!(deadlines[0].result_date, date(2027, 1, 1));
    assert_eq!(uncovered_years(&deadlines, engine.calendar()), vec![2027, 2028]);
}
