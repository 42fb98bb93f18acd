use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tablet_core::fixtures;
use tablet_core::{
    apply, apply_all, AppState, Charge, ChargeClass, Event, SequenceStamper, NOTES_MAX_CHARS,
    TIMELINE_CAPACITY,
};

fn arb_charge() -> impl Strategy<Value = Charge> {
    ("[A-C]-[0-9]{2}", 0i64..10_000, 0u32..120, proptest::option::of(0u32..6)).prop_map(
        |(code, fine, time, points)| Charge {
            title: format!("charge {}", code),
            code,
            class: ChargeClass::Crime,
            fine: Decimal::from(fine),
            time,
            points,
            description: String::new(),
        },
    )
}

fn arb_logging_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-z ]{1,16}".prop_map(|name| Event::LookupQuery { name }),
        prop::sample::select(vec!["EXP-2093", "EXP-2089", "EXP-2077", "EXP-0001"])
            .prop_map(|id| Event::ToggleCaseStatus { case_id: id.to_string() }),
        prop::sample::select(fixtures::citizens())
            .prop_map(|citizen| Event::SelectCitizen { citizen }),
    ]
}

fn empty_timeline_state() -> AppState {
    let mut state = fixtures::initial_state();
    if let AppState::Extended(s) = &mut state {
        s.timeline = Default::default();
    }
    state
}

proptest! {
    #[test]
    fn charge_codes_stay_unique(charges in prop::collection::vec(arb_charge(), 0..40)) {
        let events: Vec<Event> = charges.iter().cloned().map(|charge| Event::AddCharge { charge }).collect();
        let mut ids = SequenceStamper::default();
        let state = apply_all(&empty_timeline_state(), &events, &mut ids);

        let report = state.report().unwrap();
        let codes: HashSet<&str> = report.charges.iter().map(|c| c.code.as_str()).collect();
        let distinct: HashSet<&str> = charges.iter().map(|c| c.code.as_str()).collect();
        prop_assert_eq!(codes.len(), report.charges.len());
        prop_assert_eq!(report.charges.len(), distinct.len());
        // One timeline entry per newly added code, capped.
        prop_assert_eq!(state.timeline().len(), distinct.len().min(TIMELINE_CAPACITY));
    }

    #[test]
    fn timeline_is_bounded_and_newest_first(events in prop::collection::vec(arb_logging_event(), 0..30)) {
        let mut ids = SequenceStamper::default();
        let state = apply_all(&empty_timeline_state(), &events, &mut ids);

        prop_assert_eq!(state.timeline().len(), events.len().min(TIMELINE_CAPACITY));
        let seq: Vec<u64> = state
            .timeline()
            .iter()
            .map(|e| e.id.trim_start_matches("evt-").parse().unwrap())
            .collect();
        prop_assert!(seq.windows(2).all(|w| w[0] > w[1]));
        if let Some(first) = seq.first() {
            prop_assert_eq!(*first, events.len() as u64);
        }
    }

    #[test]
    fn notes_are_a_bounded_prefix(text in ".{0,700}") {
        let mut ids = SequenceStamper::default();
        let state = apply(&empty_timeline_state(), &Event::UpdateNotes { text: text.clone() }, &mut ids);
        let notes = &state.report().unwrap().notes;

        prop_assert!(notes.chars().count() <= NOTES_MAX_CHARS);
        prop_assert!(text.starts_with(notes.as_str()));
        if text.chars().count() > NOTES_MAX_CHARS {
            prop_assert_eq!(notes.chars().count(), NOTES_MAX_CHARS);
        } else {
            prop_assert_eq!(notes, &text);
        }
    }

    #[test]
    fn finalize_without_citizen_is_identity(charges in prop::collection::vec(arb_charge(), 0..5)) {
        let events: Vec<Event> = charges.into_iter().map(|charge| Event::AddCharge { charge }).collect();
        let mut ids = SequenceStamper::default();
        let state = apply_all(&empty_timeline_state(), &events, &mut ids);

        prop_assert_eq!(apply(&state, &Event::FinalizeReport, &mut ids), state);
    }

    #[test]
    fn finalize_clears_charges_keeps_citizen(charges in prop::collection::vec(arb_charge(), 1..8)) {
        let citizen = fixtures::citizens().remove(1);
        let mut events = vec![Event::SelectCitizen { citizen: citizen.clone() }];
        events.extend(charges.into_iter().map(|charge| Event::AddCharge { charge }));
        events.push(Event::UpdateNotes { text: "narrative".into() });

        let mut ids = SequenceStamper::default();
        let before = apply_all(&empty_timeline_state(), &events, &mut ids);
        let expected = before.report().unwrap().totals();
        let count = before.report().unwrap().charges.len();
        let after = apply(&before, &Event::FinalizeReport, &mut ids);

        let report = after.report().unwrap();
        prop_assert!(report.charges.is_empty());
        prop_assert!(report.notes.is_empty());
        prop_assert_eq!(report.citizen.as_ref(), Some(&citizen));
        let expected_description = format!(
            "{} · {} charges · {} min · ${}",
            citizen.name, count, expected.time, expected.fine
        );
        prop_assert_eq!(&after.timeline().latest().unwrap().description, &expected_description);
    }
}

#[test]
fn finalize_scenario_from_catalog() {
    let catalog = fixtures::penal_code();
    let p101 = tablet_core::find_charge(&catalog, "P-101").unwrap().clone();
    let citizen = fixtures::citizens().remove(0);

    let mut ids = SequenceStamper::default();
    let state = apply_all(
        &fixtures::initial_state(),
        &[
            Event::SelectCitizen { citizen },
            Event::AddCharge { charge: p101 },
            Event::FinalizeReport,
        ],
        &mut ids,
    );

    let latest = state.timeline().latest().unwrap();
    assert!(latest.description.ends_with("1 charges · 40 min · $6000"));
    assert!(state.report().unwrap().charges.is_empty());
}

#[test]
fn basic_and_extended_share_case_semantics() {
    let toggle = Event::ToggleCaseStatus {
        case_id: "EXP-2089".to_string(),
    };
    let basic = apply(&fixtures::initial_basic_state(), &toggle, &mut SequenceStamper::default());
    let extended = apply(&fixtures::initial_state(), &toggle, &mut SequenceStamper::default());

    assert_eq!(basic.cases(), extended.cases());
    assert_eq!(basic.timeline(), extended.timeline());
}
