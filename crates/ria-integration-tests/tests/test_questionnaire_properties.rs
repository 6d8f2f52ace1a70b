//! # Questionnaire Properties
//!
//! Property tests over every registered questionnaire. Random event
//! sequences are drawn from each questionnaire's own questions, choices,
//! domains and details (plus a few values that do not exist), then
//! replayed through [`reduce`] and [`Session`].
//!
//! Properties checked after every event:
//! - A result exists exactly when the questionnaire reports completion
//! - Sentinels stay exclusive in every stored selection
//! - Expanded questions are always unlocked
//! - Derivation is deterministic down to the serialized bytes
//! - Repeating an answer changes nothing

use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::Index;
use ria_core::ExclusiveSet;
use ria_engine::{
    reduce, Answer, AnswerState, DomainMode, Event, EventOutcome, Questionnaire, QuestionKind,
    Session,
};
use ria_questionnaires::QuestionnaireKind;

/// Every event a user could plausibly send to `q`, plus a few invalid ones.
fn event_universe(q: &Questionnaire) -> Vec<Event> {
    let mut events = vec![Event::Reset];
    for question in q.graph().questions() {
        events.push(Event::ToggleExpanded {
            question: question.id.clone(),
        });
        match &question.kind {
            QuestionKind::Single { choices } => {
                for choice in choices {
                    events.push(Event::Answer {
                        question: question.id.clone(),
                        value: choice.value.clone(),
                    });
                }
                events.push(Event::Answer {
                    question: question.id.clone(),
                    value: "not_a_choice".into(),
                });
            }
            QuestionKind::Checklist {
                catalog, domains, ..
            } => {
                if let DomainMode::Selectable { none_domain, .. } = domains {
                    events.push(Event::ToggleDomain {
                        question: question.id.clone(),
                        domain: none_domain.clone(),
                    });
                }
                for domain in catalog.domains() {
                    if matches!(domains, DomainMode::Selectable { .. }) {
                        events.push(Event::ToggleDomain {
                            question: question.id.clone(),
                            domain: domain.id.clone(),
                        });
                    }
                    for detail in &domain.details {
                        events.push(Event::ToggleDetail {
                            domain: domain.id.clone(),
                            detail: detail.id.clone(),
                        });
                    }
                }
            }
        }
    }
    events.push(Event::Answer {
        question: "not_a_question".into(),
        value: "yes".into(),
    });
    events.push(Event::ToggleDetail {
        domain: "not_a_domain".into(),
        detail: "not_a_detail".into(),
    });
    events
}

fn kind_strategy() -> impl Strategy<Value = QuestionnaireKind> {
    prop::sample::select(QuestionnaireKind::all().to_vec())
}

/// A questionnaire kind and a random script for it.
fn script_strategy() -> impl Strategy<Value = (QuestionnaireKind, Vec<Event>)> {
    (kind_strategy(), prop::collection::vec(any::<Index>(), 0..40)).prop_map(|(kind, picks)| {
        let q = kind.build().unwrap();
        let universe = event_universe(&q);
        let events = picks.iter().map(|i| i.get(&universe).clone()).collect();
        (kind, events)
    })
}

fn exclusive<T: Ord + Clone>(set: &ExclusiveSet<T>) -> bool {
    !(set.contains(set.sentinel()) && set.len() > 1)
}

fn sentinels_exclusive(state: &AnswerState) -> bool {
    state.iter().all(|(_, answer)| match answer {
        Answer::Choice { .. } => true,
        Answer::Checklist(checklist) => {
            checklist.domains.as_ref().map_or(true, exclusive)
                && checklist.details.values().all(exclusive)
        }
    })
}

fn replay(q: &Questionnaire, events: &[Event]) -> AnswerState {
    events
        .iter()
        .fold(AnswerState::new(), |state, event| reduce(q, &state, event).0)
}

proptest! {
    /// `is_complete` and `derive_result` never disagree.
    #[test]
    fn completion_matches_result((kind, events) in script_strategy()) {
        let q = kind.build().unwrap();
        let mut state = AnswerState::new();
        for event in &events {
            state = reduce(&q, &state, event).0;
            prop_assert_eq!(q.is_complete(&state), q.derive_result(&state).is_some());
        }
    }

    /// No stored selection ever holds a sentinel next to another member.
    #[test]
    fn sentinels_stay_exclusive((kind, events) in script_strategy()) {
        let q = kind.build().unwrap();
        let mut state = AnswerState::new();
        for event in &events {
            state = reduce(&q, &state, event).0;
            prop_assert!(sentinels_exclusive(&state));
        }
    }

    /// Expansion is a subset of unlocking, whatever the overrides.
    #[test]
    fn expanded_questions_are_unlocked((kind, events) in script_strategy()) {
        let mut session = Session::new(Arc::new(kind.build().unwrap()));
        for event in &events {
            session.apply(event);
            let p = session.presentation();
            for id in p.expanded() {
                prop_assert!(p.is_unlocked(id));
            }
            let reachable: Vec<_> = session.reachable_questions().iter().map(|q| q.id.clone()).collect();
            let unlocked: Vec<_> = p.unlocked().into_iter().cloned().collect();
            prop_assert_eq!(reachable, unlocked);
        }
    }

    /// The same script always yields byte-identical results.
    #[test]
    fn derivation_is_deterministic((kind, events) in script_strategy()) {
        let first = kind.build().unwrap();
        let second = kind.build().unwrap();
        let a = replay(&first, &events);
        let b = replay(&second, &events);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            serde_json::to_vec(&first.derive_result(&a)).unwrap(),
            serde_json::to_vec(&second.derive_result(&b)).unwrap()
        );
        prop_assert_eq!(first.presentation(&a, &Default::default()), second.presentation(&b, &Default::default()));
    }

    /// Answering a question with the value it already holds is a no-op.
    #[test]
    fn repeated_answers_are_unchanged((kind, events) in script_strategy()) {
        let q = kind.build().unwrap();
        let state = replay(&q, &events);
        for (question, answer) in state.iter() {
            if let Answer::Choice { value } = answer {
                let event = Event::Answer { question: question.clone(), value: value.clone() };
                let (next, outcome) = reduce(&q, &state, &event);
                // Orphaned answers are not reachable and are ignored instead.
                prop_assert!(outcome == EventOutcome::Unchanged || outcome.is_ignored());
                prop_assert_eq!(&next, &state);
            }
        }
    }

    /// Events never mutate the state they are applied to.
    #[test]
    fn reduce_is_pure((kind, events) in script_strategy()) {
        let q = kind.build().unwrap();
        let state = replay(&q, &events);
        let copy = state.clone();
        for event in event_universe(&q) {
            let _ = reduce(&q, &state, &event);
        }
        prop_assert_eq!(state, copy);
    }

    /// A session and a bare fold over `reduce` agree on the answers.
    #[test]
    fn session_matches_reducer((kind, events) in script_strategy()) {
        let q = Arc::new(kind.build().unwrap());
        let mut session = Session::new(Arc::clone(&q));
        for event in &events {
            session.apply(event);
        }
        prop_assert_eq!(session.state(), &replay(&q, &events));
    }
}
