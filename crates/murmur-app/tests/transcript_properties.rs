//! Property-based tests for the transcript projection.
//!
//! Verify that the append-order invariant holds under arbitrary event
//! sequences: the rendered transcript is exactly the inbound sequence, in
//! order, with no reordering, deduplication, or loss - regardless of how
//! the user scrolls in between.

use murmur_app::{App, AppEvent};
use murmur_proto::{ChatEvent, MessageKind};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = MessageKind> {
    prop_oneof![
        3 => Just(MessageKind::Chat),
        1 => Just(MessageKind::Welcome),
        1 => Just(MessageKind::Leave),
    ]
}

fn event_strategy() -> impl Strategy<Value = ChatEvent> {
    (kind_strategy(), "[a-zA-Z0-9 ]{0,40}", 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(kind, message, h, m, s)| ChatEvent {
            message_type: kind,
            message,
            created: format!("2024-01-02T{h:02}:{m:02}:{s:02}Z"),
        },
    )
}

/// Interleaved user/system activity that must never affect the transcript.
#[derive(Debug, Clone)]
enum Noise {
    ScrollUp,
    ScrollDown,
    Tick,
    Resize(u16, u16),
}

fn noise_strategy() -> impl Strategy<Value = Noise> {
    prop_oneof![
        Just(Noise::ScrollUp),
        Just(Noise::ScrollDown),
        Just(Noise::Tick),
        (10u16..200, 5u16..60).prop_map(|(c, r)| Noise::Resize(c, r)),
    ]
}

proptest! {
    #[test]
    fn prop_transcript_preserves_arrival_order(
        events in prop::collection::vec(event_strategy(), 0..60),
    ) {
        let mut app = App::new();

        for event in &events {
            let _ = app.handle(AppEvent::EventReceived(event.clone()));
        }

        prop_assert_eq!(app.transcript().len(), events.len());
        for (entry, event) in app.transcript().iter().zip(&events) {
            prop_assert_eq!(&entry.text, &event.message);
            prop_assert_eq!(entry.time_label.as_str(), event.time_label());
        }
    }

    #[test]
    fn prop_scrolling_never_mutates_the_transcript(
        steps in prop::collection::vec((event_strategy(), noise_strategy()), 0..40),
    ) {
        let mut app = App::new();

        for (event, noise) in &steps {
            let _ = app.handle(AppEvent::EventReceived(event.clone()));
            match noise {
                Noise::ScrollUp => { let _ = app.scroll_up(); },
                Noise::ScrollDown => { let _ = app.scroll_down(); },
                Noise::Tick => { let _ = app.handle(AppEvent::Tick); },
                Noise::Resize(c, r) => { let _ = app.handle(AppEvent::Resize(*c, *r)); },
            }
        }

        prop_assert_eq!(app.transcript().len(), steps.len());
        for (entry, (event, _)) in app.transcript().iter().zip(&steps) {
            prop_assert_eq!(&entry.text, &event.message);
        }

        // The scroll position can never point past the transcript.
        prop_assert!(app.scroll_offset() <= app.transcript().len().saturating_sub(1));
    }
}
