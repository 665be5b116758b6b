//! Integration tests for the hosted intake flow.
//!
//! These drive the public API the way a host would: pointer input goes through
//! the shared [`Document`], time is passed in explicitly, and results are
//! observed through signals.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use parking_lot::Mutex;

use gift_intake::interests::{self, ResolutionRule};
use gift_intake::profile::{
    AgeInput, ClothingSize, FavouriteDrink, Gender, Occasion, ProfileDraft, Relationship,
    Sentiment,
};
use gift_intake::widget::widgets::{SessionState, StepInput, WizardSeed, WizardStep};
use gift_intake::widget::{Document, PointerEvent, PointerPhase, ViewportMetrics};
use gift_intake::{IntakeConfig, RangeSlider, Rect, WizardSheet};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// 390x800 viewport. The default wizard sheet is round(800 * 0.9 + 12) = 732
/// tall, so its top edge (and drag handle) starts at y=68.
fn hosted() -> WizardSheet {
    let document = Arc::new(Document::with_viewport(ViewportMetrics::new(390.0, 800.0)));
    WizardSheet::from_config(document, &IntakeConfig::default())
        .unwrap()
        .with_today(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
}

fn record<T: Clone + Send + 'static>(signal: &gift_intake::Signal<T>) -> Arc<Mutex<Vec<T>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    signal.connect(move |value: &T| seen_clone.lock().push(value.clone()));
    seen
}

fn touch(phase: PointerPhase, x: f32, y: f32, at: Instant) -> PointerEvent {
    PointerEvent::touch(1, phase, (x, y), at)
}

#[test]
fn test_full_session_completes_once_with_committed_fields() {
    init_tracing();
    let mut host = hosted();
    let completed = record(&host.wizard().completed);
    let close_requested = record(&host.wizard().close_requested);

    assert!(host.open(WizardSeed::default()));
    assert!(host.advance(StepInput::RelationshipOccasion {
        relationship: Some(Relationship::Father),
        name: "  Dad ".into(),
        occasion: Some(Occasion::Birthday),
    }));
    assert!(host.advance(StepInput::AboutThem {
        age: Some(AgeInput::years(40)),
        gender: Some(Gender::Male),
    }));
    assert!(host.advance(StepInput::StyleTaste {
        clothing_size: Some(ClothingSize::M),
        favourite_drink: Some(FavouriteDrink::Beer),
    }));

    let options = host.wizard().interest_options().unwrap();
    assert_eq!(options.rule, ResolutionRule::Father);
    assert!(options.contains("golf"));

    assert!(host.advance(StepInput::Interests {
        interests: vec!["golf".into()],
    }));
    assert!(host.advance(StepInput::Vibe {
        sentiment: Some(Sentiment::Practical),
    }));
    assert_eq!(host.current_step(), WizardStep::Budget);
    assert_eq!(host.budget_input(), StepInput::Budget { min: 20, max: 100 });

    let now = Instant::now();
    assert!(host.finish(now));
    assert!(!host.finish(now));

    let completed = completed.lock();
    assert_eq!(completed.len(), 1);
    assert_eq!(close_requested.lock().len(), 1);

    let profile: &ProfileDraft = &completed[0];
    assert_eq!(profile.relationship, Some(Relationship::Father));
    assert_eq!(profile.name, "Dad");
    assert_eq!(profile.occasion, Some(Occasion::Birthday));
    assert_eq!(profile.age_years(host.wizard().today()), Some(40));
    assert_eq!(profile.gender, Some(Gender::Male));
    assert_eq!(profile.clothing_size, Some(ClothingSize::M));
    assert_eq!(profile.favourite_drink, Some(FavouriteDrink::Beer));
    assert_eq!(profile.interests, vec!["golf".to_string()]);
    assert_eq!(profile.sentiment, Some(Sentiment::Practical));
    assert_eq!((profile.min_budget, profile.max_budget), (20, 100));

    let json = profile.to_json().unwrap();
    assert_eq!(json["relationship"], "father");
    assert_eq!(json["favourite_drink"], "beer");

    assert!(host.sheet().is_closing());
    assert!(host.tick(now + Duration::from_millis(300)));
    assert_eq!(host.wizard().session_state(), SessionState::Completed);
    assert!(!host.document().is_scroll_locked());
}

#[test]
fn test_drag_at_threshold_snaps_back() {
    init_tracing();
    let mut host = hosted();
    host.open(WizardSeed::default());
    let document = Arc::clone(host.document());
    let now = Instant::now();

    host.press_at(&touch(PointerPhase::Down, 195.0, 80.0, now));
    assert!(host.sheet().is_dragging());
    document.dispatch(touch(PointerPhase::Move, 195.0, 180.0, now));
    assert_eq!(host.sheet().drag_offset(), 100.0);
    document.dispatch(touch(PointerPhase::Up, 195.0, 180.0, now));

    assert!(host.is_open());
    assert!(!host.sheet().is_closing());
    assert_eq!(host.sheet().drag_offset(), 0.0);
    assert_eq!(document.listener_count(), 0);
    assert!(!host.tick(now + Duration::from_secs(1)));
    assert!(host.wizard().is_active());
}

#[test]
fn test_drag_past_threshold_dismisses_and_cancels() {
    init_tracing();
    let mut host = hosted();
    let cancelled = record(&host.wizard().cancelled);
    let completed = record(&host.wizard().completed);
    host.open(WizardSeed::default());
    let document = Arc::clone(host.document());
    let now = Instant::now();

    host.press_at(&touch(PointerPhase::Down, 195.0, 80.0, now));
    document.dispatch(touch(PointerPhase::Move, 195.0, 181.0, now));
    document.dispatch(touch(PointerPhase::Up, 195.0, 181.0, now));
    assert!(host.sheet().is_closing());
    assert_eq!(document.listener_count(), 0);

    assert!(!host.tick(now + Duration::from_millis(150)));
    assert!(host.tick(now + Duration::from_millis(300)));
    assert!(!host.is_open());
    assert!(!document.is_scroll_locked());
    assert_eq!(cancelled.lock().len(), 1);
    assert!(completed.lock().is_empty());
    assert_eq!(host.wizard().session_state(), SessionState::Cancelled);
}

#[test]
fn test_upward_drag_clamps_to_zero() {
    let mut host = hosted();
    host.open(WizardSeed::default());
    let document = Arc::clone(host.document());
    let now = Instant::now();

    host.press_at(&touch(PointerPhase::Down, 195.0, 80.0, now));
    document.dispatch(touch(PointerPhase::Move, 195.0, 20.0, now));
    assert_eq!(host.sheet().drag_offset(), 0.0);
    assert_eq!(host.sheet().sheet_rect().unwrap().top(), 68.0);
    document.dispatch(touch(PointerPhase::Cancel, 195.0, 20.0, now));
    assert!(!host.sheet().is_dragging());
}

#[test]
fn test_budget_slider_drag_through_document() {
    init_tracing();
    let document = Arc::new(Document::new());
    let slider = RangeSlider::new(Arc::clone(&document), 10, 500)
        .unwrap()
        .with_values(20, 100)
        .with_track(Rect::new(0.0, 0.0, 490.0, 20.0));
    let changes = record(&slider.range_changed);
    let now = Instant::now();

    // value = 10 + x on this track; the min handle sits at x=10.
    slider.press_at(&PointerEvent::mouse(PointerPhase::Down, (10.0, 10.0), now));
    assert!(slider.is_dragging());

    // Touch moves from another pointer are not ours.
    document.dispatch(touch(PointerPhase::Move, 300.0, 10.0, now));
    assert_eq!(slider.values(), (20, 100));

    document.dispatch(PointerEvent::mouse(PointerPhase::Move, (60.0, 10.0), now));
    assert_eq!(slider.values(), (70, 100));

    // The min handle stops one unit below max.
    document.dispatch(PointerEvent::mouse(PointerPhase::Move, (400.0, 10.0), now));
    assert_eq!(slider.values(), (99, 100));

    document.dispatch(PointerEvent::mouse(PointerPhase::Up, (400.0, 10.0), now));
    assert!(!slider.is_dragging());
    assert_eq!(document.listener_count(), 0);

    document.dispatch(PointerEvent::mouse(PointerPhase::Move, (30.0, 10.0), now));
    assert_eq!(slider.values(), (99, 100));
    assert_eq!(*changes.lock(), vec![(70, 100), (99, 100)]);
}

#[test]
fn test_dropped_widgets_leave_no_listeners() {
    let document = Arc::new(Document::with_viewport(ViewportMetrics::new(390.0, 800.0)));
    let now = Instant::now();
    {
        let mut host = WizardSheet::from_config(Arc::clone(&document), &IntakeConfig::default())
            .unwrap();
        host.open(WizardSeed::default());
        host.press_at(&touch(PointerPhase::Down, 195.0, 80.0, now));
        // A drag holds one move and one release listener.
        assert_eq!(document.listener_count(), 2);
        assert!(document.is_scroll_locked());
    }
    assert_eq!(document.listener_count(), 0);
    assert!(!document.is_scroll_locked());

    // Events after the drop reach nothing.
    document.dispatch(touch(PointerPhase::Move, 195.0, 400.0, now));
    document.dispatch(touch(PointerPhase::Up, 195.0, 400.0, now));
}

#[test]
fn test_reopen_after_cancel_starts_clean_session() {
    let mut host = hosted();
    host.open(WizardSeed::default().with_relationship(Relationship::Mother));
    host.advance(StepInput::RelationshipOccasion {
        relationship: Some(Relationship::Mother),
        name: "Mum".into(),
        occasion: Some(Occasion::MothersDay),
    });
    let now = Instant::now();
    host.dismiss(now);
    host.tick(now + Duration::from_millis(300));

    assert!(host.open(WizardSeed::default()));
    assert_eq!(host.current_step(), WizardStep::RelationshipOccasion);
    assert_eq!(host.wizard().draft().name, "");
    assert_eq!(host.wizard().draft().relationship, None);
}

#[test]
fn test_resolver_always_offers_options_without_duplicates() {
    let ages = [None, Some(0), Some(5), Some(12), Some(13), Some(40), Some(90)];
    let genders = [None, Some(Gender::Male), Some(Gender::Female), Some(Gender::NonBinary)];

    for relationship in Relationship::ALL {
        for age in ages {
            for gender in genders {
                let resolved = interests::resolve(relationship, age, gender);
                let case = format!("{relationship:?}/{age:?}/{gender:?}");
                assert!(!resolved.primary.is_empty(), "{case} has no options");

                match &resolved.other {
                    None => {
                        let unique: HashSet<_> =
                            resolved.primary.iter().map(|option| option.value).collect();
                        assert_eq!(unique.len(), resolved.primary.len(), "{case}");
                    }
                    Some(other) => {
                        assert_eq!(resolved.rule, ResolutionRule::Mixed, "{case}");
                        assert!(!other.is_empty(), "{case}");
                    }
                }
            }
        }
    }
}
