//! End-to-end behaviour of the tab control against the headless host.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use flip_tabs::core::headless::{HeadlessHost, HostCall};
use flip_tabs::core::offset::{DEFAULT_BASELINE, DEFAULT_EPSILON};
use flip_tabs::core::{
    ControlOptions, FeedbackEvent, FeedbackPolicy, NavigationOutcome, NavigationPolicy, TabError, TabFlipView,
    TabState,
};
use tokio::time::Instant;

type View = TabFlipView<String, HeadlessHost>;

fn labels(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Tab number {n}")).collect()
}

fn options(feedback: FeedbackPolicy, navigation: NavigationPolicy) -> ControlOptions {
    ControlOptions {
        feedback,
        navigation,
        // Corrected offset == raw offset, so tests speak in page units.
        offset_baseline: 0.0,
        offset_epsilon: 0.0,
        ..ControlOptions::default()
    }
}

fn measured(count: usize, options: ControlOptions) -> View {
    let view = TabFlipView::new(HeadlessHost::uniform(count, 10.0), labels(count), options);
    view.on_offset_changed();
    view
}

/// Collects every feedback event the view emits.
fn record(view: &View) -> Arc<Mutex<Vec<FeedbackEvent<u64>>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    view.on_tab_selection_changed(move |event| sink.lock().unwrap().push(event.clone()));
    events
}

fn new_indices(events: &Arc<Mutex<Vec<FeedbackEvent<u64>>>>) -> Vec<usize> {
    events.lock().unwrap().iter().map(|e| e.new_index).collect()
}

// ───────────────────────────────────────── scroll tracking ────

#[test]
fn swipe_resolves_once_past_the_half_way_point() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    let events = record(&view);

    view.on_offset_changing(0.0);
    view.on_offset_changing(0.4);
    assert!(events.lock().unwrap().is_empty());

    view.on_offset_changing(0.6);
    view.on_offset_changing(1.0);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].old_index, Some(0));
    assert_eq!(events[0].new_index, 1);
    assert_eq!(view.selected_index(), Some(1));
    assert_eq!(view.previously_selected_index(), Some(0));
}

#[test]
fn default_baseline_and_bias_are_applied_to_raw_offsets() {
    let mut opts = options(FeedbackPolicy::Notify, NavigationPolicy::default());
    opts.offset_baseline = DEFAULT_BASELINE;
    opts.offset_epsilon = DEFAULT_EPSILON;
    let view = measured(5, opts);
    let events = record(&view);

    // Host parks the last page slightly short of its exact offset.
    view.on_offset_changing(DEFAULT_BASELINE + 3.49);
    assert_eq!(view.selected_index(), Some(4));
    assert_eq!(new_indices(&events), vec![4]);
}

#[test]
fn jitter_on_the_same_page_is_silent() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    let events = record(&view);

    for offset in [0.51, 0.55, 0.9, 1.0, 1.2, 1.49, 0.5] {
        view.on_offset_changing(offset);
    }
    assert_eq!(new_indices(&events), vec![1]);
}

#[test]
fn overscroll_past_last_page_stays_on_last_tab() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    let events = record(&view);

    view.on_offset_changing(4.7);
    assert_eq!(view.selected_index(), Some(4));
    view.on_offset_changing(4.9);
    assert_eq!(new_indices(&events), vec![4]);
}

#[test]
fn huge_offsets_clamp_to_last_tab() {
    let view = measured(5, options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()));

    view.on_offset_changing(1e30);
    assert_eq!(view.selected_index(), Some(4));
    assert_eq!(view.with_host(|h| h.indicator_x()), 40.0);

    view.on_offset_changing(f64::MAX);
    assert_eq!(view.selected_index(), Some(4));
    assert_eq!(view.with_host(|h| h.tab_state(4)), Some(TabState::Active));
}

#[test]
fn offsets_before_measurement_are_ignored() {
    let view = TabFlipView::new(
        HeadlessHost::uniform(5, 10.0),
        labels(5),
        options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()),
    );
    let events = record(&view);

    view.on_offset_changing(2.7);
    view.on_offset_changing(f64::NAN);

    assert!(!view.is_initialized());
    assert_eq!(view.selected_index(), None);
    assert!(events.lock().unwrap().is_empty());
    assert!(view.with_host(|h| h.calls().is_empty()));
}

// ───────────────────────────────────────── direct paint ───────

#[test]
fn direct_paint_swaps_pair_and_slides_indicator() {
    let view = measured(5, options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()));
    view.with_host(|h| h.clear_calls());

    view.on_offset_changing(0.25);
    assert_eq!(view.with_host(|h| h.indicator_x()), 2.5);
    assert!(view.with_host(|h| h.paints().is_empty()));

    view.on_offset_changing(0.5);
    assert_eq!(view.with_host(|h| h.indicator_x()), 5.0);
    assert_eq!(
        view.with_host(|h| h.paints()),
        vec![(0, TabState::Inactive), (1, TabState::Active)]
    );
    assert_eq!(view.with_host(|h| h.tab_state(1)), Some(TabState::Active));
}

#[test]
fn missing_next_container_still_paints_the_rest() {
    let view = measured(5, options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()));
    // Tab 1's container gets recycled for tab 3, leaving tab 1 unrealized.
    let recycled = view.with_host(|h| h.recycle(1, 3)).unwrap();
    view.on_container_realized(3, recycled);
    assert_eq!(view.get_tab_item(1), None);
    view.with_host(|h| h.clear_calls());

    view.on_offset_changing(0.7);

    assert_eq!(view.selected_index(), Some(1));
    assert_eq!(view.with_host(|h| h.paints()), vec![(0, TabState::Inactive)]);
}

#[test]
fn unrealized_target_is_notified_without_a_container() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    let events = record(&view);
    view.with_host(|h| h.unrealize(1));

    view.on_offset_changing(0.7);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].old_index, Some(0));
    assert!(events[0].old_container.is_some());
    assert_eq!(events[0].new_index, 1);
    assert_eq!(events[0].new_container, None);
    assert_eq!(view.selected_index(), Some(1));
}

#[test]
fn color_change_repaints_under_direct_paint() {
    let view = measured(3, options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()));
    view.with_host(|h| h.clear_calls());

    let teal = flip_tabs::core::TabColor::rgb(0, 128, 128);
    view.set_selected_tab_color(teal);
    let calls = view.with_host(|h| h.calls().to_vec());
    assert!(calls
        .iter()
        .any(|c| matches!(c, HostCall::Paint(_, TabState::Active, color) if *color == teal)));
    assert_eq!(calls.len(), 3);
}

// ───────────────────────────────────────── initialization ─────

#[test]
fn measurement_fixes_uniform_width_and_initial_paint() {
    let host = HeadlessHost::with_widths(vec![40.0, 12.0, 18.0]);
    let mut opts = options(FeedbackPolicy::DirectPaint, NavigationPolicy::default());
    opts.initial_index = 2;
    let view = TabFlipView::new(host, labels(3), opts);
    view.on_offset_changed();

    assert!(view.is_initialized());
    assert_eq!(view.item_width(), 40.0);
    assert_eq!(view.items_count(), 3);
    assert_eq!(view.selected_index(), Some(2));
    assert_eq!(view.previously_selected_index(), None);
    for index in 0..3 {
        assert_eq!(view.with_host(|h| h.width_of(index)), Some(40.0));
    }
    assert_eq!(view.with_host(|h| h.tab_state(0)), Some(TabState::Inactive));
    assert_eq!(view.with_host(|h| h.tab_state(2)), Some(TabState::Active));
    assert_eq!(view.with_host(|h| h.indicator_x()), 80.0);
}

#[test]
fn measurement_runs_once() {
    let view = measured(4, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    view.with_host(|h| h.clear_calls());
    view.on_offset_changed();
    view.on_offset_changed();
    assert!(view.with_host(|h| h.calls().is_empty()));
    assert_eq!(view.set_tab_items_source(labels(2)), Err(TabError::AlreadyInitialized));
}

#[test]
fn items_and_selection_can_be_set_before_measurement() {
    let view = TabFlipView::new(
        HeadlessHost::uniform(6, 10.0),
        Vec::new(),
        options(FeedbackPolicy::Notify, NavigationPolicy::default()),
    );
    view.set_tab_items_source(labels(6)).unwrap();
    view.set_selected_index(3).unwrap();
    assert_eq!(view.selected_index(), None);

    view.on_offset_changed();
    assert_eq!(view.selected_index(), Some(3));
    assert_eq!(
        view.set_selected_index(6),
        Err(TabError::IndexOutOfRange { index: 6, count: 6 })
    );
}

#[test]
fn late_realized_tab_gets_width_and_loaded_paint() {
    let mut host = HeadlessHost::uniform(4, 10.0);
    host.unrealize(3);
    let view = TabFlipView::new(host, labels(4), options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    view.on_offset_changed();
    view.set_selected_index(3).unwrap();
    assert_eq!(view.get_tab_item(3), None);

    let container = view.with_host(|h| h.realize(3)).unwrap();
    view.on_container_realized(3, container);

    assert_eq!(view.get_tab_item(3), Some(container));
    assert_eq!(view.tab_index_of(&container), Some(3));
    assert_eq!(view.with_host(|h| h.width_of(3)), Some(10.0));
    assert_eq!(view.with_host(|h| h.tab_state(3)), Some(TabState::Active));
}

#[test]
fn empty_strip_latches_but_never_selects() {
    let view = measured(0, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    view.on_offset_changing(1.5);
    assert!(view.is_initialized());
    assert_eq!(view.selected_index(), None);
}

// ───────────────────────────────────────── navigation ─────────

#[tokio::test(start_paused = true)]
async fn far_walk_steps_through_every_page() {
    let view = measured(50, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let stamps = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&stamps);
    view.on_tab_selection_changed(move |event| sink.lock().unwrap().push((event.new_index, Instant::now())));

    let outcome = view.scroll_to_index(10).await;

    assert_eq!(outcome, NavigationOutcome::Completed);
    assert_eq!(view.selected_index(), Some(10));
    let stamps = stamps.lock().unwrap();
    let indices: Vec<usize> = stamps.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, (1..=10).collect::<Vec<_>>());
    for pair in stamps.windows(2) {
        assert!(pair[1].1 - pair[0].1 >= Duration::from_millis(10));
    }
    assert!(!view.is_navigating());
}

#[tokio::test(start_paused = true)]
async fn near_policy_jumps_far_targets_in_one_change() {
    let view = measured(50, options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()));
    view.with_host(|h| h.clear_calls());

    assert_eq!(view.scroll_to_index(20).await, NavigationOutcome::Completed);
    assert_eq!(view.selected_index(), Some(20));
    let calls = view.with_host(|h| h.calls().to_vec());
    assert_eq!(calls[0], HostCall::ScrollIntoView(20, flip_tabs::core::ScrollAlignment::Default));
    assert_eq!(
        view.with_host(|h| h.paints()),
        vec![(0, TabState::Inactive), (20, TabState::Active)]
    );
}

#[tokio::test(start_paused = true)]
async fn near_policy_walks_short_distances() {
    let view = measured(50, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    view.set_selected_index(10).unwrap();
    let events = record(&view);

    assert_eq!(view.scroll_to_index(6).await, NavigationOutcome::Completed);
    assert_eq!(new_indices(&events), vec![9, 8, 7, 6]);
}

#[tokio::test(start_paused = true)]
async fn scrolling_to_current_index_is_silent() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let events = record(&view);

    assert_eq!(view.scroll_to_index(0).await, NavigationOutcome::Unchanged);
    assert_eq!(view.scroll_to_index(5).await, NavigationOutcome::Ignored);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn newer_walk_supersedes_older_one() {
    let view = measured(50, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let events = record(&view);

    let first = tokio::spawn({
        let view = view.clone();
        async move { view.scroll_to_index(20).await }
    });
    // Let the first walk take a few steps.
    tokio::time::sleep(Duration::from_millis(35)).await;
    let stepped = view.selected_index().unwrap();
    assert!(stepped > 0 && stepped < 20);

    let second = view.scroll_to_index(0).await;
    assert_eq!(second, NavigationOutcome::Completed);
    assert_eq!(first.await.unwrap(), NavigationOutcome::Superseded);
    assert_eq!(view.selected_index(), Some(0));

    // No step from the old walk lands after the new walk finished.
    assert_eq!(new_indices(&events).last(), Some(&0));
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_walk_in_place() {
    let view = measured(50, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let walk = tokio::spawn({
        let view = view.clone();
        async move { view.scroll_to_index(30).await }
    });
    tokio::time::sleep(Duration::from_millis(25)).await;
    assert!(view.is_navigating());

    view.cancel_navigation();
    let stopped_at = view.selected_index();
    assert_eq!(walk.await.unwrap(), NavigationOutcome::Superseded);
    assert_eq!(view.selected_index(), stopped_at);
    assert!(!view.is_navigating());
}

#[tokio::test(start_paused = true)]
async fn walk_continues_from_a_scrolled_position() {
    let view = measured(50, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let events = record(&view);

    let walk = tokio::spawn({
        let view = view.clone();
        async move { view.scroll_to_index(10).await }
    });
    tokio::time::sleep(Duration::from_millis(25)).await;
    let stepped = view.selected_index().unwrap();
    assert!(stepped > 0 && stepped < 6);

    view.on_offset_changing(5.6);
    assert_eq!(view.selected_index(), Some(6));

    assert_eq!(walk.await.unwrap(), NavigationOutcome::Completed);
    assert_eq!(view.selected_index(), Some(10));
    let indices = new_indices(&events);
    let scrolled = indices.iter().position(|&i| i == 6).unwrap();
    assert_eq!(indices[scrolled..], [6, 7, 8, 9, 10]);
    assert!(indices[..scrolled].windows(2).all(|w| w[1] == w[0] + 1));
}

#[tokio::test(start_paused = true)]
async fn requesting_the_current_tab_stops_a_walk() {
    let view = measured(50, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let walk = tokio::spawn({
        let view = view.clone();
        async move { view.scroll_to_index(20).await }
    });
    tokio::time::sleep(Duration::from_millis(25)).await;
    let current = view.selected_index().unwrap();

    assert_eq!(view.scroll_to_index(current).await, NavigationOutcome::Unchanged);
    assert_eq!(walk.await.unwrap(), NavigationOutcome::Superseded);
    assert_eq!(view.selected_index(), Some(current));
    assert!(!view.is_navigating());
}

#[tokio::test(start_paused = true)]
async fn clicking_a_tab_navigates_to_it() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let events = record(&view);

    let outcome = view.on_item_clicked(&"Tab number 4".to_string()).await;
    assert_eq!(outcome, NavigationOutcome::Completed);
    assert_eq!(new_indices(&events), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn clicking_an_unknown_item_does_nothing() {
    let view = measured(5, options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar));
    let events = record(&view);

    let outcome = view.on_item_clicked(&"not a tab".to_string()).await;
    assert_eq!(outcome, NavigationOutcome::Ignored);
    assert_eq!(view.selected_index(), Some(0));
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn navigation_before_measurement_is_ignored() {
    let view = TabFlipView::new(
        HeadlessHost::uniform(5, 10.0),
        labels(5),
        options(FeedbackPolicy::Notify, NavigationPolicy::AnimateFar),
    );
    assert_eq!(view.scroll_to_index(3).await, NavigationOutcome::Ignored);
}

// ───────────────────────────────────────── surface ────────────

#[test]
fn templates_render_labels() {
    let view = measured(3, options(FeedbackPolicy::Notify, NavigationPolicy::default()));
    assert_eq!(view.tab_label(0), None);

    view.set_tab_template(Some(Arc::new(|item: &String| item.to_uppercase())));
    assert_eq!(view.tab_label(0).as_deref(), Some("TAB NUMBER 1"));

    view.set_tab_template_selector(Some(Arc::new(|_item: &String, index: usize| {
        (index == 1).then(|| Arc::new(|_: &String| "second".to_string()) as flip_tabs::core::TabTemplate<String>)
    })));
    assert_eq!(view.tab_label(1).as_deref(), Some("second"));
    assert_eq!(view.tab_label(2).as_deref(), Some("TAB NUMBER 3"));
    assert_eq!(view.tab_label(9), None);
}

#[test]
fn content_changing_and_selected_index_callbacks_fire() {
    let view = measured(3, options(FeedbackPolicy::DirectPaint, NavigationPolicy::default()));
    let hits = Arc::new(Mutex::new(0));
    let changes = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&hits);
    view.on_tab_content_changing(move || *sink.lock().unwrap() += 1);
    let sink = Arc::clone(&changes);
    view.on_selected_index_changed(move |old, new| sink.lock().unwrap().push((*old, *new)));

    view.on_container_content_changing();
    view.set_selected_index(2).unwrap();

    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(*changes.lock().unwrap(), vec![(Some(0), Some(2))]);
}
