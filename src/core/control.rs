//! The tab control: flip-view offsets in, tab highlights and selection out.
//!
//! [`TabFlipView`] is a cheap handle; clones share one state behind a mutex.
//! The mutex is never held across an `.await`, so a walk started by
//! [`TabFlipView::scroll_to_index`] yields between steps and lets scroll
//! events, clicks and newer walks through.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use super::error::{Result, TabError};
use super::feedback::{
    apply_paints, indicator_offset, jump_paints, scroll_paints, FeedbackEvent, FeedbackPolicy, TabPaint,
    TabPalette,
};
use super::gate::{GatePhase, InitGate};
use super::host::{ScrollAlignment, TabColor, TabHost, TabState};
use super::navigation::{step_towards, NavigationOutcome, NavigationPlan, NavigationToken};
use super::observable::Observable;
use super::offset::{OffsetSample, OffsetTracker};
use super::options::ControlOptions;
use super::resolver::{SelectionChange, SelectionResolver};
use super::tab_set::TabSet;

/// Renders a tab item to its header label.
pub type TabTemplate<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Picks a template per item; `None` falls back to the plain template.
pub type TabTemplateSelector<T> = Arc<dyn Fn(&T, usize) -> Option<TabTemplate<T>> + Send + Sync>;

type FeedbackListener<C> = Box<dyn FnMut(&FeedbackEvent<C>) + Send>;
type ContentListener = Box<dyn FnMut() + Send>;

// ───────────────────────────────────────── state ─────────────

struct Inner<T, H: TabHost> {
    host: H,
    options: ControlOptions,
    tracker: OffsetTracker,
    gate: InitGate,
    tabs: TabSet<H::Container>,
    resolver: SelectionResolver,
    /// Selection asked for before the strip was measured.
    requested_index: usize,

    items: Observable<Vec<T>>,
    selected_index: Observable<Option<usize>>,
    selected_tab_color: Observable<TabColor>,
    inactive_tab_color: Observable<TabColor>,
    indicator_color: Observable<TabColor>,
    tab_template: Option<TabTemplate<T>>,
    tab_template_selector: Option<TabTemplateSelector<T>>,

    selection_listeners: Vec<FeedbackListener<H::Container>>,
    content_listeners: Vec<ContentListener>,

    navigation: NavigationToken,
    /// Generation of the walk currently stepping, if any.
    walking: Option<NavigationToken>,
}

impl<T, H: TabHost> Inner<T, H> {
    fn items_count(&self) -> usize {
        self.tabs.len()
    }

    /// Whether color changes must be pushed to already painted tabs.
    fn repaints(&self) -> bool {
        self.gate.is_ready() && self.options.feedback == FeedbackPolicy::DirectPaint
    }

    fn palette(&self) -> TabPalette {
        TabPalette {
            selected: *self.selected_tab_color.get(),
            inactive: *self.inactive_tab_color.get(),
        }
    }

    fn paint(&mut self, paints: &[TabPaint]) {
        let palette = self.palette();
        apply_paints(&mut self.host, &self.tabs, paints, palette);
    }

    /// Paint every tab according to whether it is the selected one.
    fn paint_all(&mut self) {
        let selected = *self.selected_index.get();
        let paints: Vec<TabPaint> = (0..self.items_count())
            .map(|index| TabPaint {
                index,
                state: if Some(index) == selected {
                    TabState::Active
                } else {
                    TabState::Inactive
                },
            })
            .collect();
        self.paint(&paints);
    }

    /// Recorded container for `index`, unless the host has since dropped it
    /// or moved it to another tab.
    fn live_container(&self, index: usize) -> Option<H::Container> {
        self.tabs
            .container(index)
            .filter(|container| self.host.index_for_container(container) == Some(index))
            .cloned()
    }

    fn move_indicator(&mut self, sample: OffsetSample) {
        if self.options.feedback != FeedbackPolicy::DirectPaint {
            return;
        }
        let x = indicator_offset(sample, self.tabs.item_width(), self.items_count());
        self.host.translate_indicator(x);
    }

    /// Publish a resolved change.  `sample` is the scroll position that
    /// produced it, or `None` for programmatic changes.
    fn apply_change(&mut self, change: SelectionChange, sample: Option<OffsetSample>) {
        self.selected_index.set(Some(change.new));
        debug!(old = ?change.old, new = change.new, from_scroll = sample.is_some(), "tab selection changed");

        match self.options.feedback {
            FeedbackPolicy::DirectPaint => {
                let paints = match sample {
                    Some(sample) => scroll_paints(sample, change, self.items_count()),
                    None => jump_paints(change),
                };
                self.paint(&paints);
            }
            FeedbackPolicy::Notify => {
                let event = FeedbackEvent {
                    old_index: change.old,
                    old_container: change.old.and_then(|i| self.live_container(i)),
                    new_index: change.new,
                    new_container: self.live_container(change.new),
                };
                for listener in &mut self.selection_listeners {
                    listener(&event);
                }
            }
        }
    }

    /// Programmatic selection: one change, endpoints repainted, indicator
    /// snapped under the new tab.
    fn commit_index(&mut self, index: usize) -> bool {
        let Some(change) = self.resolver.commit(index) else {
            return false;
        };
        self.apply_change(change, None);
        self.move_indicator(OffsetSample::at_page(index));
        true
    }

    fn on_offset(&mut self, raw: f64) {
        if !self.gate.is_ready() {
            trace!(raw, "offset before tab strip is measured, ignoring");
            return;
        }
        let Some(sample) = self.tracker.sample(raw) else {
            trace!(raw, "non-finite offset, ignoring");
            return;
        };
        trace!(page = sample.page_index, fraction = sample.fractional_part, "offset sample");
        self.move_indicator(sample);
        if let Some(change) = self.resolver.resolve(sample, self.items_count()) {
            self.apply_change(change, Some(sample));
        }
    }

    fn measure(&mut self) {
        if !self.gate.begin_measuring() {
            return;
        }
        let count = self.items.get().len();
        self.tabs.reset(count);

        for index in 0..count {
            let Some(container) = self.host.container_for_index(index) else {
                trace!(index, "tab not realized during measurement");
                continue;
            };
            self.host.measure(&container);
            let width = self.host.desired_width(&container);
            self.tabs.register(index, container, width);
        }

        let item_width = self.tabs.item_width();
        for entry in self.tabs.entries() {
            if let Some(container) = &entry.container {
                self.host.set_width(container, item_width);
            }
        }

        if count > 0 {
            let selected = self.requested_index.min(count - 1);
            self.resolver.seed(selected);
            self.selected_index.set(Some(selected));
            self.paint_all();
            if self.options.feedback == FeedbackPolicy::DirectPaint {
                self.host.set_indicator_width(item_width);
                self.move_indicator(OffsetSample::at_page(selected));
            }
        }

        self.gate.finish();
        debug!(count, item_width, selected = ?self.selected_index.get(), "tab strip measured");
    }

    fn on_realized(&mut self, index: usize, container: H::Container) {
        if !self.gate.is_ready() || index >= self.items_count() {
            return;
        }
        self.tabs.replace_container(index, container.clone());
        self.host.set_width(&container, self.tabs.item_width());
        let state = if *self.selected_index.get() == Some(index) {
            TabState::Active
        } else {
            TabState::Inactive
        };
        let palette = self.palette();
        self.host.paint_tab(&container, state, palette.color_for(state));
        trace!(index, "late tab realized");
    }

    fn label(&self, index: usize) -> Option<String> {
        let item = self.items.get().get(index)?;
        let template = self
            .tab_template_selector
            .as_ref()
            .and_then(|select| select(item, index))
            .or_else(|| self.tab_template.clone())?;
        Some(template(item))
    }
}

// ───────────────────────────────────────── handle ────────────

/// A paged tab strip bound to a host.
pub struct TabFlipView<T, H: TabHost> {
    inner: Arc<Mutex<Inner<T, H>>>,
}

impl<T, H: TabHost> Clone for TabFlipView<T, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, H> TabFlipView<T, H>
where
    T: Clone + PartialEq + Send + 'static,
    H: TabHost + 'static,
{
    pub fn new(host: H, items: Vec<T>, options: ControlOptions) -> Self {
        let inner = Inner {
            host,
            tracker: OffsetTracker::new(options.offset_baseline, options.offset_epsilon),
            gate: InitGate::default(),
            tabs: TabSet::default(),
            resolver: SelectionResolver::default(),
            requested_index: options.initial_index,
            items: Observable::new(items),
            selected_index: Observable::new(None),
            selected_tab_color: Observable::new(options.selected_tab_color),
            inactive_tab_color: Observable::new(options.inactive_tab_color),
            indicator_color: Observable::new(options.indicator_color),
            tab_template: None,
            tab_template_selector: None,
            selection_listeners: Vec::new(),
            content_listeners: Vec::new(),
            navigation: NavigationToken::default(),
            walking: None,
            options,
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, H>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── inbound host events ─────────────────────────────────────

    /// The flip view's offset is moving.  Ignored until measured.
    pub fn on_offset_changing(&self, raw_offset: f64) {
        self.lock().on_offset(raw_offset);
    }

    /// The flip view settled.  The first call measures the tab strip; later
    /// calls do nothing.
    pub fn on_offset_changed(&self) {
        self.lock().measure();
    }

    /// The host realized (or recycled) a container for `index`.
    pub fn on_container_realized(&self, index: usize, container: H::Container) {
        self.lock().on_realized(index, container);
    }

    /// Forwarded to [`TabFlipView::on_tab_content_changing`] subscribers.
    pub fn on_container_content_changing(&self) {
        let mut inner = self.lock();
        for listener in &mut inner.content_listeners {
            listener();
        }
    }

    /// A tab header was tapped.  Items are matched by value; an unknown item
    /// is ignored.
    pub async fn on_item_clicked(&self, item: &T) -> NavigationOutcome {
        let index = self.lock().items.get().iter().position(|candidate| candidate == item);
        match index {
            Some(index) => self.scroll_to_index(index).await,
            None => {
                debug!("clicked item is not a tab, ignoring");
                NavigationOutcome::Ignored
            }
        }
    }

    // ── navigation ──────────────────────────────────────────────

    /// Navigate to `target`.
    ///
    /// Out-of-range targets are ignored.  Depending on the navigation policy
    /// the selection either jumps or walks one tab per step delay, each step
    /// a full selection change.  Any later in-range request, including one
    /// for the tab already selected, or [`TabFlipView::cancel_navigation`]
    /// supersedes a walk in progress.
    pub async fn scroll_to_index(&self, target: usize) -> NavigationOutcome {
        let (token, delay) = {
            let mut inner = self.lock();
            let current = if inner.gate.is_ready() {
                inner.resolver.tracked()
            } else {
                None
            };
            let plan = NavigationPlan::decide(inner.options.navigation, current, target, inner.items_count());
            debug!(target, ?plan, "scroll to index");

            let from = match plan {
                NavigationPlan::Ignore => return NavigationOutcome::Ignored,
                NavigationPlan::Stay => {
                    inner.navigation = inner.navigation.next();
                    inner.walking = None;
                    return NavigationOutcome::Unchanged;
                }
                NavigationPlan::Jump { from, .. } | NavigationPlan::Walk { from, .. } => from,
            };

            inner.navigation = inner.navigation.next();
            let token = inner.navigation;
            inner.host.scroll_into_view(target, ScrollAlignment::Default);

            if let NavigationPlan::Jump { to, .. } = plan {
                inner.walking = None;
                inner.commit_index(to);
                return NavigationOutcome::Completed;
            }

            trace!(from, target, "walk started");
            inner.walking = Some(token);
            (token, inner.options.step_delay)
        };

        loop {
            {
                let mut inner = self.lock();
                if inner.navigation != token {
                    debug!(target, "walk superseded");
                    return NavigationOutcome::Superseded;
                }
                let current = inner.resolver.tracked().unwrap_or(target);
                let next = step_towards(current, target);
                inner.commit_index(next);
                if next == target {
                    inner.walking = None;
                    return NavigationOutcome::Completed;
                }
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Stop any walk in progress where it stands.
    pub fn cancel_navigation(&self) {
        let mut inner = self.lock();
        inner.navigation = inner.navigation.next();
        if inner.walking.take().is_some() {
            debug!("walk cancelled");
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.lock().walking.is_some()
    }

    // ── properties ──────────────────────────────────────────────

    /// Authoritative selected tab.  `None` until measured or when there are
    /// no tabs.
    pub fn selected_index(&self) -> Option<usize> {
        *self.lock().selected_index.get()
    }

    /// Tab selected before the last change.  `None` until the first change.
    pub fn previously_selected_index(&self) -> Option<usize> {
        self.lock().resolver.previous()
    }

    /// Select `index` directly, as a data binding would.
    ///
    /// Before measurement this only records the request.
    pub fn set_selected_index(&self, index: usize) -> Result<()> {
        let mut inner = self.lock();
        let count = if inner.gate.is_ready() {
            inner.items_count()
        } else {
            inner.items.get().len()
        };
        if index >= count {
            return Err(TabError::IndexOutOfRange { index, count });
        }
        if inner.gate.is_ready() {
            inner.commit_index(index);
        } else {
            inner.requested_index = index;
        }
        Ok(())
    }

    pub fn tab_items(&self) -> Vec<T> {
        self.lock().items.get().clone()
    }

    /// Replace the tab items.  Only allowed before the strip is measured.
    pub fn set_tab_items_source(&self, items: Vec<T>) -> Result<()> {
        let mut inner = self.lock();
        if inner.gate.phase() != GatePhase::Uninitialized {
            return Err(TabError::AlreadyInitialized);
        }
        inner.items.set(items);
        Ok(())
    }

    pub fn selected_tab_color(&self) -> TabColor {
        *self.lock().selected_tab_color.get()
    }

    pub fn set_selected_tab_color(&self, color: TabColor) {
        let mut inner = self.lock();
        if inner.selected_tab_color.set(color) && inner.repaints() {
            inner.paint_all();
        }
    }

    pub fn inactive_tab_color(&self) -> TabColor {
        *self.lock().inactive_tab_color.get()
    }

    pub fn set_inactive_tab_color(&self, color: TabColor) {
        let mut inner = self.lock();
        if inner.inactive_tab_color.set(color) && inner.repaints() {
            inner.paint_all();
        }
    }

    pub fn indicator_color(&self) -> TabColor {
        *self.lock().indicator_color.get()
    }

    pub fn set_indicator_color(&self, color: TabColor) {
        self.lock().indicator_color.set(color);
    }

    pub fn set_tab_template(&self, template: Option<TabTemplate<T>>) {
        self.lock().tab_template = template;
    }

    pub fn set_tab_template_selector(&self, selector: Option<TabTemplateSelector<T>>) {
        self.lock().tab_template_selector = selector;
    }

    /// Header label for `index` from the template selector or template.
    pub fn tab_label(&self, index: usize) -> Option<String> {
        self.lock().label(index)
    }

    /// Realized container for `index`, asking the host when the control has
    /// none on record.
    pub fn get_tab_item(&self, index: usize) -> Option<H::Container> {
        let mut inner = self.lock();
        if let Some(container) = inner.tabs.container(index) {
            return Some(container.clone());
        }
        if index >= inner.items.get().len() {
            return None;
        }
        inner.host.container_for_index(index)
    }

    /// Tab index currently shown by `container`.
    pub fn tab_index_of(&self, container: &H::Container) -> Option<usize> {
        let inner = self.lock();
        inner
            .host
            .index_for_container(container)
            .or_else(|| inner.tabs.index_of(container))
    }

    pub fn item_width(&self) -> f64 {
        self.lock().tabs.item_width()
    }

    pub fn items_count(&self) -> usize {
        self.lock().items_count()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().gate.is_ready()
    }

    pub fn feedback_policy(&self) -> FeedbackPolicy {
        self.lock().options.feedback
    }

    // ── subscriptions ───────────────────────────────────────────

    /// Called once per resolved selection change under
    /// [`FeedbackPolicy::Notify`].  Listeners run with the control locked
    /// and must not call back into it.
    pub fn on_tab_selection_changed(&self, listener: impl FnMut(&FeedbackEvent<H::Container>) + Send + 'static) {
        self.lock().selection_listeners.push(Box::new(listener));
    }

    pub fn on_tab_content_changing(&self, listener: impl FnMut() + Send + 'static) {
        self.lock().content_listeners.push(Box::new(listener));
    }

    /// Bindable `selected_index` change callback, fired under every policy.
    pub fn on_selected_index_changed(
        &self,
        listener: impl FnMut(&Option<usize>, &Option<usize>) + Send + 'static,
    ) {
        self.lock().selected_index.subscribe(listener);
    }

    pub fn on_tab_items_changed(&self, listener: impl FnMut(&Vec<T>, &Vec<T>) + Send + 'static) {
        self.lock().items.subscribe(listener);
    }

    /// Run `f` against the host, e.g. to render from its recorded state.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.lock().host)
    }
}
