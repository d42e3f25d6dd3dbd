//! Application state for the storefront terminal UI.
//!
//! `App` owns the launch clock, the cart store and the link opener, and
//! exposes one method per user action. Every cart mutation re-projects the
//! drawer through [`CartView`].

use super::view::CartView;
use crate::domain::{
    Cart, Countdown, LaunchClock, LaunchState, OrderComposer, Product, ShopResult,
};
use crate::infrastructure::{CartStore, ClipboardSink, LinkOpener, ShopConfig};
use chrono::{DateTime, TimeZone};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

/// Period of the countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(2300);

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Product list is focused
    Browsing,
    /// Cart drawer is open over the product list
    CartDrawer,
    /// Help screen is displayed
    Help,
}

/// A transient notice shown in the status bar.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub shown_at: Instant,
}

/// External collaborators the App talks to.
pub struct Services {
    pub store: CartStore,
    pub opener: Box<dyn LinkOpener>,
    pub clipboard: Box<dyn ClipboardSink>,
}

/// Main application state.
pub struct App {
    /// Current application mode
    pub mode: AppMode,
    /// Catalog shown as product cards
    pub products: Vec<Product>,
    /// Highlighted product (zero-based)
    pub selected_product: usize,
    /// Highlighted row in the cart drawer (zero-based)
    pub selected_cart_row: usize,
    /// Latest countdown, `None` once launched
    pub countdown: Option<Countdown>,
    /// Whether add-to-cart controls are enabled
    pub purchase_enabled: bool,
    /// Projection of the persisted cart
    pub cart_view: CartView,
    /// Temporary notice to display
    pub toast: Option<Toast>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Last deep link handed to the opener
    pub last_link: Option<Url>,
    pub shop_name: String,
    pub currency_symbol: String,
    instagram_url: String,
    composer: OrderComposer,
    launch: LaunchClock,
    next_tick: Option<Instant>,
    store: CartStore,
    opener: Box<dyn LinkOpener>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    /// Builds the App and runs the first countdown tick at `now`.
    pub fn new<Tz: TimeZone>(
        config: &ShopConfig,
        services: Services,
        now: &DateTime<Tz>,
        started: Instant,
    ) -> Self {
        let mut app = Self {
            mode: AppMode::Browsing,
            products: config.products.clone(),
            selected_product: 0,
            selected_cart_row: 0,
            countdown: None,
            purchase_enabled: false,
            cart_view: CartView::default(),
            toast: None,
            help_scroll: 0,
            last_link: None,
            shop_name: config.shop_name.clone(),
            currency_symbol: config.currency_symbol.clone(),
            instagram_url: config.instagram_url.clone(),
            composer: config.composer(),
            launch: LaunchClock::starting_at(now),
            next_tick: Some(started + TICK_PERIOD),
            store: services.store,
            opener: services.opener,
            clipboard: services.clipboard,
        };
        info!(target_instant = %app.launch.target(), "countdown started");
        app.refresh_cart();
        app.tick(now);
        app
    }

    pub fn launch_state(&self) -> LaunchState {
        self.launch.state()
    }

    /// Whether the countdown tick is still scheduled.
    pub fn ticking(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Advances the launch clock.
    ///
    /// The launch side effects run on the single tick that crosses the
    /// target, and the tick source is cancelled afterwards.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let outcome = self.launch.tick(now);
        self.countdown = outcome.countdown;
        if outcome.just_launched {
            self.on_launch();
        }
        if outcome.state == LaunchState::Launched {
            self.next_tick = None;
        }
    }

    fn on_launch(&mut self) {
        self.purchase_enabled = true;
        info!("storefront launched, purchasing enabled");
    }

    /// Handles timer wake-ups: a due countdown tick and toast expiry.
    pub fn on_timer<Tz: TimeZone>(&mut self, instant: Instant, now: &DateTime<Tz>) {
        if let Some(due) = self.next_tick {
            if instant >= due {
                self.next_tick = Some(instant + TICK_PERIOD);
                self.tick(now);
            }
        }

        let expired = self
            .toast
            .as_ref()
            .is_some_and(|toast| instant >= toast.shown_at + TOAST_DURATION);
        if expired {
            self.toast = None;
        }
    }

    /// Time until the next timer wake-up, or `None` when nothing is pending.
    pub fn poll_timeout(&self, instant: Instant) -> Option<Duration> {
        let toast_due = self.toast.as_ref().map(|t| t.shown_at + TOAST_DURATION);
        let due = match (self.next_tick, toast_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        due.map(|due| due.saturating_duration_since(instant))
    }

    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected_product)
    }

    pub fn select_next_product(&mut self) {
        if self.selected_product + 1 < self.products.len() {
            self.selected_product += 1;
        }
    }

    pub fn select_previous_product(&mut self) {
        self.selected_product = self.selected_product.saturating_sub(1);
    }

    pub fn select_next_cart_row(&mut self) {
        if self.selected_cart_row + 1 < self.cart_view.rows.len() {
            self.selected_cart_row += 1;
        }
    }

    pub fn select_previous_cart_row(&mut self) {
        self.selected_cart_row = self.selected_cart_row.saturating_sub(1);
    }

    fn refresh_cart(&mut self) {
        let cart = self.store.load();
        self.apply_cart(&cart);
    }

    fn apply_cart(&mut self, cart: &Cart) {
        self.cart_view = CartView::project(cart, self.composer.currency_symbol());
        let rows = self.cart_view.rows.len();
        if self.selected_cart_row >= rows {
            self.selected_cart_row = rows.saturating_sub(1);
        }
    }

    fn apply_mutation(&mut self, result: ShopResult<Cart>) -> bool {
        match result {
            Ok(cart) => {
                self.apply_cart(&cart);
                true
            }
            Err(e) => {
                warn!(error = %e, "cart update failed");
                self.show_toast(format!("Could not save cart: {}", e));
                self.refresh_cart();
                false
            }
        }
    }

    pub fn add_selected_to_cart(&mut self) {
        if !self.purchase_enabled {
            self.show_toast("Available at launch");
            return;
        }
        let Some(product) = self.selected_product().cloned() else {
            return;
        };
        let result = self.store.add(&product.id, &product.name, product.price);
        if self.apply_mutation(result) {
            self.show_toast(format!("{} added to cart", product.name));
        }
    }

    fn selected_cart_id(&self) -> Option<String> {
        self.cart_view
            .rows
            .get(self.selected_cart_row)
            .map(|row| row.id.clone())
    }

    pub fn increment_selected(&mut self) {
        if let Some(id) = self.selected_cart_id() {
            let result = self.store.increment(&id);
            self.apply_mutation(result);
        }
    }

    pub fn decrement_selected(&mut self) {
        if let Some(id) = self.selected_cart_id() {
            let result = self.store.decrement(&id);
            self.apply_mutation(result);
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_cart_id() {
            let result = self.store.remove(&id);
            self.apply_mutation(result);
        }
    }

    pub fn clear_cart(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "clearing cart failed");
            self.show_toast(format!("Could not clear cart: {}", e));
        }
        self.refresh_cart();
    }

    pub fn open_cart(&mut self) {
        self.mode = AppMode::CartDrawer;
        self.refresh_cart();
    }

    pub fn close_cart(&mut self) {
        self.mode = AppMode::Browsing;
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Browsing;
    }

    /// Sends the cart as an order message. An empty cart only shows a notice.
    pub fn checkout(&mut self) {
        let cart = self.store.load();
        if cart.is_empty() {
            self.show_toast("Cart is empty");
            return;
        }
        let message = self.composer.compose_order(&cart);
        self.open_message(&message);
    }

    /// Hero "order on WhatsApp" action: the cart summary if there is one,
    /// otherwise a generic order greeting.
    pub fn order_via_chat(&mut self) {
        if !self.purchase_enabled {
            self.show_toast("Ordering opens at launch");
            return;
        }
        if self.store.load().is_empty() {
            let message = self.composer.generic_order_message();
            self.open_message(&message);
        } else {
            self.checkout();
        }
    }

    pub fn notify_selected(&mut self) {
        let Some(name) = self.selected_product().map(|p| p.name.clone()) else {
            return;
        };
        let message = self.composer.notify_product_message(&name);
        self.open_message(&message);
    }

    pub fn notify_launch(&mut self) {
        let message = self.composer.notify_launch_message();
        self.open_message(&message);
    }

    pub fn open_social(&mut self) {
        match Url::parse(&self.instagram_url) {
            Ok(url) => self.open_link(url),
            Err(e) => {
                warn!(error = %e, "invalid social link");
                self.show_toast("Social link is not configured");
            }
        }
    }

    /// Copies the last opened deep link to the clipboard.
    pub fn copy_last_link(&mut self) {
        let Some(url) = self.last_link.clone() else {
            self.show_toast("Nothing to copy yet");
            return;
        };
        match self.clipboard.copy(url.as_str()) {
            Ok(()) => self.show_toast("Link copied to clipboard"),
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                self.show_toast(e.to_string());
            }
        }
    }

    fn open_message(&mut self, message: &str) {
        match self.composer.deep_link(message) {
            Ok(url) => self.open_link(url),
            Err(e) => {
                warn!(error = %e, "could not build deep link");
                self.show_toast(e.to_string());
            }
        }
    }

    fn open_link(&mut self, url: Url) {
        let result = self.opener.open(&url);
        self.last_link = Some(url);
        if let Err(e) = result {
            warn!(error = %e, "link opener failed");
            self.show_toast(format!("{} (press y to copy the link)", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShopError;
    use crate::infrastructure::{BlobStore, MemoryBlobStore};
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingOpener {
        opened: Rc<RefCell<Vec<Url>>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &Url) -> ShopResult<()> {
            self.opened.borrow_mut().push(url.clone());
            Ok(())
        }
    }

    struct FailingOpener;

    impl LinkOpener for FailingOpener {
        fn open(&self, _url: &Url) -> ShopResult<()> {
            Err(ShopError::Opener("no handler".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingClipboard {
        copied: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn copy(&mut self, text: &str) -> ShopResult<()> {
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct FailingClipboard;

    impl ClipboardSink for FailingClipboard {
        fn copy(&mut self, _text: &str) -> ShopResult<()> {
            Err(ShopError::Clipboard("no display".to_string()))
        }
    }

    /// Reads succeed from the seeded entries; every write fails.
    struct ReadOnlyBlobStore {
        inner: MemoryBlobStore,
    }

    impl BlobStore for ReadOnlyBlobStore {
        fn get(&self, key: &str) -> ShopResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> ShopResult<()> {
            Err(ShopError::Storage(std::io::Error::other("disk full")))
        }

        fn remove(&mut self, _key: &str) -> ShopResult<()> {
            Err(ShopError::Storage(std::io::Error::other("disk full")))
        }
    }

    struct Harness {
        app: App,
        opened: Rc<RefCell<Vec<Url>>>,
        copied: Rc<RefCell<Vec<String>>>,
        started: Instant,
    }

    fn config() -> ShopConfig {
        ShopConfig {
            products: vec![
                Product::new("shirt", "shirt", 250.0),
                Product::new("mug", "mug", 150.0),
            ],
            ..ShopConfig::default()
        }
    }

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, h, m, s).unwrap()
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
    }

    fn harness_with(blobs: MemoryBlobStore) -> Harness {
        let opener = RecordingOpener::default();
        let clipboard = RecordingClipboard::default();
        let opened = opener.opened.clone();
        let copied = clipboard.copied.clone();
        let config = config();
        let services = Services {
            store: CartStore::new(Box::new(blobs), config.storage_key.clone()),
            opener: Box::new(opener),
            clipboard: Box::new(clipboard),
        };
        let started = Instant::now();
        let app = App::new(&config, services, &utc(23, 59, 58), started);
        Harness {
            app,
            opened,
            copied,
            started,
        }
    }

    fn harness() -> Harness {
        harness_with(MemoryBlobStore::default())
    }

    fn launched_harness() -> Harness {
        let mut h = harness();
        h.app.tick(&midnight());
        h
    }

    fn opened_text(url: &Url) -> String {
        url.query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    }

    #[test]
    fn test_app_starts_pre_launch() {
        let h = harness();

        assert_eq!(h.app.mode, AppMode::Browsing);
        assert_eq!(h.app.launch_state(), LaunchState::PreLaunch);
        assert!(!h.app.purchase_enabled);
        assert!(h.app.ticking());
        assert_eq!(h.app.countdown.unwrap().labels(), ["0", "00", "00", "02"]);
        assert!(!h.app.cart_view.checkout_enabled);
    }

    #[test]
    fn test_add_to_cart_refused_before_launch() {
        let mut h = harness();
        h.app.add_selected_to_cart();

        assert!(h.app.store().load().is_empty());
        assert_eq!(h.app.toast.as_ref().unwrap().text, "Available at launch");
    }

    #[test]
    fn test_launch_enables_purchase_once_and_cancels_tick() {
        let mut h = harness();

        h.app.on_timer(h.started + Duration::from_secs(2), &midnight());
        assert_eq!(h.app.launch_state(), LaunchState::Launched);
        assert!(h.app.purchase_enabled);
        assert!(h.app.countdown.is_none());
        assert!(!h.app.ticking());

        // A later timer wake-up has no tick to run and leaves state alone.
        h.app.purchase_enabled = false;
        h.app.on_timer(h.started + Duration::from_secs(10), &midnight());
        assert!(!h.app.purchase_enabled);
        assert_eq!(h.app.launch_state(), LaunchState::Launched);
    }

    #[test]
    fn test_timer_before_due_does_not_tick() {
        let mut h = harness();
        h.app.on_timer(h.started, &midnight());
        assert_eq!(h.app.launch_state(), LaunchState::PreLaunch);
    }

    #[test]
    fn test_add_twice_gives_one_line() {
        let mut h = launched_harness();
        h.app.add_selected_to_cart();
        h.app.add_selected_to_cart();

        assert_eq!(h.app.cart_view.rows.len(), 1);
        assert_eq!(h.app.cart_view.rows[0].qty, 2);
        assert_eq!(h.app.cart_view.item_count, 2);
        assert_eq!(h.app.toast.as_ref().unwrap().text, "shirt added to cart");
    }

    #[test]
    fn test_drawer_increment_decrement_and_remove() {
        let mut h = launched_harness();
        h.app.add_selected_to_cart();
        h.app.select_next_product();
        h.app.add_selected_to_cart();
        h.app.open_cart();

        h.app.increment_selected();
        assert_eq!(h.app.cart_view.rows[0].qty, 2);

        h.app.select_next_cart_row();
        h.app.decrement_selected();
        assert_eq!(h.app.cart_view.rows.len(), 1);
        assert_eq!(h.app.selected_cart_row, 0);

        h.app.remove_selected();
        assert!(h.app.cart_view.rows.is_empty());
        assert!(!h.app.cart_view.checkout_enabled);
    }

    #[test]
    fn test_checkout_scenario() {
        let mut h = launched_harness();
        h.app.add_selected_to_cart();
        h.app.add_selected_to_cart();
        h.app.select_next_product();
        h.app.add_selected_to_cart();

        assert_eq!(h.app.cart_view.total, 650.0);
        h.app.checkout();

        let opened = h.opened.borrow();
        assert_eq!(opened.len(), 1);
        let text = opened_text(&opened[0]);
        assert!(text.contains("shirt x 2 = ₹500"));
        assert!(text.contains("mug x 1 = ₹150"));
        assert!(text.contains("Total: ₹650"));
    }

    #[test]
    fn test_checkout_empty_cart_shows_notice_without_navigation() {
        let mut h = launched_harness();
        assert!(!h.app.cart_view.checkout_enabled);

        h.app.checkout();

        assert!(h.opened.borrow().is_empty());
        assert_eq!(h.app.toast.as_ref().unwrap().text, "Cart is empty");
    }

    #[test]
    fn test_order_via_chat_with_empty_cart_sends_generic_message() {
        let mut h = launched_harness();
        h.app.order_via_chat();

        let opened = h.opened.borrow();
        assert_eq!(
            opened_text(&opened[0]),
            "Hello WildNest! I would like to place an order."
        );
    }

    #[test]
    fn test_notify_messages_use_selected_product() {
        let mut h = harness();
        h.app.select_next_product();
        h.app.notify_selected();
        h.app.notify_launch();

        let opened = h.opened.borrow();
        assert_eq!(opened.len(), 2);
        assert!(opened_text(&opened[0]).contains("\"mug\" is available"));
        assert!(opened_text(&opened[1]).contains("when the product is launched"));
    }

    #[test]
    fn test_clear_cart_empties_store() {
        let mut h = launched_harness();
        h.app.add_selected_to_cart();
        h.app.clear_cart();

        assert!(h.app.store().load().is_empty());
        assert!(h.app.store().blobs().get("wildnest_cart_v1").unwrap().is_none());
        assert_eq!(h.app.cart_view.placeholder, Some(crate::application::EMPTY_CART_MESSAGE));
    }

    #[test]
    fn test_corrupt_storage_starts_with_empty_cart() {
        let h = harness_with(MemoryBlobStore::with_entry("wildnest_cart_v1", "]]"));
        assert!(h.app.cart_view.rows.is_empty());
    }

    #[test]
    fn test_existing_cart_is_rendered_on_start() {
        let raw = r#"[{"id":"mug","name":"mug","price":150,"qty":3}]"#;
        let h = harness_with(MemoryBlobStore::with_entry("wildnest_cart_v1", raw));

        assert_eq!(h.app.cart_view.item_count, 3);
        assert_eq!(h.app.cart_view.total_label, "₹450");
    }

    #[test]
    fn test_toast_expires() {
        let mut h = harness();
        h.app.show_toast("hello");
        let shown_at = h.app.toast.as_ref().unwrap().shown_at;

        h.app.on_timer(shown_at + TOAST_DURATION, &utc(23, 59, 58));
        assert!(h.app.toast.is_none());
    }

    #[test]
    fn test_poll_timeout_after_launch_without_toast_is_none() {
        let h = launched_harness();
        assert!(h.app.poll_timeout(Instant::now()).is_none());
    }

    #[test]
    fn test_copy_last_link() {
        let mut h = harness();
        h.app.copy_last_link();
        assert!(h.copied.borrow().is_empty());

        h.app.notify_launch();
        h.app.copy_last_link();
        assert_eq!(h.copied.borrow().len(), 1);
        assert!(h.copied.borrow()[0].starts_with("https://wa.me/917295857885?text="));
    }

    #[test]
    fn test_opener_failure_keeps_link_for_copy() {
        let config = config();
        let services = Services {
            store: CartStore::new(Box::new(MemoryBlobStore::default()), "k"),
            opener: Box::new(FailingOpener),
            clipboard: Box::new(RecordingClipboard::default()),
        };
        let mut app = App::new(&config, services, &utc(12, 0, 0), Instant::now());

        app.notify_launch();

        assert!(app.last_link.is_some());
        assert!(app.toast.as_ref().unwrap().text.contains("no handler"));
    }

    fn launched_app_with(blobs: Box<dyn BlobStore>, clipboard: Box<dyn ClipboardSink>) -> App {
        let config = config();
        let services = Services {
            store: CartStore::new(blobs, config.storage_key.clone()),
            opener: Box::new(RecordingOpener::default()),
            clipboard,
        };
        let mut app = App::new(&config, services, &utc(23, 59, 58), Instant::now());
        app.tick(&midnight());
        app
    }

    fn read_only_store_with_mug() -> Box<dyn BlobStore> {
        let raw = r#"[{"id":"mug","name":"mug","price":150,"qty":1}]"#;
        Box::new(ReadOnlyBlobStore {
            inner: MemoryBlobStore::with_entry(&config().storage_key, raw),
        })
    }

    #[test]
    fn test_failed_save_shows_error_and_keeps_stored_cart() {
        let mut app = launched_app_with(
            read_only_store_with_mug(),
            Box::new(RecordingClipboard::default()),
        );
        assert_eq!(app.selected_product().unwrap().id, "shirt");

        app.add_selected_to_cart();

        let toast = &app.toast.as_ref().unwrap().text;
        assert!(toast.starts_with("Could not save cart"));
        assert!(toast.contains("disk full"));
        assert!(!toast.contains("added to cart"));
        let ids: Vec<&str> = app.cart_view.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["mug"]);
    }

    #[test]
    fn test_failed_quantity_change_keeps_stored_quantity() {
        let mut app = launched_app_with(
            read_only_store_with_mug(),
            Box::new(RecordingClipboard::default()),
        );
        app.open_cart();

        app.increment_selected();

        assert!(app.toast.as_ref().unwrap().text.starts_with("Could not save cart"));
        assert_eq!(app.cart_view.rows[0].qty, 1);
    }

    #[test]
    fn test_failed_clear_keeps_stored_cart() {
        let mut app = launched_app_with(
            read_only_store_with_mug(),
            Box::new(RecordingClipboard::default()),
        );

        app.clear_cart();

        assert!(app.toast.as_ref().unwrap().text.starts_with("Could not clear cart"));
        assert_eq!(app.cart_view.rows.len(), 1);
        assert!(app.cart_view.checkout_enabled);
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let mut app = launched_app_with(
            Box::new(MemoryBlobStore::default()),
            Box::new(FailingClipboard),
        );
        app.notify_launch();

        app.copy_last_link();

        assert_eq!(
            app.toast.as_ref().unwrap().text,
            "Clipboard unavailable: no display"
        );
        assert!(app.last_link.is_some());
    }
}
