use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::alert::{Alert, AlertKind};
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::product_grid::ProductGrid;
use crate::components::purchase_modal::PurchaseModal;
use crate::components::status_bar::StatusBar;
use crate::components::Component;
use crate::data::types::PurchaseReceipt;
use crate::data::StoreService;
use crate::events::AppEvent;
use crate::session::Session;
use crate::theme::THEME;
use crate::utils;

const WALLET_MISSING: &str =
    "No wallet found. Set WALLET_RPC_URL or PRIVATE_KEY to use this application";
const CONNECT_FIRST: &str = "Please connect your wallet first";
const CONNECT_FAILED: &str = "Error connecting wallet. Please try again.";
const PURCHASE_FAILED: &str = "Error processing purchase. Please try again.";

pub struct App {
    // Components
    header: Header,
    grid: ProductGrid,
    modal: PurchaseModal,
    alert: Alert,
    status_bar: StatusBar,
    help: HelpOverlay,

    // Wallet + pending purchase
    session: Session,

    // Data
    service: Arc<StoreService>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    explorer_url: Option<String>,

    // State
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn with_service(
        service: Arc<StoreService>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            header: Header::new(),
            grid: ProductGrid::new(),
            modal: PurchaseModal::new(),
            alert: Alert::new(),
            status_bar: StatusBar::new(),
            help: HelpOverlay::new(),
            session: Session::new(),
            service,
            event_rx,
            explorer_url: None,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub fn set_chain_info(&mut self, name: String, symbol: String, explorer_url: Option<String>) {
        self.header.chain_name = name;
        self.grid.symbol = symbol.clone();
        self.modal.symbol = symbol;
        self.explorer_url = explorer_url;
    }

    pub fn set_wallet_kind(&mut self, kind: Option<&'static str>) {
        self.status_bar.wallet_kind = kind;
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        // Initial data load
        self.status_bar.loading = true;
        self.service.load_products();

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(Style::default().bg(THEME.bg)), area);

        // Layout: header (1) | products (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);
        self.grid.render(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.modal.render(
            frame,
            chunks[1],
            self.session.modal_product(),
            self.session.is_confirming(),
        );
        self.help.render(frame, area);
        self.alert.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Alerts block everything until dismissed
        if self.alert.handle_key(key) {
            return;
        }

        if self.help.handle_key(key) {
            return;
        }

        // The modal owns the keyboard while a product is selected
        if self.session.modal_product().is_some() {
            if let Some(event) = self.modal.handle_key(key) {
                self.handle_app_event(event);
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.help.toggle();
                return;
            }
            KeyCode::Char('c') => {
                self.connect_wallet();
                return;
            }
            _ => {}
        }

        if let Some(event) = self.grid.handle_key(key) {
            self.handle_app_event(event);
        }
    }

    fn connect_wallet(&mut self) {
        if self.session.connected {
            return;
        }
        self.status_bar.loading = true;
        self.service.connect_wallet();
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Connected(chain_id) => {
                self.header.chain_id = chain_id;
                self.header.node_connected = true;
            }
            AppEvent::NodeUnreachable(reason) => {
                self.header.node_connected = false;
                self.status_bar.info_message = Some(format!("Node unreachable: {reason}"));
            }
            AppEvent::ProductsLoaded(catalog) => {
                self.status_bar.loading = false;
                self.status_bar.catalog_source = Some(catalog.source);
                self.grid.set_products(catalog.products, catalog.source);
            }
            AppEvent::WalletConnected(account) => {
                self.status_bar.loading = false;
                self.status_bar.error_message = None;
                self.session.wallet_connected(account);
                self.header.account = Some(account);
            }
            AppEvent::WalletMissing => {
                self.status_bar.loading = false;
                self.alert.show(AlertKind::Info, WALLET_MISSING);
            }
            AppEvent::WalletRejected(reason) => {
                self.status_bar.loading = false;
                self.status_bar.error_message = Some(reason);
                self.alert.show(AlertKind::Error, CONNECT_FAILED);
            }
            AppEvent::PurchaseIntent(product) => {
                if !self.session.connected {
                    self.alert.show(AlertKind::Info, CONNECT_FIRST);
                    return;
                }
                self.session.select(product);
            }
            AppEvent::ConfirmPurchase => {
                if let Some((product, buyer)) = self.session.begin_confirm() {
                    self.status_bar.error_message = None;
                    self.status_bar.loading = true;
                    self.service.purchase(product, buyer);
                }
            }
            AppEvent::CancelPurchase => {
                self.session.cancel();
            }
            AppEvent::PurchaseConfirmed { product, receipt } => {
                self.status_bar.loading = false;
                self.session.purchase_succeeded();
                self.status_bar.info_message = Some(self.describe_receipt(&receipt));
                self.alert.show(
                    AlertKind::Success,
                    format!("Purchase successful! You bought {product}"),
                );
            }
            AppEvent::PurchaseFailed(reason) => {
                self.status_bar.loading = false;
                self.session.purchase_failed();
                self.status_bar.error_message = Some(reason);
                self.alert.show(AlertKind::Error, PURCHASE_FAILED);
            }
            AppEvent::Error(msg) => {
                self.status_bar.error_message = Some(msg);
                self.status_bar.loading = false;
            }
        }
    }

    fn describe_receipt(&self, receipt: &PurchaseReceipt) -> String {
        let tx = match &self.explorer_url {
            Some(explorer) => format!("{explorer}/tx/{}", receipt.tx_hash),
            None => utils::truncate_hash(&receipt.tx_hash),
        };
        let block = receipt
            .block_number
            .map(|n| format!(" in block {n}"))
            .unwrap_or_default();
        match &receipt.event {
            Some(event) => format!(
                "Paid {} for #{} at {} ({tx}{block})",
                utils::format_price(event.amount),
                event.product_id,
                utils::format_timestamp(event.timestamp),
            ),
            None => format!("Confirmed {tx}{block}"),
        }
    }
}
