use crate::application::{App, AppMode};
use crate::domain::{format_money, LaunchState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_launch_banner(f, app, chunks[1]);
    render_products(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    match app.mode {
        AppMode::CartDrawer => render_cart_drawer(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Browsing => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "{} | Cart: {} | ?: help",
        app.shop_name, app.cart_view.item_count
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_launch_banner(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match (app.launch_state(), app.countdown) {
        (LaunchState::PreLaunch, Some(countdown)) => {
            let [days, hours, minutes, seconds] = countdown.labels();
            (
                format!(
                    "Launching in {}d {}h {}m {}s   N: notify me",
                    days, hours, minutes, seconds
                ),
                Style::default().fg(Color::Yellow),
            )
        }
        _ => (
            "Now Available   o: order on WhatsApp".to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(banner, area);
}

fn render_products(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Product").style(Style::default().fg(Color::Yellow)),
        Cell::from("Price").style(Style::default().fg(Color::Yellow)),
        Cell::from("").style(Style::default().fg(Color::Yellow)),
        Cell::from("Details").style(Style::default().fg(Color::Yellow)),
    ]);

    let action_label = if app.purchase_enabled {
        "[Add to cart]"
    } else {
        "[Notify me]"
    };

    let rows: Vec<Row> = app
        .products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let style = if index == app.selected_product {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(product.name.clone()),
                Cell::from(format_money(&app.currency_symbol, product.price)),
                Cell::from(action_label),
                Cell::from(product.description.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(24),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Min(0),
    ];
    let table = Table::new(std::iter::once(header).chain(rows), widths)
        .block(Block::default().borders(Borders::ALL).title("Products"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.toast, app.mode) {
        (Some(toast), _) => toast.text.clone(),
        (None, AppMode::Browsing) => {
            "↑↓: select | Enter: add | n: notify | c: cart | i: instagram | q: quit".to_string()
        }
        (None, AppMode::CartDrawer) => {
            "+/-: quantity | d: remove | x: clear | Enter: checkout | Esc: close".to_string()
        }
        (None, AppMode::Help) => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Esc/q: close help".to_string(),
    };

    let style = if app.toast.is_some() {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_cart_drawer(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = (area.width / 2).max(40).min(area.width);
    let drawer = Rect {
        x: area.width - width,
        y: 0,
        width,
        height: area.height,
    };

    f.render_widget(Clear, drawer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(drawer);

    let view = &app.cart_view;
    if let Some(placeholder) = view.placeholder {
        let empty = Paragraph::new(placeholder)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Your cart"));
        f.render_widget(empty, chunks[0]);
    } else {
        let rows: Vec<Row> = view
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let style = if index == app.selected_cart_row {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(row.name.clone()),
                    Cell::from(format!("{} x {}", row.unit_price, row.qty)),
                    Cell::from(row.line_total.clone()),
                    Cell::from("[-] [+]"),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Min(12),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths)
            .block(Block::default().borders(Borders::ALL).title("Your cart"))
            .column_spacing(1);
        f.render_widget(table, chunks[0]);
    }

    let checkout_style = if view.checkout_enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let footer = Paragraph::new(format!("Total: {}   [Enter] Checkout", view.total_label))
        .block(Block::default().borders(Borders::ALL))
        .style(checkout_style);
    f.render_widget(footer, chunks[1]);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"STOREFRONT KEYS

=== PRODUCTS ===
↑↓ or j/k       Select product
Enter or a      Add selected product to cart (after launch)
n               Ask to be notified when the selected product is available
N               Ask to be notified at launch
o               Order on WhatsApp (after launch)
i               Open the shop's Instagram page
y               Copy the last WhatsApp link to the clipboard
c               Open the cart
q               Quit

=== CART ===
↑↓ or j/k       Select line
+ / =           Increase quantity
- / _           Decrease quantity (removes the line at zero)
d or Delete     Remove line
x               Clear the cart
Enter           Send the order over WhatsApp
Esc or c        Close the cart

=== LAUNCH ===
Purchasing opens at local midnight. Until then the banner shows the
countdown and products can only be followed with "notify me".

The cart is saved on every change and restored on the next start."#;
