//! # Shell
//!
//! Line-oriented driver over the commands. Stands in for a graphical
//! front end: each line is parsed into a [`ShellCommand`], executed against
//! [`AppState`] and rendered as plain text.
//!
//! ```text
//! verdant> add boston-fern 2
//!   Boston Fern x2 added. Cart: 2 items, $49.98
//! verdant> checkout
//!   Order VRD-261016-1005 placed. Total $59.96, tracking 1ZVRD4821937750
//! verdant> track 1005
//!   ...
//! ```

use std::fmt::Write as _;

use chrono::{Datelike, Utc};
use verdant_catalog::{OrderFilter, ProductFilter};
use verdant_core::{AdminTab, Category, Navigation, Order, OrderStatus, Product, View};

use crate::commands::admin::{self, AdminProductUpdate, NewProduct};
use crate::commands::checkout::{self, CheckoutRequest};
use crate::commands::{cart, navigation, product, profile, tracking};
use crate::error::ApiError;
use crate::services::PaymentDetails;
use crate::state::AppState;

/// Card used by `checkout` when none is given. Passes the Luhn check.
const DEMO_CARD: &str = "4242 4242 4242 4242";

pub const HELP: &str = "\
Shopping
  shop [category]          list plants (houseplant, succulent, outdoor, flowering)
  search <query>           search by name or description
  show <id>                product details
  add <id> [qty]           add to cart
  set <id> <qty>           change quantity (0 removes)
  remove <id>              remove from cart
  clear                    empty the cart
  cart                     show the cart
  quote                    price the cart
  promo <code> | promo off apply or drop a promo code
  checkout [card]          place the order
Orders
  track <order>            order id, number or tracking number
  profile                  account details
  orders                   order history
Admin
  admin                    dashboard
  admin orders [status] [text]
                           search all orders (status or 'all', then text)
  addplant <id> <cents> <name>
                           add a plant ('-' as id generates one)
  delplant <id>            remove a plant
  stock <id> <n>           set stock
  price <id> <cents>       set price
  status <order> <status>  move an order along
Navigation
  go <path>                e.g. go /shop, go /admin/orders
  back                     previous view
  help | quit";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Shop { category: Option<Category> },
    Search { query: String },
    Show { product_id: String },
    Add { product_id: String, quantity: Option<i64> },
    Set { product_id: String, quantity: i64 },
    Remove { product_id: String },
    Clear,
    Cart,
    Quote,
    Promo { code: Option<String> },
    Checkout { card_number: Option<String> },
    Track { query: String },
    Profile,
    Orders,
    Admin,
    AdminOrders { filter: OrderFilter },
    AddPlant { product_id: String, cents: i64, name: String },
    DeletePlant { product_id: String },
    Stock { product_id: String, stock: i64 },
    Price { product_id: String, cents: i64 },
    Status { order: String, status: OrderStatus },
    Go { view: View },
    Back,
    Quit,
}

/// Parses one line of input. Command words are case-insensitive.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let args: Vec<&str> = words.collect();

    let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("help" | "?", []) => ShellCommand::Help,
        ("shop", []) => ShellCommand::Shop { category: None },
        ("shop", [category]) => ShellCommand::Shop {
            category: Some(category.parse().map_err(|e| format!("{e}"))?),
        },
        ("search", [_, ..]) => ShellCommand::Search {
            query: args.join(" "),
        },
        ("show", [id]) => ShellCommand::Show {
            product_id: id.to_string(),
        },
        ("add", [id]) => ShellCommand::Add {
            product_id: id.to_string(),
            quantity: None,
        },
        ("add", [id, qty]) => ShellCommand::Add {
            product_id: id.to_string(),
            quantity: Some(number("quantity", qty)?),
        },
        ("set", [id, qty]) => ShellCommand::Set {
            product_id: id.to_string(),
            quantity: number("quantity", qty)?,
        },
        ("remove" | "rm", [id]) => ShellCommand::Remove {
            product_id: id.to_string(),
        },
        ("clear", []) => ShellCommand::Clear,
        ("cart", []) => ShellCommand::Cart,
        ("quote", []) => ShellCommand::Quote,
        ("promo", [code]) if code.eq_ignore_ascii_case("off") => ShellCommand::Promo { code: None },
        ("promo", [code]) => ShellCommand::Promo {
            code: Some(code.to_string()),
        },
        ("checkout", []) => ShellCommand::Checkout { card_number: None },
        ("checkout", [_, ..]) => ShellCommand::Checkout {
            card_number: Some(args.concat()),
        },
        ("track", [_, ..]) => ShellCommand::Track {
            query: args.join(" "),
        },
        ("profile", []) => ShellCommand::Profile,
        ("orders", []) => ShellCommand::Orders,
        ("admin", []) => ShellCommand::Admin,
        ("admin", [tab, rest @ ..]) if tab.eq_ignore_ascii_case("orders") => {
            ShellCommand::AdminOrders {
                filter: order_filter(rest),
            }
        }
        ("addplant", [id, cents, _, ..]) => ShellCommand::AddPlant {
            product_id: if *id == "-" { String::new() } else { id.to_string() },
            cents: number("price", cents)?,
            name: args[2..].join(" "),
        },
        ("delplant", [id]) => ShellCommand::DeletePlant {
            product_id: id.to_string(),
        },
        ("stock", [id, n]) => ShellCommand::Stock {
            product_id: id.to_string(),
            stock: number("stock", n)?,
        },
        ("price", [id, cents]) => ShellCommand::Price {
            product_id: id.to_string(),
            cents: number("price", cents)?,
        },
        ("status", [order, status]) => ShellCommand::Status {
            order: order.to_string(),
            status: status.parse().map_err(|e| format!("{e}"))?,
        },
        ("go", [path]) => ShellCommand::Go {
            view: View::parse(path).ok_or_else(|| format!("unknown path: {path}"))?,
        },
        ("back", []) => ShellCommand::Back,
        ("quit" | "exit", []) => ShellCommand::Quit,
        (word, _) if is_command(word) => {
            return Err(format!("wrong arguments for '{word}', try 'help'"));
        }
        (word, _) => return Err(format!("unknown command '{word}', try 'help'")),
    };

    Ok(command)
}

fn is_command(word: &str) -> bool {
    matches!(
        word,
        "help" | "shop" | "search" | "show" | "add" | "set" | "remove" | "rm" | "clear"
            | "cart" | "quote" | "promo" | "checkout" | "track" | "profile" | "orders"
            | "admin" | "addplant" | "delplant" | "stock" | "price" | "status" | "go"
            | "back" | "quit" | "exit"
    )
}

/// `[status|all] [text...]`; a first word that is not a status starts the
/// search text.
fn order_filter(args: &[&str]) -> OrderFilter {
    let (status, text) = match args.split_first() {
        Some((first, rest)) if first.eq_ignore_ascii_case("all") => (None, rest),
        Some((first, rest)) => match first.parse::<OrderStatus>() {
            Ok(status) => (Some(status), rest),
            Err(_) => (None, args),
        },
        None => (None, args),
    };

    OrderFilter {
        query: (!text.is_empty()).then(|| text.join(" ")),
        status,
    }
}

fn number(field: &str, raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("{field} must be a whole number, got '{raw}'"))
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one command and renders its result. `Quit` renders nothing; the
/// caller decides when to stop reading.
pub async fn execute(state: &AppState, command: ShellCommand) -> Result<String, ApiError> {
    let AppState {
        cart: cart_state,
        catalog,
        config,
        session,
        ..
    } = state;
    let money = |cents: i64| config.format_currency(cents);
    let mut out = String::new();

    match command {
        ShellCommand::Help => out.push_str(HELP),
        ShellCommand::Quit => {}

        ShellCommand::Shop { category } => {
            goto(state, View::Shop)?;
            let products = product::browse_products(
                catalog,
                ProductFilter {
                    category,
                    ..Default::default()
                },
            )?;
            render_products(&mut out, &products, &money);
        }
        ShellCommand::Search { query } => {
            let products = product::search_products(catalog, &query, None)?;
            if products.is_empty() {
                let _ = write!(out, "No plants match '{query}'");
            }
            render_products(&mut out, &products, &money);
        }
        ShellCommand::Show { product_id } => {
            let plant = product::get_product(catalog, &product_id)?;
            goto(
                state,
                View::ProductDetail {
                    product_id: plant.id.clone(),
                },
            )?;
            let _ = writeln!(out, "{} ({})", plant.name, plant.scientific_name);
            let _ = writeln!(out, "{}", money(plant.price.cents()));
            let _ = writeln!(out, "{}", plant.description);
            let _ = writeln!(
                out,
                "{} · care {} · light {} · water {} · humidity {}{}",
                plant.category,
                plant.care_level,
                plant.light,
                plant.water,
                plant.humidity,
                if plant.pet_friendly { " · pet friendly" } else { "" }
            );
            let _ = write!(out, "{}", stock_label(&plant));

            let related = product::related_products(catalog, &plant.id, None)?;
            if !related.is_empty() {
                let names: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
                let _ = write!(out, "\nYou may also like: {}", names.join(", "));
            }
        }

        ShellCommand::Add {
            product_id,
            quantity,
        } => {
            let response = cart::add_to_cart(catalog, cart_state, &product_id, quantity)?;
            if let Some(line) = response.lines.iter().find(|l| l.product.id == product_id) {
                let _ = writeln!(out, "{} x{} in cart", line.product.name, line.quantity);
            }
            render_cart_summary(&mut out, &response, &money);
        }
        ShellCommand::Set {
            product_id,
            quantity,
        } => {
            let response = cart::update_cart_item(cart_state, &product_id, quantity)?;
            render_cart(&mut out, &response, &money);
        }
        ShellCommand::Remove { product_id } => {
            let response = cart::remove_from_cart(cart_state, &product_id)?;
            render_cart(&mut out, &response, &money);
        }
        ShellCommand::Clear => {
            let response = cart::clear_cart(cart_state);
            render_cart(&mut out, &response, &money);
        }
        ShellCommand::Cart => {
            goto(state, View::Cart)?;
            render_cart(&mut out, &cart::get_cart(cart_state), &money);
        }
        ShellCommand::Quote => {
            let quote = checkout::checkout_quote(cart_state, config, session);
            let _ = writeln!(out, "Subtotal  {:>10}", money(quote.subtotal_cents));
            let _ = writeln!(out, "Shipping  {:>10}", money(quote.shipping_cents));
            let _ = writeln!(
                out,
                "Tax {:>4.2}% {:>10}",
                f64::from(quote.tax_rate_bps) / 100.0,
                money(quote.tax_cents)
            );
            if quote.discount_cents > 0 {
                let _ = writeln!(out, "Discount  {:>10}", money(-quote.discount_cents));
            }
            let _ = write!(out, "Total     {:>10}", money(quote.total_cents));
            let remaining = quote.free_shipping_remaining_cents.unwrap_or(0);
            if remaining > 0 && quote.item_count > 0 {
                let _ = write!(out, "\nAdd {} more for free shipping", money(remaining));
            }
        }
        ShellCommand::Promo { code: Some(code) } => {
            let code = checkout::apply_promo(session, config, &code)?;
            let _ = write!(out, "Promo code {code} applied");
        }
        ShellCommand::Promo { code: None } => {
            checkout::remove_promo(session);
            out.push_str("Promo code removed");
        }
        ShellCommand::Checkout { card_number } => {
            if let Navigation::Redirected { .. } = goto(state, View::Checkout)? {
                out.push_str("Your cart is empty");
                return Ok(out);
            }

            let user = profile::get_profile(catalog)?;
            let address = user.address.clone().unwrap_or_default();
            let expiry_year = (Utc::now().year() + 3) % 100;
            let request = CheckoutRequest {
                shipping_address: address,
                payment: PaymentDetails {
                    cardholder_name: user.name.clone(),
                    card_number: card_number.unwrap_or_else(|| DEMO_CARD.to_string()),
                    expiry: format!("12/{expiry_year:02}"),
                    cvv: "123".to_string(),
                },
                promo_code: session.with_session(|s| s.promo_code.clone()),
            };

            out.push_str("Processing payment...\n");
            let placed = checkout::place_order(
                cart_state,
                catalog,
                config,
                session,
                state.processor.as_ref(),
                request,
            )
            .await?;
            let _ = write!(
                out,
                "Order {} placed. Total {}, tracking {}",
                placed.order.order_number,
                money(placed.order.total.cents()),
                placed.order.tracking_number.as_deref().unwrap_or("pending")
            );
        }

        ShellCommand::Track { query } => {
            goto(state, View::Tracking)?;
            let response =
                tracking::track_order(catalog, state.tracker.as_ref(), &query).await?;
            render_order_line(&mut out, &response.order, &money);
            for event in &response.events {
                let mark = if event.completed { "●" } else { "○" };
                let when = event
                    .timestamp
                    .map(|t| t.format("%b %d %H:%M").to_string())
                    .unwrap_or_else(|| "--".to_string());
                let _ = write!(
                    out,
                    "\n  {mark} {:<10} {:<13} {} · {}",
                    event.status, when, event.description, event.location
                );
            }
        }
        ShellCommand::Profile => {
            goto(state, View::Profile)?;
            let user = profile::get_profile(catalog)?;
            let _ = writeln!(out, "{} <{}>", user.name, user.email);
            if let Some(phone) = &user.phone {
                let _ = writeln!(out, "{phone}");
            }
            if let Some(address) = &user.address {
                let _ = writeln!(
                    out,
                    "{}, {}, {} {}",
                    address.street, address.city, address.state, address.postal_code
                );
            }
            let _ = write!(out, "Member since {}", user.member_since.format("%B %Y"));
        }
        ShellCommand::Orders => {
            let orders = profile::order_history(catalog)?;
            for order in &orders {
                render_order_line(&mut out, order, &money);
                out.push('\n');
            }
            let _ = write!(out, "{} orders", orders.len());
        }

        ShellCommand::Admin => {
            goto(
                state,
                View::Admin {
                    tab: AdminTab::Dashboard,
                },
            )?;
            let stats = admin::dashboard_stats(catalog, config)?;
            let _ = writeln!(
                out,
                "Revenue {} · {} orders · average {} · {} products",
                money(stats.revenue_cents),
                stats.order_count,
                money(stats.average_order_value_cents),
                stats.product_count
            );
            let by_status: Vec<String> = stats
                .orders_by_status
                .iter()
                .map(|s| format!("{} {}", s.status, s.count))
                .collect();
            let _ = writeln!(out, "By status: {}", by_status.join(" · "));
            let by_category: Vec<String> = stats
                .revenue_by_category
                .iter()
                .map(|c| format!("{} {}", c.category, money(c.revenue_cents)))
                .collect();
            let _ = writeln!(out, "By category: {}", by_category.join(" · "));
            let low: Vec<String> = stats
                .low_stock
                .iter()
                .map(|p| format!("{} ({})", p.id, p.in_stock))
                .collect();
            let _ = write!(out, "Low stock: {}", if low.is_empty() { "none".to_string() } else { low.join(" · ") });
        }
        ShellCommand::AdminOrders { filter } => {
            goto(
                state,
                View::Admin {
                    tab: AdminTab::Orders,
                },
            )?;
            let orders = admin::admin_list_orders(catalog, &filter)?;
            for order in &orders {
                render_order_line(&mut out, order, &money);
                let _ = writeln!(
                    out,
                    "  {} <{}>",
                    order.shipping_address.full_name, order.shipping_address.email
                );
            }
            let _ = write!(out, "{} orders", orders.len());
        }
        ShellCommand::AddPlant {
            product_id,
            cents,
            name,
        } => {
            let plant = admin::admin_add_product(
                catalog,
                NewProduct {
                    id: product_id,
                    name,
                    price_cents: cents,
                    ..Default::default()
                },
            )?;
            let _ = write!(
                out,
                "Added {} ({}) at {}",
                plant.name,
                plant.id,
                money(plant.price.cents())
            );
        }
        ShellCommand::DeletePlant { product_id } => {
            let plant = admin::admin_delete_product(catalog, &product_id)?;
            let _ = write!(out, "Removed {} ({})", plant.name, plant.id);
        }
        ShellCommand::Stock { product_id, stock } => {
            let plant = admin::admin_update_product(
                catalog,
                &product_id,
                AdminProductUpdate {
                    stock: Some(stock),
                    ..Default::default()
                },
            )?;
            let _ = write!(out, "{}: {}", plant.name, stock_label(&plant));
        }
        ShellCommand::Price { product_id, cents } => {
            let plant = admin::admin_update_product(
                catalog,
                &product_id,
                AdminProductUpdate {
                    price_cents: Some(cents),
                    ..Default::default()
                },
            )?;
            let _ = write!(out, "{}: now {}", plant.name, money(plant.price.cents()));
        }
        ShellCommand::Status { order, status } => {
            let order = admin::admin_update_order_status(catalog, &order, status)?;
            let _ = write!(out, "{} is now {}", order.order_number, order.status);
        }

        ShellCommand::Go { view } => match goto(state, view)? {
            Navigation::Moved { to } => {
                let _ = write!(out, "→ {} ({})", to.title(), to);
            }
            Navigation::Redirected { requested, to } => {
                let _ = write!(out, "{requested} redirected → {} ({})", to.title(), to);
            }
            Navigation::Unchanged | Navigation::Denied { .. } => {
                let _ = write!(out, "Already on {}", navigation::current_view(session));
            }
        },
        ShellCommand::Back => {
            let view = navigation::go_back(session);
            let _ = write!(out, "← {} ({})", view.title(), view);
        }
    }

    Ok(out)
}

fn goto(state: &AppState, view: View) -> Result<Navigation, ApiError> {
    navigation::navigate(&state.cart, &state.catalog, &state.session, view)
}

// =============================================================================
// Rendering
// =============================================================================

fn stock_label(product: &Product) -> String {
    match product.in_stock {
        0 => "sold out".to_string(),
        n => format!("{n} in stock"),
    }
}

fn render_products(out: &mut String, products: &[Product], money: &dyn Fn(i64) -> String) {
    for (i, p) in products.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{:<22} {:<26} {:>9}  {}{}",
            p.id,
            p.name,
            money(p.price.cents()),
            stock_label(p),
            if p.featured { " ★" } else { "" }
        );
    }
}

fn render_cart(out: &mut String, response: &cart::CartResponse, money: &dyn Fn(i64) -> String) {
    if response.lines.is_empty() {
        out.push_str("Your cart is empty");
        return;
    }
    for line in &response.lines {
        let _ = writeln!(
            out,
            "{:<26} x{:<3} {:>10}",
            line.product.name,
            line.quantity,
            money(line.line_total().cents())
        );
    }
    render_cart_summary(out, response, money);
}

fn render_cart_summary(
    out: &mut String,
    response: &cart::CartResponse,
    money: &dyn Fn(i64) -> String,
) {
    let _ = write!(
        out,
        "Cart: {} items, {}",
        response.totals.item_count,
        money(response.totals.total_cents)
    );
    for warning in &response.stock_warnings {
        let _ = write!(
            out,
            "\n  note: {} has {} in stock, you asked for {}",
            warning.name, warning.available, warning.requested
        );
    }
}

fn render_order_line(out: &mut String, order: &Order, money: &dyn Fn(i64) -> String) {
    let _ = write!(
        out,
        "{}  {}  {:<10} {:>10}  {} items",
        order.order_number,
        order.placed_at.format("%Y-%m-%d"),
        order.status,
        money(order.total.cents()),
        order.item_count()
    );
}
