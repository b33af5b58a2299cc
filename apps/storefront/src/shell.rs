//! # Storefront Shell
//!
//! A line-oriented front end over the command layer, used by the `scoop`
//! binary. Each input line is one command; the reply is plain text followed
//! by whatever toast the command raised.
//!
//! ```text
//! > add 1
//!   ✔ Chocolate Stick added!
//! > coupon sweet10
//!   1 × Chocolate Stick          ₹30
//!   ...
//!   Coupon "SWEET10" applied!
//! > checkout
//!   Send your order: https://wa.me/918218377572?text=...
//!   ✔ Redirecting to WhatsApp...
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use scoop_core::{DiscountKind, Order, ProductId, Theme};
use scoop_store::{KeyValueStore, NewCoupon, NewProduct};

use crate::commands::cart::CartResponse;
use crate::commands::catalog::MenuResponse;
use crate::commands::{admin, cart, catalog, checkout};
use crate::error::ApiError;
use crate::notify::NoticeLevel;
use crate::whatsapp::WhatsAppLink;
use crate::Storefront;

const HELP: &str = "\
Shopping:
  menu [search]              list the menu for the active category
  category <name>            switch category (All, Sticks, Cones, Family)
  show <id>                  product details
  add <id>                   add one to the cart
  qty <id> <delta>           change a cart line, e.g. `qty 1 -1`
  cart                       show the cart
  coupon <code>              apply a coupon
  uncoupon                   remove the coupon
  clear                      empty the cart
  checkout                   send the order over WhatsApp
  theme                      switch light/dark
Admin:
  login <password> | logout
  orders                     order history, newest first
  newproduct <name>|<price>|<category>|<image>
  delproduct <id>
  stock <id>                 toggle in stock / out of stock
  newcoupon <code> <value> [percent|flat]
  delcoupon <code>
  shop                       open / close the shop
  reset                      wipe everything back to defaults
help | quit
";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Menu(String),
    Category(String),
    Show(ProductId),
    Add(ProductId),
    Qty(ProductId, i64),
    Cart,
    Coupon(String),
    Uncoupon,
    Clear,
    Checkout,
    Theme,
    Login(String),
    Logout,
    Orders,
    NewProduct(NewProduct),
    DeleteProduct(ProductId),
    Stock(ProductId),
    NewCoupon(NewCoupon),
    DeleteCoupon(String),
    Shop,
    Reset,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("Unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

fn product_id(arg: Option<&str>, usage: &'static str) -> Result<ProductId, ParseError> {
    arg.and_then(|s| s.parse().ok())
        .map(ProductId)
        .ok_or(ParseError::Usage(usage))
}

fn required(rest: &str, usage: &'static str) -> Result<String, ParseError> {
    match rest.trim() {
        "" => Err(ParseError::Usage(usage)),
        text => Ok(text.to_string()),
    }
}

/// Parses one input line.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let mut args = rest.split_whitespace();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "help" | "?" => Command::Help,
        "menu" => Command::Menu(rest.trim().to_string()),
        "category" => Command::Category(rest.trim().to_string()),
        "show" => Command::Show(product_id(args.next(), "show <id>")?),
        "add" => Command::Add(product_id(args.next(), "add <id>")?),
        "qty" => {
            const USAGE: &str = "qty <id> <delta>";
            let id = product_id(args.next(), USAGE)?;
            let delta = args
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(ParseError::Usage(USAGE))?;
            Command::Qty(id, delta)
        }
        "cart" => Command::Cart,
        "coupon" => Command::Coupon(required(rest, "coupon <code>")?),
        "uncoupon" => Command::Uncoupon,
        "clear" => Command::Clear,
        "checkout" => Command::Checkout,
        "theme" => Command::Theme,
        "login" => Command::Login(rest.trim().to_string()),
        "logout" => Command::Logout,
        "orders" => Command::Orders,
        "newproduct" => {
            let fields = required(rest, "newproduct <name>|<price>|<category>|<image>")?;
            let mut parts = fields.split('|').map(|s| s.trim().to_string());
            Command::NewProduct(NewProduct {
                name: parts.next().unwrap_or_default(),
                price: parts.next().unwrap_or_default(),
                category: parts.next().unwrap_or_default(),
                image: parts.next().unwrap_or_default(),
            })
        }
        "delproduct" => Command::DeleteProduct(product_id(args.next(), "delproduct <id>")?),
        "stock" => Command::Stock(product_id(args.next(), "stock <id>")?),
        "newcoupon" => {
            const USAGE: &str = "newcoupon <code> <value> [percent|flat]";
            let code = args.next().ok_or(ParseError::Usage(USAGE))?;
            let value = args.next().ok_or(ParseError::Usage(USAGE))?;
            let kind = match args.next().map(str::to_ascii_lowercase).as_deref() {
                None | Some("percent") | Some("%") => DiscountKind::Percent,
                Some("flat") | Some("rs") => DiscountKind::Flat,
                Some(_) => return Err(ParseError::Usage(USAGE)),
            };
            Command::NewCoupon(NewCoupon {
                code: code.to_string(),
                value: value.to_string(),
                kind,
            })
        }
        "delcoupon" => Command::DeleteCoupon(required(rest, "delcoupon <code>")?),
        "shop" => Command::Shop,
        "reset" => Command::Reset,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    Ok(command)
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_menu(menu: &MenuResponse) -> String {
    let mut out = String::new();
    let status = if menu.shop_open { "open" } else { "closed" };
    let _ = writeln!(out, "{} ({})", menu.shop_name, status);

    let chips: Vec<String> = menu
        .categories
        .iter()
        .map(|c| {
            if *c == menu.active_category {
                format!("[{}]", c)
            } else {
                c.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "  {}", chips.join(" "));

    if menu.products.is_empty() {
        let _ = writeln!(out, "  No ice creams match.");
    }
    for item in &menu.products {
        let p = &item.product;
        let _ = writeln!(
            out,
            "  #{:<14} {:<20} {:>6}  ★{:.1}  {}",
            p.id,
            p.name,
            p.price.to_string(),
            p.rating,
            item.availability.label()
        );
    }
    out
}

pub fn render_cart(cart: &CartResponse) -> String {
    let mut out = String::new();
    if cart.items.is_empty() {
        let _ = writeln!(out, "Your cart is empty.");
        return out;
    }

    for item in &cart.items {
        let _ = writeln!(
            out,
            "  {} × {:<20} {:>6}",
            item.quantity,
            item.name,
            item.line_total().to_string()
        );
    }

    let totals = &cart.totals;
    let _ = writeln!(out, "  Subtotal  {}", totals.subtotal);
    if let Some(coupon) = &cart.applied_coupon {
        let _ = writeln!(
            out,
            "  Discount  -{}  ({}, {})",
            totals.discount,
            coupon.code.as_str(),
            coupon.discount
        );
    }
    if totals.has_free_delivery() {
        let _ = writeln!(out, "  Delivery  FREE");
    } else {
        let _ = writeln!(out, "  Delivery  {}", totals.delivery);
    }
    let _ = writeln!(out, "  Total     {}", totals.total);
    if cart.below_minimum {
        let _ = writeln!(out, "  (Below our usual minimum order)");
    }
    out
}

pub fn render_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.\n".to_string();
    }
    orders
        .iter()
        .map(|o| {
            format!(
                "  #{}  {}  {} items  {}\n",
                o.id,
                o.time,
                o.total_quantity(),
                o.total
            )
        })
        .collect()
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one command and returns everything the shell should print for it.
pub fn execute<S: KeyValueStore>(
    app: &mut Storefront<S>,
    command: Command,
    now: DateTime<Utc>,
) -> String {
    debug!(?command, "shell command");

    let result: Result<String, ApiError> = match command {
        Command::Help => Ok(HELP.to_string()),
        Command::Menu(search) => Ok(render_menu(&catalog::list_products(app, &search))),
        Command::Category(name) => Ok(render_menu(&catalog::set_category(app, &name))),
        Command::Show(id) => catalog::get_product(app, id).map(|p| {
            format!(
                "{}  {}\n  {} · ★{:.1} · {}\n  {}\n",
                p.name,
                p.price,
                p.category,
                p.rating,
                if p.in_stock { "In stock" } else { "Out of stock" },
                p.image
            )
        }),
        Command::Add(id) => cart::add_to_cart(app, id, now).map(|_| String::new()),
        Command::Qty(id, delta) => {
            cart::update_cart_qty(app, id, delta, now).map(|c| render_cart(&c))
        }
        Command::Cart => Ok(render_cart(&cart::get_cart(app))),
        Command::Coupon(code) => {
            let result = cart::apply_coupon(app, &code, now).map(|c| render_cart(&c));
            let message = app
                .notices
                .coupon_message(now)
                .map(|n| format!("  {}\n", n.message))
                .unwrap_or_default();
            match result {
                Ok(text) => Ok(text + &message),
                Err(_) => Ok(message),
            }
        }
        Command::Uncoupon => cart::remove_coupon(app).map(|c| render_cart(&c)),
        Command::Clear => Ok(render_cart(&cart::clear_cart(app))),
        Command::Checkout => {
            let mut urls = Vec::new();
            let mut link = WhatsAppLink::new(app.config.whatsapp_number.clone(), |url: &str| {
                urls.push(url.to_string());
                Ok(())
            });
            let placed = checkout::checkout(app, &mut link, now);
            drop(link);
            placed.map(|order| {
                let mut text = format!("Order #{} placed, total {}\n", order.id, order.total);
                for url in urls {
                    let _ = writeln!(text, "Send your order: {}", url);
                }
                text
            })
        }
        Command::Theme => Ok(match catalog::toggle_theme(app) {
            Theme::Dark => "Dark mode\n".to_string(),
            Theme::Light => "Light mode\n".to_string(),
        }),
        Command::Login(password) => admin::admin_login(app, &password, now).map(|_| String::new()),
        Command::Logout => {
            admin::admin_logout(app);
            Ok("Logged out\n".to_string())
        }
        Command::Orders => admin::admin_list_orders(app).map(|o| render_orders(&o)),
        Command::NewProduct(form) => admin::admin_add_product(app, &form, now)
            .map(|p| format!("Added #{} {}\n", p.id, p.name)),
        Command::DeleteProduct(id) => {
            admin::admin_delete_product(app, id, now).map(|p| format!("Deleted {}\n", p.name))
        }
        Command::Stock(id) => admin::admin_toggle_stock(app, id, now).map(|in_stock| {
            if in_stock {
                "Now in stock\n".to_string()
            } else {
                "Now out of stock\n".to_string()
            }
        }),
        Command::NewCoupon(form) => admin::admin_add_coupon(app, &form, now)
            .map(|c| format!("Added {} ({})\n", c.code.as_str(), c.discount)),
        Command::DeleteCoupon(code) => admin::admin_delete_coupon(app, &code, now)
            .map(|c| format!("Deleted {}\n", c.code.as_str())),
        Command::Shop => admin::admin_toggle_shop(app).map(|open| {
            if open {
                "Shop is open\n".to_string()
            } else {
                "Shop is closed\n".to_string()
            }
        }),
        Command::Reset => admin::admin_reset(app).map(|_| "All data reset\n".to_string()),
        Command::Quit => Ok(String::new()),
    };

    let toast = app.notices.take_toast(now);
    match result {
        Ok(mut text) => {
            if let Some(notice) = toast {
                let mark = match notice.level {
                    NoticeLevel::Success => '✔',
                    NoticeLevel::Error => '✖',
                };
                let _ = writeln!(text, "  {} {}", mark, notice.message);
            }
            text
        }
        Err(err) => format!("  ✖ {}\n", err.message),
    }
}

/// Reads commands from `input` until `quit` or end of input.
pub async fn run<S, R, W>(app: &mut Storefront<S>, input: R, output: &mut W) -> std::io::Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let greeting = format!("Welcome to {}! Type `help` for commands.\n", app.config.shop_name);
    output.write_all(greeting.as_bytes()).await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(app, command, Utc::now()),
            Err(ParseError::Empty) => continue,
            Err(e) => format!("  {}\n", e),
        };
        output.write_all(reply.as_bytes()).await?;
        output.flush().await?;
    }

    info!("Shell closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{at, storefront};

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("  add 3 "), Ok(Command::Add(ProductId(3))));
        assert_eq!(parse("qty 1 -1"), Ok(Command::Qty(ProductId(1), -1)));
        assert_eq!(parse("menu choco cone"), Ok(Command::Menu("choco cone".to_string())));
        assert_eq!(parse("MENU"), Ok(Command::Menu(String::new())));
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("qty 1"), Err(ParseError::Usage("qty <id> <delta>")));
        assert_eq!(parse("fly"), Err(ParseError::Unknown("fly".to_string())));
    }

    #[test]
    fn test_parse_admin_forms() {
        assert_eq!(
            parse("newproduct Kesar Kulfi | 35 | Sticks |"),
            Ok(Command::NewProduct(NewProduct {
                name: "Kesar Kulfi".to_string(),
                price: "35".to_string(),
                category: "Sticks".to_string(),
                image: String::new(),
            }))
        );
        assert_eq!(
            parse("newcoupon MEGA 200 flat"),
            Ok(Command::NewCoupon(NewCoupon {
                code: "MEGA".to_string(),
                value: "200".to_string(),
                kind: DiscountKind::Flat,
            }))
        );
        assert!(parse("newcoupon MEGA 200 bogus").is_err());
    }

    #[test]
    fn test_execute_add_then_cart() {
        let mut app = storefront();
        let reply = execute(&mut app, Command::Add(ProductId(1)), at(0));
        assert_eq!(reply, "  ✔ Chocolate Stick added!\n");

        let reply = execute(&mut app, Command::Cart, at(0));
        assert!(reply.contains("1 × Chocolate Stick"));
        assert!(reply.contains("Total     ₹80"));
    }

    #[test]
    fn test_execute_reports_errors() {
        let mut app = storefront();
        assert_eq!(
            execute(&mut app, Command::Add(ProductId(5)), at(0)),
            "  ✖ Mango Cone is out of stock\n"
        );
        assert_eq!(
            execute(&mut app, Command::Coupon("nope".to_string()), at(0)),
            "  Invalid coupon code\n"
        );
        assert_eq!(
            execute(&mut app, Command::Shop, at(0)),
            "  ✖ Admin login required\n"
        );
    }

    #[test]
    fn test_execute_checkout_prints_link() {
        let mut app = storefront();
        execute(&mut app, Command::Add(ProductId(3)), at(0));
        let reply = execute(&mut app, Command::Checkout, at(0));

        assert!(reply.contains("Send your order: https://wa.me/918218377572?text="));
        assert!(reply.ends_with("  ✔ Redirecting to WhatsApp...\n"));
        assert_eq!(app.store.state().orders.len(), 1);
    }

    #[tokio::test]
    async fn test_run_until_quit() {
        let mut app = storefront();
        let input: &[u8] = b"add 2\n\nbogus\nquit\nadd 1\n";
        let mut output = Vec::new();

        run(&mut app, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Welcome to Murlidhar Icecream!"));
        assert!(text.contains("Vanilla Cone added!"));
        assert!(text.contains("Unknown command `bogus`"));
        assert_eq!(app.store.state().cart.total_quantity(), 1);
    }
}
