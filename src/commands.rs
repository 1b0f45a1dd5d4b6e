//! Subcommand handlers. Each one checks the session's capabilities before
//! touching the backend.

use anyhow::{anyhow, bail, Context as _};
use chrono::{FixedOffset, Local, Offset, Utc};
use std::future::Future;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use cheese_inventory::barcode;
use cheese_inventory::dashboard;
use cheese_inventory::elements;
use cheese_inventory::formatters;
use cheese_inventory::history::{self, CategoryFilter, HistoryFilter, StatusFilter};
use cheese_inventory::inventory;
use cheese_inventory::models::{ElementUpdate, NewElement, NewProduct, Period, StockUnit};
use cheese_inventory::{
    ApiResult, Capabilities, Config, ExportFormat, InventoryApi, LoadState, SessionStore,
    ViewLoader,
};

use crate::{Command, ElementCommand, FormatArg, PeriodArg, ProductCommand, StatusArg, UserCommand};

struct Context {
    api: InventoryApi,
    store: SessionStore,
    caps: Capabilities,
    offset: FixedOffset,
}

impl Context {
    fn require(&self, allowed: bool, action: &str) -> anyhow::Result<()> {
        if allowed {
            Ok(())
        } else {
            bail!("Your role is not allowed to {action}")
        }
    }
}

pub async fn run(config: &Config, utc_offset: Option<i32>, command: Command) -> anyhow::Result<()> {
    let api = InventoryApi::new(config)?;
    let store = SessionStore::new(&config.session_path);
    let stored = store.load()?;
    let had_session = stored.is_some();
    api.set_session(stored).await;

    let offset = match utc_offset {
        Some(hours) => FixedOffset::east_opt(hours * 3600)
            .ok_or_else(|| anyhow!("UTC offset out of range: {hours}"))?,
        None => Local::now().offset().fix(),
    };
    let ctx = Context {
        caps: api.capabilities().await,
        api,
        store,
        offset,
    };

    let is_logout = matches!(command, Command::Logout);
    let result = dispatch(&ctx, command).await;

    // A 401 anywhere drops the in-memory session; mirror that on disk
    if had_session && !is_logout && ctx.api.session().await.is_none() {
        ctx.store.clear()?;
        eprintln!("Your session has expired. Please log in again.");
    }
    result
}

async fn dispatch(ctx: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => login(ctx, &username, password).await,
        Command::Logout => {
            ctx.api.logout().await;
            ctx.store.clear()?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            match ctx.api.session().await {
                Some(session) => {
                    println!("Logged in as {}", session.role);
                    if ctx.api.test_connection().await? {
                        println!("Backend reachable, session accepted.");
                    } else {
                        println!("Backend not reachable.");
                    }
                }
                None => println!("Not logged in."),
            }
            println!("{:#?}", ctx.caps);
            Ok(())
        }
        Command::Units { query, notes_only } => {
            let units = ctx.api.units().await?;
            let shown = inventory::filter_active(&units, query.as_deref().unwrap_or(""), notes_only);
            print!("{}", formatters::format_units(&shown));
            print!("{}", formatters::format_active_counts(&shown, &units));
            Ok(())
        }
        Command::Scan { code } => {
            let products = ctx.api.products().await?;
            let decoded = barcode::decode(&code, &products)?;
            print!("{}", formatters::format_scan(&decoded));
            Ok(())
        }
        Command::Intake { code, reason, note } => {
            ctx.require(ctx.caps.can_create, "register units")?;
            let products = ctx.api.products().await?;
            let unit = inventory::plan_intake(&code, &products, reason, note.as_deref())?;
            ctx.api.create_unit(&unit).await?;
            println!("Registered {}g of product #{}.", unit.initial_grams, unit.product_id);
            Ok(())
        }
        Command::Cut {
            unit_id,
            grams,
            label,
            all,
            reason,
            note,
        } => {
            ctx.require(ctx.caps.can_cut, "cut units")?;
            let units = ctx.api.units().await?;
            let unit = find_active(&units, unit_id)?;
            let cut = if all {
                inventory::plan_full_egress(unit, reason)?
            } else if let Some(code) = label {
                let products = ctx.api.products().await?;
                inventory::plan_cut_from_label(unit, &code, &products, note.as_deref(), reason)?
            } else {
                let grams = grams.ok_or_else(|| anyhow!("Pass --grams, --label or --all"))?;
                inventory::plan_cut(unit, grams, note.as_deref(), reason)?
            };
            ctx.api.create_cut(unit_id, &cut).await?;
            println!(
                "Cut {}g from unit #{unit_id}, {}g left.",
                cut.grams,
                unit.current_grams.saturating_sub(cut.grams)
            );
            Ok(())
        }
        Command::Note { unit_id, text } => {
            ctx.require(ctx.caps.can_edit, "edit units")?;
            ctx.api.update_note(unit_id, &text).await?;
            println!("Note updated.");
            Ok(())
        }
        Command::Delete { unit_id, permanent } => {
            ctx.require(ctx.caps.can_delete, "delete units")?;
            if permanent {
                ctx.api.delete_unit_permanently(unit_id).await?;
            } else {
                ctx.api.delete_unit(unit_id).await?;
            }
            println!("Unit #{unit_id} deleted.");
            Ok(())
        }
        Command::History {
            status,
            category,
            query,
            notes_only,
            from,
            to,
            cuts,
        } => {
            let filter = HistoryFilter {
                status: match status {
                    StatusArg::All => StatusFilter::All,
                    StatusArg::Active => StatusFilter::Active,
                    StatusArg::Depleted => StatusFilter::Depleted,
                },
                category: CategoryFilter::parse(&category),
                query,
                notes_only,
                from,
                to,
                offset: ctx.offset,
            };
            let api = ctx.api.clone();
            let units = load_view(async move { api.history().await }).await?;
            let shown = filter.apply(&units);
            if cuts {
                for unit in &shown {
                    print!("{}", formatters::format_cuts(unit));
                }
            } else {
                print!("{}", formatters::format_units(&shown));
            }
            print!("{}", formatters::format_product_counters(&shown, &units));
            print!("{}", formatters::format_stats(&history::summarize(shown)));
            Ok(())
        }
        Command::TopSellers => {
            let units = ctx.api.history().await?;
            print!("{}", formatters::format_top_sellers(&history::top_sellers(&units)));
            Ok(())
        }
        Command::Products(sub) => products(ctx, sub).await,
        Command::Categories => {
            print!("{}", formatters::format_categories(&ctx.api.categories().await?));
            Ok(())
        }
        Command::Reasons => {
            print!("{}", formatters::format_reasons(&ctx.api.reasons().await?));
            Ok(())
        }
        Command::Users(sub) => users(ctx, sub).await,
        Command::Elements(sub) => elements_command(ctx, sub).await,
        Command::Dashboard { period } => {
            let period = match period {
                PeriodArg::Today => Period::Today,
                PeriodArg::Week => Period::Week,
                PeriodArg::Month => Period::Month,
            };
            let api = ctx.api.clone();
            let ((report, alerts), units, all_units) = load_view(async move {
                tokio::try_join!(api.dashboard_with_alerts(), api.units(), api.history())
            })
            .await?;
            let now = Utc::now().with_timezone(&ctx.offset);
            let view = dashboard::build(&report, &units, &all_units, period, now);
            print!("{}", formatters::format_alerts(&alerts));
            println!();
            print!("{}", formatters::format_dashboard(&view));
            Ok(())
        }
        Command::Alerts => {
            print!("{}", formatters::format_alerts(&ctx.api.alerts().await?));
            Ok(())
        }
        Command::Export { format, output } => {
            let format = match format {
                FormatArg::Excel => ExportFormat::Excel,
                FormatArg::Pdf => ExportFormat::Pdf,
            };
            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("inventory.{}", format.extension())));
            let bytes = ctx.api.export_inventory(format).await?;
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved {} ({} bytes).", path.display(), bytes.len());
            Ok(())
        }
    }
}

async fn login(ctx: &Context, username: &str, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };
    let session = ctx.api.login(username, &password).await?;
    ctx.store.save(&session)?;
    println!("Logged in as {username} ({}).", session.role);
    Ok(())
}

async fn products(ctx: &Context, command: ProductCommand) -> anyhow::Result<()> {
    match command {
        ProductCommand::List => {
            print!("{}", formatters::format_products(&ctx.api.products().await?));
        }
        ProductCommand::Add(args) => {
            ctx.require(ctx.caps.can_manage_products, "manage products")?;
            ctx.api.create_product(&new_product(args)).await?;
            println!("Product created.");
        }
        ProductCommand::Update { id, product } => {
            ctx.require(ctx.caps.can_manage_products, "manage products")?;
            ctx.api.update_product(id, &new_product(product)).await?;
            println!("Product #{id} updated.");
        }
        ProductCommand::Delete { id } => {
            ctx.require(ctx.caps.can_manage_products, "manage products")?;
            ctx.api.delete_product(id).await?;
            println!("Product #{id} deleted.");
        }
    }
    Ok(())
}

fn new_product(args: crate::ProductArgs) -> NewProduct {
    NewProduct {
        name: args.name,
        plu: args.plu,
        sold_by_unit: args.by_unit,
        category_id: args.category,
        price: args.price,
    }
}

async fn users(ctx: &Context, command: UserCommand) -> anyhow::Result<()> {
    ctx.require(ctx.caps.can_manage_users, "manage users")?;
    match command {
        UserCommand::List => {
            print!("{}", formatters::format_users(&ctx.api.users().await?));
        }
        UserCommand::Add {
            username,
            role,
            password,
        } => {
            let (password, confirmation) = match password {
                Some(p) => (p.clone(), p),
                None => (prompt("Password: ")?, prompt("Confirm password: ")?),
            };
            ctx.api
                .register(&username, &password, &confirmation, role)
                .await?;
            println!("User {username} created.");
        }
        UserCommand::Role { id, role } => {
            ctx.api.update_user_role(id, role).await?;
            println!("User #{id} is now {role}.");
        }
        UserCommand::Delete { id } => {
            ctx.api.delete_user(id).await?;
            println!("User #{id} deleted.");
        }
    }
    Ok(())
}

async fn elements_command(ctx: &Context, command: ElementCommand) -> anyhow::Result<()> {
    match command {
        ElementCommand::List { query, all } => {
            let items = ctx.api.elements().await?;
            let shown = elements::filter(&items, query.as_deref().unwrap_or(""), !all);
            print!("{}", formatters::format_elements(&shown, &elements::stats(&items)));
        }
        ElementCommand::Show { id } => {
            let (element, movements) =
                tokio::try_join!(ctx.api.element(id), ctx.api.element_movements(id))?;
            print!(
                "{}",
                formatters::format_elements(&[&element], &elements::stats(std::slice::from_ref(&element)))
            );
            print!("{}", formatters::format_movements(&movements));
        }
        ElementCommand::Add {
            name,
            quantity,
            description,
        } => {
            ctx.require(ctx.caps.can_create, "create elements")?;
            ctx.api
                .create_element(&NewElement {
                    name,
                    total_quantity: quantity,
                    description,
                })
                .await?;
            println!("Element created.");
        }
        ElementCommand::Update {
            id,
            name,
            description,
        } => {
            ctx.require(ctx.caps.can_edit, "edit elements")?;
            ctx.api
                .update_element(id, &ElementUpdate { name, description })
                .await?;
            println!("Element #{id} updated.");
        }
        ElementCommand::Delete { id } => {
            ctx.require(ctx.caps.can_delete, "delete elements")?;
            ctx.api.delete_element(id).await?;
            println!("Element #{id} deleted.");
        }
        ElementCommand::Ingress { id, quantity, notes } => {
            ctx.require(ctx.caps.can_edit, "move element stock")?;
            let element = ctx.api.element(id).await?;
            let ingress = elements::plan_ingress(&element, quantity, notes.as_deref())?;
            ctx.api.element_ingress(id, &ingress).await?;
            println!("Added {quantity} to {}.", element.name);
        }
        ElementCommand::Egress {
            id,
            quantity,
            reason,
            notes,
        } => {
            ctx.require(ctx.caps.can_edit, "move element stock")?;
            let element = ctx.api.element(id).await?;
            let egress = elements::plan_egress(&element, quantity, reason, notes.as_deref())?;
            ctx.api.element_egress(id, &egress).await?;
            println!("Took {quantity} from {}.", element.name);
        }
    }
    Ok(())
}

fn find_active(units: &[StockUnit], unit_id: u64) -> anyhow::Result<&StockUnit> {
    units
        .iter()
        .find(|u| u.id == unit_id && u.active)
        .ok_or_else(|| anyhow!("Unit #{unit_id} not found among active units"))
}

/// Run one view load to completion. Ctrl-C leaves the view and drops
/// whatever the backend answers afterwards.
async fn load_view<T, F>(fetch: F) -> anyhow::Result<T>
where
    T: Clone + Send + 'static,
    F: Future<Output = ApiResult<T>> + Send + 'static,
{
    let mut loader = ViewLoader::new();
    loader.enter(fetch).await;

    let interrupted = tokio::select! {
        _ = loader.finished() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    let state = loader.snapshot().await;
    loader.leave().await;

    if interrupted {
        bail!("Interrupted");
    }
    match state {
        LoadState::Ready(value) => Ok(value),
        LoadState::Failed(message) => Err(anyhow!(message)),
        LoadState::Idle | LoadState::Loading => bail!("View did not finish loading"),
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{label}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
