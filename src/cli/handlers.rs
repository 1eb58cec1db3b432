use std::env;
use std::io::{self, Read};

use crate::entity::{created_at, EmployeeCard, EntityId, Role, ShareCodeSource};
use crate::error::{Result, StudioError};
use crate::project::Project;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::studio::Studio;
use crate::warnings::format_warning;

fn open_project() -> Result<Project> {
    let cwd = env::current_dir()?;
    let root = Project::find_root(&cwd);
    Project::open(&root)
}

/// Print and clear any warnings the studio collected.
fn report_warnings<S: KeyValueStore, C: ShareCodeSource>(studio: &mut Studio<S, C>) {
    for warning in studio.take_warnings() {
        eprintln!("{}", format_warning(&warning));
    }
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;

    let project = Project::init(&root)?;

    println!("Initialized card studio in {}", project.root().display());

    Ok(())
}

pub fn handle_view(role: String, json: bool) -> Result<()> {
    let role: Role = role.parse()?;
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    match role {
        Role::Company => {
            let orders = studio.orders();
            if json {
                println!("{}", serde_json::to_string_pretty(orders)?);
            } else if orders.is_empty() {
                println!("No orders placed.");
            } else {
                println!("Your Orders:\n");
                for o in orders {
                    let placed = created_at(o.id)
                        .map(|t| format!(" (placed {})", t.format("%Y-%m-%d %H:%M")))
                        .unwrap_or_default();
                    println!("  {} {} - {}{}", o.id, o.company_name, o.status, placed);
                }
            }
        }
        Role::Designer => {
            let orders = studio.orders();
            if json {
                println!("{}", serde_json::to_string_pretty(orders)?);
            } else if orders.is_empty() {
                println!("No orders available.");
            } else {
                println!("Design Orders ({} open):\n", studio.pending_orders().count());
                for o in orders {
                    if o.is_pending() {
                        println!("  {} {} - {} [open]", o.id, o.company_name, o.status);
                        println!("      brand: {}", o.brand_details);
                    } else {
                        println!("  {} {} - {}", o.id, o.company_name, o.status);
                    }
                }
            }
        }
        Role::Hr => {
            let designs = studio.designs();
            if json {
                println!("{}", serde_json::to_string_pretty(designs)?);
            } else if designs.is_empty() {
                println!("No designs available.");
            } else {
                println!("Designs:\n");
                for d in designs {
                    println!("  {} (order {}) Template: {}", d.id, d.order_id, d.template);
                }
            }
        }
        Role::Employee => {
            let cards = studio.cards();
            if json {
                println!("{}", serde_json::to_string_pretty(cards)?);
            } else if cards.is_empty() {
                println!("No cards assigned.");
            } else {
                println!("Business Cards:\n");
                for c in cards {
                    println!("  {} {} - {}", c.id, c.name, c.title);
                }
            }
        }
    }

    Ok(())
}

pub fn handle_order(company: String, details: String, json: bool) -> Result<()> {
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    let mut session = Session::new(Role::Company);
    session.form.company_name = company;
    session.form.brand_details = details;
    let id = session.place_order(&mut studio)?;
    report_warnings(&mut studio);

    let order = studio.order(id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(order)?);
    } else {
        println!(
            "Created order {} - {} [{}]",
            order.id, order.company_name, order.status
        );
    }

    Ok(())
}

pub fn handle_design(order_id: EntityId, template: String, json: bool) -> Result<()> {
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    if !studio.order(order_id)?.is_pending() {
        return Err(StudioError::Validation(format!(
            "Order {} already has a design",
            order_id
        )));
    }

    let mut session = Session::new(Role::Designer);
    session.form.design_template = template;
    let id = session.submit_design(&mut studio, order_id)?;
    report_warnings(&mut studio);

    let design = studio.design(id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(design)?);
    } else {
        println!(
            "Submitted design {} for order {} (share code {})",
            design.id, design.order_id, design.share_code
        );
    }

    Ok(())
}

pub fn handle_assign(
    design_id: EntityId,
    name: String,
    email: String,
    phone: String,
    title: String,
    json: bool,
) -> Result<()> {
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    let mut session = Session::new(Role::Hr);
    session.form.employee_name = name;
    session.form.employee_email = email;
    session.form.employee_phone = phone;
    session.form.employee_title = title;
    let id = session.assign_card(&mut studio, design_id)?;
    report_warnings(&mut studio);

    let card = studio.card(id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(card)?);
    } else {
        println!(
            "Assigned card {} to {} (share code {})",
            card.id, card.name, card.share_code
        );
    }

    Ok(())
}

pub fn handle_share(card_id: EntityId) -> Result<()> {
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    let mut session = Session::new(Role::Employee);
    let code = session.share_card(&studio, card_id)?;
    println!("Share this code: {}", code);

    Ok(())
}

pub fn handle_receive(code: Option<String>, json: bool) -> Result<()> {
    let code = match code {
        Some(code) => code,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input.trim().to_string()
        }
        None => {
            return Err(StudioError::Validation(
                "Please enter a share code".to_string(),
            ))
        }
    };

    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    let mut session = Session::default();
    session.form.receive_code = code;
    let card = session.receive_card(&studio)?;

    if json {
        println!("{}", serde_json::to_string_pretty(card)?);
    } else {
        print_card(card);
    }

    Ok(())
}

fn print_card(card: &EmployeeCard) {
    println!("Card: {}", card.summary());
    println!("Name: {}", card.name);
    println!("Title: {}", card.title);
    println!("Email: {}", card.email);
    println!("Phone: {}", card.phone);
    println!("Template: {}", card.template);
}

pub fn handle_lookup(code: String, json: bool) -> Result<()> {
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    let design = studio.design_by_share_code(&code)?;
    if json {
        println!("{}", serde_json::to_string_pretty(design)?);
    } else {
        println!("Design {} (order {})", design.id, design.order_id);
        println!("Template: {}", design.template);
    }

    Ok(())
}

pub fn handle_theme(mode: Option<String>) -> Result<()> {
    let project = open_project()?;
    let mut studio = project.studio()?;
    report_warnings(&mut studio);

    match mode.as_deref().map(str::to_lowercase).as_deref() {
        None => {}
        Some("dark") => studio.set_dark_mode(true),
        Some("light") => studio.set_dark_mode(false),
        Some("toggle") => {
            studio.toggle_dark_mode();
        }
        Some(other) => {
            return Err(StudioError::Validation(format!(
                "Invalid theme '{}'. Expected light, dark or toggle",
                other
            )))
        }
    }
    report_warnings(&mut studio);

    println!(
        "Theme: {}",
        if studio.dark_mode() { "dark" } else { "light" }
    );

    Ok(())
}
