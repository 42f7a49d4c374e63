use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use homeplan::{init_logging, load_plan, render, FloorPlanEditor, PlanStore, BUILD_DATE, VERSION};

fn store_path() -> PathBuf {
    std::env::var_os("HOMEPLAN_STORE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("homeplan-store.json"))
}

fn usage() -> ! {
    eprintln!("homeplan {VERSION} ({BUILD_DATE})");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  homeplan list                      List saved plans");
    eprintln!("  homeplan new <name>                Create an empty plan");
    eprintln!("  homeplan render <plan-id> <out>    Render a plan to a PNG file");
    eprintln!();
    eprintln!("The store location is taken from HOMEPLAN_STORE (default ./homeplan-store.json).");
    std::process::exit(2);
}

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut store = PlanStore::open(store_path())?;

    match args.first().map(String::as_str) {
        Some("list") => {
            for plan in store.list() {
                println!("{}  {}  {}", plan.id, plan.updated_at.to_rfc3339(), plan.name);
            }
        }
        Some("new") => {
            let Some(name) = args.get(1) else { usage() };
            let record = store.create(homeplan::NewPlan {
                name: Some(name.clone()),
                ..Default::default()
            })?;
            info!(id = %record.id, "created plan");
            println!("{}", record.id);
        }
        Some("render") => {
            let (Some(id), Some(out)) = (args.get(1), args.get(2)) else {
                usage()
            };
            let record = store.get(id)?;
            let mut editor = FloorPlanEditor::default();
            load_plan(&mut editor, &record.json);
            let image = render(&editor, 1280, 960);
            image.save(out).context("writing output image")?;
            info!(%out, "rendered plan");
        }
        Some(other) => bail!("unknown command: {other}"),
        None => usage(),
    }

    Ok(())
}
