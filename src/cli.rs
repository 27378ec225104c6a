use std::{io, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    api::MockCatalog,
    board::ListSide,
    constants::SNAPSHOT_KEY,
    domain::CatalogSnapshot,
    storage::{self, FileKvStore, KvStore, SnapshotGateway},
};

#[derive(Parser, Debug)]
#[command(name = "darkroom")]
#[command(about = "Photography studio admin console", long_about = None)]
pub enum Cli {
    #[command(about = "Print a category list")]
    Board {
        #[arg(long, help = "Show the archived list instead of the active one")]
        archived: bool,
    },

    #[command(about = "Search customers")]
    Customers {
        #[arg(help = "Name, email, or contact fragment")]
        query: Option<String>,
    },

    #[command(about = "Search bookable packages")]
    Packages {
        #[arg(help = "Name or description fragment")]
        query: Option<String>,

        #[arg(long, short, help = "Exact category filter")]
        category: Option<String>,
    },

    #[command(about = "Search add-ons")]
    Addons {
        #[arg(help = "Name or description fragment")]
        query: Option<String>,
    },

    #[command(about = "Show dashboard statistics")]
    Stats,

    #[command(about = "Export the saved category lists")]
    Export {
        #[arg(long, value_enum, help = "Export format")]
        format: ExportFormat,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Reset the category lists to the seeded defaults")]
    Reset {
        #[arg(long, help = "Confirm the reset")]
        yes: bool,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryExport {
    pub list: String,
    pub position: usize,
    pub id: String,
    pub name: String,
    pub img: String,
    pub items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExport {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub categories: Vec<CategoryExport>,
}

pub fn show_board(archived: bool) -> Result<(), String> {
    let mut gateway = SnapshotGateway::new(FileKvStore::open_default());
    let snapshot = gateway.load();

    let side = if archived {
        ListSide::Archived
    } else {
        ListSide::Active
    };
    let items = match side {
        ListSide::Active => &snapshot.active,
        ListSide::Archived => &snapshot.archived,
    };

    println!("{} ({})", side.label(), items.len());
    println!("{}", "-".repeat(56));
    for (position, item) in items.iter().enumerate() {
        println!(
            "{:>2}. {:28} {:>3} items  {}",
            position + 1,
            item.display_name(),
            item.items.len(),
            item.id
        );
    }

    Ok(())
}

pub fn list_customers(query: Option<String>) -> Result<(), String> {
    let api = MockCatalog::with_latency();
    let customers = api.customers(query.as_deref().unwrap_or(""));

    println!(
        "{:20} {:26} {:15} {:8} {:>8}",
        "Name", "Email", "Contact", "Consent", "Bookings"
    );
    println!("{}", "-".repeat(81));
    for customer in &customers {
        println!(
            "{:20} {:26} {:15} {:8} {:>8}",
            customer.name,
            customer.email,
            customer.contact,
            if customer.consent { "yes" } else { "no" },
            customer.bookings
        );
    }

    Ok(())
}

pub fn list_packages(query: Option<String>, category: Option<String>) -> Result<(), String> {
    let api = MockCatalog::with_latency();
    let packages = api.packages(query.as_deref().unwrap_or(""), category.as_deref());

    println!("{:20} {:12} {:>12}", "Package", "Category", "Price");
    println!("{}", "-".repeat(46));
    for package in &packages {
        println!(
            "{:20} {:12} {:>12}",
            package.name,
            package.category,
            format!("₱{:.2}", package.price as f64)
        );
    }

    Ok(())
}

pub fn list_addons(query: Option<String>) -> Result<(), String> {
    let api = MockCatalog::with_latency();
    let addons = api.addons(query.as_deref().unwrap_or(""));

    println!("{:20} {:14} {:>12}", "Addon", "Category", "Price");
    println!("{}", "-".repeat(48));
    for addon in &addons {
        println!(
            "{:20} {:14} {:>12}",
            addon.name,
            addon.category,
            format!("₱{:.2}", addon.price as f64)
        );
    }

    Ok(())
}

pub fn show_stats() -> Result<(), String> {
    let api = MockCatalog::with_latency();
    let stats = api.dashboard_stats();

    println!("{:16} {:>10}", "Customers", stats.total_customers);
    println!("{:16} {:>10}", "Bookings", stats.total_bookings);
    println!(
        "{:16} {:>10}",
        "Revenue",
        format!("₱{:.2}", stats.revenue as f64)
    );
    println!();
    println!("Popular packages");
    println!("{}", "-".repeat(40));
    for package in stats.popular_packages {
        println!("{:24} {:>3} bookings", package.name, package.bookings);
    }

    Ok(())
}

pub fn export_data(format: ExportFormat, out_path: Option<PathBuf>) -> Result<(), String> {
    let mut gateway = SnapshotGateway::new(FileKvStore::open_default());
    let snapshot = gateway.load();

    let export = DataExport {
        schema_version: 1,
        exported_at: Utc::now(),
        categories: category_rows(&snapshot),
    };

    match format {
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
            if let Some(path) = out_path {
                storage::write_text_file(&path, &json).map_err(|e| e.to_string())?;
                println!("Exported to {}", path.display());
            } else {
                println!("{}", json);
            }
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in &export.categories {
                writer.serialize(row).map_err(|e| e.to_string())?;
            }
            let bytes = writer.into_inner().map_err(|e| e.to_string())?;
            let data = String::from_utf8(bytes).map_err(|e| e.to_string())?;
            if let Some(path) = out_path {
                storage::write_text_file(&path, &data).map_err(|e| e.to_string())?;
                println!("Exported to {}", path.display());
            } else {
                print!("{}", data);
            }
        }
    }

    Ok(())
}

fn category_rows(snapshot: &CatalogSnapshot) -> Vec<CategoryExport> {
    let lists = [
        ("active", snapshot.active.as_slice()),
        ("archived", snapshot.archived.as_slice()),
    ];

    lists
        .into_iter()
        .flat_map(|(list, items)| {
            items
                .iter()
                .enumerate()
                .map(move |(position, item)| CategoryExport {
                    list: list.to_string(),
                    position,
                    id: item.id.to_string(),
                    name: item.name.clone(),
                    img: item.img.clone(),
                    items: item.items.len(),
                })
        })
        .collect()
}

pub fn reset_snapshot(yes: bool) -> Result<(), String> {
    if !yes {
        return Err("Refusing to reset without --yes".to_string());
    }

    let snapshot = CatalogSnapshot::seeded();
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
    let mut store = FileKvStore::open_default();
    store.set(SNAPSHOT_KEY, &json).map_err(|e| e.to_string())?;

    println!("Reset to the {} seeded categories", snapshot.active.len());
    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    match shell {
        "bash" => {
            clap_complete::generate(
                Shell::Bash,
                &mut Cli::command(),
                "darkroom",
                &mut io::stdout(),
            );
        }
        "zsh" => {
            clap_complete::generate(
                Shell::Zsh,
                &mut Cli::command(),
                "darkroom",
                &mut io::stdout(),
            );
        }
        "fish" => {
            clap_complete::generate(
                Shell::Fish,
                &mut Cli::command(),
                "darkroom",
                &mut io::stdout(),
            );
        }
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    match cli {
        Cli::Board { archived } => {
            if let Err(e) = show_board(archived) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Customers { query } => {
            if let Err(e) = list_customers(query) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Packages { query, category } => {
            if let Err(e) = list_packages(query, category) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Addons { query } => {
            if let Err(e) = list_addons(query) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Stats => {
            if let Err(e) = show_stats() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Export { format, out } => {
            if let Err(e) = export_data(format, out) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Reset { yes } => {
            if let Err(e) = reset_snapshot(yes) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Completions { shell } => {
            if let Err(e) = print_completions(&shell) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SubItem, seeded_categories, sub_item_id};

    fn sample_snapshot() -> CatalogSnapshot {
        let mut active = seeded_categories();
        let mut parked = active.remove(1);
        parked.id = parked.id.with_archive_prefix();
        let folder = &mut active[0];
        folder.items.push(SubItem {
            id: sub_item_id(&folder.id, 1),
            name: "Solo".to_string(),
            img: "images/placeholder.jpg".to_string(),
            description: String::new(),
            inclusions: Vec::new(),
        });

        CatalogSnapshot {
            active,
            archived: vec![parked],
        }
    }

    #[test]
    fn test_export_rows_flatten_both_lists() {
        let rows = category_rows(&sample_snapshot());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].list, "active");
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[0].id, "regularcover");
        assert_eq!(rows[0].items, 1);
        assert_eq!(rows[1].id, "xmascover");
        assert_eq!(rows[1].position, 1);
        assert_eq!(rows[2].list, "archived");
        assert_eq!(rows[2].position, 0);
        assert_eq!(rows[2].id, "arch-yearbookcover");
        assert_eq!(rows[2].items, 0);
    }

    #[test]
    fn test_csv_export_one_row_per_category() {
        let rows = category_rows(&sample_snapshot());
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row).unwrap();
        }
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = data.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "list,position,id,name,img,items");
        assert!(lines[1].starts_with("active,0,regularcover,Regular Packages,"));
        assert!(lines[3].starts_with("archived,0,arch-yearbookcover,"));
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let err = reset_snapshot(false).unwrap_err();
        assert!(err.contains("--yes"));
    }
}
