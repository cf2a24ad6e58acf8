//! OrgChart CLI: browse the reporting hierarchy of a directory snapshot
//!
//! Loads a JSON or YAML employee file and prints manager chains, team trees
//! and rollups.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use orgchart::{logging, Employee, HierarchyService, HierarchyView, OrgChartConfig, TreeNode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orgchart", version, about = "OrgChart hierarchy browser")]
struct Cli {
    /// Employee snapshot file (.json, .yaml, .yml)
    #[arg(long, global = true, env = "ORGCHART_DIRECTORY")]
    directory: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Manager chain and team tree of one employee (first employee when omitted)
    Focus {
        id: Option<String>,
    },
    /// Manager chain above an employee, top-most first
    Ancestors {
        id: String,
    },
    /// Team tree below an employee
    Subtree {
        id: String,
    },
    /// Employees without a resolvable manager
    Roots,
    /// Head-count rollup for an employee's team
    Team {
        id: String,
    },
    /// Manager cycles present in the directory
    Cycles,
    /// Start an interactive shell
    Shell,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => OrgChartConfig::from_yaml_file(path)?,
        None => OrgChartConfig::default(),
    }
    .apply_env()?;
    if cli.directory.is_some() {
        config.directory.path = cli.directory.clone();
    }
    logging::init(&config.logging);

    if config.directory.path.is_none() {
        bail!("no directory snapshot given (use --directory or ORGCHART_DIRECTORY)");
    }
    let service = HierarchyService::from_config(&config).context("loading directory")?;
    let format = cli.format;

    match cli.command {
        Commands::Focus { id } => run_focus(&service, id.as_deref(), format),
        Commands::Ancestors { id } => run_ancestors(&service, &id, format),
        Commands::Subtree { id } => run_subtree(&service, &id, format),
        Commands::Roots => print_employees(&service.roots(), format),
        Commands::Team { id } => run_team(&service, &id, format),
        Commands::Cycles => run_cycles(&service, format),
        Commands::Shell => run_shell(&service, format),
    }
}

fn run_focus(service: &HierarchyService, id: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(id) = id {
        if service.current().index.get(id).is_none() {
            println!("No employee with id '{}', showing default focus", id);
        }
    }
    let Some(view) = service.focus_view_or_default(id) else {
        println!("(directory is empty)");
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }
        OutputFormat::Csv => {
            for row in focus_csv_rows(&view) {
                println!("{}", row);
            }
            return Ok(());
        }
        OutputFormat::Table => {}
    }

    println!("Focus: {} ({})", view.focus.display_name(), view.focus.id);
    println!("\nUpper hierarchy:");
    if view.ancestor_chain.is_empty() {
        println!("  No manager assigned.");
    } else {
        print_employees(&view.ancestor_chain, format)?;
    }
    println!("\nTeam tree:");
    print_tree(&view.subtree);
    Ok(())
}

/// One CSV document for a focus view. `level` is relative to the focus:
/// negative above it, positive below it.
fn focus_csv_rows(view: &HierarchyView) -> Vec<String> {
    let mut rows = vec!["role,level,id,name,manager_id".to_string()];
    let above = view.ancestor_chain.len() as i64;
    for (i, e) in view.ancestor_chain.iter().enumerate() {
        rows.push(csv_row("ancestor", i as i64 - above, e));
    }
    for node in view.subtree.iter() {
        let role = if node.depth == view.subtree.depth { "focus" } else { "report" };
        let level = (node.depth - view.subtree.depth) as i64;
        rows.push(csv_row(role, level, &node.employee));
    }
    rows
}

fn csv_row(role: &str, level: i64, e: &Employee) -> String {
    format!(
        "{},{},{},{},{}",
        role,
        level,
        csv_field(&e.id),
        csv_field(&e.display_name()),
        csv_field(e.manager().unwrap_or(""))
    )
}

fn run_ancestors(service: &HierarchyService, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    if service.current().index.get(id).is_none() {
        println!("No employee with id '{}'", id);
        return Ok(());
    }
    print_employees(&service.ancestors(id), format)
}

fn run_subtree(service: &HierarchyService, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let Some(tree) = service.subtree(id) else {
        println!("No employee with id '{}'", id);
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
        OutputFormat::Csv => {
            println!("depth,id,name,manager_id");
            for node in tree.iter() {
                println!(
                    "{},{},{},{}",
                    node.depth,
                    csv_field(&node.employee.id),
                    csv_field(&node.employee.display_name()),
                    csv_field(node.employee.manager().unwrap_or(""))
                );
            }
        }
        OutputFormat::Table => print_tree(&tree),
    }
    Ok(())
}

fn run_team(service: &HierarchyService, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let Some(summary) = service.team_summary(id) else {
        println!("No employee with id '{}'", id);
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => {
            println!("Manager:        {}", summary.manager_id);
            println!("Direct reports: {}", summary.direct_reports);
            println!("Total reports:  {}", summary.total_reports);
            println!("Levels below:   {}", summary.max_depth);

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["department", "headcount"]);
            for (department, count) in &summary.departments {
                let name = if department.is_empty() { "(none)" } else { department.as_str() };
                table.add_row(vec![name.to_string(), count.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_cycles(service: &HierarchyService, format: OutputFormat) -> anyhow::Result<()> {
    let cycles = service.cycles();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cycles)?),
        _ if cycles.is_empty() => println!("(no manager cycles)"),
        _ => {
            for cycle in &cycles {
                println!("{} -> {}", cycle.join(" -> "), cycle[0]);
            }
        }
    }
    Ok(())
}

fn run_shell(service: &HierarchyService, format: OutputFormat) -> anyhow::Result<()> {
    println!("OrgChart Interactive Shell ({})", service.source());
    println!("Type an employee id to focus, or :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("orgchart> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :refresh  — Reload the directory");
                println!("  :roots    — List top-level employees");
                println!("  :cycles   — List manager cycles");
                println!("  :quit     — Exit shell");
                println!("  <id>      — Focus an employee");
            }
            ":refresh" => match service.refresh() {
                Ok(published) => println!("Reloaded {} employees", published.index.len()),
                Err(e) => eprintln!("Error: {}", e),
            },
            ":roots" => print_employees(&service.roots(), format)?,
            ":cycles" => run_cycles(service, format)?,
            id => run_focus(service, Some(id), format)?,
        }
    }

    println!("Bye!");
    Ok(())
}

fn print_employees(employees: &[Employee], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(employees)?),
        OutputFormat::Csv => {
            println!("id,name,department,designation,status,manager_id");
            for e in employees {
                let cells = [
                    e.id.clone(),
                    e.display_name(),
                    e.department.clone().unwrap_or_default(),
                    e.designation.clone().unwrap_or_default(),
                    e.status.clone().unwrap_or_default(),
                    e.manager().unwrap_or("").to_string(),
                ];
                let cells: Vec<String> = cells.iter().map(|c| csv_field(c)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if employees.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["id", "name", "department", "designation", "status"]);
            for e in employees {
                table.add_row(vec![
                    e.id.clone(),
                    e.display_name(),
                    e.department.clone().unwrap_or_default(),
                    e.designation.clone().unwrap_or_default(),
                    e.status.clone().unwrap_or_default(),
                ]);
            }

            println!("{}", table);
            println!("{} row(s)", employees.len());
        }
    }
    Ok(())
}

fn print_tree(tree: &TreeNode) {
    for node in tree.iter() {
        let indent = "  ".repeat(node.depth - tree.depth);
        let detail = node.employee.designation.as_deref().unwrap_or("");
        if detail.is_empty() {
            println!("{}- {} ({})", indent, node.employee.display_name(), node.employee.id);
        } else {
            println!("{}- {} ({}) {}", indent, node.employee.display_name(), node.employee.id, detail);
        }
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
