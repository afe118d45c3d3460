//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to inspect a stored goal forest.
//! - Offer a one-shot suggestion probe for manual checks.

use goaltree_core::db::open_db;
use goaltree_core::{
    progress, Category, ForestStore, GeminiSuggestionClient, SqliteForestStore, SuggestionClient,
};

fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("summary") => print_summary(),
        Some("suggest") => match args.get(1) {
            Some(goal_name) => run_suggest(goal_name),
            None => eprintln!("usage: goaltree_cli suggest <goal name>"),
        },
        Some(other) => eprintln!("unknown command `{other}`; expected summary|suggest"),
    }
}

fn print_summary() {
    println!("goaltree_core version={}", goaltree_core::core_version());

    let db_path = std::env::var("GOALTREE_DB").unwrap_or_else(|_| "goaltree.db".to_string());
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return;
        }
    };
    let store = match SqliteForestStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open forest slot: {err}");
            return;
        }
    };

    let forest = store.load();
    if forest.is_empty() {
        println!("no categories stored in `{db_path}`");
        return;
    }
    for category in &forest {
        print_category(category);
    }
}

fn print_category(category: &Category) {
    println!("{} ({} goals)", category.name, category.goals.len());
    for goal in &category.goals {
        println!(
            "  [{}] {} ({:.0}%)",
            if goal.is_completed { "x" } else { " " },
            goal.name,
            progress(goal)
        );
    }
}

fn run_suggest(goal_name: &str) {
    let client = GeminiSuggestionClient::from_env();
    match client.suggest_sub_goals(goal_name) {
        Ok(names) if names.is_empty() => println!("no suggestions returned"),
        Ok(names) => {
            for name in names {
                println!("- {name}");
            }
        }
        Err(err) => eprintln!("suggestion failed: {err}"),
    }
}
