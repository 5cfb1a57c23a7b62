//! A utility for managing the shared transaction categories.
//!
//! Categories are global rather than per user, so they are managed from the
//! command line instead of the web app.

use clap::Parser;
use rusqlite::Connection;

use moneta::{
    CategoryId, CategoryName, create_category, delete_category, get_all_categories, get_category,
    initialize_db,
};

/// Add a transaction category to the application database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The name of the category to add. If omitted, the existing categories
    /// are listed.
    name: Option<String>,

    /// Delete the category with this ID instead. Transactions that reference
    /// it keep existing with their category cleared.
    #[arg(long, value_name = "ID", conflicts_with = "name")]
    delete: Option<CategoryId>,
}

fn main() {
    let args = Args::parse();

    let connection =
        Connection::open(&args.db_path).expect("Could not open the application database");
    initialize_db(&connection).expect("Could not initialize the database");

    match (args.delete, args.name) {
        (Some(category_id), _) => remove_category(category_id, &connection),
        (None, Some(name)) => add_category(&name, &connection),
        (None, None) => list_categories(&connection),
    }
}

fn remove_category(category_id: CategoryId, connection: &Connection) {
    let category = match get_category(category_id, connection) {
        Ok(category) => category,
        Err(error) => {
            eprintln!("Could not find category {category_id}: {error}");
            std::process::exit(1);
        }
    };

    match delete_category(category.id, connection) {
        Ok(()) => println!("Deleted category '{}'.", category.name),
        Err(error) => {
            eprintln!("Could not delete category: {error}");
            std::process::exit(1);
        }
    }
}

fn add_category(name: &str, connection: &Connection) {
    let name = match name.parse::<CategoryName>() {
        Ok(name) => name,
        Err(error) => {
            eprintln!("Invalid category name: {error}");
            std::process::exit(1);
        }
    };

    match create_category(name, connection) {
        Ok(category) => println!("Added category '{}' with ID {}.", category.name, category.id),
        Err(error) => {
            eprintln!("Could not add category: {error}");
            std::process::exit(1);
        }
    }
}

fn list_categories(connection: &Connection) {
    let categories = get_all_categories(connection).expect("Could not list categories");

    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }

    for category in categories {
        println!("{}\t{}", category.id, category.name);
    }
}
