use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime, macros::format_description};

use expense_tracker::{CategoryName, Expense, ExpenseDate, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many months of expenses to generate, ending with the current month.
    #[arg(long, short, default_value_t = 3)]
    months: u8,
}

/// Amounts, notes and categories cycled through for each generated expense.
const SAMPLE_EXPENSES: [(f64, &str, &str); 8] = [
    (12.5, "Lunch", "food"),
    (84.2, "Groceries", "food"),
    (120.0, "Power bill", "bills"),
    (18.0, "Movie tickets", "entertainment"),
    (45.99, "New shoes", "shopping"),
    (30.0, "Pharmacy", "health"),
    (250.0, "Flights", "travel"),
    (6.5, "Parking", "other"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let today = OffsetDateTime::now_utc().date();
    let count = create_sample_expenses(today, args.months, &conn)?;

    println!("Created {count} expenses.");
    println!("Success!");

    Ok(())
}

/// Insert an expense every four days over roughly `months` months leading up
/// to `today`, returning how many were inserted.
fn create_sample_expenses(
    today: Date,
    months: u8,
    conn: &Connection,
) -> Result<usize, Box<dyn Error>> {
    let date_format = format_description!("[year]-[month]-[day]");
    let days = i64::from(months) * 30;
    let mut count = 0;

    for (i, day) in (0..days).step_by(4).enumerate() {
        let date = today - Duration::days(day);
        let (amount, note, category) = SAMPLE_EXPENSES[i % SAMPLE_EXPENSES.len()];

        create_expense(
            Expense::build(amount, ExpenseDate::new_unchecked(&date.format(date_format)?))
                .note(note)
                .category(CategoryName::new_unchecked(category)),
            conn,
        )?;

        count += 1;
    }

    Ok(count)
}
