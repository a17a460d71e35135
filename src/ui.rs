use std::io::{self, BufRead, Write};
use std::path::Path;

use rand::thread_rng;

use crate::error::StoreError;
use crate::histogram;
use crate::search::SearchOutcome;
use crate::store::{self, MovieStore};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

/// ANSI styling, disabled wholesale with --no-color.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    enabled: bool,
}

impl Style {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Interactive menu loop. Every store error is reported and control returns
/// to the menu; only stdin EOF (or an IO failure) ends the loop.
pub fn run(store: &mut MovieStore, style: &Style, mut input: impl BufRead) -> eyre::Result<()> {
    loop {
        print_menu(style);
        let Some(choice) = prompt(&mut input, style, "Choose an option (1-10): ")? else {
            break;
        };
        match choice.as_str() {
            "1" => list_movies(store, style),
            "2" => add_movie(store, style, &mut input)?,
            "3" => delete_movie(store, style, &mut input)?,
            "4" => update_movie(store, style, &mut input)?,
            "5" => show_stats(store, style),
            "6" => random_movie(store, style),
            "7" => search_movies(store, style, &mut input)?,
            "8" => sorted_by_rating(store, style),
            "9" => {
                println!("{}", style.paint(GREEN, "Goodbye!"));
                break;
            }
            "10" => export_histogram(store, style, &mut input)?,
            _ => report(style, "Invalid option. Please choose a number between 1 and 10."),
        }
    }
    Ok(())
}

fn print_menu(style: &Style) {
    println!();
    println!(
        "{}",
        style.paint(CYAN, &style.paint(BOLD, "=== Movie Database ==="))
    );
    let items = [
        "List Movies",
        "Add Movie",
        "Delete Movie",
        "Update Movie",
        "Stats",
        "Random Movie",
        "Search Movie",
        "Movies Sorted by Rating",
        "Exit",
        "Create Rating Histogram",
    ];
    for (number, item) in items.iter().enumerate() {
        println!("{} {item}", style.paint(BLUE, &format!("{}.", number + 1)));
    }
}

/// Prints a prompt and reads one trimmed line; `None` on EOF.
fn prompt(
    input: &mut impl BufRead,
    style: &Style,
    message: &str,
) -> eyre::Result<Option<String>> {
    print!("{}", style.paint(YELLOW, message));
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn report(style: &Style, message: &str) {
    println!("{}", style.paint(RED, message));
}

fn report_error(style: &Style, error: &StoreError) {
    report(style, &error.to_string());
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn print_entry(style: &Style, title: &str, rating: f64) {
    println!(
        "{}: {}",
        style.paint(WHITE, title),
        style.paint(YELLOW, &rating.to_string())
    );
}

fn list_movies(store: &MovieStore, style: &Style) {
    println!();
    println!(
        "{}",
        style.paint(MAGENTA, &format!("{} in total", pluralize(store.len(), "movie")))
    );
    for (title, rating) in store.entries() {
        print_entry(style, title, rating);
    }
}

fn add_movie(
    store: &mut MovieStore,
    style: &Style,
    input: &mut impl BufRead,
) -> eyre::Result<()> {
    let Some(title) = prompt(input, style, "Enter movie name: ")? else {
        return Ok(());
    };
    if title.is_empty() {
        report(style, "Movie name cannot be empty.");
        return Ok(());
    }
    let Some(rating) = read_rating(input, style, "Enter rating (1-10): ")? else {
        return Ok(());
    };
    match store.add(&title, rating) {
        Ok(()) => println!(
            "{} {title}: {rating}",
            style.paint(GREEN, "Added/updated:")
        ),
        Err(error) => report_error(style, &error),
    }
    Ok(())
}

fn delete_movie(
    store: &mut MovieStore,
    style: &Style,
    input: &mut impl BufRead,
) -> eyre::Result<()> {
    let Some(title) = prompt(input, style, "Enter movie name to delete: ")? else {
        return Ok(());
    };
    match store.delete(&title) {
        Ok(()) => println!("{} {title}", style.paint(GREEN, "Deleted:")),
        Err(error) => report_error(style, &error),
    }
    Ok(())
}

fn update_movie(
    store: &mut MovieStore,
    style: &Style,
    input: &mut impl BufRead,
) -> eyre::Result<()> {
    let Some(title) = prompt(input, style, "Enter movie name to update: ")? else {
        return Ok(());
    };
    if store.rating(title.trim()).is_none() {
        report_error(style, &StoreError::NotFound(title.trim().to_string()));
        return Ok(());
    }
    let Some(rating) = read_rating(input, style, "Enter new rating (1-10): ")? else {
        return Ok(());
    };
    match store.update(&title, rating) {
        Ok(()) => println!("{} {title}: {rating}", style.paint(GREEN, "Updated:")),
        Err(error) => report_error(style, &error),
    }
    Ok(())
}

/// Rating strings are validated here, before the store is ever called.
fn read_rating(
    input: &mut impl BufRead,
    style: &Style,
    message: &str,
) -> eyre::Result<Option<f64>> {
    let Some(raw) = prompt(input, style, message)? else {
        return Ok(None);
    };
    match store::parse_rating(&raw) {
        Ok(rating) => Ok(Some(rating)),
        Err(error) => {
            report_error(style, &error);
            Ok(None)
        }
    }
}

fn show_stats(store: &MovieStore, style: &Style) {
    let stats = match store.stats() {
        Ok(stats) => stats,
        Err(error) => return report_error(style, &error),
    };
    println!();
    println!("{}", style.paint(MAGENTA, &style.paint(BOLD, "=== Stats ===")));
    println!("Average rating: {:.2}", stats.mean);
    println!("Median rating: {:.2}", stats.median);
    println!("{}", style.paint(GREEN, "Best movie(s):"));
    for title in &stats.best {
        println!("  {title}: {}", stats.max);
    }
    println!("{}", style.paint(RED, "Worst movie(s):"));
    for title in &stats.worst {
        println!("  {title}: {}", stats.min);
    }
}

fn random_movie(store: &MovieStore, style: &Style) {
    match store.random_pick(&mut thread_rng()) {
        Ok((title, rating)) => println!(
            "{} {title}: {}",
            style.paint(MAGENTA, "Random pick:"),
            style.paint(YELLOW, &rating.to_string())
        ),
        Err(error) => report_error(style, &error),
    }
}

fn search_movies(
    store: &MovieStore,
    style: &Style,
    input: &mut impl BufRead,
) -> eyre::Result<()> {
    let Some(query) = prompt(input, style, "Enter part of movie name: ")? else {
        return Ok(());
    };
    match store.search(&query) {
        Ok(SearchOutcome::Exact(matches)) => {
            println!("{}", style.paint(GREEN, "Matches found:"));
            for (title, rating) in matches {
                println!("{title}, {rating}");
            }
        }
        Ok(SearchOutcome::Suggestions(suggestions)) => {
            println!();
            report(style, &format!("The movie \"{}\" does not exist.", query.trim()));
            println!("{}", style.paint(CYAN, "Did you mean:"));
            for (title, _) in suggestions {
                println!("- {title}");
            }
        }
        Ok(SearchOutcome::NoMatches) => report(
            style,
            &format!(
                "No matches or similar titles found for \"{}\".",
                query.trim()
            ),
        ),
        Err(error) => report_error(style, &error),
    }
    Ok(())
}

fn sorted_by_rating(store: &MovieStore, style: &Style) {
    let sorted = match store.sorted_by_rating() {
        Ok(sorted) => sorted,
        Err(error) => return report_error(style, &error),
    };
    println!(
        "{}",
        style.paint(MAGENTA, &style.paint(BOLD, "Movies sorted by rating:"))
    );
    for (title, rating) in sorted {
        print_entry(style, &title, rating);
    }
}

fn export_histogram(
    store: &MovieStore,
    style: &Style,
    input: &mut impl BufRead,
) -> eyre::Result<()> {
    if store.is_empty() {
        report_error(style, &StoreError::EmptyStore);
        return Ok(());
    }
    let Some(filename) = prompt(
        input,
        style,
        "Enter filename to save histogram (e.g. ratings_histogram.png): ",
    )?
    else {
        return Ok(());
    };
    if filename.is_empty() {
        report(style, "Filename cannot be empty.");
        return Ok(());
    }
    match histogram::render(&store.ratings(), Path::new(&filename)) {
        Ok(()) => println!(
            "{} {filename}",
            style.paint(GREEN, "Histogram saved to")
        ),
        Err(error) => report(style, &format!("{error:#}")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_counts() {
        assert_eq!(pluralize(1, "movie"), "1 movie");
        assert_eq!(pluralize(0, "movie"), "0 movies");
        assert_eq!(pluralize(7, "movie"), "7 movies");
    }

    #[test]
    fn disabled_style_leaves_text_plain() {
        let style = Style::new(false);
        assert_eq!(style.paint(RED, "oops"), "oops");
        let style = Style::new(true);
        assert_eq!(style.paint(RED, "oops"), "\x1b[31moops\x1b[0m");
    }
}
