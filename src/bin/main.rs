use std::env;
use std::io::{stdin, stdout, Write};
use std::path::Path;

use crossterm::style::Stylize;
use wordart_core::{
    Database, GlyphCatalog, RenderingEngine, RenderingService, WordArtError, WordRecord,
    WordStore, WordUpdate,
};

const DEFAULT_DB_PATH: &str = "words.db";
const DEFAULT_ADMIN_KEY: &str = "admin-secret-key";
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;

fn main() {
    env_logger::init();

    let db_path = env::var("WORDART_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let db = match Database::open(Path::new(&db_path)) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "could not open the word store:".red(), e);
            std::process::exit(1);
        }
    };
    let service = RenderingService::new(
        RenderingEngine::new(GlyphCatalog::new()),
        WordStore::new(db),
    );
    let admin_key = env::var("ADMIN_API_KEY").unwrap_or_else(|_| DEFAULT_ADMIN_KEY.to_string());
    let mut admin = false;

    println!("{}", "Word Art Engine".bold());
    println!("Database: {db_path}. Type 'help' for commands, 'exit' to quit.");

    loop {
        print!("\n> ");
        stdout().flush().unwrap();
        let mut input = String::new();
        if stdin().read_line(&mut input).unwrap() == 0 {
            break; // EOF
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "exit" => break,
            "help" => print_help(),
            "admin" => {
                if !rest.is_empty() && rest == admin_key {
                    admin = true;
                    println!("{}", "admin commands unlocked".green());
                } else {
                    println!("{}", "unauthorized".red());
                }
            }
            "render" => match service.render_and_store(rest) {
                Ok(record) => print_record(&record),
                Err(e) => report(&e),
            },
            "get" => match parse_id(rest) {
                Some(id) => match service.get_word(id) {
                    Ok(record) => print_record(&record),
                    Err(e) => report(&e),
                },
                None => println!("{}", "usage: get <id>".yellow()),
            },
            "list" => {
                let mut args = rest.split_whitespace();
                let page = parse_or(args.next(), DEFAULT_PAGE);
                let size = parse_or(args.next(), DEFAULT_PAGE_SIZE);
                match service.list_words(page, size) {
                    Ok(page) => print_json(&page),
                    Err(e) => report(&e),
                }
            }
            "search" => {
                let mut args = rest.split_whitespace();
                let filter = args.next();
                let page = parse_or(args.next(), DEFAULT_PAGE);
                let size = parse_or(args.next(), DEFAULT_PAGE_SIZE);
                match service.search_words(filter, page, size) {
                    Ok(page) => print_json(&page),
                    Err(e) => report(&e),
                }
            }
            "update" if require_admin(admin) => {
                let (id, text) = rest.split_once(' ').unwrap_or((rest, ""));
                match (parse_id(id), text.trim()) {
                    (Some(id), text) if !text.is_empty() => {
                        let update = WordUpdate {
                            text: Some(text.to_string()),
                            ..Default::default()
                        };
                        match service.update_word(id, update) {
                            Ok(record) => print_record(&record),
                            Err(e) => report(&e),
                        }
                    }
                    _ => println!("{}", "usage: update <id> <new text>".yellow()),
                }
            }
            "delete" if require_admin(admin) => match parse_id(rest) {
                Some(id) => match service.delete_word(id) {
                    Ok(true) => println!("{}", format!("word {id} deleted").green()),
                    Ok(false) => println!("{}", format!("no word found with id {id}").red()),
                    Err(e) => report(&e),
                },
                None => println!("{}", "usage: delete <id>".yellow()),
            },
            "stats" if require_admin(admin) => match service.statistics() {
                Ok(stats) => print_json(&stats),
                Err(e) => report(&e),
            },
            "update" | "delete" | "stats" => {}
            other => println!("{}", format!("unknown command '{other}'").red()),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  render <word>                render a word and store it");
    println!("  get <id>                     fetch a stored word (counts as usage)");
    println!("  list [page] [size]           page through stored words");
    println!("  search <text> [page] [size]  substring search");
    println!("  admin <key>                  unlock the admin commands below");
    println!("  update <id> <new text>       replace a word's text (re-renders)");
    println!("  delete <id>                  remove a word");
    println!("  stats                        usage statistics");
    println!("  exit                         quit");
}

fn print_record(record: &WordRecord) {
    println!("{}", record.rendering.as_str().cyan());
    print_json(record);
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

fn report(e: &WordArtError) {
    println!("{}", format!("error: {e}").red());
}

fn require_admin(admin: bool) -> bool {
    if !admin {
        println!("{}", "unauthorized: run 'admin <key>' first".red());
    }
    admin
}

fn parse_id(s: &str) -> Option<i64> {
    s.parse().ok()
}

fn parse_or(arg: Option<&str>, default: u32) -> u32 {
    arg.and_then(|s| s.parse().ok()).unwrap_or(default)
}
