use std::{
    env,
    path::Path,
    process,
};

use pinlian::{
    gui,
    import,
    storage::JsonStore,
};

fn main() -> eframe::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.get(1).map(String::as_str) == Some("import") {
        let Some(dir) = args.get(2) else {
            eprintln!("Usage: pinlian import <directory>");
            process::exit(2);
        };
        run_import(Path::new(dir));
        return Ok(());
    }

    let store = match JsonStore::load() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open the phrase store: {}", e);
            process::exit(1);
        }
    };

    gui::run_gui(store)
}

fn run_import(dir: &Path) {
    let mut store = match JsonStore::load() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open the phrase store: {}", e);
            process::exit(1);
        }
    };

    match import::import_directory(&mut store, dir) {
        Ok(report) => {
            println!("{} phrases imported.", report.inserted);
        }
        Err(e) => {
            eprintln!("Import failed: {}", e);
            process::exit(1);
        }
    }
}
