use clap::Parser;
use colored::*;
use notemap::api::VaultApi;
use notemap::error::{Result, VaultError};
use notemap::model::NoteData;
use notemap::store::fs::FileStore;
use std::collections::BTreeMap;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands, FolderCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut api = VaultApi::new(init_store(&cli)?);

    match cli.command {
        Commands::List => handle_list(&api),
        Commands::View { path } => handle_view(&api, &path),
        Commands::Create {
            path,
            content,
            template,
            vars,
        } => handle_create(&mut api, &path, &content, template.as_deref(), &vars),
        Commands::Append { path, content } => handle_append(&mut api, &path, &content),
        Commands::Delete { path } => handle_delete(&mut api, &path),
        Commands::Sections { path } => handle_sections(&api, &path),
        Commands::Section {
            path,
            heading,
            replace,
        } => handle_section(&mut api, &path, &heading, replace.as_deref()),
        Commands::Links { path } => handle_links(&api, &path),
        Commands::Backlinks { path } => handle_backlinks(&api, &path),
        Commands::Graph => handle_graph(&api),
        Commands::Tags { tag } => handle_tags(&api, tag.as_deref()),
        Commands::Tag { path, tag, remove } => handle_tag(&mut api, &path, &tag, remove),
        Commands::Search { query } => handle_search(&api, &query),
        Commands::Templates => handle_templates(&api),
        Commands::Folder(cmd) => handle_folder(&mut api, cmd),
        Commands::Stats => handle_stats(&api),
    }
}

fn init_store(cli: &Cli) -> Result<FileStore> {
    let root = cli
        .vault
        .clone()
        .or_else(|| std::env::var("NOTEMAP_VAULT").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut store = FileStore::new(root);
    if let Ok(dir) = std::env::var("NOTEMAP_TEMPLATE_DIR") {
        store = store.with_template_dir(&dir);
    }
    if let Ok(list) = std::env::var("NOTEMAP_EXCLUDE") {
        let prefixes: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        store = store.with_excluded(prefixes);
    }
    Ok(store)
}

fn handle_list(api: &VaultApi<FileStore>) -> Result<()> {
    let notes = api.list_notes()?;
    if notes.is_empty() {
        println!("{}", "No notes found.".dimmed());
        return Ok(());
    }
    for path in notes {
        println!("{}", path);
    }
    Ok(())
}

fn handle_view(api: &VaultApi<FileStore>, path: &str) -> Result<()> {
    let note = api.read_note(path)?;
    print_note(&note);
    Ok(())
}

fn handle_create(
    api: &mut VaultApi<FileStore>,
    path: &str,
    content: &str,
    template: Option<&str>,
    vars: &[String],
) -> Result<()> {
    let variables = parse_vars(vars)?;
    let outcome = api.create_note(path, content, None, template, &variables)?;
    match &outcome.template_applied {
        Some(t) => println!(
            "{}",
            format!("Created {} (template: {})", outcome.path, t).green()
        ),
        None => println!("{}", format!("Created {}", outcome.path).green()),
    }
    Ok(())
}

fn handle_append(api: &mut VaultApi<FileStore>, path: &str, content: &str) -> Result<()> {
    let canonical = api.append_to_note(path, content)?;
    println!("{}", format!("Appended to {}", canonical).green());
    Ok(())
}

fn handle_delete(api: &mut VaultApi<FileStore>, path: &str) -> Result<()> {
    let canonical = api.delete_note(path)?;
    println!("{}", format!("Deleted {}", canonical).green());
    Ok(())
}

fn handle_sections(api: &VaultApi<FileStore>, path: &str) -> Result<()> {
    let sections = api.list_sections(path)?;
    for section in sections {
        // The heading field holds the raw line, `#` markers included.
        let heading = match &section.heading {
            Some(h) => h.clone(),
            None => "(preamble)".to_string(),
        };
        let lines = if section.content.is_empty() {
            0
        } else {
            section.content.split('\n').count()
        };
        println!(
            "{:>3}  {}  {}",
            section.index,
            heading.bold(),
            format!("{} lines", lines).dimmed()
        );
    }
    Ok(())
}

fn handle_section(
    api: &mut VaultApi<FileStore>,
    path: &str,
    heading: &str,
    replace: Option<&str>,
) -> Result<()> {
    match replace {
        Some(content) => {
            let canonical = api.update_section(path, heading, content)?;
            println!("{}", format!("Updated section in {}", canonical).green());
        }
        None => {
            let section = api.read_section(path, heading)?;
            println!("{}", section.content);
        }
    }
    Ok(())
}

fn handle_links(api: &VaultApi<FileStore>, path: &str) -> Result<()> {
    for target in api.forward_links(path)? {
        println!("{}", target);
    }
    Ok(())
}

fn handle_backlinks(api: &VaultApi<FileStore>, path: &str) -> Result<()> {
    let sources = api.backlinks(path)?;
    if sources.is_empty() {
        println!("{}", "No backlinks.".dimmed());
        return Ok(());
    }
    for source in sources {
        println!("{}", source);
    }
    Ok(())
}

fn handle_graph(api: &VaultApi<FileStore>) -> Result<()> {
    let graph = api.graph()?;
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

fn handle_tags(api: &VaultApi<FileStore>, tag: Option<&str>) -> Result<()> {
    match tag {
        Some(tag) => {
            for path in api.search_by_tag(tag)? {
                println!("{}", path);
            }
        }
        None => {
            // Pad before coloring: escape codes would count toward the width.
            for entry in api.list_tags()? {
                println!("{}  #{}", format!("{:>5}", entry.count).yellow(), entry.name);
            }
        }
    }
    Ok(())
}

fn handle_tag(api: &mut VaultApi<FileStore>, path: &str, tag: &str, remove: bool) -> Result<()> {
    let changed = if remove {
        api.remove_tag(path, tag)?
    } else {
        api.add_tag(path, tag)?
    };
    let verb = if remove { "Removed" } else { "Added" };
    if changed {
        println!("{}", format!("{} #{}", verb, tag.trim_start_matches('#')).green());
    } else {
        println!("{}", "No change needed.".dimmed());
    }
    Ok(())
}

fn handle_search(api: &VaultApi<FileStore>, query: &str) -> Result<()> {
    let hits = api.search(query)?;
    if hits.is_empty() {
        println!("{}", "No matches.".dimmed());
        return Ok(());
    }
    for hit in hits {
        println!("{}", hit.path.bold());
        for line in &hit.matches {
            println!("  {}", line.dimmed());
        }
    }
    Ok(())
}

fn handle_templates(api: &VaultApi<FileStore>) -> Result<()> {
    let templates = api.list_templates()?;
    if templates.is_empty() {
        println!("{}", "No templates found.".dimmed());
        return Ok(());
    }
    for name in templates {
        println!("{}", name);
    }
    Ok(())
}

fn handle_folder(api: &mut VaultApi<FileStore>, cmd: FolderCommands) -> Result<()> {
    match cmd {
        FolderCommands::List => {
            let mappings = api.folder_mappings()?;
            if mappings.is_empty() {
                println!("{}", "No folder mappings.".dimmed());
                return Ok(());
            }
            for (pattern, template) in mappings {
                println!("{} -> {}", pattern.bold(), template);
            }
        }
        FolderCommands::Set { pattern, template } => {
            let (key, template) = api.set_folder_template(&pattern, &template)?;
            println!("{}", format!("Mapped {} -> {}", key, template).green());
        }
        FolderCommands::Remove { pattern } => {
            let template = api.remove_folder_template(&pattern)?;
            println!("{}", format!("Removed mapping to {}", template).green());
        }
        FolderCommands::Resolve { folder } => match api.resolve_folder_template(&folder)? {
            Some(template) => println!("{}", template),
            None => println!("{}", "No template for this folder.".dimmed()),
        },
    }
    Ok(())
}

fn handle_stats(api: &VaultApi<FileStore>) -> Result<()> {
    let stats = api.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn print_note(note: &NoteData) {
    println!("{}", note.path.bold());
    if !note.metadata.is_empty() {
        let tags = note.metadata.tags();
        if !tags.is_empty() {
            let rendered: Vec<String> = tags.iter().map(|t| format!("#{}", t)).collect();
            println!("{}", rendered.join(" ").yellow());
        }
    }
    println!("--------------------------------");
    println!("{}", note.content);
}

fn parse_vars(vars: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for pair in vars {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(VaultError::InvalidArgument(format!(
                "expected KEY=VALUE, got: {}",
                pair
            )));
        };
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}
