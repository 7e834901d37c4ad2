use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use snipstash::api::{CmdMessage, ConfigAction, MessageLevel, SnippetPage, StashApi};
use snipstash::bus::{spawn_store_worker, Reply, Request, SenderMeta, StoreBus};
use snipstash::capture::{
    extract_context, undo_requested, validate_selection, SNIPPET_MARKER, UNDO_WINDOW_MS,
};
use snipstash::clipboard::copy_to_clipboard;
use snipstash::commands::helpers::preview;
use snipstash::config::StashConfig;
use snipstash::editor::edit_text;
use snipstash::error::{Result, StashError};
use snipstash::model::{Snippet, SnippetPatch};
use snipstash::store::fs::FileVault;
use snipstash::store::SnippetStore;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

mod args;
use args::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: StashApi<FileVault>,
    vault_dir: PathBuf,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = init_context()?;

    match cli.command {
        Some(Commands::Capture {
            text,
            from,
            url,
            title,
            no_undo,
        }) => handle_capture(&ctx, text, from, url, title, no_undo).await,
        Some(Commands::List { query, page }) => handle_list(&ctx, query, page),
        Some(Commands::View { selector }) => handle_view(&ctx, &selector),
        Some(Commands::Edit { selector, text }) => handle_edit(&ctx, &selector, text),
        Some(Commands::Delete { selectors, yes }) => handle_delete(&ctx, &selectors, yes),
        Some(Commands::Copy { selector }) => handle_copy(&ctx, &selector),
        Some(Commands::Fav { selectors }) => handle_favorite(&ctx, &selectors, true),
        Some(Commands::Unfav { selectors }) => handle_favorite(&ctx, &selectors, false),
        Some(Commands::Tag { selector, tags }) => handle_tag(&ctx, &selector, tags),
        Some(Commands::Note { selector, note }) => handle_note(&ctx, &selector, note),
        Some(Commands::Set {
            selectors,
            color,
            clear_color,
            folder,
            clear_folder,
        }) => handle_set(&ctx, &selectors, color, clear_color, folder, clear_folder),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, 1),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn init_context() -> Result<AppContext> {
    let vault_dir = match std::env::var_os("SNIPSTASH_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let proj_dirs = ProjectDirs::from("com", "snipstash", "snipstash")
                .ok_or_else(|| StashError::Store("Could not determine data dir".to_string()))?;
            proj_dirs.data_dir().to_path_buf()
        }
    };

    let api = StashApi::new(open_vault(&vault_dir)?, vault_dir.clone());
    Ok(AppContext { api, vault_dir })
}

fn open_vault(vault_dir: &Path) -> Result<SnippetStore<FileVault>> {
    let config = StashConfig::load(vault_dir).unwrap_or_default();
    Ok(SnippetStore::with_backend(
        FileVault::new(vault_dir.to_path_buf()).with_quota(config.quota_bytes),
    ))
}

async fn handle_capture(
    ctx: &AppContext,
    text: String,
    from: Option<PathBuf>,
    url: String,
    title: String,
    no_undo: bool,
) -> Result<()> {
    let selection = validate_selection(&text)?.to_string();

    // A file source doubles as the url unless one was given explicitly
    let url = if url.is_empty() {
        from.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    } else {
        url
    };

    let context = match read_document(from)? {
        Some(document) => extract_context(&document, &selection),
        None => String::new(),
    };

    let bus = spawn_store_worker(open_vault(&ctx.vault_dir)?);
    let reply = bus
        .request(Request::Capture {
            text: selection.clone(),
            context,
            meta: SenderMeta {
                url,
                page_title: title,
            },
        })
        .await?;

    let id = match reply {
        Reply::Saved { id } => id,
        Reply::Failed { error } => return Err(StashError::Api(error)),
        Reply::Deleted => return Err(StashError::Bus("unexpected reply".to_string())),
    };

    println!("{}", format!("Captured: {}", preview(&selection)).green());

    if !no_undo && std::io::stdin().is_terminal() {
        offer_undo(&bus, id).await?;
    }
    Ok(())
}

/// Hold the door open for a few seconds so a slip of the finger can be
/// taken back. Typing `u` before the window closes deletes the capture.
async fn offer_undo(bus: &StoreBus, id: Uuid) -> Result<()> {
    use std::io::Write;

    print!("Press u + Enter within 5s to undo: ");
    std::io::stdout().flush().map_err(StashError::Io)?;

    // The reader must be a detached thread, not spawn_blocking: runtime
    // shutdown waits for blocking tasks, which would keep the process
    // alive after the window until Enter arrives.
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_ok() {
            let _ = tx.send(line);
        }
    });

    if undo_requested(&rx, UNDO_WINDOW_MS) {
        match bus.request(Request::Delete { id }).await? {
            Reply::Deleted => println!("{}", "Capture undone.".dimmed()),
            Reply::Failed { error } => return Err(StashError::Api(error)),
            Reply::Saved { .. } => return Err(StashError::Bus("unexpected reply".to_string())),
        }
    } else {
        println!();
    }
    Ok(())
}

/// The document for context extraction comes from --from, or from piped
/// stdin, or nowhere at all.
fn read_document(from: Option<PathBuf>) -> Result<Option<String>> {
    if let Some(path) = from {
        return Ok(Some(
            std::fs::read_to_string(&path).map_err(StashError::Io)?,
        ));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).map_err(StashError::Io)?;
    if buffer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}

fn handle_list(ctx: &AppContext, query: Option<String>, page: usize) -> Result<()> {
    let result = ctx.api.list(query.as_deref().unwrap_or(""), page)?;
    if let Some(page) = &result.page {
        print_page(page);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.view(selector)?;
    print_detail(&result.affected_snippets);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, selector: &str, text: Option<String>) -> Result<()> {
    let new_text = match text {
        Some(t) => t,
        None => {
            let current = ctx.api.view(selector)?;
            let snippet = current
                .affected_snippets
                .first()
                .ok_or_else(|| StashError::Api("Nothing to edit".to_string()))?;
            edit_text(&snippet.text)?
        }
    };

    let result = ctx.api.edit(selector, &new_text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, selectors: &[String], yes: bool) -> Result<()> {
    let skip_confirm = yes || !std::io::stdin().is_terminal();
    let result = ctx.api.delete(selectors, skip_confirm)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.view(selector)?;
    let snippet = result
        .affected_snippets
        .first()
        .ok_or_else(|| StashError::Api("Nothing to copy".to_string()))?;

    copy_to_clipboard(&snippet.text)?;
    println!("Snippet copied to clipboard.");
    Ok(())
}

fn handle_favorite(ctx: &AppContext, selectors: &[String], favorite: bool) -> Result<()> {
    let patch = SnippetPatch {
        is_favorite: Some(favorite),
        ..Default::default()
    };
    let result = ctx.api.annotate(selectors, &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tag(ctx: &AppContext, selector: &str, tags: Vec<String>) -> Result<()> {
    let patch = SnippetPatch {
        tags: Some(tags),
        ..Default::default()
    };
    let result = ctx.api.annotate(&[selector], &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_note(ctx: &AppContext, selector: &str, note: String) -> Result<()> {
    let patch = SnippetPatch {
        notes: Some(note),
        ..Default::default()
    };
    let result = ctx.api.annotate(&[selector], &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    ctx: &AppContext,
    selectors: &[String],
    color: Option<String>,
    clear_color: bool,
    folder: Option<String>,
    clear_folder: bool,
) -> Result<()> {
    let patch = SnippetPatch {
        color: if clear_color { Some(None) } else { color.map(Some) },
        folder_id: if clear_folder {
            Some(None)
        } else {
            folder.map(Some)
        },
        ..Default::default()
    };
    let result = ctx.api.annotate(selectors, &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        println!("quota_bytes = {}", config.quota_bytes);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_detail(snippets: &[Snippet]) {
    for (i, snippet) in snippets.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}",
            snippet.id.to_string().yellow(),
            snippet.page_title.bold()
        );
        if !snippet.url.is_empty() {
            println!("{}", snippet.url.dimmed());
        }
        println!(
            "{}",
            format!("captured {}", format_time_ago(snippet.timestamp).trim()).dimmed()
        );
        println!("--------------------------------");
        println!("{}", snippet.text);
        if !snippet.context.is_empty() {
            println!("--------------------------------");
            // Keep the marker readable inside the dimmed context
            match snippet.context.split_once(SNIPPET_MARKER) {
                Some((before, after)) => println!(
                    "{}{}{}",
                    before.dimmed(),
                    SNIPPET_MARKER.yellow(),
                    after.dimmed()
                ),
                None => println!("{}", snippet.context.dimmed()),
            }
        }

        let mut annotations = Vec::new();
        if snippet.is_favorite {
            annotations.push(format!("{} favorite", FAV_MARKER));
        }
        if !snippet.tags.is_empty() {
            annotations.push(format!("tags: {}", snippet.tags.join(", ")));
        }
        if !snippet.notes.is_empty() {
            annotations.push(format!("note: {}", snippet.notes));
        }
        if let Some(color) = &snippet.color {
            annotations.push(format!("color: {}", color));
        }
        if let Some(folder) = &snippet.folder_id {
            annotations.push(format!("folder: {}", folder));
        }
        if let Some(original) = &snippet.original_text {
            annotations.push(format!("originally: {}", preview(original)));
        }
        if !annotations.is_empty() {
            println!("--------------------------------");
            for line in annotations {
                println!("{}", line.dimmed());
            }
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FAV_MARKER: &str = "★";

fn print_page(page: &SnippetPage) {
    if page.items.is_empty() {
        return;
    }

    for item in &page.items {
        let snippet = &item.snippet;
        let idx_str = format!("{}. ", item.position);

        let left_prefix = if snippet.is_favorite {
            format!("  {} ", FAV_MARKER)
        } else {
            "    ".to_string()
        };
        let left_prefix_width = left_prefix.width();

        let time_ago = format_time_ago(snippet.timestamp);

        let text_preview: String = snippet
            .text
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let source = if snippet.page_title.is_empty() {
            snippet.url.clone()
        } else {
            snippet.page_title.clone()
        };
        let line = if source.is_empty() {
            text_preview
        } else {
            format!("{} ({})", text_preview, source)
        };

        let idx_width = idx_str.width();
        let fixed_width = left_prefix_width + idx_width + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let line_display = truncate_to_width(&line, available);

        let line_width = line_display.width();
        let padding = available.saturating_sub(line_width);

        let idx_colored = if snippet.is_favorite {
            idx_str.yellow()
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{}{}  {}",
            left_prefix,
            idx_colored,
            line_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }

    if page.total_pages > 1 {
        println!();
        println!(
            "{}",
            format!(
                "Page {} of {} ({} snippets)",
                page.page, page.total_pages, page.total
            )
            .dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
