use content_core::backend::credentials::EnvToken;
use content_core::backend::http::HttpContentBackend;
use content_core::config::ClientConfig;
use content_core::content::clipboard::clipboard_text;
use content_core::content::mapper::normalize_file;
use content_core::content::model::{Channel, RawContentRecord};
use content_core::content::persist::{to_full_update_request, to_update_request};
use content_core::content::render::{render_markdown, render_slot, DisplayNode};
use content_core::error::CoreError;
use content_core::session::editor::EditSession;

const USAGE: &str = "usage: content_inspect render <record.json>\n       \
content_inspect copy <record.json> <channel>\n       \
content_inspect update <record.json> <channel> <text> [--full]\n       \
content_inspect save <record.json> <channel> <text>";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    let result = match args[1].as_str() {
        "render" => cmd_render(&args[2]),
        "copy" if args.len() >= 4 => channel_arg(&args[3]).and_then(|c| cmd_copy(&args[2], c)),
        "update" if args.len() >= 5 => {
            let full = args.get(5).map(|a| a == "--full").unwrap_or(false);
            channel_arg(&args[3]).and_then(|c| cmd_update(&args[2], c, &args[4], full))
        }
        "save" if args.len() >= 5 => {
            channel_arg(&args[3]).and_then(|c| cmd_save(&args[2], c, &args[4]))
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        match e {
            CoreError::MissingRecord => eprintln!("content not found: {}", args[2]),
            other => eprintln!("content_inspect error: {}", other),
        }
        std::process::exit(1);
    }
}

fn channel_arg(raw: &str) -> Result<Channel, CoreError> {
    Channel::from_key(raw).ok_or_else(|| {
        let known: Vec<&str> = Channel::ALL.iter().map(|c| c.backend_key()).collect();
        CoreError::InvalidInput(format!(
            "unknown channel '{}' (expected one of: {})",
            raw,
            known.join(", ")
        ))
    })
}

fn cmd_render(path: &str) -> Result<(), CoreError> {
    let model = normalize_file(path)?;
    println!(
        "{} | trend: {} | generated: {}",
        model.brand_label,
        model.trend.as_deref().unwrap_or("-"),
        model.generated_at.as_deref().unwrap_or("-")
    );
    println!();
    for channel in Channel::ALL {
        let node = render_slot(model.channels.get(channel), model.is_edited(channel));
        if node == DisplayNode::NotGenerated {
            continue;
        }
        print!("{}", render_markdown(channel.display_name(), &node));
        println!();
    }
    Ok(())
}

fn cmd_copy(path: &str, channel: Channel) -> Result<(), CoreError> {
    let model = normalize_file(path)?;
    println!("{}", clipboard_text(model.channel(channel)));
    Ok(())
}

fn cmd_update(path: &str, channel: Channel, text: &str, full: bool) -> Result<(), CoreError> {
    let mut model = normalize_file(path)?;
    model.set_channel_text(channel, text);
    let payload = if full {
        to_full_update_request(&model)
    } else {
        to_update_request(&model)
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn cmd_save(path: &str, channel: Channel, text: &str) -> Result<(), CoreError> {
    let config = ClientConfig::from_env()?;
    let backend = HttpContentBackend::new(config, EnvToken::default());

    let raw = RawContentRecord::from_json_str(&std::fs::read_to_string(path)?)?;
    let mut session = EditSession::open(Some(&raw))?;
    session.edit(channel, text);
    let outcome = session.save(&backend)?;
    log::info!("save outcome: {:?}", outcome);
    if let Some(notice) = session.notice() {
        println!("{}", notice.message);
    }
    Ok(())
}
